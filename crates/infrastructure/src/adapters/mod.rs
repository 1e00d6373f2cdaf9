//! Adapters implementing application ports over the integration clients

mod geocoding_adapter;
mod transit_adapter;

pub use geocoding_adapter::GeocodingAdapter;
pub use transit_adapter::TransitAdapter;
