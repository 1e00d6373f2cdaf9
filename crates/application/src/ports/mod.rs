//! Port definitions (interfaces to infrastructure)

mod blacklist;
mod city_store;
mod company_directory;
mod geocoding_port;
mod transit_port;

pub use blacklist::BlacklistPort;
pub use city_store::CityStorePort;
pub use company_directory::CompanyDirectoryPort;
pub use geocoding_port::{GeocodedPlace, GeocodingPort};
pub use transit_port::{Station, TrainConnection, TransitPort};

#[cfg(test)]
pub use blacklist::MockBlacklistPort;
#[cfg(test)]
pub use city_store::MockCityStorePort;
#[cfg(test)]
pub use company_directory::MockCompanyDirectoryPort;
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
#[cfg(test)]
pub use transit_port::MockTransitPort;
