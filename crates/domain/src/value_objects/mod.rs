//! Value objects

mod city_name;
mod country;
mod geo_location;

pub use city_name::CityName;
pub use country::{CountrySet, capitalize_country, normalize_country};
pub use geo_location::{GeoLocation, InvalidCoordinates};
