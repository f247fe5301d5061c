pub mod geocoding;
pub mod positioning;
pub mod provider;

pub use geocoding::{Geocoder, NominatimGeocoder};
pub use positioning::{FixedPositioning, PositioningCapability};
pub use provider::GeolocationProvider;
