pub mod distance;
pub mod test_utils;

pub use distance::{distance_km, EARTH_RADIUS_KM};
