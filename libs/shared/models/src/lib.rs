pub mod error;
pub mod geo;

pub use geo::{Coordinate, CoordinateError, Position};
