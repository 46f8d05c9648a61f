use std::fmt;

pub mod disabled_parking;
pub mod garage;
pub mod park_and_ride;

pub use disabled_parking::DisabledParking;
pub use garage::Garage;
pub use park_and_ride::ParkAndRide;

/// A raw field that is present but does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    pub field: &'static str,
    pub reason: String,
}

impl ConversionError {
    pub fn new<S: Into<String>>(field: &'static str, reason: S) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl std::error::Error for ConversionError {}
