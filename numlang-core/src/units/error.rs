use thiserror::Error;

use super::registry::Quantity;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    #[error("unknown unit `{unit}`")]
    UnknownUnit {
        unit: String
    },
    #[error("cannot convert {from_quantity} `{from}` to {to_quantity} `{to}`")]
    IncompatibleUnits {
        from: String,
        from_quantity: Quantity,
        to: String,
        to_quantity: Quantity,
    },
    #[error("unit name `{name}` is already registered")]
    DuplicateUnit {
        name: String
    },
    #[error("conversion ratio of `{unit}` must be a finite non-zero number")]
    InvalidRatio {
        unit: String
    },
}
