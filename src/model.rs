mod array;
mod error;
mod record;
mod units;

#[cfg(test)]
mod tests;

pub use array::{DisplayArray, PLACEHOLDER_SHAPE, RawArray};
pub use error::{CoreError, Result};
pub use record::{
    AxisCalibration, CANONICAL_FIELDS, MetadataRecord, PHYSICAL_SIZE_X, PHYSICAL_SIZE_X_ORIGIN,
    PHYSICAL_SIZE_X_UNIT, PHYSICAL_SIZE_Y, PHYSICAL_SIZE_Y_ORIGIN, PHYSICAL_SIZE_Y_UNIT,
    PlaneCalibration, value_as_f64,
};
pub use units::{METERS, UnitScale, normalize_unit};
