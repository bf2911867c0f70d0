use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(
        "calibration length mismatch: data has {data_ndim} dimensions but {field} has {found} entries"
    )]
    CalibrationLength {
        field: &'static str,
        data_ndim: usize,
        found: usize,
    },

    #[error("invalid dimension size 0 at axis {axis}")]
    ZeroSizedDimension { axis: usize },
}
