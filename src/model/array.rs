use ndarray::{ArrayD, IxDyn};

use super::{AxisCalibration, CoreError, PlaneCalibration, Result};

/// Shape of the blank image shown after a failed load.
pub const PLACEHOLDER_SHAPE: [usize; 2] = [10, 10];

/// N-dimensional samples as a format library hands them over, with one
/// pixel size and unit per dimension.
#[derive(Debug, Clone)]
pub struct RawArray {
    pub data: ArrayD<f32>,
    pub pixel_size: Vec<f64>,
    pub pixel_unit: Vec<String>,
}

impl RawArray {
    pub fn new(data: ArrayD<f32>, pixel_size: Vec<f64>, pixel_unit: Vec<String>) -> Result<Self> {
        let ndim = data.ndim();
        if pixel_size.len() != ndim {
            return Err(CoreError::CalibrationLength {
                field: "pixel_size",
                data_ndim: ndim,
                found: pixel_size.len(),
            });
        }
        if pixel_unit.len() != ndim {
            return Err(CoreError::CalibrationLength {
                field: "pixel_unit",
                data_ndim: ndim,
                found: pixel_unit.len(),
            });
        }
        if let Some(axis) = data.shape().iter().position(|size| *size == 0) {
            return Err(CoreError::ZeroSizedDimension { axis });
        }
        Ok(Self {
            data,
            pixel_size,
            pixel_unit,
        })
    }

    /// Wraps samples that carry no physical calibration.
    pub fn uncalibrated(data: ArrayD<f32>) -> Self {
        let ndim = data.ndim();
        Self {
            data,
            pixel_size: vec![1.0; ndim],
            pixel_unit: vec![String::new(); ndim],
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Calibration of the image plane: X is the last (fastest) axis, Y the
    /// one before it. Each axis is normalized on its own.
    pub fn plane_calibration(&self) -> PlaneCalibration {
        let ndim = self.ndim();
        PlaneCalibration {
            x: self.axis_calibration(ndim.checked_sub(1)),
            y: self.axis_calibration(ndim.checked_sub(2)),
        }
    }

    fn axis_calibration(&self, axis: Option<usize>) -> AxisCalibration {
        axis.and_then(|axis| {
            let scale = *self.pixel_size.get(axis)?;
            let unit = self.pixel_unit.get(axis)?;
            Some(AxisCalibration::from_native(scale, 0.0, unit))
        })
        .unwrap_or_default()
    }
}

/// Array of rank three or less, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayArray {
    pub data: ArrayD<f32>,
    /// Set when a higher-dimensional array was sliced to fit.
    pub partial: bool,
}

impl DisplayArray {
    pub fn full(data: ArrayD<f32>) -> Self {
        Self {
            data,
            partial: false,
        }
    }

    pub fn placeholder() -> Self {
        Self::full(ArrayD::zeros(IxDyn(&PLACEHOLDER_SHAPE)))
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        }))
    }
}
