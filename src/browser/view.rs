use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};

use crate::model::{DisplayArray, MetadataRecord, PlaneCalibration};

/// Displayable array with the calibration of its image plane.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageView {
    pub array: DisplayArray,
    pub calibration: PlaneCalibration,
}

/// Text rendering of a metadata record.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataView {
    pub path: PathBuf,
    pub record: Arc<MetadataRecord>,
}

impl MetadataView {
    pub fn text(&self) -> String {
        self.record.render_text(&self.path)
    }
}

/// What a handler currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum View {
    #[default]
    Blank,
    Image(ImageView),
    Metadata(MetadataView),
}

impl View {
    /// 10x10 zero image shown after a failed load.
    pub fn placeholder() -> Self {
        Self::Image(ImageView {
            array: DisplayArray::placeholder(),
            calibration: PlaneCalibration::default(),
        })
    }

    pub fn summary(&self) -> ViewSummary {
        match self {
            Self::Blank => ViewSummary {
                kind: "blank",
                details: Value::Null,
            },
            Self::Image(view) => {
                let (min, max) = view.array.min_max().unwrap_or((0.0, 0.0));
                ViewSummary {
                    kind: "image",
                    details: json!({
                        "shape": view.array.shape(),
                        "partial": view.array.partial,
                        "min": min,
                        "max": max,
                        "x": {
                            "scale": view.calibration.x.scale,
                            "unit": view.calibration.x.unit_label(),
                        },
                        "y": {
                            "scale": view.calibration.y.scale,
                            "unit": view.calibration.y.unit_label(),
                        },
                    }),
                }
            }
            Self::Metadata(view) => ViewSummary {
                kind: "metadata",
                details: json!({ "text": view.text() }),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSummary {
    pub kind: &'static str,
    pub details: Value,
}
