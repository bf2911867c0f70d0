use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{UnitScale, normalize_unit};

pub const PHYSICAL_SIZE_X: &str = "PhysicalSizeX";
pub const PHYSICAL_SIZE_X_ORIGIN: &str = "PhysicalSizeXOrigin";
pub const PHYSICAL_SIZE_X_UNIT: &str = "PhysicalSizeXUnit";
pub const PHYSICAL_SIZE_Y: &str = "PhysicalSizeY";
pub const PHYSICAL_SIZE_Y_ORIGIN: &str = "PhysicalSizeYOrigin";
pub const PHYSICAL_SIZE_Y_UNIT: &str = "PhysicalSizeYUnit";

/// Keys every [`MetadataRecord`] carries.
pub const CANONICAL_FIELDS: [&str; 6] = [
    PHYSICAL_SIZE_X,
    PHYSICAL_SIZE_X_ORIGIN,
    PHYSICAL_SIZE_X_UNIT,
    PHYSICAL_SIZE_Y,
    PHYSICAL_SIZE_Y_ORIGIN,
    PHYSICAL_SIZE_Y_UNIT,
];

/// Physical calibration of one image axis.
///
/// An empty `unit` means the axis is in pixels: scale 1 and origin 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisCalibration {
    pub scale: f64,
    pub origin: f64,
    pub unit: String,
}

impl AxisCalibration {
    pub fn pixels() -> Self {
        Self {
            scale: 1.0,
            origin: 0.0,
            unit: String::new(),
        }
    }

    /// Converts a native `(scale, origin, unit)` triple into meters.
    ///
    /// Unknown units and scales that are not finite and positive fall back
    /// to pixels.
    pub fn from_native(scale: f64, origin: f64, unit: &str) -> Self {
        if !scale.is_finite() || scale <= 0.0 || !origin.is_finite() {
            return Self::pixels();
        }
        match normalize_unit(unit) {
            UnitScale::Physical { factor, unit } => Self {
                scale: scale * factor,
                origin: origin * factor,
                unit: unit.to_string(),
            },
            UnitScale::Pixels => Self::pixels(),
        }
    }

    pub fn is_physical(&self) -> bool {
        !self.unit.is_empty()
    }

    /// Axis label unit, `pixels` for uncalibrated axes.
    pub fn unit_label(&self) -> &str {
        if self.unit.is_empty() {
            "pixels"
        } else {
            &self.unit
        }
    }
}

impl Default for AxisCalibration {
    fn default() -> Self {
        Self::pixels()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaneCalibration {
    pub x: AxisCalibration,
    pub y: AxisCalibration,
}

/// Canonical metadata of one file.
///
/// Keys keep insertion order. The six [`CANONICAL_FIELDS`] are always
/// present, whatever the source format produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetadataRecord {
    entries: Map<String, Value>,
}

impl MetadataRecord {
    /// Builds a record from extracted entries, writing the canonical fields
    /// last. Missing axes default to pixels.
    pub fn with_calibration(
        mut entries: Map<String, Value>,
        x: Option<AxisCalibration>,
        y: Option<AxisCalibration>,
    ) -> Self {
        let x = x.unwrap_or_default();
        let y = y.unwrap_or_default();
        write_axis(
            &mut entries,
            [PHYSICAL_SIZE_X, PHYSICAL_SIZE_X_ORIGIN, PHYSICAL_SIZE_X_UNIT],
            &x,
        );
        write_axis(
            &mut entries,
            [PHYSICAL_SIZE_Y, PHYSICAL_SIZE_Y_ORIGIN, PHYSICAL_SIZE_Y_UNIT],
            &y,
        );
        Self { entries }
    }

    /// Record for a file no extractor understands.
    pub fn unrecognized(path: &Path) -> Self {
        let mut entries = Map::new();
        entries.insert(
            "file name".to_string(),
            Value::String(path.display().to_string()),
        );
        Self::with_calibration(entries, None, None)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn calibration(&self) -> PlaneCalibration {
        PlaneCalibration {
            x: self.read_axis([PHYSICAL_SIZE_X, PHYSICAL_SIZE_X_ORIGIN, PHYSICAL_SIZE_X_UNIT]),
            y: self.read_axis([PHYSICAL_SIZE_Y, PHYSICAL_SIZE_Y_ORIGIN, PHYSICAL_SIZE_Y_UNIT]),
        }
    }

    /// One `key = value` line per entry, headed by the file name.
    pub fn render_text(&self, path: &Path) -> String {
        let mut text = format!("file name = {}\n", path.display());
        for (key, value) in &self.entries {
            text.push_str(&format!("{key} = {}\n", display_value(value)));
        }
        text
    }

    fn read_axis(&self, keys: [&str; 3]) -> AxisCalibration {
        let [scale, origin, unit] = keys;
        AxisCalibration {
            scale: self.get(scale).and_then(value_as_f64).unwrap_or(1.0),
            origin: self.get(origin).and_then(value_as_f64).unwrap_or(0.0),
            unit: self
                .get(unit)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Reads a number, accepting the numeric strings several vendors write.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

fn write_axis(entries: &mut Map<String, Value>, keys: [&str; 3], axis: &AxisCalibration) {
    let [scale, origin, unit] = keys;
    entries.insert(scale.to_string(), number(axis.scale, 1.0));
    entries.insert(origin.to_string(), number(axis.origin, 0.0));
    entries.insert(unit.to_string(), Value::String(axis.unit.clone()));
}

fn number(value: f64, fallback: f64) -> Value {
    serde_json::Number::from_f64(value)
        .or_else(|| serde_json::Number::from_f64(fallback))
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
