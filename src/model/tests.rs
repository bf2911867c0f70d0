use std::path::Path;

use ndarray::Array;
use serde_json::{Map, Value, json};

use super::{
    AxisCalibration, CANONICAL_FIELDS, DisplayArray, MetadataRecord, RawArray, UnitScale,
    normalize_unit,
};

#[test]
fn recognized_units_scale_to_meters() {
    let tokens = [
        ("um", 1e-6),
        ("µm", 1e-6),
        ("μm", 1e-6),
        ("[u_m]", 1e-6),
        ("u_m", 1e-6),
        ("Micrometers", 1e-6),
        ("m", 1.0),
        (" meter ", 1.0),
        ("nm", 1e-9),
        ("[n_m]", 1e-9),
        ("NM", 1e-9),
        ("A", 1e-10),
        ("Ang", 1e-10),
        ("Å", 1e-10),
        ("\u{212B}", 1e-10),
        ("angstrom", 1e-10),
    ];
    for (token, expected) in tokens {
        match normalize_unit(token) {
            UnitScale::Physical { factor, unit } => {
                assert!(factor > 0.0, "{token}");
                assert_eq!(factor, expected, "{token}");
                assert_eq!(unit, "m", "{token}");
            }
            UnitScale::Pixels => panic!("`{token}` should be recognized"),
        }
    }
}

#[test]
fn unknown_units_fall_back_to_pixels() {
    for token in ["", "   ", "pixels", "1/nm", "eV", "s", "mrad"] {
        assert_eq!(normalize_unit(token), UnitScale::Pixels, "{token:?}");
    }
}

#[test]
fn from_native_rejects_non_positive_scales() {
    assert_eq!(
        AxisCalibration::from_native(0.0, 3.0, "nm"),
        AxisCalibration::pixels()
    );
    assert_eq!(
        AxisCalibration::from_native(-1.0, 0.0, "nm"),
        AxisCalibration::pixels()
    );
    assert_eq!(
        AxisCalibration::from_native(f64::NAN, 0.0, "nm"),
        AxisCalibration::pixels()
    );
    let axis = AxisCalibration::from_native(2.0, 5.0, "nm");
    assert!((axis.scale - 2e-9).abs() < 1e-20);
    assert!((axis.origin - 5e-9).abs() < 1e-20);
    assert_eq!(axis.unit, "m");
}

#[test]
fn record_always_carries_canonical_fields() {
    let mut entries = Map::new();
    entries.insert("Microscope".into(), json!("Titan"));
    let record = MetadataRecord::with_calibration(entries, None, None);
    for field in CANONICAL_FIELDS {
        assert!(record.contains_key(field), "missing {field}");
    }
    assert_eq!(record.get("PhysicalSizeX"), Some(&json!(1.0)));
    assert_eq!(record.get("PhysicalSizeXOrigin"), Some(&json!(0.0)));
    assert_eq!(record.get("PhysicalSizeXUnit"), Some(&json!("")));
    assert_eq!(record.get("Microscope"), Some(&json!("Titan")));
}

#[test]
fn canonical_fields_override_extracted_entries() {
    let mut entries = Map::new();
    entries.insert("PhysicalSizeX".into(), json!("garbage"));
    let record = MetadataRecord::with_calibration(
        entries,
        Some(AxisCalibration::from_native(0.5, 0.0, "nm")),
        None,
    );
    let calibration = record.calibration();
    assert!((calibration.x.scale - 0.5e-9).abs() < 1e-20);
    assert!(calibration.y.scale == 1.0 && !calibration.y.is_physical());
    assert!(record.get("PhysicalSizeX").is_some_and(Value::is_number));
}

#[test]
fn unrecognized_record_names_the_file() {
    let record = MetadataRecord::unrecognized(Path::new("/data/notes.xyz"));
    assert_eq!(record.get("file name"), Some(&json!("/data/notes.xyz")));
    assert_eq!(record.len(), 7);
}

#[test]
fn render_text_lists_entries_in_order() {
    let mut entries = Map::new();
    entries.insert("b".into(), json!(2));
    entries.insert("a".into(), json!("text"));
    let record = MetadataRecord::with_calibration(entries, None, None);
    let text = record.render_text(Path::new("sample.dm3"));
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "file name = sample.dm3");
    assert_eq!(lines[1], "b = 2");
    assert_eq!(lines[2], "a = text");
    assert_eq!(lines[3], "PhysicalSizeX = 1.0");
}

#[test]
fn raw_array_rejects_mismatched_calibration() {
    let data = Array::zeros((2, 3)).into_dyn();
    assert!(RawArray::new(data.clone(), vec![1.0], vec!["nm".into(), "nm".into()]).is_err());
    assert!(RawArray::new(data, vec![1.0, 1.0], vec!["nm".into()]).is_err());
}

#[test]
fn plane_calibration_uses_trailing_axes() {
    let data = Array::zeros((4, 2, 3)).into_dyn();
    let raw = RawArray::new(
        data,
        vec![9.0, 2.0, 3.0],
        vec!["s".into(), "nm".into(), "pixels".into()],
    )
    .expect("raw array");
    let calibration = raw.plane_calibration();
    assert!(!calibration.x.is_physical());
    assert!((calibration.y.scale - 2e-9).abs() < 1e-20);
}

#[test]
fn placeholder_is_blank() {
    let placeholder = DisplayArray::placeholder();
    assert_eq!(placeholder.shape(), &[10, 10]);
    assert_eq!(placeholder.min_max(), Some((0.0, 0.0)));
    assert!(!placeholder.partial);
}
