use std::fs;
use std::path::Path;
use std::sync::Arc;

use image::{ImageBuffer, Luma};
use ndarray::{ArrayD, IxDyn};
use serde_json::json;
use tempfile::tempdir;

use super::{AppContext, AppError};
use crate::browser::{
    BrowseError, IMAGE_VIEWER, METADATA_VIEWER, MessageLog, TEM_DATA_VIEWER, View,
};
use crate::config::BrowserConfig;
use crate::formats::{EmdContainer, STEMTOMO_VERSION_ATTR};
use crate::model::{RawArray, value_as_f64};
use crate::test_support::{FixtureLibrary, MrcFixture};

fn auto_config() -> BrowserConfig {
    BrowserConfig {
        auto_select: true,
        ..BrowserConfig::default()
    }
}

fn image_view(view: Option<&View>) -> &crate::browser::ImageView {
    match view {
        Some(View::Image(view)) => view,
        other => panic!("expected an image view, got {other:?}"),
    }
}

#[test]
fn mrc_calibration_falls_back_per_axis() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tilt.mrc");
    MrcFixture::new([2, 4, 4], [4.0, 0.0, 2.0]).write(&path);
    let app = AppContext::new(auto_config());

    let mut browser = app.browser(MessageLog::default()).expect("browser");
    browser.select_file(&path).expect("load mrc");
    assert_eq!(browser.registry().active_name(), Some(TEM_DATA_VIEWER));
    let view = image_view(browser.active_view());
    assert_eq!(view.array.shape(), &[2, 4, 4]);
    assert!(!view.array.partial);
    assert!((view.calibration.x.scale - 1e-10).abs() < 1e-20);
    assert_eq!(view.calibration.x.unit_label(), "m");
    assert_eq!(view.calibration.y.scale, 1.0);
    assert_eq!(view.calibration.y.unit_label(), "pixels");
    assert!(browser.reporter().is_empty());

    let record = app
        .metadata_service()
        .record_for(&path)
        .expect("metadata");
    assert_eq!(record.get("PhysicalSizeXUnit"), Some(&json!("m")));
    assert_eq!(record.get("PhysicalSizeY").and_then(value_as_f64), Some(1.0));
    assert_eq!(record.get("PhysicalSizeYUnit"), Some(&json!("")));
}

#[test]
fn truncated_file_shows_placeholder_and_one_diagnostic() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.mrc");
    let mut bytes = MrcFixture::new([2, 4, 4], [4.0, 4.0, 2.0]).to_bytes();
    bytes.truncate(1100);
    fs::write(&path, bytes).expect("write");
    let app = AppContext::new(auto_config());

    let mut browser = app.browser(MessageLog::default()).expect("browser");
    let error = browser.select_file(&path).expect_err("truncated volume");
    assert!(matches!(error, BrowseError::Format(_)));
    assert_eq!(browser.active_view(), Some(&View::placeholder()));
    let messages = browser.reporter().messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains(&path.display().to_string()));
    assert!(messages[0].contains("truncated MRC file"));
}

#[test]
fn metadata_viewer_renders_text() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("volume.rec");
    MrcFixture::new([1, 2, 2], [2.0, 2.0, 1.0]).write(&path);
    let config = BrowserConfig {
        initial_handler: Some(METADATA_VIEWER.to_string()),
        ..BrowserConfig::default()
    };
    let mut browser = AppContext::new(config)
        .browser(MessageLog::default())
        .expect("browser");
    assert_eq!(browser.registry().active_name(), Some(METADATA_VIEWER));

    browser.select_file(&path).expect("load");
    let Some(View::Metadata(view)) = browser.active_view() else {
        panic!("expected a metadata view");
    };
    let text = view.text();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some(format!("file name = {}", path.display()).as_str())
    );
    assert_eq!(lines.next(), Some("axisOrientations = [1,2,3]"));
    assert!(text.contains("PhysicalSizeXUnit = m"));
}

#[test]
fn raster_images_open_in_the_image_viewer() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("frame.png");
    ImageBuffer::<Luma<u8>, Vec<u8>>::from_pixel(4, 3, Luma([128]))
        .save(&path)
        .expect("save png");
    let mut browser = AppContext::new(auto_config())
        .browser(MessageLog::default())
        .expect("browser");

    browser.select_file(&path).expect("load png");
    assert_eq!(browser.registry().active_name(), Some(IMAGE_VIEWER));
    let view = image_view(browser.active_view());
    assert_eq!(view.array.shape(), &[3, 4]);
    assert_eq!(view.calibration.x.unit_label(), "pixels");
}

fn hyperstack(shape: &[usize]) -> RawArray {
    let ndim = shape.len();
    RawArray::new(
        ArrayD::zeros(IxDyn(shape)),
        vec![0.5; ndim],
        vec!["nm".to_string(); ndim],
    )
    .expect("raw array")
}

#[test]
fn tilt_series_containers_reduce_along_tilt_axis() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("tomo.emd");
    fs::write(&path, b"").expect("touch");
    let mut container = EmdContainer::default();
    container
        .data_attrs
        .insert(STEMTOMO_VERSION_ATTR.to_string(), json!("7.0"));
    let mut library = FixtureLibrary::default();
    library.containers.insert(path.clone(), container);
    library.arrays.insert(path.clone(), hyperstack(&[3, 4, 5, 5]));
    let app = AppContext::with_library(Arc::new(library), auto_config());

    let mut browser = app.browser(MessageLog::default()).expect("browser");
    browser.select_file(&path).expect("load");
    let view = image_view(browser.active_view());
    assert_eq!(view.array.shape(), &[3, 5, 5]);
    assert!(view.array.partial);
    assert!((view.calibration.x.scale - 0.5e-9).abs() < 1e-18);
}

#[test]
fn unsupported_rank_keeps_previous_view() {
    let dir = tempdir().expect("tempdir");
    let volume = dir.path().join("volume.dm3");
    let hyper = dir.path().join("hyper.dm4");
    fs::write(&volume, b"").expect("touch");
    fs::write(&hyper, b"").expect("touch");
    let mut library = FixtureLibrary::default();
    library.arrays.insert(volume.clone(), hyperstack(&[2, 5, 5]));
    library
        .arrays
        .insert(hyper.clone(), hyperstack(&[2, 3, 4, 5, 5]));
    let app = AppContext::with_library(Arc::new(library), auto_config());

    let mut browser = app.browser(MessageLog::default()).expect("browser");
    browser.select_file(&volume).expect("volume");
    let before = browser.active_view().cloned();
    browser.select_file(&hyper).expect("notice only");
    assert_eq!(browser.active_view().cloned(), before);
    let notice = browser.reporter().last().expect("notice");
    assert!(notice.contains("5-dimensional data is not supported"));
}

#[test]
fn unknown_initial_handler_is_an_error() {
    let config = BrowserConfig {
        initial_handler: Some("Spectrum viewer".to_string()),
        ..BrowserConfig::default()
    };
    let error = AppContext::new(config)
        .browser(MessageLog::default())
        .expect_err("unknown handler");
    assert!(matches!(
        error,
        AppError::Browse(BrowseError::UnknownHandler(_))
    ));
}

#[test]
fn unregistered_fallback_handler_is_rejected() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("notes.xyz"), b"").expect("write");
    let app = AppContext::new(BrowserConfig {
        auto_select: true,
        fallback_handler: "Spectrum viewer".to_string(),
        ..BrowserConfig::default()
    });

    for error in [
        app.registry().map(|_| ()).expect_err("registry"),
        app.browser(MessageLog::default())
            .map(|_| ())
            .expect_err("browser"),
        app.browse(Some(dir.path())).map(|_| ()).expect_err("listing"),
    ] {
        assert!(matches!(
            error,
            AppError::Browse(BrowseError::UnknownHandler(name)) if name == "Spectrum viewer"
        ));
    }
}

#[test]
fn browse_lists_filtered_files_with_handlers() {
    let dir = tempdir().expect("tempdir");
    for name in ["b.tif", "a.mrc", "c.emi", "notes"] {
        fs::write(dir.path().join(name), b"").expect("write");
    }
    let app = AppContext::default();
    let entries = app.browse(Some(dir.path())).expect("listing");
    let summary = entries
        .iter()
        .map(|entry| {
            (
                entry
                    .path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                entry.handler.as_str(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            ("a.mrc".to_string(), TEM_DATA_VIEWER),
            ("b.tif".to_string(), IMAGE_VIEWER),
            ("c.emi".to_string(), METADATA_VIEWER),
        ]
    );

    assert!(matches!(
        app.browse(None::<&Path>).expect_err("no directory"),
        AppError::MissingBrowseDir
    ));
}
