use std::io::Write;

use approx::assert_abs_diff_eq;
use tempfile::NamedTempFile;

use emnumerics::configuration::Configuration;
use emnumerics::dataset::antennacurrent::{
    load_antenna_el_properties,
    DatasetError
};
use emnumerics::dataset::datasetlayout::DatasetLayout;
use emnumerics::math::integration::elementwise::elementwise_quad;

fn write_dataset(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Half-dipole table with a cosine current at 10 GHz and noise rows at 3 GHz.
fn free_space_table() -> String {
    let mut rows = Vec::new();
    for i in 0..=20 {
        let x = i as f64 * 0.0075 / 20.0;
        let current = (std::f64::consts::FRAC_PI_2 * x / 0.0075).cos();
        rows.push(format!("[41, 1e10, 0.015, 1.0, {}, {}, {}]", x, current, -0.5 * current));
        rows.push(format!("[41, 3e9, 0.015, 1.0, {}, 7.0, 7.0]", x));
    }
    format!("{{\"output\": [{}]}}", rows.join(",\n"))
}

#[test]
fn loads_and_integrates_free_space_currents() {
    let dataset = write_dataset(&free_space_table());
    let distribution = load_antenna_el_properties(dataset.path(), DatasetLayout::FreeSpace, 10e9).unwrap();

    assert_eq!(distribution.len(), 21);
    assert_eq!(distribution.frequency(), 10e9);
    assert_eq!(distribution.samples()[3].voltage, Some(1.0));

    let x = distribution.positions();
    let real: Vec<f64> = distribution.currents().iter().map(|c| c.re).collect();
    let imag: Vec<f64> = distribution.currents().iter().map(|c| c.im).collect();
    // ∫_0^L cos(πx / 2L) dx = 2L / π
    let expected = 2.0 * 0.0075 / std::f64::consts::PI;
    assert_abs_diff_eq!(elementwise_quad(&real, &x, 30).unwrap(), expected, epsilon = 1e-7);
    assert_abs_diff_eq!(elementwise_quad(&imag, &x, 30).unwrap(), -0.5 * expected, epsilon = 1e-7);
}

#[test]
fn frequency_absent_from_layout_is_rejected() {
    let err = load_antenna_el_properties("does-not-exist.json", DatasetLayout::Pocklington, 3.5e9).unwrap_err();
    match err {
        DatasetError::UnsupportedFrequency { ghz, supported } => {
            assert_abs_diff_eq!(ghz, 3.5);
            assert_eq!(supported.len(), 10);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_antenna_el_properties("does-not-exist.json", DatasetLayout::Pocklington, 3e9).unwrap_err();
    assert!(matches!(err, DatasetError::Io(_)));
}

#[test]
fn configuration_points_at_dataset() {
    let dataset = write_dataset(&free_space_table());
    let json = format!(
        r#"{{"dataset": {{"path": {}, "layout": "free_space"}}, "quadrature": {{"points": 30}}}}"#,
        serde_json::to_string(dataset.path()).unwrap()
    );
    let configuration = Configuration::from_json_str(&json).unwrap();
    let source = configuration.dataset.as_ref().unwrap();
    let distribution = source.load(10e9).unwrap();

    assert_eq!(distribution.layout(), DatasetLayout::FreeSpace);
    assert_eq!(distribution.len(), 21);
}
