// Python bindings (built with the "python" feature)

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::error::WemError;

fn to_py_err(err: WemError) -> PyErr {
    match err {
        WemError::Io(e) => PyIOError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Platform of a container: "pc", "console" or "unknown"
#[pyfunction]
fn detect_platform(data: &[u8]) -> &'static str {
    match crate::detect_platform(data) {
        crate::Platform::Pc => "pc",
        crate::Platform::Console => "console",
        crate::Platform::Unknown => "unknown",
    }
}

/// Raise ValueError naming the first structural problem
#[pyfunction]
fn validate_container(data: &[u8]) -> PyResult<()> {
    crate::validate_container(data).map_err(to_py_err)
}

#[pyfunction]
fn needs_legacy_strip(data: &[u8]) -> bool {
    crate::needs_legacy_strip(data)
}

#[pyfunction]
fn strip_legacy<'py>(py: Python<'py>, data: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
    let out = crate::strip_legacy(data).map_err(to_py_err)?;
    Ok(PyBytes::new(py, &out))
}

#[pyfunction]
fn downgrade_schema_field<'py>(py: Python<'py>, data: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
    let out = crate::downgrade_schema_field(data).map_err(to_py_err)?;
    Ok(PyBytes::new(py, &out))
}

#[pyfunction]
fn swap_platform<'py>(py: Python<'py>, data: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
    let out = crate::swap_platform(data).map_err(to_py_err)?;
    Ok(PyBytes::new(py, &out))
}

/// wemkit - Wwise audio container toolkit
#[pymodule]
fn wemkit(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(detect_platform, m)?)?;
    m.add_function(wrap_pyfunction!(validate_container, m)?)?;
    m.add_function(wrap_pyfunction!(needs_legacy_strip, m)?)?;
    m.add_function(wrap_pyfunction!(strip_legacy, m)?)?;
    m.add_function(wrap_pyfunction!(downgrade_schema_field, m)?)?;
    m.add_function(wrap_pyfunction!(swap_platform, m)?)?;
    Ok(())
}
