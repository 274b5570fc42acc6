//! Serialization helpers for request pairs and run reports.
//!
//! JSON and CBOR read/write utilities with extension-based auto-detection.
//! Unknown/missing extensions are rejected for reads and default to JSON
//! for writes. Matrices are validated while decoding, so a ragged or empty
//! grid fails at read time rather than inside the engine.

use crate::matrix::Matrix;
use crate::method::Method;
use crate::report::MultiplyReport;
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Two operands plus the method to multiply them with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixPair {
    /// Left operand.
    pub matrix_a: Matrix,
    /// Right operand.
    pub matrix_b: Matrix,
    /// Method name; defaults to `"strassen"` when absent.
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    Method::default().name().to_owned()
}

impl MatrixPair {
    /// Pair with the default method.
    #[must_use]
    pub fn new(matrix_a: Matrix, matrix_b: Matrix) -> Self {
        Self {
            matrix_a,
            matrix_b,
            method: default_method(),
        }
    }
}

/* ---------------- MatrixPair ---------------- */

/// Read a [`MatrixPair`] (`.json` / `.cbor`).
pub fn read_pair_auto<P: AsRef<Path>>(path: P) -> Result<MatrixPair> {
    read_auto(path.as_ref(), "matrix pair")
}

/// Write a [`MatrixPair`] (CBOR for `.cbor`, JSON otherwise).
pub fn write_pair_auto<P: AsRef<Path>>(path: P, v: &MatrixPair) -> Result<()> {
    write_auto(path.as_ref(), v, "matrix pair")
}

/* ---------------- MultiplyReport ---------------- */

/// Read a [`MultiplyReport`] (`.json` / `.cbor`).
pub fn read_report_auto<P: AsRef<Path>>(path: P) -> Result<MultiplyReport> {
    read_auto(path.as_ref(), "report")
}

/// Write a [`MultiplyReport`] (CBOR for `.cbor`, JSON otherwise).
pub fn write_report_auto<P: AsRef<Path>>(path: P, v: &MultiplyReport) -> Result<()> {
    write_auto(path.as_ref(), v, "report")
}

/* ---------------- Generic plumbing ---------------- */

fn read_auto<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    match ext_lower(path).as_deref() {
        Some("json") => {
            let rdr = BufReader::new(open(path)?);
            serde_json::from_reader(rdr).with_context(|| format!("deserialize JSON {what}"))
        }
        Some("cbor") => {
            let rdr = BufReader::new(open(path)?);
            ciborium::de::from_reader(rdr).with_context(|| format!("deserialize CBOR {what}"))
        }
        Some(other) => Err(anyhow!(
            "unsupported {what} extension: {other} (supported: .json, .cbor)"
        )),
        None => Err(anyhow!(
            "{} has no extension (expected .json or .cbor)",
            display(path)
        )),
    }
}

fn write_auto<T: Serialize>(path: &Path, v: &T, what: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let f = File::create(path).with_context(|| format!("create {}", display(path)))?;
    let mut w = BufWriter::new(f);
    if ext_lower(path).as_deref() == Some("cbor") {
        ciborium::ser::into_writer(v, &mut w).with_context(|| format!("serialize CBOR {what}"))?;
    } else {
        serde_json::to_writer_pretty(&mut w, v)
            .with_context(|| format!("serialize JSON {what}"))?;
    }
    w.flush().with_context(|| format!("flush {}", display(path)))?;
    Ok(())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("open {}", display(path)))
}

/// Ensure the parent directory for a file exists (no-op if none).
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", display(dir)))?;
        }
    }
    Ok(())
}

/// Return the lowercase extension (without dot) if present.
fn ext_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Human-friendly path display for error messages.
fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::run;

    fn tmp_path(name: &str, ext: &str) -> std::path::PathBuf {
        let mut p = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("strassen_core_io_{name}_{nanos}.{ext}"));
        p
    }

    fn sample_pair() -> MatrixPair {
        MatrixPair::new(
            Matrix::from_rows(&[[1, 2], [3, 4]]).unwrap(),
            Matrix::from_rows(&[[5, 6], [7, 8]]).unwrap(),
        )
    }

    #[test]
    fn pair_json_and_cbor() {
        let pair = sample_pair();
        for ext in ["json", "cbor"] {
            let path = tmp_path("pair", ext);
            write_pair_auto(&path, &pair).unwrap();
            assert_eq!(read_pair_auto(&path).unwrap(), pair);
            let _ = fs::remove_file(path);
        }
    }

    #[test]
    fn method_defaults_when_absent() {
        let json = r#"{"matrix_a": [[1]], "matrix_b": [[2]]}"#;
        let pair: MatrixPair = serde_json::from_str(json).unwrap();
        assert_eq!(pair.method, "strassen");
    }

    #[test]
    fn ragged_matrix_fails_to_decode() {
        let path = tmp_path("ragged", "json");
        fs::write(&path, r#"{"matrix_a": [[1, 2], [3]], "matrix_b": [[1, 2], [3, 4]]}"#).unwrap();
        assert!(read_pair_auto(&path).is_err());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn report_survives_cbor() {
        let pair = sample_pair();
        let report = run(&pair.matrix_a, &pair.matrix_b, &pair.method).unwrap();
        let path = tmp_path("report", "cbor");
        write_report_auto(&path, &report).unwrap();
        let back = read_report_auto(&path).unwrap();
        assert_eq!(back.steps, report.steps);
        assert_eq!(back.result_matrix, report.result_matrix);
        assert_eq!(back.operations_count, report.operations_count);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn read_rejects_unknown_extension() {
        let err = read_pair_auto("pair.yaml").unwrap_err();
        assert!(err.to_string().contains("unsupported"));
        assert!(read_pair_auto("pair").is_err());
    }
}
