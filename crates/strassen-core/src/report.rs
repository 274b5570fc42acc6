//! Timed run reports.
//!
//! A [`MultiplyReport`] is what a serving layer hands back to a visualization
//! frontend: the product, the rendered trace lines, wall-clock time, and the
//! method/size/operation counters the frontend renders as metric cards.
//! Timing is measured around the façade call only.

use crate::error::MatrixError;
use crate::matrix::Matrix;
use crate::method::Method;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Value of [`MultiplyReport::algorithm`] for every run.
pub const ALGORITHM: &str = "strassen-multiplication";

/// Result of one multiplication, ready for serialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiplyReport {
    /// Product matrix.
    pub result_matrix: Matrix,
    /// Rendered trace lines, oldest first. Empty when a host drops them.
    pub steps: Vec<String>,
    /// Wall-clock time of the multiplication, in milliseconds.
    pub execution_time: f64,
    /// Always [`ALGORITHM`].
    pub algorithm: String,
    /// Canonical name of the method used (e.g. `"strassen"`).
    pub method: String,
    /// Input dimension `n`.
    pub matrix_size: usize,
    /// Number of trace entries the run recorded.
    #[serde(default)]
    pub operations_count: Option<usize>,
}

impl MultiplyReport {
    /// Drop the rendered trace, keeping `operations_count` intact.
    pub fn clear_steps(&mut self) {
        self.steps.clear();
    }
}

/// Multiply with the named method and package the outcome as a report.
pub fn run(a: &Matrix, b: &Matrix, method: &str) -> Result<MultiplyReport, MatrixError> {
    let method: Method = method.parse()?;
    let multiplier = method.multiplier();

    let started = Instant::now();
    let (result, trace) = multiplier.multiply(a, b)?;
    let execution_time = started.elapsed().as_secs_f64() * 1_000.0;

    info!(
        method = %method,
        n = result.dim(),
        steps = trace.len(),
        ms = execution_time,
        "multiplication finished"
    );

    Ok(MultiplyReport {
        steps: trace.to_lines(),
        execution_time,
        algorithm: ALGORITHM.to_owned(),
        method: multiplier.name().to_owned(),
        matrix_size: result.dim(),
        operations_count: Some(trace.len()),
        result_matrix: result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_result_and_counters() {
        let a = Matrix::identity(4);
        let b = Matrix::from_flat(4, (0..16).collect()).unwrap();
        let report = run(&a, &b, "STRASSEN").unwrap();

        assert_eq!(report.algorithm, "strassen-multiplication");
        assert_eq!(report.method, "strassen");
        assert_eq!(report.result_matrix, b);
        assert_eq!(report.matrix_size, 4);
        assert_eq!(report.operations_count, Some(report.steps.len()));
        assert!(report.execution_time >= 0.0);
        assert_eq!(
            report.steps.last().map(String::as_str),
            Some("Strassen multiplication completed. Result is 4x4 matrix")
        );
    }

    #[test]
    fn json_uses_frontend_field_names() {
        let a = Matrix::identity(2);
        let report = run(&a, &a, "strassen").unwrap();
        let v = serde_json::to_value(&report).unwrap();
        let obj = v.as_object().unwrap();

        for key in [
            "result_matrix",
            "steps",
            "execution_time",
            "algorithm",
            "method",
            "matrix_size",
            "operations_count",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj.len(), 7);
        assert_eq!(v["result_matrix"], serde_json::json!([[1, 0], [0, 1]]));
        assert_eq!(v["operations_count"], 12);
        assert_eq!(v["matrix_size"], 2);
    }

    #[test]
    fn operations_count_is_optional_on_read() {
        let json = r#"{
            "result_matrix": [[4]],
            "steps": [],
            "execution_time": 0.5,
            "algorithm": "strassen-multiplication",
            "method": "strassen",
            "matrix_size": 1
        }"#;
        let report: MultiplyReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.operations_count, None);
        assert_eq!(report.result_matrix.get(0, 0), Some(4));
    }

    #[test]
    fn clearing_steps_keeps_the_count() {
        let a = Matrix::identity(2);
        let mut report = run(&a, &a, "strassen").unwrap();
        report.clear_steps();
        assert!(report.steps.is_empty());
        assert_eq!(report.operations_count, Some(12));
    }

    #[test]
    fn report_errors_propagate() {
        let a = Matrix::identity(2);
        assert!(matches!(
            run(&a, &a, "cubic"),
            Err(MatrixError::UnsupportedMethod { .. })
        ));
        assert!(matches!(
            run(&a, &Matrix::identity(4), "strassen"),
            Err(MatrixError::Dimension(_))
        ));
    }
}
