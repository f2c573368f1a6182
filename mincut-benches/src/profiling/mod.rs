//! Memory profiling support for orchestrator benchmarks.
//!
//! Provides a Linux resident-set sampler plus a report record that compares
//! the measured peak RSS of an [`mincut_core::Orchestrator::run`] call
//! against [`mincut_core::estimate_rc_peak_bytes`]'s analytic prediction for
//! the dense-matrix recursive-contraction stage.

mod memory_sampler;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub use memory_sampler::{PeakRssMeasurement, measure_peak_resident_set_size};
use thiserror::Error;

/// Errors raised while sampling or reporting benchmark memory metrics.
#[derive(Debug, Error)]
pub enum ProfilingError {
    /// Any input/output failure while reading process information or writing reports.
    #[error("profiling I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The `/proc/self/status` parser could not locate a required key.
    #[error("missing field `{field}` in /proc/self/status")]
    MissingProcField {
        /// The required field name.
        field: &'static str,
    },
    /// A numeric field in `/proc/self/status` could not be parsed.
    #[error("invalid numeric value `{value}` for /proc field `{field}`")]
    InvalidProcField {
        /// The required field name.
        field: &'static str,
        /// The unparseable value.
        value: String,
    },
    /// A process status field had an unexpected unit.
    #[error("unsupported unit `{unit}` for /proc field `{field}`")]
    UnsupportedProcUnit {
        /// The required field name.
        field: &'static str,
        /// The unit found in `/proc`.
        unit: String,
    },
    /// Sampling is unavailable on the current operating system.
    #[error("peak resident-set sampling is not supported on `{os}`")]
    UnsupportedPlatform {
        /// Name of the unsupported operating system.
        os: &'static str,
    },
    /// A denominator was zero while deriving memory metrics.
    #[error("cannot compute metric because `{context}` is zero")]
    ZeroDenominator {
        /// Name of the zero denominator.
        context: &'static str,
    },
    /// Arithmetic overflow occurred while deriving or validating metrics.
    #[error("arithmetic overflow while computing `{context}`")]
    Overflow {
        /// Name of the overflowed calculation.
        context: &'static str,
    },
    /// The peak-memory sampler thread failed to join successfully.
    #[error("failed to join peak-memory sampler thread")]
    SamplerThreadPanicked,
    /// The peak-memory sampler encountered poisoned shared state.
    #[error("peak-memory sampler lock was poisoned")]
    SamplerLockPoisoned,
    /// Sampling interval must be greater than zero.
    #[error("sampling interval must be greater than zero")]
    ZeroSamplingInterval,
}

/// One row of a peak-memory validation report: the measured peak RSS of a
/// single orchestrator run alongside the analytic estimate
/// [`mincut_core::estimate_rc_peak_bytes`] predicts for the same
/// `(vertex_count, group_size)` shape.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RcMemoryRecord {
    vertex_count: u64,
    group_size: usize,
    elapsed_millis: u128,
    peak_rss_bytes: u64,
    estimated_bytes: u64,
}

impl RcMemoryRecord {
    /// Builds a report row from a measured run and its analytic estimate.
    ///
    /// # Errors
    ///
    /// Returns [`ProfilingError::ZeroDenominator`] if `estimated_bytes` is
    /// zero, since the ratio column would be undefined.
    pub fn new(
        vertex_count: u64,
        group_size: usize,
        measurement: PeakRssMeasurement,
        estimated_bytes: u64,
    ) -> Result<Self, ProfilingError> {
        if estimated_bytes == 0 {
            return Err(ProfilingError::ZeroDenominator {
                context: "estimated_bytes",
            });
        }
        Ok(Self {
            vertex_count,
            group_size,
            elapsed_millis: measurement.elapsed.as_millis(),
            peak_rss_bytes: measurement.peak_rss_bytes,
            estimated_bytes,
        })
    }

    /// Ratio of measured peak RSS to the analytic estimate. Values well
    /// above 1.0 indicate the estimate under-predicts actual usage.
    #[must_use]
    pub fn measured_to_estimated_ratio(&self) -> f64 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "peak RSS and estimate bytes fit well within f64's exact integer range for benchmark shapes"
        )]
        #[allow(
            clippy::float_arithmetic,
            reason = "ratio of measured to estimated bytes is inherently floating-point"
        )]
        let ratio = self.peak_rss_bytes as f64 / self.estimated_bytes as f64;
        ratio
    }

    const fn csv_header() -> &'static str {
        "vertex_count,group_size,elapsed_ms,peak_rss_bytes,estimated_bytes,ratio\n"
    }

    fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.4}\n",
            self.vertex_count,
            self.group_size,
            self.elapsed_millis,
            self.peak_rss_bytes,
            self.estimated_bytes,
            self.measured_to_estimated_ratio(),
        )
    }
}

/// Writes peak-memory validation records to a comma-separated report file.
///
/// # Errors
///
/// Returns [`ProfilingError`] when creating the parent directory or writing
/// the report file fails.
pub fn write_rc_memory_report(
    report_path: impl AsRef<Path>,
    records: &[RcMemoryRecord],
) -> Result<PathBuf, ProfilingError> {
    let report_file_path = report_path.as_ref().to_path_buf();
    if let Some(parent) = report_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut output = String::from(RcMemoryRecord::csv_header());
    for record in records {
        output.push_str(&record.to_csv_row());
    }
    fs::write(&report_file_path, output)?;
    Ok(report_file_path)
}
