//! Pre-flight memory estimation for the dense-matrix RC phase (§5).
//!
//! Provides a conservative estimate of a worker's peak memory consumption
//! during Recursive Contract so callers can pick a group size that keeps
//! each worker's dense-matrix slice under a caller-supplied budget, rather
//! than discovering an out-of-memory condition mid-trial. Adapted from the
//! workspace's `estimate_peak_bytes`/`format_bytes` pair: same safety
//! multiplier, same saturating-arithmetic discipline, specialized to a dense
//! `n'' x n''` `u64` matrix striped row-wise across a group instead of an
//! HNSW graph's per-node overhead.

/// Safety multiplier applied to the raw estimate (3/2 = 1.5x), covering heap
/// fragmentation and transient allocations made during a transpose.
const SAFETY_MULTIPLIER_NUMERATOR: u64 = 3;
const SAFETY_MULTIPLIER_DENOMINATOR: u64 = 2;

/// Size in bytes of one dense-matrix entry (`u64` edge weight).
const MATRIX_ENTRY_BYTES: u64 = 8;

/// Estimates the peak bytes one worker holds for a dense matrix of `n`
/// logical vertices striped row-wise across `group_size` workers.
///
/// Padding rows bring the matrix up to a multiple of `group_size`; each
/// worker then holds `k = ceil(n / group_size)` full rows of `k *
/// group_size` entries. A 1.5x safety multiplier covers the transpose
/// buffer needed mid-level (§4.D).
///
/// # Examples
///
/// ```
/// use mincut_core::estimate_rc_peak_bytes;
///
/// let bytes = estimate_rc_peak_bytes(1_000, 4);
/// assert!(bytes > 0);
/// assert_eq!(estimate_rc_peak_bytes(0, 4), 0);
/// ```
#[must_use]
pub fn estimate_rc_peak_bytes(vertex_count: usize, group_size: usize) -> u64 {
    if vertex_count == 0 || group_size == 0 {
        return 0;
    }

    let n = vertex_count as u64;
    let p = group_size as u64;
    let rows_per_worker = n.div_ceil(p);
    let padded_width = rows_per_worker.saturating_mul(p);

    let per_worker_entries = rows_per_worker.saturating_mul(padded_width);
    let raw_bytes = per_worker_entries.saturating_mul(MATRIX_ENTRY_BYTES);

    raw_bytes
        .saturating_mul(SAFETY_MULTIPLIER_NUMERATOR)
        .saturating_div(SAFETY_MULTIPLIER_DENOMINATOR)
}

/// Picks the smallest power-of-two group size (at least `min_group_size`,
/// at most `max_group_size`) whose per-worker estimate fits `max_bytes`.
/// Falls back to `max_group_size` if even the largest group exceeds budget
/// (the orchestrator then proceeds anyway — a memory ceiling is a planning
/// hint, not a hard orchestration gate in this crate).
///
/// # Examples
///
/// ```
/// use mincut_core::group_size_for_budget;
///
/// let size = group_size_for_budget(1_000_000, 1, 64, 1_000_000_000);
/// assert!(size.is_power_of_two());
/// ```
#[must_use]
pub fn group_size_for_budget(
    vertex_count: usize,
    min_group_size: usize,
    max_group_size: usize,
    max_bytes: u64,
) -> usize {
    let min_group_size = min_group_size.max(1).next_power_of_two();
    let max_group_size = max_group_size.max(min_group_size).next_power_of_two();

    let mut candidate = min_group_size;
    while candidate < max_group_size {
        if estimate_rc_peak_bytes(vertex_count, candidate) <= max_bytes {
            return candidate;
        }
        candidate *= 2;
    }
    candidate
}

/// Formats a byte count as a human-readable string using binary units.
///
/// # Examples
///
/// ```
/// use mincut_core::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 B");
/// assert_eq!(format_bytes(1024), "1.0 KiB");
/// ```
#[allow(
    clippy::float_arithmetic,
    reason = "human-readable scaling is inherently floating-point"
)]
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    const GIB: u64 = 1024 * MIB;
    const TIB: u64 = 1024 * GIB;

    if bytes >= TIB {
        format!("{:.1} TiB", bytes as f64 / TIB as f64)
    } else if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}
