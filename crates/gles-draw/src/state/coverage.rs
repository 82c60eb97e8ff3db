//! Sample-coverage value → per-sample bitmask.
//!
//! The backend has no notion of a fractional coverage value, only a sample mask. The mask is
//! built with an evenly spaced threshold ladder: walking the samples in order, a sample is
//! covered whenever the accumulated coverage `(i + 1) * value` reaches the next half-integer.
//! The first sample ends up in the highest bit of the `samples`-wide mask.

use super::SampleCoverage;
use crate::config::CoverageLadder;

/// Derive the blend-state sample mask for a framebuffer with `samples` samples.
///
/// Coverage testing disabled means every sample passes.
pub fn sample_coverage_mask(coverage: &SampleCoverage, samples: u32, ladder: CoverageLadder) -> u32 {
    if !coverage.enabled {
        return u32::MAX;
    }

    let mut mask = if coverage.value != 0.0 {
        match ladder {
            CoverageLadder::Float => float_ladder(coverage.value, samples),
            CoverageLadder::Exact => exact_ladder(coverage.value, samples),
        }
    } else {
        0
    };

    if coverage.invert {
        mask = !mask;
    }
    mask
}

fn float_ladder(value: f32, samples: u32) -> u32 {
    let mut mask = 0u32;
    let mut threshold = 0.5f32;
    for i in 0..samples {
        mask <<= 1;
        if (i + 1) as f32 * value >= threshold {
            threshold += 1.0;
            mask |= 1;
        }
    }
    mask
}

/// Same ladder without accumulated rounding: sample `i` is covered iff
/// `round_half_up((i + 1) * value)` steps past `round_half_up(i * value)`.
///
/// An `f32` times a sample index is exact in `f64`, so the comparison never rounds.
fn exact_ladder(value: f32, samples: u32) -> u32 {
    let value = value as f64;
    let covered_after = |n: u32| (n as f64 * value + 0.5).floor();
    let mut mask = 0u32;
    for i in 0..samples {
        mask <<= 1;
        if covered_after(i + 1) > covered_after(i) {
            mask |= 1;
        }
    }
    mask
}
