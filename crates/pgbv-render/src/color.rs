#![forbid(unsafe_code)]

//! Free-space color scale.
//!
//! A block's free-space value is mapped onto a red to green mix: an empty
//! block (all space available) is green, a full block is red.

use pgbv_core::model::Metric;

/// Upper bound of `pg_freespace` values: the 8 KiB page size.
pub const PAGE_SIZE: i32 = 8192;

/// Linear mapping from a metric range to a mix percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScale {
    /// Metric value rendered fully green.
    pub max: i32,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self { max: PAGE_SIZE }
    }
}

impl ColorScale {
    pub const fn new(max: i32) -> Self {
        Self { max }
    }

    /// Share of green in the mix, `0..=100`.
    ///
    /// Negative values and values above `max` are clamped. A non-positive
    /// `max` maps everything to 0.
    pub fn percent(&self, value: Metric) -> u8 {
        if self.max <= 0 {
            return 0;
        }
        let percent = i32::from(value).max(0) * 100 / self.max;
        percent.clamp(0, 100) as u8
    }

    /// Inline CSS fill for `value`.
    pub fn style(&self, value: Metric) -> String {
        format!(
            "fill: color-mix(in srgb, green {}%, red)",
            self.percent(value)
        )
    }
}
