//! Scoring module - clear points, level rule, and gravity curves
//!
//! Scoring behavior:
//! - Line clears award `CLEAR_POINTS[rows] * level * multiplier`, where
//!   `level` is the value in effect before this clear's level recomputation.
//! - Hard drops award 1 point per descended row, unmultiplied, accumulated
//!   before the lock's clear scoring.
//! - Level is `lines_cleared / 10 + 1` and never decreases.
//!
//! Both gravity formulas found across the original variants exist as
//! `GravityCurve` variants; a game uses exactly one of them.

/// Points per simultaneously cleared row count (index 0 unused).
pub const CLEAR_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

/// Base points for clearing `rows` rows at once.
///
/// The payout is capped at the 4-row entry: the 5-block vertical line can
/// clear five rows in a single lock, but it pays like a 4-row clear.
pub fn clear_points(rows: usize) -> u32 {
    CLEAR_POINTS[rows.min(4)]
}

/// Full score for a clear. `level` is the pre-recompute level;
/// `multiplier_pct` is the difficulty multiplier in percent (100 = none).
pub fn clear_score(rows: usize, level: u32, multiplier_pct: u32) -> u32 {
    clear_points(rows)
        .saturating_mul(level)
        .saturating_mul(multiplier_pct)
        / 100
}

/// Level for a cumulative line count: one level per 10 lines, starting at 1.
pub fn level_for_lines(lines: u32) -> u32 {
    lines / 10 + 1
}

/// Fall-speed strategy: how the gravity interval shrinks as level rises.
///
/// Every curve is monotonically non-increasing in level and floored at a
/// minimum interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityCurve {
    /// `max(floor, base - (level - 1) * step)`
    Linear {
        base_ms: u32,
        step_ms: u32,
        floor_ms: u32,
    },
    /// `max(floor, base * (decay/100)^(level - 1))`, in integer percent.
    Exponential {
        base_ms: u32,
        decay_pct: u32,
        floor_ms: u32,
    },
}

impl GravityCurve {
    /// The default curve of the baseline variant: 500ms at level 1, 25ms
    /// faster per level, floored at 50ms.
    pub const fn default_linear() -> Self {
        GravityCurve::Linear {
            base_ms: 500,
            step_ms: 25,
            floor_ms: 50,
        }
    }

    /// Gravity interval in milliseconds for the given level (levels < 1 are
    /// treated as level 1).
    pub fn interval_ms(&self, level: u32) -> u32 {
        let steps = level.max(1) - 1;
        match *self {
            GravityCurve::Linear {
                base_ms,
                step_ms,
                floor_ms,
            } => base_ms
                .saturating_sub(steps.saturating_mul(step_ms))
                .max(floor_ms),
            GravityCurve::Exponential {
                base_ms,
                decay_pct,
                floor_ms,
            } => {
                let mut ms = base_ms;
                for _ in 0..steps {
                    ms = ms.saturating_mul(decay_pct) / 100;
                    if ms <= floor_ms {
                        return floor_ms;
                    }
                }
                ms.max(floor_ms)
            }
        }
    }
}
