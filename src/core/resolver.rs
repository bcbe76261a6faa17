// optipix/src/core/resolver.rs
//! Reconciles the sizing flags into a single target size and resize mode.
//!
//! Uniform scaling directives form an ordered rule table: the longest-side
//! cap, then the shortest-side floor, then a plain percentage. The first
//! rule that fires supplies a percentage for both axes, and every axis is
//! scaled by truncating `size * (pct / 100)`. Without a scale, each
//! axis falls back to its max, then its explicit value, then its intrinsic
//! length.

use super::{Config, Dimensions, ResizeMode};

/// A directive that derives one uniform scale from the image itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleRule {
    MaxLongest(u32),
    MinShortest(u32),
    Percent(f64),
}

/// Uniform scale, as a percentage of the intrinsic size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(pub f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub dimensions: Dimensions,
    pub mode: ResizeMode,
    /// The scaling rule that fired, if any.
    pub rule: Option<ScaleRule>,
}

impl Scale {
    /// Scales one axis length, truncating toward zero.
    pub fn apply(&self, size: u32) -> u32 {
        (f64::from(size) * (self.0 / 100.0)) as u32
    }

    /// Percentage that brings `side` down to `limit`.
    fn fitting(limit: u32, side: u32) -> Self {
        Scale(f64::from(limit) / f64::from(side) * 100.0)
    }
}

impl ScaleRule {
    /// Returns the scale this rule imposes on `intrinsic`, or `None` when its
    /// threshold is not exceeded and evaluation should fall through.
    pub fn evaluate(&self, intrinsic: Dimensions) -> Option<Scale> {
        match *self {
            ScaleRule::MaxLongest(max) => {
                let longest = intrinsic.longest();
                (longest > max).then(|| Scale::fitting(max, longest))
            }
            ScaleRule::MinShortest(min) => {
                let shortest = intrinsic.shortest();
                (shortest > min).then(|| Scale::fitting(min, shortest))
            }
            ScaleRule::Percent(pct) => {
                (pct.is_finite() && pct > 0.0).then_some(Scale(pct))
            }
        }
    }
}

/// Scaling rules present in `config`, highest precedence first.
pub fn rule_table(config: &Config) -> impl Iterator<Item = ScaleRule> {
    [
        config.max_longest.map(ScaleRule::MaxLongest),
        config.min_shortest.map(ScaleRule::MinShortest),
        config.percent.map(ScaleRule::Percent),
    ]
    .into_iter()
    .flatten()
}

/// Resolves one axis. Width and height share this so their rules cannot drift.
pub fn resolve_axis(
    intrinsic: u32,
    scale: Option<Scale>,
    max: Option<u32>,
    explicit: Option<u32>,
) -> u32 {
    match scale {
        Some(scale) => scale.apply(intrinsic),
        None => max.or(explicit).unwrap_or(intrinsic),
    }
}

pub fn resolve(intrinsic: Dimensions, config: &Config) -> Target {
    let fired = rule_table(config)
        .find_map(|rule| rule.evaluate(intrinsic).map(|scale| (rule, scale)));
    let scale = fired.map(|(_, scale)| scale);

    let dimensions = Dimensions::new(
        resolve_axis(intrinsic.width, scale, config.max_width, config.width),
        resolve_axis(intrinsic.height, scale, config.max_height, config.height),
    );

    let mode = if dimensions == intrinsic {
        ResizeMode::NoResize
    } else if config.stretch {
        ResizeMode::Stretch
    } else {
        ResizeMode::Fit
    };

    log::debug!(
        "Resolved {}x{} -> {}x{} ({:?}, rule: {:?})",
        intrinsic.width,
        intrinsic.height,
        dimensions.width,
        dimensions.height,
        mode,
        fired.map(|(rule, _)| rule)
    );

    Target {
        dimensions,
        mode,
        rule: fired.map(|(rule, _)| rule),
    }
}
