//! Ordered stat layers.
//!
//! Percentages use integer arithmetic (`value × (100 + pct) / 100`,
//! truncating toward zero) so composition is deterministic across platforms.
//! Every step saturates; oversized records clamp instead of overflowing.

use super::block::{Conversion, StatBlock, StatDelta, StatScale};

/// Where a layer came from. Only used for inspection and log output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LayerSource {
    Race,
    Class,
    Allocation,
    Weapon,
    Awakening,
    Passive,
    Upgrade,
}

/// A single pure transform over a [`StatBlock`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layer {
    /// Add a flat delta.
    Flat { source: LayerSource, delta: StatDelta },

    /// Subtract a flat delta previously added (superseded bonus).
    Revoke { source: LayerSource, delta: StatDelta },

    /// Add a percentage of one stat to another, read from the current block.
    Convert {
        source: LayerSource,
        conversion: Conversion,
    },

    /// Multiply each stat by `(100 + pct) / 100`.
    Scale { source: LayerSource, scale: StatScale },
}

impl Layer {
    pub fn source(&self) -> LayerSource {
        match self {
            Layer::Flat { source, .. }
            | Layer::Revoke { source, .. }
            | Layer::Convert { source, .. }
            | Layer::Scale { source, .. } => *source,
        }
    }

    /// Apply this layer, returning the transformed block.
    pub fn apply(&self, stats: StatBlock) -> StatBlock {
        match self {
            Layer::Flat { delta, .. } => {
                stats.map(|stat, value| value.saturating_add(i64::from(delta.get(stat))))
            }
            Layer::Revoke { delta, .. } => {
                stats.map(|stat, value| value.saturating_sub(i64::from(delta.get(stat))))
            }
            Layer::Convert { conversion, .. } => {
                let bonus = percent_of(stats.get(conversion.from), conversion.percent);
                let mut out = stats;
                out.set(conversion.to, stats.get(conversion.to).saturating_add(bonus));
                out
            }
            Layer::Scale { scale, .. } => {
                stats.map(|stat, value| scale_by(value, scale.get(stat)))
            }
        }
    }
}

/// `value × percent / 100`, truncated.
pub(crate) fn percent_of(value: i64, percent: i32) -> i64 {
    value.saturating_mul(i64::from(percent)) / 100
}

/// `value × (100 + percent) / 100`, truncated.
pub(crate) fn scale_by(value: i64, percent: i32) -> i64 {
    if percent == 0 {
        return value;
    }
    value.saturating_mul(100 + i64::from(percent)) / 100
}

/// An ordered list of layers applied first-to-last.
///
/// # Example
/// ```
/// # use duel_core::stats::{Layer, LayerSource, Pipeline, StatBlock, StatDelta, StatScale};
/// let mut pipeline = Pipeline::new();
/// pipeline.push(Layer::Flat {
///     source: LayerSource::Race,
///     delta: StatDelta::new(10, 5, 0, 0, 0, 0),
/// });
/// pipeline.push(Layer::Scale {
///     source: LayerSource::Upgrade,
///     scale: StatScale::uniform(10),
/// });
///
/// let out = pipeline.run(StatBlock::new(100, 45, 0, 0, 0, 0));
/// // (100 + 10) × 1.1 = 121, (45 + 5) × 1.1 = 55
/// assert_eq!(out.hp, 121);
/// assert_eq!(out.auto, 55);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pipeline {
    layers: Vec<Layer>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Fold every layer over `base`, in order.
    pub fn run(&self, base: StatBlock) -> StatBlock {
        self.layers.iter().fold(base, |stats, layer| layer.apply(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Stat;

    #[test]
    fn flat_then_revoke_is_identity() {
        let base = StatBlock::new(100, 20, 10, 5, 5, 12);
        let delta = StatDelta::new(15, 3, -2, 0, 4, 1);
        let added = Layer::Flat {
            source: LayerSource::Race,
            delta,
        }
        .apply(base);
        let revoked = Layer::Revoke {
            source: LayerSource::Awakening,
            delta,
        }
        .apply(added);
        assert_eq!(revoked, base);
    }

    #[test]
    fn conversion_reads_current_source_stat() {
        let base = StatBlock::new(100, 40, 60, 0, 30, 10);
        let out = Layer::Convert {
            source: LayerSource::Weapon,
            conversion: Conversion {
                from: Stat::Def,
                to: Stat::Auto,
                percent: 25,
            },
        }
        .apply(base);
        // 40 + 60 × 25% = 55
        assert_eq!(out.auto, 55);
        assert_eq!(out.def, 60);
    }

    #[test]
    fn scale_truncates_toward_zero() {
        let base = StatBlock::new(105, 33, 0, 0, 0, 0);
        let out = Layer::Scale {
            source: LayerSource::Awakening,
            scale: StatScale {
                hp: 10,
                auto: 15,
                ..StatScale::default()
            },
        }
        .apply(base);
        // 105 × 1.10 = 115.5 → 115, 33 × 1.15 = 37.95 → 37
        assert_eq!(out.hp, 115);
        assert_eq!(out.auto, 37);
    }

    #[test]
    fn order_matters() {
        let base = StatBlock::new(100, 0, 0, 0, 0, 0);
        let flat = Layer::Flat {
            source: LayerSource::Class,
            delta: StatDelta::new(20, 0, 0, 0, 0, 0),
        };
        let scale = Layer::Scale {
            source: LayerSource::Upgrade,
            scale: StatScale::uniform(50),
        };

        let mut flat_first = Pipeline::new();
        flat_first.push(flat.clone());
        flat_first.push(scale.clone());

        let mut scale_first = Pipeline::new();
        scale_first.push(scale);
        scale_first.push(flat);

        assert_eq!(flat_first.run(base).hp, 180);
        assert_eq!(scale_first.run(base).hp, 170);
    }

    #[test]
    fn huge_values_saturate() {
        let base = StatBlock::new(i64::MAX / 50, i64::MAX, 0, 0, 0, 0);
        let mut pipeline = Pipeline::new();
        pipeline.push(Layer::Flat {
            source: LayerSource::Class,
            delta: StatDelta::new(0, 10, 0, 0, 0, 0),
        });
        pipeline.push(Layer::Scale {
            source: LayerSource::Upgrade,
            scale: StatScale::uniform(10),
        });

        let out = pipeline.run(base);
        assert_eq!(out.hp, i64::MAX / 100);
        assert_eq!(out.auto, i64::MAX / 100);
    }
}
