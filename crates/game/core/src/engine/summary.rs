//! Match outcomes and bulk aggregation.

use std::collections::BTreeMap;

use crate::state::Side;

/// Why a match ended without a winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DrawReason {
    /// Round cap reached with both sides alive.
    Timeout,
    /// Both sides dropped to 0 HP in the same action.
    MutualDestruction,
}

/// Terminal outcome of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    Victory { winner: Side },
    /// Boss round cap reached; the non-boss side was forcibly defeated.
    Extinction { boss: Side },
    Draw(DrawReason),
}

impl Outcome {
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Victory { winner } => Some(*winner),
            Outcome::Extinction { boss } => Some(*boss),
            Outcome::Draw(_) => None,
        }
    }
}

/// Headless result of one match: everything aggregation needs, no steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSummary {
    pub outcome: Outcome,
    pub rounds: u32,
    /// Damage dealt by each side, indexed by [`Side::index`].
    pub damage_dealt: [u64; 2],
    /// HP left on each side.
    pub hp_left: [u32; 2],
}

impl MatchSummary {
    pub fn winner(&self) -> Option<Side> {
        self.outcome.winner()
    }
}

/// Bucketed distribution of per-match damage totals.
///
/// Buckets are `bucket_width` wide; percentiles resolve to the upper edge of
/// the bucket that contains them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageHistogram {
    bucket_width: u64,
    buckets: BTreeMap<u64, u64>,
    count: u64,
    sum: u64,
    min: Option<u64>,
    max: Option<u64>,
}

impl DamageHistogram {
    pub const DEFAULT_BUCKET_WIDTH: u64 = 25;

    pub fn new(bucket_width: u64) -> Self {
        Self {
            bucket_width: bucket_width.max(1),
            buckets: BTreeMap::new(),
            count: 0,
            sum: 0,
            min: None,
            max: None,
        }
    }

    pub fn record(&mut self, value: u64) {
        *self.buckets.entry(value / self.bucket_width).or_insert(0) += 1;
        self.count += 1;
        self.sum = self.sum.saturating_add(value);
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    /// Fold `other` into `self`. Both must share a bucket width; otherwise
    /// `other`'s buckets are re-bucketed at their lower edge.
    pub fn merge(&mut self, other: &DamageHistogram) {
        for (&bucket, &hits) in &other.buckets {
            let lower = bucket * other.bucket_width;
            *self.buckets.entry(lower / self.bucket_width).or_insert(0) += hits;
        }
        self.count += other.count;
        self.sum = self.sum.saturating_add(other.sum);
        self.min = match (self.min, other.min) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn min(&self) -> Option<u64> {
        self.min
    }

    pub fn max(&self) -> Option<u64> {
        self.max
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum as f64 / self.count as f64)
    }

    /// Approximate `p`-th percentile (`p` in `[0, 100]`).
    pub fn percentile(&self, p: f64) -> Option<u64> {
        if self.count == 0 {
            return None;
        }
        let rank = ((p.clamp(0.0, 100.0) / 100.0) * self.count as f64).ceil().max(1.0) as u64;
        let mut seen = 0;
        for (&bucket, &hits) in &self.buckets {
            seen += hits;
            if seen >= rank {
                let upper = (bucket + 1) * self.bucket_width - 1;
                return Some(upper.min(self.max.unwrap_or(upper)));
            }
        }
        self.max
    }
}

impl Default for DamageHistogram {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUCKET_WIDTH)
    }
}

/// Mergeable accumulator over many match summaries.
///
/// Bulk runs keep one tally per worker and merge them at the end, so no
/// accumulator is ever shared between threads.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tally {
    pub matches: u64,
    pub wins: [u64; 2],
    pub draws: u64,
    pub mutual_destructions: u64,
    pub extinctions: u64,
    pub total_rounds: u64,
    pub damage: [DamageHistogram; 2],
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, summary: &MatchSummary) {
        self.matches += 1;
        self.total_rounds += u64::from(summary.rounds);
        match summary.outcome {
            Outcome::Victory { winner } => self.wins[winner.index()] += 1,
            Outcome::Extinction { boss } => {
                self.wins[boss.index()] += 1;
                self.extinctions += 1;
            }
            Outcome::Draw(reason) => {
                self.draws += 1;
                if reason == DrawReason::MutualDestruction {
                    self.mutual_destructions += 1;
                }
            }
        }
        for side in Side::BOTH {
            self.damage[side.index()].record(summary.damage_dealt[side.index()]);
        }
    }

    pub fn merge(&mut self, other: &Tally) {
        self.matches += other.matches;
        self.wins[0] += other.wins[0];
        self.wins[1] += other.wins[1];
        self.draws += other.draws;
        self.mutual_destructions += other.mutual_destructions;
        self.extinctions += other.extinctions;
        self.total_rounds += other.total_rounds;
        self.damage[0].merge(&other.damage[0]);
        self.damage[1].merge(&other.damage[1]);
    }

    pub fn win_rate(&self, side: Side) -> f64 {
        if self.matches == 0 {
            return 0.0;
        }
        self.wins[side.index()] as f64 / self.matches as f64
    }

    pub fn average_rounds(&self) -> f64 {
        if self.matches == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.matches as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(outcome: Outcome, rounds: u32, dealt: [u64; 2]) -> MatchSummary {
        MatchSummary {
            outcome,
            rounds,
            damage_dealt: dealt,
            hp_left: [0, 0],
        }
    }

    #[test]
    fn tally_counts_outcomes() {
        let mut tally = Tally::new();
        tally.record(&summary(Outcome::Victory { winner: Side::First }, 4, [120, 80]));
        tally.record(&summary(Outcome::Extinction { boss: Side::Second }, 10, [300, 90]));
        tally.record(&summary(Outcome::Draw(DrawReason::Timeout), 30, [200, 200]));

        assert_eq!(tally.matches, 3);
        assert_eq!(tally.wins, [1, 1]);
        assert_eq!(tally.draws, 1);
        assert_eq!(tally.extinctions, 1);
        assert!((tally.average_rounds() - 44.0 / 3.0).abs() < 1e-9);
        assert!((tally.win_rate(Side::First) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn merge_matches_sequential_recording() {
        let runs = [
            summary(Outcome::Victory { winner: Side::First }, 3, [90, 10]),
            summary(Outcome::Victory { winner: Side::Second }, 5, [40, 110]),
            summary(Outcome::Draw(DrawReason::MutualDestruction), 2, [70, 70]),
            summary(Outcome::Victory { winner: Side::First }, 7, [150, 60]),
        ];

        let mut sequential = Tally::new();
        runs.iter().for_each(|run| sequential.record(run));

        let mut left = Tally::new();
        let mut right = Tally::new();
        runs[..2].iter().for_each(|run| left.record(run));
        runs[2..].iter().for_each(|run| right.record(run));
        left.merge(&right);

        assert_eq!(left, sequential);
        assert_eq!(left.mutual_destructions, 1);
    }

    #[test]
    fn histogram_queries() {
        let mut histogram = DamageHistogram::new(10);
        for value in [5, 12, 18, 33, 95] {
            histogram.record(value);
        }
        assert_eq!(histogram.min(), Some(5));
        assert_eq!(histogram.max(), Some(95));
        assert_eq!(histogram.mean(), Some(32.6));
        // 3rd of 5 samples lives in the 10..20 bucket
        assert_eq!(histogram.percentile(50.0), Some(19));
        assert_eq!(histogram.percentile(100.0), Some(95));
        assert_eq!(DamageHistogram::default().percentile(50.0), None);
    }
}
