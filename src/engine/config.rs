use serde::{Deserialize, Serialize};

/// Scoring weights and decision thresholds applied by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub base_score: i16,
    pub loan_count_threshold: usize,
    pub loan_count_penalty: i16,
    pub late_repayment_penalty: i16,
    pub recent_loan_threshold: usize,
    pub recent_activity_penalty: i16,
    pub loan_volume_penalty: i16,
    pub installment_burden_ratio: f64,
    pub rate_policy: RatePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_score: 100,
            loan_count_threshold: 5,
            loan_count_penalty: 20,
            late_repayment_penalty: 5,
            recent_loan_threshold: 2,
            recent_activity_penalty: 10,
            loan_volume_penalty: 20,
            installment_burden_ratio: 0.5,
            rate_policy: RatePolicy::default(),
        }
    }
}

/// One approval band. Applies to scores strictly above `min_score`; a band
/// without a `rate_floor` approves at the proposed rate unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    pub min_score: u8,
    pub rate_floor: Option<f64>,
}

/// Ordered score-band table. Boundaries are kept sorted descending and the
/// first matching band wins; a score below every boundary has no band and is
/// rejected outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<RateBand>", into = "Vec<RateBand>")]
pub struct RatePolicy {
    bands: Vec<RateBand>,
}

impl RatePolicy {
    pub fn new(mut bands: Vec<RateBand>) -> Self {
        bands.sort_by(|a, b| b.min_score.cmp(&a.min_score));
        Self { bands }
    }

    pub fn band_for(&self, score: u8) -> Option<&RateBand> {
        self.bands.iter().find(|band| score > band.min_score)
    }

    pub fn bands(&self) -> &[RateBand] {
        &self.bands
    }
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self::new(vec![
            RateBand {
                min_score: 50,
                rate_floor: None,
            },
            RateBand {
                min_score: 30,
                rate_floor: Some(12.0),
            },
            RateBand {
                min_score: 10,
                rate_floor: Some(16.0),
            },
        ])
    }
}

impl From<Vec<RateBand>> for RatePolicy {
    fn from(bands: Vec<RateBand>) -> Self {
        Self::new(bands)
    }
}

impl From<RatePolicy> for Vec<RateBand> {
    fn from(policy: RatePolicy) -> Self {
        policy.bands
    }
}
