//! Credit scoring and loan decisioning.
//!
//! The engine is a pure evaluator: it reads a [`CustomerSnapshot`] and a
//! [`LoanRequest`] and returns derived values, never touching storage or
//! caching results. The only time-dependent input is the reference date used
//! by the recent-activity rule, sampled once per evaluation (the `_at`
//! variants take it explicitly so tests can pin dates).

mod config;
mod emi;
mod policy;
mod rules;

pub use config::{EngineConfig, RateBand, RatePolicy};
pub use emi::monthly_installment;
pub use policy::{LoanDecision, RejectionReason};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{CustomerId, CustomerSnapshot, LoanRequest};

/// Stateless evaluator applying the scoring rules and rate policy.
#[derive(Debug, Default)]
pub struct CreditEngine {
    config: EngineConfig,
}

impl CreditEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Creditworthiness in [0, 100] as of the local calendar date.
    pub fn score(&self, customer: &CustomerSnapshot) -> u8 {
        self.score_at(customer, Local::now().date_naive())
    }

    /// `as_of` fixes the calendar year consulted by the recent-activity rule.
    pub fn score_at(&self, customer: &CustomerSnapshot, as_of: NaiveDate) -> u8 {
        let (_, score, _) = rules::score_customer(customer, &self.config, as_of);
        score
    }

    /// Score the customer and adjudicate the request in one pass.
    pub fn decide(&self, customer: &CustomerSnapshot, request: &LoanRequest) -> EvaluationOutcome {
        self.decide_at(customer, request, Local::now().date_naive())
    }

    pub fn decide_at(
        &self,
        customer: &CustomerSnapshot,
        request: &LoanRequest,
        as_of: NaiveDate,
    ) -> EvaluationOutcome {
        let (components, credit_score, signals) =
            rules::score_customer(customer, &self.config, as_of);
        let decision = policy::decide_outcome(request, &self.config, credit_score, &signals);

        EvaluationOutcome {
            customer_id: customer.customer_id.clone(),
            credit_score,
            components,
            decision,
        }
    }
}

/// Discrete contribution to a score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub delta: i16,
    pub notes: String,
}

/// Factors the scoring rules may cite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreFactor {
    DebtCeiling,
    LoanCount,
    RepaymentHistory,
    RecentActivity,
    LoanVolume,
}

/// Full result of one evaluation: the score trail plus the verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub customer_id: CustomerId,
    pub credit_score: u8,
    pub components: Vec<ScoreComponent>,
    pub decision: LoanDecision,
}
