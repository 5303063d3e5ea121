use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::emi;
use super::rules::ScoreSignals;
use crate::domain::LoanRequest;

/// Verdict for a single loan request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoanDecision {
    Approved {
        /// Effective annual rate, the proposed rate raised to the band floor
        /// where one applies.
        interest_rate: f64,
        monthly_installment: f64,
    },
    Rejected(RejectionReason),
}

impl LoanDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, LoanDecision::Approved { .. })
    }

    pub fn summary(&self) -> String {
        match self {
            LoanDecision::Approved {
                interest_rate,
                monthly_installment,
            } => format!(
                "approved at {interest_rate}% with monthly installment {monthly_installment:.2}"
            ),
            LoanDecision::Rejected(reason) => reason.summary(),
        }
    }
}

/// Enumerates rejection causes so callers can surface a concrete reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectionReason {
    ScoreTooLow { score: u8 },
    ExcessiveInstallmentBurden { active_installments: f64, monthly_income: f64 },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::ScoreTooLow { score } => {
                format!("rejected for credit score {score}")
            }
            RejectionReason::ExcessiveInstallmentBurden {
                active_installments,
                monthly_income,
            } => format!(
                "rejected for installment burden ({:.2} against income {:.2})",
                active_installments, monthly_income
            ),
        }
    }
}

pub(crate) fn decide_outcome(
    request: &LoanRequest,
    config: &EngineConfig,
    score: u8,
    signals: &ScoreSignals,
) -> LoanDecision {
    let Some(band) = config.rate_policy.band_for(score) else {
        return LoanDecision::Rejected(RejectionReason::ScoreTooLow { score });
    };

    // Runs after banding and can only revoke an approval, never grant one.
    if signals.active_installment_total > config.installment_burden_ratio * signals.monthly_income {
        return LoanDecision::Rejected(RejectionReason::ExcessiveInstallmentBurden {
            active_installments: signals.active_installment_total,
            monthly_income: signals.monthly_income,
        });
    }

    let interest_rate = match band.rate_floor {
        Some(floor) => request.annual_rate.max(floor),
        None => request.annual_rate,
    };

    LoanDecision::Approved {
        interest_rate,
        monthly_installment: emi::monthly_installment(
            request.principal,
            interest_rate,
            request.tenure_months,
        ),
    }
}
