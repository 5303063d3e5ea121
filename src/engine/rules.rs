use chrono::{Datelike, NaiveDate};

use super::config::EngineConfig;
use super::{ScoreComponent, ScoreFactor};
use crate::domain::CustomerSnapshot;

pub(crate) struct ScoreSignals {
    pub active_installment_total: f64,
    pub monthly_income: f64,
}

/// Applies the scoring rules in order. Every rule only subtracts from the
/// base score; the debt ceiling is a hard gate checked before any of them.
pub(crate) fn score_customer(
    customer: &CustomerSnapshot,
    config: &EngineConfig,
    as_of: NaiveDate,
) -> (Vec<ScoreComponent>, u8, ScoreSignals) {
    let signals = ScoreSignals {
        active_installment_total: customer.active_installment_total(),
        monthly_income: customer.monthly_income,
    };

    let mut components = Vec::new();

    if customer.current_debt > customer.approved_limit {
        components.push(ScoreComponent {
            factor: ScoreFactor::DebtCeiling,
            delta: -config.base_score,
            notes: format!(
                "outstanding debt {:.2} exceeds approved limit {:.2}",
                customer.current_debt, customer.approved_limit
            ),
        });
        return (components, 0, signals);
    }

    let mut score = config.base_score;

    if customer.loans.len() > config.loan_count_threshold {
        score -= config.loan_count_penalty;
        components.push(ScoreComponent {
            factor: ScoreFactor::LoanCount,
            delta: -config.loan_count_penalty,
            notes: format!(
                "{} loans on file exceeds allowance of {}",
                customer.loans.len(),
                config.loan_count_threshold
            ),
        });
    }

    let late_loans = customer
        .loans
        .iter()
        .filter(|loan| !loan.is_fully_current())
        .count();
    if late_loans > 0 {
        // Accumulates per qualifying loan, deliberately uncapped.
        let delta = config.late_repayment_penalty * late_loans as i16;
        score -= delta;
        components.push(ScoreComponent {
            factor: ScoreFactor::RepaymentHistory,
            delta: -delta,
            notes: format!("{late_loans} loan(s) with missed installments"),
        });
    }

    let recent_loans = customer
        .loans
        .iter()
        .filter(|loan| loan.start_date.year() == as_of.year())
        .count();
    if recent_loans > config.recent_loan_threshold {
        score -= config.recent_activity_penalty;
        components.push(ScoreComponent {
            factor: ScoreFactor::RecentActivity,
            delta: -config.recent_activity_penalty,
            notes: format!("{} loans opened in {}", recent_loans, as_of.year()),
        });
    }

    let total_principal: f64 = customer.loans.iter().map(|loan| loan.principal).sum();
    if total_principal > customer.approved_limit {
        score -= config.loan_volume_penalty;
        components.push(ScoreComponent {
            factor: ScoreFactor::LoanVolume,
            delta: -config.loan_volume_penalty,
            notes: format!(
                "borrowed volume {:.2} exceeds approved limit {:.2}",
                total_principal, customer.approved_limit
            ),
        });
    }

    (components, score.clamp(0, i16::from(u8::MAX)) as u8, signals)
}
