//! Deterministic credit scoring and loan origination for consumer lending.
//!
//! The crate centers on [`engine::CreditEngine`], a pure evaluator that turns
//! a customer's loan history into a creditworthiness score and an approval
//! verdict, and [`service::LoanOriginationService`], the stateful caller that
//! feeds it repository snapshots and commits approved loans.

pub mod domain;
pub mod engine;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{CustomerId, CustomerRecord, CustomerSnapshot, LoanId, LoanRecord, LoanRequest};
pub use engine::{
    monthly_installment, CreditEngine, EngineConfig, EvaluationOutcome, LoanDecision, RateBand,
    RatePolicy, RejectionReason, ScoreComponent, ScoreFactor,
};
pub use repository::{CustomerRepository, LoanRepository, RepositoryError};
pub use service::{
    ActiveLoanView, CustomerSummaryView, EligibilityView, LoanCreation, LoanDetailView,
    LoanOriginationService, LoanServiceError, NewCustomer,
};
