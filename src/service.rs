use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{
    CustomerId, CustomerRecord, CustomerSnapshot, LoanId, LoanRecord, LoanRequest,
};
use crate::engine::{CreditEngine, EngineConfig, EvaluationOutcome, LoanDecision};
use crate::repository::{CustomerRepository, LoanRepository, RepositoryError};

/// Service composing the repositories and the credit engine. The engine never
/// writes; this layer owns committing approved loans and the debt figure.
pub struct LoanOriginationService<C, L> {
    customers: Arc<C>,
    loans: Arc<L>,
    engine: Arc<CreditEngine>,
}

static CUSTOMER_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static LOAN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_customer_id() -> CustomerId {
    let id = CUSTOMER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CustomerId(format!("cust-{id:06}"))
}

fn next_loan_id() -> LoanId {
    let id = LOAN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LoanId(format!("loan-{id:06}"))
}

/// Intake payload for customer registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub phone_number: String,
    pub monthly_income: f64,
}

// Approved limit: 36x monthly income, rounded to the nearest hundred thousand.
const LIMIT_INCOME_MULTIPLE: f64 = 36.0;
const LIMIT_ROUNDING_UNIT: f64 = 100_000.0;

impl<C, L> LoanOriginationService<C, L>
where
    C: CustomerRepository + 'static,
    L: LoanRepository + 'static,
{
    pub fn new(customers: Arc<C>, loans: Arc<L>, config: EngineConfig) -> Self {
        Self {
            customers,
            loans,
            engine: Arc::new(CreditEngine::new(config)),
        }
    }

    /// Register a customer, deriving the approved credit limit from income.
    pub fn register_customer(
        &self,
        intake: NewCustomer,
    ) -> Result<CustomerRecord, LoanServiceError> {
        if !intake.monthly_income.is_finite() || intake.monthly_income <= 0.0 {
            return Err(LoanServiceError::InvalidInput {
                field: "monthly_income",
                reason: "must be a positive amount".to_string(),
            });
        }

        let approved_limit = (LIMIT_INCOME_MULTIPLE * intake.monthly_income / LIMIT_ROUNDING_UNIT)
            .round()
            * LIMIT_ROUNDING_UNIT;

        let record = CustomerRecord {
            id: next_customer_id(),
            first_name: intake.first_name,
            last_name: intake.last_name,
            age: intake.age,
            phone_number: intake.phone_number,
            monthly_income: intake.monthly_income,
            approved_limit,
            current_debt: 0.0,
        };

        let stored = self.customers.insert(record)?;
        info!(customer = %stored.id.0, approved_limit, "customer registered");
        Ok(stored)
    }

    /// Evaluate a request without committing anything.
    pub fn check_eligibility(
        &self,
        customer_id: &CustomerId,
        request: LoanRequest,
    ) -> Result<EligibilityView, LoanServiceError> {
        validate_request(&request)?;
        let snapshot = self.snapshot(customer_id)?;
        let outcome = self.engine.decide(&snapshot, &request);
        info!(
            customer = %customer_id.0,
            score = outcome.credit_score,
            decision = %outcome.decision.summary(),
            "eligibility checked"
        );
        Ok(EligibilityView::new(&request, &outcome))
    }

    /// Evaluate and, on approval, record the loan and the new debt figure.
    pub fn create_loan(
        &self,
        customer_id: &CustomerId,
        request: LoanRequest,
    ) -> Result<LoanCreation, LoanServiceError> {
        validate_request(&request)?;

        let mut customer = self
            .customers
            .fetch(customer_id)?
            .ok_or(RepositoryError::NotFound)?;
        let loans = self.loans.for_customer(customer_id)?;
        let snapshot = CustomerSnapshot::new(&customer, loans);

        let start_date = Local::now().date_naive();
        let outcome = self.engine.decide_at(&snapshot, &request, start_date);

        let LoanDecision::Approved {
            interest_rate,
            monthly_installment,
        } = outcome.decision
        else {
            info!(
                customer = %customer_id.0,
                score = outcome.credit_score,
                reason = %outcome.decision.summary(),
                "loan request rejected"
            );
            return Ok(LoanCreation::Rejected { outcome });
        };

        let loan = LoanRecord {
            id: next_loan_id(),
            customer_id: customer_id.clone(),
            principal: request.principal,
            annual_rate: interest_rate,
            tenure_months: request.tenure_months,
            monthly_installment,
            emis_paid_on_time: 0,
            start_date,
            end_date: start_date + Days::new(u64::from(30 * request.tenure_months)),
            active: true,
        };
        let stored = self.loans.insert(loan)?;

        customer.current_debt += request.principal;
        self.customers.update(customer)?;

        info!(
            customer = %customer_id.0,
            loan = %stored.id.0,
            installment = monthly_installment,
            "loan approved and recorded"
        );
        Ok(LoanCreation::Approved {
            loan: stored,
            credit_score: outcome.credit_score,
        })
    }

    /// Loan detail joined with its customer summary.
    pub fn loan_details(&self, loan_id: &LoanId) -> Result<LoanDetailView, LoanServiceError> {
        let loan = self.loans.fetch(loan_id)?.ok_or(RepositoryError::NotFound)?;
        let customer = self
            .customers
            .fetch(&loan.customer_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(LoanDetailView::new(&loan, &customer))
    }

    /// Active loans for a customer with their remaining repayment counts.
    pub fn customer_loans(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<ActiveLoanView>, LoanServiceError> {
        self.customers
            .fetch(customer_id)?
            .ok_or(RepositoryError::NotFound)?;
        let loans = self.loans.for_customer(customer_id)?;
        Ok(loans
            .iter()
            .filter(|loan| loan.active)
            .map(ActiveLoanView::new)
            .collect())
    }

    fn snapshot(&self, customer_id: &CustomerId) -> Result<CustomerSnapshot, LoanServiceError> {
        let customer = self
            .customers
            .fetch(customer_id)?
            .ok_or(RepositoryError::NotFound)?;
        let loans = self.loans.for_customer(customer_id)?;
        Ok(CustomerSnapshot::new(&customer, loans))
    }
}

fn validate_request(request: &LoanRequest) -> Result<(), LoanServiceError> {
    if !request.principal.is_finite() || request.principal <= 0.0 {
        return Err(LoanServiceError::InvalidInput {
            field: "principal",
            reason: "must be a positive amount".to_string(),
        });
    }
    if !request.annual_rate.is_finite() || request.annual_rate < 0.0 {
        return Err(LoanServiceError::InvalidInput {
            field: "annual_rate",
            reason: "must be zero or a positive percentage".to_string(),
        });
    }
    if request.tenure_months == 0 {
        return Err(LoanServiceError::InvalidInput {
            field: "tenure_months",
            reason: "must be at least one month".to_string(),
        });
    }
    Ok(())
}

/// Error raised by the origination service.
#[derive(Debug, thiserror::Error)]
pub enum LoanServiceError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result of a create-loan call; rejections commit nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LoanCreation {
    Approved { loan: LoanRecord, credit_score: u8 },
    Rejected { outcome: EvaluationOutcome },
}

impl LoanCreation {
    pub fn is_approved(&self) -> bool {
        matches!(self, LoanCreation::Approved { .. })
    }

    pub fn message(&self) -> String {
        match self {
            LoanCreation::Approved { loan, .. } => {
                format!("loan {} approved", loan.id.0)
            }
            LoanCreation::Rejected { outcome } => outcome.decision.summary(),
        }
    }
}

/// Response shape for an eligibility check. The corrected rate and the
/// installment are present exactly when the request was approved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityView {
    pub customer_id: CustomerId,
    pub approval: bool,
    pub credit_score: u8,
    pub interest_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_interest_rate: Option<f64>,
    pub tenure_months: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_installment: Option<f64>,
}

impl EligibilityView {
    fn new(request: &LoanRequest, outcome: &EvaluationOutcome) -> Self {
        let (corrected_interest_rate, monthly_installment) = match outcome.decision {
            LoanDecision::Approved {
                interest_rate,
                monthly_installment,
            } => (Some(interest_rate), Some(monthly_installment)),
            LoanDecision::Rejected(_) => (None, None),
        };

        Self {
            customer_id: outcome.customer_id.clone(),
            approval: outcome.decision.is_approved(),
            credit_score: outcome.credit_score,
            interest_rate: request.annual_rate,
            corrected_interest_rate,
            tenure_months: request.tenure_months,
            monthly_installment,
        }
    }
}

/// Customer fields exposed alongside a loan detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSummaryView {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub age: u8,
}

/// Single-loan detail joined with its customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanDetailView {
    pub loan_id: LoanId,
    pub customer: CustomerSummaryView,
    pub principal: f64,
    pub annual_rate: f64,
    pub monthly_installment: f64,
    pub tenure_months: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl LoanDetailView {
    fn new(loan: &LoanRecord, customer: &CustomerRecord) -> Self {
        Self {
            loan_id: loan.id.clone(),
            customer: CustomerSummaryView {
                id: customer.id.clone(),
                first_name: customer.first_name.clone(),
                last_name: customer.last_name.clone(),
                phone_number: customer.phone_number.clone(),
                age: customer.age,
            },
            principal: loan.principal,
            annual_rate: loan.annual_rate,
            monthly_installment: loan.monthly_installment,
            tenure_months: loan.tenure_months,
            start_date: loan.start_date,
            end_date: loan.end_date,
        }
    }
}

/// One row of a customer's active-loan listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveLoanView {
    pub loan_id: LoanId,
    pub principal: f64,
    pub annual_rate: f64,
    pub monthly_installment: f64,
    pub repayments_left: u32,
}

impl ActiveLoanView {
    fn new(loan: &LoanRecord) -> Self {
        Self {
            loan_id: loan.id.clone(),
            principal: loan.principal,
            annual_rate: loan.annual_rate,
            monthly_installment: loan.monthly_installment,
            repayments_left: loan.repayments_left(),
        }
    }
}
