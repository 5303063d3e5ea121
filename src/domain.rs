use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered customers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub String);

/// Identifier wrapper for recorded loans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanId(pub String);

/// Stored customer master record, including the running outstanding debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub phone_number: String,
    pub monthly_income: f64,
    pub approved_limit: f64,
    pub current_debt: f64,
}

impl CustomerRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One past or current loan in a customer's ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: LoanId,
    pub customer_id: CustomerId,
    pub principal: f64,
    pub annual_rate: f64,
    pub tenure_months: u32,
    pub monthly_installment: f64,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
}

impl LoanRecord {
    /// A loan is fully current when every scheduled installment so far was paid on time.
    pub fn is_fully_current(&self) -> bool {
        self.emis_paid_on_time >= self.tenure_months
    }

    pub fn repayments_left(&self) -> u32 {
        self.tenure_months.saturating_sub(self.emis_paid_on_time)
    }
}

/// Read-only view of a customer handed to the engine for one evaluation.
///
/// `loans` must carry the complete ledger, closed loans included; the scoring
/// rules look at historical records, not just active ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub customer_id: CustomerId,
    pub monthly_income: f64,
    pub approved_limit: f64,
    pub current_debt: f64,
    pub loans: Vec<LoanRecord>,
}

impl CustomerSnapshot {
    pub fn new(record: &CustomerRecord, loans: Vec<LoanRecord>) -> Self {
        Self {
            customer_id: record.id.clone(),
            monthly_income: record.monthly_income,
            approved_limit: record.approved_limit,
            current_debt: record.current_debt,
            loans,
        }
    }

    /// Combined monthly installment across currently-active loans only.
    pub fn active_installment_total(&self) -> f64 {
        self.loans
            .iter()
            .filter(|loan| loan.active)
            .map(|loan| loan.monthly_installment)
            .sum()
    }
}

/// Terms requested for a new loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub principal: f64,
    pub annual_rate: f64,
    pub tenure_months: u32,
}
