use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::domain::{
    CustomerId, CustomerRecord, CustomerSnapshot, LoanId, LoanRecord, LoanRequest,
};
use crate::engine::{CreditEngine, EngineConfig};
use crate::repository::{CustomerRepository, LoanRepository, RepositoryError};
use crate::service::LoanOriginationService;

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date")
}

/// A start date well outside the `as_of` calendar year.
pub(super) fn past_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 3, 1).expect("valid date")
}

/// A start date inside the `as_of` calendar year.
pub(super) fn recent_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 1).expect("valid date")
}

pub(super) fn engine() -> CreditEngine {
    CreditEngine::new(EngineConfig::default())
}

pub(super) fn snapshot(debt: f64, limit: f64, loans: Vec<LoanRecord>) -> CustomerSnapshot {
    CustomerSnapshot {
        customer_id: CustomerId("cust-test".to_string()),
        monthly_income: 80_000.0,
        approved_limit: limit,
        current_debt: debt,
        loans,
    }
}

pub(super) fn loan(
    principal: f64,
    emis_paid_on_time: u32,
    tenure_months: u32,
    start_date: NaiveDate,
    active: bool,
    monthly_installment: f64,
) -> LoanRecord {
    LoanRecord {
        id: LoanId(format!("loan-fixture-{principal}-{start_date}")),
        customer_id: CustomerId("cust-test".to_string()),
        principal,
        annual_rate: 10.0,
        tenure_months,
        monthly_installment,
        emis_paid_on_time,
        start_date,
        end_date: start_date + chrono::Days::new(u64::from(30 * tenure_months)),
        active,
    }
}

/// A closed, fully repaid loan that triggers no penalty on its own.
pub(super) fn settled_loan(principal: f64) -> LoanRecord {
    loan(principal, 12, 12, past_date(), false, 0.0)
}

/// A closed loan with missed installments.
pub(super) fn late_loan(principal: f64) -> LoanRecord {
    loan(principal, 6, 12, past_date(), false, 0.0)
}

pub(super) fn request(principal: f64, annual_rate: f64, tenure_months: u32) -> LoanRequest {
    LoanRequest {
        principal,
        annual_rate,
        tenure_months,
    }
}

pub(super) fn build_service() -> (
    LoanOriginationService<MemoryCustomers, MemoryLoans>,
    Arc<MemoryCustomers>,
    Arc<MemoryLoans>,
) {
    let customers = Arc::new(MemoryCustomers::default());
    let loans = Arc::new(MemoryLoans::default());
    let service =
        LoanOriginationService::new(customers.clone(), loans.clone(), EngineConfig::default());
    (service, customers, loans)
}

#[derive(Default, Clone)]
pub(super) struct MemoryCustomers {
    records: Arc<Mutex<HashMap<CustomerId, CustomerRecord>>>,
}

impl CustomerRepository for MemoryCustomers {
    fn insert(&self, customer: CustomerRecord) -> Result<CustomerRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("customer mutex poisoned");
        if guard.contains_key(&customer.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(customer.id.clone(), customer.clone());
        Ok(customer)
    }

    fn update(&self, customer: CustomerRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("customer mutex poisoned");
        guard.insert(customer.id.clone(), customer);
        Ok(())
    }

    fn fetch(&self, id: &CustomerId) -> Result<Option<CustomerRecord>, RepositoryError> {
        let guard = self.records.lock().expect("customer mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLoans {
    records: Arc<Mutex<Vec<LoanRecord>>>,
}

impl MemoryLoans {
    pub(super) fn seed(&self, loan: LoanRecord) {
        self.records.lock().expect("loan mutex poisoned").push(loan);
    }

    pub(super) fn count(&self) -> usize {
        self.records.lock().expect("loan mutex poisoned").len()
    }
}

impl LoanRepository for MemoryLoans {
    fn insert(&self, loan: LoanRecord) -> Result<LoanRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("loan mutex poisoned");
        if guard.iter().any(|existing| existing.id == loan.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(loan.clone());
        Ok(loan)
    }

    fn fetch(&self, id: &LoanId) -> Result<Option<LoanRecord>, RepositoryError> {
        let guard = self.records.lock().expect("loan mutex poisoned");
        Ok(guard.iter().find(|loan| &loan.id == id).cloned())
    }

    fn for_customer(&self, customer_id: &CustomerId) -> Result<Vec<LoanRecord>, RepositoryError> {
        let guard = self.records.lock().expect("loan mutex poisoned");
        Ok(guard
            .iter()
            .filter(|loan| &loan.customer_id == customer_id)
            .cloned()
            .collect())
    }
}
