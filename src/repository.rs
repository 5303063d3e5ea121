use crate::domain::{CustomerId, CustomerRecord, LoanId, LoanRecord};

/// Storage abstraction for customer master records so the service module can
/// be exercised in isolation.
pub trait CustomerRepository: Send + Sync {
    fn insert(&self, customer: CustomerRecord) -> Result<CustomerRecord, RepositoryError>;
    fn update(&self, customer: CustomerRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &CustomerId) -> Result<Option<CustomerRecord>, RepositoryError>;
}

/// Storage abstraction for the loan ledger. `for_customer` must return the
/// complete history for that customer, closed loans included.
pub trait LoanRepository: Send + Sync {
    fn insert(&self, loan: LoanRecord) -> Result<LoanRecord, RepositoryError>;
    fn fetch(&self, id: &LoanId) -> Result<Option<LoanRecord>, RepositoryError>;
    fn for_customer(&self, customer_id: &CustomerId) -> Result<Vec<LoanRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
