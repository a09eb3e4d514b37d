pub mod catalog;
pub mod loan_service;

pub use crate::domain::model::{Book, Loan, LoanLimits, SearchCriteria, User, UserClass};
pub use crate::domain::ports::{Catalog, LoanService};
pub use crate::utils::error::Result;
