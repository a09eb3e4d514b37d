pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::config::LibraryConfig;
pub use crate::core::{
    catalog::InMemoryCatalog, loan_service::LibraryService, Book, Catalog, Loan, LoanLimits,
    LoanService, SearchCriteria, User, UserClass,
};
pub use utils::error::{LibraryError, Result};
