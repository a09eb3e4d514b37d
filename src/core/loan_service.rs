use crate::core::{Book, Catalog, Loan, LoanLimits, LoanService, SearchCriteria, User};
use crate::utils::error::{LibraryError, Result};

/// Loan service over any [`Catalog`]. Owns the active loans in checkout order.
#[derive(Debug, Clone)]
pub struct LibraryService<C: Catalog> {
    catalog: C,
    loans: Vec<Loan>,
    limits: LoanLimits,
}

impl<C: Catalog> LibraryService<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_limits(catalog, LoanLimits::default())
    }

    pub fn with_limits(catalog: C, limits: LoanLimits) -> Self {
        Self {
            catalog,
            loans: Vec::new(),
            limits,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Adding books through here is fine; flipping availability directly breaks the loan bookkeeping.
    pub fn catalog_mut(&mut self) -> &mut C {
        &mut self.catalog
    }

    pub fn limits(&self) -> LoanLimits {
        self.limits
    }

    pub fn active_loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn loans_for(&self, user_id: u32) -> impl Iterator<Item = &Loan> {
        self.loans.iter().filter(move |loan| loan.user.id == user_id)
    }

    pub fn active_loan_count(&self, user_id: u32) -> usize {
        self.loans_for(user_id).count()
    }

    pub fn into_catalog(self) -> C {
        self.catalog
    }
}

impl<C: Catalog> LoanService for LibraryService<C> {
    fn checkout(&mut self, user: &User, book_identifier: &str) -> Result<Loan> {
        let limit = self.limits.limit_for(user.class);
        let current = self.active_loan_count(user.id);

        let book = self
            .catalog
            .find_by_identifier_mut(book_identifier)
            .ok_or_else(|| LibraryError::BookNotFound {
                identifier: book_identifier.to_string(),
            })?;

        if !book.is_available() {
            return Err(LibraryError::BookUnavailable {
                identifier: book_identifier.to_string(),
            });
        }

        if current >= limit {
            return Err(LibraryError::LimitExceeded {
                user_id: user.id,
                limit,
            });
        }

        book.mark_loaned();
        let loan = Loan::new(user.clone(), book_identifier);
        self.loans.push(loan.clone());

        Ok(loan)
    }

    fn return_book(&mut self, user: &User, book_identifier: &str) -> Result<()> {
        let index = self
            .loans
            .iter()
            .position(|loan| loan.matches(user.id, book_identifier))
            .ok_or_else(|| LibraryError::LoanNotFound {
                user_id: user.id,
                identifier: book_identifier.to_string(),
            })?;

        if let Some(book) = self.catalog.find_by_identifier_mut(book_identifier) {
            book.mark_available();
        }
        self.loans.remove(index);

        Ok(())
    }

    fn search(&self, criteria: &SearchCriteria) -> Vec<&Book> {
        self.catalog
            .list()
            .iter()
            .filter(|book| criteria.matches(book))
            .collect()
    }
}
