//! Business logic helpers for managing transactions.

use chrono::{DateTime, Utc};

use crate::core::services::{clean_note, require_positive, ServiceError, ServiceResult};
use crate::ledger::{Ledger, NewTransaction, Transaction};
use crate::utils::make_id;

/// Provides validated create/delete helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Records a new transaction at `at` and returns its identifier.
    ///
    /// A blank description falls back to the category's name.
    pub fn add(
        ledger: &mut Ledger,
        mut input: NewTransaction,
        at: DateTime<Utc>,
    ) -> ServiceResult<String> {
        require_positive(input.amount)?;
        if input.category_id.trim().is_empty() {
            return Err(ServiceError::MissingCategory);
        }
        input.description = input.description.trim().to_string();
        if input.description.is_empty() {
            input.description = ledger.category_name(&input.category_id).to_string();
        }
        input.note = clean_note(input.note);

        let transaction = input.into_transaction(make_id("tx"), at);
        Ok(ledger.push_transaction(transaction))
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn remove(ledger: &mut Ledger, id: &str) -> ServiceResult<Transaction> {
        ledger
            .remove_transaction(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Transaction `{id}`")))
    }
}
