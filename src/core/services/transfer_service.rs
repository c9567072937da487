//! Moves funds between accounts as a linked expense/income pair.

use chrono::{DateTime, Utc};

use crate::ledger::{Ledger, Transaction, TransactionKind, TRANSFER_CATEGORY_ID};
use crate::utils::make_id;

use super::{clean_note, require_positive, ServiceError, ServiceResult};

#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub amount: f64,
    pub from_account_id: String,
    pub to_account_id: String,
    pub note: Option<String>,
}

impl TransferRequest {
    pub fn new(amount: f64, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            amount,
            from_account_id: from.into(),
            to_account_id: to.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Identifiers produced by a recorded transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub transfer_id: String,
    pub outgoing_id: String,
    pub incoming_id: String,
}

pub struct TransferService;

impl TransferService {
    /// Records the transfer. Both legs share one timestamp, the transfer id and
    /// the reserved transfer category, so category statistics never count them.
    pub fn transfer(
        ledger: &mut Ledger,
        request: TransferRequest,
        at: DateTime<Utc>,
    ) -> ServiceResult<TransferReceipt> {
        if ledger.accounts.len() < 2 {
            return Err(ServiceError::NotEnoughAccounts);
        }
        require_positive(request.amount)?;
        if request.from_account_id == request.to_account_id {
            return Err(ServiceError::SameAccount);
        }
        let from_name = Self::account_name(ledger, &request.from_account_id)?;
        let to_name = Self::account_name(ledger, &request.to_account_id)?;

        let transfer_id = make_id("tr");
        let note = clean_note(request.note);
        let leg = |kind, description: String, account_id: &str| Transaction {
            id: make_id("tx"),
            kind,
            amount: request.amount,
            description,
            category_id: TRANSFER_CATEGORY_ID.to_string(),
            account_id: Some(account_id.to_string()),
            date: at,
            note: note.clone(),
            transfer_id: Some(transfer_id.clone()),
        };

        let outgoing = leg(
            TransactionKind::Expense,
            format!("Transfer to {to_name}"),
            request.from_account_id.as_str(),
        );
        let incoming = leg(
            TransactionKind::Income,
            format!("Transfer from {from_name}"),
            request.to_account_id.as_str(),
        );
        let outgoing_id = ledger.push_transaction(outgoing);
        let incoming_id = ledger.push_transaction(incoming);

        tracing::info!(%transfer_id, amount = request.amount, "transfer recorded");
        Ok(TransferReceipt {
            transfer_id,
            outgoing_id,
            incoming_id,
        })
    }

    fn account_name(ledger: &Ledger, id: &str) -> ServiceResult<String> {
        ledger
            .account(id)
            .map(|account| account.name.clone())
            .ok_or_else(|| ServiceError::UnknownAccount(id.to_string()))
    }
}
