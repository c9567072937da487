use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category id reserved for both legs of a transfer between accounts.
pub const TRANSFER_CATEGORY_ID: &str = "transfer";

/// Direction of money flow, shared by transactions, categories and quick templates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Some(TransactionKind::Income),
            "expense" | "out" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

/// A recorded financial event. Transactions are never edited in place; they are
/// created and, if needed, deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    /// Soft reference; a category that no longer exists renders as uncategorized.
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_id: Option<String>,
}

impl Transaction {
    pub fn is_transfer(&self) -> bool {
        self.transfer_id.is_some()
    }

    /// Amount with income positive and expense negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn belongs_to_account(&self, account_id: &str) -> bool {
        self.account_id.as_deref() == Some(account_id)
    }
}

/// User input for a transaction; id and timestamp are assigned on insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub category_id: String,
    pub account_id: Option<String>,
    pub note: Option<String>,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        description: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            amount,
            description: description.into(),
            category_id: category_id.into(),
            account_id: None,
            note: None,
        }
    }

    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn into_transaction(self, id: String, date: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            description: self.description,
            category_id: self.category_id,
            account_id: self.account_id,
            date,
            note: self.note,
            transfer_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_aliases() {
        assert_eq!(TransactionKind::parse("Income"), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::parse("out"), Some(TransactionKind::Expense));
        assert_eq!(TransactionKind::parse("refund"), None);
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let txn = NewTransaction::new(TransactionKind::Expense, 12.5, "Coffee", "cat-food")
            .into_transaction("tx-1".into(), Utc::now());
        let json = serde_json::to_string(&txn).unwrap();
        assert!(!json.contains("accountId"));
        assert!(!json.contains("transferId"));
        assert!(json.contains(r#""type":"expense""#));
        assert!(json.contains(r#""categoryId":"cat-food""#));
        assert_eq!(txn.signed_amount(), -12.5);
    }
}
