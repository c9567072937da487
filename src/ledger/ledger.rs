use serde::{Deserialize, Serialize};

use super::{
    account::Account,
    category::Category,
    defaults::{default_accounts, default_categories, default_quick_transactions},
    quick::QuickTransaction,
    transaction::Transaction,
};

/// The whole persisted finance state. It is stored and loaded as a single unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    /// Newest first.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
    #[serde(default = "default_quick_transactions")]
    pub quick_transactions: Vec<QuickTransaction>,
    #[serde(default = "default_accounts")]
    pub accounts: Vec<Account>,
}

impl Default for Ledger {
    /// The seed dataset: no transactions, default categories, accounts and templates.
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            categories: default_categories(),
            quick_transactions: default_quick_transactions(),
            accounts: default_accounts(),
        }
    }
}

impl Ledger {
    /// A ledger with no entities at all.
    pub fn empty() -> Self {
        Self {
            transactions: Vec::new(),
            categories: Vec::new(),
            quick_transactions: Vec::new(),
            accounts: Vec::new(),
        }
    }

    pub fn push_transaction(&mut self, transaction: Transaction) -> String {
        let id = transaction.id.clone();
        self.transactions.insert(0, transaction);
        id
    }

    pub fn remove_transaction(&mut self, id: &str) -> Option<Transaction> {
        let idx = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(idx))
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_mut(&mut self, id: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn quick(&self, id: &str) -> Option<&QuickTransaction> {
        self.quick_transactions.iter().find(|quick| quick.id == id)
    }

    pub fn quick_mut(&mut self, id: &str) -> Option<&mut QuickTransaction> {
        self.quick_transactions.iter_mut().find(|quick| quick.id == id)
    }

    /// Display name for a category reference, tolerating deleted categories.
    pub fn category_name(&self, id: &str) -> &str {
        self.category(id)
            .map(|category| category.name.as_str())
            .unwrap_or(UNCATEGORIZED_LABEL)
    }

    /// Display name for an optional account reference, tolerating deleted accounts.
    pub fn account_name(&self, id: Option<&str>) -> &str {
        id.and_then(|id| self.account(id))
            .map(|account| account.name.as_str())
            .unwrap_or(UNASSIGNED_LABEL)
    }
}

pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";
pub const UNASSIGNED_LABEL: &str = "Unassigned";
