use serde::{Deserialize, Serialize};

use crate::utils::make_id;

/// Supported account types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Cash,
    Debit,
    Credit,
}

impl AccountKind {
    pub fn default_icon(self) -> &'static str {
        match self {
            AccountKind::Cash => "cash",
            AccountKind::Debit => "card-outline",
            AccountKind::Credit => "card",
        }
    }
}

/// A balance-bearing container that transactions may be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub initial_balance: f64,
    /// Spending ceiling, credit accounts only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    /// Billing cycle days are kept for display; no balance computation reads them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_day: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_day: Option<u8>,
}

impl Account {
    /// Creates a new account with a zero initial balance.
    pub fn new(name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: make_id("acc"),
            name: name.into(),
            kind,
            icon: kind.default_icon().into(),
            color: "#3483FA".into(),
            initial_balance: 0.0,
            limit: None,
            cutoff_day: None,
            payment_day: None,
        }
    }

    pub fn with_initial_balance(mut self, initial_balance: f64) -> Self {
        self.initial_balance = initial_balance;
        self
    }

    pub fn with_credit_terms(mut self, limit: f64, cutoff_day: u8, payment_day: u8) -> Self {
        self.limit = Some(limit);
        self.cutoff_day = Some(cutoff_day);
        self.payment_day = Some(payment_day);
        self
    }

    pub fn is_credit(&self) -> bool {
        self.kind == AccountKind::Credit
    }
}
