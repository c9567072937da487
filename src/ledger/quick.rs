use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    recurrence::Recurrence,
    transaction::{NewTransaction, TransactionKind},
};
use crate::utils::make_id;

/// Reusable transaction pattern, optionally recurring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuickTransaction {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category_id: String,
    /// Fixed amount; templates without one need user input to materialize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_account_id: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_auto_exec: Option<DateTime<Utc>>,
}

impl QuickTransaction {
    pub fn new(
        name: impl Into<String>,
        kind: TransactionKind,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            id: make_id("qt"),
            name: name.into(),
            icon: "flash".into(),
            kind,
            category_id: category_id.into(),
            amount: None,
            note: None,
            default_account_id: None,
            favorite: false,
            recurrence: None,
            last_auto_exec: None,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_default_account(mut self, account_id: impl Into<String>) -> Self {
        self.default_account_id = Some(account_id.into());
        self
    }

    /// Fixed amount usable without user input (present and positive).
    pub fn fixed_amount(&self) -> Option<f64> {
        self.amount.filter(|amount| *amount > 0.0)
    }

    /// Only templates with both a schedule and a fixed amount take part in the
    /// automatic sweep.
    pub fn is_auto_executable(&self) -> bool {
        self.recurrence.is_some() && self.fixed_amount().is_some()
    }

    /// Builds the transaction input this template stands for. `amount` overrides
    /// the fixed amount; `account_id` overrides the default account.
    pub fn to_new_transaction(
        &self,
        amount: Option<f64>,
        account_id: Option<String>,
    ) -> Option<NewTransaction> {
        let amount = amount.or_else(|| self.fixed_amount())?;
        Some(NewTransaction {
            kind: self.kind,
            amount,
            description: self.name.clone(),
            category_id: self.category_id.clone(),
            account_id: account_id.or_else(|| self.default_account_id.clone()),
            note: self.note.clone(),
        })
    }
}
