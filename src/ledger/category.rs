use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;
use crate::utils::make_id;

/// Classifies ledger activity, optionally with a monthly budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: TransactionKind) -> Self {
        Self {
            id: make_id("cat"),
            name: name.into(),
            icon: "pricetag".into(),
            color: "#999999".into(),
            kind,
            budget: None,
        }
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_style(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color = color.into();
        self
    }
}
