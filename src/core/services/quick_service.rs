//! Management and manual execution of quick transaction templates.

use chrono::{DateTime, Utc};

use crate::ledger::{Ledger, QuickTransaction};
use crate::utils::make_id;

use super::{
    clean_note, require_positive, require_text, ServiceError, ServiceResult, TransactionService,
};

pub struct QuickService;

impl QuickService {
    pub fn add(ledger: &mut Ledger, mut quick: QuickTransaction) -> ServiceResult<String> {
        Self::validate(&mut quick)?;
        quick.id = make_id("qt");
        let id = quick.id.clone();
        ledger.quick_transactions.push(quick);
        Ok(id)
    }

    /// Replaces the stored template sharing `quick.id`.
    ///
    /// Out-of-range recurrence days are rejected here, at save time, so the
    /// evaluator never has to.
    pub fn update(ledger: &mut Ledger, mut quick: QuickTransaction) -> ServiceResult<()> {
        Self::validate(&mut quick)?;
        let slot = ledger
            .quick_mut(&quick.id)
            .ok_or_else(|| ServiceError::NotFound(format!("Quick transaction `{}`", quick.id)))?;
        *slot = quick;
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: &str) -> ServiceResult<QuickTransaction> {
        let idx = ledger
            .quick_transactions
            .iter()
            .position(|quick| quick.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("Quick transaction `{id}`")))?;
        Ok(ledger.quick_transactions.remove(idx))
    }

    pub fn toggle_favorite(ledger: &mut Ledger, id: &str) -> ServiceResult<bool> {
        let quick = ledger
            .quick_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Quick transaction `{id}`")))?;
        quick.favorite = !quick.favorite;
        Ok(quick.favorite)
    }

    /// Materializes a template on user request. Templates without a fixed amount
    /// need `amount`; `account_id` overrides the template's default account.
    /// Manual runs do not touch `last_auto_exec`.
    pub fn execute(
        ledger: &mut Ledger,
        id: &str,
        amount: Option<f64>,
        account_id: Option<String>,
        at: DateTime<Utc>,
    ) -> ServiceResult<String> {
        let quick = ledger
            .quick(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Quick transaction `{id}`")))?;
        let input = quick
            .to_new_transaction(amount, account_id)
            .ok_or(ServiceError::NonPositiveAmount)?;
        TransactionService::add(ledger, input, at)
    }

    fn validate(quick: &mut QuickTransaction) -> ServiceResult<()> {
        require_text("Quick transaction name", &quick.name)?;
        if quick.category_id.trim().is_empty() {
            return Err(ServiceError::MissingCategory);
        }
        if let Some(amount) = quick.amount {
            require_positive(amount)?;
        }
        if let Some(rule) = &quick.recurrence {
            rule.validate().map_err(ServiceError::InvalidRecurrence)?;
        }
        quick.name = quick.name.trim().to_string();
        quick.note = clean_note(quick.note.take());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Recurrence, TransactionKind};

    fn gym() -> QuickTransaction {
        QuickTransaction::new(" Gym ", TransactionKind::Expense, "cat-health")
    }

    #[test]
    fn add_trims_and_assigns_fresh_id() {
        let mut ledger = Ledger::empty();
        let template = gym();
        let original_id = template.id.clone();
        let id = QuickService::add(&mut ledger, template).unwrap();
        assert_ne!(id, original_id);
        assert_eq!(ledger.quick(&id).unwrap().name, "Gym");
    }

    #[test]
    fn rejects_out_of_range_recurrence_on_save() {
        let mut ledger = Ledger::empty();
        let err = QuickService::add(&mut ledger, gym().with_recurrence(Recurrence::monthly(31)))
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRecurrence(_)));

        let err = QuickService::add(&mut ledger, gym().with_recurrence(Recurrence::weekly(7)))
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRecurrence(_)));
        assert!(ledger.quick_transactions.is_empty());
    }

    #[test]
    fn execute_requires_an_amount() {
        let mut ledger = Ledger::default();
        let err = QuickService::execute(&mut ledger, "qt-uber", None, None, Utc::now())
            .unwrap_err();
        assert_eq!(err, ServiceError::NonPositiveAmount);

        let id = QuickService::execute(&mut ledger, "qt-uber", Some(64.0), None, Utc::now())
            .unwrap();
        let txn = ledger.transaction(&id).unwrap();
        assert_eq!(txn.amount, 64.0);
        assert_eq!(txn.description, "Uber");
        assert_eq!(txn.category_id, "cat-transport");
    }

    #[test]
    fn manual_execution_leaves_auto_stamp_alone() {
        let mut ledger = Ledger::default();
        QuickService::execute(&mut ledger, "qt-netflix", None, None, Utc::now()).unwrap();
        assert!(ledger.quick("qt-netflix").unwrap().last_auto_exec.is_none());
        assert_eq!(ledger.transactions[0].amount, 219.0);
    }

    #[test]
    fn toggle_favorite_flips_flag() {
        let mut ledger = Ledger::default();
        assert!(QuickService::toggle_favorite(&mut ledger, "qt-cafe").unwrap());
        assert!(!QuickService::toggle_favorite(&mut ledger, "qt-cafe").unwrap());
    }
}
