//! Seed data used on first launch and whenever stored data cannot be read.

use super::{
    account::{Account, AccountKind},
    category::Category,
    quick::QuickTransaction,
    recurrence::Recurrence,
    transaction::TransactionKind,
};

fn category(id: &str, name: &str, icon: &str, color: &str, kind: TransactionKind) -> Category {
    Category {
        id: id.into(),
        name: name.into(),
        icon: icon.into(),
        color: color.into(),
        kind,
        budget: None,
    }
}

pub fn default_categories() -> Vec<Category> {
    use TransactionKind::{Expense, Income};
    vec![
        category("cat-food", "Comida", "fast-food", "#FF6B35", Expense),
        category("cat-transport", "Transporte", "car", "#4ECDC4", Expense),
        category("cat-bills", "Servicios", "flash", "#F5A623", Expense),
        category("cat-health", "Salud", "heart", "#FF6B9D", Expense),
        category("cat-leisure", "Ocio", "game-controller", "#C77DFF", Expense),
        category("cat-shop", "Compras", "bag", "#3483FA", Expense),
        category("cat-salary", "Salario", "briefcase", "#00A650", Income),
        category("cat-freelance", "Freelance", "laptop", "#00BCD4", Income),
        category("cat-other-exp", "Otros gastos", "flag", "#999999", Expense),
        category("cat-other-inc", "Otros ingresos", "cash", "#FFA000", Income),
    ]
}

pub fn default_accounts() -> Vec<Account> {
    vec![
        Account {
            id: "acc-cash".into(),
            name: "Efectivo".into(),
            kind: AccountKind::Cash,
            icon: "cash".into(),
            color: "#00A650".into(),
            initial_balance: 0.0,
            limit: None,
            cutoff_day: None,
            payment_day: None,
        },
        Account {
            id: "acc-debit".into(),
            name: "Cuenta Ahorro".into(),
            kind: AccountKind::Debit,
            icon: "card-outline".into(),
            color: "#3483FA".into(),
            initial_balance: 0.0,
            limit: None,
            cutoff_day: None,
            payment_day: None,
        },
    ]
}

pub fn default_quick_transactions() -> Vec<QuickTransaction> {
    let template = |id: &str, name: &str, icon: &str, category_id: &str, kind| {
        let mut quick = QuickTransaction::new(name, kind, category_id).with_icon(icon);
        quick.id = id.into();
        quick
    };
    vec![
        template("qt-netflix", "Netflix", "film", "cat-leisure", TransactionKind::Expense)
            .with_amount(219.0)
            .with_recurrence(Recurrence::monthly(1)),
        template("qt-cafe", "Café", "cafe", "cat-food", TransactionKind::Expense).with_amount(55.0),
        template("qt-uber", "Uber", "car", "cat-transport", TransactionKind::Expense),
        template("qt-spotify", "Spotify", "musical-notes", "cat-leisure", TransactionKind::Expense)
            .with_amount(99.0)
            .with_recurrence(Recurrence::monthly(15)),
        template("qt-salario", "Salario", "briefcase", "cat-salary", TransactionKind::Income)
            .with_recurrence(Recurrence::monthly(1)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_ids_are_unique_and_references_resolve() {
        let categories = default_categories();
        let ids: HashSet<_> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), categories.len());
        for quick in default_quick_transactions() {
            assert!(ids.contains(quick.category_id.as_str()), "{}", quick.id);
        }
    }

    #[test]
    fn only_priced_recurring_samples_auto_execute() {
        let auto: Vec<_> = default_quick_transactions()
            .into_iter()
            .filter(|q| q.is_auto_executable())
            .map(|q| q.id)
            .collect();
        assert_eq!(auto, vec!["qt-netflix".to_string(), "qt-spotify".to_string()]);
    }
}
