mod common;

use chrono::Duration;
use common::{local, open_store_at, setup_test_env};
use finance_core::{
    core::{services::RecurrenceService, time::FixedClock},
    ledger::{Ledger, QuickTransaction, Recurrence, TransactionKind},
};

#[test]
fn sweep_is_idempotent_on_the_same_day() {
    let env = setup_test_env();
    let mut store = open_store_at(&env, local(2025, 6, 1));
    let after_open = store.ledger().transaction_count();
    assert_eq!(after_open, 1);

    assert!(store.run_recurrence_sweep().is_empty());
    assert!(store.run_recurrence_sweep().is_empty());
    assert_eq!(store.ledger().transaction_count(), after_open);
}

#[test]
fn reopening_across_days_materializes_each_schedule_once() {
    let env = setup_test_env();
    // 1st: Netflix. 15th: Spotify. Next month's 1st: Netflix again.
    let days = [
        (local(2025, 6, 1), 1),
        (local(2025, 6, 2), 1),
        (local(2025, 6, 15), 2),
        (local(2025, 6, 15) + Duration::hours(5), 2),
        (local(2025, 7, 1), 3),
    ];
    for (now, expected) in days {
        let store = open_store_at(&env, now);
        assert_eq!(store.ledger().transaction_count(), expected, "at {now}");
    }

    let store = open_store_at(&env, local(2025, 7, 1));
    let netflix = store.ledger().quick("qt-netflix").expect("netflix template");
    assert_eq!(
        netflix.last_auto_exec.map(|ts| ts.date_naive()),
        Some(local(2025, 7, 1).date_naive())
    );
}

#[test]
fn auto_executed_transaction_carries_template_fields() {
    let env = setup_test_env();
    let mut store = open_store_at(&env, local(2025, 6, 2));
    let gym = QuickTransaction::new("Gym", TransactionKind::Expense, "cat-health")
        .with_amount(30.0)
        .with_default_account("acc-debit")
        .with_recurrence(Recurrence::Daily);
    let gym_id = store.add_quick(gym).expect("save template");

    let created = store.run_recurrence_sweep();
    assert_eq!(created.len(), 1);
    let txn = store.ledger().transaction(&created[0]).expect("created transaction");
    assert_eq!(txn.description, "Gym");
    assert_eq!(txn.amount, 30.0);
    assert_eq!(txn.category_id, "cat-health");
    assert_eq!(txn.account_id.as_deref(), Some("acc-debit"));

    let stamp = store.ledger().quick(&gym_id).and_then(|q| q.last_auto_exec);
    assert_eq!(stamp, Some(txn.date));
}

#[test]
fn preview_matches_what_the_sweep_executes() {
    let mut ledger = Ledger::default();
    let clock = FixedClock(local(2025, 9, 15));
    let due: Vec<String> = RecurrenceService::due_templates(&ledger, &clock)
        .into_iter()
        .map(|quick| quick.id.clone())
        .collect();
    assert_eq!(due, vec!["qt-spotify".to_string()]);

    let report = RecurrenceService::sweep(&mut ledger, &clock);
    let executed: Vec<String> = report.executed.into_iter().map(|(id, _)| id).collect();
    assert_eq!(executed, due);
}
