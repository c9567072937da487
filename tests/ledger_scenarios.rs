mod common;

use common::{local, open_store_at, setup_test_env};
use finance_core::{
    core::services::{ServiceError, TransferRequest},
    ledger::{Account, AccountKind, Category, NewTransaction, TransactionKind},
};

#[test]
fn transfer_moves_money_without_changing_total_balance() {
    let env = setup_test_env();
    let mut store = open_store_at(&env, local(2025, 6, 3));
    let a = store
        .add_account(Account::new("A", AccountKind::Debit).with_initial_balance(1000.0))
        .expect("add A");
    let b = store
        .add_account(Account::new("B", AccountKind::Cash))
        .expect("add B");
    let before = store.total_balance();

    let receipt = store
        .transfer(TransferRequest::new(200.0, a.clone(), b.clone()).with_note("rent split"))
        .expect("transfer");

    assert_eq!(store.account_balance(&a), 800.0);
    assert_eq!(store.account_balance(&b), 200.0);
    assert_eq!(store.total_balance(), before);

    let ledger = store.ledger();
    let outgoing = ledger.transaction(&receipt.outgoing_id).expect("outgoing leg");
    let incoming = ledger.transaction(&receipt.incoming_id).expect("incoming leg");
    assert_eq!(outgoing.date, incoming.date);
    assert_eq!(outgoing.transfer_id, incoming.transfer_id);
    assert_eq!(outgoing.description, "Transfer to B");
    assert_eq!(incoming.description, "Transfer from A");
    assert_eq!(incoming.note.as_deref(), Some("rent split"));
}

#[test]
fn invalid_transfers_leave_no_trace() {
    let env = setup_test_env();
    let mut store = open_store_at(&env, local(2025, 6, 3));
    let count = store.ledger().transaction_count();

    let same = store.transfer(TransferRequest::new(10.0, "acc-cash", "acc-cash"));
    assert_eq!(same.unwrap_err(), ServiceError::SameAccount);
    let zero = store.transfer(TransferRequest::new(0.0, "acc-cash", "acc-debit"));
    assert_eq!(zero.unwrap_err(), ServiceError::NonPositiveAmount);

    store.delete_account("acc-debit").expect("delete");
    let lonely = store.transfer(TransferRequest::new(10.0, "acc-cash", "acc-debit"));
    assert_eq!(lonely.unwrap_err(), ServiceError::NotEnoughAccounts);
    assert_eq!(store.ledger().transaction_count(), count);
}

#[test]
fn category_over_budget_after_three_expenses() {
    let env = setup_test_env();
    let mut store = open_store_at(&env, local(2025, 6, 3));
    let groceries = Category::new("Super", TransactionKind::Expense).with_budget(500.0);
    let id = store.add_category(groceries).expect("add category");
    for _ in 0..3 {
        store
            .add_transaction(NewTransaction::new(TransactionKind::Expense, 200.0, "", id.clone()))
            .expect("add expense");
    }

    let category = store.category(&id).cloned().expect("category");
    assert_eq!(store.category_total(&id), 600.0);
    assert!(store.is_over_budget(&category));
    assert_eq!(store.ledger().transactions[0].description, "Super");
}

#[test]
fn totals_hold_for_mixed_activity() {
    let env = setup_test_env();
    let mut store = open_store_at(&env, local(2025, 6, 3));
    let inputs = [
        (TransactionKind::Income, 15000.0, "cat-salary"),
        (TransactionKind::Expense, 219.0, "cat-leisure"),
        (TransactionKind::Expense, 55.5, "cat-food"),
        (TransactionKind::Income, 1200.25, "cat-freelance"),
    ];
    for (kind, amount, category) in inputs {
        store
            .add_transaction(NewTransaction::new(kind, amount, "", category))
            .expect("add");
    }
    store
        .transfer(TransferRequest::new(500.0, "acc-debit", "acc-cash"))
        .expect("transfer");

    assert_eq!(store.total_income(), 16200.25);
    assert_eq!(store.total_expense(), 274.5);
    assert_eq!(
        store.total_balance(),
        store.total_income() - store.total_expense()
    );
}
