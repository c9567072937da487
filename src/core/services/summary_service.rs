//! Read-only aggregations over the ledger. Every figure is recomputed from the
//! raw collections on each call; nothing is cached.

use std::collections::HashMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

use crate::ledger::{Account, Category, Ledger, Transaction, TransactionKind};

/// Spend against one expense category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    pub category_id: String,
    pub name: String,
    pub total: f64,
    pub budget: Option<f64>,
}

impl CategorySpend {
    pub fn over_budget(&self) -> bool {
        self.budget.map_or(false, |budget| self.total > budget)
    }
}

/// Income and expense recorded on one local calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyFlow {
    pub date: NaiveDate,
    pub income: f64,
    pub expense: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Sum of income amounts, transfers excluded.
    pub fn total_income(ledger: &Ledger) -> f64 {
        Self::total_of_kind(ledger, TransactionKind::Income)
    }

    /// Sum of expense amounts, transfers excluded.
    pub fn total_expense(ledger: &Ledger) -> f64 {
        Self::total_of_kind(ledger, TransactionKind::Expense)
    }

    pub fn total_balance(ledger: &Ledger) -> f64 {
        Self::total_income(ledger) - Self::total_expense(ledger)
    }

    /// Initial balance plus the signed amounts of the account's transactions.
    /// Unknown accounts start from zero.
    pub fn account_balance(ledger: &Ledger, account_id: &str) -> f64 {
        let initial = ledger
            .account(account_id)
            .map_or(0.0, |account| account.initial_balance);
        initial
            + ledger
                .transactions
                .iter()
                .filter(|txn| txn.belongs_to_account(account_id))
                .map(Transaction::signed_amount)
                .sum::<f64>()
    }

    /// Sum of expense amounts charged to the account.
    pub fn account_expense(ledger: &Ledger, account_id: &str) -> f64 {
        ledger
            .transactions
            .iter()
            .filter(|txn| txn.belongs_to_account(account_id) && txn.kind == TransactionKind::Expense)
            .map(|txn| txn.amount)
            .sum()
    }

    /// Sum of amounts recorded against the category, whatever their kind.
    pub fn category_total(ledger: &Ledger, category_id: &str) -> f64 {
        ledger
            .transactions
            .iter()
            .filter(|txn| txn.category_id == category_id)
            .map(|txn| txn.amount)
            .sum()
    }

    /// A credit account is over its limit once its spend exceeds the limit.
    pub fn is_over_limit(ledger: &Ledger, account: &Account) -> bool {
        match account.limit {
            Some(limit) if account.is_credit() => {
                Self::account_expense(ledger, &account.id) > limit
            }
            _ => false,
        }
    }

    /// Remaining credit for credit accounts with a limit.
    pub fn credit_available(ledger: &Ledger, account: &Account) -> Option<f64> {
        if !account.is_credit() {
            return None;
        }
        account
            .limit
            .map(|limit| limit - Self::account_expense(ledger, &account.id))
    }

    pub fn is_over_budget(ledger: &Ledger, category: &Category) -> bool {
        category
            .budget
            .map_or(false, |budget| Self::category_total(ledger, &category.id) > budget)
    }

    /// Expense categories with any spend, largest first.
    pub fn expense_breakdown(ledger: &Ledger) -> Vec<CategorySpend> {
        let mut rows: Vec<CategorySpend> = ledger
            .categories
            .iter()
            .filter(|category| category.kind == TransactionKind::Expense)
            .map(|category| CategorySpend {
                category_id: category.id.clone(),
                name: category.name.clone(),
                total: Self::category_total(ledger, &category.id),
                budget: category.budget,
            })
            .filter(|row| row.total > 0.0)
            .collect();
        rows.sort_by(|a, b| b.total.total_cmp(&a.total));
        rows
    }

    /// Per-day income and expense for the `days` local calendar days ending on
    /// `now`'s date, oldest first. Transfers are left out.
    pub fn daily_flow(ledger: &Ledger, now: DateTime<FixedOffset>, days: u32) -> Vec<DailyFlow> {
        let offset = *now.offset();
        let mut by_day: HashMap<NaiveDate, (f64, f64)> = HashMap::new();
        for txn in ledger.transactions.iter().filter(|txn| !txn.is_transfer()) {
            let day = txn.date.with_timezone(&offset).date_naive();
            let entry = by_day.entry(day).or_default();
            match txn.kind {
                TransactionKind::Income => entry.0 += txn.amount.abs(),
                TransactionKind::Expense => entry.1 += txn.amount.abs(),
            }
        }

        let today = now.date_naive();
        (0..i64::from(days))
            .rev()
            .map(|back| {
                let date = today - Duration::days(back);
                let (income, expense) = by_day.get(&date).copied().unwrap_or_default();
                DailyFlow {
                    date,
                    income,
                    expense,
                }
            })
            .collect()
    }

    fn total_of_kind(ledger: &Ledger, kind: TransactionKind) -> f64 {
        ledger
            .transactions
            .iter()
            .filter(|txn| txn.kind == kind && !txn.is_transfer())
            .map(|txn| txn.amount)
            .sum()
    }
}
