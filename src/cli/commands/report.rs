use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::ledger::{Account, TransactionKind};

use super::{usage, CommandDefinition};

const DEFAULT_TRANSACTION_LIMIT: usize = 20;
const FLOW_DAYS: u32 = 7;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "summary",
            "Show balance, totals, spending by category and the last 7 days",
            "summary",
            cmd_summary,
        ),
        CommandDefinition::new(
            "accounts",
            "List accounts with their balances",
            "accounts",
            cmd_accounts,
        ),
        CommandDefinition::new(
            "categories",
            "List categories with totals and budgets",
            "categories [income|expense]",
            cmd_categories,
        ),
        CommandDefinition::new(
            "transactions",
            "List recent transactions, newest first",
            "transactions [limit]",
            cmd_transactions,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let store = &context.store;
    output::section("Summary");
    output::info(format!(
        "  Balance : {}",
        output::signed_money(context.money(store.total_balance()), store.total_balance())
    ));
    output::info(format!("  Income  : {}", context.money(store.total_income())));
    output::info(format!("  Expenses: {}", context.money(store.total_expense())));

    let breakdown = store.expense_breakdown();
    if !breakdown.is_empty() {
        output::section("Spending by category");
        let total: f64 = breakdown.iter().map(|row| row.total).sum();
        let rows: Vec<Vec<String>> = breakdown
            .iter()
            .map(|row| {
                let share = if total > 0.0 { row.total / total * 100.0 } else { 0.0 };
                vec![
                    row.name.clone(),
                    context.money(row.total),
                    format!("{share:.0}%"),
                    budget_cell(context, row.budget, row.over_budget()),
                ]
            })
            .collect();
        output::table(&["Category", "Spent", "Share", "Budget"], &rows);
    }

    output::section(format!("Last {FLOW_DAYS} days"));
    let rows: Vec<Vec<String>> = store
        .daily_flow(FLOW_DAYS)
        .into_iter()
        .map(|day| {
            vec![
                day.date.format("%a %d").to_string(),
                context.money(day.income),
                context.money(day.expense),
            ]
        })
        .collect();
    output::table(&["Day", "Income", "Expense"], &rows);
    Ok(())
}

fn cmd_accounts(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let store = &context.store;
    let rows: Vec<Vec<String>> = store
        .ledger()
        .accounts
        .iter()
        .map(|account| {
            let balance = store.account_balance(&account.id);
            vec![
                account.id.clone(),
                account.name.clone(),
                format!("{:?}", account.kind),
                output::signed_money(context.money(balance), balance),
                credit_cell(context, account),
            ]
        })
        .collect();

    if rows.is_empty() {
        output::info("No accounts yet.");
        return Ok(());
    }
    output::section("Accounts");
    output::table(&["Id", "Name", "Type", "Balance", "Credit"], &rows);
    Ok(())
}

fn credit_cell(context: &ShellContext, account: &Account) -> String {
    let Some(available) = context.store.credit_available(account) else {
        return String::new();
    };
    let mut text = format!("{} available", context.money(available));
    if context.store.is_over_limit(account) {
        text.push_str(" (over limit)");
    }
    if let (Some(cutoff), Some(payment)) = (account.cutoff_day, account.payment_day) {
        text.push_str(&format!(", cutoff {cutoff}, due {payment}"));
    }
    text
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = match args.first() {
        Some(raw) => Some(TransactionKind::parse(raw).ok_or_else(|| usage(context, "categories"))?),
        None => None,
    };

    let store = &context.store;
    let rows: Vec<Vec<String>> = store
        .ledger()
        .categories
        .iter()
        .filter(|category| filter.map_or(true, |kind| category.kind == kind))
        .map(|category| {
            vec![
                category.id.clone(),
                category.name.clone(),
                category.kind.label().to_string(),
                context.money(store.category_total(&category.id)),
                budget_cell(context, category.budget, store.is_over_budget(category)),
            ]
        })
        .collect();

    output::section("Categories");
    output::table(&["Id", "Name", "Type", "Total", "Budget"], &rows);
    Ok(())
}

fn budget_cell(context: &ShellContext, budget: Option<f64>, over: bool) -> String {
    match (budget, over) {
        (Some(budget), true) => format!("{} (over)", context.money(budget)),
        (Some(budget), false) => context.money(budget),
        (None, _) => "-".into(),
    }
}

fn cmd_transactions(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid limit")))?,
        None => DEFAULT_TRANSACTION_LIMIT,
    };

    let ledger = context.store.ledger();
    if ledger.transactions.is_empty() {
        output::info("No transactions recorded.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = ledger
        .transactions
        .iter()
        .take(limit)
        .map(|txn| {
            let category = if txn.is_transfer() {
                "Transfer".to_string()
            } else {
                ledger.category_name(&txn.category_id).to_string()
            };
            vec![
                txn.id.clone(),
                context.store.localize(txn.date).format("%Y-%m-%d %H:%M").to_string(),
                txn.description.clone(),
                category,
                ledger.account_name(txn.account_id.as_deref()).to_string(),
                output::signed_money(context.money(txn.amount), txn.signed_amount()),
            ]
        })
        .collect();

    output::section("Transactions");
    output::table(
        &["Id", "Date", "Description", "Category", "Account", "Amount"],
        &rows,
    );
    if ledger.transactions.len() > limit {
        output::hint(format!(
            "{} more not shown. Use `transactions <limit>`.",
            ledger.transactions.len() - limit
        ));
    }
    Ok(())
}
