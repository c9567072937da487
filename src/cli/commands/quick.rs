use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;

use super::{parse_amount, usage, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "quick",
            "List quick transaction templates and their schedules",
            "quick",
            cmd_quick,
        ),
        CommandDefinition::new(
            "run",
            "Record a transaction from a quick template",
            "run <template-id> [amount] [account-id]",
            cmd_run,
        ),
        CommandDefinition::new(
            "sweep",
            "Execute recurring templates that are due today",
            "sweep",
            cmd_sweep,
        ),
    ]
}

fn cmd_quick(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let locale = context.config.locale;
    let ledger = context.store.ledger();
    if ledger.quick_transactions.is_empty() {
        output::info("No quick transactions defined.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = ledger
        .quick_transactions
        .iter()
        .map(|quick| {
            let star = if quick.favorite { "*" } else { "" };
            let schedule = match quick.recurrence {
                Some(rule) if context.store.is_template_due(quick) => {
                    format!("{} (due)", rule.describe(locale))
                }
                Some(rule) => rule.describe(locale),
                None => "-".into(),
            };
            vec![
                format!("{}{star}", quick.id),
                quick.name.clone(),
                quick.kind.label().to_string(),
                quick
                    .amount
                    .map(|amount| context.money(amount))
                    .unwrap_or_else(|| "ask".into()),
                schedule,
                quick
                    .last_auto_exec
                    .map(|ts| context.store.localize(ts).format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();

    output::section("Quick transactions");
    output::table(
        &["Id", "Name", "Type", "Amount", "Schedule", "Last run"],
        &rows,
    );
    Ok(())
}

fn cmd_run(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (id, amount, account) = match args {
        [id] => (*id, None, None),
        [id, amount] => (*id, Some(parse_amount(amount)?), None),
        [id, amount, account] => (*id, Some(parse_amount(amount)?), Some(account.to_string())),
        _ => return Err(usage(context, "run")),
    };

    let needs_amount = context
        .store
        .ledger()
        .quick(id)
        .map_or(false, |quick| quick.fixed_amount().is_none());
    if needs_amount && amount.is_none() {
        return Err(CommandError::InvalidArguments(format!(
            "template `{id}` has no fixed amount; pass one: run {id} <amount>"
        )));
    }

    let transaction_id = context.store.execute_quick(id, amount, account)?;
    let recorded = context
        .store
        .ledger()
        .transaction(&transaction_id)
        .map(|txn| format!("{} {}", txn.description, context.money(txn.amount)))
        .unwrap_or_else(|| transaction_id.clone());
    output::success(format!("Recorded {recorded}."));
    Ok(())
}

fn cmd_sweep(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.store.sweep_report();
    if report.is_empty() {
        output::info("Nothing due today.");
        return Ok(());
    }
    for (template_id, transaction_id) in &report.executed {
        let name = context
            .store
            .ledger()
            .quick(template_id)
            .map(|quick| quick.name.clone())
            .unwrap_or_else(|| template_id.clone());
        output::success(format!("Executed {name} ({transaction_id})."));
    }
    for template_id in &report.failed {
        output::warning(format!("Could not execute `{template_id}`."));
    }
    Ok(())
}
