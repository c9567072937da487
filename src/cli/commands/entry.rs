use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::TransferRequest;
use crate::ledger::{NewTransaction, TransactionKind};

use super::{parse_amount, usage, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "add",
            "Record an income or expense",
            "add <income|expense> <amount> <category-id> [description] [account-id]",
            cmd_add,
        ),
        CommandDefinition::new(
            "delete",
            "Delete a transaction",
            "delete <transaction-id>",
            cmd_delete,
        ),
        CommandDefinition::new(
            "transfer",
            "Move money between two accounts",
            "transfer <amount> <from-account-id> <to-account-id> [note]",
            cmd_transfer,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, amount, category, rest @ ..] = args else {
        return Err(usage(context, "add"));
    };
    if rest.len() > 2 {
        return Err(usage(context, "add"));
    }
    let kind = TransactionKind::parse(kind).ok_or_else(|| usage(context, "add"))?;
    let amount = parse_amount(amount)?;
    if context.store.category(category).is_none() {
        output::warning(format!("Category `{category}` does not exist; it will show as uncategorized."));
    }

    let description = rest.first().copied().unwrap_or_default();
    let mut input = NewTransaction::new(kind, amount, description, *category);
    if let Some(account_id) = rest.get(1) {
        if context.store.account(account_id).is_none() {
            return Err(CommandError::InvalidArguments(format!(
                "account `{account_id}` does not exist"
            )));
        }
        input = input.with_account(*account_id);
    }

    let id = context.store.add_transaction(input)?;
    output::success(format!("Recorded {} {} ({id}).", kind.label(), context.money(amount)));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage(context, "delete"));
    };
    let removed = context.store.delete_transaction(id)?;
    output::success(format!("Deleted `{}`.", removed.description));
    if removed.is_transfer() {
        output::hint("This was one leg of a transfer; the other leg is still recorded.");
    }
    Ok(())
}

fn cmd_transfer(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [amount, from, to, rest @ ..] = args else {
        return Err(usage(context, "transfer"));
    };
    let mut request = TransferRequest::new(parse_amount(amount)?, *from, *to);
    if !rest.is_empty() {
        request = request.with_note(rest.join(" "));
    }

    let amount = request.amount;
    let receipt = context.store.transfer(request)?;
    output::success(format!(
        "Moved {} from {} to {} ({}).",
        context.money(amount),
        context.store.ledger().account_name(Some(*from)),
        context.store.ledger().account_name(Some(*to)),
        receipt.transfer_id
    ));
    Ok(())
}
