use crate::ledger::{Account, Ledger};
use crate::utils::make_id;

use super::{require_text, ServiceError, ServiceResult};

pub struct AccountService;

impl AccountService {
    /// Stores a new account under a freshly assigned id and returns that id.
    pub fn add(ledger: &mut Ledger, mut account: Account) -> ServiceResult<String> {
        Self::validate(&account)?;
        account.id = make_id("acc");
        let id = account.id.clone();
        ledger.accounts.push(account);
        Ok(id)
    }

    /// Replaces the stored account that shares `account.id`.
    pub fn update(ledger: &mut Ledger, account: Account) -> ServiceResult<()> {
        Self::validate(&account)?;
        let slot = ledger
            .account_mut(&account.id)
            .ok_or_else(|| ServiceError::NotFound(format!("Account `{}`", account.id)))?;
        *slot = account;
        Ok(())
    }

    /// Deletes the account. Transactions keep their (now dangling) account id.
    pub fn remove(ledger: &mut Ledger, id: &str) -> ServiceResult<Account> {
        let idx = ledger
            .accounts
            .iter()
            .position(|account| account.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("Account `{id}`")))?;
        Ok(ledger.accounts.remove(idx))
    }

    fn validate(account: &Account) -> ServiceResult<()> {
        require_text("Account name", &account.name)?;
        for (label, day) in [
            ("Cutoff day", account.cutoff_day),
            ("Payment day", account.payment_day),
        ] {
            if let Some(day) = day {
                if !(1..=31).contains(&day) {
                    return Err(ServiceError::InvalidDay(label, day));
                }
            }
        }
        Ok(())
    }
}
