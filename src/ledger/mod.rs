//! Ledger entities and the persisted finance state.

pub mod account;
pub mod category;
pub mod defaults;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod quick;
pub mod recurrence;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use category::Category;
pub use ledger::{Ledger, UNASSIGNED_LABEL, UNCATEGORIZED_LABEL};
pub use quick::QuickTransaction;
pub use recurrence::Recurrence;
pub use transaction::{NewTransaction, Transaction, TransactionKind, TRANSFER_CATEGORY_ID};
