//! Owner of the in-memory finance state.
//!
//! The store loads the ledger once, reconciles recurring templates, and then
//! applies every mutation through the services before writing the whole ledger
//! back to storage. Persistence problems are logged and never reach callers.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

use crate::core::services::{
    AccountService, CategoryService, CategorySpend, DailyFlow, QuickService, RecurrenceService,
    ServiceResult, SummaryService, SweepReport, TransactionService, TransferReceipt,
    TransferRequest, TransferService,
};
use crate::core::time::Clock;
use crate::ledger::{Account, Category, Ledger, NewTransaction, QuickTransaction, Transaction};
use crate::storage::StorageBackend;

/// Where the state in memory came from when the store was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// A stored blob was read successfully.
    Stored,
    /// Nothing was stored under the key yet.
    Fresh,
    /// A stored blob existed but could not be read; defaults were substituted.
    Recovered,
}

pub struct FinanceStore {
    ledger: Ledger,
    storage: Arc<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
    key: String,
    source: LoadSource,
}

impl FinanceStore {
    /// Loads the ledger stored under `key`, substituting the default dataset
    /// when nothing usable is found, then runs the recurrence sweep once.
    pub fn open(
        storage: Arc<dyn StorageBackend>,
        clock: Arc<dyn Clock>,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let (ledger, source) = match storage.load(&key) {
            Ok(Some(ledger)) => {
                tracing::info!(
                    %key,
                    transactions = ledger.transaction_count(),
                    "finance state loaded"
                );
                (ledger, LoadSource::Stored)
            }
            Ok(None) => {
                tracing::info!(%key, "no stored finance state, using defaults");
                (Ledger::default(), LoadSource::Fresh)
            }
            Err(err) => {
                tracing::warn!(%key, error = %err, "stored finance state unreadable, using defaults");
                (Ledger::default(), LoadSource::Recovered)
            }
        };

        let mut store = Self {
            ledger,
            storage,
            clock,
            key,
            source,
        };
        store.run_recurrence_sweep();
        store
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load_source(&self) -> LoadSource {
        self.source
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    /// A stored instant in the local offset of its own moment.
    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        self.clock.localize(instant)
    }

    /// Whether the sweep would execute `quick` right now.
    pub fn is_template_due(&self, quick: &QuickTransaction) -> bool {
        RecurrenceService::is_template_due(quick, self.clock.now(), self.clock.as_ref())
    }

    /// Materializes due recurring templates and returns the created transaction
    /// ids. Running it again on the same calendar day creates nothing.
    pub fn run_recurrence_sweep(&mut self) -> Vec<String> {
        let report = self.sweep_report();
        report
            .executed
            .into_iter()
            .map(|(_, transaction_id)| transaction_id)
            .collect()
    }

    /// Same as [`run_recurrence_sweep`](Self::run_recurrence_sweep) but keeps
    /// the template ids and failures.
    pub fn sweep_report(&mut self) -> SweepReport {
        let report = RecurrenceService::sweep(&mut self.ledger, self.clock.as_ref());
        if report.created_count() > 0 {
            self.persist();
        }
        report
    }

    pub fn add_transaction(&mut self, input: NewTransaction) -> ServiceResult<String> {
        let at = self.clock.now_utc();
        self.mutate(|ledger| TransactionService::add(ledger, input, at))
    }

    pub fn delete_transaction(&mut self, id: &str) -> ServiceResult<Transaction> {
        self.mutate(|ledger| TransactionService::remove(ledger, id))
    }

    pub fn transfer(&mut self, request: TransferRequest) -> ServiceResult<TransferReceipt> {
        let at = self.clock.now_utc();
        self.mutate(|ledger| TransferService::transfer(ledger, request, at))
    }

    pub fn add_category(&mut self, category: Category) -> ServiceResult<String> {
        self.mutate(|ledger| CategoryService::add(ledger, category))
    }

    pub fn update_category(&mut self, category: Category) -> ServiceResult<()> {
        self.mutate(|ledger| CategoryService::update(ledger, category))
    }

    pub fn delete_category(&mut self, id: &str) -> ServiceResult<Category> {
        self.mutate(|ledger| CategoryService::remove(ledger, id))
    }

    pub fn add_account(&mut self, account: Account) -> ServiceResult<String> {
        self.mutate(|ledger| AccountService::add(ledger, account))
    }

    pub fn update_account(&mut self, account: Account) -> ServiceResult<()> {
        self.mutate(|ledger| AccountService::update(ledger, account))
    }

    pub fn delete_account(&mut self, id: &str) -> ServiceResult<Account> {
        self.mutate(|ledger| AccountService::remove(ledger, id))
    }

    pub fn add_quick(&mut self, quick: QuickTransaction) -> ServiceResult<String> {
        self.mutate(|ledger| QuickService::add(ledger, quick))
    }

    pub fn update_quick(&mut self, quick: QuickTransaction) -> ServiceResult<()> {
        self.mutate(|ledger| QuickService::update(ledger, quick))
    }

    pub fn delete_quick(&mut self, id: &str) -> ServiceResult<QuickTransaction> {
        self.mutate(|ledger| QuickService::remove(ledger, id))
    }

    pub fn toggle_favorite(&mut self, id: &str) -> ServiceResult<bool> {
        self.mutate(|ledger| QuickService::toggle_favorite(ledger, id))
    }

    /// Runs a quick template by hand.
    pub fn execute_quick(
        &mut self,
        id: &str,
        amount: Option<f64>,
        account_id: Option<String>,
    ) -> ServiceResult<String> {
        let at = self.clock.now_utc();
        self.mutate(|ledger| QuickService::execute(ledger, id, amount, account_id, at))
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.ledger.category(id)
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.ledger.account(id)
    }

    pub fn total_income(&self) -> f64 {
        SummaryService::total_income(&self.ledger)
    }

    pub fn total_expense(&self) -> f64 {
        SummaryService::total_expense(&self.ledger)
    }

    pub fn total_balance(&self) -> f64 {
        SummaryService::total_balance(&self.ledger)
    }

    pub fn account_balance(&self, account_id: &str) -> f64 {
        SummaryService::account_balance(&self.ledger, account_id)
    }

    pub fn account_expense(&self, account_id: &str) -> f64 {
        SummaryService::account_expense(&self.ledger, account_id)
    }

    pub fn category_total(&self, category_id: &str) -> f64 {
        SummaryService::category_total(&self.ledger, category_id)
    }

    pub fn is_over_limit(&self, account: &Account) -> bool {
        SummaryService::is_over_limit(&self.ledger, account)
    }

    pub fn credit_available(&self, account: &Account) -> Option<f64> {
        SummaryService::credit_available(&self.ledger, account)
    }

    pub fn is_over_budget(&self, category: &Category) -> bool {
        SummaryService::is_over_budget(&self.ledger, category)
    }

    pub fn expense_breakdown(&self) -> Vec<CategorySpend> {
        SummaryService::expense_breakdown(&self.ledger)
    }

    pub fn daily_flow(&self, days: u32) -> Vec<DailyFlow> {
        SummaryService::daily_flow(&self.ledger, self.clock.now(), days)
    }

    /// Writes the whole ledger. Failures are logged; the in-memory state stays
    /// authoritative either way.
    pub fn persist(&self) -> bool {
        match self.storage.save(&self.key, &self.ledger) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "failed to save finance state");
                false
            }
        }
    }

    fn mutate<T>(&mut self, apply: impl FnOnce(&mut Ledger) -> ServiceResult<T>) -> ServiceResult<T> {
        let outcome = apply(&mut self.ledger)?;
        self.persist();
        Ok(outcome)
    }
}
