//! Startup reconciliation of recurring quick transactions.

use chrono::{DateTime, FixedOffset, Utc};

use crate::core::time::Clock;
use crate::ledger::{Ledger, QuickTransaction};

use super::TransactionService;

/// Result of one sweep over the quick transaction templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// `(template id, created transaction id)` in template order.
    pub executed: Vec<(String, String)>,
    /// Templates that were due but could not be materialized.
    pub failed: Vec<String>,
}

impl SweepReport {
    pub fn created_count(&self) -> usize {
        self.executed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executed.is_empty() && self.failed.is_empty()
    }
}

pub struct RecurrenceService;

impl RecurrenceService {
    /// Templates that would be materialized if a sweep ran now.
    pub fn due_templates<'a>(ledger: &'a Ledger, clock: &dyn Clock) -> Vec<&'a QuickTransaction> {
        let now = clock.now();
        ledger
            .quick_transactions
            .iter()
            .filter(|quick| Self::is_template_due(quick, now, clock))
            .collect()
    }

    /// The last run is read in the offset of its own instant, `now` in the
    /// current one.
    pub fn is_template_due(
        quick: &QuickTransaction,
        now: DateTime<FixedOffset>,
        clock: &dyn Clock,
    ) -> bool {
        let last = quick.last_auto_exec.map(|ts| clock.localize(ts));
        quick.is_auto_executable()
            && quick
                .recurrence
                .map_or(false, |rule| rule.is_due(now, last))
    }

    /// Materializes every due template once, in stored order, stamping
    /// `last_auto_exec` with the same instant as the created transaction.
    ///
    /// A second sweep on the same calendar day creates nothing because the stamp
    /// trips the same-day guard.
    pub fn sweep(ledger: &mut Ledger, clock: &dyn Clock) -> SweepReport {
        let now = clock.now();
        let stamp: DateTime<Utc> = now.with_timezone(&Utc);
        let mut report = SweepReport::default();

        for idx in 0..ledger.quick_transactions.len() {
            let template = &ledger.quick_transactions[idx];
            if !Self::is_template_due(template, now, clock) {
                continue;
            }
            let template_id = template.id.clone();
            let Some(input) = template.to_new_transaction(None, None) else {
                continue;
            };

            match TransactionService::add(ledger, input, stamp) {
                Ok(transaction_id) => {
                    ledger.quick_transactions[idx].last_auto_exec = Some(stamp);
                    tracing::info!(%template_id, %transaction_id, "recurring template executed");
                    report.executed.push((template_id, transaction_id));
                }
                Err(err) => {
                    tracing::warn!(%template_id, error = %err, "recurring template skipped");
                    report.failed.push(template_id);
                }
            }
        }

        report
    }
}
