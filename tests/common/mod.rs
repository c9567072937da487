#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone};
use finance_core::{
    config::DEFAULT_STORAGE_KEY,
    core::{store::FinanceStore, time::FixedClock},
    storage::JsonStorage,
};
use tempfile::TempDir;

/// Isolated storage root; the directory lives as long as the value.
pub struct TestEnv {
    pub dir: TempDir,
    pub storage: Arc<JsonStorage>,
}

pub fn setup_test_env() -> TestEnv {
    let dir = TempDir::new().expect("create temp dir");
    let storage =
        JsonStorage::new(dir.path().join("data")).expect("create json storage backend");
    TestEnv {
        dir,
        storage: Arc::new(storage),
    }
}

/// 09:00 on the given date, six hours west of UTC.
pub fn local(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
    FixedOffset::west_opt(6 * 3600)
        .expect("offset")
        .with_ymd_and_hms(y, m, d, 9, 0, 0)
        .single()
        .expect("valid local time")
}

pub fn open_store_at(env: &TestEnv, now: DateTime<FixedOffset>) -> FinanceStore {
    FinanceStore::open(
        env.storage.clone(),
        Arc::new(FixedClock(now)),
        DEFAULT_STORAGE_KEY,
    )
}
