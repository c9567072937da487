//! Services and the state owner that sit on top of the ledger model.

pub mod services;
pub mod store;
pub mod time;
