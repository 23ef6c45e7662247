//! A library to change display settings (resolution, refresh rate and
//! orientation) as a single transaction.
//!
//! Every targeted monitor's current mode is snapshotted before anything is
//! mutated; if applying the new mode fails on any monitor, the already
//! mutated ones are rolled back to their snapshots. A ledger-independent
//! [`revert_all`] fallback re-asserts whatever each attached display
//! currently reports.

mod backend;
mod error;
mod platforms;
mod settings;
mod transaction;
mod types;

pub use backend::*;
pub use error::*;
pub use platforms::*;
pub use settings::*;
pub use transaction::*;
pub use types::*;
