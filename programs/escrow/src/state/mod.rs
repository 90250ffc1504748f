pub mod config;
pub mod ledger;
pub mod schedule;

pub use config::*;
pub use ledger::*;
pub use schedule::*;
