pub mod initialize;
pub mod register_symbol;
pub mod add_period;
pub mod clear_periods;
pub mod credit;
pub mod deposit;
pub mod vest;
pub mod remove_account;
pub mod clear_ledger;
pub mod quote_balance;

pub use initialize::*;
pub use register_symbol::*;
pub use add_period::*;
pub use clear_periods::*;
pub use credit::*;
pub use deposit::*;
pub use vest::*;
pub use remove_account::*;
pub use clear_ledger::*;
pub use quote_balance::*;
