//! Program-wide constants.

/// Max release periods stored in a symbol's schedule PDA.
pub const MAX_PERIODS: usize = 32;

/// Max balance records stored in a symbol's ledger PDA.
pub const MAX_ACCOUNTS: usize = 48;

/// Milliseconds per second; period timestamps are kept in epoch milliseconds.
pub const MS_PER_SECOND: i64 = 1_000;

pub const CONFIG_SEED: &[u8] = b"escrow_config";
pub const SCHEDULE_SEED: &[u8] = b"schedule";
pub const LEDGER_SEED: &[u8] = b"ledger";
pub const VAULT_SEED: &[u8] = b"vault";
