pub mod payout;
pub mod time;
pub mod vesting;
