//! Authorization and state transitions for every escrow action.
//!
//! Instruction handlers load the mint's accounts, read the clock and hand
//! them here; nothing else mutates a `Schedule` or `Ledger`. Each action
//! validates before it writes, so a failed action leaves both stores as they
//! were.

use anchor_lang::prelude::*;
use std::result::Result;

use crate::error::EscrowError;
use crate::state::{BalanceRecord, EscrowConfig, Ledger, LedgerMode, Period, Quantity, Schedule};
use crate::utils::vesting::{self, ReleaseResult};

/// A balance advanced by `vest`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Release {
    pub user: Pubkey,
    pub amount: u64,
    /// Record after the release was applied.
    pub record: BalanceRecord,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VestOutcome {
    pub releases: Vec<Release>,
    /// Records that were already caught up.
    pub unchanged: u32,
}

impl VestOutcome {
    pub fn total_released(&self) -> u64 {
        self.releases.iter().map(|r| r.amount).sum()
    }
}

/// Read-only view of one user's escrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quote {
    pub total_deposited: u64,
    pub total_released: u64,
    pub remaining: u64,
    /// What `vest` would release right now.
    pub vestable: u64,
}

fn require_mode(ledger: &Ledger, mode: LedgerMode) -> Result<(), EscrowError> {
    if ledger.mode != mode {
        msg!(
            "mint {} is registered as {:?}, action needs {:?}",
            ledger.mint,
            ledger.mode,
            mode
        );
        return Err(EscrowError::WrongLedgerMode);
    }
    Ok(())
}

fn require_user(user: &Pubkey) -> Result<(), EscrowError> {
    if *user == Pubkey::default() {
        return Err(EscrowError::InvalidUser);
    }
    Ok(())
}

pub fn add_period(
    config: &EscrowConfig,
    caller: &Pubkey,
    schedule: &mut Schedule,
    ledger: &Ledger,
    period: Period,
) -> Result<(), EscrowError> {
    config.authorize(caller)?;
    schedule.add_period(period, ledger)
}

pub fn clear_periods(
    config: &EscrowConfig,
    caller: &Pubkey,
    schedule: &mut Schedule,
) -> Result<usize, EscrowError> {
    config.authorize(caller)?;
    Ok(schedule.clear_periods())
}

/// Direct administrative credit on a bookkeeping ledger.
pub fn credit(
    config: &EscrowConfig,
    caller: &Pubkey,
    ledger: &mut Ledger,
    user: Pubkey,
    total: Quantity,
) -> Result<BalanceRecord, EscrowError> {
    config.authorize(caller)?;
    require_mode(ledger, LedgerMode::Bookkeeping)?;
    require_user(&user)?;
    if total.decimals != ledger.decimals {
        msg!(
            "quantity precision {} does not match mint {} precision {}",
            total.decimals,
            ledger.mint,
            ledger.decimals
        );
        return Err(EscrowError::PrecisionMismatch);
    }
    ledger.credit(user, total.amount)
}

/// Credit for value that has just arrived in the custodial vault.
/// Unscheduled deposits could never be released, so a schedule must exist.
pub fn receive_transfer(
    schedule: &Schedule,
    ledger: &mut Ledger,
    beneficiary: Pubkey,
    amount: u64,
) -> Result<BalanceRecord, EscrowError> {
    require_mode(ledger, LedgerMode::Custodial)?;
    if amount == 0 {
        return Err(EscrowError::InvalidAmount);
    }
    if schedule.is_empty() {
        msg!("mint {} has no periods; refusing transfer of {}", ledger.mint, amount);
        return Err(EscrowError::NoSchedule);
    }
    require_user(&beneficiary)?;
    ledger.credit(beneficiary, amount)
}

/// Releases whatever the schedule authorises at `now_ms`, for one user or
/// for every record of the mint. Open to any caller.
pub fn vest(
    schedule: &Schedule,
    ledger: &mut Ledger,
    now_ms: i64,
    target: Option<Pubkey>,
) -> Result<VestOutcome, EscrowError> {
    if schedule.elapsed_numerator(now_ms) == 0 {
        msg!(
            "nothing is currently vestable for mint {} at {} ms",
            ledger.mint,
            now_ms
        );
        return Err(EscrowError::NothingVestable);
    }

    let candidates: Vec<BalanceRecord> = match target {
        Some(user) => ledger.find(&user).copied().into_iter().collect(),
        None => ledger.records.clone(),
    };

    // Compute everything before touching the ledger.
    let mut planned = Vec::with_capacity(candidates.len());
    let mut outcome = VestOutcome::default();
    for record in candidates.iter() {
        match vesting::compute_release(&schedule.periods, now_ms, record)? {
            ReleaseResult::Released {
                amount,
                new_total_released,
            } => planned.push((record.user, amount, new_total_released)),
            ReleaseResult::Unchanged | ReleaseResult::NothingVestable => {
                outcome.unchanged += 1;
            }
        }
    }

    for (user, amount, new_total_released) in planned {
        let record = ledger.apply_release(&user, new_total_released)?;
        outcome.releases.push(Release {
            user,
            amount,
            record,
        });
    }
    Ok(outcome)
}

pub fn remove_account(
    config: &EscrowConfig,
    caller: &Pubkey,
    ledger: &mut Ledger,
    user: &Pubkey,
) -> Result<BalanceRecord, EscrowError> {
    config.authorize(caller)?;
    ledger.remove(user)
}

/// Result of dropping a mint's balance records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerReset {
    pub removed: usize,
    /// Unreleased base units left in the vault with no record to claim them.
    /// Always 0 on bookkeeping ledgers.
    pub stranded: u64,
}

/// Drops every balance record of the mint. On a custodial ledger the vault
/// keeps the unreleased tokens, and no instruction pays them out afterwards.
pub fn clear_ledger(
    config: &EscrowConfig,
    caller: &Pubkey,
    ledger: &mut Ledger,
) -> Result<LedgerReset, EscrowError> {
    config.authorize(caller)?;
    let stranded = match ledger.mode {
        LedgerMode::Custodial => ledger.outstanding(),
        LedgerMode::Bookkeeping => 0,
    };
    if stranded > 0 {
        msg!(
            "clearing ledger of mint {} strands {} unreleased in the vault",
            ledger.mint,
            stranded
        );
    }
    Ok(LedgerReset {
        removed: ledger.clear_all(),
        stranded,
    })
}

pub fn quote(
    schedule: &Schedule,
    ledger: &Ledger,
    now_ms: i64,
    user: &Pubkey,
) -> Result<Quote, EscrowError> {
    let record = ledger.find(user).ok_or(EscrowError::UnknownAccount)?;
    let vestable = vesting::compute_release(&schedule.periods, now_ms, record)?.amount();
    Ok(Quote {
        total_deposited: record.total_deposited,
        total_released: record.total_released,
        remaining: record.remaining(),
        vestable,
    })
}
