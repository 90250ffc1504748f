use anchor_lang::prelude::*;
use std::result::Result;

use crate::constants::MAX_PERIODS;
use crate::error::EscrowError;
use crate::state::Ledger;
use crate::utils::vesting;

/// A single release step: from `effective_time_ms` on, an additional
/// `numerator / denominator` of every deposit becomes releasable.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Period {
    /// Epoch milliseconds (UTC).
    pub effective_time_ms: i64,
    pub numerator: u64,
    pub denominator: u64,
}

impl Period {
    pub const SIZE: usize =
        8 + // effective_time_ms
        8 + // numerator
        8;  // denominator
}

/// Per-mint release schedule PDA.
/// Seeds: [b"schedule", mint.key()]
#[account]
pub struct Schedule {
    /// Mint (symbol) this schedule belongs to.
    pub mint: Pubkey,
    pub bump: u8,
    /// Insertion order; not sorted by time.
    pub periods: Vec<Period>,
}

impl Schedule {
    /// Space for discriminator + fixed fields + vec header + `max` periods.
    pub const fn space(max: usize) -> usize {
        8 + 32 + 1 + 4 + max * Period::SIZE
    }

    /// Shared denominator of the schedule, 0 when no period exists.
    pub fn denominator(&self) -> u64 {
        self.periods.first().map(|p| p.denominator).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Sum of numerators whose period has started at `now_ms` (inclusive).
    pub fn elapsed_numerator(&self, now_ms: i64) -> u128 {
        vesting::elapsed_numerator(&self.periods, now_ms)
    }

    /// Appends a period. The schedule is frozen as soon as the mint's ledger
    /// holds any balance record.
    pub fn add_period(&mut self, period: Period, ledger: &Ledger) -> Result<(), EscrowError> {
        if period.numerator == 0 || period.denominator == 0 {
            msg!(
                "invalid fraction {}/{} for mint {}",
                period.numerator,
                period.denominator,
                self.mint
            );
            return Err(EscrowError::InvalidFraction);
        }

        if let Some(first) = self.periods.first() {
            if first.denominator != period.denominator {
                msg!(
                    "denominator {} does not match denominator {} from existing period(s) of mint {}",
                    period.denominator,
                    first.denominator,
                    self.mint
                );
                return Err(EscrowError::DenominatorMismatch);
            }
        } else {
            msg!(
                "setting denominator {} for mint {}; all successive periods must use it",
                period.denominator,
                self.mint
            );
        }

        if !ledger.records.is_empty() {
            msg!(
                "mint {} already has {} balance record(s); schedule is frozen",
                self.mint,
                ledger.records.len()
            );
            return Err(EscrowError::ScheduleFrozen);
        }

        if self.periods.len() >= MAX_PERIODS {
            return Err(EscrowError::ScheduleFull);
        }

        self.periods.push(period);
        Ok(())
    }

    /// Drops every period. Returns how many were removed.
    pub fn clear_periods(&mut self) -> usize {
        let removed = self.periods.len();
        self.periods.clear();
        removed
    }
}
