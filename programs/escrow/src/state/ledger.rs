use anchor_lang::prelude::*;
use std::result::Result;

use crate::constants::MAX_ACCOUNTS;
use crate::error::EscrowError;

/// How value enters and leaves a mint's ledger.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerMode {
    /// Admin credits, vesting only advances the counters.
    Bookkeeping,
    /// Deposits arrive in the vault by token transfer, vesting pays out of it.
    Custodial,
}

/// An amount in base units together with the precision it was expressed in.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quantity {
    pub amount: u64,
    pub decimals: u8,
}

/// Escrowed balance of one user for one mint.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BalanceRecord {
    pub user: Pubkey,
    /// Base units ever deposited; only grows.
    pub total_deposited: u64,
    /// Base units released so far; never above `total_deposited`.
    pub total_released: u64,
}

impl BalanceRecord {
    pub const SIZE: usize =
        32 + // user
        8 +  // total_deposited
        8;   // total_released

    /// Amount still held in escrow.
    pub fn remaining(&self) -> u64 {
        self.total_deposited.saturating_sub(self.total_released)
    }
}

/// Per-mint balance ledger PDA. Also the authority of the mint's vault.
/// Seeds: [b"ledger", mint.key()]
#[account]
pub struct Ledger {
    pub mint: Pubkey,
    /// Fixed-point precision of the mint.
    pub decimals: u8,
    pub mode: LedgerMode,
    pub bump: u8,
    pub vault_bump: u8,
    pub records: Vec<BalanceRecord>,
}

impl Ledger {
    /// Space for discriminator + fixed fields + vec header + `max` records.
    pub const fn space(max: usize) -> usize {
        8 + 32 + 1 + 1 + 1 + 1 + 4 + max * BalanceRecord::SIZE
    }

    pub fn find(&self, user: &Pubkey) -> Option<&BalanceRecord> {
        self.records.iter().find(|r| r.user == *user)
    }

    fn position(&self, user: &Pubkey) -> Option<usize> {
        self.records.iter().position(|r| r.user == *user)
    }

    /// Adds `amount` to the user's deposited total, creating the record on
    /// first deposit. Returns the updated record.
    pub fn credit(&mut self, user: Pubkey, amount: u64) -> Result<BalanceRecord, EscrowError> {
        if amount == 0 {
            msg!("credit of 0 to {} on mint {}", user, self.mint);
            return Err(EscrowError::InvalidAmount);
        }

        match self.position(&user) {
            Some(idx) => {
                let entry = &mut self.records[idx];
                entry.total_deposited = entry
                    .total_deposited
                    .checked_add(amount)
                    .ok_or(EscrowError::MathOverflow)?;
                Ok(*entry)
            }
            None => {
                if self.records.len() >= MAX_ACCOUNTS {
                    msg!("ledger for mint {} is full", self.mint);
                    return Err(EscrowError::LedgerFull);
                }
                let entry = BalanceRecord {
                    user,
                    total_deposited: amount,
                    total_released: 0,
                };
                self.records.push(entry);
                Ok(entry)
            }
        }
    }

    /// Advances the user's released total to `new_total_released`.
    pub fn apply_release(
        &mut self,
        user: &Pubkey,
        new_total_released: u64,
    ) -> Result<BalanceRecord, EscrowError> {
        let idx = self.position(user).ok_or(EscrowError::UnknownAccount)?;
        let entry = &mut self.records[idx];
        if new_total_released < entry.total_released
            || new_total_released > entry.total_deposited
        {
            msg!(
                "release of {} for {} outside [{}, {}]",
                new_total_released,
                user,
                entry.total_released,
                entry.total_deposited
            );
            return Err(EscrowError::ReleaseInvariantViolated);
        }
        entry.total_released = new_total_released;
        Ok(*entry)
    }

    /// Deletes a fully released record.
    pub fn remove(&mut self, user: &Pubkey) -> Result<BalanceRecord, EscrowError> {
        let idx = match self.position(user) {
            Some(idx) => idx,
            None => {
                msg!("no balance record for {} on mint {}", user, self.mint);
                return Err(EscrowError::UnknownAccount);
            }
        };
        let remaining = self.records[idx].remaining();
        if remaining > 0 {
            msg!(
                "{} still has {} remaining on mint {}",
                user,
                remaining,
                self.mint
            );
            return Err(EscrowError::NonZeroBalance);
        }
        Ok(self.records.remove(idx))
    }

    /// Sum of what every record still holds in escrow.
    pub fn outstanding(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.remaining()))
    }

    /// Drops every record. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }
}
