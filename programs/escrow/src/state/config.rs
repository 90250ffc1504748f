use anchor_lang::prelude::*;
use std::result::Result;

use crate::error::EscrowError;

/// Singleton config PDA naming the administrative authority.
#[account]
pub struct EscrowConfig {
    /// Authority allowed to shape schedules, credit and remove accounts.
    pub admin: Pubkey,
    pub bump: u8,
}

impl EscrowConfig {
    pub const SIZE: usize =
        32 + // admin
        1;   // bump

    /// Capability check: the caller must be the configured admin.
    pub fn authorize(&self, caller: &Pubkey) -> Result<(), EscrowError> {
        if *caller != self.admin {
            msg!("caller {} is not the escrow admin {}", caller, self.admin);
            return Err(EscrowError::Unauthorized);
        }
        Ok(())
    }
}
