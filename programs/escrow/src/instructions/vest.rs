use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{LEDGER_SEED, SCHEDULE_SEED, VAULT_SEED};
use crate::error::EscrowError;
use crate::state::{Ledger, Schedule};

// NOTE: `vest` handler logic lives in `src/lib.rs` to avoid Anchor
// `Context` lifetime invariance issues when passing remaining accounts
// (recipient token accounts) across modules.

#[derive(Accounts)]
pub struct Vest<'info> {
    #[account(
        seeds = [SCHEDULE_SEED, mint.key().as_ref()],
        bump = schedule.bump
    )]
    pub schedule: Box<Account<'info, Schedule>>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, mint.key().as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Box<Account<'info, Ledger>>,

    /// Required for custodial mints only.
    #[account(
        mut,
        seeds = [VAULT_SEED, mint.key().as_ref()],
        bump = ledger.vault_bump,
        constraint = vault.mint == mint.key() @ EscrowError::InvalidTokenMint,
    )]
    pub vault: Option<Account<'info, TokenAccount>>,

    pub mint: Account<'info, Mint>,

    pub token_program: Option<Program<'info, Token>>,
}

#[event]
pub struct TokensVested {
    pub mint: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub total_released: u64,
    pub total_deposited: u64,
    /// True when `amount` left the vault for the user's token account.
    pub paid_out: bool,
}
