use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::actions;
use crate::constants::{LEDGER_SEED, SCHEDULE_SEED, VAULT_SEED};
use crate::error::EscrowError;
use crate::state::{Ledger, Schedule};

use super::AccountCredited;

/// Inbound transfer: the depositor moves `amount` into the mint's vault and
/// the amount is escrowed for `beneficiary`.
pub fn handle_deposit(ctx: Context<Deposit>, beneficiary: Pubkey, amount: u64) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.depositor_token_account.owner,
        ctx.accounts.depositor.key(),
        EscrowError::InvalidTokenAccount
    );

    let record = actions::receive_transfer(
        &ctx.accounts.schedule,
        &mut ctx.accounts.ledger,
        beneficiary,
        amount,
    )?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.depositor_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(AccountCredited {
        mint: ctx.accounts.mint.key(),
        user: beneficiary,
        amount,
        total_deposited: record.total_deposited,
        total_released: record.total_released,
        via_transfer: true,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Deposit<'info> {
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

    #[account(
        mut,
        seeds = [VAULT_SEED, mint.key().as_ref()],
        bump = ledger.vault_bump,
        constraint = vault.mint == mint.key() @ EscrowError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = depositor_token_account.mint == mint.key() @ EscrowError::InvalidTokenMint,
    )]
    pub depositor_token_account: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}
