use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::actions;
use crate::constants::{CONFIG_SEED, LEDGER_SEED};
use crate::state::{EscrowConfig, Ledger, Quantity};

pub fn handle_credit(ctx: Context<Credit>, user: Pubkey, total: Quantity) -> Result<()> {
    let record = actions::credit(
        &ctx.accounts.config,
        &ctx.accounts.admin.key(),
        &mut ctx.accounts.ledger,
        user,
        total,
    )?;

    emit!(AccountCredited {
        mint: ctx.accounts.mint.key(),
        user,
        amount: total.amount,
        total_deposited: record.total_deposited,
        total_released: record.total_released,
        via_transfer: false,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Credit<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, EscrowConfig>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, mint.key().as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Box<Account<'info, Ledger>>,

    pub mint: Account<'info, Mint>,

    pub admin: Signer<'info>,
}

#[event]
pub struct AccountCredited {
    pub mint: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub total_deposited: u64,
    pub total_released: u64,
    /// True when the credit came with a token transfer into the vault.
    pub via_transfer: bool,
}
