use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::actions;
use crate::constants::{CONFIG_SEED, LEDGER_SEED};
use crate::state::{EscrowConfig, Ledger};

/// Drops every balance record of the mint. On a custodial mint any
/// unreleased balance stays in the vault with nothing left to release it;
/// the amount is logged and reported as `stranded`.
pub fn handle_clear_ledger(ctx: Context<ClearLedger>) -> Result<()> {
    let reset = actions::clear_ledger(
        &ctx.accounts.config,
        &ctx.accounts.admin.key(),
        &mut ctx.accounts.ledger,
    )?;

    emit!(LedgerCleared {
        mint: ctx.accounts.mint.key(),
        removed: reset.removed as u8,
        stranded: reset.stranded,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ClearLedger<'info> {
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
pub struct LedgerCleared {
    pub mint: Pubkey,
    pub removed: u8,
    pub stranded: u64,
}
