use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::actions;
use crate::constants::{CONFIG_SEED, LEDGER_SEED};
use crate::state::{EscrowConfig, Ledger};

pub fn handle_remove_account(ctx: Context<RemoveAccount>, user: Pubkey) -> Result<()> {
    let removed = actions::remove_account(
        &ctx.accounts.config,
        &ctx.accounts.admin.key(),
        &mut ctx.accounts.ledger,
        &user,
    )?;

    emit!(AccountRemoved {
        mint: ctx.accounts.mint.key(),
        user,
        total_deposited: removed.total_deposited,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RemoveAccount<'info> {
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
pub struct AccountRemoved {
    pub mint: Pubkey,
    pub user: Pubkey,
    pub total_deposited: u64,
}
