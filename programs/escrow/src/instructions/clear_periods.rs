use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::actions;
use crate::constants::{CONFIG_SEED, SCHEDULE_SEED};
use crate::state::{EscrowConfig, Schedule};

pub fn handle_clear_periods(ctx: Context<ClearPeriods>) -> Result<()> {
    let removed = actions::clear_periods(
        &ctx.accounts.config,
        &ctx.accounts.admin.key(),
        &mut ctx.accounts.schedule,
    )?;

    emit!(PeriodsCleared {
        mint: ctx.accounts.mint.key(),
        removed: removed as u8,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ClearPeriods<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, EscrowConfig>,

    #[account(
        mut,
        seeds = [SCHEDULE_SEED, mint.key().as_ref()],
        bump = schedule.bump
    )]
    pub schedule: Box<Account<'info, Schedule>>,

    pub mint: Account<'info, Mint>,

    pub admin: Signer<'info>,
}

#[event]
pub struct PeriodsCleared {
    pub mint: Pubkey,
    pub removed: u8,
}
