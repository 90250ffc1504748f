use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::actions;
use crate::constants::{CONFIG_SEED, LEDGER_SEED, SCHEDULE_SEED};
use crate::state::{EscrowConfig, Ledger, Period, Schedule};

pub fn handle_add_period(
    ctx: Context<AddPeriod>,
    effective_time_ms: i64,
    numerator: u64,
    denominator: u64,
) -> Result<()> {
    let period = Period {
        effective_time_ms,
        numerator,
        denominator,
    };
    actions::add_period(
        &ctx.accounts.config,
        &ctx.accounts.admin.key(),
        &mut ctx.accounts.schedule,
        &ctx.accounts.ledger,
        period,
    )?;

    emit!(PeriodAdded {
        mint: ctx.accounts.mint.key(),
        effective_time_ms,
        numerator,
        denominator,
        period_count: ctx.accounts.schedule.periods.len() as u8,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct AddPeriod<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, EscrowConfig>,

    #[account(
        mut,
        seeds = [SCHEDULE_SEED, mint.key().as_ref()],
        bump = schedule.bump
    )]
    pub schedule: Box<Account<'info, Schedule>>,

    #[account(
        seeds = [LEDGER_SEED, mint.key().as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Box<Account<'info, Ledger>>,

    pub mint: Account<'info, Mint>,

    pub admin: Signer<'info>,
}

#[event]
pub struct PeriodAdded {
    pub mint: Pubkey,
    pub effective_time_ms: i64,
    pub numerator: u64,
    pub denominator: u64,
    pub period_count: u8,
}
