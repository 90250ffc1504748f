use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::actions;
use crate::constants::{LEDGER_SEED, SCHEDULE_SEED};
use crate::state::{Ledger, Schedule};
use crate::utils::time;

pub fn handle_quote_balance(ctx: Context<QuoteBalance>, user: Pubkey) -> Result<()> {
    let now_ms = time::unix_ms(Clock::get()?.unix_timestamp)?;
    let quote = actions::quote(&ctx.accounts.schedule, &ctx.accounts.ledger, now_ms, &user)?;

    emit!(BalanceQuote {
        mint: ctx.accounts.mint.key(),
        user,
        total_deposited: quote.total_deposited,
        total_released: quote.total_released,
        remaining: quote.remaining,
        vestable: quote.vestable,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct QuoteBalance<'info> {
    #[account(
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
}

#[event]
pub struct BalanceQuote {
    pub mint: Pubkey,
    pub user: Pubkey,
    pub total_deposited: u64,
    pub total_released: u64,
    pub remaining: u64,
    pub vestable: u64,
}
