use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{CONFIG_SEED, LEDGER_SEED, MAX_ACCOUNTS, MAX_PERIODS, SCHEDULE_SEED, VAULT_SEED};
use crate::state::{EscrowConfig, Ledger, LedgerMode, Schedule};

pub fn handle_register_symbol(ctx: Context<RegisterSymbol>, mode: LedgerMode) -> Result<()> {
    ctx.accounts.config.authorize(&ctx.accounts.admin.key())?;

    let mint = &ctx.accounts.mint;

    let schedule = &mut ctx.accounts.schedule;
    schedule.mint = mint.key();
    schedule.bump = ctx.bumps.schedule;
    schedule.periods = Vec::with_capacity(MAX_PERIODS);

    let ledger = &mut ctx.accounts.ledger;
    ledger.mint = mint.key();
    ledger.decimals = mint.decimals;
    ledger.mode = mode;
    ledger.bump = ctx.bumps.ledger;
    ledger.vault_bump = ctx.bumps.vault;
    ledger.records = Vec::with_capacity(MAX_ACCOUNTS);

    emit!(SymbolRegistered {
        mint: mint.key(),
        decimals: mint.decimals,
        mode,
        vault: ctx.accounts.vault.key(),
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RegisterSymbol<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, EscrowConfig>,

    #[account(
        init,
        payer = admin,
        space = Schedule::space(MAX_PERIODS),
        seeds = [SCHEDULE_SEED, mint.key().as_ref()],
        bump
    )]
    pub schedule: Box<Account<'info, Schedule>>,

    #[account(
        init,
        payer = admin,
        space = Ledger::space(MAX_ACCOUNTS),
        seeds = [LEDGER_SEED, mint.key().as_ref()],
        bump
    )]
    pub ledger: Box<Account<'info, Ledger>>,

    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = ledger,
        seeds = [VAULT_SEED, mint.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct SymbolRegistered {
    pub mint: Pubkey,
    pub decimals: u8,
    pub mode: LedgerMode,
    pub vault: Pubkey,
}
