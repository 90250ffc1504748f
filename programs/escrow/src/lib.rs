use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

pub mod actions;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

use constants::LEDGER_SEED;
use error::EscrowError;
use state::{LedgerMode, Quantity};
use utils::payout;

pub use instructions::*;

declare_id!("CaoDJ9pcmdB6jWjp916juhRzLoAaqVU4tavhXStkWGPf");

#[program]
pub mod escrow {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::handle_initialize(ctx)
    }

    pub fn register_symbol(ctx: Context<RegisterSymbol>, mode: LedgerMode) -> Result<()> {
        instructions::handle_register_symbol(ctx, mode)
    }

    pub fn add_period(
        ctx: Context<AddPeriod>,
        effective_time_ms: i64,
        numerator: u64,
        denominator: u64,
    ) -> Result<()> {
        instructions::handle_add_period(ctx, effective_time_ms, numerator, denominator)
    }

    pub fn clear_periods(ctx: Context<ClearPeriods>) -> Result<()> {
        instructions::handle_clear_periods(ctx)
    }

    pub fn credit(ctx: Context<Credit>, user: Pubkey, total: Quantity) -> Result<()> {
        instructions::handle_credit(ctx, user, total)
    }

    pub fn deposit(ctx: Context<Deposit>, beneficiary: Pubkey, amount: u64) -> Result<()> {
        instructions::handle_deposit(ctx, beneficiary, amount)
    }

    /// Releases what the schedule allows for `user`, or for every user of the
    /// mint when `user` is `None`. Custodial mints pay out of the vault into
    /// the users' token accounts, passed as remaining accounts.
    pub fn vest<'info>(
        ctx: Context<'_, '_, '_, 'info, Vest<'info>>,
        user: Option<Pubkey>,
    ) -> Result<()> {
        let now_ms = utils::time::unix_ms(Clock::get()?.unix_timestamp)?;
        let mint_key = ctx.accounts.mint.key();

        let outcome = actions::vest(
            &ctx.accounts.schedule,
            &mut ctx.accounts.ledger,
            now_ms,
            user,
        )?;

        let paid_out = ctx.accounts.ledger.mode == LedgerMode::Custodial;
        if paid_out && !outcome.releases.is_empty() {
            let vault = ctx
                .accounts
                .vault
                .as_ref()
                .ok_or(EscrowError::InvalidTokenAccount)?;
            let token_program = ctx
                .accounts
                .token_program
                .as_ref()
                .ok_or(EscrowError::InvalidTokenAccount)?;

            payout::ensure_vault_covers(vault.amount, outcome.total_released())?;

            let ledger_ai = ctx.accounts.ledger.to_account_info();
            let signer_seeds: &[&[&[u8]]] =
                &[&[LEDGER_SEED, mint_key.as_ref(), &[ctx.accounts.ledger.bump]]];

            for release in outcome.releases.iter() {
                let recipient = payout::recipient_token_account(
                    ctx.remaining_accounts,
                    &release.user,
                    &mint_key,
                )?;
                token::transfer(
                    CpiContext::new_with_signer(
                        token_program.to_account_info(),
                        Transfer {
                            from: vault.to_account_info(),
                            to: recipient,
                            authority: ledger_ai.clone(),
                        },
                        signer_seeds,
                    ),
                    release.amount,
                )?;
            }
        }

        for release in outcome.releases.iter() {
            emit!(TokensVested {
                mint: mint_key,
                user: release.user,
                amount: release.amount,
                total_released: release.record.total_released,
                total_deposited: release.record.total_deposited,
                paid_out,
            });
        }
        Ok(())
    }

    pub fn remove_account(ctx: Context<RemoveAccount>, user: Pubkey) -> Result<()> {
        instructions::handle_remove_account(ctx, user)
    }

    pub fn clear_ledger(ctx: Context<ClearLedger>) -> Result<()> {
        instructions::handle_clear_ledger(ctx)
    }

    pub fn quote_balance(ctx: Context<QuoteBalance>, user: Pubkey) -> Result<()> {
        instructions::handle_quote_balance(ctx, user)
    }
}

