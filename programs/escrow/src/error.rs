use anchor_lang::prelude::*;

/// Error codes for the escrow ledger program.
#[error_code]
pub enum EscrowError {
    #[msg("Unauthorized: administrative authority required")]
    Unauthorized,

    #[msg("Numerator and denominator must be greater than 0")]
    InvalidFraction,

    #[msg("Supplied denominator does not match the denominator of existing period(s)")]
    DenominatorMismatch,

    #[msg("Cannot add a period after accounts have been added")]
    ScheduleFrozen,

    #[msg("Schedule is full")]
    ScheduleFull,

    #[msg("Amount must be greater than 0")]
    InvalidAmount,

    #[msg("Some periods must exist in order to accept incoming transfers")]
    NoSchedule,

    #[msg("Nothing is currently vestable")]
    NothingVestable,

    #[msg("Cannot remove a user who still has a remaining balance for this symbol")]
    NonZeroBalance,

    #[msg("No balance record for this user")]
    UnknownAccount,

    #[msg("Ledger is full")]
    LedgerFull,

    #[msg("Symbol precision must match the registered precision")]
    PrecisionMismatch,

    #[msg("Invalid user key")]
    InvalidUser,

    #[msg("Operation not available for this ledger mode")]
    WrongLedgerMode,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Recipient token account missing from remaining accounts")]
    RecipientAccountMissing,

    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,

    #[msg("Release would move backwards or exceed the deposited total")]
    ReleaseInvariantViolated,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Invalid timestamp")]
    InvalidTimestamp,
}
