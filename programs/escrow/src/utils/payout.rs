//! Checks made before a custodial vest moves tokens out of the vault.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount};
use std::result::Result;

use crate::error::EscrowError;

/// The vault must hold everything a vest is about to pay out.
pub fn ensure_vault_covers(vault_amount: u64, owed: u64) -> Result<(), EscrowError> {
    if vault_amount < owed {
        msg!("vault holds {} but {} is due", vault_amount, owed);
        return Err(EscrowError::InsufficientVaultBalance);
    }
    Ok(())
}

/// Finds the writable SPL token account owned by `owner` for `mint` among
/// `accounts`. Anything the token program does not own, or that the
/// transaction did not mark writable, is skipped.
pub fn recipient_token_account<'info>(
    accounts: &[AccountInfo<'info>],
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<AccountInfo<'info>, EscrowError> {
    for ai in accounts.iter() {
        if ai.owner != &token::ID || !ai.is_writable {
            continue;
        }
        let data = ai
            .try_borrow_data()
            .map_err(|_| EscrowError::InvalidTokenAccount)?;
        let parsed = match TokenAccount::try_deserialize(&mut &data[..]) {
            Ok(t) => t,
            Err(_) => continue,
        };
        if parsed.owner == *owner && parsed.mint == *mint {
            return Ok(ai.clone());
        }
    }
    msg!("no writable token account of mint {} owned by {}", mint, owner);
    Err(EscrowError::RecipientAccountMissing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_spl::token::spl_token::solana_program::program_pack::Pack;
    use anchor_spl::token::spl_token::state::{Account as SplAccount, AccountState};

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn packed(mint: Pubkey, owner: Pubkey, amount: u64) -> Vec<u8> {
        let mut data = vec![0u8; SplAccount::LEN];
        SplAccount::pack(
            SplAccount {
                mint,
                owner,
                amount,
                state: AccountState::Initialized,
                ..SplAccount::default()
            },
            &mut data,
        )
        .unwrap();
        data
    }

    /// Backing storage for one `AccountInfo`.
    struct Slot {
        key: Pubkey,
        program: Pubkey,
        writable: bool,
        lamports: u64,
        data: Vec<u8>,
    }

    impl Slot {
        fn token(n: u8, mint: Pubkey, owner: Pubkey) -> Self {
            Slot {
                key: key(n),
                program: token::ID,
                writable: true,
                lamports: 1,
                data: packed(mint, owner, 0),
            }
        }

        fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                false,
                self.writable,
                &mut self.lamports,
                &mut self.data,
                &self.program,
                false,
                0,
            )
        }
    }

    fn lookup(slots: &mut [Slot], owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey, EscrowError> {
        let infos: Vec<AccountInfo> = slots.iter_mut().map(Slot::info).collect();
        recipient_token_account(&infos, owner, mint).map(|ai| *ai.key)
    }

    const MINT: u8 = 9;
    const USER: u8 = 3;

    #[test]
    fn picks_the_users_account_for_the_mint() {
        let mut slots = [
            Slot::token(20, key(MINT), key(4)),
            Slot::token(21, key(MINT), key(USER)),
        ];
        assert_eq!(lookup(&mut slots, &key(USER), &key(MINT)).unwrap(), key(21));
    }

    #[test]
    fn no_remaining_accounts_is_missing() {
        let mut slots: [Slot; 0] = [];
        assert!(matches!(
            lookup(&mut slots, &key(USER), &key(MINT)),
            Err(EscrowError::RecipientAccountMissing)
        ));
    }

    #[test]
    fn account_of_another_owner_is_missing() {
        let mut slots = [Slot::token(20, key(MINT), key(4))];
        assert!(matches!(
            lookup(&mut slots, &key(USER), &key(MINT)),
            Err(EscrowError::RecipientAccountMissing)
        ));
    }

    #[test]
    fn account_of_another_mint_is_missing() {
        let mut slots = [Slot::token(20, key(8), key(USER))];
        assert!(matches!(
            lookup(&mut slots, &key(USER), &key(MINT)),
            Err(EscrowError::RecipientAccountMissing)
        ));
    }

    #[test]
    fn read_only_account_is_skipped() {
        let mut read_only = Slot::token(20, key(MINT), key(USER));
        read_only.writable = false;
        let mut slots = [read_only];
        assert!(matches!(
            lookup(&mut slots, &key(USER), &key(MINT)),
            Err(EscrowError::RecipientAccountMissing)
        ));
    }

    #[test]
    fn account_outside_token_program_is_skipped() {
        // Same bytes as a valid token account, but owned by another program.
        let mut foreign = Slot::token(20, key(MINT), key(USER));
        foreign.program = key(77);
        let mut slots = [foreign, Slot::token(21, key(MINT), key(USER))];
        assert_eq!(lookup(&mut slots, &key(USER), &key(MINT)).unwrap(), key(21));
    }

    #[test]
    fn undecodable_data_is_skipped() {
        let mut garbage = Slot::token(20, key(MINT), key(USER));
        garbage.data = vec![0u8; 12];
        let mut slots = [garbage];
        assert!(matches!(
            lookup(&mut slots, &key(USER), &key(MINT)),
            Err(EscrowError::RecipientAccountMissing)
        ));
    }

    #[test]
    fn vault_must_cover_the_release_total() {
        assert!(ensure_vault_covers(100_00, 100_00).is_ok());
        assert!(ensure_vault_covers(100_01, 100_00).is_ok());
        assert!(matches!(
            ensure_vault_covers(99_99, 100_00),
            Err(EscrowError::InsufficientVaultBalance)
        ));
    }
}
