use anchor_lang::prelude::Pubkey;
use log::debug;

use crate::{
    constants::{POLL_COUNT_SEED, POLL_SEED},
    error::{PollClientError, Result},
};

/// Finds the program-derived address for `seeds` under `program_id`.
///
/// The bump search runs from 255 downwards exactly like the ledger does, so the
/// returned address is the one the poll program checks against.
pub fn derive(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    let (address, bump) = Pubkey::try_find_program_address(seeds, program_id).ok_or(
        PollClientError::DerivationExhausted {
            program_id: *program_id,
        },
    )?;
    debug!("derived {} (bump {}) under {}", address, bump, program_id);
    Ok((address, bump))
}

/// Re-derives an address from a bump that was stored in an account.
pub fn derive_with_bump(seeds: &[&[u8]], bump: u8, program_id: &Pubkey) -> Result<Pubkey> {
    let bump = [bump];
    let mut with_bump = seeds.to_vec();
    with_bump.push(&bump);
    Pubkey::create_program_address(&with_bump, program_id).map_err(|_| {
        PollClientError::DerivationExhausted {
            program_id: *program_id,
        }
    })
}

pub fn poll_count_address(program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(&[POLL_COUNT_SEED], program_id)
}

pub fn poll_address(program_id: &Pubkey, poll_id: u8) -> Result<(Pubkey, u8)> {
    derive(&[POLL_SEED, &[poll_id]], program_id)
}

/// The voter record for `voter` in a poll; `poll_bump` is the bump of the poll's own address.
pub fn voter_address(
    program_id: &Pubkey,
    poll_id: u8,
    poll_bump: u8,
    voter: &Pubkey,
) -> Result<(Pubkey, u8)> {
    derive(&[POLL_SEED, &[poll_id, poll_bump], voter.as_ref()], program_id)
}
