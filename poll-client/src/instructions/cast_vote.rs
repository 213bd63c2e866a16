use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};
use log::debug;

use super::take;
use crate::{
    constants::{CAST_VOTE_DATA_LEN, CAST_VOTE_OPCODE},
    error::{PollClientError, Result},
    state::Poll,
};

/// Arguments of the vote instruction. `option_id` is the 1-based option number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastVote {
    pub poll_id: u8,
    pub option_id: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastVoteAccounts {
    pub poll: Pubkey,
    pub voter_record: Pubkey,
    pub fee_payer: Pubkey,
}

impl CastVote {
    pub fn new(poll_id: u8, option_id: u8) -> Result<Self> {
        if option_id == 0 {
            return Err(PollClientError::InvalidOption { poll_id, option_id });
        }
        Ok(CastVote { poll_id, option_id })
    }

    /// A vote for the option in 0-based `slot` of `poll`.
    pub fn for_slot(poll: &Poll, slot: usize) -> Result<Self> {
        let option_id = poll
            .option_number(slot)
            .ok_or(PollClientError::InvalidOption {
                poll_id: poll.id,
                option_id: u8::try_from(slot.saturating_add(1)).unwrap_or(u8::MAX),
            })?;
        Ok(CastVote {
            poll_id: poll.id,
            option_id,
        })
    }

    /// Checks the vote against the current poll snapshot.
    pub fn check_against(&self, poll: &Poll) -> Result<()> {
        if poll.id != self.poll_id {
            return Err(PollClientError::PollMismatch {
                requested: self.poll_id,
                found: poll.id,
            });
        }
        if poll.option(self.option_id).is_none() {
            return Err(PollClientError::InvalidOption {
                poll_id: self.poll_id,
                option_id: self.option_id,
            });
        }
        Ok(())
    }

    /// `[1][poll_id][option_id]`
    pub fn data(&self) -> [u8; CAST_VOTE_DATA_LEN] {
        [CAST_VOTE_OPCODE, self.poll_id, self.option_id]
    }

    pub(super) fn unpack(mut input: &[u8]) -> Result<Self> {
        let fields = take(&mut input, 2)?;
        Self::new(fields[0], fields[1])
    }
}

/// Builds the vote instruction.
///
/// Account order: poll (writable), voter record (writable), fee payer, system program.
pub fn cast_vote(
    program_id: &Pubkey,
    accounts: &CastVoteAccounts,
    args: &CastVote,
) -> Instruction {
    let account_metas = vec![
        AccountMeta::new(accounts.poll, false),
        AccountMeta::new(accounts.voter_record, false),
        AccountMeta::new_readonly(accounts.fee_payer, false),
        AccountMeta::new_readonly(system_program::ID, false),
    ];
    debug!(
        "cast vote instruction: poll {} option {}",
        args.poll_id, args.option_id
    );
    Instruction {
        program_id: *program_id,
        accounts: account_metas,
        data: args.data().to_vec(),
    }
}
