use std::{ops::RangeInclusive, sync::Arc};

use anchor_lang::{prelude::Pubkey, solana_program::instruction::Instruction};
use log::{debug, info};

use crate::{
    config::{Commitment, PollClientConfig},
    error::{PollClientError, Result},
    instructions::{cast_vote, init_poll, CastVote, CastVoteAccounts, InitPoll, InitPollAccounts},
    ledger::{fetch_account, AccountReader, AccountSubscriber},
    notifier::ChangeNotifier,
    pda,
    state::{AccountSnapshot, Poll, PollCount, PollVoter},
};

/// Reads poll state and builds ready-to-sign instructions for one deployed poll program.
pub struct PollClient<L> {
    program_id: Pubkey,
    commitment: Commitment,
    ledger: Arc<L>,
}

impl<L: AccountReader> PollClient<L> {
    pub fn new(config: &PollClientConfig, ledger: Arc<L>) -> Result<Self> {
        Ok(PollClient {
            program_id: config.program_id()?,
            commitment: config.commitment,
            ledger,
        })
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn poll_count(&self) -> Result<AccountSnapshot<PollCount>> {
        let (address, _) = pda::poll_count_address(&self.program_id)?;
        fetch_account(&*self.ledger, &address, self.commitment)
    }

    pub fn poll(&self, poll_id: u8) -> Result<AccountSnapshot<Poll>> {
        let (address, _) = pda::poll_address(&self.program_id, poll_id)?;
        fetch_account(&*self.ledger, &address, self.commitment)
    }

    pub fn voter(&self, poll_id: u8, voter: &Pubkey) -> Result<AccountSnapshot<PollVoter>> {
        let (address, _) = self.voter_address(poll_id, voter)?;
        fetch_account(&*self.ledger, &address, self.commitment)
    }

    /// Ids of every poll created so far; empty when no poll exists.
    pub fn poll_ids(&self) -> Result<RangeInclusive<u8>> {
        let count = self.poll_count()?.into_ready().map_or(0, |count| count.count);
        Ok(1..=count)
    }

    /// Builds the instruction creating the next poll.
    ///
    /// The title and options are validated before the ledger is touched. The poll id comes
    /// from a fresh read of the poll counter; a concurrent creator can claim the same id
    /// first, in which case the program rejects this instruction.
    pub fn create_poll<S: Into<String>>(
        &self,
        fee_payer: &Pubkey,
        title: &str,
        options: impl IntoIterator<Item = S>,
    ) -> Result<(u8, Instruction)> {
        let args = InitPoll::new(title, options)?;
        let poll_count = self.poll_count()?.into_ready();
        let poll_id = PollCount::next_poll_id(poll_count.as_ref())?;

        let (poll_count_address, _) = pda::poll_count_address(&self.program_id)?;
        let (poll_address, _) = pda::poll_address(&self.program_id, poll_id)?;
        info!("creating poll {} at {}", poll_id, poll_address);

        let accounts = InitPollAccounts {
            poll_count: poll_count_address,
            poll: poll_address,
            fee_payer: *fee_payer,
        };
        Ok((poll_id, init_poll(&self.program_id, &accounts, &args)))
    }

    /// Builds a vote by `voter` for the 1-based `option_id` of `poll_id`.
    ///
    /// The vote is checked against the current poll and the voter's record first.
    pub fn cast_vote(&self, voter: &Pubkey, poll_id: u8, option_id: u8) -> Result<Instruction> {
        let args = CastVote::new(poll_id, option_id)?;
        let poll = self
            .poll(poll_id)?
            .into_ready()
            .ok_or(PollClientError::PollNotFound(poll_id))?;
        args.check_against(&poll)?;

        let (poll_address, _) = pda::poll_address(&self.program_id, poll_id)?;
        let (voter_record, _) = pda::voter_address(&self.program_id, poll_id, poll.bump, voter)?;
        let existing = fetch_account::<PollVoter, _>(&*self.ledger, &voter_record, self.commitment)?;
        if existing.ready().is_some_and(|record| record.is_initialized) {
            return Err(PollClientError::AlreadyVoted(poll_id));
        }

        debug!("voter {} votes {} in poll {}", voter, option_id, poll_id);
        let accounts = CastVoteAccounts {
            poll: poll_address,
            voter_record,
            fee_payer: *voter,
        };
        Ok(cast_vote(&self.program_id, &accounts, &args))
    }

    /// Voter records hang off the poll's own bump, so the poll address is derived first.
    fn voter_address(&self, poll_id: u8, voter: &Pubkey) -> Result<(Pubkey, u8)> {
        let (_, poll_bump) = pda::poll_address(&self.program_id, poll_id)?;
        pda::voter_address(&self.program_id, poll_id, poll_bump, voter)
    }
}

impl<L> PollClient<L>
where
    L: AccountReader + AccountSubscriber + Send + Sync + 'static,
{
    pub fn notifier(&self) -> ChangeNotifier<L> {
        ChangeNotifier::new(Arc::clone(&self.ledger), self.commitment)
    }

    pub fn watch_poll_count<F>(&self, on_change: F) -> Result<()>
    where
        F: Fn(Result<AccountSnapshot<PollCount>>) + Send + Sync + 'static,
    {
        let (address, _) = pda::poll_count_address(&self.program_id)?;
        self.notifier().subscribe(address, on_change)
    }

    pub fn watch_poll<F>(&self, poll_id: u8, on_change: F) -> Result<()>
    where
        F: Fn(Result<AccountSnapshot<Poll>>) + Send + Sync + 'static,
    {
        let (address, _) = pda::poll_address(&self.program_id, poll_id)?;
        self.notifier().subscribe(address, on_change)
    }

    pub fn watch_voter<F>(&self, poll_id: u8, voter: &Pubkey, on_change: F) -> Result<()>
    where
        F: Fn(Result<AccountSnapshot<PollVoter>>) + Send + Sync + 'static,
    {
        let (address, _) = self.voter_address(poll_id, voter)?;
        self.notifier().subscribe(address, on_change)
    }
}
