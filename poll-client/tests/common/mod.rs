use anchor_lang::solana_program::instruction::Instruction;
use poll_client::{
    ledger::{fetch_account, MemoryLedger},
    pda, AccountLayout, Commitment, Poll, PollClientError, PollCount, PollInstruction, PollVoter,
    Result,
};

/// Applies an instruction to the ledger the way the deployed poll program does.
pub fn apply(ledger: &MemoryLedger, ix: &Instruction) -> Result<()> {
    let program_id = ix.program_id;
    match PollInstruction::unpack(&ix.data)? {
        PollInstruction::InitPoll(args) => {
            let count_address = ix.accounts[0].pubkey;
            let poll_address = ix.accounts[1].pubkey;

            let (expected_count_address, count_bump) = pda::poll_count_address(&program_id)?;
            assert_eq!(count_address, expected_count_address);
            let mut count = fetch_account::<PollCount, _>(ledger, &count_address, Commitment::Confirmed)?
                .into_ready()
                .unwrap_or(PollCount {
                    is_initialized: true,
                    count: 0,
                    bump: count_bump,
                });
            count.count = count
                .count
                .checked_add(1)
                .ok_or(PollClientError::PollsOverflow)?;

            let (expected_poll_address, poll_bump) = pda::poll_address(&program_id, count.count)?;
            if expected_poll_address != poll_address {
                return Err(PollClientError::PollMismatch {
                    requested: count.count,
                    found: 0,
                });
            }
            let poll = Poll::new(count.count, poll_bump, args.title(), args.options());
            ledger.set_account(poll_address, poll.pack())?;
            ledger.set_account(count_address, count.pack())?;
        }
        PollInstruction::CastVote(args) => {
            let poll_address = ix.accounts[0].pubkey;
            let voter_record = ix.accounts[1].pubkey;
            let voter = ix.accounts[2].pubkey;

            let mut poll = fetch_account::<Poll, _>(ledger, &poll_address, Commitment::Confirmed)?
                .into_ready()
                .ok_or(PollClientError::PollNotFound(args.poll_id))?;
            args.check_against(&poll)?;
            let existing =
                fetch_account::<PollVoter, _>(ledger, &voter_record, Commitment::Confirmed)?;
            if existing.ready().is_some() {
                return Err(PollClientError::AlreadyVoted(args.poll_id));
            }
            let (expected_record, voter_bump) =
                pda::voter_address(&program_id, poll.id, poll.bump, &voter)?;
            assert_eq!(voter_record, expected_record);

            let record = PollVoter {
                is_initialized: true,
                poll_id: args.poll_id,
                option_selected: args.option_id,
                bump: voter_bump,
            };
            ledger.set_account(voter_record, record.pack())?;

            let slot = (args.option_id - 1) as usize;
            poll.options[slot].votes += 1;
            ledger.set_account(poll_address, poll.pack())?;
        }
    }
    Ok(())
}
