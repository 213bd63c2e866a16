use crate::{
    constants::{CAST_VOTE_OPCODE, INIT_POLL_OPCODE},
    error::{PollClientError, Result},
};

pub mod cast_vote;
pub use cast_vote::*;

pub mod init_poll;
pub use init_poll::*;

/// Every instruction the poll program accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollInstruction {
    /// 0, create the next poll
    ///  - poll count account (writable)
    ///  - poll account (writable)
    ///  - system program
    ///  - fee payer
    InitPoll(InitPoll),
    /// 1, vote in a poll
    ///  - poll account (writable)
    ///  - voter record account (writable)
    ///  - fee payer
    ///  - system program
    CastVote(CastVote),
}

impl PollInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self> {
        let (tag, rest) = input
            .split_first()
            .ok_or(PollClientError::MalformedInstruction)?;
        match *tag {
            INIT_POLL_OPCODE => InitPoll::unpack(rest).map(Self::InitPoll),
            CAST_VOTE_OPCODE => CastVote::unpack(rest).map(Self::CastVote),
            opcode => Err(PollClientError::UnknownInstruction(opcode)),
        }
    }

    pub fn pack(&self) -> Vec<u8> {
        match self {
            Self::InitPoll(args) => args.data(),
            Self::CastVote(args) => args.data().to_vec(),
        }
    }
}

/// Splits `len` bytes off the front of `input`.
fn take<'a>(input: &mut &'a [u8], len: usize) -> Result<&'a [u8]> {
    if input.len() < len {
        return Err(PollClientError::MalformedInstruction);
    }
    let (head, tail) = input.split_at(len);
    *input = tail;
    Ok(head)
}
