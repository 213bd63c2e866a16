use anchor_lang::prelude::Pubkey;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PollClientError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollClientError {
    #[error("{account} account is malformed: expected {expected} bytes, got {actual}")]
    MalformedAccount {
        account: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{field} is {len} bytes, at most {max} allowed")]
    EncodingConstraintViolation {
        field: String,
        len: usize,
        max: usize,
    },

    #[error("No program address found for the given seeds under {program_id}")]
    DerivationExhausted { program_id: Pubkey },

    #[error("Unknown instruction opcode {0}")]
    UnknownInstruction(u8),

    #[error("Invalid instruction data")]
    MalformedInstruction,

    #[error("Only 255 polls supported")]
    PollsOverflow,

    #[error("Poll {0} has not been created")]
    PollNotFound(u8),

    #[error("Poll mismatch: requested {requested}, account holds {found}")]
    PollMismatch { requested: u8, found: u8 },

    #[error("Option {option_id} is not present in poll {poll_id}")]
    InvalidOption { poll_id: u8, option_id: u8 },

    #[error("Already voted in poll {0}")]
    AlreadyVoted(u8),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Ledger error: {0}")]
    Ledger(String),
}

impl PollClientError {
    pub(crate) fn too_long(field: impl Into<String>, len: usize, max: usize) -> Self {
        Self::EncodingConstraintViolation {
            field: field.into(),
            len,
            max,
        }
    }

    /// Whether the caller can fix the input and try again.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::EncodingConstraintViolation { .. }
                | Self::InvalidOption { .. }
                | Self::AlreadyVoted(_)
                | Self::PollNotFound(_)
        )
    }
}

impl From<serde_json::Error> for PollClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
