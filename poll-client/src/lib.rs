//! Client side of the on-chain poll program.
//!
//! Derives the poll program's account addresses, decodes the fixed-layout accounts it
//! stores and encodes the instructions it accepts. Signing and submission stay with the
//! caller; the ledger is reached through [`ledger::AccountReader`] and
//! [`ledger::AccountSubscriber`].

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod notifier;
pub mod pda;
pub mod state;

pub use client::PollClient;
pub use config::{Commitment, PollClientConfig};
pub use error::{PollClientError, Result};
pub use instructions::{CastVote, InitPoll, PollInstruction};
pub use notifier::ChangeNotifier;
pub use state::{AccountLayout, AccountSnapshot, Poll, PollCount, PollOption, PollVoter};
