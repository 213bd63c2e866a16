use log::debug;

use super::{fixed, read_bool, AccountLayout};
use crate::{constants::poll_voter_layout as layout, error::Result};

/// Records that one wallet voted in one poll.
///
/// The address is derived from the poll and the voter's key, so there is at most one
/// record per pair. Once initialized the record never changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollVoter {
    pub is_initialized: bool,
    pub poll_id: u8,
    /// 1-based option number, as submitted in the vote
    pub option_selected: u8,
    pub bump: u8,
}

impl PollVoter {
    /// Whether this record selected the option in 0-based `slot`.
    pub fn voted_for(&self, slot: usize) -> bool {
        self.is_initialized && usize::from(self.option_selected).checked_sub(1) == Some(slot)
    }
}

impl AccountLayout for PollVoter {
    const NAME: &'static str = "PollVoter";
    const LEN: usize = layout::LEN;

    fn unpack(src: &[u8]) -> Result<Self> {
        let src = fixed::<{ layout::LEN }>(Self::NAME, src)?;
        let voter = PollVoter {
            is_initialized: read_bool(src, layout::IS_INITIALIZED),
            poll_id: src[layout::POLL_ID],
            option_selected: src[layout::OPTION_SELECTED],
            bump: src[layout::BUMP],
        };
        debug!("decoded {:?}", voter);
        Ok(voter)
    }

    fn pack(&self) -> Vec<u8> {
        let mut dst = [0u8; layout::LEN];
        dst[layout::IS_INITIALIZED] = self.is_initialized as u8;
        dst[layout::POLL_ID] = self.poll_id;
        dst[layout::OPTION_SELECTED] = self.option_selected;
        dst[layout::BUMP] = self.bump;
        dst.to_vec()
    }
}
