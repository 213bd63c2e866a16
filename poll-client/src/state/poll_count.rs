use log::debug;

use super::{fixed, read_bool, AccountLayout};
use crate::{
    constants::poll_count_layout as layout,
    error::{PollClientError, Result},
};

/// Global counter of the polls created so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollCount {
    pub is_initialized: bool,
    /// Number of polls created; the latest poll has this id
    pub count: u8,
    /// PDA bump seed
    pub bump: u8,
}

impl PollCount {
    /// Id the next poll will be created under.
    ///
    /// Ids start at 1, so a counter that does not exist yet hands out poll 1.
    pub fn next_poll_id(count: Option<&PollCount>) -> Result<u8> {
        let current = count.map_or(0, |count| count.count);
        current.checked_add(1).ok_or(PollClientError::PollsOverflow)
    }
}

impl AccountLayout for PollCount {
    const NAME: &'static str = "PollCount";
    const LEN: usize = layout::LEN;

    fn unpack(src: &[u8]) -> Result<Self> {
        let src = fixed::<{ layout::LEN }>(Self::NAME, src)?;
        let poll_count = PollCount {
            is_initialized: read_bool(src, layout::IS_INITIALIZED),
            count: src[layout::COUNT],
            bump: src[layout::BUMP],
        };
        debug!("decoded {:?}", poll_count);
        Ok(poll_count)
    }

    fn pack(&self) -> Vec<u8> {
        let mut dst = [0u8; layout::LEN];
        dst[layout::IS_INITIALIZED] = self.is_initialized as u8;
        dst[layout::COUNT] = self.count;
        dst[layout::BUMP] = self.bump;
        dst.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_poll_count() {
        let poll_count = PollCount::unpack(&[1, 0, 7]).unwrap();
        assert_eq!(
            poll_count,
            PollCount {
                is_initialized: true,
                count: 0,
                bump: 7,
            }
        );
        assert_eq!(PollCount::next_poll_id(Some(&poll_count)), Ok(1));
    }

    #[test]
    fn test_any_nonzero_flag_is_initialized() {
        assert!(PollCount::unpack(&[0x80, 2, 1]).unwrap().is_initialized);
        assert!(!PollCount::unpack(&[0, 2, 1]).unwrap().is_initialized);
    }

    #[test]
    fn test_short_buffer_is_malformed() {
        assert_eq!(
            PollCount::unpack(&[1, 0]),
            Err(PollClientError::MalformedAccount {
                account: "PollCount",
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_absent_account() {
        assert_eq!(PollCount::decode(None), Ok(None));
        assert_eq!(PollCount::next_poll_id(None), Ok(1));
    }

    #[test]
    fn test_next_poll_id_overflow() {
        let full = PollCount {
            is_initialized: true,
            count: u8::MAX,
            bump: 254,
        };
        assert_eq!(
            PollCount::next_poll_id(Some(&full)),
            Err(PollClientError::PollsOverflow)
        );
    }

    #[test]
    fn test_pack_layout() {
        let poll_count = PollCount {
            is_initialized: true,
            count: 12,
            bump: 251,
        };
        assert_eq!(poll_count.pack(), vec![1, 12, 251]);
    }
}
