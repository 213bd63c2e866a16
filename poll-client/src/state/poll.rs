use log::{debug, warn};

use super::{fixed, read_bool, read_text, read_u64, write_text, AccountLayout};
use crate::{
    constants::{
        poll_layout as layout, poll_option_layout, OPTION_COUNT, OPTION_LENGTH, OPTION_SIZE,
        TITLE_LENGTH as TITLE_WIDTH,
    },
    error::Result,
};

/// One proposal and the options voters can choose from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Poll {
    pub is_initialized: bool,
    /// Sequential poll id, starting at 1
    pub id: u8,
    /// The proposal title (max 100 bytes)
    pub title: String,
    pub title_length: u8,
    /// The first `options_length` option slots
    pub options: Vec<PollOption>,
    pub options_length: u8,
    /// PDA bump seed, also part of every voter record address for this poll
    pub bump: u8,
}

/// One selectable choice within a [`Poll`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollOption {
    /// Slot index as written by the program. Votes are credited by slot position, so
    /// this byte is informational only.
    pub id: u8,
    /// The option text (max 50 bytes)
    pub title: String,
    pub title_length: u8,
    pub votes: u64,
}

impl PollOption {
    pub fn new(id: u8, title: &str) -> Self {
        PollOption {
            id,
            title: title.to_string(),
            title_length: title.len().min(OPTION_LENGTH) as u8,
            votes: 0,
        }
    }
}

impl Poll {
    /// A freshly created poll, laid out the way the program initializes it.
    pub fn new<S: AsRef<str>>(id: u8, bump: u8, title: &str, options: &[S]) -> Self {
        let options = options
            .iter()
            .take(OPTION_COUNT)
            .enumerate()
            .map(|(slot, option)| PollOption::new(slot as u8, option.as_ref()))
            .collect::<Vec<_>>();
        Poll {
            is_initialized: true,
            id,
            title: title.to_string(),
            title_length: title.len().min(TITLE_WIDTH) as u8,
            options_length: options.len() as u8,
            options,
            bump,
        }
    }

    /// Looks up an option by its 1-based number; `1` is the first slot.
    pub fn option(&self, option_id: u8) -> Option<&PollOption> {
        let slot = option_id.checked_sub(1)?;
        self.options.get(slot as usize)
    }

    /// The 1-based number voters use for the option in `slot`.
    pub fn option_number(&self, slot: usize) -> Option<u8> {
        if slot < self.options.len() {
            u8::try_from(slot + 1).ok()
        } else {
            None
        }
    }

    pub fn total_votes(&self) -> u64 {
        self.options.iter().map(|option| option.votes).sum()
    }
}

impl AccountLayout for PollOption {
    const NAME: &'static str = "PollOption";
    const LEN: usize = OPTION_SIZE;

    fn unpack(src: &[u8]) -> Result<Self> {
        let src = fixed::<{ OPTION_SIZE }>(Self::NAME, src)?;
        let title_length = src[poll_option_layout::TITLE_LENGTH];
        Ok(PollOption {
            id: src[poll_option_layout::ID],
            title: read_text(
                &src[poll_option_layout::TITLE..poll_option_layout::TITLE_LENGTH],
                title_length,
                "option title",
            ),
            title_length,
            votes: read_u64(src, poll_option_layout::VOTES),
        })
    }

    fn pack(&self) -> Vec<u8> {
        let mut dst = [0u8; OPTION_SIZE];
        dst[poll_option_layout::ID] = self.id;
        write_text(
            &mut dst[poll_option_layout::TITLE..poll_option_layout::TITLE_LENGTH],
            &self.title,
        );
        dst[poll_option_layout::TITLE_LENGTH] = self.title_length;
        dst[poll_option_layout::VOTES..].copy_from_slice(&self.votes.to_le_bytes());
        dst.to_vec()
    }
}

impl AccountLayout for Poll {
    const NAME: &'static str = "Poll";
    const LEN: usize = layout::LEN;

    fn unpack(src: &[u8]) -> Result<Self> {
        let src = fixed::<{ layout::LEN }>(Self::NAME, src)?;
        let title_length = src[layout::TITLE_LENGTH];
        let options_length = src[layout::OPTIONS_LENGTH];

        // Every slot is decoded; only the first `options_length` carry meaning.
        let mut options = src[layout::OPTIONS..layout::OPTIONS_LENGTH]
            .chunks_exact(OPTION_SIZE)
            .map(PollOption::unpack)
            .collect::<Result<Vec<_>>>()?;
        if options_length as usize > OPTION_COUNT {
            warn!(
                "poll {} claims {} options, only {} slots exist",
                src[layout::ID],
                options_length,
                OPTION_COUNT
            );
        }
        options.truncate(options_length as usize);

        let poll = Poll {
            is_initialized: read_bool(src, layout::IS_INITIALIZED),
            id: src[layout::ID],
            title: read_text(
                &src[layout::TITLE..layout::TITLE_LENGTH],
                title_length,
                "poll title",
            ),
            title_length,
            options,
            options_length,
            bump: src[layout::BUMP],
        };
        debug!(
            "decoded poll {} with {} options",
            poll.id,
            poll.options.len()
        );
        Ok(poll)
    }

    fn pack(&self) -> Vec<u8> {
        let mut dst = [0u8; layout::LEN];
        dst[layout::IS_INITIALIZED] = self.is_initialized as u8;
        dst[layout::ID] = self.id;
        write_text(&mut dst[layout::TITLE..layout::TITLE_LENGTH], &self.title);
        dst[layout::TITLE_LENGTH] = self.title_length;

        let slots = &mut dst[layout::OPTIONS..layout::OPTIONS_LENGTH];
        for (slot, chunk) in slots.chunks_exact_mut(OPTION_SIZE).enumerate() {
            let packed = match self.options.get(slot) {
                Some(option) => option.pack(),
                None => PollOption::new(slot as u8, "").pack(),
            };
            chunk.copy_from_slice(&packed);
        }

        dst[layout::OPTIONS_LENGTH] = self.options_length;
        dst[layout::BUMP] = self.bump;
        dst.to_vec()
    }
}
