// Seeds for every program-derived address the poll program owns
pub const POLL_COUNT_SEED: &[u8] = b"PollCount";
pub const POLL_SEED: &[u8] = b"Poll";

// Fixed field widths shared by the account codec and the instruction builder
pub const TITLE_LENGTH: usize = 100;
pub const OPTION_LENGTH: usize = 50;
pub const OPTION_COUNT: usize = 4;
pub const OPTION_SIZE: usize = OPTION_LENGTH + 1 + 1 + 8;

// Instruction opcodes understood by the poll program
pub const INIT_POLL_OPCODE: u8 = 0;
pub const CAST_VOTE_OPCODE: u8 = 1;
pub const CAST_VOTE_DATA_LEN: usize = 3;

/// `[is_initialized:1][count:1][bump:1]`
pub mod poll_count_layout {
    pub const IS_INITIALIZED: usize = 0;
    pub const COUNT: usize = 1;
    pub const BUMP: usize = 2;
    pub const LEN: usize = 3;
}

/// `[is_initialized:1][poll_id:1][option_selected:1][bump:1]`
pub mod poll_voter_layout {
    pub const IS_INITIALIZED: usize = 0;
    pub const POLL_ID: usize = 1;
    pub const OPTION_SELECTED: usize = 2;
    pub const BUMP: usize = 3;
    pub const LEN: usize = 4;
}

/// `[id:1][title:50][title_length:1][votes:8]`, relative to the start of its slot.
pub mod poll_option_layout {
    use super::{OPTION_LENGTH, OPTION_SIZE};

    pub const ID: usize = 0;
    pub const TITLE: usize = 1;
    pub const TITLE_LENGTH: usize = TITLE + OPTION_LENGTH;
    pub const VOTES: usize = TITLE_LENGTH + 1;
    pub const LEN: usize = OPTION_SIZE;
}

/// `[is_initialized:1][id:1][title:100][title_length:1][options:60*4][options_length:1][bump:1]`
pub mod poll_layout {
    use super::{OPTION_COUNT, OPTION_SIZE, TITLE_LENGTH as TITLE_WIDTH};

    pub const IS_INITIALIZED: usize = 0;
    pub const ID: usize = 1;
    pub const TITLE: usize = 2;
    pub const TITLE_LENGTH: usize = TITLE + TITLE_WIDTH;
    pub const OPTIONS: usize = TITLE_LENGTH + 1;
    pub const OPTIONS_LENGTH: usize = OPTIONS + OPTION_SIZE * OPTION_COUNT;
    pub const BUMP: usize = OPTIONS_LENGTH + 1;
    pub const LEN: usize = BUMP + 1;
}
