use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};
use log::debug;

use super::take;
use crate::{
    constants::{INIT_POLL_OPCODE, OPTION_COUNT, OPTION_LENGTH, TITLE_LENGTH},
    error::{PollClientError, Result},
};

/// Arguments of the create-poll instruction.
///
/// Only constructible through [`InitPoll::new`], so every value fits the fixed-width
/// fields of the poll account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitPoll {
    title: String,
    options: Vec<String>,
}

/// Accounts the create-poll instruction touches, besides the system program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitPollAccounts {
    pub poll_count: Pubkey,
    pub poll: Pubkey,
    pub fee_payer: Pubkey,
}

impl InitPoll {
    pub fn new<S: Into<String>>(
        title: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let title = title.into();
        let options = options.into_iter().map(Into::into).collect::<Vec<String>>();

        if title.len() > TITLE_LENGTH {
            return Err(PollClientError::too_long("title", title.len(), TITLE_LENGTH));
        }
        if options.len() > OPTION_COUNT {
            return Err(PollClientError::too_long(
                "option count",
                options.len(),
                OPTION_COUNT,
            ));
        }
        if let Some((index, option)) = options
            .iter()
            .enumerate()
            .find(|(_, option)| option.len() > OPTION_LENGTH)
        {
            return Err(PollClientError::too_long(
                format!("option {}", index + 1),
                option.len(),
                OPTION_LENGTH,
            ));
        }

        Ok(InitPoll { title, options })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// `[0][title_len][title][option_count][option_len; option_count][options]`
    pub fn data(&self) -> Vec<u8> {
        let total = 1
            + 1
            + self.title.len()
            + 1
            + self.options.len()
            + self.options.iter().map(String::len).sum::<usize>();

        let mut data = Vec::with_capacity(total);
        data.push(INIT_POLL_OPCODE);
        data.push(self.title.len() as u8);
        data.extend_from_slice(self.title.as_bytes());
        data.push(self.options.len() as u8);
        data.extend(self.options.iter().map(|option| option.len() as u8));
        for option in &self.options {
            data.extend_from_slice(option.as_bytes());
        }
        debug_assert_eq!(data.len(), total);
        data
    }

    /// Parses the payload that follows the opcode byte.
    pub(super) fn unpack(mut input: &[u8]) -> Result<Self> {
        let title_length = take(&mut input, 1)?[0];
        let title = text(take(&mut input, title_length as usize)?)?;
        let options_count = take(&mut input, 1)?[0];
        let options_length = take(&mut input, options_count as usize)?.to_vec();
        let options = options_length
            .iter()
            .map(|length| take(&mut input, *length as usize).and_then(text))
            .collect::<Result<Vec<_>>>()?;
        Self::new(title, options)
    }
}

fn text(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|_| PollClientError::MalformedInstruction)
}

/// Builds the create-poll instruction.
///
/// Account order: poll count (writable), poll (writable), system program, fee payer.
pub fn init_poll(
    program_id: &Pubkey,
    accounts: &InitPollAccounts,
    args: &InitPoll,
) -> Instruction {
    let account_metas = vec![
        AccountMeta::new(accounts.poll_count, false),
        AccountMeta::new(accounts.poll, false),
        AccountMeta::new_readonly(system_program::ID, false),
        AccountMeta::new_readonly(accounts.fee_payer, false),
    ];
    let data = args.data();
    debug!(
        "init poll instruction: {} option(s), {} byte payload",
        args.options.len(),
        data.len()
    );
    Instruction {
        program_id: *program_id,
        accounts: account_metas,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_layout() {
        let args = InitPoll::new("Lunch?", ["Yes", "No"]).unwrap();
        let mut expected = vec![0, 6];
        expected.extend_from_slice(b"Lunch?");
        expected.extend_from_slice(&[2, 3, 2]);
        expected.extend_from_slice(b"YesNo");
        assert_eq!(args.data(), expected);
    }

    #[test]
    fn test_title_bound() {
        let title = "t".repeat(TITLE_LENGTH + 1);
        assert_eq!(
            InitPoll::new(title, ["a", "b"]),
            Err(PollClientError::EncodingConstraintViolation {
                field: "title".to_string(),
                len: 101,
                max: 100,
            })
        );
        assert!(InitPoll::new("t".repeat(TITLE_LENGTH), ["a", "b"]).is_ok());
    }

    #[test]
    fn test_option_bounds() {
        assert!(matches!(
            InitPoll::new("q", ["a", "b", "c", "d", "e"]),
            Err(PollClientError::EncodingConstraintViolation { len: 5, max: 4, .. })
        ));
        let long = "o".repeat(OPTION_LENGTH + 1);
        assert_eq!(
            InitPoll::new("q", ["fine".to_string(), long]),
            Err(PollClientError::EncodingConstraintViolation {
                field: "option 2".to_string(),
                len: 51,
                max: 50,
            })
        );
    }

    #[test]
    fn test_multibyte_text_counts_bytes() {
        // 34 three-byte characters are 102 bytes, over the title width
        let title = "\u{2603}".repeat(34);
        assert!(matches!(
            InitPoll::new(title, ["a"]),
            Err(PollClientError::EncodingConstraintViolation { len: 102, .. })
        ));
    }

    #[test]
    fn test_account_order() {
        let program_id = Pubkey::new_unique();
        let accounts = InitPollAccounts {
            poll_count: Pubkey::new_unique(),
            poll: Pubkey::new_unique(),
            fee_payer: Pubkey::new_unique(),
        };
        let args = InitPoll::new("q", ["a", "b"]).unwrap();
        let ix = init_poll(&program_id, &accounts, &args);
        assert_eq!(ix.program_id, program_id);
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new(accounts.poll_count, false),
                AccountMeta::new(accounts.poll, false),
                AccountMeta::new_readonly(system_program::ID, false),
                AccountMeta::new_readonly(accounts.fee_payer, false),
            ]
        );
        assert_eq!(ix.data, args.data());
    }
}
