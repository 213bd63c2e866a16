use std::str::FromStr;

use anchor_lang::prelude::Pubkey;
use serde::{Deserialize, Serialize};

use crate::error::{PollClientError, Result};

/// How settled ledger state must be before a read returns it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollClientConfig {
    /// Base58 id of the deployed poll program
    pub program_id: String,
    #[serde(default)]
    pub commitment: Commitment,
}

impl PollClientConfig {
    pub fn new(program_id: &Pubkey) -> Self {
        PollClientConfig {
            program_id: program_id.to_string(),
            commitment: Commitment::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: PollClientConfig = serde_json::from_str(json)?;
        config.program_id()?;
        Ok(config)
    }

    pub fn program_id(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.program_id).map_err(|err| {
            PollClientError::InvalidConfig(format!("program id {:?}: {}", self.program_id, err))
        })
    }
}
