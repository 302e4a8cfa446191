//! Pool configuration, loaded from JSON

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use pool_common::{constants::NUM_WITHDRAWAL_PUBLIC_INPUTS, types::VerificationKey};
use serde::{Deserialize, Serialize};

use crate::{
    errors::PoolError,
    scope::{validate_tokens, TokenInfo},
};

/// The configuration of a pool
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// The path of the withdrawal circuit's snarkjs `verification_key.json`
    pub verification_key: PathBuf,
    /// The tokens the pool accepts
    pub tokens: Vec<TokenInfo>,
}

impl PoolConfig {
    /// Reads & validates the configuration at the given path
    pub fn from_file(path: &Path) -> Result<Self, PoolError> {
        let file = File::open(path).map_err(|e| PoolError::Config(e.to_string()))?;
        let config: PoolConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| PoolError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that every token is well defined and listed once
    pub fn validate(&self) -> Result<(), PoolError> {
        validate_tokens(&self.tokens)
    }

    /// Loads the verification key the configuration points to
    pub fn load_verification_key(&self) -> Result<VerificationKey, PoolError> {
        let vkey = load_verification_key(&self.verification_key)?;
        if vkey.n_public != NUM_WITHDRAWAL_PUBLIC_INPUTS as u64 {
            return Err(PoolError::Config(format!(
                "withdrawal key expects {} public inputs",
                vkey.n_public
            )));
        }

        Ok(vkey)
    }
}

/// Reads & validates a snarkjs verification key
pub fn load_verification_key(path: &Path) -> Result<VerificationKey, PoolError> {
    let file = File::open(path).map_err(|e| PoolError::Config(e.to_string()))?;
    let vkey: VerificationKey = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| PoolError::Config(e.to_string()))?;

    vkey.validate().map_err(|e| PoolError::Config(e.to_string()))?;
    Ok(vkey)
}
