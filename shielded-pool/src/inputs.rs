//! The inputs of a withdrawal

use pool_common::{
    constants::{NUM_BYTES_FELT, NUM_WITHDRAWAL_PUBLIC_INPUTS},
    types::PublicInputs,
};

use crate::errors::PoolError;

/// The number of leading bytes of the recipient word that must be zero
const RECIPIENT_PADDING: usize = NUM_BYTES_FELT - 8;

/// A request to withdraw a deposit from a scope
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawalRequest {
    /// The serialized proof
    pub proof: Vec<u8>,
    /// The proof's public inputs: `[root, nullifier, recipient]`
    pub public_inputs: Vec<Vec<u8>>,
    /// The historical root the proof was generated against
    pub claimed_root: [u8; NUM_BYTES_FELT],
    /// The recipient the withdrawal pays out to
    pub recipient: u64,
}

/// The parsed public inputs of a withdrawal proof
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalPublicInputs {
    /// The root of the scope's tree the deposit was proven against
    pub root: [u8; NUM_BYTES_FELT],
    /// The hash of the deposit's nullifier
    pub nullifier: [u8; NUM_BYTES_FELT],
    /// The recipient, packed into the low bytes of a big-endian word
    pub recipient: [u8; NUM_BYTES_FELT],
}

impl WithdrawalPublicInputs {
    /// Parses exactly three 32-byte words
    pub fn parse(words: &[Vec<u8>]) -> Result<Self, PoolError> {
        if words.len() != NUM_WITHDRAWAL_PUBLIC_INPUTS {
            return Err(PoolError::MalformedInput(format!(
                "expected {} public inputs, got {}",
                NUM_WITHDRAWAL_PUBLIC_INPUTS,
                words.len()
            )));
        }

        let PublicInputs(words) = PublicInputs::from_slices(words)
            .map_err(|_| PoolError::MalformedInput("public input is not 32 bytes".to_string()))?;

        Ok(WithdrawalPublicInputs { root: words[0], nullifier: words[1], recipient: words[2] })
    }

    /// The recipient identifier, `None` if the word does not fit in 64 bits
    pub fn recipient_id(&self) -> Option<u64> {
        let (padding, id) = self.recipient.split_at(RECIPIENT_PADDING);
        if padding.iter().any(|byte| *byte != 0) {
            return None;
        }

        id.try_into().ok().map(u64::from_be_bytes)
    }

    /// The public inputs in the order the proof commits to them
    pub fn to_public_inputs(&self) -> PublicInputs {
        PublicInputs(vec![self.root, self.nullifier, self.recipient])
    }
}

#[cfg(test)]
mod tests {
    use test_helpers::proof_system::recipient_word;

    use crate::errors::PoolError;

    use super::WithdrawalPublicInputs;

    #[test]
    fn test_parse() {
        let words = vec![vec![1u8; 32], vec![2u8; 32], recipient_word(77).to_vec()];
        let inputs = WithdrawalPublicInputs::parse(&words).unwrap();

        assert_eq!(inputs.root, [1u8; 32]);
        assert_eq!(inputs.nullifier, [2u8; 32]);
        assert_eq!(inputs.recipient_id(), Some(77));
        assert_eq!(inputs.to_public_inputs().0[2], recipient_word(77));
    }

    #[test]
    fn test_malformed() {
        let short = vec![vec![1u8; 32], vec![2u8; 32]];
        assert!(matches!(
            WithdrawalPublicInputs::parse(&short),
            Err(PoolError::MalformedInput(_))
        ));

        let wrong_length = vec![vec![1u8; 32], vec![2u8; 31], vec![0u8; 32]];
        assert!(matches!(
            WithdrawalPublicInputs::parse(&wrong_length),
            Err(PoolError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_oversized_recipient() {
        let mut recipient = recipient_word(5);
        recipient[0] = 1;
        let words = vec![vec![0u8; 32], vec![0u8; 32], recipient.to_vec()];

        assert_eq!(WithdrawalPublicInputs::parse(&words).unwrap().recipient_id(), None);
    }
}
