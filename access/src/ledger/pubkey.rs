use std::{fmt, str::FromStr};

use thiserror::Error;

pub const PUBKEY_BYTES: usize = 32;

/// A 32-byte ledger address, base58 encoded on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pubkey([u8; PUBKEY_BYTES]);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParsePubkeyError {
    #[error("invalid base58 encoding")]
    InvalidBase58,
    #[error("expected {PUBKEY_BYTES} bytes, got {0}")]
    WrongSize(usize),
}

impl Pubkey {
    pub const fn new_from_array(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; PUBKEY_BYTES] {
        self.0
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBKEY_BYTES]> for Pubkey {
    fn from(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Pubkey {
    type Err = ParsePubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // 32 bytes never need more than 44 base58 characters.
        if s.is_empty() || s.len() > 44 {
            return Err(ParsePubkeyError::InvalidBase58);
        }
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| ParsePubkeyError::InvalidBase58)?;
        let bytes: [u8; PUBKEY_BYTES] = bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| ParsePubkeyError::WrongSize(bytes.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let address = "Hs6emyaDnMSxJmGxnHhSmucJh1Q9jSysuKJ5yycWoUuC";
        let pubkey: Pubkey = address.parse().unwrap();
        assert_eq!(pubkey.to_string(), address);
    }

    #[test]
    fn test_system_program_is_all_zeros() {
        let pubkey: Pubkey = "11111111111111111111111111111111".parse().unwrap();
        assert_eq!(pubkey, Pubkey::default());
    }

    #[test]
    fn test_rejects_invalid_base58() {
        assert_eq!(
            "0OIl".parse::<Pubkey>(),
            Err(ParsePubkeyError::InvalidBase58)
        );
        assert_eq!("".parse::<Pubkey>(), Err(ParsePubkeyError::InvalidBase58));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let short = bs58::encode([1u8; 31]).into_string();
        assert_eq!(short.parse::<Pubkey>(), Err(ParsePubkeyError::WrongSize(31)));
        assert!("alice".parse::<Pubkey>().is_err());
    }
}
