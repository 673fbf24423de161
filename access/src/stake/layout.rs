//! Fixed byte offsets into the staking program's account data.

use thiserror::Error;

/// `tag:u8 | owner:[u8;32] | stake_amount:u64`
pub const STAKE_AMOUNT_OFFSET: usize = 1 + 32;
/// `... | stake_pool:[u8;32] | last_claimed_time:i64 | pool_minimum_at_creation:u64`
pub const POOL_MINIMUM_AT_CREATION_OFFSET: usize = 1 + 32 + 8 + 32 + 8;
/// `tag:u8 | nonce:u8 | current_day_idx:u16 | _padding:[u8;4] | minimum_stake_amount:u64`
pub const POOL_MINIMUM_STAKE_OFFSET: usize = 1 + 1 + 2 + 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("account data too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}

fn read_u64_le(data: &[u8], offset: usize) -> Result<u64, LayoutError> {
    let needed = offset + 8;
    data.get(offset..needed)
        .and_then(|bytes| <[u8; 8]>::try_from(bytes).ok())
        .map(u64::from_le_bytes)
        .ok_or(LayoutError::TooShort {
            needed,
            actual: data.len(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeAccountView {
    pub stake_amount: u64,
    pub pool_minimum_at_creation: u64,
}

impl StakeAccountView {
    pub fn parse(data: &[u8]) -> Result<Self, LayoutError> {
        Ok(Self {
            stake_amount: read_u64_le(data, STAKE_AMOUNT_OFFSET)?,
            pool_minimum_at_creation: read_u64_le(data, POOL_MINIMUM_AT_CREATION_OFFSET)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakePoolView {
    pub minimum_stake_amount: u64,
}

impl StakePoolView {
    pub fn parse(data: &[u8]) -> Result<Self, LayoutError> {
        Ok(Self {
            minimum_stake_amount: read_u64_le(data, POOL_MINIMUM_STAKE_OFFSET)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stake_account() {
        let mut data = vec![0u8; 120];
        data[STAKE_AMOUNT_OFFSET..STAKE_AMOUNT_OFFSET + 8]
            .copy_from_slice(&1_500_000u64.to_le_bytes());
        data[POOL_MINIMUM_AT_CREATION_OFFSET..POOL_MINIMUM_AT_CREATION_OFFSET + 8]
            .copy_from_slice(&1_000_000u64.to_le_bytes());

        assert_eq!(
            StakeAccountView::parse(&data),
            Ok(StakeAccountView {
                stake_amount: 1_500_000,
                pool_minimum_at_creation: 1_000_000,
            })
        );
    }

    #[test]
    fn test_parse_reads_little_endian() {
        let mut data = vec![0u8; 16];
        data[POOL_MINIMUM_STAKE_OFFSET] = 0x01;
        data[POOL_MINIMUM_STAKE_OFFSET + 1] = 0x02;

        assert_eq!(StakePoolView::parse(&data).unwrap().minimum_stake_amount, 0x0201);
    }

    #[test]
    fn test_short_stake_account() {
        let data = vec![0u8; POOL_MINIMUM_AT_CREATION_OFFSET + 7];
        assert_eq!(
            StakeAccountView::parse(&data),
            Err(LayoutError::TooShort {
                needed: 89,
                actual: 88
            })
        );
        assert!(StakeAccountView::parse(&[]).is_err());
    }

    #[test]
    fn test_short_pool() {
        assert!(StakePoolView::parse(&[0u8; 15]).is_err());
        assert!(StakePoolView::parse(&[0u8; 16]).is_ok());
    }
}
