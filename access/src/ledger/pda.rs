//! Program-derived addresses.
//!
//! An address is derived by hashing the seeds, a bump byte, the program id and a
//! fixed marker with SHA-256. Digests that decode to a point on the ed25519 curve
//! could have a private key, so they are rejected and the next bump is tried.

use curve25519_dalek::edwards::CompressedEdwardsY;
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::Pubkey;

pub const MAX_SEEDS: usize = 16;
pub const MAX_SEED_LEN: usize = 32;
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdaError {
    #[error("at most {MAX_SEEDS} seeds are allowed")]
    MaxSeedsExceeded,
    #[error("seeds are limited to {MAX_SEED_LEN} bytes")]
    MaxSeedLengthExceeded,
    #[error("derived address lies on the ed25519 curve")]
    OnCurve,
    #[error("no viable bump seed")]
    NoViableBump,
}

pub fn create_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<Pubkey, PdaError> {
    if seeds.len() > MAX_SEEDS {
        return Err(PdaError::MaxSeedsExceeded);
    }
    if seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(PdaError::MaxSeedLengthExceeded);
    }

    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(program_id);
    hasher.update(PDA_MARKER);
    let digest: [u8; 32] = hasher.finalize().into();

    if is_on_curve(&digest) {
        return Err(PdaError::OnCurve);
    }
    Ok(Pubkey::new_from_array(digest))
}

/// Finds the first off-curve address walking the bump from 255 down to 0.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), PdaError> {
    // One slot is reserved for the bump.
    if seeds.len() >= MAX_SEEDS {
        return Err(PdaError::MaxSeedsExceeded);
    }

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut seeds_with_bump = seeds.to_vec();
        seeds_with_bump.push(&bump_seed);

        match create_program_address(&seeds_with_bump, program_id) {
            Ok(address) => return Ok((address, bump)),
            Err(PdaError::OnCurve) => continue,
            Err(e) => return Err(e),
        }
    }
    Err(PdaError::NoViableBump)
}

pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    CompressedEdwardsY(*bytes).decompress().is_some()
}
