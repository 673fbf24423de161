use ed25519_dalek::{Signature, SignatureError, Verifier, VerifyingKey, PUBLIC_KEY_LENGTH};
use thiserror::Error;
use tracing::debug;

use crate::ledger::{ParsePubkeyError, Pubkey};

#[derive(Debug, Error)]
enum VerifyError {
    #[error("invalid public key")]
    PublicKey(#[from] ParsePubkeyError),
    #[error("signature is not hex")]
    Encoding(#[from] hex::FromHexError),
    #[error("malformed key or signature")]
    Malformed(#[from] SignatureError),
}

/// Checks an Ed25519 signature over the nonce's hex string.
///
/// The signed message is the ASCII hex text of the nonce, not its decoded
/// bytes. Any decoding problem is treated as a failed verification.
pub fn verify_signed_nonce(nonce: &str, signed_nonce: &str, address: &str) -> bool {
    match verify(nonce, signed_nonce, address) {
        Ok(()) => true,
        Err(e) => {
            debug!(address, error = %e, "signature rejected");
            false
        }
    }
}

fn verify(nonce: &str, signed_nonce: &str, address: &str) -> Result<(), VerifyError> {
    let public_key: Pubkey = address.parse()?;
    let bytes: [u8; PUBLIC_KEY_LENGTH] = public_key.to_bytes();
    let verifying_key = VerifyingKey::from_bytes(&bytes)?;
    let signature = Signature::from_slice(&hex::decode(signed_nonce)?)?;
    verifying_key.verify(nonce.as_bytes(), &signature)?;
    Ok(())
}
