use ed25519_dalek::{ed25519::signature::Signer, Signature, SigningKey};
pub mod models;
pub mod requests;

/// Signs a server-issued nonce.
///
/// The signed message is the nonce exactly as transported: the bytes of its
/// hex string, not the 32 bytes it decodes to. The signature is returned hex
/// encoded, ready to be sent as `signedNonce`.
pub fn sign_nonce(signing_key: &SigningKey, nonce: &str) -> String {
    let signature: Signature = signing_key.sign(nonce.as_bytes());
    hex::encode(signature.to_bytes())
}
