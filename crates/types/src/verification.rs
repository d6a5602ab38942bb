use cosmwasm_std::Binary;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// `r || s || v`
pub const SIGNATURE_LENGTH: usize = 65;

/// Errors that can occur while parsing signatures or recovering signers
#[derive(Debug, Error, PartialEq)]
pub enum VerificationError {
    #[error("signature must be {SIGNATURE_LENGTH} bytes, got {length}")]
    InvalidSignatureLength { length: usize },

    #[error("invalid recovery id: {v}")]
    InvalidRecoveryId { v: u8 },

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("public key recovery failed")]
    RecoveryFailed,
}

/// A compact secp256k1 signature plus the recovery parameter needed to derive the signer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub rs: [u8; 64],
    /// Normalized to 0 or 1
    pub recovery_id: u8,
}

impl RecoverableSignature {
    /// Parse `r || s || v`. `v` may be given as 0/1 or in the legacy 27/28 form.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, VerificationError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(VerificationError::InvalidSignatureLength {
                length: bytes.len(),
            });
        }

        let v = bytes[64];
        let recovery_id = match v {
            0 | 1 => v,
            27 | 28 => v - 27,
            _ => return Err(VerificationError::InvalidRecoveryId { v }),
        };

        let mut rs = [0u8; 64];
        rs.copy_from_slice(&bytes[..64]);
        Ok(Self { rs, recovery_id })
    }

    pub fn to_binary(&self) -> Binary {
        let mut bytes = Vec::with_capacity(SIGNATURE_LENGTH);
        bytes.extend_from_slice(&self.rs);
        bytes.push(self.recovery_id);
        Binary::from(bytes)
    }
}

/// Sign a 32 byte digest with a secp256k1 private key.
///
/// Client-side helper; the contract only ever recovers.
pub fn sign_digest(
    digest: &[u8; 32],
    private_key_bytes: &[u8],
) -> Result<RecoverableSignature, VerificationError> {
    let signing_key = signing_key(private_key_bytes)?;

    let (signature, recovery_id) = signing_key
        .sign_prehash_recoverable(digest)
        .map_err(|e| VerificationError::InvalidSignature(e.to_string()))?;

    let mut rs = [0u8; 64];
    rs.copy_from_slice(&signature.to_bytes());
    Ok(RecoverableSignature {
        rs,
        recovery_id: recovery_id.to_byte(),
    })
}

/// Recover the compressed public key that produced `signature` over `digest`.
pub fn recover_public_key(
    digest: &[u8; 32],
    signature: &RecoverableSignature,
) -> Result<Vec<u8>, VerificationError> {
    let sig = Signature::from_slice(&signature.rs)
        .map_err(|e| VerificationError::InvalidSignature(e.to_string()))?;
    let recovery_id = RecoveryId::from_byte(signature.recovery_id).ok_or(
        VerificationError::InvalidRecoveryId {
            v: signature.recovery_id,
        },
    )?;

    let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| VerificationError::RecoveryFailed)?;

    Ok(key.to_sec1_bytes().to_vec())
}

/// Re-encode any SEC1 public key (compressed or not) in compressed form.
pub fn compress_public_key(sec1_bytes: &[u8]) -> Result<Vec<u8>, VerificationError> {
    let key = VerifyingKey::from_sec1_bytes(sec1_bytes)
        .map_err(|e| VerificationError::InvalidPublicKey(e.to_string()))?;
    Ok(key.to_sec1_bytes().to_vec())
}

/// Cosmos account address bytes: `ripemd160(sha256(compressed_pubkey))`.
pub fn canonical_address(compressed_public_key: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(compressed_public_key);
    Ripemd160::digest(sha).into()
}

/// Compressed public key for a private key
pub fn derive_public_key(private_key_bytes: &[u8]) -> Result<Binary, VerificationError> {
    let signing_key = signing_key(private_key_bytes)?;
    let public_key_bytes = signing_key.verifying_key().to_sec1_bytes();
    Ok(Binary::from(public_key_bytes.to_vec()))
}

fn signing_key(private_key_bytes: &[u8]) -> Result<SigningKey, VerificationError> {
    if private_key_bytes.len() != 32 {
        return Err(VerificationError::EncodingError(format!(
            "private key must be 32 bytes, got {}",
            private_key_bytes.len()
        )));
    }

    SigningKey::from_bytes(private_key_bytes.into())
        .map_err(|e| VerificationError::EncodingError(e.to_string()))
}
