use std::fmt;

use sha2::{Digest, Sha256};

use crate::{DOMAIN_NAME, DOMAIN_VERSION};

/// Type string hashed into every domain separator
pub const DOMAIN_TYPE_STRING: &str =
    "Domain(string name,string version,string chainId,string verifyingContract)";

/// Separates signatures between protocols, versions, chains and contract instances.
///
/// A signature produced for one deployment never verifies against another, because the
/// separator is mixed into every signing digest.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct DomainSeparator(pub [u8; 32]);

impl DomainSeparator {
    pub fn new(chain_id: &str, verifying_contract: &str) -> Self {
        Self::with_name_and_version(DOMAIN_NAME, DOMAIN_VERSION, chain_id, verifying_contract)
    }

    pub fn with_name_and_version(
        name: &str,
        version: &str,
        chain_id: &str,
        verifying_contract: &str,
    ) -> Self {
        let mut encoded = [0u8; 160];
        encoded[0..32].copy_from_slice(&hash_bytes(DOMAIN_TYPE_STRING.as_bytes()));
        encoded[32..64].copy_from_slice(&hash_bytes(name.as_bytes()));
        encoded[64..96].copy_from_slice(&hash_bytes(version.as_bytes()));
        encoded[96..128].copy_from_slice(&hash_bytes(chain_id.as_bytes()));
        encoded[128..160].copy_from_slice(&hash_bytes(verifying_contract.as_bytes()));
        DomainSeparator(hash_bytes(&encoded))
    }
}

impl fmt::Debug for DomainSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Final digest over the domain separator and a struct hash.
pub fn hashed_signing_message(domain: &DomainSeparator, struct_hash: &[u8; 32]) -> [u8; 32] {
    let mut message = [0u8; 66];
    message[0..2].copy_from_slice(&[0x19, 0x01]);
    message[2..34].copy_from_slice(&domain.0);
    message[34..66].copy_from_slice(struct_hash);
    hash_bytes(&message)
}

pub fn hash_bytes(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}
