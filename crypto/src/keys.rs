//! secp256k1 key handling and address derivation.

use secp256k1::{PublicKey as EcPublicKey, SecretKey, SECP256K1};
use vigil_types::{Address, PrivateKey};

use crate::error::CryptoError;
use crate::hash::keccak256;

/// Validate the raw key bytes as a secp256k1 secret scalar.
pub fn secret_key(private: &PrivateKey) -> Result<SecretKey, CryptoError> {
    SecretKey::from_slice(private.as_bytes())
        .map_err(|e| CryptoError::InvalidSecretKey(e.to_string()))
}

/// Derive the uncompressed public key (65 bytes, `0x04` tagged).
pub fn public_from_private(private: &PrivateKey) -> Result<[u8; 65], CryptoError> {
    let sk = secret_key(private)?;
    Ok(EcPublicKey::from_secret_key(SECP256K1, &sk).serialize_uncompressed())
}

/// Address of the account controlled by `private`.
///
/// The last 20 bytes of Keccak-256 over the 64-byte uncompressed key body.
pub fn derive_address(private: &PrivateKey) -> Result<Address, CryptoError> {
    let public = public_from_private(private)?;
    Ok(address_from_public(&public))
}

pub(crate) fn address_from_public(uncompressed: &[u8; 65]) -> Address {
    let digest = keccak256(&uncompressed[1..]);
    let mut raw = [0u8; 20];
    raw.copy_from_slice(&digest[12..]);
    Address::from_bytes(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(hex_key: &str) -> PrivateKey {
        PrivateKey::from_hex(hex_key).unwrap()
    }

    #[test]
    fn scalar_one_maps_to_generator_address() {
        let one = key("0000000000000000000000000000000000000000000000000000000000000001");
        assert_eq!(
            derive_address(&one).unwrap().as_str(),
            "Mx7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn known_account_address() {
        let sk = key("07bc17abdcee8b971bb8723e36fe9d2523306d5ab2d683631693238e0f9df142");
        assert_eq!(
            derive_address(&sk).unwrap().as_str(),
            "Mx31e61a05adbd13c6b625262704bc305bf7725026"
        );
    }

    #[test]
    fn uncompressed_key_is_tagged() {
        let sk = key("07bc17abdcee8b971bb8723e36fe9d2523306d5ab2d683631693238e0f9df142");
        assert_eq!(public_from_private(&sk).unwrap()[0], 0x04);
    }

    #[test]
    fn zero_scalar_is_rejected() {
        let zero = PrivateKey::from_bytes([0u8; 32]);
        assert!(matches!(
            derive_address(&zero),
            Err(CryptoError::InvalidSecretKey(_))
        ));
    }
}
