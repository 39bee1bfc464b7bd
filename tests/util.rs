use std::str::FromStr;

use der::Decode;
use extkit::update::KeyMaterial;
use p256::pkcs8::EncodePublicKey;
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::SubjectPublicKeyInfoOwned;

/// Deterministic P-256 public key material; `seed` selects the scalar, so
/// distinct seeds give distinct keys without touching an RNG.
pub fn p256_spki(seed: u8) -> SubjectPublicKeyInfoOwned {
    let mut scalar = [0u8; 32];
    scalar[31] = seed;
    let secret = p256::SecretKey::from_slice(&scalar).unwrap();
    let der = secret.public_key().to_public_key_der().unwrap();
    SubjectPublicKeyInfoOwned::from_der(der.as_bytes()).unwrap()
}

/// A fixed RSA public key in SPKI form, for issuer material of a different
/// key type than the subject's.
pub fn rsa_spki() -> SubjectPublicKeyInfoOwned {
    use rsa::{BigUint, RsaPublicKey};

    let mut modulus = vec![0xabu8; 256];
    modulus[0] |= 0x80;
    modulus[255] |= 0x01;
    let key =
        RsaPublicKey::new(BigUint::from_bytes_be(&modulus), BigUint::from(65537u32)).unwrap();
    SubjectPublicKeyInfoOwned::from_der(key.to_public_key_der().unwrap().as_bytes()).unwrap()
}

pub fn issuer_name() -> Name {
    Name::from_str("CN=Test Issuing CA,O=ExtKit Tests,C=US").unwrap()
}

pub fn issuer_serial() -> SerialNumber {
    SerialNumber::new(&[0x4a, 0x01, 0xf0]).unwrap()
}

pub fn key_material(subject_seed: u8) -> KeyMaterial {
    KeyMaterial::builder()
        .subject_public_key(p256_spki(subject_seed))
        .subject_name(Name::from_str("CN=server.example.com").unwrap())
        .issuer_public_key(rsa_spki())
        .issuer_name(issuer_name())
        .issuer_serial(issuer_serial())
        .build()
}
