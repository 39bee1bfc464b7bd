//! Subject and authority key identifiers, including derivation of the
//! identifier bytes from public-key material.

use der::{Decode, Encode, asn1::OctetString};
use sha1::{Digest, Sha1};
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::error::{ExtKitError, Result};
use crate::ext::ExtensionValue;
use crate::ext::general_name::{GeneralName, from_x509_names, to_x509_names};
use crate::oid::ExtensionKind;

/// Derives the key identifier for a public key: the SHA-1 digest of the
/// subjectPublicKey bit string from its SubjectPublicKeyInfo.
pub fn key_identifier(public_key: &SubjectPublicKeyInfoOwned) -> Vec<u8> {
    Sha1::digest(public_key.subject_public_key.raw_bytes()).to_vec()
}

/// Represents the Subject Key Identifier extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectKeyIdentifier(pub Vec<u8>);

impl SubjectKeyIdentifier {
    /// Builds the identifier for the given subject public key.
    pub fn from_public_key(public_key: &SubjectPublicKeyInfoOwned) -> Self {
        SubjectKeyIdentifier(key_identifier(public_key))
    }
}

impl ExtensionValue for SubjectKeyIdentifier {
    const KIND: ExtensionKind = ExtensionKind::SubjectKeyIdentifier;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let ski = x509_cert::ext::pkix::SubjectKeyIdentifier(
            OctetString::new(self.0.as_slice())
                .map_err(|e| ExtKitError::InvalidInput(e.to_string()))?,
        );
        Ok(ski.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let ski = x509_cert::ext::pkix::SubjectKeyIdentifier::from_der(value)?;
        Ok(SubjectKeyIdentifier(ski.0.as_bytes().to_vec()))
    }
}

/// Represents the Authority Key Identifier extension.
///
/// All three fields are optional in the encoding; a template may carry any
/// combination of them.
///
/// # Fields
/// * `key_identifier` - The issuer key identifier bytes.
/// * `authority_cert_issuer` - General names for the issuing certificate's issuer.
/// * `authority_cert_serial_number` - The issuing certificate's serial number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorityKeyIdentifier {
    pub key_identifier: Option<Vec<u8>>,
    pub authority_cert_issuer: Option<Vec<GeneralName>>,
    pub authority_cert_serial_number: Option<Vec<u8>>,
}

impl AuthorityKeyIdentifier {
    /// Builds the full identifier for an issuer: derived key identifier,
    /// issuer name and certificate serial number.
    pub fn from_issuer(
        issuer_public_key: &SubjectPublicKeyInfoOwned,
        issuer_name: &Name,
        issuer_serial: &SerialNumber,
    ) -> Self {
        AuthorityKeyIdentifier {
            key_identifier: Some(key_identifier(issuer_public_key)),
            authority_cert_issuer: Some(vec![GeneralName::DirectoryName(issuer_name.clone())]),
            authority_cert_serial_number: Some(issuer_serial.as_bytes().to_vec()),
        }
    }
}

impl ExtensionValue for AuthorityKeyIdentifier {
    const KIND: ExtensionKind = ExtensionKind::AuthorityKeyIdentifier;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let aki = x509_cert::ext::pkix::AuthorityKeyIdentifier {
            key_identifier: self
                .key_identifier
                .as_ref()
                .map(|kid| OctetString::new(kid.as_slice()))
                .transpose()
                .map_err(|e| ExtKitError::InvalidInput(e.to_string()))?,
            authority_cert_issuer: self
                .authority_cert_issuer
                .as_ref()
                .map(|names| to_x509_names(names))
                .transpose()?,
            authority_cert_serial_number: self
                .authority_cert_serial_number
                .as_ref()
                .map(|sn| SerialNumber::new(sn.as_slice()))
                .transpose()
                .map_err(|e| ExtKitError::InvalidInput(e.to_string()))?,
        };
        Ok(aki.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let aki = x509_cert::ext::pkix::AuthorityKeyIdentifier::from_der(value)?;
        Ok(AuthorityKeyIdentifier {
            key_identifier: aki.key_identifier.map(|kid| kid.as_bytes().to_vec()),
            authority_cert_issuer: aki
                .authority_cert_issuer
                .as_ref()
                .map(|names| from_x509_names(names))
                .transpose()?,
            authority_cert_serial_number: aki
                .authority_cert_serial_number
                .map(|sn| sn.as_bytes().to_vec()),
        })
    }
}
