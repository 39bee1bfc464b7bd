//! Typed values and DER codecs for the registered extension kinds.
//!
//! Each extension kind has a structured in-memory type here that converts
//! to and from its canonical DER encoding. The encodings come from the
//! `x509_cert` ASN.1 types; these modules only translate between an
//! editor-friendly shape and the wire structure.

pub mod access;
pub mod alt_name;
pub mod constraints;
pub mod crl;
pub mod general_name;
pub mod key_ident;
pub mod policies;
pub mod usage;

pub use access::{AccessDescription, AuthorityInfoAccess, SubjectInfoAccess};
pub use alt_name::{IssuerAlternativeName, SubjectAlternativeName};
pub use constraints::{BasicConstraints, GeneralSubtree, InhibitAnyPolicy, NameConstraints, PolicyConstraints};
pub use crl::{CrlDistributionPoints, DistributionPoint, DistributionPointName, Reasons};
pub use general_name::GeneralName;
pub use key_ident::{AuthorityKeyIdentifier, SubjectKeyIdentifier, key_identifier};
pub use policies::{CertificatePolicies, PolicyInformation, PolicyMapping, PolicyMappings, PolicyQualifier};
pub use usage::{
    ExtendedKeyUsage, ExtendedKeyUsageOption, FlagSet, KeyUsage, KeyUsages, PrivateKeyUsagePeriod,
};

use der::{Decode, Encode, asn1::OctetString};

use crate::error::{ExtKitError, Result};
use crate::oid::ExtensionKind;

/// Trait for converting a structured extension value to and from the DER
/// octets stored inside the extension's OCTET STRING wrapper.
///
/// # Example
/// ```
/// use extkit::ext::{BasicConstraints, ExtensionValue};
///
/// let bc = BasicConstraints { is_ca: true, max_path_length: Some(1) };
/// let encoded = bc.to_extension_value().unwrap();
/// let decoded = BasicConstraints::from_extension_value(&encoded).unwrap();
/// assert_eq!(bc, decoded);
/// ```
pub trait ExtensionValue: Sized {
    /// The registered kind this value encodes.
    const KIND: ExtensionKind;

    /// Encodes the value into its kind-specific DER.
    fn to_extension_value(&self) -> Result<Vec<u8>>;

    /// Decodes the value from kind-specific DER.
    ///
    /// Fails with a decode error when the octets do not match the ASN.1
    /// shape for this kind; no defaults are substituted.
    fn from_extension_value(value: &[u8]) -> Result<Self>;
}

/// Wraps a kind-specific DER value in the OCTET STRING layer mandated by
/// the X.509 Extension structure.
pub fn wrap_extension_value(value: &[u8]) -> Result<Vec<u8>> {
    let wrapped = OctetString::new(value)
        .map_err(|e| ExtKitError::InvalidInput(e.to_string()))?
        .to_der()?;
    Ok(wrapped)
}

/// Strips the OCTET STRING layer from a stored extension value, returning
/// the kind-specific DER inside it.
pub fn unwrap_extension_value(wrapped: &[u8]) -> Result<Vec<u8>> {
    Ok(OctetString::from_der(wrapped)?.as_bytes().to_vec())
}
