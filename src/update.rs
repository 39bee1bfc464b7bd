//! Refreshing key-identifier extensions after the subject or issuer
//! material behind a set changes.

use bon::Builder;
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::error::Result;
use crate::ext::{
    AuthorityKeyIdentifier, ExtensionValue, GeneralName, SubjectKeyIdentifier, key_identifier,
};
use crate::set::ExtensionSet;

/// The issuer and subject material that key-identifier extensions are
/// derived from. Read-only to this crate; the caller owns where the keys
/// and names come from.
///
/// # Fields
/// * `subject_public_key` - The key the certificate will certify.
/// * `subject_name` - The subject's distinguished name, when known.
/// * `issuer_public_key` - The issuing key.
/// * `issuer_name` - The issuer certificate's subject name.
/// * `issuer_serial` - The issuer certificate's serial number.
#[derive(Clone, Debug, Builder)]
pub struct KeyMaterial {
    pub subject_public_key: SubjectPublicKeyInfoOwned,
    pub subject_name: Option<Name>,
    pub issuer_public_key: SubjectPublicKeyInfoOwned,
    pub issuer_name: Name,
    pub issuer_serial: SerialNumber,
}

/// Recomputes the key-identifier extensions in `set` from `material`.
///
/// A template saved against one key pair must not carry that key pair's
/// identifiers into a certificate issued for another, so this overwrites:
///
/// * a present subject key identifier with the digest of the new subject
///   key;
/// * a present authority key identifier with values derived from the new
///   issuer material, refreshing only the fields the stored value already
///   had.
///
/// Extensions that are absent stay absent; the caller opts in to a derived
/// extension by adding it. Critical flags are preserved. A stored value
/// that no longer decodes as its claimed kind is an error, never silently
/// replaced.
pub fn refresh_key_identifiers(set: &mut ExtensionSet, material: &KeyMaterial) -> Result<()> {
    let ski_oid = SubjectKeyIdentifier::KIND.oid();
    if set.contains(&ski_oid) {
        let critical = set.is_critical(&ski_oid);
        // The stored value must still decode as its claimed kind before it
        // may be replaced.
        set.decode_value::<SubjectKeyIdentifier>()?;
        let ski = SubjectKeyIdentifier::from_public_key(&material.subject_public_key);
        set.add_value(&ski, critical)?;
    }

    let aki_oid = AuthorityKeyIdentifier::KIND.oid();
    if set.contains(&aki_oid) {
        let critical = set.is_critical(&aki_oid);
        let stored: AuthorityKeyIdentifier = set
            .decode_value()?
            .unwrap_or_default();
        let refreshed = AuthorityKeyIdentifier {
            key_identifier: stored
                .key_identifier
                .is_some()
                .then(|| key_identifier(&material.issuer_public_key)),
            authority_cert_issuer: stored.authority_cert_issuer.is_some().then(|| {
                vec![GeneralName::DirectoryName(material.issuer_name.clone())]
            }),
            authority_cert_serial_number: stored
                .authority_cert_serial_number
                .is_some()
                .then(|| material.issuer_serial.as_bytes().to_vec()),
        };
        set.add_value(&refreshed, critical)?;
    }

    Ok(())
}
