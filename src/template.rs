//! Saving and loading extension sets as reusable template files, plus the
//! built-in standard templates.
//!
//! A template is the DER encoding of the X.509 `Extensions` SEQUENCE, the
//! same structure a certificate embeds, so a template file is usable
//! anywhere that structure is.

use std::fs;
use std::path::Path;

use der::{Decode, Encode, asn1::OctetString};
use x509_cert::ext::{Extension, Extensions};

use crate::error::{ExtKitError, Result};
use crate::ext::{
    AuthorityKeyIdentifier, BasicConstraints, ExtendedKeyUsage, ExtendedKeyUsageOption, KeyUsage,
    KeyUsages, SubjectKeyIdentifier,
};
use crate::set::ExtensionSet;
use crate::update::KeyMaterial;

/// Serializes `set` as a DER `Extensions` SEQUENCE, entries in canonical
/// OID order.
pub fn save(set: &ExtensionSet) -> Result<Vec<u8>> {
    let extensions: Extensions = set
        .iter()
        .map(|(oid, entry)| -> Result<Extension> {
            Ok(Extension {
                extn_id: *oid,
                critical: entry.critical,
                extn_value: OctetString::from_der(&entry.value)?,
            })
        })
        .collect::<Result<_>>()?;
    Ok(extensions.to_der()?)
}

/// Parses a DER `Extensions` SEQUENCE back into a set.
///
/// Extensions with unregistered OIDs are kept as-is; their octets pass
/// through untouched. Bytes that do not parse as the top-level SEQUENCE
/// fail with [`ExtKitError::TemplateLoad`], which is how "this is not a
/// template file" stays distinguishable from an unreadable file.
pub fn load(bytes: &[u8]) -> Result<ExtensionSet> {
    let extensions =
        Extensions::from_der(bytes).map_err(|e| ExtKitError::TemplateLoad(e.to_string()))?;
    let mut set = ExtensionSet::new();
    for extension in extensions {
        set.add_extension(
            extension.extn_id,
            extension.critical,
            extension.extn_value.to_der()?,
        );
    }
    Ok(set)
}

/// Writes `set` to `path` as a template file.
pub fn save_to_file(set: &ExtensionSet, path: impl AsRef<Path>) -> Result<()> {
    let bytes = save(set)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Reads a template file from `path`.
///
/// OS-level failures surface as [`ExtKitError::Io`]; a readable file with
/// the wrong contents is [`ExtKitError::TemplateLoad`].
pub fn load_from_file(path: impl AsRef<Path>) -> Result<ExtensionSet> {
    let bytes = fs::read(path)?;
    load(&bytes)
}

/// The built-in extension templates for common certificate profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardTemplate {
    CertificateAuthority,
    TlsServer,
    TlsClient,
    CodeSigning,
}

impl StandardTemplate {
    /// Every standard template, in display order.
    pub const ALL: [StandardTemplate; 4] = [
        StandardTemplate::CertificateAuthority,
        StandardTemplate::TlsServer,
        StandardTemplate::TlsClient,
        StandardTemplate::CodeSigning,
    ];

    /// Returns the human-readable name for this template.
    pub fn name(self) -> &'static str {
        match self {
            StandardTemplate::CertificateAuthority => "Certificate Authority",
            StandardTemplate::TlsServer => "TLS Server",
            StandardTemplate::TlsClient => "TLS Client",
            StandardTemplate::CodeSigning => "Code Signing",
        }
    }

    /// Builds the template's extension set from `material`.
    ///
    /// Key identifiers are derived from the supplied keys, so the result
    /// is already consistent without a separate refresh pass.
    pub fn build(self, material: &KeyMaterial) -> Result<ExtensionSet> {
        let mut set = ExtensionSet::new();
        let ski = SubjectKeyIdentifier::from_public_key(&material.subject_public_key);

        match self {
            StandardTemplate::CertificateAuthority => {
                set.add_value(
                    &BasicConstraints {
                        is_ca: true,
                        max_path_length: None,
                    },
                    true,
                )?;
                set.add_value(&KeyUsage(KeyUsages::KeyCertSign | KeyUsages::CRLSign), true)?;
                set.add_value(&ski, false)?;
            }
            StandardTemplate::TlsServer => {
                set.add_value(
                    &KeyUsage(KeyUsages::DigitalSignature | KeyUsages::KeyEncipherment),
                    true,
                )?;
                set.add_value(
                    &ExtendedKeyUsage {
                        usage: vec![ExtendedKeyUsageOption::ServerAuth],
                    },
                    false,
                )?;
                set.add_value(&ski, false)?;
                set.add_value(&Self::authority_key_identifier(material), false)?;
            }
            StandardTemplate::TlsClient => {
                set.add_value(
                    &KeyUsage(KeyUsages::DigitalSignature | KeyUsages::KeyEncipherment),
                    true,
                )?;
                set.add_value(
                    &ExtendedKeyUsage {
                        usage: vec![ExtendedKeyUsageOption::ClientAuth],
                    },
                    false,
                )?;
                set.add_value(&ski, false)?;
                set.add_value(&Self::authority_key_identifier(material), false)?;
            }
            StandardTemplate::CodeSigning => {
                set.add_value(&KeyUsage(KeyUsages::DigitalSignature.into()), true)?;
                set.add_value(
                    &ExtendedKeyUsage {
                        usage: vec![ExtendedKeyUsageOption::CodeSigning],
                    },
                    false,
                )?;
                set.add_value(&ski, false)?;
                set.add_value(&Self::authority_key_identifier(material), false)?;
            }
        }
        Ok(set)
    }

    fn authority_key_identifier(material: &KeyMaterial) -> AuthorityKeyIdentifier {
        AuthorityKeyIdentifier::from_issuer(
            &material.issuer_public_key,
            &material.issuer_name,
            &material.issuer_serial,
        )
    }
}

#[cfg(test)]
mod tests {
    use const_oid::ObjectIdentifier;

    use super::*;
    use crate::ext::wrap_extension_value;

    #[test]
    fn empty_set_saves_as_an_empty_sequence() {
        let bytes = save(&ExtensionSet::new()).unwrap();
        assert_eq!(bytes, [0x30, 0x00]);
        assert!(load(&bytes).unwrap().is_empty());
    }

    #[test]
    fn save_then_load_preserves_entries() {
        let mut set = ExtensionSet::new();
        set.add_value(
            &BasicConstraints {
                is_ca: true,
                max_path_length: Some(1),
            },
            true,
        )
        .unwrap();
        let opaque = wrap_extension_value(&[0xde, 0xad]).unwrap();
        set.add_extension(
            ObjectIdentifier::new_unwrap("1.3.6.1.4.1.99999.7"),
            false,
            opaque.clone(),
        );

        let reloaded = load(&save(&set).unwrap()).unwrap();
        assert_eq!(reloaded, set);
        assert_eq!(
            reloaded.extension_value(&ObjectIdentifier::new_unwrap("1.3.6.1.4.1.99999.7")),
            Some(opaque.as_slice())
        );
    }

    #[test]
    fn a_lone_boolean_is_a_template_load_error() {
        let err = load(&[0x01, 0x01, 0xff]).unwrap_err();
        assert!(matches!(err, ExtKitError::TemplateLoad(_)));
    }

    #[test]
    fn truncated_sequence_is_a_template_load_error() {
        let mut set = ExtensionSet::new();
        set.add_value(&BasicConstraints::default(), false).unwrap();
        let mut bytes = save(&set).unwrap();
        bytes.truncate(bytes.len() - 1);

        assert!(matches!(
            load(&bytes).unwrap_err(),
            ExtKitError::TemplateLoad(_)
        ));
    }
}
