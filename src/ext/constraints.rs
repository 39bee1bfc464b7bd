//! Constraint extensions: basic constraints, name constraints, policy
//! constraints and inhibit-any-policy.

use der::{Decode, Encode};
use x509_cert::ext::pkix::constraints::name::GeneralSubtree as X509GeneralSubtree;

use crate::error::Result;
use crate::ext::ExtensionValue;
use crate::ext::general_name::GeneralName;
use crate::oid::ExtensionKind;

/// Represents the Basic Constraints extension.
///
/// # Fields
/// * `is_ca` - Indicates if the certificate is a CA.
/// * `max_path_length` - The maximum number of intermediate CAs allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasicConstraints {
    pub is_ca: bool,
    pub max_path_length: Option<u8>,
}

impl ExtensionValue for BasicConstraints {
    const KIND: ExtensionKind = ExtensionKind::BasicConstraints;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let bc = x509_cert::ext::pkix::BasicConstraints {
            ca: self.is_ca,
            path_len_constraint: self.max_path_length,
        };
        Ok(bc.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let bc = x509_cert::ext::pkix::BasicConstraints::from_der(value)?;
        Ok(BasicConstraints {
            is_ca: bc.ca,
            max_path_length: bc.path_len_constraint,
        })
    }
}

/// One permitted or excluded subtree in a name-constraints extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralSubtree {
    pub base: GeneralName,
    pub minimum: u32,
    pub maximum: Option<u32>,
}

impl GeneralSubtree {
    /// A subtree covering `base` with the default minimum of zero.
    pub fn new(base: GeneralName) -> Self {
        GeneralSubtree {
            base,
            minimum: 0,
            maximum: None,
        }
    }

    fn to_x509(&self) -> Result<X509GeneralSubtree> {
        Ok(X509GeneralSubtree {
            base: self.base.to_x509()?,
            minimum: self.minimum,
            maximum: self.maximum,
        })
    }

    fn from_x509(subtree: &X509GeneralSubtree) -> Result<Self> {
        Ok(GeneralSubtree {
            base: GeneralName::from_x509(&subtree.base)?,
            minimum: subtree.minimum,
            maximum: subtree.maximum,
        })
    }
}

/// Represents the Name Constraints extension.
///
/// Empty subtree lists are omitted from the encoding entirely, matching
/// the OPTIONAL fields of the ASN.1 structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameConstraints {
    pub permitted_subtrees: Vec<GeneralSubtree>,
    pub excluded_subtrees: Vec<GeneralSubtree>,
}

impl ExtensionValue for NameConstraints {
    const KIND: ExtensionKind = ExtensionKind::NameConstraints;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let to_subtrees = |subtrees: &[GeneralSubtree]| -> Result<Option<Vec<X509GeneralSubtree>>> {
            if subtrees.is_empty() {
                return Ok(None);
            }
            Ok(Some(
                subtrees
                    .iter()
                    .map(GeneralSubtree::to_x509)
                    .collect::<Result<_>>()?,
            ))
        };

        let nc = x509_cert::ext::pkix::NameConstraints {
            permitted_subtrees: to_subtrees(&self.permitted_subtrees)?,
            excluded_subtrees: to_subtrees(&self.excluded_subtrees)?,
        };
        Ok(nc.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let nc = x509_cert::ext::pkix::NameConstraints::from_der(value)?;
        let from_subtrees = |subtrees: Option<Vec<X509GeneralSubtree>>| -> Result<Vec<GeneralSubtree>> {
            subtrees
                .unwrap_or_default()
                .iter()
                .map(GeneralSubtree::from_x509)
                .collect()
        };
        Ok(NameConstraints {
            permitted_subtrees: from_subtrees(nc.permitted_subtrees)?,
            excluded_subtrees: from_subtrees(nc.excluded_subtrees)?,
        })
    }
}

/// Represents the Policy Constraints extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyConstraints {
    pub require_explicit_policy: Option<u32>,
    pub inhibit_policy_mapping: Option<u32>,
}

impl ExtensionValue for PolicyConstraints {
    const KIND: ExtensionKind = ExtensionKind::PolicyConstraints;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let pc = x509_cert::ext::pkix::PolicyConstraints {
            require_explicit_policy: self.require_explicit_policy,
            inhibit_policy_mapping: self.inhibit_policy_mapping,
        };
        Ok(pc.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let pc = x509_cert::ext::pkix::PolicyConstraints::from_der(value)?;
        Ok(PolicyConstraints {
            require_explicit_policy: pc.require_explicit_policy,
            inhibit_policy_mapping: pc.inhibit_policy_mapping,
        })
    }
}

/// Represents the Inhibit Any Policy extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InhibitAnyPolicy {
    pub skip_certs: u32,
}

impl ExtensionValue for InhibitAnyPolicy {
    const KIND: ExtensionKind = ExtensionKind::InhibitAnyPolicy;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        Ok(x509_cert::ext::pkix::InhibitAnyPolicy(self.skip_certs).to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let inhibit = x509_cert::ext::pkix::InhibitAnyPolicy::from_der(value)?;
        Ok(InhibitAnyPolicy {
            skip_certs: inhibit.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_constraints_round_trips() {
        for bc in [
            BasicConstraints { is_ca: true, max_path_length: Some(3) },
            BasicConstraints { is_ca: true, max_path_length: None },
            BasicConstraints { is_ca: false, max_path_length: None },
        ] {
            let encoded = bc.to_extension_value().unwrap();
            assert_eq!(BasicConstraints::from_extension_value(&encoded).unwrap(), bc);
        }
    }

    #[test]
    fn basic_constraints_rejects_wrong_shape() {
        // An INTEGER where a SEQUENCE is expected.
        assert!(BasicConstraints::from_extension_value(&[0x02, 0x01, 0x05]).is_err());
    }

    #[test]
    fn name_constraints_round_trips() {
        let nc = NameConstraints {
            permitted_subtrees: vec![
                GeneralSubtree::new(GeneralName::DnsName("example.com".to_string())),
                GeneralSubtree::new(GeneralName::Rfc822Name("ops@example.com".to_string())),
            ],
            excluded_subtrees: vec![GeneralSubtree::new(GeneralName::DnsName(
                "internal.example.com".to_string(),
            ))],
        };
        let encoded = nc.to_extension_value().unwrap();
        assert_eq!(NameConstraints::from_extension_value(&encoded).unwrap(), nc);
    }

    #[test]
    fn policy_constraints_round_trips() {
        let pc = PolicyConstraints {
            require_explicit_policy: Some(0),
            inhibit_policy_mapping: None,
        };
        let encoded = pc.to_extension_value().unwrap();
        assert_eq!(PolicyConstraints::from_extension_value(&encoded).unwrap(), pc);
    }

    #[test]
    fn inhibit_any_policy_round_trips() {
        let inhibit = InhibitAnyPolicy { skip_certs: 2 };
        let encoded = inhibit.to_extension_value().unwrap();
        assert_eq!(
            InhibitAnyPolicy::from_extension_value(&encoded).unwrap(),
            inhibit
        );
        // SkipCerts is a bare INTEGER.
        assert_eq!(encoded, [0x02, 0x01, 0x02]);
    }
}
