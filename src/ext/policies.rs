//! Certificate policies and policy mappings.

use const_oid::ObjectIdentifier;
use const_oid::db::rfc5280::ID_QT_CPS;
use der::{Any, Decode, Encode, asn1::Ia5String};
use x509_cert::ext::pkix::certpolicy::{
    PolicyInformation as X509PolicyInformation, PolicyQualifierInfo,
};

use crate::error::{ExtKitError, Result};
use crate::ext::ExtensionValue;
use crate::oid::ExtensionKind;

/// A single qualifier attached to a policy.
///
/// CPS URIs get a typed variant; every other qualifier kind is carried as
/// its identifier plus the raw DER of the qualifier value, so nothing is
/// lost on a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyQualifier {
    /// A pointer to the certification practice statement.
    CpsUri(String),
    /// Any other qualifier; `value` holds the DER of the qualifier value.
    Other {
        id: ObjectIdentifier,
        value: Option<Vec<u8>>,
    },
}

impl PolicyQualifier {
    fn to_x509(&self) -> Result<PolicyQualifierInfo> {
        let info = match self {
            PolicyQualifier::CpsUri(uri) => PolicyQualifierInfo {
                policy_qualifier_id: ID_QT_CPS,
                qualifier: Some(Any::encode_from(
                    &Ia5String::new(uri).map_err(|e| ExtKitError::InvalidInput(e.to_string()))?,
                )?),
            },
            PolicyQualifier::Other { id, value } => PolicyQualifierInfo {
                policy_qualifier_id: *id,
                qualifier: value.as_ref().map(|v| Any::from_der(v)).transpose()?,
            },
        };
        Ok(info)
    }

    fn from_x509(info: &PolicyQualifierInfo) -> Result<Self> {
        if info.policy_qualifier_id == ID_QT_CPS {
            if let Some(qualifier) = &info.qualifier {
                let uri: Ia5String = qualifier.decode_as()?;
                return Ok(PolicyQualifier::CpsUri(uri.to_string()));
            }
        }
        Ok(PolicyQualifier::Other {
            id: info.policy_qualifier_id,
            value: info
                .qualifier
                .as_ref()
                .map(|q| q.to_der())
                .transpose()?,
        })
    }
}

/// One policy entry: its identifier and any qualifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyInformation {
    pub policy_identifier: ObjectIdentifier,
    pub qualifiers: Vec<PolicyQualifier>,
}

impl PolicyInformation {
    /// A policy with no qualifiers.
    pub fn new(policy_identifier: ObjectIdentifier) -> Self {
        PolicyInformation {
            policy_identifier,
            qualifiers: Vec::new(),
        }
    }

    fn to_x509(&self) -> Result<X509PolicyInformation> {
        let qualifiers = if self.qualifiers.is_empty() {
            None
        } else {
            Some(
                self.qualifiers
                    .iter()
                    .map(PolicyQualifier::to_x509)
                    .collect::<Result<_>>()?,
            )
        };
        Ok(X509PolicyInformation {
            policy_identifier: self.policy_identifier,
            policy_qualifiers: qualifiers,
        })
    }

    fn from_x509(info: &X509PolicyInformation) -> Result<Self> {
        Ok(PolicyInformation {
            policy_identifier: info.policy_identifier,
            qualifiers: info
                .policy_qualifiers
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(PolicyQualifier::from_x509)
                .collect::<Result<_>>()?,
        })
    }
}

/// Represents the Certificate Policies extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificatePolicies {
    pub policies: Vec<PolicyInformation>,
}

impl ExtensionValue for CertificatePolicies {
    const KIND: ExtensionKind = ExtensionKind::CertificatePolicies;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let policies = x509_cert::ext::pkix::CertificatePolicies(
            self.policies
                .iter()
                .map(PolicyInformation::to_x509)
                .collect::<Result<_>>()?,
        );
        Ok(policies.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let policies = x509_cert::ext::pkix::CertificatePolicies::from_der(value)?;
        Ok(CertificatePolicies {
            policies: policies
                .0
                .iter()
                .map(PolicyInformation::from_x509)
                .collect::<Result<_>>()?,
        })
    }
}

/// One issuer-domain to subject-domain policy mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyMapping {
    pub issuer_domain_policy: ObjectIdentifier,
    pub subject_domain_policy: ObjectIdentifier,
}

/// Represents the Policy Mappings extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyMappings {
    pub mappings: Vec<PolicyMapping>,
}

impl ExtensionValue for PolicyMappings {
    const KIND: ExtensionKind = ExtensionKind::PolicyMappings;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let mappings = x509_cert::ext::pkix::PolicyMappings(
            self.mappings
                .iter()
                .map(|m| x509_cert::ext::pkix::PolicyMapping {
                    issuer_domain_policy: m.issuer_domain_policy,
                    subject_domain_policy: m.subject_domain_policy,
                })
                .collect(),
        );
        Ok(mappings.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let mappings = x509_cert::ext::pkix::PolicyMappings::from_der(value)?;
        Ok(PolicyMappings {
            mappings: mappings
                .0
                .iter()
                .map(|m| PolicyMapping {
                    issuer_domain_policy: m.issuer_domain_policy,
                    subject_domain_policy: m.subject_domain_policy,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policies_round_trip() {
        let policies = CertificatePolicies {
            policies: vec![
                PolicyInformation::new(ObjectIdentifier::new_unwrap("2.23.140.1.2.1")),
                PolicyInformation {
                    policy_identifier: ObjectIdentifier::new_unwrap("1.3.6.1.4.1.99999.1.1"),
                    qualifiers: vec![PolicyQualifier::CpsUri(
                        "https://example.com/cps".to_string(),
                    )],
                },
            ],
        };
        let encoded = policies.to_extension_value().unwrap();
        assert_eq!(
            CertificatePolicies::from_extension_value(&encoded).unwrap(),
            policies
        );
    }

    #[test]
    fn unknown_qualifiers_are_preserved_opaquely() {
        let qualifier = PolicyQualifier::Other {
            id: ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.2.2"),
            // A UserNotice SEQUENCE, carried without interpretation.
            value: Some(vec![0x30, 0x00]),
        };
        let policies = CertificatePolicies {
            policies: vec![PolicyInformation {
                policy_identifier: ObjectIdentifier::new_unwrap("2.16.840.1.101.3.2.1.48.1"),
                qualifiers: vec![qualifier.clone()],
            }],
        };
        let encoded = policies.to_extension_value().unwrap();
        let decoded = CertificatePolicies::from_extension_value(&encoded).unwrap();
        assert_eq!(decoded.policies[0].qualifiers, vec![qualifier]);
    }

    #[test]
    fn policy_mappings_round_trip() {
        let mappings = PolicyMappings {
            mappings: vec![PolicyMapping {
                issuer_domain_policy: ObjectIdentifier::new_unwrap("1.3.6.1.4.1.99999.2.1"),
                subject_domain_policy: ObjectIdentifier::new_unwrap("1.3.6.1.4.1.88888.2.1"),
            }],
        };
        let encoded = mappings.to_extension_value().unwrap();
        assert_eq!(
            PolicyMappings::from_extension_value(&encoded).unwrap(),
            mappings
        );
    }

    #[test]
    fn non_sequence_is_a_decode_error() {
        assert!(CertificatePolicies::from_extension_value(&[0x02, 0x01, 0x00]).is_err());
        assert!(PolicyMappings::from_extension_value(&[0x02, 0x01, 0x00]).is_err());
    }
}
