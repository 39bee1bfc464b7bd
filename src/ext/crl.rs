//! The CRL distribution points extension.

use der::{Decode, Encode, flagset::FlagSet};
use x509_cert::ext::pkix::CrlDistributionPoints as X509CrlDistributionPoints;
use x509_cert::ext::pkix::crl::dp::DistributionPoint as X509DistributionPoint;
use x509_cert::ext::pkix::name::DistributionPointName as X509DistributionPointName;
use x509_cert::name::RelativeDistinguishedName;

use crate::error::Result;
use crate::ext::ExtensionValue;
use crate::ext::general_name::{GeneralName, from_x509_names, to_x509_names};
use crate::oid::ExtensionKind;

pub use x509_cert::ext::pkix::crl::dp::Reasons;

/// Where a distribution point lives: a list of general names, or a name
/// relative to the CRL issuer's distinguished name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionPointName {
    FullName(Vec<GeneralName>),
    RelativeToIssuer(RelativeDistinguishedName),
}

impl DistributionPointName {
    fn to_x509(&self) -> Result<X509DistributionPointName> {
        let name = match self {
            DistributionPointName::FullName(names) => {
                X509DistributionPointName::FullName(to_x509_names(names)?)
            }
            DistributionPointName::RelativeToIssuer(rdn) => {
                X509DistributionPointName::NameRelativeToCRLIssuer(rdn.clone())
            }
        };
        Ok(name)
    }

    fn from_x509(name: &X509DistributionPointName) -> Result<Self> {
        let name = match name {
            X509DistributionPointName::FullName(names) => {
                DistributionPointName::FullName(from_x509_names(names)?)
            }
            X509DistributionPointName::NameRelativeToCRLIssuer(rdn) => {
                DistributionPointName::RelativeToIssuer(rdn.clone())
            }
        };
        Ok(name)
    }
}

/// One CRL distribution point.
///
/// # Fields
/// * `name` - Where the CRL can be fetched.
/// * `reasons` - The revocation reasons this point covers; absent means all.
/// * `crl_issuer` - The CRL issuer when it differs from the certificate issuer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionPoint {
    pub name: Option<DistributionPointName>,
    pub reasons: Option<FlagSet<Reasons>>,
    pub crl_issuer: Vec<GeneralName>,
}

impl DistributionPoint {
    fn to_x509(&self) -> Result<X509DistributionPoint> {
        Ok(X509DistributionPoint {
            distribution_point: self
                .name
                .as_ref()
                .map(DistributionPointName::to_x509)
                .transpose()?,
            reasons: self.reasons,
            crl_issuer: if self.crl_issuer.is_empty() {
                None
            } else {
                Some(to_x509_names(&self.crl_issuer)?)
            },
        })
    }

    fn from_x509(point: &X509DistributionPoint) -> Result<Self> {
        Ok(DistributionPoint {
            name: point
                .distribution_point
                .as_ref()
                .map(DistributionPointName::from_x509)
                .transpose()?,
            reasons: point.reasons,
            crl_issuer: point
                .crl_issuer
                .as_deref()
                .map(from_x509_names)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

/// Represents the CRL Distribution Points extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrlDistributionPoints {
    pub points: Vec<DistributionPoint>,
}

impl ExtensionValue for CrlDistributionPoints {
    const KIND: ExtensionKind = ExtensionKind::CrlDistributionPoints;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let points = X509CrlDistributionPoints(
            self.points
                .iter()
                .map(DistributionPoint::to_x509)
                .collect::<Result<_>>()?,
        );
        Ok(points.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let points = X509CrlDistributionPoints::from_der(value)?;
        Ok(CrlDistributionPoints {
            points: points
                .0
                .iter()
                .map(DistributionPoint::from_x509)
                .collect::<Result<_>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_points_round_trip() {
        let points = CrlDistributionPoints {
            points: vec![
                DistributionPoint {
                    name: Some(DistributionPointName::FullName(vec![GeneralName::Uri(
                        "http://crl.example.com/ca.crl".to_string(),
                    )])),
                    reasons: None,
                    crl_issuer: Vec::new(),
                },
                DistributionPoint {
                    name: Some(DistributionPointName::FullName(vec![GeneralName::Uri(
                        "ldap://ldap.example.com/cn=CA,dc=example?certificateRevocationList"
                            .to_string(),
                    )])),
                    reasons: Some(Reasons::KeyCompromise | Reasons::CaCompromise),
                    crl_issuer: vec![GeneralName::DnsName("crl-issuer.example.com".to_string())],
                },
            ],
        };
        let encoded = points.to_extension_value().unwrap();
        assert_eq!(
            CrlDistributionPoints::from_extension_value(&encoded).unwrap(),
            points
        );
    }

    #[test]
    fn empty_point_round_trips() {
        // All three fields are OPTIONAL; a bare SEQUENCE is legal.
        let points = CrlDistributionPoints {
            points: vec![DistributionPoint::default()],
        };
        let encoded = points.to_extension_value().unwrap();
        assert_eq!(
            CrlDistributionPoints::from_extension_value(&encoded).unwrap(),
            points
        );
    }

    #[test]
    fn non_sequence_is_a_decode_error() {
        assert!(CrlDistributionPoints::from_extension_value(&[0x04, 0x02, 0x30, 0x00]).is_err());
    }
}
