//! Key-usage style extensions: key usage, extended key usage and the
//! private key usage period.

use der::{
    Decode, Encode,
    asn1::GeneralizedTime,
    oid::ObjectIdentifier,
};
use time::OffsetDateTime;
use x509_cert::ext::pkix::KeyUsage as X509KeyUsage;

use crate::error::{ExtKitError, Result};
use crate::ext::ExtensionValue;
use crate::oid::ExtensionKind;

pub use der::flagset::FlagSet;
pub use x509_cert::ext::pkix::KeyUsages;

/// Represents the Key Usage extension: a bit set over the nine defined
/// key purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage(pub FlagSet<KeyUsages>);

impl ExtensionValue for KeyUsage {
    const KIND: ExtensionKind = ExtensionKind::KeyUsage;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let ku = X509KeyUsage::from(self.0);
        Ok(ku.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let ku = X509KeyUsage::from_der(value)?;
        Ok(KeyUsage(ku.0))
    }
}

const ID_KP_IPSEC_END_SYSTEM: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.5");
const ID_KP_IPSEC_TUNNEL: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.6");
const ID_KP_IPSEC_USER: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.7");
const ANY_EXTENDED_KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.37.0");

/// Represents an option for the Extended Key Usage extension.
///
/// Purposes outside the well-known set decode as `Other`, so externally
/// supplied values never fail to round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedKeyUsageOption {
    ServerAuth,
    ClientAuth,
    CodeSigning,
    EmailProtection,
    IpsecEndSystem,
    IpsecTunnel,
    IpsecUser,
    TimeStamping,
    OcspSigning,
    AnyExtendedKeyUsage,
    Other(ObjectIdentifier),
}

impl From<ExtendedKeyUsageOption> for ObjectIdentifier {
    fn from(value: ExtendedKeyUsageOption) -> Self {
        match value {
            ExtendedKeyUsageOption::ServerAuth => const_oid::db::rfc5912::ID_KP_SERVER_AUTH,
            ExtendedKeyUsageOption::ClientAuth => const_oid::db::rfc5912::ID_KP_CLIENT_AUTH,
            ExtendedKeyUsageOption::CodeSigning => const_oid::db::rfc5912::ID_KP_CODE_SIGNING,
            ExtendedKeyUsageOption::EmailProtection => {
                const_oid::db::rfc5912::ID_KP_EMAIL_PROTECTION
            }
            ExtendedKeyUsageOption::IpsecEndSystem => ID_KP_IPSEC_END_SYSTEM,
            ExtendedKeyUsageOption::IpsecTunnel => ID_KP_IPSEC_TUNNEL,
            ExtendedKeyUsageOption::IpsecUser => ID_KP_IPSEC_USER,
            ExtendedKeyUsageOption::TimeStamping => const_oid::db::rfc5912::ID_KP_TIME_STAMPING,
            ExtendedKeyUsageOption::OcspSigning => const_oid::db::rfc5912::ID_KP_OCSP_SIGNING,
            ExtendedKeyUsageOption::AnyExtendedKeyUsage => ANY_EXTENDED_KEY_USAGE,
            ExtendedKeyUsageOption::Other(oid) => oid,
        }
    }
}

impl From<ObjectIdentifier> for ExtendedKeyUsageOption {
    fn from(oid: ObjectIdentifier) -> Self {
        match oid {
            const_oid::db::rfc5912::ID_KP_SERVER_AUTH => ExtendedKeyUsageOption::ServerAuth,
            const_oid::db::rfc5912::ID_KP_CLIENT_AUTH => ExtendedKeyUsageOption::ClientAuth,
            const_oid::db::rfc5912::ID_KP_CODE_SIGNING => ExtendedKeyUsageOption::CodeSigning,
            const_oid::db::rfc5912::ID_KP_EMAIL_PROTECTION => {
                ExtendedKeyUsageOption::EmailProtection
            }
            ID_KP_IPSEC_END_SYSTEM => ExtendedKeyUsageOption::IpsecEndSystem,
            ID_KP_IPSEC_TUNNEL => ExtendedKeyUsageOption::IpsecTunnel,
            ID_KP_IPSEC_USER => ExtendedKeyUsageOption::IpsecUser,
            const_oid::db::rfc5912::ID_KP_TIME_STAMPING => ExtendedKeyUsageOption::TimeStamping,
            const_oid::db::rfc5912::ID_KP_OCSP_SIGNING => ExtendedKeyUsageOption::OcspSigning,
            ANY_EXTENDED_KEY_USAGE => ExtendedKeyUsageOption::AnyExtendedKeyUsage,
            other => ExtendedKeyUsageOption::Other(other),
        }
    }
}

/// Represents the Extended Key Usage extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedKeyUsage {
    pub usage: Vec<ExtendedKeyUsageOption>,
}

impl ExtensionValue for ExtendedKeyUsage {
    const KIND: ExtensionKind = ExtensionKind::ExtendedKeyUsage;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let oids: Vec<ObjectIdentifier> = self.usage.iter().map(|v| (*v).into()).collect();
        let eku = x509_cert::ext::pkix::ExtendedKeyUsage(oids);
        Ok(eku.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let eku = x509_cert::ext::pkix::ExtendedKeyUsage::from_der(value)?;
        Ok(ExtendedKeyUsage {
            usage: eku.0.into_iter().map(ExtendedKeyUsageOption::from).collect(),
        })
    }
}

/// Represents the Private Key Usage Period extension.
///
/// Instants are second-resolution UTC, as GeneralizedTime encodes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrivateKeyUsagePeriod {
    pub not_before: Option<OffsetDateTime>,
    pub not_after: Option<OffsetDateTime>,
}

fn to_generalized_time(instant: OffsetDateTime) -> Result<GeneralizedTime> {
    let timestamp = instant.unix_timestamp();
    if timestamp < 0 {
        return Err(ExtKitError::InvalidInput(
            "usage period instants before 1970 are not supported".to_string(),
        ));
    }
    GeneralizedTime::from_unix_duration(std::time::Duration::from_secs(timestamp as u64))
        .map_err(|e| ExtKitError::InvalidInput(e.to_string()))
}

fn from_generalized_time(time: GeneralizedTime) -> Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(time.to_unix_duration().as_secs() as i64)
        .map_err(|e| ExtKitError::Decode(e.to_string()))
}

impl ExtensionValue for PrivateKeyUsagePeriod {
    const KIND: ExtensionKind = ExtensionKind::PrivateKeyUsagePeriod;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let period = x509_cert::ext::pkix::PrivateKeyUsagePeriod {
            not_before: self.not_before.map(to_generalized_time).transpose()?,
            not_after: self.not_after.map(to_generalized_time).transpose()?,
        };
        Ok(period.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let period = x509_cert::ext::pkix::PrivateKeyUsagePeriod::from_der(value)?;
        Ok(PrivateKeyUsagePeriod {
            not_before: period.not_before.map(from_generalized_time).transpose()?,
            not_after: period.not_after.map(from_generalized_time).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(timestamp: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(timestamp).unwrap()
    }

    #[test]
    fn key_usage_round_trips() {
        let ku = KeyUsage(KeyUsages::DigitalSignature | KeyUsages::KeyEncipherment);
        let encoded = ku.to_extension_value().unwrap();
        assert_eq!(KeyUsage::from_extension_value(&encoded).unwrap(), ku);
    }

    #[test]
    fn key_usage_rejects_non_bit_string() {
        assert!(KeyUsage::from_extension_value(&[0x04, 0x01, 0x00]).is_err());
    }

    #[test]
    fn extended_key_usage_round_trips() {
        let eku = ExtendedKeyUsage {
            usage: vec![
                ExtendedKeyUsageOption::ServerAuth,
                ExtendedKeyUsageOption::ClientAuth,
            ],
        };
        let encoded = eku.to_extension_value().unwrap();
        assert_eq!(ExtendedKeyUsage::from_extension_value(&encoded).unwrap(), eku);
    }

    #[test]
    fn unknown_purpose_oids_survive_decoding() {
        let private = ObjectIdentifier::new_unwrap("1.3.6.1.4.1.99999.42");
        let eku = ExtendedKeyUsage {
            usage: vec![ExtendedKeyUsageOption::Other(private)],
        };
        let encoded = eku.to_extension_value().unwrap();
        let decoded = ExtendedKeyUsage::from_extension_value(&encoded).unwrap();
        assert_eq!(decoded.usage, vec![ExtendedKeyUsageOption::Other(private)]);
    }

    #[test]
    fn private_key_usage_period_round_trips() {
        let period = PrivateKeyUsagePeriod {
            not_before: Some(utc(1_704_067_200)), // 2024-01-01T00:00:00Z
            not_after: Some(utc(1_767_225_600)),  // 2026-01-01T00:00:00Z
        };
        let encoded = period.to_extension_value().unwrap();
        assert_eq!(
            PrivateKeyUsagePeriod::from_extension_value(&encoded).unwrap(),
            period
        );
    }

    #[test]
    fn pre_epoch_period_is_rejected() {
        let period = PrivateKeyUsagePeriod {
            not_before: Some(utc(-1)),
            not_after: None,
        };
        assert!(matches!(
            period.to_extension_value(),
            Err(ExtKitError::InvalidInput(_))
        ));
    }
}
