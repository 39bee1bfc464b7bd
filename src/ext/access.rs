//! Authority and subject information access extensions.

use const_oid::ObjectIdentifier;
use der::{Decode, Encode};
use x509_cert::ext::pkix::{
    AccessDescription as X509AccessDescription, AuthorityInfoAccessSyntax, SubjectInfoAccessSyntax,
};

use crate::error::Result;
use crate::ext::ExtensionValue;
use crate::ext::general_name::GeneralName;
use crate::oid::ExtensionKind;

pub use const_oid::db::rfc5280::{
    ID_AD_CA_ISSUERS, ID_AD_CA_REPOSITORY, ID_AD_OCSP, ID_AD_TIME_STAMPING,
};

/// One access entry: how to reach a service, and where.
///
/// # Fields
/// * `access_method` - The kind of service, e.g. [`ID_AD_OCSP`] or [`ID_AD_CA_ISSUERS`].
/// * `access_location` - Where the service lives, usually a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDescription {
    pub access_method: ObjectIdentifier,
    pub access_location: GeneralName,
}

impl AccessDescription {
    fn to_x509(&self) -> Result<X509AccessDescription> {
        Ok(X509AccessDescription {
            access_method: self.access_method,
            access_location: self.access_location.to_x509()?,
        })
    }

    fn from_x509(description: &X509AccessDescription) -> Result<Self> {
        Ok(AccessDescription {
            access_method: description.access_method,
            access_location: GeneralName::from_x509(&description.access_location)?,
        })
    }
}

/// Represents the Authority Information Access extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorityInfoAccess {
    pub descriptions: Vec<AccessDescription>,
}

impl ExtensionValue for AuthorityInfoAccess {
    const KIND: ExtensionKind = ExtensionKind::AuthorityInformationAccess;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let aia = AuthorityInfoAccessSyntax(
            self.descriptions
                .iter()
                .map(AccessDescription::to_x509)
                .collect::<Result<_>>()?,
        );
        Ok(aia.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let aia = AuthorityInfoAccessSyntax::from_der(value)?;
        Ok(AuthorityInfoAccess {
            descriptions: aia
                .0
                .iter()
                .map(AccessDescription::from_x509)
                .collect::<Result<_>>()?,
        })
    }
}

/// Represents the Subject Information Access extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectInfoAccess {
    pub descriptions: Vec<AccessDescription>,
}

impl ExtensionValue for SubjectInfoAccess {
    const KIND: ExtensionKind = ExtensionKind::SubjectInformationAccess;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let sia = SubjectInfoAccessSyntax(
            self.descriptions
                .iter()
                .map(AccessDescription::to_x509)
                .collect::<Result<_>>()?,
        );
        Ok(sia.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let sia = SubjectInfoAccessSyntax::from_der(value)?;
        Ok(SubjectInfoAccess {
            descriptions: sia
                .0
                .iter()
                .map(AccessDescription::from_x509)
                .collect::<Result<_>>()?,
        })
    }
}
