//! Subject and issuer alternative name extensions.

use der::{Decode, Encode};
use x509_cert::ext::pkix::{IssuerAltName, SubjectAltName};

use crate::error::Result;
use crate::ext::ExtensionValue;
use crate::ext::general_name::{GeneralName, from_x509_names, to_x509_names};
use crate::oid::ExtensionKind;

/// Represents the Subject Alternative Name extension.
///
/// # Fields
/// * `names` - The alternative names, in certificate order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectAlternativeName {
    pub names: Vec<GeneralName>,
}

impl SubjectAlternativeName {
    /// Reports whether the extension carries an unusable name list: no
    /// entries at all, or any entry that is empty.
    ///
    /// Callers use this to ask for confirmation before accepting a set
    /// whose SAN says nothing useful; it is not a decode failure.
    pub fn is_vacuous(&self) -> bool {
        self.names.is_empty() || self.names.iter().any(GeneralName::is_empty)
    }
}

impl ExtensionValue for SubjectAlternativeName {
    const KIND: ExtensionKind = ExtensionKind::SubjectAlternativeName;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let san = SubjectAltName(to_x509_names(&self.names)?);
        Ok(san.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let san = SubjectAltName::from_der(value)?;
        Ok(SubjectAlternativeName {
            names: from_x509_names(&san.0)?,
        })
    }
}

/// Represents the Issuer Alternative Name extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuerAlternativeName {
    pub names: Vec<GeneralName>,
}

impl ExtensionValue for IssuerAlternativeName {
    const KIND: ExtensionKind = ExtensionKind::IssuerAlternativeName;

    fn to_extension_value(&self) -> Result<Vec<u8>> {
        let ian = IssuerAltName(to_x509_names(&self.names)?);
        Ok(ian.to_der()?)
    }

    fn from_extension_value(value: &[u8]) -> Result<Self> {
        let ian = IssuerAltName::from_der(value)?;
        Ok(IssuerAlternativeName {
            names: from_x509_names(&ian.0)?,
        })
    }
}
