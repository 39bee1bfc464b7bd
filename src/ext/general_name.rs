//! The typed general-name model shared by the alternative-name, access and
//! distribution-point extensions.

use std::net::IpAddr;

use der::{
    Any, Decode, Encode,
    asn1::{Ia5String, OctetString},
    oid::ObjectIdentifier,
};
use x509_cert::ext::pkix::name::{GeneralName as X509GeneralName, GeneralNames, OtherName};
use x509_cert::name::Name;

use crate::error::{ExtKitError, Result};

/// A single GeneralName as used in alternative names, authority key
/// identifiers, access descriptions and distribution points.
///
/// Each variant validates its own syntax: the string variants must be
/// IA5-encodable, IP addresses are exactly 4 or 16 raw address bytes on
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    /// An RFC 822 (email) name.
    Rfc822Name(String),
    /// A DNS host name.
    DnsName(String),
    /// An X.500 directory name.
    DirectoryName(Name),
    /// A uniform resource identifier.
    Uri(String),
    /// An IPv4 or IPv6 address.
    IpAddress(IpAddr),
    /// A registered object identifier.
    RegisteredId(ObjectIdentifier),
    /// A typed value under a caller-supplied OID; `value` holds the DER of
    /// the inner value.
    OtherName {
        type_id: ObjectIdentifier,
        value: Vec<u8>,
    },
}

impl GeneralName {
    /// Reports whether this name carries no usable content, e.g. a
    /// zero-length DNS name or an empty directory name.
    pub fn is_empty(&self) -> bool {
        match self {
            GeneralName::Rfc822Name(s) | GeneralName::DnsName(s) | GeneralName::Uri(s) => {
                s.is_empty()
            }
            GeneralName::DirectoryName(name) => name.0.is_empty(),
            GeneralName::IpAddress(_) | GeneralName::RegisteredId(_) => false,
            GeneralName::OtherName { value, .. } => value.is_empty(),
        }
    }

    pub(crate) fn to_x509(&self) -> Result<X509GeneralName> {
        let name = match self {
            GeneralName::Rfc822Name(s) => X509GeneralName::Rfc822Name(ia5(s)?),
            GeneralName::DnsName(s) => X509GeneralName::DnsName(ia5(s)?),
            GeneralName::DirectoryName(name) => X509GeneralName::DirectoryName(name.clone()),
            GeneralName::Uri(s) => X509GeneralName::UniformResourceIdentifier(ia5(s)?),
            GeneralName::IpAddress(ip) => {
                let octets = match ip {
                    IpAddr::V4(v4) => v4.octets().to_vec(),
                    IpAddr::V6(v6) => v6.octets().to_vec(),
                };
                X509GeneralName::IpAddress(
                    OctetString::new(octets).map_err(|e| ExtKitError::InvalidInput(e.to_string()))?,
                )
            }
            GeneralName::RegisteredId(oid) => X509GeneralName::RegisteredId(*oid),
            GeneralName::OtherName { type_id, value } => X509GeneralName::OtherName(OtherName {
                type_id: *type_id,
                value: Any::from_der(value)?,
            }),
        };
        Ok(name)
    }

    pub(crate) fn from_x509(name: &X509GeneralName) -> Result<Self> {
        let name = match name {
            X509GeneralName::Rfc822Name(s) => GeneralName::Rfc822Name(s.to_string()),
            X509GeneralName::DnsName(s) => GeneralName::DnsName(s.to_string()),
            X509GeneralName::DirectoryName(dn) => GeneralName::DirectoryName(dn.clone()),
            X509GeneralName::UniformResourceIdentifier(s) => GeneralName::Uri(s.to_string()),
            X509GeneralName::IpAddress(octets) => {
                let bytes = octets.as_bytes();
                let ip = match bytes.len() {
                    4 => {
                        let mut addr = [0u8; 4];
                        addr.copy_from_slice(bytes);
                        IpAddr::from(addr)
                    }
                    16 => {
                        let mut addr = [0u8; 16];
                        addr.copy_from_slice(bytes);
                        IpAddr::from(addr)
                    }
                    n => {
                        return Err(ExtKitError::Decode(format!(
                            "IP address must be 4 or 16 bytes, got {n}"
                        )));
                    }
                };
                GeneralName::IpAddress(ip)
            }
            X509GeneralName::RegisteredId(oid) => GeneralName::RegisteredId(*oid),
            X509GeneralName::OtherName(other) => GeneralName::OtherName {
                type_id: other.type_id,
                value: other.value.to_der()?,
            },
            _ => {
                return Err(ExtKitError::Decode(
                    "Unsupported general name type".to_string(),
                ));
            }
        };
        Ok(name)
    }
}

fn ia5(s: &str) -> Result<Ia5String> {
    Ia5String::new(s).map_err(|e| ExtKitError::InvalidInput(e.to_string()))
}

pub(crate) fn to_x509_names(names: &[GeneralName]) -> Result<GeneralNames> {
    names.iter().map(GeneralName::to_x509).collect()
}

pub(crate) fn from_x509_names(names: &[X509GeneralName]) -> Result<Vec<GeneralName>> {
    names.iter().map(GeneralName::from_x509).collect()
}
