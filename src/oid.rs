//! Registry of the extension kinds this crate understands, plus the
//! numeric object-identifier ordering used everywhere a set of extensions
//! is enumerated.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use const_oid::{AssociatedOid, ObjectIdentifier};
use x509_cert::ext::pkix;

/// The closed set of extension kinds with a dedicated codec.
///
/// OIDs outside this set are still carried by an
/// [`ExtensionSet`](crate::set::ExtensionSet), but only as opaque octet
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    AuthorityInformationAccess,
    AuthorityKeyIdentifier,
    BasicConstraints,
    CertificatePolicies,
    CrlDistributionPoints,
    ExtendedKeyUsage,
    InhibitAnyPolicy,
    IssuerAlternativeName,
    KeyUsage,
    NameConstraints,
    PolicyConstraints,
    PolicyMappings,
    PrivateKeyUsagePeriod,
    SubjectAlternativeName,
    SubjectInformationAccess,
    SubjectKeyIdentifier,
}

impl ExtensionKind {
    /// Every registered kind, in display order.
    pub const ALL: [ExtensionKind; 16] = [
        ExtensionKind::AuthorityInformationAccess,
        ExtensionKind::AuthorityKeyIdentifier,
        ExtensionKind::BasicConstraints,
        ExtensionKind::CertificatePolicies,
        ExtensionKind::CrlDistributionPoints,
        ExtensionKind::ExtendedKeyUsage,
        ExtensionKind::InhibitAnyPolicy,
        ExtensionKind::IssuerAlternativeName,
        ExtensionKind::KeyUsage,
        ExtensionKind::NameConstraints,
        ExtensionKind::PolicyConstraints,
        ExtensionKind::PolicyMappings,
        ExtensionKind::PrivateKeyUsagePeriod,
        ExtensionKind::SubjectAlternativeName,
        ExtensionKind::SubjectInformationAccess,
        ExtensionKind::SubjectKeyIdentifier,
    ];

    /// Returns the canonical OID for this kind.
    pub fn oid(self) -> ObjectIdentifier {
        match self {
            ExtensionKind::AuthorityInformationAccess => pkix::AuthorityInfoAccessSyntax::OID,
            ExtensionKind::AuthorityKeyIdentifier => pkix::AuthorityKeyIdentifier::OID,
            ExtensionKind::BasicConstraints => pkix::BasicConstraints::OID,
            ExtensionKind::CertificatePolicies => pkix::CertificatePolicies::OID,
            ExtensionKind::CrlDistributionPoints => pkix::crl::CrlDistributionPoints::OID,
            ExtensionKind::ExtendedKeyUsage => pkix::ExtendedKeyUsage::OID,
            ExtensionKind::InhibitAnyPolicy => pkix::InhibitAnyPolicy::OID,
            ExtensionKind::IssuerAlternativeName => pkix::IssuerAltName::OID,
            ExtensionKind::KeyUsage => pkix::KeyUsage::OID,
            ExtensionKind::NameConstraints => pkix::NameConstraints::OID,
            ExtensionKind::PolicyConstraints => pkix::PolicyConstraints::OID,
            ExtensionKind::PolicyMappings => pkix::PolicyMappings::OID,
            ExtensionKind::PrivateKeyUsagePeriod => pkix::PrivateKeyUsagePeriod::OID,
            ExtensionKind::SubjectAlternativeName => pkix::SubjectAltName::OID,
            ExtensionKind::SubjectInformationAccess => pkix::SubjectInfoAccessSyntax::OID,
            ExtensionKind::SubjectKeyIdentifier => pkix::SubjectKeyIdentifier::OID,
        }
    }

    /// Returns the human-readable name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            ExtensionKind::AuthorityInformationAccess => "Authority Information Access",
            ExtensionKind::AuthorityKeyIdentifier => "Authority Key Identifier",
            ExtensionKind::BasicConstraints => "Basic Constraints",
            ExtensionKind::CertificatePolicies => "Certificate Policies",
            ExtensionKind::CrlDistributionPoints => "CRL Distribution Points",
            ExtensionKind::ExtendedKeyUsage => "Extended Key Usage",
            ExtensionKind::InhibitAnyPolicy => "Inhibit Any Policy",
            ExtensionKind::IssuerAlternativeName => "Issuer Alternative Name",
            ExtensionKind::KeyUsage => "Key Usage",
            ExtensionKind::NameConstraints => "Name Constraints",
            ExtensionKind::PolicyConstraints => "Policy Constraints",
            ExtensionKind::PolicyMappings => "Policy Mappings",
            ExtensionKind::PrivateKeyUsagePeriod => "Private Key Usage Period",
            ExtensionKind::SubjectAlternativeName => "Subject Alternative Name",
            ExtensionKind::SubjectInformationAccess => "Subject Information Access",
            ExtensionKind::SubjectKeyIdentifier => "Subject Key Identifier",
        }
    }

    /// Looks up the kind registered for `oid`, if any.
    pub fn resolve(oid: &ObjectIdentifier) -> Option<ExtensionKind> {
        ExtensionKind::ALL.into_iter().find(|kind| kind.oid() == *oid)
    }

    /// Looks up the kind for a dotted-decimal OID string.
    ///
    /// A string that does not parse as an OID (a non-numeric arc, say)
    /// resolves to `None` so display layers can fall back to showing the
    /// raw string.
    pub fn resolve_str(oid: &str) -> Option<ExtensionKind> {
        ObjectIdentifier::from_str(oid)
            .ok()
            .and_then(|oid| ExtensionKind::resolve(&oid))
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compares two OIDs arc by arc, numerically.
///
/// On a shared-prefix tie the shorter OID orders first. This is the
/// canonical order for enumerating an extension set; it is not the same as
/// comparing the dotted strings lexically ("2.5.29.9" sorts before
/// "2.5.29.14" here).
pub fn cmp_oids(a: &ObjectIdentifier, b: &ObjectIdentifier) -> Ordering {
    a.arcs().cmp(b.arcs())
}

/// Compares two dotted-decimal OID strings the way [`cmp_oids`] compares
/// parsed OIDs, but totally over arbitrary input.
///
/// Numeric components compare as non-negative integers of any length
/// (leading zeros ignored). Components that are not digit runs order after
/// numeric ones and compare bytewise, so malformed identifiers still sort
/// deterministically instead of failing.
pub fn cmp_oid_strings(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match cmp_arc_strings(x, y) {
                Ordering::Equal => continue,
                unequal => return unequal,
            },
        }
    }
}

fn cmp_arc_strings(x: &str, y: &str) -> Ordering {
    let x_numeric = !x.is_empty() && x.bytes().all(|b| b.is_ascii_digit());
    let y_numeric = !y.is_empty() && y.bytes().all(|b| b.is_ascii_digit());
    match (x_numeric, y_numeric) {
        (true, true) => {
            // Arbitrary-precision compare: magnitude first, then digits.
            let x = x.trim_start_matches('0');
            let y = y.trim_start_matches('0');
            x.len().cmp(&y.len()).then_with(|| x.cmp(y))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.cmp(y),
    }
}

/// An OID ordered by [`cmp_oids`], usable as an ordered-map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedOid(pub ObjectIdentifier);

impl Ord for OrderedOid {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_oids(&self.0, &other.0)
    }
}

impl PartialOrd for OrderedOid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<ObjectIdentifier> for OrderedOid {
    fn from(oid: ObjectIdentifier) -> Self {
        OrderedOid(oid)
    }
}

impl fmt::Display for OrderedOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
