//! The extension collection: an ordered map from OID to a critical flag
//! and an encoded value.

use std::collections::BTreeMap;

use const_oid::ObjectIdentifier;

use crate::error::Result;
use crate::ext::{ExtensionValue, SubjectAlternativeName, unwrap_extension_value, wrap_extension_value};
use crate::oid::OrderedOid;

/// One stored extension: its criticality and its encoded octets.
///
/// # Fields
/// * `critical` - Whether a relying party must understand the extension.
/// * `value` - The DER of the OCTET STRING wrapping the kind-specific value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionEntry {
    pub critical: bool,
    pub value: Vec<u8>,
}

/// A non-fatal finding reported by [`ExtensionSet::validate`].
///
/// Warnings do not block any operation; they exist so a caller can ask for
/// confirmation before treating a set as final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationWarning {
    /// A subject alternative name extension is present but names nothing.
    EmptySubjectAlternativeName,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationWarning::EmptySubjectAlternativeName => {
                f.write_str("subject alternative name extension contains no usable name")
            }
        }
    }
}

/// The set of extensions attached to a certificate being issued.
///
/// Keys are unique OIDs; iteration follows the numeric OID order from
/// [`crate::oid::cmp_oids`], so display and encoding order is stable no
/// matter how the set was built. Cloning produces a fully independent
/// copy, which is how a sub-editor gets a working set it can throw away.
///
/// # Example
/// ```
/// use extkit::ext::{BasicConstraints, ExtensionValue};
/// use extkit::set::ExtensionSet;
///
/// # fn main() -> Result<(), extkit::error::ExtKitError> {
/// let mut set = ExtensionSet::new();
/// set.add_value(&BasicConstraints { is_ca: true, max_path_length: None }, true)?;
///
/// let decoded = set.decode_value::<BasicConstraints>()?.unwrap();
/// assert!(decoded.is_ca);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    entries: BTreeMap<OrderedOid, ExtensionEntry>,
}

impl ExtensionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        ExtensionSet::default()
    }

    /// Inserts or replaces the extension under `oid`.
    ///
    /// `value` must be the full DER of the OCTET STRING wrapper, as stored
    /// in a certificate's extension record. Replacement swaps the critical
    /// flag and the value together.
    pub fn add_extension(&mut self, oid: ObjectIdentifier, critical: bool, value: Vec<u8>) {
        self.entries
            .insert(OrderedOid(oid), ExtensionEntry { critical, value });
    }

    /// Encodes `value`, wraps it in its OCTET STRING layer and inserts it
    /// under its kind's OID.
    pub fn add_value<E: ExtensionValue>(&mut self, value: &E, critical: bool) -> Result<()> {
        let encoded = wrap_extension_value(&value.to_extension_value()?)?;
        self.add_extension(E::KIND.oid(), critical, encoded);
        Ok(())
    }

    /// Removes the extension under `oid`. Doing nothing when it is absent
    /// is deliberate; remove-then-add equals never having removed.
    pub fn remove_extension(&mut self, oid: &ObjectIdentifier) {
        self.entries.remove(&OrderedOid(*oid));
    }

    /// Flips the critical flag of the extension under `oid`, if present.
    pub fn toggle_criticality(&mut self, oid: &ObjectIdentifier) {
        if let Some(entry) = self.entries.get_mut(&OrderedOid(*oid)) {
            entry.critical = !entry.critical;
        }
    }

    /// Returns the stored (wrapped) octets for `oid`.
    pub fn extension_value(&self, oid: &ObjectIdentifier) -> Option<&[u8]> {
        self.entries
            .get(&OrderedOid(*oid))
            .map(|entry| entry.value.as_slice())
    }

    /// Reports whether the extension under `oid` is marked critical.
    /// Absent extensions are not critical.
    pub fn is_critical(&self, oid: &ObjectIdentifier) -> bool {
        self.entries
            .get(&OrderedOid(*oid))
            .is_some_and(|entry| entry.critical)
    }

    /// Reports whether an extension is stored under `oid`.
    pub fn contains(&self, oid: &ObjectIdentifier) -> bool {
        self.entries.contains_key(&OrderedOid(*oid))
    }

    /// Number of extensions in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the set holds no extensions at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unwraps and decodes the entry for `E`'s kind.
    ///
    /// Returns `Ok(None)` when the extension is absent; a present entry
    /// whose octets do not match the kind's ASN.1 shape is a decode error.
    pub fn decode_value<E: ExtensionValue>(&self) -> Result<Option<E>> {
        let Some(wrapped) = self.extension_value(&E::KIND.oid()) else {
            return Ok(None);
        };
        let value = unwrap_extension_value(wrapped)?;
        Ok(Some(E::from_extension_value(&value)?))
    }

    /// The OIDs of all critical extensions, in canonical order.
    ///
    /// Computed from the entries on every call; there is no second
    /// collection to drift out of sync.
    pub fn critical_oids(&self) -> Vec<ObjectIdentifier> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.critical)
            .map(|(oid, _)| oid.0)
            .collect()
    }

    /// The OIDs of all non-critical extensions, in canonical order.
    pub fn non_critical_oids(&self) -> Vec<ObjectIdentifier> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.critical)
            .map(|(oid, _)| oid.0)
            .collect()
    }

    /// Iterates over the entries in canonical OID order.
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectIdentifier, &ExtensionEntry)> {
        self.entries.iter().map(|(oid, entry)| (&oid.0, entry))
    }

    /// Reports whether a subject alternative name extension is present but
    /// carries no names, or a blank one.
    ///
    /// A set without a SAN extension is not "empty" in this sense; only a
    /// present-but-vacuous one is, so a caller can omit the extension
    /// without triggering a confirmation prompt.
    pub fn is_san_extension_empty(&self) -> Result<bool> {
        match self.decode_value::<SubjectAlternativeName>()? {
            Some(san) => Ok(san.is_vacuous()),
            None => Ok(false),
        }
    }

    /// Runs the non-fatal checks and returns whatever they flag.
    pub fn validate(&self) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();
        if self.is_san_extension_empty()? {
            warnings.push(ValidationWarning::EmptySubjectAlternativeName);
        }
        Ok(warnings)
    }
}
