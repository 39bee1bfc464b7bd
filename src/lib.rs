//! # ExtKit - X.509 Certificate Extension Management
//!
//! ExtKit models the set of X.509v3 extensions attached to a certificate
//! being issued, built entirely on the rustcrypto DER stack. It provides
//! typed values with canonical DER codecs for the standard extensions,
//! an ordered collection keyed by OID, key-identifier maintenance against
//! changing issuer/subject key material, and a reusable template file
//! format.
//!
//! ## Supported Extensions
//!
//! Each of the following has a structured type and codec; any other OID is
//! carried opaquely, never dropped:
//!
//! - Authority/Subject Key Identifier
//! - Basic Constraints, Name Constraints, Policy Constraints, Inhibit Any Policy
//! - Key Usage, Extended Key Usage, Private Key Usage Period
//! - Subject/Issuer Alternative Name
//! - Certificate Policies, Policy Mappings
//! - Authority/Subject Information Access
//! - CRL Distribution Points
//!
//! ## Key Features
//!
//! - **Pure Rust**: all encoding and decoding through the `der` and
//!   `x509-cert` crates
//! - **Canonical ordering**: sets enumerate in numeric OID order, stable
//!   across runs and arbitrary-length identifiers
//! - **Derived-value consistency**: key identifiers are recomputed from the
//!   actual key material, so a reused template never leaks a stale digest
//! - **Standalone templates**: the file format is the standard `Extensions`
//!   SEQUENCE, independent of any particular certificate
//!
//! ## Quick Start
//!
//! ### Building and persisting an extension set
//!
//! ```rust
//! use extkit::ext::{BasicConstraints, GeneralName, KeyUsage, KeyUsages, SubjectAlternativeName};
//! use extkit::set::ExtensionSet;
//! use extkit::template;
//!
//! # fn main() -> Result<(), extkit::error::ExtKitError> {
//! let mut set = ExtensionSet::new();
//! set.add_value(&BasicConstraints { is_ca: false, max_path_length: None }, true)?;
//! set.add_value(&KeyUsage(KeyUsages::DigitalSignature | KeyUsages::KeyEncipherment), true)?;
//! set.add_value(
//!     &SubjectAlternativeName {
//!         names: vec![GeneralName::DnsName("example.com".to_string())],
//!     },
//!     false,
//! )?;
//!
//! // Entries enumerate in numeric OID order no matter the insertion order.
//! for (oid, entry) in set.iter() {
//!     println!("{oid} critical={}", entry.critical);
//! }
//!
//! // The template bytes are a standard X.509 Extensions SEQUENCE.
//! let bytes = template::save(&set)?;
//! let reloaded = template::load(&bytes)?;
//! assert_eq!(reloaded, set);
//! # Ok(())
//! # }
//! ```
//!
//! ### Refreshing key identifiers for new key material
//!
//! ```rust,no_run
//! use std::str::FromStr;
//!
//! use der::Decode;
//! use x509_cert::{name::Name, serial_number::SerialNumber, spki::SubjectPublicKeyInfoOwned};
//!
//! use extkit::template;
//! use extkit::update::{self, KeyMaterial};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // A template saved against some earlier key pair.
//! let mut set = template::load_from_file("tls_server.tmpl")?;
//!
//! let material = KeyMaterial::builder()
//!     .subject_public_key(SubjectPublicKeyInfoOwned::from_der(&std::fs::read("subject.spki")?)?)
//!     .issuer_public_key(SubjectPublicKeyInfoOwned::from_der(&std::fs::read("issuer.spki")?)?)
//!     .issuer_name(Name::from_str("CN=Example CA,O=Example Corp")?)
//!     .issuer_serial(SerialNumber::new(&[0x01, 0x2a])?)
//!     .build();
//!
//! // Any key-identifier extensions present are recomputed; nothing else moves.
//! update::refresh_key_identifiers(&mut set, &material)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Editing a single extension
//!
//! ```rust
//! use extkit::ext::{ExtendedKeyUsage, ExtendedKeyUsageOption};
//! use extkit::oid::ExtensionKind;
//! use extkit::set::ExtensionSet;
//!
//! # fn main() -> Result<(), extkit::error::ExtKitError> {
//! let mut set = ExtensionSet::new();
//! set.add_value(
//!     &ExtendedKeyUsage { usage: vec![ExtendedKeyUsageOption::ServerAuth] },
//!     false,
//! )?;
//!
//! // Decode into the editor's shape, change it, commit it back.
//! let mut eku: ExtendedKeyUsage = set.decode_value()?.unwrap();
//! eku.usage.push(ExtendedKeyUsageOption::ClientAuth);
//! set.add_value(&eku, false)?;
//!
//! // Cloning hands a sub-editor an independent copy; cancelling it cannot
//! // touch this set.
//! let scratch = set.clone();
//! drop(scratch);
//!
//! assert_eq!(ExtensionKind::resolve_str("2.5.29.37"), Some(ExtensionKind::ExtendedKeyUsage));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failures keep their cause apart so callers can present them usefully:
//! a value that does not decode as its claimed kind is
//! [`error::ExtKitError::Decode`], a file that is not a template is
//! [`error::ExtKitError::TemplateLoad`], and an unreadable file is
//! [`error::ExtKitError::Io`]. The non-fatal checks surface through
//! [`set::ValidationWarning`] instead of an error.
//!
//! ## Module Organization
//!
//! - [`oid`]: the registry of known extension kinds and the canonical OID order
//! - [`ext`]: typed extension values and their DER codecs
//! - [`set`]: the extension collection and its validation warnings
//! - [`update`]: recomputing derived extensions from key material
//! - [`template`]: template serialization, file I/O and standard templates
//! - [`error`]: the crate's error types

pub mod error;
pub mod ext;
pub mod oid;
pub mod set;
pub mod template;
pub mod update;
