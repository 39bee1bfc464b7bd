mod util;

use const_oid::ObjectIdentifier;
use extkit::error::ExtKitError;
use extkit::ext::{
    AuthorityKeyIdentifier, BasicConstraints, ExtensionValue, GeneralName, KeyUsage, KeyUsages,
    SubjectAlternativeName, SubjectKeyIdentifier, key_identifier, wrap_extension_value,
};
use extkit::set::{ExtensionSet, ValidationWarning};
use extkit::template::{self, StandardTemplate};
use extkit::update::refresh_key_identifiers;

pub type Result<T> = std::result::Result<T, ExtKitError>;

/// Builds a realistic server-style extension set, writes it out as a
/// template file and reads it back. Content must survive the round trip,
/// including an extension this crate has no codec for.
#[test]
fn template_file_round_trip() -> Result<()> {
    let mut set = ExtensionSet::new();
    set.add_value(
        &BasicConstraints {
            is_ca: false,
            max_path_length: None,
        },
        true,
    )?;
    set.add_value(
        &KeyUsage(KeyUsages::DigitalSignature | KeyUsages::KeyEncipherment),
        true,
    )?;
    set.add_value(
        &SubjectAlternativeName {
            names: vec![
                GeneralName::DnsName("server.example.com".to_string()),
                GeneralName::DnsName("alt.example.com".to_string()),
            ],
        },
        false,
    )?;
    // A private extension with no registered codec rides along opaquely.
    let private_oid = ObjectIdentifier::new_unwrap("1.3.6.1.4.1.99999.7.1");
    set.add_extension(
        private_oid,
        false,
        wrap_extension_value(&[0x0c, 0x05, b'h', b'e', b'l', b'l', b'o'])?,
    );

    std::fs::create_dir_all(".debug_templates").unwrap();
    template::save_to_file(&set, ".debug_templates/server.tmpl")?;
    let reloaded = template::load_from_file(".debug_templates/server.tmpl")?;

    assert_eq!(reloaded, set);
    assert_eq!(
        reloaded.extension_value(&private_oid),
        set.extension_value(&private_oid)
    );
    Ok(())
}

/// A template computed for key pair K1, reused for K2, must end up with
/// K2's identifiers after a refresh. This is the reason the updater
/// exists.
#[test]
fn updater_recomputes_identifiers_for_new_keys() -> Result<()> {
    let k1 = util::key_material(1);
    let k2 = util::key_material(2);

    let mut set = ExtensionSet::new();
    set.add_value(&SubjectKeyIdentifier::from_public_key(&k1.subject_public_key), false)?;
    set.add_value(
        &AuthorityKeyIdentifier::from_issuer(
            &k1.issuer_public_key,
            &k1.issuer_name,
            &k1.issuer_serial,
        ),
        false,
    )?;

    // Round-trip through the template bytes first, as a reused template would.
    let mut reloaded = template::load(&template::save(&set)?)?;
    refresh_key_identifiers(&mut reloaded, &k2)?;

    let ski: SubjectKeyIdentifier = reloaded.decode_value()?.unwrap();
    assert_eq!(ski, SubjectKeyIdentifier::from_public_key(&k2.subject_public_key));
    assert_ne!(ski, SubjectKeyIdentifier::from_public_key(&k1.subject_public_key));

    let aki: AuthorityKeyIdentifier = reloaded.decode_value()?.unwrap();
    assert_eq!(aki.key_identifier, Some(key_identifier(&k2.issuer_public_key)));
    assert_eq!(
        aki.authority_cert_serial_number,
        Some(k2.issuer_serial.as_bytes().to_vec())
    );
    assert_eq!(
        aki.authority_cert_issuer,
        Some(vec![GeneralName::DirectoryName(k2.issuer_name.clone())])
    );
    Ok(())
}

/// Bytes that are not an Extensions SEQUENCE fail with the template error,
/// and a missing file fails with the I/O error; the two must not blur.
#[test]
fn load_failures_keep_their_cause_apart() {
    // A lone BOOLEAN.
    let err = template::load(&[0x01, 0x01, 0xff]).unwrap_err();
    assert!(matches!(err, ExtKitError::TemplateLoad(_)));

    let err = template::load_from_file(".debug_templates/does-not-exist.tmpl").unwrap_err();
    assert!(matches!(err, ExtKitError::Io(_)));
}

/// The standard templates must come out internally consistent: identifiers
/// derived from the supplied material, criticality per profile.
#[test]
fn standard_templates_build_consistent_sets() -> Result<()> {
    let material = util::key_material(3);

    let ca = StandardTemplate::CertificateAuthority.build(&material)?;
    let bc: BasicConstraints = ca.decode_value()?.unwrap();
    assert!(bc.is_ca);
    assert!(ca.is_critical(&BasicConstraints::KIND.oid()));
    let ski: SubjectKeyIdentifier = ca.decode_value()?.unwrap();
    assert_eq!(ski.0, key_identifier(&material.subject_public_key));
    assert!(!ca.contains(&AuthorityKeyIdentifier::KIND.oid()));

    let server = StandardTemplate::TlsServer.build(&material)?;
    let aki: AuthorityKeyIdentifier = server.decode_value()?.unwrap();
    assert_eq!(aki.key_identifier, Some(key_identifier(&material.issuer_public_key)));
    let ku: KeyUsage = server.decode_value()?.unwrap();
    assert!(ku.0.contains(KeyUsages::DigitalSignature));

    for preset in StandardTemplate::ALL {
        let set = preset.build(&material)?;
        assert!(!set.is_empty());
        assert!(set.validate()?.is_empty());
        // Every preset survives its own template round trip.
        assert_eq!(template::load(&template::save(&set)?)?, set);
    }
    Ok(())
}

/// A present-but-vacuous subject alternative name is flagged for
/// confirmation; a set without one is not.
#[test]
fn vacuous_san_requires_confirmation() -> Result<()> {
    let mut set = StandardTemplate::TlsServer.build(&util::key_material(4))?;
    assert!(set.validate()?.is_empty());

    set.add_value(
        &SubjectAlternativeName {
            names: vec![GeneralName::DnsName(String::new())],
        },
        false,
    )?;
    assert_eq!(
        set.validate()?,
        vec![ValidationWarning::EmptySubjectAlternativeName]
    );
    Ok(())
}

/// Canonical order holds across registered, unregistered and deep private
/// OIDs alike.
#[test]
fn enumeration_is_in_numeric_oid_order() -> Result<()> {
    let mut set = ExtensionSet::new();
    for oid in [
        "2.5.29.35",
        "1.3.6.1.4.1.99999.1",
        "2.5.29.14",
        "2.5.29.9",
        "1.3.6.1.5.5.7.1.1",
    ] {
        set.add_extension(
            ObjectIdentifier::new_unwrap(oid),
            false,
            wrap_extension_value(&[0x30, 0x00])?,
        );
    }

    let order: Vec<String> = set.iter().map(|(oid, _)| oid.to_string()).collect();
    assert_eq!(
        order,
        [
            "1.3.6.1.4.1.99999.1",
            "1.3.6.1.5.5.7.1.1",
            "2.5.29.9",
            "2.5.29.14",
            "2.5.29.35",
        ]
    );

    // Saved templates keep that order on the wire too.
    let reloaded = template::load(&template::save(&set)?)?;
    let reloaded_order: Vec<String> = reloaded.iter().map(|(oid, _)| oid.to_string()).collect();
    assert_eq!(reloaded_order, order);
    Ok(())
}
