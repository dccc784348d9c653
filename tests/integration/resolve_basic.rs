use crate::integration_impl::*;

use rmib::mib::NodeKind;
use rmib::module::{BaseType, Language};
use rmib::{Oid, Severity, Strictness};

#[test]
fn well_known_oid_lookup_with_no_user_modules() {
    let mib = resolve_source("");

    let enterprises = mib.find_node("enterprises").expect("enterprises by name");
    assert_eq!(enterprises.oid.arcs(), &[1, 3, 6, 1, 4, 1]);
    assert_eq!(enterprises.kind, NodeKind::Node);
    let module = mib.module_by_id(enterprises.module.expect("module set"));
    assert_eq!(module.name, "SNMPv2-SMI");
    // a plain OID value carries no semantic payload
    assert!(enterprises.object.is_none());
    assert!(enterprises.notification.is_none());

    let by_oid = mib.find_node("1.3.6.1.4.1").expect("enterprises by oid");
    assert_eq!(by_oid.oid, enterprises.oid);
    let with_dot = mib.find_node(".1.3.6.1.4.1").expect("leading dot accepted");
    assert_eq!(with_dot.oid, enterprises.oid);
}

#[test]
fn base_modules_alone_are_clean() {
    let mib = resolve_source("");
    assert!(!mib.has_errors(), "diagnostics: {:?}", mib.diagnostics());
    assert!(mib.unresolved().is_empty());
    assert_eq!(mib.module_count(), 7);

    // ASN.1 primitives are seeded
    for primitive in ["INTEGER", "OCTET STRING", "OBJECT IDENTIFIER", "BITS"] {
        assert!(mib.type_by_name(primitive).is_some(), "missing {primitive}");
    }

    assert_eq!(mib.find_node("iso").unwrap().oid.arcs(), &[1]);
    assert_eq!(mib.find_node("mib-2").unwrap().oid.arcs(), &[1, 3, 6, 1, 2, 1]);
    assert_eq!(mib.find_node("zeroDotZero").unwrap().oid.arcs(), &[0, 0]);
    assert_eq!(mib.find_node("transmission").unwrap().oid.arcs(), &[1, 3, 6, 1, 2, 1, 10]);
}

#[test]
fn smiv2_compliance_path() {
    let source = smiv2_module(
        "ACME-MIB",
        "",
        r#"foo OBJECT-TYPE
    SYNTAX      Integer32
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION "A scalar."
    ::= { enterprises 99 }"#,
    );
    let mib = resolve_source(&source);
    assert!(!mib.has_errors(), "diagnostics: {:?}", mib.diagnostics());
    assert!(mib.unresolved().is_empty(), "unresolved: {:?}", mib.unresolved());

    assert_eq!(mib.module("ACME-MIB").unwrap().language, Language::Smiv2);

    let foo = mib.object("foo").expect("foo resolved");
    assert_eq!(foo.oid.arcs(), &[1, 3, 6, 1, 4, 1, 99]);
    assert_eq!(foo.kind, NodeKind::Scalar);
    assert_eq!(foo.access, rmib::Access::ReadOnly);

    let ty = mib.type_by_id(foo.type_id.expect("type resolved"));
    assert_eq!(ty.name, "Integer32");
    assert_eq!(ty.base, BaseType::Integer32);
}

#[test]
fn smiv1_trap_lands_under_enterprise_zero() {
    let source = r#"TRAP-TEST DEFINITIONS ::= BEGIN
coldStart TRAP-TYPE
    ENTERPRISE  snmp
    DESCRIPTION "A restart."
    ::= 0
END
"#;
    // `snmp` is not imported; resolving it through the SMI global roots is a
    // permissive-mode fallback
    let mib = resolve_with(source, Strictness::Permissive);
    let node = mib.find_node("coldStart").expect("trap node");
    assert_eq!(node.oid.arcs(), &[1, 3, 6, 1, 2, 1, 11, 0, 0]);
    assert_eq!(node.kind, NodeKind::Notification);

    let trap = mib.notification("coldStart").expect("notification");
    assert!(trap.is_trap);
    assert_eq!(trap.oid, Oid::from([1, 3, 6, 1, 2, 1, 11, 0, 0]));
}

#[test]
fn smiv1_trap_without_fallback_is_an_orphan() {
    let source = r#"TRAP-TEST DEFINITIONS ::= BEGIN
coldStart TRAP-TYPE
    ENTERPRISE  snmp
    DESCRIPTION "A restart."
    ::= 0
END
"#;
    let mib = resolve_with(source, Strictness::Normal);
    assert!(mib.find_node("coldStart").is_none());
    assert!(diag_with_severity(&mib, "oid-orphan", Severity::Error));
    assert!(mib
        .unresolved()
        .iter()
        .any(|u| u.kind == rmib::UnresolvedKind::Oid && u.symbol == "coldStart"));
}

#[test]
fn missing_module_identity_is_an_error() {
    let source = r#"NOID-MIB DEFINITIONS ::= BEGIN
IMPORTS OBJECT-TYPE, enterprises FROM SNMPv2-SMI;
x OBJECT-TYPE
    SYNTAX      OCTET STRING
    MAX-ACCESS  read-only
    STATUS      current
    ::= { enterprises 7 1 }
END
"#;
    let mib = resolve_source(source);
    assert!(diag_with_severity(&mib, "missing-module-identity", Severity::Error));
    assert!(mib.has_errors());
    // the module still loads and its definitions still resolve
    assert_eq!(mib.object("x").unwrap().oid.arcs(), &[1, 3, 6, 1, 4, 1, 7, 1]);
}

#[test]
fn user_module_cannot_shadow_a_base_module() {
    let source = r#"SNMPv2-SMI DEFINITIONS ::= BEGIN
bogus OBJECT IDENTIFIER ::= { iso 33 44 }
END
"#;
    let mib = resolve_source(source);
    // the impostor is dropped; the base module and its types survive
    assert_eq!(mib.module_count(), 7);
    assert!(mib.find_node("bogus").is_none());
    assert!(mib.type_by_name("Integer32").is_some());
    assert_eq!(mib.module("SNMPv2-SMI").unwrap().language, Language::Smiv2);
}

#[test]
fn hyphenated_smiv2_identifier_is_linted_in_strict_mode() {
    let source = smiv2_module(
        "HYPHEN-MIB",
        "",
        r#"my-scalar OBJECT-TYPE
    SYNTAX      Integer32
    MAX-ACCESS  read-only
    STATUS      current
    ::= { enterprises 100 }"#,
    );
    // warnings are below the Normal floor; Strict reports them
    let normal = resolve_source(&source);
    assert!(!has_diag(&normal, "identifier-hyphen-smiv2"));
    let strict = resolve_with(&source, Strictness::Strict);
    assert!(diag_with_severity(&strict, "identifier-hyphen-smiv2", Severity::Warning));
}
