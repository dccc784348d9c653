use crate::integration_impl::*;

use rmib::module::BaseType;
use rmib::{Severity, UnresolvedKind};

#[test]
fn import_from_missing_module() {
    let source = r#"LOST-MIB DEFINITIONS ::= BEGIN
IMPORTS foo FROM NON-EXISTENT;
END
"#;
    let mib = resolve_source(source);
    assert!(mib
        .unresolved()
        .iter()
        .any(|u| u.kind == UnresolvedKind::Import && u.symbol == "foo" && u.module == "LOST-MIB"));
    assert!(mib
        .diagnostics()
        .iter()
        .any(|d| d.code == "import-module-not-found"
            && d.severity == Severity::Error
            && d.module == "LOST-MIB"));
}

#[test]
fn macro_imports_are_silently_ignored() {
    let source = r#"MACROS-MIB DEFINITIONS ::= BEGIN
IMPORTS OBJECT-TYPE, TRAP-TYPE FROM NOWHERE-MIB;
END
"#;
    let mib = resolve_source(source);
    assert!(!has_diag(&mib, "import-module-not-found"), "{:?}", mib.diagnostics());
    assert!(mib.unresolved().is_empty());
}

#[test]
fn version_tiebreak_prefers_newer_last_updated() {
    let old = smiv2_module("V-MIB", "", "vRoot OBJECT IDENTIFIER ::= { enterprises 10 }")
        .replace("202401010000Z", "199901010000Z")
        .replace("enterprises 4242", "enterprises 4240");
    let new = smiv2_module("V-MIB", "", "vRoot OBJECT IDENTIFIER ::= { enterprises 11 }")
        .replace("enterprises 4242", "enterprises 4241");
    let user = r#"USER-MIB DEFINITIONS ::= BEGIN
IMPORTS vRoot FROM V-MIB;
child OBJECT IDENTIFIER ::= { vRoot 1 }
END
"#;
    let source = format!("{old}\n{new}\n{user}");
    let mib = resolve_source(&source);
    // both versions coexist; the import binds to the 2024 revision
    let child = mib.find_node("child").expect("child");
    assert_eq!(child.oid.arcs(), &[1, 3, 6, 1, 4, 1, 11, 1]);
}

#[test]
fn coverage_beats_recency_when_picking_a_version() {
    // the older revision defines both requested symbols; the newer one
    // dropped `extra`, so the importer must bind to the older revision
    let old = smiv2_module(
        "W-MIB",
        "",
        "wRoot OBJECT IDENTIFIER ::= { enterprises 30 }\nextra OBJECT IDENTIFIER ::= { wRoot 9 }",
    )
    .replace("202401010000Z", "199901010000Z")
    .replace("enterprises 4242", "enterprises 4230");
    let new = smiv2_module("W-MIB", "", "wRoot OBJECT IDENTIFIER ::= { enterprises 31 }")
        .replace("enterprises 4242", "enterprises 4231");
    let user = r#"USER-MIB DEFINITIONS ::= BEGIN
IMPORTS wRoot, extra FROM W-MIB;
child OBJECT IDENTIFIER ::= { extra 1 }
END
"#;
    let mib = resolve_source(&format!("{old}\n{new}\n{user}"));
    assert!(!has_diag(&mib, "import-not-found"), "{:?}", mib.diagnostics());
    // `extra` only exists in the 1999 revision, rooted at enterprises 30
    assert_eq!(mib.find_node("child").unwrap().oid.arcs(), &[1, 3, 6, 1, 4, 1, 30, 9, 1]);
}

#[test]
fn alias_table_redirects_historical_names() {
    let source = r#"ALIAS-MIB DEFINITIONS ::= BEGIN
IMPORTS OBJECT-TYPE, enterprises FROM SNMPv2-SMI-v1
        DisplayString FROM SNMPv2-TC-v1;
aliased OBJECT-TYPE
    SYNTAX      DisplayString
    MAX-ACCESS  read-only
    STATUS      current
    ::= { enterprises 50 1 }
END
"#;
    let mib = resolve_source(source);
    assert!(!has_diag(&mib, "import-module-not-found"), "{:?}", mib.diagnostics());
    let object = mib.object("aliased").expect("aliased");
    let ty = mib.type_by_id(object.type_id.expect("type"));
    assert_eq!(ty.name, "DisplayString");
    assert_eq!(ty.base, BaseType::OctetString);
}

#[test]
fn forwarding_follows_reexport_chains() {
    let source = r#"ORIGIN-MIB DEFINITIONS ::= BEGIN
theRoot OBJECT IDENTIFIER ::= { iso 20 }
END
MIDDLE-MIB DEFINITIONS ::= BEGIN
IMPORTS theRoot FROM ORIGIN-MIB;
END
LEAF-MIB DEFINITIONS ::= BEGIN
IMPORTS theRoot FROM MIDDLE-MIB;
leaf OBJECT IDENTIFIER ::= { theRoot 5 }
END
"#;
    let mib = resolve_source(source);
    assert!(!has_diag(&mib, "import-module-not-found"), "{:?}", mib.diagnostics());
    assert_eq!(mib.find_node("leaf").unwrap().oid.arcs(), &[1, 20, 5]);
}

#[test]
fn partial_resolution_binds_what_exists() {
    let source = r#"HALF-MIB DEFINITIONS ::= BEGIN
someRoot OBJECT IDENTIFIER ::= { iso 21 }
END
TAKER-MIB DEFINITIONS ::= BEGIN
IMPORTS someRoot, missingThing FROM HALF-MIB;
taken OBJECT IDENTIFIER ::= { someRoot 1 }
END
"#;
    let mib = resolve_source(source);
    // the symbol that exists still binds
    assert_eq!(mib.find_node("taken").unwrap().oid.arcs(), &[1, 21, 1]);
    // the missing one is reported
    assert!(diag_with_severity(&mib, "import-not-found", Severity::Error));
    assert!(mib
        .unresolved()
        .iter()
        .any(|u| u.kind == UnresolvedKind::Import && u.symbol == "missingThing"));
}

#[test]
fn strict_mode_disables_forwarding() {
    let source = r#"ORIGIN-MIB DEFINITIONS ::= BEGIN
theRoot OBJECT IDENTIFIER ::= { iso 20 }
END
MIDDLE-MIB DEFINITIONS ::= BEGIN
IMPORTS theRoot FROM ORIGIN-MIB;
END
LEAF-MIB DEFINITIONS ::= BEGIN
IMPORTS theRoot FROM MIDDLE-MIB;
leaf OBJECT IDENTIFIER ::= { theRoot 5 }
END
"#;
    let mib = resolve_with(source, rmib::Strictness::Strict);
    assert!(has_diag(&mib, "import-module-not-found"));
    assert!(mib.find_node("leaf").is_none());
}
