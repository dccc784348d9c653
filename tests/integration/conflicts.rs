use crate::integration_impl::*;

use rmib::mib::NodeKind;
use rmib::Oid;

/// An SMIv1 and an SMIv2 module declaring the same OID: the node's module
/// back-pointer goes to the SMIv2 module, but both modules keep their own
/// object instance.
#[test]
fn smiv2_wins_shared_nodes() {
    let v1 = r#"OLD-MIB DEFINITIONS ::= BEGIN
oldRoot OBJECT IDENTIFIER ::= { iso 9 }
ifEntry OBJECT-TYPE
    SYNTAX      INTEGER
    ACCESS      read-only
    STATUS      mandatory
    ::= { oldRoot 1 }
END
"#;
    let v2 = smiv2_module(
        "NEW-MIB",
        "",
        r#"newRoot OBJECT IDENTIFIER ::= { iso 9 }
ifEntry OBJECT-TYPE
    SYNTAX      Integer32
    MAX-ACCESS  read-only
    STATUS      current
    ::= { newRoot 1 }"#,
    );

    // SMIv1 module listed first; preference must not depend on input order
    let mib = resolve_source(&format!("{v1}\n{v2}"));

    let node = mib.find_node("1.9.1").expect("shared node");
    let owner = mib.module_by_id(node.module.expect("owner"));
    assert_eq!(owner.name, "NEW-MIB");

    // the node's payload is the preferred module's instance
    let payload = mib.object_by_id(node.object.expect("payload"));
    assert_eq!(mib.module_by_id(payload.module).name, "NEW-MIB");

    // both modules still enumerate their own object
    let old = mib.object_by_qualified("OLD-MIB::ifEntry").expect("old instance");
    let new = mib.object_by_qualified("NEW-MIB::ifEntry").expect("new instance");
    assert_eq!(old.oid, new.oid);
    assert_eq!(old.status, rmib::Status::Mandatory);
    assert_eq!(new.status, rmib::Status::Current);
    assert_eq!(old.node, new.node);
}

#[test]
fn newer_revision_wins_within_one_language() {
    let old = smiv2_module("T-MIB", "", "shared OBJECT IDENTIFIER ::= { enterprises 77 }")
        .replace("202401010000Z", "200001010000Z")
        .replace("T-MIB", "T1-MIB")
        .replace("enterprises 4242", "enterprises 4240");
    let new = smiv2_module("T2-MIB", "", "shared OBJECT IDENTIFIER ::= { enterprises 77 }")
        .replace("enterprises 4242", "enterprises 4241");
    let mib = resolve_source(&format!("{old}\n{new}"));

    let node = mib.find_node("1.3.6.1.4.1.77").expect("shared");
    assert_eq!(mib.module_by_id(node.module.unwrap()).name, "T2-MIB");
}

#[test]
fn longest_prefix_lookup() {
    let source = smiv2_module(
        "PREFIX-MIB",
        "",
        r#"acme OBJECT IDENTIFIER ::= { enterprises 99 }
widget OBJECT IDENTIFIER ::= { acme 1 }"#,
    );
    let mib = resolve_source(&source);

    let widget_oid = Oid::from([1, 3, 6, 1, 4, 1, 99, 1]);
    assert_eq!(mib.find_node("widget").unwrap().oid, widget_oid);

    // an instance OID below widget resolves to widget
    let probe = Oid::from([1, 3, 6, 1, 4, 1, 99, 1, 5, 0]);
    let hit = mib.longest_prefix_by_oid(&probe).expect("prefix hit");
    assert_eq!(hit.oid, widget_oid);

    // a probe diverging below acme resolves to acme
    let probe = Oid::from([1, 3, 6, 1, 4, 1, 99, 2, 1]);
    let hit = mib.longest_prefix_by_oid(&probe).expect("prefix hit");
    assert_eq!(hit.oid, Oid::from([1, 3, 6, 1, 4, 1, 99]));

    // nothing at all under arc 3
    assert!(mib.longest_prefix_by_oid(&Oid::from([3, 999])).is_none());
}

#[test]
fn identical_inputs_give_identical_results() {
    let source = smiv2_module(
        "DET-MIB",
        "",
        r#"a OBJECT IDENTIFIER ::= { enterprises 88 }
b OBJECT-TYPE
    SYNTAX      Integer32
    MAX-ACCESS  read-only
    STATUS      current
    ::= { a 1 }
broken OBJECT-TYPE
    SYNTAX      NoSuchType
    MAX-ACCESS  read-only
    STATUS      current
    ::= { a 2 }"#,
    );
    let first = resolve_source(&source);
    let second = resolve_source(&source);
    assert_eq!(first.diagnostics(), second.diagnostics());
    assert_eq!(first.unresolved(), second.unresolved());
    assert_eq!(first.node_count(), second.node_count());
    assert_eq!(first.object_count(), second.object_count());
    assert_eq!(first.type_count(), second.type_count());
}

#[test]
fn type_cycles_are_detected() {
    let source = r#"CYCLE-MIB DEFINITIONS ::= BEGIN
TypeA ::= TypeB
TypeB ::= TypeA
END
"#;
    let mib = resolve_source(source);
    assert!(has_diag(&mib, "type-cycle"), "diagnostics: {:?}", mib.diagnostics());
    // the cycle members stay in the table with no settled base
    assert!(mib.type_by_name("TypeA").is_some());
}
