use crate::integration_impl::*;

use rmib::mib::{DefValue, NodeKind};
use rmib::module::{RangeEndpoint, RangeItem};
use rmib::Oid;

fn if_test_source() -> String {
    smiv2_module(
        "IF-TEST",
        ", mib-2",
        r#"IfEntry ::= SEQUENCE { ifIndex Integer32, ifDescr OCTET STRING }

ifTable OBJECT-TYPE
    SYNTAX      SEQUENCE OF IfEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    DESCRIPTION "The interface table."
    ::= { mib-2 2 }

ifEntry OBJECT-TYPE
    SYNTAX      IfEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    DESCRIPTION "One interface."
    INDEX       { ifIndex }
    ::= { ifTable 1 }

ifIndex OBJECT-TYPE
    SYNTAX      Integer32
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION "The index."
    ::= { ifEntry 1 }

ifDescr OBJECT-TYPE
    SYNTAX      OCTET STRING
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION "The description."
    ::= { ifEntry 2 }"#,
    )
}

#[test]
fn table_row_column_inference() {
    let mib = resolve_source(&if_test_source());

    assert_eq!(mib.find_node("ifTable").unwrap().kind, NodeKind::Table);
    assert_eq!(mib.find_node("ifEntry").unwrap().kind, NodeKind::Row);
    assert_eq!(mib.find_node("ifIndex").unwrap().kind, NodeKind::Column);
    assert_eq!(mib.find_node("ifDescr").unwrap().kind, NodeKind::Column);

    // each node carries its object as payload
    let table_node = mib.find_node("ifTable").unwrap();
    let table_obj = mib.object_by_id(table_node.object.expect("table payload"));
    assert_eq!(table_obj.name, "ifTable");
    let index_node = mib.find_node("ifIndex").unwrap();
    assert!(index_node.object.is_some());

    let entry = mib.object("ifEntry").expect("ifEntry object");
    assert_eq!(entry.index.len(), 1);
    assert!(!entry.index[0].implied);
    assert_eq!(mib.object_by_id(entry.index[0].object).name, "ifIndex");
}

#[test]
fn augments_links_to_the_base_row() {
    let body = r#"IfEntry ::= SEQUENCE { ifIndex Integer32 }

ifTable OBJECT-TYPE
    SYNTAX      SEQUENCE OF IfEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    ::= { enterprises 90 1 }

ifEntry OBJECT-TYPE
    SYNTAX      IfEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    INDEX       { ifIndex }
    ::= { ifTable 1 }

ifIndex OBJECT-TYPE
    SYNTAX      Integer32
    MAX-ACCESS  read-only
    STATUS      current
    ::= { ifEntry 1 }

ExtEntry ::= SEQUENCE { extFlag Integer32 }

extTable OBJECT-TYPE
    SYNTAX      SEQUENCE OF ExtEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    ::= { enterprises 90 2 }

extEntry OBJECT-TYPE
    SYNTAX      ExtEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    AUGMENTS    { ifEntry }
    ::= { extTable 1 }

extFlag OBJECT-TYPE
    SYNTAX      Integer32
    MAX-ACCESS  read-write
    STATUS      current
    ::= { extEntry 1 }"#;
    let mib = resolve_source(&smiv2_module("AUG-TEST", "", body));

    let ext = mib.object("extEntry").expect("extEntry");
    assert_eq!(mib.find_node("extEntry").unwrap().kind, NodeKind::Row);
    let base = ext.augments.expect("augments resolved");
    assert_eq!(mib.object_by_id(base).name, "ifEntry");
}

#[test]
fn unresolved_index_is_reported() {
    let body = r#"BadEntry ::= SEQUENCE { badIndex Integer32 }

badTable OBJECT-TYPE
    SYNTAX      SEQUENCE OF BadEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    ::= { enterprises 91 1 }

badEntry OBJECT-TYPE
    SYNTAX      BadEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    INDEX       { noSuchObject }
    ::= { badTable 1 }"#;
    let mib = resolve_source(&smiv2_module("BAD-INDEX", "", body));
    assert!(has_diag(&mib, "index-unresolved"));
    assert!(mib
        .unresolved()
        .iter()
        .any(|u| u.kind == rmib::UnresolvedKind::Index && u.symbol == "noSuchObject"));
}

#[test]
fn object_constraint_beats_inherited_constraint() {
    let body = r#"narrow OBJECT-TYPE
    SYNTAX      DisplayString (SIZE (1..32))
    MAX-ACCESS  read-only
    STATUS      current
    ::= { enterprises 92 1 }

wide OBJECT-TYPE
    SYNTAX      DisplayString
    MAX-ACCESS  read-only
    STATUS      current
    ::= { enterprises 92 2 }"#;
    let source = smiv2_module("SIZE-TEST", "", body).replace(
        "FROM SNMPv2-SMI;",
        "FROM SNMPv2-SMI\n    DisplayString FROM SNMPv2-TC;",
    );
    let mib = resolve_source(&source);
    assert!(!mib.has_errors(), "diagnostics: {:?}", mib.diagnostics());

    let own = RangeItem { low: RangeEndpoint::Signed(1), high: RangeEndpoint::Signed(32) };
    let inherited = RangeItem { low: RangeEndpoint::Signed(0), high: RangeEndpoint::Signed(255) };

    // the object's own SIZE wins
    assert_eq!(mib.object("narrow").unwrap().effective_sizes, vec![own]);
    // with no inline constraint, the chain supplies DisplayString's SIZE
    assert_eq!(mib.object("wide").unwrap().effective_sizes, vec![inherited]);
}

#[test]
fn enums_inherit_from_the_type_chain() {
    let body = r#"adminFlag OBJECT-TYPE
    SYNTAX      TruthValue
    MAX-ACCESS  read-write
    STATUS      current
    ::= { enterprises 93 1 }"#;
    let source = smiv2_module("ENUM-TEST", "", body).replace(
        "FROM SNMPv2-SMI;",
        "FROM SNMPv2-SMI\n    TruthValue FROM SNMPv2-TC;",
    );
    let mib = resolve_source(&source);
    let flag = mib.object("adminFlag").expect("adminFlag");
    let labels: Vec<&str> = flag.effective_enums.iter().map(|nn| nn.name.as_str()).collect();
    assert_eq!(labels, vec!["true", "false"]);
}

#[test]
fn defval_identifier_on_oid_syntax_becomes_an_oid() {
    let body = r#"pointer OBJECT-TYPE
    SYNTAX      RowPointer
    MAX-ACCESS  read-write
    STATUS      current
    DEFVAL      { zeroDotZero }
    ::= { enterprises 94 1 }

state OBJECT-TYPE
    SYNTAX      INTEGER { up(1), down(2) }
    MAX-ACCESS  read-write
    STATUS      current
    DEFVAL      { up }
    ::= { enterprises 94 2 }"#;
    let source = smiv2_module("DEFVAL-TEST", ", zeroDotZero", body).replace(
        "FROM SNMPv2-SMI;",
        "FROM SNMPv2-SMI\n    RowPointer FROM SNMPv2-TC;",
    );
    let mib = resolve_source(&source);
    assert!(!mib.has_errors(), "diagnostics: {:?}", mib.diagnostics());

    // OID-typed syntax reinterprets the bare identifier as a node reference
    let pointer = mib.object("pointer").unwrap();
    assert_eq!(pointer.defval, Some(DefValue::Oid(Oid::from([0, 0]))));

    // enum-typed syntax keeps the label
    let state = mib.object("state").unwrap();
    assert!(matches!(&state.defval, Some(DefValue::Enum(label)) if *label == "up"));
}

#[test]
fn defval_hex_and_binary_decode() {
    let body = r#"blob OBJECT-TYPE
    SYNTAX      OCTET STRING
    MAX-ACCESS  read-write
    STATUS      current
    DEFVAL      { 'ff001'H }
    ::= { enterprises 95 1 }

bits OBJECT-TYPE
    SYNTAX      OCTET STRING
    MAX-ACCESS  read-write
    STATUS      current
    DEFVAL      { '101'B }
    ::= { enterprises 95 2 }"#;
    let mib = resolve_source(&smiv2_module("BYTES-TEST", "", body));
    // odd-length hex gets a leading zero digit
    assert_eq!(
        mib.object("blob").unwrap().defval,
        Some(DefValue::Bytes(vec![0x0f, 0xf0, 0x01]))
    );
    // binary pads to a whole byte
    assert_eq!(mib.object("bits").unwrap().defval, Some(DefValue::Bytes(vec![0b101])));
}
