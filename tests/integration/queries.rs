use crate::integration_impl::*;

use rmib::mib::{GroupKind, NodeKind};
use rmib::Severity;

fn notif_source() -> String {
    let body = r#"alarmValue OBJECT-TYPE
    SYNTAX      Integer32
    MAX-ACCESS  read-only
    STATUS      current
    ::= { enterprises 4242 1 }

secretValue OBJECT-TYPE
    SYNTAX      Integer32
    MAX-ACCESS  not-accessible
    STATUS      current
    ::= { enterprises 4242 2 }

alarmRaised NOTIFICATION-TYPE
    OBJECTS     { alarmValue }
    STATUS      current
    DESCRIPTION "Raised."
    ::= { enterprises 4242 3 }

alarmGroup OBJECT-GROUP
    OBJECTS     { alarmValue, secretValue }
    STATUS      current
    DESCRIPTION "All alarm objects."
    ::= { enterprises 4242 4 }

alarmNotifications NOTIFICATION-GROUP
    NOTIFICATIONS { alarmRaised }
    STATUS      current
    DESCRIPTION "All alarm notifications."
    ::= { enterprises 4242 5 }"#;
    smiv2_module("NOTIF-MIB", "", body).replace(
        "NOTIFICATION-TYPE, Integer32,",
        "NOTIFICATION-TYPE, OBJECT-GROUP, NOTIFICATION-GROUP, Integer32,",
    )
}

#[test]
fn notification_objects_link_to_resolved_objects() {
    let mib = resolve_source(&notif_source());
    assert!(!mib.has_errors(), "diagnostics: {:?}", mib.diagnostics());

    let notif = mib.notification("alarmRaised").expect("alarmRaised");
    assert!(!notif.is_trap);
    assert_eq!(notif.oid.arcs(), &[1, 3, 6, 1, 4, 1, 4242, 3]);
    assert_eq!(notif.objects.len(), 1);
    let (name, object) = &notif.objects[0];
    assert_eq!(*name, "alarmValue");
    assert_eq!(mib.object_by_id(object.expect("linked")).name, "alarmValue");

    let notif_node = mib.find_node("alarmRaised").unwrap();
    assert_eq!(notif_node.kind, NodeKind::Notification);
    // the node points back at its notification, and nothing else
    let payload = mib.notification_by_id(notif_node.notification.expect("payload"));
    assert_eq!(payload.name, "alarmRaised");
    assert!(notif_node.object.is_none());
    assert_eq!(mib.notification_count(), 1);
}

#[test]
fn group_membership_and_accessibility_lint() {
    let mib = resolve_source(&notif_source());

    let groups = mib.groups();
    let object_group = groups.iter().find(|g| g.kind == GroupKind::Objects).unwrap();
    assert_eq!(object_group.name, "alarmGroup");
    assert_eq!(object_group.members.len(), 2);
    assert!(object_group.members.iter().all(|m| m.object.is_some()));

    let notif_group = groups.iter().find(|g| g.kind == GroupKind::Notifications).unwrap();
    assert!(notif_group.members[0].notification.is_some());

    // group nodes carry their group as payload
    let group_node = mib.find_node("alarmGroup").unwrap();
    assert_eq!(mib.group_by_id(group_node.group.expect("payload")).name, "alarmGroup");

    // a not-accessible OBJECT-GROUP member is a Minor finding
    assert!(diag_with_severity(&mib, "group-not-accessible", Severity::Minor));
}

#[test]
fn qualified_and_bare_lookups_agree() {
    let source = smiv2_module(
        "Q-MIB",
        "",
        r#"unique OBJECT-TYPE
    SYNTAX      Integer32
    MAX-ACCESS  read-only
    STATUS      current
    ::= { enterprises 4242 9 }"#,
    );
    let mib = resolve_source(&source);

    let bare = mib.find_node("unique").expect("bare");
    let qualified = mib.find_node("Q-MIB::unique").expect("qualified");
    assert_eq!(bare.oid, qualified.oid);

    let object = mib.object("unique").unwrap();
    let by_qualified = mib.object_by_qualified("Q-MIB::unique").unwrap();
    assert_eq!(object.oid, by_qualified.oid);

    assert!(mib.find_node("NO-SUCH::unique").is_none());
    assert!(mib.object_by_qualified("Q-MIB::nothing").is_none());
}

#[test]
fn type_lookup_by_plain_and_qualified_name() {
    let mib = resolve_source("");
    let plain = mib.type_by_name("DisplayString").expect("plain");
    assert_eq!(plain.display_hint.as_deref(), Some("255a"));
    let qualified = mib.find_type("SNMPv2-TC::DisplayString").expect("qualified");
    assert_eq!(qualified.name, plain.name);
    assert!(plain.is_textual_convention);
    assert!(mib.find_type("SNMPv2-SMI::Counter64").is_some());
    assert!(mib.find_type("SNMPv2-TC::NoSuchTC").is_none());
}

#[test]
fn counts_track_contents() {
    let mib = resolve_source(&notif_source());
    assert_eq!(mib.module_count(), 8);
    // alarmValue + secretValue from the user module
    assert!(mib.object_count() >= 2);
    assert_eq!(mib.notification_count(), 1);
    assert!(mib.node_count() >= 10);
    assert!(mib.type_count() >= 20);

    assert_eq!(mib.modules().len(), mib.module_count());
    assert_eq!(mib.objects().len(), mib.object_count());
    assert_eq!(mib.types().len(), mib.type_count());
}

#[test]
fn module_identity_metadata_is_copied() {
    let mib = resolve_source(&notif_source());
    let module = mib.module("NOTIF-MIB").expect("module");
    assert_eq!(module.organization.as_deref(), Some("Test"));
    assert_eq!(module.last_updated.as_deref(), Some("202401010000Z"));
    assert_eq!(module.revisions.len(), 1);
    // the MODULE-IDENTITY OID lands on the resolved module
    assert_eq!(module.oid.as_ref().unwrap().arcs(), &[1, 3, 6, 1, 4, 1, 4242]);
}
