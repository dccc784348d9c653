//! The seven synthetic base modules.
//!
//! These are built from code, never parsed, and are prepended to every
//! resolve so user modules can bind `Integer32`, `enterprises`,
//! `DisplayString` and friends.  They carry the well-known OID roots, the
//! SMI application types, and the standard textual conventions.

use std::sync::{Arc, RwLock};

use crate::ident::Ident;
use crate::module::*;
use crate::pos::{LineTable, Span};

pub const SNMPV2_SMI: &str = "SNMPv2-SMI";
pub const SNMPV2_TC: &str = "SNMPv2-TC";
pub const SNMPV2_CONF: &str = "SNMPv2-CONF";
pub const RFC1155_SMI: &str = "RFC1155-SMI";
pub const RFC1065_SMI: &str = "RFC1065-SMI";
pub const RFC_1212: &str = "RFC-1212";
pub const RFC_1215: &str = "RFC-1215";

pub const BASE_MODULE_NAMES: [&str; 7] = [
    SNMPV2_SMI,
    SNMPV2_TC,
    SNMPV2_CONF,
    RFC1155_SMI,
    RFC1065_SMI,
    RFC_1212,
    RFC_1215,
];

pub fn is_base_module(name: &str) -> bool {
    BASE_MODULE_NAMES.contains(&name)
}

/// The SMIv2 base modules; importing from any of these marks a module SMIv2.
pub fn is_smiv2_base_module(name: &str) -> bool {
    matches!(name, SNMPV2_SMI | SNMPV2_TC | SNMPV2_CONF)
}

/// The well-known tree roots that need no parent.
pub fn is_well_known_root(name: &str) -> bool {
    matches!(name, "ccitt" | "iso" | "joint-iso-ccitt")
}

/// Names defined at the top of the SNMPv2-SMI skeleton.  Permissive mode
/// lets an OID definition hang off these even without an import.
pub fn is_smi_global_root(name: &str) -> bool {
    matches!(
        name,
        "org"
            | "dod"
            | "internet"
            | "directory"
            | "mgmt"
            | "mib-2"
            | "transmission"
            | "experimental"
            | "private"
            | "enterprises"
            | "security"
            | "snmpV2"
            | "snmpDomains"
            | "snmpProxys"
            | "snmpModules"
            | "snmp"
    )
}

// =============================================================================
// process-wide cache

static BASE_CACHE: RwLock<Option<Arc<Vec<Module>>>> = RwLock::new(None);

/// The base modules, built once per process.
///
/// Reads take the shared lock; the first caller populates the cache under
/// the write lock with a second existence check in case another thread got
/// there first.
pub fn base_modules() -> Arc<Vec<Module>> {
    if let Some(modules) = BASE_CACHE.read().expect("base cache poisoned").as_ref() {
        return Arc::clone(modules);
    }
    let mut slot = BASE_CACHE.write().expect("base cache poisoned");
    if let Some(modules) = slot.as_ref() {
        return Arc::clone(modules);
    }
    let built = Arc::new(build_base_modules());
    *slot = Some(Arc::clone(&built));
    built
}

pub fn base_module_from_name(name: &str) -> Option<Module> {
    base_modules().iter().find(|m| m.name == *name).cloned()
}

// =============================================================================
// construction

fn build_base_modules() -> Vec<Module> {
    vec![
        snmpv2_smi(),
        snmpv2_tc(),
        empty_module(SNMPV2_CONF, Language::Smiv2),
        rfc_smi(RFC1155_SMI),
        rfc_smi(RFC1065_SMI),
        empty_module(RFC_1212, Language::Smiv1),
        empty_module(RFC_1215, Language::Smiv1),
    ]
}

fn empty_module(name: &str, language: Language) -> Module {
    Module {
        name: Ident::new_unchecked(name),
        language,
        imports: Vec::new(),
        definitions: Vec::new(),
        span: Span::NULL,
        diagnostics: Vec::new(),
        line_table: LineTable::default(),
    }
}

fn snmpv2_smi() -> Module {
    let mut module = empty_module(SNMPV2_SMI, Language::Smiv2);
    module.definitions = vec![
        // tree roots
        value_def("ccitt", &[num(0)]),
        value_def("iso", &[num(1)]),
        value_def("joint-iso-ccitt", &[num(2)]),
        value_def("org", &[name("iso"), num(3)]),
        value_def("dod", &[name("org"), num(6)]),
        value_def("internet", &[name("dod"), num(1)]),
        value_def("directory", &[name("internet"), num(1)]),
        value_def("mgmt", &[name("internet"), num(2)]),
        value_def("mib-2", &[name("mgmt"), num(1)]),
        value_def("transmission", &[name("mib-2"), num(10)]),
        value_def("experimental", &[name("internet"), num(3)]),
        value_def("private", &[name("internet"), num(4)]),
        value_def("enterprises", &[name("private"), num(1)]),
        value_def("security", &[name("internet"), num(5)]),
        value_def("snmpV2", &[name("internet"), num(6)]),
        value_def("snmpDomains", &[name("snmpV2"), num(1)]),
        value_def("snmpProxys", &[name("snmpV2"), num(2)]),
        value_def("snmpModules", &[name("snmpV2"), num(3)]),
        value_def("snmp", &[name("mib-2"), num(11)]),
        value_def("zeroDotZero", &[num(0), num(0)]),
        // application and integer types
        type_def("Integer32", int_range(-2_147_483_648, 2_147_483_647), BaseType::Integer32),
        type_def("Counter32", uint32_range(), BaseType::Counter32),
        type_def("Gauge32", uint32_range(), BaseType::Gauge32),
        type_def("Unsigned32", uint32_range(), BaseType::Unsigned32),
        type_def("TimeTicks", uint32_range(), BaseType::TimeTicks),
        type_def("Counter64", uint64_range(), BaseType::Counter64),
        type_def("IpAddress", octets_sized(4, 4), BaseType::IpAddress),
        type_def("Opaque", TypeSyntax::OctetString, BaseType::Opaque),
        type_def("ObjectName", TypeSyntax::ObjectIdentifier, BaseType::ObjectIdentifier),
        type_def("NotificationName", TypeSyntax::ObjectIdentifier, BaseType::ObjectIdentifier),
        type_def("ExtUTCTime", octets_sizes(&[(11, 11), (13, 13)]), BaseType::OctetString),
        // CHOICE meta-types; nothing derives meaning from them
        type_def("ObjectSyntax", TypeSyntax::OctetString, BaseType::Unknown),
        type_def("SimpleSyntax", TypeSyntax::OctetString, BaseType::Unknown),
        type_def("ApplicationSyntax", TypeSyntax::OctetString, BaseType::Unknown),
    ];
    module
}

fn snmpv2_tc() -> Module {
    let mut module = empty_module(SNMPV2_TC, Language::Smiv2);
    module.imports = vec![Import {
        module: Ident::new_unchecked(SNMPV2_SMI),
        symbol: Ident::new_unchecked("TimeTicks"),
        span: Span::NULL,
    }];
    module.definitions = vec![
        tc("DisplayString", Some("255a"), "current", octets_sized(0, 255)),
        tc("PhysAddress", Some("1x:"), "current", TypeSyntax::OctetString),
        tc("MacAddress", Some("1x:"), "current", octets_sized(6, 6)),
        tc("TruthValue", None, "current", int_enum(&[("true", 1), ("false", 2)])),
        tc("TestAndIncr", None, "current", int_range(0, 2_147_483_647)),
        tc("AutonomousType", None, "current", TypeSyntax::ObjectIdentifier),
        tc("InstancePointer", None, "obsolete", TypeSyntax::ObjectIdentifier),
        tc("VariablePointer", None, "current", TypeSyntax::ObjectIdentifier),
        tc("RowPointer", None, "current", TypeSyntax::ObjectIdentifier),
        tc(
            "RowStatus",
            None,
            "current",
            int_enum(&[
                ("active", 1),
                ("notInService", 2),
                ("notReady", 3),
                ("createAndGo", 4),
                ("createAndWait", 5),
                ("destroy", 6),
            ]),
        ),
        tc("TimeStamp", None, "current", type_ref("TimeTicks")),
        tc("TimeInterval", None, "current", int_range(0, 2_147_483_647)),
        tc(
            "DateAndTime",
            Some("2d-1d-1d,1d:1d:1d.1d,1a1d:1d"),
            "current",
            octets_sizes(&[(8, 8), (11, 11)]),
        ),
        tc(
            "StorageType",
            None,
            "current",
            int_enum(&[
                ("other", 1),
                ("volatile", 2),
                ("nonVolatile", 3),
                ("permanent", 4),
                ("readOnly", 5),
            ]),
        ),
        tc("TDomain", None, "current", TypeSyntax::ObjectIdentifier),
        tc("TAddress", None, "current", octets_sized(1, 255)),
    ];
    module
}

/// RFC1155-SMI and its earlier twin RFC1065-SMI: the SMIv1 skeleton through
/// `enterprises` plus the v1 type aliases.
fn rfc_smi(module_name: &str) -> Module {
    let mut module = empty_module(module_name, Language::Smiv1);
    module.definitions = vec![
        value_def("org", &[name("iso"), num(3)]),
        value_def("dod", &[name("org"), num(6)]),
        value_def("internet", &[name("dod"), num(1)]),
        value_def("directory", &[name("internet"), num(1)]),
        value_def("mgmt", &[name("internet"), num(2)]),
        value_def("experimental", &[name("internet"), num(3)]),
        value_def("private", &[name("internet"), num(4)]),
        value_def("enterprises", &[name("private"), num(1)]),
        type_def("Counter", uint32_range(), BaseType::Counter32),
        type_def("Gauge", uint32_range(), BaseType::Gauge32),
        type_def("TimeTicks", uint32_range(), BaseType::TimeTicks),
        type_def("IpAddress", octets_sized(4, 4), BaseType::IpAddress),
        type_def("Opaque", TypeSyntax::OctetString, BaseType::Opaque),
        // `CHOICE { internet IpAddress }`, already flattened
        type_def("NetworkAddress", type_ref("IpAddress"), BaseType::IpAddress),
        type_def("ObjectName", TypeSyntax::ObjectIdentifier, BaseType::ObjectIdentifier),
    ];
    module
}

// =============================================================================
// builders

fn ident(text: &str) -> Ident {
    Ident::new_unchecked(text)
}

fn num(n: u32) -> OidComponent {
    OidComponent::Number(n)
}

fn name(text: &str) -> OidComponent {
    OidComponent::Name(ident(text))
}

fn value_def(def_name: &str, components: &[OidComponent]) -> Definition {
    Definition {
        name: sp!(ident(def_name)),
        kind: DefKind::ValueAssignment(ValueAssignment {
            oid: OidAssignment {
                components: components.iter().cloned().map(|c| sp!(c)).collect(),
                span: Span::NULL,
            },
        }),
    }
}

fn type_def(def_name: &str, syntax: TypeSyntax, base: BaseType) -> Definition {
    Definition {
        name: sp!(ident(def_name)),
        kind: DefKind::TypeDef(TypeDef {
            syntax,
            is_textual_convention: false,
            display_hint: None,
            status: None,
            description: None,
            reference: None,
            base_override: Some(base),
        }),
    }
}

fn tc(def_name: &str, hint: Option<&str>, status: &str, syntax: TypeSyntax) -> Definition {
    Definition {
        name: sp!(ident(def_name)),
        kind: DefKind::TypeDef(TypeDef {
            syntax,
            is_textual_convention: true,
            display_hint: hint.map(str::to_owned),
            status: Some(sp!(status.to_owned())),
            description: None,
            reference: None,
            base_override: None,
        }),
    }
}

fn type_ref(type_name: &str) -> TypeSyntax {
    TypeSyntax::TypeRef(sp!(ident(type_name)))
}

fn int_range(low: i64, high: i64) -> TypeSyntax {
    TypeSyntax::Constrained {
        base: Box::new(type_ref("INTEGER")),
        constraint: Constraint::Range(vec![RangeItem {
            low: RangeEndpoint::Signed(low),
            high: RangeEndpoint::Signed(high),
        }]),
    }
}

fn uint32_range() -> TypeSyntax {
    int_range(0, u32::MAX as i64)
}

fn uint64_range() -> TypeSyntax {
    TypeSyntax::Constrained {
        base: Box::new(type_ref("INTEGER")),
        constraint: Constraint::Range(vec![RangeItem {
            low: RangeEndpoint::Signed(0),
            high: RangeEndpoint::Unsigned(u64::MAX),
        }]),
    }
}

fn octets_sized(low: i64, high: i64) -> TypeSyntax {
    octets_sizes(&[(low, high)])
}

fn octets_sizes(sizes: &[(i64, i64)]) -> TypeSyntax {
    TypeSyntax::Constrained {
        base: Box::new(TypeSyntax::OctetString),
        constraint: Constraint::Size(
            sizes
                .iter()
                .map(|&(low, high)| RangeItem {
                    low: RangeEndpoint::Signed(low),
                    high: RangeEndpoint::Signed(high),
                })
                .collect(),
        ),
    }
}

fn int_enum(values: &[(&str, i64)]) -> TypeSyntax {
    TypeSyntax::IntegerEnum {
        base: None,
        named_numbers: values
            .iter()
            .map(|&(enum_name, value)| NamedNumber { name: ident(enum_name), value })
            .collect(),
    }
}
