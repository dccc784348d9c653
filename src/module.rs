//! The normalized module form: the resolver's input.
//!
//! Lowering produces these from the raw AST.  SMIv1 and SMIv2 constructs are
//! unified (`TRAP-TYPE` and `NOTIFICATION-TYPE` are both [`Notification`];
//! `TEXTUAL-CONVENTION` and plain type assignments are both [`TypeDef`]),
//! but source-level wording like access and status is preserved verbatim —
//! the semantics phase is the one place that interprets it.

use crate::diagnostic::Diagnostic;
use crate::ident::Ident;
use crate::pos::{LineTable, Span, Sp};

/// The SMI dialect a module is written in, detected from its imports.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Unknown,
    Smiv1,
    Smiv2,
    Sppi,
}

impl Language {
    /// Preference rank for OID conflict resolution: SMIv2 beats SMIv1 beats
    /// anything else.
    pub fn rank(self) -> u8 {
        match self {
            Language::Smiv2 => 2,
            Language::Smiv1 => 1,
            Language::Unknown | Language::Sppi => 0,
        }
    }

    pub fn descr(self) -> &'static str {
        match self {
            Language::Unknown => "unknown",
            Language::Smiv1 => "SMIv1",
            Language::Smiv2 => "SMIv2",
            Language::Sppi => "SPPI",
        }
    }
}

/// A lowered, normalized MIB module.
#[derive(Debug, Clone)]
pub struct Module {
    pub name: Ident,
    pub language: Language,
    pub imports: Vec<Import>,
    pub definitions: Vec<Definition>,
    pub span: Span,
    /// Diagnostics attached during parsing and lowering, already converted
    /// to (line, column) form.
    pub diagnostics: Vec<Diagnostic>,
    pub line_table: LineTable,
}

impl Module {
    /// Convert a span into this module to a 1-based (line, column).
    /// The null span maps to (0, 0).
    pub fn location(&self, span: Span) -> (u32, u32) {
        if span.is_null() {
            return (0, 0);
        }
        self.line_table.location(span.start)
    }

    pub fn identity(&self) -> Option<&ModuleIdentity> {
        self.definitions.iter().find_map(|def| match &def.kind {
            DefKind::ModuleIdentity(identity) => Some(identity),
            _ => None,
        })
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.identity()?.last_updated.as_deref()
    }
}

/// One imported symbol.  Grouped IMPORTS clauses are flattened in lowering,
/// one row per symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub module: Ident,
    pub symbol: Ident,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Definition {
    pub name: Sp<Ident>,
    pub kind: DefKind,
}

impl Definition {
    /// The OID assignment, if this definition carries one.  `TypeDef`s never
    /// do and SMIv1 traps derive theirs from the enterprise.
    pub fn oid(&self) -> Option<&OidAssignment> {
        match &self.kind {
            DefKind::ObjectType(d) => Some(&d.oid),
            DefKind::ModuleIdentity(d) => Some(&d.oid),
            DefKind::ObjectIdentity(d) => Some(&d.oid),
            DefKind::Notification(d) => d.oid.as_ref(),
            DefKind::ValueAssignment(d) => Some(&d.oid),
            DefKind::ObjectGroup(d) | DefKind::NotificationGroup(d) => Some(&d.oid),
            DefKind::ModuleCompliance(d) => Some(&d.oid),
            DefKind::AgentCapabilities(d) => Some(&d.oid),
            DefKind::TypeDef(_) => None,
        }
    }

    pub fn descr(&self) -> &'static str {
        match &self.kind {
            DefKind::ObjectType(_) => "object type",
            DefKind::ModuleIdentity(_) => "module identity",
            DefKind::ObjectIdentity(_) => "object identity",
            DefKind::Notification(_) => "notification",
            DefKind::TypeDef(_) => "type",
            DefKind::ValueAssignment(_) => "value assignment",
            DefKind::ObjectGroup(_) => "object group",
            DefKind::NotificationGroup(_) => "notification group",
            DefKind::ModuleCompliance(_) => "module compliance",
            DefKind::AgentCapabilities(_) => "agent capabilities",
        }
    }
}

#[derive(Debug, Clone)]
pub enum DefKind {
    ObjectType(ObjectType),
    ModuleIdentity(ModuleIdentity),
    ObjectIdentity(ObjectIdentity),
    Notification(Notification),
    TypeDef(TypeDef),
    ValueAssignment(ValueAssignment),
    ObjectGroup(Group),
    NotificationGroup(Group),
    ModuleCompliance(ModuleCompliance),
    AgentCapabilities(AgentCapabilities),
}

#[derive(Debug, Clone)]
pub struct ObjectType {
    pub syntax: TypeSyntax,
    pub units: Option<String>,
    /// Access keyword verbatim (`read-only`, `mandatory`-era forms intact).
    pub access: Option<Sp<String>>,
    /// Status keyword verbatim.
    pub status: Option<Sp<String>>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub index: Vec<IndexEntry>,
    pub augments: Option<Sp<Ident>>,
    pub defval: Option<DefVal>,
    pub oid: OidAssignment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub name: Sp<Ident>,
    pub implied: bool,
}

#[derive(Debug, Clone)]
pub struct ModuleIdentity {
    pub last_updated: Option<String>,
    pub organization: Option<String>,
    pub contact_info: Option<String>,
    pub description: Option<String>,
    pub revisions: Vec<Revision>,
    pub oid: OidAssignment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Revision {
    pub date: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ObjectIdentity {
    pub status: Option<Sp<String>>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub oid: OidAssignment,
}

/// A unified notification: SMIv2 `NOTIFICATION-TYPE` (with `oid`, no
/// `trap`) or SMIv1 `TRAP-TYPE` (with `trap`, no `oid`).
#[derive(Debug, Clone)]
pub struct Notification {
    pub objects: Vec<Sp<Ident>>,
    pub status: Option<Sp<String>>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub oid: Option<OidAssignment>,
    pub trap: Option<TrapInfo>,
}

#[derive(Debug, Clone)]
pub struct TrapInfo {
    pub enterprise: EnterpriseRef,
    pub number: u32,
}

#[derive(Debug, Clone)]
pub enum EnterpriseRef {
    Name(Sp<Ident>),
    Oid(OidAssignment),
}

#[derive(Debug, Clone)]
pub struct TypeDef {
    pub syntax: TypeSyntax,
    pub is_textual_convention: bool,
    pub display_hint: Option<String>,
    pub status: Option<Sp<String>>,
    pub description: Option<String>,
    pub reference: Option<String>,
    /// Set only by the synthetic base modules, for types whose base cannot
    /// be derived from syntax (e.g. `IpAddress` is OCTET STRING on the wire
    /// but keeps application semantics).
    pub base_override: Option<BaseType>,
}

#[derive(Debug, Clone)]
pub struct ValueAssignment {
    pub oid: OidAssignment,
}

/// OBJECT-GROUP or NOTIFICATION-GROUP; `members` are objects for the former
/// and notifications for the latter.
#[derive(Debug, Clone)]
pub struct Group {
    pub members: Vec<Sp<Ident>>,
    pub status: Option<Sp<String>>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub oid: OidAssignment,
}

#[derive(Debug, Clone)]
pub struct ModuleCompliance {
    pub status: Option<Sp<String>>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub modules: Vec<ComplianceModule>,
    pub oid: OidAssignment,
}

#[derive(Debug, Clone)]
pub struct ComplianceModule {
    /// Absent when the section refers to the defining module itself.
    pub module: Option<Sp<Ident>>,
    pub mandatory_groups: Vec<Sp<Ident>>,
    pub requirements: Vec<ComplianceRequirement>,
}

#[derive(Debug, Clone)]
pub enum ComplianceRequirement {
    Group {
        name: Sp<Ident>,
        description: Option<String>,
    },
    Object {
        name: Sp<Ident>,
        syntax: Option<TypeSyntax>,
        write_syntax: Option<TypeSyntax>,
        min_access: Option<String>,
        description: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct AgentCapabilities {
    pub product_release: Option<String>,
    pub status: Option<Sp<String>>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub supports: Vec<Supports>,
    pub oid: OidAssignment,
}

#[derive(Debug, Clone)]
pub struct Supports {
    pub module: Sp<Ident>,
    pub includes: Vec<Sp<Ident>>,
    pub variations: Vec<Variation>,
}

#[derive(Debug, Clone)]
pub struct Variation {
    pub name: Sp<Ident>,
    pub syntax: Option<TypeSyntax>,
    pub write_syntax: Option<TypeSyntax>,
    pub access: Option<String>,
    pub creation_requires: Vec<Sp<Ident>>,
    pub defval: Option<DefVal>,
    pub description: Option<String>,
}

// =============================================================================
// OID assignments

#[derive(Debug, Clone, PartialEq)]
pub struct OidAssignment {
    pub components: Vec<Sp<OidComponent>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OidComponent {
    Name(Ident),
    Number(u32),
    NamedNumber(Ident, u32),
    QualifiedName(Ident, Ident),
    QualifiedNamedNumber(Ident, Ident, u32),
}

// =============================================================================
// type syntax

/// Unresolved type syntax carried on definitions.  References stay by-name
/// until the type phase binds them.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSyntax {
    TypeRef(Sp<Ident>),
    /// `INTEGER { ... }`, or `SomeType { ... }` with `base` set.
    IntegerEnum {
        base: Option<Sp<Ident>>,
        named_numbers: Vec<NamedNumber>,
    },
    Bits {
        named_bits: Vec<NamedNumber>,
    },
    Constrained {
        base: Box<TypeSyntax>,
        constraint: Constraint,
    },
    SequenceOf {
        entry: Sp<Ident>,
    },
    Sequence {
        fields: Vec<(Sp<Ident>, TypeSyntax)>,
    },
    OctetString,
    ObjectIdentifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedNumber {
    pub name: Ident,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Size(Vec<RangeItem>),
    Range(Vec<RangeItem>),
}

impl Constraint {
    pub fn items(&self) -> &[RangeItem] {
        match self {
            Constraint::Size(items) | Constraint::Range(items) => items,
        }
    }
}

/// One range alternative; a single value is stored with `low == high`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RangeItem {
    pub low: RangeEndpoint,
    pub high: RangeEndpoint,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RangeEndpoint {
    Signed(i64),
    Unsigned(u64),
    Min,
    Max,
}

// =============================================================================
// base types and DEFVALs

/// The fixed set of types every resolved type chain bottoms out in.
///
/// The seven application types keep their semantics under derivation: a
/// type derived from `Counter32` stays a counter even though `Counter32`
/// itself is defined over `Integer32`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum BaseType {
    #[default]
    Unknown,
    Integer,
    OctetString,
    ObjectIdentifier,
    Bits,
    Integer32,
    Counter32,
    Gauge32,
    Unsigned32,
    TimeTicks,
    Counter64,
    IpAddress,
    Opaque,
}

impl BaseType {
    pub fn is_application(self) -> bool {
        matches!(
            self,
            BaseType::Counter32
                | BaseType::Counter64
                | BaseType::Gauge32
                | BaseType::Unsigned32
                | BaseType::TimeTicks
                | BaseType::IpAddress
                | BaseType::Opaque
        )
    }

    pub fn descr(self) -> &'static str {
        match self {
            BaseType::Unknown => "unknown",
            BaseType::Integer => "INTEGER",
            BaseType::OctetString => "OCTET STRING",
            BaseType::ObjectIdentifier => "OBJECT IDENTIFIER",
            BaseType::Bits => "BITS",
            BaseType::Integer32 => "Integer32",
            BaseType::Counter32 => "Counter32",
            BaseType::Gauge32 => "Gauge32",
            BaseType::Unsigned32 => "Unsigned32",
            BaseType::TimeTicks => "TimeTicks",
            BaseType::Counter64 => "Counter64",
            BaseType::IpAddress => "IpAddress",
            BaseType::Opaque => "Opaque",
        }
    }
}

impl std::fmt::Display for BaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.descr())
    }
}

/// A DEFVAL clause, normalized but not yet interpreted.  A bare identifier
/// stays [`DefVal::Enum`] until the semantics phase can consult the object's
/// resolved syntax to tell enum labels from OID references.
#[derive(Debug, Clone, PartialEq)]
pub enum DefVal {
    Integer(i64),
    Unsigned(u64),
    String(String),
    HexString(String),
    BinaryString(String),
    Enum(Ident),
    Bits(Vec<Ident>),
    OidRef(Ident),
    OidValue(Vec<Sp<OidComponent>>),
    Unparsed,
}
