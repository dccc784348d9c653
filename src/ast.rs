//! The raw parse tree.
//!
//! This stays close to the source text: clause values like access and status
//! are kept as the exact words that appeared, and nothing is resolved or
//! unified across SMI versions.  Lowering turns this into the normalized
//! [`module::Module`][crate::module::Module] form.

use crate::ident::Ident;
use crate::pos::{Span, Sp};

/// Everything parsed out of one source file.  Real-world files occasionally
/// concatenate several modules.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Root {
    pub modules: Vec<Sp<ModuleAst>>,
}

/// `NAME DEFINITIONS ::= BEGIN ... END`
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleAst {
    pub name: Sp<Ident>,
    pub imports: Vec<ImportClause>,
    pub definitions: Vec<Sp<Definition>>,
}

/// One `symbols FROM module` group of an IMPORTS statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportClause {
    pub symbols: Vec<Sp<Ident>>,
    pub module: Sp<Ident>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: Sp<Ident>,
    pub body: DefBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefBody {
    ObjectType(ObjectTypeBody),
    ModuleIdentity(ModuleIdentityBody),
    ObjectIdentity(ObjectIdentityBody),
    NotificationType(NotificationTypeBody),
    TrapType(TrapTypeBody),
    ObjectGroup(ObjectGroupBody),
    NotificationGroup(NotificationGroupBody),
    ModuleCompliance(ModuleComplianceBody),
    AgentCapabilities(AgentCapabilitiesBody),
    TypeAssignment(TypeAssignmentBody),
    ValueAssignment(ValueAssignmentBody),
}

impl Definition {
    pub fn descr(&self) -> &'static str {
        match self.body {
            DefBody::ObjectType(_) => "OBJECT-TYPE",
            DefBody::ModuleIdentity(_) => "MODULE-IDENTITY",
            DefBody::ObjectIdentity(_) => "OBJECT-IDENTITY",
            DefBody::NotificationType(_) => "NOTIFICATION-TYPE",
            DefBody::TrapType(_) => "TRAP-TYPE",
            DefBody::ObjectGroup(_) => "OBJECT-GROUP",
            DefBody::NotificationGroup(_) => "NOTIFICATION-GROUP",
            DefBody::ModuleCompliance(_) => "MODULE-COMPLIANCE",
            DefBody::AgentCapabilities(_) => "AGENT-CAPABILITIES",
            DefBody::TypeAssignment(_) => "type assignment",
            DefBody::ValueAssignment(_) => "value assignment",
        }
    }
}

// =============================================================================
// macro bodies

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTypeBody {
    pub syntax: Sp<SyntaxAst>,
    pub units: Option<Sp<String>>,
    /// Value of MAX-ACCESS / ACCESS / PIB-ACCESS, verbatim.
    pub access: Option<Sp<String>>,
    pub status: Option<Sp<String>>,
    pub description: Option<Sp<String>>,
    pub reference: Option<Sp<String>>,
    pub index: Vec<Sp<IndexEntryAst>>,
    pub augments: Option<Sp<Ident>>,
    pub defval: Option<Sp<DefValAst>>,
    pub oid: Sp<OidAst>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntryAst {
    pub implied: bool,
    pub name: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleIdentityBody {
    pub last_updated: Option<Sp<String>>,
    pub organization: Option<Sp<String>>,
    pub contact_info: Option<Sp<String>>,
    pub description: Option<Sp<String>>,
    pub revisions: Vec<RevisionAst>,
    pub oid: Sp<OidAst>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevisionAst {
    pub date: Sp<String>,
    pub description: Option<Sp<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectIdentityBody {
    pub status: Option<Sp<String>>,
    pub description: Option<Sp<String>>,
    pub reference: Option<Sp<String>>,
    pub oid: Sp<OidAst>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationTypeBody {
    pub objects: Vec<Sp<Ident>>,
    pub status: Option<Sp<String>>,
    pub description: Option<Sp<String>>,
    pub reference: Option<Sp<String>>,
    pub oid: Sp<OidAst>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrapTypeBody {
    pub enterprise: Sp<EnterpriseRef>,
    pub variables: Vec<Sp<Ident>>,
    pub description: Option<Sp<String>>,
    pub reference: Option<Sp<String>>,
    pub number: Sp<u32>,
}

/// The ENTERPRISE clause of a TRAP-TYPE is nearly always a name, but the
/// grammar also admits an explicit OID value.
#[derive(Debug, Clone, PartialEq)]
pub enum EnterpriseRef {
    Name(Ident),
    Oid(OidAst),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectGroupBody {
    pub objects: Vec<Sp<Ident>>,
    pub status: Option<Sp<String>>,
    pub description: Option<Sp<String>>,
    pub reference: Option<Sp<String>>,
    pub oid: Sp<OidAst>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationGroupBody {
    pub notifications: Vec<Sp<Ident>>,
    pub status: Option<Sp<String>>,
    pub description: Option<Sp<String>>,
    pub reference: Option<Sp<String>>,
    pub oid: Sp<OidAst>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleComplianceBody {
    pub status: Option<Sp<String>>,
    pub description: Option<Sp<String>>,
    pub reference: Option<Sp<String>>,
    pub modules: Vec<ComplianceModuleAst>,
    pub oid: Sp<OidAst>,
}

/// One `MODULE [name]` section of a MODULE-COMPLIANCE.  A missing name
/// refers to the defining module itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceModuleAst {
    pub module: Option<Sp<Ident>>,
    pub mandatory_groups: Vec<Sp<Ident>>,
    pub requirements: Vec<ComplianceRequirementAst>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComplianceRequirementAst {
    Group {
        name: Sp<Ident>,
        description: Option<Sp<String>>,
    },
    Object {
        name: Sp<Ident>,
        syntax: Option<Sp<SyntaxAst>>,
        write_syntax: Option<Sp<SyntaxAst>>,
        min_access: Option<Sp<String>>,
        description: Option<Sp<String>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentCapabilitiesBody {
    pub product_release: Option<Sp<String>>,
    pub status: Option<Sp<String>>,
    pub description: Option<Sp<String>>,
    pub reference: Option<Sp<String>>,
    pub supports: Vec<SupportsAst>,
    pub oid: Sp<OidAst>,
}

/// One `SUPPORTS module INCLUDES { groups } VARIATION ...` section.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportsAst {
    pub module: Sp<Ident>,
    pub includes: Vec<Sp<Ident>>,
    pub variations: Vec<VariationAst>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariationAst {
    pub name: Sp<Ident>,
    pub syntax: Option<Sp<SyntaxAst>>,
    pub write_syntax: Option<Sp<SyntaxAst>>,
    pub access: Option<Sp<String>>,
    pub creation_requires: Vec<Sp<Ident>>,
    pub defval: Option<Sp<DefValAst>>,
    pub description: Option<Sp<String>>,
}

/// `Name ::= syntax`, optionally through TEXTUAL-CONVENTION.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAssignmentBody {
    pub is_textual_convention: bool,
    pub display_hint: Option<Sp<String>>,
    pub status: Option<Sp<String>>,
    pub description: Option<Sp<String>>,
    pub reference: Option<Sp<String>>,
    pub syntax: Sp<SyntaxAst>,
}

/// `name OBJECT IDENTIFIER ::= { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAssignmentBody {
    pub oid: Sp<OidAst>,
}

// =============================================================================
// syntax

#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxAst {
    /// A reference to a named type, optionally refined with named numbers
    /// (`Status { subset(1) }`).
    TypeRef {
        name: Sp<Ident>,
        named_numbers: Option<Vec<Sp<NamedNumberAst>>>,
    },
    /// `INTEGER { up(1), down(2) }`
    IntegerEnum { named_numbers: Vec<Sp<NamedNumberAst>> },
    /// `BITS { a(0), b(1) }`
    Bits { named_bits: Vec<Sp<NamedNumberAst>> },
    OctetString,
    ObjectIdentifier,
    SequenceOf { entry: Sp<Ident> },
    Sequence { fields: Vec<SequenceFieldAst> },
    Choice { alternatives: Vec<SequenceFieldAst> },
    Constrained {
        base: Box<Sp<SyntaxAst>>,
        constraint: Sp<ConstraintAst>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceFieldAst {
    pub name: Sp<Ident>,
    pub syntax: Sp<SyntaxAst>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedNumberAst {
    pub name: Sp<Ident>,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintAst {
    Size(Vec<RangeAst>),
    Range(Vec<RangeAst>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeAst {
    pub low: Sp<RangeEndpointAst>,
    /// Absent for single-value ranges.
    pub high: Option<Sp<RangeEndpointAst>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeEndpointAst {
    Signed(i64),
    Unsigned(u64),
    Min,
    Max,
}

// =============================================================================
// OID assignments and DEFVALs

#[derive(Debug, Clone, PartialEq)]
pub struct OidAst {
    pub components: Vec<Sp<OidComponentAst>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OidComponentAst {
    Name(Ident),
    Number(u32),
    NamedNumber(Ident, u32),
    QualifiedName(Ident, Ident),
    QualifiedNamedNumber(Ident, Ident, u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefValAst {
    Integer(i64),
    Unsigned(u64),
    Str(String),
    Hex(String),
    Bin(String),
    /// A bare identifier: enum label or OID reference.  The ambiguity is
    /// deliberately not settled here.
    Ident(Ident),
    Bits(Vec<Sp<Ident>>),
    OidValue(Vec<Sp<OidComponentAst>>),
    /// Something the parser could not make sense of but skipped cleanly.
    Unparsed,
}
