//! The fully-resolved MIB: an OID trie with per-node semantic payloads, the
//! resolved module/object/type tables, and the public query surface.
//!
//! Everything here is built by [`resolve`][crate::resolve::resolve] and is
//! logically immutable afterwards; queries may run concurrently.

use std::collections::HashMap;

use enum_map::EnumMap;
use indexmap::IndexMap;

use crate::diagnostic::{Diagnostic, Severity};
use crate::ident::Ident;
use crate::module::{BaseType, Language, NamedNumber, RangeItem, Revision};
use crate::oid::Oid;

newtype_index! {
    /// Index of a node in the trie arena.  Index 0 is the pseudo-root.
    pub struct NodeId;
}
newtype_index! {
    pub struct ModuleId;
}
newtype_index! {
    pub struct ObjectId;
}
newtype_index! {
    pub struct TypeId;
}
newtype_index! {
    pub struct NotificationId;
}
newtype_index! {
    pub struct GroupId;
}
newtype_index! {
    pub struct ComplianceId;
}
newtype_index! {
    pub struct CapabilitiesId;
}

/// What a trie node is, as inferred from the definitions attached to it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[derive(strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
    /// An intermediate arc nothing declares.
    #[default]
    Internal,
    /// A plain OID value assignment or identity.
    Node,
    Scalar,
    Column,
    Row,
    Table,
    Notification,
    Group,
    Compliance,
    Capabilities,
}

/// Public access levels.  SMIv1 and SPPI wordings survive as their own
/// variants rather than being collapsed into the nearest SMIv2 meaning.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[derive(strum::Display)]
pub enum Access {
    #[default]
    #[strum(serialize = "unknown")]
    Unknown,
    #[strum(serialize = "not-accessible")]
    NotAccessible,
    #[strum(serialize = "accessible-for-notify")]
    AccessibleForNotify,
    #[strum(serialize = "read-only")]
    ReadOnly,
    #[strum(serialize = "read-write")]
    ReadWrite,
    #[strum(serialize = "write-only")]
    WriteOnly,
    #[strum(serialize = "read-create")]
    ReadCreate,
    #[strum(serialize = "not-implemented")]
    NotImplemented,
    #[strum(serialize = "install")]
    Install,
    #[strum(serialize = "install-notify")]
    InstallNotify,
    #[strum(serialize = "report-only")]
    ReportOnly,
}

impl Access {
    /// Map a verbatim source keyword.  Unrecognized words become `Unknown`;
    /// the parser has already complained about genuinely bad tokens.
    pub fn from_keyword(word: &str) -> Access {
        match word {
            "not-accessible" => Access::NotAccessible,
            "accessible-for-notify" => Access::AccessibleForNotify,
            "read-only" => Access::ReadOnly,
            "read-write" => Access::ReadWrite,
            "write-only" => Access::WriteOnly,
            "read-create" => Access::ReadCreate,
            "not-implemented" => Access::NotImplemented,
            "install" => Access::Install,
            "install-notify" => Access::InstallNotify,
            "report-only" => Access::ReportOnly,
            _ => Access::Unknown,
        }
    }

    pub fn is_readable(self) -> bool {
        matches!(self, Access::ReadOnly | Access::ReadWrite | Access::ReadCreate)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[derive(strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    Current,
    Deprecated,
    Obsolete,
    /// SMIv1 wording, preserved.
    Mandatory,
    /// SMIv1 wording, preserved.
    Optional,
    Unknown,
}

impl Status {
    pub fn from_keyword(word: &str) -> Status {
        match word {
            "current" => Status::Current,
            "deprecated" => Status::Deprecated,
            "obsolete" => Status::Obsolete,
            "mandatory" => Status::Mandatory,
            "optional" => Status::Optional,
            _ => Status::Unknown,
        }
    }
}

// =============================================================================
// trie nodes

/// One node of the OID trie.
///
/// The `module` back-pointer names the *preferred* defining module when
/// several declare the same OID; each of those modules still holds its own
/// entity in its module-local lists, so `node.object`'s module is not
/// guaranteed to equal `node.module`.
#[derive(Debug, Clone)]
pub struct Node {
    pub arc: u32,
    pub oid: Oid,
    pub name: Option<Ident>,
    pub kind: NodeKind,
    pub module: Option<ModuleId>,
    pub object: Option<ObjectId>,
    pub notification: Option<NotificationId>,
    pub group: Option<GroupId>,
    pub compliance: Option<ComplianceId>,
    pub capabilities: Option<CapabilitiesId>,
    pub parent: Option<NodeId>,
    /// Children, sorted by arc.
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(arc: u32, oid: Oid, parent: Option<NodeId>) -> Node {
        Node {
            arc,
            oid,
            name: None,
            kind: NodeKind::Internal,
            module: None,
            object: None,
            notification: None,
            group: None,
            compliance: None,
            capabilities: None,
            parent,
            children: Vec::new(),
        }
    }

    /// True when some definition (not just an arc on the way to one)
    /// declared this node.
    pub fn is_declared(&self) -> bool {
        self.kind != NodeKind::Internal
    }
}

// =============================================================================
// resolved entities

/// A resolved module.
#[derive(Debug, Clone)]
pub struct Module {
    pub name: Ident,
    pub language: Language,
    pub organization: Option<String>,
    pub contact_info: Option<String>,
    pub description: Option<String>,
    pub revisions: Vec<Revision>,
    pub last_updated: Option<String>,
    /// The MODULE-IDENTITY OID, when this module won the node.
    pub oid: Option<Oid>,
    pub objects: Vec<ObjectId>,
    pub types: Vec<TypeId>,
    pub notifications: Vec<NotificationId>,
    pub groups: Vec<GroupId>,
    pub compliances: Vec<ComplianceId>,
    pub capabilities: Vec<CapabilitiesId>,
    /// Module-local object lookup; two modules may own distinct `Object`
    /// instances at the same OID.
    pub(crate) object_names: IndexMap<String, ObjectId>,
}

impl Module {
    pub(crate) fn new(name: Ident, language: Language) -> Module {
        Module {
            name,
            language,
            organization: None,
            contact_info: None,
            description: None,
            revisions: Vec::new(),
            last_updated: None,
            oid: None,
            objects: Vec::new(),
            types: Vec::new(),
            notifications: Vec::new(),
            groups: Vec::new(),
            compliances: Vec::new(),
            capabilities: Vec::new(),
            object_names: IndexMap::new(),
        }
    }

    pub fn object_id(&self, name: &str) -> Option<ObjectId> {
        self.object_names.get(name).copied()
    }
}

/// A resolved type.
#[derive(Debug, Clone)]
pub struct Type {
    pub name: Ident,
    pub module: ModuleId,
    pub base: BaseType,
    pub parent: Option<TypeId>,
    pub is_textual_convention: bool,
    pub status: Status,
    pub display_hint: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub named_values: Vec<NamedNumber>,
    pub named_bits: Vec<NamedNumber>,
    pub sizes: Vec<RangeItem>,
    pub ranges: Vec<RangeItem>,
}

/// A resolved OBJECT-TYPE.
#[derive(Debug, Clone)]
pub struct Object {
    pub name: Ident,
    pub module: ModuleId,
    pub node: NodeId,
    pub oid: Oid,
    pub kind: NodeKind,
    pub access: Access,
    pub status: Status,
    pub description: Option<String>,
    pub units: Option<String>,
    pub reference: Option<String>,
    /// The referenced type name as written, kept even when unresolved.
    pub type_name: Option<Ident>,
    pub type_id: Option<TypeId>,
    pub effective_sizes: Vec<RangeItem>,
    pub effective_ranges: Vec<RangeItem>,
    pub effective_enums: Vec<NamedNumber>,
    pub effective_bits: Vec<NamedNumber>,
    pub defval: Option<DefValue>,
    pub index: Vec<IndexEntryRef>,
    pub augments: Option<ObjectId>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IndexEntryRef {
    pub object: ObjectId,
    pub implied: bool,
}

/// A fully-interpreted DEFVAL.
#[derive(Debug, Clone, PartialEq)]
pub enum DefValue {
    Integer(i64),
    Unsigned(u64),
    Text(String),
    /// Decoded from a hex or binary string.
    Bytes(Vec<u8>),
    Enum(Ident),
    Bits(Vec<Ident>),
    Oid(Oid),
    Unparsed,
}

/// A resolved notification (SMIv2 NOTIFICATION-TYPE or SMIv1 trap).
#[derive(Debug, Clone)]
pub struct Notification {
    pub name: Ident,
    pub module: ModuleId,
    pub node: NodeId,
    pub oid: Oid,
    pub status: Status,
    pub description: Option<String>,
    pub reference: Option<String>,
    /// Member objects by name, with the binding when it resolved.
    pub objects: Vec<(Ident, Option<ObjectId>)>,
    pub is_trap: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GroupKind {
    Objects,
    Notifications,
}

#[derive(Debug, Clone)]
pub struct Group {
    pub name: Ident,
    pub module: ModuleId,
    pub node: NodeId,
    pub oid: Oid,
    pub kind: GroupKind,
    pub status: Status,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub members: Vec<GroupMember>,
}

#[derive(Debug, Clone)]
pub struct GroupMember {
    pub name: Ident,
    pub object: Option<ObjectId>,
    pub notification: Option<NotificationId>,
}

#[derive(Debug, Clone)]
pub struct Compliance {
    pub name: Ident,
    pub module: ModuleId,
    pub node: NodeId,
    pub oid: Oid,
    pub status: Status,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub modules: Vec<ComplianceModuleRef>,
}

#[derive(Debug, Clone)]
pub struct ComplianceModuleRef {
    /// Absent when the section refers to the defining module itself.
    pub module: Option<Ident>,
    pub mandatory_groups: Vec<Ident>,
    pub groups: Vec<Ident>,
    pub objects: Vec<Ident>,
}

#[derive(Debug, Clone)]
pub struct Capabilities {
    pub name: Ident,
    pub module: ModuleId,
    pub node: NodeId,
    pub oid: Oid,
    pub product_release: Option<String>,
    pub status: Status,
    pub description: Option<String>,
    pub supports: Vec<CapabilitiesSupports>,
}

#[derive(Debug, Clone)]
pub struct CapabilitiesSupports {
    pub module: Ident,
    pub includes: Vec<Ident>,
}

/// A reference that failed to resolve, exposed as first-class data so
/// callers can report without scraping diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub kind: UnresolvedKind,
    pub symbol: String,
    pub module: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[derive(strum::Display)]
pub enum UnresolvedKind {
    #[strum(serialize = "import")]
    Import,
    #[strum(serialize = "type")]
    Type,
    #[strum(serialize = "oid")]
    Oid,
    #[strum(serialize = "index")]
    Index,
    #[strum(serialize = "notification-object")]
    NotificationObject,
}

// =============================================================================
// the Mib itself

#[derive(Debug, Default)]
pub struct Mib {
    nodes: Vec<Node>,
    modules: Vec<Module>,
    objects: Vec<Object>,
    types: Vec<Type>,
    notifications: Vec<Notification>,
    groups: Vec<Group>,
    compliances: Vec<Compliance>,
    capabilities: Vec<Capabilities>,
    /// Global name → node, first-listed module wins.
    name_index: IndexMap<String, NodeId>,
    /// Global type table, first-listed module wins.
    type_index: IndexMap<String, TypeId>,
    object_index: IndexMap<String, ObjectId>,
    notification_index: IndexMap<String, NotificationId>,
    module_index: HashMap<String, ModuleId>,
    unresolved: Vec<Unresolved>,
    diagnostics: Vec<Diagnostic>,
    severity_counts: EnumMap<Severity, usize>,
}

impl Mib {
    pub(crate) fn new() -> Mib {
        let mut mib = Mib::default();
        mib.nodes.push(Node::new(0, Oid::new(), None));
        mib
    }

    // ------------------------------------------------------------------
    // construction (resolver-only)

    pub(crate) fn pseudo_root(&self) -> NodeId {
        NodeId(0)
    }

    pub(crate) fn get_or_create_child(&mut self, parent: NodeId, arc: u32) -> NodeId {
        let search = self.nodes[parent.index()]
            .children
            .binary_search_by_key(&arc, |&child| self.nodes[child.index()].arc);
        match search {
            Ok(slot) => self.nodes[parent.index()].children[slot],
            Err(slot) => {
                let oid = self.nodes[parent.index()].oid.child(arc);
                let id = NodeId::from_index(self.nodes.len());
                self.nodes.push(Node::new(arc, oid, Some(parent)));
                self.nodes[parent.index()].children.insert(slot, id);
                id
            }
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn add_module(&mut self, module: Module) -> ModuleId {
        let id = ModuleId::from_index(self.modules.len());
        self.module_index.entry(module.name.to_string()).or_insert(id);
        self.modules.push(module);
        id
    }

    pub(crate) fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.modules[id.index()]
    }

    pub(crate) fn add_type(&mut self, ty: Type) -> TypeId {
        let id = TypeId::from_index(self.types.len());
        self.type_index.entry(ty.name.to_string()).or_insert(id);
        self.modules[ty.module.index()].types.push(id);
        self.types.push(ty);
        id
    }

    pub(crate) fn type_mut(&mut self, id: TypeId) -> &mut Type {
        &mut self.types[id.index()]
    }

    pub(crate) fn add_object(&mut self, object: Object) -> ObjectId {
        let id = ObjectId::from_index(self.objects.len());
        self.object_index.entry(object.name.to_string()).or_insert(id);
        let module = &mut self.modules[object.module.index()];
        module.objects.push(id);
        module.object_names.entry(object.name.to_string()).or_insert(id);
        self.objects.push(object);
        id
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> &mut Object {
        &mut self.objects[id.index()]
    }

    pub(crate) fn add_notification(&mut self, notification: Notification) -> NotificationId {
        let id = NotificationId::from_index(self.notifications.len());
        self.notification_index.entry(notification.name.to_string()).or_insert(id);
        self.modules[notification.module.index()].notifications.push(id);
        self.notifications.push(notification);
        id
    }

    pub(crate) fn add_group(&mut self, group: Group) -> GroupId {
        let id = GroupId::from_index(self.groups.len());
        self.modules[group.module.index()].groups.push(id);
        self.groups.push(group);
        id
    }

    pub(crate) fn add_compliance(&mut self, compliance: Compliance) -> ComplianceId {
        let id = ComplianceId::from_index(self.compliances.len());
        self.modules[compliance.module.index()].compliances.push(id);
        self.compliances.push(compliance);
        id
    }

    pub(crate) fn add_capabilities(&mut self, capabilities: Capabilities) -> CapabilitiesId {
        let id = CapabilitiesId::from_index(self.capabilities.len());
        self.modules[capabilities.module.index()].capabilities.push(id);
        self.capabilities.push(capabilities);
        id
    }

    pub(crate) fn register_name(&mut self, name: &Ident, node: NodeId) {
        self.name_index.entry(name.to_string()).or_insert(node);
    }

    pub(crate) fn push_unresolved(&mut self, kind: UnresolvedKind, symbol: &str, module: &str) {
        self.unresolved.push(Unresolved {
            kind,
            symbol: symbol.to_owned(),
            module: module.to_owned(),
        });
    }

    pub(crate) fn set_diagnostics(
        &mut self,
        diagnostics: Vec<Diagnostic>,
        counts: EnumMap<Severity, usize>,
    ) {
        self.diagnostics = diagnostics;
        self.severity_counts = counts;
    }

    pub(crate) fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    pub(crate) fn node_id_by_name(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    pub(crate) fn object_id_by_name(&self, name: &str) -> Option<ObjectId> {
        self.object_index.get(name).copied()
    }

    // ------------------------------------------------------------------
    // arena access

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn module_by_id(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    pub fn object_by_id(&self, id: ObjectId) -> &Object {
        &self.objects[id.index()]
    }

    pub fn type_by_id(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub fn notification_by_id(&self, id: NotificationId) -> &Notification {
        &self.notifications[id.index()]
    }

    pub fn group_by_id(&self, id: GroupId) -> &Group {
        &self.groups[id.index()]
    }

    pub fn compliance_by_id(&self, id: ComplianceId) -> &Compliance {
        &self.compliances[id.index()]
    }

    pub fn capabilities_by_id(&self, id: CapabilitiesId) -> &Capabilities {
        &self.capabilities[id.index()]
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.nodes[id.index()].children.iter().map(move |&child| self.node(child))
    }

    /// The top-level arcs (children of the pseudo-root).
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.children(NodeId(0))
    }

    // ------------------------------------------------------------------
    // queries

    /// Look up by bare name, `MODULE::name` qualified name, or dotted OID
    /// (leading `.` accepted).  Case-sensitive.
    pub fn find_node(&self, query: &str) -> Option<&Node> {
        if query.starts_with('.') || query.starts_with(|c: char| c.is_ascii_digit()) {
            let oid: Oid = query.parse().ok()?;
            return self.node_by_oid(&oid);
        }
        if let Some((module, name)) = query.split_once("::") {
            return self.find_node_qualified(module, name);
        }
        self.name_index.get(query).map(|&id| self.node(id))
    }

    fn find_node_qualified(&self, module: &str, name: &str) -> Option<&Node> {
        let module_id = *self.module_index.get(module)?;
        if let Some(object_id) = self.modules[module_id.index()].object_id(name) {
            return Some(self.node(self.objects[object_id.index()].node));
        }
        // not an object of that module; accept any node that carries the
        // name as canonical with that module preferred
        let &node_id = self.name_index.get(name)?;
        let node = self.node(node_id);
        (node.module == Some(module_id)).then_some(node)
    }

    /// Exact OID lookup.
    pub fn node_by_oid(&self, oid: &Oid) -> Option<&Node> {
        let mut current = NodeId(0);
        for &arc in oid.arcs() {
            current = self.child_by_arc(current, arc)?;
        }
        (current != NodeId(0)).then(|| self.node(current))
    }

    fn child_by_arc(&self, parent: NodeId, arc: u32) -> Option<NodeId> {
        let node = &self.nodes[parent.index()];
        node.children
            .binary_search_by_key(&arc, |&child| self.nodes[child.index()].arc)
            .ok()
            .map(|slot| node.children[slot])
    }

    /// The deepest *declared* node whose OID is a prefix of the argument.
    pub fn longest_prefix_by_oid(&self, oid: &Oid) -> Option<&Node> {
        let mut current = NodeId(0);
        let mut best: Option<NodeId> = None;
        for &arc in oid.arcs() {
            match self.child_by_arc(current, arc) {
                Some(child) => {
                    if self.nodes[child.index()].is_declared() {
                        best = Some(child);
                    }
                    current = child;
                }
                None => break,
            }
        }
        best.map(|id| self.node(id))
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.module_index.get(name).map(|&id| &self.modules[id.index()])
    }

    pub fn object(&self, name: &str) -> Option<&Object> {
        self.object_index.get(name).map(|&id| &self.objects[id.index()])
    }

    /// `"MODULE::name"` object lookup through the module's own table.
    pub fn object_by_qualified(&self, qualified: &str) -> Option<&Object> {
        let (module, name) = qualified.split_once("::")?;
        let object_id = self.module(module)?.object_id(name)?;
        Some(&self.objects[object_id.index()])
    }

    pub fn type_by_name(&self, name: &str) -> Option<&Type> {
        self.type_index.get(name).map(|&id| &self.types[id.index()])
    }

    /// Type lookup that also accepts `MODULE::Name`.
    pub fn find_type(&self, query: &str) -> Option<&Type> {
        match query.split_once("::") {
            None => self.type_by_name(query),
            Some((module, name)) => {
                let module_id = *self.module_index.get(module)?;
                self.modules[module_id.index()]
                    .types
                    .iter()
                    .map(|&id| &self.types[id.index()])
                    .find(|ty| ty.name == *name)
            }
        }
    }

    pub fn notification(&self, name: &str) -> Option<&Notification> {
        self.notification_index.get(name).map(|&id| &self.notifications[id.index()])
    }

    // ------------------------------------------------------------------
    // iteration and counts

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn types(&self) -> &[Type] {
        &self.types
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn compliances(&self) -> &[Compliance] {
        &self.compliances
    }

    pub fn capabilities(&self) -> &[Capabilities] {
        &self.capabilities
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }

    /// Number of trie nodes, excluding the pseudo-root.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    // ------------------------------------------------------------------
    // diagnostics

    pub fn unresolved(&self) -> &[Unresolved] {
        &self.unresolved
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn severity_counts(&self) -> &EnumMap<Severity, usize> {
        &self.severity_counts
    }

    pub fn has_errors(&self) -> bool {
        self.severity_counts[Severity::Error] + self.severity_counts[Severity::Fatal] > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trie_children_stay_sorted() {
        let mut mib = Mib::new();
        let root = mib.pseudo_root();
        let c9 = mib.get_or_create_child(root, 9);
        let c1 = mib.get_or_create_child(root, 1);
        let c5 = mib.get_or_create_child(root, 5);
        assert_eq!(mib.get_or_create_child(root, 5), c5);
        let arcs: Vec<u32> = mib.children(root).map(|n| n.arc).collect();
        assert_eq!(arcs, vec![1, 5, 9]);
        assert_ne!(c1, c9);
    }

    #[test]
    fn node_oid_follows_arcs() {
        let mut mib = Mib::new();
        let root = mib.pseudo_root();
        let a = mib.get_or_create_child(root, 1);
        let b = mib.get_or_create_child(a, 3);
        let c = mib.get_or_create_child(b, 6);
        assert_eq!(mib.node(c).oid, Oid::from([1, 3, 6]));
        assert_eq!(mib.node(c).parent, Some(b));
    }

    #[test]
    fn longest_prefix_skips_internal_nodes() {
        let mut mib = Mib::new();
        let root = mib.pseudo_root();
        let a = mib.get_or_create_child(root, 1);
        let b = mib.get_or_create_child(a, 3);
        let c = mib.get_or_create_child(b, 6);
        mib.node_mut(b).kind = NodeKind::Node;
        // c stays Internal
        let hit = mib.longest_prefix_by_oid(&Oid::from([1, 3, 6, 1, 2])).unwrap();
        assert_eq!(hit.oid, Oid::from([1, 3]));
        assert_eq!(mib.node_by_oid(&Oid::from([1, 3, 6])).unwrap().oid, mib.node(c).oid);
        assert!(mib.node_by_oid(&Oid::from([1, 4])).is_none());
    }

    #[test]
    fn access_and_status_keywords() {
        assert_eq!(Access::from_keyword("read-only"), Access::ReadOnly);
        assert_eq!(Access::from_keyword("install"), Access::Install);
        assert_eq!(Access::from_keyword("gibberish"), Access::Unknown);
        assert_eq!(Status::from_keyword("mandatory"), Status::Mandatory);
        assert_eq!(Access::ReadOnly.to_string(), "read-only");
        assert_eq!(NodeKind::Table.to_string(), "table");
    }
}
