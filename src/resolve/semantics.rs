//! Phase 5: semantics.
//!
//! Infers table/row/column/scalar kinds, materializes the resolved
//! entities, links INDEX/AUGMENTS through each module's own object table,
//! and computes effective constraints by walking type chains.

use log::debug;

use crate::diagnostic::{codes, Severity};
use crate::ident::Ident;
use crate::mib::{
    Access, Capabilities, CapabilitiesSupports, Compliance, ComplianceModuleRef, DefValue, Group,
    GroupKind, GroupMember, IndexEntryRef, NodeKind, Notification, NotificationId, Object,
    ObjectId, Status, TypeId, UnresolvedKind,
};
use crate::module::{
    BaseType, ComplianceRequirement, Constraint, DefKind, DefVal, ObjectType, TypeSyntax,
};
use crate::oid::Oid;
use crate::pos::Sp;

use super::Resolver;

impl Resolver<'_> {
    pub(super) fn resolve_semantics(&mut self) {
        self.infer_object_kinds();
        self.reclassify_columns();
        self.materialize_objects();
        self.link_table_semantics();
        self.materialize_notifications();
        self.materialize_groups();
        self.materialize_compliances();
        self.materialize_capabilities();
        debug!(
            "semantics: {} objects, {} notifications, {} groups",
            self.mib.object_count(),
            self.mib.notification_count(),
            self.mib.groups().len(),
        );
    }

    // ------------------------------------------------------------------
    // kind inference

    /// `SEQUENCE OF` syntax makes a table; INDEX or AUGMENTS makes a row;
    /// everything else stays scalar for now.
    fn infer_object_kinds(&mut self) {
        for src in 0..self.srcs.len() {
            for def in 0..self.srcs[src].definitions.len() {
                let node_id = match self.def_nodes[src][def] {
                    Some(node_id) => node_id,
                    None => continue,
                };
                let obj = match &self.srcs[src].definitions[def].kind {
                    DefKind::ObjectType(obj) => obj,
                    _ => continue,
                };
                let kind = if matches!(obj.syntax, TypeSyntax::SequenceOf { .. }) {
                    NodeKind::Table
                } else if !obj.index.is_empty() || obj.augments.is_some() {
                    NodeKind::Row
                } else {
                    NodeKind::Scalar
                };
                // only the preferred module classifies a shared node
                let module_id = self.resolved[src];
                let node = self.mib.node_mut(node_id);
                if node.module == Some(module_id) {
                    node.kind = kind;
                }
            }
        }
    }

    /// A row's scalar children are its columns.
    fn reclassify_columns(&mut self) {
        let rows: Vec<_> = self
            .mib
            .node_ids()
            .filter(|&id| self.mib.node(id).kind == NodeKind::Row)
            .collect();
        for row in rows {
            let children = self.mib.node(row).children.clone();
            for child in children {
                let node = self.mib.node_mut(child);
                if node.kind == NodeKind::Scalar {
                    node.kind = NodeKind::Column;
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // objects

    fn materialize_objects(&mut self) {
        for src in 0..self.srcs.len() {
            for def in 0..self.srcs[src].definitions.len() {
                let node_id = match self.def_nodes[src][def] {
                    Some(node_id) => node_id,
                    None => continue,
                };
                let (name, obj) = match &self.srcs[src].definitions[def].kind {
                    DefKind::ObjectType(obj) => {
                        (self.srcs[src].definitions[def].name.clone(), obj.clone())
                    }
                    _ => continue,
                };

                let (type_id, type_name) = self.resolve_syntax_type(src, &name, &obj.syntax);

                let mut object = Object {
                    name: name.value.clone(),
                    module: self.resolved[src],
                    node: node_id,
                    oid: self.mib.node(node_id).oid.clone(),
                    kind: self.mib.node(node_id).kind,
                    access: obj
                        .access
                        .as_ref()
                        .map(|a| Access::from_keyword(a.as_str()))
                        .unwrap_or_default(),
                    status: obj
                        .status
                        .as_ref()
                        .map(|s| Status::from_keyword(s.as_str()))
                        .unwrap_or_default(),
                    description: obj.description.clone(),
                    units: obj.units.clone(),
                    reference: obj.reference.clone(),
                    type_name,
                    type_id,
                    effective_sizes: Vec::new(),
                    effective_ranges: Vec::new(),
                    effective_enums: Vec::new(),
                    effective_bits: Vec::new(),
                    defval: None,
                    index: Vec::new(),
                    augments: None,
                };

                apply_inline_constraints(&mut object, &obj.syntax);
                object.defval = obj
                    .defval
                    .as_ref()
                    .map(|dv| self.convert_defval(src, dv, type_id, &obj.syntax));
                self.inherit_effective_values(&mut object);

                let module_id = object.module;
                let id = self.mib.add_object(object);
                self.def_objects[src][def] = Some(id);

                // the node's payload comes from the preferred module; other
                // modules only fill a still-empty slot
                let node = self.mib.node_mut(node_id);
                let kind_matches = matches!(
                    node.kind,
                    NodeKind::Scalar | NodeKind::Column | NodeKind::Row | NodeKind::Table
                );
                if kind_matches && (node.module == Some(module_id) || node.object.is_none()) {
                    node.object = Some(id);
                }
            }
        }
    }

    /// Resolve an object's SYNTAX to a type-table entry.
    fn resolve_syntax_type(
        &mut self,
        src: usize,
        def_name: &Sp<Ident>,
        syntax: &TypeSyntax,
    ) -> (Option<TypeId>, Option<Ident>) {
        let primitives = self.primitives.expect("primitives seeded");
        match syntax {
            TypeSyntax::TypeRef(name) | TypeSyntax::IntegerEnum { base: Some(name), .. } => {
                match self.lookup_type(src, name.value.as_str()) {
                    Some(id) => (Some(id), Some(name.value.clone())),
                    None => {
                        self.emit(
                            src,
                            name.span,
                            Severity::Error,
                            codes::TYPE_UNKNOWN,
                            format!("unknown type `{}` in syntax of `{}`", name.value, def_name.value),
                        );
                        self.push_unresolved(UnresolvedKind::Type, name.value.as_str(), src);
                        (None, Some(name.value.clone()))
                    }
                }
            }
            TypeSyntax::IntegerEnum { base: None, .. } => (Some(primitives.integer), None),
            TypeSyntax::Bits { .. } => (Some(primitives.bits), None),
            TypeSyntax::OctetString => (Some(primitives.octet_string), None),
            TypeSyntax::ObjectIdentifier => (Some(primitives.object_identifier), None),
            TypeSyntax::Constrained { base, .. } => self.resolve_syntax_type(src, def_name, base),
            TypeSyntax::SequenceOf { .. } | TypeSyntax::Sequence { .. } => (None, None),
        }
    }

    /// For each unset effective field, adopt the first non-empty value
    /// found walking the type chain upward.
    fn inherit_effective_values(&mut self, object: &mut Object) {
        let mut current = object.type_id;
        let mut guard = 0usize;
        while let Some(type_id) = current {
            let ty = self.mib.type_by_id(type_id);
            if object.effective_sizes.is_empty() && !ty.sizes.is_empty() {
                object.effective_sizes = ty.sizes.clone();
            }
            if object.effective_ranges.is_empty() && !ty.ranges.is_empty() {
                object.effective_ranges = ty.ranges.clone();
            }
            if object.effective_enums.is_empty() && !ty.named_values.is_empty() {
                object.effective_enums = ty.named_values.clone();
            }
            if object.effective_bits.is_empty() && !ty.named_bits.is_empty() {
                object.effective_bits = ty.named_bits.clone();
            }
            current = ty.parent;
            guard += 1;
            if guard > 64 {
                break;
            }
        }
    }

    // ------------------------------------------------------------------
    // DEFVAL interpretation

    fn convert_defval(
        &mut self,
        src: usize,
        defval: &DefVal,
        type_id: Option<TypeId>,
        syntax: &TypeSyntax,
    ) -> DefValue {
        match defval {
            DefVal::Integer(v) => DefValue::Integer(*v),
            DefVal::Unsigned(v) => DefValue::Unsigned(*v),
            DefVal::String(s) => DefValue::Text(s.clone()),
            DefVal::HexString(digits) => DefValue::Bytes(decode_hex(digits)),
            DefVal::BinaryString(digits) => DefValue::Bytes(decode_bin(digits)),
            DefVal::Bits(labels) => DefValue::Bits(labels.clone()),
            DefVal::Enum(name) => {
                // a bare identifier on an OID-typed object is an OID
                // reference, not an enum label
                if self.syntax_is_oid(type_id, syntax) {
                    if let Some(oid) = self.peek_node_oid(src, name.as_str()) {
                        return DefValue::Oid(oid);
                    }
                }
                DefValue::Enum(name.clone())
            }
            DefVal::OidRef(name) => match self.peek_node_oid(src, name.as_str()) {
                Some(oid) => DefValue::Oid(oid),
                None => DefValue::Enum(name.clone()),
            },
            DefVal::OidValue(components) => {
                use crate::module::OidComponent;
                let mut oid = Oid::new();
                let mut components = components.as_slice();
                if let Some(first) = components.first() {
                    if let OidComponent::Name(name) = &first.value {
                        match self.peek_node_oid(src, name.as_str()) {
                            Some(base) => {
                                oid = base;
                                components = &components[1..];
                            }
                            None => return DefValue::Unparsed,
                        }
                    }
                }
                for component in components {
                    match component.value {
                        OidComponent::Number(arc)
                        | OidComponent::NamedNumber(_, arc)
                        | OidComponent::QualifiedNamedNumber(_, _, arc) => oid.push(arc),
                        _ => return DefValue::Unparsed,
                    }
                }
                DefValue::Oid(oid)
            }
            DefVal::Unparsed => DefValue::Unparsed,
        }
    }

    fn syntax_is_oid(&self, type_id: Option<TypeId>, syntax: &TypeSyntax) -> bool {
        if syntax_root_is_oid(syntax) {
            return true;
        }
        match type_id {
            Some(id) => self.mib.type_by_id(id).base == BaseType::ObjectIdentifier,
            None => false,
        }
    }

    /// Read-only node lookup: module scope, imports, then the global name
    /// index.  Never allocates trie nodes.
    fn peek_node_oid(&self, src: usize, name: &str) -> Option<Oid> {
        if let Some(&node) = self.node_scope[src].get(name) {
            return Some(self.mib.node(node).oid.clone());
        }
        if let Some(defining) = self.lookup_symbol(src, name) {
            if let Some(&node) = self.node_scope[defining].get(name) {
                return Some(self.mib.node(node).oid.clone());
            }
        }
        self.mib
            .node_id_by_name(name)
            .map(|node| self.mib.node(node).oid.clone())
    }

    // ------------------------------------------------------------------
    // INDEX / AUGMENTS

    /// Second pass, after every object exists: bind each row's index
    /// entries and AUGMENTS target.  Lookups go through the module's own
    /// object table because two modules may own distinct `Object`
    /// instances at the same OID.
    fn link_table_semantics(&mut self) {
        for src in 0..self.srcs.len() {
            for def in 0..self.srcs[src].definitions.len() {
                let object_id = match self.def_objects[src][def] {
                    Some(object_id) => object_id,
                    None => continue,
                };
                let obj = match &self.srcs[src].definitions[def].kind {
                    DefKind::ObjectType(obj) => obj.clone(),
                    _ => continue,
                };
                self.link_row(src, object_id, &obj);
            }
        }
    }

    fn link_row(&mut self, src: usize, object_id: ObjectId, obj: &ObjectType) {
        let mut entries = Vec::new();
        for entry in &obj.index {
            let name = &entry.name;
            // a bare type name (`INTEGER`) is a literal index encoding,
            // not an object reference
            if name.value.is_uppercase() && self.lookup_type(src, name.value.as_str()).is_some() {
                continue;
            }
            match self.lookup_object(src, name.value.as_str()) {
                Some(target) => entries.push(IndexEntryRef { object: target, implied: entry.implied }),
                None => {
                    self.emit(
                        src,
                        name.span,
                        Severity::Error,
                        codes::INDEX_UNRESOLVED,
                        format!("INDEX entry `{}` does not resolve to an object", name.value),
                    );
                    self.push_unresolved(UnresolvedKind::Index, name.value.as_str(), src);
                }
            }
        }

        let mut augments = None;
        if let Some(target) = &obj.augments {
            match self.lookup_object(src, target.value.as_str()) {
                Some(found) => augments = Some(found),
                None => {
                    self.emit(
                        src,
                        target.span,
                        Severity::Error,
                        codes::OID_ORPHAN,
                        format!("AUGMENTS target `{}` does not resolve", target.value),
                    );
                    self.push_unresolved(UnresolvedKind::Index, target.value.as_str(), src);
                }
            }
        }

        let object = self.mib.object_mut(object_id);
        object.index = entries;
        object.augments = augments;
    }

    /// Find an object by name from a module's point of view, landing in the
    /// defining module's own object table.
    fn lookup_object(&self, src: usize, name: &str) -> Option<ObjectId> {
        let defining = self.lookup_symbol(src, name)?;
        let module_id = self.resolved[defining];
        self.mib.module_by_id(module_id).object_id(name)
    }

    fn lookup_notification(&self, src: usize, name: &str) -> Option<NotificationId> {
        let defining = self.lookup_symbol(src, name)?;
        self.notif_scope[defining].get(name).copied()
    }

    // ------------------------------------------------------------------
    // notifications

    fn materialize_notifications(&mut self) {
        for src in 0..self.srcs.len() {
            for def in 0..self.srcs[src].definitions.len() {
                let node_id = match self.def_nodes[src][def] {
                    Some(node_id) => node_id,
                    None => continue,
                };
                let (name, notif) = match &self.srcs[src].definitions[def].kind {
                    DefKind::Notification(notif) => {
                        (self.srcs[src].definitions[def].name.clone(), notif.clone())
                    }
                    _ => continue,
                };

                let mut members = Vec::new();
                for member in &notif.objects {
                    let mut found = self.lookup_object(src, member.value.as_str());
                    if found.is_none() && self.config.allow_best_guess_fallbacks() {
                        found = self.mib.object_id_by_name(member.value.as_str());
                    }
                    if found.is_none() {
                        self.emit(
                            src,
                            member.span,
                            Severity::Error,
                            codes::OBJECTS_UNRESOLVED,
                            format!(
                                "object `{}` of notification `{}` does not resolve",
                                member.value, name.value
                            ),
                        );
                        self.push_unresolved(
                            UnresolvedKind::NotificationObject,
                            member.value.as_str(),
                            src,
                        );
                    }
                    members.push((member.value.clone(), found));
                }

                let module_id = self.resolved[src];
                let id = self.mib.add_notification(Notification {
                    name: name.value.clone(),
                    module: module_id,
                    node: node_id,
                    oid: self.mib.node(node_id).oid.clone(),
                    status: notif
                        .status
                        .as_ref()
                        .map(|s| Status::from_keyword(s.as_str()))
                        .unwrap_or_default(),
                    description: notif.description.clone(),
                    reference: notif.reference.clone(),
                    objects: members,
                    is_trap: notif.trap.is_some(),
                });
                self.notif_scope[src].insert(name.value.to_string(), id);

                let node = self.mib.node_mut(node_id);
                if node.kind == NodeKind::Notification
                    && (node.module == Some(module_id) || node.notification.is_none())
                {
                    node.notification = Some(id);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // groups

    fn materialize_groups(&mut self) {
        for src in 0..self.srcs.len() {
            for def in 0..self.srcs[src].definitions.len() {
                let node_id = match self.def_nodes[src][def] {
                    Some(node_id) => node_id,
                    None => continue,
                };
                let definition = &self.srcs[src].definitions[def];
                let name = definition.name.clone();
                let (group, kind) = match &definition.kind {
                    DefKind::ObjectGroup(group) => (group.clone(), GroupKind::Objects),
                    DefKind::NotificationGroup(group) => (group.clone(), GroupKind::Notifications),
                    _ => continue,
                };

                let mut members = Vec::new();
                for member in &group.members {
                    let member_name = member.value.clone();
                    match kind {
                        GroupKind::Objects => {
                            let found = self.lookup_object(src, member_name.as_str());
                            match found {
                                Some(object_id) => {
                                    let access = self.mib.object_by_id(object_id).access;
                                    if access == Access::NotAccessible {
                                        self.emit(
                                            src,
                                            member.span,
                                            Severity::Minor,
                                            codes::GROUP_NOT_ACCESSIBLE,
                                            format!(
                                                "group `{}` member `{}` is not-accessible",
                                                name.value, member_name
                                            ),
                                        );
                                    }
                                }
                                None => {
                                    self.emit(
                                        src,
                                        member.span,
                                        Severity::Error,
                                        codes::OBJECTS_UNRESOLVED,
                                        format!(
                                            "group `{}` member `{}` does not resolve",
                                            name.value, member_name
                                        ),
                                    );
                                }
                            }
                            members.push(GroupMember {
                                name: member_name,
                                object: found,
                                notification: None,
                            });
                        }
                        GroupKind::Notifications => {
                            let found = self.lookup_notification(src, member_name.as_str());
                            if found.is_none() {
                                self.emit(
                                    src,
                                    member.span,
                                    Severity::Error,
                                    codes::OBJECTS_UNRESOLVED,
                                    format!(
                                        "group `{}` notification `{}` does not resolve",
                                        name.value, member_name
                                    ),
                                );
                                self.push_unresolved(
                                    UnresolvedKind::NotificationObject,
                                    member_name.as_str(),
                                    src,
                                );
                            }
                            members.push(GroupMember {
                                name: member_name,
                                object: None,
                                notification: found,
                            });
                        }
                    }
                }

                let module_id = self.resolved[src];
                let id = self.mib.add_group(Group {
                    name: name.value.clone(),
                    module: module_id,
                    node: node_id,
                    oid: self.mib.node(node_id).oid.clone(),
                    kind,
                    status: group
                        .status
                        .as_ref()
                        .map(|s| Status::from_keyword(s.as_str()))
                        .unwrap_or_default(),
                    description: group.description.clone(),
                    reference: group.reference.clone(),
                    members,
                });

                let node = self.mib.node_mut(node_id);
                if node.kind == NodeKind::Group
                    && (node.module == Some(module_id) || node.group.is_none())
                {
                    node.group = Some(id);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // compliances and capabilities

    fn materialize_compliances(&mut self) {
        for src in 0..self.srcs.len() {
            for def in 0..self.srcs[src].definitions.len() {
                let node_id = match self.def_nodes[src][def] {
                    Some(node_id) => node_id,
                    None => continue,
                };
                let definition = &self.srcs[src].definitions[def];
                let compliance = match &definition.kind {
                    DefKind::ModuleCompliance(compliance) => compliance.clone(),
                    _ => continue,
                };
                let modules = compliance
                    .modules
                    .iter()
                    .map(|section| {
                        let mut groups = Vec::new();
                        let mut objects = Vec::new();
                        for requirement in &section.requirements {
                            match requirement {
                                ComplianceRequirement::Group { name, .. } => {
                                    groups.push(name.value.clone())
                                }
                                ComplianceRequirement::Object { name, .. } => {
                                    objects.push(name.value.clone())
                                }
                            }
                        }
                        ComplianceModuleRef {
                            module: section.module.as_ref().map(|m| m.value.clone()),
                            mandatory_groups: section
                                .mandatory_groups
                                .iter()
                                .map(|g| g.value.clone())
                                .collect(),
                            groups,
                            objects,
                        }
                    })
                    .collect();

                let module_id = self.resolved[src];
                let id = self.mib.add_compliance(Compliance {
                    name: definition.name.value.clone(),
                    module: module_id,
                    node: node_id,
                    oid: self.mib.node(node_id).oid.clone(),
                    status: compliance
                        .status
                        .as_ref()
                        .map(|s| Status::from_keyword(s.as_str()))
                        .unwrap_or_default(),
                    description: compliance.description.clone(),
                    reference: compliance.reference.clone(),
                    modules,
                });

                let node = self.mib.node_mut(node_id);
                if node.kind == NodeKind::Compliance
                    && (node.module == Some(module_id) || node.compliance.is_none())
                {
                    node.compliance = Some(id);
                }
            }
        }
    }

    fn materialize_capabilities(&mut self) {
        for src in 0..self.srcs.len() {
            for def in 0..self.srcs[src].definitions.len() {
                let node_id = match self.def_nodes[src][def] {
                    Some(node_id) => node_id,
                    None => continue,
                };
                let definition = &self.srcs[src].definitions[def];
                let caps = match &definition.kind {
                    DefKind::AgentCapabilities(caps) => caps.clone(),
                    _ => continue,
                };
                let module_id = self.resolved[src];
                let id = self.mib.add_capabilities(Capabilities {
                    name: definition.name.value.clone(),
                    module: module_id,
                    node: node_id,
                    oid: self.mib.node(node_id).oid.clone(),
                    product_release: caps.product_release.clone(),
                    status: caps
                        .status
                        .as_ref()
                        .map(|s| Status::from_keyword(s.as_str()))
                        .unwrap_or_default(),
                    description: caps.description.clone(),
                    supports: caps
                        .supports
                        .iter()
                        .map(|supports| CapabilitiesSupports {
                            module: supports.module.value.clone(),
                            includes: supports.includes.iter().map(|i| i.value.clone()).collect(),
                        })
                        .collect(),
                });

                let node = self.mib.node_mut(node_id);
                if node.kind == NodeKind::Capabilities
                    && (node.module == Some(module_id) || node.capabilities.is_none())
                {
                    node.capabilities = Some(id);
                }
            }
        }
    }
}

// =============================================================================
// constraint and DEFVAL helpers

/// Copy the constraints an object's own syntax declares; these always win
/// over anything inherited from the type chain.
fn apply_inline_constraints(object: &mut Object, syntax: &TypeSyntax) {
    match syntax {
        TypeSyntax::Constrained { base, constraint } => {
            match constraint {
                Constraint::Size(items) => object.effective_sizes = items.clone(),
                Constraint::Range(items) => object.effective_ranges = items.clone(),
            }
            apply_inline_constraints(object, base);
        }
        TypeSyntax::IntegerEnum { named_numbers, .. } => {
            object.effective_enums = named_numbers.clone();
        }
        TypeSyntax::Bits { named_bits } => {
            object.effective_bits = named_bits.clone();
        }
        _ => {}
    }
}

fn syntax_root_is_oid(syntax: &TypeSyntax) -> bool {
    match syntax {
        TypeSyntax::ObjectIdentifier => true,
        TypeSyntax::Constrained { base, .. } => syntax_root_is_oid(base),
        _ => false,
    }
}

/// Decode the digits of a `'...'H` string; an odd-length string gets a
/// leading `'0'`.
fn decode_hex(digits: &str) -> Vec<u8> {
    let padded: String = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_owned()
    };
    padded
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).unwrap_or("0");
            u8::from_str_radix(text, 16).unwrap_or(0)
        })
        .collect()
}

/// Decode the digits of a `'...'B` string, left-padding with zeros to a
/// multiple of 8 bits.
fn decode_bin(digits: &str) -> Vec<u8> {
    let pad = (8 - digits.len() % 8) % 8;
    let padded: String = "0".repeat(pad) + digits;
    padded
        .as_bytes()
        .chunks(8)
        .map(|byte| {
            let text = std::str::from_utf8(byte).unwrap_or("0");
            u8::from_str_radix(text, 2).unwrap_or(0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_decode_pads_odd_length() {
        assert_eq!(decode_hex("ff00"), vec![0xff, 0x00]);
        assert_eq!(decode_hex("fff"), vec![0x0f, 0xff]);
        assert_eq!(decode_hex(""), Vec::<u8>::new());
    }

    #[test]
    fn bin_decode_pads_to_bytes() {
        assert_eq!(decode_bin("1010"), vec![0b0000_1010]);
        assert_eq!(decode_bin("100000001"), vec![0b1, 0b0000_0001]);
        assert_eq!(decode_bin(""), Vec::<u8>::new());
    }

    #[test]
    fn oid_syntax_detection_sees_through_constraints() {
        use crate::module::{Constraint, RangeEndpoint, RangeItem};
        let constrained = TypeSyntax::Constrained {
            base: Box::new(TypeSyntax::ObjectIdentifier),
            constraint: Constraint::Size(vec![RangeItem {
                low: RangeEndpoint::Signed(0),
                high: RangeEndpoint::Signed(4),
            }]),
        };
        assert!(syntax_root_is_oid(&constrained));
        assert!(!syntax_root_is_oid(&TypeSyntax::OctetString));
    }
}
