//! Phase 4: OID resolution.
//!
//! OID definitions are ordered by their declarative dependencies (an
//! `enterprises { private 1 }` assignment needs `private` first), then each
//! definition walks its components left to right, allocating trie nodes as
//! it goes.  Conflicting declarations of one OID converge deterministically
//! on the preferred module: higher SMI language rank first, newer
//! LAST-UPDATED second.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::base;
use crate::diagnostic::{codes, Severity};
use crate::mib::{NodeId, NodeKind, UnresolvedKind};
use crate::module::{DefKind, EnterpriseRef, Language, OidAssignment, OidComponent};

use super::Resolver;

/// One OID-bearing definition awaiting resolution.
#[derive(Debug, Copy, Clone)]
struct OidEntry {
    src: usize,
    def: usize,
}

impl Resolver<'_> {
    pub(super) fn resolve_oids(&mut self) {
        self.lint_smiv2_identifiers();

        // collection: every definition that carries an OID; SMIv1 traps
        // derive theirs and are post-processed
        let mut entries: Vec<OidEntry> = Vec::new();
        let mut traps: Vec<OidEntry> = Vec::new();
        for src in 0..self.srcs.len() {
            for def in 0..self.srcs[src].definitions.len() {
                let definition = &self.srcs[src].definitions[def];
                if definition.oid().is_some() {
                    entries.push(OidEntry { src, def });
                } else if matches!(&definition.kind, DefKind::Notification(n) if n.trap.is_some()) {
                    traps.push(OidEntry { src, def });
                }
            }
        }

        let order = self.topological_order(&entries);
        for &entry_idx in &order {
            let OidEntry { src, def } = entries[entry_idx];
            self.resolve_oid_definition(src, def);
        }

        for &OidEntry { src, def } in &traps {
            self.resolve_trap(src, def);
        }

        debug!("oid trie holds {} nodes", self.mib.node_count());
    }

    /// SMIv2 names should not contain hyphens; RFC 2578 reserves them.
    fn lint_smiv2_identifiers(&mut self) {
        for src in 0..self.srcs.len() {
            if self.srcs[src].language != Language::Smiv2
                || base::is_base_module(self.srcs[src].name.as_str())
            {
                continue;
            }
            for def in 0..self.srcs[src].definitions.len() {
                let name = self.srcs[src].definitions[def].name.clone();
                if name.value.contains_hyphen() {
                    self.emit(
                        src,
                        name.span,
                        Severity::Warning,
                        codes::IDENTIFIER_HYPHEN_SMIV2,
                        format!("SMIv2 identifier `{}` contains a hyphen", name.value),
                    );
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // dependency ordering

    /// The defining symbol a definition's first component depends on.
    fn parent_symbol(&self, src: usize, def: usize) -> Option<(usize, String)> {
        let oid = self.srcs[src].definitions[def].oid()?;
        match &oid.components.first()?.value {
            OidComponent::Number(_) => None,
            OidComponent::Name(name) | OidComponent::NamedNumber(name, _) => {
                let name_str = name.as_str();
                if base::is_well_known_root(name_str) {
                    return None;
                }
                if self.def_names[src].contains(name_str) {
                    return Some((src, name_str.to_owned()));
                }
                if let Some(&target) = self.import_map[src].get(name_str) {
                    return Some((target, name_str.to_owned()));
                }
                if self.config.allow_best_guess_fallbacks() && base::is_smi_global_root(name_str) {
                    return self.smi_idx.map(|smi| (smi, name_str.to_owned()));
                }
                None
            }
            OidComponent::QualifiedName(module, name)
            | OidComponent::QualifiedNamedNumber(module, name, _) => {
                let candidates = self.candidates.get(module.as_str())?;
                candidates.first().map(|&idx| (idx, name.to_string()))
            }
        }
    }

    /// Order entries so that every definition is resolved after the one
    /// defining its parent symbol.  Members of dependency cycles (and their
    /// descendants) are reported once and left unresolved.
    fn topological_order(&mut self, entries: &[OidEntry]) -> Vec<usize> {
        let mut def_entry: HashMap<(usize, String), usize> = HashMap::new();
        for (idx, &OidEntry { src, def }) in entries.iter().enumerate() {
            let name = self.srcs[src].definitions[def].name.value.to_string();
            def_entry.entry((src, name)).or_insert(idx);
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
        let mut has_parent = vec![false; entries.len()];
        for (idx, &OidEntry { src, def }) in entries.iter().enumerate() {
            if let Some((parent_module, parent_name)) = self.parent_symbol(src, def) {
                if let Some(&parent_idx) = def_entry.get(&(parent_module, parent_name.clone())) {
                    if parent_idx != idx {
                        children[parent_idx].push(idx);
                        has_parent[idx] = true;
                    }
                }
            }
        }

        let mut order = Vec::with_capacity(entries.len());
        let mut visited = vec![false; entries.len()];
        let mut queue: VecDeque<usize> = (0..entries.len()).filter(|&i| !has_parent[i]).collect();
        while let Some(idx) = queue.pop_front() {
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            order.push(idx);
            for &child in &children[idx] {
                queue.push_back(child);
            }
        }

        let stranded: Vec<usize> = (0..entries.len()).filter(|&i| !visited[i]).collect();
        if !stranded.is_empty() {
            let OidEntry { src, def } = entries[stranded[0]];
            let span = self.srcs[src].definitions[def].name.span;
            self.emit(
                src,
                span,
                Severity::Error,
                codes::OID_CYCLE,
                format!("{} OID definitions form a dependency cycle", stranded.len()),
            );
            for &idx in &stranded {
                let OidEntry { src, def } = entries[idx];
                let name = self.srcs[src].definitions[def].name.value.to_string();
                self.push_unresolved(UnresolvedKind::Oid, &name, src);
            }
        }
        order
    }

    // ------------------------------------------------------------------
    // component walk

    fn resolve_oid_definition(&mut self, src: usize, def: usize) {
        let definition = &self.srcs[src].definitions[def];
        let name = definition.name.value.clone();
        let oid = definition.oid().expect("entry carries an OID").clone();
        match self.walk_components(src, &name.to_string(), &oid) {
            Some(node) => self.finalize_definition(src, def, node),
            None => {}
        }
    }

    /// Walk OID components left to right, allocating nodes.  Returns the
    /// final node, or `None` after recording the failure.
    fn walk_components(&mut self, src: usize, def_name: &str, oid: &OidAssignment) -> Option<NodeId> {
        if oid.components.is_empty() {
            self.push_unresolved(UnresolvedKind::Oid, def_name, src);
            return None;
        }
        let root = self.mib.pseudo_root();
        let mut current: Option<NodeId> = None;
        let last = oid.components.len() - 1;

        for (pos, component) in oid.components.iter().enumerate() {
            let interior = pos < last;
            match &component.value {
                OidComponent::Number(arc) => {
                    let parent = current.unwrap_or(root);
                    current = Some(self.mib.get_or_create_child(parent, *arc));
                }

                OidComponent::Name(name) => match self.resolve_scope_name(src, name.as_str()) {
                    Some(node) => current = Some(node),
                    None => {
                        self.emit(
                            src,
                            component.span,
                            Severity::Error,
                            codes::OID_ORPHAN,
                            format!("cannot resolve `{name}` in OID of `{def_name}`"),
                        );
                        self.push_unresolved(UnresolvedKind::Oid, def_name, src);
                        return None;
                    }
                },

                OidComponent::NamedNumber(name, arc) => {
                    match self.resolve_scope_name(src, name.as_str()) {
                        Some(node) => current = Some(node),
                        None => {
                            let parent = current.unwrap_or(root);
                            let child = self.mib.get_or_create_child(parent, *arc);
                            self.node_scope[src].insert(name.to_string(), child);
                            self.mib.register_name(name, child);
                            if interior {
                                let module_id = self.resolved[src];
                                let node = self.mib.node_mut(child);
                                if node.name.is_none() {
                                    node.name = Some(name.clone());
                                }
                                if node.module.is_none() {
                                    node.module = Some(module_id);
                                }
                                if node.kind == NodeKind::Internal {
                                    node.kind = NodeKind::Node;
                                }
                            }
                            current = Some(child);
                        }
                    }
                }

                OidComponent::QualifiedName(module, name) => {
                    match self.resolve_qualified(module.as_str(), name.as_str()) {
                        Some(node) => current = Some(node),
                        None => {
                            self.emit(
                                src,
                                component.span,
                                Severity::Error,
                                codes::OID_ORPHAN,
                                format!("cannot resolve `{module}.{name}` in OID of `{def_name}`"),
                            );
                            self.push_unresolved(UnresolvedKind::Oid, def_name, src);
                            return None;
                        }
                    }
                }

                OidComponent::QualifiedNamedNumber(module, name, arc) => {
                    match self.resolve_qualified(module.as_str(), name.as_str()) {
                        Some(node) => current = Some(node),
                        None => {
                            // the number gives us enough to keep going
                            let parent = current.unwrap_or(root);
                            current = Some(self.mib.get_or_create_child(parent, *arc));
                        }
                    }
                }
            }
        }
        current
    }

    /// Resolve a name to a trie node from a module's point of view: local
    /// scope, bound imports, the well-known roots, and (permissive only)
    /// the SMI global roots.
    fn resolve_scope_name(&mut self, src: usize, name: &str) -> Option<NodeId> {
        if let Some(&node) = self.node_scope[src].get(name) {
            return Some(node);
        }
        if let Some(defining) = self.lookup_symbol(src, name) {
            if let Some(&node) = self.node_scope[defining].get(name) {
                return Some(node);
            }
        }
        if let Some(arc) = well_known_arc(name) {
            let root = self.mib.pseudo_root();
            return Some(self.mib.get_or_create_child(root, arc));
        }
        if self.config.allow_best_guess_fallbacks() && base::is_smi_global_root(name) {
            if let Some(smi) = self.smi_idx {
                if let Some(&node) = self.node_scope[smi].get(name) {
                    return Some(node);
                }
            }
        }
        None
    }

    /// Resolve `MODULE.name` against the stated module's scope.
    fn resolve_qualified(&self, module: &str, name: &str) -> Option<NodeId> {
        for &candidate in self.candidates.get(module)? {
            if let Some(&node) = self.node_scope[candidate].get(name) {
                return Some(node);
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // finalization

    fn finalize_definition(&mut self, src: usize, def: usize, node_id: NodeId) {
        let definition = &self.srcs[src].definitions[def];
        let name = definition.name.value.clone();
        let kind = match &definition.kind {
            DefKind::ObjectType(_) => NodeKind::Scalar,
            DefKind::ModuleIdentity(_) | DefKind::ObjectIdentity(_) | DefKind::ValueAssignment(_) => {
                NodeKind::Node
            }
            DefKind::Notification(_) => NodeKind::Notification,
            DefKind::ObjectGroup(_) | DefKind::NotificationGroup(_) => NodeKind::Group,
            DefKind::ModuleCompliance(_) => NodeKind::Compliance,
            DefKind::AgentCapabilities(_) => NodeKind::Capabilities,
            DefKind::TypeDef(_) => unreachable!("TypeDefs carry no OID"),
        };
        let is_identity = matches!(&definition.kind, DefKind::ModuleIdentity(_));

        self.def_nodes[src][def] = Some(node_id);
        self.node_scope[src].insert(name.to_string(), node_id);
        self.mib.register_name(&name, node_id);

        let module_id = self.resolved[src];
        // resolved module ids are assigned in src order, so the back-mapping
        // is just the index
        let preferred = match self.mib.node(node_id).module {
            None => true,
            Some(existing) => self.module_preferred(src, existing.index()),
        };

        let node = self.mib.node_mut(node_id);
        if preferred {
            node.module = Some(module_id);
            node.name = Some(name);
            node.kind = kind;
        } else {
            if node.name.is_none() {
                node.name = Some(name);
            }
            if node.kind == NodeKind::Internal {
                node.kind = kind;
            }
        }

        if is_identity && preferred {
            let oid = self.mib.node(node_id).oid.clone();
            self.mib.module_mut(module_id).oid = Some(oid);
        }
    }

    // ------------------------------------------------------------------
    // SMIv1 traps

    /// A trap lives at `enterprise.0.trapNumber`.
    fn resolve_trap(&mut self, src: usize, def: usize) {
        let definition = &self.srcs[src].definitions[def];
        let def_name = definition.name.value.to_string();
        let trap = match &definition.kind {
            DefKind::Notification(n) => n.trap.clone().expect("trap entry"),
            _ => unreachable!("trap entries are notifications"),
        };

        let enterprise_node = match &trap.enterprise {
            EnterpriseRef::Name(name) => {
                let span = name.span;
                match self.resolve_scope_name(src, name.value.as_str()) {
                    Some(node) => Some(node),
                    None => {
                        self.emit(
                            src,
                            span,
                            Severity::Error,
                            codes::OID_ORPHAN,
                            format!("cannot resolve trap enterprise `{}`", name.value),
                        );
                        None
                    }
                }
            }
            EnterpriseRef::Oid(assignment) => {
                let assignment = assignment.clone();
                self.walk_components(src, &def_name, &assignment)
            }
        };

        let enterprise_node = match enterprise_node {
            Some(node) => node,
            None => {
                self.push_unresolved(UnresolvedKind::Oid, &def_name, src);
                return;
            }
        };

        let zero = self.mib.get_or_create_child(enterprise_node, 0);
        let trap_node = self.mib.get_or_create_child(zero, trap.number);
        self.finalize_definition(src, def, trap_node);
    }
}

fn well_known_arc(name: &str) -> Option<u32> {
    match name {
        "ccitt" => Some(0),
        "iso" => Some(1),
        "joint-iso-ccitt" => Some(2),
        _ => None,
    }
}
