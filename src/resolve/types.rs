//! Phase 3: build and link the type table.
//!
//! Seeds the ASN.1 primitives, creates a resolved [`Type`] for every
//! `TypeDef`, links parents through the importing module's scope with a
//! bounded multipass worklist, and finally inherits base types along the
//! ancestor chain, preserving the seven application base types under
//! derivation.

use log::debug;

use crate::diagnostic::{codes, Severity};
use crate::ident::Ident;
use crate::mib::{Status, Type, TypeId, UnresolvedKind};
use crate::module::{BaseType, Constraint, DefKind, NamedNumber, RangeItem, TypeSyntax};
use crate::pos::Sp;

use super::{Resolver, TYPE_PASS_LIMIT};

/// The four seeded ASN.1 primitives.
#[derive(Debug, Copy, Clone)]
pub(crate) struct Primitives {
    pub integer: TypeId,
    pub octet_string: TypeId,
    pub object_identifier: TypeId,
    pub bits: TypeId,
}

impl Resolver<'_> {
    pub(super) fn resolve_types(&mut self) {
        let pending = {
            self.seed_primitives();
            self.create_user_types()
        };
        self.resolve_type_parents(pending);
        self.anchor_v1_textual_conventions();
        self.inherit_base_types();
        debug!("type table holds {} types", self.mib.type_count());
    }

    /// Inject `INTEGER`, `OCTET STRING`, `OBJECT IDENTIFIER` and `BITS`
    /// into SNMPv2-SMI.  Every resolved type chain bottoms out in one of
    /// these.
    fn seed_primitives(&mut self) {
        let smi_idx = self.smi_idx.expect("SNMPv2-SMI is always registered");
        let module_id = self.resolved[smi_idx];
        let mut seed = |resolver: &mut Self, name: &str, base: BaseType| {
            let id = resolver.mib.add_type(Type {
                name: Ident::primitive(name),
                module: module_id,
                base,
                parent: None,
                is_textual_convention: false,
                status: Status::Current,
                display_hint: None,
                description: None,
                reference: None,
                named_values: Vec::new(),
                named_bits: Vec::new(),
                sizes: Vec::new(),
                ranges: Vec::new(),
            });
            resolver.type_scope[smi_idx].insert(name.to_owned(), id);
            id
        };
        let integer = seed(self, "INTEGER", BaseType::Integer);
        let octet_string = seed(self, "OCTET STRING", BaseType::OctetString);
        let object_identifier = seed(self, "OBJECT IDENTIFIER", BaseType::ObjectIdentifier);
        let bits = seed(self, "BITS", BaseType::Bits);
        self.primitives = Some(Primitives { integer, octet_string, object_identifier, bits });
    }

    /// Create a resolved `Type` for every `TypeDef`, returning the list of
    /// parent references still to be resolved.
    fn create_user_types(&mut self) -> Vec<(usize, TypeId, Sp<Ident>)> {
        let primitives = self.primitives.expect("primitives seeded");
        let mut pending = Vec::new();

        for src_idx in 0..self.srcs.len() {
            for def_idx in 0..self.srcs[src_idx].definitions.len() {
                let def = &self.srcs[src_idx].definitions[def_idx];
                let td = match &def.kind {
                    DefKind::TypeDef(td) => td.clone(),
                    _ => continue,
                };
                let name = def.name.clone();

                let (named_values, named_bits) = collect_named(&td.syntax);
                let (sizes, ranges) = collect_constraints(&td.syntax);
                let base = td.base_override.unwrap_or_else(|| derive_base(&td.syntax));
                let parent = primitive_parent(&td.syntax, &primitives);

                let id = self.mib.add_type(Type {
                    name: name.value.clone(),
                    module: self.resolved[src_idx],
                    base,
                    parent,
                    is_textual_convention: td.is_textual_convention,
                    status: td
                        .status
                        .as_ref()
                        .map(|s| Status::from_keyword(s.as_str()))
                        .unwrap_or_default(),
                    display_hint: td.display_hint.clone(),
                    description: td.description.clone(),
                    reference: td.reference.clone(),
                    named_values,
                    named_bits,
                    sizes,
                    ranges,
                });
                self.type_scope[src_idx].insert(name.value.to_string(), id);

                if let Some(parent_name) = parent_ref(&td.syntax) {
                    pending.push((src_idx, id, parent_name));
                }
            }
        }
        pending
    }

    /// Multipass worklist linking `TypeRef` parents.  The type graph is a
    /// DAG once cycles are rejected, so a bounded number of passes settles
    /// everything resolvable; survivors after a no-progress pass are
    /// reported and skipped.
    fn resolve_type_parents(&mut self, mut pending: Vec<(usize, TypeId, Sp<Ident>)>) {
        for _pass in 0..TYPE_PASS_LIMIT {
            if pending.is_empty() {
                break;
            }
            let before = pending.len();
            let mut next = Vec::new();
            for (src_idx, ty, name) in pending.drain(..) {
                match self.lookup_type(src_idx, name.value.as_str()) {
                    Some(parent) if parent != ty => {
                        self.mib.type_mut(ty).parent = Some(parent);
                    }
                    _ => next.push((src_idx, ty, name)),
                }
            }
            let progressed = next.len() < before;
            pending = next;
            if !progressed {
                break;
            }
        }

        for (src_idx, _ty, name) in pending {
            self.emit(
                src_idx,
                name.span,
                Severity::Error,
                codes::TYPE_UNKNOWN,
                format!("unknown type `{}`", name.value),
            );
            self.push_unresolved(UnresolvedKind::Type, name.value.as_str(), src_idx);
        }
    }

    /// Resolve a type name from a module's point of view: its own scope and
    /// bound imports, then the ASN.1 primitives, then (in permissive mode
    /// only) the global SMI types and standard TCs.
    pub(crate) fn lookup_type(&self, src_idx: usize, name: &str) -> Option<TypeId> {
        if let Some(defining) = self.lookup_symbol(src_idx, name) {
            if let Some(&id) = self.type_scope[defining].get(name) {
                return Some(id);
            }
        }

        let primitives = self.primitives.expect("primitives seeded");
        match name {
            "INTEGER" => return Some(primitives.integer),
            "BITS" => return Some(primitives.bits),
            _ => {}
        }

        if self.config.allow_best_guess_fallbacks() {
            for fallback in [self.smi_idx, self.rfc1155_idx, self.tc_idx].into_iter().flatten() {
                if let Some(&id) = self.type_scope[fallback].get(name) {
                    return Some(id);
                }
            }
        }
        None
    }

    /// When both RFC1213-MIB and SNMPv2-TC define `DisplayString` or
    /// `PhysAddress`, anchor the SMIv1 instance to the SMIv2 one so the
    /// chains agree.
    fn anchor_v1_textual_conventions(&mut self) {
        let tc_idx = match self.tc_idx {
            Some(idx) => idx,
            None => return,
        };
        let v1_candidates = match self.candidates.get("RFC1213-MIB") {
            Some(candidates) => candidates.clone(),
            None => return,
        };
        for name in ["DisplayString", "PhysAddress"] {
            let anchor = match self.type_scope[tc_idx].get(name) {
                Some(&id) => id,
                None => continue,
            };
            for &candidate in &v1_candidates {
                if let Some(&v1_type) = self.type_scope[candidate].get(name) {
                    self.mib.type_mut(v1_type).parent = Some(anchor);
                }
            }
        }
    }

    /// Walk each type's ancestor chain to settle its base type.  The first
    /// explicit base encountered wins, which keeps application types
    /// (`Counter32` etc.) in force under derivation.
    fn inherit_base_types(&mut self) {
        for index in 0..self.mib.type_count() {
            let id = TypeId::from_index(index);
            let (base, ok) = self.resolve_base_from_chain(id);
            if !ok {
                let ty = self.mib.type_by_id(id);
                let (name, module) = (ty.name.to_string(), ty.module);
                let module_name = self.mib.module_by_id(module).name.to_string();
                let diag = crate::diagnostic::Diagnostic::new(
                    Severity::Error,
                    codes::TYPE_CYCLE,
                    format!("type `{name}` participates in a definition cycle"),
                )
                .for_module(module_name.clone());
                self.sink.emit(self.config, diag);
                self.mib.push_unresolved(UnresolvedKind::Type, &name, &module_name);
                continue;
            }
            if base != BaseType::Unknown {
                self.mib.type_mut(id).base = base;
            }
        }
    }

    /// Walk from `id` toward the root of its chain and report the first
    /// explicit base type.  Returns `(_, false)` when the walk finds a
    /// cycle; the result is stable across calls.
    pub(crate) fn resolve_base_from_chain(&self, id: TypeId) -> (BaseType, bool) {
        let mut visited: Vec<TypeId> = Vec::new();
        let mut current = Some(id);
        while let Some(ty_id) = current {
            if visited.contains(&ty_id) {
                return (BaseType::Unknown, false);
            }
            visited.push(ty_id);
            let ty = self.mib.type_by_id(ty_id);
            if ty.base != BaseType::Unknown {
                return (ty.base, true);
            }
            current = ty.parent;
        }
        (BaseType::Unknown, true)
    }
}

// =============================================================================
// syntax analysis helpers

/// The parent name referenced by a syntax, if any.
fn parent_ref(syntax: &TypeSyntax) -> Option<Sp<Ident>> {
    match syntax {
        TypeSyntax::TypeRef(name) => Some(name.clone()),
        TypeSyntax::IntegerEnum { base: Some(name), .. } => Some(name.clone()),
        TypeSyntax::Constrained { base, .. } => parent_ref(base),
        _ => None,
    }
}

/// The primitive a syntax is directly rooted in, if it needs no lookup.
fn primitive_parent(syntax: &TypeSyntax, primitives: &Primitives) -> Option<TypeId> {
    match syntax {
        TypeSyntax::OctetString => Some(primitives.octet_string),
        TypeSyntax::ObjectIdentifier => Some(primitives.object_identifier),
        TypeSyntax::IntegerEnum { base: None, .. } => Some(primitives.integer),
        TypeSyntax::Bits { .. } => Some(primitives.bits),
        TypeSyntax::Constrained { base, .. } => primitive_parent(base, primitives),
        _ => None,
    }
}

/// Base type derivable from the syntax alone.
fn derive_base(syntax: &TypeSyntax) -> BaseType {
    match syntax {
        TypeSyntax::OctetString => BaseType::OctetString,
        TypeSyntax::ObjectIdentifier => BaseType::ObjectIdentifier,
        TypeSyntax::Bits { .. } => BaseType::Bits,
        TypeSyntax::IntegerEnum { base: None, .. } => BaseType::Integer,
        TypeSyntax::Constrained { base, .. } => derive_base(base),
        TypeSyntax::TypeRef(name) if name.value == "INTEGER" => BaseType::Integer,
        _ => BaseType::Unknown,
    }
}

fn collect_named(syntax: &TypeSyntax) -> (Vec<NamedNumber>, Vec<NamedNumber>) {
    match syntax {
        TypeSyntax::IntegerEnum { named_numbers, .. } => (named_numbers.clone(), Vec::new()),
        TypeSyntax::Bits { named_bits } => (Vec::new(), named_bits.clone()),
        TypeSyntax::Constrained { base, .. } => collect_named(base),
        _ => (Vec::new(), Vec::new()),
    }
}

fn collect_constraints(syntax: &TypeSyntax) -> (Vec<RangeItem>, Vec<RangeItem>) {
    match syntax {
        TypeSyntax::Constrained { constraint, .. } => match constraint {
            Constraint::Size(items) => (items.clone(), Vec::new()),
            Constraint::Range(items) => (Vec::new(), items.clone()),
        },
        _ => (Vec::new(), Vec::new()),
    }
}
