//! The multi-phase resolver.
//!
//! `resolve` ties a closed set of normalized modules together in five
//! phases: register, imports, types, OIDs, semantics.  Phases communicate
//! through the [`Resolver`] context, which owns every intermediate table;
//! nothing escapes until the finished [`Mib`] is returned.
//!
//! Failures never abort resolution.  Anything that cannot be bound is
//! recorded as a diagnostic plus an [`Unresolved`][crate::mib::Unresolved]
//! entry and the dependent definitions degrade gracefully (an object with
//! no type, a row with a missing index entry).

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::debug;

use crate::diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticSink, Severity};
use crate::mib::{Mib, ModuleId, NodeId, NotificationId, ObjectId, TypeId, UnresolvedKind};
use crate::module::Module;
use crate::pos::Span;

mod register;
mod imports;
mod types;
mod oids;
mod semantics;

pub(crate) use types::Primitives;

/// Maximum hops a symbol lookup will follow through import maps.  A fixed
/// stack array keeps the walk allocation-free and tolerant of cyclic
/// re-exports.
pub(crate) const LOOKUP_DEPTH: usize = 8;

/// Maximum passes of the type-parent worklist.
pub(crate) const TYPE_PASS_LIMIT: usize = 20;

/// Resolve a set of lowered modules into a [`Mib`].
///
/// The synthetic base modules are prepended automatically; a user module
/// whose name collides with a base module is dropped in favor of the base.
/// This is a synchronous pure function of its inputs.
pub fn resolve(modules: Vec<Module>, config: &DiagnosticConfig) -> Mib {
    let mut resolver = Resolver::new(config);
    resolver.register(modules);
    resolver.resolve_imports();
    resolver.resolve_types();
    resolver.resolve_oids();
    resolver.resolve_semantics();
    resolver.finish()
}

/// Shared state of one resolve.  Every per-module table is a `Vec` indexed
/// by the module's position in [`Resolver::srcs`] (base modules first, then
/// user modules in input order).
pub(crate) struct Resolver<'a> {
    pub(crate) config: &'a DiagnosticConfig,
    pub(crate) mib: Mib,
    pub(crate) sink: DiagnosticSink,

    /// Source modules in processing order.
    pub(crate) srcs: Vec<Module>,
    /// Resolved module id for each source module.
    pub(crate) resolved: Vec<ModuleId>,
    /// Module name → candidate source indices (several revisions of one
    /// module may coexist).
    pub(crate) candidates: IndexMap<String, Vec<usize>>,
    /// Cached definition-name sets for fast import probing.
    pub(crate) def_names: Vec<HashSet<String>>,
    /// Bound imports: symbol → source index of the defining module.
    pub(crate) import_map: Vec<HashMap<String, usize>>,
    /// Normalized LAST-UPDATED per module, for tiebreaks.
    pub(crate) normalized_updated: Vec<Option<String>>,

    /// Per-module OID scope: names assigned to trie nodes.
    pub(crate) node_scope: Vec<HashMap<String, NodeId>>,
    /// Per-module type scope.
    pub(crate) type_scope: Vec<HashMap<String, TypeId>>,
    /// Per-module notification scope.
    pub(crate) notif_scope: Vec<HashMap<String, NotificationId>>,
    /// Node assigned to each definition (indexes parallel `definitions`).
    pub(crate) def_nodes: Vec<Vec<Option<NodeId>>>,
    /// Object materialized for each definition.
    pub(crate) def_objects: Vec<Vec<Option<ObjectId>>>,

    /// Cached positions of the type-fallback modules.
    pub(crate) smi_idx: Option<usize>,
    pub(crate) tc_idx: Option<usize>,
    pub(crate) rfc1155_idx: Option<usize>,
    /// Seeded ASN.1 primitives, set by the type phase.
    pub(crate) primitives: Option<Primitives>,
}

impl<'a> Resolver<'a> {
    fn new(config: &'a DiagnosticConfig) -> Resolver<'a> {
        Resolver {
            config,
            mib: Mib::new(),
            sink: DiagnosticSink::new(),
            srcs: Vec::new(),
            resolved: Vec::new(),
            candidates: IndexMap::new(),
            def_names: Vec::new(),
            import_map: Vec::new(),
            normalized_updated: Vec::new(),
            node_scope: Vec::new(),
            type_scope: Vec::new(),
            notif_scope: Vec::new(),
            def_nodes: Vec::new(),
            def_objects: Vec::new(),
            smi_idx: None,
            tc_idx: None,
            rfc1155_idx: None,
            primitives: None,
        }
    }

    fn finish(mut self) -> Mib {
        let (diags, counts) = self.sink.into_parts();
        self.mib.set_diagnostics(diags, counts);
        debug!(
            "resolved {} modules, {} nodes, {} objects, {} types",
            self.mib.module_count(),
            self.mib.node_count(),
            self.mib.object_count(),
            self.mib.type_count(),
        );
        self.mib
    }

    // ------------------------------------------------------------------
    // shared helpers

    /// Emit a diagnostic attributed to a span inside a source module.
    pub(crate) fn emit(
        &mut self,
        src_idx: usize,
        span: Span,
        severity: Severity,
        code: &'static str,
        message: String,
    ) {
        let module = &self.srcs[src_idx];
        let (line, column) = module.location(span);
        let diag = Diagnostic::new(severity, code, message)
            .for_module(module.name.as_str())
            .at(line, column);
        self.sink.emit(self.config, diag);
    }

    pub(crate) fn push_unresolved(&mut self, kind: UnresolvedKind, symbol: &str, src_idx: usize) {
        let module = self.srcs[src_idx].name.to_string();
        self.mib.push_unresolved(kind, symbol, &module);
    }

    /// Find the source module that defines `name`, starting from
    /// `src_idx`'s scope and following bound imports.
    ///
    /// The walk checks each module's own definitions before following its
    /// import of the symbol, visits at most [`LOOKUP_DEPTH`] modules, and
    /// uses a fixed-size visited array so cyclic re-exports terminate.
    pub(crate) fn lookup_symbol(&self, src_idx: usize, name: &str) -> Option<usize> {
        let mut visited = [usize::MAX; LOOKUP_DEPTH];
        let mut current = src_idx;
        for depth in 0..LOOKUP_DEPTH {
            if visited[..depth].contains(&current) {
                return None;
            }
            visited[depth] = current;
            if self.def_names[current].contains(name) {
                return Some(current);
            }
            match self.import_map[current].get(name) {
                Some(&next) => current = next,
                None => return None,
            }
        }
        None
    }

    /// True when `a` should be preferred over `b` as the owner of a node.
    pub(crate) fn module_preferred(&self, a: usize, b: usize) -> bool {
        let rank_a = self.srcs[a].language.rank();
        let rank_b = self.srcs[b].language.rank();
        if rank_a != rank_b {
            return rank_a > rank_b;
        }
        // newer LAST-UPDATED wins; lexical comparison works on the
        // normalized form
        self.normalized_updated[a] > self.normalized_updated[b]
    }
}

/// Normalize a LAST-UPDATED timestamp for lexical comparison.
///
/// SMIv1-era two-digit years (`"YYMMDDhhmmZ"`) expand with a 1970 pivot:
/// `YY >= 70` means 19YY, otherwise 20YY.  Four-digit-year SMIv2 forms pass
/// through unchanged.
pub(crate) fn normalize_timestamp(ts: &str) -> String {
    if ts.len() == 11 {
        if let Ok(yy) = ts[..2].parse::<u32>() {
            let century = if yy >= 70 { "19" } else { "20" };
            return format!("{century}{ts}");
        }
    }
    ts.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Strictness;

    #[test]
    fn timestamp_normalization() {
        // two-digit years split at 70
        assert_eq!(normalize_timestamp("9502120000Z"), "199502120000Z");
        assert_eq!(normalize_timestamp("0501010000Z"), "200501010000Z");
        assert_eq!(normalize_timestamp("7001010000Z"), "197001010000Z");
        // four-digit years pass through
        assert_eq!(normalize_timestamp("200405080000Z"), "200405080000Z");
        // newer compares greater after normalization
        assert!(normalize_timestamp("0501010000Z") > normalize_timestamp("9502120000Z"));
    }

    #[test]
    fn base_modules_alone_resolve_clean() {
        let config = DiagnosticConfig::from_strictness(Strictness::Normal);
        let mib = resolve(Vec::new(), &config);
        assert!(!mib.has_errors());
        assert!(mib.unresolved().is_empty());
        assert_eq!(mib.module_count(), 7);

        let enterprises = mib.find_node("enterprises").expect("enterprises");
        assert_eq!(enterprises.oid.arcs(), &[1, 3, 6, 1, 4, 1]);
        let by_oid = mib.find_node("1.3.6.1.4.1").expect("by oid");
        assert_eq!(by_oid.oid, enterprises.oid);

        assert!(mib.find_node("iso").is_some());
        assert!(mib.find_node("mib-2").is_some());
        assert!(mib.type_by_name("INTEGER").is_some());
        assert!(mib.type_by_name("Integer32").is_some());
    }

    #[test]
    fn resolve_is_deterministic() {
        let config = DiagnosticConfig::from_strictness(Strictness::Normal);
        let a = resolve(Vec::new(), &config);
        let b = resolve(Vec::new(), &config);
        assert_eq!(a.diagnostics(), b.diagnostics());
        assert_eq!(a.node_count(), b.node_count());
        assert_eq!(a.type_count(), b.type_count());
        assert_eq!(a.module_count(), b.module_count());
    }
}
