//! Phase 2: bind imports.
//!
//! Flattened per-symbol imports are grouped back by source module and bound
//! through an ordered fallback chain: direct resolution, the fixed alias
//! table, forwarding through the candidate's own imports, and partial
//! resolution.  A final transitive collapse rewrites every binding to the
//! module that actually defines the symbol so later lookups are one hop.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::trace;

use crate::diagnostic::{codes, Severity};
use crate::mib::UnresolvedKind;
use crate::pos::Span;

use super::Resolver;

/// Language constructs that appear in IMPORTS clauses but are not symbols.
const MACRO_SYMBOLS: [&str; 10] = [
    "OBJECT-TYPE",
    "MODULE-IDENTITY",
    "OBJECT-IDENTITY",
    "NOTIFICATION-TYPE",
    "TEXTUAL-CONVENTION",
    "OBJECT-GROUP",
    "NOTIFICATION-GROUP",
    "MODULE-COMPLIANCE",
    "AGENT-CAPABILITIES",
    "TRAP-TYPE",
];

/// Historical renames seen in the wild.
const MODULE_ALIASES: [(&str, &str); 4] = [
    ("SNMPv2-SMI-v1", "SNMPv2-SMI"),
    ("SNMPv2-TC-v1", "SNMPv2-TC"),
    ("RFC1315-MIB", "FRAME-RELAY-DTE-MIB"),
    ("RFC-1213", "RFC1213-MIB"),
];

fn alias_of(module: &str) -> Option<&'static str> {
    MODULE_ALIASES
        .iter()
        .find(|(from, _)| *from == module)
        .map(|&(_, to)| to)
}

/// Bound on modules visited while forwarding one symbol.
const FORWARD_LIMIT: usize = 16;

impl Resolver<'_> {
    pub(super) fn resolve_imports(&mut self) {
        for idx in 0..self.srcs.len() {
            self.resolve_module_imports(idx);
        }
        self.collapse_transitive();
    }

    fn resolve_module_imports(&mut self, importer: usize) {
        // regroup the flattened rows by source module, keeping first-seen order
        let mut groups: IndexMap<String, Vec<(String, Span)>> = IndexMap::new();
        for import in &self.srcs[importer].imports {
            if MACRO_SYMBOLS.contains(&import.symbol.as_str()) {
                continue;
            }
            groups
                .entry(import.module.to_string())
                .or_default()
                .push((import.symbol.to_string(), import.span));
        }

        for (source_name, symbols) in groups {
            self.resolve_import_group(importer, &source_name, &symbols);
        }
    }

    fn resolve_import_group(
        &mut self,
        importer: usize,
        source_name: &str,
        symbols: &[(String, Span)],
    ) {
        let candidates: Vec<usize> = self
            .candidates
            .get(source_name)
            .cloned()
            .unwrap_or_default();

        if let Some(best) = self.best_covering_candidate(&candidates, symbols) {
            trace!(
                "{}: imports from {} bound directly",
                self.srcs[importer].name,
                source_name
            );
            for (symbol, _) in symbols {
                self.import_map[importer].insert(symbol.clone(), best);
            }
            return;
        }

        if self.config.allow_safe_fallbacks() {
            // alias table
            if let Some(alias) = alias_of(source_name) {
                let alias_candidates: Vec<usize> =
                    self.candidates.get(alias).cloned().unwrap_or_default();
                if let Some(best) = self.best_covering_candidate(&alias_candidates, symbols) {
                    trace!(
                        "{}: imports from {} bound via alias {}",
                        self.srcs[importer].name,
                        source_name,
                        alias
                    );
                    for (symbol, _) in symbols {
                        self.import_map[importer].insert(symbol.clone(), best);
                    }
                    return;
                }
            }

            // forwarding through a candidate's own imports
            for &candidate in &candidates {
                if let Some(bindings) = self.forward_all(candidate, symbols) {
                    trace!(
                        "{}: imports from {} bound by forwarding",
                        self.srcs[importer].name,
                        source_name
                    );
                    for (symbol, target) in bindings {
                        self.import_map[importer].insert(symbol, target);
                    }
                    return;
                }
            }

            // partial resolution: bind what the best candidate has
            let best_partial = candidates
                .iter()
                .map(|&candidate| {
                    let matched = symbols
                        .iter()
                        .filter(|(symbol, _)| self.def_names[candidate].contains(symbol))
                        .count();
                    (candidate, matched)
                })
                .filter(|&(_, matched)| matched > 0)
                .max_by_key(|&(_, matched)| matched);
            if let Some((candidate, _)) = best_partial {
                for (symbol, span) in symbols {
                    if self.def_names[candidate].contains(symbol) {
                        self.import_map[importer].insert(symbol.clone(), candidate);
                    } else {
                        self.emit(
                            importer,
                            *span,
                            Severity::Error,
                            codes::IMPORT_NOT_FOUND,
                            format!("`{symbol}` is not exported by `{source_name}`"),
                        );
                        self.push_unresolved(UnresolvedKind::Import, symbol, importer);
                    }
                }
                return;
            }
        }

        // nothing worked: the module (as far as these symbols are concerned)
        // does not exist
        let group_span = symbols.first().map(|(_, span)| *span).unwrap_or(Span::NULL);
        self.emit(
            importer,
            group_span,
            Severity::Error,
            codes::IMPORT_MODULE_NOT_FOUND,
            format!("cannot find module `{source_name}`"),
        );
        for (symbol, _) in symbols {
            self.push_unresolved(UnresolvedKind::Import, symbol, importer);
        }
    }

    /// The candidate defining *all* requested symbols, tiebroken by most
    /// symbols matched and then by the most recent LAST-UPDATED.  Earlier
    /// candidates win full ties, which keeps resolution deterministic.
    fn best_covering_candidate(&self, candidates: &[usize], symbols: &[(String, Span)]) -> Option<usize> {
        let mut best: Option<usize> = None;
        for &candidate in candidates {
            let covers_all = symbols
                .iter()
                .all(|(symbol, _)| self.def_names[candidate].contains(symbol));
            if !covers_all {
                continue;
            }
            match best {
                None => best = Some(candidate),
                Some(current) => {
                    if self.normalized_updated[candidate] > self.normalized_updated[current] {
                        best = Some(candidate);
                    }
                }
            }
        }
        best
    }

    /// Try to locate every symbol through `candidate`: directly defined, or
    /// reachable by following the candidate's own imports to the original
    /// source.  All symbols must be found for forwarding to succeed.
    fn forward_all(
        &self,
        candidate: usize,
        symbols: &[(String, Span)],
    ) -> Option<HashMap<String, usize>> {
        let mut bindings = HashMap::new();
        for (symbol, _) in symbols {
            let mut visited = HashSet::new();
            let target = self.forward_symbol(candidate, symbol, &mut visited)?;
            bindings.insert(symbol.clone(), target);
        }
        Some(bindings)
    }

    fn forward_symbol(
        &self,
        module_idx: usize,
        symbol: &str,
        visited: &mut HashSet<usize>,
    ) -> Option<usize> {
        if visited.len() >= FORWARD_LIMIT || !visited.insert(module_idx) {
            return None;
        }
        if self.def_names[module_idx].contains(symbol) {
            return Some(module_idx);
        }
        // follow the module's own source-level import of this symbol
        let forwarded_from = self.srcs[module_idx]
            .imports
            .iter()
            .find(|import| import.symbol == *symbol)?
            .module
            .to_string();
        for &next in self.candidates.get(&forwarded_from)? {
            if let Some(found) = self.forward_symbol(next, symbol, visited) {
                return Some(found);
            }
        }
        None
    }

    /// Rewrite each binding `(module, symbol) → target` to the module that
    /// actually defines the symbol, following re-export chains.  A visited
    /// set tolerates cycles.
    fn collapse_transitive(&mut self) {
        for idx in 0..self.srcs.len() {
            let symbols: Vec<String> = self.import_map[idx].keys().cloned().collect();
            for symbol in symbols {
                let mut target = self.import_map[idx][&symbol];
                let mut visited: HashSet<usize> = HashSet::from([idx]);
                while !self.def_names[target].contains(&symbol) {
                    if !visited.insert(target) {
                        break;
                    }
                    match self.import_map[target].get(&symbol) {
                        Some(&next) => target = next,
                        None => break,
                    }
                }
                self.import_map[idx].insert(symbol, target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_table() {
        assert_eq!(alias_of("SNMPv2-SMI-v1"), Some("SNMPv2-SMI"));
        assert_eq!(alias_of("RFC-1213"), Some("RFC1213-MIB"));
        assert_eq!(alias_of("RFC1315-MIB"), Some("FRAME-RELAY-DTE-MIB"));
        assert_eq!(alias_of("IF-MIB"), None);
    }

    #[test]
    fn macro_symbols_are_constructs() {
        assert!(MACRO_SYMBOLS.contains(&"OBJECT-TYPE"));
        assert!(MACRO_SYMBOLS.contains(&"TRAP-TYPE"));
        assert!(!MACRO_SYMBOLS.contains(&"Integer32"));
    }
}
