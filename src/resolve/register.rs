//! Phase 1: register modules.
//!
//! Prepends the synthetic base modules, creates the resolved module shells,
//! and builds the candidate/definition-name indices every later phase leans
//! on.

use std::collections::HashSet;

use log::{debug, warn};

use crate::base;
use crate::mib;
use crate::module::Module;

use super::{normalize_timestamp, Resolver};

impl Resolver<'_> {
    pub(super) fn register(&mut self, user_modules: Vec<Module>) {
        // base wins on a name collision; the user module is dropped
        let user_modules: Vec<Module> = user_modules
            .into_iter()
            .filter(|module| {
                if base::is_base_module(module.name.as_str()) {
                    warn!("dropping user module {} shadowing a base module", module.name);
                    false
                } else {
                    true
                }
            })
            .collect();

        let mut srcs: Vec<Module> = base::base_modules().as_ref().clone();
        srcs.extend(user_modules);

        for (idx, src) in srcs.iter().enumerate() {
            let mut shell = mib::Module::new(src.name.clone(), src.language);
            if let Some(identity) = src.identity() {
                shell.organization = identity.organization.clone();
                shell.contact_info = identity.contact_info.clone();
                shell.description = identity.description.clone();
                shell.revisions = identity.revisions.clone();
                shell.last_updated = identity.last_updated.clone();
            }
            let module_id = self.mib.add_module(shell);
            self.resolved.push(module_id);

            // lowering diagnostics were filtered at emission; carry them over
            self.sink.absorb(src.diagnostics.iter().cloned());

            self.normalized_updated.push(src.last_updated().map(normalize_timestamp));
            self.candidates.entry(src.name.to_string()).or_default().push(idx);
            self.def_names.push(
                src.definitions
                    .iter()
                    .map(|def| def.name.value.to_string())
                    .collect::<HashSet<String>>(),
            );

            match src.name.as_str() {
                base::SNMPV2_SMI => self.smi_idx = Some(idx),
                base::SNMPV2_TC => self.tc_idx = Some(idx),
                base::RFC1155_SMI => self.rfc1155_idx = Some(idx),
                _ => {}
            }

            self.import_map.push(Default::default());
            self.node_scope.push(Default::default());
            self.type_scope.push(Default::default());
            self.notif_scope.push(Default::default());
            self.def_nodes.push(vec![None; src.definitions.len()]);
            self.def_objects.push(vec![None; src.definitions.len()]);
        }

        debug!("registered {} modules ({} user)", srcs.len(), srcs.len() - 7);
        self.srcs = srcs;
    }
}
