//! Locating, parsing and lowering MIB sources, and driving the resolver.
//!
//! The loader owns the [`SourceMap`] so callers can render parse
//! diagnostics with full source context after the load.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::diagnostic::{DiagnosticConfig, Strictness};
use crate::lower;
use crate::mib::Mib;
use crate::module::Module;
use crate::parse::{self, ParseDiagnostic};
use crate::pos::SourceMap;
use crate::resolve;

/// Where MIB text comes from.
#[derive(Debug, Clone)]
pub enum Source {
    /// A file, or a directory tree scanned recursively.
    Path(PathBuf),
    /// Compiled-in content: `(name, text)` pairs.
    Embedded(Vec<(String, String)>),
}

/// Options recognized by [`Loader`].
#[derive(Debug, Default)]
pub struct LoadOptions {
    sources: Vec<Source>,
    modules: Option<Vec<String>>,
    system_paths: bool,
    strictness: Strictness,
}

impl LoadOptions {
    pub fn new() -> LoadOptions {
        LoadOptions::default()
    }

    pub fn source(mut self, source: Source) -> LoadOptions {
        self.sources.push(source);
        self
    }

    pub fn path(self, path: impl Into<PathBuf>) -> LoadOptions {
        self.source(Source::Path(path.into()))
    }

    pub fn embedded(self, content: Vec<(String, String)>) -> LoadOptions {
        self.source(Source::Embedded(content))
    }

    /// Restrict the load to the named modules and their transitive imports.
    pub fn modules(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> LoadOptions {
        self.modules = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Also scan the OS-standard MIB directories.
    pub fn system_paths(mut self) -> LoadOptions {
        self.system_paths = true;
        self
    }

    pub fn strictness(mut self, strictness: Strictness) -> LoadOptions {
        self.strictness = strictness;
        self
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no sources configured")]
    NoSources,
}

/// Extensions treated as MIB text.  Files with no extension are accepted
/// too; OS MIB directories are full of them.
const MIB_EXTENSIONS: [&str; 4] = ["mib", "txt", "my", "smi"];

fn system_mib_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("/usr/share/snmp/mibs"),
        PathBuf::from("/usr/share/mibs"),
        PathBuf::from("/usr/local/share/snmp/mibs"),
    ];
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(".snmp/mibs"));
    }
    paths
}

/// Parses and lowers every selected source, then resolves.
pub struct Loader {
    options: LoadOptions,
    source_map: SourceMap,
    parse_diagnostics: Vec<ParseDiagnostic>,
}

impl Loader {
    pub fn with_options(options: LoadOptions) -> Loader {
        Loader {
            options,
            source_map: SourceMap::new(),
            parse_diagnostics: Vec::new(),
        }
    }

    pub fn load(&mut self) -> Result<Mib, LoadError> {
        if self.options.sources.is_empty() && !self.options.system_paths {
            return Err(LoadError::NoSources);
        }
        let config = DiagnosticConfig::from_strictness(self.options.strictness);

        let mut files: Vec<(String, Vec<u8>)> = Vec::new();
        let sources = std::mem::take(&mut self.options.sources);
        for source in &sources {
            match source {
                Source::Path(path) => collect_path(path, &mut files)?,
                Source::Embedded(content) => {
                    for (name, text) in content {
                        files.push((name.clone(), text.clone().into_bytes()));
                    }
                }
            }
        }
        if self.options.system_paths {
            for path in system_mib_paths() {
                if path.is_dir() {
                    collect_path(&path, &mut files)?;
                }
            }
        }
        self.options.sources = sources;

        let mut modules: Vec<Module> = Vec::new();
        for (name, bytes) in &files {
            let file_id = self.source_map.add(name, bytes);
            let (root, diags) = parse::parse_file(file_id, bytes);
            if root.modules.is_empty() {
                warn!("{name}: no modules parsed");
            }
            modules.extend(lower::lower_file(&root, &diags, bytes, &config));
            self.parse_diagnostics.extend(diags);
        }
        debug!("loaded {} modules from {} files", modules.len(), files.len());

        if let Some(wanted) = self.options.modules.clone() {
            modules = restrict_modules(modules, &wanted);
        }

        Ok(resolve::resolve(modules, &config))
    }

    /// The source map for rendering parse diagnostics with context.
    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    pub fn parse_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }
}

/// One-shot convenience wrapper.
pub fn load(options: LoadOptions) -> Result<Mib, LoadError> {
    Loader::with_options(options).load()
}

fn collect_path(path: &Path, files: &mut Vec<(String, Vec<u8>)>) -> Result<(), LoadError> {
    if path.is_dir() {
        let entries = fs::read_dir(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        let mut children: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect();
        children.sort();
        for child in children {
            let hidden = child
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'));
            if hidden {
                continue;
            }
            if child.is_dir() {
                collect_path(&child, files)?;
            } else if looks_like_mib(&child) {
                read_file(&child, files)?;
            }
        }
        Ok(())
    } else {
        read_file(path, files)
    }
}

fn looks_like_mib(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => MIB_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => true,
    }
}

fn read_file(path: &Path, files: &mut Vec<(String, Vec<u8>)>) -> Result<(), LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    files.push((path.display().to_string(), bytes));
    Ok(())
}

/// Keep only the wanted modules and everything they transitively import.
fn restrict_modules(modules: Vec<Module>, wanted: &[String]) -> Vec<Module> {
    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, module) in modules.iter().enumerate() {
        by_name.entry(module.name.as_str()).or_default().push(idx);
    }

    let mut keep: HashSet<usize> = HashSet::new();
    let mut queue: VecDeque<String> = wanted.iter().cloned().collect();
    let mut seen_names: HashSet<String> = HashSet::new();
    while let Some(name) = queue.pop_front() {
        if !seen_names.insert(name.clone()) {
            continue;
        }
        let Some(indices) = by_name.get(name.as_str()) else {
            continue;
        };
        for &idx in indices {
            if keep.insert(idx) {
                for import in &modules[idx].imports {
                    queue.push_back(import.module.to_string());
                }
            }
        }
    }

    modules
        .into_iter()
        .enumerate()
        .filter_map(|(idx, module)| keep.contains(&idx).then_some(module))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_source_loads() {
        let options = LoadOptions::new().embedded(vec![(
            "TEST-MIB".to_owned(),
            "TEST-MIB DEFINITIONS ::= BEGIN\n\
             testRoot OBJECT IDENTIFIER ::= { iso 99 }\n\
             END\n"
                .to_owned(),
        )]);
        let mib = load(options).unwrap();
        let node = mib.find_node("testRoot").expect("testRoot");
        assert_eq!(node.oid.arcs(), &[1, 99]);
    }

    #[test]
    fn no_sources_is_an_error() {
        assert!(matches!(load(LoadOptions::new()), Err(LoadError::NoSources)));
    }

    #[test]
    fn restriction_follows_imports() {
        let source = "\
A-MIB DEFINITIONS ::= BEGIN
IMPORTS bRoot FROM B-MIB;
aThing OBJECT IDENTIFIER ::= { bRoot 1 }
END
B-MIB DEFINITIONS ::= BEGIN
bRoot OBJECT IDENTIFIER ::= { iso 7 }
END
C-MIB DEFINITIONS ::= BEGIN
cThing OBJECT IDENTIFIER ::= { iso 8 }
END";
        let options = LoadOptions::new()
            .embedded(vec![("all".to_owned(), source.to_owned())])
            .modules(["A-MIB"]);
        let mib = load(options).unwrap();
        assert!(mib.module("A-MIB").is_some());
        assert!(mib.module("B-MIB").is_some());
        assert!(mib.module("C-MIB").is_none());
        assert_eq!(mib.find_node("aThing").unwrap().oid.arcs(), &[1, 7, 1]);
    }

    #[test]
    fn mib_file_detection() {
        assert!(looks_like_mib(Path::new("IF-MIB.mib")));
        assert!(looks_like_mib(Path::new("IF-MIB.txt")));
        assert!(looks_like_mib(Path::new("IF-MIB")));
        assert!(!looks_like_mib(Path::new("notes.md")));
    }
}
