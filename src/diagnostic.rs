//! The diagnostic taxonomy: severity ladder, stable codes, and the
//! strictness-driven configuration that decides what gets reported.
//!
//! Resolver phases never fail early; everything they have to say is collected
//! into a [`DiagnosticSink`] and transferred to the resulting
//! [`Mib`][crate::mib::Mib] when resolution finishes.

use std::fmt;

use enum_map::EnumMap;

/// Severity ladder, least to most severe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(enum_map::Enum, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Style,
    Warning,
    Minor,
    Error,
    Fatal,
}

/// Stable diagnostic codes.
///
/// These are a closed set; consumers match on them to accept or reject loads.
pub mod codes {
    /// An imported symbol could not be bound to any module.
    pub const IMPORT_NOT_FOUND: &str = "import-not-found";
    /// The module named in an IMPORTS clause does not exist.
    pub const IMPORT_MODULE_NOT_FOUND: &str = "import-module-not-found";
    /// A type reference could not be resolved.
    pub const TYPE_UNKNOWN: &str = "type-unknown";
    /// An OID definition's parent could not be resolved.
    pub const OID_ORPHAN: &str = "oid-orphan";
    /// An INDEX entry does not name a known object.
    pub const INDEX_UNRESOLVED: &str = "index-unresolved";
    /// A notification OBJECTS/VARIABLES entry does not name a known object.
    pub const OBJECTS_UNRESOLVED: &str = "objects-unresolved";
    /// An SMIv2 module has no MODULE-IDENTITY definition.
    pub const MISSING_MODULE_IDENTITY: &str = "missing-module-identity";
    /// LAST-UPDATED has no matching REVISION entry.
    pub const REVISION_LAST_UPDATED: &str = "revision-last-updated";
    /// An SMIv2 definition name contains a hyphen.
    pub const IDENTIFIER_HYPHEN_SMIV2: &str = "identifier-hyphen-smiv2";
    /// An OBJECT-GROUP member is not-accessible.
    pub const GROUP_NOT_ACCESSIBLE: &str = "group-not-accessible";
    /// A definition name contains an underscore.
    pub const IDENTIFIER_UNDERSCORE: &str = "identifier-underscore";
    /// The source text failed to parse; the rest of the module still loads.
    pub const PARSE_ERROR: &str = "parse-error";
    /// A type definition chain contains a cycle.
    pub const TYPE_CYCLE: &str = "type-cycle";
    /// An OID dependency chain contains a cycle.
    pub const OID_CYCLE: &str = "oid-cycle";
}

/// A single finding, attributed to a module at a 1-based (line, column).
/// Line 0 means the finding has no source location (module-level checks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub module: String,
    pub line: u32,
    pub column: u32,
}

impl Diagnostic {
    pub fn new(severity: Severity, code: &'static str, message: impl Into<String>) -> Diagnostic {
        Diagnostic {
            severity,
            code,
            message: message.into(),
            module: String::new(),
            line: 0,
            column: 0,
        }
    }

    pub fn for_module(mut self, module: impl Into<String>) -> Diagnostic {
        self.module = module.into();
        self
    }

    pub fn at(mut self, line: u32, column: u32) -> Diagnostic {
        self.line = line;
        self.column = column;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.severity, self.code, self.module)?;
        if self.line != 0 {
            write!(f, ":{}:{}", self.line, self.column)?;
        }
        write!(f, ": {}", self.message)
    }
}

// =============================================================================

/// Loader-level strictness, mapped onto a [`DiagnosticConfig`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[derive(strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Strictness {
    /// Report nothing; apply every fallback.
    Silent,
    /// Report errors only; apply every fallback.
    Permissive,
    /// Report `Minor` and above; apply safe fallbacks only.
    #[default]
    Normal,
    /// Report everything; no fallbacks.
    Strict,
}

/// Answers the two questions asked throughout the resolver: should this
/// finding be reported, and which fallbacks are permitted.
#[derive(Debug, Clone)]
pub struct DiagnosticConfig {
    /// Minimum reported severity; `None` suppresses everything.
    floor: Option<Severity>,
    /// Code patterns to drop (`oid-*` matches all oid codes).
    ignore_patterns: Vec<String>,
    safe_fallbacks: bool,
    best_guess_fallbacks: bool,
}

impl DiagnosticConfig {
    pub fn from_strictness(strictness: Strictness) -> DiagnosticConfig {
        let (floor, safe, best_guess) = match strictness {
            Strictness::Silent => (None, true, true),
            Strictness::Permissive => (Some(Severity::Error), true, true),
            Strictness::Normal => (Some(Severity::Minor), true, false),
            Strictness::Strict => (Some(Severity::Info), false, false),
        };
        DiagnosticConfig {
            floor,
            ignore_patterns: Vec::new(),
            safe_fallbacks: safe,
            best_guess_fallbacks: best_guess,
        }
    }

    /// Add a code pattern to suppress.  A trailing `*` matches any suffix.
    pub fn ignore(mut self, pattern: impl Into<String>) -> DiagnosticConfig {
        self.ignore_patterns.push(pattern.into());
        self
    }

    pub fn should_report(&self, code: &str, severity: Severity) -> bool {
        match self.floor {
            None => return false,
            Some(floor) if severity < floor => return false,
            Some(_) => {}
        }
        !self.ignore_patterns.iter().any(|pat| pattern_matches(pat, code))
    }

    /// Gates alias lookup, import forwarding, and partial import resolution.
    pub fn allow_safe_fallbacks(&self) -> bool {
        self.safe_fallbacks
    }

    /// Gates global type search, SMI-global-root OID parent inference, and
    /// global notification-object lookup.
    pub fn allow_best_guess_fallbacks(&self) -> bool {
        self.best_guess_fallbacks
    }
}

impl Default for DiagnosticConfig {
    fn default() -> DiagnosticConfig {
        DiagnosticConfig::from_strictness(Strictness::Normal)
    }
}

fn pattern_matches(pattern: &str, code: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => code.starts_with(prefix),
        None => pattern == code,
    }
}

// =============================================================================

/// Collects diagnostics during a resolve, applying the configured filter once
/// at the point of emission so every later consumer sees a stable list.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    counts: EnumMap<Severity, usize>,
}

impl DiagnosticSink {
    pub fn new() -> DiagnosticSink {
        DiagnosticSink::default()
    }

    pub fn emit(&mut self, config: &DiagnosticConfig, diag: Diagnostic) {
        if config.should_report(diag.code, diag.severity) {
            self.counts[diag.severity] += 1;
            self.diagnostics.push(diag);
        }
    }

    /// Takes diagnostics that were already filtered at an earlier stage
    /// (e.g. a module's lowering diagnostics).
    pub fn absorb(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.counts[diag.severity] += 1;
            self.diagnostics.push(diag);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.counts[Severity::Error] + self.counts[Severity::Fatal] > 0
    }

    pub fn counts(&self) -> &EnumMap<Severity, usize> {
        &self.counts
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (Vec<Diagnostic>, EnumMap<Severity, usize>) {
        (self.diagnostics, self.counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order() {
        assert!(Severity::Info < Severity::Style);
        assert!(Severity::Style < Severity::Warning);
        assert!(Severity::Warning < Severity::Minor);
        assert!(Severity::Minor < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!("minor".parse::<Severity>().unwrap(), Severity::Minor);
    }

    #[test]
    fn normal_config_reports_minor_and_up() {
        let config = DiagnosticConfig::from_strictness(Strictness::Normal);
        assert!(!config.should_report(codes::IDENTIFIER_HYPHEN_SMIV2, Severity::Warning));
        assert!(config.should_report(codes::REVISION_LAST_UPDATED, Severity::Minor));
        assert!(config.should_report(codes::OID_ORPHAN, Severity::Error));
        assert!(config.allow_safe_fallbacks());
        assert!(!config.allow_best_guess_fallbacks());
    }

    #[test]
    fn silent_config_reports_nothing() {
        let config = DiagnosticConfig::from_strictness(Strictness::Silent);
        assert!(!config.should_report(codes::OID_ORPHAN, Severity::Fatal));
        assert!(config.allow_best_guess_fallbacks());
    }

    #[test]
    fn ignore_patterns() {
        let config = DiagnosticConfig::from_strictness(Strictness::Strict)
            .ignore("oid-*")
            .ignore(codes::REVISION_LAST_UPDATED);
        assert!(!config.should_report(codes::OID_ORPHAN, Severity::Error));
        assert!(!config.should_report(codes::OID_CYCLE, Severity::Error));
        assert!(!config.should_report(codes::REVISION_LAST_UPDATED, Severity::Minor));
        assert!(config.should_report(codes::TYPE_UNKNOWN, Severity::Error));
    }

    #[test]
    fn sink_counts_and_errors() {
        let config = DiagnosticConfig::from_strictness(Strictness::Normal);
        let mut sink = DiagnosticSink::new();
        sink.emit(&config, Diagnostic::new(Severity::Warning, codes::IDENTIFIER_UNDERSCORE, "dropped"));
        assert!(!sink.has_errors());
        sink.emit(&config, Diagnostic::new(Severity::Error, codes::OID_ORPHAN, "kept"));
        assert!(sink.has_errors());
        assert_eq!(sink.diagnostics().len(), 1);
        assert_eq!(sink.counts()[Severity::Error], 1);
    }

    #[test]
    fn display_with_and_without_location() {
        let with = Diagnostic::new(Severity::Error, codes::OID_ORPHAN, "no parent")
            .for_module("FOO-MIB")
            .at(12, 3);
        assert_eq!(with.to_string(), "error [oid-orphan] FOO-MIB:12:3: no parent");
        let without = Diagnostic::new(Severity::Error, codes::MISSING_MODULE_IDENTITY, "missing")
            .for_module("FOO-MIB");
        assert_eq!(without.to_string(), "error [missing-module-identity] FOO-MIB: missing");
    }
}
