//! Helpers for driving the whole pipeline from inline MIB source.

#![allow(unused)]

use rmib::diagnostic::DiagnosticConfig;
use rmib::mib::Mib;
use rmib::{Severity, Strictness};

/// Parse, lower and resolve inline source at Normal strictness.
pub fn resolve_source(source: &str) -> Mib {
    resolve_with(source, Strictness::Normal)
}

pub fn resolve_with(source: &str, strictness: Strictness) -> Mib {
    let config = DiagnosticConfig::from_strictness(strictness);
    let (root, parse_diags) = rmib::parse::parse_file(None, source.as_bytes());
    let modules = rmib::lower::lower_file(&root, &parse_diags, source.as_bytes(), &config);
    rmib::resolve::resolve(modules, &config)
}

pub fn diag_codes(mib: &Mib) -> Vec<&'static str> {
    mib.diagnostics().iter().map(|d| d.code).collect()
}

pub fn has_diag(mib: &Mib, code: &str) -> bool {
    mib.diagnostics().iter().any(|d| d.code == code)
}

pub fn diag_with_severity(mib: &Mib, code: &str, severity: Severity) -> bool {
    mib.diagnostics()
        .iter()
        .any(|d| d.code == code && d.severity == severity)
}

/// A minimal well-formed SMIv2 header: imports plus a MODULE-IDENTITY so the
/// module does not trip `missing-module-identity`.
pub fn smiv2_module(name: &str, extra_imports: &str, body: &str) -> String {
    format!(
        r#"{name} DEFINITIONS ::= BEGIN
IMPORTS
    MODULE-IDENTITY, OBJECT-TYPE, NOTIFICATION-TYPE, Integer32,
    enterprises{extra_imports} FROM SNMPv2-SMI;

testModule MODULE-IDENTITY
    LAST-UPDATED "202401010000Z"
    ORGANIZATION "Test"
    CONTACT-INFO "test@example.org"
    DESCRIPTION  "Test module."
    REVISION     "202401010000Z"
    DESCRIPTION  "Initial."
    ::= {{ enterprises 4242 }}

{body}
END
"#
    )
}
