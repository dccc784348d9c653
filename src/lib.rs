//! rmib compiles SMIv1/SMIv2 MIB modules into a fully-resolved,
//! cross-linked object model that can be queried by name, qualified name,
//! or OID.
//!
//! The pipeline runs source bytes → tokens → AST → normalized
//! [`module::Module`] → resolved [`mib::Mib`].  The interesting work lives
//! in [`resolve`]: five phases that bind imports across modules, build the
//! type table, construct the OID trie in dependency order, and attach
//! table/row/column semantics.
//!
//! ```no_run
//! use rmib::loader::{load, LoadOptions};
//!
//! let mib = load(LoadOptions::new().path("./mibs")).unwrap();
//! let node = mib.find_node("IF-MIB::ifIndex").unwrap();
//! println!("{} = {}", node.name.as_ref().unwrap(), node.oid);
//! ```

#[macro_use]
mod util_macros;

pub mod pos;
pub use pos::{LineTable, SourceMap, Span, Sp};

pub mod ident;
pub use ident::{Ident, ParseIdentError};

pub mod oid;
pub use oid::{Oid, OidParseError};

pub mod diagnostic;
pub use diagnostic::{Diagnostic, DiagnosticConfig, Severity, Strictness};

pub mod token;

pub mod ast;
pub mod parse;

pub mod module;

pub mod lower;

pub mod base;

pub mod resolve;
pub use resolve::resolve;

pub mod mib;
pub use mib::{Access, Mib, Node, NodeKind, Status, Unresolved, UnresolvedKind};

pub mod loader;
pub use loader::{LoadError, LoadOptions, Loader, Source};
