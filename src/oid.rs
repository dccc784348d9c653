//! Object identifiers as ordered sequences of 32-bit arcs.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use thiserror::Error;

/// Arc storage.  Nine inline arcs covers nearly every OID under
/// `1.3.6.1.4.1` without spilling to the heap.
type Arcs = SmallVec<[u32; 9]>;

/// An object identifier: an ordered sequence of unsigned 32-bit arcs.
///
/// Equality and ordering are componentwise.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Oid {
    arcs: Arcs,
}

#[derive(Debug, Error, PartialEq)]
pub enum OidParseError {
    #[error("empty OID")]
    Empty,
    #[error("invalid arc {0:?}")]
    BadArc(String),
}

impl Oid {
    pub fn new() -> Oid {
        Oid { arcs: Arcs::new() }
    }

    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    pub fn push(&mut self, arc: u32) {
        self.arcs.push(arc);
    }

    /// A new OID with `arc` appended.
    pub fn child(&self, arc: u32) -> Oid {
        let mut arcs = self.arcs.clone();
        arcs.push(arc);
        Oid { arcs }
    }

    /// The OID with the last arc removed, or `None` at the root.
    pub fn parent(&self) -> Option<Oid> {
        if self.arcs.is_empty() {
            return None;
        }
        Some(Oid { arcs: self.arcs[..self.arcs.len() - 1].into() })
    }

    pub fn last_arc(&self) -> Option<u32> {
        self.arcs.last().copied()
    }

    /// True when `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Oid) -> bool {
        other.arcs.len() >= self.arcs.len() && other.arcs[..self.arcs.len()] == self.arcs[..]
    }
}

impl FromStr for Oid {
    type Err = OidParseError;

    /// Parses dotted ASCII form.  A leading `.` is accepted and ignored.
    fn from_str(s: &str) -> Result<Oid, OidParseError> {
        let s = s.strip_prefix('.').unwrap_or(s);
        if s.is_empty() {
            return Err(OidParseError::Empty);
        }
        let mut arcs = Arcs::new();
        for part in s.split('.') {
            let arc = part
                .parse::<u32>()
                .map_err(|_| OidParseError::BadArc(part.to_owned()))?;
            arcs.push(arc);
        }
        Ok(Oid { arcs })
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({self})")
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Oid {
        Oid { arcs: arcs.into() }
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Oid {
        Oid { arcs: arcs.as_slice().into() }
    }
}

impl FromIterator<u32> for Oid {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Oid {
        Oid { arcs: iter.into_iter().collect() }
    }
}
