//! SMI identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A validated SMI identifier (an ASN.1 `identifier` or `typereference`).
///
/// Accepts letters, digits, hyphens and underscores after a leading letter.
/// Underscores are invalid SMI but appear in vendor MIBs; they are accepted
/// here and flagged by the resolver (`identifier-underscore`) instead of
/// being rejected at parse time.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ident {
    name: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseIdentError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier must begin with a letter")]
    BadStart,
    #[error("invalid character {0:?} in identifier")]
    BadChar(char),
    #[error("identifier may not end with a hyphen")]
    TrailingHyphen,
    #[error("identifier may not contain consecutive hyphens")]
    DoubleHyphen,
}

impl Ident {
    /// Construct an identifier that is statically known to be valid
    /// (names of synthetic definitions, well-known roots, and so on).
    pub fn new_unchecked(name: &str) -> Ident {
        debug_assert!(name.parse::<Ident>().is_ok(), "bad static ident: {name:?}");
        Ident { name: name.to_owned() }
    }

    /// Names of seeded ASN.1 primitives (`OCTET STRING`,
    /// `OBJECT IDENTIFIER`) contain a space and bypass validation.
    pub(crate) fn primitive(name: &str) -> Ident {
        Ident { name: name.to_owned() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// True for `typereference`-style names (initial uppercase).
    pub fn is_uppercase(&self) -> bool {
        self.name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
    }

    pub fn contains_hyphen(&self) -> bool {
        self.name.contains('-')
    }

    pub fn contains_underscore(&self) -> bool {
        self.name.contains('_')
    }
}

impl FromStr for Ident {
    type Err = ParseIdentError;

    fn from_str(s: &str) -> Result<Ident, ParseIdentError> {
        let mut chars = s.chars();
        match chars.next() {
            None => return Err(ParseIdentError::Empty),
            Some(c) if !c.is_ascii_alphabetic() => return Err(ParseIdentError::BadStart),
            Some(_) => {}
        }
        let mut prev_hyphen = false;
        for c in chars {
            match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => prev_hyphen = false,
                '-' if prev_hyphen => return Err(ParseIdentError::DoubleHyphen),
                '-' => prev_hyphen = true,
                other => return Err(ParseIdentError::BadChar(other)),
            }
        }
        if s.ends_with('-') {
            return Err(ParseIdentError::TrailingHyphen);
        }
        Ok(Ident { name: s.to_owned() })
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ident({})", self.name)
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl Borrow<str> for Ident {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl PartialEq<str> for Ident {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for Ident {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_smi_names() {
        assert!("ifTable".parse::<Ident>().is_ok());
        assert!("SNMPv2-SMI".parse::<Ident>().is_ok());
        assert!("mib-2".parse::<Ident>().is_ok());
        // underscore is tolerated; the resolver lints it
        assert!("my_bad_name".parse::<Ident>().is_ok());
    }

    #[test]
    fn rejects_malformed_names() {
        assert_eq!("".parse::<Ident>(), Err(ParseIdentError::Empty));
        assert_eq!("9fine".parse::<Ident>(), Err(ParseIdentError::BadStart));
        assert_eq!("a--b".parse::<Ident>(), Err(ParseIdentError::DoubleHyphen));
        assert_eq!("trailing-".parse::<Ident>(), Err(ParseIdentError::TrailingHyphen));
        assert_eq!("a.b".parse::<Ident>(), Err(ParseIdentError::BadChar('.')));
    }
}
