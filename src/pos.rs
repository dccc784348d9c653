//! Source locations, spanned values, and the line tables that let a module
//! report (line, column) positions after its source bytes are gone.

use std::borrow::Cow;
use std::fmt;
use std::num::NonZeroU32;

use codespan_reporting::files as cs_files;

pub use codespan::{ByteIndex as BytePos, RawIndex};

/// Identifies a file added to a [`SourceMap`].  `None` marks spans on
/// fabricated definitions (e.g. the synthetic base modules).
pub type FileId = Option<NonZeroU32>;

/// A half-open byte range `[start, end)` into a source file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: BytePos,
    pub end: BytePos,
    pub file_id: FileId,
}

impl Span {
    /// The synthetic sentinel span, used for definitions fabricated from code.
    pub const NULL: Span = Span {
        start: BytePos(0),
        end: BytePos(0),
        file_id: None,
    };

    pub fn new(file_id: FileId, start: impl Into<BytePos>, end: impl Into<BytePos>) -> Span {
        let (start, end) = (start.into(), end.into());
        assert!(end >= start);
        Span { start, end, file_id }
    }

    pub fn is_null(&self) -> bool {
        self.file_id.is_none()
    }

    /// Combine two spans in the same file by taking the start of the earlier
    /// span and the end of the later span.
    pub fn merge(self, other: Span) -> Span {
        assert_eq!(self.file_id, other.file_id);
        Span {
            file_id: self.file_id,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Default for Span {
    fn default() -> Span {
        Span::NULL
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start.to_usize()..span.end.to_usize()
    }
}

// =============================================================================

/// A value with a span.  The span is excluded from comparisons and hashes.
#[derive(Copy, Clone, Default)]
pub struct Sp<T: ?Sized> {
    pub span: Span,
    pub value: T,
}

impl<T> Sp<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sp<U> {
        Sp { span: self.span, value: f(self.value) }
    }

    pub fn sp_ref(&self) -> Sp<&T> {
        Sp { span: self.span, value: &self.value }
    }
}

impl<T: fmt::Debug> fmt::Debug for Sp<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sp")
            .field("span", &(self.span.start.0..self.span.end.0))
            .field("value", &self.value)
            .finish()
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for Sp<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<T: ?Sized + Eq> Eq for Sp<T> {}

impl<T: ?Sized + PartialEq> PartialEq for Sp<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: ?Sized + PartialEq> PartialEq<T> for Sp<T> {
    fn eq(&self, other: &T) -> bool {
        self.value == *other
    }
}

impl<T: ?Sized + std::hash::Hash> std::hash::Hash for Sp<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: ?Sized> std::ops::Deref for Sp<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: ?Sized> std::ops::DerefMut for Sp<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: ?Sized, U: ?Sized> AsRef<U> for Sp<T>
where
    T: AsRef<U>,
{
    fn as_ref(&self) -> &U {
        self.value.as_ref()
    }
}

// =============================================================================

/// Byte offsets of line starts in a source file.
///
/// A module holds onto its line table so that spans recorded during parsing
/// can still be converted to 1-based (line, column) pairs long after the
/// source bytes have been released.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTable {
    starts: Vec<u32>,
}

impl LineTable {
    pub fn from_source(source: &[u8]) -> LineTable {
        let mut starts = vec![0];
        for (i, &b) in source.iter().enumerate() {
            if b == b'\n' {
                starts.push(i as u32 + 1);
            }
        }
        LineTable { starts }
    }

    /// Convert a byte position to a 1-based (line, column) pair.
    ///
    /// Columns are byte columns; MIB source is ASCII in practice.
    pub fn location(&self, pos: BytePos) -> (u32, u32) {
        let offset = pos.0;
        let line = match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        (line as u32 + 1, offset - self.starts[line] + 1)
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

// =============================================================================

/// All source files loaded in one compilation, with text held in a form
/// suitable for rendering diagnostics.
///
/// Implements [`codespan_reporting::files::Files`] so parse-time diagnostics
/// can be rendered with full source context by the CLI.
#[derive(Debug, Clone)]
pub struct SourceMap {
    inner: cs_files::SimpleFiles<String, String>,
}

impl SourceMap {
    pub fn new() -> SourceMap {
        SourceMap { inner: cs_files::SimpleFiles::new() }
    }

    /// Add a file, returning its id.  Non-UTF-8 bytes are replaced with `?`
    /// so that byte offsets in spans stay valid for rendering.
    pub fn add(&mut self, name: &str, source: &[u8]) -> FileId {
        let id = self.inner.add(name.to_owned(), replace_non_utf8(source).into_owned());
        NonZeroU32::new(id as u32 + 1)
    }

    fn external_to_internal(file_id: FileId) -> Result<usize, cs_files::Error> {
        // spans with no file id are not fit for rendering
        let id = file_id.ok_or(cs_files::Error::FileMissing)?;
        Ok(id.get() as usize - 1)
    }
}

impl Default for SourceMap {
    fn default() -> Self {
        SourceMap::new()
    }
}

impl<'a> cs_files::Files<'a> for SourceMap {
    type FileId = FileId;
    type Name = String;
    type Source = &'a str;

    fn name(&self, file_id: FileId) -> Result<String, cs_files::Error> {
        self.inner.name(Self::external_to_internal(file_id)?)
    }

    fn source(&self, file_id: FileId) -> Result<&str, cs_files::Error> {
        self.inner.source(Self::external_to_internal(file_id)?)
    }

    fn line_index(&self, file_id: FileId, byte_index: usize) -> Result<usize, cs_files::Error> {
        self.inner.line_index(Self::external_to_internal(file_id)?, byte_index)
    }

    fn line_range(&self, file_id: FileId, line_index: usize) -> Result<std::ops::Range<usize>, cs_files::Error> {
        self.inner.line_range(Self::external_to_internal(file_id)?, line_index)
    }
}

/// Length-preserving `from_utf8_lossy`: each bad byte becomes one `?`, so
/// spans computed on the raw bytes index correctly into the result.
fn replace_non_utf8(s: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(s) {
        Ok(valid) => Cow::Borrowed(valid),
        Err(_) => {
            let mut out = String::with_capacity(s.len());
            let mut rest = s;
            loop {
                match std::str::from_utf8(rest) {
                    Ok(tail) => {
                        out.push_str(tail);
                        break;
                    }
                    Err(err) => {
                        let (valid, bad) = rest.split_at(err.valid_up_to());
                        out.push_str(std::str::from_utf8(valid).expect("validated"));
                        let bad_len = err.error_len().unwrap_or(bad.len());
                        for _ in 0..bad_len {
                            out.push('?');
                        }
                        rest = &bad[bad_len..];
                    }
                }
            }
            debug_assert_eq!(out.len(), s.len());
            Cow::Owned(out)
        }
    }
}
