/// Attaches a [`Span`][crate::pos::Span] to a value, producing an [`Sp`][crate::pos::Sp].
///
/// `sp!(span => value)` uses the given span; `sp!(value)` uses the null span
/// (for fabricated nodes that have no source location).
macro_rules! sp {
    ($span:expr => $value:expr) => {
        $crate::pos::Sp { span: $span, value: $value }
    };
    ($value:expr) => {
        $crate::pos::Sp { span: $crate::pos::Span::NULL, value: $value }
    };
}

/// Defines a `u32`-backed index newtype for an arena.
///
/// These are plain indices rather than `NonZeroU32` ids because every arena
/// here has a meaningful element at index 0 (e.g. the trie pseudo-root).
macro_rules! newtype_index {
    (
        $(#[$meta:meta])*
        pub struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $Name(pub u32);

        impl $Name {
            #[inline]
            pub fn index(self) -> usize { self.0 as usize }

            #[inline]
            pub fn from_index(index: usize) -> Self {
                assert!(index <= u32::MAX as usize, concat!(stringify!($Name), " overflow"));
                $Name(index as u32)
            }
        }

        impl std::fmt::Debug for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($Name), "({})"), self.0)
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}
