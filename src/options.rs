use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Behaviour flags carried by a document and every collection it hands out.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Options(u8);

impl Options {
    /// Let `append` parse string content as markup without asking per call.
    pub const ALLOW_UNSAFE_MARKUP: Options = Options(1);

    /// Include text children when walking `children()`.
    pub const INCLUDE_TEXT_NODES: Options = Options(1 << 1);

    /// Never hand serialized output to the document's formatter.
    pub const SKIP_PRETTY_PRINT: Options = Options(1 << 2);

    pub const fn empty() -> Options {
        Options(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every flag set in `other` is also set in `self`.
    pub const fn contains(self, other: Options) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: Options) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Options) {
        self.0 &= !other.0;
    }
}

impl BitOr for Options {
    type Output = Options;

    fn bitor(self, rhs: Options) -> Options {
        Options(self.0 | rhs.0)
    }
}

impl BitOrAssign for Options {
    fn bitor_assign(&mut self, rhs: Options) {
        self.insert(rhs);
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Options::ALLOW_UNSAFE_MARKUP, "ALLOW_UNSAFE_MARKUP"),
            (Options::INCLUDE_TEXT_NODES, "INCLUDE_TEXT_NODES"),
            (Options::SKIP_PRETTY_PRINT, "SKIP_PRETTY_PRINT"),
        ];

        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();

        if set.is_empty() {
            f.write_str("Options(empty)")
        } else {
            write!(f, "Options({})", set.join(" | "))
        }
    }
}
