use serde::Serialize;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Set of card properties a run is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct CardPropertyFilter(u8);

impl CardPropertyFilter {
    pub const NONE: Self = Self(0);
    pub const OPEN: Self = Self(1);
    pub const WITH_CHECKLIST: Self = Self(1 << 1);
    pub const WITH_DESCRIPTION: Self = Self(1 << 2);
    pub const WITH_ATTACHMENT: Self = Self(1 << 3);
    pub const ALL: Self = Self(
        Self::OPEN.0 | Self::WITH_CHECKLIST.0 | Self::WITH_DESCRIPTION.0 | Self::WITH_ATTACHMENT.0,
    );

    const NAMED: [(Self, &'static str); 4] = [
        (Self::OPEN, "OPEN"),
        (Self::WITH_CHECKLIST, "WITH_CHECKLIST"),
        (Self::WITH_DESCRIPTION, "WITH_DESCRIPTION"),
        (Self::WITH_ATTACHMENT, "WITH_ATTACHMENT"),
    ];

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when exactly `flag` is set and nothing else.
    pub fn is_only(self, flag: Self) -> bool {
        self == flag
    }

    /// Individual flags set in `self`, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Self> {
        Self::NAMED
            .into_iter()
            .map(|(flag, _)| flag)
            .filter(move |flag| self.contains(*flag))
    }
}

impl BitOr for CardPropertyFilter {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CardPropertyFilter {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CardPropertyFilter {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for CardPropertyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", names.join("|"))
    }
}
