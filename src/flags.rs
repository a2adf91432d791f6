use crate::error::LogError;
use std::{
    fmt,
    ops::{BitOr, BitOrAssign},
    str::FromStr,
};

/// Decorations a sink writes ahead of each line.
///
/// The logger never inspects these, it only hands them to the sink.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flags(u32);

impl Flags {
    /// Local date, `2009/01/23`.
    pub const DATE: Flags = Flags(1);
    /// Local time, `01:23:23`.
    pub const TIME: Flags = Flags(1 << 1);
    /// Microsecond resolution, `01:23:23.123123`. Implies `TIME`.
    pub const MICROSECONDS: Flags = Flags(1 << 2);
    /// Full caller path and line, `/a/b/c.rs:23`.
    pub const LONG_FILE: Flags = Flags(1 << 3);
    /// Final path element and line, `c.rs:23`. Overrides `LONG_FILE`.
    pub const SHORT_FILE: Flags = Flags(1 << 4);
    /// Use UTC rather than the local time zone.
    pub const UTC: Flags = Flags(1 << 5);
    /// Move the prefix from the start of the line to just before the label.
    pub const MSG_PREFIX: Flags = Flags(1 << 6);
    pub const STD: Flags = Flags(Self::DATE.0 | Self::TIME.0);

    const ALL_BITS: u32 = (1 << 7) - 1;

    const NAMES: [(&'static str, Flags); 8] = [
        ("date", Self::DATE),
        ("time", Self::TIME),
        ("microseconds", Self::MICROSECONDS),
        ("longfile", Self::LONG_FILE),
        ("shortfile", Self::SHORT_FILE),
        ("utc", Self::UTC),
        ("msgprefix", Self::MSG_PREFIX),
        ("std", Self::STD),
    ];

    pub const fn empty() -> Self {
        Flags(0)
    }

    /// Builds flags from raw bits, dropping any unknown bits.
    pub const fn from_bits(bits: u32) -> Self {
        Flags(bits & Self::ALL_BITS)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(&self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Self) -> Self::Output {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(name, flag)| *name != "std" && self.contains(*flag))
            .map(|(name, _)| *name)
            .collect();
        f.write_str(&names.join("|"))
    }
}

/// Parses `|` or `,` separated flag names, e.g. `date|time|utc`.
impl FromStr for Flags {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(Flags::empty());
        }

        let mut flags = Flags::empty();
        for part in s.split(['|', ',']).map(str::trim).filter(|p| !p.is_empty()) {
            let part = part.to_ascii_lowercase();
            let (_, flag) = Self::NAMES
                .iter()
                .find(|(name, _)| *name == part)
                .ok_or_else(|| LogError::InvalidFlag(part.clone()))?;
            flags |= *flag;
        }
        Ok(flags)
    }
}
