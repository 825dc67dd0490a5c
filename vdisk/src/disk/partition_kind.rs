use core::fmt::{Display, Formatter};

/// The rule used to choose between candidate free extents when placing a primary or extended partition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FitStrategy {
    FirstFit,
    BestFit,
    WorstFit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PartitionKind {
    Primary,
    Extended,
    /// Only ever lives in an extended partition's descriptor chain, never in a table slot.
    Logical,
}

impl FitStrategy {
    pub fn as_u8(&self) -> u8 {
        return match self {
            FitStrategy::FirstFit => b'F',
            FitStrategy::BestFit => b'B',
            FitStrategy::WorstFit => b'W',
        };
    }

    pub fn from_u8(n: u8) -> Option<Self> {
        return match n {
            b'F' => Some(FitStrategy::FirstFit),
            b'B' => Some(FitStrategy::BestFit),
            b'W' => Some(FitStrategy::WorstFit),
            _ => None,
        };
    }

    /// Accepts `ff`, `bf`, `wf` or the single letter, in any case.
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();

        if trimmed.eq_ignore_ascii_case("ff") || trimmed.eq_ignore_ascii_case("f") {
            return Some(FitStrategy::FirstFit);
        } else if trimmed.eq_ignore_ascii_case("bf") || trimmed.eq_ignore_ascii_case("b") {
            return Some(FitStrategy::BestFit);
        } else if trimmed.eq_ignore_ascii_case("wf") || trimmed.eq_ignore_ascii_case("w") {
            return Some(FitStrategy::WorstFit);
        }

        return None;
    }

    pub fn short_name(&self) -> &'static str {
        return match self {
            FitStrategy::FirstFit => "FF",
            FitStrategy::BestFit => "BF",
            FitStrategy::WorstFit => "WF",
        };
    }
}

impl Default for FitStrategy {
    fn default() -> Self {
        return FitStrategy::FirstFit;
    }
}

impl Display for FitStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            FitStrategy::FirstFit => "First fit",
            FitStrategy::BestFit => "Best fit",
            FitStrategy::WorstFit => "Worst fit",
        };

        return write!(f, "{}", name);
    }
}

impl PartitionKind {
    pub fn as_u8(&self) -> u8 {
        return match self {
            PartitionKind::Primary => b'P',
            PartitionKind::Extended => b'E',
            PartitionKind::Logical => b'L',
        };
    }

    pub fn from_u8(n: u8) -> Option<Self> {
        return match n {
            b'P' => Some(PartitionKind::Primary),
            b'E' => Some(PartitionKind::Extended),
            b'L' => Some(PartitionKind::Logical),
            _ => None,
        };
    }

    /// Accepts `p`, `e`, `l` or the full word, in any case.
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();

        if trimmed.eq_ignore_ascii_case("p") || trimmed.eq_ignore_ascii_case("primary") {
            return Some(PartitionKind::Primary);
        } else if trimmed.eq_ignore_ascii_case("e") || trimmed.eq_ignore_ascii_case("extended") {
            return Some(PartitionKind::Extended);
        } else if trimmed.eq_ignore_ascii_case("l") || trimmed.eq_ignore_ascii_case("logical") {
            return Some(PartitionKind::Logical);
        }

        return None;
    }
}

impl Display for PartitionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            PartitionKind::Primary => "Primary",
            PartitionKind::Extended => "Extended",
            PartitionKind::Logical => "Logical",
        };

        return write!(f, "{}", name);
    }
}
