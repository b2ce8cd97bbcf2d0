use serde::Serialize;

use super::error::DecisionError;
use crate::config::SegmentModifiers;

/// Risk segment selected by the last four digits of a personal code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// Outstanding debt; never lent to.
    Debtor,
    Tier1,
    Tier2,
    Tier3,
}

impl Segment {
    pub fn from_suffix(suffix: u16) -> Self {
        match suffix {
            0..=2499 => Segment::Debtor,
            2500..=4999 => Segment::Tier1,
            5000..=7499 => Segment::Tier2,
            _ => Segment::Tier3,
        }
    }

    pub fn modifier(self, modifiers: &SegmentModifiers) -> u32 {
        match self {
            Segment::Debtor => 0,
            Segment::Tier1 => modifiers.tier_1,
            Segment::Tier2 => modifiers.tier_2,
            Segment::Tier3 => modifiers.tier_3,
        }
    }
}

/// Credit modifier for `code`; zero means no loan can be offered.
pub fn classify(code: &str, modifiers: &SegmentModifiers) -> Result<u32, DecisionError> {
    let suffix = code
        .len()
        .checked_sub(4)
        .and_then(|start| code.get(start..))
        .filter(|tail| tail.bytes().all(|byte| byte.is_ascii_digit()))
        .and_then(|tail| tail.parse::<u16>().ok())
        .ok_or(DecisionError::InvalidPersonalCode)?;

    Ok(Segment::from_suffix(suffix).modifier(modifiers))
}
