/// Lexicon model: tone-tagged, intensity-tiered vocabulary banks.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::tone::EntryTone;

/// Number of intensity tiers every role is expected to carry.
pub const TIER_COUNT: usize = 3;

const BUNDLED_LEXICON: &str = include_str!("../../data/lexicon.ron");

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("role '{role}' has {found} tiers, expected 3")]
    TierCount { role: Role, found: usize },
    #[error("role '{role}' tier {tier} is empty")]
    EmptyTier { role: Role, tier: usize },
}

/// The four structural slots a line is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Onset.
    Pre,
    /// Continuation.
    Cont,
    /// Sharp break.
    Cut,
    /// Trailing decay.
    After,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Pre, Role::Cont, Role::Cut, Role::After];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Cont => "cont",
            Self::Cut => "cut",
            Self::After => "after",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single vocabulary fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub text: String,
    #[serde(default)]
    pub tone: EntryTone,
}

impl LexiconEntry {
    pub fn new(text: &str, tone: EntryTone) -> Self {
        Self {
            text: text.to_string(),
            tone,
        }
    }
}

/// Entries of one role, ordered by intensity tier (0 = mildest).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierSet {
    pub tiers: Vec<Vec<LexiconEntry>>,
}

impl TierSet {
    pub fn new(tiers: Vec<Vec<LexiconEntry>>) -> Self {
        Self { tiers }
    }

    /// Entries of a tier; missing tiers read as empty.
    pub fn tier(&self, tier: usize) -> &[LexiconEntry] {
        self.tiers.get(tier).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.iter().all(Vec::is_empty)
    }
}

/// The whole vocabulary: role → tiers → entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LexiconBank {
    #[serde(default)]
    pub pre: TierSet,
    #[serde(default)]
    pub cont: TierSet,
    #[serde(default)]
    pub cut: TierSet,
    #[serde(default)]
    pub after: TierSet,
}

impl LexiconBank {
    /// Load a lexicon from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<LexiconBank, LexiconError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a lexicon from a RON string.
    pub fn parse_ron(input: &str) -> Result<LexiconBank, LexiconError> {
        Ok(ron::from_str(input)?)
    }

    /// The vocabulary shipped with the crate.
    pub fn bundled() -> Result<LexiconBank, LexiconError> {
        Self::parse_ron(BUNDLED_LEXICON)
    }

    pub fn role(&self, role: Role) -> &TierSet {
        match role {
            Role::Pre => &self.pre,
            Role::Cont => &self.cont,
            Role::Cut => &self.cut,
            Role::After => &self.after,
        }
    }

    /// Every structural problem in the bank. Generation tolerates all of
    /// them, but a bank with problems produces shorter lines.
    pub fn validate(&self) -> Vec<LexiconError> {
        let mut problems = Vec::new();
        for role in Role::ALL {
            let set = self.role(role);
            if set.len() != TIER_COUNT {
                problems.push(LexiconError::TierCount {
                    role,
                    found: set.len(),
                });
            }
            for (tier, entries) in set.tiers.iter().enumerate() {
                if entries.is_empty() {
                    problems.push(LexiconError::EmptyTier { role, tier });
                }
            }
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_ron() -> &'static str {
        r#"(
            pre: [[(text: "う…", tone: soft)], [(text: "うぐ…")], [(text: "ぐっ…", tone: harsh)]],
            cont: [[(text: "…っ…")], [(text: "…こっ…")], [(text: "…ごっ…", tone: intense)]],
            cut: [[(text: "はっ…")], [(text: "かはっ…")], [(text: "がはっ…", tone: harsh)]],
            after: [[(text: "はぁ…", tone: soft)], [(text: "…はぁ")], [(text: "はぁ…っ")]],
        )"#
    }

    #[test]
    fn parse_tiny_bank() {
        let bank = LexiconBank::parse_ron(tiny_ron()).unwrap();
        assert_eq!(bank.pre.len(), 3);
        assert_eq!(bank.pre.tier(0)[0].tone, EntryTone::Soft);
        // Omitted tone defaults to neutral
        assert_eq!(bank.pre.tier(1)[0].tone, EntryTone::Neutral);
        assert!(bank.validate().is_empty());
    }

    #[test]
    fn missing_tier_reads_empty() {
        let set = TierSet::new(vec![vec![LexiconEntry::new("は…", EntryTone::Soft)]]);
        assert_eq!(set.tier(0).len(), 1);
        assert!(set.tier(2).is_empty());
    }

    #[test]
    fn validate_reports_empty_and_missing_tiers() {
        let mut bank = LexiconBank::parse_ron(tiny_ron()).unwrap();
        bank.cut.tiers[1].clear();
        bank.after.tiers.pop();
        let problems = bank.validate();
        assert_eq!(problems.len(), 2);
        assert!(problems
            .iter()
            .any(|p| matches!(p, LexiconError::EmptyTier { role: Role::Cut, tier: 1 })));
        assert!(problems
            .iter()
            .any(|p| matches!(p, LexiconError::TierCount { role: Role::After, found: 2 })));
    }

    #[test]
    fn missing_roles_default_to_empty() {
        let bank = LexiconBank::parse_ron("(pre: [[(text: \"ん…\")]])").unwrap();
        assert!(bank.cont.is_empty());
        assert!(!bank.validate().is_empty());
    }

    #[test]
    fn bundled_lexicon_is_complete() {
        let bank = LexiconBank::bundled().unwrap();
        assert!(bank.validate().is_empty(), "{:?}", bank.validate());
        for role in Role::ALL {
            for tier in 0..TIER_COUNT {
                assert!(bank.role(role).tier(tier).len() >= 5);
            }
        }
    }

    #[test]
    fn ron_round_trip() {
        let bank = LexiconBank::parse_ron(tiny_ron()).unwrap();
        let serialized = ron::to_string(&bank).unwrap();
        let back = LexiconBank::parse_ron(&serialized).unwrap();
        assert_eq!(back, bank);
    }

    #[test]
    fn bad_ron_is_an_error() {
        assert!(matches!(
            LexiconBank::parse_ron("(pre: oops)"),
            Err(LexiconError::Ron(_))
        ));
    }
}
