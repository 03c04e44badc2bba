use serde::{Deserialize, Serialize};

/// The emotional tone a whole line is generated in.
///
/// Callers speak the public vocabulary (`harsh`, `neutral`, `soft`,
/// `intense`); older names (`rage`, `emotionless`, `timid`, `shaken`) are
/// accepted as aliases. `Panic` has no public name of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tone {
    Rage,
    #[default]
    Emotionless,
    Timid,
    Shaken,
    Panic,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Rage,
        Tone::Emotionless,
        Tone::Timid,
        Tone::Shaken,
        Tone::Panic,
    ];

    /// Resolve any accepted tone name. Unknown names give `None`.
    pub fn from_alias(name: &str) -> Option<Tone> {
        match name.trim().to_lowercase().as_str() {
            "harsh" | "rage" => Some(Tone::Rage),
            "neutral" | "emotionless" => Some(Tone::Emotionless),
            "soft" | "timid" => Some(Tone::Timid),
            "intense" | "shaken" => Some(Tone::Shaken),
            "panic" => Some(Tone::Panic),
            _ => None,
        }
    }

    /// The public name shown to users.
    pub fn public_name(&self) -> &'static str {
        match self {
            Self::Rage => "harsh",
            Self::Emotionless => "neutral",
            Self::Timid => "soft",
            Self::Shaken => "intense",
            Self::Panic => "panic",
        }
    }

    /// Index into the per-tone tables.
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Rage => 0,
            Self::Emotionless => 1,
            Self::Timid => 2,
            Self::Shaken => 3,
            Self::Panic => 4,
        }
    }
}

/// The tone tag carried by a single lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryTone {
    Harsh,
    #[default]
    Neutral,
    Soft,
    Intense,
}

impl EntryTone {
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Harsh => 0,
            Self::Neutral => 1,
            Self::Soft => 2,
            Self::Intense => 3,
        }
    }

    /// Harsh and intense entries are the "strong" half of the vocabulary.
    pub fn is_strong(&self) -> bool {
        matches!(self, Self::Harsh | Self::Intense)
    }
}
