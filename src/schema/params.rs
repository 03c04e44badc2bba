/// Generation parameters as supplied by a caller, and their resolution into
/// typed, defaulted values.
///
/// Resolution happens exactly once per call, in [`GenerationParameters::resolve`];
/// nothing downstream re-derives defaults.

use rustc_hash::FxHashMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::tone::Tone;
use crate::core::sanitize::{sanitize_opt, MAX_PHRASE_LEN, MAX_SEED_LEN};

/// How long the assembled line should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LengthClass {
    Short,
    #[default]
    Medium,
    Long,
    XLong,
}

impl LengthClass {
    pub const ALL: [LengthClass; 4] = [Self::Short, Self::Medium, Self::Long, Self::XLong];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            "xlong" => Some(Self::XLong),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
            Self::XLong => "xlong",
        }
    }
}

/// Delivery style layered over the tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Style {
    #[default]
    None,
    Restrained,
    Unsteady,
    Flat,
}

impl Style {
    pub const ALL: [Style; 4] = [Self::None, Self::Restrained, Self::Unsteady, Self::Flat];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "none" => Some(Self::None),
            "restrained" => Some(Self::Restrained),
            "unsteady" => Some(Self::Unsteady),
            "flat" => Some(Self::Flat),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Restrained => "restrained",
            Self::Unsteady => "unsteady",
            Self::Flat => "flat",
        }
    }
}

/// Narrative shape of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Flow {
    #[default]
    None,
    Sudden,
    Endure,
    Continuous,
}

impl Flow {
    pub const ALL: [Flow; 4] = [Self::None, Self::Sudden, Self::Endure, Self::Continuous];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "none" => Some(Self::None),
            "sudden" => Some(Self::Sudden),
            "endure" => Some(Self::Endure),
            "continuous" => Some(Self::Continuous),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sudden => "sudden",
            Self::Endure => "endure",
            Self::Continuous => "continuous",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PhraseMode {
    #[default]
    Raw,
    Broken,
}

/// How hard a phrase is broken: how much of it survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BreakStrength {
    Weak,
    #[default]
    Mid,
    Strong,
}

impl BreakStrength {
    /// Accepts `weak|mid|strong` as well as tier digits.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "weak" | "0" => Some(Self::Weak),
            "mid" | "1" => Some(Self::Mid),
            "strong" | "2" => Some(Self::Strong),
            _ => None,
        }
    }

    /// Tier digit; anything out of range is treated as mid.
    pub fn from_tier(tier: u8) -> Self {
        match tier {
            0 => Self::Weak,
            2 => Self::Strong,
            _ => Self::Mid,
        }
    }

    pub fn tier(&self) -> u8 {
        match self {
            Self::Weak => 0,
            Self::Mid => 1,
            Self::Strong => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Mid => "mid",
            Self::Strong => "strong",
        }
    }
}

/// One of the phrase-mangling transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreakRule {
    Cut,
    Sokuon,
    Choke,
    Repeat,
    Split,
}

impl BreakRule {
    pub const ALL: [BreakRule; 5] = [
        Self::Cut,
        Self::Sokuon,
        Self::Choke,
        Self::Repeat,
        Self::Split,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "cut" => Some(Self::Cut),
            "sokuon" => Some(Self::Sokuon),
            "choke" => Some(Self::Choke),
            "repeat" => Some(Self::Repeat),
            "split" => Some(Self::Split),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cut => "cut",
            Self::Sokuon => "sokuon",
            Self::Choke => "choke",
            Self::Repeat => "repeat",
            Self::Split => "split",
        }
    }
}

/// Trailing symbol that can be appended to the last fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Bang,
    BangQuestion,
    QuestionBang,
    Heart,
}

impl Symbol {
    pub const ALL: [Symbol; 4] = [
        Self::Bang,
        Self::BangQuestion,
        Self::QuestionBang,
        Self::Heart,
    ];

    pub fn from_text(text: &str) -> Option<Self> {
        match text.trim() {
            "!" => Some(Self::Bang),
            "!?" => Some(Self::BangQuestion),
            "?!" => Some(Self::QuestionBang),
            "♡" => Some(Self::Heart),
            _ => None,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::Bang => "!",
            Self::BangQuestion => "!?",
            Self::QuestionBang => "?!",
            Self::Heart => "♡",
        }
    }
}

/// A level as sent by a form: a number, or a string that may hold one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelInput {
    Number(f64),
    Text(String),
}

impl LevelInput {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl From<u8> for LevelInput {
    fn from(level: u8) -> Self {
        Self::Number(f64::from(level))
    }
}

/// A break intensity as sent by a form: a tier number or a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StrengthInput {
    Tier(f64),
    Name(String),
}

impl StrengthInput {
    fn strength(&self) -> Option<BreakStrength> {
        match self {
            Self::Tier(n) if n.fract() == 0.0 && (0.0..=2.0).contains(n) => {
                Some(BreakStrength::from_tier(*n as u8))
            }
            Self::Tier(_) => None,
            Self::Name(name) => BreakStrength::from_name(name),
        }
    }
}

impl From<&str> for StrengthInput {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<u8> for StrengthInput {
    fn from(tier: u8) -> Self {
        Self::Tier(f64::from(tier))
    }
}

/// A field value that either has the expected shape or is dropped.
#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

/// Deserialize a field, replacing a null or mistyped value with its default.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    match Lenient::deserialize(deserializer)? {
        Lenient::Valid(value) => Ok(value),
        Lenient::Invalid(_) => {
            log::debug!("mistyped parameter replaced by its default");
            Ok(T::default())
        }
    }
}

/// Intensity tier for a 1–5 level. Only exactly 3 is the middle tier inside
/// the band; missing, non-numeric or out-of-band levels also map to it.
pub fn level_to_tier(level: Option<&LevelInput>) -> usize {
    match level.and_then(LevelInput::value) {
        Some(n) if n.is_finite() && (1.0..=5.0).contains(&n) => {
            if n <= 2.0 {
                0
            } else if n == 3.0 {
                1
            } else {
                2
            }
        }
        _ => 1,
    }
}

/// Caller-facing parameters. Every field is optional; unknown enumeration
/// names fall back to documented defaults instead of failing, and so do
/// null or mistyped values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationParameters {
    #[serde(deserialize_with = "lenient")]
    pub level: Option<LevelInput>,
    #[serde(deserialize_with = "lenient")]
    pub length: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub tone: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub style: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub flow: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub phrase: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub phrase_mode: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub break_intensity: Option<StrengthInput>,
    #[serde(deserialize_with = "lenient")]
    pub break_rules: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub break_weights: FxHashMap<String, f64>,
    #[serde(deserialize_with = "lenient")]
    pub seed_text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub reduce_ellipsis: bool,
    #[serde(deserialize_with = "lenient")]
    pub symbol_options: Vec<String>,
}

/// Fully typed parameters with every default applied and free text sanitized.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    pub tier: usize,
    pub length: LengthClass,
    pub tone: Tone,
    pub style: Style,
    pub flow: Flow,
    pub phrase: Option<String>,
    pub phrase_mode: PhraseMode,
    pub break_strength: BreakStrength,
    /// Enabled rules, in canonical order, never empty.
    pub break_rules: Vec<BreakRule>,
    pub break_weights: FxHashMap<BreakRule, f64>,
    pub seed_text: Option<String>,
    pub reduce_ellipsis: bool,
    pub symbols: Vec<Symbol>,
}

impl Default for ResolvedParams {
    fn default() -> Self {
        GenerationParameters::default().resolve()
    }
}

impl GenerationParameters {
    /// Apply the default-resolution table.
    pub fn resolve(&self) -> ResolvedParams {
        let length = resolve_name(self.length.as_deref(), LengthClass::from_name);
        let tone = resolve_name(self.tone.as_deref(), Tone::from_alias);
        let style = resolve_name(self.style.as_deref(), Style::from_name);
        let flow = resolve_name(self.flow.as_deref(), Flow::from_name);
        let phrase_mode = match self.phrase_mode.as_deref().map(str::trim) {
            Some("broken") => PhraseMode::Broken,
            _ => PhraseMode::Raw,
        };
        let break_strength = self
            .break_intensity
            .as_ref()
            .and_then(StrengthInput::strength)
            .unwrap_or_default();

        let mut break_rules: Vec<BreakRule> = BreakRule::ALL
            .into_iter()
            .filter(|rule| {
                self.break_rules
                    .iter()
                    .any(|name| BreakRule::from_name(name) == Some(*rule))
            })
            .collect();
        if break_rules.is_empty() {
            break_rules = BreakRule::ALL.to_vec();
        }

        let break_weights = self
            .break_weights
            .iter()
            .filter_map(|(name, weight)| {
                let rule = BreakRule::from_name(name)?;
                let weight = if weight.is_finite() && *weight > 0.0 {
                    *weight
                } else {
                    0.0
                };
                Some((rule, weight))
            })
            .collect();

        let mut symbols: Vec<Symbol> = Vec::new();
        for symbol in self.symbol_options.iter().filter_map(|s| Symbol::from_text(s)) {
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }

        ResolvedParams {
            tier: level_to_tier(self.level.as_ref()),
            length,
            tone,
            style,
            flow,
            phrase: sanitize_opt(self.phrase.as_deref(), MAX_PHRASE_LEN),
            phrase_mode,
            break_strength,
            break_rules,
            break_weights,
            seed_text: sanitize_opt(self.seed_text.as_deref(), MAX_SEED_LEN),
            reduce_ellipsis: self.reduce_ellipsis,
            symbols,
        }
    }
}

fn resolve_name<T: Default>(name: Option<&str>, parse: impl Fn(&str) -> Option<T>) -> T {
    name.and_then(parse).unwrap_or_default()
}
