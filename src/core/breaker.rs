/// Phrase breaker: turns a user phrase into a truncated, stuttering form.

use rustc_hash::FxHashMap;

use crate::core::rng::{pick_index, RandomSource};
use crate::core::sampler::weighted_index;
use crate::core::variety::ELLIPSIS;
use crate::schema::params::{BreakRule, BreakStrength};

/// Long-vowel mark removed before breaking.
const LONG_VOWEL: char = 'ー';
/// Glottal stop (small tsu).
const SOKUON: char = 'っ';

/// Placeholder shown when there is nothing to preview.
pub const EMPTY_EXAMPLE: &str = "-";

/// A cleaned phrase split into the pieces every rule works from. Lengths
/// are UTF-16 code units, as the sanitizer counts them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseParts {
    pub head: Vec<u16>,
    pub tail: Vec<u16>,
}

/// A unit slice cut inside a surrogate pair decodes to U+FFFD.
fn decode(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

fn remain_rate(strength: BreakStrength) -> f64 {
    match strength {
        BreakStrength::Weak => 0.8,
        BreakStrength::Mid => 0.6,
        BreakStrength::Strong => 0.4,
    }
}

/// Strip ASCII letters, digits and the long-vowel mark, then trim.
pub fn clean_phrase(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_ascii_alphanumeric() && *c != LONG_VOWEL)
        .collect::<String>()
        .trim()
        .to_string()
}

/// `floor(len * ratio)`, at least one.
fn portion(len: usize, ratio: f64) -> usize {
    ((len as f64 * ratio).floor() as usize).max(1)
}

/// Clean `text` and cut it into head and tail. `None` if nothing survives
/// cleaning.
pub fn split_phrase(text: &str, strength: BreakStrength) -> Option<PhraseParts> {
    let cleaned: Vec<u16> = clean_phrase(text).encode_utf16().collect();
    if cleaned.is_empty() {
        return None;
    }
    let head_len = portion(cleaned.len(), remain_rate(strength)).min(cleaned.len());
    let tail_start = portion(cleaned.len(), 0.5).min(cleaned.len());
    Some(PhraseParts {
        head: cleaned[..head_len].to_vec(),
        tail: cleaned[tail_start..].to_vec(),
    })
}

/// Apply one rule to prepared parts. Pure; shared by generation and preview.
pub fn apply_rule(rule: BreakRule, parts: &PhraseParts) -> String {
    let head = decode(&parts.head);
    match rule {
        BreakRule::Cut => format!("{head}{ELLIPSIS}"),
        BreakRule::Sokuon => format!("{head}{SOKUON}{ELLIPSIS}"),
        BreakRule::Choke => format!("{head}{ELLIPSIS}{SOKUON}"),
        BreakRule::Repeat => {
            let stutter = decode(&parts.head[..portion(parts.head.len(), 0.6).min(parts.head.len())]);
            format!("{stutter}{ELLIPSIS}{head}{ELLIPSIS}")
        }
        BreakRule::Split => {
            let take = portion(parts.tail.len(), 0.5).min(parts.tail.len());
            let tail = decode(&parts.tail[..take]);
            format!("{head}{ELLIPSIS}{tail}{ELLIPSIS}")
        }
    }
}

/// Choose a rule among `enabled` by weight. Rules missing from `weights`
/// weigh 1; an all-zero table falls back to a uniform choice. Consumes
/// exactly one draw.
pub fn choose_rule(
    rng: &mut dyn RandomSource,
    enabled: &[BreakRule],
    weights: &FxHashMap<BreakRule, f64>,
) -> BreakRule {
    let enabled: &[BreakRule] = if enabled.is_empty() {
        &BreakRule::ALL
    } else {
        enabled
    };
    let table: Vec<f64> = enabled
        .iter()
        .map(|rule| weights.get(rule).copied().unwrap_or(1.0))
        .collect();
    if table.iter().all(|w| *w <= 0.0) {
        return enabled[pick_index(rng, enabled.len())];
    }
    enabled[weighted_index(rng, &table)]
}

/// Break `text` with a randomly chosen rule. Empty when the phrase has
/// nothing left after cleaning; no draw is consumed in that case.
pub fn break_phrase(
    rng: &mut dyn RandomSource,
    text: &str,
    strength: BreakStrength,
    enabled: &[BreakRule],
    weights: &FxHashMap<BreakRule, f64>,
) -> String {
    let Some(parts) = split_phrase(text, strength) else {
        return String::new();
    };
    let rule = choose_rule(rng, enabled, weights);
    log::debug!("breaking phrase with rule '{}'", rule.name());
    apply_rule(rule, &parts)
}

/// Deterministic preview of one rule, for UI examples. Returns `"-"` when
/// there is nothing to show.
pub fn make_break_example(text: &str, strength: BreakStrength, rule: BreakRule) -> String {
    match split_phrase(text, strength) {
        Some(parts) => apply_rule(rule, &parts),
        None => EMPTY_EXAMPLE.to_string(),
    }
}

/// Previews of every rule, in canonical order.
pub fn break_examples(text: &str, strength: BreakStrength) -> Vec<(BreakRule, String)> {
    BreakRule::ALL
        .into_iter()
        .map(|rule| (rule, make_break_example(text, strength, rule)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::tests::ScriptedSource;
    use crate::core::rng::EntropySource;

    const PHRASE: &str = "やめてください";

    #[test]
    fn cleaning_strips_ascii_and_long_vowel() {
        assert_eq!(clean_phrase("ABC やーめて 123"), "やめて");
        assert_eq!(clean_phrase("abc123"), "");
        assert_eq!(clean_phrase("ーー"), "");
    }

    #[test]
    fn split_by_strength() {
        // 7 chars: weak keeps 5, mid 4, strong 2; tail starts at 3
        let weak = split_phrase(PHRASE, BreakStrength::Weak).unwrap();
        assert_eq!(decode(&weak.head), "やめてくだ");
        assert_eq!(decode(&weak.tail), "ください");
        let mid = split_phrase(PHRASE, BreakStrength::Mid).unwrap();
        assert_eq!(decode(&mid.head), "やめてく");
        let strong = split_phrase(PHRASE, BreakStrength::Strong).unwrap();
        assert_eq!(decode(&strong.head), "やめ");
    }

    #[test]
    fn single_char_phrase() {
        let parts = split_phrase("や", BreakStrength::Strong).unwrap();
        assert_eq!(decode(&parts.head), "や");
        assert!(parts.tail.is_empty());
        assert_eq!(apply_rule(BreakRule::Split, &parts), "や……");
        assert_eq!(apply_rule(BreakRule::Repeat, &parts), "や…や…");
    }

    #[test]
    fn lengths_count_utf16_units() {
        // 7 units but 5 chars: mid keeps floor(7 * 0.6) = 4 units
        assert_eq!(
            make_break_example("😀😀やめて", BreakStrength::Mid, BreakRule::Cut),
            "😀😀…"
        );
        assert_eq!(
            make_break_example("😀やめ", BreakStrength::Strong, BreakRule::Cut),
            "\u{FFFD}…"
        );
    }

    #[test]
    fn every_rule_preview() {
        let s = BreakStrength::Mid;
        assert_eq!(make_break_example(PHRASE, s, BreakRule::Cut), "やめてく…");
        assert_eq!(make_break_example(PHRASE, s, BreakRule::Sokuon), "やめてくっ…");
        assert_eq!(make_break_example(PHRASE, s, BreakRule::Choke), "やめてく…っ");
        assert_eq!(make_break_example(PHRASE, s, BreakRule::Repeat), "やめ…やめてく…");
        assert_eq!(make_break_example(PHRASE, s, BreakRule::Split), "やめてく…くだ…");
    }

    #[test]
    fn empty_preview_is_dash() {
        assert_eq!(make_break_example("", BreakStrength::Mid, BreakRule::Cut), "-");
        assert_eq!(make_break_example("OK", BreakStrength::Mid, BreakRule::Cut), "-");
    }

    #[test]
    fn break_examples_cover_all_rules() {
        let examples = break_examples(PHRASE, BreakStrength::Weak);
        assert_eq!(examples.len(), 5);
        assert_eq!(examples[0], (BreakRule::Cut, "やめてくだ…".to_string()));
    }

    #[test]
    fn broken_output_matches_preview() {
        let weights = FxHashMap::default();
        let mut rng = EntropySource::new();
        let previews: Vec<String> = break_examples(PHRASE, BreakStrength::Strong)
            .into_iter()
            .map(|(_, text)| text)
            .collect();
        for _ in 0..200 {
            let broken = break_phrase(&mut rng, PHRASE, BreakStrength::Strong, &BreakRule::ALL, &weights);
            assert!(previews.contains(&broken), "unexpected '{}'", broken);
        }
    }

    #[test]
    fn weighted_rule_choice() {
        let mut weights = FxHashMap::default();
        weights.insert(BreakRule::Cut, 0.0);
        weights.insert(BreakRule::Choke, 0.0);
        let enabled = [BreakRule::Cut, BreakRule::Choke, BreakRule::Split];
        let mut rng = EntropySource::new();
        for _ in 0..100 {
            assert_eq!(choose_rule(&mut rng, &enabled, &weights), BreakRule::Split);
        }
    }

    #[test]
    fn all_zero_weights_choose_uniformly() {
        let mut weights = FxHashMap::default();
        weights.insert(BreakRule::Cut, 0.0);
        weights.insert(BreakRule::Repeat, 0.0);
        let enabled = [BreakRule::Cut, BreakRule::Repeat];
        let mut rng = ScriptedSource::new(&[0.1, 0.9]);
        assert_eq!(choose_rule(&mut rng, &enabled, &weights), BreakRule::Cut);
        assert_eq!(choose_rule(&mut rng, &enabled, &weights), BreakRule::Repeat);
    }

    #[test]
    fn empty_enabled_means_all() {
        let weights = FxHashMap::default();
        let mut rng = ScriptedSource::new(&[0.99]);
        assert_eq!(choose_rule(&mut rng, &[], &weights), BreakRule::Split);
    }

    #[test]
    fn nothing_left_breaks_to_empty() {
        let weights = FxHashMap::default();
        let mut rng = ScriptedSource::new(&[0.5]);
        assert_eq!(
            break_phrase(&mut rng, "hello", BreakStrength::Mid, &BreakRule::ALL, &weights),
            ""
        );
    }
}
