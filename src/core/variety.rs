/// Variety pass: punctuation post-processing applied to sampled fragments.
///
/// Includes ellipsis stripping and compression, abrupt-onset trimming and
/// trailing symbol injection.

use crate::core::context::GenerationContext;
use crate::core::rng::{pick_index, RandomSource};
use crate::schema::tone::Tone;
use crate::schema::params::Style;

pub const ELLIPSIS: char = '…';

/// Chance that a compressible fragment has its ellipsis runs collapsed.
const COMPRESS_PROBABILITY: f64 = 0.5;
const MAX_STRIP_PROBABILITY: f64 = 0.9;

/// Probability that a cut/after fragment loses every ellipsis.
pub fn strip_probability(ctx: &GenerationContext) -> f64 {
    let base: f64 = match ctx.tone {
        Tone::Rage => 0.25,
        Tone::Emotionless => 0.35,
        Tone::Timid => 0.10,
        Tone::Shaken => 0.15,
        Tone::Panic => 0.30,
    };
    let style = match ctx.style {
        Style::None => 0.0,
        Style::Flat => 0.15,
        Style::Restrained => -0.05,
        Style::Unsteady => -0.10,
    };
    let reduce = if ctx.reduce_ellipsis { 0.25 } else { 0.0 };
    (base + style + reduce).clamp(0.0, MAX_STRIP_PROBABILITY)
}

/// Collapse every run of consecutive ellipses into one.
pub fn compress_ellipsis(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_ellipsis = false;
    for ch in text.chars() {
        if ch == ELLIPSIS {
            if !prev_ellipsis {
                out.push(ch);
            }
            prev_ellipsis = true;
        } else {
            out.push(ch);
            prev_ellipsis = false;
        }
    }
    out
}

/// Remove every ellipsis. A fragment made only of ellipses is kept as-is.
pub fn strip_ellipsis(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| *c != ELLIPSIS).collect();
    if stripped.trim().is_empty() {
        text.to_string()
    } else {
        stripped
    }
}

/// Drop leading ellipses for an abrupt onset.
pub fn drop_leading_ellipsis(text: &str) -> String {
    let trimmed = text.trim_start_matches(ELLIPSIS);
    if trimmed.is_empty() {
        text.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Randomly strip or compress the ellipses of a cut/after fragment.
///
/// Always consumes exactly one draw, plus one more when the fragment is not
/// stripped and `reduce_ellipsis` is off.
pub fn vary_ellipsis(rng: &mut dyn RandomSource, ctx: &GenerationContext, text: &str) -> String {
    if rng.next_f64() < strip_probability(ctx) {
        return strip_ellipsis(text);
    }
    if ctx.reduce_ellipsis || rng.next_f64() < COMPRESS_PROBABILITY {
        return compress_ellipsis(text);
    }
    text.to_string()
}

/// Probability that a line gets a trailing symbol, when symbols are enabled.
pub fn symbol_probability(tone: Tone) -> f64 {
    match tone {
        Tone::Rage | Tone::Panic => 0.6,
        Tone::Shaken => 0.45,
        Tone::Timid => 0.35,
        Tone::Emotionless => 0.2,
    }
}

/// Maybe append one of the enabled symbols to the last fragment.
pub fn apply_symbol(rng: &mut dyn RandomSource, ctx: &GenerationContext, parts: &mut [String]) {
    if ctx.symbols.is_empty() {
        return;
    }
    let Some(last) = parts.last_mut() else {
        return;
    };
    if rng.next_f64() < symbol_probability(ctx.tone) {
        let symbol = ctx.symbols[pick_index(rng, ctx.symbols.len())];
        last.push_str(symbol.text());
    }
}
