/// Weighted sampler: tone/level/style-aware selection over lexicon tiers,
/// with tier jitter and sound-based anti-repetition.

use rustc_hash::FxHashMap;

use crate::core::context::GenerationContext;
use crate::core::rng::RandomSource;
use crate::core::variety::ELLIPSIS;
use crate::schema::lexicon::{LexiconBank, LexiconEntry, Role, TIER_COUNT};
use crate::schema::params::Style;
use crate::schema::tone::{EntryTone, Tone};

const MAX_TIER: usize = TIER_COUNT - 1;

/// Rows: line tone. Columns: harsh, neutral, soft, intense.
const TONE_WEIGHTS: [[f64; 4]; 5] = [
    [1.8, 0.9, 0.4, 1.4], // rage
    [0.8, 1.6, 0.9, 0.6], // emotionless
    [0.4, 1.0, 1.8, 0.6], // timid
    [0.9, 0.9, 1.1, 1.5], // shaken
    [1.2, 0.7, 0.6, 1.8], // panic
];

/// Rows: tier. Columns: harsh, neutral, soft, intense.
const LEVEL_MULTIPLIERS: [[f64; 4]; TIER_COUNT] = [
    [0.7, 1.0, 1.3, 0.7],
    [1.0, 1.0, 1.0, 1.0],
    [1.3, 0.9, 0.7, 1.3],
];

/// Entries weighted below this for the line tone are dropped from the
/// per-call pools.
const TONE_FLOOR: f64 = 0.5;

/// Retch/gag onsets.
pub const BURST_MARKERS: [&str; 6] = ["おえ", "おぇ", "げぇ", "ゔぇ", "う゛ぇ", "おろ"];

const SOUND_KEY_SKIP: [char; 12] = [
    ELLIPSIS, '.', '・', '、', '。', '!', '?', '！', '？', '~', '〜', '♡',
];

/// Extra weighting applied on top of the tone tables for flow-specific picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickBias {
    #[default]
    Normal,
    /// Favors harsh and intense entries.
    Strong,
    /// Favors soft entries.
    Soft,
}

impl PickBias {
    fn multiplier(&self, tone: EntryTone) -> f64 {
        match (self, tone) {
            (Self::Normal, _) => 1.0,
            (Self::Strong, EntryTone::Harsh | EntryTone::Intense) => 1.6,
            (Self::Strong, EntryTone::Soft) => 0.5,
            (Self::Strong, EntryTone::Neutral) => 1.0,
            (Self::Soft, EntryTone::Soft) => 1.8,
            (Self::Soft, EntryTone::Neutral) => 1.1,
            (Self::Soft, EntryTone::Harsh | EntryTone::Intense) => 0.5,
        }
    }
}

/// Coarse phonetic class of a fragment's leading sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundGroup {
    Nasal,
    Breath,
    Guttural,
    Vowel,
    Harsh,
    Other,
}

/// Base tone weight of an entry for a line tone.
pub fn tone_weight(tone: Tone, entry: EntryTone) -> f64 {
    TONE_WEIGHTS[tone.index()][entry.index()]
}

fn level_multiplier(tier: usize, entry: EntryTone) -> f64 {
    LEVEL_MULTIPLIERS[tier.min(MAX_TIER)][entry.index()]
}

/// Low and high jitter thresholds for a style.
pub fn jitter_thresholds(style: Style) -> (f64, f64) {
    match style {
        Style::None => (0.15, 0.85),
        Style::Restrained => (0.25, 0.92),
        Style::Unsteady => (0.20, 0.75),
        Style::Flat => (0.08, 0.92),
    }
}

fn style_length_bias(style: Style, visible: usize) -> f64 {
    match style {
        Style::Restrained if visible <= 2 => 1.4,
        Style::Restrained => 0.8,
        Style::Unsteady if visible >= 3 => 1.3,
        Style::Unsteady => 0.85,
        Style::None | Style::Flat => 1.0,
    }
}

fn after_length_bias(visible: usize) -> f64 {
    if visible <= 2 {
        1.4
    } else if visible <= 3 {
        1.2
    } else {
        0.85
    }
}

/// Weight multiplier for entries that sound like the previous fragment.
pub fn repetition_penalty(tone: Tone) -> f64 {
    match tone {
        Tone::Rage | Tone::Panic => 0.8,
        Tone::Emotionless => 0.65,
        Tone::Timid => 0.7,
        Tone::Shaken => 0.75,
    }
}

/// Character count ignoring ellipses and whitespace.
pub fn visible_len(text: &str) -> usize {
    text.chars()
        .filter(|c| *c != ELLIPSIS && !c.is_whitespace())
        .count()
}

fn sound_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .filter(|c| !SOUND_KEY_SKIP.contains(c) && !c.is_whitespace())
}

/// First two sounding characters of a fragment.
pub fn sound_key(text: &str) -> String {
    sound_chars(text).take(2).collect()
}

pub fn sound_group(text: &str) -> SoundGroup {
    let mut chars = sound_chars(text);
    let Some(first) = chars.next() else {
        return SoundGroup::Other;
    };
    if matches!(chars.next(), Some('゛' | '\u{3099}')) {
        return SoundGroup::Harsh;
    }
    match first {
        'ん' | 'む' | 'ぬ' | 'な' | 'の' => SoundGroup::Nasal,
        'は' | 'ひ' | 'ふ' | 'へ' | 'ほ' => SoundGroup::Breath,
        'か' | 'き' | 'く' | 'け' | 'こ' => SoundGroup::Guttural,
        'が' | 'ぎ' | 'ぐ' | 'げ' | 'ご' | 'ゔ' => SoundGroup::Harsh,
        'あ' | 'い' | 'う' | 'え' | 'お' | 'ぁ' | 'ぃ' | 'ぅ' | 'ぇ' | 'ぉ' => SoundGroup::Vowel,
        _ => SoundGroup::Other,
    }
}

pub fn is_burst(text: &str) -> bool {
    BURST_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Nudge the requested tier down or up by one with style-dependent odds.
/// Consumes exactly one draw; the result is always within `0..=2`.
pub fn jitter_tier(rng: &mut dyn RandomSource, tier: usize, style: Style) -> usize {
    let tier = tier.min(MAX_TIER);
    let roll = rng.next_f64();
    let (low, high) = jitter_thresholds(style);
    if roll < low && tier > 0 {
        tier - 1
    } else if roll > high && tier < MAX_TIER {
        tier + 1
    } else {
        tier
    }
}

/// Index chosen by weighted walk. A non-positive or non-finite total falls
/// back to a uniform choice. Consumes exactly one draw. `weights` must be
/// non-empty.
pub fn weighted_index(rng: &mut dyn RandomSource, weights: &[f64]) -> usize {
    let total: f64 = weights.iter().filter(|w| w.is_finite() && **w > 0.0).sum();
    let roll = rng.next_f64();
    if !(total > 0.0) || !total.is_finite() {
        let idx = (roll * weights.len() as f64).floor() as usize;
        return idx.min(weights.len().saturating_sub(1));
    }

    let mut remaining = roll * total;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if !(w.is_finite() && w > 0.0) {
            continue;
        }
        last_positive = i;
        remaining -= w;
        if remaining <= 0.0 {
            return i;
        }
    }
    last_positive
}

/// Weighted choice over arbitrary items. `items` must be non-empty.
pub fn weighted_choice<'a, T>(
    rng: &mut dyn RandomSource,
    items: &'a [T],
    weight: impl Fn(&T) -> f64,
) -> &'a T {
    let weights: Vec<f64> = items.iter().map(weight).collect();
    &items[weighted_index(rng, &weights)]
}

/// The previous fragment a pick should avoid sounding like.
#[derive(Debug, Clone, Copy)]
pub struct Repetition<'a> {
    pub previous: &'a str,
    /// Exclude same-sound entries instead of down-weighting them.
    pub strict: bool,
}

/// Weight of one entry for a role, before any repetition penalty.
pub fn entry_weight(
    ctx: &GenerationContext,
    entry: &LexiconEntry,
    tier: usize,
    role: Role,
    bias: PickBias,
) -> f64 {
    let visible = visible_len(&entry.text);
    let mut weight = tone_weight(ctx.tone, entry.tone)
        * level_multiplier(tier, entry.tone)
        * style_length_bias(ctx.style, visible)
        * bias.multiplier(entry.tone);
    if role == Role::After {
        weight *= after_length_bias(visible);
    }
    weight
}

/// Pick one entry from `pool`. Returns `None` only for an empty pool.
pub fn pick_entry<'a>(
    rng: &mut dyn RandomSource,
    ctx: &GenerationContext,
    pool: &'a [LexiconEntry],
    tier: usize,
    role: Role,
    bias: PickBias,
    repetition: Option<Repetition<'_>>,
) -> Option<&'a LexiconEntry> {
    if pool.is_empty() {
        return None;
    }

    let mut candidates: Vec<&LexiconEntry> = pool.iter().collect();
    let mut prev_key = String::new();
    let mut prev_group = SoundGroup::Other;
    if let Some(rep) = repetition {
        prev_key = sound_key(rep.previous);
        prev_group = sound_group(rep.previous);
        let filtered: Vec<&LexiconEntry> = pool
            .iter()
            .filter(|e| e.text != rep.previous)
            .filter(|e| !rep.strict || prev_key.is_empty() || sound_key(&e.text) != prev_key)
            .collect();
        if !filtered.is_empty() {
            candidates = filtered;
        }
    }

    let penalty = repetition_penalty(ctx.tone);
    let weights: Vec<f64> = candidates
        .iter()
        .map(|entry| {
            let mut weight = entry_weight(ctx, entry, tier, role, bias);
            if let Some(rep) = repetition {
                let same_key = !prev_key.is_empty() && sound_key(&entry.text) == prev_key;
                let same_group =
                    prev_group != SoundGroup::Other && sound_group(&entry.text) == prev_group;
                if !rep.strict && (same_key || same_group) {
                    weight *= penalty;
                }
            }
            weight
        })
        .collect();

    let chosen = candidates[weighted_index(rng, &weights)];
    log::trace!("picked {} '{}' from {} candidates", role, chosen.text, candidates.len());
    Some(chosen)
}

#[derive(Debug, Clone, Default)]
struct PreparedRole {
    tiers: Vec<Vec<LexiconEntry>>,
    burst_free: Vec<Vec<LexiconEntry>>,
}

/// Per-call copies of the lexicon pools, filtered and capped for the line
/// tone. The source bank is only read.
#[derive(Debug, Clone, Default)]
pub struct PreparedBank {
    roles: FxHashMap<Role, PreparedRole>,
}

/// Largest pool a tone samples from, if capped.
fn pool_cap(tone: Tone) -> Option<usize> {
    match tone {
        Tone::Emotionless => Some(6),
        Tone::Timid => Some(8),
        _ => None,
    }
}

/// Apply `keep` to `pool`, unless that would leave nothing.
fn filter_or_keep(pool: Vec<LexiconEntry>, keep: impl Fn(&LexiconEntry) -> bool) -> Vec<LexiconEntry> {
    let filtered: Vec<LexiconEntry> = pool.iter().filter(|e| keep(e)).cloned().collect();
    if filtered.is_empty() {
        pool
    } else {
        filtered
    }
}

/// Keep the `cap` entries with the highest tone weight, in original order.
fn cap_pool(pool: Vec<LexiconEntry>, tone: Tone, cap: usize) -> Vec<LexiconEntry> {
    if pool.len() <= cap || cap == 0 {
        return pool;
    }
    let mut ranked: Vec<usize> = (0..pool.len()).collect();
    ranked.sort_by(|&a, &b| {
        tone_weight(tone, pool[b].tone)
            .partial_cmp(&tone_weight(tone, pool[a].tone))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(cap);
    ranked.sort_unstable();
    ranked.into_iter().map(|i| pool[i].clone()).collect()
}

impl PreparedBank {
    pub fn new(bank: &LexiconBank, ctx: &GenerationContext) -> Self {
        let mut roles = FxHashMap::default();
        for role in Role::ALL {
            let gated = matches!(role, Role::Cont | Role::Cut) && !ctx.burst_eligible();
            let mut prepared = PreparedRole::default();
            for entries in &bank.role(role).tiers {
                let mut pool = entries.clone();
                if gated {
                    pool = filter_or_keep(pool, |e| !is_burst(&e.text));
                }
                pool = filter_or_keep(pool, |e| tone_weight(ctx.tone, e.tone) >= TONE_FLOOR);
                if let Some(cap) = pool_cap(ctx.tone) {
                    pool = cap_pool(pool, ctx.tone, cap);
                }
                prepared
                    .burst_free
                    .push(filter_or_keep(pool.clone(), |e| !is_burst(&e.text)));
                prepared.tiers.push(pool);
            }
            roles.insert(role, prepared);
        }
        Self { roles }
    }

    /// Pool for a role at a tier, falling back to the nearest non-empty tier.
    pub fn pool(&self, role: Role, tier: usize, burst_free: bool) -> &[LexiconEntry] {
        let Some(prepared) = self.roles.get(&role) else {
            return &[];
        };
        let tiers = if burst_free {
            &prepared.burst_free
        } else {
            &prepared.tiers
        };
        if tiers.is_empty() {
            return &[];
        }
        let start = tier.min(tiers.len() - 1);
        for distance in 0..tiers.len() {
            if let Some(below) = start.checked_sub(distance) {
                if !tiers[below].is_empty() {
                    return &tiers[below];
                }
            }
            if let Some(above) = tiers.get(start + distance) {
                if !above.is_empty() {
                    return above;
                }
            }
        }
        &[]
    }
}

/// One fragment request handed to [`sample`].
#[derive(Debug, Clone, Copy)]
pub struct PickRequest<'a> {
    pub role: Role,
    pub bias: PickBias,
    pub repetition: Option<Repetition<'a>>,
    pub burst_free: bool,
}

impl<'a> PickRequest<'a> {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            bias: PickBias::Normal,
            repetition: None,
            burst_free: false,
        }
    }

    pub fn bias(mut self, bias: PickBias) -> Self {
        self.bias = bias;
        self
    }

    pub fn avoiding(mut self, previous: Option<&'a str>, strict: bool) -> Self {
        self.repetition = previous.map(|previous| Repetition { previous, strict });
        self
    }

    pub fn burst_free(mut self) -> Self {
        self.burst_free = true;
        self
    }
}

/// Jitter the tier, then pick from the prepared pool. Returns the raw entry
/// text; `None` when the role has no entries at all.
pub fn sample(
    rng: &mut dyn RandomSource,
    ctx: &GenerationContext,
    bank: &PreparedBank,
    request: PickRequest<'_>,
) -> Option<String> {
    let tier = jitter_tier(rng, ctx.tier, ctx.style);
    let pool = bank.pool(request.role, tier, request.burst_free);
    pick_entry(rng, ctx, pool, tier, request.role, request.bias, request.repetition)
        .map(|entry| entry.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::tests::ScriptedSource;
    use crate::core::rng::EntropySource;

    fn entry(text: &str, tone: EntryTone) -> LexiconEntry {
        LexiconEntry::new(text, tone)
    }

    #[test]
    fn sound_keys() {
        assert_eq!(sound_key("…はぁ…っ"), "はぁ");
        assert_eq!(sound_key("…っ…"), "っ");
        assert_eq!(sound_key("……"), "");
        assert_eq!(sound_key("けほっ…!"), "けほ");
    }

    #[test]
    fn sound_groups() {
        assert_eq!(sound_group("ん…"), SoundGroup::Nasal);
        assert_eq!(sound_group("…はぁ"), SoundGroup::Breath);
        assert_eq!(sound_group("けほっ…"), SoundGroup::Guttural);
        assert_eq!(sound_group("げほっ…"), SoundGroup::Harsh);
        assert_eq!(sound_group("う゛…"), SoundGroup::Harsh);
        assert_eq!(sound_group("うっ…"), SoundGroup::Vowel);
        assert_eq!(sound_group("…っ…"), SoundGroup::Other);
    }

    #[test]
    fn burst_detection() {
        assert!(is_burst("…おえっ…"));
        assert!(is_burst("う゛ぇ…"));
        assert!(!is_burst("げほっ…"));
    }

    #[test]
    fn jitter_moves_by_one_within_bounds() {
        let mut low = ScriptedSource::new(&[0.01]);
        assert_eq!(jitter_tier(&mut low, 1, Style::None), 0);
        assert_eq!(jitter_tier(&mut low, 0, Style::None), 0);
        let mut high = ScriptedSource::new(&[0.99]);
        assert_eq!(jitter_tier(&mut high, 1, Style::None), 2);
        assert_eq!(jitter_tier(&mut high, 2, Style::None), 2);
        let mut mid = ScriptedSource::new(&[0.5]);
        assert_eq!(jitter_tier(&mut mid, 1, Style::None), 1);
    }

    #[test]
    fn jitter_thresholds_follow_style() {
        // 0.2 drops a tier for restrained (0.25) but not for none (0.15)
        let mut rng = ScriptedSource::new(&[0.2]);
        assert_eq!(jitter_tier(&mut rng, 1, Style::Restrained), 0);
        assert_eq!(jitter_tier(&mut rng, 1, Style::None), 1);
    }

    #[test]
    fn weighted_walk() {
        let weights = [1.0, 0.0, 3.0];
        let mut rng = ScriptedSource::new(&[0.0, 0.2, 0.25, 0.26, 0.99]);
        assert_eq!(weighted_index(&mut rng, &weights), 0);
        assert_eq!(weighted_index(&mut rng, &weights), 0);
        assert_eq!(weighted_index(&mut rng, &weights), 0);
        assert_eq!(weighted_index(&mut rng, &weights), 2);
        assert_eq!(weighted_index(&mut rng, &weights), 2);
    }

    #[test]
    fn zero_weights_fall_back_to_uniform() {
        let mut rng = ScriptedSource::new(&[0.5]);
        assert_eq!(weighted_index(&mut rng, &[0.0, 0.0, 0.0, 0.0]), 2);
    }

    #[test]
    fn tone_shapes_weights() {
        let ctx = GenerationContext {
            tone: Tone::Rage,
            tier: 2,
            ..Default::default()
        };
        let harsh = entry("がはっ…", EntryTone::Harsh);
        let soft = entry("は…", EntryTone::Soft);
        let w_harsh = entry_weight(&ctx, &harsh, 2, Role::Cut, PickBias::Normal);
        let w_soft = entry_weight(&ctx, &soft, 2, Role::Cut, PickBias::Normal);
        assert!(w_harsh > w_soft * 4.0);
    }

    #[test]
    fn after_role_prefers_short() {
        let ctx = GenerationContext::default();
        let short = entry("はぁ", EntryTone::Neutral);
        let long = entry("はぁ…はぁ…", EntryTone::Neutral);
        let w_short = entry_weight(&ctx, &short, 1, Role::After, PickBias::Normal);
        let w_long = entry_weight(&ctx, &long, 1, Role::After, PickBias::Normal);
        assert!((w_short / w_long - 1.4 / 0.85).abs() < 1e-9);
    }

    #[test]
    fn restrained_prefers_short_entries() {
        let ctx = GenerationContext {
            style: Style::Restrained,
            ..Default::default()
        };
        let short = entry("は…", EntryTone::Neutral);
        let long = entry("はっ…は…", EntryTone::Neutral);
        assert!(
            entry_weight(&ctx, &short, 1, Role::Cut, PickBias::Normal)
                > entry_weight(&ctx, &long, 1, Role::Cut, PickBias::Normal)
        );
    }

    #[test]
    fn single_entry_pool_survives_exclusion() {
        let ctx = GenerationContext::default();
        let pool = vec![entry("はっ…", EntryTone::Neutral)];
        let mut rng = ScriptedSource::new(&[0.3]);
        let rep = Repetition {
            previous: "はっ…",
            strict: true,
        };
        let picked = pick_entry(&mut rng, &ctx, &pool, 1, Role::Cut, PickBias::Normal, Some(rep));
        assert_eq!(picked.map(|e| e.text.as_str()), Some("はっ…"));
    }

    #[test]
    fn strict_excludes_same_sound() {
        let ctx = GenerationContext::default();
        let pool = vec![
            entry("けほっ…", EntryTone::Neutral),
            entry("けほ…っ", EntryTone::Neutral),
            entry("はっ…", EntryTone::Neutral),
        ];
        let rep = Repetition {
            previous: "けほ…",
            strict: true,
        };
        let mut rng = EntropySource::new();
        for _ in 0..200 {
            let picked =
                pick_entry(&mut rng, &ctx, &pool, 1, Role::Cut, PickBias::Normal, Some(rep)).unwrap();
            assert_eq!(picked.text, "はっ…");
        }
    }

    #[test]
    fn non_strict_penalizes_but_keeps() {
        let ctx = GenerationContext::default();
        let pool = vec![
            entry("けほっ…", EntryTone::Neutral),
            entry("はっ…", EntryTone::Neutral),
        ];
        let rep = Repetition {
            previous: "けほ…",
            strict: false,
        };
        let mut rng = EntropySource::new();
        let mut seen_same = 0;
        for _ in 0..2000 {
            let picked =
                pick_entry(&mut rng, &ctx, &pool, 1, Role::Cut, PickBias::Normal, Some(rep)).unwrap();
            if picked.text == "けほっ…" {
                seen_same += 1;
            }
        }
        // Expected share 0.65 / 1.65 ≈ 39%
        assert!(seen_same > 500 && seen_same < 1000, "got {}", seen_same);
    }

    #[test]
    fn every_positive_entry_is_reachable() {
        let ctx = GenerationContext::default();
        let bank = LexiconBank::bundled().unwrap();
        let pool = bank.cut.tier(1);
        let mut rng = EntropySource::new();
        let mut seen = vec![false; pool.len()];
        for _ in 0..20_000 {
            let picked = pick_entry(&mut rng, &ctx, pool, 1, Role::Cut, PickBias::Normal, None).unwrap();
            let idx = pool.iter().position(|e| e == picked).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s), "unreached entries: {:?}", seen);
    }

    #[test]
    fn prepared_bank_gates_bursts() {
        let bank = LexiconBank::bundled().unwrap();
        let calm = GenerationContext {
            tone: Tone::Emotionless,
            tier: 2,
            ..Default::default()
        };
        let prepared = PreparedBank::new(&bank, &calm);
        for tier in 0..TIER_COUNT {
            assert!(prepared.pool(Role::Cont, tier, false).iter().all(|e| !is_burst(&e.text)));
            assert!(prepared.pool(Role::Cut, tier, false).iter().all(|e| !is_burst(&e.text)));
        }

        let rage = GenerationContext {
            tone: Tone::Rage,
            tier: 2,
            ..Default::default()
        };
        let prepared = PreparedBank::new(&bank, &rage);
        assert!(prepared.pool(Role::Cut, 2, false).iter().any(|e| is_burst(&e.text)));
        assert!(prepared.pool(Role::Cut, 2, true).iter().all(|e| !is_burst(&e.text)));
    }

    #[test]
    fn prepared_bank_caps_and_filters_by_tone() {
        let bank = LexiconBank::bundled().unwrap();
        let timid = GenerationContext {
            tone: Tone::Timid,
            ..Default::default()
        };
        let prepared = PreparedBank::new(&bank, &timid);
        for role in Role::ALL {
            for tier in 0..TIER_COUNT {
                let pool = prepared.pool(role, tier, false);
                assert!(!pool.is_empty());
                assert!(pool.len() <= 8);
                assert!(pool.iter().all(|e| e.tone != EntryTone::Harsh));
            }
        }
    }

    #[test]
    fn prepared_bank_leaves_source_untouched() {
        let bank = LexiconBank::bundled().unwrap();
        let before = bank.clone();
        let _ = PreparedBank::new(&bank, &GenerationContext::default());
        assert_eq!(bank, before);
    }

    #[test]
    fn empty_tier_falls_back_to_neighbor() {
        let mut bank = LexiconBank::bundled().unwrap();
        bank.after.tiers[2].clear();
        let prepared = PreparedBank::new(&bank, &GenerationContext::default());
        assert_eq!(prepared.pool(Role::After, 2, false), bank.after.tier(1));
    }

    #[test]
    fn cap_keeps_highest_weights_in_order() {
        let pool = vec![
            entry("a", EntryTone::Harsh),
            entry("b", EntryTone::Neutral),
            entry("c", EntryTone::Soft),
            entry("d", EntryTone::Neutral),
        ];
        let capped = cap_pool(pool, Tone::Emotionless, 3);
        let texts: Vec<&str> = capped.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "c", "d"]);
    }

    #[test]
    fn sample_from_empty_role_is_none() {
        let bank = LexiconBank::default();
        let ctx = GenerationContext::default();
        let prepared = PreparedBank::new(&bank, &ctx);
        let mut rng = EntropySource::new();
        assert!(sample(&mut rng, &ctx, &prepared, PickRequest::new(Role::Pre)).is_none());
    }
}
