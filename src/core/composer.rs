/// Line composer: structural patterns and flow modes.
///
/// A line is a fixed sequence of slots. The default builder picks the
/// sequence with a two-level weighted decision (lean group, then pattern);
/// the sudden, endure and continuous flows build their own sequences. Once
/// chosen, slot order never changes.

use crate::core::context::GenerationContext;
use crate::core::rng::RandomSource;
use crate::core::sampler::{is_burst, sample, weighted_choice, PickBias, PickRequest, PreparedBank};
use crate::core::variety::{apply_symbol, drop_leading_ellipsis, vary_ellipsis};
use crate::schema::lexicon::Role;
use crate::schema::params::{Flow, LengthClass, Style};
use crate::schema::tone::Tone;

const SUDDEN_CHANCE: f64 = 0.18;
const ENDURE_CHANCE: f64 = 0.18;
const CONTINUOUS_CHANCE: f64 = 0.20;
const BIAS_TOTAL: f64 = 100.0;

/// A fragment position within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Pre,
    Cont,
    Cut,
    After,
    ExtraCont,
    ExtraAfter,
    StrongCont,
    StrongCut,
    SoftPre,
}

impl Slot {
    pub fn role(&self) -> Role {
        match self {
            Self::Pre | Self::SoftPre => Role::Pre,
            Self::Cont | Self::ExtraCont | Self::StrongCont => Role::Cont,
            Self::Cut | Self::StrongCut => Role::Cut,
            Self::After | Self::ExtraAfter => Role::After,
        }
    }

    pub fn bias(&self) -> PickBias {
        match self {
            Self::StrongCont | Self::StrongCut => PickBias::Strong,
            Self::SoftPre => PickBias::Soft,
            _ => PickBias::Normal,
        }
    }
}

/// What a pattern group leans toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lean {
    Cut,
    Cont,
    Compact,
    Extended,
}

impl Lean {
    pub const ALL: [Lean; 4] = [Self::Cut, Self::Cont, Self::Compact, Self::Extended];

    fn index(&self) -> usize {
        match self {
            Self::Cut => 0,
            Self::Cont => 1,
            Self::Compact => 2,
            Self::Extended => 3,
        }
    }
}

/// One concrete fragment assembly.
#[derive(Debug)]
pub struct Pattern {
    pub weight: f64,
    pub slots: &'static [Slot],
}

/// Patterns sharing a lean; the outer level of the decision.
#[derive(Debug)]
pub struct PatternGroup {
    pub lean: Lean,
    pub patterns: &'static [Pattern],
}

use Slot::{After, Cont, Cut, ExtraAfter, ExtraCont, Pre, SoftPre, StrongCont, StrongCut};

const SHORT_GROUPS: &[PatternGroup] = &[
    PatternGroup {
        lean: Lean::Cut,
        patterns: &[
            Pattern { weight: 2.0, slots: &[Pre, Cut] },
            Pattern { weight: 1.0, slots: &[Cont, Cut] },
        ],
    },
    PatternGroup {
        lean: Lean::Cont,
        patterns: &[Pattern { weight: 1.0, slots: &[Pre, Cont] }],
    },
    PatternGroup {
        lean: Lean::Compact,
        patterns: &[Pattern { weight: 1.0, slots: &[Pre, After] }],
    },
];

const MEDIUM_GROUPS: &[PatternGroup] = &[
    PatternGroup {
        lean: Lean::Cut,
        patterns: &[
            Pattern { weight: 3.0, slots: &[Pre, Cont, Cut] },
            Pattern { weight: 2.0, slots: &[Pre, Cut, After] },
        ],
    },
    PatternGroup {
        lean: Lean::Cont,
        patterns: &[
            Pattern { weight: 2.0, slots: &[Pre, Cont, ExtraCont] },
            Pattern { weight: 2.0, slots: &[Pre, Cont, After] },
        ],
    },
    PatternGroup {
        lean: Lean::Compact,
        patterns: &[Pattern { weight: 1.0, slots: &[Pre, Cut] }],
    },
    PatternGroup {
        lean: Lean::Extended,
        patterns: &[Pattern { weight: 1.0, slots: &[Pre, Cont, Cut, After] }],
    },
];

const LONG_GROUPS: &[PatternGroup] = &[
    PatternGroup {
        lean: Lean::Cut,
        patterns: &[
            Pattern { weight: 3.0, slots: &[Pre, Cont, Cut, After] },
            Pattern { weight: 1.0, slots: &[Pre, Cut, Cont, After] },
        ],
    },
    PatternGroup {
        lean: Lean::Cont,
        patterns: &[
            Pattern { weight: 2.0, slots: &[Pre, Cont, ExtraCont, Cut, After] },
            Pattern { weight: 1.0, slots: &[Pre, Cont, ExtraCont, After] },
        ],
    },
    PatternGroup {
        lean: Lean::Compact,
        patterns: &[Pattern { weight: 1.0, slots: &[Pre, Cont, Cut] }],
    },
    PatternGroup {
        lean: Lean::Extended,
        patterns: &[Pattern {
            weight: 1.0,
            slots: &[Pre, Cont, ExtraCont, Cut, After, ExtraAfter],
        }],
    },
];

const XLONG_GROUPS: &[PatternGroup] = &[
    PatternGroup {
        lean: Lean::Cut,
        patterns: &[Pattern {
            weight: 1.0,
            slots: &[Pre, Cont, Cut, ExtraCont, After, ExtraAfter],
        }],
    },
    PatternGroup {
        lean: Lean::Cont,
        patterns: &[Pattern {
            weight: 1.0,
            slots: &[Pre, Cont, ExtraCont, Cut, After, ExtraAfter],
        }],
    },
    PatternGroup {
        lean: Lean::Compact,
        patterns: &[Pattern { weight: 1.0, slots: &[Pre, Cont, ExtraCont, Cut, After] }],
    },
    PatternGroup {
        lean: Lean::Extended,
        patterns: &[Pattern {
            weight: 1.0,
            slots: &[Pre, Cont, ExtraCont, Cut, ExtraCont, After, ExtraAfter],
        }],
    },
];

pub fn pattern_groups(length: LengthClass) -> &'static [PatternGroup] {
    match length {
        LengthClass::Short => SHORT_GROUPS,
        LengthClass::Medium => MEDIUM_GROUPS,
        LengthClass::Long => LONG_GROUPS,
        LengthClass::XLong => XLONG_GROUPS,
    }
}

/// Base lean weights per tone, indexed like [`Lean::ALL`]. Rows sum to 100.
pub fn tone_structure_bias(tone: Tone) -> [f64; 4] {
    match tone {
        Tone::Rage => [35.0, 25.0, 25.0, 15.0],
        Tone::Emotionless => [20.0, 30.0, 35.0, 15.0],
        Tone::Timid => [20.0, 25.0, 40.0, 15.0],
        Tone::Shaken => [25.0, 30.0, 15.0, 30.0],
        Tone::Panic => [30.0, 30.0, 10.0, 30.0],
    }
}

/// Multipliers a style applies to the lean weights.
pub fn style_adjustments(style: Style) -> &'static [(Lean, f64)] {
    match style {
        Style::None => &[],
        Style::Restrained => &[(Lean::Compact, 1.3), (Lean::Extended, 0.7)],
        Style::Unsteady => &[(Lean::Extended, 1.3), (Lean::Compact, 0.7)],
        Style::Flat => &[(Lean::Cont, 1.3), (Lean::Cut, 0.7)],
    }
}

/// Scale the named weights, then renormalize so the row sums to 100. A row
/// that sums to zero is left as-is.
pub fn reweight(weights: [f64; 4], adjustments: &[(Lean, f64)]) -> [f64; 4] {
    let mut out = weights;
    for (lean, factor) in adjustments {
        out[lean.index()] *= factor;
    }
    let total: f64 = out.iter().sum();
    if total > 0.0 {
        for w in &mut out {
            *w = *w * BIAS_TOTAL / total;
        }
    }
    out
}

pub fn lean_weights(ctx: &GenerationContext) -> [f64; 4] {
    reweight(tone_structure_bias(ctx.tone), style_adjustments(ctx.style))
}

/// The lean both the tone and the style push toward, if any. Such pairs
/// are applied as-is; this only reports them.
pub fn stacked_bias(tone: Tone, style: Style) -> Option<Lean> {
    let base = tone_structure_bias(tone);
    let max = base.iter().cloned().fold(f64::MIN, f64::max);
    style_adjustments(style)
        .iter()
        .find(|(lean, factor)| *factor > 1.0 && base[lean.index()] >= max)
        .map(|(lean, _)| *lean)
}

/// Two-level weighted decision: lean group, then pattern within it.
pub fn choose_pattern(rng: &mut dyn RandomSource, ctx: &GenerationContext) -> &'static [Slot] {
    let leans = lean_weights(ctx);
    let group = weighted_choice(rng, pattern_groups(ctx.length), |g| leans[g.lean.index()]);
    let pattern = weighted_choice(rng, group.patterns, |p| p.weight);
    log::debug!("default pattern {:?} via {:?}", pattern.slots, group.lean);
    pattern.slots
}

/// The requested flow, or a randomized override when none was requested.
pub fn resolve_flow(rng: &mut dyn RandomSource, ctx: &GenerationContext) -> Flow {
    if ctx.flow != Flow::None {
        return ctx.flow;
    }
    let roll = rng.next_f64();
    if roll < SUDDEN_CHANCE {
        Flow::Sudden
    } else if roll < SUDDEN_CHANCE + ENDURE_CHANCE {
        Flow::Endure
    } else if roll < SUDDEN_CHANCE + ENDURE_CHANCE + CONTINUOUS_CHANCE {
        Flow::Continuous
    } else {
        Flow::None
    }
}

fn sudden_slots(length: LengthClass) -> Vec<Slot> {
    match length {
        LengthClass::Short => vec![StrongCont, StrongCut],
        LengthClass::Medium => vec![StrongCont, StrongCut, After],
        LengthClass::Long => vec![StrongCont, StrongCont, StrongCut, After],
        LengthClass::XLong => vec![StrongCont, StrongCont, StrongCut, Cont, After],
    }
}

fn endure_slots(length: LengthClass) -> Vec<Slot> {
    match length {
        LengthClass::Short | LengthClass::Medium => vec![SoftPre, Cont, Cut, Cut, After],
        LengthClass::Long | LengthClass::XLong => {
            vec![SoftPre, Cont, Cut, Cut, After, ExtraAfter]
        }
    }
}

/// The default pattern with a strong continuation placed before its first
/// continuation slot.
fn continuous_slots(rng: &mut dyn RandomSource, ctx: &GenerationContext) -> Vec<Slot> {
    let mut slots = choose_pattern(rng, ctx).to_vec();
    let at = slots
        .iter()
        .position(|s| s.role() == Role::Cont)
        .unwrap_or_else(|| usize::from(slots.first() == Some(&Pre)));
    slots.insert(at, StrongCont);
    slots
}

/// Slot sequence for a resolved flow.
pub fn build_slots(rng: &mut dyn RandomSource, ctx: &GenerationContext, flow: Flow) -> Vec<Slot> {
    match flow {
        Flow::Sudden => sudden_slots(ctx.length),
        Flow::Endure => endure_slots(ctx.length),
        Flow::Continuous => continuous_slots(rng, ctx),
        Flow::None => choose_pattern(rng, ctx).to_vec(),
    }
}

/// Fills slots one by one, tracking the previous pick and bursts.
struct LineBuilder<'a> {
    rng: &'a mut dyn RandomSource,
    ctx: &'a GenerationContext,
    bank: &'a PreparedBank,
    flow: Flow,
    parts: Vec<String>,
    previous: Option<(Role, String)>,
    burst_used: bool,
}

impl<'a> LineBuilder<'a> {
    fn fill(&mut self, slot: Slot) {
        let role = slot.role();
        let previous = self.previous.as_ref();
        let strict = previous.map(|(r, _)| *r == role).unwrap_or(false);
        let request = PickRequest::new(role)
            .bias(slot.bias())
            .avoiding(previous.map(|(_, text)| text.as_str()), strict);

        let Some(mut text) = sample(&mut *self.rng, self.ctx, self.bank, request) else {
            log::warn!("no '{}' entries in any tier; slot skipped", role);
            return;
        };

        if matches!(role, Role::Cont | Role::Cut) && is_burst(&text) {
            if self.burst_used {
                if let Some(resampled) =
                    sample(&mut *self.rng, self.ctx, self.bank, request.burst_free())
                {
                    text = resampled;
                }
            } else {
                self.burst_used = true;
            }
        }

        // reduce_ellipsis is handled inside vary_ellipsis; other roles keep theirs
        let shown = match role {
            Role::Cont if self.flow == Flow::Sudden => drop_leading_ellipsis(&text),
            Role::Cut | Role::After => vary_ellipsis(&mut *self.rng, self.ctx, &text),
            _ => text.clone(),
        };

        self.parts.push(shown);
        self.previous = Some((role, text));
    }
}

/// Assemble the structural fragments of one line (no phrase yet).
pub fn compose(
    rng: &mut dyn RandomSource,
    ctx: &GenerationContext,
    bank: &PreparedBank,
) -> Vec<String> {
    if let Some(lean) = stacked_bias(ctx.tone, ctx.style) {
        log::debug!(
            "tone {:?} and style {:?} both favor {:?}",
            ctx.tone,
            ctx.style,
            lean
        );
    }

    let flow = resolve_flow(rng, ctx);
    let slots = build_slots(rng, ctx, flow);
    log::debug!("flow {} with {} slots", flow.name(), slots.len());

    let mut builder = LineBuilder {
        rng: &mut *rng,
        ctx,
        bank,
        flow,
        parts: Vec::with_capacity(slots.len() + 1),
        previous: None,
        burst_used: false,
    };
    for slot in slots {
        builder.fill(slot);
    }

    let mut parts = builder.parts;
    apply_symbol(rng, ctx, &mut parts);
    parts
}

/// Insert the phrase as the second element, or append it to a shorter list.
pub fn splice_phrase(parts: &mut Vec<String>, phrase: String) {
    if parts.len() >= 2 {
        parts.insert(1, phrase);
    } else {
        parts.push(phrase);
    }
}
