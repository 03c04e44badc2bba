/// Generation context: the immutable per-call settings threaded through
/// the sampler and composer.

use crate::schema::params::{Flow, LengthClass, ResolvedParams, Style, Symbol};
use crate::schema::tone::Tone;

/// Tones whose lines may contain retching bursts.
const BURST_TONES: [Tone; 3] = [Tone::Rage, Tone::Shaken, Tone::Panic];

/// Everything a single generation call needs to know about the caller's
/// intent. Built once from [`ResolvedParams`] and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationContext {
    pub tone: Tone,
    pub style: Style,
    /// Requested intensity tier, before jitter.
    pub tier: usize,
    pub length: LengthClass,
    pub flow: Flow,
    pub reduce_ellipsis: bool,
    pub symbols: Vec<Symbol>,
}

impl GenerationContext {
    pub fn new(params: &ResolvedParams) -> Self {
        Self {
            tone: params.tone,
            style: params.style,
            tier: params.tier,
            length: params.length,
            flow: params.flow,
            reduce_ellipsis: params.reduce_ellipsis,
            symbols: params.symbols.clone(),
        }
    }

    /// Whether burst fragments may appear in continuation and cut pools.
    pub fn burst_eligible(&self) -> bool {
        self.tier >= 1 && BURST_TONES.contains(&self.tone)
    }
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new(&ResolvedParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::params::GenerationParameters;

    #[test]
    fn context_copies_resolved_params() {
        let params = GenerationParameters {
            tone: Some("harsh".into()),
            style: Some("flat".into()),
            length: Some("long".into()),
            symbol_options: vec!["♡".into()],
            ..Default::default()
        }
        .resolve();
        let ctx = GenerationContext::new(&params);
        assert_eq!(ctx.tone, Tone::Rage);
        assert_eq!(ctx.style, Style::Flat);
        assert_eq!(ctx.length, LengthClass::Long);
        assert_eq!(ctx.symbols, vec![Symbol::Heart]);
    }

    #[test]
    fn burst_needs_tier_and_tone() {
        let mut ctx = GenerationContext {
            tone: Tone::Rage,
            tier: 0,
            ..Default::default()
        };
        assert!(!ctx.burst_eligible());
        ctx.tier = 1;
        assert!(ctx.burst_eligible());
        ctx.tone = Tone::Timid;
        assert!(!ctx.burst_eligible());
        ctx.tone = Tone::Panic;
        ctx.tier = 2;
        assert!(ctx.burst_eligible());
    }
}
