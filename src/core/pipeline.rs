/// The line pipeline: parameters → one generated line.
///
/// Resolves parameters, seeds the random source, prepares per-call pools,
/// runs the composer and splices the user phrase in.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::breaker::break_phrase;
use crate::core::composer::{compose, splice_phrase};
use crate::core::context::GenerationContext;
use crate::core::rng::{source_for_seed, RandomSource};
use crate::core::sampler::PreparedBank;
use crate::schema::lexicon::{LexiconBank, LexiconError};
use crate::schema::params::{GenerationParameters, PhraseMode, ResolvedParams};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Generate one line. Returns `""` when no lexicon is available.
pub fn generate_line(params: &GenerationParameters, lexicon: Option<&LexiconBank>) -> String {
    let Some(lexicon) = lexicon else {
        log::debug!("no lexicon loaded; empty line");
        return String::new();
    };
    let resolved = params.resolve();
    let mut rng = source_for_seed(resolved.seed_text.as_deref());
    generate_with(&mut *rng, &resolved, lexicon)
}

/// Generate from already-resolved parameters with a caller-supplied source.
pub fn generate_with(
    rng: &mut dyn RandomSource,
    params: &ResolvedParams,
    lexicon: &LexiconBank,
) -> String {
    let ctx = GenerationContext::new(params);
    let bank = PreparedBank::new(lexicon, &ctx);
    let mut parts = compose(rng, &ctx, &bank);

    if let Some(phrase) = &params.phrase {
        let spliced = match params.phrase_mode {
            PhraseMode::Raw => phrase.clone(),
            PhraseMode::Broken => break_phrase(
                rng,
                phrase,
                params.break_strength,
                &params.break_rules,
                &params.break_weights,
            ),
        };
        if !spliced.is_empty() {
            splice_phrase(&mut parts, spliced);
        }
    }

    parts.join(" ")
}

/// Holds a lexicon and generates lines from it. Built via
/// `DistressEngine::builder()`.
#[derive(Debug, Clone, Default)]
pub struct DistressEngine {
    lexicon: Option<LexiconBank>,
}

/// Builder for constructing a `DistressEngine`.
#[derive(Debug, Default)]
pub struct DistressEngineBuilder {
    lexicon_path: Option<PathBuf>,
    bundled: bool,
    /// Directly provided lexicon (for testing without files).
    lexicon: Option<LexiconBank>,
}

impl DistressEngine {
    pub fn builder() -> DistressEngineBuilder {
        DistressEngineBuilder::default()
    }

    pub fn has_lexicon(&self) -> bool {
        self.lexicon.is_some()
    }

    pub fn lexicon(&self) -> Option<&LexiconBank> {
        self.lexicon.as_ref()
    }

    pub fn generate(&self, params: &GenerationParameters) -> String {
        generate_line(params, self.lexicon.as_ref())
    }

    /// Generate `count` lines. Seeded parameters give identical lines.
    pub fn generate_many(&self, params: &GenerationParameters, count: usize) -> Vec<String> {
        (0..count).map(|_| self.generate(params)).collect()
    }
}

impl DistressEngineBuilder {
    pub fn lexicon_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.lexicon_path = Some(path.into());
        self
    }

    /// Use the vocabulary compiled into the crate.
    pub fn bundled_lexicon(mut self) -> Self {
        self.bundled = true;
        self
    }

    /// Provide a lexicon directly (for testing without files).
    pub fn with_lexicon(mut self, lexicon: LexiconBank) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    /// A file path wins over a provided lexicon, which wins over the bundled
    /// one. With none of them the engine generates empty lines.
    pub fn build(self) -> Result<DistressEngine, EngineError> {
        let lexicon = if let Some(path) = &self.lexicon_path {
            log::debug!("loading lexicon from {}", path.display());
            Some(LexiconBank::load_from_ron(path)?)
        } else if let Some(lexicon) = self.lexicon {
            Some(lexicon)
        } else if self.bundled {
            Some(LexiconBank::bundled()?)
        } else {
            None
        };

        if let Some(lexicon) = &lexicon {
            for issue in lexicon.validate() {
                log::warn!("lexicon: {}", issue);
            }
        }

        Ok(DistressEngine { lexicon })
    }
}
