//! WASM bindings for distress-line: powers the browser generator page.

use wasm_bindgen::prelude::*;

use distress_line::core::breaker::{break_examples, make_break_example};
use distress_line::core::pipeline::EngineError;
use distress_line::core::sanitize::{sanitize, MAX_PHRASE_LEN, MAX_SEED_LEN};
use distress_line::schema::lexicon::LexiconBank;
use distress_line::schema::params::{BreakRule, BreakStrength, Flow, LengthClass, Style, Symbol};
use distress_line::schema::tone::Tone;
use distress_line::{DistressEngine, GenerationParameters};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct BreakExample {
    rule: &'static str,
    text: String,
}

#[derive(serde::Serialize)]
struct OptionLists {
    tones: Vec<&'static str>,
    lengths: Vec<&'static str>,
    styles: Vec<&'static str>,
    flows: Vec<&'static str>,
    break_intensities: Vec<&'static str>,
    break_rules: Vec<&'static str>,
    symbols: Vec<&'static str>,
    max_phrase_len: usize,
    max_seed_len: usize,
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

// ---------------------------------------------------------------------------
// Line generator
// ---------------------------------------------------------------------------

/// Generates lines for the page. Holds the lexicon between calls.
#[wasm_bindgen]
pub struct LineGenerator {
    engine: DistressEngine,
}

#[wasm_bindgen]
impl LineGenerator {
    /// Generator over the lexicon compiled into the binary.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<LineGenerator, JsError> {
        Self::bundled().map_err(|e| JsError::new(&format!("Lexicon load error: {e}")))
    }

    /// Generator over a lexicon fetched by the page. Invalid JSON yields a
    /// generator that returns empty lines, like a failed fetch.
    #[wasm_bindgen(js_name = fromLexiconJson)]
    pub fn from_lexicon_json(json: &str) -> LineGenerator {
        let builder = match serde_json::from_str::<LexiconBank>(json) {
            Ok(bank) => DistressEngine::builder().with_lexicon(bank),
            Err(e) => {
                log::warn!("lexicon JSON rejected: {e}");
                DistressEngine::builder()
            }
        };
        let engine = builder.build().unwrap_or_default();
        LineGenerator { engine }
    }

    /// Generator with no lexicon; every line is empty.
    pub fn empty() -> LineGenerator {
        LineGenerator {
            engine: DistressEngine::default(),
        }
    }

    #[wasm_bindgen(getter, js_name = hasLexicon)]
    pub fn has_lexicon(&self) -> bool {
        self.engine.has_lexicon()
    }

    /// Generate one line from parameters given as JSON (camelCase keys, all
    /// optional).
    ///
    /// ```json
    /// { "level": 3, "length": "medium", "tone": "neutral", "seedText": "abc" }
    /// ```
    pub fn generate(&self, params_json: &str) -> Result<String, JsError> {
        self.generate_from(params_json)
            .map_err(|e| JsError::new(&format!("Invalid parameters JSON: {e}")))
    }
}

// Private helpers
impl LineGenerator {
    fn bundled() -> Result<LineGenerator, EngineError> {
        let engine = DistressEngine::builder().bundled_lexicon().build()?;
        Ok(LineGenerator { engine })
    }

    fn generate_from(&self, params_json: &str) -> Result<String, serde_json::Error> {
        Ok(self.engine.generate(&parse_params(params_json)?))
    }
}

fn parse_params(json: &str) -> Result<GenerationParameters, serde_json::Error> {
    if json.trim().is_empty() {
        return Ok(GenerationParameters::default());
    }
    serde_json::from_str(json)
}

// ---------------------------------------------------------------------------
// Free functions used by the page's form
// ---------------------------------------------------------------------------

/// Preview one break rule. Unknown rules preview as `split`.
#[wasm_bindgen(js_name = makeBreakExample)]
pub fn make_break_example_js(text: &str, intensity: &str, rule: &str) -> String {
    let strength = BreakStrength::from_name(intensity).unwrap_or_default();
    let rule = BreakRule::from_name(rule).unwrap_or(BreakRule::Split);
    make_break_example(&sanitize(text, MAX_PHRASE_LEN), strength, rule)
}

/// Previews of every rule as a JSON array of `{ rule, text }`.
#[wasm_bindgen(js_name = breakExamples)]
pub fn break_examples_js(text: &str, intensity: &str) -> String {
    let strength = BreakStrength::from_name(intensity).unwrap_or_default();
    let examples: Vec<BreakExample> = break_examples(&sanitize(text, MAX_PHRASE_LEN), strength)
        .into_iter()
        .map(|(rule, text)| BreakExample {
            rule: rule.name(),
            text,
        })
        .collect();
    to_json(&examples)
}

/// Sanitize form input. `kind` is `"phrase"` or `"seed"`.
#[wasm_bindgen(js_name = sanitizeInput)]
pub fn sanitize_input(text: &str, kind: &str) -> String {
    let max_len = if kind == "seed" { MAX_SEED_LEN } else { MAX_PHRASE_LEN };
    sanitize(text, max_len)
}

/// Option lists the page builds its controls from, as JSON.
#[wasm_bindgen(js_name = optionLists)]
pub fn option_lists() -> String {
    to_json(&OptionLists {
        tones: Tone::ALL.iter().map(|t| t.public_name()).collect(),
        lengths: LengthClass::ALL.iter().map(|l| l.name()).collect(),
        styles: Style::ALL.iter().map(|s| s.name()).collect(),
        flows: Flow::ALL.iter().map(|f| f.name()).collect(),
        break_intensities: [BreakStrength::Weak, BreakStrength::Mid, BreakStrength::Strong]
            .iter()
            .map(|b| b.name())
            .collect(),
        break_rules: BreakRule::ALL.iter().map(|r| r.name()).collect(),
        symbols: Symbol::ALL.iter().map(|s| s.text()).collect(),
        max_phrase_len: MAX_PHRASE_LEN,
        max_seed_len: MAX_SEED_LEN,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_generator_is_seeded() {
        let generator = LineGenerator::bundled().unwrap();
        let params = r#"{"level": 3, "length": "medium", "tone": "neutral", "flow": "none", "seedText": "test-seed-1"}"#;
        let a = generator.generate_from(params).unwrap();
        let b = generator.generate_from(params).unwrap();
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_lexicon_json_generates_nothing() {
        let generator = LineGenerator::from_lexicon_json("{not json");
        assert!(!generator.has_lexicon());
        assert_eq!(generator.generate_from("{}").unwrap(), "");
    }

    #[test]
    fn lexicon_json_is_accepted() {
        let json = r#"{
            "pre": [[{"text": "う…"}], [{"text": "うぐ…", "tone": "harsh"}], [{"text": "ぐっ…"}]],
            "cut": [[{"text": "はっ…"}], [{"text": "かはっ…"}], [{"text": "がはっ…"}]]
        }"#;
        let generator = LineGenerator::from_lexicon_json(json);
        assert!(generator.has_lexicon());
        let line = generator.generate_from(r#"{"flow": "sudden", "length": "short"}"#).unwrap();
        assert!(!line.is_empty());
    }

    #[test]
    fn form_values_of_the_wrong_type_are_defaulted() {
        let generator = LineGenerator::bundled().unwrap();
        let numeric = generator
            .generate_from(r#"{"level":"3","phrase":"やめて","phraseMode":"broken","breakIntensity":2,"seedText":"form"}"#)
            .unwrap();
        let named = generator
            .generate_from(r#"{"level":"3","phrase":"やめて","phraseMode":"broken","breakIntensity":"strong","seedText":"form"}"#)
            .unwrap();
        assert_eq!(numeric, named);

        let nulls = generator
            .generate_from(r#"{"breakRules":null,"tone":5,"level":true,"symbolOptions":null,"seedText":"form"}"#)
            .unwrap();
        let defaults = generator.generate_from(r#"{"seedText":"form"}"#).unwrap();
        assert_eq!(nulls, defaults);
    }

    #[test]
    fn empty_generator() {
        assert_eq!(LineGenerator::empty().generate_from("").unwrap(), "");
    }

    #[test]
    fn break_example_bridge() {
        assert_eq!(make_break_example_js("やめてください", "mid", "cut"), "やめてく…");
        assert_eq!(make_break_example_js("", "mid", "cut"), "-");
        assert_eq!(
            make_break_example_js("やめてください", "mid", "shout"),
            make_break_example_js("やめてください", "mid", "split")
        );
        assert_eq!(make_break_example_js("やめてください", "mid", "shout"), "やめてく…くだ…");
        assert_eq!(make_break_example_js("", "mid", "shout"), "-");
        assert!(break_examples_js("やめて", "weak").contains("\"rule\":\"split\""));
    }

    #[test]
    fn sanitize_bridge() {
        assert_eq!(sanitize_input("  <b>やめて</b>  ", "phrase"), "bやめて/b");
        assert_eq!(sanitize_input(&"a".repeat(60), "seed").len(), 40);
    }

    #[test]
    fn option_lists_name_every_choice() {
        let json = option_lists();
        assert!(json.contains("\"xlong\""));
        assert!(json.contains("\"continuous\""));
        assert!(json.contains("\"♡\""));
    }
}
