/// Escalation demo: one seeded line per level, then every flow at the peak.
///
/// Run with: cargo run --example escalation

use distress_line::core::breaker::break_examples;
use distress_line::schema::params::{BreakStrength, LevelInput};
use distress_line::{DistressEngine, GenerationParameters};

fn main() {
    env_logger::init();

    let engine = DistressEngine::builder()
        .bundled_lexicon()
        .build()
        .expect("Failed to build engine");

    // --- Rising intensity, same tone and seed ---
    println!("=== Levels (tone: intense) ===\n");
    for level in 1..=5u8 {
        let params = GenerationParameters {
            level: Some(LevelInput::from(level)),
            tone: Some("intense".into()),
            length: Some("long".into()),
            seed_text: Some("escalation".into()),
            ..Default::default()
        };
        println!("  {}: {}", level, engine.generate(&params));
    }

    // --- Flow modes at the top level ---
    println!("\n=== Flows (level 5, tone: harsh) ===\n");
    for flow in ["none", "sudden", "endure", "continuous"] {
        let params = GenerationParameters {
            level: Some(LevelInput::from(5)),
            tone: Some("harsh".into()),
            flow: Some(flow.into()),
            seed_text: Some(format!("flow-{flow}")),
            ..Default::default()
        };
        println!("  {:<10} {}", flow, engine.generate(&params));
    }

    // --- A plea, broken ---
    println!("\n=== Phrase \"やめてください\" ===\n");
    for (rule, text) in break_examples("やめてください", BreakStrength::Strong) {
        println!("  {:<7} {}", rule.name(), text);
    }
    let params = GenerationParameters {
        level: Some(LevelInput::from(4)),
        tone: Some("panic".into()),
        phrase: Some("やめてください".into()),
        phrase_mode: Some("broken".into()),
        break_intensity: Some("strong".into()),
        symbol_options: vec!["!?".into()],
        seed_text: Some("plea".into()),
        ..Default::default()
    };
    println!("\n  {}", engine.generate(&params));
}
