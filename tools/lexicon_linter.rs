/// Lexicon Linter: validates tier coverage and entry quality of a lexicon.
///
/// Usage: lexicon_linter [<lexicon.ron>]
///
/// Without a path the bundled lexicon is checked.

use distress_line::core::sampler::{is_burst, visible_len};
use distress_line::schema::lexicon::{LexiconBank, Role, TIER_COUNT};
use distress_line::schema::tone::EntryTone;
use rustc_hash::FxHashSet;
use std::path::Path;
use std::process;

/// Smallest pool a tone cap may cut down to.
const MIN_TIER_SIZE: usize = 5;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("Usage: lexicon_linter [<lexicon.ron>]");
        process::exit(0);
    }

    let bank = match args.get(1) {
        Some(path) => match LexiconBank::load_from_ron(Path::new(path)) {
            Ok(bank) => {
                println!("Loaded lexicon: {}", path);
                bank
            }
            Err(e) => {
                eprintln!("ERROR: Failed to load lexicon file: {}", e);
                process::exit(1);
            }
        },
        None => match LexiconBank::bundled() {
            Ok(bank) => {
                println!("Checking bundled lexicon");
                bank
            }
            Err(e) => {
                eprintln!("ERROR: Bundled lexicon does not parse: {}", e);
                process::exit(1);
            }
        },
    };

    let (errors, warnings) = lint_lexicon(&bank);

    println!("\n=== Lexicon Lint Report ===\n");

    for role in Role::ALL {
        let sizes: Vec<String> = bank
            .role(role)
            .tiers
            .iter()
            .map(|t| t.len().to_string())
            .collect();
        println!("  {:<6} tiers: [{}]", role.name(), sizes.join(", "));
    }
    println!();

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_lexicon(bank: &LexiconBank) -> (Vec<String>, Vec<String>) {
    let errors: Vec<String> = bank.validate().iter().map(|e| e.to_string()).collect();
    let mut warnings = Vec::new();

    for role in Role::ALL {
        for (tier, entries) in bank.role(role).tiers.iter().enumerate().take(TIER_COUNT) {
            let label = format!("{} tier {}", role.name(), tier);

            if !entries.is_empty() && entries.len() < MIN_TIER_SIZE {
                warnings.push(format!(
                    "{} has {} entries; at least {} recommended",
                    label,
                    entries.len(),
                    MIN_TIER_SIZE
                ));
            }

            let mut seen = FxHashSet::default();
            for entry in entries {
                if !seen.insert(entry.text.as_str()) {
                    warnings.push(format!("{} repeats '{}'", label, entry.text));
                }
                if visible_len(&entry.text) == 0 {
                    warnings.push(format!("{} entry '{}' has no sound", label, entry.text));
                }
                if matches!(role, Role::Pre | Role::After) && is_burst(&entry.text) {
                    warnings.push(format!(
                        "{} entry '{}' is a burst; bursts are only gated in cont/cut",
                        label, entry.text
                    ));
                }
            }

            let tones: FxHashSet<EntryTone> = entries.iter().map(|e| e.tone).collect();
            if !entries.is_empty() && tones.len() == 1 {
                warnings.push(format!("{} uses a single tone ({:?})", label, entries[0].tone));
            }
        }
    }

    (errors, warnings)
}
