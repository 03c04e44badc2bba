/// Preview: interactive generation shell for trying lexicons and settings.
///
/// Usage: preview [--lexicon <path>] [--seed <text>]
///
/// Commands:
///   gen [n]             generate n lines (default 1)
///   set <key> <value>   change a parameter (tone, level, length, style, flow,
///                       phrase, mode, strength, rules, weights, symbols, reduce)
///   seed <text|off>     fix or clear the seed text
///   breaks              preview every break rule for the current phrase
///   bulk <n>            generate n lines with variety stats
///   show                print the current parameters
///   help                list commands
///   quit                exit

use distress_line::core::breaker::break_examples;
use distress_line::schema::params::{
    BreakRule, BreakStrength, Flow, LengthClass, LevelInput, Style, Symbol,
};
use distress_line::schema::tone::Tone;
use distress_line::{DistressEngine, GenerationParameters};
use rustc_hash::{FxHashMap, FxHashSet};
use std::io::{self, BufRead, Write};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let mut lexicon_path = None;
    let mut seed_text = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--lexicon" if i + 1 < args.len() => {
                i += 1;
                lexicon_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed_text = Some(args[i].clone());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let builder = match &lexicon_path {
        Some(path) => DistressEngine::builder().lexicon_path(path),
        None => DistressEngine::builder().bundled_lexicon(),
    };
    let engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR loading lexicon: {}", e);
            std::process::exit(1);
        }
    };

    match &lexicon_path {
        Some(path) => println!("Loaded lexicon: {}", path),
        None => println!("Using bundled lexicon"),
    }
    println!("Type 'help' for commands.\n");

    let mut params = GenerationParameters {
        seed_text,
        ..Default::default()
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "gen" | "g" => {
                let count = parts.get(1).and_then(|n| n.parse().ok()).unwrap_or(1);
                for text in engine.generate_many(&params, count) {
                    println!("  {}", text);
                }
            }
            "set" => {
                if parts.len() < 3 {
                    println!("Usage: set <key> <value>");
                    continue;
                }
                let value = parts[2..].join(" ");
                match apply_setting(&mut params, parts[1], &value) {
                    Ok(()) => println!("{} = {}", parts[1], value),
                    Err(msg) => println!("{}", msg),
                }
            }
            "seed" => match parts.get(1) {
                None => println!("Current seed: {}", params.seed_text.as_deref().unwrap_or("(entropy)")),
                Some(&"off") => {
                    params.seed_text = None;
                    println!("Seed cleared.");
                }
                Some(_) => {
                    let text = parts[1..].join(" ");
                    println!("Seed set to '{}'", text);
                    params.seed_text = Some(text);
                }
            },
            "breaks" => {
                let resolved = params.resolve();
                let Some(phrase) = resolved.phrase else {
                    println!("No phrase set. Use 'set phrase <text>' first.");
                    continue;
                };
                println!("Break previews ({}):", resolved.break_strength.name());
                for (rule, text) in break_examples(&phrase, resolved.break_strength) {
                    println!("  {:<7} {}", rule.name(), text);
                }
            }
            "bulk" => {
                let count: usize = match parts.get(1).and_then(|n| n.parse().ok()) {
                    Some(n) if n > 0 => n,
                    _ => {
                        println!("Usage: bulk <n>");
                        continue;
                    }
                };
                print_bulk_stats(&engine, &params, count);
            }
            "show" => {
                println!("{:#?}", params.resolve());
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for available commands.", cmd);
            }
        }
    }
}

fn apply_setting(params: &mut GenerationParameters, key: &str, value: &str) -> Result<(), String> {
    let list = || -> Vec<String> {
        value
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    };
    match key {
        "tone" => {
            Tone::from_alias(value).ok_or_else(|| format!("Unknown tone: {}", value))?;
            params.tone = Some(value.to_string());
        }
        "level" => {
            let level: f64 = value.parse().map_err(|_| format!("Invalid level: {}", value))?;
            params.level = Some(LevelInput::Number(level));
        }
        "length" => {
            LengthClass::from_name(value).ok_or_else(|| format!("Unknown length: {}", value))?;
            params.length = Some(value.to_string());
        }
        "style" => {
            Style::from_name(value).ok_or_else(|| format!("Unknown style: {}", value))?;
            params.style = Some(value.to_string());
        }
        "flow" => {
            Flow::from_name(value).ok_or_else(|| format!("Unknown flow: {}", value))?;
            params.flow = Some(value.to_string());
        }
        "phrase" => params.phrase = Some(value.to_string()),
        "mode" => params.phrase_mode = Some(value.to_string()),
        "strength" => {
            BreakStrength::from_name(value).ok_or_else(|| format!("Unknown strength: {}", value))?;
            params.break_intensity = Some(value.into());
        }
        "rules" => {
            let rules = list();
            if let Some(bad) = rules.iter().find(|r| BreakRule::from_name(r).is_none()) {
                return Err(format!("Unknown rule: {}", bad));
            }
            params.break_rules = rules;
        }
        "weights" => {
            // rule=weight pairs, e.g. cut=2,repeat=0
            let mut weights = FxHashMap::default();
            for pair in list() {
                let (rule, weight) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("Expected rule=weight, got {}", pair))?;
                let weight: f64 = weight.parse().map_err(|_| format!("Invalid weight: {}", weight))?;
                weights.insert(rule.to_string(), weight);
            }
            params.break_weights = weights;
        }
        "symbols" => {
            let symbols = list();
            if let Some(bad) = symbols.iter().find(|s| Symbol::from_text(s).is_none()) {
                return Err(format!("Unknown symbol: {}", bad));
            }
            params.symbol_options = symbols;
        }
        "reduce" => params.reduce_ellipsis = matches!(value, "on" | "true" | "1"),
        _ => return Err(format!("Unknown key: {}", key)),
    }
    Ok(())
}

fn print_bulk_stats(engine: &DistressEngine, params: &GenerationParameters, count: usize) {
    let mut bulk_params = params.clone();
    bulk_params.seed_text = None;

    let lines: Vec<String> = (0..count).map(|_| engine.generate(&bulk_params)).collect();

    println!("\n=== Bulk Generation: {} lines ===\n", lines.len());

    let unique: FxHashSet<&String> = lines.iter().collect();
    println!("Unique lines: {} / {}", unique.len(), lines.len());

    let fragments: Vec<usize> = lines.iter().map(|l| l.split(' ').count()).collect();
    let avg = fragments.iter().sum::<usize>() as f64 / fragments.len().max(1) as f64;
    println!("Average fragments: {:.2}", avg);

    let mut fragment_counts: FxHashMap<&str, u32> = FxHashMap::default();
    for line in &lines {
        for fragment in line.split(' ') {
            *fragment_counts.entry(fragment).or_insert(0) += 1;
        }
    }
    let mut freq: Vec<(&str, u32)> = fragment_counts.into_iter().collect();
    freq.sort_by(|a, b| b.1.cmp(&a.1));
    println!("\nTop 10 fragments:");
    for (fragment, n) in freq.iter().take(10) {
        println!("  {}: {}", fragment, n);
    }

    if let Some(first) = lines.first() {
        println!("\nSample line:");
        println!("  {}", first);
    }
    println!();
}

fn print_usage() {
    println!("Preview: interactive generation shell for trying lexicons and settings.");
    println!();
    println!("Usage: preview [--lexicon <path>] [--seed <text>]");
    println!();
    println!("  --lexicon <path>  RON lexicon file (default: bundled lexicon)");
    println!("  --seed <text>     Seed text for reproducible lines");
}

fn print_help() {
    println!("Commands:");
    println!("  gen [n]              Generate n lines (default 1)");
    println!("  set <key> <value>    Change a parameter");
    println!("  seed <text|off>      Fix or clear the seed text");
    println!("  breaks               Preview every break rule for the current phrase");
    println!("  bulk <n>             Generate n unseeded lines with variety statistics");
    println!("  show                 Print the resolved parameters");
    println!("  help                 Show this help");
    println!("  quit                 Exit");
    println!();
    println!("Keys:");
    println!("  tone      harsh, neutral, soft, intense, panic");
    println!("  level     1-5");
    println!("  length    short, medium, long, xlong");
    println!("  style     none, restrained, unsteady, flat");
    println!("  flow      none, sudden, endure, continuous");
    println!("  phrase    any text (40 chars max)");
    println!("  mode      raw, broken");
    println!("  strength  weak, mid, strong");
    println!("  rules     comma list of cut, sokuon, choke, repeat, split");
    println!("  weights   comma list of rule=weight");
    println!("  symbols   comma list of !, !?, ?!, ♡");
    println!("  reduce    on, off");
}
