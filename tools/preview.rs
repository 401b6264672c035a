/// Preview — interactive realisation shell for trying out clauses.
///
/// Usage: preview [--lexicon <path.ron>] [--config <path.ron>] [--seed <n>]
///
/// Commands:
///   clause <subject> | <verb> | <object>  — start a new clause
///   set <feature> <value>                 — tense, negated, passive, perfect,
///                                           progressive, modal, number, person
///   question <type|none>                  — make the clause a question
///   show                                  — print the element tree
///   realise                               — realise the current clause
///   file <path.ron>                       — realise an element stored as RON
///   random <n> [seed]                     — realise n random clauses
///   help                                  — list commands
///   quit                                  — exit

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use surface_realiser::core::lexicon::ron_options;
use surface_realiser::schema::category::LexicalCategory;
use surface_realiser::schema::element::PhraseElement;
use surface_realiser::{
    Element, HasFeatures, Feature, InterrogativeType, MemoryLexicon, NumberAgreement, Person,
    Realiser, RealiserConfig, Tense,
};
use tracing_subscriber::EnvFilter;

/// The clause being edited.
#[derive(Default)]
struct Session {
    subject: String,
    verb: String,
    object: String,
    settings: Vec<(String, String)>,
    question: Option<InterrogativeType>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_usage();
        return;
    }

    let mut lexicon_path = None;
    let mut config_path = None;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--lexicon" if i + 1 < args.len() => {
                i += 1;
                lexicon_path = Some(args[i].clone());
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let lexicon = match load_lexicon(lexicon_path.as_deref()) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    let config = match config_path {
        Some(ref path) => match RealiserConfig::load_from_ron(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ERROR: Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => RealiserConfig::default(),
    };
    let realiser = match Realiser::builder().config(config).lexicon(lexicon.clone()).build() {
        Ok(realiser) => realiser,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("Loaded {} lexicon entries", lexicon.len());
    println!("Seed: {}", seed);
    println!("Type 'help' for commands.\n");

    let mut session = Session {
        subject: "the woman".to_string(),
        verb: "kiss".to_string(),
        object: "the man".to_string(),
        ..Session::default()
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

        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let parts: Vec<&str> = rest.split_whitespace().collect();

        match cmd.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "clause" => {
                let pieces: Vec<&str> = rest.split('|').map(str::trim).collect();
                if pieces.len() < 2 || pieces[1].is_empty() {
                    println!("Usage: clause <subject> | <verb> | <object>");
                    continue;
                }
                session = Session {
                    subject: pieces[0].to_string(),
                    verb: pieces[1].to_string(),
                    object: pieces.get(2).copied().unwrap_or("").to_string(),
                    ..Session::default()
                };
                println!("Clause set.");
            }
            "set" => {
                if parts.len() < 2 {
                    println!("Usage: set <feature> <value>");
                    println!("  tense: past, present, future");
                    println!("  negated, passive, perfect, progressive: on, off");
                    println!("  modal: any modal verb, or none");
                    println!("  number: singular, plural    person: first, second, third");
                    continue;
                }
                let name = parts[0].to_lowercase();
                let value = parts[1].to_lowercase();
                let mut probe = realiser.factory().create_clause("it", "be", ());
                match apply_setting(&mut probe, &name, &value) {
                    Ok(()) => {
                        session.settings.retain(|(n, _)| *n != name);
                        session.settings.push((name, value));
                        println!("OK");
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "question" => {
                let Some(kind) = parts.first() else {
                    println!("Usage: question <type|none>");
                    println!("  yesno, how, why, where, howmany, howpredicate,");
                    println!("  whosubject, whoobject, whoindirectobject, whatsubject, whatobject");
                    continue;
                };
                if kind.eq_ignore_ascii_case("none") {
                    session.question = None;
                    println!("Statement.");
                    continue;
                }
                match parse_question(kind) {
                    Some(kind) => {
                        session.question = Some(kind);
                        println!("Question: {:?}", kind);
                    }
                    None => println!("Unknown question type: {}", kind),
                }
            }
            "show" => match build_clause(&realiser, &session) {
                Ok(clause) => println!("{}", Element::from(clause).print_tree()),
                Err(e) => println!("ERROR: {}", e),
            },
            "realise" | "r" => match build_clause(&realiser, &session) {
                Ok(clause) => print_realised(&realiser, clause.into()),
                Err(e) => println!("ERROR: {}", e),
            },
            "file" => {
                let Some(path) = parts.first() else {
                    println!("Usage: file <path.ron>");
                    continue;
                };
                match load_element(Path::new(path)) {
                    Ok(element) => print_realised(&realiser, element),
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "random" => {
                let count: usize = match parts.first().map(|n| n.parse()) {
                    Some(Ok(n)) => n,
                    _ => {
                        println!("Usage: random <n> [seed]");
                        continue;
                    }
                };
                let run_seed = parts
                    .get(1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(seed);
                random_clauses(&realiser, &lexicon, count, run_seed);
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for commands.", cmd);
            }
        }
    }
}

fn print_usage() {
    println!("Usage: preview [--lexicon <path.ron>] [--config <path.ron>] [--seed <n>]");
}

fn print_help() {
    println!("Commands:");
    println!("  clause <subject> | <verb> | <object>  Start a new clause");
    println!("  set <feature> <value>                 Set a clause feature");
    println!("  question <type|none>                  Make the clause a question");
    println!("  show                                  Print the element tree");
    println!("  realise                               Realise the current clause");
    println!("  file <path.ron>                       Realise an element stored as RON");
    println!("  random <n> [seed]                     Realise n random clauses");
    println!("  help                                  Show this help");
    println!("  quit                                  Exit");
}

fn load_lexicon(path: Option<&str>) -> Result<Arc<MemoryLexicon>, surface_realiser::LexiconError> {
    match path {
        Some(path) => Ok(Arc::new(MemoryLexicon::load_from_ron(Path::new(path))?)),
        None => MemoryLexicon::english(),
    }
}

fn load_element(path: &Path) -> Result<Element, String> {
    let contents = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    ron_options().from_str(&contents).map_err(|e| e.to_string())
}

fn build_clause(realiser: &Realiser, session: &Session) -> Result<PhraseElement, String> {
    let factory = realiser.factory();
    let object = (!session.object.is_empty()).then_some(session.object.as_str());
    let mut clause = factory.create_clause(session.subject.as_str(), session.verb.as_str(), object);
    for (name, value) in &session.settings {
        apply_setting(&mut clause, name, value)?;
    }
    if let Some(kind) = session.question {
        clause.set(Feature::InterrogativeType, kind);
    }
    Ok(clause)
}

fn print_realised(realiser: &Realiser, element: Element) {
    match realiser.realise_sentence(element) {
        Ok(text) => {
            println!("\n--- Realised ---");
            println!("{}", text);
            println!("--- End ---\n");
        }
        Err(e) => println!("ERROR: {}", e),
    }
}

fn apply_setting(clause: &mut PhraseElement, name: &str, value: &str) -> Result<(), String> {
    match name {
        "tense" => {
            let tense = match value {
                "past" => Tense::Past,
                "present" => Tense::Present,
                "future" => Tense::Future,
                _ => return Err(format!("Unknown tense: {}", value)),
            };
            clause.set(Feature::Tense, tense);
        }
        "negated" | "passive" | "perfect" | "progressive" => {
            let on = match value {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                _ => return Err(format!("Expected on or off, got: {}", value)),
            };
            let key = match name {
                "negated" => Feature::Negated,
                "passive" => Feature::Passive,
                "perfect" => Feature::Perfect,
                _ => Feature::Progressive,
            };
            clause.set(key, on);
        }
        "modal" => {
            if value == "none" {
                clause.clear_feature(Feature::Modal);
            } else {
                clause.set(Feature::Modal, value);
            }
        }
        "number" => {
            let number = match value {
                "singular" => NumberAgreement::Singular,
                "plural" => NumberAgreement::Plural,
                _ => return Err(format!("Unknown number: {}", value)),
            };
            clause.set(Feature::Number, number);
        }
        "person" => {
            let person = match value {
                "first" => Person::First,
                "second" => Person::Second,
                "third" => Person::Third,
                _ => return Err(format!("Unknown person: {}", value)),
            };
            clause.set(Feature::Person, person);
        }
        _ => return Err(format!("Unknown feature: {}", name)),
    }
    Ok(())
}

fn parse_question(s: &str) -> Option<InterrogativeType> {
    match s.to_lowercase().as_str() {
        "yesno" | "yes_no" => Some(InterrogativeType::YesNo),
        "how" => Some(InterrogativeType::How),
        "why" => Some(InterrogativeType::Why),
        "where" => Some(InterrogativeType::Where),
        "howmany" | "how_many" => Some(InterrogativeType::HowMany),
        "howpredicate" | "how_predicate" => Some(InterrogativeType::HowPredicate),
        "whosubject" | "who_subject" => Some(InterrogativeType::WhoSubject),
        "whoobject" | "who_object" => Some(InterrogativeType::WhoObject),
        "whoindirectobject" | "who_indirect_object" => Some(InterrogativeType::WhoIndirectObject),
        "whatsubject" | "what_subject" => Some(InterrogativeType::WhatSubject),
        "whatobject" | "what_object" => Some(InterrogativeType::WhatObject),
        _ => None,
    }
}

/// Random transitive clauses over the lexicon's nouns and verbs, with
/// random tense, negation, voice and question type.
fn random_clauses(realiser: &Realiser, lexicon: &MemoryLexicon, count: usize, seed: u64) {
    let nouns: Vec<&str> = lexicon
        .iter()
        .filter(|w| w.category == LexicalCategory::Noun && !w.flag(Feature::Proper))
        .map(|w| w.base_form.as_str())
        .collect();
    let verbs: Vec<&str> = lexicon
        .iter()
        .filter(|w| w.category == LexicalCategory::Verb && w.base_form != "be")
        .map(|w| w.base_form.as_str())
        .collect();
    if nouns.is_empty() || verbs.is_empty() {
        println!("The lexicon needs at least one noun and one verb.");
        return;
    }

    let questions = [
        InterrogativeType::YesNo,
        InterrogativeType::WhoSubject,
        InterrogativeType::WhatObject,
        InterrogativeType::Why,
    ];
    let tenses = [Tense::Past, Tense::Present, Tense::Future];
    let mut rng = StdRng::seed_from_u64(seed);
    let factory = realiser.factory();
    let mut errors = 0;

    println!("\n=== Random Clauses: {} (seed {}) ===\n", count, seed);
    for i in 0..count {
        let subject = factory.create_noun_phrase("the", *nouns.choose(&mut rng).unwrap_or(&"dog"));
        let object = factory.create_noun_phrase("a", *nouns.choose(&mut rng).unwrap_or(&"cat"));
        let verb = *verbs.choose(&mut rng).unwrap_or(&"chase");
        let mut clause = factory.create_clause(subject, verb, object);
        let tense = tenses[rng.gen_range(0..tenses.len())];
        clause.set(Feature::Tense, tense);
        clause.set(Feature::Negated, rng.gen_bool(0.25));
        clause.set(Feature::Passive, rng.gen_bool(0.25));
        if rng.gen_bool(0.3) {
            let kind = questions[rng.gen_range(0..questions.len())];
            clause.set(Feature::InterrogativeType, kind);
        }
        match realiser.realise_sentence(clause.into()) {
            Ok(text) => println!("[{}] {}", i + 1, text),
            Err(e) => {
                errors += 1;
                println!("[{}] ERROR: {}", i + 1, e);
            }
        }
    }
    println!("\n{} clauses, {} errors", count, errors);
}
