/// Lexicon Linter — validates RON lexicon files before they are loaded.
///
/// Usage: lexicon_linter <lexicon.ron | lexicon_dir>

use std::collections::HashMap;
use std::path::Path;
use std::process;

use surface_realiser::core::lexicon::{parse_records, LexiconRecord};
use surface_realiser::schema::category::LexicalCategory;
use surface_realiser::schema::element::HasFeatures;
use surface_realiser::schema::features::{Feature, Inflection};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: lexicon_linter <lexicon.ron | lexicon_dir>");
        process::exit(0);
    }

    let path = Path::new(&args[1]);
    let mut files = Vec::new();
    if path.is_file() {
        files.push(path.to_path_buf());
    } else if path.is_dir() {
        collect_ron_files(path, &mut files);
    } else {
        eprintln!("ERROR: Path '{}' does not exist", args[1]);
        process::exit(1);
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut total = 0;

    for file in &files {
        let contents = match std::fs::read_to_string(file) {
            Ok(contents) => contents,
            Err(e) => {
                errors.push(format!("{}: {}", file.display(), e));
                continue;
            }
        };
        match parse_records(&contents) {
            Ok(records) => {
                println!("  Loaded: {} ({} records)", file.display(), records.len());
                total += records.len();
                let (file_errors, file_warnings) = lint_records(&records);
                let label = file.display();
                errors.extend(file_errors.into_iter().map(|e| format!("{label}: {e}")));
                warnings.extend(file_warnings.into_iter().map(|w| format!("{label}: {w}")));
            }
            Err(e) => errors.push(format!("{}: {}", file.display(), e)),
        }
    }

    println!("Checked {} records", total);
    println!("\n=== Lexicon Lint Report ===\n");

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

fn collect_ron_files(dir: &Path, files: &mut Vec<std::path::PathBuf>) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                collect_ron_files(&path, files);
            } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
                files.push(path);
            }
        }
    }
}

fn lint_records(records: &[LexiconRecord]) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut ids: HashMap<&str, usize> = HashMap::new();
    let mut entries: HashMap<(String, LexicalCategory), usize> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        if let Some(id) = record.id.as_deref() {
            if let Some(first) = ids.insert(id, index) {
                errors.push(format!("id '{}' used by records {} and {}", id, first, index));
            }
        }

        let (word, unknown) = match record.to_word(index) {
            Ok(converted) => converted,
            Err(e) => {
                errors.push(e.to_string());
                continue;
            }
        };

        for tag in unknown {
            warnings.push(format!("'{}': unknown tag '{}'", word.base_form, tag));
        }

        if let Some(first) = entries.insert((word.base_form.clone(), word.category), index) {
            warnings.push(format!(
                "'{}' ({:?}) appears in records {} and {}",
                word.base_form, word.category, first, index
            ));
        }

        let irregular = word.inflections.contains(&Inflection::Irregular);
        if word.category == LexicalCategory::Verb && irregular && word.base_form != "be" {
            for key in [Feature::Past, Feature::PastParticiple] {
                if !word.has(key) {
                    warnings.push(format!(
                        "irregular verb '{}' has no {:?} form",
                        word.base_form, key
                    ));
                }
            }
        }
        if word.category == LexicalCategory::Noun && irregular && !word.has(Feature::Plural) {
            warnings.push(format!("irregular noun '{}' has no plural form", word.base_form));
        }
    }

    (errors, warnings)
}
