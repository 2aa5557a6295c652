use std::{
    env,
    path::Path,
    process,
};

use lexanki::{
    anki::AnkiClient,
    core::{
        http::HttpMediaSource,
        models::DeckFile,
        pipeline::{
            DeckProcessor,
            RunReport,
        },
        LexankiError,
    },
    lookup::LarousseClient,
};

const DEFAULT_DECK_FILE: &str = "words/decks.json";

fn main() {
    match run() {
        Ok(report) => {
            println!("Submitted {} notes ({} rejected)", report.submitted, report.rejected);

            if !report.failures.is_empty() {
                eprintln!("{} word(s) skipped:", report.failures.len());
                for failure in &report.failures {
                    eprintln!("  [{}] {}: {}", failure.deck, failure.word, failure.reason);
                }
                process::exit(2);
            }
        }
        Err(e) => {
            eprintln!("lexanki: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> Result<RunReport, LexankiError> {
    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_DECK_FILE.to_string());
    let decks = DeckFile::load(Path::new(&path))?;

    let anki = AnkiClient::new();
    let version = anki.version()?;
    println!("AnkiConnect is online. Version: {}", version);

    let larousse = LarousseClient::new()?;
    let media = HttpMediaSource::new()?;

    let processor = DeckProcessor::new(&larousse, &larousse, &media, &anki)?;
    Ok(processor.run(&decks))
}
