use anyhow::Result;
use clap::{Parser, Subcommand};
use engine::{DocId, IndexStore};
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and inspect the in-memory search index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a corpus file and print summary statistics
    Stats {
        /// Corpus path, one 0x03-separated title/content/url record per line
        #[arg(long)]
        input: String,
    },
    /// Build the index, then resolve tokens and doc ids read from stdin
    Inspect {
        /// Corpus path, one 0x03-separated title/content/url record per line
        #[arg(long)]
        input: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { input } => stats(&input),
        Commands::Inspect { input } => inspect(&input),
    }
}

fn build(input: &str) -> Result<IndexStore> {
    let mut store = IndexStore::new();
    let stats = store.build_all(input)?;
    tracing::info!(
        indexed = stats.indexed,
        skipped = stats.skipped,
        tokens = store.token_count(),
        "corpus indexed"
    );
    Ok(store)
}

fn stats(input: &str) -> Result<()> {
    let store = build(input)?;
    let summary = json!({
        "documents": store.doc_count(),
        "tokens": store.token_count(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn inspect(input: &str) -> Result<()> {
    let store = build(input)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("lookup# ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        // "#7" resolves a document by id; anything else is tokenized and
        // resolved against the posting lists.
        let report = match query.strip_prefix('#') {
            Some(id) => document_report(&store, id),
            None => token_report(&store, query),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn document_report(store: &IndexStore, id: &str) -> serde_json::Value {
    let doc_id: DocId = match id.trim().parse() {
        Ok(doc_id) => doc_id,
        Err(_) => return json!({ "error": format!("not a doc id: {id:?}") }),
    };
    match store.get_document(doc_id) {
        Ok(doc) => json!(doc),
        Err(err) => json!({ "error": err.to_string() }),
    }
}

fn token_report(store: &IndexStore, query: &str) -> serde_json::Value {
    let tokens = store.tokenizer().tokenize(query);
    if tokens.is_empty() {
        return json!({ "error": "no tokens in input" });
    }
    let mut reports = Vec::with_capacity(tokens.len());
    for token in tokens {
        let entry = match store.get_posting_list(&token) {
            Ok(postings) => {
                let hits: Vec<serde_json::Value> = postings
                    .iter()
                    .map(|p| {
                        let doc = store.get_document(p.doc_id).ok();
                        json!({
                            "doc_id": p.doc_id,
                            "weight": p.weight,
                            "title": doc.map(|d| d.title.clone()),
                            "url": doc.map(|d| d.url.clone()),
                        })
                    })
                    .collect();
                json!({ "token": token, "postings": hits })
            }
            Err(err) => json!({ "token": token, "error": err.to_string() }),
        };
        reports.push(entry);
    }
    json!(reports)
}
