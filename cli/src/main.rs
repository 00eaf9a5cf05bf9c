mod console;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use search_core::{Document, DocumentId, DocumentStatus, SearchConfig, SearchServer};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

const REFERENCE_STOP_WORDS: &str = "and in on";
const REFERENCE_QUERY: &str = "fluffy well-groomed cat";

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Query an in-memory TF-IDF search server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// JSON file with search settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Maximum number of documents per result listing
    #[arg(long, global = true)]
    max_results: Option<usize>,
    /// Relevance difference below which documents are ordered by rating
    #[arg(long, global = true)]
    epsilon: Option<f64>,
    /// Print one JSON object per line instead of the text form
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the reference corpus and print the three reference listings
    Demo,
    /// Read stop words, documents and a query from stdin
    Console,
    /// Show which query words occur in one reference document
    Match {
        #[arg(long, default_value = REFERENCE_QUERY)]
        query: String,
        #[arg(long)]
        id: DocumentId,
    },
}

#[derive(Serialize)]
struct MatchOutput<'a> {
    id: DocumentId,
    words: &'a [String],
    status: DocumentStatus,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Demo => run_demo(config, cli.json),
        Commands::Console => run_console(config, cli.json),
        Commands::Match { ref query, id } => run_match(config, query, id, cli.json),
    }
}

fn load_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SearchConfig::from_json(&text)?
        }
        None => SearchConfig::default(),
    };
    if let Some(max_results) = cli.max_results {
        config.max_result_document_count = max_results;
    }
    if let Some(epsilon) = cli.epsilon {
        config.relevance_epsilon = epsilon;
    }
    config.validate()?;
    Ok(config)
}

fn reference_server(config: SearchConfig) -> Result<SearchServer> {
    let mut server = SearchServer::with_config(config)?;
    server.set_stop_words(REFERENCE_STOP_WORDS);
    server.add_document(0, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3])?;
    server.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])?;
    server.add_document(2, "well-groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1])?;
    server.add_document(3, "well-groomed starling eugene", DocumentStatus::Banned, &[9])?;
    tracing::info!(num_docs = server.document_count(), "reference corpus loaded");
    Ok(server)
}

fn print_documents(out: &mut impl Write, documents: &[Document], json: bool) -> Result<()> {
    for document in documents {
        if json {
            writeln!(out, "{}", serde_json::to_string(document)?)?;
        } else {
            writeln!(out, "{document}")?;
        }
    }
    Ok(())
}

fn run_demo(config: SearchConfig, json: bool) -> Result<()> {
    let server = reference_server(config)?;
    let mut out = io::stdout().lock();

    writeln!(out, "ACTUAL by default:")?;
    print_documents(&mut out, &server.find_top_documents(REFERENCE_QUERY)?, json)?;

    writeln!(out, "BANNED:")?;
    let banned = server.find_top_documents_by_status(REFERENCE_QUERY, DocumentStatus::Banned)?;
    print_documents(&mut out, &banned, json)?;

    writeln!(out, "Even ids:")?;
    let even = server.find_top_documents_with(REFERENCE_QUERY, |id, _, _| id % 2 == 0)?;
    print_documents(&mut out, &even, json)?;
    Ok(())
}

fn run_console(config: SearchConfig, json: bool) -> Result<()> {
    let input = console::read_console_input(&mut io::stdin().lock())?;
    let mut server = SearchServer::with_config(config)?;
    server.set_stop_words(&input.stop_words);
    for (id, (text, ratings)) in input.documents.iter().enumerate() {
        let id = DocumentId::try_from(id).context("too many documents")?;
        server
            .add_document(id, text, DocumentStatus::Actual, ratings)
            .with_context(|| format!("adding document {id}"))?;
    }
    let found = server.find_top_documents(&input.query)?;
    tracing::info!(num_docs = server.document_count(), hits = found.len(), "console query done");
    print_documents(&mut io::stdout().lock(), &found, json)
}

fn run_match(config: SearchConfig, query: &str, id: DocumentId, json: bool) -> Result<()> {
    let server = reference_server(config)?;
    let (words, status) = server.match_document(query, id)?;
    let mut out = io::stdout().lock();
    if json {
        let output = MatchOutput { id, words: &words, status };
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
    } else {
        writeln!(out, "{{ document_id = {id}, status = {status}, words = [{}] }}", words.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_listing_matches_reference_output() {
        let server = reference_server(SearchConfig::default()).unwrap();
        let mut out = Vec::new();
        print_documents(&mut out, &server.find_top_documents(REFERENCE_QUERY).unwrap(), false)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "{ document_id = 1, relevance = 0.866434, rating = 5 }\n\
             { document_id = 0, relevance = 0.173287, rating = 2 }\n\
             { document_id = 2, relevance = 0.173287, rating = -1 }\n"
        );
    }

    #[test]
    fn json_listing_has_one_object_per_line() {
        let server = reference_server(SearchConfig::default()).unwrap();
        let banned = server
            .find_top_documents_by_status(REFERENCE_QUERY, DocumentStatus::Banned)
            .unwrap();
        let mut out = Vec::new();
        print_documents(&mut out, &banned, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["rating"], 9);
    }

    #[test]
    fn cli_flags_override_config() {
        let cli = Cli::parse_from(["search-cli", "--max-results", "2", "demo"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.max_result_document_count, 2);

        let cli = Cli::parse_from(["search-cli", "demo", "--max-results", "0"]);
        assert!(load_config(&cli).is_err());
    }
}
