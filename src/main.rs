use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use log::{error, info};
use tf_idf_ranker::{ingest, Collection, EngineConfig, QueryResult, RetrievalEngine, Side};

/// Column the score annotation is padded to in text reports
const REPORT_WIDTH: usize = 70;

/// Significant digits of a score in text reports
const SCORE_DIGITS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable report
    Text,
    /// JSON array of query results
    Json,
    /// CBOR array of query results
    Cbor,
}

#[derive(Debug, Parser)]
#[command(name = "tf-idf-ranker")]
#[command(about = "Rank documents against queries with TF-IDF cosine similarity", long_about = None)]
struct Cli {
    /// Documents file
    #[arg(long, default_value = "documentsText.txt")]
    documents: PathBuf,
    /// Queries file (each query id is followed by its response count)
    #[arg(long, default_value = "queriesText.txt")]
    queries: PathBuf,
    /// Output encoding
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Write results here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Format `score` with [`SCORE_DIGITS`] significant digits, dropping trailing
/// zeros and switching to exponent notation outside `1e-4..1e6`.
fn format_score(score: f64) -> String {
    if score == 0.0 || !score.is_finite() {
        return format!("{score}");
    }
    let sci = format!("{:.*e}", SCORE_DIGITS - 1, score);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };
    let trim = |s: &str| -> String {
        if s.contains('.') {
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            s.to_string()
        }
    };
    if exp < -4 || exp >= SCORE_DIGITS as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim(mantissa), exp.abs())
    } else {
        let decimals = (SCORE_DIGITS as i32 - 1 - exp) as usize;
        trim(&format!("{score:.decimals$}"))
    }
}

fn write_text<W: Write>(out: &mut W, collection: &Collection, results: &[QueryResult]) -> io::Result<()> {
    for result in results {
        let query = collection.tokens(Side::Query, result.query_id).unwrap_or_default();
        writeln!(out, "Query to search: ")?;
        writeln!(out, "{} ", query.join(" "))?;
        writeln!(out, "===================")?;
        writeln!(out, "Returned documents:")?;
        writeln!(out, "===================")?;
        for hit in result.hits.iter() {
            let doc = collection.tokens(Side::Document, hit.doc_id).unwrap_or_default();
            let mut line = String::new();
            for token in doc {
                line.push_str(token);
                line.push(' ');
            }
            let pad = REPORT_WIDTH.saturating_sub(line.len());
            writeln!(out, "{line}{:>pad$}{})", "(with weight ", format_score(hit.score))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let collection = ingest::load_collection(&cli.documents, &cli.queries)?;
    info!(
        "loaded {} documents and {} queries",
        collection.doc_num(),
        collection.query_num()
    );

    let config = EngineConfig { threads: cli.threads };
    let engine: RetrievalEngine = RetrievalEngine::build_with_config(&collection, config)?;
    let results = engine.rank_all()?;

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    match cli.format {
        Format::Text => write_text(&mut out, &collection, &results)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &results)?;
            writeln!(out)?;
        }
        Format::Cbor => serde_cbor::to_writer(&mut out, &results)?,
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_idf_ranker::{HitEntry, Hits};

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from([
            "tf-idf-ranker",
            "--documents",
            "d.txt",
            "--queries",
            "q.txt",
            "--format",
            "json",
            "--threads",
            "3",
            "-vv",
        ]);
        assert_eq!(cli.documents, PathBuf::from("d.txt"));
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.threads, Some(3));
        assert_eq!(cli.verbose, 2);
        assert!(cli.output.is_none());
    }

    #[test]
    fn text_report_lists_query_and_documents() {
        let collection = Collection::from_parts(vec![vec!["cat", "dog"], vec!["dog"]], vec![vec!["cat"]], &[1]);
        let results = vec![QueryResult {
            query_id: 1,
            hits: Hits::new(vec![HitEntry { doc_id: 1, score: 0.5 }]),
        }];
        let mut buf = Vec::new();
        write_text(&mut buf, &collection, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Query to search: ");
        assert_eq!(lines[1], "cat ");
        assert_eq!(lines[3], "Returned documents:");
        assert!(lines[5].starts_with("cat dog "));
        assert!(lines[5].ends_with("(with weight 0.5)"));
        assert_eq!(lines[5].len(), REPORT_WIDTH + "0.5)".len());
    }

    #[test]
    fn scores_print_six_significant_digits() {
        assert_eq!(format_score(std::f64::consts::FRAC_1_SQRT_2), "0.707107");
        assert_eq!(format_score(1.0), "1");
        assert_eq!(format_score(0.0), "0");
        assert_eq!(format_score(0.25), "0.25");
        assert_eq!(format_score(0.123456789), "0.123457");
        assert_eq!(format_score(0.0000123456), "1.23456e-05");
        assert_eq!(format_score(0.9999999), "1");

        let collection = Collection::from_parts(vec![vec!["cat"]], vec![vec!["cat"]], &[1]);
        let results = vec![QueryResult {
            query_id: 1,
            hits: Hits::new(vec![HitEntry { doc_id: 1, score: 0.7071067811865476 }]),
        }];
        let mut buf = Vec::new();
        write_text(&mut buf, &collection, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("(with weight 0.707107)"), "{text}");
    }
}
