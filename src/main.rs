//! CLI entry point. Wires [`config`], [`pipeline::Pipeline`] and
//! [`sink`] together using `clap::Parser` over a layered `config.toml`.

use chrono::NaiveDate;
use clap::Parser;
use eyre::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, stderr, stdout};
use std::path::PathBuf;
use terms_of_interest::config::{PipelineConfig, TermsetAlgo, UnitPaths};
use terms_of_interest::pipeline::Pipeline;
use terms_of_interest::sink::{FormatSink, Sink, SqliteSink};
use terms_of_interest::unit::{Unit, UserSet};

/// Run the term-of-interest matching pipeline over one or more
/// newline-delimited JSON message files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input files, one JSON message object per line.
    #[arg(value_name = "DATA", required = true)]
    data: Vec<PathBuf>,

    /// Path to a TOML config file. Defaults to ./config.toml if present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Only process messages whose message_time falls on this date.
    #[arg(long, value_name = "DATE")]
    execution_date: Option<NaiveDate>,

    /// Output line template with {term} and {message_id} placeholders.
    #[arg(long, value_name = "TEMPLATE")]
    format_template: Option<String>,

    /// Which matcher implementation to use for term filtering.
    #[arg(long, value_enum)]
    termset_algo: Option<TermsetAlgo>,

    /// SQLite database path for the secondary results sink. Disabled
    /// (stdout only) when omitted.
    #[arg(long, value_name = "PATH")]
    db_uri: Option<String>,

    /// Repeatable `--unit <USERSET_PATH> <TERMSET_PATH>` pair. Defaults to
    /// two units (data/nodes{1,2}.txt, data/terms{1,2}.txt) when omitted.
    #[arg(long = "unit", num_args = 2, value_names = ["USERSET", "TERMSET"])]
    units: Vec<String>,
}

fn cli_units(raw: &[String]) -> Option<Vec<UnitPaths>> {
    if raw.is_empty() {
        return None;
    }
    Some(
        raw.chunks_exact(2)
            .map(|pair| UnitPaths { userset: PathBuf::from(&pair[0]), termset: PathBuf::from(&pair[1]) })
            .collect(),
    )
}

fn load_units(config: &PipelineConfig) -> Result<Vec<Unit>> {
    config
        .units
        .iter()
        .map(|paths| {
            let userset = UserSet::from_file(&paths.userset)
                .wrap_err_with(|| format!("Failed to load userset: {}", paths.userset.display()))?;
            let mut matcher = config.termset_algo.new_matcher();
            let terms = terms_of_interest::util::read_nonblank_lines(&paths.termset)
                .wrap_err_with(|| format!("Failed to load termset: {}", paths.termset.display()))?;
            matcher.add_terms(terms);
            matcher.build();
            Ok(Unit::new(userset, matcher))
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let file_config = terms_of_interest::config::load_file_config(cli.config.as_deref())?;

    let config = PipelineConfig::resolve(
        cli.execution_date,
        cli.format_template,
        cli.termset_algo,
        cli.db_uri,
        cli_units(&cli.units),
        file_config,
    );

    let units = load_units(&config)?;
    let pipeline = Pipeline::new(units, config.execution_date);

    let mut sink: Box<dyn Sink> = match &config.db_uri {
        Some(path) => Box::new(SqliteSink::open(path).wrap_err("Failed to open results sink")?),
        None => Box::new(FormatSink::new(config.format_template.clone(), BufWriter::new(stdout()))),
    };

    let mut diagnostics = stderr();

    for path in &cli.data {
        let file = File::open(path)
            .wrap_err_with(|| format!("Failed to open input file: {}", path.display()))?;
        let lines = BufReader::new(file).lines();
        pipeline
            .run(lines, sink.as_mut(), &mut diagnostics)
            .wrap_err_with(|| format!("Pipeline failed on {}", path.display()))?;
    }

    Ok(())
}
