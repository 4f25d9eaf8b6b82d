//! rowfilter - apply typed filter criteria to a JSON dataset

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::info;
use rowfilter::config::FilterConfig;
use rowfilter::dataset::{load_criteria, replay_all, Dataset};
use std::path::PathBuf;

/// Filter the rows of a dataset with a list of criteria
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dataset file: {"columns": [...], "rows": [...]}
    #[arg(short = 'D', long)]
    dataset: PathBuf,

    /// Criteria file: JSON array of criteria
    #[arg(short, long)]
    criteria: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compare text case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// Reject `>` and `<` on text columns
    #[arg(long)]
    no_text_ordering: bool,

    /// Print the criteria chips instead of the rows
    #[arg(long)]
    list_criteria: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn filter_config(&self) -> Result<FilterConfig> {
        let mut config = match &self.config {
            Some(path) => FilterConfig::from_file(path)?,
            None => FilterConfig::default(),
        };
        if self.case_sensitive {
            config.case_sensitive = true;
        }
        if self.no_text_ordering {
            config.text_ordering = false;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = args.filter_config()?;
    let dataset = Dataset::from_file(&args.dataset)?;
    let mut session = dataset.session(config)?;

    if let Some(path) = &args.criteria {
        replay_all(&mut session, load_criteria(path)?)?;
    }

    if args.list_criteria {
        for (index, criterion) in session.criteria().iter().enumerate() {
            println!("{}: {}", index, criterion);
        }
        return Ok(());
    }

    let rows = session.apply(&dataset.rows);
    info!("{} of {} rows match", rows.len(), dataset.rows.len());

    let output = serde_json::to_string_pretty(&rows).context("Failed to serialize rows")?;
    println!("{}", output);
    Ok(())
}
