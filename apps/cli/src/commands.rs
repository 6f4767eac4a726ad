//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use scriptforge_core::pipeline::{ProgressReporter, RunSummary, robot};
use scriptforge_keywords::WatsonKeywordExtractor;
use scriptforge_shared::{AppConfig, ContentRecord, StateStore, init_config, load_config};
use scriptforge_sources::ConfiguredFetcher;
use scriptforge_storage::JsonFileStore;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// ScriptForge: turn a topic into annotated script sentences.
#[derive(Parser)]
#[command(
    name = "scriptforge",
    version,
    about = "Fetch, clean, split and keyword-tag the text for a video script.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Write a fresh content record to the state file.
    Init {
        /// Topic to fetch source text for.
        #[arg(short, long)]
        term: String,

        /// Title prefix, e.g. "Who is" or "The history of".
        #[arg(short, long, default_value = "")]
        prefix: String,

        /// Maximum sentences to keep (defaults to config).
        #[arg(short, long, allow_negative_numbers = true)]
        max_sentences: Option<i64>,

        /// State file path (defaults to config).
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Replace an existing state file.
        #[arg(long)]
        force: bool,
    },

    /// Run the text robot against the state file.
    Run {
        /// State file path (defaults to config).
        #[arg(short, long)]
        state: Option<PathBuf>,
    },

    /// Sanitize, split and truncate a local text file. No network.
    Prepare {
        /// Plain-text file to process.
        file: PathBuf,

        /// Maximum sentences to print (defaults to config).
        #[arg(short, long, allow_negative_numbers = true)]
        max_sentences: Option<i64>,
    },

    /// Print the sentences and keywords held in the state file.
    Show {
        /// State file path (defaults to config).
        #[arg(short, long)]
        state: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "scriptforge=info",
        1 => "scriptforge=debug",
        _ => "scriptforge=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init {
            term,
            prefix,
            max_sentences,
            state,
            force,
        } => cmd_init(&term, &prefix, max_sentences, state.as_deref(), force),
        Command::Run { state } => cmd_run(state.as_deref()).await,
        Command::Prepare {
            file,
            max_sentences,
        } => cmd_prepare(&file, max_sentences),
        Command::Show { state } => cmd_show(state.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

/// `--state` if given, otherwise `[defaults].state_file`.
fn resolve_state_path(config: &AppConfig, state: Option<&Path>) -> PathBuf {
    state
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.defaults.state_file))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_init(
    term: &str,
    prefix: &str,
    max_sentences: Option<i64>,
    state: Option<&Path>,
    force: bool,
) -> Result<()> {
    let term = term.trim();
    if term.is_empty() {
        return Err(eyre!("search term must not be empty"));
    }

    let config = load_config()?;
    let store = JsonFileStore::new(resolve_state_path(&config, state));

    let mut record = ContentRecord::new(
        term,
        max_sentences.unwrap_or(config.defaults.maximum_sentences),
    );
    record.prefix = prefix.trim().to_string();

    store.init(&record, force)?;

    println!("State file written: {}", store.path().display());
    println!("  Term:          {}", record.search_term);
    if !record.prefix.is_empty() {
        println!("  Prefix:        {}", record.prefix);
    }
    println!("  Max sentences: {}", record.maximum_sentences);
    Ok(())
}

async fn cmd_run(state: Option<&Path>) -> Result<()> {
    let config = load_config()?;
    let store = JsonFileStore::new(resolve_state_path(&config, state));
    if !store.exists() {
        return Err(eyre!(
            "no state file at '{}'. Run `scriptforge init --term <topic>` first.",
            store.path().display()
        ));
    }

    // Build both clients up front so a missing API key fails before any fetch.
    let fetcher = ConfiguredFetcher::from_config(&config.content)?;
    let extractor = WatsonKeywordExtractor::from_config(&config.keywords)?;

    info!(
        state = %store.path().display(),
        provider = ?config.content.provider,
        "running text robot"
    );

    let reporter = CliProgress::new();
    let result = robot(&store, &fetcher, &extractor, &reporter).await;
    reporter.clear();
    let summary = result?;

    println!();
    println!("  Text prepared for \"{}\"", summary.search_term);
    println!("  Run:       {}", summary.run_id);
    println!("  Fetched:   {} bytes", summary.original_len);
    println!("  Sanitized: {} bytes", summary.sanitized_len);
    println!(
        "  Sentences: {} kept of {}",
        summary.sentences_kept, summary.sentences_found
    );
    println!("  Keywords:  {}", summary.keyword_count);
    println!("  Time:      {:.1}s", summary.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_prepare(file: &Path, max_sentences: Option<i64>) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .map_err(|e| eyre!("cannot read '{}': {e}", file.display()))?;

    let maximum = match max_sentences {
        Some(n) => n,
        None => load_config()?.defaults.maximum_sentences,
    };

    let sanitized = scriptforge_text::sanitize(&raw);
    let sentences = scriptforge_text::segment(&sanitized);
    let found = sentences.len();
    let kept = scriptforge_text::truncate(sentences, maximum);

    info!(found, kept = kept.len(), maximum, "prepared local text");

    for (i, sentence) in kept.iter().enumerate() {
        println!("{:>3}. {sentence}", i + 1);
    }
    eprintln!("{} of {found} sentences kept", kept.len());
    Ok(())
}

fn cmd_show(state: Option<&Path>) -> Result<()> {
    let config = load_config()?;
    let store = JsonFileStore::new(resolve_state_path(&config, state));
    let record = store.load()?;

    let title = if record.prefix.is_empty() {
        record.search_term.clone()
    } else {
        format!("{} {}", record.prefix, record.search_term)
    };
    println!("{title}");
    if let Some(updated) = record.updated_at {
        println!("  updated {}", updated.to_rfc3339());
    }
    println!(
        "  {} sentences ({} annotated, max {})",
        record.sentences.len(),
        record.annotated_count(),
        record.maximum_sentences
    );
    println!();

    for (i, sentence) in record.sentences.iter().enumerate() {
        println!("{:>3}. {}", i + 1, sentence.text);
        if !sentence.keywords.is_empty() {
            println!("     keywords: {}", sentence.keywords.join(", "));
        }
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn clear(&self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn task_progress(&self, current: usize, total: usize, detail: &str) {
        let preview: String = detail.chars().take(60).collect();
        self.spinner
            .set_message(format!("Fetching keywords [{current}/{total}] {preview}"));
    }

    fn done(&self, _summary: &RunSummary) {
        self.spinner.finish_and_clear();
    }
}
