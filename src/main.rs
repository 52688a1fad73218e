use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use research_hub::api::HttpApiClient;
use research_hub::config::{
    default_config_path, find_config_file, get_config, load_config, Config,
};
use research_hub::models::{SearchFilters, SearchMode};
use research_hub::session::{
    export_results, render_cards, CardLimits, SearchPanel, SettingsOverlay, Theme,
};
use research_hub::storage::FileStore;
use research_hub::tui::{run_interactive, AppOptions};
use research_hub::ui::{self, Spinner, Status};
use research_hub::SearchBackend;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Research Hub - search an AI-indexed collection of research papers
#[derive(Parser, Debug)]
#[command(name = "research-hub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search an AI-indexed collection of research papers", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Search service base URL (overrides the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Search mode
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ModeArg {
    /// Natural-language search interpreted by the backend
    Ai,
    /// Exact field matching
    Manual,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Ai => SearchMode::Ai,
            ModeArg::Manual => SearchMode::Manual,
        }
    }
}

/// What to do with the theme preference
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between dark and light
    Toggle,
    /// Use the dark theme
    Dark,
    /// Use the light theme
    Light,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive client (default)
    Ui,

    /// Search for papers
    #[command(alias = "s")]
    Search {
        /// Search query string
        query: String,

        /// Search mode
        #[arg(long, short, value_enum, default_value_t = ModeArg::Ai)]
        mode: ModeArg,

        /// Publication year filter
        #[arg(long)]
        year: Option<String>,

        /// Category filter (e.g. cs.AI)
        #[arg(long, short)]
        category: Option<String>,

        /// Author filter
        #[arg(long, short)]
        author: Option<String>,

        /// Title filter
        #[arg(long)]
        title: Option<String>,

        /// Abstract filter
        #[arg(long = "abstract")]
        abstract_filter: Option<String>,

        /// Maximum number of results (service default when omitted)
        #[arg(long, short)]
        limit: Option<usize>,
    },

    /// List publication years in the index
    Years,

    /// Show aggregate counts for the index
    Stats,

    /// Export the last search results as JSON
    Export {
        /// Directory to write into (config export directory by default)
        #[arg(long, short)]
        dir: Option<PathBuf>,
    },

    /// Show or change the theme preference
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },

    /// About this application
    About,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the config file location
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Research Hub - Environment Variables");
    println!();
    println!("Any config key can be set as RESEARCH_HUB__<SECTION>__<KEY>:");
    println!("  RESEARCH_HUB__API__BASE_URL             Search service base URL (default: http://localhost:8000/api/v1)");
    println!("  RESEARCH_HUB__STORAGE__DIRECTORY        Directory for the theme and cached results");
    println!("  RESEARCH_HUB__EXPORT__DIRECTORY         Directory for exported result files (default: .)");
    println!("  RESEARCH_HUB__DISPLAY__ABSTRACT_CHARS   Abstract length on result cards (default: 300)");
    println!("  RESEARCH_HUB__DISPLAY__AUTHOR_CHARS     Author list length on result cards (default: 80)");
    println!("  RESEARCH_HUB__DISPLAY__MAX_CATEGORIES   Categories shown per card (default: 3)");
    println!("  RESEARCH_HUB__LOGGING__LEVEL            Log level (default: info)");
    println!("  RESEARCH_HUB__LOGGING__FILE             Log file used by the interactive client");
    println!();
    println!("Other Settings:");
    println!("  RUST_LOG                    Rust logging level (e.g., debug, info, warn, error)");
    println!();
    println!("Example:");
    println!("  export RESEARCH_HUB__API__BASE_URL=\"http://papers.example.org/api/v1\"");
}

/// The interactive client owns the terminal, so it logs to a file instead
fn init_tracing(cli: &Cli, config: &Config, interactive: bool) -> Result<()> {
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let level = if cli.quiet { "error" } else { log_level };

    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("research_hub={}", level)),
    );

    if interactive {
        let path = config.logging.resolved_file();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Cannot open log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

/// Config file from `--config` or the default locations, then env, then `--api-url`
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)
            .with_context(|| format!("Cannot load config {}", config_path.display()))?
    } else if let Some(config_path) = find_config_file() {
        load_config(&config_path)
            .with_context(|| format!("Cannot load config {}", config_path.display()))?
    } else {
        get_config()?
    };

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    Ok(config)
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if ui::is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
        return Ok(());
    }

    let config = resolve_config(&cli)?;
    let interactive = matches!(cli.command, None | Some(Commands::Ui));
    init_tracing(&cli, &config, interactive)?;
    tracing::debug!("Using search service at {}", config.api.base_url);

    let format = resolve_format(cli.output);

    match cli.command {
        None | Some(Commands::Ui) => {
            if !ui::is_terminal() {
                ui::print_banner();
                ui::print_status(
                    Status::Warning,
                    "The interactive client needs a terminal; use a subcommand instead",
                );
                return Ok(());
            }

            let backend = HttpApiClient::new(&config.api.base_url)?;
            let store = FileStore::open(&config.storage.resolved_dir());
            let options = AppOptions {
                limits: config.display.into(),
                export_dir: config.export.directory.clone(),
                limit: None,
            };
            run_interactive(Arc::new(backend), Box::new(store), options).await?;
        }

        Some(Commands::Search {
            query,
            mode,
            year,
            category,
            author,
            title,
            abstract_filter,
            limit,
        }) => {
            let backend = HttpApiClient::new(&config.api.base_url)?;
            let mut store = FileStore::open(&config.storage.resolved_dir());

            let mut panel = SearchPanel::new();
            panel.set_query(query);
            panel.set_mode(mode.into());
            panel.set_limit(limit);
            *panel.filters_mut() = SearchFilters {
                year: year.unwrap_or_default(),
                category: category.unwrap_or_default(),
                author: author.unwrap_or_default(),
                title: title.unwrap_or_default(),
                r#abstract: abstract_filter.unwrap_or_default(),
            };

            if !panel.can_submit() {
                bail!("Search query must not be empty");
            }

            let spinner = (!cli.quiet && format == OutputFormat::Table)
                .then(|| Spinner::new("Searching papers..."));
            panel.search(&backend, &mut store).await;

            if let Some(error) = panel.last_error() {
                if let Some(s) = &spinner {
                    s.finish_with_error(error);
                }
                bail!("{}", error);
            }
            if let Some(s) = &spinner {
                s.finish_and_clear();
            }

            output_results(&panel, &config.display.into(), format)?;
        }

        Some(Commands::Years) => {
            let backend = HttpApiClient::new(&config.api.base_url)?;
            let spinner = (!cli.quiet && format == OutputFormat::Table)
                .then(|| Spinner::new("Loading publication years..."));
            let years = match backend.years().await {
                Ok(years) => {
                    if let Some(s) = &spinner {
                        s.finish_with_success(&format!("Loaded {} years", years.len()));
                    }
                    years
                }
                Err(e) => {
                    if let Some(s) = &spinner {
                        s.finish_with_error(e.message());
                    }
                    return Err(e.into());
                }
            };

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&years)?),
                OutputFormat::Plain => {
                    for year in &years {
                        println!("{}", year);
                    }
                }
                _ => {
                    ui::print_section("Publication Years");
                    println!("{}", years.join(", "));
                }
            }
        }

        Some(Commands::Stats) => {
            let backend = HttpApiClient::new(&config.api.base_url)?;
            let spinner = (!cli.quiet && format == OutputFormat::Table)
                .then(|| Spinner::new("Loading index statistics..."));
            let stats = match backend.stats().await {
                Ok(stats) => {
                    if let Some(s) = &spinner {
                        s.finish_and_clear();
                    }
                    stats
                }
                Err(e) => {
                    if let Some(s) = &spinner {
                        s.finish_with_error(e.message());
                    }
                    return Err(e.into());
                }
            };

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                OutputFormat::Plain => {
                    println!("total_papers: {}", stats.total_papers);
                    println!("latest_year: {}", stats.latest_year);
                    println!("year_span: {}", stats.year_span);
                    for (year, count) in &stats.papers_by_year {
                        println!("{}: {}", year, count);
                    }
                }
                _ => println!("{}", ui::stats_table(&stats)),
            }
        }

        Some(Commands::Export { dir }) => {
            let store = FileStore::open(&config.storage.resolved_dir());
            let dir = dir.unwrap_or_else(|| config.export.directory.clone());

            match export_results(&store, &dir, Local::now().date_naive()) {
                Ok(path) => {
                    if !cli.quiet {
                        ui::print_status(
                            Status::Success,
                            &format!("Exported results to {}", path.display()),
                        );
                    }
                }
                Err(e) => {
                    tracing::debug!("Export failed: {:?}", e);
                    bail!("{}", e);
                }
            }
        }

        Some(Commands::Theme { action }) => {
            let mut store = FileStore::open(&config.storage.resolved_dir());
            let mut overlay = SettingsOverlay::load(&store);

            let theme = match action {
                ThemeAction::Show => overlay.theme(),
                ThemeAction::Toggle => overlay.toggle_theme(&mut store),
                ThemeAction::Dark | ThemeAction::Light => {
                    let theme = if action == ThemeAction::Dark {
                        Theme::Dark
                    } else {
                        Theme::Light
                    };
                    theme.save(&mut store);
                    theme
                }
            };

            match format {
                OutputFormat::Json => println!("{}", serde_json::json!({ "theme": theme.as_str() })),
                _ => println!("{}", theme),
            }
        }

        Some(Commands::About) => ui::print_about(),

        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => {
                let path = cli
                    .config
                    .clone()
                    .or_else(find_config_file)
                    .unwrap_or_else(default_config_path);
                println!("{}", path.display());
            }
            ConfigAction::Init { force } => {
                let path = cli.config.clone().unwrap_or_else(default_config_path);
                if path.exists() && !force {
                    bail!(
                        "Config file {} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                Config::default().save(&path)?;
                if !cli.quiet {
                    ui::print_status(
                        Status::Success,
                        &format!("Wrote default config to {}", path.display()),
                    );
                }
            }
            ConfigAction::Show => print!("{}", config.to_toml()?),
        },
    }

    Ok(())
}

fn output_results(panel: &SearchPanel, limits: &CardLimits, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "articles": panel.results(),
                "total_count": panel.results().len(),
                "search_type": panel.mode().id(),
                "explanation": panel.explanation(),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Plain => {
            for card in render_cards(panel.results(), limits) {
                println!("{} ({})", card.title, card.date);
                if let Some(authors) = &card.authors {
                    println!("  Authors: {}", authors);
                }
                if !card.categories.is_empty() {
                    println!("  Categories: {}", card.categories.join(", "));
                }
                println!();
            }
        }
        _ => {
            if panel.results().is_empty() {
                ui::print_empty_state();
                return Ok(());
            }

            ui::print_search_summary(&panel.summary(), &panel.mode_caption());
            if let Some(explanation) = panel.explanation() {
                ui::print_explanation(explanation);
            }
            ui::print_divider();
            for card in render_cards(panel.results(), limits) {
                ui::print_card(&card);
            }
        }
    }
    Ok(())
}
