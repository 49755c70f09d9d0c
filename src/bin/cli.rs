use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::prelude::*;
use tracing_log::LogTracer;
use tracing::subscriber as tracing_subscriber_global;
use anyhow::{Result, Context};
use file_name_pattern as lib;
use lib::config::Config;
use lib::fs::LocalDirectories;
use lib::models::TrackInfo;
use lib::pattern::FileNamePattern;

#[derive(Parser)]
#[command(name = "file-name-pattern", version)]
struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered tokens
    Tokens,
    /// Show a pattern with token names instead of values
    Describe {
        pattern: String,
        /// Also render the pattern against the sample tracks
        #[arg(long)]
        preview: bool,
    },
    /// Render a pattern for a track (JSON file)
    Render {
        #[arg(long, value_name = "FILE")]
        track: PathBuf,
        /// Pattern to use instead of the configured one
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Build the full library path for a track, creating its directory
    Build {
        #[arg(long, value_name = "FILE")]
        track: PathBuf,
        /// Base directory (defaults to library_root from the config)
        #[arg(long)]
        base: Option<PathBuf>,
        /// Extension; taken from the track uri when omitted
        #[arg(long)]
        ext: Option<String>,
    },
    /// Validate config file and exit
    ConfigValidate,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    // Explicit --config must exist; the platform default is optional.
    if let Some(p) = path {
        return Config::from_path(p).with_context(|| format!("loading config from {}", p.display()));
    }
    match lib::config::default_config_path() {
        Some(p) if p.exists() => {
            Config::from_path(&p).with_context(|| format!("loading config from {}", p.display()))
        }
        _ => Ok(Config::default()),
    }
}

fn load_track(path: &Path) -> Result<TrackInfo> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("reading track file {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parsing track file {}", path.display()))
}

fn build_pattern(cfg: &Config) -> Result<FileNamePattern<TrackInfo>> {
    let mut pattern = lib::conversions::music_pattern()?;
    if let Some(filter) = cfg.filter() {
        pattern.set_filter(filter);
    }
    pattern.set_template_source(Box::new(cfg.clone()));
    Ok(pattern)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::ConfigValidate = cli.command {
        match load_config(cli.config.as_deref()) {
            Ok(_) => println!("OK"),
            Err(e) => {
                eprintln!("Config validation failed: {:#}", e);
                std::process::exit(2);
            }
        }
        return Ok(());
    }

    let cfg = load_config(cli.config.as_deref())?;

    // Bridge `log` records into tracing, then log to stderr and, if a log
    // directory is configured, to a daily-rotated file there.
    let _ = LogTracer::init();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, _guard) = match &cfg.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "file-name-pattern.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().with_writer(non_blocking)), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer);

    tracing_subscriber_global::set_global_default(subscriber)
        .context("failed to set global tracing subscriber")?;

    let pattern = build_pattern(&cfg)?;

    match cli.command {
        Commands::Tokens => {
            for conversion in pattern.conversions() {
                println!("{:<24} {}", conversion.token_string(), conversion.name());
            }
        }
        Commands::Describe { pattern: p, preview } => {
            match pattern.create_pattern_description(&p) {
                Some(described) => println!("{}", described),
                None => println!(),
            }
            if preview {
                for line in pattern.preview(Some(p.as_str()), &lib::conversions::sample_tracks()) {
                    println!("  {}", line);
                }
            }
        }
        Commands::Render { track, pattern: p } => {
            let track = load_track(&track)?;
            let rendered = match p {
                Some(p) => pattern.create_from_track_info(Some(p.as_str()), &track),
                None => pattern.create_from_configured(&track),
            };
            println!("{}", rendered);
        }
        Commands::Build { track, base, ext } => {
            let track = load_track(&track)?;
            let base = base.unwrap_or_else(|| cfg.library_root.clone());
            let full = match ext {
                Some(ext) => pattern.build_full(&base, &track, Some(ext.as_str()), &LocalDirectories),
                None => pattern.build_full_from_uri(&base, &track, &LocalDirectories),
            }
            .with_context(|| "building track path".to_string())?;
            println!("{}", full.display());
        }
        Commands::ConfigValidate => println!("OK"),
    }

    Ok(())
}
