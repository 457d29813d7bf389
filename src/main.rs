// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{CacheBackend, Config, LogLevel};
use crate::artifacts::ArtifactStore;
use crate::cache::{MemoryCache, ResultCache};
use crate::engines::runner::RunnerLoader;
use crate::redis_cache::RedisCache;
use crate::registry::ModelRegistry;
use crate::translation_service::TranslationService;
use crate::web::{AppState, WebServer};

mod app_config;
mod artifacts;
mod cache;
mod encoding;
mod engines;
mod errors;
mod language_utils;
mod redis_cache;
mod registry;
mod translation_service;
mod web;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the translation API server (default command)
    #[command(alias = "server")]
    Serve(ServeArgs),

    /// Generate shell completions for lingohub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct ServeArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Address to bind the listener to
    #[arg(short, long)]
    bind_addr: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// lingohub - multi-model translation API
///
/// Serves pretrained translation models (mBART50, M2M100, NLLB,
/// Helsinki-NLP Opus-MT) behind one HTTP API with a result cache.
#[derive(Parser, Debug)]
#[command(name = "lingohub")]
#[command(version = "1.0.0")]
#[command(about = "Multi-model translation API server")]
#[command(long_about = "lingohub serves pretrained translation models behind a uniform HTTP API.

EXAMPLES:
    lingohub                                # Serve using conf.json
    lingohub -c /etc/lingohub/conf.json     # Serve with a specific config
    lingohub -p 8081 --log-level debug      # Override port and verbosity
    lingohub completions bash > lingohub.bash  # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json by default; missing files fall back
    to built-in defaults. Runner endpoints, cache backend and artifact store
    can also be set through environment variables (MBART50_RUNNER,
    M2M100_RUNNER, NLLB_RUNNER, OPUS_MT_RUNNER, CACHE_BACKEND, REDIS_URL,
    ARTIFACT_STORE_ENDPOINT, ARTIFACT_STORE_BUCKET).

ROUTES:
    POST /translate/{model}   - translate text with one model
    POST /translate           - fallback, reminds callers to pick a model
    GET  /health              - per-model load status")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    serve: ServeArgs,
}

// Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default; the level is
    // raised or lowered after the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let options = CommandLineOptions::parse();

    match options.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Serve(args)) => run_server(args).await,
        None => run_server(options.serve).await,
    }
}

async fn run_server(args: ServeArgs) -> Result<()> {
    let mut config = if Path::new(&args.config_path).exists() {
        Config::from_file(&args.config_path)?
    } else {
        info!(
            "Config file '{}' not found, using defaults",
            args.config_path
        );
        Config::default_with_env()?
    };

    if let Some(bind_addr) = args.bind_addr {
        config.server.bind_addr = bind_addr;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(level) = args.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    // Attempt every model before accepting traffic
    let store = config.artifact_store.as_ref().map(ArtifactStore::new);
    let loader = RunnerLoader::new(config.models.clone(), store);
    let registry = Arc::new(ModelRegistry::initialize(&loader).await);

    for (name, status) in registry.status_snapshot() {
        info!("Model '{}': {}", name, status);
    }
    if !registry.is_healthy() {
        warn!("One or more models are down; /health will report unhealthy");
    }

    let cache = build_cache(&config);
    let service = TranslationService::new(
        registry,
        cache,
        Duration::from_secs(config.cache.ttl_secs),
    );
    let state = Arc::new(AppState { service });

    WebServer::new(config.server.clone()).start(state).await
}

fn build_cache(config: &Config) -> Arc<dyn ResultCache> {
    match config.cache.backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::Redis => match RedisCache::new(&config.cache) {
            Ok(cache) => match cache.test_connection() {
                Ok(()) => {
                    info!("Redis result cache connected: {}", config.cache.redis_url);
                    Arc::new(cache)
                }
                Err(e) => {
                    warn!(
                        "Redis unreachable ({}), falling back to in-memory cache",
                        e
                    );
                    Arc::new(MemoryCache::new())
                }
            },
            Err(e) => {
                warn!(
                    "Failed to initialize redis cache ({}), falling back to in-memory cache",
                    e
                );
                Arc::new(MemoryCache::new())
            }
        },
    }
}
