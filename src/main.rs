// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{error, warn, info, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::generation::GenerationService;
use crate::telegram::{TelegramClient, extract_event};

mod app_config;
mod app_controller;
mod conversation;
mod errors;
mod generation;
mod prompts;
mod providers;
mod response_cleaner;
mod session;
mod telegram;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the bot (default command)
    Run(RunArgs),

    /// Generate shell completions for tutorbot
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Check provider connectivity and exit
    #[arg(long)]
    check_connection: bool,
}

/// tutorbot - Conversational English-Exercise Bot
///
/// A Telegram tutor bot that generates multiple-choice grammar exercises
/// with an LLM and grades the submitted answers.
#[derive(Parser, Debug)]
#[command(name = "tutorbot")]
#[command(version = "1.0.0")]
#[command(about = "LLM-backed English exercise bot for Telegram")]
#[command(long_about = "tutorbot runs a Telegram bot that collects a proficiency level and a
grammar topic, asks an LLM for a 3-question multiple-choice exercise, collects
the answers (as one line or via inline buttons) and returns a graded critique.

EXAMPLES:
    tutorbot                                   # Run with conf.json
    tutorbot run -c /etc/tutorbot/conf.json    # Run with a specific config
    tutorbot run --log-level debug             # Run with debug logging
    tutorbot run --check-connection            # Verify the LLM provider and exit
    tutorbot completions bash > tutorbot.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file does
    not exist, a default one is created automatically. Secrets can be supplied
    via TUTORBOT_TELEGRAM_TOKEN and GROQ_API_KEY environment variables.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "tutorbot", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Run(args)) => run_bot(args).await,
        None => {
            // Default behavior - run the bot with the top-level args
            run_bot(RunArgs {
                config_path: cli.config_path,
                log_level: cli.log_level,
                check_connection: false,
            })
            .await
        }
    }
}

async fn run_bot(options: RunArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)
            .context(format!("Failed to load config from {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)
            .context(format!("Failed to write default config to {}", config_path))?;
        config
    };

    // Update log level in config if specified via command line
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(level_filter(&config.log_level));
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    let generation = GenerationService::from_config(&config.generation);

    if options.check_connection {
        info!("Checking connection to the {} provider...", config.generation.provider.display_name());
        generation.test_connection().await
            .map_err(|e| anyhow::anyhow!("Provider connection check failed: {}", e))?;
        info!("Provider connection OK");
        return Ok(());
    }

    let controller = Arc::new(Controller::new(generation));
    let mut telegram = TelegramClient::new(
        config.telegram.resolved_token(),
        config.telegram.poll_timeout_secs,
    );
    // Separate sending client so deliveries don't contend with the long poll
    let sender = Arc::new(TelegramClient::new(
        config.telegram.resolved_token(),
        config.telegram.poll_timeout_secs,
    ));

    spawn_idle_purge(&config, &controller);

    info!("tutorbot started, polling for updates");

    loop {
        let updates = match telegram.get_updates().await {
            Ok(updates) => updates,
            Err(e) => {
                error!("Failed to fetch updates: {}", e);
                tokio::time::sleep(std::time::Duration::from_secs(3)).await;
                continue;
            }
        };

        for update in &updates {
            let Some(extracted) = extract_event(update) else {
                continue;
            };

            let controller = Arc::clone(&controller);
            let sender = Arc::clone(&sender);
            let chat_id = extracted.event.user_id;

            // One task per event; the per-user session mutex inside the
            // controller keeps a single user's events in arrival order.
            tokio::spawn(async move {
                if let Some(callback_id) = &extracted.callback_id {
                    let _ = sender.answer_callback_query(callback_id).await;
                }

                let replies = controller.handle_event(extracted.event).await;
                for outgoing in &replies {
                    if let Err(e) = sender.send_message(chat_id, outgoing).await {
                        error!("Failed to deliver reply to chat {}: {}", chat_id, e);
                    }
                }
            });
        }
    }
}

/// Start the periodic idle-session sweep, if enabled in the config.
fn spawn_idle_purge(config: &Config, controller: &Arc<Controller>) {
    let ttl_mins = config.session.idle_ttl_mins;
    if ttl_mins == 0 {
        debug!("Idle-session eviction disabled");
        return;
    }

    let interval_mins = config.session.purge_interval_mins.max(1);
    let store = controller.store();

    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(std::time::Duration::from_secs(interval_mins * 60));
        ticker.tick().await; // first tick fires immediately
        loop {
            ticker.tick().await;
            let evicted = store.purge_idle(chrono::Duration::minutes(ttl_mins as i64));
            if evicted > 0 {
                info!("Evicted {} idle session(s), {} remaining", evicted, store.len());
            }
        }
    });
}
