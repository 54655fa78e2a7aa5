// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use xml_loc_translator::Controller;
use xml_loc_translator::app_config::{self, Config};

/// Configuration file picked up from the working directory when present
const DEFAULT_CONFIG_FILE: &str = "conf.json";

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Translate a localization XML file
    Translate(TranslateArgs),

    /// Validate a localization XML file and print its statistics
    Validate {
        /// Localization XML file to validate
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,
    },

    /// Check that the translation service is reachable
    Test,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Localization XML file to translate
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Output file (defaults to <input>_<target>.<ext> next to the input)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<PathBuf>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source: Option<String>,

    /// Target language code (e.g., 'pt', 'pt-BR', 'de')
    #[arg(short, long)]
    target: Option<String>,

    /// API key for the translation service
    #[arg(long, env = "TRANSLATE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

/// xml-loc-translator - translate localization XML resource bundles
#[derive(Parser, Debug)]
#[command(name = "xml-loc-translator")]
#[command(version)]
#[command(about = "Translate localization XML files through a remote translation API")]
#[command(long_about = "Parses a <localization> resource bundle, translates every string through a
remote translation API and writes a copy with the structure unchanged.

EXAMPLES:
    xml-loc-translator translate strings.xml                 # en -> pt, writes strings_pt.xml
    xml-loc-translator translate strings.xml -t de -o de.xml # explicit target and output
    xml-loc-translator validate strings.xml                  # check the file, print statistics
    xml-loc-translator test                                  # check the translation service
    xml-loc-translator completions bash > xlt.bash           # generate bash completions

CONFIGURATION:
    Settings are read from conf.json in the working directory when it exists,
    or from the file given with --config. Command line options take precedence.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "⚠️ ",
            Level::Info => "",
            Level::Debug => "🔍",
            Level::Trace => "📋",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Info until the configuration says otherwise
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: CommandLineOptions) -> Result<ExitCode> {
    if let Some(level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(level).into());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "xml-loc-translator", &mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Translate(args) => {
            let mut config = load_config(cli.config.as_deref(), cli.log_level)?;
            if let Some(source) = args.source {
                config.source_language = source;
            }
            if let Some(target) = args.target {
                config.target_language = target;
            }
            config.translation = config.translation.with_api_key(args.api_key);
            config.validate().context("Configuration validation failed")?;

            info!("🚀 Translating localization file {:?}", args.input_file);
            let controller = Controller::with_config(config)?;
            let outcome = controller
                .translate_file(&args.input_file, args.output)
                .await
                .context("Translation failed")?;

            info!("🎉 Translation complete");
            info!("📁 Translated file saved to: {:?}", outcome.output_path);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { input_file } => {
            let config = load_config(cli.config.as_deref(), cli.log_level)?;
            let controller = Controller::with_config(config)?;

            match controller.validate_file(&input_file)? {
                Some(_) => {
                    info!("✅ Valid localization file");
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    error!("Invalid XML or not a localization file: {:?}", input_file);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Test => {
            let config = load_config(cli.config.as_deref(), cli.log_level)?;
            config.validate().context("Configuration validation failed")?;
            let controller = Controller::with_config(config)?;

            info!("🌐 Testing translation service...");
            if controller.test_service().await {
                info!("✅ Translation service is working");
                Ok(ExitCode::SUCCESS)
            } else {
                error!("Translation service is not working");
                warn!("Check your internet connection");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

/// Load configuration from an explicit path, `conf.json`, or defaults
fn load_config(path: Option<&Path>, cli_log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Config::from_file(DEFAULT_CONFIG_FILE)?,
        None => Config::default(),
    };

    match cli_log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.into()),
    }

    Ok(config)
}
