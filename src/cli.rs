use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "assetlist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate background and sound asset lists from firmware sources")]
#[command(
    long_about = "AssetList scans C/C++ sources and annotated listings line by line and \
                  prints the asset names they reference, one per line, for the data \
                  generation step of the firmware build."
)]
#[command(after_help = "EXAMPLES:\n  \
    assetlist backgrounds Games/Breakout/ArduinoBreakout.cpp > backgrounds.txt\n  \
    assetlist sounds Games/beeping.h --output sounds.txt --force\n  \
    assetlist sound-list < Menu/menu.cpp\n  \
    assetlist --generate-config --config assetlist.toml")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file path
    #[arg(short, long, global = true, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Write the list to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Overwrite the --output file if it already exists
    #[arg(long, global = true)]
    pub force: bool,

    /// Format of diagnostic messages on stderr
    #[arg(long, global = true, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are reported)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Write a sample configuration file and exit")]
    pub generate_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List background names declared in the bg_list table
    Backgrounds {
        /// Source file containing the background table
        input: PathBuf,

        /// Background file extension (default: rgab)
        #[arg(long)]
        extension: Option<String>,

        /// Regex marking the start of the table
        #[arg(long)]
        start_pattern: Option<String>,

        /// Regex marking the end of the table
        #[arg(long)]
        close_pattern: Option<String>,
    },

    /// List every quoted sound file referenced in a source file
    Sounds {
        /// Source file to scan
        input: PathBuf,

        /// Sound file extension (default: mp3)
        #[arg(long)]
        extension: Option<String>,
    },

    /// Build a grouped sound listing from annotated lines on stdin
    SoundList,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum MessageFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        match &self.command {
            Some(Command::Backgrounds {
                extension,
                start_pattern,
                close_pattern,
                ..
            }) => CliOverrides::new()
                .with_background_extension(extension.clone())
                .with_start_pattern(start_pattern.clone())
                .with_close_pattern(close_pattern.clone()),
            Some(Command::Sounds { extension, .. }) => {
                CliOverrides::new().with_sound_extension(extension.clone())
            }
            Some(Command::SoundList) | None => CliOverrides::new(),
        }
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
