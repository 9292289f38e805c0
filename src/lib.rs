pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod grouping;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, Command, MessageFormat};
pub use config::{BackgroundConfig, CliOverrides, Config, MarkerConfig, SoundConfig, SoundListConfig};
pub use error::{AssetListError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{BackgroundList, FilenamePattern, ListWriter, RunSummary, SoundFiles};
pub use grouping::{parse_listing, Group, LineClassifier, LineKind, ListingLine, SoundListBuilder};
pub use ui::{OutputFormatter, OutputMode};

use chrono::Utc;
use std::io::BufRead;
use std::path::Path;

/// Main library interface: configuration plus diagnostics around the three list generators
pub struct AssetList {
    config: Config,
    output_formatter: OutputFormatter,
}

impl AssetList {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
        }
    }

    /// Create an AssetList instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.message_format {
            MessageFormat::Human => OutputMode::Human,
            MessageFormat::Json => OutputMode::Json,
            MessageFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet))
    }

    /// Run one subcommand, writing its list to `output` (stdout when `None`)
    pub fn run(&self, command: &Command, output: Option<&Path>, force: bool) -> Result<RunSummary> {
        let open_sink = || ListWriter::open(output, force);
        match command {
            Command::Backgrounds { input, .. } => self.extract_backgrounds(input, open_sink),
            Command::Sounds { input, .. } => self.extract_sounds(input, open_sink),
            Command::SoundList => {
                let stdin = std::io::stdin();
                self.build_sound_list(stdin.lock(), "<stdin>", open_sink)
            }
        }
    }

    /// Background names between the `bg_list` declaration and its closing brace.
    /// The sink is only opened once the input is readable.
    pub fn extract_backgrounds<P, F>(&self, input: P, open_sink: F) -> Result<RunSummary>
    where
        P: AsRef<Path>,
        F: FnOnce() -> Result<ListWriter>,
    {
        let input = input.as_ref();
        self.output_formatter.start_operation(&format!(
            "Extracting .{} backgrounds from {}",
            self.config.background.extension,
            input.display()
        ));
        self.output_formatter.debug(&format!(
            "start pattern: {}, close pattern: {}",
            self.config.background.start_pattern, self.config.background.close_pattern
        ));

        let backgrounds = BackgroundList::open(input, &self.config.background)?;
        let mut writer = open_sink()?;
        writer.write_all(backgrounds)?;

        self.finish("backgrounds", &input.display().to_string(), writer, 0, 0)
    }

    /// Every quoted sound filename in the input
    pub fn extract_sounds<P, F>(&self, input: P, open_sink: F) -> Result<RunSummary>
    where
        P: AsRef<Path>,
        F: FnOnce() -> Result<ListWriter>,
    {
        let input = input.as_ref();
        self.output_formatter.start_operation(&format!(
            "Extracting .{} sounds from {}",
            self.config.sounds.extension,
            input.display()
        ));

        let sounds = SoundFiles::open(input, &self.config.sounds)?;
        let mut writer = open_sink()?;
        writer.write_all(sounds)?;

        self.finish("sounds", &input.display().to_string(), writer, 0, 0)
    }

    /// Grouped sound listing from marker-annotated lines
    pub fn build_sound_list<R, F>(&self, reader: R, source: &str, open_sink: F) -> Result<RunSummary>
    where
        R: BufRead,
        F: FnOnce() -> Result<ListWriter>,
    {
        self.output_formatter.start_operation(&format!("Building sound list from {}", source));
        let mut writer = open_sink()?;

        let classifier = LineClassifier::from(&self.config.sound_list);
        let mut builder = SoundListBuilder::new(reader.lines(), classifier);
        writer.write_all(builder.by_ref())?;

        let orphans = builder.orphan_members();
        if orphans > 0 {
            self.output_formatter.warning(&format!(
                "Dropped {} member line(s) that appeared before the first group header",
                orphans
            ));
        }

        self.finish("sound-list", source, writer, builder.groups(), orphans)
    }

    fn finish(
        &self,
        command: &str,
        input: &str,
        writer: ListWriter,
        groups: usize,
        orphan_members: usize,
    ) -> Result<RunSummary> {
        let output = writer.destination().to_string();
        let (lines_emitted, duration) = writer.finish()?;

        let summary = RunSummary {
            command: command.to_string(),
            input: input.to_string(),
            output,
            lines_emitted,
            groups,
            orphan_members,
            duration,
            completed_at: Utc::now(),
        };

        if lines_emitted == 0 {
            self.output_formatter.info("No matching lines found");
        }
        self.output_formatter.print_run_summary(&summary);

        Ok(summary)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &AssetListError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}
