use assetlist::{AssetList, AssetListError, Cli, OutputFormatter, OutputMode, UserFriendlyError};
use clap::Parser;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let Some(command) = cli.command.clone() else {
        eprintln!("No command given. Run with --help to see the available commands.");
        return 2;
    };

    let assetlist = match AssetList::from_cli(&cli) {
        Ok(assetlist) => assetlist,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    match assetlist.run(&command, cli.output.as_deref(), cli.force) {
        Ok(_) => 0,
        Err(e) => {
            assetlist.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &AssetListError) -> i32 {
    match error {
        AssetListError::InputNotFound { .. } => 3,
        AssetListError::OutputExists { .. } => 4,
        AssetListError::Config { .. } | AssetListError::InvalidPattern { .. } => 5,
        AssetListError::Permission { .. } => 7,
        _ => 1, // General error
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli.config.as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "assetlist.toml".to_string());

    match AssetList::generate_sample_config(&config_path) {
        Ok(()) => {
            eprintln!("Generated sample configuration file: {}", config_path);
            eprintln!("\nTo use this configuration:");
            eprintln!("  assetlist --config {} <command>", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &AssetListError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
