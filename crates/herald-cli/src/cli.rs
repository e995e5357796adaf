use clap::{Parser, Subcommand};

/// CLI surface definition. The setup wizard is the default command.
#[derive(Parser, Debug)]
#[command(
    name = "herald",
    about = "Credential setup companion for the Herald cross-poster",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Optional subcommand; defaults to running the setup wizard when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the interactive credential setup wizard.
    Setup {
        /// Overwrite existing credentials without asking.
        #[arg(long)]
        force: bool,
    },
    /// Show which platforms are configured (secrets redacted).
    Show,
    /// Check that the secret-storage backend is reachable.
    Check,
    /// Delete the stored credentials.
    Delete {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version and exit.
    Version,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_setup_subcommand() {
        let cli = Cli::try_parse_from(["herald", "setup"]).expect("parse should succeed");
        assert_eq!(cli.command, Some(Command::Setup { force: false }));
    }

    #[test]
    fn parses_setup_force_flag() {
        let cli = Cli::try_parse_from(["herald", "setup", "--force"]).expect("parse should succeed");
        assert_eq!(cli.command, Some(Command::Setup { force: true }));
    }

    #[test]
    fn defaults_to_setup_when_missing_subcommand() {
        let cli = Cli::try_parse_from(["herald"]).expect("parse should succeed");
        assert_eq!(cli.command, None);
    }

    #[test]
    fn parses_delete_with_yes() {
        let cli = Cli::try_parse_from(["herald", "delete", "--yes"]).expect("parse should succeed");
        assert_eq!(cli.command, Some(Command::Delete { yes: true }));
    }

    #[test]
    fn parses_config_init_subcommand() {
        let cli = Cli::try_parse_from(["herald", "config", "init"]).expect("parse should succeed");
        assert_eq!(cli.command, Some(Command::Config(ConfigCommand::Init)));
    }
}
