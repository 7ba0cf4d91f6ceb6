//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Tinylink - a tiny URL shortener with expiring links
#[derive(Parser, Debug)]
#[command(name = "tinylink")]
#[command(version)]
#[command(about = "A tiny URL shortener with expiring links", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML). Defaults to ./config.toml when present
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Write the effective configuration (defaults plus overrides) as TOML
    GenerateConfig {
        /// Output path
        #[arg(long, short = 'o', default_value = "config.example.toml")]
        output: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["tinylink"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::try_parse_from(["tinylink", "serve", "-c", "custom.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Serve));
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_generate_config_output() {
        let cli = Cli::try_parse_from(["tinylink", "generate-config", "--output", "out.toml"])
            .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::GenerateConfig {
                output: "out.toml".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["tinylink", "explode"]).is_err());
    }
}
