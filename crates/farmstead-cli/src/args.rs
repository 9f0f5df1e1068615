//! Command-line parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect or watch a Farmstead player account.
#[derive(Debug, Parser)]
#[command(author, version, about = "Farmstead farm inspector")]
pub struct Cli {
    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// A parsed subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Evaluate the account once and print the snapshot as JSON.
    Inspect {
        /// Account JSON to read.
        account: PathBuf,
        /// Print only this plot (0-24).
        #[arg(value_parser = clap::value_parser!(u16).range(0..25))]
        tile: Option<u16>,
    },
    /// Poll the account and print a summary per frame until Ctrl-C.
    Watch {
        /// Account JSON to read; defaults to `client.account_path`.
        account: Option<PathBuf>,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("farmstead").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    #[test]
    fn inspect_with_and_without_tile() {
        assert_eq!(
            parse(&["inspect", "farm.json"]).unwrap(),
            Command::Inspect {
                account: PathBuf::from("farm.json"),
                tile: None
            }
        );
        assert_eq!(
            parse(&["inspect", "farm.json", "24"]).unwrap(),
            Command::Inspect {
                account: PathBuf::from("farm.json"),
                tile: Some(24)
            }
        );
    }

    #[test]
    fn watch_path_is_optional() {
        assert_eq!(parse(&["watch"]).unwrap(), Command::Watch { account: None });
        assert_eq!(
            parse(&["watch", "a.json"]).unwrap(),
            Command::Watch {
                account: Some(PathBuf::from("a.json"))
            }
        );
    }

    #[test]
    fn help_is_generated() {
        assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
        assert_eq!(
            parse(&["help", "inspect"]).unwrap_err().kind(),
            ErrorKind::DisplayHelp
        );
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse(&["inspect"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            parse(&["inspect", "a.json", "25"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse(&["inspect", "a.json", "x"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse(&["plant", "3"]).unwrap_err().kind(),
            ErrorKind::InvalidSubcommand
        );
        assert_eq!(
            parse(&["watch", "a", "b"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
