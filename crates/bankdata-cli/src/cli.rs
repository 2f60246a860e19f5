//! Command-line arguments.
//!
//! Required arguments are declared optional so that a missing one prints
//! a usage line and exits cleanly, before any file or network access.

use clap::{Parser, Subcommand};

pub const USAGE: &str =
    "usage: bankdata <banks <country> | link <institution_id> | accounts | list [count] | balance>";

/// Number of transactions `list` shows when no count is given
const DEFAULT_LIST_COUNT: usize = 10;

#[derive(Debug, Parser)]
#[command(name = "bankdata", version, about = "Browse linked bank accounts and transactions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List banks available in a country (two-letter code, e.g. GB)
    Banks { country: Option<String> },
    /// Start linking a bank; prints the authorization URL
    Link { institution_id: Option<String> },
    /// List accounts of the current link and remember the first one
    Accounts,
    /// Show the most recent transactions of the linked account
    List {
        #[arg(default_value_t = DEFAULT_LIST_COUNT)]
        count: usize,
    },
    /// Show the balance of the linked account
    Balance,
}

/// A fully specified request, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Banks { country: String },
    Link { institution_id: String },
    Accounts,
    List { count: usize },
    Balance,
}

impl Command {
    /// Resolve into a request, or the usage line to print instead.
    pub fn into_request(self) -> Result<Request, &'static str> {
        match self {
            Command::Banks { country: Some(country) } => Ok(Request::Banks { country }),
            Command::Banks { country: None } => Err("usage: bankdata banks <country>"),
            Command::Link {
                institution_id: Some(institution_id),
            } => Ok(Request::Link { institution_id }),
            Command::Link { institution_id: None } => Err("usage: bankdata link <institution_id>"),
            Command::Accounts => Ok(Request::Accounts),
            Command::List { count } => Ok(Request::List { count }),
            Command::Balance => Ok(Request::Balance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Option<Result<Request, &'static str>> {
        Cli::try_parse_from(args)
            .unwrap()
            .command
            .map(Command::into_request)
    }

    #[test]
    fn test_missing_required_argument_yields_usage() {
        assert_eq!(
            parse(&["bankdata", "banks"]),
            Some(Err("usage: bankdata banks <country>"))
        );
        assert_eq!(
            parse(&["bankdata", "link"]),
            Some(Err("usage: bankdata link <institution_id>"))
        );
    }

    #[test]
    fn test_list_count_defaults_to_ten() {
        assert_eq!(parse(&["bankdata", "list"]), Some(Ok(Request::List { count: 10 })));
        assert_eq!(parse(&["bankdata", "list", "2"]), Some(Ok(Request::List { count: 2 })));
    }

    #[test]
    fn test_full_requests() {
        assert_eq!(
            parse(&["bankdata", "banks", "gb"]),
            Some(Ok(Request::Banks {
                country: "gb".to_string()
            }))
        );
        assert_eq!(parse(&["bankdata", "accounts"]), Some(Ok(Request::Accounts)));
        assert_eq!(parse(&["bankdata"]), None);
    }

    #[test]
    fn test_non_numeric_count_is_rejected() {
        assert!(Cli::try_parse_from(["bankdata", "list", "many"]).is_err());
    }
}
