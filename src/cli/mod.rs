pub mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::render::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "rss-reader")]
#[command(about = "Command-line RSS reader.", long_about = None)]
#[command(version, disable_version_flag = true)]
pub struct Cli {
    /// Link on RSS resource
    pub link: Option<String>,

    /// Print version info
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Print result as JSON in stdout
    #[arg(long)]
    pub json: bool,

    /// Write JSON to this file instead of stdout (with --json)
    #[arg(long, value_name = "PATH", requires = "json")]
    pub output: Option<PathBuf>,

    /// Limit news topics if this parameter provided
    #[arg(short, long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Print all logs in stdout
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Save news as FB2 to this file
    #[arg(long = "to-fb2", value_name = "PATH", conflicts_with_all = ["json", "to_pdf"])]
    pub to_fb2: Option<PathBuf>,

    /// Save news as PDF to this file
    #[arg(long = "to-pdf", value_name = "PATH", conflicts_with = "json")]
    pub to_pdf: Option<PathBuf>,

    /// Print cached news for a publication date instead of fetching
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// List publication dates that have cached news
    #[arg(long)]
    pub list_dates: bool,

    /// Read configuration from this file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Omitted, zero and negative limits all mean "no limit".
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(0)
    }

    pub fn output_format(&self) -> OutputFormat {
        if let Some(path) = &self.to_fb2 {
            OutputFormat::Fb2 { path: path.clone() }
        } else if let Some(path) = &self.to_pdf {
            OutputFormat::Pdf { path: path.clone() }
        } else if self.json {
            OutputFormat::Json {
                path: self.output.clone(),
            }
        } else {
            OutputFormat::Text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["rss-reader", "https://example.com/rss"]);
        assert_eq!(cli.link.as_deref(), Some("https://example.com/rss"));
        assert_eq!(cli.limit(), 0);
        assert_eq!(cli.output_format(), OutputFormat::Text);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from(["rss-reader", "-V", "-l", "3"]);
        assert!(cli.verbose);
        assert_eq!(cli.limit(), 3);
        assert!(cli.link.is_none());
    }

    #[test]
    fn test_negative_limit_is_accepted() {
        let cli = Cli::parse_from(["rss-reader", "--limit", "-2", "https://example.com/rss"]);
        assert_eq!(cli.limit(), -2);
    }

    #[test]
    fn test_json_to_file() {
        let cli = Cli::parse_from([
            "rss-reader",
            "--json",
            "--output",
            "news.json",
            "https://example.com/rss",
        ]);
        assert_eq!(
            cli.output_format(),
            OutputFormat::Json {
                path: Some(PathBuf::from("news.json"))
            }
        );
    }

    #[test]
    fn test_output_requires_json() {
        let result = Cli::try_parse_from(["rss-reader", "--output", "x.json", "https://a.b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_document_formats() {
        let cli = Cli::parse_from(["rss-reader", "--to-fb2", "n.fb2", "https://a.b"]);
        assert_eq!(
            cli.output_format(),
            OutputFormat::Fb2 {
                path: PathBuf::from("n.fb2")
            }
        );

        let cli = Cli::parse_from(["rss-reader", "--to-pdf", "n.pdf", "https://a.b"]);
        assert_eq!(
            cli.output_format(),
            OutputFormat::Pdf {
                path: PathBuf::from("n.pdf")
            }
        );
    }

    #[test]
    fn test_version_flag_is_lowercase_v() {
        let err = Cli::try_parse_from(["rss-reader", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
