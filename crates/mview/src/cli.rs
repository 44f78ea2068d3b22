//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::error::BrowseError;

/// mview is a simple terminal browser for MongoDB.
#[derive(Debug, Parser)]
#[command(name = "mview", version, about)]
pub struct Cli {
    /// A MongoDB URI
    #[arg(short, long, value_name = "URI")]
    pub uri: Option<String>,

    /// Path to plaintext file containing a MongoDB URI
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Config file to use instead of ~/.config/mview/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolve the connection string from exactly one of `--uri` / `--file`.
    pub fn connection_string(&self) -> Result<String, BrowseError> {
        match (&self.uri, &self.file) {
            (None, None) => Err(BrowseError::usage("no file or uri given")),
            (Some(_), Some(_)) => Err(BrowseError::usage("only one of file or uri can be given")),
            (Some(uri), None) => non_empty(uri.trim(), "--uri"),
            (None, Some(path)) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    BrowseError::usage(format!("failed to read {}: {e}", path.display()))
                })?;
                non_empty(content.trim(), &path.display().to_string())
            }
        }
    }
}

/// Message and exit status for an error that ended the run.
///
/// Fatal browse errors (bad invocation, unreachable deployment) are reported
/// on their own; anything else keeps its context chain. A bad invocation
/// exits with 2, everything else with 1.
pub fn failure_report(err: &anyhow::Error) -> (String, u8) {
    match err.downcast_ref::<BrowseError>() {
        Some(e) if e.is_fatal() => {
            let status = if matches!(e, BrowseError::Usage(_)) { 2 } else { 1 };
            (e.to_string(), status)
        }
        _ => (format!("{err:#}"), 1),
    }
}

fn non_empty(uri: &str, source: &str) -> Result<String, BrowseError> {
    if uri.is_empty() {
        return Err(BrowseError::usage(format!("{source} is empty")));
    }
    Ok(uri.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mview").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_neither_uri_nor_file() {
        let err = parse(&[]).connection_string().unwrap_err();
        assert_eq!(err, BrowseError::usage("no file or uri given"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_both_uri_and_file() {
        let err = parse(&["-u", "mongodb://localhost", "-f", "uri.txt"])
            .connection_string()
            .unwrap_err();
        assert_eq!(err, BrowseError::usage("only one of file or uri can be given"));
    }

    #[test]
    fn test_uri_flag() {
        let cli = parse(&["--uri", "mongodb://localhost:27017"]);
        assert_eq!(cli.connection_string().unwrap(), "mongodb://localhost:27017");
    }

    #[test]
    fn test_file_flag_trims_trailing_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mongodb://db.internal:27017/?replicaSet=rs0").unwrap();

        let cli = parse(&["-f", file.path().to_str().unwrap()]);
        assert_eq!(
            cli.connection_string().unwrap(),
            "mongodb://db.internal:27017/?replicaSet=rs0"
        );
    }

    #[test]
    fn test_missing_or_empty_file_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let err = parse(&["-f", missing.to_str().unwrap()])
            .connection_string()
            .unwrap_err();
        assert!(matches!(err, BrowseError::Usage(_)));

        let empty = tempfile::NamedTempFile::new().unwrap();
        let err = parse(&["-f", empty.path().to_str().unwrap()])
            .connection_string()
            .unwrap_err();
        assert!(matches!(err, BrowseError::Usage(_)));
    }

    #[test]
    fn test_failure_report() {
        use anyhow::Context;

        let usage = anyhow::Error::from(BrowseError::usage("no file or uri given"));
        assert_eq!(failure_report(&usage), ("no file or uri given".to_string(), 2));

        let refused = Err::<(), _>(BrowseError::Connection("connection refused".into()))
            .context("failed to connect to mongodb")
            .unwrap_err();
        assert_eq!(
            failure_report(&refused),
            ("connection error: connection refused".to_string(), 1)
        );

        let denied = Err::<(), _>(BrowseError::remote("not authorized"))
            .context("failed to list databases")
            .unwrap_err();
        assert_eq!(
            failure_report(&denied),
            ("failed to list databases: remote error: not authorized".to_string(), 1)
        );
    }

    #[test]
    fn test_positional_arguments_rejected() {
        assert!(Cli::try_parse_from(["mview", "mongodb://localhost"]).is_err());
    }
}
