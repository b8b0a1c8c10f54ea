use clap::{ArgGroup, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::DEFAULT_CONFIG_NAME;

/// Command-line arguments for the rust-detux client.
///
/// Global options select the configuration and credentials; the subcommand
/// selects the Detux endpoint to call.
#[derive(Parser, Debug)]
#[clap(name = "rust-detux", about = "Client for the Detux malware analysis sandbox API")]
pub struct Args {
    /// Path to a YAML configuration file
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Detux API key (overrides DETUX_API_KEY and the config file)
    #[clap(short = 'k', long)]
    pub api_key: Option<String>,

    /// Verbose logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Operation to perform
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search Detux by hash, IP address, domain, etc.
    Search {
        /// Text to search for
        text: String,

        /// Index of the first result to return (pages hold 20 results)
        #[clap(long, default_value_t = 0, allow_negative_numbers = true)]
        from: i64,
    },

    /// Obtain the Detux report for a sample
    Report(ReportArgs),

    /// Submit file(s) to Detux for analysis
    Submit(SubmitArgs),

    /// Create a default configuration file
    InitConfig {
        /// Path to output configuration file
        #[clap(default_value = DEFAULT_CONFIG_NAME)]
        path: PathBuf,
    },
}

/// Options for the `report` subcommand.
#[derive(ClapArgs, Debug)]
#[clap(group(ArgGroup::new("source").required(true).args(["hash", "file", "list"])))]
pub struct ReportArgs {
    /// SHA256 hash of the sample
    #[clap(short = 'H', long)]
    pub hash: Option<String>,

    /// Local sample; its SHA256 is computed and looked up
    #[clap(short, long)]
    pub file: Option<PathBuf>,

    /// Text file with one SHA256 hash per line
    #[clap(short, long)]
    pub list: Option<PathBuf>,

    /// Store the report: "disk" or "object-store"
    #[clap(long)]
    pub save: Option<String>,

    /// Output file (disk) or object key (object-store). With --list this is a
    /// directory or key prefix and each report is stored as <hash>.json
    #[clap(short, long)]
    pub output: Option<String>,

    /// S3 bucket for object-store saves
    #[clap(long)]
    pub s3_bucket: Option<String>,

    /// AWS access key ID for object-store saves
    #[clap(long)]
    pub aws_key: Option<String>,

    /// AWS secret access key for object-store saves
    #[clap(long)]
    pub aws_secret: Option<String>,

    /// AWS region for object-store saves
    #[clap(long)]
    pub aws_region: Option<String>,
}

/// Options for the `submit` subcommand.
#[derive(ClapArgs, Debug)]
#[clap(group(ArgGroup::new("input").required(true).args(["file", "dir"])))]
pub struct SubmitArgs {
    /// File to submit
    #[clap(short, long)]
    pub file: Option<PathBuf>,

    /// Directory of files to submit
    #[clap(short, long)]
    pub dir: Option<PathBuf>,

    /// Comment attached to a single file submission
    #[clap(long)]
    pub comment: Option<String>,

    /// File name reported for a single file submission
    #[clap(long)]
    pub name: Option<String>,

    /// Send each file's base name when submitting a directory
    #[clap(long)]
    pub use_filenames: bool,

    /// Number of concurrent submissions for a directory (1-25)
    #[clap(short, long)]
    pub threads: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let args = Args::parse_from(["rust-detux", "-k", "key", "search", "8.8.8.8", "--from", "21"]);
        assert_eq!(args.api_key.as_deref(), Some("key"));
        match args.command {
            Commands::Search { text, from } => {
                assert_eq!(text, "8.8.8.8");
                assert_eq!(from, 21);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_offset_reaches_validation() {
        let args = Args::parse_from(["rust-detux", "search", "x", "--from", "-3"]);
        assert!(matches!(args.command, Commands::Search { from: -3, .. }));
    }

    #[test]
    fn test_parse_report_save() {
        let args = Args::parse_from([
            "rust-detux", "report", "-H", "abc", "--save", "disk", "-o", "out.json",
        ]);
        match args.command {
            Commands::Report(report) => {
                assert_eq!(report.hash.as_deref(), Some("abc"));
                assert_eq!(report.save.as_deref(), Some("disk"));
                assert_eq!(report.output.as_deref(), Some("out.json"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_report_requires_single_source() {
        assert!(Args::try_parse_from(["rust-detux", "report"]).is_err());
        assert!(Args::try_parse_from(["rust-detux", "report", "-H", "a", "-f", "b"]).is_err());
    }

    #[test]
    fn test_parse_submit_dir() {
        let args = Args::parse_from([
            "rust-detux", "submit", "--dir", "/samples", "--threads", "4", "--use-filenames",
        ]);
        match args.command {
            Commands::Submit(submit) => {
                assert_eq!(submit.dir, Some(PathBuf::from("/samples")));
                assert_eq!(submit.threads, Some(4));
                assert!(submit.use_filenames);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_init_config_default_path() {
        let args = Args::parse_from(["rust-detux", "init-config"]);
        assert!(matches!(args.command, Commands::InitConfig { ref path } if path == &PathBuf::from("detux.yaml")));
    }
}
