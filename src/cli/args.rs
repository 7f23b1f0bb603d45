//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

/// kbench - deploy Kubernetes manifests for a benchmark run
#[derive(Parser, Debug)]
#[command(name = "kbench")]
#[command(about = "Deploys Kubernetes manifests for a benchmark run", long_about = None)]
pub struct Args {
    /// Enable trace logging
    #[arg(long, short = 't', conflicts_with = "quiet")]
    pub trace: bool,

    /// Only log informational messages and above
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Path to the benchmark configuration file
    pub config: PathBuf,
}

impl Args {
    /// Log level selected by the verbosity flags
    pub fn level(&self) -> &'static str {
        if self.trace {
            "trace"
        } else if self.quiet {
            "info"
        } else {
            "debug"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        let args = Args::try_parse_from(["kbench", "bench.yaml"]).unwrap();
        assert_eq!(args.config, PathBuf::from("bench.yaml"));
        assert_eq!(args.level(), "debug");
    }

    #[test]
    fn test_quiet_and_trace() {
        let args = Args::try_parse_from(["kbench", "-q", "bench.yaml"]).unwrap();
        assert_eq!(args.level(), "info");

        let args = Args::try_parse_from(["kbench", "--trace", "bench.yaml"]).unwrap();
        assert_eq!(args.level(), "trace");
    }

    #[test]
    fn test_quiet_conflicts_with_trace() {
        let err = Args::try_parse_from(["kbench", "-t", "-q", "bench.yaml"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_config_required() {
        assert!(Args::try_parse_from(["kbench"]).is_err());
    }
}
