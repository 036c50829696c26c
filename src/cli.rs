use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::Config;
use crate::export::{excel::DEFAULT_SHEET, Outputs};

#[derive(Parser, Debug)]
#[command(
    name = "kres",
    about = "Resource requests, limits and storage of Kubernetes workload controllers",
    version
)]
pub struct Args {
    /// Path to kubeconfig file. Defaults to $KUBECONFIG, ~/.kube/config,
    /// then the in-cluster service account.
    #[arg(long, value_name = "PATH", global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Config file. Defaults to ~/.config/kuberes/config.toml when present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print shell completions for SHELL to stdout and exit.
    /// Example: `kres --completions bash >> ~/.bash_completion`
    #[arg(long, value_name = "SHELL", hide = true)]
    pub completions: Option<Shell>,

    /// Print the man page to stdout and exit.
    #[arg(long, hide = true)]
    pub mangen: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect Deployments, StatefulSets and DaemonSets and export their resources.
    Resource(ResourceArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct ResourceArgs {
    /// Namespace to scan. Repeat for several. Default: every namespace.
    #[arg(short = 'n', long = "namespace", value_name = "NAMESPACE")]
    pub namespaces: Vec<String>,

    /// Write the report as JSON to PATH.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Write one row per container as CSV to PATH.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write an xlsx workbook to PATH.
    #[arg(long, value_name = "PATH")]
    pub excel: Option<PathBuf>,

    /// Sheet name for --excel.
    #[arg(long, value_name = "NAME")]
    pub sheet: Option<String>,
}

impl Args {
    /// Default tracing filter for the verbosity flag.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// `--kubeconfig`, falling back to the config file.
    pub fn kubeconfig_path<'a>(&'a self, config: &'a Config) -> Option<&'a Path> {
        self.kubeconfig.as_deref().or(config.kubeconfig.as_deref())
    }
}

impl ResourceArgs {
    /// `--namespace` values, falling back to the config file. Empty means all.
    pub fn namespaces<'a>(&'a self, config: &'a Config) -> &'a [String] {
        if self.namespaces.is_empty() {
            &config.namespaces
        } else {
            &self.namespaces
        }
    }

    pub fn outputs(&self, config: &Config) -> Outputs {
        Outputs {
            json: self.json.clone(),
            csv: self.csv.clone(),
            excel: self.excel.clone(),
            sheet: self
                .sheet
                .clone()
                .or_else(|| config.sheet.clone())
                .unwrap_or_else(|| DEFAULT_SHEET.to_string()),
        }
    }
}
