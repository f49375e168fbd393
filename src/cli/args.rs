//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

/// Query typed, path-addressable property trees
#[derive(Parser, Debug)]
#[command(name = "proptree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Directory holding a local .proptree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value at a dotted path
    Get {
        /// Property file (toml, json, yaml)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Dotted path, e.g. server.tls.port
        path: String,
        /// Require the value to have this kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Print the number of entries of a tree
    Size {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Nested tree path (default: root)
        path: Option<String>,
    },

    /// Render a tree
    Show {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Nested tree path (default: root)
        path: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Typed accessor selected by `get --kind`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Integer,
    Double,
    String,
    Properties,
    IntegerList,
    DoubleList,
    StringList,
    PropertiesList,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show config file locations
    Path,
    /// Print a template config file
    Template,
}
