//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::config::RenderStyle;
use crate::domain::{Depth, NodeId};

/// Compact depth-encoded forests with structural subtree filtering
#[derive(Parser, Debug)]
#[command(name = "flatforest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath, env = "FLATFOREST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// A hierarchy given as parallel id and depth lists in DFS pre-order.
#[derive(Args, Debug, Clone)]
pub struct HierarchyArgs {
    /// Node ids, comma separated (e.g. 1,2,3)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub ids: Vec<NodeId>,

    /// Node depths, comma separated (e.g. 0,1,2)
    #[arg(long, value_delimiter = ',')]
    pub depths: Vec<Depth>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a hierarchy
    Show {
        #[command(flatten)]
        hierarchy: HierarchyArgs,

        /// Output style (default: from config)
        #[arg(short, long, value_enum)]
        style: Option<RenderStyle>,
    },

    /// Remove nodes failing the selection together with their subtrees
    Filter {
        #[command(flatten)]
        hierarchy: HierarchyArgs,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output style (default: from config)
        #[arg(short, long, value_enum)]
        style: Option<RenderStyle>,

        /// Print kept/removed/evaluated counts
        #[arg(long)]
        stats: bool,
    },

    /// Validate the depth encoding of a hierarchy
    Check {
        #[command(flatten)]
        hierarchy: HierarchyArgs,
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

/// Rules a node id must satisfy; all given rules must hold.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Drop this id (repeatable)
    #[arg(long, allow_negative_numbers = true)]
    pub exclude: Vec<NodeId>,

    /// Drop multiples of N (repeatable)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub exclude_multiple_of: Vec<NodeId>,

    /// Drop ids below this bound
    #[arg(long, allow_negative_numbers = true)]
    pub min_id: Option<NodeId>,

    /// Drop ids above this bound
    #[arg(long, allow_negative_numbers = true)]
    pub max_id: Option<NodeId>,

    /// Keep only these ids, comma separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub only: Option<Vec<NodeId>>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show the global config file location
    Path,
    /// Print a commented config template
    Template,
}
