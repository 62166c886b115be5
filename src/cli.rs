use crate::client::DescriptorSet;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// A tool to search a bioactivity dataset and inspect model predictions
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML config profile
    #[arg(long, global = true, env = "BIOINSIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the output to a file as well as stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Color handling for text output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Increase diagnostic output on stderr
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress and diagnostic output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search compounds with a natural-language query and/or manual filters
    Search {
        /// Free-text query, e.g. "low molecular weight and high activity"
        #[arg(long)]
        query: Option<String>,

        /// Molecular weight bounds (Da), applied after the query
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
        mol_weight: Option<Vec<f64>>,

        /// LogP bounds, applied after the query
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
        log_p: Option<Vec<f64>>,

        /// TPSA bounds (Å²), applied after the query
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
        tpsa: Option<Vec<f64>>,

        /// Restrict to a biological target by name
        #[arg(long)]
        target: Option<String>,

        /// Restrict to experimentally active or inactive compounds
        #[arg(long, value_enum)]
        activity: Option<ActivityFlag>,

        /// Restrict to compounds the model predicts active or inactive
        #[arg(long, value_enum)]
        predicted: Option<ActivityFlag>,

        /// Maximum number of rows to keep (defaults to the config limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Skip the per-row prediction requests and keep placeholder flags
        #[arg(long)]
        no_predict: bool,
    },
    /// Summarize the dataset: targets, activity counts, descriptor spans
    Info,
    /// Predict activity for one descriptor set
    Predict {
        #[command(flatten)]
        descriptors: DescriptorArgs,

        /// Which trained model to query
        #[arg(long, value_enum, default_value_t = Model::Best)]
        model: Model,
    },
    /// Show per-feature SHAP contributions for one descriptor set
    Explain {
        #[command(flatten)]
        descriptors: DescriptorArgs,
    },
}

/// Descriptor inputs shared by the predict and explain commands
#[derive(Args)]
pub struct DescriptorArgs {
    /// Molecular weight (freebase, Da)
    #[arg(long)]
    pub mw: f64,

    /// Calculated LogP
    #[arg(long, allow_hyphen_values = true)]
    pub logp: f64,

    /// Topological polar surface area (Å²)
    #[arg(long)]
    pub tpsa: f64,

    /// Hydrogen bond donors
    #[arg(long, default_value_t = 0)]
    pub hbd: u32,

    /// Hydrogen bond acceptors
    #[arg(long, default_value_t = 0)]
    pub hba: u32,

    /// Rotatable bonds
    #[arg(long, default_value_t = 0)]
    pub rtb: u32,
}

impl DescriptorArgs {
    pub fn to_descriptors(&self) -> DescriptorSet {
        DescriptorSet {
            mw_freebase: self.mw,
            alogp: self.logp,
            psa: self.tpsa,
            hbd: self.hbd,
            hba: self.hba,
            rtb: self.rtb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActivityFlag {
    Active,
    Inactive,
}

impl ActivityFlag {
    pub fn as_bool(self) -> bool {
        matches!(self, ActivityFlag::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Model {
    Logistic,
    Xgboost,
    /// Whichever model scored best during training
    Best,
}

impl Model {
    /// Path segment under `/predict/` on the backend
    pub fn endpoint_path(self) -> &'static str {
        match self {
            Model::Logistic => "logistic",
            Model::Xgboost => "xgboost",
            Model::Best => "best",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_asserts() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_model_endpoint_paths() {
        assert_eq!(Model::Logistic.endpoint_path(), "logistic");
        assert_eq!(Model::Xgboost.endpoint_path(), "xgboost");
        assert_eq!(Model::Best.endpoint_path(), "best");
    }

    #[test]
    fn test_search_flags_parse() {
        let cli = Cli::try_parse_from([
            "bioinsight",
            "search",
            "--query",
            "tpsa below 90",
            "--mol-weight",
            "150",
            "450",
            "--predicted",
            "active",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                query,
                mol_weight,
                predicted,
                ..
            } => {
                assert_eq!(query.as_deref(), Some("tpsa below 90"));
                assert_eq!(mol_weight, Some(vec![150.0, 450.0]));
                assert_eq!(predicted, Some(ActivityFlag::Active));
            }
            _ => panic!("expected search command"),
        }
    }
}
