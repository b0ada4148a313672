//! CLI argument parsing with clap
//!
//! Defines the command tree: global configuration flags, `migrate`, and the
//! `farms` / `ponds` record commands.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use super::validation::{validate_config_file_path, validate_record_id, validate_rollback_steps};

/// Farm and pond records backed by PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "aquafarm")]
#[command(about = "Manage farm and pond records backed by PostgreSQL")]
#[command(long_about = "
aquafarm manages farms and the ponds that belong to them. Records live in
PostgreSQL; every command prints its result as JSON on stdout and reports
errors on stderr with a non-zero exit code.

EXAMPLES:
    # Apply pending migrations
    aquafarm migrate

    # Create a farm and list the first page
    aquafarm farms create --name \"North Farm\" --slug north-farm
    aquafarm farms list --limit 10 --offset 0

    # Attach a pond to farm 1
    aquafarm ponds create --farm-id 1 --name \"Pond A\" --slug pond-a

    # Use a specific configuration file with verbose logging
    aquafarm --config /etc/aquafarm/production.toml --verbose farms get 1
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        value_parser = validate_config_file_path
    )]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` layer is loaded.
    #[arg(short, long, global = true, value_enum)]
    pub env: Option<Environment>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Database migration operations
    ///
    /// Examples:
    ///   aquafarm migrate                    # Apply all pending migrations
    ///   aquafarm migrate --dry-run          # Show pending migrations without applying
    ///   aquafarm migrate --rollback 1       # Revert the most recent migration
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to roll back (1-100)
        #[arg(long, value_name = "STEPS", value_parser = validate_rollback_steps)]
        rollback: Option<u32>,
    },

    /// Farm records
    #[command(subcommand)]
    Farms(FarmsCommand),

    /// Pond records
    #[command(subcommand)]
    Ponds(PondsCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FarmsCommand {
    /// Show one farm
    Get {
        #[arg(value_parser = validate_record_id)]
        id: i32,
    },

    /// List one page of farms ordered by id
    ///
    /// Limit and offset are checked by the service; non-numeric or negative
    /// values are rejected, and an empty page is reported as an error.
    List {
        #[arg(long, default_value = "10", allow_hyphen_values = true)]
        limit: String,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: String,
    },

    /// Create a farm
    Create {
        #[command(flatten)]
        fields: FarmFields,

        /// Use this id instead of the next sequence value
        #[arg(long, value_parser = validate_record_id)]
        id: Option<i32>,
    },

    /// Replace name and slug of an existing farm
    Update {
        #[arg(value_parser = validate_record_id)]
        id: i32,

        #[command(flatten)]
        fields: FarmFields,
    },

    /// Delete a farm and, through the foreign key, its ponds
    Delete {
        #[arg(value_parser = validate_record_id)]
        id: i32,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct FarmFields {
    #[arg(long)]
    pub name: String,

    /// Unique, human-readable identifier
    #[arg(long)]
    pub slug: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PondsCommand {
    /// Create a pond on an existing farm
    Create {
        #[command(flatten)]
        fields: PondFields,

        #[arg(long, value_parser = validate_record_id)]
        id: Option<i32>,
    },

    /// Replace farm, name and slug of an existing pond
    Update {
        #[arg(value_parser = validate_record_id)]
        id: i32,

        #[command(flatten)]
        fields: PondFields,
    },

    /// Delete a pond
    Delete {
        #[arg(value_parser = validate_record_id)]
        id: i32,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PondFields {
    /// Id of the farm the pond belongs to
    #[arg(long, value_parser = validate_record_id)]
    pub farm_id: i32,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub slug: String,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

impl Commands {
    /// Whether the command reads or writes records, and so needs a pool.
    pub fn touches_records(&self) -> bool {
        matches!(self, Commands::Farms(_) | Commands::Ponds(_))
    }
}
