// vigie/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vigie")]
#[command(about = "The Data Quality Checkpoint & Data Docs Pipeline Tool", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔌 Registers the warehouse datasource and its query assets
    RegisterSources {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Pipeline configuration file, relative to the project
        #[arg(long, default_value = "config.yaml")]
        config: String,
    },

    /// 🧠 Builds one expectation suite per configured table
    BuildSuites {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Pipeline configuration file, relative to the project
        #[arg(long, default_value = "config.yaml")]
        config: String,

        /// Path to the DuckDB database file
        #[arg(long, default_value = "vigie_db.duckdb")]
        db_path: String,
    },

    /// ✅ Runs a checkpoint over all configured tables
    Checkpoint {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Pipeline configuration file, relative to the project
        #[arg(long, default_value = "config.yaml")]
        config: String,

        /// Path to the DuckDB database file
        #[arg(long, default_value = "vigie_db.duckdb")]
        db_path: String,

        /// Checkpoint name
        #[arg(long, default_value = "my_checkpoint")]
        name: String,
    },

    /// 🔬 Generates the standalone profiling report page
    Profile {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Pipeline configuration file, relative to the project
        #[arg(long, default_value = "config.yaml")]
        config: String,

        /// Path to the DuckDB database file
        #[arg(long, default_value = "vigie_db.duckdb")]
        db_path: String,
    },

    /// 📚 Rebuilds the data docs site from the store
    Docs {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🩹 Applies the report patch passes to the data docs
    PatchDocs {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🚀 Runs the full pipeline (register -> suites -> checkpoint -> docs -> profile -> patch)
    Run {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Pipeline configuration file, relative to the project
        #[arg(long, default_value = "config.yaml")]
        config: String,

        /// Path to the DuckDB database file
        #[arg(long, default_value = "vigie_db.duckdb")]
        db_path: String,

        /// Checkpoint name
        #[arg(long, default_value = "my_checkpoint")]
        name: String,
    },

    /// ⚡ Executes a raw SQL query (Ad-hoc)
    Query {
        /// Inline SQL text
        #[arg(long, conflicts_with = "sql_file")]
        sql_query: Option<String>,

        /// File containing the SQL text
        #[arg(long)]
        sql_file: Option<PathBuf>,

        /// JSON object substituted into the SQL before execution
        #[arg(long)]
        args_json: Option<String>,

        /// Path to the DuckDB database file
        #[arg(long, default_value = "vigie_db.duckdb")]
        db_path: String,
    },
}
