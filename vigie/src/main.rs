// vigie/src/main.rs

mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug vigie run ... to see the details
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::RegisterSources {
            project_dir,
            config,
        } => commands::register_sources::execute(&project_dir, &config).await,

        Commands::BuildSuites {
            project_dir,
            config,
            db_path,
        } => commands::build_suites::execute(&project_dir, &config, &db_path).await,

        Commands::Checkpoint {
            project_dir,
            config,
            db_path,
            name,
        } => commands::checkpoint::execute(&project_dir, &config, &db_path, &name).await,

        Commands::Profile {
            project_dir,
            config,
            db_path,
        } => commands::profile::execute(&project_dir, &config, &db_path).await,

        Commands::Docs { project_dir } => commands::docs::execute(&project_dir).await,

        Commands::PatchDocs { project_dir } => commands::patch_docs::execute(&project_dir).await,

        Commands::Run {
            project_dir,
            config,
            db_path,
            name,
        } => commands::run::execute(&project_dir, &config, &db_path, &name).await,

        Commands::Query {
            sql_query,
            sql_file,
            args_json,
            db_path,
        } => commands::query::execute(sql_query, sql_file, args_json, &db_path).await,
    }
}
