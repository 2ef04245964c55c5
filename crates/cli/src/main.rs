use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use connectors::{adapter::Connector, sql::jdbc::JdbcConnector};
use engine_config::settings::{PushdownSettings, validated::ValidatedSettings};
use engine_processing::pushdown::compiler::PushdownCompiler;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "pushdown",
    version = "0.1.0",
    about = "Compile query-engine filters into data source predicates"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Logs go to stderr so that stdout only carries the result
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    println!("{}", run(cli.command).await?);

    Ok(())
}

async fn run(command: Commands) -> Result<String, CliError> {
    match command {
        Commands::Compile {
            config,
            filter,
            where_clause,
            json,
        } => {
            let settings = load_settings(&config).await?;
            let compiled = PushdownCompiler::from_settings(&settings).compile(&filter)?;

            if where_clause {
                if !matches!(settings.connector(), Connector::Jdbc(_)) {
                    return Err(CliError::WhereNotSupported(settings.connector().name()));
                }
                let clause = JdbcConnector::where_clause(compiled.as_deref(), settings.partitioned());
                return output::render_filter(Some(clause.trim_start()).filter(|c| !c.is_empty()), json);
            }

            output::render_filter(compiled.as_deref(), json)
        }
        Commands::Explain {
            config,
            filter,
            json,
        } => {
            let settings = load_settings(&config).await?;
            let explain = PushdownCompiler::from_settings(&settings).explain(&filter)?;
            output::render_explain(&explain, json)
        }
    }
}

async fn load_settings(path: &str) -> Result<ValidatedSettings, CliError> {
    info!(path, "Loading push-down settings");
    let source = tokio::fs::read_to_string(path).await?;
    let settings = PushdownSettings::from_json(&source)?.validate()?;
    Ok(settings)
}
