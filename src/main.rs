mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod output;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, MonthArgs, RecommendArgs};
use config::Config;
use datasources::{TableClient, TableSource};
use error::AdvisorError;
use logic::{ClimateAdvisor, ClimateTables, RecommendationEngine};
use models::Month;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Init = cli.command {
        Config::setup_interactive()?;
        return Ok(());
    }

    let config = load_config(&cli)?;
    let catalog = config.load_catalog().context("loading crop catalog")?;
    let advisor = ClimateAdvisor::new(catalog, config.advisor_settings());

    match cli.command {
        Commands::Timeline { json } => {
            let timeline = advisor.timeline();
            if json {
                println!("{}", serde_json::to_string_pretty(&timeline)?);
            } else {
                output::print_timeline(&timeline);
            }
        }
        Commands::Recommend(RecommendArgs {
            target: MonthArgs { month, json },
            crop,
        }) => {
            let month = resolve_month(month.as_deref())?;
            let tables = fetch_tables(&config).await?;
            if let Some(crop_id) = crop {
                let assessment = advisor.assess_crop(&tables, month, &crop_id)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&assessment)?);
                } else {
                    output::print_assessment(&assessment);
                }
                return Ok(());
            }

            let climate = advisor.current_climate(&tables, month);
            let set = advisor.recommend(&tables, month);
            if json {
                println!("{}", serde_json::to_string_pretty(&set)?);
            } else {
                output::print_recommendations(
                    &climate,
                    advisor.settings().recommendation_years,
                    &set,
                );
            }
        }
        Commands::Overview(MonthArgs { month, json }) => {
            let month = resolve_month(month.as_deref())?;
            let tables = fetch_tables(&config).await?;
            let overview = advisor.overview(&tables, month);
            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                output::print_overview(&overview);
            }
        }
        Commands::Advise { month } => {
            let month = resolve_month(month.as_deref())?;
            let tables = fetch_tables(&config).await?;
            let advisory = advisor.advise(&tables, month);
            println!("{}", serde_json::to_string_pretty(&advisory)?);
        }
        Commands::Check => check(&config, &advisor).await?,
        Commands::Init => unreachable!("handled above"),
    }

    Ok(())
}

/// Config file if one exists, otherwise defaults; command-line sources win.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    // An explicit --config path must exist
    let mut config = if cli.config.is_some() || Config::exists(None) {
        Config::load(cli.config.clone())?
    } else {
        tracing::info!("No config file found, using defaults");
        Config::default()
    };

    if let Some(ref rainfall) = cli.rainfall {
        config.data.rainfall = Some(TableSource::parse(rainfall));
    }
    if let Some(ref temperature) = cli.temperature {
        config.data.temperature = Some(TableSource::parse(temperature));
    }
    if let Some(ref catalog) = cli.catalog {
        config.catalog = Some(catalog.clone());
    }

    Ok(config)
}

fn resolve_month(arg: Option<&str>) -> error::Result<Month> {
    match arg {
        Some(s) => Month::from_str(s)
            .ok_or_else(|| AdvisorError::InvalidData(format!("unknown month '{}'", s))),
        None => Ok(Month::current()),
    }
}

/// Fetch and parse both tables. Any failure aborts before aggregation.
async fn fetch_tables(config: &Config) -> anyhow::Result<ClimateTables> {
    let rainfall_source = config.rainfall_source()?;
    let temperature_source = config.temperature_source()?;
    let client = TableClient::new()?;

    let rainfall = client
        .fetch(rainfall_source)
        .await
        .with_context(|| format!("fetching rainfall table from {}", rainfall_source))?;
    let temperature = client
        .fetch(temperature_source)
        .await
        .with_context(|| format!("fetching temperature table from {}", temperature_source))?;

    Ok(ClimateTables::parse(&rainfall, &temperature)?)
}

async fn check(config: &Config, advisor: &ClimateAdvisor) -> anyhow::Result<()> {
    println!(
        "Catalog: {} crops ({})",
        advisor.catalog().len(),
        config
            .catalog
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled".into())
    );
    let ids: Vec<&str> = RecommendationEngine::new(advisor.catalog())
        .list_crops()
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    println!("  {}", ids.join(", "));
    println!(
        "Windows: overview {} years, recommendations {} years",
        advisor.settings().overview_years,
        advisor.settings().recommendation_years
    );

    let client = TableClient::new()?;
    for (label, source) in [
        ("Rainfall", config.rainfall_source()?),
        ("Temperature", config.temperature_source()?),
    ] {
        let reachable = client.test_source(source).await.unwrap_or(false);
        println!(
            "{}: {} [{}]",
            label,
            source,
            if reachable { "OK" } else { "UNREACHABLE" }
        );
    }

    let tables = fetch_tables(config).await?;
    for series in [&tables.rainfall, &tables.temperature] {
        match series.year_span() {
            Some((first, last)) => println!(
                "{} table: {} years ({}-{}), {} columns",
                series.name,
                series.len(),
                first,
                last,
                series.columns.len()
            ),
            None => println!("{} table: no data rows", series.name),
        }
    }

    Ok(())
}
