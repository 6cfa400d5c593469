use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};

use recipebook::chart::render_bar_chart;
use recipebook::{catalog, AppConfig, QueryId, RecipeRepository};

#[derive(Parser, Debug)]
#[command(name = "recipebook", about = "Query a recipe collection")]
struct Cli {
    /// Recipe document (defaults to the configured data_path)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available queries
    List,
    /// Run one query
    Run {
        /// Query key, as printed by `list`
        query: QueryId,
        /// Draw the result as a bar chart instead of printing it
        #[arg(long)]
        chart: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let config = AppConfig::load()?;
    debug!("{:#?}", config);

    match cli.command {
        Command::List => {
            for descriptor in catalog() {
                let marker = if descriptor.chart.is_some() { " [chart]" } else { "" };
                println!("{:<28} {}{}", descriptor.key, descriptor.display, marker);
            }
        }
        Command::Run { query, chart } => {
            let path = cli.data.unwrap_or(config.data_path);
            let repo = RecipeRepository::open_with_namespaces(&path, &config.namespaces)?;
            run(&repo, query, chart, config.chart_width)?;
        }
    }

    Ok(())
}

fn run(
    repo: &RecipeRepository,
    query: QueryId,
    chart: bool,
    chart_width: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let descriptor = query.descriptor();
    let output = query.run(repo)?;

    println!("{}", descriptor.display);
    if !chart {
        println!("{}\n", descriptor.description);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match descriptor
        .chart
        .and_then(|spec| output.bar_series(&spec).map(|series| (spec, series)))
    {
        Some((spec, series)) => print!("{}", render_bar_chart(&spec, &series, chart_width)),
        None => println!("No chart for this query."),
    }
    Ok(())
}
