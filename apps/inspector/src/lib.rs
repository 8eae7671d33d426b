pub mod report;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solution_core::{
    closest_solution, filter_solutions, paginate, sort_solutions, Matcher, MatcherSettings,
    RawChallenge, SolutionBuilder, SortOrder,
};

use crate::report::{ListedSolution, Report};

/// Build the solutions of a raw challenge and inspect how an answer matches them.
#[derive(Debug, Parser)]
#[command(name = "solution-inspector", version)]
pub struct Cli {
    /// Path of a raw challenge JSON document.
    pub challenge: PathBuf,

    /// Answer to score against every solution.
    #[arg(short, long)]
    pub answer: Option<String>,

    /// JSON file with matcher settings.
    #[arg(long, env = "SOLUTION_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Keep automatically derived graph vertices.
    #[arg(long)]
    pub include_automatic: bool,

    /// Only list solutions containing every word of this query.
    #[arg(long)]
    pub filter: Option<String>,

    /// Page of the solution list (1-based).
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// alphabetical or score
    #[arg(long, default_value = "alphabetical", value_parser = parse_sort_order)]
    pub sort: SortOrder,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

fn parse_sort_order(value: &str) -> Result<SortOrder, String> {
    SortOrder::from_str(value).ok_or_else(|| format!("unknown sort order: {}", value))
}

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let report = inspect(&cli)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }

    Ok(())
}

/// Load settings from a JSON file, or the defaults when no file is given.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<MatcherSettings> {
    let Some(path) = path else {
        return Ok(MatcherSettings::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing settings from {}", path.display()))
}

pub fn inspect(cli: &Cli) -> anyhow::Result<Report> {
    let mut settings = load_settings(cli.settings.as_deref())?;
    if cli.include_automatic {
        settings.include_automatic = true;
    }

    let content = std::fs::read_to_string(&cli.challenge)
        .with_context(|| format!("reading challenge from {}", cli.challenge.display()))?;
    let challenge = RawChallenge::from_json_str(&content)
        .with_context(|| format!("decoding challenge from {}", cli.challenge.display()))?;

    let builder = SolutionBuilder::new();
    let mut solutions = challenge.solutions(&builder, &settings);
    tracing::info!(
        locale = %challenge.locale,
        count = solutions.len(),
        "Built solutions"
    );

    let mut matcher = Matcher::new(settings.clone());
    let mut closest = None;
    let mut correction = None;
    if let Some(answer) = &cli.answer {
        matcher.score_solutions(&mut solutions, answer);
        closest = closest_solution(&solutions).map(ListedSolution::from);
        correction = Some(matcher.correction(&solutions, answer));
    }

    sort_solutions(&mut solutions, cli.sort, builder.collator());
    let listed = filter_solutions(
        &solutions,
        cli.filter.as_deref().unwrap_or_default(),
        builder.collator(),
    );
    let page = paginate(&listed, cli.page, settings.page_size);

    Ok(Report {
        locale: challenge.locale.clone(),
        total: solutions.len(),
        matching: page.total,
        page: page.page,
        page_count: page.page_count,
        solutions: page.items.iter().map(|s| ListedSolution::from(*s)).collect(),
        answer: cli.answer.clone(),
        closest,
        correction,
    })
}
