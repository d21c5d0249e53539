//! Command-line front end for the layout recommender.
//!
//! Usage:
//!   composition-recommender --catalog catalog.json --brief "Antes y después" --category comparativa
//!   cat brief.txt | composition-recommender --catalog catalog.json --explain

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use composition_recommender::{Catalog, Config, ContentCategory, RecommendationRequest, Recommender};

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank composition templates against a creative brief", long_about = None)]
struct Args {
    /// Catalog snapshot (JSON with `templates` and `curated`)
    #[arg(long)]
    catalog: PathBuf,

    /// Brief text; read from --brief-file or stdin when omitted
    #[arg(long, conflicts_with = "brief_file")]
    brief: Option<String>,

    /// File containing the brief
    #[arg(long)]
    brief_file: Option<PathBuf>,

    /// Content category tag (e.g. oferta, evento, comparativa)
    #[arg(long)]
    category: Option<ContentCategory>,

    /// Number of templates to return
    #[arg(long)]
    limit: Option<usize>,

    /// Print the full scored ranking instead of the selected ids
    #[arg(long)]
    explain: bool,

    /// TOML configuration file (defaults to COMPOSITION_RECOMMENDER_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn read_brief(args: &Args) -> Result<String> {
    if let Some(brief) = &args.brief {
        return Ok(brief.clone());
    }
    if let Some(path) = &args.brief_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read brief from {}", path.display()));
    }
    let mut brief = String::new();
    std::io::stdin()
        .read_to_string(&mut brief)
        .context("Failed to read brief from stdin")?;
    Ok(brief)
}

fn main() -> Result<()> {
    composition_recommender::load_env();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.runtime.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog = Catalog::load(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;
    let brief = read_brief(&args)?;

    let mut request = RecommendationRequest::new(brief);
    request.category = args.category;
    request.max_items = args.limit;

    info!(
        templates = catalog.len(),
        category = args.category.map(|c| c.as_str()),
        "Ranking templates"
    );

    let recommender = Recommender::new(config);
    let output = if args.explain {
        serde_json::to_string_pretty(&recommender.explain(&catalog, &request))?
    } else {
        serde_json::to_string_pretty(&recommender.recommend(&catalog, &request))?
    };
    println!("{}", output);

    Ok(())
}
