//! Render a YAML slide plan into a PowerPoint deck.
//!
//! Loads a plan (by default the REGMLAME talk in `demos/regmlame.yaml`),
//! renders it at 16:9 and writes the result.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example render_plan
//! RUST_LOG=deckwright=debug cargo run --example render_plan -- \
//!     --plan demos/regmlame.yaml -o out/talk.pptx
//! ```

use clap::Parser;
use deckwright::ooxml::pptx::DeckSummary;
use deckwright::{DeckConfig, Geometry, Renderer, SlidePlan, persist};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const TITLE: &str = "REGMLAME: Regularized Maximum Likelihood and Minimum Evolution";
const SUBTITLE: &str = "Speaker: <Your Name>  •  Affiliation  •  Date";

/// Render a slide plan to .pptx
#[derive(Parser, Debug)]
#[command(name = "render_plan", version)]
struct Args {
    /// YAML slide plan
    #[arg(long, value_name = "PLAN", default_value = "demos/regmlame.yaml")]
    plan: PathBuf,

    /// Destination .pptx file
    #[arg(short, long, value_name = "OUTPUT", default_value = "presentations/REGMLAME.pptx")]
    output: PathBuf,

    /// Deck title shown on title slides
    #[arg(long, default_value = TITLE)]
    title: String,

    /// Deck subtitle shown on title slides
    #[arg(long, default_value = SUBTITLE)]
    subtitle: String,

    /// Use a 4:3 page instead of 16:9
    #[arg(long)]
    standard: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deckwright=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let plan = SlidePlan::from_yaml_path(&args.plan)?;
    let geometry = if args.standard {
        Geometry::STANDARD_4_3
    } else {
        Geometry::WIDESCREEN
    };

    let renderer = Renderer::new(DeckConfig::new(&args.title, &args.subtitle));
    let document = renderer.render(&plan, geometry)?;
    persist(&document, &args.output)?;

    let summary = DeckSummary::open(&args.output)?;
    println!("Wrote {} ({} slides)", args.output.display(), summary.slide_count());
    for (index, slide) in summary.slides.iter().enumerate() {
        println!(
            "{:>3}  {:<18} {}",
            index + 1,
            slide.layout_name,
            slide.headline.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
