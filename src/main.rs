//! # Hamlet Command Line Entry Point
//!
//! Generates layouts for one settlement, optionally blends several variants,
//! and prints the result as JSON.

use clap::Parser;
use hamlet::{
    generator_for, generator_for_style, LayoutError, LayoutPatternResult, LayoutResult,
    LayoutStyle, PatternBlender, Settlement, SettlementType, SettlementTypeRegistry,
};
use std::path::PathBuf;

/// Command line arguments for the Hamlet layout generator.
#[derive(Parser, Debug)]
#[command(name = "hamlet")]
#[command(about = "Procedural settlement layout generation and blending")]
#[command(version)]
struct Args {
    /// Settlement type (hamlet, village, town, city, metropolis, outpost)
    #[arg(short = 't', long, default_value = "village")]
    settlement_type: SettlementType,

    /// Explicit settlement size, clamped into the type's range
    #[arg(long)]
    size: Option<u32>,

    /// Random seed for layout generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with settlement type parameters (defaults to the built-in table)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of layout variants to generate and blend
    #[arg(long, default_value_t = 1)]
    variants: usize,

    /// Layout style per variant, cycled when there are more variants than styles
    #[arg(long, value_delimiter = ',')]
    style: Vec<LayoutStyle>,

    /// Blend weight per variant (defaults to equal weights)
    #[arg(short, long, value_delimiter = ',')]
    weights: Vec<f64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> LayoutResult<()> {
    let args = Args::parse();

    // Initialize logging
    initialize_logging(&args.log_level)?;

    log::info!("Starting Hamlet v{}", hamlet::VERSION);

    let registry = match &args.config {
        Some(path) => {
            log::info!("Loading settlement parameters from {}", path.display());
            SettlementTypeRegistry::from_file(path)?
        }
        None => SettlementTypeRegistry::with_defaults(),
    };

    let seed = args.seed.unwrap_or(hamlet::config::DEFAULT_SEED);
    let mut rng = hamlet::utils::create_rng(seed);

    let settlement = match args.size {
        Some(size) => Settlement::with_size(args.settlement_type, size, &registry)?,
        None => Settlement::new(args.settlement_type, &registry, &mut rng)?,
    };

    log::info!(
        "Generating {} variant(s) for a {} of size {} with seed {}",
        args.variants,
        settlement.settlement_type(),
        settlement.size(),
        seed
    );

    let layout = run(&args, &settlement, &mut rng)?;
    println!("{}", layout.to_json(args.pretty)?);

    Ok(())
}

/// Generates every requested variant and blends them when there is more than one.
fn run(
    args: &Args,
    settlement: &Settlement,
    rng: &mut rand::rngs::StdRng,
) -> LayoutResult<LayoutPatternResult> {
    if args.variants == 0 {
        return Err(LayoutError::InvalidArgument(
            "At least one variant is required".to_string(),
        ));
    }

    let mut layouts = Vec::with_capacity(args.variants);
    for index in 0..args.variants {
        let generator = if args.style.is_empty() {
            generator_for(settlement)
        } else {
            generator_for_style(args.style[index % args.style.len()])
        };

        log::debug!("Variant {} uses {}", index, generator.generator_type());
        layouts.push(generator.generate(settlement, rng)?);
    }

    if layouts.len() == 1 && args.weights.is_empty() {
        return Ok(layouts.remove(0));
    }

    let weights = if args.weights.is_empty() {
        vec![1.0; layouts.len()]
    } else {
        args.weights.clone()
    };

    PatternBlender::new().blend(&layouts, &weights)
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> LayoutResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => tracing::Level::ERROR,
            "warn" => tracing::Level::WARN,
            "info" => tracing::Level::INFO,
            "debug" => tracing::Level::DEBUG,
            "trace" => tracing::Level::TRACE,
            _ => tracing::Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        let level = log_level.parse::<log::LevelFilter>().map_err(|_| {
            LayoutError::InvalidArgument(format!("Unknown log level '{}'", log_level))
        })?;

        env_logger::Builder::new()
            .filter_level(level)
            .format_target(false)
            .init();
    }

    Ok(())
}
