pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use glowmatch_core::config::{AppConfig, LoadOptions, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "glowmatch",
    about = "Glowmatch operator CLI",
    long_about = "Run batch category assignment, skin-profile recommendations, product rankings, and config inspection over the product dataset.",
    after_help = "Examples:\n  glowmatch assign --output dataset/product_categories_assigned.csv\n  glowmatch recommend --profile '{\"skin_type\":\"dry\",\"concerns\":[\"acne\"]}'\n  glowmatch rank --category Skincare --top-n 5"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Assign categories to uncategorized items and write the result CSV")]
    Assign {
        #[arg(long, help = "Dataset directory (defaults to the configured dataset.dir)")]
        dataset: Option<PathBuf>,
        #[arg(long, help = "Output CSV path (defaults to <dataset>/product_categories_assigned.csv)")]
        output: Option<PathBuf>,
    },
    #[command(about = "Recommend products for a skin profile")]
    Recommend {
        #[arg(long, help = "Skin profile as inline JSON or a path to a JSON file")]
        profile: String,
        #[arg(long, help = "Number of results (defaults to the configured default_top_n)")]
        top_n: Option<usize>,
        #[arg(long, help = "Recommendation method: tfidf or rule")]
        method: Option<String>,
    },
    #[command(about = "Global or category-filtered product ranking")]
    Rank {
        #[arg(long, help = "Category to filter by; omit for the global ranking")]
        category: Option<String>,
        #[arg(long, help = "Category level: primary, secondary, or tertiary")]
        level: Option<String>,
        #[arg(long, help = "Number of results")]
        top_n: Option<usize>,
    },
    #[command(about = "List known categories at a taxonomy level with product counts")]
    Categories {
        #[arg(long, help = "Category level: primary, secondary, or tertiary")]
        level: Option<String>,
    },
    #[command(about = "Inspect effective configuration values")]
    Config,
}

fn init_logging() {
    use tracing::Level;

    let Ok(config) = AppConfig::load(LoadOptions::default()) else {
        // The dispatched command reloads config and reports the failure.
        return;
    };
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    let builder =
        tracing_subscriber::fmt().with_target(false).with_max_level(log_level).with_writer(std::io::stderr);
    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Assign { dataset, output } => commands::assign::run(dataset, output),
        Command::Recommend { profile, top_n, method } => {
            commands::recommend::run(&profile, top_n, method.as_deref())
        }
        Command::Rank { category, level, top_n } => {
            commands::rank::run(category.as_deref(), level.as_deref(), top_n)
        }
        Command::Categories { level } => commands::categories::run(level.as_deref()),
        Command::Config => commands::config::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
