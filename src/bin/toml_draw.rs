use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use gift_exchange::core::report::{self, OutputFormat};
use gift_exchange::core::ConfigProvider;
use gift_exchange::utils::{logger, validation::Validate};
use gift_exchange::{DrawEngine, DrawOptions, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-draw")]
#[command(about = "Gift exchange draw driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "draw.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Pretend today is this date when checking the schedule (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Dry run - show who would take part without drawing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based gift exchange draw");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(seed) = args.seed {
        config.draw.seed = Some(seed);
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let format: OutputFormat = config.output_format().parse()?;
    let participants = config.eligible_participants();
    let year = config.year().unwrap_or_else(|| Local::now().year());

    if args.dry_run {
        println!("🔍 Dry run for '{}' ({})", config.draw.name, year);
        println!("👥 {} eligible participants:", participants.len());
        for p in &participants {
            println!("  - {} ({})", p.name, p.id);
        }
        if let Some(schedule) = config.schedule() {
            let today = args.today.unwrap_or_else(|| Local::now().date_naive());
            println!(
                "📅 Draw date {} (due: {})",
                schedule.draw_date,
                schedule.is_due(today)
            );
        }
        return Ok(());
    }

    let options = DrawOptions::from_config(&config);

    let assignments = if config.save_enabled() {
        let engine = DrawEngine::new(LocalStorage::new(&config.output.path), options);
        let result = match config.schedule() {
            Some(schedule) => {
                let today = args.today.unwrap_or_else(|| Local::now().date_naive());
                engine.run_if_due(&schedule, today, &participants).await
            }
            None => engine.run(year, &participants).await.map(Some),
        };

        match result {
            Ok(Some(draw)) => draw.assignments,
            Ok(None) => {
                println!("⏳ Draw not scheduled to run yet");
                return Ok(());
            }
            Err(e) => {
                tracing::error!(
                    "❌ Draw failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        }
    } else {
        options.draw(&participants)?
    };

    println!("{}", report::render(&assignments, format)?);
    tracing::info!("✅ Draw '{}' completed", config.draw.name);

    Ok(())
}
