use chrono::{Datelike, Local};
use clap::Parser;
use gift_exchange::core::report::{self, OutputFormat};
use gift_exchange::core::ConfigProvider;
use gift_exchange::utils::error::ErrorSeverity;
use gift_exchange::utils::{logger, validation::Validate};
use gift_exchange::{CliConfig, DrawEngine, DrawOptions, DrawSchedule, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting gift-exchange CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Draw failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(config: &CliConfig) -> gift_exchange::Result<()> {
    let format: OutputFormat = config.output_format().parse()?;
    let year = config.year().unwrap_or_else(|| Local::now().year());

    let roster = config.load_roster()?;
    let participants = roster.eligible_participants();
    tracing::info!(
        "👥 {} eligible participants ({} excluded)",
        participants.len(),
        roster.len() - participants.len()
    );

    let options = DrawOptions::from_config(config);

    // --draw-date 需要讀取已存的結果，因此一律寫入儲存
    let assignments = if config.save || config.draw_date.is_some() {
        let engine = DrawEngine::new(LocalStorage::new(&config.output_path), options);
        match config.draw_date {
            Some(draw_date) => {
                let schedule = DrawSchedule::for_year(year, draw_date);
                let today = Local::now().date_naive();
                match engine.run_if_due(&schedule, today, &participants).await? {
                    Some(draw) => draw.assignments,
                    None => {
                        println!(
                            "⏳ Draw for {} is not scheduled to run yet (draw date {})",
                            year, draw_date
                        );
                        return Ok(());
                    }
                }
            }
            None => engine.run(year, &participants).await?.assignments,
        }
    } else {
        options.draw(&participants)?
    };

    tracing::info!("✅ Drew {} assignments for {}", assignments.len(), year);
    println!("{}", report::render(&assignments, format)?);

    Ok(())
}
