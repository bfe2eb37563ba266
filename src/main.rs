use clap::Parser;
use tutor_slots::core::render::render_week_table;
use tutor_slots::utils::{logger, validation::Validate};
use tutor_slots::{
    from_availability_ranges, CliConfig, ConfigProvider, RestScheduleBackend, ScheduleBackend,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting tutor-slots CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let backend = RestScheduleBackend::new(config.api_endpoint(), config.naming_style());

    match backend.fetch_availability(&config.tutoring_id).await {
        Ok(ranges) => {
            let availability = from_availability_ranges(&ranges);
            tracing::info!(
                "✅ Loaded {} range records ({} distinct slots)",
                ranges.len(),
                availability.slot_count()
            );

            if config.json {
                println!("{}", serde_json::to_string_pretty(&availability.to_value())?);
            } else {
                println!(
                    "📅 Tutor available times for tutoring '{}':",
                    config.tutoring_id
                );
                println!();
                println!("{}", render_week_table(&availability));
                println!();
                if availability.is_empty() {
                    println!("No availability published yet.");
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Fetching availability failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                tutor_slots::utils::error::ErrorSeverity::Low => 0,
                tutor_slots::utils::error::ErrorSeverity::Medium => 2,
                tutor_slots::utils::error::ErrorSeverity::High => 1,
                tutor_slots::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
