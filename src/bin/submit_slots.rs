use clap::Parser;
use tutor_slots::config::toml_config::SelectionConfig;
use tutor_slots::core::normalize;
use tutor_slots::utils::{logger, validation::Validate};
use tutor_slots::{
    to_availability_ranges, ConfigProvider, RangeMode, RestScheduleBackend, ScheduleBackend,
    WeekDay,
};

#[derive(Parser)]
#[command(name = "submit-slots")]
#[command(about = "Submit a TOML-declared weekly availability selection")]
struct Args {
    /// Path to the selection configuration file
    #[arg(short, long, default_value = "slots.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the range emission mode from config ('merged' or 'per-bucket')
    #[arg(long)]
    mode: Option<RangeMode>,

    /// Dry run - print the payload without submitting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting availability submission tool");
    tracing::info!("📁 Loading selection from: {}", args.config);

    let config = match SelectionConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    let mode = args.mode.unwrap_or_else(|| config.range_mode());
    if let Some(overridden) = args.mode {
        tracing::info!("🔧 Range mode overridden to: {}", overridden);
    }

    let grid = config.build_grid()?;

    display_selection_summary(&config, &grid, mode, &args);

    // Empty selections never leave the tool; this is the same gate the
    // creation form applies before enabling its submit button.
    if !grid.has_any_selected() {
        tracing::error!("❌ Selection is empty - nothing to submit");
        eprintln!("❌ The [selection] table declares no buckets");
        eprintln!("💡 Add at least one day entry, e.g. MON = [\"8-9\"]");
        std::process::exit(1);
    }

    let ranges = to_availability_ranges(&grid, mode);
    tracing::info!(
        "🔄 Converted {} selected buckets into {} range records ({} mode)",
        grid.selected_count(),
        ranges.len(),
        mode
    );

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No submission will occur");
        let payload = normalize::ranges_to_value(&ranges, config.naming_style());
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let backend = RestScheduleBackend::new(config.api_endpoint(), config.naming_style());

    match backend
        .submit_availability(&config.schedule.tutoring_id, &ranges)
        .await
    {
        Ok(()) => {
            tracing::info!("✅ Availability submitted successfully!");
            println!("✅ Availability submitted successfully!");
            println!(
                "📊 {} range records for tutoring '{}'",
                ranges.len(),
                config.schedule.tutoring_id
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Submission failed: {} (Category: {:?}, Severity: {:?})",
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

fn display_selection_summary(
    config: &SelectionConfig,
    grid: &tutor_slots::AvailabilityGrid,
    mode: RangeMode,
    args: &Args,
) {
    println!("📋 Selection Summary:");
    println!("  Schedule: {}", config.schedule.name);
    println!("  Tutoring: {}", config.schedule.tutoring_id);
    println!("  Endpoint: {}", config.api_endpoint());
    println!("  Naming:   {}", config.naming_style());
    println!("  Mode:     {}", mode);

    for day in WeekDay::ALL {
        let buckets = grid.selected_buckets(day);
        if !buckets.is_empty() {
            let labels: Vec<String> = buckets.iter().map(|b| b.label()).collect();
            println!("  {}: {}", day.code(), labels.join(", "));
        }
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
