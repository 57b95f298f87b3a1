use clap::Parser;
use fee_estimator::core::report;
use fee_estimator::utils::error::{EstimateError, ErrorSeverity};
use fee_estimator::utils::{logger, validation::Validate};
use fee_estimator::{CatalogSet, CliConfig, Estimator, EstimatorConfig, OpenAiClassifier, OutputFormat};

fn exit_with(e: &EstimateError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 依錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.json_logs);
    tracing::info!("🚀 Starting fee-estimator");

    // 載入設定檔（未指定時使用預設值）
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            EstimatorConfig::from_file(path).unwrap_or_else(|e| exit_with(&e))
        }
        None => EstimatorConfig::default(),
    };
    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    // 未提供金鑰時在處理任何請求前就結束
    let api_key = config.oracle.api_key().unwrap_or_else(|e| exit_with(&e));

    let catalogs = CatalogSet::load(&config.catalog.services_path, &config.catalog.rates_path)
        .unwrap_or_else(|e| exit_with(&e));
    if catalogs.is_degraded() {
        eprintln!("⚠️ Catalogs are missing; estimates are computed from empty catalogs");
    }

    let classifier =
        OpenAiClassifier::new(&config.oracle, api_key).unwrap_or_else(|e| exit_with(&e));
    let estimator = Estimator::new(classifier, catalogs.services, catalogs.rates)
        .with_samples(config.oracle.samples)
        .with_retry(config.retry.policy())
        .with_fallback_hours(config.pricing.fallback_hours);

    let response = match estimator
        .estimate(&cli.question(), cli.requester, cli.urgency)
        .await
    {
        Ok(response) => response,
        Err(e) => exit_with(&e),
    };

    match cli.format {
        OutputFormat::Text => println!(
            "{}",
            report::render_text(&response, estimator.rates().initial_consultation_fee)
        ),
        OutputFormat::Json => {
            let json = report::render_json(&response).unwrap_or_else(|e| exit_with(&e));
            println!("{}", json);
        }
    }

    Ok(())
}
