use clap::Parser;
use std::io::Write;
use std::path::Path;
use vantage_intake::adapters;
use vantage_intake::config::toml_config::LogFormat;
use vantage_intake::core::intake::IntakeFile;
use vantage_intake::core::{dashboard, payment, submission};
use vantage_intake::domain::model::SortDirection;
use vantage_intake::utils::{logger, validation::Validate};
use vantage_intake::{
    AppConfig, Catalog, CliConfig, Command, Dashboard, IntakeError, OutputFormat, SubmissionEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 目錄不需要配置
    if let Command::Catalog = cli.command {
        return print_catalog(Catalog::standard());
    }

    let config = if cli.command.needs_config() {
        match AppConfig::from_file(&cli.config) {
            Ok(config) => Some(config),
            Err(e) => exit_with(&e),
        }
    } else {
        None
    };

    // 初始化日誌
    let verbose = cli.verbose || config.as_ref().is_some_and(AppConfig::verbose);
    match config.as_ref().map(AppConfig::log_format).unwrap_or_default() {
        LogFormat::Compact => logger::init_cli_logger(verbose),
        LogFormat::Json => logger::init_json_logger(verbose),
    }

    tracing::info!("Starting vantage-intake CLI");
    tracing::debug!("CLI config: {:?}", cli);

    // 驗證配置
    if let Some(Err(e)) = config.as_ref().map(<AppConfig as Validate>::validate) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if let Err(e) = run(cli.command, config.as_ref()).await {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        exit_with(&e);
    }

    Ok(())
}

fn required(config: Option<&AppConfig>) -> vantage_intake::Result<&AppConfig> {
    config.ok_or_else(|| IntakeError::MissingConfigError {
        field: "--config".to_string(),
    })
}

async fn run(command: Command, config: Option<&AppConfig>) -> vantage_intake::Result<()> {
    let catalog = Catalog::standard();

    match command {
        Command::Submit { intake, dry_run } => {
            let file = IntakeFile::from_file(&intake)?;
            let base_dir = intake.parent().unwrap_or(Path::new("."));
            let replay = file.replay(catalog, base_dir)?;

            for (class, id) in &replay.skipped_options {
                println!(
                    "⚠️  Skipped {} {:?}: requires the {} plan or above",
                    class,
                    id,
                    catalog.minimum_tier(*class, id)
                );
            }

            if dry_run {
                let order = submission::preview(&replay.form, catalog)?;
                println!("🔎 Dry run, nothing was uploaded or saved:");
                println!("{}", serde_json::to_string_pretty(&order)?);
                return Ok(());
            }

            let config = required(config)?;
            let blobs = adapters::blob_store(config).await?;
            let orders = adapters::order_store(config)?;
            let engine = SubmissionEngine::with_catalog(blobs, orders, catalog);

            let receipt = engine.submit(&replay.form).await?;
            println!("✅ Order submitted successfully! ID: {}", receipt.id);
            println!("We'll get back to you shortly.");
        }
        Command::Orders { format, ascending } => {
            let direction = if ascending {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            };
            let board = Dashboard::new(adapters::order_store(required(config)?)?);
            let orders = board.fetch(direction).await?;

            let output = match format {
                OutputFormat::Text => dashboard::render_text(&orders, catalog),
                OutputFormat::Json => dashboard::render_json(&orders)?,
                OutputFormat::Csv => dashboard::render_csv(&orders)?,
            };
            print!("{}", output);
            if format == OutputFormat::Json {
                println!();
            }
        }
        Command::PaymentQr { plan } => {
            let price_plan =
                catalog
                    .resolve_plan(&plan)
                    .ok_or_else(|| IntakeError::InvalidConfigValueError {
                        field: "plan".to_string(),
                        value: plan.clone(),
                        reason: "expected 99, 199, 399, a plan label or a tier name".to_string(),
                    })?;
            let url = payment::qr_code_url(required(config)?.payment()?, price_plan)?;
            println!("Scan to pay ₹{} ({}): {}", price_plan.value, price_plan.label, url);
        }
        Command::Catalog => print_catalog(catalog).map_err(|e| IntakeError::ConfigError {
            message: e.to_string(),
        })?,
    }

    Ok(())
}

fn print_catalog(catalog: &Catalog) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();

    writeln!(out, "Plans:")?;
    for plan in catalog.plans() {
        let badge = plan.badge.map(|b| format!(" [{}]", b)).unwrap_or_default();
        writeln!(out, "  ₹{} {} ({}){}", plan.value, plan.label, plan.tier, badge)?;
        writeln!(out, "    {}", plan.slogan)?;
        for highlight in plan.highlights {
            writeln!(out, "    - {}", highlight)?;
        }
    }

    writeln!(out, "\nFeatures:")?;
    for feature in catalog.features() {
        writeln!(out, "  {:<24} {:<10} {}", feature.id, feature.min_tier.as_str(), feature.title)?;
    }

    for category in catalog.section_categories() {
        writeln!(out, "\n{}: {}", category.name, category.description)?;
        for section in category.options {
            writeln!(out, "  {:<24} {:<10} {}", section.id, section.min_tier.as_str(), section.title)?;
        }
    }

    Ok(())
}

fn exit_with(e: &IntakeError) -> ! {
    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    std::process::exit(e.severity().exit_code())
}
