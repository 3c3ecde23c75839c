pub mod ai;
pub mod config;
pub mod crud;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod records;

use anyhow::Context;

pub use crud::{CustomerManager, DealManager, Notice, RecordManager};
pub use dashboard::Dashboard;
pub use error::{ExportError, FilterError, FlowError, RecordError};
pub use records::{Customer, Deal, RecordId};

/// Load the config, build a dashboard session and report on it.
pub fn run() -> anyhow::Result<()> {
    env_logger::init();

    // ─── Configuration ───────────────────────────────────────────────
    let app_config = match config::AppConfig::default_dir() {
        Some(dir) => config::AppConfig::load(&dir),
        None => {
            log::warn!("No config directory on this platform; using defaults");
            let mut c = config::AppConfig::default();
            c.apply_env();
            c
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("building async runtime")?;

    runtime.block_on(async {
        let mut dashboard = Dashboard::from_config(&app_config)?;
        let today = chrono::Utc::now().date_naive();

        let pipeline = dashboard.pipeline_summary();
        log::info!(
            "Pipeline: {} deals worth {} (avg {}, {}% avg probability)",
            pipeline.total_deals,
            pipeline.pipeline_value,
            pipeline.avg_deal_size,
            pipeline.avg_probability
        );
        let windowed = dashboard.windowed_pipeline_summary(today);
        log::info!(
            "{}: {} deals worth {}",
            dashboard.filters.date_range.label(),
            windowed.total_deals,
            windowed.pipeline_value
        );
        let customers = dashboard.customer_summary();
        println!("{}", serde_json::to_string_pretty(&customers)?);
        println!("{}", serde_json::to_string_pretty(&pipeline)?);

        // ─── Customer export ─────────────────────────────────────────
        dashboard.export.select_option("customers")?;
        dashboard.export.select_format(export::ExportFormat::Csv)?;
        dashboard.export.select_all_fields();

        let mut job = export::ExportJob::start(&dashboard.export, app_config.export_settings())?;
        let receipt = job.wait().await?;
        println!("{}", serde_json::to_string_pretty(&receipt)?);
        dashboard.close_export(today);
        Ok::<(), anyhow::Error>(())
    })
}
