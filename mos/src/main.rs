//! Demo driver standing in for the external orchestrator
//!
//! Builds the platform once, then walks the four modules through
//! bootstrap/mount, lets the dashboard refresh land, and unmounts everything
//! again. The real orchestrator lives outside this crate; this binary only
//! exercises the same contract.

use std::time::Duration;

use clap::Parser;
use eyre::Result;
use tracing::info;

use mosaic::cli::Cli;
use mosaic::config::Config;
use mosaic::lifecycle::{LifecycleAdapter, MountProps};
use mosaic::platform::{Platform, key};
use mosaic::{DashboardApp, NavbarApp, ProjectsApp, TasksApp};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) {
    // Priority: CLI --log-level > config file > default (INFO)
    let level = cli_log_level.or(config_log_level).unwrap_or("INFO");
    let directive = match level.to_uppercase().as_str() {
        "TRACE" => tracing::Level::TRACE,
        "DEBUG" => tracing::Level::DEBUG,
        "INFO" => tracing::Level::INFO,
        "WARN" | "WARNING" => tracing::Level::WARN,
        "ERROR" => tracing::Level::ERROR,
        other => {
            eprintln!("Warning: Unknown log-level '{other}', defaulting to INFO");
            tracing::Level::INFO
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.into()))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_ref())?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref());

    let platform = Platform::new(&config)?;
    info!(api_base_url = %config.api_base_url, "platform ready");

    let mut adapters = vec![
        LifecycleAdapter::new(Box::new(NavbarApp::new(platform.clone()))),
        LifecycleAdapter::new(Box::new(ProjectsApp::new(platform.clone()))),
        LifecycleAdapter::new(Box::new(TasksApp::new(platform.clone()))),
        LifecycleAdapter::new(Box::new(DashboardApp::new(platform.clone()))),
    ];

    for adapter in &mut adapters {
        adapter.bootstrap().await?;
        let props = MountProps::new(format!("#{}", adapter.name()), format!("/{}", adapter.name()));
        adapter.mount(&props).await?;
        info!(module = adapter.name(), "mounted");
    }

    // The dashboard refresh runs in the background; give it a moment to land
    // (or to record its error flag) before reading the summary.
    tokio::time::sleep(Duration::from_millis(500)).await;

    if let Some(summary) = platform.state().get(key::DASHBOARD) {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    if let Some(error) = platform.state().get(key::DASHBOARD_ERROR) {
        if !error.is_null() {
            eprintln!("dashboard refresh failed: {error}");
        }
    }

    for adapter in adapters.iter_mut().rev() {
        let props = MountProps::new(format!("#{}", adapter.name()), format!("/{}", adapter.name()));
        adapter.unmount(&props).await?;
        adapter.close();
        info!(module = adapter.name(), "unmounted");
    }

    info!(
        residual_subscriptions = platform.bus().total_subscriptions(),
        "teardown complete"
    );
    Ok(())
}
