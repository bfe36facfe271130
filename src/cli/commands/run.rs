//! `run` command: launch, hold, tear down.

use anyhow::Result;
use clap::Args;
use std::time::Duration;
use tracing::info;

use super::teardown::TeardownOutput;
use crate::application::Harness;
use crate::cli::output::output;
use crate::domain::models::HarnessConfig;

/// Arguments of `run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// How long to keep the application running before teardown
    #[arg(long, default_value = "5000")]
    pub hold_ms: u64,

    /// Keep the application's existing config directory
    #[arg(long)]
    pub keep_library: bool,
}

/// Launch the application, hold it, then tear it down.
pub async fn execute(args: RunArgs, config: HarnessConfig, json_mode: bool) -> Result<()> {
    let harness = Harness::new(config);

    let launch = if args.keep_library {
        crate::infrastructure::platform::prepare_launch_keep_library(&harness.config().app)?
    } else {
        harness.prepare_launch()?
    };
    let process = harness.launch(&launch).await?;

    info!(hold_ms = args.hold_ms, "Holding application before teardown");
    tokio::time::sleep(Duration::from_millis(args.hold_ms)).await;

    let report = harness.teardown(process).await?;
    output(&TeardownOutput::from(&report), json_mode);
    Ok(())
}
