use std::sync::Arc;

use anyhow::Context;
use outage_schedule::clock::{Clock, FixedClock, SystemClock};
use outage_schedule::config::Settings;
use outage_schedule::entities::{CurrentInfo, DailyInfo, RemainingTime};
use outage_schedule::http_api::HttpOutageScheduleApi;
use outage_schedule::query_engine::{OutageInfoInteractor, OutageInfoInteractorImpl};
use outage_schedule::slotting::CivilTimeSlotting;
use serde::Serialize;

use crate::args::Args;

mod args;
mod report;

#[derive(Serialize)]
struct JsonReport<'a> {
    current: &'a CurrentInfo,
    daily: &'a DailyInfo,
    remaining: &'a RemainingTime,
    tomorrow: &'a DailyInfo,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_telemetry()?;
    start().await
}

async fn start() -> anyhow::Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    let settings = Settings::parse()?;

    let api = HttpOutageScheduleApi::from_config(&settings.outage_api)?;
    let zone = settings.civil_time_zone()?;
    let clock: Arc<dyn Clock> = match args.at {
        Some(at) => Arc::new(FixedClock(at)),
        None => Arc::new(SystemClock),
    };
    let interactor =
        OutageInfoInteractorImpl::new(Arc::new(api), CivilTimeSlotting::new(zone), clock);
    tracing::info!(queue = %args.queue, "querying outage schedule");

    let current = interactor.current_info(&args.queue).await?;
    let daily = interactor.daily_info(&args.queue).await?;
    let remaining = interactor.remaining_time(&args.queue).await?;
    let tomorrow = interactor.tomorrow_daily_info(&args.queue).await?;

    if args.json {
        let output = JsonReport {
            current: &current,
            daily: &daily,
            remaining: &remaining,
            tomorrow: &tomorrow,
        };
        let output =
            serde_json::to_string_pretty(&output).context("Failed to serialize results")?;
        println!("{output}");
        return Ok(());
    }

    let queue = &args.queue;
    println!("=== Current ({queue}) ===\n{}", report::current(&current));
    println!("\n=== Today ({queue}) ===\n{}", report::daily(&daily));
    println!(
        "\n=== Remaining ({queue}) ===\n{}",
        report::remaining(&remaining, zone.tz())
    );
    println!("\n=== Tomorrow ({queue}) ===\n{}", report::daily(&tomorrow));
    Ok(())
}
