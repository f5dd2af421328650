use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, Utc};
use outage_schedule::entities::QueueName;

const USAGE: &str = "usage: outage_cli <queue-name> [--json] [--at <rfc3339-instant>]";

#[derive(Debug, PartialEq)]
pub struct Args {
    pub queue: QueueName,
    pub json: bool,
    /// Evaluate the schedule at this instant instead of the current time.
    pub at: Option<DateTime<Utc>>,
}

impl Args {
    pub fn parse<I: Iterator<Item = String>>(mut args: I) -> anyhow::Result<Self> {
        let mut queue = None;
        let mut json = false;
        let mut at = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => json = true,
                "--at" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--at needs a value\n{USAGE}"))?;
                    let instant = DateTime::parse_from_rfc3339(&value)
                        .with_context(|| format!("Invalid instant {value}"))?;
                    at = Some(instant.with_timezone(&Utc));
                }
                flag if flag.starts_with("--") => bail!("Unknown flag {flag}\n{USAGE}"),
                _ if queue.is_some() => bail!("Only one queue name can be given\n{USAGE}"),
                _ => queue = Some(QueueName::from(arg.clone())),
            }
        }

        let queue = queue.ok_or_else(|| anyhow!(USAGE))?;
        Ok(Args { queue, json, at })
    }
}
