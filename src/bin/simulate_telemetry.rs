//! Agent telemetry simulator
//!
//! Sends the reference attack scenarios to the gateway (or straight to the
//! intelligence service) with basic auth, optionally in repeated rounds
//! for load testing.

use clap::{Parser, ValueEnum};
use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use aura_intelligence::models::{EventType, TelemetryEvent};

#[derive(Debug, Parser)]
#[command(name = "simulate-telemetry", about = "Send simulated agent telemetry events")]
struct Args {
    /// Telemetry intake URL
    #[arg(long, env = "TELEMETRY_URL", default_value = "http://localhost:8080/api/v1/agent/telemetry")]
    url: String,

    /// Basic auth user (must hold the AGENT role on the gateway)
    #[arg(long, env = "AGENT_USER", default_value = "agent")]
    user: String,

    #[arg(long, env = "AGENT_PASSWORD", default_value = "")]
    password: String,

    #[arg(long, value_enum, default_value_t = Scenario::All)]
    scenario: Scenario,

    /// How many times to replay the selected scenarios
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// Pause between events
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Decoy file read (expected ML score 0.99)
    Decoy,
    /// Mass write into a staging directory (expected ML score 0.85)
    FileWrite,
    /// Ordinary failed login (expected ML score 0.05)
    Normal,
    All,
}

impl Scenario {
    fn expand(self) -> Vec<Scenario> {
        match self {
            Scenario::All => vec![Scenario::Decoy, Scenario::FileWrite, Scenario::Normal],
            single => vec![single],
        }
    }

    fn build(self) -> TelemetryEvent {
        match self {
            Scenario::Decoy => event(
                EventType::DecoyAccess,
                "HR-LAPTOP-14",
                "sara.smith",
                json!({
                    "filePath": "C:\\Windows\\system32\\decoy\\passwords.xlsx",
                    "process": "explorer.exe",
                    "action": "READ"
                }),
            ),
            Scenario::FileWrite => event(
                EventType::FileWrite,
                "SRV-FILES-05",
                "system_backup_svc",
                json!({
                    "filePath": "C:\\Users\\Public\\Share\\mass_rename_batch_1.zip",
                    "operationCount": 540,
                    "durationMs": 5000
                }),
            ),
            Scenario::Normal | Scenario::All => event(
                EventType::AuthFail,
                "PC-DEV-03",
                "john.doe",
                json!({
                    "sourceIp": "192.168.1.5",
                    "reason": "WrongPassword",
                    "attempts": 2
                }),
            ),
        }
    }
}

fn event(event_type: EventType, endpoint_id: &str, user_id: &str, context: Value) -> TelemetryEvent {
    let context_data = match context {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    TelemetryEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        endpoint_id: endpoint_id.to_string(),
        user_id: Some(user_id.to_string()),
        event_type,
        timestamp: chrono::Utc::now().timestamp(),
        context_data,
    }
}

#[derive(Debug, Default)]
struct Tally {
    accepted: u32,
    rejected: u32,
    failed: u32,
}

async fn send_event(client: &reqwest::Client, args: &Args, event: &TelemetryEvent, tally: &mut Tally) {
    let result = client
        .post(&args.url)
        .basic_auth(&args.user, Some(&args.password))
        .json(event)
        .send()
        .await;

    match result {
        Ok(response) => match response.status() {
            StatusCode::ACCEPTED => {
                tally.accepted += 1;
                tracing::info!("Event {} accepted ({})", event.event_id, event.event_type);
            }
            StatusCode::UNAUTHORIZED => {
                tally.rejected += 1;
                tracing::error!("Authentication failed (401): wrong credentials or unknown endpoint");
            }
            StatusCode::FORBIDDEN => {
                tally.rejected += 1;
                tracing::error!("Authorization failed (403): user '{}' lacks the AGENT role", args.user);
            }
            status => {
                tally.rejected += 1;
                let body = response.text().await.unwrap_or_default();
                tracing::warn!("Event {} not accepted: {} {}", event.event_id, status, body);
            }
        },
        Err(e) if e.is_connect() => {
            tally.failed += 1;
            tracing::error!("Could not connect to {}: is the service running?", args.url);
        }
        Err(e) => {
            tally.failed += 1;
            tracing::error!("Request failed: {}", e);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;

    tracing::info!("AURA Sentinel: agent telemetry simulator → {}", args.url);

    let scenarios = args.scenario.expand();
    let delay = Duration::from_millis(args.delay_ms);
    let mut tally = Tally::default();

    for round in 1..=args.rounds {
        tracing::debug!("Round {}/{}", round, args.rounds);
        for (i, scenario) in scenarios.iter().enumerate() {
            let event = scenario.build();
            send_event(&client, &args, &event, &mut tally).await;

            let last = round == args.rounds && i + 1 == scenarios.len();
            if !last && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    tracing::info!(
        "Simulation finished: {} accepted, {} rejected, {} failed",
        tally.accepted,
        tally.rejected,
        tally.failed
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_intelligence::scoring::{AnomalyScorer, RuleBasedScorer};

    #[test]
    fn test_scenarios_hit_expected_scores() {
        let scorer = RuleBasedScorer::new();
        assert_eq!(scorer.score(&Scenario::Decoy.build()), 0.99);
        assert_eq!(scorer.score(&Scenario::FileWrite.build()), 0.85);
        assert_eq!(scorer.score(&Scenario::Normal.build()), 0.05);
    }

    #[test]
    fn test_events_have_unique_ids() {
        assert_ne!(Scenario::Decoy.build().event_id, Scenario::Decoy.build().event_id);
        assert_eq!(Scenario::All.expand().len(), 3);
    }

    #[test]
    fn test_cli_parses() {
        let args = Args::parse_from([
            "simulate-telemetry",
            "--scenario",
            "file-write",
            "--rounds",
            "5",
            "--delay-ms",
            "0",
        ]);
        assert_eq!(args.scenario, Scenario::FileWrite);
        assert_eq!(args.rounds, 5);
    }
}
