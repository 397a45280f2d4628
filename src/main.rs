mod app;
mod util;
mod wallet;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::{BubbleMapApp, DEFAULT_MAX_STEPS, LaunchOptions};
use wallet::DEFAULT_AGENT_URL;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Wallet address to analyze on startup.
    address: Option<String>,

    /// Base URL of the wallet analysis agent.
    #[arg(long, env = "BUBBLEMAP_API_URL", default_value = DEFAULT_AGENT_URL)]
    api_base_url: String,

    /// Request timeout for the agent, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Load a snapshot (or API envelope) from a JSON file instead of fetching.
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Upper bound on layout simulation steps per snapshot.
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,
}

impl From<Args> for LaunchOptions {
    fn from(args: Args) -> Self {
        Self {
            address: args.address,
            api_base_url: args.api_base_url,
            timeout: Duration::from_secs(args.timeout_secs),
            snapshot: args.snapshot,
            max_steps: args.max_steps,
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("solana_bubblemap=info")),
        )
        .init();

    let options = LaunchOptions::from(Args::parse());
    tracing::info!(api = %options.api_base_url, max_steps = options.max_steps, "starting bubble map");

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Solana Bubble Map",
        native_options,
        Box::new(move |cc| Ok(Box::new(BubbleMapApp::new(cc, options)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_agent_settings() {
        let args = Args::try_parse_from(["solana-bubblemap"]).expect("no arguments parse");
        let options = LaunchOptions::from(args);
        assert_eq!(options.address, None);
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.max_steps, 300);
        assert!(options.snapshot.is_none());
    }

    #[test]
    fn address_and_snapshot_are_accepted() {
        let args = Args::try_parse_from([
            "solana-bubblemap",
            "So11111111111111111111111111111111111111112",
            "--snapshot",
            "wallet.json",
            "--max-steps",
            "120",
        ])
        .expect("arguments parse");
        let options = LaunchOptions::from(args);
        assert_eq!(
            options.address.as_deref(),
            Some("So11111111111111111111111111111111111111112")
        );
        assert_eq!(options.snapshot, Some(PathBuf::from("wallet.json")));
        assert_eq!(options.max_steps, 120);
    }
}
