use chrono::{DateTime, Utc};

const EXPLORER_ADDRESS_URL: &str = "https://explorer.solana.com/address";

/// `abcd...wxyz` style truncation keeping `keep` characters on each side.
pub fn format_address(address: &str, keep: usize) -> String {
    let char_count = address.chars().count();
    if char_count <= keep * 2 + 3 {
        return address.to_owned();
    }

    let head = address.chars().take(keep).collect::<String>();
    let tail = address.chars().skip(char_count - keep).collect::<String>();
    format!("{head}...{tail}")
}

pub fn format_sol(amount: f64) -> String {
    format!("{amount:.6} SOL")
}

pub fn explorer_url(address: &str) -> String {
    format!("{EXPLORER_ADDRESS_URL}/{address}")
}

pub fn format_relative_time(iso: &str, now: DateTime<Utc>) -> String {
    let Ok(timestamp) = DateTime::parse_from_rfc3339(iso) else {
        return iso.to_owned();
    };

    let elapsed = now.signed_duration_since(timestamp.with_timezone(&Utc));
    let minutes = elapsed.num_minutes().max(0);
    let hours = elapsed.num_hours().max(0);
    let days = elapsed.num_days().max(0);

    if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}
