mod agent;
mod parse;
mod snapshot;

pub use agent::{AgentClient, DEFAULT_AGENT_URL, load_snapshot_file};
pub use snapshot::{FlowDirection, RelatedAccount, TransactionType, WalletSnapshot};

#[cfg(test)]
pub use snapshot::MIN_SOL_AMOUNT;
