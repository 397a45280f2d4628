use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Weight substituted for missing, zero or unparsable SOL amounts so that every
/// bubble stays visible and collidable.
pub const MIN_SOL_AMOUNT: f64 = 0.001;

/// Decimal with optional digit-group commas, leading-dot fraction and exponent.
const DECIMAL_PATTERN: &str = r"(?:\d[\d,]*(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?";

static SOL_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"({DECIMAL_PATTERN})\s*SOL")).expect("SOL amount pattern is valid")
});
static BARE_AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DECIMAL_PATTERN).expect("bare amount pattern is valid"));

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletSnapshot {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub is_valid: bool,
    #[serde(default)]
    pub total_transactions: u64,
    #[serde(default)]
    pub sampled_transactions: u64,
    #[serde(default)]
    pub related_accounts: Vec<RelatedAccount>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelatedAccount {
    pub address: String,
    #[serde(default)]
    pub transaction_count: u64,
    #[serde(default)]
    pub last_interaction: Option<String>,
    #[serde(default)]
    pub transaction_types: Vec<TransactionType>,
    #[serde(default)]
    pub total_sol_volume: Option<String>,
    #[serde(default)]
    pub total_sol_flow: Option<String>,
    #[serde(default)]
    pub total_token_interactions: u64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String")]
pub enum TransactionType {
    SolInflow,
    SolOutflow,
    TokenTransfer,
    Other(String),
}

impl From<String> for TransactionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SOL Inflow" => Self::SolInflow,
            "SOL Outflow" => Self::SolOutflow,
            "Token Transfer" => Self::TokenTransfer,
            _ => Self::Other(value),
        }
    }
}

impl TransactionType {
    pub fn label(&self) -> &str {
        match self {
            Self::SolInflow => "SOL Inflow",
            Self::SolOutflow => "SOL Outflow",
            Self::TokenTransfer => "Token Transfer",
            Self::Other(label) => label.as_str(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowDirection {
    Inflow,
    Outflow,
    Zero,
}

/// Aggregates shown above the related-accounts list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetworkSummary {
    pub interactions: u64,
    pub token_interactions: u64,
    pub receivers: usize,
    pub senders: usize,
}

/// Extracts the magnitude from an upstream free-text amount such as `"0.002 SOL"`.
///
/// A number followed by the `SOL` unit wins; otherwise the first bare decimal is
/// used. Missing, zero or unparsable input yields [`MIN_SOL_AMOUNT`].
pub fn parse_sol_amount(raw: Option<&str>) -> f64 {
    raw.and_then(raw_sol_amount)
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .map(|amount| amount.max(MIN_SOL_AMOUNT))
        .unwrap_or(MIN_SOL_AMOUNT)
}

fn raw_sol_amount(raw: &str) -> Option<f64> {
    let digits = SOL_AMOUNT_RE
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .or_else(|| BARE_AMOUNT_RE.find(raw))?;
    digits.as_str().replace(',', "").parse::<f64>().ok()
}

pub fn flow_direction(raw: &str) -> FlowDirection {
    let is_zero = raw_sol_amount(raw).is_none_or(|amount| amount <= 0.0);
    if is_zero {
        FlowDirection::Zero
    } else if raw.contains('-') {
        FlowDirection::Outflow
    } else {
        FlowDirection::Inflow
    }
}

impl RelatedAccount {
    /// The magnitude string driving the bubble size; volume is preferred over flow.
    pub fn magnitude(&self) -> Option<&str> {
        self.total_sol_volume
            .as_deref()
            .or(self.total_sol_flow.as_deref())
    }

    pub fn sol_amount(&self) -> f64 {
        parse_sol_amount(self.magnitude())
    }

    pub fn flow(&self) -> FlowDirection {
        self.total_sol_flow
            .as_deref()
            .or(self.total_sol_volume.as_deref())
            .map(flow_direction)
            .unwrap_or(FlowDirection::Zero)
    }

    /// Flow text without its sign, as displayed next to the direction arrow.
    pub fn flow_amount_text(&self) -> String {
        self.total_sol_flow
            .as_deref()
            .or(self.total_sol_volume.as_deref())
            .map(|raw| raw.replacen('-', "", 1))
            .unwrap_or_else(|| "0 SOL".to_owned())
    }

    pub fn has_type(&self, kind: &TransactionType) -> bool {
        self.transaction_types.iter().any(|candidate| candidate == kind)
    }
}

impl WalletSnapshot {
    pub fn has_network(&self) -> bool {
        self.is_valid && !self.related_accounts.is_empty()
    }

    pub fn summary(&self) -> NetworkSummary {
        let mut summary = NetworkSummary::default();
        for account in &self.related_accounts {
            summary.interactions += account.transaction_count;
            summary.token_interactions += account.total_token_interactions;
            if account.has_type(&TransactionType::SolInflow) {
                summary.receivers += 1;
            }
            if account.has_type(&TransactionType::SolOutflow) {
                summary.senders += 1;
            }
        }
        summary
    }
}
