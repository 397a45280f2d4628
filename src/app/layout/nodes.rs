use eframe::egui::{Color32, Vec2, vec2};

use crate::util::format_address;
use crate::wallet::WalletSnapshot;

use super::scale::{
    CENTER_COLOR, CENTER_RADIUS, RadiusScale, VolumeBucket, collision_radius, shows_label,
};

const CENTER_NODE_ID: &str = "main";
const CENTER_NODE_INDEX: usize = 0;

const CENTER_WEIGHT: f64 = 1.0;
const INITIAL_RADIUS: f32 = 10.0;

pub(in crate::app) struct LayoutNode {
    pub(in crate::app) id: String,
    pub(in crate::app) address: String,
    pub(in crate::app) label: Option<String>,
    pub(in crate::app) weight: f64,
    pub(in crate::app) bucket: VolumeBucket,
    pub(in crate::app) is_center: bool,
    /// Index into `WalletSnapshot::related_accounts`; `None` for the center node.
    pub(in crate::app) account_index: Option<usize>,
    pub(in crate::app) radius: f32,
    pub(in crate::app) collision_radius: f32,
    pub(in crate::app) position: Vec2,
    pub(in crate::app) velocity: Vec2,
}

impl LayoutNode {
    fn center(address: &str) -> Self {
        Self {
            id: CENTER_NODE_ID.to_owned(),
            address: address.to_owned(),
            label: Some("MAIN".to_owned()),
            weight: CENTER_WEIGHT,
            bucket: VolumeBucket::from_weight(CENTER_WEIGHT),
            is_center: true,
            account_index: None,
            radius: CENTER_RADIUS,
            collision_radius: collision_radius(CENTER_RADIUS, true),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }

    fn related(account_index: usize, address: &str, weight: f64, scale: RadiusScale) -> Self {
        let radius = scale.radius(weight);
        Self {
            id: format!("related-{account_index}"),
            address: address.to_owned(),
            label: shows_label(weight, false).then(|| format_address(address, 4)),
            weight,
            bucket: VolumeBucket::from_weight(weight),
            is_center: false,
            account_index: Some(account_index),
            radius,
            collision_radius: collision_radius(radius, false),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }

    pub(in crate::app) fn color(&self) -> Color32 {
        if self.is_center {
            CENTER_COLOR
        } else {
            self.bucket.color()
        }
    }
}

/// Position of a related account's node in the layout; the center node comes first.
pub(in crate::app) fn related_node_index(account_index: usize) -> usize {
    CENTER_NODE_INDEX + 1 + account_index
}

/// One center node followed by one node per related account, in account order,
/// seeded on a phyllotaxis spiral around the origin.
pub(in crate::app) fn build_nodes(snapshot: &WalletSnapshot) -> Vec<LayoutNode> {
    let weights = snapshot
        .related_accounts
        .iter()
        .map(|account| account.sol_amount())
        .collect::<Vec<_>>();
    let scale = RadiusScale::from_weights(weights.iter().copied());

    let mut nodes = Vec::with_capacity(weights.len() + 1);
    nodes.push(LayoutNode::center(&snapshot.address));
    for (index, (account, weight)) in snapshot.related_accounts.iter().zip(weights).enumerate() {
        nodes.push(LayoutNode::related(index, &account.address, weight, scale));
    }

    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    for (index, node) in nodes.iter_mut().enumerate() {
        let radius = INITIAL_RADIUS * (0.5 + index as f32).sqrt();
        let angle = index as f32 * golden_angle;
        node.position = vec2(angle.cos(), angle.sin()) * radius;
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::layout::scale::{MAX_RELATED_RADIUS, MIN_RELATED_RADIUS};
    use crate::wallet::{MIN_SOL_AMOUNT, RelatedAccount};

    fn snapshot(volumes: &[Option<&str>]) -> WalletSnapshot {
        WalletSnapshot {
            address: "CenterAddress1111111111111111111111111111111".to_owned(),
            is_valid: true,
            related_accounts: volumes
                .iter()
                .enumerate()
                .map(|(index, volume)| RelatedAccount {
                    address: format!("Related{index:0>37}"),
                    total_sol_volume: volume.map(str::to_owned),
                    ..RelatedAccount::default()
                })
                .collect(),
            ..WalletSnapshot::default()
        }
    }

    #[test]
    fn builds_one_center_and_one_node_per_account() {
        let nodes = build_nodes(&snapshot(&[Some("2.5 SOL"), None, Some("0.05 SOL")]));
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes.iter().filter(|node| node.is_center).count(), 1);
        assert_eq!(nodes[CENTER_NODE_INDEX].id, "main");
        assert_eq!(nodes[1].id, "related-0");
        assert_eq!(nodes[3].id, "related-2");
        assert_eq!(nodes[related_node_index(1)].account_index, Some(1));
        assert!(nodes.iter().all(|node| node.weight > 0.0));
    }

    #[test]
    fn high_volume_account_is_labelled_and_green() {
        let nodes = build_nodes(&snapshot(&[Some("2.5 SOL")]));
        let related = &nodes[1];
        assert_eq!(related.weight, 2.5);
        assert_eq!(related.bucket, VolumeBucket::High);
        assert_eq!(related.label.as_deref(), Some("Rela...0000"));
        assert_eq!(related.radius, MAX_RELATED_RADIUS);
    }

    #[test]
    fn missing_volume_is_floored_and_unlabelled() {
        let nodes = build_nodes(&snapshot(&[None]));
        let related = &nodes[1];
        assert_eq!(related.weight, MIN_SOL_AMOUNT);
        assert_eq!(related.bucket, VolumeBucket::Low);
        assert!(related.label.is_none());
        assert!(related.radius > MIN_RELATED_RADIUS && related.radius < 10.0);
    }

    #[test]
    fn center_radius_ignores_related_weights() {
        let small = build_nodes(&snapshot(&[Some("0.01 SOL")]));
        let large = build_nodes(&snapshot(&[Some("900 SOL")]));
        assert_eq!(small[0].radius, CENTER_RADIUS);
        assert_eq!(large[0].radius, CENTER_RADIUS);
        assert_eq!(small[0].color(), CENTER_COLOR);
        assert_eq!(small[0].label.as_deref(), Some("MAIN"));
    }

    #[test]
    fn seeds_distinct_positions() {
        let nodes = build_nodes(&snapshot(&[Some("1 SOL"); 12]));
        for (index, node) in nodes.iter().enumerate() {
            for other in &nodes[index + 1..] {
                assert!((node.position - other.position).length() > 1.0);
            }
        }
    }
}
