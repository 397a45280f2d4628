use eframe::egui::Vec2;

use super::forces::{
    ChargeParams, CollisionParams, accumulate_charge, accumulate_collisions, tie_breaker,
};
use super::nodes::LayoutNode;
use super::quadtree::QuadNode;

const RELAX_MAX_PASSES: usize = 2_000;
const RELAX_TOLERANCE: f32 = 0.01;

#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct SimulationConfig {
    pub(in crate::app) charge_strength: f32,
    pub(in crate::app) theta: f32,
    pub(in crate::app) collision_strength: f32,
    pub(in crate::app) alpha_min: f32,
    pub(in crate::app) alpha_decay: f32,
    pub(in crate::app) velocity_decay: f32,
    pub(in crate::app) settle_speed: f32,
    pub(in crate::app) max_steps: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            charge_strength: -100.0,
            theta: 0.9,
            collision_strength: 1.0,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            settle_speed: 0.01,
            max_steps: 300,
        }
    }
}

impl SimulationConfig {
    pub(in crate::app) fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum SimulationState {
    Running,
    Settled,
    Stopped,
}

#[derive(Default)]
struct Scratch {
    positions: Vec<Vec2>,
    radii: Vec<f32>,
    velocity_deltas: Vec<Vec2>,
}

/// Charge + centering + collision simulation over one snapshot's nodes.
///
/// Advanced one step per frame by the host; once settled or stopped, further
/// steps are no-ops and positions stay frozen.
pub(in crate::app) struct Simulation {
    nodes: Vec<LayoutNode>,
    config: SimulationConfig,
    alpha: f32,
    steps: usize,
    state: SimulationState,
    scratch: Scratch,
}

impl Simulation {
    pub(in crate::app) fn new(nodes: Vec<LayoutNode>, config: SimulationConfig) -> Self {
        Self {
            nodes,
            config,
            alpha: 1.0,
            steps: 0,
            state: SimulationState::Running,
            scratch: Scratch::default(),
        }
    }

    pub(in crate::app) fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub(in crate::app) fn state(&self) -> SimulationState {
        self.state
    }

    pub(in crate::app) fn stop(&mut self) {
        if self.state == SimulationState::Running {
            tracing::debug!(steps = self.steps, "simulation stopped before settling");
        }
        self.state = SimulationState::Stopped;
    }

    /// Advances one tick. Returns `false` without touching any node once the
    /// simulation has settled or been stopped.
    pub(in crate::app) fn step(&mut self) -> bool {
        if self.state != SimulationState::Running {
            return false;
        }

        let node_count = self.nodes.len();
        if node_count < 2 {
            self.settle();
            return false;
        }

        self.alpha += (0.0 - self.alpha) * self.config.alpha_decay;

        self.apply_charge();
        self.apply_centering();
        self.apply_collisions();

        let retained = 1.0 - self.config.velocity_decay;
        let mut max_speed_sq = 0.0_f32;
        for node in &mut self.nodes {
            node.velocity *= retained;
            node.position += node.velocity;
            max_speed_sq = max_speed_sq.max(node.velocity.length_sq());
        }
        self.steps += 1;

        let cooled = self.alpha < self.config.alpha_min;
        let still = self.steps > 1 && max_speed_sq < self.config.settle_speed.powi(2);
        let exhausted = self.steps >= self.config.max_steps;
        if cooled || still || exhausted {
            self.settle();
        }

        true
    }

    fn fill_positions(&mut self) {
        self.scratch.positions.clear();
        self.scratch
            .positions
            .extend(self.nodes.iter().map(|node| node.position));
        self.scratch.velocity_deltas.clear();
        self.scratch
            .velocity_deltas
            .resize(self.nodes.len(), Vec2::ZERO);
    }

    fn apply_charge(&mut self) {
        self.fill_positions();
        let Some(tree) = QuadNode::build(&self.scratch.positions) else {
            return;
        };

        let params = ChargeParams {
            strength: self.config.charge_strength * self.alpha,
            theta_sq: self.config.theta * self.config.theta,
        };
        for (index, delta) in self.scratch.velocity_deltas.iter_mut().enumerate() {
            accumulate_charge(&tree, index, &self.scratch.positions, params, delta);
        }

        for (node, delta) in self.nodes.iter_mut().zip(&self.scratch.velocity_deltas) {
            node.velocity += *delta;
        }
    }

    fn apply_centering(&mut self) {
        let centroid = self
            .nodes
            .iter()
            .fold(Vec2::ZERO, |sum, node| sum + node.position)
            / self.nodes.len() as f32;
        if centroid.length_sq() > 0.0 {
            for node in &mut self.nodes {
                node.position -= centroid;
            }
        }
    }

    fn apply_collisions(&mut self) {
        self.scratch.positions.clear();
        self.scratch
            .positions
            .extend(self.nodes.iter().map(|node| node.position + node.velocity));
        self.scratch.radii.clear();
        self.scratch
            .radii
            .extend(self.nodes.iter().map(|node| node.collision_radius));
        self.scratch.velocity_deltas.clear();
        self.scratch
            .velocity_deltas
            .resize(self.nodes.len(), Vec2::ZERO);

        let Some(tree) = QuadNode::build(&self.scratch.positions) else {
            return;
        };

        let max_radius = self.scratch.radii.iter().copied().fold(0.0_f32, f32::max);
        let max_reach = max_radius * 2.0;
        accumulate_collisions(
            &tree,
            &tree,
            true,
            &self.scratch.positions,
            &self.scratch.radii,
            CollisionParams {
                strength: self.config.collision_strength,
                max_reach_sq: max_reach * max_reach,
            },
            &mut self.scratch.velocity_deltas,
        );

        for (node, delta) in self.nodes.iter_mut().zip(&self.scratch.velocity_deltas) {
            node.velocity += *delta;
        }
    }

    fn settle(&mut self) {
        let passes = relax_overlaps(&mut self.nodes);
        self.apply_centering();
        for node in &mut self.nodes {
            node.velocity = Vec2::ZERO;
        }
        self.state = SimulationState::Settled;
        tracing::info!(
            steps = self.steps,
            alpha = self.alpha,
            relax_passes = passes,
            nodes = self.nodes.len(),
            "layout settled"
        );
    }
}

/// Projects residual collision overlaps apart until none exceeds the tolerance.
fn relax_overlaps(nodes: &mut [LayoutNode]) -> usize {
    for pass in 0..RELAX_MAX_PASSES {
        let mut worst_overlap = 0.0_f32;
        for first in 0..nodes.len() {
            for second in (first + 1)..nodes.len() {
                let reach = nodes[first].collision_radius + nodes[second].collision_radius;
                let delta = nodes[first].position - nodes[second].position;
                let distance = delta.length();
                if distance >= reach {
                    continue;
                }

                let overlap = reach - distance;
                worst_overlap = worst_overlap.max(overlap);
                let direction = if distance > 1e-4 {
                    delta / distance
                } else {
                    tie_breaker(first, second)
                };
                let shift = direction * (overlap * 0.5);
                nodes[first].position += shift;
                nodes[second].position -= shift;
            }
        }

        if worst_overlap <= RELAX_TOLERANCE {
            return pass;
        }
    }

    tracing::warn!(passes = RELAX_MAX_PASSES, "overlap relaxation did not converge");
    RELAX_MAX_PASSES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::layout::nodes::build_nodes;
    use crate::wallet::{RelatedAccount, WalletSnapshot};

    impl Simulation {
        fn run_to_settle(&mut self) -> usize {
            let start = self.steps;
            while self.step() {}
            self.steps - start
        }
    }

    fn snapshot_with(count: usize) -> WalletSnapshot {
        WalletSnapshot {
            address: "center".to_owned(),
            is_valid: true,
            related_accounts: (0..count)
                .map(|index| RelatedAccount {
                    address: format!("account-{index}"),
                    total_sol_volume: Some(format!("{} SOL", (index % 9) as f64 * 0.37)),
                    ..RelatedAccount::default()
                })
                .collect(),
            ..WalletSnapshot::default()
        }
    }

    fn assert_no_rendered_overlap(nodes: &[LayoutNode]) {
        for (index, node) in nodes.iter().enumerate() {
            for other in &nodes[index + 1..] {
                let distance = (node.position - other.position).length();
                assert!(
                    distance >= node.radius + other.radius,
                    "{} and {} overlap: distance {distance}, radii {} + {}",
                    node.id,
                    other.id,
                    node.radius,
                    other.radius
                );
            }
        }
    }

    #[test]
    fn settles_without_overlap() {
        for count in [1, 2, 7, 25, 50] {
            let mut simulation =
                Simulation::new(build_nodes(&snapshot_with(count)), SimulationConfig::default());
            let steps = simulation.run_to_settle();
            assert!(steps <= SimulationConfig::default().max_steps);
            assert_eq!(simulation.state(), SimulationState::Settled);
            assert_no_rendered_overlap(simulation.nodes());
        }
    }

    #[test]
    fn settled_layout_is_centered() {
        let mut simulation =
            Simulation::new(build_nodes(&snapshot_with(12)), SimulationConfig::default());
        simulation.run_to_settle();
        let centroid = simulation
            .nodes()
            .iter()
            .fold(Vec2::ZERO, |sum, node| sum + node.position)
            / simulation.nodes().len() as f32;
        assert!(centroid.length() < 1e-2, "centroid drifted to {centroid:?}");
    }

    #[test]
    fn step_budget_bounds_the_run() {
        let config = SimulationConfig::default().with_max_steps(5);
        let mut simulation = Simulation::new(build_nodes(&snapshot_with(30)), config);
        assert!(simulation.run_to_settle() <= 5);
        assert_eq!(simulation.state(), SimulationState::Settled);
        assert_no_rendered_overlap(simulation.nodes());
    }

    #[test]
    fn stopped_simulation_never_moves_again() {
        let mut simulation =
            Simulation::new(build_nodes(&snapshot_with(10)), SimulationConfig::default());
        assert!(simulation.step());
        simulation.stop();

        let frozen = simulation
            .nodes()
            .iter()
            .map(|node| node.position)
            .collect::<Vec<_>>();
        assert!(!simulation.step());
        assert_eq!(simulation.run_to_settle(), 0);
        assert_eq!(simulation.state(), SimulationState::Stopped);
        assert!(
            simulation
                .nodes()
                .iter()
                .zip(&frozen)
                .all(|(node, position)| node.position == *position)
        );
    }

    #[test]
    fn alpha_cools_within_default_budget() {
        let config = SimulationConfig::default();
        let mut alpha = 1.0_f32;
        for _ in 0..config.max_steps {
            alpha += (0.0 - alpha) * config.alpha_decay;
        }
        assert!(alpha <= config.alpha_min * 1.01);
    }
}
