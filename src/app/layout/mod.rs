use crate::wallet::WalletSnapshot;

mod forces;
mod nodes;
mod quadtree;
mod scale;
mod simulation;

pub(in crate::app) use nodes::{LayoutNode, related_node_index};
pub(in crate::app) use scale::{CENTER_COLOR, VolumeBucket};
use simulation::{Simulation, SimulationConfig, SimulationState};

pub const DEFAULT_MAX_STEPS: usize = 300;

/// Identifies one loaded snapshot. Ticks carry the generation they were issued
/// for so that work addressed to a replaced snapshot is discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(in crate::app) struct Generation(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum MapStatus {
    Empty,
    InvalidAddress,
    NoNetworkData,
    Running,
    Settled,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum TickOutcome {
    Moved,
    Settled,
    /// The tick named a generation that is no longer loaded.
    Stale,
    /// Nothing to advance: empty state, or the layout already settled or stopped.
    Idle,
}

enum MapView {
    Empty,
    InvalidAddress,
    NoNetworkData,
    Network(Simulation),
}

pub(in crate::app) struct LayoutEngine {
    generation: Generation,
    view: MapView,
    config: SimulationConfig,
}

impl LayoutEngine {
    pub(in crate::app) fn new(max_steps: usize) -> Self {
        Self {
            generation: Generation::default(),
            view: MapView::Empty,
            config: SimulationConfig::default().with_max_steps(max_steps),
        }
    }

    /// Replaces the current layout with one built from `snapshot`.
    ///
    /// The previous simulation is stopped before any new node exists.
    pub(in crate::app) fn load(&mut self, snapshot: &WalletSnapshot) -> Generation {
        self.stop();
        self.generation = Generation(self.generation.0 + 1);

        self.view = if !snapshot.is_valid {
            tracing::info!(address = %snapshot.address, "snapshot marked invalid, nothing to lay out");
            MapView::InvalidAddress
        } else if snapshot.related_accounts.is_empty() {
            tracing::info!(address = %snapshot.address, "snapshot has no related accounts");
            MapView::NoNetworkData
        } else {
            let nodes = nodes::build_nodes(snapshot);
            tracing::info!(
                address = %snapshot.address,
                nodes = nodes.len(),
                generation = self.generation.0,
                "starting layout simulation"
            );
            MapView::Network(Simulation::new(nodes, self.config))
        };

        self.generation
    }

    pub(in crate::app) fn stop(&mut self) {
        if let MapView::Network(simulation) = &mut self.view {
            simulation.stop();
        }
    }

    /// Drops the current layout, e.g. while a new snapshot is being fetched.
    pub(in crate::app) fn clear(&mut self) {
        self.stop();
        self.generation = Generation(self.generation.0 + 1);
        self.view = MapView::Empty;
    }

    pub(in crate::app) fn status(&self) -> MapStatus {
        match &self.view {
            MapView::Empty => MapStatus::Empty,
            MapView::InvalidAddress => MapStatus::InvalidAddress,
            MapView::NoNetworkData => MapStatus::NoNetworkData,
            MapView::Network(simulation) => match simulation.state() {
                SimulationState::Running => MapStatus::Running,
                SimulationState::Settled => MapStatus::Settled,
                SimulationState::Stopped => MapStatus::Stopped,
            },
        }
    }

    /// Nodes of the current generation, or `None` for a stale generation or an
    /// empty state.
    pub(in crate::app) fn nodes(&self, generation: Generation) -> Option<&[LayoutNode]> {
        if generation != self.generation {
            return None;
        }
        match &self.view {
            MapView::Network(simulation) => Some(simulation.nodes()),
            _ => None,
        }
    }

    pub(in crate::app) fn tick(&mut self, generation: Generation) -> TickOutcome {
        if generation != self.generation {
            tracing::trace!(
                requested = generation.0,
                current = self.generation.0,
                "dropping tick for stale generation"
            );
            return TickOutcome::Stale;
        }

        let MapView::Network(simulation) = &mut self.view else {
            return TickOutcome::Idle;
        };
        if !simulation.step() {
            return TickOutcome::Idle;
        }
        match simulation.state() {
            SimulationState::Running => TickOutcome::Moved,
            _ => TickOutcome::Settled,
        }
    }
}
