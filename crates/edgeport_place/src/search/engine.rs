//! The search driver.
//!
//! Each top-level iteration descends the tree (expanding the next untried
//! action or following the best search value), runs an annealed rollout from
//! the node it reaches, and backpropagates the rollout cost to the root. The
//! global iteration counter starts at 1 and advances exactly once per
//! top-level iteration; it is threaded into every move and into the
//! exploration term.
//!
//! Extraction follows the best mean rollout cost from the root, not the
//! cheapest configuration ever seen, so the extracted leaf can cost more than
//! the root on designs where the first moves already sit near a local
//! minimum.

use crate::action::ActionSet;
use crate::configuration::Configuration;
use crate::design::Design;
use crate::ids::NodeId;
use crate::search::rollout::{anneal, AnnealSchedule, Rollout};
use crate::search::tree::SearchTree;
use edgeport_config::SearchConfig;
use edgeport_diagnostics::{Diagnostic, DiagnosticSink};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::time::Instant;

/// Snapshot handed to the `run_with` callback after every iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchProgress {
    /// Number of completed top-level iterations.
    pub completed: u64,
    /// Configured iteration budget.
    pub budget: u64,
    /// Realized rollout cost of the last iteration.
    pub cost: f64,
    /// Depth the last rollout reached.
    pub depth: u64,
    /// Uphill moves the last rollout kept.
    pub uphill_kept: u64,
    /// Uphill moves the last rollout undid.
    pub rejected: u64,
    /// Current number of tree nodes.
    pub nodes: usize,
}

/// Summary of a finished search.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchReport {
    /// Realized rollout cost of every top-level iteration, in order.
    pub costs: Vec<f64>,
    /// Total cost of the root configuration.
    pub initial_cost: f64,
    /// Total cost of the extracted configuration.
    pub final_cost: f64,
    /// Wall-clock time spent searching.
    pub elapsed_secs: f64,
    /// Completed top-level iterations.
    pub iterations: u64,
    /// Tree size at the end of the search.
    pub nodes: usize,
    /// Deepest depth any rollout reached.
    pub deepest_rollout: u64,
    /// Uphill moves kept, summed over all rollouts.
    pub uphill_kept: u64,
    /// Uphill moves undone, summed over all rollouts.
    pub rejected: u64,
    /// Whether the callback stopped the search before the budget ran out.
    pub stopped_early: bool,
}

/// Monte Carlo tree search over port moves of one design.
pub struct SearchEngine<'d> {
    design: &'d Design,
    settings: SearchConfig,
    actions: ActionSet,
    tree: SearchTree,
    iteration: u64,
    rng: StdRng,
    costs: Vec<f64>,
    depth_bound_hits: u64,
}

impl<'d> SearchEngine<'d> {
    /// Builds the root from the design's initial assignment and fixes the
    /// action set.
    ///
    /// The generator is seeded from `settings.seed` when present.
    pub fn new(design: &'d Design, settings: &SearchConfig) -> Self {
        let root = design.initial_configuration();
        let actions = ActionSet::from_configuration(&root);
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            design,
            settings: settings.clone(),
            actions,
            tree: SearchTree::new(root),
            iteration: 1,
            rng,
            costs: Vec::new(),
            depth_bound_hits: 0,
        }
    }

    /// The fixed action set.
    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    /// The search tree built so far.
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Current value of the global iteration counter.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Descends from the root to the node the next rollout starts from.
    ///
    /// Returns the node and its depth. A node with fewer children than there
    /// are actions gets its next child expanded and returned. A childless node
    /// with nothing to expand is returned as is. If `max_depth` descents pass
    /// without expanding, the node reached is returned.
    fn tree_policy(&mut self) -> (NodeId, u64) {
        let exploration = self.settings.exploration;
        let iteration = self.iteration;
        let mut current = self.tree.root();

        for _ in 0..self.settings.max_depth {
            let expanded = self.tree.node(current).children().len();
            if expanded < self.actions.len() {
                let action = self.actions.get(expanded);
                let child = self.tree.expand(current, action, iteration);
                return (child, u64::from(self.tree.node(child).depth()));
            }
            match self
                .tree
                .best_child(current, |node| node.search_value(exploration, iteration))
            {
                Some(next) => current = next,
                None => return (current, u64::from(self.tree.node(current).depth())),
            }
        }

        self.depth_bound_hits += 1;
        (current, u64::from(self.tree.node(current).depth()))
    }

    /// Runs one top-level iteration and returns its rollout.
    pub fn step(&mut self) -> Rollout {
        let (node, depth) = self.tree_policy();
        let schedule = AnnealSchedule {
            trials: depth * u64::from(self.settings.rollout_trials),
            temperature: depth as f64 * self.settings.rollout_temperature,
            penalty: self.settings.penalty,
            iteration: self.iteration,
        };
        let rollout = anneal(
            self.tree.node(node).configuration(),
            self.design.connectivity(),
            &self.actions,
            &schedule,
            depth,
            &mut self.rng,
        );

        self.tree.backpropagate(node, rollout.cost);
        self.costs.push(rollout.cost);
        self.iteration += 1;
        rollout
    }

    /// Runs the full iteration budget.
    pub fn run(&mut self, sink: &DiagnosticSink) -> SearchReport {
        self.run_with(sink, |_| true)
    }

    /// Runs the iteration budget, calling `keep_going` after every iteration.
    ///
    /// Returning `false` stops the search; the iteration that just finished
    /// has already been backpropagated.
    pub fn run_with<F>(&mut self, sink: &DiagnosticSink, mut keep_going: F) -> SearchReport
    where
        F: FnMut(&SearchProgress) -> bool,
    {
        let start = Instant::now();
        let design = self.design;
        let connectivity = design.connectivity();
        let penalty = self.settings.penalty;
        let initial_cost = self
            .tree
            .node(self.tree.root())
            .configuration()
            .total_cost(connectivity, penalty);

        if self.actions.is_empty() {
            sink.emit(
                Diagnostic::note(301, "design has no ports to place")
                    .with_note("the initial configuration is returned unchanged"),
            );
        }

        let budget = u64::from(self.settings.iterations);
        let first = self.costs.len();
        let mut stopped_early = false;
        let (mut deepest_rollout, mut uphill_kept, mut rejected) = (0u64, 0u64, 0u64);
        for _ in 0..budget {
            let rollout = self.step();
            deepest_rollout = deepest_rollout.max(rollout.depth);
            uphill_kept += rollout.uphill_kept;
            rejected += rollout.rejected;
            let progress = SearchProgress {
                completed: (self.costs.len() - first) as u64,
                budget,
                cost: rollout.cost,
                depth: rollout.depth,
                uphill_kept: rollout.uphill_kept,
                rejected: rollout.rejected,
                nodes: self.tree.len(),
            };
            if !keep_going(&progress) {
                stopped_early = progress.completed < budget;
                break;
            }
        }

        if self.depth_bound_hits > 0 {
            sink.emit(
                Diagnostic::note(
                    302,
                    format!(
                        "depth bound of {} reached in {} iteration(s)",
                        self.settings.max_depth, self.depth_bound_hits
                    ),
                )
                .with_help("raise `search.max_depth` to let the tree grow deeper"),
            );
        }

        let final_cost = self
            .best_configuration()
            .total_cost(connectivity, penalty);
        let costs = self.costs[first..].to_vec();
        SearchReport {
            iterations: costs.len() as u64,
            costs,
            initial_cost,
            final_cost,
            elapsed_secs: start.elapsed().as_secs_f64(),
            nodes: self.tree.len(),
            deepest_rollout,
            uphill_kept,
            rejected,
            stopped_early,
        }
    }

    /// The leaf reached by always following the best traversal value.
    pub fn best_leaf(&self) -> NodeId {
        self.tree.best_leaf()
    }

    /// The configuration at [`best_leaf`](Self::best_leaf).
    pub fn best_configuration(&self) -> &Configuration {
        self.tree.node(self.best_leaf()).configuration()
    }
}
