//! Search-tree storage and node statistics.
//!
//! Nodes live in an arena and link to their parent by [`NodeId`]. Each node
//! exclusively owns a full [`Configuration`]; children are kept in insertion
//! order, which is also action order.

use crate::action::Action;
use crate::configuration::Configuration;
use crate::ids::NodeId;
use edgeport_common::Arena;

/// Visit count substituted for zero so node values stay finite.
pub const UNVISITED_EPSILON: f64 = 1e-10;

/// Value a child must beat to be selected.
const VALUE_FLOOR: f64 = -1e12;

/// One node of the search tree.
#[derive(Debug)]
pub struct SearchNode {
    configuration: Configuration,
    visits: u32,
    cost_sum: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: u32,
}

impl SearchNode {
    /// The placement this node represents.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Number of rollouts backpropagated through this node.
    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// Sum of the costs of those rollouts.
    pub fn cost_sum(&self) -> f64 {
        self.cost_sum
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in creation order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Distance from the root.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    fn effective_visits(&self) -> f64 {
        if self.visits > 0 {
            f64::from(self.visits)
        } else {
            UNVISITED_EPSILON
        }
    }

    /// Pure exploitation value: negated mean rollout cost.
    pub fn traversal_value(&self) -> f64 {
        -(self.cost_sum / self.effective_visits())
    }

    /// Exploitation plus the UCB exploration bonus at global iteration
    /// `iteration`.
    pub fn search_value(&self, exploration: f64, iteration: u64) -> f64 {
        let visits = self.effective_visits();
        let bonus = (2.0 * (iteration as f64).ln() / visits).sqrt();
        -(self.cost_sum / visits) + exploration * bonus
    }
}

/// Arena-backed tree of configurations.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Arena<NodeId, SearchNode>,
    root: NodeId,
}

impl SearchTree {
    /// Creates a tree holding only `root`.
    pub fn new(root: Configuration) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(SearchNode {
            configuration: root,
            visits: 0,
            cost_sum: 0.0,
            parent: None,
            children: Vec::new(),
            depth: 0,
        });
        Self { nodes, root }
    }

    /// The root node's ID.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node with the given ID.
    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id]
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clones `parent`'s configuration, applies `action` to the clone, and
    /// attaches it as `parent`'s newest child one level deeper.
    pub fn expand(&mut self, parent: NodeId, action: Action, iteration: u64) -> NodeId {
        let source = &self.nodes[parent];
        let mut configuration = source.configuration.clone();
        let depth = source.depth + 1;
        configuration.apply(action, iteration);

        let child = self.nodes.alloc(SearchNode {
            configuration,
            visits: 0,
            cost_sum: 0.0,
            parent: Some(parent),
            children: Vec::new(),
            depth,
        });
        self.nodes[parent].children.push(child);
        child
    }

    /// The child of `id` with the highest `value`, first one on ties.
    ///
    /// A child is only picked if it beats a fixed floor of `-1e12`; if none
    /// does, the first child is returned. `None` if `id` has no children.
    pub fn best_child(&self, id: NodeId, value: impl Fn(&SearchNode) -> f64) -> Option<NodeId> {
        let children = &self.nodes[id].children;
        let mut best = *children.first()?;
        let mut best_value = VALUE_FLOOR;
        for &child in children {
            let v = value(&self.nodes[child]);
            if v > best_value {
                best_value = v;
                best = child;
            }
        }
        Some(best)
    }

    /// Adds one visit and `cost` to every node from `from` up to the root.
    pub fn backpropagate(&mut self, from: NodeId, cost: f64) {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = &mut self.nodes[id];
            node.visits += 1;
            node.cost_sum += cost;
            current = node.parent;
        }
    }

    /// Follows the best traversal value from the root to a childless node.
    pub fn best_leaf(&self) -> NodeId {
        let mut current = self.root;
        while let Some(next) = self.best_child(current, SearchNode::traversal_value) {
            current = next;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Direction;
    use crate::block::Block;
    use crate::connectivity::PortRef;
    use crate::geometry::Point;
    use crate::ids::BlockId;
    use edgeport_common::Ident;
    use edgeport_config::MoveConfig;

    fn configuration() -> Configuration {
        let corners = vec![
            Point::new(0, 0),
            Point::new(0, 40),
            Point::new(40, 40),
            Point::new(40, 0),
            Point::new(0, 0),
        ];
        let mut block = Block::from_outline(
            BlockId::from_raw(0),
            Ident::from_raw(0),
            corners,
            &MoveConfig::default(),
            10,
        )
        .unwrap();
        block.add_port(Ident::from_raw(1), 5).unwrap();
        Configuration::new(vec![block])
    }

    fn forward() -> Action {
        Action {
            port: PortRef::new(BlockId::from_raw(0), 0),
            direction: Direction::Forward,
        }
    }

    #[test]
    fn expand_clones_and_links() {
        let mut tree = SearchTree::new(configuration());
        let root = tree.root();
        let child = tree.expand(root, forward(), 1);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.node(root).children(), &[child]);
        assert_eq!(tree.node(child).parent(), Some(root));
        assert_eq!(tree.node(child).depth(), 1);

        let moved = tree.node(child).configuration().block(BlockId::from_raw(0));
        let untouched = tree.node(root).configuration().block(BlockId::from_raw(0));
        assert_eq!(moved.slot(0).position, 8);
        assert_eq!(untouched.slot(0).position, 0);
    }

    #[test]
    fn unvisited_values_stay_finite() {
        let tree = SearchTree::new(configuration());
        let root = tree.node(tree.root());
        assert_eq!(root.traversal_value(), 0.0);
        assert!(root.search_value(30.0, 1).is_finite());
        assert!(root.search_value(30.0, 5) > 1e5);
    }

    #[test]
    fn values_from_statistics() {
        let mut tree = SearchTree::new(configuration());
        let root = tree.root();
        tree.backpropagate(root, 10.0);
        tree.backpropagate(root, 20.0);
        let node = tree.node(root);
        assert_eq!(node.visits(), 2);
        assert_eq!(node.traversal_value(), -15.0);
        let expected = -15.0 + 3.0 * (2.0 * 4f64.ln() / 2.0).sqrt();
        assert!((node.search_value(3.0, 4) - expected).abs() < 1e-12);
        // ln(1) = 0: no exploration bonus on the first iteration.
        assert_eq!(node.search_value(3.0, 1), -15.0);
    }

    #[test]
    fn backpropagate_reaches_root() {
        let mut tree = SearchTree::new(configuration());
        let root = tree.root();
        let child = tree.expand(root, forward(), 1);
        let grandchild = tree.expand(child, forward(), 1);
        tree.backpropagate(grandchild, 7.5);
        for id in [root, child, grandchild] {
            assert_eq!(tree.node(id).visits(), 1);
            assert_eq!(tree.node(id).cost_sum(), 7.5);
        }
    }

    #[test]
    fn best_child_prefers_lower_mean_cost_and_first_on_ties() {
        let mut tree = SearchTree::new(configuration());
        let root = tree.root();
        let a = tree.expand(root, forward(), 1);
        let b = tree.expand(root, forward().reversed(), 1);
        let c = tree.expand(root, forward(), 1);
        tree.backpropagate(a, 30.0);
        tree.backpropagate(b, 10.0);
        tree.backpropagate(c, 10.0);
        assert_eq!(tree.best_child(root, SearchNode::traversal_value), Some(b));
        assert_eq!(tree.best_leaf(), b);
    }

    #[test]
    fn best_child_falls_back_to_first_below_floor() {
        let mut tree = SearchTree::new(configuration());
        let root = tree.root();
        let a = tree.expand(root, forward(), 1);
        let b = tree.expand(root, forward(), 1);
        tree.backpropagate(a, 5e12);
        tree.backpropagate(b, 2e12);
        assert_eq!(tree.best_child(root, SearchNode::traversal_value), Some(a));
        assert_eq!(tree.best_child(a, SearchNode::traversal_value), None);
    }
}
