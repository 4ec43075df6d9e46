use super::*;
use crate::Error;
use petgraph::Direction::Outgoing;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;

/// The shared statistics tree grown by self-play.
///
/// Vertices hold a [`Node`]; edges are labelled by the message that was
/// exchanged to reach the child. The arena is a petgraph `StableDiGraph`,
/// so removing a subtree never invalidates the handles of surviving nodes.
///
/// # Ownership
///
/// Each node has at most one parent and at most one child per distinct
/// message. Destroying a node destroys everything below it. The root is
/// owned by the tree itself and replaced on every real move:
///
/// - `child(parent, message, create)` — Keyed lookup, optionally creating
/// - `unlink(parent, message)` — Detach a child without destroying it
/// - `prune(index)` — Destroy a node and its whole subtree
/// - `shift(message)` — Make the matching child the root, destroy the rest
#[derive(Debug)]
pub struct Tree<B>
where
    B: Body,
{
    graph: StableDiGraph<Node<B>, B::Message>,
    root: NodeIndex,
    mover: Turn,
    depth: usize,
}

impl<B> Tree<B>
where
    B: Body,
{
    /// A single empty root at which `mover` acts.
    pub fn new(mover: Turn) -> Self {
        let mut graph = StableDiGraph::default();
        let root = graph.add_node(Node::default());
        Self {
            graph,
            root,
            mover,
            depth: 0,
        }
    }
    pub fn root(&self) -> NodeIndex {
        self.root
    }
    /// The role acting at the root.
    pub fn mover(&self) -> Turn {
        self.mover
    }
    /// Number of real moves the root has been shifted by.
    pub fn depth(&self) -> usize {
        self.depth
    }
    /// Number of live nodes.
    pub fn n(&self) -> usize {
        self.graph.node_count()
    }
    /// Number of entries across all live nodes.
    pub fn entries(&self) -> usize {
        self.graph
            .node_indices()
            .map(|i| self.graph[i].entries().count())
            .sum()
    }
    pub fn contains(&self, index: NodeIndex) -> bool {
        self.graph.contains_node(index)
    }
    pub fn at(&self, index: NodeIndex) -> &Node<B> {
        &self.graph[index]
    }
    pub fn at_mut(&mut self, index: NodeIndex) -> &mut Node<B> {
        &mut self.graph[index]
    }
    pub fn head(&self) -> &Node<B> {
        self.at(self.root)
    }
    /// Child reached from `parent` by `message`, without creating it.
    pub fn follow(&self, parent: NodeIndex, message: &B::Message) -> Option<NodeIndex> {
        self.graph
            .edges_directed(parent, Outgoing)
            .find(|edge| edge.weight() == message)
            .map(|edge| edge.target())
    }
    /// Child reached from `parent` by `message`, created if absent and `create` is set.
    pub fn child(
        &mut self,
        parent: NodeIndex,
        message: &B::Message,
        create: bool,
    ) -> Option<NodeIndex> {
        match (self.follow(parent, message), create) {
            (Some(child), _) => Some(child),
            (None, false) => None,
            (None, true) => {
                let child = self.graph.add_node(Node::default());
                self.graph.add_edge(parent, child, message.clone());
                Some(child)
            }
        }
    }
    /// All `(message, child)` pairs below `parent`.
    pub fn children(&self, parent: NodeIndex) -> Vec<(B::Message, NodeIndex)> {
        self.graph
            .edges_directed(parent, Outgoing)
            .map(|edge| (edge.weight().clone(), edge.target()))
            .collect()
    }
    /// Detaches the child reached by `message` and returns it, leaving
    /// its subtree intact. `None` if no such child exists.
    pub fn unlink(&mut self, parent: NodeIndex, message: &B::Message) -> Option<NodeIndex> {
        let edge = self
            .graph
            .edges_directed(parent, Outgoing)
            .find(|edge| edge.weight() == message)
            .map(|edge| edge.id())?;
        let (_, child) = self.graph.edge_endpoints(edge)?;
        self.graph.remove_edge(edge);
        Some(child)
    }
    /// Destroys `index` and every node reachable below it.
    pub fn prune(&mut self, index: NodeIndex) {
        let mut stack = vec![index];
        while let Some(node) = stack.pop() {
            stack.extend(self.graph.neighbors_directed(node, Outgoing));
            self.graph.remove_node(node);
        }
    }
    /// Advances the root along a real move.
    ///
    /// The matching child becomes the root; the old root and all of the
    /// new root's former siblings are destroyed. Fails if self-play never
    /// produced `message` here, in which case the tree is left untouched.
    pub fn shift(&mut self, message: &B::Message) -> Result<NodeIndex, Error> {
        let next = self
            .unlink(self.root, message)
            .ok_or_else(|| Error::OffTree {
                message: format!("{:?}", message),
            })?;
        self.prune(self.root);
        self.root = next;
        self.mover = self.mover.other();
        self.depth += 1;
        Ok(next)
    }
    /// display the Tree in a human-readable format
    /// be careful because it's really big and recursive
    fn show(&self, f: &mut std::fmt::Formatter, x: NodeIndex, prefix: &str) -> std::fmt::Result {
        if x == self.root {
            writeln!(f, "\nROOT   {} {}", self.mover, self.at(x))?;
        }
        let children = self.children(x);
        let n = children.len();
        for (i, (message, child)) in children.into_iter().rev().enumerate() {
            let last = i == n - 1;
            let gaps = if last { "    " } else { "│   " };
            let stem = if last { "└" } else { "├" };
            writeln!(f, "{}{}──{:?} → {}", prefix, stem, message, self.at(child))?;
            self.show(f, child, &format!("{}{}", prefix, gaps))?;
        }
        Ok(())
    }
}

impl<B> std::fmt::Display for Tree<B>
where
    B: Body,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.show(f, self.root, "")
    }
}
