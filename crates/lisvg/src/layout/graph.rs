//! Dependency graph and level assignment.
//!
//! Every distinct node ID of the diagram becomes one graph node, and every
//! edge one graph edge. Edge endpoints that were never declared are added
//! as graph nodes too, so in-degrees count every edge, but such nodes are
//! never placed.

use std::collections::{HashMap, HashSet};

use petgraph::{
    Direction as EdgeDirection,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use lisvg_core::ast::Diagram;

/// Node IDs grouped by level, each level in placement order.
pub(super) type Levels<'a> = Vec<Vec<&'a str>>;

#[derive(Debug)]
pub(super) struct DependencyGraph<'a> {
    graph: DiGraph<&'a str, ()>,
    /// Declared nodes are added first, so their indices are `0..declared`.
    declared: usize,
}

impl<'a> DependencyGraph<'a> {
    pub fn from_diagram(diagram: &'a Diagram) -> Self {
        let mut graph = DiGraph::new();
        let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

        for node in &diagram.nodes {
            indices
                .entry(node.id.as_str())
                .or_insert_with(|| graph.add_node(node.id.as_str()));
        }
        let declared = graph.node_count();

        for edge in &diagram.edges {
            let mut index_of = |id: &'a str| *indices.entry(id).or_insert_with(|| graph.add_node(id));
            let from = index_of(edge.from.as_str());
            let to = index_of(edge.to.as_str());
            graph.add_edge(from, to, ());
        }

        Self { graph, declared }
    }

    fn is_declared(&self, index: NodeIndex) -> bool {
        index.index() < self.declared
    }

    fn declared_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(|&index| self.is_declared(index))
    }

    /// Edge targets of `index` in edge declaration order.
    fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(index, EdgeDirection::Outgoing)
            .collect();
        edges.sort_by_key(|edge| edge.id());
        edges.into_iter().map(|edge| edge.target()).collect()
    }

    /// Assigns every declared node to exactly one level.
    ///
    /// Level 0 holds the declared nodes without incoming edges, or the first
    /// declared node if there are none. A node joins the next level once all
    /// of its incoming edges come from placed nodes. Declared nodes that are
    /// never released this way, because of cycles or undeclared parents, end
    /// up together in one final level in declaration order.
    ///
    /// A repeated ID occupies a single slot at its first declaration.
    pub fn levels(&self) -> Levels<'a> {
        let mut in_degree: Vec<isize> = self
            .graph
            .node_indices()
            .map(|index| {
                self.graph
                    .edges_directed(index, EdgeDirection::Incoming)
                    .count() as isize
            })
            .collect();

        let mut current: Vec<NodeIndex> = self
            .declared_nodes()
            .filter(|index| in_degree[index.index()] == 0)
            .collect();
        if current.is_empty() {
            current.extend(self.declared_nodes().take(1));
        }

        let mut placed: HashSet<NodeIndex> = current.iter().copied().collect();
        let mut levels: Vec<Vec<NodeIndex>> = Vec::new();

        while !current.is_empty() {
            let mut next = Vec::new();
            for &index in &current {
                for child in self.children(index) {
                    if placed.contains(&child) {
                        continue;
                    }
                    let degree = &mut in_degree[child.index()];
                    *degree -= 1;
                    if *degree <= 0 && self.is_declared(child) {
                        placed.insert(child);
                        next.push(child);
                    }
                }
            }
            levels.push(current);
            current = next;
        }

        let remaining: Vec<_> = self
            .declared_nodes()
            .filter(|index| !placed.contains(index))
            .collect();
        if !remaining.is_empty() {
            levels.push(remaining);
        }

        levels
            .into_iter()
            .map(|level| level.into_iter().map(|index| self.graph[index]).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use lisvg_core::ast::{Edge, Node};
    use proptest::prelude::*;

    use super::*;

    fn diagram(nodes: &[&str], edges: &[(&str, &str)]) -> Diagram {
        Diagram {
            nodes: nodes.iter().map(|id| Node::new(*id)).collect(),
            edges: edges.iter().map(|(from, to)| Edge::new(*from, *to)).collect(),
            ..Diagram::new()
        }
    }

    fn levels(nodes: &[&str], edges: &[(&str, &str)]) -> Vec<Vec<String>> {
        let diagram = diagram(nodes, edges);
        DependencyGraph::from_diagram(&diagram)
            .levels()
            .into_iter()
            .map(|level| level.into_iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_no_nodes() {
        assert!(levels(&[], &[("a", "b")]).is_empty());
    }

    #[test]
    fn test_linear_chain() {
        assert_eq!(
            levels(&["a", "b", "c"], &[("a", "b"), ("b", "c")]),
            vec![vec!["a"], vec!["b"], vec!["c"]]
        );
    }

    #[test]
    fn test_roots_in_declaration_order() {
        assert_eq!(
            levels(&["c", "a", "b"], &[("a", "b"), ("c", "b")]),
            vec![vec!["c", "a"], vec!["b"]]
        );
    }

    #[test]
    fn test_children_follow_edge_order() {
        assert_eq!(
            levels(
                &["root", "x", "y", "z"],
                &[("root", "z"), ("root", "x"), ("root", "y")]
            ),
            vec![vec!["root"], vec!["z", "x", "y"]]
        );
    }

    #[test]
    fn test_diamond_waits_for_all_parents() {
        assert_eq!(
            levels(
                &["a", "b", "c", "d"],
                &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]
            ),
            vec![vec!["a"], vec!["b", "c"], vec!["d"]]
        );
    }

    #[test]
    fn test_parallel_edges_promote_once() {
        assert_eq!(
            levels(&["a", "b"], &[("a", "b"), ("a", "b")]),
            vec![vec!["a"], vec!["b"]]
        );
    }

    #[test]
    fn test_all_cyclic_seeds_first_node() {
        assert_eq!(
            levels(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]),
            vec![vec!["a"], vec!["b"], vec!["c"]]
        );
    }

    #[test]
    fn test_cycle_below_root_goes_to_fallback_level() {
        assert_eq!(
            levels(
                &["r", "x", "y", "solo"],
                &[("r", "x"), ("x", "y"), ("y", "x")]
            ),
            vec![vec!["r", "solo"], vec!["x", "y"]]
        );
    }

    #[test]
    fn test_self_loop() {
        assert_eq!(levels(&["a"], &[("a", "a")]), vec![vec!["a"]]);
        assert_eq!(
            levels(&["a", "b"], &[("b", "b")]),
            vec![vec!["a"], vec!["b"]]
        );
    }

    #[test]
    fn test_undeclared_nodes_are_never_placed() {
        // `ghost` is not declared: it is never promoted, and its edge keeps
        // `b` from being released through the normal levels.
        assert_eq!(
            levels(&["a", "b"], &[("a", "ghost"), ("ghost", "b")]),
            vec![vec!["a"], vec!["b"]]
        );
        assert_eq!(
            levels(&["a", "b", "c"], &[("a", "c"), ("ghost", "b"), ("b", "c")]),
            vec![vec!["a"], vec!["b", "c"]]
        );
    }

    #[test]
    fn test_duplicate_ids_share_one_slot() {
        assert_eq!(
            levels(&["a", "b", "a"], &[("a", "b")]),
            vec![vec!["a"], vec!["b"]]
        );
    }

    /// Acyclic diagrams: every edge points from a lower to a higher index.
    fn acyclic_diagram() -> impl Strategy<Value = Diagram> {
        (1usize..8)
            .prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..16)))
            .prop_map(|(n, pairs)| {
                let ids: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
                let edges = pairs
                    .into_iter()
                    .filter(|(from, to)| from < to)
                    .map(|(from, to)| Edge::new(ids[from].as_str(), ids[to].as_str()))
                    .collect();
                Diagram {
                    nodes: ids.iter().map(|id| Node::new(id.as_str())).collect(),
                    edges,
                    ..Diagram::new()
                }
            })
    }

    proptest! {
        #[test]
        fn edges_point_to_deeper_levels(diagram in acyclic_diagram()) {
            let levels = DependencyGraph::from_diagram(&diagram).levels();
            let level_of: HashMap<&str, usize> = levels
                .iter()
                .enumerate()
                .flat_map(|(depth, level)| level.iter().map(move |id| (*id, depth)))
                .collect();

            prop_assert_eq!(level_of.len(), diagram.nodes.len());
            for edge in &diagram.edges {
                prop_assert!(
                    level_of[edge.from.as_str()] < level_of[edge.to.as_str()],
                    "edge {} -> {} in levels {:?}",
                    edge.from,
                    edge.to,
                    levels
                );
            }
        }
    }
}
