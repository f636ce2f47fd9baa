//! Reachability graph over the `packages` section.
//!
//! Requirements and packages are both nodes in one arena-backed [`DiGraph`]:
//!
//! - a requirement points at the package it resolves to (through `specifiers`,
//!   or directly when it names a package identity);
//! - a JSR package points at each requirement it depends on;
//! - an npm package points straight at each npm package it depends on.
//!
//! Walking it from the workspace's declared requirements with an explicit
//! frontier and visit map yields exactly the entries worth keeping. Cycles
//! terminate because each node is visited once.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{VisitMap, Visitable};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::trace;

use super::content::{PackageId, PackagesContent};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GraphNode {
    Req(String),
    Package(PackageId),
}

/// Dependency graph of one [`PackagesContent`].
pub struct PackageGraph<'a> {
    packages: &'a PackagesContent,
    graph: DiGraph<GraphNode, ()>,
    node_map: HashMap<GraphNode, NodeIndex>,
}

impl<'a> PackageGraph<'a> {
    /// Build the graph for every specifier and package entry.
    pub fn build(packages: &'a PackagesContent) -> Self {
        let mut this = Self {
            packages,
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        };

        for req in packages.specifiers.keys() {
            this.add_requirement(req);
        }

        for (id, info) in &packages.jsr {
            let from = this.ensure_node(GraphNode::Package(PackageId::Jsr(id.clone())));
            for req in &info.dependencies {
                let to = this.add_requirement(req);
                this.graph.update_edge(from, to, ());
            }
        }

        for (id, info) in &packages.npm {
            let from = this.ensure_node(GraphNode::Package(PackageId::Npm(id.clone())));
            for dep_id in info.dependencies.values() {
                if packages.npm.contains_key(dep_id) {
                    let to = this.ensure_node(GraphNode::Package(PackageId::Npm(dep_id.clone())));
                    this.graph.update_edge(from, to, ());
                } else {
                    trace!("npm package '{id}' depends on missing '{dep_id}'");
                }
            }
        }

        this
    }

    fn ensure_node(&mut self, node: GraphNode) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&node) {
            index
        } else {
            let index = self.graph.add_node(node.clone());
            self.node_map.insert(node, index);
            index
        }
    }

    /// Add a requirement node with an edge to the package it resolves to, if any.
    fn add_requirement(&mut self, req: &str) -> NodeIndex {
        let node = GraphNode::Req(req.to_string());
        if let Some(&index) = self.node_map.get(&node) {
            return index;
        }
        let index = self.ensure_node(node);
        if let Some(id) = self.packages.resolve_req(req) {
            let target = self.ensure_node(GraphNode::Package(id));
            self.graph.add_edge(index, target, ());
        }
        index
    }

    /// Number of requirement and package nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Collect everything reachable from `roots`.
    ///
    /// A root that is neither a specifier key nor anything's dependency is
    /// tried as a package identity; a root that resolves to nothing is ignored.
    pub fn reachable<I, S>(&self, roots: I) -> Reachable
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut visited = self.graph.visit_map();
        let mut pending = VecDeque::new();

        for root in roots {
            let root = root.as_ref();
            let start = self
                .node_map
                .get(&GraphNode::Req(root.to_string()))
                .copied()
                .or_else(|| {
                    self.packages
                        .resolve_id(root)
                        .and_then(|id| self.node_map.get(&GraphNode::Package(id)).copied())
                });
            match start {
                Some(index) => pending.push_back(index),
                None => trace!("workspace requirement '{root}' resolves to nothing"),
            }
        }

        let mut reachable = Reachable::default();
        while let Some(index) = pending.pop_front() {
            if !visited.visit(index) {
                continue;
            }
            match &self.graph[index] {
                GraphNode::Req(req) => {
                    // only resolved specifiers are kept
                    if self.packages.specifiers.contains_key(req)
                        && self.graph.neighbors(index).next().is_some()
                    {
                        reachable.specifiers.insert(req.clone());
                    }
                }
                GraphNode::Package(id) => {
                    reachable.packages.insert(id.clone());
                }
            }
            pending.extend(self.graph.neighbors(index).filter(|next| !visited.is_visited(next)));
        }

        reachable
    }
}

/// Result of a reachability walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reachable {
    specifiers: HashSet<String>,
    packages: HashSet<PackageId>,
}

impl Reachable {
    pub fn contains_specifier(&self, req: &str) -> bool {
        self.specifiers.contains(req)
    }

    pub fn contains_package(&self, id: &PackageId) -> bool {
        self.packages.contains(id)
    }

    /// Number of reached packages across both ecosystems.
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Copy of `packages` restricted to the reached entries.
    pub fn retain(&self, packages: &PackagesContent) -> PackagesContent {
        PackagesContent {
            specifiers: packages
                .specifiers
                .iter()
                .filter(|(req, _)| self.specifiers.contains(*req))
                .map(|(req, id)| (req.clone(), id.clone()))
                .collect(),
            jsr: packages
                .jsr
                .iter()
                .filter(|(id, _)| self.packages.contains(&PackageId::Jsr((*id).clone())))
                .map(|(id, info)| (id.clone(), info.clone()))
                .collect(),
            npm: packages
                .npm
                .iter()
                .filter(|(id, _)| self.packages.contains(&PackageId::Npm((*id).clone())))
                .map(|(id, info)| (id.clone(), info.clone()))
                .collect(),
        }
    }
}
