//! Similarity graph over model elements.
//!
//! Nodes are elements in insertion order, each tagged with the nouns, verbs and
//! entities of its name. An undirected edge joins two elements whose name
//! similarity reaches the clustering threshold.

use indexmap::IndexMap;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::{Graph, Undirected};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::config::DEFAULT_CLUSTERING_THRESHOLD;
use crate::core::model::{ElementKind, ModelElement};
use crate::linguistic::cache::FeatureCache;
use crate::linguistic::features::SemanticProperties;

use super::cosine::semantic_similarity;

/// Node payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticNode {
    pub id: String,
    pub name: String,
    pub kind: ElementKind,
    pub properties: SemanticProperties,
}

/// Graph statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub isolated_nodes: usize,
}

/// Serializable edge listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Weighted undirected similarity graph
#[derive(Debug, Clone)]
pub struct SemanticGraph {
    graph: Graph<SemanticNode, f64, Undirected>,
    id_to_node: IndexMap<String, NodeIndex>,
    threshold: f64,
}

impl SemanticGraph {
    /// Build the graph over `elements`.
    ///
    /// Every unordered pair is scored once; edges are inserted in pair order
    /// regardless of `parallel`.
    pub fn build(
        elements: &[&ModelElement],
        cache: &FeatureCache,
        threshold: f64,
        parallel: bool,
    ) -> Self {
        let mut graph = Graph::new_undirected();
        let mut id_to_node = IndexMap::with_capacity(elements.len());

        for element in elements {
            let node = graph.add_node(SemanticNode {
                id: element.id.clone(),
                name: element.name.clone(),
                kind: element.kind(),
                properties: cache.semantic_properties(&element.name),
            });
            id_to_node.insert(element.id.clone(), node);
        }

        let n = elements.len();
        let score = |i: usize, j: usize| (i, j, semantic_similarity(&elements[i].name, &elements[j].name));
        let scored: Vec<(usize, usize, f64)> = if parallel {
            (0..n)
                .into_par_iter()
                .flat_map_iter(|i| (i + 1..n).map(move |j| score(i, j)))
                .collect()
        } else {
            (0..n)
                .flat_map(|i| (i + 1..n).map(move |j| score(i, j)))
                .collect()
        };

        for (i, j, similarity) in scored {
            if similarity >= threshold {
                debug!(
                    "Linking '{}' and '{}' (similarity {:.3})",
                    elements[i].name, elements[j].name, similarity
                );
                graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), similarity);
            }
        }

        info!(
            "Built semantic graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Self {
            graph,
            id_to_node,
            threshold,
        }
    }

    pub fn graph(&self) -> &Graph<SemanticNode, f64, Undirected> {
        &self.graph
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node(&self, id: &str) -> Option<&SemanticNode> {
        self.id_to_node.get(id).map(|idx| &self.graph[*idx])
    }

    /// Element ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.id_to_node.keys().map(String::as_str)
    }

    /// Edge weight between two elements, if linked
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let (a, b) = (*self.id_to_node.get(a)?, *self.id_to_node.get(b)?);
        self.graph.find_edge(a, b).map(|e| self.graph[e])
    }

    pub fn edges(&self) -> Vec<SimilarityEdge> {
        self.graph
            .edge_references()
            .map(|edge| SimilarityEdge {
                source: self.graph[edge.source()].id.clone(),
                target: self.graph[edge.target()].id.clone(),
                weight: *edge.weight(),
            })
            .collect()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            total_nodes: self.graph.node_count(),
            total_edges: self.graph.edge_count(),
            isolated_nodes: self
                .graph
                .node_indices()
                .filter(|n| self.graph.neighbors(*n).next().is_none())
                .count(),
        }
    }
}

/// Graph over `elements` at the default clustering threshold
pub fn build_semantic_graph(elements: &[&ModelElement], cache: &FeatureCache) -> SemanticGraph {
    SemanticGraph::build(elements, cache, DEFAULT_CLUSTERING_THRESHOLD, false)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::linguistic::lexicon::LexiconTagger;

    fn elements() -> Vec<ModelElement> {
        vec![
            ModelElement::use_case("uc1", "Withdraw Cash"),
            ModelElement::class("c1", "Cash Withdraw"),
            ModelElement::use_case("uc2", "Check Balance"),
            ModelElement::actor("a1", "Customer"),
            ModelElement::class("c2", "Balance Check"),
        ]
    }

    fn build(parallel: bool) -> SemanticGraph {
        let owned = elements();
        let refs: Vec<&ModelElement> = owned.iter().collect();
        let cache = FeatureCache::new(Arc::new(LexiconTagger::default()));
        SemanticGraph::build(&refs, &cache, 0.75, parallel)
    }

    #[test]
    fn test_edges_follow_threshold() {
        let graph = build(false);

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_weight("uc1", "c1"), Some(1.0));
        assert_eq!(graph.edge_weight("c1", "uc1"), Some(1.0));
        assert_eq!(graph.edge_weight("uc1", "uc2"), None);
        assert_eq!(
            graph.stats(),
            GraphStats {
                total_nodes: 5,
                total_edges: 2,
                isolated_nodes: 1
            }
        );
    }

    #[test]
    fn test_parallel_build_matches_sequential() {
        assert_eq!(build(true).edges(), build(false).edges());
    }

    #[test]
    fn test_nodes_carry_semantic_properties() {
        let graph = build(false);
        let node = graph.node("uc1").unwrap();
        assert_eq!(node.kind, ElementKind::UseCase);
        assert_eq!(node.properties.verbs, vec!["Withdraw".to_string()]);
        assert_eq!(node.properties.nouns, vec!["Cash".to_string()]);
        assert_eq!(
            graph.node_ids().collect::<Vec<_>>(),
            vec!["uc1", "c1", "uc2", "a1", "c2"]
        );
    }

    #[test]
    fn test_empty_graph() {
        let cache = FeatureCache::new(Arc::new(LexiconTagger::default()));
        let graph = SemanticGraph::build(&[], &cache, 0.75, true);
        assert_eq!(graph.node_count(), 0);
        assert!(graph.edges().is_empty());
    }
}
