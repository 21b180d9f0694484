//! Community detection over the similarity graph.
//!
//! Greedy modularity agglomeration: every node starts in its own community and
//! the pair of adjacent communities with the largest modularity gain is merged
//! until no merge improves modularity. Communities are keyed by their lowest
//! node index and candidate pairs are scanned in ascending key order, so equal
//! gains always resolve toward the lowest node ids and results are
//! reproducible run to run.

use std::collections::BTreeMap;

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::graph::SemanticGraph;

/// Gains closer than this are treated as ties
const GAIN_EPSILON: f64 = 1e-12;

/// One detected cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticCluster {
    /// Position of the cluster in the output
    pub id: usize,
    /// Element ids in insertion order
    pub members: Vec<String>,
    /// Total weight of edges inside the cluster
    pub internal_weight: f64,
}

/// Clustering result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterDetection {
    /// Disjoint clusters covering every node, ordered by lowest member
    pub clusters: Vec<SemanticCluster>,
    /// Modularity of the final partition
    pub modularity: f64,
    /// Number of merges performed
    pub merges: usize,
    /// Lowest member id of each merged pair, in merge order
    #[serde(default)]
    pub merge_history: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
struct Community {
    members: Vec<usize>,
    degree: f64,
    internal_weight: f64,
}

/// Deterministic greedy modularity clustering
#[derive(Debug, Clone)]
pub struct GreedyModularityDetector {
    /// Resolution parameter (higher = more communities)
    resolution: f64,
}

impl Default for GreedyModularityDetector {
    fn default() -> Self {
        Self { resolution: 1.0 }
    }
}

impl GreedyModularityDetector {
    pub fn new(resolution: f64) -> Self {
        Self { resolution }
    }

    /// Partition the graph into clusters
    pub fn detect(&self, graph: &SemanticGraph) -> ClusterDetection {
        let inner = graph.graph();
        let node_count = inner.node_count();

        let mut communities: BTreeMap<usize, Community> = (0..node_count)
            .map(|i| {
                (
                    i,
                    Community {
                        members: vec![i],
                        degree: 0.0,
                        internal_weight: 0.0,
                    },
                )
            })
            .collect();

        // Inter-community weights keyed by (lower key, higher key)
        let mut links: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        let mut total_weight = 0.0;

        for edge in inner.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            let weight = *edge.weight();
            total_weight += weight;
            if let Some(c) = communities.get_mut(&a) {
                c.degree += weight;
            }
            if let Some(c) = communities.get_mut(&b) {
                c.degree += weight;
            }
            *links.entry((a.min(b), a.max(b))).or_insert(0.0) += weight;
        }

        let node_id = |i: usize| inner[NodeIndex::new(i)].id.clone();

        let mut merge_history = Vec::new();
        if total_weight > 0.0 {
            while let Some((a, b, gain)) = self.best_merge(&communities, &links, total_weight) {
                debug!("Merging communities {} and {} (gain {:.6})", a, b, gain);
                merge(&mut communities, &mut links, a, b);
                merge_history.push((node_id(a), node_id(b)));
            }
        }
        let merges = merge_history.len();

        let modularity = self.modularity(&communities, total_weight);
        let clusters: Vec<SemanticCluster> = communities
            .into_values()
            .enumerate()
            .map(|(id, community)| SemanticCluster {
                id,
                members: community.members.iter().map(|&i| node_id(i)).collect(),
                internal_weight: community.internal_weight,
            })
            .collect();

        info!(
            "Clustering completed: {} merges, {} clusters, modularity = {:.6}",
            merges,
            clusters.len(),
            modularity
        );

        ClusterDetection {
            clusters,
            modularity,
            merges,
            merge_history,
        }
    }

    /// Adjacent pair with the largest positive gain; first pair wins ties.
    fn best_merge(
        &self,
        communities: &BTreeMap<usize, Community>,
        links: &BTreeMap<(usize, usize), f64>,
        total_weight: f64,
    ) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;

        for (&(a, b), &weight) in links {
            let (Some(ca), Some(cb)) = (communities.get(&a), communities.get(&b)) else {
                continue;
            };
            let gain = weight / total_weight
                - self.resolution * ca.degree * cb.degree / (2.0 * total_weight * total_weight);

            let improves = match best {
                Some((_, _, best_gain)) => gain > best_gain + GAIN_EPSILON,
                None => gain > GAIN_EPSILON,
            };
            if improves {
                best = Some((a, b, gain));
            }
        }

        best
    }

    /// Q = sum over communities of L_c/m - resolution * (d_c / 2m)^2
    fn modularity(&self, communities: &BTreeMap<usize, Community>, total_weight: f64) -> f64 {
        if total_weight == 0.0 {
            return 0.0;
        }
        communities
            .values()
            .map(|c| {
                let share = c.degree / (2.0 * total_weight);
                c.internal_weight / total_weight - self.resolution * share * share
            })
            .sum()
    }
}

/// Member id sets of the default-resolution clustering
pub fn identify_semantic_clusters(graph: &SemanticGraph) -> Vec<Vec<String>> {
    GreedyModularityDetector::default()
        .detect(graph)
        .clusters
        .into_iter()
        .map(|cluster| cluster.members)
        .collect()
}

/// Fold community `b` into `a` (a < b) and re-key b's links.
fn merge(
    communities: &mut BTreeMap<usize, Community>,
    links: &mut BTreeMap<(usize, usize), f64>,
    a: usize,
    b: usize,
) {
    let joining_weight = links.remove(&(a, b)).unwrap_or(0.0);
    let Some(absorbed) = communities.remove(&b) else {
        return;
    };

    if let Some(target) = communities.get_mut(&a) {
        target.members.extend(absorbed.members);
        target.members.sort_unstable();
        target.degree += absorbed.degree;
        target.internal_weight += absorbed.internal_weight + joining_weight;
    }

    let moved: Vec<((usize, usize), f64)> = links
        .iter()
        .filter(|((x, y), _)| *x == b || *y == b)
        .map(|(key, weight)| (*key, *weight))
        .collect();

    for (key, weight) in moved {
        links.remove(&key);
        let other = if key.0 == b { key.1 } else { key.0 };
        *links.entry((a.min(other), a.max(other))).or_insert(0.0) += weight;
    }
}
