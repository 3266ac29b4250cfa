use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::schema::RecordType;
use crate::types::AttributeKind;

/// Summary of relationship graph structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipGraphSummary {
    pub nodes: usize,
    pub edges: usize,
}

/// Dependency ordering of record types along their relationships.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipGraphReport {
    pub summary: RelationshipGraphSummary,
    /// Referenced record types come before the record types pointing at them.
    pub topo_order: Option<Vec<String>>,
    pub cycle: Option<Vec<String>>,
}

/// Build a deterministic relationship report for the given record types.
///
/// Only single relationships are edges; many-relationships are linked after
/// both sides exist. Targets are included as nodes even when they are not part
/// of `records`. Self-references do not constrain the order and are ignored.
pub fn build_relationship_graph_report<'a, I>(records: I) -> RelationshipGraphReport
where
    I: IntoIterator<Item = &'a RecordType>,
{
    let graph = build_adjacency(records);
    let nodes = graph.len();
    let edges = graph.values().map(|targets| targets.len()).sum();
    let summary = RelationshipGraphSummary { nodes, edges };

    match toposort(&graph) {
        Ok(order) => RelationshipGraphReport {
            summary,
            topo_order: Some(order),
            cycle: None,
        },
        Err(cycle) => RelationshipGraphReport {
            summary,
            topo_order: None,
            cycle: Some(cycle),
        },
    }
}

fn build_adjacency<'a, I>(records: I) -> BTreeMap<String, BTreeSet<String>>
where
    I: IntoIterator<Item = &'a RecordType>,
{
    let mut graph: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for record in records {
        graph.entry(record.name.clone()).or_default();

        for attribute in &record.attributes {
            if attribute.kind != AttributeKind::RelationshipSingle {
                continue;
            }
            let Some(target) = attribute.related_to.as_ref() else {
                continue;
            };
            if target == &record.name {
                continue;
            }
            graph
                .entry(target.clone())
                .or_default()
                .insert(record.name.clone());
        }
    }

    graph
}

fn toposort(graph: &BTreeMap<String, BTreeSet<String>>) -> Result<Vec<String>, Vec<String>> {
    let mut indegree: BTreeMap<String, usize> = BTreeMap::new();

    for node in graph.keys() {
        indegree.entry(node.clone()).or_insert(0);
    }

    for targets in graph.values() {
        for target in targets {
            *indegree.entry(target.clone()).or_insert(0) += 1;
        }
    }

    let mut ready: BTreeSet<String> = indegree
        .iter()
        .filter_map(|(node, count)| (*count == 0).then(|| node.clone()))
        .collect();

    let mut order = Vec::with_capacity(graph.len());

    while let Some(node) = ready.pop_first() {
        if let Some(targets) = graph.get(&node) {
            for target in targets {
                if let Some(count) = indegree.get_mut(target) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        ready.insert(target.clone());
                    }
                }
            }
        }
        order.push(node);
    }

    if order.len() == graph.len() {
        Ok(order)
    } else {
        let cycle_nodes: Vec<String> = indegree
            .into_iter()
            .filter_map(|(node, count)| (count > 0).then_some(node))
            .collect();
        Err(cycle_nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Attribute;

    fn pk() -> Attribute {
        Attribute::new("id", AttributeKind::Integer).technical()
    }

    #[test]
    fn toposort_reports_cycle() {
        let a = RecordType::new(
            "A",
            vec![
                pk(),
                Attribute::relationship("b", AttributeKind::RelationshipSingle, "B"),
            ],
        );
        let b = RecordType::new(
            "B",
            vec![
                pk(),
                Attribute::relationship("a", AttributeKind::RelationshipSingle, "A"),
            ],
        );

        let report = build_relationship_graph_report([&a, &b]);
        assert!(report.topo_order.is_none());
        let cycle = report.cycle.expect("expected cycle");
        assert!(cycle.contains(&"A".to_string()));
        assert!(cycle.contains(&"B".to_string()));
    }

    #[test]
    fn toposort_orders_dependencies() {
        let sample = RecordType::new(
            "Sample",
            vec![
                pk(),
                Attribute::relationship("project", AttributeKind::RelationshipSingle, "Project"),
            ],
        );
        let project = RecordType::new(
            "Project",
            vec![
                pk(),
                Attribute::relationship("parent", AttributeKind::RelationshipSingle, "Project"),
                Attribute::relationship("samples", AttributeKind::RelationshipMany, "Sample"),
            ],
        );

        let report = build_relationship_graph_report([&sample, &project]);
        assert_eq!(report.summary.nodes, 2);
        assert_eq!(report.summary.edges, 1);
        let order = report.topo_order.expect("expected toposort");
        assert_eq!(order, vec!["Project".to_string(), "Sample".to_string()]);
    }
}
