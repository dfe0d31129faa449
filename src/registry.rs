//! Record registry
//!
//! Declared record types live here so pointer and iterator fields can refer
//! to them by name. The registry also owns the reference graph: which
//! records a shape reaches, whether every reference resolves, and a
//! deterministic emission order for multi-type output.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::{Result, SchemaError};
use crate::label::{Label, LabelKind};
use crate::node::{Kind, TypeNode};
use crate::refine;

#[derive(Debug, Default)]
pub struct TypeRegistry {
    records: Vec<TypeNode>,
    index: HashMap<String, usize>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record type under its declared name.
    ///
    /// Only records are addressable by reference; anything else is rejected.
    pub fn register(&mut self, node: TypeNode) -> Result<()> {
        let name = match node.kind() {
            Kind::Record(rec) => rec.name.clone(),
            _ => return Err(SchemaError::NotARecord(node.label().kind_name().to_string())),
        };
        if self.index.contains_key(&name) {
            return Err(SchemaError::DuplicateName(name));
        }
        tracing::debug!(name = %name, "registering record");
        self.index.insert(name, self.records.len());
        self.records.push(node);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TypeNode> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    /// Draft view of a registered record: the same shape with every
    /// constraint loosened.
    pub fn draft_view(&self, name: &str) -> Option<TypeNode> {
        self.get(name).map(refine::draft)
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|node| node.name())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record name reachable from `label` through references,
    /// transitively across registered records. The root label itself is not
    /// included.
    ///
    /// The order is topological (dependencies last) when the reference graph
    /// is acyclic; otherwise it falls back to discovery order, so cyclic
    /// schemas still render deterministically.
    pub fn reachable_from(&self, label: &Label) -> Result<Vec<String>> {
        let mut discovered: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut frontier = direct_refs(label);

        while let Some(name) = frontier.pop() {
            if !seen.insert(name.clone()) {
                continue;
            }
            let record = self
                .get(&name)
                .ok_or_else(|| SchemaError::UnknownTarget(name.clone()))?;
            frontier.extend(direct_refs(&record.label()));
            discovered.push(name);
        }

        Ok(self.ordered(discovered))
    }

    /// Verify that every reference in every registered record resolves.
    pub fn check_references(&self) -> Result<()> {
        for record in &self.records {
            for target in direct_refs(&record.label()) {
                if self.get(&target).is_none() {
                    return Err(SchemaError::UnknownTarget(target));
                }
            }
        }
        Ok(())
    }

    /// Order a set of record names by dependency, falling back to discovery
    /// order when the graph has a cycle.
    fn ordered(&self, discovered: Vec<String>) -> Vec<String> {
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();
        for name in &discovered {
            nodes.insert(name, graph.add_node(name.clone()));
        }
        for name in &discovered {
            if let Some(record) = self.get(name) {
                for target in direct_refs(&record.label()) {
                    if let (Some(&from), Some(&to)) =
                        (nodes.get(name.as_str()), nodes.get(target.as_str()))
                    {
                        graph.add_edge(from, to, ());
                    }
                }
            }
        }
        match toposort(&graph, None) {
            Ok(order) => order.into_iter().map(|i| graph[i].clone()).collect(),
            Err(_) => discovered,
        }
    }
}

/// Names a label refers to directly: registered names of its members and
/// pointer/iterator targets. Named members are references themselves, so
/// their insides are not walked.
fn direct_refs(label: &Label) -> Vec<String> {
    let mut out = Vec::new();
    collect(label, true, &mut out);
    out
}

fn collect(label: &Label, root: bool, out: &mut Vec<String>) {
    if !root {
        if let Some(name) = &label.name {
            out.push(name.clone());
            return;
        }
    }
    match &label.kind {
        LabelKind::Primitive { .. } => {}
        LabelKind::List { item } => collect(item, false, out),
        LabelKind::Dictionary { members } => {
            for (_, member) in members {
                collect(member, false, out);
            }
        }
        LabelKind::Pointer { target } | LabelKind::Iterator { target } => {
            out.push(target.clone());
        }
    }
}
