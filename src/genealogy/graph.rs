//! In-memory genealogy graph with JSON export.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    ConcreteId, EdgeId, GenealogyEdge, GenealogyNode, GenealogyTracker, OperatorAttrs,
    TrackerError,
};
use crate::evolution::{Fitness, ItemSet};

/// Default genealogy store.
///
/// Node ids are allocated sequentially from zero, so a node's id doubles as its
/// index in `nodes`.
#[derive(Debug, Default)]
pub struct GraphTracker {
    name: String,
    seed: String,
    nodes: Vec<GenealogyNode>,
    edges: Vec<GenealogyEdge>,
    output_dir: Option<PathBuf>,
}

/// Serialized form written by [`GraphTracker::save`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenealogyExport {
    pub name: String,
    pub seed: String,
    pub nodes: Vec<GenealogyNode>,
    pub edges: Vec<GenealogyEdge>,
}

impl GraphTracker {
    /// Create an empty graph.
    pub fn new(name: impl Into<String>, seed: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seed: seed.into(),
            ..Default::default()
        }
    }

    /// Set output directory for saving the graph.
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> io::Result<Self> {
        let path = dir.as_ref().to_path_buf();
        fs::create_dir_all(&path)?;
        self.output_dir = Some(path);
        Ok(self)
    }

    /// Path `save` writes to, if an output directory is set.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}_{}.json", self.name, self.seed)))
    }

    pub fn node(&self, id: ConcreteId) -> Option<&GenealogyNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn nodes(&self) -> &[GenealogyNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GenealogyEdge] {
        &self.edges
    }

    /// Parent ids of a node, in edge order.
    pub fn parents_of(&self, id: ConcreteId) -> Vec<ConcreteId> {
        self.edges
            .iter()
            .filter(|e| e.child == id)
            .map(|e| e.parent)
            .collect()
    }

    /// Child ids of a node, in edge order.
    pub fn children_of(&self, id: ConcreteId) -> Vec<ConcreteId> {
        self.edges
            .iter()
            .filter(|e| e.parent == id)
            .map(|e| e.child)
            .collect()
    }

    /// Number of deployed nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Snapshot the graph in export form.
    pub fn export(&self) -> GenealogyExport {
        GenealogyExport {
            name: self.name.clone(),
            seed: self.seed.clone(),
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Load a previously saved graph.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<GenealogyExport, TrackerError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn node_mut(&mut self, id: ConcreteId) -> Result<&mut GenealogyNode, TrackerError> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or(TrackerError::UnknownNode(id))
    }
}

impl GenealogyTracker for GraphTracker {
    fn deploy(&mut self, contents: &ItemSet) -> Result<ConcreteId, TrackerError> {
        let id = ConcreteId(self.nodes.len() as u64);
        self.nodes.push(GenealogyNode {
            id,
            generation: 0,
            contents: contents.clone(),
            fitness: None,
            score: None,
        });
        Ok(id)
    }

    fn set_parents(
        &mut self,
        child: ConcreteId,
        parents: &[ConcreteId],
        generation: usize,
        attrs: &OperatorAttrs,
    ) -> Result<Vec<EdgeId>, TrackerError> {
        if let Some(&missing) = parents.iter().find(|p| self.node(**p).is_none()) {
            return Err(TrackerError::UnknownNode(missing));
        }
        self.node_mut(child)?.generation = generation;

        let mut edge_ids = Vec::with_capacity(parents.len());
        for &parent in parents {
            let id = EdgeId(self.edges.len() as u64);
            self.edges.push(GenealogyEdge {
                id,
                parent,
                child,
                generation,
                attrs: attrs.clone(),
            });
            edge_ids.push(id);
        }
        Ok(edge_ids)
    }

    fn update_fitness(&mut self, id: ConcreteId, fitness: Fitness) -> Result<(), TrackerError> {
        let node = self.node_mut(id)?;
        if node.fitness.is_some() {
            return Err(TrackerError::FitnessAlreadySet(id));
        }
        node.fitness = Some(fitness);
        Ok(())
    }

    fn update_score(&mut self, id: ConcreteId, score: f64) -> Result<(), TrackerError> {
        let node = self.node_mut(id)?;
        if node.score.is_some() {
            return Err(TrackerError::ScoreAlreadySet(id));
        }
        node.score = Some(score);
        Ok(())
    }

    fn save(&mut self) -> Result<(), TrackerError> {
        let Some(path) = self.output_path() else {
            log::warn!(
                "No output directory for genealogy '{}', keeping {} nodes in memory",
                self.name,
                self.nodes.len()
            );
            return Ok(());
        };

        let json = serde_json::to_string_pretty(&self.export())?;
        fs::write(&path, json)?;
        log::info!(
            "Wrote genealogy ({} nodes, {} edges) to {}",
            self.nodes.len(),
            self.edges.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn set(ids: &[usize]) -> ItemSet {
        ids.iter().copied().collect()
    }

    fn attrs(op: &str) -> OperatorAttrs {
        OperatorAttrs::from([("operator".to_string(), op.to_string())])
    }

    #[test]
    fn test_deploy_allocates_sequential_ids() {
        let mut graph = GraphTracker::new("test", "1");
        let a = graph.deploy(&set(&[1, 2])).unwrap();
        let b = graph.deploy(&set(&[3])).unwrap();
        assert_eq!(a, ConcreteId(0));
        assert_eq!(b, ConcreteId(1));
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.node(b).unwrap().contents, set(&[3]));
    }

    #[test]
    fn test_set_parents_edge_order() {
        let mut graph = GraphTracker::new("test", "1");
        let p1 = graph.deploy(&set(&[1])).unwrap();
        let p2 = graph.deploy(&set(&[2])).unwrap();
        let child = graph.deploy(&set(&[])).unwrap();

        let edges = graph.set_parents(child, &[p1, p2], 4, &attrs("cx_set")).unwrap();
        assert_eq!(edges, vec![EdgeId(0), EdgeId(1)]);
        assert_eq!(graph.edges()[0].parent, p1);
        assert_eq!(graph.edges()[1].parent, p2);
        assert_eq!(graph.parents_of(child), vec![p1, p2]);
        assert_eq!(graph.children_of(p1), vec![child]);
        assert_eq!(graph.node(child).unwrap().generation, 4);
        assert_eq!(graph.edges()[0].attrs["operator"], "cx_set");
    }

    #[test]
    fn test_unknown_node_rejected() {
        let mut graph = GraphTracker::new("test", "1");
        let child = graph.deploy(&set(&[])).unwrap();
        let err = graph
            .set_parents(child, &[ConcreteId(9)], 1, &attrs("mut_set"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::UnknownNode(ConcreteId(9))));
        assert!(graph.update_score(ConcreteId(5), 1.0).is_err());
    }

    #[test]
    fn test_fitness_written_once() {
        let mut graph = GraphTracker::new("test", "1");
        let id = graph.deploy(&set(&[0])).unwrap();
        let fitness = Fitness::new(3.0, 7.5);

        graph.update_fitness(id, fitness).unwrap();
        graph.update_score(id, fitness.score()).unwrap();
        assert!(matches!(
            graph.update_fitness(id, fitness),
            Err(TrackerError::FitnessAlreadySet(_))
        ));
        assert!(matches!(
            graph.update_score(id, 0.0),
            Err(TrackerError::ScoreAlreadySet(_))
        ));
        assert_eq!(graph.node(id).unwrap().fitness, Some(fitness));
        assert_eq!(graph.node(id).unwrap().score, Some(4.5));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut graph = GraphTracker::new("knapsack", "64")
            .with_output_dir(dir.path())
            .unwrap();
        let p = graph.deploy(&set(&[1, 2])).unwrap();
        let c = graph.deploy(&set(&[2])).unwrap();
        graph.set_parents(c, &[p], 1, &attrs("mut_set")).unwrap();
        graph.update_fitness(p, Fitness::new(4.0, 10.0)).unwrap();
        graph.save().unwrap();

        let path = graph.output_path().unwrap();
        assert!(path.ends_with("knapsack_64.json"));
        let export = GraphTracker::load(&path).unwrap();
        assert_eq!(export.nodes, graph.nodes());
        assert_eq!(export.edges, graph.edges());
        assert_eq!(export.seed, "64");
    }

    #[test]
    fn test_save_without_output_dir() {
        let mut graph = GraphTracker::new("test", "1");
        graph.deploy(&set(&[1])).unwrap();
        assert!(graph.save().is_ok());
        assert!(graph.output_path().is_none());
    }
}
