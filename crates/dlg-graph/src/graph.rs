use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use dlg_core::{
    CompiledChoice, ConditionRecord, DialogueError, DialogueNode, NodeId, NodeRecord,
};
use dlg_parser::parse_script;
use log::warn;

pub const DEFAULT_ROOT_ID: &str = "root";

#[derive(Debug, Clone)]
struct LoadedFile {
    name: String,
    records: HashMap<String, NodeRecord>,
}

/// The dialogue graph for one loaded script session: the per-file record
/// index, the arena of built nodes, and the id cache that makes building
/// idempotent. Nodes are built lazily on first reference; shared and cyclic
/// references resolve to the same arena entry.
#[derive(Debug)]
pub struct DialogueGraph {
    files: Vec<LoadedFile>,
    nodes: Vec<DialogueNode>,
    cache: HashMap<String, NodeId>,
    root_id: String,
    root: Option<NodeId>,
}

impl DialogueGraph {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            nodes: Vec::new(),
            cache: HashMap::new(),
            root_id: DEFAULT_ROOT_ID.to_string(),
            root: None,
        }
    }

    /// Starts a fresh session from `source`. All state from the previous
    /// session is torn down first, so a failed load leaves the graph empty
    /// rather than half-loaded.
    pub fn load_primary_source(
        &mut self,
        name: impl Into<String>,
        source: &str,
    ) -> Result<(), DialogueError> {
        self.reset();
        self.load_source(name.into(), source, true)
    }

    /// Adds another file's nodes to the current session. Its `ROOT:` line, if
    /// any, is not honored.
    pub fn load_additional_source(
        &mut self,
        name: impl Into<String>,
        source: &str,
    ) -> Result<(), DialogueError> {
        self.load_source(name.into(), source, false)
    }

    pub fn load_primary_file(&mut self, path: impl AsRef<Path>) -> Result<(), DialogueError> {
        let path = path.as_ref();
        self.reset();
        let source = read_script(path)?;
        self.load_source(path.display().to_string(), &source, true)
    }

    pub fn load_additional_file(&mut self, path: impl AsRef<Path>) -> Result<(), DialogueError> {
        let path = path.as_ref();
        let source = read_script(path)?;
        self.load_source(path.display().to_string(), &source, false)
    }

    /// Resolves the configured root node, building it on first call.
    pub fn resolve_root(&mut self) -> Result<NodeId, DialogueError> {
        if let Some(root) = self.root {
            return Ok(root);
        }
        let root_id = self.root_id.clone();
        let root = self.build_node(&root_id)?;
        self.root = Some(root);
        Ok(root)
    }

    /// Resolves `id` to a built node, from cache when possible. Unknown ids
    /// are an observable error; they never build a placeholder.
    pub fn resolve_node(&mut self, id: &str) -> Result<NodeId, DialogueError> {
        self.build_node(id)
    }

    pub fn node(&self, id: NodeId) -> &DialogueNode {
        &self.nodes[id.0]
    }

    pub fn cached_id(&self, id: &str) -> Option<NodeId> {
        self.cache.get(id).copied()
    }

    pub fn root_node_id(&self) -> &str {
        &self.root_id
    }

    pub fn built_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|file| file.name.as_str()).collect()
    }

    /// The record `id` would build from, honoring load order.
    pub fn record(&self, id: &str) -> Option<&NodeRecord> {
        self.find_record(id)
    }

    /// Every node id defined across loaded files, first definition wins,
    /// sorted for stable iteration.
    pub fn record_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for file in &self.files {
            for id in file.records.keys() {
                if seen.insert(id.as_str()) {
                    ids.push(id.clone());
                }
            }
        }
        ids.sort();
        ids
    }

    fn reset(&mut self) {
        self.files.clear();
        self.nodes.clear();
        self.cache.clear();
        self.root_id = DEFAULT_ROOT_ID.to_string();
        self.root = None;
    }

    fn load_source(
        &mut self,
        name: String,
        source: &str,
        primary: bool,
    ) -> Result<(), DialogueError> {
        let parsed = parse_script(source).map_err(|error| DialogueError {
            code: error.code,
            message: format!("{} ({})", error.message, name),
            line: error.line,
        })?;

        if primary {
            if let Some(root_id) = parsed.root_id {
                self.root_id = root_id;
            }
        }

        let mut records = HashMap::new();
        for node in parsed.nodes {
            records.insert(node.id.clone(), node);
        }
        self.files.push(LoadedFile { name, records });
        Ok(())
    }

    fn find_record(&self, id: &str) -> Option<&NodeRecord> {
        // Load order, first match wins.
        self.files.iter().find_map(|file| file.records.get(id))
    }

    fn build_node(&mut self, id: &str) -> Result<NodeId, DialogueError> {
        if let Some(&cached) = self.cache.get(id) {
            return Ok(cached);
        }

        let Some(record) = self.find_record(id).cloned() else {
            return Err(DialogueError::new(
                "GRAPH_NODE_NOT_FOUND",
                format!("Node \"{}\" is not defined in any loaded file.", id),
            ));
        };

        // The entry goes into the cache before any choice target is built.
        // A reference cycle back to this id then resolves to the in-progress
        // node instead of recursing without bound.
        let node_id = NodeId(self.nodes.len());
        self.nodes.push(DialogueNode {
            id: record.id.clone(),
            speaker: record.speaker.clone(),
            message: record.message.clone(),
            choices: Vec::new(),
        });
        self.cache.insert(record.id.clone(), node_id);

        let mut choices = Vec::with_capacity(record.choices.len());
        for choice in &record.choices {
            let target = if choice.target_node_id.is_empty() {
                None
            } else {
                match self.build_node(&choice.target_node_id) {
                    Ok(target) => Some(target),
                    Err(error) => {
                        warn!(
                            "choice \"{}\" in node \"{}\" has unresolvable target \"{}\": {}",
                            choice.text, record.id, choice.target_node_id, error
                        );
                        None
                    }
                }
            };
            choices.push(CompiledChoice {
                text: choice.text.clone(),
                conditions: choice
                    .conditions
                    .iter()
                    .map(|raw| ConditionRecord::parse(raw.as_str()))
                    .collect(),
                actions: choice.actions.clone(),
                target,
            });
        }
        self.nodes[node_id.0].choices = choices;

        Ok(node_id)
    }
}

impl Default for DialogueGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn read_script(path: &Path) -> Result<String, DialogueError> {
    fs::read_to_string(path).map_err(|error| {
        DialogueError::new(
            "GRAPH_FILE_READ",
            format!(
                "Failed to open dialogue file \"{}\": {}",
                path.display(),
                error
            ),
        )
    })
}
