mod graph;

pub use graph::{DialogueGraph, DEFAULT_ROOT_ID};
