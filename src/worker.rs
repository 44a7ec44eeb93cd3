use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// Result shape the backend's analysis pipeline stores per file. Field names
/// follow the backend's JSON contract, hence the camelCase renames.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisVerdict {
    #[serde(rename = "isDeepfake")]
    pub is_deepfake: bool,
    pub confidence: f64,
    #[serde(rename = "modelVersion")]
    pub model_version: &'static str,
    #[serde(rename = "processingMs")]
    pub processing_ms: u64,
}

pub type WorkerFn = fn(&str, i64) -> AnalysisVerdict;

/// Stand-in for the real ML pipeline: returns a fixed-shape verdict derived
/// deterministically from the inputs, so workflow plumbing can be exercised
/// without a model.
pub fn mock_analysis_task(filename: &str, file_id: i64) -> AnalysisVerdict {
    let mut hasher = DefaultHasher::new();
    filename.hash(&mut hasher);
    file_id.hash(&mut hasher);
    let digest = hasher.finish();

    AnalysisVerdict {
        is_deepfake: digest % 2 == 0,
        // Mock confidence stays in the upper half of the range like the real
        // model's accepted verdicts.
        confidence: 0.5 + (digest % 500) as f64 / 1000.0,
        model_version: "mock-0",
        processing_ms: 40 + digest % 60,
    }
}

/// Contexts the backend historically resolved workers from. The packaging bug
/// this tool diagnoses was the worker resolving from one context but not the
/// other; both must yield the same function.
pub const APP_ROOT_CONTEXT: &str = "app";
pub const BACKEND_CONTEXT: &str = "backend";

pub const SEARCH_CONTEXTS: &[&str] = &[APP_ROOT_CONTEXT, BACKEND_CONTEXT];

pub const SIMPLE_WORKER: &str = "workers/simple_worker";

/// Name → worker table keyed per resolution context.
#[derive(Debug, Default)]
pub struct WorkerRegistry {
    entries: HashMap<(String, String), WorkerFn>,
}

impl WorkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the mock worker registered under every search context,
    /// mirroring a correctly packaged backend.
    pub fn with_mock_worker() -> Self {
        let mut registry = Self::new();
        for context in SEARCH_CONTEXTS {
            registry.register(context, SIMPLE_WORKER, mock_analysis_task);
        }
        registry
    }

    pub fn register(&mut self, context: &str, name: &str, worker: WorkerFn) {
        self.entries
            .insert((context.to_string(), name.to_string()), worker);
    }

    pub fn resolve(&self, context: &str, name: &str) -> Option<WorkerFn> {
        self.entries
            .get(&(context.to_string(), name.to_string()))
            .copied()
    }
}
