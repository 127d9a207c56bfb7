//! Memory loading - built-in samples or a JSON data file.
//!
//! Loading runs on a background thread; the UI polls `MemoryLoader::try_recv`
//! each frame and shows the skeleton timeline until a result arrives.

use anyhow::{Context, Result, bail};
use crossbeam_channel::{Receiver, TryRecvError, bounded};
use log::{debug, info};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::memory::{MemoryRecord, sample_memories};

/// Where the timeline's memories come from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemorySource {
    Builtin,
    File(PathBuf),
}

impl MemorySource {
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        path.map(Self::File).unwrap_or(Self::Builtin)
    }

    pub fn load(&self) -> Result<Vec<MemoryRecord>> {
        match self {
            Self::Builtin => Ok(sample_memories()),
            Self::File(path) => load_memories(path),
        }
    }
}

impl std::fmt::Display for MemorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => write!(f, "built-in samples"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read a JSON array of memory records.
///
/// Ids must be unique: expansion state is keyed by id.
pub fn load_memories(path: &Path) -> Result<Vec<MemoryRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read memories file: {}", path.display()))?;
    let memories = parse_memories(&text)
        .with_context(|| format!("Failed to parse memories file: {}", path.display()))?;
    info!("Loaded {} memories from {}", memories.len(), path.display());
    Ok(memories)
}

pub fn parse_memories(json: &str) -> Result<Vec<MemoryRecord>> {
    let memories: Vec<MemoryRecord> = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    for memory in &memories {
        if !seen.insert(memory.id) {
            bail!("duplicate memory id {}", memory.id);
        }
    }
    Ok(memories)
}

/// Background loader handle
pub struct MemoryLoader {
    source: MemorySource,
    rx: Receiver<Result<Vec<MemoryRecord>>>,
}

impl MemoryLoader {
    pub fn spawn(source: MemorySource) -> Result<Self> {
        let (tx, rx) = bounded(1);
        let job = source.clone();
        std::thread::Builder::new()
            .name("memory-loader".into())
            .spawn(move || {
                debug!("Loading memories from {}", job);
                // Receiver gone means the app already shut down
                let _ = tx.send(job.load());
            })
            .context("Failed to spawn memory loader thread")?;
        Ok(Self { source, rx })
    }

    pub fn source(&self) -> &MemorySource {
        &self.source
    }

    /// Non-blocking poll. `None` while loading is still in progress.
    pub fn try_recv(&self) -> Option<Result<Vec<MemoryRecord>>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(anyhow::anyhow!("memory loader exited without a result")))
            }
        }
    }

    /// Blocking wait, for headless use.
    pub fn wait(self) -> Result<Vec<MemoryRecord>> {
        self.rx
            .recv()
            .context("memory loader exited without a result")?
    }
}
