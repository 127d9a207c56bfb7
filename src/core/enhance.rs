//! Memory enhancement collaborator.
//!
//! The "Enhance with AI" button has no backing service. This is the seam a
//! future service would plug into; the only implementation reports that
//! nothing is configured.

use crate::entities::MemoryRecord;
use anyhow::{Result, bail};

pub trait MemoryEnhancer: Send + Sync {
    /// Human-readable name of the backing service
    fn name(&self) -> &str;

    /// Produce an enhanced description for a memory.
    fn enhance(&self, memory: &MemoryRecord) -> Result<String>;
}

/// Default enhancer: always declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEnhancer;

impl MemoryEnhancer for NoEnhancer {
    fn name(&self) -> &str {
        "none"
    }

    fn enhance(&self, memory: &MemoryRecord) -> Result<String> {
        bail!("AI enhancement is not configured (memory {} \"{}\")", memory.id, memory.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sample_memories;

    #[test]
    fn test_no_enhancer_declines() {
        let memories = sample_memories();
        let err = NoEnhancer.enhance(&memories[0]).unwrap_err();
        assert!(err.to_string().contains("not configured"));
        assert!(err.to_string().contains("Summer in Paris"));
    }
}
