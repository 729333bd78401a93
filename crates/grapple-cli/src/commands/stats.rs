//! Stats command implementation.

use crate::error::Result;
use crate::output::Formatter;
use grapple_domain::{KnowledgeBase, KnowledgeBaseStats, TechniqueType};

/// Knowledge base summary printed by `grapple stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    /// Entity counts
    pub stats: KnowledgeBaseStats,
    /// Technique count per type, in vocabulary order
    pub by_type: Vec<(TechniqueType, usize)>,
}

impl StatsReport {
    /// Summarize a knowledge base.
    pub fn new(kb: &KnowledgeBase) -> Self {
        let by_type = TechniqueType::ALL
            .iter()
            .map(|&technique_type| {
                let count = kb
                    .techniques()
                    .filter(|t| t.technique_type == technique_type)
                    .count();
                (technique_type, count)
            })
            .collect();

        Self {
            stats: kb.stats(),
            by_type,
        }
    }
}

/// Execute the stats command.
pub fn execute_stats(kb: &KnowledgeBase, formatter: &Formatter) -> Result<()> {
    let report = StatsReport::new(kb);
    println!("{}", formatter.format_stats(&report)?);
    Ok(())
}
