//! Run-scoped workload counters

use std::collections::BTreeMap;

use crate::model::{Agent, AgentId};

/// Current workload of every agent during one run
///
/// Indexed by roster position and seeded from each agent's baseline. The
/// ledger is created by the engine at the start of a run and dropped with
/// it; nothing outside the run can observe or change it.
#[derive(Debug, Clone)]
pub(crate) struct WorkloadLedger {
    current: Vec<u32>,
    assigned: Vec<u32>,
}

impl WorkloadLedger {
    pub(crate) fn seeded(agents: &[Agent]) -> Self {
        Self {
            current: agents.iter().map(|agent| agent.baseline_workload).collect(),
            assigned: vec![0; agents.len()],
        }
    }

    pub(crate) fn current(&self, index: usize) -> u32 {
        self.current[index]
    }

    /// Highest current workload among `indices`, 0 when empty
    pub(crate) fn busiest(&self, indices: &[usize]) -> u32 {
        indices.iter().map(|index| self.current[*index]).max().unwrap_or(0)
    }

    pub(crate) fn record_assignment(&mut self, index: usize) {
        // ingestion and the builder cap baselines at MAX_BASELINE_WORKLOAD
        self.current[index] = self.current[index].saturating_add(1);
        self.assigned[index] += 1;
    }

    /// Final workload per agent id
    pub(crate) fn final_workloads(&self, agents: &[Agent]) -> BTreeMap<AgentId, u32> {
        agents
            .iter()
            .zip(&self.current)
            .map(|(agent, load)| (agent.id.clone(), *load))
            .collect()
    }

    /// Tickets assigned during this run per agent id
    pub(crate) fn assignment_counts(&self, agents: &[Agent]) -> BTreeMap<AgentId, u32> {
        agents
            .iter()
            .zip(&self.assigned)
            .map(|(agent, count)| (agent.id.clone(), *count))
            .collect()
    }
}
