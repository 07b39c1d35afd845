use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::internal::{exec::scheduler::Discipline, process::process::Pid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Started,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    pub run_id: String,
    pub seq: u64,
    pub pid: Pid,
    pub kind: EventKind,
    pub discipline: Discipline,
    /// Units of simulated time charged for the slice this event belongs to.
    pub simulated_units: i64,
    pub ts: DateTime<Utc>,
}

/// Ordered record of one scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub run_id: String,
    pub discipline: Discipline,
    pub events: Vec<TraceEvent>,
}

impl Trace {
    pub fn new(discipline: Discipline) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            discipline,
            events: Vec::new(),
        }
    }

    pub fn record(&mut self, pid: Pid, kind: EventKind, simulated_units: i64) -> &TraceEvent {
        let event = TraceEvent {
            run_id: self.run_id.clone(),
            seq: self.events.len() as u64,
            pid,
            kind,
            discipline: self.discipline,
            simulated_units,
            ts: Utc::now(),
        };
        self.events.push(event);
        &self.events[self.events.len() - 1]
    }

    /// Pids in the order they were started.
    pub fn pids(&self) -> Vec<Pid> {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Started)
            .map(|e| e.pid)
            .collect()
    }

    pub fn completed(&self) -> Vec<Pid> {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Completed)
            .map(|e| e.pid)
            .collect()
    }

    /// (pid, kind) pairs without run ids or timestamps, for comparing runs.
    pub fn shape(&self) -> Vec<(Pid, EventKind)> {
        self.events.iter().map(|e| (e.pid, e.kind)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
