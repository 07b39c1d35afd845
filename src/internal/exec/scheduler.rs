use crate::internal::{
    exec::pacer::{NoDelay, Pacer},
    process::process::{AdmissionWarning, Process},
    trace::trace::{EventKind, Trace},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    RoundRobin,
    ShortestJobFirst,
}

impl Discipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::RoundRobin => "round_robin",
            Discipline::ShortestJobFirst => "shortest_job_first",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown scheduling discipline: {0}")]
pub struct UnknownDiscipline(pub String);

impl FromStr for Discipline {
    type Err = UnknownDiscipline;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "round_robin" | "rr" => Ok(Discipline::RoundRobin),
            "shortest_job_first" | "sjf" => Ok(Discipline::ShortestJobFirst),
            other => Err(UnknownDiscipline(other.to_string())),
        }
    }
}

/// Holds the submitted process set and runs it under either discipline.
///
/// The set only grows. Runs never reorder or consume it, so any run can be
/// repeated and yields the same order.
pub struct Scheduler {
    processes: Vec<Process>,
    time_quantum: i64,
    pacer: Box<dyn Pacer>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("processes", &self.processes)
            .field("time_quantum", &self.time_quantum)
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    /// Scheduler that charges no real time for simulated execution.
    pub fn new(time_quantum: i64) -> Self {
        Self::with_pacer(time_quantum, Box::new(NoDelay))
    }

    pub fn with_pacer(time_quantum: i64, pacer: Box<dyn Pacer>) -> Self {
        Self {
            processes: Vec::new(),
            time_quantum,
            pacer,
        }
    }

    pub fn time_quantum(&self) -> i64 {
        self.time_quantum
    }

    /// Submission-ordered process set.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Appends to the process set. Never rejects; the returned warnings
    /// describe inputs that were accepted as-is.
    pub fn submit(&mut self, process: Process) -> Vec<AdmissionWarning> {
        let mut warnings = process.lint();
        if self.processes.iter().any(|p| p.pid == process.pid) {
            warnings.push(AdmissionWarning::DuplicatePid { pid: process.pid });
        }

        for warning in &warnings {
            tracing::warn!("Accepting process {}: {}", process.pid, warning);
        }
        tracing::debug!(
            pid = process.pid,
            burst_time = process.burst_time,
            "Process submitted"
        );

        self.processes.push(process);
        warnings
    }

    pub fn run(&self, discipline: Discipline) -> Trace {
        match discipline {
            Discipline::RoundRobin => self.run_round_robin(),
            Discipline::ShortestJobFirst => self.run_shortest_job_first(),
        }
    }

    /// Single pass in submission order. Every process gets exactly one slice
    /// of `time_quantum` units regardless of its burst time.
    pub fn run_round_robin(&self) -> Trace {
        let quantum = self.time_quantum;
        self.execute(
            Discipline::RoundRobin,
            self.processes.iter(),
            |_| quantum,
        )
    }

    /// Ascending burst time over a private copy of the order. The sort is
    /// stable, so equal bursts keep submission order.
    pub fn run_shortest_job_first(&self) -> Trace {
        let mut order: Vec<&Process> = self.processes.iter().collect();
        order.sort_by_key(|p| p.burst_time);
        self.execute(
            Discipline::ShortestJobFirst,
            order.into_iter(),
            |p| p.burst_time,
        )
    }

    fn execute<'a, I, F>(&self, discipline: Discipline, order: I, cost: F) -> Trace
    where
        I: Iterator<Item = &'a Process>,
        F: Fn(&Process) -> i64,
    {
        let mut trace = Trace::new(discipline);
        tracing::info!(
            run_id = %trace.run_id,
            %discipline,
            processes = self.processes.len(),
            "Scheduling run started"
        );

        for process in order {
            let units = cost(process);

            let event = trace.record(process.pid, EventKind::Started, units);
            tracing::debug!(seq = event.seq, pid = event.pid, units, "Executing process");

            self.pacer.pause(units);

            let event = trace.record(process.pid, EventKind::Completed, units);
            tracing::debug!(seq = event.seq, pid = event.pid, "Process execution completed");
        }

        tracing::info!(run_id = %trace.run_id, events = trace.len(), "Scheduling run finished");
        trace
    }
}
