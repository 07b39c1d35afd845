use serde::{Deserialize, Serialize};
use std::fmt;

pub type Pid = i32;

/// One schedulable unit. Immutable once submitted.
///
/// `priority` and `arrival_time` are carried for interface compatibility only:
/// neither discipline reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub pid: Pid,
    pub burst_time: i64,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub arrival_time: i64,
}

impl Process {
    pub fn new(pid: Pid, burst_time: i64, priority: i32, arrival_time: i64) -> Self {
        Self {
            pid,
            burst_time,
            priority,
            arrival_time,
        }
    }

    /// Findings about inputs the scheduler accepts anyway.
    /// Submission never fails; these only feed logs and callers that care.
    pub fn lint(&self) -> Vec<AdmissionWarning> {
        let mut warnings = Vec::new();

        if self.burst_time < 0 {
            warnings.push(AdmissionWarning::NegativeBurst {
                pid: self.pid,
                burst_time: self.burst_time,
            });
        } else if self.burst_time == 0 {
            warnings.push(AdmissionWarning::ZeroBurst { pid: self.pid });
        }

        if self.priority < 0 {
            warnings.push(AdmissionWarning::NegativePriority {
                pid: self.pid,
                priority: self.priority,
            });
        }

        warnings
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum AdmissionWarning {
    NegativeBurst { pid: Pid, burst_time: i64 },
    ZeroBurst { pid: Pid },
    NegativePriority { pid: Pid, priority: i32 },
    DuplicatePid { pid: Pid },
}

impl fmt::Display for AdmissionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmissionWarning::NegativeBurst { pid, burst_time } => {
                write!(f, "process {} has negative burst time {}", pid, burst_time)
            }
            AdmissionWarning::ZeroBurst { pid } => {
                write!(f, "process {} has zero burst time", pid)
            }
            AdmissionWarning::NegativePriority { pid, priority } => {
                write!(f, "process {} has negative priority {}", pid, priority)
            }
            AdmissionWarning::DuplicatePid { pid } => {
                write!(f, "pid {} is already in the process set", pid)
            }
        }
    }
}
