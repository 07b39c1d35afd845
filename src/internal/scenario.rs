use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::internal::{
    config::{ConfigError, KernelConfig},
    exec::scheduler::Discipline,
    fs::store::FileStore,
    kernel::Kernel,
    mem::allocator::MemoryAllocator,
    process::process::{AdmissionWarning, Pid},
    trace::trace::{EventKind, Trace},
};

/// Scripted sequence of kernel calls, loadable from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub config: Option<KernelConfig>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    CreateProcess {
        pid: Pid,
        burst_time: i64,
        #[serde(default)]
        priority: i32,
        #[serde(default)]
        arrival_time: i64,
    },
    CreateFile {
        name: String,
        content: String,
    },
    ReadFile {
        name: String,
    },
    AllocateMemory {
        pid: Pid,
        address: i64,
    },
    Run {
        discipline: Discipline,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    ProcessCreated {
        pid: Pid,
        warnings: Vec<AdmissionWarning>,
    },
    FileCreated {
        name: String,
    },
    FileRead {
        name: String,
        content: String,
    },
    FileNotFound {
        name: String,
    },
    MemoryAllocated {
        pid: Pid,
        address: i64,
    },
    AllocationFailed {
        pid: Pid,
        address: i64,
        reason: String,
    },
    Scheduled {
        trace: Trace,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub outcomes: Vec<StepOutcome>,
}

impl Scenario {
    /// The classic demo: two processes under both disciplines, one file,
    /// two allocations.
    pub fn reference() -> Self {
        Self {
            config: Some(KernelConfig::default()),
            steps: vec![
                Step::CreateProcess {
                    pid: 1,
                    burst_time: 5,
                    priority: 1,
                    arrival_time: 0,
                },
                Step::CreateProcess {
                    pid: 2,
                    burst_time: 3,
                    priority: 2,
                    arrival_time: 1,
                },
                Step::Run {
                    discipline: Discipline::RoundRobin,
                },
                Step::Run {
                    discipline: Discipline::ShortestJobFirst,
                },
                Step::CreateFile {
                    name: "test.txt".to_string(),
                    content: "Hello, OS!".to_string(),
                },
                Step::ReadFile {
                    name: "test.txt".to_string(),
                },
                Step::AllocateMemory { pid: 1, address: 10 },
                Step::AllocateMemory { pid: 2, address: 20 },
            ],
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&contents)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.steps.is_empty() {
            return Err(ScenarioError::EmptyScenario);
        }
        if let Some(config) = &self.config {
            config.validate()?;
        }
        Ok(())
    }

    /// Embedded config, else `fallback`, with env overrides applied last.
    pub fn kernel_config(&self, fallback: &KernelConfig) -> KernelConfig {
        self.config
            .clone()
            .unwrap_or_else(|| fallback.clone())
            .apply_env_overrides()
    }

    /// Runs every step in order. Missing files and bad addresses are
    /// recorded as outcomes; they never stop the script.
    pub fn execute<F, M>(&self, kernel: &mut Kernel<F, M>) -> ScenarioReport
    where
        F: FileStore,
        M: MemoryAllocator,
    {
        let outcomes = self
            .steps
            .iter()
            .map(|step| apply_step(kernel, step))
            .collect();
        ScenarioReport { outcomes }
    }
}

fn apply_step<F, M>(kernel: &mut Kernel<F, M>, step: &Step) -> StepOutcome
where
    F: FileStore,
    M: MemoryAllocator,
{
    match step {
        Step::CreateProcess {
            pid,
            burst_time,
            priority,
            arrival_time,
        } => {
            let warnings = kernel.create_process(*pid, *burst_time, *priority, *arrival_time);
            StepOutcome::ProcessCreated {
                pid: *pid,
                warnings,
            }
        }
        Step::CreateFile { name, content } => {
            kernel.create_file(name, content);
            StepOutcome::FileCreated { name: name.clone() }
        }
        Step::ReadFile { name } => match kernel.read_file(name) {
            Ok(content) => StepOutcome::FileRead {
                name: name.clone(),
                content,
            },
            Err(_) => StepOutcome::FileNotFound { name: name.clone() },
        },
        Step::AllocateMemory { pid, address } => match kernel.allocate_memory(*pid, *address) {
            Ok(()) => StepOutcome::MemoryAllocated {
                pid: *pid,
                address: *address,
            },
            Err(e) => StepOutcome::AllocationFailed {
                pid: *pid,
                address: *address,
                reason: e.to_string(),
            },
        },
        Step::Run { discipline } => StepOutcome::Scheduled {
            trace: kernel.run(*discipline),
        },
    }
}

impl ScenarioReport {
    pub fn traces(&self) -> Vec<&Trace> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                StepOutcome::Scheduled { trace } => Some(trace),
                _ => None,
            })
            .collect()
    }

    /// Console-style rendering of the report, one line per observable event.
    pub fn transcript(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for outcome in &self.outcomes {
            match outcome {
                StepOutcome::ProcessCreated { .. } | StepOutcome::FileCreated { .. } => {}
                StepOutcome::FileRead { content, .. } => {
                    lines.push(format!("File Content: {}", content));
                }
                StepOutcome::FileNotFound { .. } => lines.push("File not found".to_string()),
                StepOutcome::MemoryAllocated { pid, address } => lines.push(format!(
                    "Memory allocated for process {} at address {}",
                    pid, address
                )),
                StepOutcome::AllocationFailed { .. } => {
                    lines.push("Memory allocation failed".to_string())
                }
                StepOutcome::Scheduled { trace } => render_trace(trace, &mut lines),
            }
        }
        lines
    }
}

fn render_trace(trace: &Trace, lines: &mut Vec<String>) {
    lines.push(match trace.discipline {
        Discipline::RoundRobin => "Running Round Robin Scheduling:".to_string(),
        Discipline::ShortestJobFirst => "Running Shortest Job First Scheduling:".to_string(),
    });

    for event in &trace.events {
        match (event.kind, trace.discipline) {
            (EventKind::Started, Discipline::RoundRobin) => {
                lines.push(format!("Executing Process: {}", event.pid))
            }
            (EventKind::Started, Discipline::ShortestJobFirst) => lines.push(format!(
                "Executing Process: {} with burst time: {}",
                event.pid, event.simulated_units
            )),
            (EventKind::Completed, _) => {
                lines.push(format!("Process {} execution completed", event.pid))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("Scenario has no steps")]
    EmptyScenario,
    #[error("Scenario config rejected: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::config::env_guard::EnvGuard;

    #[test]
    fn test_reference_scenario_validates() {
        assert!(Scenario::reference().validate().is_ok());
    }

    #[test]
    fn test_empty_scenario_rejected() {
        let scenario = Scenario {
            config: None,
            steps: vec![],
        };
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::EmptyScenario)
        ));
    }

    #[test]
    fn test_step_json_shape() {
        let step: Step = serde_json::from_value(serde_json::json!({
            "op": "create_process",
            "pid": 9,
            "burst_time": 4
        }))
        .unwrap();
        assert_eq!(
            step,
            Step::CreateProcess {
                pid: 9,
                burst_time: 4,
                priority: 0,
                arrival_time: 0
            }
        );

        let run: Step = serde_json::from_value(serde_json::json!({
            "op": "run",
            "discipline": "shortest_job_first"
        }))
        .unwrap();
        assert_eq!(
            run,
            Step::Run {
                discipline: Discipline::ShortestJobFirst
            }
        );
    }

    #[test]
    fn test_unit_cost_override_beats_embedded_config() {
        let mut env = EnvGuard::lock();
        env.set("KERNEL_SIM_UNIT_COST_MS", "0");

        let scenario = Scenario::reference();
        assert_eq!(scenario.config.as_ref().map(|c| c.unit_cost_ms), Some(100));

        let config = scenario.kernel_config(&KernelConfig::default());
        assert_eq!(config.unit_cost_ms, 0);
        assert_eq!(config.time_quantum, 2);

        let bare = Scenario {
            config: None,
            steps: scenario.steps.clone(),
        };
        let fallback = KernelConfig::default().with_unit_cost_ms(40);
        assert_eq!(bare.kernel_config(&fallback).unit_cost_ms, 0);
    }

    #[test]
    fn test_reference_transcript() {
        let scenario = Scenario::reference();
        let config = scenario.kernel_config(&KernelConfig::default()).with_unit_cost_ms(0);
        let mut kernel = Kernel::from_config(&config);

        let report = scenario.execute(&mut kernel);
        assert_eq!(
            report.transcript(),
            vec![
                "Running Round Robin Scheduling:",
                "Executing Process: 1",
                "Process 1 execution completed",
                "Executing Process: 2",
                "Process 2 execution completed",
                "Running Shortest Job First Scheduling:",
                "Executing Process: 2 with burst time: 3",
                "Process 2 execution completed",
                "Executing Process: 1 with burst time: 5",
                "Process 1 execution completed",
                "File Content: Hello, OS!",
                "Memory allocated for process 1 at address 10",
                "Memory allocated for process 2 at address 20",
            ]
        );
    }
}
