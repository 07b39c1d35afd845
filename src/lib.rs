// Kernel simulator library entry point

pub mod internal {
    pub mod process {
        pub mod process;
    }
    pub mod exec {
        pub mod pacer;
        pub mod scheduler;
    }
    pub mod fs {
        pub mod store;
    }
    pub mod mem {
        pub mod allocator;
    }
    pub mod trace {
        pub mod trace;
    }
    pub mod api;
    pub mod config;
    pub mod kernel;
    pub mod scenario;
}

// Re-export key types for external use
pub use internal::config::{ConfigError, KernelConfig};
pub use internal::exec::pacer::{NoDelay, Pacer, SleepPacer};
pub use internal::exec::scheduler::{Discipline, Scheduler};
pub use internal::fs::store::{FileError, FileStore, InMemoryFileStore};
pub use internal::kernel::Kernel;
pub use internal::mem::allocator::{AllocError, MemoryAllocator, Slot, SlotTable};
pub use internal::process::process::{AdmissionWarning, Pid, Process};
pub use internal::scenario::{Scenario, ScenarioError, ScenarioReport, Step, StepOutcome};
pub use internal::trace::trace::{EventKind, Trace, TraceEvent};
