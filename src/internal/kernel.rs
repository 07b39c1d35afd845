use crate::internal::{
    config::KernelConfig,
    exec::{
        pacer::{NoDelay, Pacer, SleepPacer},
        scheduler::{Discipline, Scheduler},
    },
    fs::store::{FileError, FileStore, InMemoryFileStore},
    mem::allocator::{AllocError, MemoryAllocator, SlotTable},
    process::process::{AdmissionWarning, Pid, Process},
    trace::trace::Trace,
};

/// Single entry point over the scheduler, file store and memory allocator.
///
/// Pure composition: calls are forwarded as-is and outcomes come back
/// unchanged. Each instance owns its collaborators outright.
#[derive(Debug)]
pub struct Kernel<F = InMemoryFileStore, M = SlotTable> {
    scheduler: Scheduler,
    fs: F,
    mm: M,
}

impl Kernel {
    /// Kernel with in-memory collaborators and no real-time delay.
    pub fn new(time_quantum: i64, memory_size: usize) -> Self {
        Self::with_parts(
            Scheduler::new(time_quantum),
            InMemoryFileStore::new(),
            SlotTable::new(memory_size),
        )
    }

    pub fn from_config(config: &KernelConfig) -> Self {
        let pacer: Box<dyn Pacer> = if config.unit_cost_ms == 0 {
            Box::new(NoDelay)
        } else {
            Box::new(SleepPacer::from_millis(config.unit_cost_ms))
        };

        Self::with_parts(
            Scheduler::with_pacer(config.time_quantum, pacer),
            InMemoryFileStore::new(),
            SlotTable::new(config.memory_size),
        )
    }
}

impl<F: FileStore, M: MemoryAllocator> Kernel<F, M> {
    pub fn with_parts(scheduler: Scheduler, fs: F, mm: M) -> Self {
        Self { scheduler, fs, mm }
    }

    pub fn create_process(
        &mut self,
        pid: Pid,
        burst_time: i64,
        priority: i32,
        arrival_time: i64,
    ) -> Vec<AdmissionWarning> {
        self.scheduler
            .submit(Process::new(pid, burst_time, priority, arrival_time))
    }

    pub fn create_file(&mut self, name: &str, content: &str) {
        self.fs.create(name, content);
    }

    pub fn read_file(&self, name: &str) -> Result<String, FileError> {
        self.fs.read(name)
    }

    pub fn allocate_memory(&mut self, pid: Pid, address: i64) -> Result<(), AllocError> {
        self.mm.allocate(pid, address)
    }

    pub fn run_round_robin(&self) -> Trace {
        self.scheduler.run_round_robin()
    }

    pub fn run_shortest_job_first(&self) -> Trace {
        self.scheduler.run_shortest_job_first()
    }

    pub fn run(&self, discipline: Discipline) -> Trace {
        self.scheduler.run(discipline)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn file_store(&self) -> &F {
        &self.fs
    }

    pub fn memory(&self) -> &M {
        &self.mm
    }
}
