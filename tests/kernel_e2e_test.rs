//! End-to-end runs through the kernel facade

use kernel_sim::internal::{
    fs::store::FileError,
    kernel::Kernel,
    mem::allocator::{AllocError, MemoryAllocator, Slot},
};

#[test]
fn test_two_process_scheduling() {
    let mut kernel = Kernel::new(2, 100);
    kernel.create_process(1, 5, 1, 0);
    kernel.create_process(2, 3, 2, 1);

    assert_eq!(kernel.run_shortest_job_first().pids(), vec![2, 1]);
    assert_eq!(kernel.run_round_robin().pids(), vec![1, 2]);
}

#[test]
fn test_file_round_trip_and_missing_file() {
    let mut kernel = Kernel::new(2, 100);
    kernel.create_file("test.txt", "Hello, OS!");

    assert_eq!(kernel.read_file("test.txt"), Ok("Hello, OS!".to_string()));
    assert_eq!(
        kernel.read_file("missing.txt"),
        Err(FileError::NotFound("missing.txt".to_string()))
    );
}

#[test]
fn test_memory_allocation_bounds() {
    let mut kernel = Kernel::new(2, 100);

    assert!(kernel.allocate_memory(1, 10).is_ok());
    assert!(kernel.allocate_memory(2, 20).is_ok());
    assert!(matches!(
        kernel.allocate_memory(3, 150),
        Err(AllocError::OutOfRange { address: 150, .. })
    ));

    assert_eq!(kernel.memory().slot(10), Some(Slot::Owned(1)));
    assert_eq!(kernel.memory().slot(20), Some(Slot::Owned(2)));
    assert!(kernel.memory().owned_by(3).is_empty());
}

#[test]
fn test_not_found_and_out_of_range_do_not_stop_later_calls() {
    let mut kernel = Kernel::new(2, 4);
    kernel.create_process(1, 2, 0, 0);

    assert!(kernel.read_file("nope").is_err());
    assert!(kernel.allocate_memory(1, -1).is_err());

    kernel.create_file("after", "ok");
    assert_eq!(kernel.read_file("after").unwrap(), "ok");
    assert_eq!(kernel.run_round_robin().pids(), vec![1]);
}

#[test]
fn test_kernel_instances_are_independent() {
    let mut a = Kernel::new(2, 10);
    let mut b = Kernel::new(2, 10);

    a.create_process(1, 1, 0, 0);
    a.create_file("shared.txt", "only in a");
    a.allocate_memory(1, 0).unwrap();

    assert!(b.run_round_robin().is_empty());
    assert!(b.read_file("shared.txt").is_err());
    assert_eq!(b.memory().slot(0), Some(Slot::Free));

    b.create_process(2, 1, 0, 0);
    assert_eq!(a.run_round_robin().pids(), vec![1]);
}
