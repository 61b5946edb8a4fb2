/* Benchmarks for rawposix.  Measures the cost of getting a syscall from the
 * host to its handler and back, plus a couple of calls that touch guest
 * memory. */

use criterion::{criterion_group, criterion_main, Criterion};

use cage::{CageConfig, HostCapabilities, LinearMemory};
use rawposix::*;
use sysdefs::constants::lind_platform_const::WASM_PAGE_SIZE;
use typemap::syscall_conv::SyscallArgs;

use std::time::Duration;

pub fn run_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rawposix dispatch");

    // Reduce the time to reduce disk space needed and go faster.
    // Default is 5s...
    group.measurement_time(Duration::from_secs(3));

    // Shorten the warm up time as well from 3s to this...
    group.warm_up_time(Duration::from_secs(1));

    let mut cage = rawposix_start(
        &CageConfig::default(),
        LinearMemory::shared(WASM_PAGE_SIZE),
        HostCapabilities::headless(),
    );
    let none = SyscallArgs::none();

    group.bench_function("getpid by number (10K)", |b| {
        b.iter(|| {
            for _ in 0..10000 {
                lind_syscall_api(&mut cage, 39, &none);
            }
        })
    });

    group.bench_function("getpid by name (10K)", |b| {
        b.iter(|| {
            for _ in 0..10000 {
                syscall_by_name(&mut cage, "__syscall_getpid", &none);
            }
        })
    });

    let dup_close = [SyscallArgs::new(&[1]), SyscallArgs::new(&[3])];
    group.bench_function("dup+close (1K)", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                lind_syscall_api(&mut cage, 32, &dup_close[0]);
                lind_syscall_api(&mut cage, 3, &dup_close[1]);
            }
        })
    });

    let clock = SyscallArgs::new(&[1, 0x100]);
    group.bench_function("clock_gettime monotonic (1K)", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                lind_syscall_api(&mut cage, 228, &clock);
            }
        })
    });

    let random = SyscallArgs::new(&[0x100, 4096, 0]);
    group.bench_function("getrandom 4K", |b| {
        b.iter(|| lind_syscall_api(&mut cage, 318, &random))
    });

    group.finish();
}

criterion_group!(benches, run_benchmark);
criterion_main!(benches);
