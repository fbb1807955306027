//! Benchmarks for the frame scheduler: callbacks, coroutines and timers
//!
//! Run with: cargo bench scheduler

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use panelkit::{FrameScheduler, FrameTimer, Step};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// Scheduler context for these benches: a plain counter
#[derive(Default)]
struct Counter {
    hits: u64,
}

// ============================================================================
// Per-frame callbacks
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn tick_callbacks(bencher: divan::Bencher, callbacks: usize) {
    let scheduler: FrameScheduler<Counter> = FrameScheduler::new();
    for _ in 0..callbacks {
        scheduler.add(|ctx: &mut Counter, _| ctx.hits += 1);
    }
    let mut ctx = Counter::default();
    let mut now = Duration::ZERO;

    bencher.bench_local(|| {
        now += Duration::from_millis(16);
        scheduler.tick(now, &mut ctx);
    });
    divan::black_box(ctx.hits);
}

#[divan::bench(args = [100, 1000])]
fn add_remove_callbacks(callbacks: usize) {
    let scheduler: FrameScheduler<Counter> = FrameScheduler::new();
    let ids: Vec<_> = (0..callbacks)
        .map(|_| scheduler.add(|ctx: &mut Counter, _| ctx.hits += 1))
        .collect();
    for id in ids {
        scheduler.remove(id);
    }
    divan::black_box(scheduler.callback_count());
}

// ============================================================================
// Coroutines
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn drain_coroutines(bencher: divan::Bencher, coroutines: usize) {
    let scheduler: FrameScheduler<Counter> = FrameScheduler::new();
    let mut ctx = Counter::default();
    let mut now = Duration::ZERO;

    bencher.bench_local(|| {
        for _ in 0..coroutines {
            scheduler.schedule(|ctx: &mut Counter, _| {
                ctx.hits += 1;
                Step::Done
            });
        }
        now += Duration::from_millis(16);
        scheduler.tick(now, &mut ctx);
    });
    divan::black_box(ctx.hits);
}

#[divan::bench(args = [10, 100])]
fn yielding_coroutines(bencher: divan::Bencher, coroutines: usize) {
    let scheduler: FrameScheduler<Counter> = FrameScheduler::new();
    let mut ctx = Counter::default();
    let mut now = Duration::ZERO;

    // Each coroutine yields forever, so every tick re-queues all of them
    for _ in 0..coroutines {
        scheduler.schedule(|ctx: &mut Counter, _| {
            ctx.hits += 1;
            Step::Yield
        });
    }

    bencher.bench_local(|| {
        now += Duration::from_millis(16);
        scheduler.tick(now, &mut ctx);
    });
    divan::black_box(ctx.hits);
}

// ============================================================================
// Timers
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn tick_timers(bencher: divan::Bencher, timers: usize) {
    let scheduler: FrameScheduler<Counter> = FrameScheduler::new();
    let fired = Rc::new(Cell::new(0u64));
    let handles: Vec<_> = (0..timers)
        .map(|i| {
            let fired = Rc::clone(&fired);
            let delay = Duration::from_millis(16 * (1 + (i as u64 % 8)));
            let timer = FrameTimer::new(&scheduler, format!("timer-{}", i), delay, false, move |_: &mut Counter| {
                fired.set(fired.get() + 1);
                Ok(())
            });
            timer.start();
            timer
        })
        .collect();
    let mut ctx = Counter::default();
    let mut now = Duration::ZERO;

    bencher.bench_local(|| {
        now += Duration::from_millis(16);
        scheduler.tick(now, &mut ctx);
    });
    divan::black_box((fired.get(), handles.len()));
}
