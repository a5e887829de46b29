//! Simple profiling using thread-local storage merged into global counters
//!
//! This module provides lightweight profiling without changing function signatures.
//! Enable with environment variable: GOMOKU_PROFILE=1, or `[profiling] enabled = true`.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Once;
use std::time::Instant;

/// What a timed section is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Candidates,
    Eval,
    RootCandidate,
}

impl Category {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        match self {
            Category::Candidates => 0,
            Category::Eval => 1,
            Category::RootCandidate => 2,
        }
    }
}

#[derive(Default)]
struct LocalCounters {
    time_ns: [u64; Category::COUNT],
    calls: [usize; Category::COUNT],
    nodes: usize,
    cutoffs: usize,
}

thread_local! {
    static LOCAL: RefCell<LocalCounters> = RefCell::new(LocalCounters::default());
}

static ENABLED: AtomicBool = AtomicBool::new(false);
static ENV_CHECK: Once = Once::new();

// Global aggregators
static GLOBAL_TIME_NS: [AtomicU64; Category::COUNT] =
    [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)];
static GLOBAL_CALLS: [AtomicUsize; Category::COUNT] =
    [AtomicUsize::new(0), AtomicUsize::new(0), AtomicUsize::new(0)];
static GLOBAL_NODES: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_CUTOFFS: AtomicUsize = AtomicUsize::new(0);

/// Turns profiling on regardless of the environment
pub fn enable() {
    ENABLED.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_profiling_enabled() -> bool {
    ENV_CHECK.call_once(|| {
        if std::env::var("GOMOKU_PROFILE").is_ok() {
            ENABLED.store(true, Ordering::Relaxed);
        }
    });
    ENABLED.load(Ordering::Relaxed)
}

pub struct ProfileGuard {
    start: Instant,
    category: Category,
}

impl ProfileGuard {
    pub fn new(category: Category) -> Option<Self> {
        if is_profiling_enabled() {
            Some(ProfileGuard {
                start: Instant::now(),
                category,
            })
        } else {
            None
        }
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        let elapsed_ns = self.start.elapsed().as_nanos() as u64;
        let idx = self.category.index();
        LOCAL.with(|l| {
            let mut l = l.borrow_mut();
            l.time_ns[idx] += elapsed_ns;
            l.calls[idx] += 1;
        });
    }
}

#[inline]
pub fn record_node() {
    if is_profiling_enabled() {
        LOCAL.with(|l| l.borrow_mut().nodes += 1);
    }
}

#[inline]
pub fn record_alpha_beta_cutoff() {
    if is_profiling_enabled() {
        LOCAL.with(|l| l.borrow_mut().cutoffs += 1);
    }
}

/// Folds this thread's counters into the global totals and clears them
pub fn merge_thread_local() {
    if !is_profiling_enabled() {
        return;
    }

    LOCAL.with(|l| {
        let local = std::mem::take(&mut *l.borrow_mut());
        for i in 0..Category::COUNT {
            GLOBAL_TIME_NS[i].fetch_add(local.time_ns[i], Ordering::Relaxed);
            GLOBAL_CALLS[i].fetch_add(local.calls[i], Ordering::Relaxed);
        }
        GLOBAL_NODES.fetch_add(local.nodes, Ordering::Relaxed);
        GLOBAL_CUTOFFS.fetch_add(local.cutoffs, Ordering::Relaxed);
    });
}

pub fn print_report(total_time_ms: u64) {
    if !is_profiling_enabled() {
        return;
    }

    let total_ns = total_time_ms * 1_000_000;

    eprintln!("\n═══════════════════════════════════════════════════════════");
    eprintln!("                 PERFORMANCE PROFILE");
    eprintln!("═══════════════════════════════════════════════════════════");
    eprintln!("Total Time: {}ms\n", total_time_ms);

    for (label, category) in [
        ("Candidate Generation", Category::Candidates),
        ("Evaluation", Category::Eval),
        ("Root Candidates", Category::RootCandidate),
    ] {
        let time = GLOBAL_TIME_NS[category.index()].load(Ordering::Relaxed);
        let calls = GLOBAL_CALLS[category.index()].load(Ordering::Relaxed);
        let ms = time as f64 / 1_000_000.0;
        let pct = if total_ns > 0 { 100.0 * time as f64 / total_ns as f64 } else { 0.0 };
        let avg_us = if calls > 0 { time as f64 / (calls * 1000) as f64 } else { 0.0 };

        eprintln!("{}:", label);
        eprintln!("  Time:     {:.2}ms ({:.1}%)", ms, pct);
        eprintln!("  Calls:    {}", calls);
        eprintln!("  Avg:      {:.2}µs/call\n", avg_us);
    }

    let nodes = GLOBAL_NODES.load(Ordering::Relaxed);
    let cutoffs = GLOBAL_CUTOFFS.load(Ordering::Relaxed);
    let cutoff_rate = if nodes > 0 { 100.0 * cutoffs as f64 / nodes as f64 } else { 0.0 };

    eprintln!("Search:");
    eprintln!("  Nodes:      {}", nodes);
    eprintln!("  Cutoffs:    {} ({:.1}% of nodes)\n", cutoffs, cutoff_rate);

    eprintln!("═══════════════════════════════════════════════════════════\n");
}

pub fn reset() {
    for i in 0..Category::COUNT {
        GLOBAL_TIME_NS[i].store(0, Ordering::Relaxed);
        GLOBAL_CALLS[i].store(0, Ordering::Relaxed);
    }
    GLOBAL_NODES.store(0, Ordering::Relaxed);
    GLOBAL_CUTOFFS.store(0, Ordering::Relaxed);
}
