//! Root-split parallel minimax.
//!
//! Every root move becomes one task on a fixed rayon pool. Tasks report to a
//! single aggregator that forwards strictly improving moves and signals
//! completion once all tasks of the generation have reported. Cancelling a
//! generation silences its aggregator; tasks still running short-circuit
//! through their `CancelToken` and their reports are dropped.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

use crate::board::{Move, Position};
use crate::error::EngineError;
use crate::rules;

use super::cancel::CancelToken;
use super::minimax::Minimax;
use super::stream::{MoveEvent, MoveSink};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Aggregator {
    generation: u64,
    sink: Option<MoveSink>,
    expected: usize,
    reported: usize,
    best: Option<i32>,
}

impl Aggregator {
    fn send(&mut self, ev: MoveEvent) {
        if let Some(tx) = &self.sink {
            if tx.send(ev).is_err() {
                debug!("search #{}: subscriber went away", self.generation);
                self.sink = None;
            }
        }
    }

    // The publish-if-better step; `score` is None for a faulted task.
    fn report(&mut self, mv: Move, score: Option<i32>) {
        if self.sink.is_none() { return; }
        self.reported += 1;
        if let Some(score) = score {
            if self.best.map_or(true, |b| score > b) {
                debug!("search #{}: {} improves to {}", self.generation, mv, score);
                self.best = Some(score);
                self.send(MoveEvent::Candidate(mv));
            }
        }
        if self.reported == self.expected {
            debug!("search #{}: all {} root moves reported", self.generation, self.expected);
            self.send(MoveEvent::Completed);
            self.sink = None;
        }
    }
}

/// Handle on one search generation.
#[derive(Clone)]
pub struct SearchHandle {
    generation: u64,
    cancel: CancelToken,
    aggregator: Arc<Mutex<Aggregator>>,
}

impl SearchHandle {
    pub fn generation(&self) -> u64 { self.generation }

    /// Voids the generation: nothing more is delivered once this returns.
    pub fn cancel(&self) {
        let mut agg = lock(&self.aggregator);
        self.cancel.cancel();
        agg.sink = None;
    }

    pub fn is_cancelled(&self) -> bool { self.cancel.is_cancelled() }

    /// True once the generation delivered completion or was cancelled.
    pub fn is_finished(&self) -> bool { lock(&self.aggregator).sink.is_none() }
}

pub struct ParallelSearch {
    minimax: Arc<Minimax>,
    pool: Mutex<Option<rayon::ThreadPool>>,
    current: Mutex<Option<SearchHandle>>,
    generation: AtomicU64,
    threads: usize,
}

impl ParallelSearch {
    /// Pool of `threads` workers, or one per available hardware thread.
    pub fn new(minimax: Minimax, threads: Option<usize>) -> Result<Self, EngineError> {
        let threads = threads
            .filter(|&t| t > 0)
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1));
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("dokchess-search-{i}"))
            .build()?;
        info!("search pool ready: {} threads, depth {}", threads, minimax.depth());
        Ok(Self {
            minimax: Arc::new(minimax),
            pool: Mutex::new(Some(pool)),
            current: Mutex::new(None),
            generation: AtomicU64::new(0),
            threads,
        })
    }

    pub fn threads(&self) -> usize { self.threads }
    pub fn minimax(&self) -> &Minimax { &self.minimax }

    /// Starts searching `position` and returns immediately. Results go to
    /// `sink`. Any search still running is cancelled first.
    pub fn search_move(&self, position: &Position, sink: MoveSink) -> Result<SearchHandle, EngineError> {
        // held until the new generation is registered; lock order is current, then pool
        let mut current = lock(&self.current);
        if let Some(previous) = current.take() {
            debug!("search #{}: superseded", previous.generation);
            previous.cancel();
        }
        let pool_guard = lock(&self.pool);
        let Some(pool) = pool_guard.as_ref() else { return Err(EngineError::Closed) };

        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let moves = rules::legal_moves(position);
        let aggregator = Arc::new(Mutex::new(Aggregator {
            generation,
            sink: Some(sink),
            expected: moves.len(),
            reported: 0,
            best: None,
        }));
        let handle = SearchHandle { generation, cancel: CancelToken::new(), aggregator: Arc::clone(&aggregator) };

        if moves.is_empty() {
            debug!("search #{generation}: no legal moves");
            let mut agg = lock(&aggregator);
            agg.send(MoveEvent::Completed);
            agg.sink = None;
            return Ok(handle);
        }

        debug!("search #{}: {} root moves", generation, moves.len());
        *current = Some(handle.clone());
        drop(current);
        let root = *position;
        for mv in moves {
            let minimax = Arc::clone(&self.minimax);
            let aggregator = Arc::clone(&aggregator);
            let cancel = handle.cancel.clone();
            pool.spawn(move || {
                if cancel.is_cancelled() { return; }
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| minimax.evaluate_root_move(&root, &mv, &cancel)));
                let score = match outcome {
                    Ok(s) => Some(s),
                    Err(_) => {
                        warn!("search #{generation}: evaluation of {mv} panicked; counting it without a score");
                        None
                    }
                };
                lock(&aggregator).report(mv, score);
            });
        }
        drop(pool_guard);
        Ok(handle)
    }

    pub fn cancel_search(&self) {
        if let Some(handle) = lock(&self.current).take() {
            debug!("search #{}: cancelled", handle.generation);
            handle.cancel();
        }
    }

    /// Cancels the running search and shuts the worker pool down. Idempotent.
    pub fn close(&self) {
        self.cancel_search();
        if lock(&self.pool).take().is_some() {
            info!("search pool closed");
        }
    }

    pub fn is_closed(&self) -> bool { lock(&self.pool).is_none() }
}

impl Drop for ParallelSearch {
    fn drop(&mut self) { self.cancel_search(); }
}
