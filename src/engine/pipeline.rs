//! Ordered move sources consulted by the engine facade.

use log::{debug, warn};

use crate::board::{Move, Position};
use crate::opening::OpeningLibrary;
use crate::search::{MoveSink, ParallelSearch};

/// Outcome of asking one source for a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provision {
    /// Synchronous answer; ends the chain.
    Provided(Move),
    /// The source keeps the sink and reports asynchronously; ends the chain.
    Started,
    /// Pass to the next source.
    Declined,
}

pub trait MoveSource: Send + Sync {
    fn provide(&self, position: &Position, sink: &MoveSink) -> Provision;
    /// Stops whatever determination is in flight.
    fn stop(&self) {}
    /// Releases held resources; the source declines afterwards.
    fn close(&self) { self.stop(); }
    fn name(&self) -> &'static str;
}

/// Answers from an opening library.
pub struct BookSource {
    library: Box<dyn OpeningLibrary>,
}

impl BookSource {
    pub fn new(library: Box<dyn OpeningLibrary>) -> Self { Self { library } }
}

impl MoveSource for BookSource {
    fn provide(&self, position: &Position, _sink: &MoveSink) -> Provision {
        match self.library.look_up_move(position) {
            Some(mv) => {
                debug!("opening book answers {mv}");
                Provision::Provided(mv)
            }
            None => Provision::Declined,
        }
    }

    fn name(&self) -> &'static str { "book" }
}

/// Starts a parallel search; terminal source of the chain.
pub struct SearchSource {
    search: ParallelSearch,
}

impl SearchSource {
    pub fn new(search: ParallelSearch) -> Self { Self { search } }
    pub fn search(&self) -> &ParallelSearch { &self.search }
}

impl MoveSource for SearchSource {
    fn provide(&self, position: &Position, sink: &MoveSink) -> Provision {
        match self.search.search_move(position, sink.clone()) {
            Ok(handle) => {
                debug!("search #{} started", handle.generation());
                Provision::Started
            }
            Err(e) => {
                warn!("search unavailable: {e}");
                Provision::Declined
            }
        }
    }

    fn stop(&self) { self.search.cancel_search(); }
    fn close(&self) { self.search.close(); }
    fn name(&self) -> &'static str { "search" }
}
