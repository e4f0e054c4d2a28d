//! Engine facade: game state plus the move-determination pipeline.

pub mod pipeline;

use log::{debug, info, warn};

use crate::board::{Move, Position};
use crate::error::EngineError;
use crate::opening::OpeningLibrary;
use crate::rules;
use crate::search::{Minimax, MoveEvent, MoveStream, ParallelSearch};

pub use pipeline::{BookSource, MoveSource, Provision, SearchSource};

pub const DEFAULT_DEPTH: u32 = 4;

pub trait Engine: Send {
    /// Replaces the game state and stops any running determination.
    fn setup_pieces(&mut self, position: Position);
    fn determine_your_move(&mut self) -> MoveStream;
    /// Applies a legal move to the game state and stops any running determination.
    fn perform_move(&mut self, mv: &Move) -> Result<(), EngineError>;
    fn close(&mut self);
    fn position(&self) -> Position;
}

pub struct DefaultEngine {
    position: Position,
    sources: Vec<Box<dyn MoveSource>>,
    closed: bool,
}

impl DefaultEngine {
    /// Material evaluation, depth 4, one worker per hardware thread, no book.
    pub fn new() -> Result<Self, EngineError> {
        Ok(Self::from_parts(ParallelSearch::new(Minimax::with_material(DEFAULT_DEPTH), None)?, None))
    }

    pub fn from_parts(search: ParallelSearch, book: Option<Box<dyn OpeningLibrary>>) -> Self {
        let mut sources: Vec<Box<dyn MoveSource>> = Vec::with_capacity(2);
        if let Some(book) = book { sources.push(Box::new(BookSource::new(book))); }
        sources.push(Box::new(SearchSource::new(search)));
        Self::from_sources(sources)
    }

    /// Sources are consulted in order until one provides or starts a determination.
    pub fn from_sources(sources: Vec<Box<dyn MoveSource>>) -> Self {
        let names: Vec<&str> = sources.iter().map(|s| s.name()).collect();
        info!("engine ready, move sources: {}", names.join(" -> "));
        Self { position: Position::starting(), sources, closed: false }
    }

    pub fn is_closed(&self) -> bool { self.closed }

    fn stop_all(&self) {
        for s in &self.sources { s.stop(); }
    }
}

impl Engine for DefaultEngine {
    fn setup_pieces(&mut self, position: Position) {
        self.stop_all();
        self.position = position;
    }

    fn determine_your_move(&mut self) -> MoveStream {
        if self.closed {
            warn!("determine_your_move called on a closed engine");
            return MoveStream::completed();
        }
        let (tx, stream) = MoveStream::channel();
        for source in &self.sources {
            match source.provide(&self.position, &tx) {
                Provision::Provided(mv) => {
                    debug!("{} provided {}", source.name(), mv);
                    let _ = tx.send(MoveEvent::Candidate(mv));
                    let _ = tx.send(MoveEvent::Completed);
                    return stream;
                }
                Provision::Started => return stream,
                Provision::Declined => {}
            }
        }
        debug!("every move source declined");
        let _ = tx.send(MoveEvent::Completed);
        stream
    }

    fn perform_move(&mut self, mv: &Move) -> Result<(), EngineError> {
        if self.closed { return Err(EngineError::Closed); }
        if !rules::legal_moves(&self.position).contains(mv) {
            return Err(EngineError::IllegalMove(*mv));
        }
        self.stop_all();
        self.position = self.position.perform_move(mv);
        Ok(())
    }

    fn close(&mut self) {
        if self.closed { return; }
        for s in &self.sources { s.close(); }
        self.closed = true;
        info!("engine closed");
    }

    fn position(&self) -> Position { self.position }
}

impl Drop for DefaultEngine {
    fn drop(&mut self) { self.close(); }
}
