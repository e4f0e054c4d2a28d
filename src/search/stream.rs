use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use crate::board::Move;

/// One step of a move determination: an improved candidate, or the end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveEvent {
    Candidate(Move),
    Completed,
}

pub type MoveSink = Sender<MoveEvent>;

/// Receiving side of a move determination.
///
/// Yields zero or more `Candidate`s followed by one `Completed`. If the
/// determination is cancelled the producers drop their senders and the
/// iterator ends without a `Completed` event.
#[derive(Debug)]
pub struct MoveStream {
    rx: Receiver<MoveEvent>,
    done: bool,
}

impl MoveStream {
    pub fn channel() -> (MoveSink, MoveStream) {
        let (tx, rx) = mpsc::channel();
        (tx, MoveStream { rx, done: false })
    }

    /// A stream that completes without any candidate.
    pub fn completed() -> MoveStream {
        let (tx, stream) = Self::channel();
        let _ = tx.send(MoveEvent::Completed);
        stream
    }

    fn observe(&mut self, ev: MoveEvent) -> MoveEvent {
        if ev == MoveEvent::Completed { self.done = true; }
        ev
    }

    /// Non-blocking poll; `None` if nothing is pending or the stream ended.
    pub fn try_next(&mut self) -> Option<MoveEvent> {
        if self.done { return None; }
        match self.rx.try_recv() {
            Ok(ev) => Some(self.observe(ev)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => { self.done = true; None }
        }
    }

    /// Waits up to `timeout` for the next event. `Err(Timeout)` leaves the
    /// stream usable; `Err(Disconnected)` means it ended.
    pub fn next_timeout(&mut self, timeout: Duration) -> Result<MoveEvent, RecvTimeoutError> {
        if self.done { return Err(RecvTimeoutError::Disconnected); }
        match self.rx.recv_timeout(timeout) {
            Ok(ev) => Ok(self.observe(ev)),
            Err(RecvTimeoutError::Disconnected) => { self.done = true; Err(RecvTimeoutError::Disconnected) }
            Err(e) => Err(e),
        }
    }

    /// Blocks until the stream ends. Returns the last candidate if the
    /// determination completed, `None` if it produced nothing or was cancelled.
    pub fn best_move(self) -> Option<Move> {
        let mut last = None;
        for ev in self {
            match ev {
                MoveEvent::Candidate(mv) => last = Some(mv),
                MoveEvent::Completed => return last,
            }
        }
        None
    }
}

impl Iterator for MoveStream {
    type Item = MoveEvent;

    fn next(&mut self) -> Option<MoveEvent> {
        if self.done { return None; }
        match self.rx.recv() {
            Ok(ev) => Some(self.observe(ev)),
            Err(_) => { self.done = true; None }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;

    #[test]
    fn completed_stream_has_no_candidate() {
        let mut s = MoveStream::completed();
        assert_eq!(s.next(), Some(MoveEvent::Completed));
        assert_eq!(s.next(), None);
    }

    #[test]
    fn best_move_is_last_candidate_before_completion() {
        let moves = rules::legal_moves(&rules::starting_position());
        let (tx, s) = MoveStream::channel();
        tx.send(MoveEvent::Candidate(moves[0])).unwrap();
        tx.send(MoveEvent::Candidate(moves[1])).unwrap();
        tx.send(MoveEvent::Completed).unwrap();
        assert_eq!(s.best_move(), Some(moves[1]));
    }

    #[test]
    fn dropped_sender_without_completion_yields_none() {
        let moves = rules::legal_moves(&rules::starting_position());
        let (tx, s) = MoveStream::channel();
        tx.send(MoveEvent::Candidate(moves[0])).unwrap();
        drop(tx);
        assert_eq!(s.best_move(), None);
    }
}
