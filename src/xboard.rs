//! Line-oriented XBoard (CECP) front-end adapter.
//!
//! Supports the handshake (`xboard`, `protover 2`), `new`, `go`, `quit` and
//! coordinate moves such as `e2e4` or `e7e8q`. Thinking runs on a separate
//! thread per determination; every improving candidate is reported as a
//! comment line and the final move as `move <coords>`.

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use crate::board::{Move, Position, Square};
use crate::engine::Engine;
use crate::rules;
use crate::search::{MoveEvent, MoveStream};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Session<E> {
    engine: E,
    position: Position,
    // bumped on every state change; stale determinations check it before moving
    generation: u64,
}

pub struct XBoard<E, W> {
    session: Arc<Mutex<Session<E>>>,
    out: Arc<Mutex<W>>,
    thinkers: Vec<JoinHandle<()>>,
}

fn write_line<W: Write>(out: &Mutex<W>, line: &str) -> io::Result<()> {
    let mut w = lock(out);
    writeln!(w, "{line}")?;
    w.flush()
}

/// Syntactic check for `[a-h][1-8][a-h][1-8][qrbn]?`.
pub fn is_coordinate_move(text: &str) -> bool {
    let b = text.as_bytes();
    let square = |f: u8, r: u8| (b'a'..=b'h').contains(&f) && (b'1'..=b'8').contains(&r);
    match b.len() {
        4 => square(b[0], b[1]) && square(b[2], b[3]),
        5 => square(b[0], b[1]) && square(b[2], b[3]) && b"qrbn".contains(&b[4]),
        _ => false,
    }
}

/// The legal move in `position` written as `text`, if any.
pub fn find_legal_move(position: &Position, text: &str) -> Option<Move> {
    if !is_coordinate_move(text) { return None; }
    let from: Square = text[0..2].parse().ok()?;
    let to: Square = text[2..4].parse().ok()?;
    rules::legal_moves(position)
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to && mv.coordinate() == text)
}

impl<E, W> XBoard<E, W>
where
    E: Engine + 'static,
    W: Write + Send + 'static,
{
    pub fn new(engine: E, output: W) -> Self {
        let position = engine.position();
        Self {
            session: Arc::new(Mutex::new(Session { engine, position, generation: 0 })),
            out: Arc::new(Mutex::new(output)),
            thinkers: Vec::new(),
        }
    }

    fn reply(&self, line: &str) -> io::Result<()> { write_line(&self.out, line) }

    /// Processes commands until `quit` or end of input, then closes the engine.
    /// At end of input any determination still running is allowed to finish.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let cmd = line.trim();
            debug!("xboard <- {cmd}");
            match cmd {
                "quit" => {
                    self.close_engine();
                    self.join_thinkers();
                    return Ok(());
                }
                "xboard" => self.reply("")?,
                "protover 2" => self.reply("feature done=1")?,
                "new" => {
                    let mut s = lock(&self.session);
                    s.generation += 1;
                    s.position = Position::starting();
                    s.engine.setup_pieces(Position::starting());
                }
                "go" => self.start_thinking(),
                _ if is_coordinate_move(cmd) => self.opponent_move(cmd)?,
                _ => self.reply(&format!("Error (unknown command): {cmd}"))?,
            }
        }
        self.join_thinkers();
        self.close_engine();
        Ok(())
    }

    fn opponent_move(&mut self, text: &str) -> io::Result<()> {
        {
            let mut s = lock(&self.session);
            let Some(mv) = find_legal_move(&s.position, text) else {
                drop(s);
                return self.reply(&format!("Illegal move: {text}"));
            };
            if let Err(e) = s.engine.perform_move(&mv) {
                warn!("engine refused {text}: {e}");
                drop(s);
                return self.reply(&format!("Illegal move: {text}"));
            }
            s.position = s.position.perform_move(&mv);
            s.generation += 1;
        }
        self.start_thinking();
        Ok(())
    }

    fn start_thinking(&mut self) {
        let (generation, stream) = {
            let mut s = lock(&self.session);
            s.generation += 1;
            (s.generation, s.engine.determine_your_move())
        };
        let session = Arc::clone(&self.session);
        let out = Arc::clone(&self.out);
        self.thinkers.retain(|t| !t.is_finished());
        self.thinkers.push(thread::spawn(move || {
            if let Err(e) = think(session, out, generation, stream) {
                warn!("xboard output failed: {e}");
            }
        }));
    }

    fn join_thinkers(&mut self) {
        for t in self.thinkers.drain(..) {
            if t.join().is_err() { warn!("thinking thread panicked"); }
        }
    }

    fn close_engine(&self) {
        let mut s = lock(&self.session);
        s.generation += 1;
        s.engine.close();
        info!("xboard session ended");
    }

    /// Game state as the adapter sees it.
    pub fn position(&self) -> Position { lock(&self.session).position }

    /// The writer, once no thinking thread holds it.
    pub fn into_output(mut self) -> Option<W> {
        self.join_thinkers();
        Arc::try_unwrap(self.out).ok().map(|m| m.into_inner().unwrap_or_else(PoisonError::into_inner))
    }
}

fn think<E: Engine, W: Write>(
    session: Arc<Mutex<Session<E>>>,
    out: Arc<Mutex<W>>,
    generation: u64,
    stream: MoveStream,
) -> io::Result<()> {
    let mut best = None;
    for ev in stream {
        match ev {
            MoveEvent::Candidate(mv) => {
                best = Some(mv);
                write_line(&out, &format!("# better move found: {mv}"))?;
            }
            MoveEvent::Completed => {
                let Some(mv) = best else {
                    info!("no move to play");
                    return Ok(());
                };
                let mut s = lock(&session);
                if s.generation != generation {
                    debug!("dropping {mv}: game state changed while thinking");
                    return Ok(());
                }
                write_line(&out, &format!("move {}", mv.coordinate()))?;
                if let Err(e) = s.engine.perform_move(&mv) {
                    warn!("engine rejected its own move {mv}: {e}");
                    return Ok(());
                }
                s.position = s.position.perform_move(&mv);
                s.generation += 1;
                return Ok(());
            }
        }
    }
    debug!("determination #{generation} ended without completing");
    Ok(())
}
