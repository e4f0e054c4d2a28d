// Fixed-depth minimax and its root-parallel driver
pub mod cancel;
pub mod minimax;
pub mod parallel;
pub mod stream;

pub use cancel::CancelToken;
pub use minimax::{Minimax, MATE_BASE};
pub use parallel::{ParallelSearch, SearchHandle};
pub use stream::{MoveEvent, MoveSink, MoveStream};
