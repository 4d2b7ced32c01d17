//! Line-oriented markup transducer.
//!
//! Classifies each input line of a small Markdown-like dialect into a
//! [`Block`](docpipe_core::Block). Classification is total: every sequence
//! of lines produces a block sequence, never an error.

pub mod group;
pub mod inline;
pub mod state;
pub mod transducer;

pub use group::{group_blocks, Group};
pub use inline::parse_spans;
pub use state::{OpenBlocks, TransducerState};
pub use transducer::{transduce, transduce_str, Transducer};
