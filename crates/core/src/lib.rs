//! Core domain types and error taxonomy shared by the container text
//! extractor and the markup transducer.

pub mod block;
pub mod error;
pub mod types;

pub use block::{Block, ListKind, Span};
pub use error::{Error, Result};
pub use types::{ContainerKind, ContainerPart, TextUnit};
