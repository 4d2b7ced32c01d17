//! Office Open XML (DOCX/PPTX) container text extractor.
//!
//! Both formats are ZIP archives of XML parts. Word-processing documents
//! yield one text unit per paragraph of `word/document.xml`; slide decks
//! yield one unit per `ppt/slides/slide<N>.xml`, ordered by `N`.

pub mod archive;
pub mod output;
pub mod parser;

pub use archive::Container;
pub use output::{join_units, render_markdown};
pub use parser::{Extractor, MissingPartPolicy};
