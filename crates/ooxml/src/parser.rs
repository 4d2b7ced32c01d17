//! Namespace-aware text extraction from DOCX and PPTX parts.

use crate::archive::{Container, DOCUMENT_PART, SLIDE_PART_PATTERN};
use docpipe_core::{ContainerKind, ContainerPart, Error, Result, TextUnit};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// WordprocessingML main namespace.
pub const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// DrawingML main namespace, used for text inside slides.
pub const DRAWING_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

/// What to do when the expected part is absent from a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingPartPolicy {
    /// Treat the container as an empty document.
    #[default]
    Empty,
    /// Return [`Error::MissingPart`].
    Strict,
}

/// Extracts ordered text units from OOXML containers.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    missing_part: MissingPartPolicy,
}

impl Extractor {
    /// Create an extractor that treats missing parts as empty documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy for absent parts.
    pub fn with_missing_part_policy(mut self, policy: MissingPartPolicy) -> Self {
        self.missing_part = policy;
        self
    }

    /// Extract text units from a ZIP archive reader.
    pub fn extract<R: Read + Seek>(
        &self,
        reader: R,
        kind: ContainerKind,
    ) -> Result<Vec<TextUnit>> {
        let mut container = Container::open(reader)?;
        self.extract_container(&mut container, kind)
    }

    /// Extract text units from in-memory archive bytes.
    pub fn extract_bytes(&self, bytes: &[u8], kind: ContainerKind) -> Result<Vec<TextUnit>> {
        self.extract(Cursor::new(bytes), kind)
    }

    /// Extract text units from an archive on disk.
    pub fn extract_path(&self, path: &Path, kind: ContainerKind) -> Result<Vec<TextUnit>> {
        let file = File::open(path)?;
        self.extract(BufReader::new(file), kind)
    }

    /// Extract text units from an already opened container.
    pub fn extract_container<R: Read + Seek>(
        &self,
        container: &mut Container<R>,
        kind: ContainerKind,
    ) -> Result<Vec<TextUnit>> {
        let units = match kind {
            ContainerKind::WordProcessing => self.extract_paragraphs(container)?,
            ContainerKind::SlideDeck => self.extract_slides(container)?,
        };

        log::debug!("Extracted {} {} unit(s)", units.len(), kind.unit_name());
        Ok(units)
    }

    fn extract_paragraphs<R: Read + Seek>(
        &self,
        container: &mut Container<R>,
    ) -> Result<Vec<TextUnit>> {
        let part = match container.read_part(DOCUMENT_PART) {
            Ok(part) => part,
            Err(e) if e.is_missing_part() => return self.missing(e),
            Err(e) => return Err(e),
        };

        Ok(paragraphs_from_part(&part)?
            .into_iter()
            .enumerate()
            .map(|(ordinal, text)| TextUnit::new(ordinal, text))
            .collect())
    }

    fn extract_slides<R: Read + Seek>(
        &self,
        container: &mut Container<R>,
    ) -> Result<Vec<TextUnit>> {
        let slides = container.slide_parts();
        if slides.is_empty() {
            return self.missing(Error::MissingPart {
                part: SLIDE_PART_PATTERN.to_string(),
            });
        }

        log::debug!("Found {} slide part(s)", slides.len());

        let mut units = Vec::new();
        for (index, name) in slides {
            let part = container.read_part(&name)?;
            let runs = slide_runs_from_part(&part)?;
            if runs.is_empty() {
                log::debug!("Slide {} has no text, skipping", index);
                continue;
            }
            units.push(TextUnit::new(index, runs.join("\n")));
        }

        Ok(units)
    }

    fn missing(&self, err: Error) -> Result<Vec<TextUnit>> {
        match self.missing_part {
            MissingPartPolicy::Empty => {
                log::debug!("{}, treating as empty document", err);
                Ok(Vec::new())
            }
            MissingPartPolicy::Strict => Err(err),
        }
    }
}

/// Paragraph texts of a word-processing part, in document order.
///
/// Paragraphs without non-empty runs are dropped. A paragraph collects every
/// descendant run, so text inside a nested paragraph (e.g. a text box) shows
/// up in the enclosing paragraph as well as in its own unit.
pub fn paragraphs_from_part(part: &ContainerPart) -> Result<Vec<String>> {
    // Indexed by paragraph start order; `open` holds indices of enclosing paragraphs.
    let mut paragraphs: Vec<String> = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    walk_part(part, WORDPROCESSING_NS.as_bytes(), Some(b"p".as_slice()), |node| match node {
        Node::UnitStart => {
            open.push(paragraphs.len());
            paragraphs.push(String::new());
        }
        Node::UnitEnd => {
            open.pop();
        }
        Node::Run(text) => {
            for &idx in &open {
                paragraphs[idx].push_str(&text);
            }
        }
    })?;

    Ok(paragraphs.into_iter().filter(|p| !p.is_empty()).collect())
}

/// Non-empty run texts of a slide part, in document order.
pub fn slide_runs_from_part(part: &ContainerPart) -> Result<Vec<String>> {
    let mut runs = Vec::new();
    walk_part(part, DRAWING_NS.as_bytes(), None, |node| {
        if let Node::Run(text) = node {
            runs.push(text);
        }
    })?;
    Ok(runs)
}

/// Structural events reported while walking a part.
enum Node {
    UnitStart,
    UnitEnd,
    /// Complete, non-empty text of one `t` element.
    Run(String),
}

/// Walk a part, reporting unit boundaries and run text for elements bound
/// to `namespace`.
///
/// Elements with a matching local name in any other namespace are ignored.
fn walk_part<F>(
    part: &ContainerPart,
    namespace: &[u8],
    unit: Option<&[u8]>,
    mut visit: F,
) -> Result<()>
where
    F: FnMut(Node),
{
    let xml = std::str::from_utf8(&part.bytes)
        .map_err(|e| Error::malformed(&part.name, format!("invalid UTF-8: {}", e)))?;

    let mut reader = NsReader::from_str(xml);
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut run: Option<String> = None;

    let is_ours = |ns: &ResolveResult, local: &[u8], want: &[u8]| {
        matches!(ns, ResolveResult::Bound(Namespace(n)) if *n == namespace) && local == want
    };

    loop {
        let position = reader.buffer_position();
        let (ns, event) = reader.read_resolved_event().map_err(|e| {
            Error::malformed(&part.name, format!("{} (after byte {})", e, position))
        })?;

        match event {
            Event::Start(ref e) => {
                depth += 1;
                seen_root = true;
                let local = e.local_name();
                if unit.is_some_and(|u| is_ours(&ns, local.as_ref(), u)) {
                    visit(Node::UnitStart);
                } else if is_ours(&ns, local.as_ref(), b"t") {
                    run = Some(String::new());
                }
            }
            Event::Empty(ref e) => {
                seen_root = true;
                if unit.is_some_and(|u| is_ours(&ns, e.local_name().as_ref(), u)) {
                    visit(Node::UnitStart);
                    visit(Node::UnitEnd);
                }
            }
            Event::Text(ref e) => {
                if let Some(buf) = run.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| Error::malformed(&part.name, err))?;
                    buf.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(buf) = run.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                let local = e.local_name();
                if unit.is_some_and(|u| is_ours(&ns, local.as_ref(), u)) {
                    visit(Node::UnitEnd);
                } else if is_ours(&ns, local.as_ref(), b"t") {
                    if let Some(text) = run.take().filter(|t| !t.is_empty()) {
                        visit(Node::Run(text));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(Error::malformed(
            &part.name,
            "unexpected end of document: unclosed element",
        ));
    }
    if !seen_root {
        return Err(Error::malformed(&part.name, "no root element"));
    }

    Ok(())
}
