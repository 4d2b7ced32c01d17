//! Line classification into blocks.
//!
//! Each line is classified by the first rule that matches, in this order:
//!
//! 1. fence (```` ``` ````, optional language tag) toggles code mode
//! 2. `#` to `####` heading
//! 3. `---` rule
//! 4. `- ` / `* ` unordered item
//! 5. `<digit>... ". "` ordered item
//! 6. `|` table row, or a separator row that emits nothing
//! 7. paragraph with `**bold**` spans
//! 8. blank line
//! 9. plain paragraph
//!
//! Inside a code block only rule 1 applies.

use crate::inline::parse_spans;
use crate::state::TransducerState;
use docpipe_core::{Block, ListKind};

const FENCE: &str = "```";
const MAX_HEADING_LEVEL: usize = 4;

/// Result of classifying one line outside a code block.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Fence,
    Heading(u8, &'a str),
    Rule,
    ListItem(ListKind, &'a str),
    TableRow(Vec<String>),
    TableSeparator,
    Bold,
    Blank,
    Plain,
}

fn classify(line: &str) -> Line<'_> {
    if line.starts_with(FENCE) {
        return Line::Fence;
    }
    if let Some((level, text)) = heading(line) {
        return Line::Heading(level, text);
    }

    let trimmed = line.trim();
    if trimmed == "---" {
        return Line::Rule;
    }

    // Lists are flat; indentation before the marker is ignored.
    let unindented = line.trim_start();
    if let Some(text) = unindented
        .strip_prefix("- ")
        .or_else(|| unindented.strip_prefix("* "))
    {
        return Line::ListItem(ListKind::Unordered, text);
    }
    if unindented.starts_with(char::is_numeric) {
        if let Some((_, text)) = unindented.split_once(". ") {
            return Line::ListItem(ListKind::Ordered, text);
        }
    }

    if trimmed.starts_with('|') {
        let cells = table_cells(trimmed);
        if cells.iter().all(|c| c.starts_with('-')) {
            return Line::TableSeparator;
        }
        return Line::TableRow(cells);
    }

    if line.contains("**") {
        Line::Bold
    } else if trimmed.is_empty() {
        Line::Blank
    } else {
        Line::Plain
    }
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=MAX_HEADING_LEVEL).contains(&level) {
        return None;
    }
    let text = line[level..].strip_prefix(' ')?;
    Some((level as u8, text))
}

/// Split a trimmed `|`-prefixed line into trimmed cells, dropping the
/// pieces before the first and after the last `|`.
fn table_cells(trimmed: &str) -> Vec<String> {
    let pieces: Vec<&str> = trimmed.split('|').collect();
    pieces[1..pieces.len() - 1]
        .iter()
        .map(|c| c.trim().to_string())
        .collect()
}

/// Streaming transducer; feed lines with [`push_line`](Self::push_line).
#[derive(Debug, Default)]
pub struct Transducer {
    state: TransducerState,
    blocks: Vec<Block>,
}

impl Transducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TransducerState {
        &self.state
    }

    /// Blocks emitted so far. An open code block is not included until it closes.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Classify one line.
    pub fn push_line(&mut self, line: &str) {
        if self.state.in_code_block {
            if line.starts_with(FENCE) {
                self.close_code_block();
            } else {
                self.state.code_lines.push(line.to_string());
            }
            return;
        }

        let block = match classify(line) {
            Line::Fence => {
                self.state.in_code_block = true;
                self.state.open.close();
                return;
            }
            Line::TableSeparator => {
                self.state.open.observe_separator();
                return;
            }
            Line::Heading(level, text) => Block::Heading {
                level,
                text: text.to_string(),
            },
            Line::Rule => Block::Rule,
            Line::ListItem(kind, text) => Block::ListItem {
                ordered: kind.is_ordered(),
                text: text.to_string(),
            },
            Line::TableRow(cells) => Block::TableRow { cells },
            Line::Bold => Block::Paragraph {
                spans: parse_spans(line),
            },
            Line::Blank => Block::Blank,
            Line::Plain => Block::plain_paragraph(line),
        };

        self.emit(block);
    }

    /// End the pass, closing an unterminated code block.
    pub fn finish(mut self) -> Vec<Block> {
        if self.state.in_code_block {
            log::debug!(
                "Unterminated code fence, closing at end of input ({} line(s))",
                self.state.code_lines.len()
            );
            self.close_code_block();
        }
        self.blocks
    }

    fn close_code_block(&mut self) {
        self.state.in_code_block = false;
        let lines = std::mem::take(&mut self.state.code_lines);
        self.emit(Block::CodeBlock { lines });
    }

    fn emit(&mut self, block: Block) {
        self.state.open.observe(&block);
        self.blocks.push(block);
    }
}

/// Classify a sequence of lines into blocks.
pub fn transduce<I, S>(lines: I) -> Vec<Block>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut transducer = Transducer::new();
    for line in lines {
        transducer.push_line(line.as_ref());
    }
    transducer.finish()
}

/// Classify text split on `\n` or `\r\n` line breaks.
pub fn transduce_str(text: &str) -> Vec<Block> {
    transduce(text.lines())
}
