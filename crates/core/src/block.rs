//! Block model produced by the markup transducer.

use serde::{Deserialize, Serialize};

/// Kind of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    pub fn from_ordered(ordered: bool) -> Self {
        if ordered {
            Self::Ordered
        } else {
            Self::Unordered
        }
    }

    pub fn is_ordered(self) -> bool {
        self == Self::Ordered
    }
}

/// Inline run of paragraph text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// One classified unit of markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// `#` to `####` heading.
    Heading { level: u8, text: String },

    Paragraph { spans: Vec<Span> },

    /// Raw lines between fences, without the fence lines themselves.
    CodeBlock { lines: Vec<String> },

    ListItem { ordered: bool, text: String },

    /// Table row; header and body rows are not distinguished.
    TableRow { cells: Vec<String> },

    Rule,

    Blank,
}

impl Block {
    /// Paragraph consisting of a single literal span.
    pub fn plain_paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph {
            spans: vec![Span::plain(text)],
        }
    }

    /// Literal text of the block with inline markers stripped.
    ///
    /// Code block lines are joined with `\n`, table cells with ` | `.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Heading { text, .. } | Self::ListItem { text, .. } => text.clone(),
            Self::Paragraph { spans } => spans.iter().map(|s| s.text.as_str()).collect(),
            Self::CodeBlock { lines } => lines.join("\n"),
            Self::TableRow { cells } => cells.join(" | "),
            Self::Rule | Self::Blank => String::new(),
        }
    }

    /// List kind if this is a list item.
    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            Self::ListItem { ordered, .. } => Some(ListKind::from_ordered(*ordered)),
            _ => None,
        }
    }
}
