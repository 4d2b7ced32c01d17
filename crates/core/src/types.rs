//! Domain types for representing extracted container content.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The kind of OOXML container being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Word-processing document (.docx), one unit per paragraph.
    WordProcessing,
    /// Slide deck (.pptx), one unit per slide.
    SlideDeck,
}

impl ContainerKind {
    /// Detect kind from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "docx" => Some(Self::WordProcessing),
            "pptx" => Some(Self::SlideDeck),
            _ => None,
        }
    }

    /// Detect kind from the extension of a path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Separator placed between units when joining them into one text blob.
    pub fn unit_separator(self) -> &'static str {
        match self {
            Self::WordProcessing => "\n\n",
            Self::SlideDeck => "\n\n---\n\n",
        }
    }

    /// Human-readable name of the structural unit.
    pub fn unit_name(self) -> &'static str {
        match self {
            Self::WordProcessing => "paragraph",
            Self::SlideDeck => "slide",
        }
    }
}

/// A named entry of a container holding raw XML bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerPart {
    /// Path of the entry inside the archive.
    pub name: String,

    /// Raw XML content.
    pub bytes: Vec<u8>,
}

impl ContainerPart {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// One paragraph or slide worth of extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    /// Emission order for paragraphs, slide index for slides.
    pub ordinal: usize,

    /// Concatenated run text.
    pub text: String,
}

impl TextUnit {
    pub fn new(ordinal: usize, text: impl Into<String>) -> Self {
        Self {
            ordinal,
            text: text.into(),
        }
    }
}
