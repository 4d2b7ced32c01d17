//! ZIP container access: opening archives, reading parts, locating slides.

use docpipe_core::{ContainerKind, ContainerPart, Error, Result};
use regex::Regex;
use std::io::{Read, Seek};
use std::sync::LazyLock;
use zip::result::ZipError;
use zip::ZipArchive;

/// Path of the main word-processing part.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Display form of the slide part naming pattern.
pub const SLIDE_PART_PATTERN: &str = "ppt/slides/slide<N>.xml";

/// Regex matching slide parts and capturing their numeric index.
static SLIDE_PART_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ppt/slides/slide(\d+)\.xml$").unwrap());

/// An opened OOXML container.
pub struct Container<R> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> Container<R> {
    /// Open a ZIP archive from a reader.
    pub fn open(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| Error::Container(format!("Failed to open ZIP: {}", e)))?;
        Ok(Self { archive })
    }

    /// Number of entries in the archive.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Whether the archive has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Whether the archive holds an entry with this exact name.
    pub fn has_part(&self, name: &str) -> bool {
        self.archive.file_names().any(|n| n == name)
    }

    /// Read a part into memory.
    ///
    /// Returns [`Error::MissingPart`] when no entry has this name.
    pub fn read_part(&mut self, name: &str) -> Result<ContainerPart> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => {
                return Err(Error::MissingPart {
                    part: name.to_string(),
                })
            }
            Err(e) => {
                return Err(Error::Container(format!(
                    "Failed to locate '{}': {}",
                    name, e
                )))
            }
        };

        // The declared size comes from the central directory and is not trusted.
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| Error::Container(format!("Failed to read '{}': {}", name, e)))?;

        log::debug!("Read part {} ({} bytes)", name, bytes.len());
        Ok(ContainerPart::new(name, bytes))
    }

    /// Slide part names paired with their index, in numeric index order.
    pub fn slide_parts(&self) -> Vec<(usize, String)> {
        let mut slides: Vec<(usize, String)> = self
            .archive
            .file_names()
            .filter_map(|name| match slide_index(name)? {
                Ok(index) => Some((index, name.to_string())),
                Err(()) => {
                    log::warn!("Skipping slide part with out-of-range index: {}", name);
                    None
                }
            })
            .collect();

        slides.sort();
        slides.dedup_by(|later, first| {
            let duplicate = later.0 == first.0;
            if duplicate {
                log::warn!(
                    "Skipping {}: slide index {} already taken by {}",
                    later.1,
                    later.0,
                    first.1
                );
            }
            duplicate
        });

        slides
    }

    /// Guess the container kind from the parts present.
    pub fn detect_kind(&self) -> Option<ContainerKind> {
        if self.has_part(DOCUMENT_PART) {
            Some(ContainerKind::WordProcessing)
        } else if self
            .archive
            .file_names()
            .any(|name| SLIDE_PART_REGEX.is_match(name))
        {
            Some(ContainerKind::SlideDeck)
        } else {
            None
        }
    }
}

/// Parse the numeric index out of a slide part name.
///
/// `None` if the name is not a slide part, `Some(Err(()))` if it is one but
/// the index does not fit in a `usize`.
fn slide_index(name: &str) -> Option<std::result::Result<usize, ()>> {
    let caps = SLIDE_PART_REGEX.captures(name)?;
    Some(caps[1].parse().map_err(|_| ()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    /// Build an in-memory ZIP archive from (name, content) pairs.
    pub(crate) fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn open(entries: &[(&str, &str)]) -> Container<Cursor<Vec<u8>>> {
        Container::open(Cursor::new(build_zip(entries))).unwrap()
    }

    #[test]
    fn test_slide_index() {
        assert_eq!(slide_index("ppt/slides/slide1.xml"), Some(Ok(1)));
        assert_eq!(slide_index("ppt/slides/slide123.xml"), Some(Ok(123)));
        assert_eq!(slide_index("ppt/slides/_rels/slide1.xml.rels"), None);
        assert_eq!(slide_index("ppt/slideLayouts/slideLayout1.xml"), None);
        assert_eq!(slide_index("ppt/slides/slide.xml"), None);
        assert_eq!(
            slide_index("ppt/slides/slide99999999999999999999999999.xml"),
            Some(Err(()))
        );
    }

    #[test]
    fn test_slide_parts_numeric_order() {
        let container = open(&[
            ("ppt/slides/slide10.xml", "<x/>"),
            ("ppt/slides/slide2.xml", "<x/>"),
            ("ppt/slides/_rels/slide2.xml.rels", "<x/>"),
            ("ppt/slides/slide1.xml", "<x/>"),
            ("ppt/presentation.xml", "<x/>"),
        ]);

        let indices: Vec<usize> = container.slide_parts().iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![1, 2, 10]);
    }

    #[test]
    fn test_slide_parts_duplicate_index() {
        let container = open(&[
            ("ppt/slides/slide1.xml", "<x/>"),
            ("ppt/slides/slide01.xml", "<x/>"),
        ]);

        let slides = container.slide_parts();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].1, "ppt/slides/slide01.xml");
    }

    #[test]
    fn test_read_part_missing() {
        let mut container = open(&[("docProps/app.xml", "<x/>")]);
        let err = container.read_part(DOCUMENT_PART).unwrap_err();
        assert!(err.is_missing_part());
        assert_eq!(err.part(), Some(DOCUMENT_PART));
    }

    /// A single stored entry whose central directory record declares a ZIP64
    /// uncompressed size of `u64::MAX`.
    fn zip64_with_declared_size(name: &str, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();

        // Local file header
        out.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
        out.extend_from_slice(&45u16.to_le_bytes());
        out.extend_from_slice(&[0; 8]); // flags, method (stored), time, date
        out.extend_from_slice(&0u32.to_le_bytes()); // crc
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(name.as_bytes());
        out.extend_from_slice(data);

        // Central directory header
        let cd_offset = out.len();
        out.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
        out.extend_from_slice(&45u16.to_le_bytes());
        out.extend_from_slice(&45u16.to_le_bytes());
        out.extend_from_slice(&[0; 8]);
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(&u32::MAX.to_le_bytes());
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&12u16.to_le_bytes()); // extra field length
        out.extend_from_slice(&[0; 6]); // comment len, disk, internal attrs
        out.extend_from_slice(&0u32.to_le_bytes()); // external attrs
        out.extend_from_slice(&0u32.to_le_bytes()); // local header offset
        out.extend_from_slice(name.as_bytes());
        out.extend_from_slice(&0x0001u16.to_le_bytes());
        out.extend_from_slice(&8u16.to_le_bytes());
        out.extend_from_slice(&u64::MAX.to_le_bytes());
        let cd_size = out.len() - cd_offset;

        // End of central directory
        out.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&(cd_size as u32).to_le_bytes());
        out.extend_from_slice(&(cd_offset as u32).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out
    }

    #[test]
    fn test_declared_size_is_not_preallocated() {
        let bytes = zip64_with_declared_size(DOCUMENT_PART, b"not xml");
        let result = crate::Extractor::new()
            .extract_bytes(&bytes, ContainerKind::WordProcessing);
        assert!(result.is_err());
    }

    #[test]
    fn test_len_and_is_empty() {
        let container = open(&[(DOCUMENT_PART, "<x/>"), ("docProps/app.xml", "<x/>")]);
        assert_eq!(container.len(), 2);
        assert!(!container.is_empty());
        assert!(open(&[]).is_empty());
    }

    #[test]
    fn test_read_part_bytes() {
        let mut container = open(&[(DOCUMENT_PART, "<w:document/>")]);
        let part = container.read_part(DOCUMENT_PART).unwrap();
        assert_eq!(part.name, DOCUMENT_PART);
        assert_eq!(part.bytes, b"<w:document/>");
    }

    #[test]
    fn test_open_rejects_non_zip() {
        let result = Container::open(Cursor::new(b"definitely not a zip".to_vec()));
        assert!(matches!(result, Err(Error::Container(_))));
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(
            open(&[(DOCUMENT_PART, "<x/>")]).detect_kind(),
            Some(ContainerKind::WordProcessing)
        );
        assert_eq!(
            open(&[("ppt/slides/slide1.xml", "<x/>")]).detect_kind(),
            Some(ContainerKind::SlideDeck)
        );
        assert_eq!(open(&[("mimetype", "x")]).detect_kind(), None);
    }
}
