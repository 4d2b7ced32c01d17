//! Joining extracted units into a single text blob.

use docpipe_core::{ContainerKind, TextUnit};

/// Join unit texts with the container kind's unit separator.
///
/// Paragraphs are separated by a blank line, slides by a `---` rule.
pub fn join_units(units: &[TextUnit], kind: ContainerKind) -> String {
    units
        .iter()
        .map(|u| u.text.as_str())
        .collect::<Vec<_>>()
        .join(kind.unit_separator())
}

/// Render units as markup the transducer understands.
///
/// Same as [`join_units`], except every slide is introduced by a
/// `## Slide <n>` heading.
pub fn render_markdown(units: &[TextUnit], kind: ContainerKind) -> String {
    match kind {
        ContainerKind::WordProcessing => join_units(units, kind),
        ContainerKind::SlideDeck => units
            .iter()
            .map(|u| format!("## Slide {}\n\n{}", u.ordinal, u.text))
            .collect::<Vec<_>>()
            .join(kind.unit_separator()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides() -> Vec<TextUnit> {
        vec![
            TextUnit::new(1, "Intro"),
            TextUnit::new(2, "Why AI\nmatters"),
            TextUnit::new(10, "Thanks"),
        ]
    }

    #[test]
    fn test_join_paragraphs() {
        let units = vec![TextUnit::new(0, "First"), TextUnit::new(1, "Second")];
        assert_eq!(
            join_units(&units, ContainerKind::WordProcessing),
            "First\n\nSecond"
        );
    }

    #[test]
    fn test_join_slides() {
        assert_eq!(
            join_units(&slides(), ContainerKind::SlideDeck),
            "Intro\n\n---\n\nWhy AI\nmatters\n\n---\n\nThanks"
        );
    }

    #[test]
    fn test_join_empty() {
        assert_eq!(join_units(&[], ContainerKind::SlideDeck), "");
    }

    #[test]
    fn test_render_markdown_slide_headings() {
        let expected = "## Slide 1\n\nIntro\n\n---\n\n## Slide 2\n\nWhy AI\nmatters\n\n---\n\n## Slide 10\n\nThanks";
        assert_eq!(render_markdown(&slides(), ContainerKind::SlideDeck), expected);
    }

    #[test]
    fn test_render_markdown_paragraphs_unchanged() {
        let units = vec![TextUnit::new(0, "# Not a slide")];
        assert_eq!(
            render_markdown(&units, ContainerKind::WordProcessing),
            "# Not a slide"
        );
    }

    #[test]
    fn test_rendered_slides_transduce_to_headings() {
        use docpipe_core::Block;

        let blocks = docpipe_markup::transduce_str(&render_markdown(&slides(), ContainerKind::SlideDeck));
        let headings: Vec<&Block> = blocks
            .iter()
            .filter(|b| matches!(b, Block::Heading { .. }))
            .collect();

        assert_eq!(
            headings,
            vec![
                &Block::Heading { level: 2, text: "Slide 1".into() },
                &Block::Heading { level: 2, text: "Slide 2".into() },
                &Block::Heading { level: 2, text: "Slide 10".into() },
            ]
        );
        assert_eq!(blocks.iter().filter(|b| **b == Block::Rule).count(), 2);
    }
}
