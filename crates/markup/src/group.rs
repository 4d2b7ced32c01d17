//! Folding the flat block sequence into render groups.

use crate::state::OpenBlocks;
use docpipe_core::{Block, ListKind};
use serde::{Deserialize, Serialize};

/// A block, or a run of list items or table rows rendered together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "group", rename_all = "snake_case")]
pub enum Group {
    Single { block: Block },
    List { kind: ListKind, items: Vec<String> },
    Table { rows: Vec<Vec<String>> },
}

impl Group {
    fn start(block: Block) -> Self {
        match block {
            Block::ListItem { ordered, text } => Self::List {
                kind: ListKind::from_ordered(ordered),
                items: vec![text],
            },
            Block::TableRow { cells } => Self::Table { rows: vec![cells] },
            block => Self::Single { block },
        }
    }

    /// Append `block` to this group, handing it back if it does not fit.
    fn absorb(&mut self, block: Block) -> Option<Block> {
        match (self, block) {
            (Self::List { items, .. }, Block::ListItem { text, .. }) => {
                items.push(text);
                None
            }
            (Self::Table { rows }, Block::TableRow { cells }) => {
                rows.push(cells);
                None
            }
            (_, block) => Some(block),
        }
    }
}

/// Group consecutive list items of one kind and consecutive table rows.
pub fn group_blocks<I>(blocks: I) -> Vec<Group>
where
    I: IntoIterator<Item = Block>,
{
    let mut open = OpenBlocks::default();
    let mut groups: Vec<Group> = Vec::new();

    for block in blocks {
        let extends = open.observe(&block);
        let leftover = match groups.last_mut() {
            Some(last) if extends => last.absorb(block),
            _ => Some(block),
        };
        if let Some(block) = leftover {
            groups.push(Group::start(block));
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transduce;

    #[test]
    fn test_groups_lists_and_tables() {
        let blocks = transduce([
            "## Plan",
            "- research",
            "- apply",
            "1. first",
            "2. second",
            "",
            "|Company|Status|",
            "|---|---|",
            "|Acme|Applied|",
            "Done",
        ]);

        let groups = group_blocks(blocks);
        assert_eq!(
            groups,
            vec![
                Group::Single {
                    block: Block::Heading {
                        level: 2,
                        text: "Plan".into()
                    }
                },
                Group::List {
                    kind: ListKind::Unordered,
                    items: vec!["research".into(), "apply".into()],
                },
                Group::List {
                    kind: ListKind::Ordered,
                    items: vec!["first".into(), "second".into()],
                },
                Group::Single { block: Block::Blank },
                Group::Table {
                    rows: vec![
                        vec!["Company".into(), "Status".into()],
                        vec!["Acme".into(), "Applied".into()],
                    ],
                },
                Group::Single {
                    block: Block::plain_paragraph("Done")
                },
            ]
        );
    }

    #[test]
    fn test_interrupted_list_starts_new_group() {
        let groups = group_blocks(transduce(["- a", "text", "- b"]));
        assert_eq!(groups.len(), 3);
        assert!(matches!(&groups[2], Group::List { items, .. } if items == &["b"]));
    }
}
