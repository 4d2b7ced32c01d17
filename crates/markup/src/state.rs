//! Explicit state carried through one transduction pass.

use docpipe_core::{Block, ListKind};

/// Which multi-line construct is currently open.
///
/// Updated on every classified line, so closing a list or table never
/// requires looking back at blocks already emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenBlocks {
    list: Option<ListKind>,
    table: bool,
}

impl OpenBlocks {
    pub fn open_list(&self) -> Option<ListKind> {
        self.list
    }

    pub fn in_table(&self) -> bool {
        self.table
    }

    /// Whether `block` continues the open list or table.
    pub fn extends(&self, block: &Block) -> bool {
        match block {
            Block::ListItem { ordered, .. } => self.list == Some(ListKind::from_ordered(*ordered)),
            Block::TableRow { .. } => self.table,
            _ => false,
        }
    }

    /// Record an emitted block. Returns whether it continued the open construct.
    pub fn observe(&mut self, block: &Block) -> bool {
        let extends = self.extends(block);
        self.list = block.list_kind();
        self.table = matches!(block, Block::TableRow { .. });
        extends
    }

    /// Record a table separator line, which emits no block.
    pub fn observe_separator(&mut self) {
        self.list = None;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }
}

/// Process state of a single transduction pass.
#[derive(Debug, Clone, Default)]
pub struct TransducerState {
    pub(crate) in_code_block: bool,
    pub(crate) code_lines: Vec<String>,
    pub(crate) open: OpenBlocks,
}

impl TransducerState {
    pub fn in_code_block(&self) -> bool {
        self.in_code_block
    }

    pub fn open_list(&self) -> Option<ListKind> {
        self.open.open_list()
    }

    pub fn in_table(&self) -> bool {
        self.open.in_table()
    }
}
