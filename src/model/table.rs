use super::Paragraph;

/// A table cell: a list of paragraphs, though only cell text is compared by
/// the differ.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.visible_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row: an ordered list of cells.
#[derive(Debug, Clone, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
}

/// Rows × columns.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column count taken from the widest row, since WordprocessingML
    /// tolerates ragged rows (merged cells, missing trailing cells).
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }
}
