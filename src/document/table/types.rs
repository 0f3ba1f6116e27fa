//! Table-related types

/// Grid column definition (w:gridCol)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridColumn {
    /// Width in twips
    pub width: Option<i32>,
}

/// Vertical merge type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VMerge {
    /// Start of a new vertical merge group
    Restart,
    /// Continuation of a vertical merge
    Continue,
}

/// A cell as it appears at one position of the table grid
#[derive(Clone, Copy, Debug)]
pub struct GridCell<'a, C> {
    /// Zero-based row index
    pub row: usize,
    /// Zero-based grid column index
    pub column: usize,
    /// The cell covering this position
    pub cell: &'a C,
}
