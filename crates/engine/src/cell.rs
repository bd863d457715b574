use chrono::NaiveDateTime;

/// A decoded worksheet cell.
///
/// Readers collapse their native cell types onto these four variants; the
/// row classifier only ever looks at this shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Date(NaiveDateTime),
    Number(f64),
    Text(String),
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Empty cells and zero-length text both count as "no value".
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Plain string form, used where a cell stands in for a name or an id.
    pub fn raw_display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Cell::Date(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// One worksheet as handed over by a reader: its title and its rows, each
/// row holding cells in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Worksheet {
    pub title: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Worksheet {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), rows: Vec::new() }
    }

    pub fn with_rows(title: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { title: title.into(), rows }
    }
}
