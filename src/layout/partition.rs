use crate::foundation::error::{ReelError, ReelResult};

/// Column slot of one item under round-robin assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ColumnAssignment {
    /// Column in `[0, column_count)`.
    pub column: usize,
    /// Position within that column.
    pub rank: usize,
}

impl ColumnAssignment {
    /// Slot of the item at input position `index`. `column_count` must be non-zero.
    pub fn for_index(index: usize, column_count: usize) -> ReelResult<Self> {
        check_columns(column_count)?;
        Ok(Self {
            column: index % column_count,
            rank: index / column_count,
        })
    }
}

/// Split `items` into `column_count` interleaved columns.
///
/// Item `i` goes to column `i % column_count`.
pub fn partition<T>(items: &[T], column_count: usize) -> ReelResult<Vec<Vec<&T>>> {
    check_columns(column_count)?;
    let mut columns: Vec<Vec<&T>> = (0..column_count)
        .map(|c| Vec::with_capacity(items.len().saturating_sub(c).div_ceil(column_count)))
        .collect();
    for (i, item) in items.iter().enumerate() {
        columns[i % column_count].push(item);
    }
    Ok(columns)
}

fn check_columns(column_count: usize) -> ReelResult<()> {
    if column_count == 0 {
        return Err(ReelError::invalid_config("column count must be >= 1"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/partition.rs"]
mod tests;
