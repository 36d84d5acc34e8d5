#![forbid(unsafe_code)]

//! Relations, toast structures and tables.
//!
//! Everything here is built fresh for one render and read-only afterwards.

use crate::geometry::Size;

/// A free-space value for one block, as reported by `pg_freespace`.
pub type Metric = i16;

/// A named storage object with one metric per block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Relation {
    pub name: String,
    pub metrics: Vec<Metric>,
}

impl Relation {
    pub fn new(name: impl Into<String>, metrics: Vec<Metric>) -> Self {
        Self {
            name: name.into(),
            metrics,
        }
    }

    /// Number of blocks.
    #[inline]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Smallest near-square grid holding every block, scanned row-major.
    ///
    /// `width = ceil(sqrt(n))`, `height = ceil(n / width)`, and `{0, 0}` for an
    /// empty relation.
    pub fn grid_size(&self) -> Size {
        let n = self.len() as u64;
        if n == 0 {
            return Size::ZERO;
        }
        let width = ceil_sqrt(n);
        let height = n.div_ceil(width);
        Size::new(saturate(width), saturate(height))
    }
}

/// Integer `ceil(sqrt(n))`, exact for every `u64`.
fn ceil_sqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    // The float estimate can be off by one in either direction for large n.
    while root.saturating_mul(root) > n {
        root -= 1;
    }
    while root.saturating_mul(root) < n {
        root += 1;
    }
    root
}

fn saturate(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

/// Overflow storage of a table: the toast relation and its index.
///
/// Both parts are mandatory, a table without toast has no `Toast` at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Toast {
    pub relation: Relation,
    pub index: Relation,
}

impl Toast {
    pub fn new(relation: Relation, index: Relation) -> Self {
        Self { relation, index }
    }
}

/// A table with its indexes and optional toast storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// The primary heap relation.
    pub relation: Relation,
    /// Index relations, in display order.
    pub indexes: Vec<Relation>,
    pub toast: Option<Toast>,
}

impl Table {
    pub fn new(relation: Relation) -> Self {
        Self {
            relation,
            indexes: Vec::new(),
            toast: None,
        }
    }

    #[must_use]
    pub fn with_index(mut self, index: Relation) -> Self {
        self.indexes.push(index);
        self
    }

    #[must_use]
    pub fn with_toast(mut self, toast: Toast) -> Self {
        self.toast = Some(toast);
        self
    }

    /// Name of the primary relation.
    #[inline]
    pub fn name(&self) -> &str {
        &self.relation.name
    }

    /// Total number of relations drawn for this table.
    pub fn relation_count(&self) -> usize {
        1 + self.indexes.len() + if self.toast.is_some() { 2 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(n: usize) -> Relation {
        Relation::new("r", (0..n).map(|i| i as Metric).collect())
    }

    #[test]
    fn grid_size_of_empty_relation_is_zero() {
        assert_eq!(relation(0).grid_size(), Size::ZERO);
    }

    #[test]
    fn grid_size_known_values() {
        assert_eq!(relation(1).grid_size(), Size::new(1, 1));
        assert_eq!(relation(3).grid_size(), Size::new(2, 2));
        assert_eq!(relation(5).grid_size(), Size::new(3, 2));
        assert_eq!(relation(9).grid_size(), Size::new(3, 3));
        assert_eq!(relation(10).grid_size(), Size::new(4, 3));
        assert_eq!(relation(256).grid_size(), Size::new(16, 16));
        assert_eq!(relation(257).grid_size(), Size::new(17, 16));
    }

    #[test]
    fn ceil_sqrt_is_exact_around_perfect_squares() {
        for root in [1u64, 2, 3, 10, 4095, 65_535, 1 << 20, u32::MAX as u64] {
            let square = root * root;
            assert_eq!(ceil_sqrt(square), root);
            assert_eq!(ceil_sqrt(square + 1), root + 1);
            if square > 1 {
                assert_eq!(ceil_sqrt(square - 1), root);
            }
        }
    }

    #[test]
    fn relation_count_includes_both_toast_parts() {
        let table = Table::new(relation(4)).with_index(relation(2));
        assert_eq!(table.relation_count(), 2);
        let table = table.with_toast(Toast::new(relation(1), relation(1)));
        assert_eq!(table.relation_count(), 4);
    }

    #[test]
    fn table_name_is_primary_relation_name() {
        let table = Table::new(Relation::new("pgbench_accounts", vec![0; 3]));
        assert_eq!(table.name(), "pgbench_accounts");
        assert!(table.indexes.is_empty());
        assert!(table.toast.is_none());
    }
}
