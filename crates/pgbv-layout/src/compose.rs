#![forbid(unsafe_code)]

//! Draw sequencing.
//!
//! Relations are placed in a fixed order that is also the draw order:
//!
//! 1. every index, in table order, left to right from the origin
//! 2. the toast relation, then the toast index, continuing the same row
//! 3. the primary relation, back at the origin column, below the tallest
//!    member of that row
//!
//! [`placement_steps`] exposes this order as data. [`compose`] walks it with
//! a cursor and produces one [`PlacedRelation`] per step.

use pgbv_core::geometry::{Coordinate, Rect, Size};
use pgbv_core::model::{Metric, Relation, Table};

use crate::LayoutEngine;

/// A block-number label is drawn on every block whose index is a multiple of this.
pub const LABEL_EVERY: usize = 50;

/// Which part of the table a placement draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementKind {
    /// Index at this position in [`Table::indexes`].
    Index(usize),
    ToastRelation,
    ToastIndex,
    Primary,
}

impl PlacementKind {
    /// True for every member of the ancillary row.
    #[inline]
    pub const fn is_ancillary(self) -> bool {
        !matches!(self, Self::Primary)
    }

    /// Human-readable role, used in logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Index(_) => "index",
            Self::ToastRelation => "toast",
            Self::ToastIndex => "toast index",
            Self::Primary => "table",
        }
    }
}

/// One entry of the fixed draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementStep<'a> {
    pub kind: PlacementKind,
    pub relation: &'a Relation,
}

/// The draw order for `table`: indexes, toast relation, toast index, primary.
pub fn placement_steps(table: &Table) -> Vec<PlacementStep<'_>> {
    let mut steps = Vec::with_capacity(table.relation_count());
    steps.extend(
        table
            .indexes
            .iter()
            .enumerate()
            .map(|(i, relation)| PlacementStep {
                kind: PlacementKind::Index(i),
                relation,
            }),
    );
    if let Some(toast) = &table.toast {
        steps.push(PlacementStep {
            kind: PlacementKind::ToastRelation,
            relation: &toast.relation,
        });
        steps.push(PlacementStep {
            kind: PlacementKind::ToastIndex,
            relation: &toast.index,
        });
    }
    steps.push(PlacementStep {
        kind: PlacementKind::Primary,
        relation: &table.relation,
    });
    steps
}

/// A relation with its position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedRelation<'a> {
    pub kind: PlacementKind,
    pub relation: &'a Relation,
    /// Top-left cell of the relation's grid.
    pub origin: Coordinate,
    /// Cells reserved for the relation, margin included.
    pub footprint: Size,
    /// Cells reserved for the relation, margin excluded.
    pub frame: Size,
    /// Blocks per grid row.
    pub columns: u32,
}

impl<'a> PlacedRelation<'a> {
    /// Area reserved for the relation.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin(self.origin, self.footprint)
    }

    /// Cell of block `index`, relative to the canvas.
    #[inline]
    pub fn cell_of(&self, index: usize) -> Coordinate {
        let columns = self.columns.max(1) as usize;
        let column = (index % columns) as u32;
        let row = (index / columns) as u32;
        self.origin.offset(column, row)
    }

    /// Every block in order, laid out row-major over [`Self::columns`].
    pub fn blocks(&self) -> impl Iterator<Item = BlockCell> + use<'a> {
        let columns = self.columns.max(1) as usize;
        let origin = self.origin;
        self.relation
            .metrics
            .iter()
            .enumerate()
            .map(move |(index, &metric)| {
                let column = (index % columns) as u32;
                let row = (index / columns) as u32;
                BlockCell {
                    index,
                    column,
                    row,
                    metric,
                    cell: origin.offset(column, row),
                }
            })
    }
}

/// One block of a placed relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCell {
    /// Block number inside the relation.
    pub index: usize,
    pub column: u32,
    pub row: u32,
    pub metric: Metric,
    /// Absolute cell on the canvas.
    pub cell: Coordinate,
}

impl BlockCell {
    /// Whether the block number is drawn over this block.
    #[inline]
    pub const fn has_label(&self) -> bool {
        self.index % LABEL_EVERY == 0
    }

    /// Top-left pixel of the block.
    #[inline]
    pub const fn pixel(&self, block: Size) -> Coordinate {
        self.cell.scale(block)
    }

    /// Center pixel of the block.
    #[inline]
    pub const fn center_pixel(&self, block: Size) -> Coordinate {
        self.cell
            .scale(block)
            .offset(block.width / 2, block.height / 2)
    }
}

/// All placements of a table, in draw order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition<'a> {
    pub placements: Vec<PlacedRelation<'a>>,
    /// Cells covered by all placements, from the origin.
    pub canvas: Size,
}

impl<'a> Composition<'a> {
    /// Placement kinds in draw order.
    pub fn order(&self) -> Vec<PlacementKind> {
        self.placements.iter().map(|p| p.kind).collect()
    }

    /// The primary relation's placement.
    pub fn primary(&self) -> Option<&PlacedRelation<'a>> {
        self.placements
            .iter()
            .find(|p| p.kind == PlacementKind::Primary)
    }

    /// Total number of blocks drawn.
    pub fn block_count(&self) -> usize {
        self.placements.iter().map(|p| p.relation.len()).sum()
    }
}

/// Walk the fixed draw order, advancing a cursor after each placement.
pub fn compose<'a>(engine: &LayoutEngine, table: &'a Table) -> Composition<'a> {
    let origin = engine.config().origin;
    let mut cursor = origin;
    let mut row_total = Size::ZERO;
    let mut placements = Vec::with_capacity(table.relation_count());

    for step in placement_steps(table) {
        if step.kind == PlacementKind::Primary {
            cursor = origin;
            cursor.advance_y(row_total);
        }

        let footprint = engine.relation_grid_size(step.relation);
        placements.push(PlacedRelation {
            kind: step.kind,
            relation: step.relation,
            origin: cursor,
            footprint,
            frame: engine.relation_frame(step.relation),
            columns: step.relation.grid_size().width,
        });

        if step.kind.is_ancillary() {
            cursor.advance_x(footprint);
            row_total.add_width_max_height(footprint);
        }
    }

    Composition {
        placements,
        canvas: engine.total_canvas_size(table),
    }
}
