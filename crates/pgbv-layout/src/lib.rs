#![forbid(unsafe_code)]

//! Layout engine for table block maps.
//!
//! A table is drawn as two bands: an ancillary row holding every index and
//! the toast relation/index side by side, and the primary relation below it.
//!
//! - [`LayoutEngine::relation_grid_size`] - footprint of one relation, margin included
//! - [`LayoutEngine::ancillary_footprint`] - the ancillary row, left to right
//! - [`LayoutEngine::total_canvas_size`] - ancillary row stacked on the primary relation
//! - [`LayoutEngine::compose`] - placements in draw order (see [`compose`])
//!
//! All sizes are in grid cells. Scale them by [`LayoutConfig::block`] to get
//! pixels, or use [`LayoutEngine::pixel_size`].
//!
//! # Example
//!
//! ```
//! use pgbv_core::{Relation, Size, Table};
//! use pgbv_layout::{LayoutConfig, LayoutEngine};
//!
//! let table = Table::new(Relation::new("accounts", vec![0; 257]))
//!     .with_index(Relation::new("accounts_pkey", vec![0; 9]));
//!
//! let engine = LayoutEngine::new(LayoutConfig::default());
//! assert_eq!(engine.total_canvas_size(&table), Size::new(17, 19));
//! ```

pub mod compose;

pub use compose::{BlockCell, Composition, LABEL_EVERY, PlacedRelation, PlacementKind, PlacementStep};
pub use pgbv_core::geometry::{Coordinate, Rect, Size};

use pgbv_core::model::{Relation, Table};

/// Sizing parameters shared by every relation of one render.
///
/// Read-only once a render starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Size of one block, in pixels.
    pub block: Size,
    /// Spacing reserved after each relation, in cells.
    pub margin: Size,
    /// Grids this narrow or narrower get widened to `narrow_clamp`.
    pub narrow_threshold: u32,
    /// Width given to narrow grids so their label fits.
    pub narrow_clamp: u32,
    /// Where the first placement starts, in cells.
    pub origin: Coordinate,
}

impl LayoutConfig {
    /// Default narrow-grid threshold.
    pub const NARROW_THRESHOLD: u32 = 5;
    /// Default width for narrow grids.
    pub const NARROW_CLAMP: u32 = 10;

    /// Config with the given block and margin sizes and default floor rule.
    pub fn new(block: Size, margin: Size) -> Self {
        Self {
            block,
            margin,
            ..Self::default()
        }
    }

    /// Set the narrow-grid floor rule.
    #[must_use]
    pub fn narrow_floor(mut self, threshold: u32, clamp: u32) -> Self {
        self.narrow_threshold = threshold;
        self.narrow_clamp = clamp;
        self
    }

    /// Disable the narrow-grid floor rule.
    #[must_use]
    pub fn without_floor(self) -> Self {
        self.narrow_floor(0, 0)
    }

    /// Set the starting placement.
    #[must_use]
    pub fn origin(mut self, origin: Coordinate) -> Self {
        self.origin = origin;
        self
    }

    /// Check that the floor rule never narrows a grid.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutConfigError::ClampBelowThreshold`] when the clamp
    /// width is smaller than the threshold.
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        if self.narrow_clamp < self.narrow_threshold {
            return Err(LayoutConfigError::ClampBelowThreshold {
                threshold: self.narrow_threshold,
                clamp: self.narrow_clamp,
            });
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            block: Size::new(1, 1),
            margin: Size::ZERO,
            narrow_threshold: Self::NARROW_THRESHOLD,
            narrow_clamp: Self::NARROW_CLAMP,
            origin: Coordinate::new(1, 1),
        }
    }
}

/// Invalid [`LayoutConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutConfigError {
    /// The floor would shrink grids that are just at the threshold.
    ClampBelowThreshold { threshold: u32, clamp: u32 },
}

impl std::fmt::Display for LayoutConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClampBelowThreshold { threshold, clamp } => write!(
                f,
                "narrow clamp width {clamp} is below the narrow threshold {threshold}"
            ),
        }
    }
}

impl std::error::Error for LayoutConfigError {}

/// Computes footprints and placements for tables.
///
/// Pure: no I/O and no state besides its configuration, so one engine can
/// serve concurrent renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Engine with a validated configuration.
    ///
    /// # Errors
    ///
    /// See [`LayoutConfig::validate`].
    pub fn try_new(config: LayoutConfig) -> Result<Self, LayoutConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    #[inline]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Grid of a relation after the narrow floor, margin excluded.
    pub fn relation_frame(&self, relation: &Relation) -> Size {
        let mut frame = relation.grid_size();
        if !frame.is_empty() && frame.width <= self.config.narrow_threshold {
            frame.width = self.config.narrow_clamp;
        }
        frame
    }

    /// Footprint of a relation: its frame plus the margin.
    pub fn relation_grid_size(&self, relation: &Relation) -> Size {
        let mut footprint = self.relation_frame(relation);
        footprint.add(self.config.margin);
        tracing::debug!(
            relation = %relation.name,
            blocks = relation.len(),
            width = footprint.width,
            height = footprint.height,
            "relation footprint"
        );
        footprint
    }

    /// Footprint of the row holding indexes, then toast relation and toast index.
    pub fn ancillary_footprint(&self, table: &Table) -> Size {
        let mut row = Size::ZERO;
        for step in compose::placement_steps(table) {
            if step.kind.is_ancillary() {
                row.add_width_max_height(self.relation_grid_size(step.relation));
            }
        }
        row
    }

    /// Canvas size in cells: the ancillary row stacked on the primary relation.
    pub fn total_canvas_size(&self, table: &Table) -> Size {
        let mut total = self.relation_grid_size(&table.relation);
        total.add_height_max_width(self.ancillary_footprint(table));
        total
    }

    /// Canvas size in pixels, including the cells before the origin.
    pub fn pixel_size(&self, table: &Table) -> Size {
        let mut cells = self.total_canvas_size(table);
        cells.add(Size::new(self.config.origin.x, self.config.origin.y));
        cells.scale(self.config.block)
    }

    /// Place every relation of `table` in draw order.
    pub fn compose<'a>(&self, table: &'a Table) -> Composition<'a> {
        compose::compose(self, table)
    }
}
