#![forbid(unsafe_code)]

//! Table renderer.
//!
//! Turns a [`Composition`] into canvas calls. For each placement, in draw
//! order: the relation name centred above the grid, one colored rectangle per
//! block, then the block numbers of every labelled block on top.

use pgbv_core::geometry::{Coordinate, Size};
use pgbv_core::model::Table;
use pgbv_layout::{LayoutEngine, PlacedRelation};

use crate::canvas::{Canvas, Style};
use crate::color::ColorScale;

/// Failure while rendering a table.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The canvas could not complete its output.
    #[error("canvas failed: {0}")]
    Canvas(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

const BLOCK_CLASS: &str = "block";
const NAME_CLASS: &str = "relation-name";
const LABEL_CLASS: &str = "block-label";
const BLOCK_STROKE: &str = "stroke: black; stroke-width: 1";

/// Draws tables laid out by a [`LayoutEngine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer {
    engine: LayoutEngine,
    colors: ColorScale,
}

impl TableRenderer {
    pub fn new(engine: LayoutEngine) -> Self {
        Self {
            engine,
            colors: ColorScale::default(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, colors: ColorScale) -> Self {
        self.colors = colors;
        self
    }

    #[inline]
    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Render `table` onto `canvas` and finish it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Canvas`] when the canvas fails to finish.
    pub fn render<C: Canvas>(
        &self,
        table: &Table,
        mut canvas: C,
    ) -> Result<C::Output, RenderError> {
        self.draw(table, &mut canvas);
        canvas
            .finish()
            .map_err(|err| RenderError::Canvas(Box::new(err)))
    }

    /// Issue every draw call for `table` without finishing the canvas.
    pub fn draw<C: Canvas>(&self, table: &Table, canvas: &mut C) {
        let block = self.engine.config().block;
        let composition = self.engine.compose(table);
        canvas.start(self.engine.pixel_size(table));

        for placed in &composition.placements {
            tracing::info!(
                relation = %placed.relation.name,
                blocks = placed.relation.len(),
                "Drawing {}",
                placed.kind.label()
            );
            self.draw_name(placed, block, canvas);
            self.draw_blocks(placed, block, canvas);
        }
    }

    fn draw_name<C: Canvas>(&self, placed: &PlacedRelation<'_>, block: Size, canvas: &mut C) {
        let origin = placed.origin.scale(block);
        let half_width = placed.frame.scale(block).width / 2;
        let at = Coordinate::new(
            origin.offset(half_width, 0).x,
            origin.y.saturating_sub(block.height / 2),
        );
        let style = Style::class(NAME_CLASS).with_css("text-anchor: middle");
        canvas.text(at, &placed.relation.name, &style);
    }

    fn draw_blocks<C: Canvas>(&self, placed: &PlacedRelation<'_>, block: Size, canvas: &mut C) {
        for cell in placed.blocks() {
            let style = Style::class(BLOCK_CLASS)
                .with_id(format!("{}_{}", placed.relation.name, cell.index))
                .with_css(format!("{}; {BLOCK_STROKE}", self.colors.style(cell.metric)));
            canvas.rect(cell.pixel(block), block, &style);
        }

        let label = Style::class(LABEL_CLASS)
            .with_css("text-anchor: middle; dominant-baseline: middle");
        for cell in placed.blocks().filter(|cell| cell.has_label()) {
            canvas.text(cell.center_pixel(block), &cell.index.to_string(), &label);
        }
    }
}
