#![forbid(unsafe_code)]

//! Grid geometry primitives.
//!
//! All values are in grid cells unless a caller explicitly scales them by a
//! block size. Origin is top-left, `x` grows right and `y` grows down.

/// A width/height pair.
///
/// Sizes are accumulated in place: [`Size::add`] grows both axes,
/// [`Size::add_width_max_height`] lays sizes out left-to-right and
/// [`Size::add_height_max_width`] stacks them top-to-bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if the size covers no cell.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of cells covered.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Grow both axes by `other`.
    #[inline]
    pub fn add(&mut self, other: Size) {
        self.width = self.width.saturating_add(other.width);
        self.height = self.height.saturating_add(other.height);
    }

    /// Place `other` to the right: widths add up, the tallest height wins.
    #[inline]
    pub fn add_width_max_height(&mut self, other: Size) {
        self.width = self.width.saturating_add(other.width);
        self.height = self.height.max(other.height);
    }

    /// Place `other` below: heights add up, the widest width wins.
    #[inline]
    pub fn add_height_max_width(&mut self, other: Size) {
        self.height = self.height.saturating_add(other.height);
        self.width = self.width.max(other.width);
    }

    /// Component-wise product, used to turn cells into pixels.
    #[inline]
    pub const fn scale(&self, factor: Size) -> Size {
        Size::new(
            self.width.saturating_mul(factor.width),
            self.height.saturating_mul(factor.height),
        )
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// A position on the grid.
///
/// A coordinate only moves along one axis at a time, by the width or the
/// height of a [`Size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    /// The top-left corner.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Move right by the width of `size`.
    #[inline]
    pub fn advance_x(&mut self, size: Size) {
        self.x = self.x.saturating_add(size.width);
    }

    /// Move down by the height of `size`.
    #[inline]
    pub fn advance_y(&mut self, size: Size) {
        self.y = self.y.saturating_add(size.height);
    }

    /// Component-wise product, used to turn cells into pixels.
    #[inline]
    pub const fn scale(&self, factor: Size) -> Coordinate {
        Coordinate::new(
            self.x.saturating_mul(factor.width),
            self.y.saturating_mul(factor.height),
        )
    }

    /// Offset by a cell delta on both axes.
    #[inline]
    pub const fn offset(&self, dx: u32, dy: u32) -> Coordinate {
        Coordinate::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl From<(u32, u32)> for Coordinate {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

/// The area covered by a placed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at `origin` covering `size`.
    #[inline]
    pub const fn from_origin(origin: Coordinate, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether cell `(x, y)` is covered.
    #[inline]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether `other` fits inside.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shared cells, if any.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Whether any cell is shared.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.intersection_opt(other).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinate, Rect, Size};

    #[test]
    fn add_grows_both_axes() {
        let mut s = Size::new(2, 3);
        s.add(Size::new(1, 2));
        assert_eq!(s, Size::new(3, 5));
    }

    #[test]
    fn add_width_max_height_builds_a_row() {
        let mut row = Size::ZERO;
        row.add_width_max_height(Size::new(3, 3));
        row.add_width_max_height(Size::new(2, 5));
        row.add_width_max_height(Size::new(4, 1));
        assert_eq!(row, Size::new(9, 5));
    }

    #[test]
    fn add_height_max_width_builds_a_column() {
        let mut column = Size::new(17, 16);
        column.add_height_max_width(Size::new(10, 3));
        assert_eq!(column, Size::new(17, 19));

        let mut column = Size::new(4, 2);
        column.add_height_max_width(Size::new(10, 3));
        assert_eq!(column, Size::new(10, 5));
    }

    #[test]
    fn scale_turns_cells_into_pixels() {
        assert_eq!(Size::new(3, 4).scale(Size::new(10, 20)), Size::new(30, 80));
    }

    #[test]
    fn size_saturates_instead_of_wrapping() {
        let mut s = Size::new(u32::MAX - 1, 0);
        s.add(Size::new(5, 0));
        assert_eq!(s.width, u32::MAX);
        assert_eq!(Size::new(u32::MAX, 2).scale(Size::new(2, 2)).width, u32::MAX);
    }

    #[test]
    fn size_area_and_empty() {
        assert_eq!(Size::new(17, 16).area(), 272);
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(3, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn coordinate_advances_one_axis_at_a_time() {
        let mut c = Coordinate::new(1, 1);
        c.advance_x(Size::new(10, 7));
        assert_eq!(c, Coordinate::new(11, 1));
        c.advance_y(Size::new(10, 7));
        assert_eq!(c, Coordinate::new(11, 8));
    }

    #[test]
    fn coordinate_scale_and_offset() {
        let c = Coordinate::new(2, 3).offset(1, 1);
        assert_eq!(c, Coordinate::new(3, 4));
        assert_eq!(c.scale(Size::new(10, 20)), Coordinate::new(30, 80));
    }

    // --- Rect ---

    #[test]
    fn rect_edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
    }

    #[test]
    fn rect_contains_boundary_conditions() {
        let r = Rect::new(0, 0, 5, 5);
        assert!(r.contains(0, 0));
        assert!(r.contains(4, 4));
        // Right and bottom edges are exclusive
        assert!(!r.contains(5, 0));
        assert!(!r.contains(0, 5));
    }

    #[test]
    fn rect_adjacent_does_not_overlap() {
        let a = Rect::new(0, 0, 5, 5);
        let b = Rect::new(5, 0, 5, 5);
        assert!(!a.overlaps(&b));
        assert_eq!(a.intersection_opt(&b), None);
    }

    #[test]
    fn rect_intersection_some_for_overlap() {
        let a = Rect::new(0, 0, 5, 5);
        let b = Rect::new(3, 3, 5, 5);
        assert_eq!(a.intersection_opt(&b), Some(Rect::new(3, 3, 2, 2)));
    }

    #[test]
    fn empty_rect_overlaps_nothing() {
        let empty = Rect::new(2, 2, 0, 0);
        assert!(!empty.overlaps(&Rect::new(0, 0, 10, 10)));
    }

    #[test]
    fn rect_contains_rect() {
        let outer = Rect::from_origin(Coordinate::new(0, 0), Size::new(10, 10));
        assert!(outer.contains_rect(&Rect::new(2, 2, 8, 8)));
        assert!(!outer.contains_rect(&Rect::new(2, 2, 9, 8)));
    }
}
