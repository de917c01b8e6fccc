//! Mapping between the global plane and integer cell indices.
//!
//! A [`CoordinateRange`] is a rectangle of the global frame together with
//! the affine map onto a `max_x × max_y` grid of square cells:
//!
//! ```text
//!   top  ┌───┬───┬───┐
//!        │0,2│1,2│2,2│      cell (i, j) covers
//!        ├───┼───┼───┤        [left + i·g, left + (i+1)·g)
//!        │0,1│1,1│2,1│      × [bottom + j·g, bottom + (j+1)·g)
//!        ├───┼───┼───┤
//!        │0,0│1,0│2,0│      g = grid_size
//! bottom └───┴───┴───┘
//!       left        right
//! ```
//!
//! Global → local uses floor, local → global returns the cell centre.
//! Bounds are private and only change through
//! [`set_bounds`](CoordinateRange::set_bounds) or
//! [`shift`](CoordinateRange::shift), so the cell counts never disagree
//! with the rectangle.

mod bounds;
mod coordinate_range;
mod error;

pub use bounds::RangeBounds;
pub use coordinate_range::CoordinateRange;
pub use error::RangeError;
