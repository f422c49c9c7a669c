//! Plain rectangle type shared by the layout engine and the display facade.

/// A placement in screen-pixel space. `w`/`h` describe the outer cell a
/// client has been allotted; border-width subtraction to get the content
/// size X actually draws happens at the point a geometry is applied (see
/// `wm::apply_geometry`), not here, so the layout math stays border-agnostic
/// and easy to check against the coverage invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Area in pixels, used by tests to check the coverage invariant.
    pub fn area(&self) -> i64 {
        self.w.max(0) as i64 * self.h.max(0) as i64
    }
}
