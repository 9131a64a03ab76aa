use glam::IVec2;
use serde::{Deserialize, Serialize};

/// One of the four boundary sides of a box.
///
/// The declaration order is the resolution order: top, left, right, bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Left,
    Right,
    Bottom,
}

impl Side {
    /// All sides in resolution order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Left, Side::Right, Side::Bottom];

    /// Position of this side in [`Side::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A line segment between two integer points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: IVec2,
    pub end: IVec2,
}

impl Segment {
    pub const fn new(start: IVec2, end: IVec2) -> Self {
        Self { start, end }
    }
}

/// Integer axis-aligned bounding box in screen space (y grows downward).
///
/// `right()` and `bottom()` are exclusive: a box at `x = 0` with `w = 10`
/// covers columns `0..=9` and its right edge sits at `x = 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of the given size whose [`Rect::center`] is `center`.
    pub fn from_center(center: IVec2, w: i32, h: i32) -> Self {
        Self::new(center.x - w / 2, center.y - h / 2, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn top_left(&self) -> IVec2 {
        IVec2::new(self.left(), self.top())
    }

    pub fn top_right(&self) -> IVec2 {
        IVec2::new(self.right(), self.top())
    }

    pub fn bottom_left(&self) -> IVec2 {
        IVec2::new(self.left(), self.bottom())
    }

    pub fn bottom_right(&self) -> IVec2 {
        IVec2::new(self.right(), self.bottom())
    }

    /// Center point, rounded toward the top-left for odd sizes.
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn translate(&mut self, delta: IVec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    pub fn translated(mut self, delta: IVec2) -> Self {
        self.translate(delta);
        self
    }

    /// Scale about the center, keeping the center fixed.
    pub fn scaled(&self, factor: f32) -> Self {
        let w = (self.w as f32 * factor).round() as i32;
        let h = (self.h as f32 * factor).round() as i32;
        Self::new(self.x + (self.w - w) / 2, self.y + (self.h - h) / 2, w, h)
    }

    /// Grow by `by` pixels on every side.
    pub fn inflated(&self, by: i32) -> Self {
        Self::new(self.x - by, self.y - by, self.w + 2 * by, self.h + 2 * by)
    }

    fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Column ranges share at least one pixel.
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.left() < other.right() && other.left() < self.right()
    }

    /// Overlapping `other`, or standing on its top edge with at least one
    /// column above it. Side and corner contact give no support.
    pub fn rests_on(&self, other: &Rect) -> bool {
        self.overlaps(other)
            || (!self.is_empty()
                && !other.is_empty()
                && self.bottom() == other.top()
                && self.overlaps_horizontally(other))
    }

    /// The four boundary segments in [`Side::ALL`] order.
    pub fn sides(&self) -> [Segment; 4] {
        [
            Segment::new(self.top_left(), self.top_right()),
            Segment::new(self.top_left(), self.bottom_left()),
            Segment::new(self.top_right(), self.bottom_right()),
            Segment::new(self.bottom_right(), self.bottom_left()),
        ]
    }

    /// Clip `segment` against the pixels covered by this box.
    ///
    /// Returns the portion of the segment inside the box, with the first point
    /// being the one closest to `segment.start`, or `None` when they do not
    /// intersect. The covered pixels are `left..right` by `top..bottom`, so a
    /// segment lying exactly on the right or bottom edge does not clip.
    pub fn clip_segment(&self, segment: &Segment) -> Option<(IVec2, IVec2)> {
        if self.is_empty() {
            return None;
        }

        let bounds = ClipBounds {
            min_x: i64::from(self.left()),
            min_y: i64::from(self.top()),
            max_x: i64::from(self.right() - 1),
            max_y: i64::from(self.bottom() - 1),
        };

        let mut a = (i64::from(segment.start.x), i64::from(segment.start.y));
        let mut b = (i64::from(segment.end.x), i64::from(segment.end.y));

        // Cohen-Sutherland; every iteration removes at least one outcode bit.
        loop {
            let code_a = bounds.outcode(a);
            let code_b = bounds.outcode(b);

            if code_a | code_b == 0 {
                return Some((
                    IVec2::new(a.0 as i32, a.1 as i32),
                    IVec2::new(b.0 as i32, b.1 as i32),
                ));
            }
            if code_a & code_b != 0 {
                return None;
            }

            if code_a != 0 {
                a = bounds.intersect(code_a, a, b);
            } else {
                b = bounds.intersect(code_b, b, a);
            }
        }
    }
}

const OUT_LEFT: u8 = 1;
const OUT_RIGHT: u8 = 2;
const OUT_TOP: u8 = 4;
const OUT_BOTTOM: u8 = 8;

struct ClipBounds {
    min_x: i64,
    min_y: i64,
    max_x: i64,
    max_y: i64,
}

impl ClipBounds {
    fn outcode(&self, (x, y): (i64, i64)) -> u8 {
        let mut code = 0;
        if x < self.min_x {
            code |= OUT_LEFT;
        } else if x > self.max_x {
            code |= OUT_RIGHT;
        }
        if y < self.min_y {
            code |= OUT_TOP;
        } else if y > self.max_y {
            code |= OUT_BOTTOM;
        }
        code
    }

    /// Move `from` along the line toward `to` onto the boundary named by `code`.
    fn intersect(&self, code: u8, from: (i64, i64), to: (i64, i64)) -> (i64, i64) {
        let (x1, y1) = from;
        let (x2, y2) = to;
        if code & OUT_TOP != 0 {
            (x1 + (x2 - x1) * (self.min_y - y1) / (y2 - y1), self.min_y)
        } else if code & OUT_BOTTOM != 0 {
            (x1 + (x2 - x1) * (self.max_y - y1) / (y2 - y1), self.max_y)
        } else if code & OUT_RIGHT != 0 {
            (self.max_x, y1 + (y2 - y1) * (self.max_x - x1) / (x2 - x1))
        } else {
            (self.min_x, y1 + (y2 - y1) * (self.min_x - x1) / (x2 - x1))
        }
    }
}
