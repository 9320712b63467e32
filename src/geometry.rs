/// Padding between the drawer panel and the edge of the backdrop hole
pub const CUTOUT_PADDING: i32 = 4;
/// Corner radius of the backdrop hole
pub const CUTOUT_RADIUS: i32 = 26;

/// Axis-aligned rectangle in frame cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn grow(&self, by: i32) -> Rect {
        Rect::new(self.x - by, self.y - by, self.w + 2 * by, self.h + 2 * by)
    }

    /// A `w` x `h` rectangle centered in this one, shrunk to fit
    pub fn centered(&self, w: i32, h: i32) -> Rect {
        let w = w.min(self.w).max(0);
        let h = h.min(self.h).max(0);
        Rect::new(self.x + (self.w - w) / 2, self.y + (self.h - h) / 2, w, h)
    }
}

/// Hole punched into the darkened backdrop so the panel stays visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutout {
    pub rect: Rect,
    pub radius: i32,
}

impl Cutout {
    pub fn around(panel: Rect) -> Self {
        Self {
            rect: panel.grow(CUTOUT_PADDING),
            radius: CUTOUT_RADIUS,
        }
    }

    /// Rounded-rectangle hit test; the radius is clamped to half the short side
    pub fn contains(&self, x: i32, y: i32) -> bool {
        if !self.rect.contains(x, y) {
            return false;
        }
        let r = self.radius.min(self.rect.w / 2).min(self.rect.h / 2);
        if r <= 0 {
            return true;
        }
        // Distance from the nearest corner circle center, only relevant in corners
        let cx = if x < self.rect.x + r {
            self.rect.x + r
        } else if x >= self.rect.right() - r {
            self.rect.right() - r - 1
        } else {
            return true;
        };
        let cy = if y < self.rect.y + r {
            self.rect.y + r
        } else if y >= self.rect.bottom() - r {
            self.rect.bottom() - r - 1
        } else {
            return true;
        };
        let (dx, dy) = (x - cx, y - cy);
        dx * dx + dy * dy <= r * r
    }
}
