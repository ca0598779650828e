//! Layout engine — grid slots and the collapsed stack target.
//!
//! A pure function of `(viewport, item_count)`.  The renderer's initial
//! placement and the transition scheduler's animation targets both call
//! [`Layout::compute`], so the two can never disagree.
//!
//! All mobile/desktop branching lives in [`LayoutProfile`], selected once per
//! computation.

/// Vertical space reserved for the page header, in layout units.
pub const HEADER_OFFSET: f64 = 120.0;
/// Viewports narrower than this use the mobile profile.
pub const MOBILE_BREAKPOINT: f64 = 768.0;
/// Width at which the item scale factor is exactly 1.0.
const REFERENCE_WIDTH: f64 = 1200.0;
const MIN_SCALE: f64 = 0.5;
const MAX_SCALE: f64 = 1.2;
const GAP_FACTOR: f64 = 1.3;
/// Items grow by this factor when collapsed onto the stack target.
pub const STACK_ENLARGE: f64 = 1.4;

// ───────────────────────────────────────── viewport ──────────

/// Viewport size in layout units.  Only constructible with positive,
/// finite dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    /// Returns `None` for zero, negative or non-finite dimensions; callers
    /// treat that as "nothing to lay out".
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        (valid(width) && valid(height)).then_some(Self { width, height })
    }

    #[cfg(test)]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[cfg(test)]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Height of the region below the header.
    pub fn content_height(&self) -> f64 {
        self.height - HEADER_OFFSET
    }
}

// ───────────────────────────────────────── profile ───────────

/// Breakpoint-dependent layout constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutProfile {
    Mobile,
    Desktop,
}

impl LayoutProfile {
    pub fn for_width(width: f64) -> Self {
        if width < MOBILE_BREAKPOINT {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    fn base_size(self) -> f64 {
        match self {
            Self::Mobile => 224.0,
            Self::Desktop => 280.0,
        }
    }

    fn raw_gap(self) -> f64 {
        match self {
            Self::Mobile => 15.0,
            Self::Desktop => 20.0,
        }
    }

    pub fn columns(self) -> usize {
        match self {
            Self::Mobile => 2,
            Self::Desktop => 4,
        }
    }

    /// Horizontal position of the stack target as a fraction of width.
    fn collapsed_x_fraction(self) -> f64 {
        match self {
            Self::Mobile => 0.5,
            Self::Desktop => 0.25,
        }
    }
}

// ───────────────────────────────────────── geometry ──────────

/// Centre point and edge length of one square item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub size: f64,
}

impl ItemGeometry {
    /// Top-left x of the item's box.
    pub fn left(&self) -> f64 {
        self.center_x - self.size / 2.0
    }

    /// Top-left y of the item's box.
    pub fn top(&self) -> f64 {
        self.center_y - self.size / 2.0
    }
}

/// Shared point every item collapses onto in stacked mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollapsedTarget {
    pub center_x: f64,
    pub center_y: f64,
}

/// Complete geometry for one viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub viewport: Viewport,
    pub profile: LayoutProfile,
    pub columns: usize,
    pub rows: usize,
    pub gap: f64,
    /// Grid slot for every item, indexed by item.
    pub items: Vec<ItemGeometry>,
    pub collapsed: CollapsedTarget,
}

impl Layout {
    /// Lay out `item_count` items for `viewport`.
    ///
    /// Items fill the grid row-major (`row = i / cols`, `col = i % cols`) and
    /// the whole block is centred below the header.
    pub fn compute(viewport: Viewport, item_count: usize) -> Self {
        let profile = LayoutProfile::for_width(viewport.width);
        let scale = (viewport.width / REFERENCE_WIDTH).clamp(MIN_SCALE, MAX_SCALE);
        let size = scale * profile.base_size();
        let gap = scale * profile.raw_gap() * GAP_FACTOR;

        let columns = profile.columns();
        let rows = item_count.div_ceil(columns);

        let block_w = span(columns, size, gap);
        let block_h = span(rows, size, gap);
        let start_x = (viewport.width - block_w) / 2.0;
        let start_y = HEADER_OFFSET + (viewport.content_height() - block_h) / 2.0;

        let items = (0..item_count)
            .map(|i| {
                let row = i / columns;
                let col = i % columns;
                ItemGeometry {
                    center_x: start_x + col as f64 * (size + gap) + size / 2.0,
                    center_y: start_y + row as f64 * (size + gap) + size / 2.0,
                    size,
                }
            })
            .collect();

        let collapsed = CollapsedTarget {
            center_x: viewport.width * profile.collapsed_x_fraction(),
            center_y: HEADER_OFFSET + viewport.content_height() / 2.0,
        };

        Self {
            viewport,
            profile,
            columns,
            rows,
            gap,
            items,
            collapsed,
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Grid slot of item `index`, if it exists.
    pub fn grid(&self, index: usize) -> Option<ItemGeometry> {
        self.items.get(index).copied()
    }

    /// Geometry of item `index` once collapsed: the shared target, enlarged.
    pub fn stacked(&self, index: usize) -> Option<ItemGeometry> {
        self.items.get(index).map(|slot| ItemGeometry {
            center_x: self.collapsed.center_x,
            center_y: self.collapsed.center_y,
            size: slot.size * STACK_ENLARGE,
        })
    }
}

/// Total extent of `n` cells of `size` separated by `gap`.
fn span(n: usize, size: f64, gap: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    n as f64 * size + (n - 1) as f64 * gap
}
