//! Mapping between the canonical top-down space and the requested rank direction.
//!
//! The pipeline always grows top to bottom. For LR/RL node sizes are swapped on the way in and
//! axes are swapped on the way out; BT/RL mirror the rank axis against the full extent.

use crate::model::Bounds;
use crate::options::RankDir;

/// Converts node sizes `(width, height)` into canonical space.
pub fn adjust(sizes: &mut [(f64, f64)], rankdir: RankDir) {
    if rankdir.is_horizontal() {
        for size in sizes {
            *size = (size.1, size.0);
        }
    }
}

/// Converts canonical boxes back into `rankdir` space.
pub fn undo(boxes: &mut [Bounds], rankdir: RankDir) {
    match rankdir {
        RankDir::BT | RankDir::RL => reverse_y(boxes),
        RankDir::TB | RankDir::LR => {}
    }
    if rankdir.is_horizontal() {
        swap_xy(boxes);
    }
}

pub fn apply_margins(boxes: &mut [Bounds], marginx: f64, marginy: f64) {
    for b in boxes {
        b.x += marginx;
        b.y += marginy;
    }
}

fn reverse_y(boxes: &mut [Bounds]) {
    let max = boxes.iter().map(Bounds::bottom).fold(0.0, f64::max);
    for b in boxes {
        b.y = max - b.y - b.height;
    }
}

fn swap_xy(boxes: &mut [Bounds]) {
    for b in boxes {
        *b = Bounds::new(b.y, b.x, b.height, b.width);
    }
}
