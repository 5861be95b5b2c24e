//! Projects the current index onto the surface: slide offsets and the active
//! pagination indicator. Both projections are idempotent.

use crate::constants::ACTIVE_CLASS;
use crate::surface::{Document, ElementId};

/// `translateX` value for an offset in percent of the track width.
pub fn translate_x(percent: i64) -> String {
    format!("translateX({percent}%)")
}

/// Reads back the percentage from a `translateX(<n>%)` transform.
pub fn parse_translate_x(transform: &str) -> Option<f32> {
    transform
        .trim()
        .strip_prefix("translateX(")?
        .strip_suffix(')')?
        .trim()
        .strip_suffix('%')?
        .trim()
        .parse()
        .ok()
}

/// Offset of the slide at `position` when `current` is shown.
pub fn slide_offset(position: usize, current: usize) -> i64 {
    100 * (position as i64 - current as i64)
}

pub fn sync_slides(doc: &mut Document, slides: &[ElementId], current: usize) {
    for (position, slide) in slides.iter().enumerate() {
        doc.set_style(*slide, "transform", translate_x(slide_offset(position, current)));
    }
}

/// Clears the active marker from every child of `container`, then marks the
/// child at `current`. A missing child is skipped.
pub fn sync_pagination(doc: &mut Document, container: ElementId, current: usize) {
    let indicators = doc.children(container).to_vec();
    for indicator in &indicators {
        doc.remove_class(*indicator, ACTIVE_CLASS);
        doc.remove_attribute(*indicator, "aria-selected");
    }
    match indicators.get(current) {
        Some(active) => {
            doc.add_class(*active, ACTIVE_CLASS);
            doc.set_attribute(*active, "aria-selected", "true");
        }
        None => tracing::trace!(current, "no pagination indicator to activate"),
    }
}
