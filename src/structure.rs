//! One-time mutation of the host surface: track, slide positioning,
//! pagination and prev/next controls.

use crate::constants::*;
use crate::render::translate_x;
use crate::surface::{Document, ElementId};

/// Elements created around the slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub track: ElementId,
    pub prev: ElementId,
    pub next: ElementId,
    pub pagination: Option<Pagination>,
}

/// Pagination container and its indicators, one per slide in slide order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub container: ElementId,
    pub indicators: Vec<ElementId>,
}

/// Builds the carousel markup inside `host`.
///
/// `slides` must be non-empty; they are re-parented into a new track that
/// takes the place of the first slide.
pub fn build(
    doc: &mut Document,
    host: ElementId,
    slides: &[ElementId],
    enable_pagination: bool,
) -> Controls {
    doc.set_attribute(host, "tabindex", "0");
    doc.set_style(host, "overflow", "hidden");
    doc.set_style(host, "position", "relative");

    let track = doc.create_element_with("div", &[("class", TRACK_CLASS)], None);
    doc.set_style(track, "display", "flex");
    doc.set_style(track, "transition", SLIDE_TRANSITION);
    let anchor = slides.first().copied().filter(|s| doc.parent(*s) == Some(host));
    doc.insert_before(host, track, anchor);

    let mut pagination = enable_pagination.then(|| {
        let container = doc.create_element_with(
            "nav",
            &[("class", PAGINATION_CLASS), ("role", "tablist")],
            None,
        );
        doc.append_child(host, container);
        Pagination {
            container,
            indicators: Vec::with_capacity(slides.len()),
        }
    });

    for (index, slide) in slides.iter().copied().enumerate() {
        doc.append_child(track, slide);
        doc.set_style(slide, "min-width", "100%");
        doc.set_style(slide, "flex", "1 0 100%");
        doc.set_style(slide, "transform", translate_x(index as i64 * 100));

        if let Some(pagination) = pagination.as_mut() {
            let ordinal = (index + 1).to_string();
            let class = format!("{BUTTON_CLASS} {BUTTON_CLASS}--{ordinal}");
            let indicator = doc.create_element_with(
                "button",
                &[("class", class.as_str()), ("role", "tab")],
                Some(ordinal.as_str()),
            );
            if index == 0 {
                doc.add_class(indicator, ACTIVE_CLASS);
                doc.set_attribute(indicator, "aria-selected", "true");
            }
            doc.append_child(pagination.container, indicator);
            pagination.indicators.push(indicator);
        }
    }

    let prev = nav_button(doc, host, PREV_CLASS, PREV_LABEL, PREV_TEXT, "left");
    let next = nav_button(doc, host, NEXT_CLASS, NEXT_LABEL, NEXT_TEXT, "right");

    tracing::debug!(
        slides = slides.len(),
        pagination = pagination.is_some(),
        "carousel structure built"
    );

    Controls {
        track,
        prev,
        next,
        pagination,
    }
}

fn nav_button(
    doc: &mut Document,
    host: ElementId,
    class: &str,
    label: &str,
    text: &str,
    side: &str,
) -> ElementId {
    let classes = format!("{BUTTON_CLASS} {PREV_NEXT_CLASS} {class}");
    let button = doc.create_element_with(
        "button",
        &[("class", classes.as_str()), ("aria-label", label)],
        Some(text),
    );
    doc.set_style(button, "position", "absolute");
    doc.set_style(button, "top", "50%");
    doc.set_style(button, side, BUTTON_INSET);
    doc.set_style(button, "transform", "translateY(-50%)");
    doc.append_child(host, button);
    button
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_with_slides(count: usize) -> (Document, ElementId, Vec<ElementId>) {
        let mut doc = Document::new();
        let host = doc.create_element_with("div", &[("id", "carousel")], None);
        doc.append_child(doc.root(), host);
        let caption = doc.create_element_with("h2", &[], Some("Gallery"));
        doc.append_child(host, caption);
        let slides = (0..count)
            .map(|_| {
                let slide = doc.create_element_with("div", &[("class", "slide")], None);
                doc.append_child(host, slide);
                slide
            })
            .collect();
        (doc, host, slides)
    }

    #[test]
    fn host_becomes_a_focusable_clipping_context() {
        let (mut doc, host, slides) = host_with_slides(2);
        build(&mut doc, host, &slides, true);
        assert_eq!(doc.attribute(host, "tabindex"), Some("0"));
        assert_eq!(doc.style(host, "overflow"), Some("hidden"));
        assert_eq!(doc.style(host, "position"), Some("relative"));
    }

    #[test]
    fn track_takes_the_place_of_the_first_slide() {
        let (mut doc, host, slides) = host_with_slides(3);
        let controls = build(&mut doc, host, &slides, true);

        let children = doc.children(host).to_vec();
        let pagination = controls.pagination.as_ref().unwrap();
        assert_eq!(
            children[1..],
            [controls.track, pagination.container, controls.prev, controls.next]
        );
        assert_eq!(doc.children(controls.track), slides.as_slice());
        assert_eq!(doc.style(controls.track, "display"), Some("flex"));
    }

    #[test]
    fn slides_are_offset_by_position() {
        let (mut doc, host, slides) = host_with_slides(3);
        build(&mut doc, host, &slides, false);
        let offsets: Vec<_> = slides.iter().map(|s| doc.style(*s, "transform")).collect();
        assert_eq!(
            offsets,
            [Some("translateX(0%)"), Some("translateX(100%)"), Some("translateX(200%)")]
        );
        assert_eq!(doc.style(slides[1], "flex"), Some("1 0 100%"));
    }

    #[test]
    fn pagination_has_one_labelled_indicator_per_slide() {
        let (mut doc, host, slides) = host_with_slides(3);
        let controls = build(&mut doc, host, &slides, true);
        let pagination = controls.pagination.unwrap();

        assert_eq!(doc.attribute(pagination.container, "role"), Some("tablist"));
        assert_eq!(doc.children(pagination.container), pagination.indicators.as_slice());
        for (i, indicator) in pagination.indicators.iter().enumerate() {
            assert_eq!(doc.text(*indicator), Some((i + 1).to_string().as_str()));
            assert_eq!(doc.attribute(*indicator, "role"), Some("tab"));
            assert!(doc.has_class(*indicator, &format!("carousel-btn--{}", i + 1)));
            assert_eq!(doc.has_class(*indicator, ACTIVE_CLASS), i == 0);
            assert_eq!(doc.attribute(*indicator, "aria-selected").is_some(), i == 0);
        }
    }

    #[test]
    fn no_pagination_when_disabled() {
        let (mut doc, host, slides) = host_with_slides(2);
        let controls = build(&mut doc, host, &slides, false);
        assert!(controls.pagination.is_none());
        assert!(doc.query_selector_all_within(host, "nav").is_empty());
    }

    #[test]
    fn prev_next_are_labelled_and_pinned_to_the_sides() {
        let (mut doc, host, slides) = host_with_slides(1);
        let controls = build(&mut doc, host, &slides, false);

        assert_eq!(doc.attribute(controls.prev, "aria-label"), Some("Previous Slide"));
        assert_eq!(doc.attribute(controls.next, "aria-label"), Some("Next Slide"));
        assert_eq!(doc.style(controls.prev, "left"), Some("10px"));
        assert_eq!(doc.style(controls.next, "right"), Some("10px"));
        assert_eq!(doc.style(controls.next, "top"), Some("50%"));
        assert!(doc.has_class(controls.prev, PREV_NEXT_CLASS));
    }
}
