//! The carousel instance: construction checks, lifecycle, navigation and the
//! event bindings that drive them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::autoplay::Autoplay;
use crate::config::CarouselConfig;
use crate::constants::{KEY_ARROW_LEFT, KEY_ARROW_RIGHT};
use crate::error::{CarouselError, Result};
use crate::listeners::ListenerBag;
use crate::render;
use crate::state::{Direction, Lifecycle, SlideCursor};
use crate::structure::{self, Controls};
use crate::surface::{ElementId, Event, EventKind, Handler, Surface};
use crate::timer::{Scheduler, TimerCallback};

/// A slideshow bound to one host element of a [`Surface`].
///
/// Construction only resolves the selectors. [`Carousel::create`] builds the
/// markup, binds listeners and starts autoplay; [`Carousel::destroy`] (or
/// dropping the carousel) releases every listener and the timer.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use carousel::{Carousel, CarouselConfig, Document, Surface, TimerQueue};
///
/// let mut doc = Document::new();
/// let host = doc.create_element_with("div", &[("id", "gallery")], None);
/// doc.append_child(doc.root(), host);
/// for _ in 0..3 {
///     let slide = doc.create_element_with("div", &[("class", "slide")], None);
///     doc.append_child(host, slide);
/// }
///
/// let surface = Surface::new(doc);
/// let clock = Rc::new(TimerQueue::new());
/// let carousel = Carousel::new(&surface, clock.clone(), CarouselConfig::new("#gallery", ".slide"))?;
/// carousel.create();
///
/// clock.advance(std::time::Duration::from_millis(5000));
/// assert_eq!(carousel.current_index(), 1);
/// # Ok::<(), carousel::CarouselError>(())
/// ```
#[derive(Debug)]
pub struct Carousel {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Debug)]
struct Inner {
    this: Weak<RefCell<Inner>>,
    surface: Surface,
    config: CarouselConfig,
    host: ElementId,
    slides: Vec<ElementId>,
    cursor: SlideCursor,
    lifecycle: Lifecycle,
    controls: Option<Controls>,
    listeners: ListenerBag,
    autoplay: Option<Autoplay>,
}

impl Carousel {
    /// Resolves the host and its slides. Fails without touching the surface
    /// when either selector matches nothing.
    pub fn new(
        surface: &Surface,
        scheduler: Rc<dyn Scheduler>,
        config: CarouselConfig,
    ) -> Result<Self> {
        let (host, slides) = surface.read(|doc| -> Result<(ElementId, Vec<ElementId>)> {
            let host = doc.query_selector(&config.carousel_selector).ok_or_else(|| {
                CarouselError::CarouselNotFound {
                    selector: config.carousel_selector.clone(),
                }
            })?;
            let slides = doc.query_selector_all_within(host, &config.slide_selector);
            if slides.is_empty() {
                return Err(CarouselError::NoSlides {
                    selector: config.slide_selector.clone(),
                });
            }
            Ok((host, slides))
        })?;

        let autoplay = config
            .active_autoplay_interval()
            .map(|interval| Autoplay::new(scheduler, interval));

        tracing::debug!(
            selector = %config.carousel_selector,
            slides = slides.len(),
            autoplay = autoplay.is_some(),
            "carousel constructed"
        );

        let inner = Rc::new_cyclic(|this| {
            RefCell::new(Inner {
                this: this.clone(),
                surface: surface.clone(),
                cursor: SlideCursor::new(slides.len()),
                config,
                host,
                slides,
                lifecycle: Lifecycle::Constructed,
                controls: None,
                listeners: ListenerBag::new(),
                autoplay,
            })
        });
        Ok(Self { inner })
    }

    /// Builds the markup, binds the listeners and starts autoplay.
    ///
    /// Only the first call on a freshly constructed carousel does anything.
    pub fn create(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.lifecycle != Lifecycle::Constructed {
            tracing::warn!(lifecycle = ?inner.lifecycle, "create() ignored");
            return;
        }
        inner.build();
        inner.bind();
        inner.start_autoplay();
        inner.lifecycle = Lifecycle::Created;
        tracing::debug!(listeners = inner.listeners.len(), "carousel created");
    }

    /// Releases every listener and the autoplay timer. Safe to call in any
    /// state; the carousel cannot be created again afterwards.
    pub fn destroy(&self) {
        self.inner.borrow_mut().teardown();
    }

    pub fn next(&self) {
        self.navigate(|inner| inner.advance(Direction::Next));
    }

    pub fn prev(&self) {
        self.navigate(|inner| inner.advance(Direction::Prev));
    }

    /// Shows the slide at `index`.
    pub fn go_to(&self, index: usize) -> Result<()> {
        let count = self.slide_count();
        if index >= count {
            return Err(CarouselError::IndexOutOfRange { index, count });
        }
        self.navigate(|inner| inner.go_to(index));
        Ok(())
    }

    fn navigate(&self, transition: impl FnOnce(&mut Inner)) {
        let mut inner = self.inner.borrow_mut();
        if inner.lifecycle == Lifecycle::Created {
            transition(&mut inner);
        } else {
            tracing::debug!(lifecycle = ?inner.lifecycle, "navigation ignored");
        }
    }

    pub fn current_index(&self) -> usize {
        self.inner.borrow().cursor.current()
    }

    pub fn slide_count(&self) -> usize {
        self.inner.borrow().cursor.count()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.borrow().lifecycle
    }

    pub fn is_autoplay_running(&self) -> bool {
        self.inner
            .borrow()
            .autoplay
            .as_ref()
            .is_some_and(Autoplay::is_running)
    }

    pub fn host(&self) -> ElementId {
        self.inner.borrow().host
    }

    pub fn slides(&self) -> Vec<ElementId> {
        self.inner.borrow().slides.clone()
    }

    /// Elements built by [`Carousel::create`], `None` before it ran.
    pub fn controls(&self) -> Option<Controls> {
        self.inner.borrow().controls.clone()
    }

    /// Number of listeners currently registered by this carousel.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn config(&self) -> CarouselConfig {
        self.inner.borrow().config.clone()
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.teardown();
        }
    }
}

impl Inner {
    fn build(&mut self) {
        let controls = self.surface.write(|doc| {
            structure::build(doc, self.host, &self.slides, self.config.enable_pagination)
        });
        self.controls = Some(controls);
    }

    fn bind(&mut self) {
        let Some(controls) = self.controls.clone() else {
            return;
        };

        let mut bindings: Vec<(ElementId, EventKind, Handler)> = vec![
            (
                controls.prev,
                EventKind::Click,
                self.handler(|inner, _| inner.advance(Direction::Prev)),
            ),
            (
                controls.next,
                EventKind::Click,
                self.handler(|inner, _| inner.advance(Direction::Next)),
            ),
            (self.host, EventKind::KeyDown, self.handler(Inner::on_key_down)),
        ];

        if let Some(pagination) = &controls.pagination {
            for (index, indicator) in pagination.indicators.iter().enumerate() {
                bindings.push((
                    *indicator,
                    EventKind::Click,
                    self.handler(move |inner, _| inner.go_to(index)),
                ));
            }
        }

        if self.autoplay.is_some() {
            bindings.push((
                self.host,
                EventKind::PointerEnter,
                self.handler(|inner, _| inner.stop_autoplay()),
            ));
            bindings.push((
                self.host,
                EventKind::PointerLeave,
                self.handler(|inner, _| inner.start_autoplay()),
            ));
        }

        let listeners = &mut self.listeners;
        self.surface.write(|doc| {
            for (target, kind, handler) in bindings {
                listeners.bind(doc, target, kind, handler);
            }
        });
    }

    /// Wraps `action` as a listener that only runs while the carousel is
    /// created.
    fn handler(&self, action: impl Fn(&mut Inner, &mut Event) + 'static) -> Handler {
        let this = self.this.clone();
        Rc::new(move |event: &mut Event| {
            let Some(inner) = this.upgrade() else {
                return;
            };
            let mut inner = inner.borrow_mut();
            if inner.lifecycle == Lifecycle::Created {
                action(&mut inner, event);
            }
        })
    }

    fn tick(&self) -> TimerCallback {
        let this = self.this.clone();
        Box::new(move || {
            let Some(inner) = this.upgrade() else {
                return;
            };
            let mut inner = inner.borrow_mut();
            if inner.lifecycle == Lifecycle::Created {
                tracing::trace!("autoplay tick");
                inner.advance(Direction::Next);
            }
        })
    }

    fn on_key_down(&mut self, event: &mut Event) {
        let inside = self.surface.read(|doc| doc.contains(self.host, event.target()));
        if !inside || event.is_default_prevented() {
            return;
        }
        let direction = match event.key() {
            Some(KEY_ARROW_LEFT) => Direction::Prev,
            Some(KEY_ARROW_RIGHT) => Direction::Next,
            _ => return,
        };
        self.advance(direction);
        event.prevent_default();
    }

    fn start_autoplay(&mut self) {
        let tick = self.tick();
        if let Some(autoplay) = self.autoplay.as_mut() {
            autoplay.start(tick);
        }
    }

    fn stop_autoplay(&mut self) {
        if let Some(autoplay) = self.autoplay.as_mut() {
            autoplay.stop();
        }
    }

    fn advance(&mut self, direction: Direction) {
        self.cursor.advance(direction);
        tracing::debug!(?direction, index = self.cursor.current(), "slide changed");
        self.render();
    }

    fn go_to(&mut self, index: usize) {
        self.cursor.go_to(index);
        tracing::debug!(index, "slide selected");
        self.render();
    }

    fn render(&self) {
        let current = self.cursor.current();
        let pagination = self.controls.as_ref().and_then(|c| c.pagination.as_ref());
        self.surface.write(|doc| {
            if let Some(pagination) = pagination {
                render::sync_pagination(doc, pagination.container, current);
            }
            render::sync_slides(doc, &self.slides, current);
        });
    }

    fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        self.stop_autoplay();
        let listeners = &mut self.listeners;
        let released = self.surface.write(|doc| listeners.release(doc));
        self.lifecycle = Lifecycle::Destroyed;
        tracing::debug!(released, "carousel destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Document;
    use crate::timer::TimerQueue;

    fn surface_with(count: usize) -> Surface {
        let mut doc = Document::new();
        let host = doc.create_element_with("div", &[("id", "carousel")], None);
        doc.append_child(doc.root(), host);
        for _ in 0..count {
            let slide = doc.create_element_with("div", &[("class", "slide")], None);
            doc.append_child(host, slide);
        }
        Surface::new(doc)
    }

    fn build_carousel(surface: &Surface, config: CarouselConfig) -> (Carousel, Rc<TimerQueue>) {
        let clock = Rc::new(TimerQueue::new());
        let carousel = Carousel::new(surface, clock.clone(), config).unwrap();
        (carousel, clock)
    }

    #[test]
    fn missing_host_is_reported() {
        let surface = surface_with(2);
        let err = Carousel::new(
            &surface,
            Rc::new(TimerQueue::new()),
            CarouselConfig::new("#nope", ".slide"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CarouselError::CarouselNotFound {
                selector: "#nope".into()
            }
        );
    }

    #[test]
    fn create_twice_builds_once() {
        let surface = surface_with(3);
        let (carousel, _clock) = build_carousel(&surface, CarouselConfig::new("#carousel", ".slide"));
        carousel.create();
        let listeners = surface.read(Document::listener_count);
        let tracks = surface.read(|doc| doc.query_selector_all_within(carousel.host(), ".carousel-inner").len());

        carousel.create();
        assert_eq!(surface.read(Document::listener_count), listeners);
        assert_eq!(
            surface.read(|doc| doc.query_selector_all_within(carousel.host(), ".carousel-inner").len()),
            tracks
        );
        assert_eq!(tracks, 1);
    }

    #[test]
    fn destroy_before_create_is_harmless() {
        let surface = surface_with(2);
        let (carousel, clock) = build_carousel(&surface, CarouselConfig::new("#carousel", ".slide"));
        carousel.destroy();
        carousel.destroy();
        assert_eq!(carousel.lifecycle(), Lifecycle::Destroyed);

        carousel.create();
        assert!(carousel.controls().is_none());
        assert_eq!(clock.active_count(), 0);
        assert_eq!(surface.read(Document::listener_count), 0);
    }

    #[test]
    fn listener_set_follows_configuration() {
        let surface = surface_with(3);
        let (carousel, _clock) = build_carousel(&surface, CarouselConfig::new("#carousel", ".slide"));
        carousel.create();
        // prev, next, keydown, three indicators, pointer enter and leave
        assert_eq!(carousel.listener_count(), 8);

        let surface = surface_with(3);
        let config = CarouselConfig::new("#carousel", ".slide")
            .with_pagination(false)
            .with_autoplay(false);
        let (carousel, _clock) = build_carousel(&surface, config);
        carousel.create();
        assert_eq!(carousel.listener_count(), 3);
        assert!(!carousel.is_autoplay_running());
    }

    #[test]
    fn go_to_rejects_out_of_range() {
        let surface = surface_with(2);
        let (carousel, _clock) = build_carousel(&surface, CarouselConfig::new("#carousel", ".slide"));
        carousel.create();
        assert_eq!(
            carousel.go_to(2),
            Err(CarouselError::IndexOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(carousel.go_to(1), Ok(()));
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn navigation_before_create_is_ignored() {
        let surface = surface_with(3);
        let (carousel, _clock) = build_carousel(&surface, CarouselConfig::new("#carousel", ".slide"));
        carousel.next();
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn drop_releases_listeners_and_timer() {
        let surface = surface_with(2);
        let (carousel, clock) = build_carousel(&surface, CarouselConfig::new("#carousel", ".slide"));
        carousel.create();
        assert_eq!(clock.active_count(), 1);
        drop(carousel);
        assert_eq!(clock.active_count(), 0);
        assert_eq!(surface.read(Document::listener_count), 0);
    }
}
