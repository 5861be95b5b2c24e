//! An interactive slideshow widget over an element tree.
//!
//! A [`Carousel`] takes a host element holding a fixed set of slides, shows
//! one slide at a time and lets the user move between them with prev/next
//! buttons, pagination indicators and the arrow keys. Autoplay advances on a
//! timer supplied through the [`Scheduler`] trait and pauses while the
//! pointer is over the host.

pub mod autoplay;
pub mod carousel;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod listeners;
pub mod render;
pub mod state;
pub mod structure;
pub mod surface;
pub mod timer;

pub use crate::carousel::Carousel;
pub use crate::config::CarouselConfig;
pub use crate::error::{CarouselError, Result};
pub use crate::state::{Direction, Lifecycle};
pub use crate::structure::{Controls, Pagination};
pub use crate::surface::{Document, ElementId, Event, EventKind, Surface};
pub use crate::timer::{Scheduler, TimerId, TimerQueue};
