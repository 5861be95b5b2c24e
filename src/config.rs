//! Construction options for a carousel instance.

use std::time::Duration;

use crate::constants::DEFAULT_AUTOPLAY_INTERVAL;

/// Options recognized when constructing a [`Carousel`](crate::Carousel).
///
/// `autoplay_interval` set to `None` is the disabling sentinel: autoplay stays
/// off even when `enable_autoplay` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselConfig {
    pub carousel_selector: String,
    pub slide_selector: String,
    pub enable_pagination: bool,
    pub enable_autoplay: bool,
    pub autoplay_interval: Option<Duration>,
}

impl CarouselConfig {
    pub fn new(carousel_selector: impl Into<String>, slide_selector: impl Into<String>) -> Self {
        Self {
            carousel_selector: carousel_selector.into(),
            slide_selector: slide_selector.into(),
            enable_pagination: true,
            enable_autoplay: true,
            autoplay_interval: Some(DEFAULT_AUTOPLAY_INTERVAL),
        }
    }

    pub fn with_pagination(mut self, enabled: bool) -> Self {
        self.enable_pagination = enabled;
        self
    }

    pub fn with_autoplay(mut self, enabled: bool) -> Self {
        self.enable_autoplay = enabled;
        self
    }

    pub fn with_autoplay_interval(mut self, interval: Option<Duration>) -> Self {
        self.autoplay_interval = interval;
        self
    }

    /// The interval autoplay runs at, or `None` when autoplay is absent.
    pub fn active_autoplay_interval(&self) -> Option<Duration> {
        if self.enable_autoplay {
            self.autoplay_interval
        } else {
            None
        }
    }
}
