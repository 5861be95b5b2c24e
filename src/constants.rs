use std::time::Duration;

pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000); // Time between autoplay advances
pub const MIN_TIMER_INTERVAL: Duration = Duration::from_millis(1);          // Repeating timers never fire faster than this

pub const SLIDE_TRANSITION: &str = "transform 0.5s ease";                    // Fixed track transition
pub const TRANSITION_SECONDS: f32 = 0.5;                                     // Same transition, for hosts that animate themselves

// Markup vocabulary shared with styling tooling
pub const TRACK_CLASS: &str = "carousel-inner";
pub const PAGINATION_CLASS: &str = "carousel-pagination";
pub const BUTTON_CLASS: &str = "carousel-btn";
pub const ACTIVE_CLASS: &str = "carousel-btn--active";
pub const PREV_NEXT_CLASS: &str = "carousel-btn--prev-next";
pub const PREV_CLASS: &str = "carousel-btn--prev";
pub const NEXT_CLASS: &str = "carousel-btn--next";

pub const PREV_LABEL: &str = "Previous Slide";
pub const NEXT_LABEL: &str = "Next Slide";
pub const PREV_TEXT: &str = "<";
pub const NEXT_TEXT: &str = ">";
pub const BUTTON_INSET: &str = "10px";                                      // Distance of prev/next from the edges

pub const KEY_ARROW_LEFT: &str = "ArrowLeft";
pub const KEY_ARROW_RIGHT: &str = "ArrowRight";
