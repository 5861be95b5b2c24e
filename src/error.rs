//! Error types for carousel construction and navigation.

use thiserror::Error;

/// Errors reported by the carousel.
///
/// Construction fails only on the two selector checks. Everything that runs
/// after a successful construction is total, except for the public
/// [`Carousel::go_to`](crate::Carousel::go_to) guard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// The carousel selector matched nothing in the document.
    #[error("specify a valid selector for the carousel: `{selector}` matched nothing")]
    CarouselNotFound { selector: String },

    /// The slide selector matched no element inside the carousel.
    #[error("specify a valid selector for slides: `{selector}` matched nothing inside the carousel")]
    NoSlides { selector: String },

    /// A direct navigation target outside `0..count`.
    #[error("slide index {index} is out of range for {count} slides")]
    IndexOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, CarouselError>;
