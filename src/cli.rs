//! Command line options for the viewer binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::CarouselConfig;

/// Browse a directory of images as a carousel.
#[derive(Debug, Clone, Parser)]
#[command(name = "carousel-viewer", version, about)]
pub struct Args {
    /// Directory holding the slide images
    pub image_dir: PathBuf,

    /// Hide the pagination indicators
    #[arg(long)]
    pub no_pagination: bool,

    /// Never advance automatically
    #[arg(long)]
    pub no_autoplay: bool,

    /// Milliseconds between automatic advances (0 disables autoplay)
    #[arg(long, default_value_t = 5000, value_name = "MS")]
    pub autoplay_interval: u64,

    /// Shuffle the slides instead of sorting them by file name
    #[arg(long)]
    pub shuffle: bool,

    /// Window width in pixels
    #[arg(long, default_value_t = 960)]
    pub width: i32,

    /// Window height in pixels
    #[arg(long, default_value_t = 540)]
    pub height: i32,
}

impl Args {
    /// Carousel options for a host whose surface is `carousel_selector` and
    /// whose slides match `slide_selector`.
    pub fn carousel_config(&self, carousel_selector: &str, slide_selector: &str) -> CarouselConfig {
        let interval = match self.autoplay_interval {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };
        CarouselConfig::new(carousel_selector, slide_selector)
            .with_pagination(!self.no_pagination)
            .with_autoplay(!self.no_autoplay)
            .with_autoplay_interval(interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_carousel_defaults() {
        let args = Args::try_parse_from(["carousel-viewer", "photos"]).unwrap();
        let config = args.carousel_config("#carousel", ".slide");
        assert_eq!(config, CarouselConfig::new("#carousel", ".slide"));
        assert_eq!(args.image_dir, PathBuf::from("photos"));
    }

    #[test]
    fn zero_interval_is_the_disabling_sentinel() {
        let args =
            Args::try_parse_from(["carousel-viewer", "photos", "--autoplay-interval", "0"]).unwrap();
        let config = args.carousel_config("#c", ".s");
        assert!(config.enable_autoplay);
        assert_eq!(config.active_autoplay_interval(), None);
    }

    #[test]
    fn flags_turn_features_off() {
        let args =
            Args::try_parse_from(["carousel-viewer", "photos", "--no-pagination", "--no-autoplay"])
                .unwrap();
        let config = args.carousel_config("#c", ".s");
        assert!(!config.enable_pagination);
        assert!(!config.enable_autoplay);
    }

    #[test]
    fn image_dir_is_required() {
        assert!(Args::try_parse_from(["carousel-viewer"]).is_err());
    }
}
