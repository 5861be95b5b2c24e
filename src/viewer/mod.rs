pub mod scene;
pub mod texture_loader;

pub const FPS: u32 = 60;                          // Frames per second
pub const HOST_SELECTOR: &str = "#carousel";      // Host element built by the viewer
pub const SLIDE_SELECTOR: &str = ".slide";        // One element per loaded image

pub const BUTTON_SIZE: f32 = 48.0;                // Prev/next button edge length (pixels)
pub const BUTTON_INSET: f32 = 10.0;               // Distance of prev/next from the window edge
pub const DOT_SIZE: f32 = 28.0;                   // Pagination indicator diameter
pub const DOT_SPACING: f32 = 8.0;                 // Gap between pagination indicators
pub const DOT_MARGIN: f32 = 20.0;                 // Distance of the indicators from the bottom edge
pub const FONT_SIZE: i32 = 20;
