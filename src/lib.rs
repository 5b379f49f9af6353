#![forbid(unsafe_code)]
//! Release wallpaper composition for TSSH targets.
//!
//! A background image is cover-scaled to a fixed 3840x2160 canvas and a translucent
//! rounded panel is drawn in its center, holding a bold `TSSH <target>` title, a thin
//! separator and the build identifier. The composed image can then be installed into a
//! root filesystem as boot splash and desktop background.
//!
//! ```no_run
//! let background = image::open("background.png")?;
//! let canvas = ts_release::render(Some(&background), "my-target", "2026-10-18T09:30:00Z")?;
//! ts_release::install(std::path::Path::new("rootfs"), &canvas, "2026-10-18T09:30:00Z")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod foundation;
pub mod install;
pub mod layout;
pub mod render;
pub mod source;
pub mod text;

pub use foundation::core::{PixelRect, PremulRgba8, Rgba8};
pub use foundation::error::{ReleaseError, ReleaseResult, TextLine};
pub use install::artifacts::{ArtifactPaths, install};
pub use layout::geometry::{Geometry, TARGET_HEIGHT, TARGET_WIDTH, compute_layout};
pub use render::background::resize_and_crop;
pub use render::overlay::{
    draw_overlay, draw_panel, draw_separator, draw_text, max_text_width_for_image,
    validate_text_width,
};
pub use render::pipeline::{generate, preview_layout, render};
pub use source::wallhaven::{BackgroundSource, HttpResponse, HttpTransport, SearchParams, Transport};
pub use text::face::{FontFace, load_face, load_overlay_faces};
pub use text::labels::{subtitle_label, title_label};
