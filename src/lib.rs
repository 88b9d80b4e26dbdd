//! Theme Kit - normalize, compare and convert browser color themes
//!
//! Loose theme descriptors are normalized against a default theme, compared
//! for visual equivalence, and converted into the shape a browser theming
//! API accepts.

pub mod assets;
pub mod color;
pub mod config;
pub mod error;
pub mod presets;
pub mod theme;

pub use assets::{BackgroundRegistry, BackgroundResolver};
pub use color::{Color, RawColor};
pub use config::{ThemeContext, ThemeSettings};
pub use error::ThemeError;
pub use theme::{
    BrowserTheme, RawTheme, Theme, convert_to_browser_theme, normalize_theme, themes_equal,
};
