//! Theme normalization, comparison and browser conversion

pub mod browser;
pub mod equality;
pub mod model;
pub mod normalize;

// Re-exports
pub use browser::{
    BLANK_IMAGE, BrowserTheme, CustomBackgroundLookup, StoredCustomBackground,
    convert_to_browser_theme,
};
pub use equality::themes_equal;
pub use model::{CustomBackground, RawImages, RawTheme, Theme, ThemeImages};
pub use normalize::{normalize_theme, normalize_theme_color, normalize_theme_colors};
