//! Bundled background images
//!
//! Background identifiers in themes are file names of images shipped inside
//! the binary. The registry answers whether an identifier is known and
//! resolves it to a loadable image URL.

use std::borrow::Cow;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;
use rust_embed::RustEmbed;
use tracing::{debug, trace};

#[derive(RustEmbed)]
#[folder = "backgrounds/"]
#[include = "*.svg"]
#[include = "*.png"]
#[include = "*.jpg"]
struct BundledBackgroundFiles;

/// Turns a background identifier into an image URL
pub trait BackgroundResolver {
    fn resolve(&self, id: &str) -> Option<String>;
}

/// Known background identifiers and their image URLs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackgroundRegistry {
    images: IndexMap<String, String>,
}

impl BackgroundRegistry {
    /// Registry of the images embedded in the binary, as `data:` URLs
    pub fn bundled() -> Self {
        let mut ids: Vec<Cow<'static, str>> = BundledBackgroundFiles::iter().collect();
        ids.sort();

        let images: IndexMap<_, _> = ids
            .into_iter()
            .filter_map(|id| {
                let file = BundledBackgroundFiles::get(&id)?;
                let url = data_url(&id, &file.data);
                Some((id.into_owned(), url))
            })
            .collect();

        debug!(count = images.len(), "Loaded bundled backgrounds");
        Self { images }
    }

    /// Registry from explicit `(identifier, url)` pairs
    pub fn from_images<I, K, V>(images: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { images: images.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// All known identifiers, in registry order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.images.contains_key(id)
    }

    /// Known identifiers pass through, anything else means "no background"
    pub fn normalize<'a>(&'a self, id: &str) -> Option<&'a str> {
        let found = self.images.get_key_value(id).map(|(key, _)| key.as_str());
        if found.is_none() {
            trace!(id, "Unknown background identifier");
        }
        found
    }
}

impl BackgroundResolver for BackgroundRegistry {
    fn resolve(&self, id: &str) -> Option<String> {
        self.images.get(id).cloned()
    }
}

fn data_url(name: &str, data: &[u8]) -> String {
    let mime = match Path::new(name).extension().and_then(|ext| ext.to_str()) {
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    };
    format!("data:{mime};base64,{}", STANDARD.encode(data))
}
