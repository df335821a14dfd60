//! Texture cache keyed by URL or data URI
//!
//! Each key is decoded at most once while cached. A failed decode evicts the
//! key so a later request retries.

use std::collections::HashMap;
use std::sync::Arc;

use base64::Engine;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("malformed data URI")]
    InvalidDataUri,

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to read texture: {0}")]
    Io(#[from] std::io::Error),
}

/// Decoded RGBA8 pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub type TextureHandle = Arc<Texture>;

/// Turns a texture key into pixels
pub trait TextureDecoder {
    fn decode(&self, key: &str) -> Result<Texture, TextureError>;
}

impl<F> TextureDecoder for F
where
    F: Fn(&str) -> Result<Texture, TextureError>,
{
    fn decode(&self, key: &str) -> Result<Texture, TextureError> {
        self(key)
    }
}

/// Decodes `data:` URIs in memory and anything else as a file path
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDecoder;

impl ImageDecoder {
    fn data_uri_bytes(uri: &str) -> Result<Vec<u8>, TextureError> {
        let rest = uri.strip_prefix("data:").ok_or(TextureError::InvalidDataUri)?;
        let (meta, payload) = rest.split_once(',').ok_or(TextureError::InvalidDataUri)?;
        if meta.ends_with(";base64") {
            base64::engine::general_purpose::STANDARD
                .decode(payload.trim())
                .map_err(|_| TextureError::InvalidDataUri)
        } else {
            Ok(payload.as_bytes().to_vec())
        }
    }
}

impl TextureDecoder for ImageDecoder {
    fn decode(&self, key: &str) -> Result<Texture, TextureError> {
        let bytes = if key.starts_with("data:") {
            Self::data_uri_bytes(key)?
        } else {
            std::fs::read(key)?
        };
        let image = image::load_from_memory(&bytes)
            .map_err(|e| TextureError::Decode(e.to_string()))?
            .to_rgba8();
        Ok(Texture {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        })
    }
}

pub struct TextureCache {
    entries: HashMap<String, TextureHandle>,
    decoder: Box<dyn TextureDecoder>,
    decode_count: u64,
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new(ImageDecoder)
    }
}

impl TextureCache {
    pub fn new(decoder: impl TextureDecoder + 'static) -> Self {
        Self {
            entries: HashMap::new(),
            decoder: Box::new(decoder),
            decode_count: 0,
        }
    }

    /// Cached handle for `key`, decoding on first request.
    /// Returns `None` and evicts the key when decoding fails.
    pub fn get_or_load(&mut self, key: &str) -> Option<TextureHandle> {
        if let Some(handle) = self.entries.get(key) {
            return Some(handle.clone());
        }

        self.decode_count += 1;
        match self.decoder.decode(key) {
            Ok(texture) => {
                let handle = Arc::new(texture);
                self.entries.insert(key.to_string(), handle.clone());
                Some(handle)
            }
            Err(e) => {
                tracing::warn!("Texture '{}' failed to load: {e}", abbreviate(key));
                self.invalidate(key);
                None
            }
        }
    }

    /// Drop `key` from the cache. Returns true if it was cached.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of decode attempts so far
    pub fn decode_count(&self) -> u64 {
        self.decode_count
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Data URIs can be megabytes long; keep log lines short
fn abbreviate(key: &str) -> &str {
    match key.char_indices().nth(48) {
        Some((end, _)) => &key[..end],
        None => key,
    }
}
