//! Rendering options and string-keyed access to them.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::inline::image::SharedImageRenderer;

/// Parsing/rendering options.
#[derive(Clone)]
pub struct Options {
    /// Render internal link targets as bare text instead of anchors.
    pub strip_internal_links: bool,
    /// Base URL prepended to internal link targets.
    pub internal_link_prefix: Option<String>,
    /// Drop images entirely.
    pub strip_images: bool,
    /// Render images as their caption only.
    pub reduce_images_to_title: bool,
    /// Base URL prepended to image sources.
    pub image_prefix: Option<String>,
    /// Replaces the built-in image handler for `Image:` and `File:` links.
    pub image_parser_callback: Option<SharedImageRenderer>,
    /// Insert the callback's markup. When unset the callback is only
    /// notified and the link renders as an ordinary internal link.
    pub insert_image_callback_output: bool,
    /// Run the HTML repair pass over the finished document.
    pub clean_html: bool,
    /// Use `em`/`strong` instead of `i`/`b`.
    pub use_semantic_emphasis: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strip_internal_links: false,
            internal_link_prefix: None,
            strip_images: false,
            reduce_images_to_title: false,
            image_prefix: None,
            image_parser_callback: None,
            insert_image_callback_output: false,
            clean_html: true,
            use_semantic_emphasis: false,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("strip_internal_links", &self.strip_internal_links)
            .field("internal_link_prefix", &self.internal_link_prefix)
            .field("strip_images", &self.strip_images)
            .field("reduce_images_to_title", &self.reduce_images_to_title)
            .field("image_prefix", &self.image_prefix)
            .field(
                "image_parser_callback",
                &self.image_parser_callback.as_ref().map(|_| ".."),
            )
            .field(
                "insert_image_callback_output",
                &self.insert_image_callback_output,
            )
            .field("clean_html", &self.clean_html)
            .field("use_semantic_emphasis", &self.use_semantic_emphasis)
            .finish()
    }
}

/// Name of one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    StripInternalLinks,
    InternalLinkPrefix,
    StripImages,
    ReduceImagesToTitle,
    ImagePrefix,
    ImageParserCallback,
    InsertImageCallbackOutput,
    CleanHtml,
    UseSemanticEmphasis,
}

impl OptionKey {
    pub const ALL: [OptionKey; 9] = [
        OptionKey::StripInternalLinks,
        OptionKey::InternalLinkPrefix,
        OptionKey::StripImages,
        OptionKey::ReduceImagesToTitle,
        OptionKey::ImagePrefix,
        OptionKey::ImageParserCallback,
        OptionKey::InsertImageCallbackOutput,
        OptionKey::CleanHtml,
        OptionKey::UseSemanticEmphasis,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OptionKey::StripInternalLinks => "strip_internal_links",
            OptionKey::InternalLinkPrefix => "internal_link_prefix",
            OptionKey::StripImages => "strip_images",
            OptionKey::ReduceImagesToTitle => "reduce_images_to_title",
            OptionKey::ImagePrefix => "image_prefix",
            OptionKey::ImageParserCallback => "image_parser_callback",
            OptionKey::InsertImageCallbackOutput => "insert_image_callback_output",
            OptionKey::CleanHtml => "clean_html",
            OptionKey::UseSemanticEmphasis => "use_semantic_emphasis",
        }
    }

    const fn expects(self) -> &'static str {
        match self {
            OptionKey::InternalLinkPrefix | OptionKey::ImagePrefix => "a string or nothing",
            OptionKey::ImageParserCallback => "an image renderer or nothing",
            _ => "a boolean",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        OptionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == name)
            .ok_or_else(|| Error::InvalidConfiguration {
                name: name.to_string(),
            })
    }
}

/// Dynamically-typed option value.
#[derive(Clone)]
pub enum OptionValue {
    Bool(bool),
    Text(Option<String>),
    ImageRenderer(Option<SharedImageRenderer>),
}

impl OptionValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(text) => text.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            OptionValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            OptionValue::ImageRenderer(r) => f
                .debug_tuple("ImageRenderer")
                .field(&r.as_ref().map(|_| ".."))
                .finish(),
        }
    }
}

impl PartialEq for OptionValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (OptionValue::Bool(a), OptionValue::Bool(b)) => a == b,
            (OptionValue::Text(a), OptionValue::Text(b)) => a == b,
            (OptionValue::ImageRenderer(a), OptionValue::ImageRenderer(b)) => match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            },
            _ => false,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(Some(s.to_string()))
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(Some(s))
    }
}

impl From<Option<String>> for OptionValue {
    fn from(s: Option<String>) -> Self {
        OptionValue::Text(s)
    }
}

impl From<SharedImageRenderer> for OptionValue {
    fn from(renderer: SharedImageRenderer) -> Self {
        OptionValue::ImageRenderer(Some(renderer))
    }
}

impl Options {
    /// Read an option by name.
    pub fn get(&self, name: &str) -> Result<OptionValue> {
        let key: OptionKey = name.parse()?;
        Ok(match key {
            OptionKey::StripInternalLinks => self.strip_internal_links.into(),
            OptionKey::InternalLinkPrefix => self.internal_link_prefix.clone().into(),
            OptionKey::StripImages => self.strip_images.into(),
            OptionKey::ReduceImagesToTitle => self.reduce_images_to_title.into(),
            OptionKey::ImagePrefix => self.image_prefix.clone().into(),
            OptionKey::ImageParserCallback => {
                OptionValue::ImageRenderer(self.image_parser_callback.clone())
            }
            OptionKey::InsertImageCallbackOutput => self.insert_image_callback_output.into(),
            OptionKey::CleanHtml => self.clean_html.into(),
            OptionKey::UseSemanticEmphasis => self.use_semantic_emphasis.into(),
        })
    }

    /// Write an option by name.
    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<()> {
        let key: OptionKey = name.parse()?;
        let mismatch = || Error::OptionType {
            name: key.as_str().to_string(),
            expected: key.expects(),
        };

        match (key, value.into()) {
            (OptionKey::InternalLinkPrefix, OptionValue::Text(text)) => {
                self.internal_link_prefix = text
            }
            (OptionKey::ImagePrefix, OptionValue::Text(text)) => self.image_prefix = text,
            (OptionKey::ImageParserCallback, OptionValue::ImageRenderer(renderer)) => {
                self.image_parser_callback = renderer
            }
            (key, OptionValue::Bool(b)) => match key {
                OptionKey::StripInternalLinks => self.strip_internal_links = b,
                OptionKey::StripImages => self.strip_images = b,
                OptionKey::ReduceImagesToTitle => self.reduce_images_to_title = b,
                OptionKey::InsertImageCallbackOutput => self.insert_image_callback_output = b,
                OptionKey::CleanHtml => self.clean_html = b,
                OptionKey::UseSemanticEmphasis => self.use_semantic_emphasis = b,
                _ => return Err(mismatch()),
            },
            _ => return Err(mismatch()),
        }
        Ok(())
    }
}
