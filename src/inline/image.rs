//! Image and file embedding.

use std::sync::Arc;

use crate::render::HtmlWriter;
use crate::verbatim;
use crate::Options;

/// Namespaces whose links embed media instead of linking to a page.
pub const MEDIA_NAMESPACES: [&str; 2] = ["Image", "File"];

/// Pluggable image renderer used in place of the built-in handler.
///
/// Receives the image target, its caption, and the style options that
/// preceded the caption. The returned markup is only inserted when
/// [`Options::insert_image_callback_output`] is set; otherwise the call is
/// notification-only and the link renders as an ordinary internal link.
pub trait ImageRenderer: Send + Sync {
    fn render(&self, href: &str, caption: &str, options: &[&str]) -> Option<String>;
}

impl<F> ImageRenderer for F
where
    F: Fn(&str, &str, &[&str]) -> Option<String> + Send + Sync,
{
    fn render(&self, href: &str, caption: &str, options: &[&str]) -> Option<String> {
        self(href, caption, options)
    }
}

/// Shared handle to an image renderer.
pub type SharedImageRenderer = Arc<dyn ImageRenderer>;

/// Render an image with the built-in handler.
///
/// `frame` wraps the image in a bordered, right-floated box with the caption
/// underneath; `right` floats it right. Other style options are ignored.
pub fn render_image(href: &str, caption: &str, style: &[&str], options: &Options) -> String {
    if options.strip_images {
        return verbatim::placeholders_of(caption);
    }
    if options.reduce_images_to_title {
        return caption.to_string();
    }

    let src = format!("{}{}", options.image_prefix.as_deref().unwrap_or(""), href);
    let mut writer = HtmlWriter::new();
    writer.image(&src, caption);
    let mut markup = writer.into_string();

    for option in style {
        match *option {
            "frame" => {
                markup = format!(
                    "<div style=\"float: right; background-color: #F5F5F5; border: 1px solid #D0D0D0; padding: 2px\">{markup}<div>{caption}</div></div>"
                );
            }
            "right" => {
                markup = format!("<div style=\"float: right\">{markup}</div>");
            }
            _ => {}
        }
    }
    markup
}
