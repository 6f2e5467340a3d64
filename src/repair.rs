//! HTML repair.
//!
//! The converter emits tags line by line and can leave markup unbalanced
//! (stray `</i>`, emphasis crossing an anchor). When `clean_html` is set the
//! finished document is handed to an [`HtmlRepair`] collaborator that returns
//! a well-formed fragment.

use crate::error::RepairError;

/// Turns a possibly malformed HTML fragment into a well-formed one.
pub trait HtmlRepair: Send + Sync {
    fn repair(&self, html: &str) -> Result<String, RepairError>;
}

/// Returns its input unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl HtmlRepair for PassThrough {
    fn repair(&self, html: &str) -> Result<String, RepairError> {
        Ok(html.to_string())
    }
}

#[cfg(feature = "repair")]
pub use html5::Html5everRepair;

#[cfg(feature = "repair")]
mod html5 {
    use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
    use html5ever::tendril::TendrilSink;
    use html5ever::{parse_fragment, LocalName, Namespace, ParseOpts, QualName};
    use markup5ever_rcdom::{RcDom, SerializableHandle};

    use super::HtmlRepair;
    use crate::error::RepairError;

    const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

    /// Re-parses the fragment in a `<body>` context with html5ever and
    /// serializes the result. Unclosed elements are closed and stray end
    /// tags dropped, following the HTML tree-construction rules.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct Html5everRepair;

    impl HtmlRepair for Html5everRepair {
        fn repair(&self, html: &str) -> Result<String, RepairError> {
            let context = QualName::new(
                None,
                Namespace::from(XHTML_NAMESPACE),
                LocalName::from("body"),
            );
            let dom = parse_fragment(RcDom::default(), ParseOpts::default(), context, vec![])
                .one(html);

            // The fragment parser wraps its output in a synthetic <html> root.
            let root = dom
                .document
                .children
                .borrow()
                .first()
                .cloned()
                .ok_or_else(|| RepairError {
                    message: "fragment parser produced no root".to_string(),
                })?;

            let mut out = Vec::with_capacity(html.len());
            let opts = SerializeOpts {
                traversal_scope: TraversalScope::ChildrenOnly(None),
                ..SerializeOpts::default()
            };
            serialize(&mut out, &SerializableHandle::from(root), opts)?;
            Ok(String::from_utf8(out)?)
        }
    }
}

/// The repair used when none is configured.
#[cfg(feature = "repair")]
pub fn default_repair() -> std::sync::Arc<dyn HtmlRepair> {
    std::sync::Arc::new(Html5everRepair)
}

/// The repair used when none is configured.
#[cfg(not(feature = "repair"))]
pub fn default_repair() -> std::sync::Arc<dyn HtmlRepair> {
    std::sync::Arc::new(PassThrough)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through() {
        assert_eq!(PassThrough.repair("<b>open").unwrap(), "<b>open");
    }

    #[cfg(feature = "repair")]
    #[test]
    fn test_closes_unclosed_elements() {
        let html = Html5everRepair.repair("<b>bold").unwrap();
        assert_eq!(html, "<b>bold</b>");
    }

    #[cfg(feature = "repair")]
    #[test]
    fn test_drops_stray_end_tags() {
        let html = Html5everRepair.repair("a</i>b").unwrap();
        assert_eq!(html, "ab");
    }

    #[cfg(feature = "repair")]
    #[test]
    fn test_keeps_attributes() {
        let html = Html5everRepair
            .repair("<a href=\"http://x.org/?a=1&amp;b=2\" target=\"_blank\">x</a>")
            .unwrap();
        assert_eq!(
            html,
            "<a href=\"http://x.org/?a=1&amp;b=2\" target=\"_blank\">x</a>"
        );
    }

    #[cfg(feature = "repair")]
    #[test]
    fn test_void_elements() {
        let html = Html5everRepair.repair("a<br /><br />b<hr />").unwrap();
        assert_eq!(html, "a<br><br>b<hr>");
    }
}
