use ferrowiki::{to_html_with_options, Options};
use proptest::prelude::*;

fn render(input: &str) -> String {
    let options = Options {
        clean_html: false,
        ..Options::default()
    };
    to_html_with_options(input, "", &options)
}

proptest! {
    #[test]
    fn verbatim_content_is_preserved(content in "[a-z\\[\\]'*#=:;{}| ]{0,40}") {
        let html = render(&format!("x <nowiki>{content}</nowiki> y"));
        prop_assert_eq!(html, format!("x {content} y"));
    }

    #[test]
    fn lists_are_balanced(items in prop::collection::vec(("[*#]{1,6}", "[a-z ]{0,8}"), 1..20)) {
        let doc: Vec<String> = items.iter().map(|(m, t)| format!("{m}{t}")).collect();
        let html = render(&doc.join("\n"));
        let opened = html.matches("<ul>").count() + html.matches("<ol>").count();
        let closed = html.matches("</ul>").count() + html.matches("</ol>").count();
        prop_assert_eq!(opened, closed);
        prop_assert_eq!(html.matches("<li>").count(), html.matches("</li>").count());
    }

    #[test]
    fn link_numbers_increase(count in 1usize..20, per_line in 1usize..4) {
        let line = "[http://example.org] ".repeat(per_line);
        let html = render(&vec![line; count].join("\n"));
        let mut last = 0;
        for n in 1..=(count * per_line) {
            let at = html.find(&format!(">[{n}]<"));
            prop_assert!(at.is_some(), "missing [{}]", n);
            let at = at.unwrap_or_default();
            prop_assert!(n == 1 || at > last);
            last = at;
        }
    }

    #[test]
    fn parse_never_panics(input in "\\PC{0,200}") {
        let _ = render(&input);
    }
}
