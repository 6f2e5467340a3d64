use chrono::NaiveDate;
use ferrowiki::{to_html_with_options, FixedClock, Options, StaticSite, WikiParser};

fn parser() -> WikiParser {
    let options = Options {
        clean_html: false,
        ..Options::default()
    };
    let at = NaiveDate::from_ymd_opt(2024, 3, 7)
        .and_then(|d| d.and_hms_opt(9, 5, 0))
        .expect("valid date");
    WikiParser::new(options)
        .with_clock(FixedClock(at))
        .with_site(StaticSite("wiki.example.org".into()))
}

fn render(input: &str) -> String {
    parser().parse(input, "").into_html()
}

// Headings

#[test]
fn heading_level_two() {
    assert_eq!(render("== Title =="), "\n\n<h2>Title</h2>\n\n");
}

#[test]
fn heading_all_levels() {
    for level in 1..=6 {
        let marks = "=".repeat(level);
        let html = render(&format!("{marks} Heading {marks}"));
        assert_eq!(html, format!("\n\n<h{level}>Heading</h{level}>\n\n"));
    }
}

#[test]
fn heading_without_closing_run_is_text() {
    assert_eq!(render("== Title"), "== Title");
}

#[test]
fn heading_closes_open_emphasis() {
    let html = render("''open\n== T ==");
    assert_eq!(html, "<i>open</i>\n\n<h2>T</h2>\n\n");
}

#[test]
fn heading_content_gets_inline_rules() {
    let html = render("== [[Main Page]] ==");
    assert_eq!(html, "\n\n<h2><a href=\"Main_Page\">Main Page</a></h2>\n\n");
}

// Blank lines

#[test]
fn blank_line_separates_paragraphs() {
    assert_eq!(render("one\n\ntwo"), "one<br /><br />two");
}

#[test]
fn blank_line_after_heading_is_suppressed() {
    assert_eq!(render("== T ==\n\ntext"), "\n\n<h2>T</h2>\n\ntext");
}

#[test]
fn repeated_blank_lines_break_once() {
    assert_eq!(render("a\n\n\n\nb"), "a<br /><br />b");
}

#[test]
fn empty_document_is_a_single_blank_line() {
    assert_eq!(render(""), "<br /><br />");
}

#[test]
fn lines_are_joined_without_separator() {
    assert_eq!(render("text   \r\nmore\t"), "textmore");
}

// Horizontal rules

#[test]
fn horizontal_rule() {
    assert_eq!(render("a\n----\nb"), "a<hr />b");
}

#[test]
fn five_hyphens_are_text() {
    assert_eq!(render("-----"), "-----");
}

// Preformatted text

#[test]
fn preformat_block() {
    let html = render(" x = 1\n y = 2\nafter");
    assert_eq!(html, "<pre>x = 1\ny = 2\n</pre>\nafter");
}

#[test]
fn preformat_ignores_markup() {
    assert_eq!(render(" [[x]] ''y''"), "<pre>[[x]] ''y''\n</pre>\n");
}

#[test]
fn tab_starts_preformat() {
    assert_eq!(render("\tcode"), "<pre>code\n</pre>\n");
}

// Behavior switches

#[test]
fn toc_switches_are_removed() {
    assert_eq!(render("__TOC__\n== A =="), "\n\n<h2>A</h2>\n\n");
    assert_eq!(render("a __NoToc__ b"), "a  b");
}

// Verbatim regions

#[test]
fn verbatim_region_is_literal() {
    assert_eq!(render("<nowiki>''not emphasis''</nowiki>"), "''not emphasis''");
}

#[test]
fn verbatim_link_is_not_an_anchor() {
    assert_eq!(render("see <nowiki>[[Foo]]</nowiki>"), "see [[Foo]]");
}

#[test]
fn verbatim_tags_ignore_case() {
    assert_eq!(render("<NoWiki>[[x]]</NOWIKI>"), "[[x]]");
}

#[test]
fn verbatim_region_spanning_lines() {
    assert_eq!(render("<nowiki>* a\n== b ==</nowiki>"), "* a\n== b ==");
}

#[test]
fn verbatim_regions_keep_their_order() {
    assert_eq!(
        render("<nowiki>''1''</nowiki> and <nowiki>''2''</nowiki>\n<nowiki>''3''</nowiki>"),
        "''1'' and ''2''''3''"
    );
}

#[test]
fn verbatim_inside_variable_braces_stays_literal() {
    assert_eq!(render("<nowiki>x</nowiki> {{<nowiki>y</nowiki>}}"), "x {{y}}");
}

#[test]
fn verbatim_caption_survives_stripped_image() {
    let options = Options {
        clean_html: false,
        strip_images: true,
        ..Options::default()
    };
    assert_eq!(
        to_html_with_options("<nowiki>x</nowiki> [[Image:a.png|<nowiki>cap</nowiki>]]", "", &options),
        "x cap"
    );
}

#[test]
fn verbatim_caption_survives_image_reduced_to_title() {
    let options = Options {
        clean_html: false,
        reduce_images_to_title: true,
        ..Options::default()
    };
    assert_eq!(
        to_html_with_options("<nowiki>x</nowiki> [[Image:a.png|<nowiki>cap</nowiki>]]", "", &options),
        "x cap"
    );
}

#[test]
fn verbatim_in_link_target_appears_once() {
    assert_eq!(render("[[a<nowiki>b</nowiki>]]"), "<a href=\"A\">ab</a>");
    assert_eq!(
        render("<nowiki>x</nowiki> [[a<nowiki>b</nowiki>]]"),
        "x <a href=\"A\">ab</a>"
    );
}

#[test]
fn verbatim_in_href_is_not_escaped() {
    assert_eq!(
        render("[[a<nowiki>b&c</nowiki>|t]]"),
        "<a href=\"Ab&c\">t</a>"
    );
    assert_eq!(
        render("[http://e.org/<nowiki>a b</nowiki> site]"),
        "<a href=\"http://e.org/a b\" target=\"_blank\">site</a>"
    );
}

#[test]
fn unterminated_verbatim_is_text() {
    assert_eq!(render("<nowiki>''x''"), "<nowiki><i>x</i>");
}

// Redirects

#[test]
fn redirect_is_recorded_and_rendered() {
    let rendered = parser().parse("#REDIRECT [[Target]]", "");
    assert_eq!(rendered.redirect_target(), Some("Target"));
    assert_eq!(
        rendered.html(),
        "\n<ol>\n<li>REDIRECT <a href=\"Target\">Target</a></li>\n</ol>\n"
    );
}

#[test]
fn no_redirect_for_ordinary_documents() {
    let rendered = parser().parse("Just text", "");
    assert_eq!(rendered.redirect_target(), None);
}

// Repair

#[cfg(feature = "repair")]
#[test]
fn default_options_repair_output() {
    let html = to_html_with_options("a\n\nb", "", &Options::default());
    assert_eq!(html, "a<br><br>b");
}

#[cfg(feature = "repair")]
#[test]
fn repair_drops_stray_end_tags() {
    let html = to_html_with_options("x</span>y", "", &Options::default());
    assert_eq!(html, "xy");
}

#[cfg(feature = "repair")]
#[test]
fn repair_balances_crossed_emphasis() {
    // Raw output is "<b>b <i>i</b></i>".
    let html = to_html_with_options("'''b ''i'''", "", &Options::default());
    assert_eq!(html, "<b>b <i>i</i></b>");
}

#[test]
fn unrepaired_output_keeps_xhtml_void_tags() {
    assert_eq!(render("----"), "<hr />");
}
