//! End-to-end inlining into HTML documents.

use css::{CssInliner, InlineError, SelectorError, StyleSheet, SyntaxError, apply, inline_css};
use html::{Document, parse_html};
use std::error::Error;
use std::thread;

type TestResult = Result<(), Box<dyn Error>>;

fn first_style(doc: &Document, local: &str) -> Option<String> {
    let element = doc.elements_named(local).next()?;
    doc.get_attribute(element, "style").map(str::to_owned)
}

#[test]
fn rule_overwrites_same_named_inline_property() -> TestResult {
    let mut doc = parse_html("<p style=\"color:blue;font-size:10px\">x</p>")?;
    inline_css("p { color: red }", &mut doc)?;
    assert_eq!(
        first_style(&doc, "p").as_deref(),
        Some("color:red;font-size:10px")
    );
    Ok(())
}

#[test]
fn shorthands_are_inlined_as_longhands() -> TestResult {
    let mut doc = parse_html("<div>x</div>")?;
    inline_css("div { margin: 1px 2px; border: 1px solid black }", &mut doc)?;
    assert_eq!(
        first_style(&doc, "div").as_deref(),
        Some(
            "margin-top:1px;margin-bottom:1px;margin-right:2px;margin-left:2px;\
             border-width:1px;border-style:solid;border-color:black"
        )
    );
    Ok(())
}

#[test]
fn lower_specificity_rule_applied_last_wins() -> TestResult {
    // `#lead` ranks first, `p` is applied after it and overwrites `color`.
    let mut doc = parse_html("<p id=\"lead\">x</p>")?;
    inline_css("#lead { color: blue; font-weight: bold } p { color: red }", &mut doc)?;
    assert_eq!(
        first_style(&doc, "p").as_deref(),
        Some("color:red;font-weight:bold")
    );
    Ok(())
}

#[test]
fn inlined_document_serializes_with_style_attributes() -> TestResult {
    // `ul > li` (3) ranks before `li:last-child` (1), so `color` is appended last.
    let mut doc = parse_html("<html><head></head><body><ul><li>a</li><li>b</li></ul></body></html>")?;
    inline_css("li:last-child { color: gray } ul > li { padding: 0 }", &mut doc)?;
    assert_eq!(
        doc.to_html(),
        "<html><head></head><body><ul>\
         <li style=\"padding-top:0;padding-bottom:0;padding-right:0;padding-left:0\">a</li>\
         <li style=\"padding-top:0;padding-bottom:0;padding-right:0;padding-left:0;color:gray\">b</li>\
         </ul></body></html>"
    );
    Ok(())
}

#[test]
fn grammar_error_leaves_document_untouched() -> TestResult {
    let mut doc = parse_html("<p>x</p>")?;
    let before = doc.to_html();
    let result = inline_css("p { color: red; oops }", &mut doc);
    assert!(matches!(
        result,
        Err(InlineError::Syntax(SyntaxError::MalformedDeclaration { .. }))
    ));
    assert_eq!(doc.to_html(), before);
    Ok(())
}

#[test]
fn selector_error_leaves_document_untouched() -> TestResult {
    let mut doc = parse_html("<p>x</p>")?;
    let before = doc.to_html();
    let sheet = StyleSheet::parse("p { color: red } p:nth-child(2) { color: blue }")?;
    assert!(matches!(
        apply(&sheet, &mut doc),
        Err(InlineError::Selector(SelectorError::Unsupported { ref fragment })) if fragment == "p:nth-child(2)"
    ));
    assert_eq!(doc.to_html(), before);
    Ok(())
}

#[test]
fn one_inliner_serves_many_documents_concurrently() -> TestResult {
    let sheet = StyleSheet::parse(".note { color: green }")?;
    let inliner = CssInliner::new(&sheet)?;
    let styles = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|index| {
                let inliner = &inliner;
                scope.spawn(move || -> Result<Option<String>, html::DomError> {
                    let mut doc = parse_html(&format!("<p class=\"note\">{index}</p>"))?;
                    inliner.apply(&mut doc);
                    Ok(first_style(&doc, "p"))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| "worker panicked"))
            .collect::<Vec<_>>()
    });
    for style in styles {
        assert_eq!(style??.as_deref(), Some("color:green"));
    }
    Ok(())
}
