
use data::{doc, small};
use hquery::{Document, Error};
use std::collections::HashSet;

#[test]
fn test_append_clones_into_every_target() {
    let doc = Document::from(
        r#"<div class="t"></div><div class="t"></div><div class="t"></div><span id="src">s</span>"#,
    );
    let source = doc.select("#src");
    let mut targets = doc.select("div.t");
    targets.append(&source, false).unwrap();

    let copies = doc.select("div.t span");
    assert_eq!(copies.length(), 3);

    let ids: HashSet<_> = copies.nodes().iter().map(|n| n.id).collect();
    assert_eq!(ids.len(), 3);
    assert!(!ids.contains(&source.nodes()[0].id));

    // The source stays where it was.
    assert_eq!(doc.select("span").length(), 4);
}

#[test]
fn test_appended_copies_are_independent() {
    let doc = Document::from(r#"<div></div><div></div><b>x</b>"#);
    let b = doc.select("b");
    doc.select("div").append(&b, false).unwrap();

    let mut first = doc.select("div b").element(0).unwrap();
    first.set_content("changed").unwrap();

    let texts: Vec<String> = doc
        .select("div b")
        .text()
        .into_iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(texts, vec!["changed", "x"]);
    assert_eq!(&*b.joined_text(), "x");
}

#[test]
fn test_append_text() {
    let doc = small();
    let mut sel = doc.select("p#x");
    sel.append(" there", false).unwrap();
    assert_eq!(&*sel.joined_text(), "hi there");
}

#[test]
fn test_append_markup() {
    let doc = small();
    let mut sel = doc.select("p");
    sel.append(r#"<em class="e">!</em>"#, true).unwrap();

    assert_eq!(doc.select("p em.e").length(), 2);
    assert_eq!(&*doc.select("p.y").html().unwrap(), r#"<p class="y">bye<em class="e">!</em></p>"#);
}

#[test]
fn test_append_from_another_document() {
    let other = Document::from(r#"<ul><li>one</li><li>two</li></ul>"#);
    let doc = doc();
    let mut foot = doc.select("#foot");
    foot.append(&other.select("li"), false).unwrap();

    assert_eq!(doc.select("#foot li").length(), 2);
    assert_eq!(other.select("li").length(), 2);
}

#[test]
fn test_append_to_empty_collection() {
    let doc = small();
    let mut none = doc.select("table");
    none.append("x", false).unwrap();
    assert_eq!(&*doc.select("div").joined_text(), "hibye");
}

#[test]
fn test_delete() {
    let doc = doc();
    let mut sel = doc.select("li");
    sel.delete().unwrap();

    assert!(sel.is_empty());
    assert_eq!(doc.select("li").length(), 0);
    assert_eq!(doc.select("ul").length(), 1);
}

#[test]
fn test_delete_tolerates_duplicates() {
    let doc = Document::from("<div><div><p>x</p></div></div>");
    let mut sel = doc.select("div p");
    assert_eq!(sel.length(), 2);
    sel.delete().unwrap();
    assert_eq!(doc.select("p").length(), 0);
}

#[test]
fn test_delete_detached_fails() {
    let doc = doc();
    let mut root = doc.elements();
    root.delete().unwrap();
    assert!(doc.document_element().is_none());

    let mut detached = hquery::Elements::from_nodes(&doc, vec![doc.create_text_node("t")]).unwrap();
    assert!(matches!(
        detached.delete(),
        Err(Error::Structural { index: 0, .. })
    ));
    assert_eq!(detached.length(), 1);
}

#[test]
fn test_replace_is_not_implemented() {
    let doc = small();
    let mut sel = doc.select("p");
    let node = sel.nodes()[1];
    assert!(matches!(sel.replace(0, node), Err(Error::NotImplemented(_))));
    assert_eq!(sel.length(), 2);
}

#[test]
fn test_html_of_members() {
    let doc = small();
    assert_eq!(
        &*doc.select("p").html().unwrap(),
        r#"<p id="x">hi</p><p class="y">bye</p>"#
    );
    assert_eq!(&*doc.select("span").html().unwrap(), "");
}

#[test]
fn test_formatter_applies_to_html() {
    let doc = Document::from("<p>x</p>").with_formatter(|markup: &str| {
        Ok::<_, hquery::FormatError>(markup.to_uppercase())
    });
    assert_eq!(&*doc.select("p").html().unwrap(), "<P>X</P>");

    let raw = doc.select("p").with_options(hquery::Options::SKIP_PRETTY_PRINT);
    assert_eq!(&*raw.html().unwrap(), "<p>x</p>");
}

#[test]
fn test_failing_formatter_keeps_markup() {
    let doc = Document::from("<p>x</p>")
        .with_formatter(|_: &str| Err::<String, hquery::FormatError>("broken".into()));
    assert_eq!(&*doc.select("p").html().unwrap(), "<p>x</p>");
}
