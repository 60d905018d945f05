
use data::{doc, small};
use hquery::{Collapsed, Error};

#[test]
fn test_attr_exists() {
    let doc = doc();
    assert!(doc.select("a").attr("href").is_some());
}

#[test]
fn test_attr_or() {
    let doc = doc();
    let attr1: &str = &doc.select("a").attr_or("fake-attribute", "alternative");
    let attr2: &str = &doc.select("zz").attr_or("fake-attribute", "alternative");
    assert_eq!(attr1, "alternative");
    assert_eq!(attr2, "alternative");
}

#[test]
fn test_attribute_absent_differs_from_empty() {
    let doc = doc();
    let values = doc.select("a").attribute("title").single().unwrap();
    assert_eq!(values.as_deref(), Some(""));
    assert_eq!(doc.select("a").attribute("rel").single().unwrap(), None);
}

#[test]
fn test_getters_collapse_by_size() {
    let doc = doc();
    assert_eq!(doc.select("table").id().collapse(), Collapsed::Null);
    assert_eq!(&*doc.select("#main").id().single().unwrap(), "main");
    assert_eq!(doc.select("li").tag().len(), 3);
    assert!(matches!(doc.select("li").tag().single(), Err(Error::SizeMismatch(3))));
}

#[test]
fn test_tag_is_lowercase() {
    let doc = hquery::Document::from("<DIV><SPAN>x</SPAN></DIV>");
    assert_eq!(&*doc.select("span").tag().single().unwrap(), "span");
}

#[test]
fn test_set_attribute() {
    let doc = doc();
    let mut sel = doc.select("li");
    sel.set_attribute("data-seen", "1").unwrap();

    assert_eq!(doc.select(r#"li[data-seen="1"]"#).length(), 3);
}

#[test]
fn test_delete_attribute() {
    let doc = doc();
    let mut sel = doc.select("div");
    sel.delete_attribute("id").unwrap();
    sel.delete_attribute("missing").unwrap();

    assert!(sel.attr("id").is_none());
    assert_eq!(doc.select("#main").length(), 0);
}

#[test]
fn test_set_attribute_on_text_node_fails() {
    let doc = doc();
    let mut children = doc.select("#foot").children(true);
    let before = doc.select("[data-x]").length();

    let result = children.set_attribute("data-x", "1");
    assert!(matches!(result, Err(Error::Structural { index: 0, .. })));
    assert_eq!(doc.select("[data-x]").length(), before);
}

#[test]
fn test_classnames() {
    let doc = doc();
    let classes = doc.select("li.first").classnames().single().unwrap();
    assert_eq!(classes, vec!["item", "first"]);
    assert_eq!(&*doc.select("li.last").classname().single().unwrap(), "item last");
}

#[test]
fn test_set_classnames() {
    let doc = doc();
    let mut sel = doc.select("h1");
    sel.set_classnames(vec!["title", "big"]).unwrap();

    assert_eq!(&*sel.classname().single().unwrap(), "title big");
    assert_eq!(doc.select("h1.big.title").length(), 1);

    sel.set_classname("plain").unwrap();
    assert_eq!(doc.select("h1.big").length(), 0);
}

#[test]
fn test_add_class() {
    let doc = doc();
    let mut sel = doc.select("li");
    sel.add_class("picked").unwrap();

    assert_eq!(doc.select("li.picked").length(), 3);
    assert_eq!(&*sel.classname().into_vec()[0], "item first picked");
}

#[test]
fn test_add_class_is_idempotent() {
    let doc = doc();
    let mut sel = doc.select("li.first");
    sel.add_class("a b").unwrap();
    let once = sel.classnames().single().unwrap();
    sel.add_class("a b").unwrap();
    sel.add_classes(&["b", "item"]).unwrap();

    assert_eq!(sel.classnames().single().unwrap(), once);
    assert_eq!(once, vec!["item", "first", "a", "b"]);
}

#[test]
fn test_add_class_to_classless_element() {
    let doc = small();
    let mut sel = doc.select("p#x");
    sel.add_class("new").unwrap();
    assert_eq!(&*sel.classname().single().unwrap(), "new");
}

#[test]
fn test_text() {
    let doc = doc();
    assert_eq!(&*doc.select("ul").text().single().unwrap().trim(), "hammer\n      nail\n      manual");
    assert_eq!(&*doc.select("#foot p").joined_text(), "end");
}

#[test]
fn test_set_content_is_literal() {
    let doc = small();
    let mut sel = doc.select("p#x");
    sel.set_content("<b>bold</b>").unwrap();

    assert_eq!(doc.select("b").length(), 0);
    assert_eq!(&*sel.content().single().unwrap(), "<b>bold</b>");
    assert_eq!(&*sel.html().unwrap(), r#"<p id="x">&lt;b&gt;bold&lt;/b&gt;</p>"#);
}

#[test]
fn test_set_value_replaces_children() {
    let doc = doc();
    let mut sel = doc.select("ul");
    sel.set_value("gone").unwrap();

    assert_eq!(doc.select("li").length(), 0);
    assert_eq!(&*sel.value().single().unwrap(), "gone");
}
