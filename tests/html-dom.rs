use html5ever::serialize;
use html5ever::serialize::{SerializeOpts, TraversalScope};
use hquery::{Document, SerializableNodeRef};
use tendril::SliceExt;
use tendril::StrTendril;

fn parse_and_serialize(input: StrTendril) -> StrTendril {
    let dom = Document::fragment(&input);

    let root = dom.root();
    let inner: SerializableNodeRef = root.first_child().unwrap().into();

    let mut result = vec![];
    serialize(&mut result, &inner, Default::default()).unwrap();
    StrTendril::try_from_byte_slice(&result).unwrap()
}

fn collection_html(input: StrTendril) -> StrTendril {
    let dom = Document::fragment(&input);
    let html = dom.elements().children(true).html().unwrap();
    html
}

macro_rules! test_fn {
    ($f:ident, $name:ident, $input:expr, $output:expr) => {
        #[test]
        fn $name() {
            assert_eq!($output, &*$f($input.to_tendril()));
        }
    };

    // Shorthand for $output = $input
    ($f:ident, $name:ident, $input:expr) => {
        test_fn!($f, $name, $input, $input);
    };
}

macro_rules! test {
    ($($t:tt)*) => {
        test_fn!(parse_and_serialize, $($t)*);
    };
}

test!(empty, r#""#);
test!(unterminated_attribute, "<a a=\r\n", "");
test!(nested_inline, r#"<p><i>Hello</i>, World!</p>"#);
test!(
    misnested_inline,
    r#"<p><i>Hello!</p>, World!</i>"#,
    r#"<p><i>Hello!</i></p><i>, World!</i>"#
);
test!(
    unquoted_attribute,
    r#"<a href=/x title=y>z</a>"#,
    r#"<a href="/x" title="y">z</a>"#
);
test!(
    quote_in_attribute,
    r#"<span title='say "hi"'></span>"#,
    r#"<span title="say &quot;hi&quot;"></span>"#
);
test!(amp_in_attribute, r#"<img alt="&amp;">"#);
test!(bare_amp_in_text, r#"<p>fish & chips</p>"#, r#"<p>fish &amp; chips</p>"#);
test!(nbsp_in_text, "<p>a\u{a0}b</p>", r#"<p>a&nbsp;b</p>"#);
test!(angle_brackets_in_text, r#"<p>1 < 2 > 0</p>"#, r#"<p>1 &lt; 2 &gt; 0</p>"#);
test!(script_is_raw, r#"<script>if (a < b && c) {}</script>"#);
test!(style_is_raw, r#"<style>p > a { color: red }</style>"#);
test!(pre_leading_newline, "<pre>\nline</pre>", "<pre>line</pre>");
test!(textarea_leading_newline, "<textarea>\n\nline</textarea>", "<textarea>\nline</textarea>");
test!(void_elements, r#"<p>a<br>b<hr></p>"#, r#"<p>a<br>b</p><hr><p></p>"#);
test!(comment_in_text, r#"<p>before <!-- note --> after</p>"#);
test!(list_items_close, r#"<ul><li>a<li>b</ul>"#, r#"<ul><li>a</li><li>b</li></ul>"#);
test!(svg_attribute_namespace, r#"<svg xlink:href="x"></svg>"#);

#[test]
fn doctype() {
    let dom = Document::from("<!doctype html>");
    let mut result = vec![];
    let root = dom.root();
    let document: SerializableNodeRef = root.first_child().unwrap().into();
    serialize(
        &mut result,
        &document,
        SerializeOpts {
            scripting_enabled: true,
            traversal_scope: TraversalScope::IncludeNode,
            create_missing_parent: false,
        },
    )
    .unwrap();
    assert_eq!(String::from_utf8(result).unwrap(), "<!DOCTYPE html>");
}

#[test]
fn document_round_trip() {
    let markup = r#"<!DOCTYPE html><html><head><title>t</title></head><body><p class="a">x &amp; y</p><!--c--></body></html>"#;
    let dom = Document::from(markup);
    assert_eq!(&*dom.html().unwrap(), markup);

    let again = Document::from(&*dom.html().unwrap());
    assert_eq!(again.html().unwrap(), dom.html().unwrap());
}

// Serializing the members of a collection gives the same markup as
// serializing their common parent's children.
test_fn!(collection_html, collection_smoke_test, r#"<p><i>Hello</i>, World!</p>"#);
test_fn!(collection_html, collection_text_between_elements, r#"a<b>c</b>d"#);
test_fn!(
    collection_html,
    collection_escapes,
    r#"<p title='"'>&lt;</p>"#,
    r#"<p title="&quot;">&lt;</p>"#
);
