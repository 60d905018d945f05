use crate::document::Document;
use crate::dom_tree::{Node, NodeId};
use crate::elements::Elements;
use crate::error::{Error, Result};
use crate::options::Options;
use std::fmt;
use tendril::StrTendril;

/// Something `append` can add to every member.
#[derive(Debug, Clone)]
pub enum Content<'c> {
    /// Nodes from any document. Each member receives its own deep copy.
    Nodes(Vec<Node<'c>>),
    /// A string, inserted as literal text unless markup is allowed.
    Text(&'c str),
}

impl<'c, 'e: 'c> From<&'c Elements<'e>> for Content<'c> {
    fn from(elements: &'c Elements<'e>) -> Self {
        Content::Nodes(elements.elements())
    }
}

impl<'c> From<Node<'c>> for Content<'c> {
    fn from(node: Node<'c>) -> Self {
        Content::Nodes(vec![node])
    }
}

impl<'c> From<&'c str> for Content<'c> {
    fn from(text: &'c str) -> Self {
        Content::Text(text)
    }
}

impl<'c> From<&'c String> for Content<'c> {
    fn from(text: &'c String) -> Self {
        Content::Text(text.as_str())
    }
}

impl<'a> Elements<'a> {
    /// Appends `content` as the last children of every member.
    ///
    /// Every member gets a private deep copy, so no two members ever share a
    /// subtree. Strings become a single text node, unless `unsafe_markup` is
    /// set (or the collection carries `ALLOW_UNSAFE_MARKUP`), in which case
    /// they are parsed as an HTML fragment first. Markup that is empty or
    /// only whitespace fails with `Parse`.
    ///
    /// Content is imported once: the last member receives the imported nodes
    /// themselves and the other members receive copies of them.
    pub fn append<'c, C>(&mut self, content: C, unsafe_markup: bool) -> Result<&mut Self>
    where
        C: Into<Content<'c>>,
    {
        self.ensure_all("append children", "an element", |node| node.is_element())?;

        let document = self.document;
        let allow_markup = unsafe_markup || self.options.contains(Options::ALLOW_UNSAFE_MARKUP);
        let content = content.into();

        let fragment = match content {
            Content::Text(markup) if allow_markup => Some(parse_markup(markup)?),
            _ => None,
        };

        let targets = self.nodes.clone();
        let (last, rest) = match targets.split_last() {
            Some(split) => split,
            None => return Ok(self),
        };

        let sources: Vec<NodeId> = match (content, fragment) {
            (_, Some(ref fragment)) => {
                let root = fragment.document_element().ok_or_else(|| {
                    Error::Parse("markup did not produce a root element".to_string())
                })?;
                import_all(document, &root.children())?
            }
            (Content::Nodes(nodes), None) => import_all(document, &nodes)?,
            (Content::Text(text), None) => vec![document.create_text_node(text).id],
        };

        let tree = &document.tree;
        for node in rest {
            for source in &sources {
                if let Some(copy) = tree.deep_copy_from(tree, source) {
                    node.append_child(&copy);
                }
            }
        }
        for source in &sources {
            last.append_child(source);
        }

        tracing::debug!(
            targets = self.length(),
            sources = sources.len(),
            "appended content"
        );
        Ok(self)
    }

    /// Serializes every member, with its subtree, as one fragment.
    ///
    /// The document's formatter is applied unless `SKIP_PRETTY_PRINT` is set.
    pub fn html(&self) -> Result<StrTendril> {
        let mut markup = StrTendril::new();
        for node in self.nodes() {
            markup.push_tendril(&node.html()?);
        }

        Ok(self.document.pretty_print(markup, self.options))
    }
}

/// Parses `markup` as a body fragment, refusing markup with nothing in it.
fn parse_markup(markup: &str) -> Result<Document> {
    if markup.trim().is_empty() {
        return Err(Error::Parse("markup is empty".to_string()));
    }

    Ok(Document::fragment(markup))
}

/// Imports `nodes` into `document` once, detached.
fn import_all(document: &Document, nodes: &[Node]) -> Result<Vec<NodeId>> {
    nodes
        .iter()
        .map(|node| {
            document
                .import_node(node)
                .map(|copy| copy.id)
                .ok_or_else(|| Error::InvalidArgument(format!("{:?} does not exist", node)))
        })
        .collect()
}

impl<'a> fmt::Display for Elements<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let html = self.html().map_err(|_| fmt::Error)?;
        f.write_str(&html)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Document, Error, Options};

    #[test]
    fn test_append_text_is_literal() {
        let doc = Document::from("<div></div>");
        let mut div = doc.select("div");
        div.append("<b>bold</b>", false).unwrap();

        assert!(doc.select("b").is_empty());
        assert_eq!(&*div.html().unwrap(), "<div>&lt;b&gt;bold&lt;/b&gt;</div>");
    }

    #[test]
    fn test_append_markup() {
        let doc = Document::from("<div></div><div></div>");
        let mut divs = doc.select("div");
        divs.append("<b>bold</b> tail", true).unwrap();

        assert_eq!(doc.select("b").length(), 2);
        assert_eq!(&*divs.html().unwrap(), "<div><b>bold</b> tail</div><div><b>bold</b> tail</div>");
    }

    #[test]
    fn test_append_markup_allowed_by_options() {
        let doc = Document::from("<div></div>").with_options(Options::ALLOW_UNSAFE_MARKUP);
        doc.select("div").append("<i>x</i>", false).unwrap();
        assert_eq!(doc.select("i").length(), 1);
    }

    #[test]
    fn test_append_empty_markup_fails() {
        let doc = Document::from("<div></div>");
        let mut div = doc.select("div");
        assert!(matches!(div.append("", true), Err(Error::Parse(_))));
        assert!(matches!(div.append("  \n ", true), Err(Error::Parse(_))));
        assert_eq!(&*div.html().unwrap(), "<div></div>");
    }

    #[test]
    fn test_append_leaves_no_detached_nodes() {
        let doc = Document::from("<div></div><div></div><div></div>");
        let mut divs = doc.select("div");

        let before = doc.tree.len();
        divs.append("x", false).unwrap();
        assert_eq!(doc.tree.len(), before + 3);

        let before = doc.tree.len();
        divs.append("<b>y</b>", true).unwrap();
        assert_eq!(doc.tree.len(), before + 6);

        let before = doc.tree.len();
        divs.append(&doc.select("div b").element(0).unwrap(), false).unwrap();
        assert_eq!(doc.tree.len(), before + 6);
        assert_eq!(doc.select("div b").length(), 6);
    }

    #[test]
    fn test_append_to_text_node_fails() {
        let doc = Document::from("<p>text</p>");
        let mut text = doc.select("p").children(true);
        assert!(matches!(
            text.append("more", false),
            Err(Error::Structural { index: 0, .. })
        ));
        assert_eq!(&*doc.select("p").joined_text(), "text");
    }

    #[test]
    fn test_append_node_from_other_document() {
        let source = Document::fragment(r#"<span class="s">x</span>"#);
        let span = source.document_element().unwrap().children()[0];

        let doc = Document::from("<p></p>");
        doc.select("p").append(span, false).unwrap();
        assert_eq!(doc.select("p span.s").length(), 1);
        assert_eq!(source.elements().select("span").length(), 1);
    }

    #[test]
    fn test_display() {
        let doc = Document::from(r#"<p id="a">1</p>"#);
        assert_eq!(doc.select("p").to_string(), r#"<p id="a">1</p>"#);
        assert_eq!(doc.select("span").to_string(), "");
    }
}
