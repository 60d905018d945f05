use crate::dom_tree::append_to_existing_text;
use crate::dom_tree::Element;
use crate::dom_tree::Node;
use crate::dom_tree::NodeData;
use crate::dom_tree::NodeId;
use crate::dom_tree::Tree;
use crate::elements::Elements;
use crate::error::Result;
use crate::format::{format_or_keep, Formatter};
use crate::options::Options;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{parse_document, parse_fragment, ParseOpts};
use markup5ever::interface::tree_builder;
use markup5ever::interface::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use markup5ever::Attribute;
use markup5ever::ExpandedName;
use markup5ever::QualName;
use markup5ever::{local_name, namespace_url, ns};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tendril::StrTendril;
use tendril::TendrilSink;

/// Document represents an HTML document to be queried and manipulated.
pub struct Document {
    pub(crate) tree: Tree<NodeData>,

    /// Recoverable errors reported by the parser, in the order they occurred.
    pub errors: Vec<Cow<'static, str>>,

    /// Quirks mode chosen by the parser from the doctype.
    pub quirks_mode: QuirksMode,

    options: Options,
    formatter: Option<Box<dyn Formatter>>,
}

impl Default for Document {
    fn default() -> Document {
        Self {
            tree: Tree::new(NodeData::Document),
            errors: vec![],
            quirks_mode: tree_builder::NoQuirks,
            options: Options::empty(),
            formatter: None,
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.tree.len())
            .field("errors", &self.errors)
            .field("options", &self.options)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

impl From<&str> for Document {
    fn from(html: &str) -> Document {
        let document = parse_document(Sink::default(), Default::default()).one(html);
        tracing::debug!(
            nodes = document.tree.len(),
            errors = document.errors.len(),
            "parsed document"
        );
        document
    }
}

impl From<StrTendril> for Document {
    fn from(html: StrTendril) -> Document {
        Document::from(&*html)
    }
}

impl From<&String> for Document {
    fn from(html: &String) -> Document {
        Document::from(html.as_str())
    }
}

impl Document {
    /// Parses `html` as a fragment in `<body>` context.
    ///
    /// The parsed nodes become children of a synthetic `html` root element.
    pub fn fragment(html: &str) -> Document {
        let opts = ParseOpts {
            tokenizer: Default::default(),
            tree_builder: TreeBuilderOpts {
                exact_errors: false,
                scripting_enabled: true,
                iframe_srcdoc: false,
                drop_doctype: true,
                ignore_missing_rules: false,
                quirks_mode: tree_builder::NoQuirks,
            },
        };

        parse_fragment(
            Sink::default(),
            opts,
            QualName::new(None, ns!(html), local_name!("body")),
            Vec::new(),
        )
        .one(html)
    }

    /// Sets the options inherited by every collection this document hands out.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Installs a pretty-printer used by `html()` unless `SKIP_PRETTY_PRINT` is set.
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Formatter + 'static,
    {
        self.formatter = Some(Box::new(formatter));
        self
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// The document node, parent of the doctype and the document element.
    pub fn root(&self) -> Node {
        self.tree.root()
    }

    /// The first element child of the document node, usually `<html>`.
    pub fn document_element(&self) -> Option<Node> {
        self.root()
            .children()
            .into_iter()
            .find(|child| child.is_element())
    }

    /// A collection holding the document element, or an empty one.
    pub fn elements(&self) -> Elements {
        let nodes = self.document_element().into_iter().collect();
        Elements::with_nodes(self, nodes, self.options)
    }

    /// Shortcut for `self.elements().select(sel)`.
    pub fn select(&self, sel: &str) -> Elements {
        self.elements().select(sel)
    }

    /// Gets the HTML contents of the document, including text and comment nodes.
    pub fn html(&self) -> Result<StrTendril> {
        let markup = self.root().inner_html()?;
        Ok(self.pretty_print(markup, self.options))
    }

    /// Gets the text content of the document.
    pub fn text(&self) -> StrTendril {
        self.root().text()
    }

    /// Creates a detached text node owned by this document.
    pub fn create_text_node(&self, text: &str) -> Node {
        let id = self.tree.create_node(NodeData::Text {
            contents: StrTendril::from(text),
        });
        self.tree.get_unchecked(&id)
    }

    /// Deep copies `node`, which may belong to any document, into this one.
    ///
    /// The copy is detached: it has no parent until it is appended somewhere.
    pub fn import_node(&self, node: &Node) -> Option<Node> {
        self.tree
            .deep_copy_from(node.tree, &node.id)
            .map(|id| self.tree.get_unchecked(&id))
    }

    /// Whether `node` points into this document's tree.
    pub fn owns(&self, node: &Node) -> bool {
        node.belongs_to(&self.tree)
    }

    pub(crate) fn pretty_print(&self, markup: StrTendril, options: Options) -> StrTendril {
        if options.contains(Options::SKIP_PRETTY_PRINT) {
            return markup;
        }

        match self.formatter {
            Some(ref formatter) => {
                StrTendril::from(format_or_keep(formatter.as_ref(), markup.to_string()).as_str())
            }
            None => markup,
        }
    }
}

/// Receives html5ever's tree construction calls and builds a `Document`.
///
/// Element names are mirrored in `names` so that `elem_name` can return a
/// borrowed name while the tree itself sits behind a `RefCell`.
#[derive(Default)]
struct Sink {
    document: Document,
    names: HashMap<NodeId, QualName>,
}

impl Sink {
    fn tree(&self) -> &Tree<NodeData> {
        &self.document.tree
    }

    /// Merges `text` into `sibling` when it is a text node.
    fn merge_text(&self, sibling: Option<Node>, text: &StrTendril) -> bool {
        sibling
            .and_then(|node| node.update(|inner| append_to_existing_text(inner, text)))
            .unwrap_or(false)
    }
}

impl TreeSink for Sink {
    type Output = Document;
    type Handle = NodeId;

    fn finish(self) -> Document {
        self.document
    }

    fn parse_error(&mut self, msg: Cow<'static, str>) {
        tracing::trace!(%msg, "html parse error");
        self.document.errors.push(msg);
    }

    fn get_document(&mut self) -> NodeId {
        self.tree().root_id()
    }

    // Only ever called for template elements.
    fn get_template_contents(&mut self, target: &NodeId) -> NodeId {
        let contents = self
            .tree()
            .query_node(target, |node| match node.data {
                NodeData::Element(ref e) => e.template_contents,
                _ => None,
            })
            .flatten();

        match contents {
            Some(contents) => contents,
            None => panic!("{:?} has no template contents", target),
        }
    }

    fn set_quirks_mode(&mut self, mode: QuirksMode) {
        self.document.quirks_mode = mode;
    }

    fn same_node(&self, x: &NodeId, y: &NodeId) -> bool {
        x == y
    }

    // Only ever called for elements.
    fn elem_name(&self, target: &NodeId) -> ExpandedName {
        match self.names.get(target) {
            Some(name) => name.expanded(),
            None => panic!("{:?} is not an element", target),
        }
    }

    fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>, flags: ElementFlags) -> NodeId {
        let template_contents = if flags.template {
            Some(self.tree().create_node(NodeData::Document))
        } else {
            None
        };

        let element = Element::new(
            name.clone(),
            attrs,
            template_contents,
            flags.mathml_annotation_xml_integration_point,
        );
        let id = self.tree().create_node(NodeData::Element(element));

        self.names.insert(id, name);
        id
    }

    fn create_comment(&mut self, text: StrTendril) -> NodeId {
        self.tree().create_node(NodeData::Comment { contents: text })
    }

    fn create_pi(&mut self, target: StrTendril, data: StrTendril) -> NodeId {
        self.tree().create_node(NodeData::ProcessingInstruction {
            target,
            contents: data,
        })
    }

    // Adjacent text is merged into one node.
    fn append(&mut self, parent: &NodeId, child: NodeOrText<NodeId>) {
        match child {
            NodeOrText::AppendNode(id) => self.tree().append_child_of(parent, &id),
            NodeOrText::AppendText(text) => {
                if !self.merge_text(self.tree().last_child_of(parent), &text) {
                    self.tree()
                        .append_child_data_of(parent, NodeData::Text { contents: text });
                }
            }
        }
    }

    fn append_before_sibling(&mut self, sibling: &NodeId, child: NodeOrText<NodeId>) {
        let id = match child {
            NodeOrText::AppendNode(id) => id,
            NodeOrText::AppendText(text) => {
                if self.merge_text(self.tree().prev_sibling_of(sibling), &text) {
                    return;
                }
                self.tree().create_node(NodeData::Text { contents: text })
            }
        };

        self.tree().append_prev_sibling_of(sibling, &id);
    }

    fn append_based_on_parent_node(
        &mut self,
        element: &NodeId,
        prev_element: &NodeId,
        child: NodeOrText<NodeId>,
    ) {
        if self.tree().parent_of(element).is_some() {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &mut self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        let root = self.tree().root_id();
        self.tree().append_child_data_of(
            &root,
            NodeData::Doctype {
                name,
                public_id,
                system_id,
            },
        );
    }

    // Attributes already on the element win.
    fn add_attrs_if_missing(&mut self, target: &NodeId, attrs: Vec<Attribute>) {
        self.tree().update_node(target, |node| {
            if let NodeData::Element(ref mut e) = node.data {
                let present: HashSet<QualName> = e.attrs.iter().map(|a| a.name.clone()).collect();
                e.attrs
                    .extend(attrs.into_iter().filter(|a| !present.contains(&a.name)));
            }
        });
    }

    fn remove_from_parent(&mut self, target: &NodeId) {
        self.tree().remove_from_parent(target);
    }

    fn reparent_children(&mut self, node: &NodeId, new_parent: &NodeId) {
        self.tree().reparent_children_of(node, Some(*new_parent));
    }
}
