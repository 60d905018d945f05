use crate::dom_tree::{child_ids_in, NodeData, NodeRef};
use crate::serializing::SerializableNodeRef;
use html5ever::serialize;
use html5ever::serialize::{SerializeOpts, TraversalScope};
use markup5ever::{namespace_url, ns};
use markup5ever::{Attribute, LocalName, QualName};
use std::io;
use tendril::StrTendril;

impl<'a> NodeRef<'a, NodeData> {
    pub fn is_document(&self) -> bool {
        self.query(|node| matches!(node.data, NodeData::Document))
            .unwrap_or(false)
    }

    pub fn is_element(&self) -> bool {
        self.query(|node| matches!(node.data, NodeData::Element(_)))
            .unwrap_or(false)
    }

    pub fn is_text(&self) -> bool {
        self.query(|node| matches!(node.data, NodeData::Text { .. }))
            .unwrap_or(false)
    }

    pub fn is_comment(&self) -> bool {
        self.query(|node| matches!(node.data, NodeData::Comment { .. }))
            .unwrap_or(false)
    }

    /// The local name of an element. `None` for any other kind of node.
    pub fn node_name(&self) -> Option<StrTendril> {
        self.query(|node| match node.data {
            NodeData::Element(ref e) => Some(StrTendril::from(&*e.name.local)),
            _ => None,
        })
        .flatten()
    }

    /// Whether this is an element whose local name equals `name`, ignoring ASCII case.
    pub fn has_tag(&self, name: &str) -> bool {
        self.query(|node| match node.data {
            NodeData::Element(ref e) => e.name.local.eq_str_ignore_ascii_case(name),
            _ => false,
        })
        .unwrap_or(false)
    }

    pub fn attr(&self, name: &str) -> Option<StrTendril> {
        self.query(|node| match node.data {
            NodeData::Element(ref e) => e.attr(name).cloned(),
            _ => None,
        })
        .flatten()
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Sets an attribute, replacing an existing value. Returns false for non-element nodes.
    pub fn set_attr(&self, name: &str, val: &str) -> bool {
        self.update(|node| match node.data {
            NodeData::Element(ref mut e) => {
                let updated = e
                    .attrs
                    .iter_mut()
                    .find(|attr| &*attr.name.local == name)
                    .map(|attr| attr.value = StrTendril::from(val))
                    .is_some();

                if !updated {
                    e.attrs.push(Attribute {
                        name: QualName::new(None, ns!(), LocalName::from(name)),
                        value: StrTendril::from(val),
                    });
                }
                true
            }
            _ => false,
        })
        .unwrap_or(false)
    }

    /// Removes an attribute if present. Returns false for non-element nodes.
    pub fn remove_attr(&self, name: &str) -> bool {
        self.update(|node| match node.data {
            NodeData::Element(ref mut e) => {
                e.attrs.retain(|attr| &*attr.name.local != name);
                true
            }
            _ => false,
        })
        .unwrap_or(false)
    }

    /// The whitespace separated tokens of the `class` attribute, as written.
    pub fn class_tokens(&self) -> Vec<String> {
        self.attr("class")
            .map(|classes| classes.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }

    /// The text content of this node and all of its descendants.
    pub fn text(&self) -> StrTendril {
        let mut ops = vec![self.id];
        let mut text = StrTendril::new();
        let nodes = self.tree.borrow_nodes();

        while let Some(id) = ops.pop() {
            let node = match nodes.get(id.value()) {
                Some(node) => node,
                None => continue,
            };

            match node.data {
                NodeData::Element(_) | NodeData::Document => {
                    ops.extend(child_ids_in(&nodes, &id).into_iter().rev());
                }

                NodeData::Text { ref contents } => text.push_tendril(contents),

                _ => continue,
            }
        }

        text
    }

    /// The node value: the contents of text and comment nodes, the text content of elements.
    pub fn node_value(&self) -> StrTendril {
        let own = self
            .query(|node| match node.data {
                NodeData::Text { ref contents } | NodeData::Comment { ref contents } => {
                    Some(contents.clone())
                }
                _ => None,
            })
            .flatten();

        own.unwrap_or_else(|| self.text())
    }

    /// Sets the node value. Elements lose their children in favour of a single text node.
    pub fn set_node_value(&self, value: &str) {
        let replaced = self
            .update(|node| match node.data {
                NodeData::Text { ref mut contents } | NodeData::Comment { ref mut contents } => {
                    *contents = StrTendril::from(value);
                    true
                }
                _ => false,
            })
            .unwrap_or(false);

        if replaced || !self.is_element() {
            return;
        }

        self.remove_children();
        if !value.is_empty() {
            self.tree.append_child_data_of(
                &self.id,
                NodeData::Text {
                    contents: StrTendril::from(value),
                },
            );
        }
    }

    /// The closest ancestor that is an element, skipping document and fragment boundaries.
    pub fn parent_element(&self) -> Option<Self> {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.is_element() {
                return Some(node);
            }
            current = node.parent();
        }

        None
    }

    /// Direct children that are elements, plus text nodes when `include_text` is set.
    pub fn child_elements(&self, include_text: bool) -> Vec<Self> {
        self.children()
            .into_iter()
            .filter(|child| child.is_element() || (include_text && child.is_text()))
            .collect()
    }

    /// Every descendant element with the given tag name, in document order. `*` matches any element.
    pub fn elements_by_tag_name(&self, name: &str) -> Vec<Self> {
        let wildcard = name.is_empty() || name == "*";
        let mut found = vec![];
        let mut ops = self.children();
        ops.reverse();

        while let Some(node) = ops.pop() {
            if !node.is_element() {
                continue;
            }

            if wildcard || node.has_tag(name) {
                found.push(node);
            }

            let mut children = node.children();
            children.reverse();
            ops.extend(children);
        }

        found
    }

    /// Serializes the node itself and its subtree.
    pub fn html(&self) -> io::Result<StrTendril> {
        self.serialize_html(TraversalScope::IncludeNode)
    }

    /// Serializes only the children of the node.
    pub fn inner_html(&self) -> io::Result<StrTendril> {
        self.serialize_html(TraversalScope::ChildrenOnly(None))
    }

    fn serialize_html(&self, traversal_scope: TraversalScope) -> io::Result<StrTendril> {
        let inner: SerializableNodeRef = (*self).into();
        let mut result = vec![];
        serialize(
            &mut result,
            &inner,
            SerializeOpts {
                scripting_enabled: false,
                traversal_scope,
                create_missing_parent: false,
            },
        )?;

        StrTendril::try_from_byte_slice(&result)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "serializer produced invalid utf-8"))
    }
}
