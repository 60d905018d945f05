use crate::document::Document;
use crate::dom_tree::Node;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::values::Values;
use std::collections::HashSet;
use std::fmt;
use std::vec::IntoIter;

/// An ordered set of nodes of one document, queried and changed as a whole.
///
/// Members may repeat and their order is kept. A collection never owns its
/// nodes: changes made through one collection are visible through every
/// other collection holding the same nodes.
#[derive(Clone)]
pub struct Elements<'a> {
    pub(crate) document: &'a Document,
    pub(crate) nodes: Vec<Node<'a>>,
    pub(crate) options: Options,
}

impl<'a> fmt::Debug for Elements<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Elements")
            .field("nodes", &self.nodes)
            .field("options", &self.options)
            .finish()
    }
}

impl<'a> Elements<'a> {
    /// An empty collection bound to `document`.
    pub fn new(document: &'a Document) -> Self {
        Self::with_nodes(document, vec![], document.options())
    }

    /// A collection holding a single node.
    pub fn from_node(document: &'a Document, node: Node<'a>) -> Result<Self> {
        Self::from_nodes(document, vec![node])
    }

    /// A collection holding `nodes` in the given order.
    ///
    /// Fails with `InvalidArgument` when a node belongs to another document.
    pub fn from_nodes(document: &'a Document, nodes: Vec<Node<'a>>) -> Result<Self> {
        if let Some(index) = nodes.iter().position(|node| !document.owns(node)) {
            return Err(Error::InvalidArgument(format!(
                "node at position {} does not belong to this document",
                index
            )));
        }

        Ok(Self::with_nodes(document, nodes, document.options()))
    }

    pub(crate) fn with_nodes(document: &'a Document, nodes: Vec<Node<'a>>, options: Options) -> Self {
        Elements {
            document,
            nodes,
            options,
        }
    }

    /// A new collection sharing this one's document and options.
    pub(crate) fn derive(&self, nodes: Vec<Node<'a>>) -> Self {
        Self::with_nodes(self.document, nodes, self.options)
    }

    /// Replaces the option set of this collection.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    /// A copy of the raw member list.
    pub fn elements(&self) -> Vec<Node<'a>> {
        self.nodes.clone()
    }

    /// The member at `index` wrapped as a one-member collection.
    pub fn element(&self, index: usize) -> Option<Elements<'a>> {
        self.nodes.get(index).map(|node| self.derive(vec![*node]))
    }

    /// Replacing a member in place is not supported.
    pub fn replace(&mut self, _index: usize, _node: Node<'a>) -> Result<&mut Self> {
        // TODO: splice the replacement into the tree where the old member sits.
        Err(Error::NotImplemented("replacing a member of a collection"))
    }

    /// Returns the number of members.
    pub fn length(&self) -> usize {
        self.nodes.len()
    }

    /// Is an alias for `length`.
    pub fn size(&self) -> usize {
        self.length()
    }

    pub fn len(&self) -> usize {
        self.length()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Is there any member.
    pub fn exists(&self) -> bool {
        !self.is_empty()
    }

    /// Iterates the members, each wrapped as a one-member collection.
    pub fn iter(&self) -> Iter<'a> {
        Iter {
            document: self.document,
            options: self.options,
            iter: self.nodes.clone().into_iter(),
        }
    }

    /// Detaches every member, with its subtree, from its parent and empties the collection.
    ///
    /// Nothing is detached when one of the members has no parent.
    pub fn delete(&mut self) -> Result<&mut Self> {
        if let Some(index) = self.nodes.iter().position(|node| node.parent().is_none()) {
            return Err(Error::Structural {
                index,
                reason: "node has no parent to be removed from".to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(self.nodes.len());
        let nodes = std::mem::take(&mut self.nodes);
        for node in nodes.iter().filter(|node| seen.insert(node.id)) {
            node.remove_from_parent();
        }

        tracing::debug!(count = seen.len(), "deleted members");
        Ok(self)
    }

    /// Collects one value per member, in member order.
    pub(crate) fn for_all_get<T, F>(&self, f: F) -> Values<T>
    where
        F: FnMut(&Node<'a>) -> T,
    {
        Values::new(self.nodes.iter().map(f).collect())
    }

    /// Fails with `Structural` at the first member `accepts` turns down.
    pub(crate) fn ensure_all<P>(&self, what: &str, expected: &str, accepts: P) -> Result<()>
    where
        P: Fn(&Node<'a>) -> bool,
    {
        match self.nodes.iter().position(|node| !accepts(node)) {
            Some(index) => Err(Error::Structural {
                index,
                reason: format!("cannot {} on a node that is not {}", what, expected),
            }),
            None => Ok(()),
        }
    }

    /// Applies `f` to every member once all of them are known to be elements.
    pub(crate) fn for_all_elements_do<F>(&self, what: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&Node<'a>),
    {
        self.ensure_all(what, "an element", |node| node.is_element())?;

        for node in &self.nodes {
            f(node);
        }

        Ok(())
    }
}

/// Iterator over the members of an `Elements`, yielding one-member collections.
pub struct Iter<'a> {
    document: &'a Document,
    options: Options,
    iter: IntoIter<Node<'a>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Elements<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.document;
        let options = self.options;
        self.iter
            .next()
            .map(|node| Elements::with_nodes(document, vec![node], options))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, 'b> IntoIterator for &'b Elements<'a> {
    type Item = Elements<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
