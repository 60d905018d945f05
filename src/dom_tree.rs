use markup5ever::Attribute;
use markup5ever::QualName;
use std::cell::{Ref, RefCell};
use std::fmt::{self, Debug};
use tendril::StrTendril;

/// Alias for `NodeRef`.
pub type Node<'a> = NodeRef<'a, NodeData>;

/// Node data specific to the node type.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// The `Document` itself.
    Document,

    /// A `DOCTYPE` with name, public id, and system id.
    Doctype {
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    },

    /// A text node.
    Text { contents: StrTendril },

    /// A comment.
    Comment { contents: StrTendril },

    /// An element with attributes.
    Element(Element),

    /// A Processing instruction.
    ProcessingInstruction {
        target: StrTendril,
        contents: StrTendril,
    },
}

/// An element with attributes.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) name: QualName,
    pub(crate) attrs: Vec<Attribute>,

    /// For HTML \<template\> elements, the [template contents].
    ///
    /// [template contents]: https://html.spec.whatwg.org/multipage/#template-contents
    pub(crate) template_contents: Option<NodeId>,

    /// Whether the node is a [HTML integration point].
    ///
    /// [HTML integration point]: https://html.spec.whatwg.org/multipage/#html-integration-point
    #[allow(dead_code)]
    mathml_annotation_xml_integration_point: bool,
}

impl Element {
    pub(crate) fn new(
        name: QualName,
        attrs: Vec<Attribute>,
        template_contents: Option<NodeId>,
        mathml_annotation_xml_integration_point: bool,
    ) -> Element {
        Element {
            name,
            attrs,
            template_contents,
            mathml_annotation_xml_integration_point,
        }
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&StrTendril> {
        self.attrs
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| &attr.value)
    }
}

/// Merges `text` into `node` when it is a text node. Returns false otherwise.
pub(crate) fn append_to_existing_text(node: &mut InnerNode<NodeData>, text: &str) -> bool {
    match node.data {
        NodeData::Text { ref mut contents } => {
            contents.push_slice(text);
            true
        }
        _ => false,
    }
}

/// Ids of the direct children of `id`, read from an already borrowed arena.
pub(crate) fn child_ids_in<T>(nodes: &[InnerNode<T>], id: &NodeId) -> Vec<NodeId> {
    let mut ids = vec![];
    let mut next = nodes.get(id.value).and_then(|node| node.first_child);

    while let Some(child_id) = next {
        ids.push(child_id);
        next = nodes[child_id.value].next_sibling;
    }

    ids
}

/// A node identifier, unique within its tree.
#[derive(Copy, Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    value: usize,
}

impl NodeId {
    pub(crate) fn new(value: usize) -> Self {
        NodeId { value }
    }

    pub(crate) fn value(&self) -> usize {
        self.value
    }
}

/// An arena of nodes. Nodes are never freed; detached nodes simply have no parent.
pub struct Tree<T> {
    nodes: RefCell<Vec<InnerNode<T>>>,
}

impl<T: Debug> Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("nodes", &self.nodes).finish()
    }
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Self {
            nodes: RefCell::new(self.nodes.borrow().clone()),
        }
    }
}

impl<T> Tree<T> {
    pub fn new(root: T) -> Self {
        let root_id = NodeId::new(0);
        Self {
            nodes: RefCell::new(vec![InnerNode::new(root_id, root)]),
        }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId { value: 0 }
    }

    pub fn root(&self) -> NodeRef<T> {
        NodeRef {
            id: self.root_id(),
            tree: self,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn create_node(&self, data: T) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let new_node_id = NodeId::new(nodes.len());
        nodes.push(InnerNode::new(new_node_id, data));
        new_node_id
    }

    pub fn get(&self, id: &NodeId) -> Option<NodeRef<T>> {
        let nodes = self.nodes.borrow();
        nodes.get(id.value).map(|_| NodeRef {
            id: *id,
            tree: self,
        })
    }

    pub fn get_unchecked(&self, id: &NodeId) -> NodeRef<T> {
        NodeRef {
            id: *id,
            tree: self,
        }
    }

    pub(crate) fn borrow_nodes(&self) -> Ref<Vec<InnerNode<T>>> {
        self.nodes.borrow()
    }

    /// Runs `f` against the node data. Returns `None` for an unknown id.
    pub fn query_node<F, B>(&self, id: &NodeId, f: F) -> Option<B>
    where
        F: FnOnce(&InnerNode<T>) -> B,
    {
        let nodes = self.nodes.borrow();
        nodes.get(id.value).map(f)
    }

    /// Runs `f` against the mutable node data. Returns `None` for an unknown id.
    pub fn update_node<F, B>(&self, id: &NodeId, f: F) -> Option<B>
    where
        F: FnOnce(&mut InnerNode<T>) -> B,
    {
        let mut nodes = self.nodes.borrow_mut();
        nodes.get_mut(id.value).map(f)
    }

    pub fn compare_node<F, B>(&self, a: &NodeId, b: &NodeId, f: F) -> Option<B>
    where
        F: FnOnce(&InnerNode<T>, &InnerNode<T>) -> B,
    {
        let nodes = self.nodes.borrow();
        let node_a = nodes.get(a.value)?;
        let node_b = nodes.get(b.value)?;

        Some(f(node_a, node_b))
    }

    fn link(&self, id: &NodeId, f: impl Fn(&InnerNode<T>) -> Option<NodeId>) -> Option<NodeRef<T>> {
        self.query_node(id, f)
            .flatten()
            .map(|id| NodeRef { id, tree: self })
    }

    pub fn parent_of(&self, id: &NodeId) -> Option<NodeRef<T>> {
        self.link(id, |node| node.parent)
    }

    pub fn first_child_of(&self, id: &NodeId) -> Option<NodeRef<T>> {
        self.link(id, |node| node.first_child)
    }

    pub fn last_child_of(&self, id: &NodeId) -> Option<NodeRef<T>> {
        self.link(id, |node| node.last_child)
    }

    pub fn prev_sibling_of(&self, id: &NodeId) -> Option<NodeRef<T>> {
        self.link(id, |node| node.prev_sibling)
    }

    pub fn next_sibling_of(&self, id: &NodeId) -> Option<NodeRef<T>> {
        self.link(id, |node| node.next_sibling)
    }

    /// Ids of the direct children of `id`, in order.
    pub fn child_ids_of(&self, id: &NodeId) -> Vec<NodeId> {
        child_ids_in(&self.nodes.borrow(), id)
    }

    pub fn children_of(&self, id: &NodeId) -> Vec<NodeRef<T>> {
        self.child_ids_of(id)
            .into_iter()
            .map(|id| NodeRef { id, tree: self })
            .collect()
    }

    pub fn append_child_data_of(&self, id: &NodeId, data: T) {
        let new_child_id = self.create_node(data);
        self.append_child_of(id, &new_child_id);
    }

    /// Appends `new_child_id` as the last child of `id`, detaching it from any previous parent.
    pub fn append_child_of(&self, id: &NodeId, new_child_id: &NodeId) {
        self.remove_from_parent(new_child_id);

        let mut nodes = self.nodes.borrow_mut();
        let last_child_id = nodes[id.value].last_child;

        {
            let new_child = &mut nodes[new_child_id.value];
            new_child.parent = Some(*id);
            new_child.prev_sibling = last_child_id;
            new_child.next_sibling = None;
        }

        if let Some(last_child_id) = last_child_id {
            nodes[last_child_id.value].next_sibling = Some(*new_child_id);
        }

        let parent = &mut nodes[id.value];
        if parent.first_child.is_none() {
            parent.first_child = Some(*new_child_id);
        }
        parent.last_child = Some(*new_child_id);
    }

    /// Inserts `new_sibling_id` right before `id`.
    pub fn append_prev_sibling_of(&self, id: &NodeId, new_sibling_id: &NodeId) {
        self.remove_from_parent(new_sibling_id);

        let mut nodes = self.nodes.borrow_mut();
        let (parent_id, prev_sibling_id) = {
            let node = &nodes[id.value];
            (node.parent, node.prev_sibling)
        };

        {
            let new_sibling = &mut nodes[new_sibling_id.value];
            new_sibling.parent = parent_id;
            new_sibling.prev_sibling = prev_sibling_id;
            new_sibling.next_sibling = Some(*id);
        }

        nodes[id.value].prev_sibling = Some(*new_sibling_id);

        match prev_sibling_id {
            Some(prev_sibling_id) => nodes[prev_sibling_id.value].next_sibling = Some(*new_sibling_id),
            None => {
                if let Some(parent_id) = parent_id {
                    nodes[parent_id.value].first_child = Some(*new_sibling_id);
                }
            }
        }
    }

    /// Detaches `id` from its parent. The node and its subtree stay in the arena.
    pub fn remove_from_parent(&self, id: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let (parent_id, prev_sibling_id, next_sibling_id) = match nodes.get(id.value) {
            Some(node) => (node.parent, node.prev_sibling, node.next_sibling),
            None => return,
        };

        let parent_id = match parent_id {
            Some(parent_id) => parent_id,
            None => return,
        };

        {
            let node = &mut nodes[id.value];
            node.parent = None;
            node.prev_sibling = None;
            node.next_sibling = None;
        }

        match prev_sibling_id {
            Some(prev) => nodes[prev.value].next_sibling = next_sibling_id,
            None => nodes[parent_id.value].first_child = next_sibling_id,
        }

        match next_sibling_id {
            Some(next) => nodes[next.value].prev_sibling = prev_sibling_id,
            None => nodes[parent_id.value].last_child = prev_sibling_id,
        }
    }

    /// Moves every child of `id` to the end of `new_parent_id`. Detaches them when there is no new parent.
    pub fn reparent_children_of(&self, id: &NodeId, new_parent_id: Option<NodeId>) {
        for child_id in self.child_ids_of(id) {
            match new_parent_id {
                Some(ref new_parent_id) => self.append_child_of(new_parent_id, &child_id),
                None => self.remove_from_parent(&child_id),
            }
        }
    }

    pub fn remove_children_of(&self, id: &NodeId) {
        self.reparent_children_of(id, None)
    }
}

/// Links and data of one node inside the arena.
#[derive(Debug, Clone)]
pub struct InnerNode<T> {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) data: T,
}

impl<T> InnerNode<T> {
    fn new(id: NodeId, data: T) -> Self {
        InnerNode {
            id,
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            first_child: None,
            last_child: None,
            data,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}

/// A handle to a node: its id plus the tree that owns it.
pub struct NodeRef<'a, T> {
    pub id: NodeId,
    pub tree: &'a Tree<T>,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        NodeRef {
            id: self.id,
            tree: self.tree,
        }
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> Debug for NodeRef<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef").field("id", &self.id).finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    pub fn new(id: NodeId, tree: &'a Tree<T>) -> Self {
        Self { id, tree }
    }

    pub fn query<F, B>(&self, f: F) -> Option<B>
    where
        F: FnOnce(&InnerNode<T>) -> B,
    {
        self.tree.query_node(&self.id, f)
    }

    pub fn update<F, B>(&self, f: F) -> Option<B>
    where
        F: FnOnce(&mut InnerNode<T>) -> B,
    {
        self.tree.update_node(&self.id, f)
    }

    /// Identity comparison: same id in the same tree.
    pub fn is_same_node(&self, other: &NodeRef<'_, T>) -> bool {
        self.id == other.id && std::ptr::eq(self.tree, other.tree)
    }

    /// Whether this handle points into `tree`.
    pub fn belongs_to(&self, tree: &Tree<T>) -> bool {
        std::ptr::eq(self.tree, tree) && self.tree.get(&self.id).is_some()
    }

    pub fn parent(&self) -> Option<Self> {
        self.tree.parent_of(&self.id)
    }

    pub fn first_child(&self) -> Option<Self> {
        self.tree.first_child_of(&self.id)
    }

    pub fn last_child(&self) -> Option<Self> {
        self.tree.last_child_of(&self.id)
    }

    pub fn prev_sibling(&self) -> Option<Self> {
        self.tree.prev_sibling_of(&self.id)
    }

    pub fn next_sibling(&self) -> Option<Self> {
        self.tree.next_sibling_of(&self.id)
    }

    pub fn children(&self) -> Vec<Self> {
        self.tree.children_of(&self.id)
    }

    pub fn append_child(&self, id: &NodeId) {
        self.tree.append_child_of(&self.id, id)
    }

    pub fn append_prev_sibling(&self, id: &NodeId) {
        self.tree.append_prev_sibling_of(&self.id, id)
    }

    pub fn remove_from_parent(&self) {
        self.tree.remove_from_parent(&self.id)
    }

    pub fn remove_children(&self) {
        self.tree.remove_children_of(&self.id)
    }
}

impl Tree<NodeData> {
    /// Copies the subtree rooted at `id` in `source` into this tree and returns the new, unattached root.
    ///
    /// `source` may be this tree, which makes this a deep clone. Template contents are copied along.
    pub fn deep_copy_from(&self, source: &Tree<NodeData>, id: &NodeId) -> Option<NodeId> {
        let mut data = source.query_node(id, |node| node.data.clone())?;

        if let NodeData::Element(ref mut element) = data {
            if let Some(contents) = element.template_contents {
                element.template_contents = self.deep_copy_from(source, &contents);
            }
        }

        let new_id = self.create_node(data);
        for child_id in source.child_ids_of(id) {
            if let Some(new_child_id) = self.deep_copy_from(source, &child_id) {
                self.append_child_of(&new_id, &new_child_id);
            }
        }

        Some(new_id)
    }
}
