use crate::dom_tree::{Element, Node, NodeData};
use crate::selector::{AttrMatch, AttrPredicate, Selector, Step};
use std::collections::HashSet;
use tendril::StrTendril;

/// Applies a selector to a working set of nodes, one step at a time.
#[derive(Debug, Clone)]
pub(crate) struct Matcher<'s> {
    selector: &'s Selector,
    match_self: bool,
}

impl<'s> Matcher<'s> {
    pub(crate) fn new(selector: &'s Selector, match_self: bool) -> Self {
        Matcher {
            selector,
            match_self,
        }
    }

    /// Runs every step left to right. A selector without steps matches nothing.
    pub(crate) fn match_all<'a>(&self, nodes: Vec<Node<'a>>) -> Vec<Node<'a>> {
        if self.selector.is_empty() {
            return vec![];
        }

        self.selector
            .steps()
            .iter()
            .fold(nodes, |working, step| self.match_step(step, &working))
    }

    fn match_step<'a>(&self, step: &Step, working: &[Node<'a>]) -> Vec<Node<'a>> {
        let heap = self.heap(step, working);
        let heap_len = heap.len();

        let matched: Vec<Node<'a>> = heap
            .into_iter()
            .filter(|node| {
                node.query(|inner| match inner.data {
                    NodeData::Element(ref e) => step.matches(e, self.match_self),
                    _ => false,
                })
                .unwrap_or(false)
            })
            .collect();

        tracing::trace!(step = %step, heap = heap_len, matched = matched.len(), "selector step");
        matched
    }

    /// The candidates of one step: the working set itself, or the descendants
    /// of every member carrying the step's tag, concatenated in member order.
    fn heap<'a>(&self, step: &Step, working: &[Node<'a>]) -> Vec<Node<'a>> {
        if self.match_self {
            return working.to_vec();
        }

        let tag = step.tag.as_deref().unwrap_or("*");
        working
            .iter()
            .flat_map(|node| node.elements_by_tag_name(tag))
            .collect()
    }
}

impl Step {
    /// Checks id, classes and attributes, cheapest first. The tag is only
    /// checked when the heap did not already guarantee it.
    pub(crate) fn matches(&self, e: &Element, check_tag: bool) -> bool {
        if check_tag {
            if let Some(ref tag) = self.tag {
                if !e.name.local.eq_str_ignore_ascii_case(tag) {
                    return false;
                }
            }
        }

        if let Some(ref id) = self.id {
            if e.attr("id").map(|value| &**value) != Some(id.as_str()) {
                return false;
            }
        }

        if !self.classes.is_empty() {
            let classes: HashSet<&str> = e
                .attr("class")
                .map(|value| value.split_whitespace().collect())
                .unwrap_or_default();

            if !self.classes.iter().all(|class| classes.contains(class.as_str())) {
                return false;
            }
        }

        self.attrs.iter().all(|attr| attr.matches(e.attr(&attr.name)))
    }
}

impl AttrPredicate {
    pub(crate) fn matches(&self, value: Option<&StrTendril>) -> bool {
        let value: &str = match value {
            Some(value) => value,
            None => return false,
        };

        match self.matcher {
            AttrMatch::Present => true,
            AttrMatch::Exact(ref expected) => value == expected,
            AttrMatch::Word(ref word) => value.split_whitespace().any(|w| w == word),
            AttrMatch::Prefix(ref prefix) => {
                value == prefix
                    || (value.starts_with(prefix.as_str())
                        && value[prefix.len()..].starts_with('-'))
            }
        }
    }
}
