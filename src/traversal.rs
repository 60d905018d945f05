use crate::elements::Elements;
use crate::options::Options;
use std::collections::HashSet;

impl<'a> Elements<'a> {
    /// parent gets the closest element ancestor of each member. It returns a
    /// new collection containing these elements, each one only once.
    pub fn parent(&self) -> Self {
        let mut result = Vec::with_capacity(self.length());
        let mut set = HashSet::with_capacity(self.length());

        for node in self.nodes() {
            if let Some(parent) = node.parent_element() {
                if set.insert(parent.id) {
                    result.push(parent);
                }
            }
        }

        self.derive(result)
    }

    /// children gets the direct children of each member, in document order.
    ///
    /// Text children are included when `include_text` is set or the collection
    /// carries `INCLUDE_TEXT_NODES`. Children of different members are
    /// concatenated in member order.
    pub fn children(&self, include_text: bool) -> Self {
        let include_text = include_text || self.options.contains(Options::INCLUDE_TEXT_NODES);
        let mut result = Vec::with_capacity(self.length());

        for node in self.nodes() {
            result.extend(node.child_elements(include_text));
        }

        self.derive(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Document, Options};

    #[test]
    fn test_parent_deduplicates() {
        let doc = Document::from("<ul><li>1</li><li>2</li></ul><ol><li>3</li></ol>");
        let parents = doc.select("li").parent();
        assert_eq!(parents.length(), 2);
        let tags: Vec<String> = parents.tag().into_iter().map(|t| t.to_string()).collect();
        assert_eq!(tags, vec!["ul", "ol"]);
    }

    #[test]
    fn test_parent_of_root_is_empty() {
        let doc = Document::from("<p>x</p>");
        assert!(doc.elements().parent().is_empty());
    }

    #[test]
    fn test_children_text_nodes() {
        let doc = Document::from("<div>a<b>b</b>c</div>");
        let div = doc.select("div");
        assert_eq!(div.children(false).length(), 1);
        assert_eq!(div.children(true).length(), 3);

        let div = div.with_options(Options::INCLUDE_TEXT_NODES);
        let values: Vec<String> = div
            .children(false)
            .value()
            .into_iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(values, vec!["a", "b", "c"]);
    }
}
