use crate::elements::Elements;
use crate::error::Result;
use crate::values::Values;
use tendril::StrTendril;

impl<'a> Elements<'a> {
    /// Gets the `id` attribute of each member, empty when absent.
    pub fn id(&self) -> Values<StrTendril> {
        self.for_all_get(|node| node.attr("id").unwrap_or_default())
    }

    /// Gets the lowercased tag name of each member, empty for non-element nodes.
    pub fn tag(&self) -> Values<StrTendril> {
        self.for_all_get(|node| {
            node.node_name()
                .map(|name| StrTendril::from(name.to_ascii_lowercase().as_str()))
                .unwrap_or_default()
        })
    }

    /// Gets the text content of each member, including its descendants.
    pub fn text(&self) -> Values<StrTendril> {
        self.for_all_get(|node| node.text())
    }

    /// Gets the combined text content of every member.
    pub fn joined_text(&self) -> StrTendril {
        let mut s = StrTendril::new();

        for node in self.nodes() {
            s.push_tendril(&node.text());
        }

        s
    }

    /// Gets the node value of each member.
    pub fn value(&self) -> Values<StrTendril> {
        self.for_all_get(|node| node.node_value())
    }

    /// Sets the node value of each member.
    ///
    /// Every member must be an element, a text node or a comment; otherwise
    /// nothing is changed.
    pub fn set_value(&mut self, value: &str) -> Result<&mut Self> {
        self.ensure_all("set the value", "an element, text or comment", |node| {
            node.is_element() || node.is_text() || node.is_comment()
        })?;

        for node in self.nodes() {
            node.set_node_value(value);
        }

        Ok(self)
    }

    /// Alias for `value`.
    pub fn content(&self) -> Values<StrTendril> {
        self.value()
    }

    /// Sets the content of each member to literal text.
    ///
    /// Markup in `content` is not interpreted: `<b>` ends up as the characters
    /// `<b>` and is escaped when serialized.
    pub fn set_content(&mut self, content: &str) -> Result<&mut Self> {
        self.set_value(content)
    }

    /// Gets the named attribute of each member. `None` means the attribute is
    /// absent, which is different from an empty value.
    pub fn attribute(&self, name: &str) -> Values<Option<StrTendril>> {
        self.for_all_get(|node| node.attr(name))
    }

    /// Sets the given attribute on each member.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<&mut Self> {
        self.for_all_elements_do("set an attribute", |node| {
            node.set_attr(name, value);
        })?;

        Ok(self)
    }

    /// Removes the named attribute from each member. Absent attributes are ignored.
    pub fn delete_attribute(&mut self, name: &str) -> Result<&mut Self> {
        self.for_all_elements_do("remove an attribute", |node| {
            node.remove_attr(name);
        })?;

        Ok(self)
    }

    /// Gets the specified attribute's value for the first member.
    pub fn attr(&self, name: &str) -> Option<StrTendril> {
        self.nodes().first().and_then(|node| node.attr(name))
    }

    /// Works like `attr` but returns default value if attribute is not present.
    pub fn attr_or(&self, name: &str, default: &str) -> StrTendril {
        self.attr(name).unwrap_or_else(|| StrTendril::from(default))
    }

    /// Gets the raw `class` attribute of each member, empty when absent.
    pub fn classname(&self) -> Values<StrTendril> {
        self.for_all_get(|node| node.attr("class").unwrap_or_default())
    }

    /// Sets the raw `class` attribute of each member.
    pub fn set_classname(&mut self, classname: &str) -> Result<&mut Self> {
        self.set_attribute("class", classname)
    }

    /// Gets the class tokens of each member, in the order they are written.
    pub fn classnames(&self) -> Values<Vec<String>> {
        self.for_all_get(|node| node.class_tokens())
    }

    /// Sets the `class` attribute of each member to the tokens joined by a single space.
    pub fn set_classnames<I, S>(&mut self, classnames: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = classnames
            .into_iter()
            .map(|class| class.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");

        self.set_attribute("class", &joined)
    }

    /// Adds one or more whitespace separated class tokens to each member.
    pub fn add_class(&mut self, class: &str) -> Result<&mut Self> {
        self.add_classes(class.split_whitespace())
    }

    /// Adds class tokens to each member.
    ///
    /// Existing tokens keep their order and come first, new ones follow in
    /// argument order. Duplicates are dropped.
    pub fn add_classes<I, S>(&mut self, classes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added: Vec<String> = classes
            .into_iter()
            .map(|class| class.as_ref().to_string())
            .collect();

        self.for_all_elements_do("add a class", |node| {
            let mut union: Vec<String> = Vec::new();
            for class in node.class_tokens().into_iter().chain(added.iter().cloned()) {
                if !union.contains(&class) {
                    union.push(class);
                }
            }

            node.set_attr("class", &union.join(" "));
        })?;

        Ok(self)
    }
}
