use crate::elements::Elements;
use crate::matcher::Matcher;
use crate::selector::Selector;

impl<'a> Elements<'a> {
    /// Narrows the collection to the descendants of its members that match `sel`.
    ///
    /// Each whitespace separated step searches below the result of the previous
    /// one. Selector text that cannot be parsed matches nothing; use
    /// `Selector::parse` to see why.
    pub fn select(&self, sel: &str) -> Elements<'a> {
        self.select_text(sel, false)
    }

    /// Keeps the members themselves that satisfy every step of `sel`.
    pub fn select_self(&self, sel: &str) -> Elements<'a> {
        self.select_text(sel, true)
    }

    /// Applies a pre-parsed selector. With `match_self` the members are tested
    /// directly instead of searching their descendants.
    pub fn select_with(&self, selector: &Selector, match_self: bool) -> Elements<'a> {
        let matcher = Matcher::new(selector, match_self);
        let nodes = matcher.match_all(self.nodes.clone());

        self.derive(nodes)
    }

    /// Checks the current members against a selector and returns true if at
    /// least one of them matches.
    pub fn is(&self, sel: &str) -> bool {
        if self.length() > 0 {
            return self.select_self(sel).exists();
        }

        false
    }

    fn select_text(&self, sel: &str, match_self: bool) -> Elements<'a> {
        match Selector::parse(sel) {
            Ok(selector) => self.select_with(&selector, match_self),
            Err(err) => {
                tracing::warn!(error = %err, "selector matches nothing");
                self.derive(vec![])
            }
        }
    }
}
