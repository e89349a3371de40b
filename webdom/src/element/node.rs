use std::collections::{BTreeMap, BTreeSet};

use super::Content;

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Whether `tag` is serialized without a closing tag.
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub tag: &'static str,
    pub id: Option<String>,
    pub classes: Vec<String>,

    // Attributes (role, href, aria-*, style, ...). Ordered for stable output.
    pub attrs: BTreeMap<String, String>,
    /// Boolean attributes (`disabled`, `hidden`, ...), rendered without a value.
    pub flags: BTreeSet<String>,

    // Custom data storage, rendered as `data-*` attributes.
    pub data: BTreeMap<String, String>,

    pub content: Content,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            tag: "div",
            id: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            flags: BTreeSet::new(),
            data: BTreeMap::new(),
            content: Content::None,
        }
    }
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    /// A `span` holding only text.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: "span",
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self {
            tag: "button",
            content: Content::Text(label.into()),
            ..Default::default()
        }
        .attr("type", "button")
    }

    pub fn link(href: impl Into<String>) -> Self {
        Self::new("a").attr("href", href)
    }

    pub fn list() -> Self {
        Self::new("ul")
    }

    pub fn ordered_list() -> Self {
        Self::new("ol")
    }

    pub fn item() -> Self {
        Self::new("li")
    }

    pub fn input(kind: &str) -> Self {
        Self::new("input").attr("type", kind)
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() && !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn class_if(self, condition: bool, class: impl Into<String>) -> Self {
        if condition {
            self.class(class)
        } else {
            self
        }
    }

    pub fn classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for class in classes {
            self = self.class(class);
        }
        self
    }

    // Attributes
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set `aria-{name}`.
    pub fn aria(self, name: &str, value: impl Into<String>) -> Self {
        self.attr(format!("aria-{name}"), value)
    }

    pub fn role(self, role: &str) -> Self {
        self.attr("role", role)
    }

    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.flags.insert(name.into());
        self
    }

    pub fn flag_if(self, condition: bool, name: impl Into<String>) -> Self {
        if condition {
            self.flag(name)
        } else {
            self
        }
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn get_aria(&self, name: &str) -> Option<&str> {
        self.get_attr(&format!("aria-{name}"))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    // Content
    pub fn text_content(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    /// All text in this subtree, concatenated in document order.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match &self.content {
            Content::None => {}
            Content::Text(text) => out.push_str(text),
            Content::Children(children) => {
                for child in children {
                    child.push_text(out);
                }
            }
        }
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            Content::Text(text) => {
                // Keep existing text as the first child
                let existing = Element::text(std::mem::take(text));
                self.content = Content::Children(vec![existing, child]);
            }
        }
        self
    }

    pub fn maybe_child(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        for child in new_children {
            self = self.child(child);
        }
        self
    }
}
