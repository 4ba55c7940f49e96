/// Minimal in-memory element tree for the rendered page.
///
/// A `Container` stands in for a page element that owns rendered children. Filtering
/// flips `hidden` on existing children and never reorders or rebuilds them.
use timeline_common::html::escape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    attributes: Vec<(&'static str, String)>,
    hidden: bool,
    inner_html: String,
}

impl Element {
    pub fn new(tag: &'static str, classes: &[&str]) -> Self {
        Self {
            tag,
            classes: classes.iter().map(|c| c.to_string()).collect(),
            attributes: Vec::new(),
            hidden: false,
            inner_html: String::new(),
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.set_class(class, true);
        self
    }

    pub fn with_attribute(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    /// Set pre-escaped inner markup.
    pub fn with_inner_html(mut self, html: impl Into<String>) -> Self {
        self.inner_html = html.into();
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn data_category(&self) -> Option<&str> {
        self.attribute("data-category")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn set_class(&mut self, class: &str, on: bool) {
        let present = self.has_class(class);
        if on && !present {
            self.classes.push(class.to_string());
        } else if !on && present {
            self.classes.retain(|c| c != class);
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    #[cfg(test)]
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    pub fn to_html(&self) -> String {
        let mut out = format!("<{}", self.tag);
        if !self.classes.is_empty() {
            out.push_str(&format!(r#" class="{}""#, escape(&self.classes.join(" "))));
        }
        for (name, value) in &self.attributes {
            out.push_str(&format!(r#" {name}="{}""#, escape(value)));
        }
        if self.hidden {
            out.push_str(r#" style="display:none""#);
        }
        out.push('>');
        out.push_str(&self.inner_html);
        out.push_str(&format!("</{}>", self.tag));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    id: String,
    classes: Vec<String>,
    children: Vec<Element>,
}

impl Container {
    pub fn new(id: &str, classes: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            children: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    #[cfg(test)]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    pub fn visible_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter(|c| !c.is_hidden())
    }

    pub fn to_html(&self) -> String {
        let mut out = format!(r#"<div id="{}""#, escape(&self.id));
        if !self.classes.is_empty() {
            out.push_str(&format!(r#" class="{}""#, escape(&self.classes.join(" "))));
        }
        out.push('>');
        for child in &self.children {
            out.push_str(&child.to_html());
        }
        out.push_str("</div>");
        out
    }
}
