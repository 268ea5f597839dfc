//! XML element nodes.

use std::fmt;

use indexmap::IndexMap;

use crate::utils::fmt_num;

/// An XML element with attributes kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Sets a numeric attribute formatted for SVG output.
    pub fn set_num_attribute(&mut self, name: impl Into<String>, value: f64) {
        self.set_attribute(name, fmt_num(value));
    }

    /// Builder variant of [`set_attribute`](Self::set_attribute).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn append(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// All elements below this one in document order.
    pub fn descendants(&self) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        let mut stack: Vec<&XmlElement> = self.children.iter().rev().collect();
        while let Some(elem) = stack.pop() {
            out.push(elem);
            stack.extend(elem.children.iter().rev());
        }
        out
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(
                f,
                " {}=\"{}\"",
                name,
                html_escape::encode_quoted_attribute(value)
            )?;
        }
        if self.children.is_empty() {
            return f.write_str("/>");
        }
        f.write_str(">")?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_attribute_order() {
        let mut g = XmlElement::new("g").with_attribute("id", "a");
        let mut path = XmlElement::new("path");
        path.set_attribute("d", "M0 0H1");
        path.set_num_attribute("stroke-width", 0.25);
        g.append(path);
        assert_eq!(
            g.to_string(),
            r#"<g id="a"><path d="M0 0H1" stroke-width="0.25"/></g>"#
        );
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let elem = XmlElement::new("text").with_attribute("title", "a<b & \"c\"");
        assert_eq!(
            elem.to_string(),
            r#"<text title="a&lt;b &amp; &quot;c&quot;"/>"#
        );
    }

    #[test]
    fn test_set_attribute_replaces_value() {
        let mut elem = XmlElement::new("path").with_attribute("fill", "red");
        elem.set_attribute("fill", "blue");
        assert_eq!(elem.attribute("fill"), Some("blue"));
        assert_eq!(elem.attributes().count(), 1);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let mut outer = XmlElement::new("g");
        let mut inner = XmlElement::new("g").with_attribute("id", "inner");
        inner.append(XmlElement::new("path"));
        outer.append(inner);
        outer.append(XmlElement::new("circle"));
        let names: Vec<_> = outer.descendants().iter().map(|e| e.name()).collect();
        assert_eq!(names, ["g", "path", "circle"]);
    }
}
