use std::sync::Arc;

use crate::{
    sax::attributes::{AttributeType, Attributes},
    schema::ElementType,
};

/// An actual element (not an element type): its type, its own attributes,
/// and the preclosed flag.
///
/// Elements live on the open-element stack or on the saved queue of
/// restartable elements, never on both.
#[derive(Debug, Clone)]
pub(crate) struct Element {
    etype: Arc<ElementType>,
    atts: Attributes,
    preclosed: bool,
}

impl Element {
    /// Construct an element of type `etype`, copying the type's default
    /// attributes when `default_attributes` is set.
    pub(crate) fn new(etype: Arc<ElementType>, default_attributes: bool) -> Self {
        let atts = if default_attributes {
            etype.atts().clone()
        } else {
            Attributes::default()
        };
        Self {
            etype,
            atts,
            preclosed: false,
        }
    }

    pub(crate) fn etype(&self) -> &ElementType {
        &self.etype
    }

    pub(crate) fn atts(&self) -> &Attributes {
        &self.atts
    }

    pub(crate) fn name(&self) -> &str {
        self.etype.name()
    }

    pub(crate) fn namespace_name(&self) -> &str {
        self.etype.namespace_name()
    }

    pub(crate) fn local_name(&self) -> &str {
        self.etype.local_name()
    }

    pub(crate) fn model(&self) -> u32 {
        self.etype.model()
    }

    pub(crate) fn flags(&self) -> u32 {
        self.etype.flags()
    }

    pub(crate) fn parent_name(&self) -> Option<&str> {
        self.etype.parent_name()
    }

    /// Check if this element can contain another element.
    pub(crate) fn can_contain(&self, other: &Element) -> bool {
        self.etype.can_contain(&other.etype)
    }

    /// Set an attribute on this element, canonicalising name and value.
    pub(crate) fn set_attribute(&mut self, name: &str, atype: Option<AttributeType>, value: &str) {
        ElementType::set_attribute_into(&mut self.atts, name, atype, value);
    }

    /// Make this element anonymous: remove any ID-typed attribute and any
    /// attribute named `name`.
    pub(crate) fn anonymize(&mut self) {
        for i in (0..self.atts.len()).rev() {
            let Some(att) = self.atts.get(i) else { continue };
            if att.atype == AttributeType::ID || &*att.qname == "name" {
                self.atts.remove_attribute(i);
            }
        }
    }

    /// Clean the attributes of this element.
    ///
    /// Attributes with an empty name (the name was ill-formed) or an empty
    /// value (declared on the type but never set on this element) are
    /// removed.
    pub(crate) fn clean(&mut self) {
        for i in (0..self.atts.len()).rev() {
            let Some(att) = self.atts.get(i) else { continue };
            if att.local_name.is_empty() || att.value.is_empty() {
                self.atts.remove_attribute(i);
            }
        }
    }

    /// Force this element to preclosed status: an end-tag has been seen
    /// but the element cannot yet be closed for structural reasons.
    pub(crate) fn preclose(&mut self) {
        self.preclosed = true;
    }

    pub(crate) fn is_preclosed(&self) -> bool {
        self.preclosed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn default_attributes_are_copied_on_request() {
        let schema = Schema::html();
        let br = schema.get_element_type("br").unwrap();
        let with = Element::new(br.clone(), true);
        let without = Element::new(br, false);
        assert!(with.atts().index_of_qname("clear").is_some());
        assert!(without.atts().is_empty());
    }

    #[test]
    fn anonymize_removes_name_and_id() {
        let schema = Schema::html();
        let a = schema.get_element_type("a").unwrap();
        let mut el = Element::new(a, false);
        el.set_attribute("name", None, "anchor");
        el.set_attribute("id", Some(AttributeType::ID), "x1");
        el.set_attribute("href", None, "#");
        el.anonymize();
        assert!(el.atts().index_of_qname("name").is_none());
        assert!(el.atts().index_of_qname("id").is_none());
        assert!(el.atts().index_of_qname("href").is_some());
    }

    #[test]
    fn clean_drops_unset_defaults() {
        let schema = Schema::html();
        let input = schema.get_element_type("input").unwrap();
        let mut el = Element::new(input, true);
        el.set_attribute("checked", None, "checked");
        el.clean();
        // `type` keeps its default, the boolean defaults disappear
        assert!(el.atts().index_of_qname("type").is_some());
        assert!(el.atts().index_of_qname("checked").is_some());
        assert!(el.atts().index_of_qname("disabled").is_none());
    }
}
