//! The schema model: element types, content-model bit vectors, and the
//! registry the tree-fixup driver consults.

pub mod html;

use std::{collections::HashMap, sync::Arc};

use crate::{
    XML_XML_NAMESPACE,
    chars::normalize_whitespace,
    error::HTMLError,
    sax::attributes::{Attribute, AttributeType, Attributes},
};

/// Any content model.
pub const M_ANY: u32 = 0xFFFF_FFFF;
/// Empty content model: the element keeps no content at all.
pub const M_EMPTY: u32 = 0;
/// Character data.
pub const M_PCDATA: u32 = 1 << 30;
/// The root of the document.
pub const M_ROOT: u32 = 1 << 31;

/// When closed early by a mismatched end-tag, the element is remembered
/// and reopened around the following content.
pub const F_RESTART: u32 = 1;
/// The element content is raw text up to the literal end-tag.
pub const F_CDATA: u32 = 2;
/// A mismatched end-tag inside this element precloses its target instead
/// of force-closing ancestors.
pub const F_NOFORCE: u32 = 4;

/// An element type: a name, a content model vector, a member-of vector,
/// flags, default attributes, and a natural parent.
///
/// The parent is kept as a lowercased name and resolved through the
/// [`Schema`] when needed, so the registry stays free of cycles.
#[derive(Debug, Clone)]
pub struct ElementType {
    name: Box<str>,
    namespace: Box<str>,
    local_name: Box<str>,
    model: u32,
    member_of: u32,
    flags: u32,
    atts: Attributes,
    parent: Option<Box<str>>,
}

impl ElementType {
    fn new(name: &str, model: u32, member_of: u32, flags: u32, schema_uri: &str) -> Self {
        Self {
            name: name.into(),
            namespace: namespace_name(name, false, schema_uri).into(),
            local_name: local_name_of(name).into(),
            model,
            member_of,
            flags,
            atts: Attributes::default(),
            parent: None,
        }
    }

    /// The name of this element type, in schema casing.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace_name(&self) -> &str {
        &self.namespace
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// What this element may contain, as a vector of bits.
    pub fn model(&self) -> u32 {
        self.model
    }

    /// What this element is a member of, as a vector of bits.
    pub fn member_of(&self) -> u32 {
        self.member_of
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    /// The default attributes of this element type.
    ///
    /// Attributes of type CDATA without a default value are typically not
    /// included; other attributes without a default carry an empty value.
    pub fn atts(&self) -> &Attributes {
        &self.atts
    }

    /// The lowercased name of the natural parent, if one is declared.
    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Check if this element type can contain another element type.
    ///
    /// True iff any model bit of this element matches any member-of bit of
    /// the other.
    pub fn can_contain(&self, other: &ElementType) -> bool {
        self.model & other.member_of != 0
    }

    /// Set an attribute into `atts`, canonicalising the name and value.
    ///
    /// Namespace declaration attributes (`xmlns`, `xmlns:*`) are dropped.
    /// A missing type defaults to CDATA on insert and keeps the declared
    /// type on update; non-CDATA values are whitespace-normalized.
    pub(crate) fn set_attribute_into(
        atts: &mut Attributes,
        name: &str,
        atype: Option<AttributeType>,
        value: &str,
    ) {
        if name == "xmlns" || name.starts_with("xmlns:") {
            return;
        }

        let uri = namespace_name(name, true, "");
        let local_name = local_name_of(name);
        match atts.index_of_qname(name) {
            None => {
                let atype = atype.unwrap_or_default();
                let value = if atype != AttributeType::CDATA {
                    normalize_whitespace(value)
                } else {
                    value.to_owned()
                };
                atts.add_attribute(Attribute {
                    uri: uri.into(),
                    local_name: local_name.into(),
                    qname: name.into(),
                    atype,
                    value: value.into(),
                });
            }
            Some(i) => {
                let atype = atype.unwrap_or_else(|| atts.get(i).map(|a| a.atype).unwrap_or_default());
                let value = if atype != AttributeType::CDATA {
                    normalize_whitespace(value)
                } else {
                    value.to_owned()
                };
                atts.set_attribute(
                    i,
                    Attribute {
                        uri: uri.into(),
                        local_name: local_name.into(),
                        qname: name.into(),
                        atype,
                        value: value.into(),
                    },
                );
            }
        }
    }
}

/// Return the namespace name of a QName.
///
/// Unprefixed attribute names live in no namespace; unprefixed element
/// names default to the schema namespace. Foreign prefixes map to
/// `urn:x-prefix:<prefix>`, except `xml`.
pub(crate) fn namespace_name(name: &str, attribute: bool, schema_uri: &str) -> String {
    match name.split_once(':') {
        None => {
            if attribute {
                String::new()
            } else {
                schema_uri.to_owned()
            }
        }
        Some(("xml", _)) => XML_XML_NAMESPACE.to_owned(),
        Some((prefix, _)) => format!("urn:x-prefix:{prefix}"),
    }
}

/// Return the local part of a QName.
pub(crate) fn local_name_of(name: &str) -> &str {
    match name.split_once(':') {
        None => name,
        Some((_, local)) => local,
    }
}

/// A registry of element types and named character entities.
///
/// Element names are canonicalised by lowercased lookup; the stored name
/// keeps schema casing.
pub struct Schema {
    element_types: HashMap<Box<str>, Arc<ElementType>>,
    entities: HashMap<Box<str>, u32>,
    root: Option<Box<str>>,
    uri: Box<str>,
    prefix: Box<str>,
}

impl Schema {
    pub fn new(uri: &str, prefix: &str) -> Self {
        Self {
            element_types: HashMap::new(),
            entities: HashMap::new(),
            root: None,
            uri: uri.into(),
            prefix: prefix.into(),
        }
    }

    /// Add or replace an element type.
    ///
    /// The element registered with a member-of vector of exactly `M_ROOT`
    /// becomes the schema root.
    pub fn element_type(&mut self, name: &str, model: u32, member_of: u32, flags: u32) {
        let lname = name.to_lowercase();
        let etype = ElementType::new(name, model, member_of, flags, &self.uri);
        if member_of == M_ROOT {
            self.root = Some(lname.clone().into());
        }
        self.element_types.insert(lname.into(), Arc::new(etype));
    }

    /// Add or replace a default attribute for an element type.
    ///
    /// Referencing an element type that has not been registered is a
    /// schema-builder error.
    pub fn attribute(
        &mut self,
        elem_name: &str,
        attr_name: &str,
        atype: AttributeType,
        value: Option<&str>,
    ) -> Result<(), HTMLError> {
        let etype = self
            .element_types
            .get_mut(elem_name.to_lowercase().as_str())
            .ok_or(HTMLError::SchemaUndeclaredElementType)?;
        let etype = Arc::make_mut(etype);
        ElementType::set_attribute_into(
            &mut etype.atts,
            attr_name,
            Some(atype),
            value.unwrap_or(""),
        );
        Ok(())
    }

    /// Declare the natural parent of an element.
    pub fn parent(&mut self, name: &str, parent_name: &str) -> Result<(), HTMLError> {
        let parent = parent_name.to_lowercase();
        if !self.element_types.contains_key(parent.as_str()) {
            return Err(HTMLError::SchemaUndeclaredParent);
        }
        let child = self
            .element_types
            .get_mut(name.to_lowercase().as_str())
            .ok_or(HTMLError::SchemaUndeclaredChild)?;
        Arc::make_mut(child).parent = Some(parent.into());
        Ok(())
    }

    /// Add or replace a named character entity.
    pub fn entity(&mut self, name: &str, value: u32) {
        self.entities.insert(name.into(), value);
    }

    /// Case-insensitive element type lookup.
    pub fn get_element_type(&self, name: &str) -> Option<Arc<ElementType>> {
        self.element_types.get(name.to_lowercase().as_str()).cloned()
    }

    /// The schema root, once an element with member-of `M_ROOT` has been
    /// registered.
    pub fn root_element_type(&self) -> Option<Arc<ElementType>> {
        self.element_types.get(self.root.as_deref()?).cloned()
    }

    /// Entity lookup; `None` if the name is unknown.
    pub fn get_entity(&self, name: &str) -> Option<u32> {
        self.entities.get(name).copied()
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_follows_model_and_member_bits() {
        let mut schema = Schema::new("urn:x-test", "t");
        schema.element_type("outer", 1 << 2 | M_PCDATA, M_ROOT, 0);
        schema.element_type("inner", M_PCDATA, 1 << 2, 0);
        let outer = schema.get_element_type("OUTER").unwrap();
        let inner = schema.get_element_type("inner").unwrap();
        assert!(outer.can_contain(&inner));
        assert!(!inner.can_contain(&outer));
        assert_eq!(schema.root_element_type().unwrap().name(), "outer");
    }

    #[test]
    fn attribute_and_parent_require_registered_elements() {
        let mut schema = Schema::new("urn:x-test", "t");
        schema.element_type("known", M_ANY, M_ROOT, 0);
        assert!(
            schema
                .attribute("missing", "x", AttributeType::CDATA, None)
                .is_err()
        );
        assert!(schema.parent("missing", "known").is_err());
        assert!(schema.parent("known", "missing").is_err());
    }

    #[test]
    fn xmlns_attributes_are_dropped() {
        let mut atts = Attributes::default();
        ElementType::set_attribute_into(&mut atts, "xmlns", None, "urn:x");
        ElementType::set_attribute_into(&mut atts, "xmlns:a", None, "urn:x");
        assert!(atts.is_empty());
        ElementType::set_attribute_into(&mut atts, "xml:lang", None, "en");
        assert_eq!(&*atts.get(0).unwrap().uri, crate::XML_XML_NAMESPACE);
    }
}
