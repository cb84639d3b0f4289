use std::slice::Iter;

/// The attribute types the HTML schema declares.
///
/// Values of any type other than [`CDATA`](AttributeType::CDATA) are
/// whitespace-normalized when set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum AttributeType {
    #[default]
    CDATA,
    ID,
    IDREF,
    NMTOKEN,
    Boolean,
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::CDATA => write!(f, "CDATA"),
            Self::ID => write!(f, "ID"),
            Self::IDREF => write!(f, "IDREF"),
            Self::NMTOKEN => write!(f, "NMTOKEN"),
            Self::Boolean => write!(f, "BOOLEAN"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub uri: Box<str>,
    pub local_name: Box<str>,
    pub qname: Box<str>,
    pub atype: AttributeType,
    pub value: Box<str>,
}

/// An ordered list of attributes.
///
/// Namespace declarations never appear in this list; the element layer
/// drops them before they get here.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    attributes: Vec<Attribute>,
}

impl Attributes {
    /// The number of attributes contained in this list.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    /// Get the index of the attribute whose QName is `qname`.
    ///
    /// Attribute lists are short, so this is a linear scan.
    pub fn index_of_qname(&self, qname: &str) -> Option<usize> {
        self.attributes.iter().position(|a| &*a.qname == qname)
    }

    /// Append `attribute` to the list.
    ///
    /// Returns `false` without modifying the list if an attribute with the
    /// same QName is already present; replacement goes through
    /// [`set_attribute`](Attributes::set_attribute).
    pub fn add_attribute(&mut self, attribute: Attribute) -> bool {
        if self.index_of_qname(&attribute.qname).is_some() {
            return false;
        }
        self.attributes.push(attribute);
        true
    }

    /// Replace the attribute at `index`.
    pub fn set_attribute(&mut self, index: usize, attribute: Attribute) {
        self.attributes[index] = attribute;
    }

    pub fn remove_attribute(&mut self, index: usize) {
        self.attributes.remove(index);
    }

    pub fn iter(&self) -> Iter<'_, Attribute> {
        self.attributes.iter()
    }

    pub fn as_slice(&self) -> &[Attribute] {
        &self.attributes
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(qname: &str, value: &str) -> Attribute {
        Attribute {
            uri: "".into(),
            local_name: qname.into(),
            qname: qname.into(),
            atype: AttributeType::CDATA,
            value: value.into(),
        }
    }

    #[test]
    fn duplicate_qnames_are_rejected() {
        let mut atts = Attributes::default();
        assert!(atts.add_attribute(attr("href", "a")));
        assert!(!atts.add_attribute(attr("href", "b")));
        assert_eq!(atts.len(), 1);
        assert_eq!(&*atts.get(0).unwrap().value, "a");

        let i = atts.index_of_qname("href").unwrap();
        atts.set_attribute(i, attr("href", "b"));
        assert_eq!(&*atts.get(0).unwrap().value, "b");
    }
}
