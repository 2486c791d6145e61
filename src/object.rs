//! PDF object types.
//!
//! The subset of the PDF object model the writer produces. Dictionaries keep
//! insertion order so serialized output is stable and reads the way the keys
//! were declared.

use indexmap::IndexMap;

/// Ordered PDF dictionary.
pub type Dictionary = IndexMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// Name (starting with /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(Dictionary),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary
        dict: Dictionary,
        /// Stream data
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

impl Object {
    /// Try to cast to dictionary. Works for both Dictionary and Stream objects.
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Collect every indirect reference reachable inside this object, in
    /// the order they appear.
    pub fn references(&self) -> Vec<ObjectRef> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references(&self, out: &mut Vec<ObjectRef>) {
        match self {
            Object::Reference(r) => out.push(*r),
            Object::Array(items) => {
                for item in items {
                    item.collect_references(out);
                }
            },
            Object::Dictionary(dict) | Object::Stream { dict, .. } => {
                for value in dict.values() {
                    value.collect_references(out);
                }
            },
            _ => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ref_display() {
        assert_eq!(ObjectRef::new(5, 0).to_string(), "5 0 R");
    }

    #[test]
    fn test_casts() {
        assert_eq!(
            Object::Reference(ObjectRef::new(2, 0)).as_reference(),
            Some(ObjectRef::new(2, 0))
        );
        assert_eq!(Object::Integer(7).as_reference(), None);
        assert!(Object::Name("Font".into()).as_dict().is_none());
    }

    #[test]
    fn test_stream_as_dict() {
        let mut dict = Dictionary::new();
        dict.insert("Length".to_string(), Object::Integer(3));
        let stream = Object::Stream {
            dict,
            data: bytes::Bytes::from_static(b"abc"),
        };
        assert_eq!(stream.as_dict().and_then(|d| d.get("Length")), Some(&Object::Integer(3)));
    }

    #[test]
    fn test_references_are_collected_recursively() {
        let mut font = Dictionary::new();
        font.insert("F1".to_string(), Object::Reference(ObjectRef::new(5, 0)));
        let mut resources = Dictionary::new();
        resources.insert("Font".to_string(), Object::Dictionary(font));

        let mut page = Dictionary::new();
        page.insert("Parent".to_string(), Object::Reference(ObjectRef::new(2, 0)));
        page.insert("Resources".to_string(), Object::Dictionary(resources));
        page.insert("Contents".to_string(), Object::Reference(ObjectRef::new(3, 0)));
        page.insert(
            "Kids".to_string(),
            Object::Array(vec![Object::Reference(ObjectRef::new(4, 0))]),
        );

        let ids: Vec<u32> = Object::Dictionary(page).references().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 5, 3, 4]);
    }
}
