use super::{
    AddressCodec, Codec, CodecError, Dictionary, DictionaryError, IntegerCodec, OctetsCodec,
    TextCodec, UserPasswordCodec,
};
use crate::attributes::{Attribute, AttributeType, DataType, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

struct Entry {
    name: String,
    codec: Box<dyn Codec>,
}

/// Dictionary of the standard RFC 2865/2866/5176 attributes
///
/// Built explicitly and handed to packets by reference. Additional
/// attributes (or replacements for standard ones) can be registered before
/// the dictionary is shared.
pub struct StandardDictionary {
    entries: HashMap<u8, Entry>,
    by_name: HashMap<String, u8>,
    fallback: OctetsCodec,
}

impl StandardDictionary {
    /// Dictionary holding every [`AttributeType`]
    pub fn new() -> Self {
        let mut dictionary = Self::empty();
        for &attr_type in AttributeType::ALL {
            let codec: Box<dyn Codec> = match (attr_type, attr_type.data_type()) {
                (AttributeType::UserPassword, _) => Box::new(UserPasswordCodec),
                (_, DataType::Text) => Box::new(TextCodec),
                (_, DataType::Octets) => Box::new(OctetsCodec),
                (_, DataType::Address) => Box::new(AddressCodec),
                (_, DataType::Integer) => Box::new(IntegerCodec),
            };
            dictionary.register(attr_type.as_u8(), attr_type.name(), codec);
        }
        dictionary
    }

    /// Dictionary with no named attributes; every tag decodes as octets
    pub fn empty() -> Self {
        StandardDictionary {
            entries: HashMap::new(),
            by_name: HashMap::new(),
            fallback: OctetsCodec,
        }
    }

    /// Register (or replace) the name and codec of `attr_type`
    pub fn register(&mut self, attr_type: u8, name: impl Into<String>, codec: Box<dyn Codec>) {
        let name = name.into();
        if let Some(previous) = self.entries.get(&attr_type) {
            self.by_name.remove(&previous.name);
        }
        self.by_name.insert(name.clone(), attr_type);
        self.entries.insert(attr_type, Entry { name, codec });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Type tag registered under `name`
    pub fn attr_type(&self, name: &str) -> Option<u8> {
        self.by_name.get(name).copied()
    }
}

impl Default for StandardDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StandardDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardDictionary")
            .field("attributes", &self.entries.len())
            .finish()
    }
}

impl Dictionary for StandardDictionary {
    fn codec(&self, attr_type: u8) -> &dyn Codec {
        match self.entries.get(&attr_type) {
            Some(entry) => entry.codec.as_ref(),
            None => &self.fallback,
        }
    }

    fn name(&self, attr_type: u8) -> Option<&str> {
        self.entries.get(&attr_type).map(|entry| entry.name.as_str())
    }

    fn attr(&self, name: &str, value: Value) -> Result<Attribute, DictionaryError> {
        let attr_type = self
            .attr_type(name)
            .ok_or_else(|| DictionaryError::InvalidName(name.to_string()))?;
        let codec = self.codec(attr_type);

        let invalid = |source: CodecError| DictionaryError::InvalidValue {
            name: name.to_string(),
            source,
        };
        let value = match codec.transformer() {
            Some(transformer) => transformer.transform(value).map_err(invalid)?,
            None if value.kind() != codec.kind() => {
                return Err(invalid(CodecError::UnexpectedValue {
                    expected: codec.kind(),
                    actual: value.kind(),
                }));
            }
            None => value,
        };

        Ok(Attribute::new(attr_type, value))
    }
}

static BUILTIN: LazyLock<StandardDictionary> = LazyLock::new(StandardDictionary::new);

/// Shared standard dictionary, used by the convenience constructors.
///
/// Code that needs a customized table should build its own
/// [`StandardDictionary`] and pass it explicitly.
pub fn builtin() -> &'static StandardDictionary {
    &BUILTIN
}
