mod attribute;
mod types;

pub use attribute::{Attribute, Value, ValueKind};
pub use types::{AttributeType, DataType};
