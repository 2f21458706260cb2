//! Condition node model.

pub mod conditions;
pub mod document;
pub mod field;
pub mod operators;
pub mod values;

pub use conditions::{Condition, Where, WhereKind};
pub use document::WhereDocument;
pub use field::{CastKind, FIELD_SEPARATOR, Field, split_fields};
pub use operators::{Joiner, Operator};
pub use values::{FIELD_PREFIX, Operand, Value};
