pub mod field;
pub mod form;

pub use field::{Field, FieldType, FieldValue};
pub use form::{Form, FormValues};
