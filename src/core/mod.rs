pub mod error;
pub mod record;
pub mod value;

pub use error::{EngineError, Result};
pub use record::{Company, Patch, Record, RecordId, fields};
pub use value::FieldValue;
