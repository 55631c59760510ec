pub mod envelope;
pub mod error;
pub mod module;
pub mod types;

pub use envelope::Envelope;
pub use error::ServiceError;
pub use module::Module;
pub use types::{is_valid_id, merge_patch, new_id, now_rfc3339};
