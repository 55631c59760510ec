pub mod error;
pub mod retry;
pub mod sqlite;
pub mod store;

pub use error::DocError;
pub use retry::{RetryPolicy, retry_fixed};
pub use sqlite::{ConnectOptions, SqliteDocStore};
pub use store::{DocPage, DocStore};
