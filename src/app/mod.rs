pub mod context;
pub mod error;

pub use context::{AppContext, SiteSession};
pub use error::{FetchError, Result, WappError};
