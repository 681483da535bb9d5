//! Log backends for tfscope
//!
//! [`HttpBackend`] talks to the log-parsing service; [`LocalBackend`] parses
//! files in-process. Both sit behind [`LogBackend`].

pub mod backend;
pub mod error;
pub mod http;
pub mod local;

pub use backend::LogBackend;
pub use error::{ClientError, Result};
pub use http::{ClientConfig, HttpBackend, DEFAULT_BASE_URL};
pub use local::{LocalBackend, UPLOAD_OK_MESSAGE};
