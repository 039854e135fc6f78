//! Call dispatch for the crawler service
//!
//! This module owns the single path by which the client talks to the
//! service: building a URL, authenticating, sending one request, and turning
//! both transport failures and rejected statuses into a [`ServiceError`].

mod call;
mod dispatcher;
mod error;
mod response;

pub use call::{accept_success, ServiceCall, StatusPredicate};
pub use dispatcher::{build_http_client, Dispatcher, TOKEN_HEADER};
pub use error::{FailureKind, ServiceError};
pub use response::{ResponseBody, ServiceResponse};
