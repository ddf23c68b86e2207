//! Core HTTP protocol abstractions.
//!
//! # Architecture
//!
//! - **Request Processing** (`request`): [`RequestHeader`] wraps a parsed request
//!   head and derives the connection negotiation (keep-alive, gzip) from it
//! - **Response Processing** (`response`): [`ResponseHead`] and [`UpgradeHead`]
//!   describe what varies between responses
//! - **Status Phrases** (`status`): [`reason_phrase`] maps status codes to the
//!   phrases put on the status line
//! - **Error Handling** (`error`):
//!   - [`HttpError`]: Top-level error type of the engine
//!   - [`ParseError`]: Request parsing errors

mod request;
pub use request::RequestHeader;

mod response;
pub use response::ResponseHead;
pub use response::UpgradeHead;

mod status;
pub use status::reason_phrase;

mod error;
pub use error::HttpError;
pub use error::ParseError;
