//! HTTP layer module
//!
//! Response writer handed to handlers, and the fixed responses of the JSON
//! endpoint convention.

pub mod response;
pub mod writer;

pub use response::not_found;
pub use writer::ResponseWriter;
