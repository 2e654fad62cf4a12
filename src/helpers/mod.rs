mod errors;
pub(crate) mod json;

pub use errors::error_chain;
pub(crate) use json::JsonErrorResponse;
