//! C ABI. Handles are boxed contexts; failures leave a message in the
//! thread-local last-error slot and return null or a negative sentinel.
//!
//! Every pointer argument is null or a live value handed out by this library
//! (strings: NUL-terminated UTF-8). Handles are freed exactly once.

#[macro_use]
pub mod error;
pub mod frame;
pub mod schema;
pub mod types;
pub mod utils;
