// Server module entry
// Demo HTTP/1.1 server: listener setup, accept loop and per-connection tasks

pub mod connection;
pub mod listener;
pub mod routes;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_reusable_listener;
pub use routes::Routes;
pub use server_loop::{start_server_loop, ServerLoopConfig};
