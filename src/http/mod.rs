//! Request execution against the target server.
mod body;
mod client;
mod executor;


pub use body::{RenderedBody, render_body};
pub use client::build_client;
pub use executor::{Execute, HttpExecutor};
