//! Core application primitives (screener loop, HTTP surface, CLI output)

pub mod console;
pub mod http;
pub mod runtime;

pub use console::render_report;
pub use http::*;
pub use runtime::*;
