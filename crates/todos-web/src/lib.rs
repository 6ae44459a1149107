//! Todos web application: HTTP server, handlers and page rendering.

pub mod serve;
