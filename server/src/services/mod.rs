//! Request-scoped services used by the HTTP handlers.

pub mod form;
pub mod generator;
