//! Request helpers shared by the API handlers.

pub mod validate;
