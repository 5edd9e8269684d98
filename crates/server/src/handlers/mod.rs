//! HTTP request handlers.

pub mod common;
pub mod files;
pub mod health;

pub use common::*;
pub use files::*;
pub use health::*;
