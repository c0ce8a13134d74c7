//! Data models for the hiring landing service.

mod application;
mod vacancy;

pub use application::*;
pub use vacancy::*;
