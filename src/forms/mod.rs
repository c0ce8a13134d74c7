//! Attachment upload forms.
//!
//! One parameterised controller drives both page forms; [`FormConfig`]
//! presets carry the differences. The intake side implements the same
//! contract on the server.

mod config;
mod controller;
mod intake;
mod reply;
mod transport;
mod validation;

pub use config::*;
pub use controller::*;
pub use intake::*;
pub use reply::*;
pub use transport::*;
pub use validation::*;
