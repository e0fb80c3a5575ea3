//! Data models

pub mod event;
pub mod cognitive;
pub mod alert;

pub use event::*;
pub use cognitive::*;
pub use alert::*;
