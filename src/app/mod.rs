//! Application orchestration: the mounted page, event loop plumbing and
//! input handling.

pub mod document;
pub mod event;
pub mod handler;
pub mod page;
pub mod page_view;
pub mod state;
pub mod viewport;
