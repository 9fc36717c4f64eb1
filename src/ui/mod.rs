//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! Widgets read the page view's derived state and never write scroll
//! positions themselves.

pub mod layout;
pub mod nav_bar;
pub mod page_widget;
pub mod theme;
