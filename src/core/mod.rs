//! Core scroll logic – easing, smooth scrolling, section tracking and
//! scroll-driven state.
//!
//! Nothing in this module depends on any TUI or rendering crate.  All
//! geometry comes through the [`viewport::Viewport`] trait.

pub mod background;
pub mod easing;
pub mod error;
pub mod listener;
pub mod observer;
pub mod scroller;
pub mod tracker;
pub mod viewport;

#[cfg(test)]
pub mod testing;
