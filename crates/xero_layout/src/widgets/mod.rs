//! Widgets

pub mod scroll;
