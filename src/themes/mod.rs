//! Theme system for color management

pub mod theme;

pub use theme::Theme;
