//! Launcher core: session state machine, timers, feeds, and scene ambience

pub mod ambience;
pub mod controller;
pub mod feeds;
pub mod menu;
pub mod scheduler;
pub mod session;
