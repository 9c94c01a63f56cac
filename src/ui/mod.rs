//! UI components module
//!
//! Reusable pieces shared by the launcher screen: panels, status bar,
//! toast notifications, help overlay, and animation helpers.

pub mod animation;
pub mod help_overlay;
pub mod notification;
pub mod panels;
pub mod status_bar;

pub use help_overlay::HelpOverlay;
pub use notification::{Notification, NotificationManager};
pub use panels::{Panel, PanelStyle};
pub use status_bar::StatusBar;
