//! Toast notifications
//!
//! Every toast runs its own lifecycle off its age: a short delay, a slide in
//! from the right edge, a dwell, a slide out, then removal. Toasts never
//! wait on each other; there is no dedup, priority, or capacity limit.

use chrono::{DateTime, Local};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget};
use std::time::Duration;

use crate::config::ToastTimings;
use crate::themes::Theme;
use crate::ui::animation::{apply_alpha, ease_in_cubic, ease_out_cubic, progress};

const TOAST_WIDTH: u16 = 40;
const RIGHT_MARGIN: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn icon(self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Success => "✓",
            NotificationLevel::Warning => "⚠",
            NotificationLevel::Error => "✗",
        }
    }

    pub fn color(self, theme: &Theme) -> Color {
        match self {
            NotificationLevel::Info => theme.info,
            NotificationLevel::Success => theme.success,
            NotificationLevel::Warning => theme.warning,
            NotificationLevel::Error => theme.error,
        }
    }
}

/// A single notification
#[derive(Clone, Debug)]
pub struct Notification {
    pub title: String,
    pub message: Option<String>,
    pub level: NotificationLevel,
    pub created_at: DateTime<Local>,
}

impl Notification {
    pub fn new(level: NotificationLevel, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: None,
            level,
            created_at: Local::now(),
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, title)
    }

    /// Error toast
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title)
    }

    /// Attach a detail line under the title
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Where a toast is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Pending,
    Entering,
    Dwelling,
    Leaving,
    Finished,
}

#[derive(Debug)]
struct Toast {
    notification: Notification,
    spawned_at: Duration,
}

/// Owns live toasts and their shared virtual clock
pub struct NotificationManager {
    timings: ToastTimings,
    now: Duration,
    toasts: Vec<Toast>,
}

impl NotificationManager {
    /// Create an empty toast stack
    pub fn new(timings: ToastTimings) -> Self {
        Self {
            timings,
            now: Duration::ZERO,
            toasts: Vec::new(),
        }
    }

    /// Show a notification starting now
    pub fn push(&mut self, notification: Notification) {
        let now = self.now;
        self.push_at(notification, now);
    }

    /// Show a notification that was raised at virtual time `at`
    pub fn push_at(&mut self, notification: Notification, at: Duration) {
        self.toasts.push(Toast {
            notification,
            spawned_at: at,
        });
    }

    /// Move the clock and drop finished toasts
    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
        let now = self.now;
        let timings = &self.timings;
        self.toasts
            .retain(|t| phase_for_age(timings, now.saturating_sub(t.spawned_at)) != ToastPhase::Finished);
    }

    /// Drop every toast immediately
    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Live toasts with their current phase, oldest first
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&Notification, ToastPhase)> + '_ {
        self.toasts.iter().map(move |t| (&t.notification, self.phase_of(t)))
    }

    fn phase_of(&self, toast: &Toast) -> ToastPhase {
        phase_for_age(&self.timings, self.age_of(toast))
    }

    fn age_of(&self, toast: &Toast) -> Duration {
        self.now.saturating_sub(toast.spawned_at)
    }

    /// How far the toast has slid onto the screen (0.0 hidden, 1.0 fully in)
    fn visibility(&self, toast: &Toast) -> f32 {
        let t = &self.timings;
        let age = self.age_of(toast);
        match self.phase_of(toast) {
            ToastPhase::Pending | ToastPhase::Finished => 0.0,
            ToastPhase::Entering => ease_out_cubic(progress(age - t.display_delay(), t.fade_in())),
            ToastPhase::Dwelling => 1.0,
            ToastPhase::Leaving => {
                1.0 - ease_in_cubic(progress(age - leave_start(t), t.fade_out()))
            }
        }
    }

    /// Render toasts stacked under the top-right corner of `area`
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let width = TOAST_WIDTH.min(area.width.saturating_sub(RIGHT_MARGIN + 2));
        if width < 8 {
            return;
        }
        let anchor_x = area.right().saturating_sub(width + RIGHT_MARGIN);
        let mut y = area.y + 1;

        for toast in &self.toasts {
            let height = if toast.notification.message.is_some() { 4 } else { 3 };
            if y + height > area.bottom() {
                break;
            }

            let visible = self.visibility(toast);
            if visible <= 0.0 {
                continue;
            }

            let offset = ((1.0 - visible) * (width + RIGHT_MARGIN) as f32).round() as u16;
            let x = anchor_x + offset;
            let rect = Rect {
                x,
                y,
                width: width.min(area.right().saturating_sub(x)),
                height,
            };
            if rect.width > 2 {
                render_toast(&toast.notification, visible, rect, buf, theme);
            }
            y += height;
        }
    }
}

fn leave_start(t: &ToastTimings) -> Duration {
    t.dwell().max(t.display_delay() + t.fade_in())
}

/// Phase of a toast of the given age
pub fn phase_for_age(t: &ToastTimings, age: Duration) -> ToastPhase {
    let enter_start = t.display_delay();
    let enter_end = enter_start + t.fade_in();
    let leave_start = leave_start(t);
    let leave_end = leave_start + t.fade_out();

    if age < enter_start {
        ToastPhase::Pending
    } else if age < enter_end {
        ToastPhase::Entering
    } else if age < leave_start {
        ToastPhase::Dwelling
    } else if age < leave_end {
        ToastPhase::Leaving
    } else {
        ToastPhase::Finished
    }
}

fn render_toast(n: &Notification, visible: f32, area: Rect, buf: &mut Buffer, theme: &Theme) {
    let color = apply_alpha(n.level.color(theme), 0.4 + 0.6 * visible);

    Clear.render(area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme.surface_elevated));
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", n.level.icon()), Style::default().fg(color)),
        Span::styled(n.title.clone(), Style::default().fg(color).bold()),
        Span::styled(
            format!("  {}", n.created_at.format("%H:%M:%S")),
            Style::default().fg(theme.text_muted),
        ),
    ])];
    if let Some(ref message) = n.message {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(theme.text_primary),
        )));
    }
    Paragraph::new(lines).render(inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_phases_follow_age() {
        let t = ToastTimings::default();
        assert_eq!(phase_for_age(&t, ms(0)), ToastPhase::Pending);
        assert_eq!(phase_for_age(&t, ms(99)), ToastPhase::Pending);
        assert_eq!(phase_for_age(&t, ms(100)), ToastPhase::Entering);
        assert_eq!(phase_for_age(&t, ms(400)), ToastPhase::Dwelling);
        assert_eq!(phase_for_age(&t, ms(2999)), ToastPhase::Dwelling);
        assert_eq!(phase_for_age(&t, ms(3000)), ToastPhase::Leaving);
        assert_eq!(phase_for_age(&t, ms(3300)), ToastPhase::Finished);
    }

    #[test]
    fn test_short_dwell_still_enters_fully() {
        let t = ToastTimings {
            display_delay_ms: 100,
            fade_in_ms: 300,
            dwell_ms: 200,
            fade_out_ms: 300,
        };
        assert_eq!(phase_for_age(&t, ms(300)), ToastPhase::Entering);
        assert_eq!(phase_for_age(&t, ms(400)), ToastPhase::Leaving);
        assert_eq!(phase_for_age(&t, ms(700)), ToastPhase::Finished);
    }

    #[test]
    fn test_each_toast_expires_on_its_own_timer() {
        let t = ToastTimings::default();
        let bound = t.display_delay() + t.fade_in() + t.dwell() + t.fade_out();
        let mut manager = NotificationManager::new(t);

        manager.push(Notification::info("first"));
        manager.advance(ms(1000));
        manager.push(Notification::warning("second"));
        manager.push(Notification::warning("second"));
        assert_eq!(manager.len(), 3);

        // First toast is gone within the bound of its own creation
        manager.advance(bound - ms(1000));
        let titles: Vec<_> = manager.iter().map(|(n, _)| n.title.clone()).collect();
        assert_eq!(titles, vec!["second", "second"]);

        manager.advance(ms(1000));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_push_at_backdates_the_toast() {
        let mut manager = NotificationManager::new(ToastTimings::default());
        manager.advance(ms(5000));
        manager.push_at(Notification::success("late"), ms(2000));

        let (_, phase) = manager.iter().next().unwrap();
        assert_eq!(phase, ToastPhase::Leaving);
        manager.advance(ms(300));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_builder_sets_level_and_message() {
        let n = Notification::error("Launch failed").message("missing files");
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.message.as_deref(), Some("missing files"));
    }

    #[test]
    fn test_render_pending_toast_draws_nothing() {
        let theme = Theme::default();
        let mut manager = NotificationManager::new(ToastTimings::default());
        manager.push(Notification::info("hidden"));

        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        manager.render(area, &mut buf, &theme);
        assert_eq!(buf, Buffer::empty(area));

        manager.advance(ms(1000));
        manager.render(area, &mut buf, &theme);
        assert_ne!(buf, Buffer::empty(area));
    }
}
