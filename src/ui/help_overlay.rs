//! Help overlay
//!
//! Keyboard and mouse reference for the launcher.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::themes::Theme;

struct ShortcutEntry {
    key: &'static str,
    description: &'static str,
}

const CONTROLS: &[ShortcutEntry] = &[
    ShortcutEntry { key: "a", description: "Log in / log out" },
    ShortcutEntry { key: "s", description: "Start game" },
    ShortcutEntry { key: "p", description: "Next profile" },
    ShortcutEntry { key: "o", description: "Settings" },
    ShortcutEntry { key: "d", description: "Discord" },
    ShortcutEntry { key: "Enter/Space", description: "Activate focused control" },
    ShortcutEntry { key: "←→ / h l", description: "Change profile (when focused)" },
    ShortcutEntry { key: "Click", description: "Activate control" },
];

const GENERAL: &[ShortcutEntry] = &[
    ShortcutEntry { key: "↑↓ / j k", description: "Move focus" },
    ShortcutEntry { key: "Tab", description: "Next group" },
    ShortcutEntry { key: "g / G", description: "First / last control" },
    ShortcutEntry { key: "F5", description: "Reload launcher" },
    ShortcutEntry { key: "F11", description: "Toggle fullscreen" },
    ShortcutEntry { key: "?", description: "This help" },
    ShortcutEntry { key: "q / Ctrl+C", description: "Quit" },
];

const KEY_WIDTH: u16 = 13;

/// Help overlay showing keyboard shortcuts
pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    /// Create a hidden help overlay
    pub fn new() -> Self {
        Self { visible: false }
    }

    /// Hide the overlay
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Toggle visibility
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    fn render_section(
        &self,
        title: &str,
        shortcuts: &[ShortcutEntry],
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
    ) {
        Paragraph::new(title)
            .style(Style::default().fg(theme.text_secondary).underlined())
            .render(Rect { height: 1, ..area }, buf);

        for (i, entry) in shortcuts.iter().enumerate() {
            if i as u16 + 1 >= area.height {
                break;
            }
            let y = area.y + i as u16 + 1;

            Paragraph::new(format!("{:>width$}", entry.key, width = KEY_WIDTH as usize))
                .style(Style::default().fg(theme.accent).bold())
                .render(Rect::new(area.x, y, KEY_WIDTH.min(area.width), 1), buf);
            Paragraph::new(format!("  {}", entry.description))
                .style(Style::default().fg(theme.text_primary))
                .render(
                    Rect::new(
                        area.x + KEY_WIDTH.min(area.width),
                        y,
                        area.width.saturating_sub(KEY_WIDTH),
                        1,
                    ),
                    buf,
                );
        }
    }

    /// Render the help overlay centered in `area`
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if !self.visible {
            return;
        }

        let width = 84.min(area.width.saturating_sub(4));
        let height = 14.min(area.height.saturating_sub(2));
        let overlay_area = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };

        Clear.render(overlay_area, buf);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(Style::default().fg(theme.accent).bold())
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.surface_elevated));

        let inner = block.inner(overlay_area);
        block.render(overlay_area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        self.render_section("Controls", CONTROLS, columns[0], buf, theme);
        self.render_section("General", GENERAL, columns[1], buf, theme);

        Paragraph::new("[Press any key to close]")
            .style(Style::default().fg(theme.text_muted))
            .alignment(Alignment::Center)
            .render(rows[1], buf);
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}
