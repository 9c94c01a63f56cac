//! Launcher view - the main (and only) screen
//!
//! Logo header, the control panel, a decorative scene, and the two content
//! feeds, with the status bar along the bottom. Owns the launcher core so
//! the app only has to feed it time and input.

use anyhow::Result;
use crossterm::event::KeyCode;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use std::time::Duration;

use crate::config::LauncherSettings;
use crate::launcher::ambience::{Ambience, Decoration, DecorationKind};
use crate::launcher::controller::{LauncherController, UiEvent};
use crate::launcher::feeds::{ContentFeeds, Feed};
use crate::launcher::menu::{ControlAction, ControlMenu};
use crate::launcher::session::LoginState;
use crate::themes::Theme;
use crate::ui::notification::Notification;
use crate::ui::{Panel, PanelStyle, StatusBar};

const LOGO: &[&str] = &[
    "█▀▀ █▀█ ▄▀█ █▀▀ ▀█▀ █   ▄▀█ █ █ █▄ █ █▀▀ █ █",
    "█▄▄ █▀▄ █▀█ █▀   █  █▄▄ █▀█ █▄█ █ ▀█ █▄▄ █▀█",
    "",
    "Your worlds, one keypress away",
];

const CHARACTER: &[&str] = &[" ▄██▄ ", " ▐██▌ ", "▐████▌", " ▐▌▐▌ "];

const CONTROL_PANEL_WIDTH: u16 = 32;

pub struct LauncherView {
    controller: LauncherController,
    feeds: ContentFeeds<StdRng>,
    ambience: Ambience<StdRng>,
    menu: ControlMenu,
    theme: Theme,
    version: String,
    fullscreen: bool,
}

impl LauncherView {
    /// Create the launcher screen with a random seed
    pub fn new(settings: &LauncherSettings, theme: Theme) -> Self {
        Self::with_seed(settings, theme, rand::random())
    }

    /// Build with a fixed seed for the feed and scene randomness
    pub fn with_seed(settings: &LauncherSettings, theme: Theme, seed: u64) -> Self {
        Self {
            controller: LauncherController::new(
                settings.timings.clone(),
                settings.player_name.clone(),
            ),
            feeds: ContentFeeds::new(&settings.feeds, StdRng::seed_from_u64(seed)),
            ambience: Ambience::new(
                settings.ambience.clone(),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            menu: ControlMenu::new(),
            theme,
            version: settings.version.clone(),
            fullscreen: false,
        }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &LauncherController {
        &self.controller
    }

    /// Advance every timed part of the launcher
    pub fn advance(&mut self, delta: Duration) {
        self.controller.advance(delta);
        self.feeds.advance(delta);
        self.ambience.advance(delta);
    }

    /// Notifications raised since the last drain, with their raise time
    pub fn drain_notifications(&mut self) -> Vec<(Duration, Notification)> {
        self.controller.drain_notifications()
    }

    /// Drop all pending work and start over with fresh feeds and scenery
    pub fn reload(&mut self, settings: &LauncherSettings) {
        let seed: u64 = rand::random();
        self.controller.reset();
        self.feeds = ContentFeeds::new(&settings.feeds, StdRng::seed_from_u64(seed));
        self.ambience = Ambience::new(
            settings.ambience.clone(),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        );
        self.menu = ControlMenu::new();
    }

    /// Toggle fullscreen (hides header and feeds)
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Activate a control as if it were clicked
    pub fn activate(&mut self, action: ControlAction) {
        match action {
            ControlAction::Login => self.controller.handle(UiEvent::LoginClicked),
            ControlAction::StartGame => self.controller.handle(UiEvent::StartGameClicked),
            ControlAction::Profile => self.change_profile(true),
            ControlAction::Settings => self.controller.handle(UiEvent::SettingsClicked),
            ControlAction::Discord => self.controller.handle(UiEvent::DiscordClicked),
        }
    }

    /// Focus and activate, for shortcut keys
    fn trigger(&mut self, action: ControlAction) {
        self.menu.focus(action);
        self.activate(action);
    }

    fn change_profile(&mut self, forward: bool) {
        let current = self.controller.session().profile;
        let next = if forward {
            current.next()
        } else {
            current.previous()
        };
        self.controller.handle(UiEvent::ProfileSelected(next));
    }

    /// Left click at a screen position. Returns true if it hit a control.
    pub fn handle_click(&mut self, column: u16, row: u16) -> bool {
        match self.menu.hit_test(column, row) {
            Some(action) => {
                self.menu.focus(action);
                self.activate(action);
                true
            }
            None => false,
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = LOGO
            .iter()
            .enumerate()
            .map(|(i, &line)| {
                if i == LOGO.len() - 1 {
                    Line::from(Span::styled(line, Style::default().fg(self.theme.text_secondary)))
                } else {
                    Line::from(Span::styled(line, Style::default().fg(self.theme.accent)))
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn control_panel_style(&self) -> PanelStyle {
        let session = self.controller.session();
        if session.game_running() {
            PanelStyle::Active
        } else if session.launching() || session.login == LoginState::LoggingIn {
            PanelStyle::Busy
        } else {
            PanelStyle::Focused
        }
    }

    fn render_controls(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let panel = Panel::new(&self.theme)
            .title("Launcher")
            .style(self.control_panel_style());
        let inner = panel.inner(area);
        frame.render_widget(panel.block(), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        self.menu
            .render(frame, chunks[0], &self.controller, &self.theme)?;
        self.render_footer(frame, chunks[1]);
        Ok(())
    }

    /// Keybinding hints under the controls
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let keybinds = [("a", "Login"), ("s", "Start"), ("p", "Profile"), ("?", "Help")];

        let mut spans = Vec::new();
        for (i, (key, desc)) in keybinds.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!("[{}]", key),
                Style::default().fg(self.theme.accent),
            ));
            spans.push(Span::styled(
                format!(" {}", desc),
                Style::default().fg(self.theme.text_muted),
            ));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_scene(&self, frame: &mut Frame, area: Rect) {
        let panel = Panel::new(&self.theme).title("World").no_padding();
        let inner = panel.inner(area);
        frame.render_widget(panel.block(), area);
        if inner.width < 8 || inner.height < 4 {
            return;
        }

        let now = self.ambience.now();
        let particle_color = Theme::blend_colors(self.theme.text_primary, self.theme.background, 0.6);
        let buf = frame.buffer_mut();

        for block in self.ambience.blocks() {
            let color = match block.kind {
                DecorationKind::Block { hue } => Theme::hsl(hue, 0.7, 0.6),
                DecorationKind::Particle => particle_color,
            };
            if let Some((x, y)) = place(inner, block, now, 2) {
                buf.set_string(x, y, "██", Style::default().fg(color));
            }
        }
        for particle in self.ambience.particles() {
            if let Some((x, y)) = place(inner, particle, now, 1) {
                buf.set_string(x, y, "•", Style::default().fg(particle_color));
            }
        }

        // Player figure with the status line underneath
        let figure_color = if self.controller.session().game_running() {
            self.theme.success
        } else {
            self.theme.accent
        };
        let figure_height = CHARACTER.len() as u16 + 2;
        let top = inner.y + inner.height.saturating_sub(figure_height) / 2;
        for (i, line) in CHARACTER.iter().enumerate() {
            let width = line.chars().count() as u16;
            let x = inner.x + inner.width.saturating_sub(width) / 2;
            buf.set_string(x, top + i as u16, line, Style::default().fg(figure_color));
        }

        let caption = self.controller.status_line();
        let caption_row = top + CHARACTER.len() as u16 + 1;
        if caption_row < inner.bottom() {
            let caption_area = Rect::new(inner.x, caption_row, inner.width, 1);
            Paragraph::new(caption)
                .style(Style::default().fg(self.theme.text_secondary))
                .alignment(Alignment::Center)
                .render(caption_area, buf);
        }
    }

    fn render_feeds(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.render_feed(frame, chunks[0], "Announcements", &self.feeds.announcements);
        self.render_feed(frame, chunks[1], "Updates", &self.feeds.updates);
    }

    fn render_feed(&self, frame: &mut Frame, area: Rect, title: &str, feed: &Feed) {
        let title = format!("{} ({})", title, feed.len());
        let panel = Panel::new(&self.theme).title(&title);
        let inner = panel.inner(area);
        frame.render_widget(panel.block(), area);

        let mut lines = Vec::new();
        for entry in feed.entries() {
            let body_style = if entry.fresh {
                Style::default().fg(self.theme.info).bold()
            } else {
                Style::default().fg(self.theme.text_secondary)
            };

            // "v1.2.4 update: ..." renders its heading in bold
            let mut spans = vec![
                Span::styled("• ", Style::default().fg(self.theme.border)),
                Span::styled(
                    format!("{} ", entry.posted_at.format("%H:%M")),
                    Style::default().fg(self.theme.text_muted),
                ),
            ];
            match entry.text.split_once(": ") {
                Some((head, rest)) if head.len() <= 24 => {
                    spans.push(Span::styled(
                        format!("{}: ", head),
                        Style::default().fg(self.theme.text_primary).bold(),
                    ));
                    spans.push(Span::styled(rest.to_string(), body_style));
                }
                _ => spans.push(Span::styled(entry.text.clone(), body_style)),
            }
            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let session = self.controller.session();
        let mut bar = StatusBar::new(&self.theme, self.version.clone())
            .status(self.controller.status_line())
            .indicator("Account", self.controller.login_label(), session.logged_in())
            .indicator("Profile", session.profile.label(), !session.profile.is_placeholder());
        if self.fullscreen {
            bar = bar.hide_help_hint();
        }
        frame.render_widget(bar, area);
    }
}

/// Cell for a decoration inside `area`, or None if it would not fit
fn place(area: Rect, d: &Decoration, now: Duration, glyph_width: u16) -> Option<(u16, u16)> {
    let x = area.x + ((d.x_pct / 100.0) * area.width as f32) as u16;
    let max_row = area.height.saturating_sub(1) as f32;
    let row = ((d.y_pct / 100.0) * max_row + d.bob(now)).round().clamp(0.0, max_row);
    if x + glyph_width > area.right() {
        return None;
    }
    Some((x, area.y + row as u16))
}

impl super::ViewTrait for LauncherView {
    fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let bg = Block::default().style(Style::default().bg(self.theme.background));
        frame.render_widget(bg, area);

        let header_height = if self.fullscreen {
            0
        } else {
            LOGO.len() as u16 + 1
        };
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_height),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        if !self.fullscreen {
            self.render_header(frame, main_chunks[0]);
        }

        let constraints = if self.fullscreen {
            vec![Constraint::Length(CONTROL_PANEL_WIDTH), Constraint::Min(0)]
        } else {
            vec![
                Constraint::Length(CONTROL_PANEL_WIDTH),
                Constraint::Min(0),
                Constraint::Percentage(32),
            ]
        };
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(main_chunks[1]);

        self.render_controls(frame, content_chunks[0])?;
        self.render_scene(frame, content_chunks[1]);
        if !self.fullscreen {
            self.render_feeds(frame, content_chunks[2]);
        }

        self.render_status_bar(frame, main_chunks[2]);
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) -> Result<super::ViewAction> {
        let on_profile = self.menu.selected() == Some(ControlAction::Profile);
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.menu.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.menu.move_down(),
            KeyCode::Tab => self.menu.next_group(),
            KeyCode::Char('g') => self.menu.move_to_top(),
            KeyCode::Char('G') => self.menu.move_to_bottom(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(action) = self.menu.selected() {
                    self.activate(action);
                }
            }
            KeyCode::Left | KeyCode::Char('h') if on_profile => self.change_profile(false),
            KeyCode::Right | KeyCode::Char('l') if on_profile => self.change_profile(true),
            KeyCode::Char('a') => self.trigger(ControlAction::Login),
            KeyCode::Char('s') => self.trigger(ControlAction::StartGame),
            KeyCode::Char('p') => self.trigger(ControlAction::Profile),
            KeyCode::Char('o') => self.trigger(ControlAction::Settings),
            KeyCode::Char('d') => self.trigger(ControlAction::Discord),
            _ => return Ok(super::ViewAction::Unhandled),
        }
        Ok(super::ViewAction::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::session::Profile;
    use crate::views::{ViewAction, ViewTrait};
    use ratatui::backend::TestBackend;

    fn view() -> LauncherView {
        LauncherView::with_seed(&LauncherSettings::default(), Theme::default(), 3)
    }

    fn draw(view: &mut LauncherView) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                view.render(f, area).unwrap();
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Column and row where `needle` starts on screen
    fn find(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
        let wanted: Vec<String> = needle.chars().map(|c| c.to_string()).collect();
        let area = buf.area;
        for y in area.top()..area.bottom() {
            let row: Vec<String> = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect();
            if let Some(x) = row.windows(wanted.len()).position(|w| w == wanted.as_slice()) {
                return Some((x as u16, y));
            }
        }
        None
    }

    #[test]
    fn test_shortcut_keys_drive_controller() {
        let mut v = view();
        assert_eq!(v.handle_key(KeyCode::Char('a')).unwrap(), ViewAction::Continue);
        assert_eq!(v.controller().session().login, LoginState::LoggingIn);

        v.advance(Duration::from_millis(1500));
        assert!(v.controller().session().logged_in());
        assert_eq!(v.drain_notifications().len(), 1);

        v.handle_key(KeyCode::Char('s')).unwrap();
        v.advance(Duration::from_millis(2000));
        assert!(v.controller().session().game_running());
    }

    #[test]
    fn test_profile_arrows_only_when_focused() {
        let mut v = view();
        assert_eq!(v.handle_key(KeyCode::Right).unwrap(), ViewAction::Unhandled);
        assert_eq!(v.controller().session().profile, Profile::Survival);

        v.handle_key(KeyCode::Char('p')).unwrap();
        assert_eq!(v.controller().session().profile, Profile::Creative);

        v.handle_key(KeyCode::Left).unwrap();
        v.handle_key(KeyCode::Left).unwrap();
        assert_eq!(v.controller().session().profile, Profile::Placeholder);

        // Creative notified, Survival notified, placeholder silent
        assert_eq!(v.drain_notifications().len(), 2);
    }

    #[test]
    fn test_unknown_key_is_unhandled() {
        let mut v = view();
        assert_eq!(v.handle_key(KeyCode::Char('z')).unwrap(), ViewAction::Unhandled);
    }

    #[test]
    fn test_render_and_click_login() {
        let mut v = view();
        let buf = draw(&mut v);
        assert!(find(&buf, "Announcements").is_some());
        assert!(find(&buf, "Ready to play").is_some());

        let (x, y) = find(&buf, "Log in").expect("login control on screen");
        assert!(v.handle_click(x, y));
        assert_eq!(v.controller().session().login, LoginState::LoggingIn);

        let buf = draw(&mut v);
        assert!(find(&buf, "Logging in...").is_some());
    }

    #[test]
    fn test_feed_panels_show_count_and_time() {
        let mut v = view();
        let buf = draw(&mut v);
        assert!(find(&buf, "Announcements (1)").is_some());
        assert!(find(&buf, "Updates (1)").is_some());

        let seeded = v.feeds.announcements.entries().next().unwrap();
        let stamp = format!("• {}", seeded.posted_at.format("%H:%M"));
        assert!(find(&buf, &stamp).is_some());

        v.advance(Duration::from_millis(2000));
        let buf = draw(&mut v);
        assert!(find(&buf, "Announcements (2)").is_some());
    }

    #[test]
    fn test_fullscreen_hides_feeds() {
        let mut v = view();
        v.toggle_fullscreen();
        assert!(v.is_fullscreen());

        let buf = draw(&mut v);
        assert!(find(&buf, "Announcements").is_none());
        assert!(find(&buf, "World").is_some());
    }

    #[test]
    fn test_reload_drops_pending_login() {
        let mut v = view();
        v.handle_key(KeyCode::Char('a')).unwrap();
        v.advance(Duration::from_millis(1000));
        v.handle_key(KeyCode::Char('d')).unwrap();

        v.reload(&LauncherSettings::default());
        v.advance(Duration::from_secs(20));
        assert_eq!(v.controller().session().login, LoginState::LoggedOut);
        assert!(v.drain_notifications().is_empty());
        assert_eq!(v.feeds.announcements.len(), 2);
    }

    #[test]
    fn test_click_outside_controls_is_ignored() {
        let mut v = view();
        draw(&mut v);
        assert!(!v.handle_click(139, 0));
        assert_eq!(v.controller().session().login, LoginState::LoggedOut);
    }

    #[test]
    fn test_place_keeps_decorations_inside() {
        let area = Rect::new(10, 5, 40, 12);
        let d = Decoration {
            id: 0,
            kind: DecorationKind::Particle,
            x_pct: 99.9,
            y_pct: 99.9,
            period: Duration::from_secs(5),
            delay: Duration::ZERO,
            spawned_at: Duration::ZERO,
        };
        assert_eq!(place(area, &d, Duration::ZERO, 2), None);

        let (x, y) = place(area, &d, Duration::from_millis(1250), 1).unwrap();
        assert!(area.contains(Position::new(x, y)));
    }
}
