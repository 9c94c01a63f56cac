//! Main application structure and event loop

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::prelude::*;
use std::io;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use crate::config::LauncherSettings;
use crate::themes::Theme;
use crate::ui::{animation::FadeState, HelpOverlay, Notification, NotificationManager};
use crate::views::{launcher::LauncherView, ViewAction, ViewTrait};

/// Frame interval for the render loop
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

const FADE_IN_MS: u64 = 200;
const FADE_OUT_MS: u64 = 120;

/// Main application state
pub struct App {
    settings: LauncherSettings,
    theme: Theme,
    launcher_view: LauncherView,
    /// Toast stack, clock kept in step with the launcher's
    notifications: NotificationManager,
    help_overlay: HelpOverlay,
    /// Screen transition fade animation
    view_fade: Option<FadeState>,
    /// Quit requested, waiting for the fade out to finish
    quitting: bool,
    should_quit: bool,
}

impl App {
    pub fn new(settings: LauncherSettings) -> Self {
        info!("Initializing launcher for {}", settings.player_name);

        let theme = Theme::load(settings.accent.as_deref());
        let launcher_view = LauncherView::new(&settings, theme.clone());
        let mut notifications = NotificationManager::new(settings.toasts.clone());

        if let Some(accent) = settings.accent.as_deref() {
            if Theme::hex_to_color(accent).is_none() {
                warn!("Ignoring invalid accent color {:?}", accent);
                notifications.push(
                    Notification::warning("Invalid accent color")
                        .message(format!("'{}' is not a #rrggbb color", accent)),
                );
            }
        }

        Self {
            settings,
            theme,
            launcher_view,
            notifications,
            help_overlay: HelpOverlay::new(),
            view_fade: Some(FadeState::fade_in(FADE_IN_MS)),
            quitting: false,
            should_quit: false,
        }
    }

    /// Show a startup problem as an error toast
    pub fn report_error(&mut self, title: &str, message: impl Into<String>) {
        self.notifications
            .push(Notification::error(title).message(message));
    }

    /// Run the main event loop
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        let mut ticker = tokio::time::interval(FRAME_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        loop {
            ticker.tick().await;

            let now = Instant::now();
            self.tick(now.duration_since(last_frame));
            last_frame = now;

            terminal.draw(|f| self.draw(f))?;

            // Drain input without blocking the frame
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code, key.modifiers)?;
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(w, h) => debug!("Terminal resized to {}x{}", w, h),
                    _ => {}
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!("Launcher exiting");
        Ok(())
    }

    /// Advance every clock by one frame
    fn tick(&mut self, delta: Duration) {
        self.launcher_view.advance(delta);
        self.collect_notifications();
        self.notifications.advance(delta);

        if let Some(ref mut fade) = self.view_fade {
            fade.advance(delta);
            if fade.is_done() {
                self.view_fade = None;
                if self.quitting {
                    self.should_quit = true;
                }
            }
        }
    }

    /// Move toasts raised by the launcher onto the stack, keeping their
    /// raise time so every toast runs its full lifecycle
    fn collect_notifications(&mut self) {
        for (raised_at, notification) in self.launcher_view.drain_notifications() {
            self.notifications.push_at(notification, raised_at);
        }
    }

    fn draw(&mut self, f: &mut Frame) {
        let area = f.area();

        if let Err(e) = self.launcher_view.render(f, area) {
            warn!("Launcher render error: {}", e);
        }

        self.render_fade_overlay(area, f.buffer_mut());
        self.notifications.render(area, f.buffer_mut(), &self.theme);
        self.help_overlay.render(area, f.buffer_mut(), &self.theme);
    }

    /// Render fade overlay for screen transitions
    fn render_fade_overlay(&self, area: Rect, buf: &mut Buffer) {
        let Some(ref fade) = self.view_fade else {
            return;
        };

        // Inverted: 1.0 = fully dark, 0.0 = transparent
        let overlay_alpha = 1.0 - fade.alpha();
        if overlay_alpha <= 0.01 {
            return;
        }

        let dim = |color: Color, strength: f32| match color {
            Color::Rgb(r, g, b) => {
                let factor = 1.0 - overlay_alpha * strength;
                Color::Rgb(
                    (r as f32 * factor) as u8,
                    (g as f32 * factor) as u8,
                    (b as f32 * factor) as u8,
                )
            }
            other => other,
        };

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.fg = dim(cell.fg, 0.7);
                    cell.bg = dim(cell.bg, 0.5);
                }
            }
        }
    }

    /// Start the launcher over, as a page reload would
    fn reload(&mut self) {
        info!("Reloading launcher");
        self.launcher_view.reload(&self.settings);
        self.notifications.clear();
        self.help_overlay.hide();
        self.view_fade = Some(FadeState::fade_in(FADE_IN_MS));
    }

    fn request_quit(&mut self) {
        if self.quitting {
            return;
        }
        debug!("Quit requested");
        self.quitting = true;
        self.view_fade = Some(FadeState::fade_out(FADE_OUT_MS));
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        // Any key closes help without reaching the launcher
        if self.help_overlay.visible {
            self.help_overlay.hide();
            return Ok(());
        }

        match key {
            KeyCode::F(5) => self.reload(),
            KeyCode::F(11) => {
                self.launcher_view.toggle_fullscreen();
                debug!("Fullscreen: {}", self.launcher_view.is_fullscreen());
            }
            KeyCode::Char('?') => self.help_overlay.toggle(),
            KeyCode::Char('q') | KeyCode::Esc => self.request_quit(),
            other => {
                if self.launcher_view.handle_key(other)? == ViewAction::Unhandled {
                    trace!("Unhandled key: {:?}", other);
                }
            }
        }

        self.collect_notifications();
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.help_overlay.visible {
                    self.help_overlay.hide();
                    return;
                }
                if self.launcher_view.handle_click(mouse.column, mouse.row) {
                    self.collect_notifications();
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                trace!("Context menu suppressed at {},{}", mouse.column, mouse.row);
            }
            _ => {}
        }
    }
}
