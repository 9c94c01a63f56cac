//! Launcher controls as a grouped, focusable menu

use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::launcher::controller::LauncherController;
use crate::launcher::session::LoginState;
use crate::themes::Theme;

/// One of the five launcher controls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlAction {
    Login,
    StartGame,
    Profile,
    Settings,
    Discord,
}

struct ControlGroup {
    title: &'static str,
    items: Vec<ControlAction>,
}

/// Grouped control menu with keyboard focus and mouse hit areas
pub struct ControlMenu {
    groups: Vec<ControlGroup>,
    active_group: usize,
    active_item: usize,
    /// Row rectangles from the last render, for mouse clicks
    hit_areas: Vec<(Rect, ControlAction)>,
}

impl ControlMenu {
    /// Create the menu with focus on the login control
    pub fn new() -> Self {
        let groups = vec![
            ControlGroup {
                title: "Play",
                items: vec![
                    ControlAction::Login,
                    ControlAction::StartGame,
                    ControlAction::Profile,
                ],
            },
            ControlGroup {
                title: "Community",
                items: vec![ControlAction::Settings, ControlAction::Discord],
            },
        ];

        Self {
            groups,
            active_group: 0,
            active_item: 0,
            hit_areas: Vec::new(),
        }
    }

    /// Move selection up (k or Up)
    pub fn move_up(&mut self) {
        if self.active_item > 0 {
            self.active_item -= 1;
        } else if self.active_group > 0 {
            self.active_group -= 1;
            self.active_item = self.groups[self.active_group].items.len().saturating_sub(1);
        }
    }

    /// Move selection down (j or Down)
    pub fn move_down(&mut self) {
        if self.active_item < self.groups[self.active_group].items.len().saturating_sub(1) {
            self.active_item += 1;
        } else if self.active_group < self.groups.len().saturating_sub(1) {
            self.active_group += 1;
            self.active_item = 0;
        }
    }

    /// Jump to the first control of the next group, wrapping (Tab)
    pub fn next_group(&mut self) {
        self.active_group = (self.active_group + 1) % self.groups.len();
        self.active_item = 0;
    }

    /// Move to top (g)
    pub fn move_to_top(&mut self) {
        self.active_group = 0;
        self.active_item = 0;
    }

    /// Move to bottom (G)
    pub fn move_to_bottom(&mut self) {
        if let Some(last_group) = self.groups.last() {
            self.active_group = self.groups.len().saturating_sub(1);
            self.active_item = last_group.items.len().saturating_sub(1);
        }
    }

    /// Currently focused control
    pub fn selected(&self) -> Option<ControlAction> {
        self.groups
            .get(self.active_group)
            .and_then(|g| g.items.get(self.active_item))
            .copied()
    }

    /// Move focus to `action`
    pub fn focus(&mut self, action: ControlAction) {
        for (g_idx, group) in self.groups.iter().enumerate() {
            if let Some(i_idx) = group.items.iter().position(|a| *a == action) {
                self.active_group = g_idx;
                self.active_item = i_idx;
                return;
            }
        }
    }

    /// Control under a screen position, from the last render
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ControlAction> {
        let pos = Position::new(column, row);
        self.hit_areas
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, action)| *action)
    }

    fn label(action: ControlAction, controller: &LauncherController) -> String {
        match action {
            ControlAction::Login => controller.login_label(),
            ControlAction::StartGame => controller.start_label().to_string(),
            ControlAction::Profile => format!("◂ {} ▸", controller.session().profile),
            ControlAction::Settings => "Settings".to_string(),
            ControlAction::Discord => "Discord".to_string(),
        }
    }

    fn base_color(action: ControlAction, controller: &LauncherController, theme: &Theme) -> Color {
        match action {
            ControlAction::Login => match controller.session().login {
                LoginState::LoggedIn => theme.success,
                // Still clickable: a second click cancels the login
                LoginState::LoggingIn => theme.warning,
                LoginState::LoggedOut => theme.accent_login,
            },
            ControlAction::StartGame => {
                if controller.session().game_running() {
                    theme.success
                } else if controller.start_enabled() {
                    theme.accent_secondary
                } else {
                    theme.text_muted
                }
            }
            ControlAction::Profile | ControlAction::Settings | ControlAction::Discord => {
                theme.text_secondary
            }
        }
    }

    /// Render the controls and record their hit areas
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        controller: &LauncherController,
        theme: &Theme,
    ) -> Result<()> {
        let mut list_items = Vec::new();
        let mut rows = Vec::new();

        for (g_idx, group) in self.groups.iter().enumerate() {
            let header_style = if g_idx == self.active_group {
                Style::default().fg(theme.text_primary)
            } else {
                Style::default().fg(theme.text_secondary)
            };
            list_items.push(ListItem::new(format!("▶ {}", group.title)).style(header_style));

            for (i_idx, action) in group.items.iter().enumerate() {
                let is_selected = g_idx == self.active_group && i_idx == self.active_item;
                let indicator = if is_selected { "▸" } else { " " };
                let color = Self::base_color(*action, controller, theme);

                let style = if is_selected {
                    Style::default().fg(color).bold()
                } else {
                    Style::default().fg(color)
                };

                rows.push((list_items.len() as u16, *action));
                list_items.push(
                    ListItem::new(format!("  {} {}", indicator, Self::label(*action, controller)))
                        .style(style),
                );
            }

            if g_idx < self.groups.len() - 1 {
                list_items.push(ListItem::new(""));
            }
        }

        self.hit_areas = rows
            .into_iter()
            .filter(|(offset, _)| *offset < area.height)
            .map(|(offset, action)| {
                (
                    Rect {
                        x: area.x,
                        y: area.y + offset,
                        width: area.width,
                        height: 1,
                    },
                    action,
                )
            })
            .collect();

        frame.render_widget(List::new(list_items), area);
        Ok(())
    }
}

impl Default for ControlMenu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timings;
    use crate::launcher::controller::UiEvent;

    #[test]
    fn test_navigation_crosses_groups() {
        let mut menu = ControlMenu::new();
        assert_eq!(menu.selected(), Some(ControlAction::Login));

        menu.move_down();
        menu.move_down();
        assert_eq!(menu.selected(), Some(ControlAction::Profile));
        menu.move_down();
        assert_eq!(menu.selected(), Some(ControlAction::Settings));
        menu.move_up();
        assert_eq!(menu.selected(), Some(ControlAction::Profile));

        menu.move_to_bottom();
        assert_eq!(menu.selected(), Some(ControlAction::Discord));
        menu.move_down();
        assert_eq!(menu.selected(), Some(ControlAction::Discord));
        menu.move_to_top();
        assert_eq!(menu.selected(), Some(ControlAction::Login));
    }

    #[test]
    fn test_next_group_wraps() {
        let mut menu = ControlMenu::new();
        menu.next_group();
        assert_eq!(menu.selected(), Some(ControlAction::Settings));
        menu.next_group();
        assert_eq!(menu.selected(), Some(ControlAction::Login));
    }

    #[test]
    fn test_focus_by_action() {
        let mut menu = ControlMenu::new();
        menu.focus(ControlAction::Discord);
        assert_eq!(menu.selected(), Some(ControlAction::Discord));
        menu.focus(ControlAction::StartGame);
        assert_eq!(menu.selected(), Some(ControlAction::StartGame));
    }

    #[test]
    fn test_login_control_stays_lit_while_logging_in() {
        let theme = Theme::default();
        let mut controller = LauncherController::new(Timings::default(), "Player123");
        controller.handle(UiEvent::LoginClicked);

        let color = ControlMenu::base_color(ControlAction::Login, &controller, &theme);
        assert_eq!(color, theme.warning);
        assert_ne!(color, theme.text_muted);
    }

    #[test]
    fn test_no_hits_before_render() {
        let menu = ControlMenu::new();
        assert_eq!(menu.hit_test(0, 0), None);
    }
}
