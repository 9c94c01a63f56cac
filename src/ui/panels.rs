//! Rounded panels with theme-driven border colors

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Padding};

use crate::themes::Theme;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelStyle {
    #[default]
    Default,
    /// Panel holding keyboard focus
    Focused,
    /// Something is live inside (game running)
    Active,
    /// Work in progress inside (login or launch pending)
    Busy,
}

/// A styled panel component
#[derive(Clone)]
pub struct Panel<'a> {
    title: Option<&'a str>,
    style: PanelStyle,
    theme: &'a Theme,
    padding: Padding,
}

impl<'a> Panel<'a> {
    /// Create a panel with default style and horizontal padding
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            title: None,
            style: PanelStyle::Default,
            theme,
            padding: Padding::horizontal(1),
        }
    }

    /// Set the border title
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the border style
    pub fn style(mut self, style: PanelStyle) -> Self {
        self.style = style;
        self
    }

    /// Remove inner padding (for canvas-like content)
    pub fn no_padding(mut self) -> Self {
        self.padding = Padding::ZERO;
        self
    }

    /// Build the Block widget
    pub fn block(&self) -> Block<'a> {
        let color = match self.style {
            PanelStyle::Default => self.theme.border,
            PanelStyle::Focused => self.theme.border_focused,
            PanelStyle::Active => self.theme.success,
            PanelStyle::Busy => self.theme.warning,
        };
        let title_color = match self.style {
            PanelStyle::Default => self.theme.text_secondary,
            _ => color,
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .padding(self.padding);

        if let Some(title) = self.title {
            block = block
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(title_color).bold());
        }

        block
    }

    /// Inner area after borders and padding
    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_accounts_for_border_and_padding() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 20, 10);

        assert_eq!(Panel::new(&theme).inner(area), Rect::new(2, 1, 16, 8));
        assert_eq!(Panel::new(&theme).no_padding().inner(area), Rect::new(1, 1, 18, 8));
    }
}
