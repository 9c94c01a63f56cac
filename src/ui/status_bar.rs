//! Status bar component
//!
//! Bottom line of the launcher: brand, version, the live status text,
//! account and profile indicators, clock, and the help hint.

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use crate::themes::Theme;

const BRAND: &str = "◆ CRAFTLAUNCH";

/// Dot indicator shown in the status bar
#[derive(Clone, Debug)]
struct Indicator {
    label: String,
    value: String,
    active: bool,
}

/// Status bar widget
pub struct StatusBar<'a> {
    theme: &'a Theme,
    version: String,
    status: String,
    indicators: Vec<Indicator>,
    show_help_hint: bool,
}

impl<'a> StatusBar<'a> {
    /// Create a status bar for the given version
    pub fn new(theme: &'a Theme, version: impl Into<String>) -> Self {
        Self {
            theme,
            version: version.into(),
            status: String::new(),
            indicators: Vec::new(),
            show_help_hint: true,
        }
    }

    /// Set the status text (the launcher's version/status line)
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Add a dot indicator
    pub fn indicator(
        mut self,
        label: impl Into<String>,
        value: impl Into<String>,
        active: bool,
    ) -> Self {
        self.indicators.push(Indicator {
            label: label.into(),
            value: value.into(),
            active,
        });
        self
    }

    /// Hide the "[?] Help" hint
    pub fn hide_help_hint(mut self) -> Self {
        self.show_help_hint = false;
        self
    }

    fn separator(&self) -> Span<'a> {
        Span::styled(" │ ", Style::default().fg(self.theme.border))
    }

    /// Build the status bar content as a Line
    fn build_content(&self) -> Line<'a> {
        let mut spans = vec![
            Span::styled(BRAND, Style::default().fg(self.theme.accent).bold()),
            self.separator(),
            Span::styled(self.version.clone(), Style::default().fg(self.theme.text_muted)),
        ];

        if !self.status.is_empty() {
            spans.push(self.separator());
            spans.push(Span::styled(
                self.status.clone(),
                Style::default().fg(self.theme.text_primary),
            ));
        }

        for indicator in &self.indicators {
            let color = if indicator.active {
                self.theme.success
            } else {
                self.theme.text_muted
            };
            spans.push(self.separator());
            spans.push(Span::styled(
                format!("{} ", self.theme.status_dot(indicator.active)),
                Style::default().fg(color),
            ));
            spans.push(Span::styled(
                format!("{}: ", indicator.label),
                Style::default().fg(self.theme.text_secondary),
            ));
            spans.push(Span::styled(indicator.value.clone(), Style::default().fg(color)));
        }

        spans.push(self.separator());
        spans.push(Span::styled(
            Local::now().format("%H:%M:%S").to_string(),
            Style::default().fg(self.theme.text_muted),
        ));

        if self.show_help_hint {
            spans.push(self.separator());
            spans.push(Span::styled(
                "[?] Help",
                Style::default().fg(self.theme.text_muted),
            ));
        }

        Line::from(spans)
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.surface));
        let content = self.build_content();
        Paragraph::new(content).render(area, buf);
    }
}
