use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use shopreel_core::carousel::CarouselState;

use crate::app::{state_label, App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match app.mode {
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | ticker: {} | banner {}/{} | items: {}/{}",
                mode_str,
                state_label(app.ticker.state()),
                (app.banner.current() + 1).min(app.banner.items().len()),
                app.banner.items().len(),
                app.ticker.items().len(),
                app.catalog.items.len(),
            )
        };

        let state_color = match app.ticker.state() {
            CarouselState::Running => theme.running,
            CarouselState::Paused => theme.paused,
            _ => theme.grey1,
        };

        let help_hint = " q:quit space:pause h/l:items j/k:banners ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.len() + 2);

        let line = Line::from(vec![
            Span::styled("●", Style::default().fg(state_color).bg(theme.bg2)),
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len + 1), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
