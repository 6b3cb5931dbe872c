use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use shopreel_core::carousel::CarouselState;

use crate::app::App;
use crate::theme::Theme;

use super::truncate_str;

pub struct BannerWidget;

impl BannerWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        let theme = &app.theme;

        let title = match app.banner.state() {
            CarouselState::Paused => " Featured (paused) ",
            _ => " Featured ",
        };
        let border_style = if app.hover.banner {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(banner) = app.banner.current_item() else {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                "No banners",
                Style::default().fg(theme.grey1),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(placeholder, inner);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        // Fade the incoming slide in from the background
        let fade = app.banner_fade(now);
        let headline_color = Theme::blend(theme.bg0, theme.fg1, fade);
        let detail_color = Theme::blend(theme.bg0, theme.grey2, fade);
        let link_color = Theme::blend(theme.bg0, theme.link, fade);

        let width = inner.width.saturating_sub(2) as usize;
        let headline = banner.headline.as_deref().unwrap_or(banner.id.as_str());

        let mut lines = Vec::new();
        let top_padding = chunks[0].height.saturating_sub(3) / 2;
        for _ in 0..top_padding {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            truncate_str(headline, width),
            Style::default()
                .fg(headline_color)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            truncate_str(&banner.image_url, width),
            Style::default().fg(detail_color),
        )));
        if let Some(link) = &banner.link {
            lines.push(Line::from(Span::styled(
                truncate_str(link, width),
                Style::default()
                    .fg(link_color)
                    .add_modifier(Modifier::UNDERLINED),
            )));
        }

        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(Self::dots(app, theme)).alignment(Alignment::Center),
            chunks[1],
        );
    }

    /// One dot per slide, the current one highlighted
    fn dots<'a>(app: &App, theme: &Theme) -> Line<'a> {
        let current = app.banner.current();
        let spans: Vec<Span> = (0..app.banner.items().len())
            .map(|i| {
                if i == current {
                    Span::styled("● ", Style::default().fg(theme.accent))
                } else {
                    Span::styled("○ ", Style::default().fg(theme.grey0))
                }
            })
            .collect();
        Line::from(spans)
    }
}
