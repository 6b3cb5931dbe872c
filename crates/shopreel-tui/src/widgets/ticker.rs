use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};
use shopreel_core::carousel::CarouselState;
use shopreel_core::catalog::CatalogItem;

use crate::app::App;
use crate::theme::Theme;

use super::truncate_str;

/// Horizontal strip of item cards translated by the eased carousel offset
pub struct TickerWidget;

impl TickerWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let title = if app.ticker.state() == CarouselState::Paused {
            " New arrivals (paused) "
        } else {
            " New arrivals "
        };
        let border_style = if app.hover.ticker {
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

        let strip = app.ticker.extended_items();
        if strip.is_empty() || inner.width == 0 || inner.height == 0 {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                "No items yet",
                Style::default().fg(theme.grey1),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(placeholder, inner);
            return;
        }

        let visible = app.ticker.visible_count().max(1) as u16;
        let card_width = (inner.width / visible).max(1);
        let viewport_width = (card_width * visible).min(inner.width);
        let offset = strip_offset(app.slide.current(), viewport_width);
        let show_prices = app.config.ui.show_prices;

        for (i, item) in strip.iter().enumerate() {
            let left = i as i64 * card_width as i64 - offset;
            if left + card_width as i64 <= 0 || left >= viewport_width as i64 {
                continue;
            }
            let card = render_card(item, card_width, inner.height, theme, show_prices);
            blit(frame.buffer_mut(), &card, inner, left, viewport_width);
        }
    }
}

/// Columns the strip is shifted left by for an offset in percent of the viewport
pub(crate) fn strip_offset(offset_percent: f64, viewport_width: u16) -> i64 {
    (offset_percent / 100.0 * viewport_width as f64).round() as i64
}

/// Draw a single card into its own buffer so it can be clipped at the viewport edges
fn render_card(item: &CatalogItem, width: u16, height: u16, theme: &Theme, show_prices: bool) -> Buffer {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.grey0))
        .style(Style::default().bg(theme.bg1));
    let inner = block.inner(area);
    block.render(area, &mut buf);

    let text_width = inner.width as usize;
    let mut lines = vec![Line::from(Span::styled(
        truncate_str(&item.name, text_width),
        Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
    ))];
    if let Some(vendor) = &item.vendor {
        lines.push(Line::from(Span::styled(
            truncate_str(vendor, text_width),
            Style::default().fg(theme.vendor),
        )));
    }
    if show_prices {
        if let Some(price) = item.display_price() {
            lines.push(Line::from(Span::styled(
                price,
                Style::default().fg(theme.price).add_modifier(Modifier::BOLD),
            )));
        }
    }
    if let Some(listed_at) = item.listed_at {
        lines.push(Line::from(Span::styled(
            listed_at.format("%b %d %H:%M").to_string(),
            Style::default().fg(theme.grey1),
        )));
    }

    Paragraph::new(lines).render(inner, &mut buf);
    buf
}

/// Copy the part of `card` that falls inside `[0, viewport_width)` once its left edge sits at `left`
fn blit(dst: &mut Buffer, card: &Buffer, viewport: Rect, left: i64, viewport_width: u16) {
    let height = card.area.height.min(viewport.height);
    for cx in 0..card.area.width {
        let x = left + cx as i64;
        if x < 0 || x >= viewport_width as i64 {
            continue;
        }
        for cy in 0..height {
            dst[(viewport.x + x as u16, viewport.y + cy)] = card[(cx, cy)].clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(symbol: &str, width: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, 1));
        for x in 0..width {
            buf[(x, 0)].set_symbol(symbol);
        }
        buf
    }

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_strip_offset() {
        assert_eq!(strip_offset(0.0, 80), 0);
        assert_eq!(strip_offset(100.0, 80), 80);
        assert_eq!(strip_offset(125.0, 80), 100);
        assert_eq!(strip_offset(112.5, 80), 90);
    }

    #[test]
    fn test_blit_clips_left_edge() {
        let viewport = Rect::new(0, 0, 6, 1);
        let mut dst = Buffer::empty(viewport);
        blit(&mut dst, &card("a", 4), viewport, -2, 6);
        assert_eq!(row(&dst), "aa    ");
    }

    #[test]
    fn test_blit_clips_right_edge() {
        let viewport = Rect::new(0, 0, 6, 1);
        let mut dst = Buffer::empty(viewport);
        blit(&mut dst, &card("b", 4), viewport, 4, 6);
        assert_eq!(row(&dst), "    bb");
    }

    #[test]
    fn test_blit_respects_viewport_origin() {
        let area = Rect::new(0, 0, 8, 1);
        let mut dst = Buffer::empty(area);
        let viewport = Rect::new(2, 0, 4, 1);
        blit(&mut dst, &card("c", 3), viewport, 2, 4);
        assert_eq!(row(&dst), "    cc  ");
    }
}
