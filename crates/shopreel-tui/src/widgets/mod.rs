mod banner;
mod help;
mod status_bar;
mod ticker;

use unicode_width::UnicodeWidthChar;

pub use banner::BannerWidget;
pub use help::HelpWidget;
pub use status_bar::StatusBarWidget;
pub use ticker::TickerWidget;

/// Truncate a string to `max_width` terminal columns, ending in an ellipsis when cut
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
