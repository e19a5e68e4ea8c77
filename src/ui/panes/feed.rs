//! Feed pane rendering
//!
//! Shows as much of the feed front as fits in the pane, wrapped by width. The
//! symbols the last pattern read are gone by now, so the first cell is always
//! where the next iteration starts decoding.

use super::pane_block;
use crate::memory::feed::Feed;
use crate::memory::symbol::Symbol;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Padding, Paragraph},
    Frame,
};

fn symbol_span(symbol: Symbol) -> Span<'static> {
    Span::styled(
        symbol.as_char().to_string(),
        Style::default().fg(DEFAULT_THEME.symbol(symbol)),
    )
}

/// Split `symbols` into rows of `width` styled cells
pub fn feed_rows(symbols: &[Symbol], width: usize) -> Vec<Line<'static>> {
    symbols
        .chunks(width.max(1))
        .map(|row| Line::from(row.iter().map(|&s| symbol_span(s)).collect::<Vec<_>>()))
        .collect()
}

/// Render the feed pane
pub fn render_feed_pane(frame: &mut Frame, area: Rect, feed: &Feed, is_focused: bool) {
    let title = format!(" Feed ({} symbols) ", feed.len());
    let block = pane_block(title, is_focused).padding(Padding::new(1, 1, 0, 0));

    if feed.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let width = area.width.saturating_sub(4).max(1) as usize;
    let height = area.height.saturating_sub(2).max(1) as usize;
    let preview = feed.preview(width * height);
    let paragraph = Paragraph::new(feed_rows(&preview, width)).block(block);
    frame.render_widget(paragraph, area);
}
