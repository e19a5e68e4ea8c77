//! Output stream pane rendering

use super::pane_block;
use crate::interpreter::constants::ECHO_WIDTH;
use crate::memory::symbol::{render, Symbol};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};
use std::collections::VecDeque;

/// Split the retained output tail into whole echo commands
///
/// `written` is the total stream length; symbols before the first command
/// boundary inside the tail are dropped.
pub fn echo_lines(recent: &VecDeque<Symbol>, written: usize) -> Vec<String> {
    let dropped = written - recent.len();
    let skip = (ECHO_WIDTH - dropped % ECHO_WIDTH) % ECHO_WIDTH;
    let symbols: Vec<Symbol> = recent.iter().skip(skip).copied().collect();
    symbols.chunks(ECHO_WIDTH).map(render).collect()
}

/// Render the output pane
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    recent: &VecDeque<Symbol>,
    written: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(format!(" Output ({} symbols) ", written), is_focused);

    let lines = echo_lines(recent, written);

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
    } else {
        let block = block.padding(Padding::new(1, 0, 0, 0));
        let total_items = lines.len();
        let visible_height = area.height.saturating_sub(2).max(1) as usize;

        // Clamp scroll offset only if content exceeds visible area
        if total_items > visible_height {
            let max_scroll = total_items - visible_height;
            *scroll_offset = (*scroll_offset).min(max_scroll);
        } else {
            *scroll_offset = 0;
        }

        let visible_items: Vec<ListItem> = lines
            .into_iter()
            .skip(*scroll_offset)
            .take(visible_height)
            .map(|line| ListItem::new(line).style(Style::default().fg(DEFAULT_THEME.fg)))
            .collect();

        let list = List::new(visible_items).block(block);
        frame.render_widget(list, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_lines_group_by_command() {
        let recent: VecDeque<Symbol> = [Symbol::I; 7].into_iter().chain([Symbol::P; 7]).collect();
        assert_eq!(echo_lines(&recent, 14), vec!["IIIIIII", "PPPPPPP"]);
    }

    #[test]
    fn test_echo_lines_realign_trimmed_tail() {
        // 3 symbols of the first command fell out of the tail
        let recent: VecDeque<Symbol> = [Symbol::C; 4].into_iter().chain([Symbol::F; 7]).collect();
        assert_eq!(echo_lines(&recent, 14), vec!["FFFFFFF"]);
    }
}
