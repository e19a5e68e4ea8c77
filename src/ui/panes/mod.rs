//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`feed`]: the front of the live feed, one colored cell per symbol
//! - [`program`]: the last decoded pattern and template with the match outcome
//! - [`output`]: echoed symbols, one echo command per line
//! - [`status`]: status bar with keybindings and run state
//!
//! Each pane module exports a primary `render_*` function that takes plain
//! data; panes never hold engine state.

pub mod feed;
pub mod output;
pub mod program;
pub mod status;

pub use feed::render_feed_pane;
pub use output::render_output_pane;
pub use program::render_program_pane;
pub use status::render_status_bar;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders};

/// Bordered pane block, highlighted when focused
pub(crate) fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}
