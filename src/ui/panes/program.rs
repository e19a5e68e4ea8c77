//! Program pane rendering: last decoded programs and the iteration outcome

use super::pane_block;
use crate::interpreter::engine::{StepOutcome, StepReport};
use crate::interpreter::pattern::Pattern;
use crate::interpreter::template::Template;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Padding, Paragraph, Wrap},
    Frame,
};

/// Data needed to render the program pane
pub struct ProgramRenderData<'a> {
    pub pattern: &'a Pattern,
    pub template: &'a Template,
    pub report: Option<&'a StepReport>,
}

/// Render the program pane
pub fn render_program_pane(
    frame: &mut Frame,
    area: Rect,
    data: &ProgramRenderData<'_>,
    is_focused: bool,
) {
    let block = pane_block(" Program ".to_string(), is_focused).padding(Padding::new(1, 1, 0, 0));

    let Some(report) = data.report else {
        let paragraph = Paragraph::new("(no iteration yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let label = Style::default()
        .fg(DEFAULT_THEME.primary)
        .add_modifier(Modifier::BOLD);
    let body = Style::default().fg(DEFAULT_THEME.fg);
    let outcome_style = match report.outcome {
        StepOutcome::Rewritten { .. } => Style::default().fg(DEFAULT_THEME.success),
        StepOutcome::Aborted(_) => Style::default().fg(DEFAULT_THEME.error),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("iteration ", label),
            Span::styled(report.iteration.to_string(), body),
            Span::styled(
                format!("  (read {}, echoed {})", report.read, report.echoed),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ]),
        Line::from(vec![
            Span::styled("pattern   ", label),
            Span::styled(data.pattern.to_string(), body),
        ]),
        Line::from(vec![
            Span::styled("template  ", label),
            Span::styled(data.template.to_string(), body),
        ]),
        Line::from(vec![
            Span::styled("outcome   ", label),
            Span::styled(report.outcome.to_string(), outcome_style),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
