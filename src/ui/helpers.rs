use anyhow::Error;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::wizard::Step;

/// Numbered step chips, e.g. `(1) Dados Gerais ─ (2) Estrutura ...`, with the
/// active step highlighted and completed steps dimmed.
pub(crate) fn step_indicator(current: Step) -> Line<'static> {
    let mut spans = Vec::with_capacity(Step::ALL.len() * 2);
    for (idx, step) in Step::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" ─ ", Style::default().fg(Color::DarkGray)));
        }
        let style = if *step == current {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else if step.number() < current.number() {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("({}) {}", step.number(), step.title()),
            style,
        ));
    }
    Line::from(spans)
}

/// Footer key legend built from `(key, description)` pairs.
pub(crate) fn key_hints(hints: &[(&str, &str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (idx, (key, description)) in hints.iter().enumerate() {
        let gap = if idx + 1 == hints.len() { "" } else { "   " };
        spans.push(Span::styled(format!("[{key}]"), key_style));
        spans.push(Span::raw(format!(" {description}{gap}")));
    }
    Line::from(spans)
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
