use crossterm::event::KeyCode;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{
    Choice, EventRecord, Formation, InteractionLevel, InteractiveMoment, MusicMoment,
    RepertoireType, ShowDuration, Volume,
};
use crate::wizard::{flag_update, text_update, Action, FieldId, FieldKind, FieldUpdate, Step};

/// Columns taken by the indent before every value line.
const VALUE_INDENT: &str = "    ";

/// Focus tracking for the fields of the active step.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct StepForm {
    /// Index into `Step::fields()`.
    pub(crate) focus: usize,
    /// Highlighted option inside a multi-choice field.
    pub(crate) option: usize,
}

/// What a key press means for the focused field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldInput {
    Apply(Action),
    FocusNext,
    Ignored,
}

impl StepForm {
    /// Start at the top of a freshly opened step.
    pub(crate) fn reset(&mut self) {
        self.focus = 0;
        self.option = 0;
    }

    pub(crate) fn focused_field(&self, step: Step) -> FieldId {
        let fields = step.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub(crate) fn focus_next(&mut self, step: Step) {
        let len = step.fields().len();
        self.focus = (self.focus + 1) % len;
        self.option = 0;
    }

    pub(crate) fn focus_previous(&mut self, step: Step) {
        let len = step.fields().len();
        self.focus = (self.focus + len - 1) % len;
        self.option = 0;
    }

    /// Translate a key press on the focused field into an action. Nothing is
    /// rejected: any printable character goes into a text field as typed.
    pub(crate) fn handle_key(
        &mut self,
        record: &EventRecord,
        step: Step,
        code: KeyCode,
    ) -> FieldInput {
        let field = self.focused_field(step);
        match field.kind() {
            kind if kind.is_text() => edit_text(record, field, kind, code),
            FieldKind::Choice | FieldKind::Exclusive => match code {
                KeyCode::Right | KeyCode::Char(' ') => cycle(record, field, 1),
                KeyCode::Left => cycle(record, field, -1),
                KeyCode::Enter => FieldInput::FocusNext,
                _ => FieldInput::Ignored,
            },
            FieldKind::MultiChoice => {
                let count = option_labels(field).len();
                match code {
                    KeyCode::Right => {
                        self.option = (self.option + 1) % count;
                        FieldInput::Ignored
                    }
                    KeyCode::Left => {
                        self.option = (self.option + count - 1) % count;
                        FieldInput::Ignored
                    }
                    KeyCode::Char(' ') | KeyCode::Enter => toggle_option(field, self.option),
                    _ => FieldInput::Ignored,
                }
            }
            FieldKind::Flag => match code {
                KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Left | KeyCode::Right => {
                    let current = record.flag(field).unwrap_or(false);
                    flag_update(field, !current)
                        .map(|update| FieldInput::Apply(Action::Update(update)))
                        .unwrap_or(FieldInput::Ignored)
                }
                _ => FieldInput::Ignored,
            },
            _ => FieldInput::Ignored,
        }
    }
}

fn edit_text(record: &EventRecord, field: FieldId, kind: FieldKind, code: KeyCode) -> FieldInput {
    let mut value = record.text(field).unwrap_or_default().to_string();
    match code {
        KeyCode::Char(ch) if !ch.is_control() => value.push(ch),
        KeyCode::Backspace => {
            if value.pop().is_none() {
                return FieldInput::Ignored;
            }
        }
        KeyCode::Enter if kind.is_multiline() => value.push('\n'),
        KeyCode::Enter => return FieldInput::FocusNext,
        _ => return FieldInput::Ignored,
    }
    text_update(field, value)
        .map(|update| FieldInput::Apply(Action::Update(update)))
        .unwrap_or(FieldInput::Ignored)
}

/// Step through an optional choice as `None, A, B, ...` and an exclusive one
/// as `A, B, ...`, wrapping at both ends.
fn step_optional<C: Choice>(current: Option<C>, delta: isize) -> Option<C> {
    let len = C::ALL.len() as isize + 1;
    let position = current.map(|c| c.index() as isize + 1).unwrap_or(0);
    let next = (position + delta).rem_euclid(len);
    if next == 0 {
        None
    } else {
        Some(C::ALL[next as usize - 1])
    }
}

fn step_exclusive<C: Choice>(current: C, delta: isize) -> C {
    let len = C::ALL.len() as isize;
    let next = (current.index() as isize + delta).rem_euclid(len);
    C::ALL[next as usize]
}

fn cycle(record: &EventRecord, field: FieldId, delta: isize) -> FieldInput {
    let update = match field {
        FieldId::Formation => FieldUpdate::Formation(step_optional(record.formation, delta)),
        FieldId::ShowDuration => {
            FieldUpdate::ShowDuration(step_optional(record.show_duration, delta))
        }
        FieldId::RepertoireType => {
            FieldUpdate::RepertoireType(step_exclusive(record.repertoire_type, delta))
        }
        FieldId::ExpectedInteraction => {
            FieldUpdate::ExpectedInteraction(step_exclusive(record.expected_interaction, delta))
        }
        FieldId::Volume => FieldUpdate::Volume(step_exclusive(record.volume, delta)),
        _ => return FieldInput::Ignored,
    };
    FieldInput::Apply(Action::Update(update))
}

fn toggle_option(field: FieldId, option: usize) -> FieldInput {
    match field {
        FieldId::MusicMoments => MusicMoment::ALL
            .get(option)
            .map(|m| FieldInput::Apply(Action::ToggleMusicMoment(*m)))
            .unwrap_or(FieldInput::Ignored),
        FieldId::InteractiveMoments => InteractiveMoment::ALL
            .get(option)
            .map(|m| FieldInput::Apply(Action::ToggleInteractiveMoment(*m)))
            .unwrap_or(FieldInput::Ignored),
        _ => FieldInput::Ignored,
    }
}

fn labels_of<C: Choice>() -> Vec<&'static str> {
    C::ALL.iter().map(|c| c.label()).collect()
}

fn option_labels(field: FieldId) -> Vec<&'static str> {
    match field {
        FieldId::Formation => labels_of::<Formation>(),
        FieldId::ShowDuration => labels_of::<ShowDuration>(),
        FieldId::RepertoireType => labels_of::<RepertoireType>(),
        FieldId::ExpectedInteraction => labels_of::<InteractionLevel>(),
        FieldId::Volume => labels_of::<Volume>(),
        FieldId::MusicMoments => labels_of::<MusicMoment>(),
        FieldId::InteractiveMoments => labels_of::<InteractiveMoment>(),
        _ => Vec::new(),
    }
}

/// Label of the selected option, if any, for single-choice fields.
fn selected_label(record: &EventRecord, field: FieldId) -> Option<&'static str> {
    match field {
        FieldId::Formation => record.formation.map(Choice::label),
        FieldId::ShowDuration => record.show_duration.map(Choice::label),
        FieldId::RepertoireType => Some(record.repertoire_type.label()),
        FieldId::ExpectedInteraction => Some(record.expected_interaction.label()),
        FieldId::Volume => Some(record.volume.label()),
        _ => None,
    }
}

fn is_checked(record: &EventRecord, field: FieldId, index: usize) -> bool {
    match field {
        FieldId::MusicMoments => MusicMoment::ALL
            .get(index)
            .is_some_and(|m| record.music_moments.contains(m)),
        FieldId::InteractiveMoments => InteractiveMoment::ALL
            .get(index)
            .is_some_and(|m| record.interactive_moments.contains(m)),
        _ => false,
    }
}

/// Rendered lines of one field plus where the text cursor belongs, relative
/// to the first line.
pub(crate) struct FieldView {
    pub(crate) lines: Vec<Line<'static>>,
    pub(crate) cursor: Option<(u16, u16)>,
}

pub(crate) fn render_field(
    record: &EventRecord,
    field: FieldId,
    focused: bool,
    option_cursor: usize,
) -> FieldView {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if focused { "▶ " } else { "  " };
    let mut lines = vec![Line::from(vec![
        Span::styled(marker, label_style),
        Span::styled(field.label(), label_style),
    ])];
    let mut cursor = None;

    let kind = field.kind();
    if kind.is_text() {
        let value = record.text(field).unwrap_or_default();
        if value.is_empty() {
            lines.push(Line::from(vec![
                Span::raw(VALUE_INDENT),
                Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray)),
            ]));
            if focused {
                cursor = Some((1, VALUE_INDENT.len() as u16));
            }
        } else {
            let value_style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let value_lines: Vec<&str> = value.split('\n').collect();
            for (idx, text) in value_lines.iter().enumerate() {
                let prefix = if kind == FieldKind::Setlist && !text.trim().is_empty() {
                    format!("{:>2}. ", song_number(&value_lines[..=idx]))
                } else {
                    VALUE_INDENT.to_string()
                };
                lines.push(Line::from(vec![
                    Span::styled(prefix, Style::default().fg(Color::DarkGray)),
                    Span::styled(text.to_string(), value_style),
                ]));
            }
            if focused {
                let last = value_lines.last().copied().unwrap_or_default();
                let row = value_lines.len() as u16;
                let col = VALUE_INDENT.len() + last.chars().count();
                cursor = Some((row, col as u16));
            }
        }
    } else if kind == FieldKind::Flag {
        let checked = record.flag(field).unwrap_or(false);
        let text = if checked { "[x] Sim" } else { "[ ] Não" };
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw(VALUE_INDENT),
            Span::styled(text, style),
        ]));
    } else {
        let selected = selected_label(record, field);
        let mut spans = vec![Span::raw(VALUE_INDENT)];
        for (idx, option) in option_labels(field).into_iter().enumerate() {
            let (mark, on) = if kind == FieldKind::MultiChoice {
                let on = is_checked(record, field, idx);
                (if on { "[x] " } else { "[ ] " }, on)
            } else {
                let on = selected == Some(option);
                (if on { "(•) " } else { "( ) " }, on)
            };
            let mut style = if on {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            if focused && kind == FieldKind::MultiChoice && idx == option_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!("{mark}{option}"), style));
            spans.push(Span::raw("  "));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    FieldView { lines, cursor }
}

/// Number shown next to a setlist line: blank lines are not counted, which
/// keeps the numbering in step with the proposal.
fn song_number(lines_so_far: &[&str]) -> usize {
    lines_so_far
        .iter()
        .filter(|line| !line.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Session;

    fn press(session: &mut Session, form: &mut StepForm, code: KeyCode) {
        if let FieldInput::Apply(action) = form.handle_key(session.record(), session.step(), code)
        {
            session.apply(action);
        }
    }

    #[test]
    fn typing_fills_the_focused_text_field() {
        let mut session = Session::new();
        let mut form = StepForm::default();
        for ch in "Ana".chars() {
            press(&mut session, &mut form, KeyCode::Char(ch));
        }
        press(&mut session, &mut form, KeyCode::Backspace);
        assert_eq!(session.record().host_name, "An");
    }

    #[test]
    fn guest_count_accepts_any_text() {
        let mut session = Session::new();
        let mut form = StepForm {
            focus: 4,
            option: 0,
        };
        assert_eq!(form.focused_field(Step::General), FieldId::GuestCount);
        press(&mut session, &mut form, KeyCode::Char('~'));
        assert_eq!(session.record().guest_count, "~");
    }

    #[test]
    fn enter_moves_focus_on_single_line_fields() {
        let session = Session::new();
        let mut form = StepForm::default();
        assert_eq!(
            form.handle_key(session.record(), Step::General, KeyCode::Enter),
            FieldInput::FocusNext
        );
    }

    #[test]
    fn optional_choice_cycles_through_unset() {
        assert_eq!(step_optional::<Formation>(None, 1), Some(Formation::VozEViolao));
        assert_eq!(step_optional(Some(Formation::BandaCompleta), 1), None);
        assert_eq!(step_optional::<Formation>(None, -1), Some(Formation::BandaCompleta));
        assert_eq!(
            step_exclusive(RepertoireType::ShowEspecial, 1),
            RepertoireType::ShowNormal
        );
    }

    #[test]
    fn multi_choice_toggles_option_under_cursor() {
        let mut session = Session::new();
        session.apply(Action::Advance);
        let mut form = StepForm::default();
        assert_eq!(form.focused_field(Step::Structure), FieldId::MusicMoments);

        press(&mut session, &mut form, KeyCode::Right);
        press(&mut session, &mut form, KeyCode::Right);
        press(&mut session, &mut form, KeyCode::Char(' '));
        assert_eq!(session.record().music_moments, vec![MusicMoment::Festa]);
        press(&mut session, &mut form, KeyCode::Char(' '));
        assert!(session.record().music_moments.is_empty());
    }

    #[test]
    fn focus_wraps_around_the_step() {
        let mut form = StepForm::default();
        form.focus_previous(Step::Structure);
        assert_eq!(form.focused_field(Step::Structure), FieldId::RepertoireType);
        form.focus_next(Step::Structure);
        assert_eq!(form.focused_field(Step::Structure), FieldId::MusicMoments);
    }

    #[test]
    fn setlist_lines_are_numbered_like_the_proposal() {
        let record = EventRecord::default()
            .with_update(FieldUpdate::SuggestedSetlist("A\n\nB".into()));
        let view = render_field(&record, FieldId::SuggestedSetlist, true, 0);
        let text: Vec<String> = view
            .lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text[1], " 1. A");
        assert_eq!(text[3], " 2. B");
        assert_eq!(view.cursor, Some((3, 5)));
    }
}
