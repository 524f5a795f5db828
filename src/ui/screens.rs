use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::proposal::{DetailGroup, Moments, ProposalDocument};

/// How the proposal is dressed. Both treatments carry the same text in the
/// same order; print drops colour so it copies cleanly onto paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Treatment {
    Screen,
    Print,
}

impl Treatment {
    pub(crate) fn title(self) -> &'static str {
        match self {
            Treatment::Screen => "Proposta • Tela",
            Treatment::Print => "Proposta • Impressão",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Treatment::Screen => Treatment::Print,
            Treatment::Print => Treatment::Screen,
        }
    }
}

/// Visual role of a run of text. Mapped to a style per treatment.
#[derive(Debug, Clone, Copy)]
enum Role {
    Kicker,
    Title,
    Heading,
    Label,
    Body,
    Quote,
    Tag,
    Muted,
}

impl Role {
    fn style(self, treatment: Treatment) -> Style {
        if treatment == Treatment::Print {
            return match self {
                Role::Title | Role::Heading => Style::default().add_modifier(Modifier::BOLD),
                _ => Style::default(),
            };
        }
        match self {
            Role::Kicker => Style::default().fg(Color::Magenta),
            Role::Title => Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            Role::Heading => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Role::Label => Style::default().fg(Color::Gray),
            Role::Body => Style::default(),
            Role::Quote => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
            Role::Tag => Style::default().fg(Color::Magenta),
            Role::Muted => Style::default().fg(Color::DarkGray),
        }
    }
}

/// The presenting view: a finished proposal plus how it is being shown.
pub(crate) struct ProposalScreen {
    pub(crate) document: ProposalDocument,
    pub(crate) treatment: Treatment,
    pub(crate) scroll: u16,
}

impl ProposalScreen {
    pub(crate) fn new(document: ProposalDocument) -> Self {
        Self {
            document,
            treatment: Treatment::Screen,
            scroll: 0,
        }
    }

    /// Swap in a rebuilt document, keeping treatment and scroll position.
    pub(crate) fn refresh(&mut self, document: ProposalDocument) {
        self.document = document;
    }

    pub(crate) fn toggle_treatment(&mut self) {
        self.treatment = self.treatment.toggled();
    }

    pub(crate) fn scroll_by(&mut self, delta: i32) {
        let max = self.lines().len().saturating_sub(1) as i32;
        let next = (self.scroll as i32 + delta).clamp(0, max);
        self.scroll = next as u16;
    }

    /// Styled lines for the current treatment. Joined with newlines their
    /// text is exactly what the plain-text export writes.
    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        let doc = &self.document;
        let t = self.treatment;
        let mut lines = Vec::new();

        lines.push(single(doc.header.kicker.to_uppercase(), Role::Kicker, t));
        lines.push(single(doc.header.title.to_string(), Role::Title, t));
        if let Some(greeting) = &doc.header.greeting {
            lines.push(single(greeting.clone(), Role::Body, t));
        }
        lines.push(single(doc.header.brand_line.clone(), Role::Muted, t));
        lines.push(Line::from(""));

        for item in &doc.summary {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", item.label), Role::Label.style(t)),
                Span::styled(item.value.clone(), Role::Title.style(t)),
            ]));
        }

        if let Some(concept) = &doc.concept {
            lines.push(Line::from(""));
            lines.push(single(
                ProposalDocument::CONCEPT_TITLE.to_string(),
                Role::Heading,
                t,
            ));
            lines.extend(multiline(&format!("\"{concept}\""), Role::Quote, t));
        }

        push_group(&mut lines, &doc.format_show, t);
        push_group(&mut lines, &doc.vibe, t);

        lines.push(Line::from(""));
        lines.push(single(doc.profile.title.to_uppercase(), Role::Heading, t));
        lines.extend(labeled(doc.profile.guests.label, &doc.profile.guests.value, t));
        if let Some(restrictions) = &doc.profile.restrictions {
            lines.extend(labeled(restrictions.label, &restrictions.value, t));
        }

        lines.push(Line::from(""));
        lines.push(single(Moments::TITLE.to_uppercase(), Role::Heading, t));
        let tag_role = match doc.moments {
            Moments::Tags(_) => Role::Tag,
            Moments::NoneSelected => Role::Muted,
        };
        let mut spans = vec![Span::raw("  ")];
        for (idx, token) in doc.moments.tokens().into_iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled(" · ", Role::Muted.style(t)));
            }
            spans.push(Span::styled(token.to_string(), tag_role.style(t)));
        }
        lines.push(Line::from(spans));

        if let Some(entries) = &doc.setlist {
            lines.push(Line::from(""));
            lines.push(single(
                ProposalDocument::SETLIST_TITLE.to_string(),
                Role::Heading,
                t,
            ));
            for entry in entries {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("{}. ", entry.position), Role::Muted.style(t)),
                    Span::styled(entry.title.clone(), Role::Body.style(t)),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines.push(single(doc.footer.to_string(), Role::Muted, t));
        lines
    }
}

fn single(text: String, role: Role, treatment: Treatment) -> Line<'static> {
    Line::from(Span::styled(text, role.style(treatment)))
}

/// One line per `\n` in `text`. A single span never breaks, so multi-line
/// values would otherwise run together on screen.
fn multiline(text: &str, role: Role, treatment: Treatment) -> Vec<Line<'static>> {
    text.split('\n')
        .map(|part| single(part.to_string(), role, treatment))
        .collect()
}

/// `  label: value`, with continuation lines of a multi-line value printed
/// flush left the way the export writes them.
fn labeled(label: &str, value: &str, treatment: Treatment) -> Vec<Line<'static>> {
    let mut parts = value.split('\n');
    let first = parts.next().unwrap_or_default();
    let mut lines = vec![Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{label}: "), Role::Label.style(treatment)),
        Span::styled(first.to_string(), Role::Body.style(treatment)),
    ])];
    lines.extend(parts.map(|part| single(part.to_string(), Role::Body, treatment)));
    lines
}

fn push_group(lines: &mut Vec<Line<'static>>, group: &DetailGroup, treatment: Treatment) {
    lines.push(Line::from(""));
    lines.push(single(group.title.to_uppercase(), Role::Heading, treatment));
    for item in &group.items {
        lines.extend(labeled(item.label, &item.value, treatment));
    }
}
