use std::fmt;

use chrono::NaiveDate;

use crate::models::{Choice, EventRecord};

/// Shown when event type is blank.
pub const EVENT_FALLBACK: &str = "Evento";
/// Shown when date or location is blank.
pub const UNDECIDED: &str = "A definir";
/// Shown for optional choices nobody picked.
pub const NOT_CHOSEN: &str = "-";
/// Single token rendered instead of an empty moments list.
pub const NO_MOMENTS: &str = "Nenhum selecionado";

const KICKER: &str = "Proposta Exclusiva";
const TITLE: &str = "Planejamento Musical";
const FOOTER: &str = "Transformando eventos em experiências.";

/// How dates are printed. Passed in explicitly so building a proposal never
/// depends on the machine's locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateStyle {
    input_format: String,
    output_format: String,
}

impl Default for DateStyle {
    /// Brazilian day/month/year.
    fn default() -> Self {
        Self::new("%Y-%m-%d", "%d/%m/%Y")
    }
}

impl DateStyle {
    pub fn new(input_format: impl Into<String>, output_format: impl Into<String>) -> Self {
        Self {
            input_format: input_format.into(),
            output_format: output_format.into(),
        }
    }

    /// Format a stored date. Text that does not match the input format is
    /// returned unchanged rather than dropped.
    pub fn format(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        match NaiveDate::parse_from_str(trimmed, &self.input_format) {
            Ok(date) => date.format(&self.output_format).to_string(),
            Err(_) => trimmed.to_string(),
        }
    }
}

/// Read-only proposal assembled from a finished record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalDocument {
    pub header: Header,
    pub summary: [LabeledValue; 3],
    pub concept: Option<String>,
    pub format_show: DetailGroup,
    pub vibe: DetailGroup,
    pub profile: ProfileGroup,
    pub moments: Moments,
    pub setlist: Option<Vec<SetlistEntry>>,
    pub footer: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub kicker: &'static str,
    pub title: &'static str,
    /// "Preparado para ..." line, absent when the host is unknown.
    pub greeting: Option<String>,
    pub brand_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledValue {
    pub label: &'static str,
    pub value: String,
}

impl LabeledValue {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailGroup {
    pub title: &'static str,
    pub items: Vec<LabeledValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileGroup {
    pub title: &'static str,
    pub guests: LabeledValue,
    /// Client's do-not-play list, only when filled in.
    pub restrictions: Option<LabeledValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Moments {
    Tags(Vec<String>),
    NoneSelected,
}

impl Moments {
    pub const TITLE: &'static str = "Momentos";

    /// Tokens to print, falling back to the placeholder.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            Moments::Tags(tags) => tags.iter().map(String::as_str).collect(),
            Moments::NoneSelected => vec![NO_MOMENTS],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetlistEntry {
    /// 1-based.
    pub position: usize,
    pub title: String,
}

impl fmt::Display for SetlistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.position, self.title)
    }
}

impl ProposalDocument {
    pub const CONCEPT_TITLE: &'static str = "O Conceito";
    pub const SETLIST_TITLE: &'static str = "Setlist Sugerido";
}

/// Turn the record and its parsed setlist into a proposal. Pure: the same
/// inputs always give the same document.
pub fn build_proposal(
    record: &EventRecord,
    setlist: &[String],
    dates: &DateStyle,
    brand_line: &str,
) -> ProposalDocument {
    let header = Header {
        kicker: KICKER,
        title: TITLE,
        greeting: non_empty(&record.host_name).map(|host| format!("Preparado para {host}")),
        brand_line: brand_line.to_string(),
    };

    let date = if record.date.trim().is_empty() {
        UNDECIDED.to_string()
    } else {
        dates.format(&record.date)
    };

    let summary = [
        LabeledValue::new("Evento", or_fallback(&record.event_type, EVENT_FALLBACK)),
        LabeledValue::new("Data", date),
        LabeledValue::new("Local", or_fallback(&record.location, UNDECIDED)),
    ];

    let format_show = DetailGroup {
        title: "Formato & Show",
        items: vec![
            LabeledValue::new("Formação", choice_or_dash(record.formation)),
            LabeledValue::new("Duração", choice_or_dash(record.show_duration)),
            LabeledValue::new("Repertório", record.repertoire_type.label()),
        ],
    };

    let vibe = DetailGroup {
        title: "Vibe & Interação",
        items: vec![
            LabeledValue::new("Nível", record.expected_interaction.label()),
            LabeledValue::new("Figurino", record.attire.clone()),
            LabeledValue::new("Volume", record.volume.label()),
        ],
    };

    let profile = ProfileGroup {
        title: "Perfil",
        guests: LabeledValue::new(
            "Convidados",
            format!(
                "{} pessoas • {}",
                or_fallback(&record.guest_count, "0"),
                or_fallback(&record.guest_profile, "Geral")
            ),
        ),
        restrictions: non_empty(&record.do_not_play)
            .map(|text| LabeledValue::new("Restrições Musicais", text)),
    };

    let moments = if record.music_moments.is_empty() {
        Moments::NoneSelected
    } else {
        Moments::Tags(
            record
                .music_moments
                .iter()
                .map(|moment| moment.label().to_string())
                .collect(),
        )
    };

    let setlist = if setlist.is_empty() {
        None
    } else {
        Some(
            setlist
                .iter()
                .enumerate()
                .map(|(idx, title)| SetlistEntry {
                    position: idx + 1,
                    title: title.clone(),
                })
                .collect(),
        )
    };

    ProposalDocument {
        header,
        summary,
        concept: non_empty(&record.concept_summary).map(str::to_string),
        format_show,
        vibe,
        profile,
        moments,
        setlist,
        footer: FOOTER,
    }
}

/// Blank means empty for display purposes: a field holding only spaces would
/// otherwise print as an empty line.
fn non_empty(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    non_empty(value).unwrap_or(fallback).to_string()
}

fn choice_or_dash<C: Choice>(value: Option<C>) -> &'static str {
    value.map(Choice::label).unwrap_or(NOT_CHOSEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Formation, MusicMoment};
    use crate::proposal::parse_setlist;
    use crate::wizard::FieldUpdate;

    fn build(record: &EventRecord) -> ProposalDocument {
        let setlist = parse_setlist(&record.suggested_setlist);
        build_proposal(record, &setlist, &DateStyle::default(), "Banda Teste")
    }

    #[test]
    fn default_record_uses_every_fallback() {
        let doc = build(&EventRecord::default());

        assert_eq!(doc.header.greeting, None);
        assert_eq!(doc.summary[0].value, "Evento");
        assert_eq!(doc.summary[1].value, "A definir");
        assert_eq!(doc.summary[2].value, "A definir");
        assert_eq!(doc.concept, None);
        assert_eq!(doc.moments, Moments::NoneSelected);
        assert_eq!(doc.moments.tokens(), vec![NO_MOMENTS]);
        assert_eq!(doc.setlist, None);
        assert_eq!(doc.format_show.items[0].value, "-");
        assert_eq!(doc.format_show.items[1].value, "-");
        assert_eq!(doc.format_show.items[2].value, "Show Normal");
        assert_eq!(doc.profile.guests.value, "0 pessoas • Geral");
        assert_eq!(doc.profile.restrictions, None);
    }

    #[test]
    fn filled_record_personalises_the_proposal() {
        let record = EventRecord::default()
            .with_update(FieldUpdate::HostName("Ana".into()))
            .with_update(FieldUpdate::ConceptSummary("Elegant set".into()))
            .with_update(FieldUpdate::SuggestedSetlist("Song A\nSong B".into()));
        let doc = build(&record);

        let greeting = doc.header.greeting.as_deref().unwrap();
        assert!(greeting.contains("Ana"));
        assert_eq!(doc.concept.as_deref(), Some("Elegant set"));

        let entries: Vec<String> = doc
            .setlist
            .as_ref()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(entries, vec!["1. Song A", "2. Song B"]);
    }

    #[test]
    fn dates_are_formatted_day_first() {
        let record = EventRecord::default().with_update(FieldUpdate::Date("2025-11-08".into()));
        assert_eq!(build(&record).summary[1].value, "08/11/2025");

        let typed = EventRecord::default().with_update(FieldUpdate::Date("sábado".into()));
        assert_eq!(build(&typed).summary[1].value, "sábado");
    }

    #[test]
    fn groups_show_selected_values() {
        let record = EventRecord::default()
            .with_update(FieldUpdate::Formation(Some(Formation::Duo)))
            .with_update(FieldUpdate::GuestCount("120".into()))
            .with_update(FieldUpdate::GuestProfile("Jovens".into()))
            .with_update(FieldUpdate::DoNotPlay("Sertanejo".into()))
            .with_update(FieldUpdate::MusicMoments(vec![
                MusicMoment::Festa,
                MusicMoment::Cerimonia,
            ]));
        let doc = build(&record);

        assert_eq!(doc.format_show.items[0].value, "Duo");
        assert_eq!(doc.profile.guests.value, "120 pessoas • Jovens");
        assert_eq!(
            doc.profile.restrictions.as_ref().map(|r| r.value.as_str()),
            Some("Sertanejo")
        );
        assert_eq!(doc.moments.tokens(), vec!["Festa", "Cerimônia"]);
    }

    #[test]
    fn building_twice_gives_the_same_document() {
        let record = EventRecord::default().with_update(FieldUpdate::Location("Recife".into()));
        assert_eq!(build(&record), build(&record));
    }
}
