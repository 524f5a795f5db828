//! Optional AI drafting of the concept summary and suggested setlist.
//!
//! The request is a read-only snapshot of the record. The call runs on its
//! own thread and hands back a [`Draft`] over a channel; whatever happens on
//! the way (no key, network down, garbage JSON) the caller receives a usable
//! draft, never an error.

mod error;
mod gemini;

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde_json::Value;

use crate::models::{Choice, EventRecord};

pub use error::DraftError;
pub use gemini::GeminiClient;

/// Summary used when the service fails or its reply cannot be used.
pub const FALLBACK_SUMMARY: &str = "Erro ao gerar proposta com IA. Verifique sua chave de API.";
/// Summary used when the service answers with nothing at all.
pub const EMPTY_REPLY_SUMMARY: &str = "Não foi possível gerar o conteúdo.";

/// Drafted content for the two target fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub summary: String,
    pub setlist: Vec<String>,
    /// Set when the content is a placeholder standing in for a failed request.
    pub failed: bool,
}

impl Draft {
    pub fn new(summary: impl Into<String>, setlist: Vec<String>) -> Self {
        Self {
            summary: summary.into(),
            setlist,
            failed: false,
        }
    }

    pub fn fallback() -> Self {
        Self {
            failed: true,
            ..Self::new(FALLBACK_SUMMARY, Vec::new())
        }
    }

    fn empty_reply() -> Self {
        Self {
            failed: true,
            ..Self::new(EMPTY_REPLY_SUMMARY, Vec::new())
        }
    }
}

/// Snapshot of the record fields the prompt is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftRequest {
    pub event_type: String,
    pub guest_profile: String,
    pub formation: String,
    pub expected_interaction: String,
    pub do_not_play: String,
    pub taste_diversity: String,
    /// Music moments joined with ", ".
    pub music_moments: String,
}

impl DraftRequest {
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            event_type: record.event_type.clone(),
            guest_profile: record.guest_profile.clone(),
            formation: record
                .formation
                .map(|f| f.label().to_string())
                .unwrap_or_default(),
            expected_interaction: record.expected_interaction.label().to_string(),
            do_not_play: record.do_not_play.clone(),
            taste_diversity: record.taste_diversity.clone(),
            music_moments: record
                .music_moments
                .iter()
                .map(|m| m.label())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    pub fn prompt(&self) -> String {
        format!(
            "Atue como um produtor musical de eventos de alto padrão. Com base nos dados abaixo, \
responda apenas com um objeto JSON com duas chaves:\n\
1. \"summary\": um parágrafo elegante e persuasivo, em português, descrevendo o conceito \
musical deste evento para o cliente, em tom profissional e sofisticado.\n\
2. \"setlist\": uma lista de 8 músicas sugeridas que combinem com o perfil dos convidados e \
o tipo de evento, respeitando o que NÃO deve ser tocado.\n\n\
DADOS DO EVENTO:\n\
Tipo: {}\n\
Perfil Convidados: {}\n\
Formação: {}\n\
Interação: {}\n\
O que NÃO tocar: {}\n\
Gostos Musicais: {}\n\
Momentos: {}\n",
            self.event_type,
            self.guest_profile,
            self.formation,
            self.expected_interaction,
            self.do_not_play,
            self.taste_diversity,
            self.music_moments,
        )
    }
}

/// Something that can draft content for a request. Implementations may
/// block; they are only called from the drafting worker thread.
pub trait DraftingService: Send + Sync {
    fn draft(&self, request: &DraftRequest) -> Result<Draft, DraftError>;
}

/// Decode the JSON object the model was asked for.
///
/// Both keys must be present with the right types. Setlist entries that are
/// not strings are skipped, line breaks inside a title are flattened to
/// spaces, and blank titles are dropped, so the list survives being stored
/// one title per line.
pub fn parse_draft_reply(text: &str) -> Result<Draft, DraftError> {
    let value: Value = serde_json::from_str(strip_code_fence(text))?;

    let summary = value
        .get("summary")
        .and_then(Value::as_str)
        .ok_or(DraftError::MissingField("summary"))?
        .to_string();

    let setlist = value
        .get("setlist")
        .and_then(Value::as_array)
        .ok_or(DraftError::MissingField("setlist"))?
        .iter()
        .filter_map(Value::as_str)
        .map(|title| title.replace(['\r', '\n'], " "))
        .filter(|title| !title.trim().is_empty())
        .collect();

    Ok(Draft::new(summary, setlist))
}

/// Models sometimes wrap JSON in a ```json fence even when asked not to.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Collapse any outcome into a draft the session can apply.
pub fn resolve_draft(result: Result<Draft, DraftError>) -> Draft {
    match result {
        Ok(draft) => draft,
        Err(DraftError::EmptyResponse) => {
            log::warn!("drafting service returned an empty reply");
            Draft::empty_reply()
        }
        Err(err) => {
            log::error!("drafting failed: {err}");
            Draft::fallback()
        }
    }
}

/// Run `service` on a worker thread and send the resolved draft to `tx`.
/// The caller keeps running; a closed receiver just drops the result.
pub fn spawn_draft(
    service: Arc<dyn DraftingService>,
    request: DraftRequest,
    tx: Sender<Draft>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let draft = resolve_draft(service.draft(&request));
        if tx.send(draft).is_err() {
            log::debug!("draft finished after the UI went away");
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::models::{Formation, MusicMoment};
    use crate::wizard::FieldUpdate;

    struct Canned(fn() -> Result<Draft, DraftError>);

    impl DraftingService for Canned {
        fn draft(&self, _request: &DraftRequest) -> Result<Draft, DraftError> {
            (self.0)()
        }
    }

    #[test]
    fn request_snapshots_prompt_fields() {
        let record = EventRecord::default()
            .with_update(FieldUpdate::EventType("Casamento".into()))
            .with_update(FieldUpdate::Formation(Some(Formation::Trio)))
            .with_update(FieldUpdate::MusicMoments(vec![
                MusicMoment::Cerimonia,
                MusicMoment::Festa,
            ]));
        let request = DraftRequest::from_record(&record);

        assert_eq!(request.formation, "Trio");
        assert_eq!(request.music_moments, "Cerimônia, Festa");
        assert_eq!(request.expected_interaction, "Normal");
        let prompt = request.prompt();
        assert!(prompt.contains("Tipo: Casamento"));
        assert!(prompt.contains("Momentos: Cerimônia, Festa"));
    }

    #[test]
    fn well_formed_reply_parses() {
        let draft =
            parse_draft_reply(r#"{"summary":"Noite elegante","setlist":["A","B\nC","  ",3]}"#)
                .unwrap();
        assert_eq!(draft.summary, "Noite elegante");
        assert_eq!(draft.setlist, vec!["A", "B C"]);
    }

    #[test]
    fn fenced_reply_parses() {
        let draft = parse_draft_reply("```json\n{\"summary\":\"s\",\"setlist\":[]}\n```").unwrap();
        assert_eq!(draft.summary, "s");
        assert!(draft.setlist.is_empty());
    }

    #[test]
    fn missing_or_mistyped_keys_are_rejected() {
        assert!(matches!(
            parse_draft_reply(r#"{"setlist":[]}"#),
            Err(DraftError::MissingField("summary"))
        ));
        assert!(matches!(
            parse_draft_reply(r#"{"summary":"s","setlist":"A, B"}"#),
            Err(DraftError::MissingField("setlist"))
        ));
        assert!(matches!(
            parse_draft_reply("not json"),
            Err(DraftError::Malformed(_))
        ));
    }

    #[test]
    fn failures_resolve_to_fallback_content() {
        assert_eq!(
            resolve_draft(Err(DraftError::MissingCredential)),
            Draft::fallback()
        );
        assert_eq!(
            resolve_draft(Err(DraftError::Status {
                status: 500,
                body: String::new()
            })),
            Draft::fallback()
        );
        let empty = resolve_draft(Err(DraftError::EmptyResponse));
        assert_eq!(empty.summary, EMPTY_REPLY_SUMMARY);
        assert!(empty.setlist.is_empty());
        assert!(empty.failed);
        assert!(Draft::fallback().failed);
    }

    #[test]
    fn worker_posts_fallback_when_service_fails() {
        let (tx, rx) = mpsc::channel();
        let service: Arc<dyn DraftingService> =
            Arc::new(Canned(|| Err(DraftError::MissingField("summary"))));
        spawn_draft(service, DraftRequest::default(), tx)
            .join()
            .unwrap();
        assert_eq!(rx.recv().unwrap(), Draft::fallback());
    }

    #[test]
    fn worker_posts_successful_draft() {
        let (tx, rx) = mpsc::channel();
        let service: Arc<dyn DraftingService> =
            Arc::new(Canned(|| Ok(Draft::new("ok", vec!["Song".into()]))));
        spawn_draft(service, DraftRequest::default(), tx)
            .join()
            .unwrap();
        let draft = rx.recv().unwrap();
        assert_eq!(draft.setlist, vec!["Song"]);
        assert!(!draft.failed);
    }
}
