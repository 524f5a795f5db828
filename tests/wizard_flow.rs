use event_proposal::drafting::{resolve_draft, Draft, DraftError};
use event_proposal::models::{Formation, InteractionLevel, MusicMoment, ShowDuration};
use event_proposal::proposal::{render_plain, DateStyle, Moments, NOT_CHOSEN, UNDECIDED};
use event_proposal::wizard::FieldUpdate;
use event_proposal::{build_proposal, parse_setlist, Action, Mode, Session};

fn proposal_for(session: &Session) -> event_proposal::ProposalDocument {
    let record = session.record();
    let setlist = parse_setlist(&record.suggested_setlist);
    build_proposal(record, &setlist, &DateStyle::default(), "Banda Teste")
}

#[test]
fn full_session_produces_a_complete_proposal() {
    let mut session = Session::new();
    for update in [
        FieldUpdate::HostName("Ana e Bruno".into()),
        FieldUpdate::EventType("Casamento".into()),
        FieldUpdate::Date("2025-11-08".into()),
        FieldUpdate::Location("Recife".into()),
        FieldUpdate::GuestCount("150".into()),
        FieldUpdate::GuestProfile("Jovens".into()),
    ] {
        assert!(session.apply(Action::Update(update)));
    }

    session.apply(Action::Advance);
    session.apply(Action::ToggleMusicMoment(MusicMoment::Festa));
    session.apply(Action::ToggleMusicMoment(MusicMoment::Cerimonia));
    session.apply(Action::Update(FieldUpdate::Formation(Some(Formation::Trio))));
    session.apply(Action::Update(FieldUpdate::ShowDuration(Some(
        ShowDuration::DuasHoras,
    ))));

    session.apply(Action::Advance);
    session.apply(Action::Update(FieldUpdate::ExpectedInteraction(
        InteractionLevel::Alta,
    )));
    session.apply(Action::Update(FieldUpdate::DoNotPlay("Sertanejo".into())));

    session.apply(Action::Advance);
    session.apply(Action::ApplyDraft(resolve_draft(Ok(Draft::new(
        "Uma noite leve e elegante",
        vec!["Garota de Ipanema".into(), "Evidências".into()],
    )))));
    assert!(session.apply(Action::Finalize));
    assert_eq!(session.mode(), Mode::Presenting);

    let doc = proposal_for(&session);
    assert_eq!(doc.header.greeting.as_deref(), Some("Preparado para Ana e Bruno"));
    assert_eq!(doc.summary[1].value, "08/11/2025");
    assert_eq!(doc.concept.as_deref(), Some("Uma noite leve e elegante"));
    assert_eq!(
        doc.moments,
        Moments::Tags(vec!["Festa".into(), "Cerimônia".into()])
    );
    assert_eq!(doc.profile.guests.value, "150 pessoas • Jovens");

    let text = render_plain(&doc);
    assert!(text.contains("Formação: Trio"));
    assert!(text.contains("Duração: 2h"));
    assert!(text.contains("Nível: Alta Interação"));
    assert!(text.contains("Restrições Musicais: Sertanejo"));
    assert!(text.contains("1. Garota de Ipanema"));
    assert!(text.contains("2. Evidências"));
}

#[test]
fn untouched_session_still_builds_a_proposal() {
    let mut session = Session::new();
    for _ in 0..3 {
        session.apply(Action::Advance);
    }
    session.apply(Action::Finalize);

    let doc = proposal_for(&session);
    assert_eq!(doc.header.greeting, None);
    assert_eq!(doc.summary[0].value, "Evento");
    assert_eq!(doc.summary[1].value, UNDECIDED);
    assert_eq!(doc.format_show.items[0].value, NOT_CHOSEN);
    assert_eq!(doc.moments, Moments::NoneSelected);
    assert!(doc.concept.is_none());
    assert!(doc.setlist.is_none());
    assert!(doc.profile.restrictions.is_none());
}

#[test]
fn failed_draft_then_manual_setlist() {
    let mut session = Session::new();
    session.apply(Action::ApplyDraft(resolve_draft(Err(
        DraftError::MissingCredential,
    ))));
    session.apply(Action::Update(FieldUpdate::SuggestedSetlist(
        "  Song A  \n\n\nSong B\r\n".into(),
    )));

    let setlist = parse_setlist(&session.record().suggested_setlist);
    assert_eq!(setlist, vec!["  Song A  ", "Song B"]);

    let doc = proposal_for(&session);
    let entries = doc.setlist.expect("setlist should be present");
    assert_eq!(entries[1].to_string(), "2. Song B");
}
