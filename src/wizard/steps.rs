use super::fields::FieldId;

/// Pages of the intake wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    General,
    Structure,
    Vibe,
    Finalization,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::General, Step::Structure, Step::Vibe, Step::Finalization];

    /// 1-based position shown in the step indicator.
    pub fn number(self) -> usize {
        match self {
            Step::General => 1,
            Step::Structure => 2,
            Step::Vibe => 3,
            Step::Finalization => 4,
        }
    }

    pub fn from_number(number: usize) -> Option<Step> {
        Step::ALL.get(number.checked_sub(1)?).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::General => "Dados Gerais",
            Step::Structure => "Estrutura",
            Step::Vibe => "Vibe & Estilo",
            Step::Finalization => "Finalização",
        }
    }

    /// Fields rendered on this page, top to bottom.
    pub fn fields(self) -> &'static [FieldId] {
        match self {
            Step::General => &[
                FieldId::HostName,
                FieldId::EventType,
                FieldId::Date,
                FieldId::Location,
                FieldId::GuestCount,
                FieldId::GuestProfile,
            ],
            Step::Structure => &[
                FieldId::MusicMoments,
                FieldId::Formation,
                FieldId::ShowDuration,
                FieldId::RepertoireType,
            ],
            Step::Vibe => &[
                FieldId::ExpectedInteraction,
                FieldId::Volume,
                FieldId::InteractiveMoments,
                FieldId::SpecialSongs,
                FieldId::DoNotPlay,
                FieldId::TasteDiversity,
            ],
            Step::Finalization => &[
                FieldId::SoundSystemProvided,
                FieldId::OvertimePossibility,
                FieldId::VendorReferral,
                FieldId::StageSize,
                FieldId::AcousticsNotes,
                FieldId::ConceptSummary,
                FieldId::SuggestedSetlist,
            ],
        }
    }
}

/// Widget used to edit a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Number,
    LongText,
    /// Multi-line text where each line is one song.
    Setlist,
    /// Single choice that may be left unset.
    Choice,
    /// Single choice that always holds a value.
    Exclusive,
    MultiChoice,
    Flag,
}

impl FieldKind {
    pub fn is_text(self) -> bool {
        matches!(
            self,
            FieldKind::Text
                | FieldKind::Date
                | FieldKind::Number
                | FieldKind::LongText
                | FieldKind::Setlist
        )
    }

    /// Enter inserts a line break instead of moving focus.
    pub fn is_multiline(self) -> bool {
        matches!(self, FieldKind::LongText | FieldKind::Setlist)
    }
}

impl FieldId {
    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::HostName
            | FieldId::EventType
            | FieldId::Location
            | FieldId::GuestProfile
            | FieldId::Attire
            | FieldId::StageSize
            | FieldId::AcousticsNotes => FieldKind::Text,
            FieldId::Date => FieldKind::Date,
            FieldId::GuestCount => FieldKind::Number,
            FieldId::SpecialSongs
            | FieldId::DoNotPlay
            | FieldId::TasteDiversity
            | FieldId::ConceptSummary => FieldKind::LongText,
            FieldId::SuggestedSetlist => FieldKind::Setlist,
            FieldId::Formation | FieldId::ShowDuration => FieldKind::Choice,
            FieldId::RepertoireType | FieldId::ExpectedInteraction | FieldId::Volume => {
                FieldKind::Exclusive
            }
            FieldId::MusicMoments | FieldId::InteractiveMoments => FieldKind::MultiChoice,
            FieldId::OvertimePossibility
            | FieldId::SoundSystemProvided
            | FieldId::VendorReferral
            | FieldId::EquipmentStorage => FieldKind::Flag,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::HostName => "Anfitrião(ões) / Responsável",
            FieldId::EventType => "Tipo de Evento",
            FieldId::Date => "Data",
            FieldId::Location => "Cidade / Local",
            FieldId::GuestCount => "Número de Convidados",
            FieldId::GuestProfile => "Perfil (Idade/Estilo)",
            FieldId::MusicMoments => "Em quais momentos haverá música?",
            FieldId::Formation => "Formação",
            FieldId::RepertoireType => "Tipo de Repertório",
            FieldId::ShowDuration => "Duração do Show",
            FieldId::SpecialSongs => "Músicas Especiais (Pedidos)",
            FieldId::DoNotPlay => "O que NÃO tocar",
            FieldId::TasteDiversity => "Diversidade Musical",
            FieldId::ExpectedInteraction => "Nível de Interação",
            FieldId::Volume => "Volume Ideal",
            FieldId::InteractiveMoments => "Momentos Interativos",
            FieldId::Attire => "Figurino",
            FieldId::OvertimePossibility => "Possibilidade de Hora Extra?",
            FieldId::SoundSystemProvided => "Evento já possui sonorização?",
            FieldId::VendorReferral => "Precisa de indicação de outros fornecedores?",
            FieldId::StageSize => "Tamanho do Palco",
            FieldId::AcousticsNotes => "Obs. Acústica",
            FieldId::EquipmentStorage => "Local para guardar equipamento?",
            FieldId::ConceptSummary => "Resumo do Conceito Musical",
            FieldId::SuggestedSetlist => "Setlist Sugerido",
        }
    }

    /// Hint shown while a text field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            FieldId::HostName => "Ex: João e Maria, Empresa X...",
            FieldId::EventType => "Ex: Casamento, Aniversário...",
            FieldId::Date => "AAAA-MM-DD",
            FieldId::Location => "Local do evento",
            FieldId::GuestProfile => "Ex: Jovens, Casais...",
            FieldId::SpecialSongs => "Alguma música que não pode faltar?",
            FieldId::DoNotPlay => "Restrições do cliente...",
            FieldId::TasteDiversity => "Observações sobre o gosto...",
            FieldId::StageSize => "Ex: 4x3m",
            FieldId::AcousticsNotes => "Ex: Salão com muito eco",
            FieldId::ConceptSummary => "Ex: Um show intimista e elegante...",
            FieldId::SuggestedSetlist => "Uma música por linha",
            FieldId::Formation | FieldId::ShowDuration => "Selecione...",
            _ => "",
        }
    }
}

/// Cursor over the wizard pages. Moves one page at a time and saturates at
/// both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSequencer {
    current: Step,
}

impl Default for StepSequencer {
    fn default() -> Self {
        Self {
            current: Step::General,
        }
    }
}

impl StepSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Step {
        self.current
    }

    /// Number of pages in the wizard.
    pub fn len(&self) -> usize {
        Step::ALL.len()
    }

    /// Move forward one page. Returns `false` when already on the last page.
    pub fn advance(&mut self) -> bool {
        let next = (self.current.number() + 1).min(self.len());
        self.set(next)
    }

    /// Move back one page. Returns `false` when already on the first page.
    pub fn retreat(&mut self) -> bool {
        let previous = self.current.number().saturating_sub(1).max(1);
        self.set(previous)
    }

    /// The finalize action is only offered on the last page.
    pub fn is_final(&self) -> bool {
        self.current.number() == self.len()
    }

    pub fn is_first(&self) -> bool {
        self.current.number() == 1
    }

    fn set(&mut self, number: usize) -> bool {
        match Step::from_number(number) {
            Some(step) if step != self.current => {
                self.current = step;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn advance_saturates_at_last_step() {
        let mut steps = StepSequencer::new();
        assert!(steps.advance());
        assert!(steps.advance());
        assert!(steps.advance());
        assert_eq!(steps.current(), Step::Finalization);
        assert!(steps.is_final());

        assert!(!steps.advance());
        assert_eq!(steps.current(), Step::Finalization);
    }

    #[test]
    fn retreat_saturates_at_first_step() {
        let mut steps = StepSequencer::new();
        assert!(!steps.retreat());
        assert_eq!(steps.current().number(), 1);

        steps.advance();
        assert!(steps.retreat());
        assert!(steps.is_first());
    }

    #[test]
    fn step_numbers_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_number(step.number()), Some(step));
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(5), None);
    }

    #[test]
    fn each_field_lives_on_at_most_one_step() {
        let mut seen = HashSet::new();
        for step in Step::ALL {
            assert!(!step.fields().is_empty());
            for field in step.fields() {
                assert!(seen.insert(*field), "{field:?} appears twice");
            }
        }
        assert!(!seen.contains(&FieldId::Attire));
        assert!(!seen.contains(&FieldId::EquipmentStorage));
    }

    #[test]
    fn structure_step_groups_show_format() {
        assert_eq!(
            Step::Structure.fields(),
            &[
                FieldId::MusicMoments,
                FieldId::Formation,
                FieldId::ShowDuration,
                FieldId::RepertoireType,
            ]
        );
        assert_eq!(FieldId::RepertoireType.kind(), FieldKind::Exclusive);
        assert!(FieldId::SuggestedSetlist.kind().is_multiline());
    }
}
