//! Domain models for the event intake wizard. `EventRecord` is the single
//! value that every screen reads and every key press rewrites. Each choice
//! enum is a fixed menu whose labels the proposal prints verbatim.

use std::fmt;

/// Shared behaviour for the closed single/multi choice enums so the UI can
/// cycle through options without knowing which enum it is holding.
pub trait Choice: Copy + PartialEq + 'static {
    /// Every variant in menu order.
    const ALL: &'static [Self];

    /// Label shown in the wizard and printed in the proposal.
    fn label(self) -> &'static str;

    /// Position of the variant inside `ALL`.
    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or(0)
    }
}

macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice_enum!(
    /// Band line-up offered to the client.
    Formation {
        VozEViolao => "Voz e Violão",
        Duo => "Duo",
        Trio => "Trio",
        BandaCompleta => "Banda Completa",
    }
);

choice_enum!(
    /// Length of the live set.
    ShowDuration {
        UmaHoraEMeia => "1h30min",
        DuasHoras => "2h",
        DuasHorasEMeia => "2h30min",
        DoisBlocos => "Dois Blocos",
    }
);

choice_enum!(
    /// Exactly two repertoire packages exist; there is no third option.
    RepertoireType {
        ShowNormal => "Show Normal",
        ShowEspecial => "Show Especial",
    }
);

choice_enum!(
    /// How much the band should engage the audience.
    InteractionLevel {
        Normal => "Normal",
        Alta => "Alta Interação",
    }
);

choice_enum!(
    /// Preferred sound level.
    Volume {
        Padrao => "Padrão",
        Alto => "Alto",
        Baixo => "Baixo",
    }
);

choice_enum!(
    /// Parts of the event that need live music.
    MusicMoment {
        Cerimonia => "Cerimônia",
        RecepcaoJantar => "Recepção/Jantar",
        Festa => "Festa",
    }
);

choice_enum!(
    /// Interactive bits the client would like during the show.
    InteractiveMoment {
        CantarJunto => "Cantar junto",
        DancarComABanda => "Dançar com a banda",
        FalarNoShow => "Falar no show",
    }
);

impl Default for RepertoireType {
    fn default() -> Self {
        RepertoireType::ShowNormal
    }
}

impl Default for InteractionLevel {
    fn default() -> Self {
        InteractionLevel::Normal
    }
}

impl Default for Volume {
    fn default() -> Self {
        Volume::Padrao
    }
}

/// Everything the wizard collects about one event.
///
/// Free-text fields use the empty string for "not filled in yet". Only the
/// two closed choices that start without a selection (formation and show
/// duration) are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub host_name: String,
    pub event_type: String,
    /// ISO `YYYY-MM-DD` when typed the expected way, but any text is kept.
    pub date: String,
    pub location: String,
    /// Kept as typed. Non-numeric input is legal and displayed as-is.
    pub guest_count: String,
    pub guest_profile: String,

    /// Selection order is kept so the proposal lists tags the way they were
    /// picked.
    pub music_moments: Vec<MusicMoment>,
    pub formation: Option<Formation>,
    pub repertoire_type: RepertoireType,
    pub show_duration: Option<ShowDuration>,

    pub special_songs: String,
    pub do_not_play: String,
    pub taste_diversity: String,

    pub expected_interaction: InteractionLevel,
    pub volume: Volume,
    pub interactive_moments: Vec<InteractiveMoment>,
    pub attire: String,

    pub overtime_possibility: bool,
    pub sound_system_provided: bool,
    pub vendor_referral: bool,
    pub stage_size: String,
    pub acoustics_notes: String,
    pub equipment_storage: bool,

    pub concept_summary: String,
    /// One song title per line.
    pub suggested_setlist: String,
}

impl Default for EventRecord {
    fn default() -> Self {
        Self {
            host_name: String::new(),
            event_type: String::new(),
            date: String::new(),
            location: String::new(),
            guest_count: String::new(),
            guest_profile: String::new(),
            music_moments: Vec::new(),
            formation: None,
            repertoire_type: RepertoireType::default(),
            show_duration: None,
            special_songs: String::new(),
            do_not_play: String::new(),
            taste_diversity: String::new(),
            expected_interaction: InteractionLevel::default(),
            volume: Volume::default(),
            interactive_moments: Vec::new(),
            attire: String::from("Normal"),
            overtime_possibility: false,
            sound_system_provided: false,
            vendor_referral: false,
            stage_size: String::new(),
            acoustics_notes: String::new(),
            equipment_storage: true,
            concept_summary: String::new(),
            suggested_setlist: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_intake_form() {
        let record = EventRecord::default();
        assert_eq!(record.repertoire_type, RepertoireType::ShowNormal);
        assert_eq!(record.expected_interaction, InteractionLevel::Normal);
        assert_eq!(record.volume, Volume::Padrao);
        assert_eq!(record.attire, "Normal");
        assert!(record.equipment_storage);
        assert!(!record.overtime_possibility);
        assert!(record.music_moments.is_empty());
        assert!(record.formation.is_none());
    }

    #[test]
    fn labels_follow_menu_order() {
        let labels: Vec<_> = Formation::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["Voz e Violão", "Duo", "Trio", "Banda Completa"]);
        assert_eq!(Volume::Baixo.index(), 2);
        assert_eq!(InteractionLevel::Alta.to_string(), "Alta Interação");
    }
}
