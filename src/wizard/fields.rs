use crate::models::{
    EventRecord, Formation, InteractionLevel, InteractiveMoment, MusicMoment, RepertoireType,
    ShowDuration, Volume,
};

/// Identifies a single field of [`EventRecord`]. Used by the step table and
/// the form widgets; updates carry their value in [`FieldUpdate`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    HostName,
    EventType,
    Date,
    Location,
    GuestCount,
    GuestProfile,
    MusicMoments,
    Formation,
    RepertoireType,
    ShowDuration,
    SpecialSongs,
    DoNotPlay,
    TasteDiversity,
    ExpectedInteraction,
    Volume,
    InteractiveMoments,
    Attire,
    OvertimePossibility,
    SoundSystemProvided,
    VendorReferral,
    StageSize,
    AcousticsNotes,
    EquipmentStorage,
    ConceptSummary,
    SuggestedSetlist,
}

/// A replacement value for exactly one field. The variant picks the field and
/// its payload is already typed for it, so no runtime check is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    HostName(String),
    EventType(String),
    Date(String),
    Location(String),
    GuestCount(String),
    GuestProfile(String),
    MusicMoments(Vec<MusicMoment>),
    Formation(Option<Formation>),
    RepertoireType(RepertoireType),
    ShowDuration(Option<ShowDuration>),
    SpecialSongs(String),
    DoNotPlay(String),
    TasteDiversity(String),
    ExpectedInteraction(InteractionLevel),
    Volume(Volume),
    InteractiveMoments(Vec<InteractiveMoment>),
    Attire(String),
    OvertimePossibility(bool),
    SoundSystemProvided(bool),
    VendorReferral(bool),
    StageSize(String),
    AcousticsNotes(String),
    EquipmentStorage(bool),
    ConceptSummary(String),
    SuggestedSetlist(String),
}

impl FieldUpdate {
    /// The field this update targets.
    pub fn field(&self) -> FieldId {
        match self {
            FieldUpdate::HostName(_) => FieldId::HostName,
            FieldUpdate::EventType(_) => FieldId::EventType,
            FieldUpdate::Date(_) => FieldId::Date,
            FieldUpdate::Location(_) => FieldId::Location,
            FieldUpdate::GuestCount(_) => FieldId::GuestCount,
            FieldUpdate::GuestProfile(_) => FieldId::GuestProfile,
            FieldUpdate::MusicMoments(_) => FieldId::MusicMoments,
            FieldUpdate::Formation(_) => FieldId::Formation,
            FieldUpdate::RepertoireType(_) => FieldId::RepertoireType,
            FieldUpdate::ShowDuration(_) => FieldId::ShowDuration,
            FieldUpdate::SpecialSongs(_) => FieldId::SpecialSongs,
            FieldUpdate::DoNotPlay(_) => FieldId::DoNotPlay,
            FieldUpdate::TasteDiversity(_) => FieldId::TasteDiversity,
            FieldUpdate::ExpectedInteraction(_) => FieldId::ExpectedInteraction,
            FieldUpdate::Volume(_) => FieldId::Volume,
            FieldUpdate::InteractiveMoments(_) => FieldId::InteractiveMoments,
            FieldUpdate::Attire(_) => FieldId::Attire,
            FieldUpdate::OvertimePossibility(_) => FieldId::OvertimePossibility,
            FieldUpdate::SoundSystemProvided(_) => FieldId::SoundSystemProvided,
            FieldUpdate::VendorReferral(_) => FieldId::VendorReferral,
            FieldUpdate::StageSize(_) => FieldId::StageSize,
            FieldUpdate::AcousticsNotes(_) => FieldId::AcousticsNotes,
            FieldUpdate::EquipmentStorage(_) => FieldId::EquipmentStorage,
            FieldUpdate::ConceptSummary(_) => FieldId::ConceptSummary,
            FieldUpdate::SuggestedSetlist(_) => FieldId::SuggestedSetlist,
        }
    }
}

impl EventRecord {
    /// Return a copy of the record with one field replaced. `self` is left
    /// untouched so earlier snapshots (for example an in-flight drafting
    /// request) keep seeing the values they were built from.
    pub fn with_update(&self, update: FieldUpdate) -> EventRecord {
        let mut next = self.clone();
        match update {
            FieldUpdate::HostName(value) => next.host_name = value,
            FieldUpdate::EventType(value) => next.event_type = value,
            FieldUpdate::Date(value) => next.date = value,
            FieldUpdate::Location(value) => next.location = value,
            FieldUpdate::GuestCount(value) => next.guest_count = value,
            FieldUpdate::GuestProfile(value) => next.guest_profile = value,
            FieldUpdate::MusicMoments(value) => next.music_moments = dedup_keep_first(value),
            FieldUpdate::Formation(value) => next.formation = value,
            FieldUpdate::RepertoireType(value) => next.repertoire_type = value,
            FieldUpdate::ShowDuration(value) => next.show_duration = value,
            FieldUpdate::SpecialSongs(value) => next.special_songs = value,
            FieldUpdate::DoNotPlay(value) => next.do_not_play = value,
            FieldUpdate::TasteDiversity(value) => next.taste_diversity = value,
            FieldUpdate::ExpectedInteraction(value) => next.expected_interaction = value,
            FieldUpdate::Volume(value) => next.volume = value,
            FieldUpdate::InteractiveMoments(value) => {
                next.interactive_moments = dedup_keep_first(value)
            }
            FieldUpdate::Attire(value) => next.attire = value,
            FieldUpdate::OvertimePossibility(value) => next.overtime_possibility = value,
            FieldUpdate::SoundSystemProvided(value) => next.sound_system_provided = value,
            FieldUpdate::VendorReferral(value) => next.vendor_referral = value,
            FieldUpdate::StageSize(value) => next.stage_size = value,
            FieldUpdate::AcousticsNotes(value) => next.acoustics_notes = value,
            FieldUpdate::EquipmentStorage(value) => next.equipment_storage = value,
            FieldUpdate::ConceptSummary(value) => next.concept_summary = value,
            FieldUpdate::SuggestedSetlist(value) => next.suggested_setlist = value,
        }
        next
    }

    /// Current text of a free-text field, `None` for non-text fields.
    pub fn text(&self, field: FieldId) -> Option<&str> {
        let value = match field {
            FieldId::HostName => &self.host_name,
            FieldId::EventType => &self.event_type,
            FieldId::Date => &self.date,
            FieldId::Location => &self.location,
            FieldId::GuestCount => &self.guest_count,
            FieldId::GuestProfile => &self.guest_profile,
            FieldId::SpecialSongs => &self.special_songs,
            FieldId::DoNotPlay => &self.do_not_play,
            FieldId::TasteDiversity => &self.taste_diversity,
            FieldId::Attire => &self.attire,
            FieldId::StageSize => &self.stage_size,
            FieldId::AcousticsNotes => &self.acoustics_notes,
            FieldId::ConceptSummary => &self.concept_summary,
            FieldId::SuggestedSetlist => &self.suggested_setlist,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Current value of a boolean field, `None` for everything else.
    pub fn flag(&self, field: FieldId) -> Option<bool> {
        match field {
            FieldId::OvertimePossibility => Some(self.overtime_possibility),
            FieldId::SoundSystemProvided => Some(self.sound_system_provided),
            FieldId::VendorReferral => Some(self.vendor_referral),
            FieldId::EquipmentStorage => Some(self.equipment_storage),
            _ => None,
        }
    }
}

/// Build the update that stores `value` in a free-text field. Returns `None`
/// when `field` does not hold text.
pub fn text_update(field: FieldId, value: String) -> Option<FieldUpdate> {
    let update = match field {
        FieldId::HostName => FieldUpdate::HostName(value),
        FieldId::EventType => FieldUpdate::EventType(value),
        FieldId::Date => FieldUpdate::Date(value),
        FieldId::Location => FieldUpdate::Location(value),
        FieldId::GuestCount => FieldUpdate::GuestCount(value),
        FieldId::GuestProfile => FieldUpdate::GuestProfile(value),
        FieldId::SpecialSongs => FieldUpdate::SpecialSongs(value),
        FieldId::DoNotPlay => FieldUpdate::DoNotPlay(value),
        FieldId::TasteDiversity => FieldUpdate::TasteDiversity(value),
        FieldId::Attire => FieldUpdate::Attire(value),
        FieldId::StageSize => FieldUpdate::StageSize(value),
        FieldId::AcousticsNotes => FieldUpdate::AcousticsNotes(value),
        FieldId::ConceptSummary => FieldUpdate::ConceptSummary(value),
        FieldId::SuggestedSetlist => FieldUpdate::SuggestedSetlist(value),
        _ => return None,
    };
    Some(update)
}

/// Build the update that stores `value` in a boolean field.
pub fn flag_update(field: FieldId, value: bool) -> Option<FieldUpdate> {
    match field {
        FieldId::OvertimePossibility => Some(FieldUpdate::OvertimePossibility(value)),
        FieldId::SoundSystemProvided => Some(FieldUpdate::SoundSystemProvided(value)),
        FieldId::VendorReferral => Some(FieldUpdate::VendorReferral(value)),
        FieldId::EquipmentStorage => Some(FieldUpdate::EquipmentStorage(value)),
        _ => None,
    }
}

/// Flip membership of `item`: drop it when present, append it otherwise.
/// Toggling the same item twice gives back the original list.
pub fn toggle_choice<T: Copy + PartialEq>(selected: &[T], item: T) -> Vec<T> {
    if selected.contains(&item) {
        selected
            .iter()
            .copied()
            .filter(|existing| *existing != item)
            .collect()
    } else {
        let mut next = selected.to_vec();
        next.push(item);
        next
    }
}

fn dedup_keep_first<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
