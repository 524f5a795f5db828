//! Read-only proposal built from a finished record, plus its plain-text
//! export.

mod document;
mod export;
mod setlist;

pub use document::{
    build_proposal, DateStyle, DetailGroup, Header, LabeledValue, Moments, ProfileGroup,
    ProposalDocument, SetlistEntry, EVENT_FALLBACK, NOT_CHOSEN, NO_MOMENTS, UNDECIDED,
};
pub use export::{export_proposal, render_plain};
pub use setlist::{join_setlist, parse_setlist};
