use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use super::document::{DetailGroup, Moments, ProposalDocument};

/// Plain-text form of the proposal, in the same order and wording as the
/// on-screen version.
impl fmt::Display for ProposalDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header.kicker.to_uppercase())?;
        writeln!(f, "{}", self.header.title)?;
        if let Some(greeting) = &self.header.greeting {
            writeln!(f, "{greeting}")?;
        }
        writeln!(f, "{}", self.header.brand_line)?;
        writeln!(f)?;

        for item in &self.summary {
            writeln!(f, "{}: {}", item.label, item.value)?;
        }

        if let Some(concept) = &self.concept {
            writeln!(f)?;
            writeln!(f, "{}", ProposalDocument::CONCEPT_TITLE)?;
            writeln!(f, "\"{concept}\"")?;
        }

        write_group(f, &self.format_show)?;
        write_group(f, &self.vibe)?;

        writeln!(f)?;
        writeln!(f, "{}", self.profile.title.to_uppercase())?;
        let guests = &self.profile.guests;
        writeln!(f, "  {}: {}", guests.label, guests.value)?;
        if let Some(restrictions) = &self.profile.restrictions {
            writeln!(f, "  {}: {}", restrictions.label, restrictions.value)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", Moments::TITLE.to_uppercase())?;
        writeln!(f, "  {}", self.moments.tokens().join(" · "))?;

        if let Some(entries) = &self.setlist {
            writeln!(f)?;
            writeln!(f, "{}", ProposalDocument::SETLIST_TITLE)?;
            for entry in entries {
                writeln!(f, "  {entry}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", self.footer)
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, group: &DetailGroup) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", group.title.to_uppercase())?;
    for item in &group.items {
        writeln!(f, "  {}: {}", item.label, item.value)?;
    }
    Ok(())
}

/// Render the proposal as plain text. This is what gets written when
/// exporting.
pub fn render_plain(doc: &ProposalDocument) -> String {
    doc.to_string()
}

/// Write the plain-text proposal into `dir` and return the file path. The
/// name carries a timestamp; when that name is already taken a `-2`, `-3`, ...
/// suffix is added, so an existing export is never overwritten.
pub fn export_proposal(doc: &ProposalDocument, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).context("failed to create export directory")?;
    let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();

    let mut attempt = 1u32;
    let (path, mut file) = loop {
        let name = if attempt == 1 {
            format!("proposta-{stamp}.txt")
        } else {
            format!("proposta-{stamp}-{attempt}.txt")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => break (path, file),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(err) => {
                return Err(err).with_context(|| format!("failed to create {}", path.display()))
            }
        }
    };

    file.write_all(render_plain(doc).as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
