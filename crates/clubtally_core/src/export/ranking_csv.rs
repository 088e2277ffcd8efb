//! CSV rendering and file export for the ranked leaderboard.
//!
//! # Invariants
//! - One header row, then one row per ranked member in rank order.
//! - Rows use `\n` line endings; fields needing it are RFC 4180 quoted.
//! - The export file appears atomically or not at all.

use crate::model::member::now_epoch_ms;
use crate::service::ranking::RankedMembers;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const EXPORT_FILE_PREFIX: &str = "club_ranking";

/// Header row flavour for exported files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderStyle {
    /// `Sira,Isim,Toplam Puan`, the format existing spreadsheets expect.
    #[default]
    Legacy,
    /// `Rank,Name,TotalPoints`.
    English,
}

impl HeaderStyle {
    pub fn columns(self) -> [&'static str; 3] {
        match self {
            Self::Legacy => ["Sira", "Isim", "Toplam Puan"],
            Self::English => ["Rank", "Name", "TotalPoints"],
        }
    }

    /// Parses `legacy|english` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" => Some(Self::Legacy),
            "english" => Some(Self::English),
            _ => None,
        }
    }
}

/// Export file write failure.
#[derive(Debug)]
pub enum ExportError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write ranking export `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Renders the ranked view as CSV text.
pub fn render_ranking_csv(ranked: &RankedMembers<'_>, header: HeaderStyle) -> String {
    let mut out = header.columns().join(",");
    out.push('\n');
    for entry in ranked {
        out.push_str(&entry.rank.to_string());
        out.push(',');
        out.push_str(&escape_field(&entry.member.name));
        out.push(',');
        out.push_str(&entry.member.points.to_string());
        out.push('\n');
    }
    out
}

/// Writes the ranking CSV into `dir` and returns the created file path.
///
/// The file name is `club_ranking_<epoch_ms>.csv`. Content is written to a
/// temporary file in `dir` first and then persisted under the final name.
pub fn write_ranking_file(
    dir: &Path,
    ranked: &RankedMembers<'_>,
    header: HeaderStyle,
) -> Result<PathBuf, ExportError> {
    let target = dir.join(format!("{EXPORT_FILE_PREFIX}_{}.csv", now_epoch_ms()));
    let body = render_ranking_csv(ranked, header);

    match write_atomically(dir, &target, body.as_bytes()) {
        Ok(()) => {
            info!(
                "event=ranking_export module=export status=ok rows={} bytes={}",
                ranked.len(),
                body.len()
            );
            Ok(target)
        }
        Err(source) => {
            error!(
                "event=ranking_export module=export status=error error={}",
                source
            );
            Err(ExportError::Io {
                path: target,
                source,
            })
        }
    }
}

fn write_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.persist(target).map_err(|err| err.error)?;
    Ok(())
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_field, HeaderStyle};

    #[test]
    fn plain_fields_are_not_quoted() {
        assert_eq!(escape_field("Ayse Yilmaz"), "Ayse Yilmaz");
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        assert_eq!(escape_field("Smith, J."), "\"Smith, J.\"");
        assert_eq!(escape_field("the \"boss\""), "\"the \"\"boss\"\"\"");
    }

    #[test]
    fn header_style_parses_case_insensitively() {
        assert_eq!(HeaderStyle::parse(" English "), Some(HeaderStyle::English));
        assert_eq!(HeaderStyle::parse("LEGACY"), Some(HeaderStyle::Legacy));
        assert_eq!(HeaderStyle::parse("french"), None);
    }
}
