//! Member and point history domain model.
//!
//! # Responsibility
//! - Define tracked members and the award log each one owns.
//! - Keep the running point total and the history in lockstep.
//!
//! # Invariants
//! - `points == sum(history[i].points)` for every member, at all times.
//! - `history` is ordered newest first.
//! - `PointLog` entries are immutable once recorded.
//! - `PointLog` ids are unique within one member's history.

use crate::model::event::Event;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for members.
pub type MemberId = Uuid;

/// Stable identifier for individual point awards.
pub type PointLogId = Uuid;

/// Validation failures for member records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    NilUuid,
    EmptyName,
    /// Stored total disagrees with the history sum.
    PointsMismatch { points: i64, history_total: i64 },
    /// Total or history sum does not fit in `i64`.
    PointsOverflow,
    /// Two history entries share one id.
    DuplicatePointLogId(PointLogId),
}

impl Display for MemberValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "member id must not be nil"),
            Self::EmptyName => write!(f, "member name must not be empty"),
            Self::PointsMismatch {
                points,
                history_total,
            } => write!(
                f,
                "member points ({points}) must equal history total ({history_total})"
            ),
            Self::PointsOverflow => write!(f, "member point total overflows i64"),
            Self::DuplicatePointLogId(id) => {
                write!(f, "point log id {id} appears more than once in history")
            }
        }
    }
}

impl Error for MemberValidationError {}

/// Snapshot record of one point award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointLog {
    pub id: PointLogId,
    /// Event name copied at award time.
    pub event_name: String,
    /// Event point value copied at award time.
    pub points: i64,
    /// Unix epoch milliseconds.
    pub created_at_ms: i64,
}

impl PointLog {
    /// Snapshots `event` into a new log entry stamped with `created_at_ms`.
    pub fn from_event(event: &Event, created_at_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_name: event.name.clone(),
            points: event.points,
            created_at_ms,
        }
    }
}

/// A tracked club member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MemberRecord")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub points: i64,
    /// Newest first.
    pub history: Vec<PointLog>,
}

#[derive(Deserialize)]
struct MemberRecord {
    id: MemberId,
    name: String,
    points: i64,
    history: Vec<PointLog>,
}

impl TryFrom<MemberRecord> for Member {
    type Error = MemberValidationError;

    fn try_from(value: MemberRecord) -> Result<Self, Self::Error> {
        let member = Self {
            id: value.id,
            name: value.name,
            points: value.points,
            history: value.history,
        };
        member.validate()?;
        Ok(member)
    }
}

impl Member {
    /// Creates a member with zero points and an empty history.
    ///
    /// `name` is trimmed; a blank name is rejected.
    pub fn new(name: impl Into<String>) -> Result<Self, MemberValidationError> {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a member with a caller-provided stable ID.
    pub fn with_id(id: MemberId, name: impl Into<String>) -> Result<Self, MemberValidationError> {
        let member = Self {
            id,
            name: name.into().trim().to_string(),
            points: 0,
            history: Vec::new(),
        };
        member.validate()?;
        Ok(member)
    }

    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.id.is_nil() {
            return Err(MemberValidationError::NilUuid);
        }
        if self.name.trim().is_empty() {
            return Err(MemberValidationError::EmptyName);
        }
        let mut seen = HashSet::with_capacity(self.history.len());
        if let Some(log) = self.history.iter().find(|log| !seen.insert(log.id)) {
            return Err(MemberValidationError::DuplicatePointLogId(log.id));
        }
        let history_total = self
            .history_total()
            .ok_or(MemberValidationError::PointsOverflow)?;
        if history_total != self.points {
            return Err(MemberValidationError::PointsMismatch {
                points: self.points,
                history_total,
            });
        }
        Ok(())
    }

    /// Sum of all history entries, or `None` on overflow.
    pub fn history_total(&self) -> Option<i64> {
        sum_points(self.history.iter())
    }

    /// Records one award: adds its points and prepends it to history.
    pub fn record_award(&mut self, log: PointLog) -> Result<(), MemberValidationError> {
        let points = self
            .points
            .checked_add(log.points)
            .ok_or(MemberValidationError::PointsOverflow)?;
        self.points = points;
        self.history.insert(0, log);
        Ok(())
    }

    /// Removes every history entry whose id is in `ids` and returns the new
    /// point total.
    ///
    /// The total is recomputed from the retained entries, so a batch fails
    /// only when its final total does not fit in `i64`.
    pub fn remove_history_entries(
        &mut self,
        ids: &HashSet<PointLogId>,
    ) -> Result<i64, MemberValidationError> {
        let points = sum_points(self.history.iter().filter(|log| !ids.contains(&log.id)))
            .ok_or(MemberValidationError::PointsOverflow)?;

        self.points = points;
        self.history.retain(|log| !ids.contains(&log.id));
        Ok(points)
    }

    /// Clears points and history.
    pub fn reset(&mut self) {
        self.points = 0;
        self.history.clear();
    }
}

// Accumulates in i128 so only the final total has to fit in i64.
fn sum_points<'a>(logs: impl Iterator<Item = &'a PointLog>) -> Option<i64> {
    let total = logs.map(|log| i128::from(log.points)).sum::<i128>();
    i64::try_from(total).ok()
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    i64::try_from(millis).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::{Member, MemberValidationError, PointLog};
    use crate::model::event::Event;
    use std::collections::HashSet;

    #[test]
    fn record_award_prepends_and_accumulates() {
        let karaoke = Event::new("Karaoke", 1, "🎶").unwrap();
        let symposium = Event::new("Symposium", 2, "🎤").unwrap();
        let mut member = Member::new("Deniz").unwrap();

        member.record_award(PointLog::from_event(&karaoke, 10)).unwrap();
        member.record_award(PointLog::from_event(&symposium, 20)).unwrap();

        assert_eq!(member.points, 3);
        assert_eq!(member.history[0].event_name, "Symposium");
        assert_eq!(member.history[1].event_name, "Karaoke");
        assert!(member.validate().is_ok());
    }

    #[test]
    fn record_award_rejects_overflow_without_mutation() {
        let huge = Event::new("Huge", i64::MAX, "🔥").unwrap();
        let mut member = Member::new("Ece").unwrap();
        member.record_award(PointLog::from_event(&huge, 1)).unwrap();

        let err = member
            .record_award(PointLog::from_event(&huge, 2))
            .unwrap_err();
        assert_eq!(err, MemberValidationError::PointsOverflow);
        assert_eq!(member.history.len(), 1);
        assert_eq!(member.points, i64::MAX);
    }

    #[test]
    fn remove_history_entries_tolerates_large_intermediate_sums() {
        let mut member = Member::new("Arda").unwrap();
        for points in [-1, i64::MAX, 1] {
            let event = Event::new("Swing", points, "🎸").unwrap();
            member.record_award(PointLog::from_event(&event, 0)).unwrap();
        }
        let ids = member
            .history
            .iter()
            .take(2)
            .map(|log| log.id)
            .collect::<HashSet<_>>();

        assert_eq!(member.remove_history_entries(&ids).unwrap(), -1);
        assert_eq!(member.history.len(), 1);
        assert!(member.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_point_log_ids() {
        let event = Event::new("Gathering", 3, "🤝").unwrap();
        let log = PointLog::from_event(&event, 0);
        let mut member = Member::new("Ilgin").unwrap();
        member.history = vec![log.clone(), log.clone()];
        member.points = 6;

        assert_eq!(
            member.validate().unwrap_err(),
            MemberValidationError::DuplicatePointLogId(log.id)
        );
    }

    #[test]
    fn remove_history_entries_subtracts_removed_points() {
        let event = Event::new("Gathering", 3, "🤝").unwrap();
        let mut member = Member::new("Mert").unwrap();
        for at in 0..3 {
            member.record_award(PointLog::from_event(&event, at)).unwrap();
        }
        let ids = member
            .history
            .iter()
            .take(2)
            .map(|log| log.id)
            .collect::<HashSet<_>>();

        let points = member.remove_history_entries(&ids).unwrap();
        assert_eq!(points, 3);
        assert_eq!(member.points, 3);
        assert_eq!(member.history.len(), 1);
    }

    #[test]
    fn validate_detects_points_mismatch() {
        let mut member = Member::new("Zeynep").unwrap();
        member.points = 5;
        assert_eq!(
            member.validate().unwrap_err(),
            MemberValidationError::PointsMismatch {
                points: 5,
                history_total: 0
            }
        );
    }
}
