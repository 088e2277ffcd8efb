//! Roster use-case service.
//!
//! # Responsibility
//! - Own the member/event collections and the current event selection.
//! - Apply each user intent as one command, then persist the touched
//!   collection through the repository.
//!
//! # Invariants
//! - Validation runs before any state change.
//! - Mutations are staged on a copy, persisted, then committed; a failed save
//!   leaves in-memory state untouched.
//! - Deleting an event never touches member points or history.

use crate::model::event::{Event, EventId};
use crate::model::member::{now_epoch_ms, Member, MemberId, PointLog};
use crate::repo::kv_store::{RepoError, RepoResult};
use crate::repo::roster_repo::RosterRepository;
use crate::service::ranking::RankedMembers;
use log::{error, info};
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RosterResult<T> = Result<T, RosterError>;

/// Service error for roster use-cases.
#[derive(Debug)]
pub enum RosterError {
    /// Member or event name is empty after trimming.
    EmptyName,
    /// Event point text is not an integer.
    InvalidPoints(String),
    /// Award requested without a selected event.
    NoEventSelected,
    EventNotFound(EventId),
    HistoryIndexOutOfRange {
        member_id: MemberId,
        index: usize,
        len: usize,
    },
    /// Applying the change would overflow the member's point total.
    PointsOverflow(MemberId),
    /// Persistence-layer failure; in-memory state was not changed.
    Repo(RepoError),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::InvalidPoints(text) => write!(f, "points must be an integer, got `{text}`"),
            Self::NoEventSelected => write!(f, "no event selected"),
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
            Self::HistoryIndexOutOfRange {
                member_id,
                index,
                len,
            } => write!(
                f,
                "history index {index} out of range for member {member_id} (len {len})"
            ),
            Self::PointsOverflow(id) => write!(f, "point total overflow for member {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for RosterError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Club roster service over a repository implementation.
pub struct RosterService<R: RosterRepository> {
    repo: R,
    members: Vec<Member>,
    events: Vec<Event>,
    selected_event: Option<EventId>,
}

impl<R: RosterRepository> RosterService<R> {
    /// Loads both collections and selects the first event, if any.
    pub fn load(repo: R) -> RepoResult<Self> {
        let members = repo.load_members()?;
        let events = repo.load_events()?;
        let selected_event = events.first().map(|event| event.id);
        info!(
            "event=roster_load module=roster status=ok members={} events={}",
            members.len(),
            events.len()
        );
        Ok(Self {
            repo,
            members,
            events,
            selected_event,
        })
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.selected_event.and_then(|id| self.event(id))
    }

    /// Makes `id` the event used by [`Self::award_point_to_selected`].
    pub fn select_event(&mut self, id: EventId) -> RosterResult<&Event> {
        let position = self
            .events
            .iter()
            .position(|event| event.id == id)
            .ok_or(RosterError::EventNotFound(id))?;
        self.selected_event = Some(id);
        Ok(&self.events[position])
    }

    /// Adds a member with zero points. The name is trimmed.
    pub fn add_member(&mut self, name: &str) -> RosterResult<MemberId> {
        let member = Member::new(name).map_err(|_| RosterError::EmptyName)?;
        let member_id = member.id;

        let mut staged = self.members.clone();
        staged.push(member);
        self.commit_members(staged)?;

        info!(
            "event=member_add module=roster status=ok member_id={} members={}",
            member_id,
            self.members.len()
        );
        Ok(member_id)
    }

    /// Removes a member. Returns `false` (and writes nothing) when absent.
    pub fn delete_member(&mut self, id: MemberId) -> RosterResult<bool> {
        if self.member(id).is_none() {
            return Ok(false);
        }

        let mut staged = self.members.clone();
        staged.retain(|member| member.id != id);
        self.commit_members(staged)?;

        info!(
            "event=member_delete module=roster status=ok member_id={} members={}",
            id,
            self.members.len()
        );
        Ok(true)
    }

    /// Appends a new event parsed from form input.
    ///
    /// `points_text` is trimmed and must parse as an integer.
    pub fn add_event(
        &mut self,
        name: &str,
        points_text: &str,
        glyph: &str,
    ) -> RosterResult<EventId> {
        if name.trim().is_empty() {
            return Err(RosterError::EmptyName);
        }
        let points = points_text
            .trim()
            .parse::<i64>()
            .map_err(|_| RosterError::InvalidPoints(points_text.to_string()))?;
        let event = Event::new(name, points, glyph).map_err(|_| RosterError::EmptyName)?;
        let event_id = event.id;

        let mut staged = self.events.clone();
        staged.push(event);
        self.commit_events(staged)?;

        info!(
            "event=event_add module=roster status=ok event_id={} points={} events={}",
            event_id,
            points,
            self.events.len()
        );
        Ok(event_id)
    }

    /// Removes an event without touching any member.
    ///
    /// If it was selected, selection moves to the first remaining event.
    pub fn delete_event(&mut self, id: EventId) -> RosterResult<bool> {
        if self.event(id).is_none() {
            return Ok(false);
        }

        let mut staged = self.events.clone();
        staged.retain(|event| event.id != id);
        self.commit_events(staged)?;

        if self.selected_event == Some(id) {
            self.selected_event = self.events.first().map(|event| event.id);
        }

        info!(
            "event=event_delete module=roster status=ok event_id={} events={}",
            id,
            self.events.len()
        );
        Ok(true)
    }

    /// Awards `event_id` to a member.
    ///
    /// Returns the recorded log entry, or `None` when the member is unknown.
    pub fn award_point(
        &mut self,
        member_id: MemberId,
        event_id: EventId,
    ) -> RosterResult<Option<PointLog>> {
        let event = self
            .event(event_id)
            .cloned()
            .ok_or(RosterError::EventNotFound(event_id))?;
        self.award_event(member_id, &event)
    }

    /// Awards the currently selected event to a member.
    pub fn award_point_to_selected(
        &mut self,
        member_id: MemberId,
    ) -> RosterResult<Option<PointLog>> {
        let event = self
            .selected_event()
            .cloned()
            .ok_or(RosterError::NoEventSelected)?;
        self.award_event(member_id, &event)
    }

    fn award_event(
        &mut self,
        member_id: MemberId,
        event: &Event,
    ) -> RosterResult<Option<PointLog>> {
        let Some(position) = self.position_of_member(member_id) else {
            return Ok(None);
        };

        let log = PointLog::from_event(event, now_epoch_ms());
        let mut staged = self.members.clone();
        staged[position]
            .record_award(log.clone())
            .map_err(|_| RosterError::PointsOverflow(member_id))?;
        self.commit_members(staged)?;

        info!(
            "event=point_award module=roster status=ok member_id={} event_id={} points={} log_id={}",
            member_id, event.id, log.points, log.id
        );
        Ok(Some(log))
    }

    /// Deletes one history entry; see [`Self::delete_history_entries`].
    pub fn delete_history_entry(
        &mut self,
        member_id: MemberId,
        index: usize,
    ) -> RosterResult<Option<i64>> {
        self.delete_history_entries(member_id, &[index])
    }

    /// Deletes a batch of history entries by position.
    ///
    /// Positions refer to the history as it was before the call. Entries are
    /// resolved to ids up front and removed by id, so the batch result does
    /// not depend on index order. Duplicate indices count once.
    ///
    /// Returns the member's new point total, or `None` when the member is
    /// unknown.
    pub fn delete_history_entries(
        &mut self,
        member_id: MemberId,
        indices: &[usize],
    ) -> RosterResult<Option<i64>> {
        let Some(position) = self.position_of_member(member_id) else {
            return Ok(None);
        };

        let history = &self.members[position].history;
        let unique = indices.iter().copied().collect::<BTreeSet<_>>();
        if let Some(&index) = unique.iter().find(|&&index| index >= history.len()) {
            return Err(RosterError::HistoryIndexOutOfRange {
                member_id,
                index,
                len: history.len(),
            });
        }
        if unique.is_empty() {
            return Ok(Some(self.members[position].points));
        }

        let ids = unique
            .iter()
            .map(|&index| history[index].id)
            .collect::<HashSet<_>>();

        let mut staged = self.members.clone();
        let points = staged[position]
            .remove_history_entries(&ids)
            .map_err(|_| RosterError::PointsOverflow(member_id))?;
        self.commit_members(staged)?;

        info!(
            "event=history_delete module=roster status=ok member_id={} entries={} points={}",
            member_id,
            ids.len(),
            points
        );
        Ok(Some(points))
    }

    /// Zeroes every member's points and history. Idempotent.
    pub fn reset_all(&mut self) -> RosterResult<()> {
        let mut staged = self.members.clone();
        staged.iter_mut().for_each(Member::reset);
        self.commit_members(staged)?;

        info!(
            "event=roster_reset module=roster status=ok members={}",
            self.members.len()
        );
        Ok(())
    }

    /// Saves the current event list as is.
    ///
    /// Front-ends that reopen the store per call use this after a first-run
    /// load so seeded event ids stay stable across calls.
    pub fn persist_events(&mut self) -> RosterResult<()> {
        self.commit_events(self.events.clone())?;
        info!(
            "event=events_persist module=roster status=ok events={}",
            self.events.len()
        );
        Ok(())
    }

    /// Leaderboard view over the current members.
    pub fn ranked_members(&self) -> RankedMembers<'_> {
        RankedMembers::new(&self.members)
    }

    fn position_of_member(&self, id: MemberId) -> Option<usize> {
        self.members.iter().position(|member| member.id == id)
    }

    fn commit_members(&mut self, staged: Vec<Member>) -> RosterResult<()> {
        if let Err(err) = self.repo.save_members(&staged) {
            error!(
                "event=roster_persist module=roster status=error collection=members error={}",
                err
            );
            return Err(err.into());
        }
        self.members = staged;
        Ok(())
    }

    fn commit_events(&mut self, staged: Vec<Event>) -> RosterResult<()> {
        if let Err(err) = self.repo.save_events(&staged) {
            error!(
                "event=roster_persist module=roster status=error collection=events error={}",
                err
            );
            return Err(err.into());
        }
        self.events = staged;
        Ok(())
    }
}
