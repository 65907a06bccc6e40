use super::composition::{TeamObserver, TeamUpdate};
use crate::analysis::format::FormattedLookup;
use crate::api::client::StatsApiClient;
use crate::api::models::LookupResultDto;
use crate::error::AppError;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

/// Anything that can answer a team composition query.
pub trait TeamLookup: Send + Sync + 'static {
    fn lookup_team(&self, allies: &[String], enemies: &[String])
        -> Result<LookupResultDto, AppError>;
}

impl TeamLookup for StatsApiClient {
    fn lookup_team(
        &self,
        allies: &[String],
        enemies: &[String],
    ) -> Result<LookupResultDto, AppError> {
        StatsApiClient::lookup_team(self, allies, enemies)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub seq: u64,
    pub allies: Vec<String>,
    pub enemies: Vec<String>,
}

#[derive(Debug)]
pub struct LookupOutcome {
    pub seq: u64,
    pub result: Result<LookupResultDto, AppError>,
}

/// Numbers outgoing lookups and keeps only the response to the newest one.
#[derive(Debug, Default)]
pub struct LookupTracker {
    next_seq: u64,
    latest_issued: Option<u64>,
    current: Option<FormattedLookup>,
}

impl LookupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, update: &TeamUpdate) -> LookupRequest {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest_issued = Some(seq);

        LookupRequest {
            seq,
            allies: update.allies.clone(),
            enemies: update.enemies.clone(),
        }
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.latest_issued == Some(seq)
    }

    /// Stores the result if it answers the most recent request. Returns
    /// `None` for stale responses.
    pub fn accept(&mut self, seq: u64, result: LookupResultDto) -> Option<&FormattedLookup> {
        if !self.is_current(seq) {
            log::debug!(
                "Discarding stale lookup #{} (latest is #{:?})",
                seq,
                self.latest_issued
            );
            return None;
        }

        self.current = Some(FormattedLookup::from(result));
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&FormattedLookup> {
        self.current.as_ref()
    }
}

/// Issues a sequenced lookup request for every team change.
pub struct LookupDispatcher {
    tracker: Rc<RefCell<LookupTracker>>,
    outbox: Sender<LookupRequest>,
}

impl LookupDispatcher {
    pub fn new(tracker: Rc<RefCell<LookupTracker>>, outbox: Sender<LookupRequest>) -> Self {
        LookupDispatcher { tracker, outbox }
    }
}

impl TeamObserver for LookupDispatcher {
    fn team_updated(&mut self, update: &TeamUpdate) {
        let request = self.tracker.borrow_mut().issue(update);
        log::debug!(
            "Issuing lookup #{} after {} team change (allies={}, enemies={})",
            request.seq,
            update.side,
            request.allies.join(","),
            request.enemies.join(",")
        );

        if self.outbox.send(request).is_err() {
            log::warn!("Lookup queue closed; dropping request");
        }
    }
}

/// Runs one lookup on its own thread and reports back on `results`.
pub fn spawn_lookup<L: TeamLookup>(
    backend: Arc<L>,
    request: LookupRequest,
    results: Sender<LookupOutcome>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let result = backend.lookup_team(&request.allies, &request.enemies);
        let _ = results.send(LookupOutcome {
            seq: request.seq,
            result,
        });
    })
}
