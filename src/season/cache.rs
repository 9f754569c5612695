//! Bounded LRU cache in front of a season data provider. Repeated identical
//! selections short-circuit here instead of hitting the provider again;
//! least-recently-used sessions are evicted once the capacity is reached.
//! Schedules are memoized per year without bound, they are a handful of
//! strings.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::errors::LapdeltaError;
use crate::season::{EventInfo, SeasonDataProvider, SessionData, SessionKey, SessionKind};

pub const DEFAULT_CACHE_SESSIONS: usize = 8;

pub struct SessionCache<P> {
    inner: P,
    capacity: usize,
    sessions: HashMap<SessionKey, SessionData>,
    // front = least recently used
    order: VecDeque<SessionKey>,
    schedules: HashMap<u16, Vec<EventInfo>>,
}

impl<P: SeasonDataProvider> SessionCache<P> {
    pub fn new(inner: P, capacity: usize) -> Self {
        Self {
            inner,
            capacity: capacity.max(1),
            sessions: HashMap::new(),
            order: VecDeque::new(),
            schedules: HashMap::new(),
        }
    }

    fn touch(&mut self, key: &SessionKey) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        self.order.push_back(key.clone());
    }

    fn evict_to_capacity(&mut self) {
        while self.sessions.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                debug!(
                    "Evicting {} {} ({}) from the session cache",
                    evicted.event_name, evicted.year, evicted.kind
                );
                self.sessions.remove(&evicted);
            } else {
                break;
            }
        }
    }
}

impl<P: SeasonDataProvider> SeasonDataProvider for SessionCache<P> {
    fn event_schedule(&mut self, year: u16) -> Result<Vec<EventInfo>, LapdeltaError> {
        if let Some(schedule) = self.schedules.get(&year) {
            return Ok(schedule.clone());
        }
        let schedule = self.inner.event_schedule(year)?;
        self.schedules.insert(year, schedule.clone());
        Ok(schedule)
    }

    fn load_session(
        &mut self,
        year: u16,
        event_name: &str,
        kind: SessionKind,
    ) -> Result<SessionData, LapdeltaError> {
        let key = SessionKey {
            year,
            event_name: event_name.to_string(),
            kind,
        };
        if let Some(session) = self.sessions.get(&key) {
            let session = session.clone();
            self.touch(&key);
            return Ok(session);
        }
        let session = self.inner.load_session(year, event_name, kind)?;
        self.sessions.insert(key.clone(), session.clone());
        self.touch(&key);
        self.evict_to_capacity();
        Ok(session)
    }
}
