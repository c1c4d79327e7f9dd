use crate::errors::TableError;
use crate::events::{EventBus, TableEvent, TableUpdate};
use cardroom_ai::{create_bot, Bot};
use cardroom_engine::config::TableConfig;
use cardroom_engine::errors::GameError;
use cardroom_engine::logger::HandLogger;
use cardroom_engine::player::PlayerAction;
use cardroom_engine::session::{Session, SessionEvent};
use cardroom_engine::variant::Variant;
use cardroom_engine::view::TableSnapshot;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub type TableId = String;

const DEFAULT_TABLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Holds independent tables side by side. Each table is guarded by its own
/// mutex, so operations on different tables never wait on each other.
pub struct TableManager {
    tables: RwLock<HashMap<TableId, Arc<Table>>>,
    event_bus: EventBus,
    history: Option<Mutex<HandLogger>>,
    table_ttl: Duration,
}

impl TableManager {
    pub fn new(event_bus: EventBus) -> Self {
        Self::with_ttl(event_bus, DEFAULT_TABLE_TTL)
    }

    pub fn with_ttl(event_bus: EventBus, ttl: Duration) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            event_bus,
            history: None,
            table_ttl: ttl,
        }
    }

    /// Appends every finished hand, from any table, to `logger`.
    pub fn with_history(mut self, logger: HandLogger) -> Self {
        self.history = Some(Mutex::new(logger));
        self
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn create_table(
        &self,
        variant: Variant,
        config: TableConfig,
    ) -> Result<TableId, TableError> {
        let id = Uuid::new_v4().to_string();
        let session = Session::new(variant, config)?;
        tracing::info!(
            table_id = %id,
            variant = %variant,
            seats = session.seat_count(),
            seed = session.seed(),
            "table created"
        );

        let table = Arc::new(Table::new(id.clone(), session));
        {
            let mut guard = self
                .tables
                .write()
                .map_err(|_| TableError::StoragePoisoned)?;
            guard.insert(id.clone(), Arc::clone(&table));
        }

        let state = table.lock()?;
        self.publish(&table, &state, vec![TableEvent::TableCreated { variant }]);
        Ok(id)
    }

    pub fn get_table(&self, id: &TableId) -> Result<Arc<Table>, TableError> {
        let guard = self
            .tables
            .read()
            .map_err(|_| TableError::StoragePoisoned)?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| TableError::NotFound(id.clone()))
    }

    /// Seats a player in the lowest free seat.
    pub fn join(&self, id: &TableId, identity: &str) -> Result<usize, TableError> {
        self.seat(id, identity, None)
    }

    /// Seats a bot that acts on its own whenever it holds the turn.
    pub fn add_bot(&self, id: &TableId, identity: &str, kind: &str) -> Result<usize, TableError> {
        let bot = create_bot(kind).ok_or_else(|| TableError::UnknownBot(kind.to_string()))?;
        self.seat(id, identity, Some(bot))
    }

    fn seat(
        &self,
        id: &TableId,
        identity: &str,
        bot: Option<Box<dyn Bot>>,
    ) -> Result<usize, TableError> {
        let table = self.get_table(id)?;
        let mut state = table.lock()?;
        let seat = state.session.add_player(identity)?;
        if let Some(bot) = bot {
            tracing::debug!(table_id = %id, seat, bot = bot.name(), "bot seated");
            state.bots.insert(seat, bot);
        }
        table.touch();
        let identity = identity.trim().to_string();
        self.publish(&table, &state, vec![TableEvent::PlayerJoined { seat, identity }]);
        Ok(seat)
    }

    /// Removes a player; mid-hand they fold and forfeit what they committed.
    pub fn leave(&self, id: &TableId, seat: usize) -> Result<TableSnapshot, TableError> {
        self.mutate(id, None, |state| {
            state.bots.remove(&seat);
            state.session.remove_player(seat)
        })
    }

    pub fn start_hand(&self, id: &TableId) -> Result<TableSnapshot, TableError> {
        self.mutate(id, None, |state| state.session.start_hand())
    }

    pub fn new_hand(&self, id: &TableId) -> Result<TableSnapshot, TableError> {
        self.mutate(id, None, |state| state.session.new_hand())
    }

    /// Applies `action` for `seat` and returns what that seat now sees.
    pub fn act(
        &self,
        id: &TableId,
        seat: usize,
        action: PlayerAction,
    ) -> Result<TableSnapshot, TableError> {
        self.mutate(id, Some(seat), |state| {
            state.session.apply_action(seat, action)
        })
    }

    pub fn reveal(&self, id: &TableId, seat: usize) -> Result<TableSnapshot, TableError> {
        self.mutate(id, Some(seat), |state| state.session.reveal(seat))
    }

    /// Clears every seat and the hand counter.
    pub fn reset(&self, id: &TableId) -> Result<TableSnapshot, TableError> {
        self.mutate(id, None, |state| {
            state.bots.clear();
            Ok(state.session.hard_reset())
        })
    }

    pub fn view(&self, id: &TableId, viewer: Option<usize>) -> Result<TableSnapshot, TableError> {
        let table = self.get_table(id)?;
        let state = table.lock()?;
        Ok(state.session.view(viewer))
    }

    pub fn destroy(&self, id: &TableId) -> Result<(), TableError> {
        let removed = {
            let mut guard = self
                .tables
                .write()
                .map_err(|_| TableError::StoragePoisoned)?;
            guard.remove(id)
        };
        if removed.is_none() {
            return Err(TableError::NotFound(id.clone()));
        }
        self.close(id, "destroyed");
        Ok(())
    }

    pub fn active_tables(&self) -> Vec<TableId> {
        match self.tables.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().keys().cloned().collect(),
        }
    }

    /// Drops tables idle for longer than the TTL and returns their ids.
    pub fn cleanup_expired(&self) -> Vec<TableId> {
        let mut expired = Vec::new();
        {
            let mut guard = match self.tables.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.retain(|id, table| {
                if table.is_expired(self.table_ttl) {
                    expired.push(id.clone());
                    false
                } else {
                    true
                }
            });
        }
        for id in &expired {
            self.close(id, "expired");
        }
        expired
    }

    fn close(&self, id: &TableId, reason: &str) {
        tracing::info!(table_id = %id, reason, "table closed");
        self.event_bus.broadcast(
            id,
            TableUpdate {
                table_id: id.clone(),
                event: TableEvent::TableClosed {
                    reason: reason.to_string(),
                },
                snapshot: None,
            },
        );
        self.event_bus.drop_table(id);
    }

    /// Runs `op` under the table lock, lets seated bots play out their turns,
    /// records finished hands and broadcasts what happened.
    fn mutate<F>(
        &self,
        id: &TableId,
        viewer: Option<usize>,
        op: F,
    ) -> Result<TableSnapshot, TableError>
    where
        F: FnOnce(&mut TableState) -> Result<Vec<SessionEvent>, GameError>,
    {
        let table = self.get_table(id)?;
        let mut state = table.lock()?;
        let mut events = op(&mut *state).inspect_err(|err| {
            tracing::debug!(table_id = %id, error = %err, "operation rejected");
        })?;
        events.extend(state.play_bots(id)?);
        table.touch();

        if events
            .iter()
            .any(|e| matches!(e, SessionEvent::HandComplete { .. }))
        {
            self.record_hand(id, &state.session);
        }

        self.publish(
            &table,
            &state,
            events.into_iter().map(TableEvent::Session).collect(),
        );
        Ok(state.session.view(viewer))
    }

    fn record_hand(&self, id: &TableId, session: &Session) {
        let (Some(history), Some(record)) = (&self.history, session.last_record()) else {
            return;
        };
        let mut logger = match history.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut record = record.clone();
        record.hand_id = logger.next_id();
        record.meta = Some(serde_json::json!({ "table_id": id }));
        if let Err(err) = logger.write(&record) {
            tracing::error!(table_id = %id, error = %err, "failed to write hand record");
        }
    }

    // Broadcast while the table lock is held so updates from one table reach
    // subscribers in the order they were applied.
    fn publish(&self, table: &Table, state: &TableState, events: Vec<TableEvent>) {
        if events.is_empty() {
            return;
        }
        let snapshot = state.session.view(None);
        for event in events {
            self.event_bus.broadcast(
                &table.id,
                TableUpdate {
                    table_id: table.id.clone(),
                    event,
                    snapshot: Some(snapshot.clone()),
                },
            );
        }
    }
}

/// One table: its session, the bots sitting at it and when it was last used.
pub struct Table {
    id: TableId,
    state: Mutex<TableState>,
    last_active: Mutex<Instant>,
}

pub(crate) struct TableState {
    session: Session,
    bots: HashMap<usize, Box<dyn Bot>>,
}

impl TableState {
    /// Lets bots act while one of them holds the turn.
    fn play_bots(&mut self, id: &TableId) -> Result<Vec<SessionEvent>, GameError> {
        let mut events = Vec::new();
        while let Some(seat) = self.session.current_actor() {
            let Some(bot) = self.bots.get(&seat) else {
                break;
            };
            let action = bot.choose_action(&self.session.view(Some(seat)));
            tracing::debug!(table_id = %id, seat, bot = bot.name(), ?action, "bot acting");
            match self.session.apply_action(seat, action) {
                Ok(applied) => events.extend(applied),
                Err(err) => {
                    tracing::warn!(table_id = %id, seat, error = %err, "bot action rejected, folding");
                    events.extend(self.session.apply_action(seat, PlayerAction::Fold)?);
                }
            }
        }
        Ok(events)
    }
}

impl Table {
    fn new(id: TableId, session: Session) -> Self {
        Self {
            id,
            state: Mutex::new(TableState {
                session,
                bots: HashMap::new(),
            }),
            last_active: Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> &TableId {
        &self.id
    }

    /// Checks the session's chip and pointer invariants.
    pub fn check_invariants(&self) -> Result<(), TableError> {
        self.lock()?
            .session
            .check_invariants()
            .map_err(|msg| TableError::Game(GameError::IllegalAction(msg)))
    }

    fn lock(&self) -> Result<MutexGuard<'_, TableState>, TableError> {
        self.state.lock().map_err(|_| TableError::StoragePoisoned)
    }

    fn touch(&self) {
        if let Ok(mut guard) = self.last_active.lock() {
            *guard = Instant::now();
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        match self.last_active.lock() {
            Ok(last) => last.elapsed() >= ttl,
            Err(_) => false,
        }
    }

    #[cfg(test)]
    fn force_last_active(&self, at: Instant) {
        if let Ok(mut guard) = self.last_active.lock() {
            *guard = at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(variant: Variant, seed: u64) -> TableConfig {
        TableConfig::default_for(variant).with_seed(seed)
    }

    fn manager(ttl: Duration) -> TableManager {
        TableManager::with_ttl(EventBus::new(), ttl)
    }

    #[test]
    fn cleanup_removes_only_stale_tables() {
        let manager = manager(Duration::from_secs(60));
        let stale = manager
            .create_table(Variant::Holdem, config(Variant::Holdem, 1))
            .expect("create");
        let fresh = manager
            .create_table(Variant::Stud, config(Variant::Stud, 2))
            .expect("create");
        let mut sub = manager.event_bus().subscribe(stale.clone());

        manager
            .get_table(&stale)
            .expect("table")
            .force_last_active(Instant::now() - Duration::from_secs(120));
        let expired = manager.cleanup_expired();

        assert_eq!(expired, vec![stale.clone()]);
        assert!(matches!(
            manager.get_table(&stale),
            Err(TableError::NotFound(_))
        ));
        assert!(manager.get_table(&fresh).is_ok());

        let update = sub.receiver().try_recv().expect("closed update");
        assert_eq!(
            update.event,
            TableEvent::TableClosed {
                reason: "expired".into()
            }
        );
    }

    #[test]
    fn activity_keeps_a_table_alive() {
        let manager = manager(Duration::from_secs(60));
        let id = manager
            .create_table(Variant::Holdem, config(Variant::Holdem, 3))
            .expect("create");
        let table = manager.get_table(&id).expect("table");
        table.force_last_active(Instant::now() - Duration::from_secs(120));

        manager.join(&id, "ann").expect("join");
        assert!(manager.cleanup_expired().is_empty());
    }

    #[test]
    fn bots_play_their_turns_until_a_person_is_due() {
        let manager = manager(DEFAULT_TABLE_TTL);
        let id = manager
            .create_table(Variant::Holdem, config(Variant::Holdem, 11))
            .expect("create");
        let human = manager.join(&id, "ann").expect("join");
        manager.add_bot(&id, "bot-1", "calling").expect("bot");
        manager.add_bot(&id, "bot-2", "calling").expect("bot");

        let view = manager.start_hand(&id).expect("start");
        if view.hand_active {
            assert_eq!(view.current_actor, Some(human));
        }
    }
}
