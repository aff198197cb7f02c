//! Event and settings persistence.
//!
//! Everything lives in a key-value store under two keys: one holding the
//! JSON array of events, one holding the settings object. Every operation
//! reads the whole blob, changes it and writes it back.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use chrono::{Datelike, Local, NaiveDate, TimeZone};

use crate::error::{CalError, CalResult};
use crate::event::Event;
use crate::settings::Settings;

pub const EVENTS_KEY: &str = "@CuteCalendar:events";
pub const SETTINGS_KEY: &str = "@CuteCalendar:settings";

/// A string-to-string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> CalResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> CalResult<()>;
    fn remove(&mut self, key: &str) -> CalResult<()>;
}

/// Typed access to the events and settings blobs.
#[derive(Debug, Clone)]
pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Storage { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    // EVENTS:

    /// All stored events, in stored order.
    pub fn events(&self) -> CalResult<Vec<Event>> {
        match self.store.get(EVENTS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn save_events(&mut self, events: &[Event]) -> CalResult<()> {
        let json = serde_json::to_string(events)?;
        self.store.set(EVENTS_KEY, &json)
    }

    pub fn add_event(&mut self, event: Event) -> CalResult<()> {
        let mut events = self.events()?;
        log::debug!("Adding event {}", event.id);
        events.push(event);
        self.save_events(&events)
    }

    /// Replace the stored event with the same id.
    /// Returns false (and writes nothing) if no such event exists.
    pub fn update_event(&mut self, updated: Event) -> CalResult<bool> {
        let mut events = self.events()?;

        let Some(slot) = events.iter_mut().find(|e| e.id == updated.id) else {
            log::debug!("No event {} to update", updated.id);
            return Ok(false);
        };

        *slot = updated;
        self.save_events(&events)?;
        Ok(true)
    }

    /// Remove the event with `id`. Returns whether one was removed.
    pub fn delete_event(&mut self, id: &str) -> CalResult<bool> {
        let mut events = self.events()?;
        let before = events.len();
        events.retain(|e| e.id != id);

        if events.len() == before {
            return Ok(false);
        }

        self.save_events(&events)?;
        Ok(true)
    }

    pub fn find_event(&self, id: &str) -> CalResult<Option<Event>> {
        Ok(self.events()?.into_iter().find(|e| e.id == id))
    }

    /// Like [`Storage::find_event`], but a missing id is an error.
    pub fn get_event(&self, id: &str) -> CalResult<Event> {
        self.find_event(id)?
            .ok_or_else(|| CalError::EventNotFound(id.to_string()))
    }

    /// Events starting on `date` in the local time zone.
    pub fn events_by_date(&self, date: NaiveDate) -> CalResult<Vec<Event>> {
        self.events_by_date_in(&Local, date)
    }

    pub fn events_by_date_in<Tz: TimeZone>(
        &self,
        tz: &Tz,
        date: NaiveDate,
    ) -> CalResult<Vec<Event>> {
        let mut events = self.events()?;
        events.retain(|e| e.start_day_in(tz) == date);
        Ok(events)
    }

    /// Events starting in `(year, month0)` in the local time zone.
    /// `month0` is 0-based.
    pub fn events_by_month(&self, year: i32, month0: u32) -> CalResult<Vec<Event>> {
        self.events_by_month_in(&Local, year, month0)
    }

    pub fn events_by_month_in<Tz: TimeZone>(
        &self,
        tz: &Tz,
        year: i32,
        month0: u32,
    ) -> CalResult<Vec<Event>> {
        let mut events = self.events()?;
        events.retain(|e| {
            let day = e.start_day_in(tz);
            day.year() == year && day.month0() == month0
        });
        Ok(events)
    }

    // SETTINGS:

    /// Stored settings, or the defaults when none have been saved.
    pub fn settings(&self) -> CalResult<Settings> {
        match self.store.get(SETTINGS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Settings::default()),
        }
    }

    pub fn save_settings(&mut self, settings: &Settings) -> CalResult<()> {
        let json = serde_json::to_string(settings)?;
        self.store.set(SETTINGS_KEY, &json)
    }

    /// Update one preference by name and save. Returns the new settings.
    pub fn update_setting(&mut self, key: &str, value: &str) -> CalResult<Settings> {
        let mut settings = self.settings()?;
        settings.set(key, value)?;
        self.save_settings(&settings)?;
        Ok(settings)
    }

    // LIFECYCLE:

    /// Remove all events and settings.
    pub fn clear_all(&mut self) -> CalResult<()> {
        self.store.remove(EVENTS_KEY)?;
        self.store.remove(SETTINGS_KEY)?;
        log::info!("Cleared all stored events and settings");
        Ok(())
    }

    /// Write default settings if none are stored yet.
    /// Returns true if the defaults were written.
    pub fn initialize_if_needed(&mut self) -> CalResult<bool> {
        if self.store.get(SETTINGS_KEY)?.is_some() {
            return Ok(false);
        }

        self.save_settings(&Settings::default())?;
        log::info!("Initialized default settings");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Contact;
    use crate::settings::{StartDayOfWeek, Theme};
    use chrono::{DateTime, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn event(id: &str, start: DateTime<Utc>) -> Event {
        Event {
            id: id.to_string(),
            ..Event::new(start)
        }
        .with_contact(Contact::new(format!("Contact {}", id)))
    }

    fn storage() -> Storage<MemoryStore> {
        Storage::new(MemoryStore::new())
    }

    #[test]
    fn empty_store_has_no_events_and_default_settings() {
        let storage = storage();
        assert!(storage.events().unwrap().is_empty());
        assert_eq!(storage.settings().unwrap(), Settings::default());
    }

    #[test]
    fn add_then_find() {
        let mut storage = storage();
        storage.add_event(event("e1", at(2025, 5, 15, 9))).unwrap();
        storage.add_event(event("e2", at(2025, 5, 16, 9))).unwrap();

        let ids: Vec<_> = storage.events().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, ["e1", "e2"]);

        let found = storage.find_event("e2").unwrap().unwrap();
        assert_eq!(found.start_date, at(2025, 5, 16, 9));
        assert!(storage.find_event("missing").unwrap().is_none());
    }

    #[test]
    fn get_event_reports_missing_id() {
        let mut storage = storage();
        storage.add_event(event("e1", at(2025, 5, 15, 9))).unwrap();

        assert_eq!(storage.get_event("e1").unwrap().id, "e1");
        match storage.get_event("missing") {
            Err(CalError::EventNotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("Expected EventNotFound, got {:?}", other),
        }
    }

    #[test]
    fn update_replaces_matching_event() {
        let mut storage = storage();
        storage.add_event(event("e1", at(2025, 5, 15, 9))).unwrap();

        let mut changed = event("e1", at(2025, 5, 20, 14));
        changed.reminder = Some(10);
        assert!(storage.update_event(changed).unwrap());

        let stored = storage.find_event("e1").unwrap().unwrap();
        assert_eq!(stored.start_date, at(2025, 5, 20, 14));
        assert_eq!(stored.reminder, Some(10));
        assert_eq!(storage.events().unwrap().len(), 1);
    }

    #[test]
    fn update_of_unknown_event_is_a_no_op() {
        let mut storage = storage();
        assert!(!storage.update_event(event("ghost", at(2025, 5, 15, 9))).unwrap());
        assert!(storage.events().unwrap().is_empty());
        assert!(storage.into_inner().is_empty());
    }

    #[test]
    fn delete_by_id() {
        let mut storage = storage();
        storage.add_event(event("e1", at(2025, 5, 15, 9))).unwrap();
        storage.add_event(event("e2", at(2025, 5, 16, 9))).unwrap();

        assert!(storage.delete_event("e1").unwrap());
        assert!(!storage.delete_event("e1").unwrap());

        let ids: Vec<_> = storage.events().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, ["e2"]);
    }

    #[test]
    fn filter_by_date_and_month() {
        let mut storage = storage();
        storage
            .save_events(&[
                event("may15-morning", at(2025, 5, 15, 9)),
                event("may15-evening", at(2025, 5, 15, 21)),
                event("may30", at(2025, 5, 30, 9)),
                event("june1", at(2025, 6, 1, 9)),
                event("may-last-year", at(2024, 5, 15, 9)),
            ])
            .unwrap();

        let day = storage
            .events_by_date_in(&Utc, NaiveDate::from_ymd_opt(2025, 5, 15).unwrap())
            .unwrap();
        assert_eq!(day.len(), 2);

        let month: Vec<_> = storage
            .events_by_month_in(&Utc, 2025, 4)
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(month, ["may15-morning", "may15-evening", "may30"]);
    }

    #[test]
    fn reads_blob_written_by_the_mobile_app() {
        let mut store = MemoryStore::new();
        store
            .set(
                EVENTS_KEY,
                r#"[{"id":"e1","contact":{"id":"c1","name":"Alice","phone":"","email":"","notes":""},"startDate":"2025-05-15T09:00:00.000Z","reminder":30}]"#,
            )
            .unwrap();
        store
            .set(
                SETTINGS_KEY,
                r#"{"theme":"dark","defaultView":"month","defaultReminderTime":15,"startDayOfWeek":1}"#,
            )
            .unwrap();

        let storage = Storage::new(store);
        let events = storage.events().unwrap();
        assert_eq!(events[0].display_name(), "Alice");

        let settings = storage.settings().unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.start_day_of_week, StartDayOfWeek::Monday);
        assert_eq!(settings.default_reminder_time, 15);
    }

    #[test]
    fn corrupt_blob_is_a_serialization_error() {
        let mut store = MemoryStore::new();
        store.set(EVENTS_KEY, "not json").unwrap();
        let storage = Storage::new(store);
        assert!(matches!(storage.events(), Err(CalError::Serialization(_))));
    }

    #[test]
    fn update_setting_persists() {
        let mut storage = storage();
        let updated = storage.update_setting("startDayOfWeek", "1").unwrap();
        assert_eq!(updated.start_day_of_week, StartDayOfWeek::Monday);
        assert_eq!(storage.settings().unwrap().start_day_of_week, StartDayOfWeek::Monday);

        assert!(storage.update_setting("startDayOfWeek", "5").is_err());
        assert_eq!(storage.settings().unwrap().start_day_of_week, StartDayOfWeek::Monday);
    }

    #[test]
    fn initialize_writes_defaults_once() {
        let mut storage = storage();
        assert!(storage.initialize_if_needed().unwrap());
        storage.update_setting("theme", "light").unwrap();
        assert!(!storage.initialize_if_needed().unwrap());
        assert_eq!(storage.settings().unwrap().theme, Theme::Light);
    }

    #[test]
    fn clear_all_removes_everything() {
        let mut storage = storage();
        storage.add_event(event("e1", at(2025, 5, 15, 9))).unwrap();
        storage.update_setting("theme", "dark").unwrap();

        storage.clear_all().unwrap();
        assert!(storage.events().unwrap().is_empty());
        assert_eq!(storage.settings().unwrap(), Settings::default());
    }

    #[test]
    fn file_backed_storage_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::new(FileStore::new(dir.path()));
        storage.add_event(event("e1", at(2025, 5, 15, 9))).unwrap();

        let reopened = Storage::new(FileStore::new(dir.path()));
        assert_eq!(reopened.events().unwrap(), storage.events().unwrap());
        assert!(dir.path().join("CuteCalendar-events.json").exists());
    }
}
