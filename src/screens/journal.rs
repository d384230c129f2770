use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::models::JournalEntry;
use crate::repository::JournalRepository;

use super::machine::{Screen, ScreenCtx};

pub const MOODS: &[&str] = &[
    "Happy",
    "Excited",
    "Calm",
    "Tired",
    "Adventurous",
    "Relaxed",
    "Surprised",
];

pub const WEATHER_OPTIONS: &[&str] = &["Sunny", "Cloudy", "Rainy", "Snowy", "Windy", "Foggy"];

#[derive(Debug, Clone, Default)]
pub struct JournalState {
    pub is_loading: bool,
    pub trip_id: String,
    pub entries: Vec<JournalEntry>,
    pub selected_date: Option<NaiveDate>,
    pub selected_entry: Option<JournalEntry>,
    pub is_adding: bool,
    pub is_editing: bool,
    pub error: Option<String>,
}

impl JournalState {
    pub fn for_trip(trip_id: impl Into<String>) -> Self {
        Self {
            trip_id: trip_id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub enum JournalIntent {
    SetTrip(String),
    LoadEntries,
    SelectDate(NaiveDate),
    AddEntry(JournalEntry),
    UpdateEntry(JournalEntry),
    DeleteEntry { entry_id: String },
    StartAdding,
    StartEditing,
    CancelEditing,
    ExportJournal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEffect {
    ShowError(String),
    EntrySaved,
    EntryDeleted,
    ShowExportSuccess { file_path: String },
}

pub struct JournalScreen {
    entries: JournalRepository,
}

impl JournalScreen {
    pub fn new(entries: JournalRepository) -> Self {
        Self { entries }
    }

    async fn fail(&self, err: impl ToString, ctx: &ScreenCtx<Self>) {
        let message = err.to_string();
        ctx.update(|s| {
            s.is_loading = false;
            s.error = Some(message.clone());
        });
        ctx.effect(JournalEffect::ShowError(message)).await;
    }

    async fn load(&self, ctx: &ScreenCtx<Self>) {
        let snapshot = ctx.state();
        if snapshot.trip_id.is_empty() {
            return;
        }
        ctx.update(|s| {
            s.is_loading = true;
            s.error = None;
        });
        match self.entries.entries_for_trip(&snapshot.trip_id).await {
            Ok(entries) => {
                // Keep the selection pointing at the freshly loaded row.
                let selected = snapshot.selected_date.and_then(|date| {
                    entries.iter().find(|entry| entry.date == date).cloned()
                });
                ctx.update(|s| {
                    s.is_loading = false;
                    s.entries = entries;
                    s.selected_entry = selected;
                });
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }

    async fn select_date(&self, date: NaiveDate, ctx: &ScreenCtx<Self>) {
        let trip_id = ctx.state().trip_id;
        match self.entries.entry_by_date(&trip_id, date).await {
            Ok(entry) => ctx.update(|s| {
                s.selected_date = Some(date);
                s.selected_entry = entry;
            }),
            Err(err) => self.fail(err, ctx).await,
        }
    }

    async fn add_entry(&self, mut entry: JournalEntry, ctx: &ScreenCtx<Self>) {
        entry.trip_id = ctx.state().trip_id;
        entry.touch();
        match self.entries.insert_entry(&entry).await {
            Ok(()) => {
                ctx.update(|s| {
                    s.is_adding = false;
                    s.is_editing = false;
                });
                ctx.effect(JournalEffect::EntrySaved).await;
                self.load(ctx).await;
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }

    async fn update_entry(&self, mut entry: JournalEntry, ctx: &ScreenCtx<Self>) {
        entry.touch();
        match self.entries.update_entry(&entry).await {
            Ok(()) => {
                ctx.update(|s| {
                    s.is_adding = false;
                    s.is_editing = false;
                });
                ctx.effect(JournalEffect::EntrySaved).await;
                self.load(ctx).await;
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }

    async fn delete_entry(&self, entry_id: &str, ctx: &ScreenCtx<Self>) {
        match self.entries.delete_entry_by_id(entry_id).await {
            Ok(()) => {
                ctx.update(|s| {
                    if s.selected_entry.as_ref().is_some_and(|e| e.id == entry_id) {
                        s.selected_entry = None;
                    }
                });
                ctx.effect(JournalEffect::EntryDeleted).await;
                self.load(ctx).await;
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }
}

#[async_trait]
impl Screen for JournalScreen {
    type State = JournalState;
    type Intent = JournalIntent;
    type Effect = JournalEffect;

    async fn handle(&mut self, intent: JournalIntent, ctx: &ScreenCtx<Self>) {
        match intent {
            JournalIntent::SetTrip(trip_id) => {
                ctx.update(|s| s.trip_id = trip_id);
                self.load(ctx).await;
            }
            JournalIntent::LoadEntries => self.load(ctx).await,
            JournalIntent::SelectDate(date) => self.select_date(date, ctx).await,
            JournalIntent::AddEntry(entry) => self.add_entry(entry, ctx).await,
            JournalIntent::UpdateEntry(entry) => self.update_entry(entry, ctx).await,
            JournalIntent::DeleteEntry { entry_id } => self.delete_entry(&entry_id, ctx).await,
            JournalIntent::StartAdding => ctx.update(|s| {
                s.is_adding = true;
                s.is_editing = false;
            }),
            JournalIntent::StartEditing => ctx.update(|s| {
                s.is_editing = true;
                s.is_adding = false;
            }),
            JournalIntent::CancelEditing => ctx.update(|s| {
                s.is_adding = false;
                s.is_editing = false;
            }),
            JournalIntent::ExportJournal => {
                // File generation is not implemented; only the path is produced.
                let file_path = format!(
                    "trip_journal_{}_{}.pdf",
                    ctx.state().trip_id,
                    Utc::now().timestamp_millis()
                );
                ctx.effect(JournalEffect::ShowExportSuccess { file_path }).await;
            }
        }
    }
}
