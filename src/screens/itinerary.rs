use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{ItineraryCategory, ItineraryItem};
use crate::repository::ItineraryRepository;

use super::machine::{Screen, ScreenCtx};

#[derive(Debug, Clone, Default)]
pub struct ItineraryState {
    pub is_loading: bool,
    pub trip_id: String,
    pub items: Vec<ItineraryItem>,
    pub selected_date: Option<NaiveDate>,
    pub selected_category: Option<ItineraryCategory>,
    pub show_completed: bool,
    pub error: Option<String>,
}

impl ItineraryState {
    pub fn for_trip(trip_id: impl Into<String>) -> Self {
        Self {
            trip_id: trip_id.into(),
            show_completed: true,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub enum ItineraryIntent {
    SetTrip(String),
    LoadItems,
    LoadItemsForDate(NaiveDate),
    FilterByCategory(Option<ItineraryCategory>),
    ToggleCompletedVisibility,
    AddItem(ItineraryItem),
    UpdateItem(ItineraryItem),
    DeleteItem { item_id: String },
    ToggleCompletion { item_id: String },
    ReorderItems { from_index: usize, to_index: usize },
    OpenAddItem,
    OpenEditItem { item_id: String },
    OpenMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItineraryEffect {
    ShowError(String),
    ItemAdded,
    ItemUpdated,
    ItemDeleted,
    NavigateToAddItem,
    NavigateToEditItem { item_id: String },
    NavigateToMap,
}

pub struct ItineraryScreen {
    items: ItineraryRepository,
}

impl ItineraryScreen {
    pub fn new(items: ItineraryRepository) -> Self {
        Self { items }
    }

    async fn fail(&self, err: impl ToString, ctx: &ScreenCtx<Self>) {
        let message = err.to_string();
        ctx.update(|s| {
            s.is_loading = false;
            s.error = Some(message.clone());
        });
        ctx.effect(ItineraryEffect::ShowError(message)).await;
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

        let result = match (snapshot.selected_date, snapshot.selected_category) {
            (Some(date), _) => self.items.items_for_date(&snapshot.trip_id, date).await,
            (None, Some(category)) => {
                self.items.items_by_category(&snapshot.trip_id, category).await
            }
            (None, None) => self.items.items_for_trip(&snapshot.trip_id).await,
        };

        match result {
            Ok(mut items) => {
                if !snapshot.show_completed {
                    items.retain(|item| !item.is_completed);
                }
                ctx.update(|s| {
                    s.is_loading = false;
                    s.items = items;
                });
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }

    async fn add_item(&self, mut item: ItineraryItem, ctx: &ScreenCtx<Self>) {
        let trip_id = ctx.state().trip_id;
        if trip_id.is_empty() {
            return;
        }
        item.trip_id = trip_id.clone();

        // Append at the end of the trip's list.
        let next_order = match self.items.max_sort_order(&trip_id).await {
            Ok(max) => max.map_or(0, |m| m + 1),
            Err(err) => return self.fail(err, ctx).await,
        };
        item.sort_order = next_order;
        item.touch();

        match self.items.insert_item(&item).await {
            Ok(()) => {
                ctx.effect(ItineraryEffect::ItemAdded).await;
                self.load(ctx).await;
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }

    async fn update_item(&self, mut item: ItineraryItem, ctx: &ScreenCtx<Self>) {
        item.touch();
        match self.items.update_item(&item).await {
            Ok(()) => {
                ctx.effect(ItineraryEffect::ItemUpdated).await;
                self.load(ctx).await;
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }

    async fn delete_item(&self, item_id: &str, ctx: &ScreenCtx<Self>) {
        match self.items.delete_item_by_id(item_id).await {
            Ok(()) => {
                ctx.effect(ItineraryEffect::ItemDeleted).await;
                self.load(ctx).await;
            }
            Err(err) => self.fail(err, ctx).await,
        }
    }

    async fn toggle_completion(&self, item_id: &str, ctx: &ScreenCtx<Self>) {
        let Some(mut item) = ctx.state().items.into_iter().find(|i| i.id == item_id) else {
            return;
        };
        item.is_completed = !item.is_completed;
        item.touch();
        match self.items.update_item(&item).await {
            Ok(()) => self.load(ctx).await,
            Err(err) => self.fail(err, ctx).await,
        }
    }

    /// Moves the item at `from_index` to `to_index` and renumbers the whole
    /// list 0..n, so sort orders stay gap- and duplicate-free.
    async fn reorder(&self, from_index: usize, to_index: usize, ctx: &ScreenCtx<Self>) {
        let mut items = ctx.state().items;
        if from_index >= items.len() || to_index >= items.len() {
            return;
        }
        let moved = items.remove(from_index);
        items.insert(to_index, moved);
        for (index, item) in items.iter_mut().enumerate() {
            item.sort_order = index as i64;
            item.touch();
        }
        match self.items.insert_items(&items).await {
            Ok(()) => self.load(ctx).await,
            Err(err) => self.fail(err, ctx).await,
        }
    }
}

#[async_trait]
impl Screen for ItineraryScreen {
    type State = ItineraryState;
    type Intent = ItineraryIntent;
    type Effect = ItineraryEffect;

    async fn handle(&mut self, intent: ItineraryIntent, ctx: &ScreenCtx<Self>) {
        match intent {
            ItineraryIntent::SetTrip(trip_id) => {
                ctx.update(|s| s.trip_id = trip_id);
                self.load(ctx).await;
            }
            ItineraryIntent::LoadItems => {
                ctx.update(|s| {
                    s.selected_date = None;
                    s.selected_category = None;
                });
                self.load(ctx).await;
            }
            ItineraryIntent::LoadItemsForDate(date) => {
                ctx.update(|s| s.selected_date = Some(date));
                self.load(ctx).await;
            }
            ItineraryIntent::FilterByCategory(category) => {
                ctx.update(|s| {
                    s.selected_category = category;
                    s.selected_date = None;
                });
                self.load(ctx).await;
            }
            ItineraryIntent::ToggleCompletedVisibility => {
                ctx.update(|s| s.show_completed = !s.show_completed);
                self.load(ctx).await;
            }
            ItineraryIntent::AddItem(item) => self.add_item(item, ctx).await,
            ItineraryIntent::UpdateItem(item) => self.update_item(item, ctx).await,
            ItineraryIntent::DeleteItem { item_id } => self.delete_item(&item_id, ctx).await,
            ItineraryIntent::ToggleCompletion { item_id } => {
                self.toggle_completion(&item_id, ctx).await
            }
            ItineraryIntent::ReorderItems {
                from_index,
                to_index,
            } => self.reorder(from_index, to_index, ctx).await,
            ItineraryIntent::OpenAddItem => ctx.effect(ItineraryEffect::NavigateToAddItem).await,
            ItineraryIntent::OpenEditItem { item_id } => {
                ctx.effect(ItineraryEffect::NavigateToEditItem { item_id }).await
            }
            ItineraryIntent::OpenMap => ctx.effect(ItineraryEffect::NavigateToMap).await,
        }
    }
}
