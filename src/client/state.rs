//! Client state container, changed only through [`DashboardState::apply`].

use std::time::Instant;

use crate::client::filter::filter_properties;
use crate::client::notification::Notification;
use crate::models::{Property, PropertyType};

/// Loading status of the listing view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Error(String),
}

/// Open/closed flags, one per dialog; they are independent of each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modals {
    pub add_form: bool,
    pub edit_form: bool,
    pub details: bool,
    /// Record awaiting delete confirmation
    pub confirm_delete: Option<Property>,
}

#[derive(Debug, Clone)]
pub enum Action {
    LoadStarted,
    LoadSucceeded(Vec<Property>),
    LoadFailed(String),
    SetSearch(String),
    SetFilterType(Option<PropertyType>),
    OpenAddForm,
    CloseAddForm,
    OpenEditForm(Property),
    CloseEditForm,
    OpenDetails(Property),
    CloseDetails,
    RequestDelete(Property),
    CancelDelete,
    Notify(Notification),
    DismissNotification,
    /// Clock tick; drops the notification once it has expired
    Tick(Instant),
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Result of the last successful fetch
    pub properties: Vec<Property>,
    pub load: LoadState,
    pub search: String,
    pub filter_type: Option<PropertyType>,
    pub modals: Modals,
    pub selected: Option<Property>,
    pub notification: Option<Notification>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::LoadStarted => self.load = LoadState::Loading,
            Action::LoadSucceeded(properties) => {
                self.properties = properties;
                self.load = LoadState::Loaded;
            }
            // The previous list stays on screen.
            Action::LoadFailed(message) => self.load = LoadState::Error(message),
            Action::SetSearch(search) => self.search = search,
            Action::SetFilterType(kind) => self.filter_type = kind,
            Action::OpenAddForm => self.modals.add_form = true,
            Action::CloseAddForm => self.modals.add_form = false,
            Action::OpenEditForm(property) => {
                self.selected = Some(property);
                self.modals.edit_form = true;
            }
            Action::CloseEditForm => {
                self.modals.edit_form = false;
                self.selected = None;
            }
            Action::OpenDetails(property) => {
                self.selected = Some(property);
                self.modals.details = true;
            }
            Action::CloseDetails => {
                self.modals.details = false;
                self.selected = None;
            }
            Action::RequestDelete(property) => self.modals.confirm_delete = Some(property),
            Action::CancelDelete => self.modals.confirm_delete = None,
            Action::Notify(notification) => self.notification = Some(notification),
            Action::DismissNotification => self.notification = None,
            Action::Tick(now) => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|n| n.is_expired(now))
                {
                    self.notification = None;
                }
            }
        }
    }

    /// Records passing the current search and type filter
    pub fn visible(&self) -> Vec<&Property> {
        filter_properties(&self.properties, &self.search, self.filter_type)
    }

    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || self.filter_type.is_some()
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} properties",
            self.visible().len(),
            self.properties.len()
        )
    }

    /// Hint shown when nothing is visible
    pub fn empty_message(&self) -> &'static str {
        if self.is_filtered() {
            "Try adjusting your search or filter criteria"
        } else {
            "Get started by adding your first property"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::notification::NOTIFICATION_TTL;
    use crate::models::PropertyInput;
    use chrono::Utc;
    use uuid::Uuid;

    fn listing(name: &str, kind: &str) -> Property {
        let data = PropertyInput {
            name: Some(name.into()),
            kind: Some(kind.into()),
            location: Some("Pune".into()),
            price: Some(1.0.into()),
            description: Some("Listing".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        Property::from_new(Uuid::new_v4(), data, Utc::now())
    }

    #[test]
    fn starts_loading_and_empty() {
        let state = DashboardState::new();
        assert_eq!(state.load, LoadState::Loading);
        assert!(state.properties.is_empty());
        assert_eq!(state.modals, Modals::default());
    }

    #[test]
    fn failed_load_keeps_previous_list() {
        let mut state = DashboardState::new();
        state.apply(Action::LoadSucceeded(vec![listing("A", "Plot")]));
        state.apply(Action::LoadStarted);
        state.apply(Action::LoadFailed("Failed to load properties".into()));

        assert_eq!(state.properties.len(), 1);
        assert_eq!(
            state.load,
            LoadState::Error("Failed to load properties".into())
        );
    }

    #[test]
    fn filters_drive_visible_and_summary() {
        let mut state = DashboardState::new();
        state.apply(Action::LoadSucceeded(vec![
            listing("Commercial Shed", "Shed"),
            listing("Central Plot", "Plot"),
        ]));
        assert_eq!(state.summary(), "Showing 2 of 2 properties");
        assert_eq!(state.empty_message(), "Get started by adding your first property");

        state.apply(Action::SetFilterType(Some(PropertyType::Shed)));
        assert_eq!(state.summary(), "Showing 1 of 2 properties");

        state.apply(Action::SetSearch("villa".into()));
        assert!(state.visible().is_empty());
        assert_eq!(
            state.empty_message(),
            "Try adjusting your search or filter criteria"
        );
    }

    #[test]
    fn modals_are_tracked_independently() {
        let property = listing("A", "Plot");
        let mut state = DashboardState::new();

        state.apply(Action::OpenDetails(property.clone()));
        state.apply(Action::OpenEditForm(property.clone()));
        assert!(state.modals.details);
        assert!(state.modals.edit_form);

        state.apply(Action::RequestDelete(property.clone()));
        state.apply(Action::CloseEditForm);
        assert!(state.modals.details);
        assert_eq!(state.modals.confirm_delete, Some(property));
        assert!(state.selected.is_none());

        state.apply(Action::CancelDelete);
        assert!(state.modals.confirm_delete.is_none());
    }

    #[test]
    fn tick_dismisses_expired_notification() {
        let now = Instant::now();
        let mut state = DashboardState::new();
        state.apply(Action::Notify(Notification::success("Saved", now)));

        state.apply(Action::Tick(now));
        assert!(state.notification.is_some());

        state.apply(Action::Tick(now + NOTIFICATION_TTL));
        assert!(state.notification.is_none());
    }
}
