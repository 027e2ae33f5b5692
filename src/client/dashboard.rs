//! Dashboard controller: runs the listing and mutation flows against the API.
//!
//! Every successful mutation invalidates the local list and re-fetches it
//! in full; local state is never patched with the mutation's response.

use std::time::Instant;

use tracing::{error, info};

use crate::client::api::PropertyApi;
use crate::client::form::{FormErrors, PropertyForm};
use crate::client::notification::Notification;
use crate::client::state::{Action, DashboardState};
use crate::store::PropertyFilter;

/// Result of a submitted flow that passed form validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

pub struct Dashboard<A: PropertyApi> {
    api: A,
    state: DashboardState,
}

impl<A: PropertyApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: DashboardState::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state.apply(action);
    }

    fn notify_success(&mut self, message: &str) {
        self.dispatch(Action::Notify(Notification::success(message, Instant::now())));
    }

    fn notify_error(&mut self, message: &str) {
        self.dispatch(Action::Notify(Notification::error(message, Instant::now())));
    }

    /// Fetch the full list, replacing local state on success
    pub async fn load(&mut self) -> Outcome {
        self.dispatch(Action::LoadStarted);

        match self.api.get_all_properties(&PropertyFilter::default()).await {
            Ok(properties) => {
                info!(count = properties.len(), "Loaded properties");
                self.dispatch(Action::LoadSucceeded(properties));
                Outcome::Succeeded
            }
            Err(e) => {
                error!(error = %e, "Error loading properties");
                self.dispatch(Action::LoadFailed(e.to_string()));
                self.notify_error("Failed to load properties");
                Outcome::Failed
            }
        }
    }

    /// Submit the add form. Invalid forms are returned without a request.
    pub async fn submit_add(&mut self, form: &PropertyForm) -> Result<Outcome, FormErrors> {
        let input = form.validate()?;

        match self.api.create_property(&input).await {
            Ok(created) => {
                info!(property_id = %created.id, "Property added");
                self.load().await;
                self.dispatch(Action::CloseAddForm);
                self.notify_success("Property added successfully!");
                Ok(Outcome::Succeeded)
            }
            Err(e) => {
                error!(error = %e, "Error adding property");
                self.notify_error("Failed to add property");
                Ok(Outcome::Failed)
            }
        }
    }

    /// Submit the edit form for the selected record
    pub async fn submit_update(&mut self, form: &PropertyForm) -> Result<Outcome, FormErrors> {
        let input = form.validate()?;

        let Some(id) = self.state.selected.as_ref().map(|p| p.id.to_string()) else {
            error!("Update submitted without a selected property");
            self.notify_error("Failed to update property");
            return Ok(Outcome::Failed);
        };

        match self.api.update_property(&id, &input).await {
            Ok(updated) => {
                info!(property_id = %updated.id, "Property updated");
                self.load().await;
                self.dispatch(Action::CloseEditForm);
                self.notify_success("Property updated successfully!");
                Ok(Outcome::Succeeded)
            }
            Err(e) => {
                error!(error = %e, "Error updating property");
                self.notify_error("Failed to update property");
                Ok(Outcome::Failed)
            }
        }
    }

    /// Delete the record awaiting confirmation
    pub async fn confirm_delete(&mut self) -> Outcome {
        let Some(id) = self
            .state
            .modals
            .confirm_delete
            .as_ref()
            .map(|p| p.id.to_string())
        else {
            error!("Delete confirmed without a pending property");
            self.notify_error("Failed to delete property");
            return Outcome::Failed;
        };

        match self.api.delete_property(&id).await {
            Ok(()) => {
                info!(property_id = %id, "Property deleted");
                self.load().await;
                self.dispatch(Action::CancelDelete);
                self.notify_success("Property deleted successfully!");
                Outcome::Succeeded
            }
            Err(e) => {
                error!(error = %e, "Error deleting property");
                self.notify_error("Failed to delete property");
                Outcome::Failed
            }
        }
    }
}
