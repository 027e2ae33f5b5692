//! Client application: state container, filtering, form checks and the
//! HTTP client that talks to the API service.

pub mod api;
pub mod dashboard;
pub mod filter;
pub mod form;
pub mod notification;
pub mod state;
pub mod upload;

pub use api::{ApiClient, ClientError, PropertyApi};
pub use dashboard::{Dashboard, Outcome};
pub use filter::filter_properties;
pub use form::{FormErrors, PropertyForm};
pub use notification::{Notification, NotificationKind, NOTIFICATION_TTL};
pub use state::{Action, DashboardState, LoadState, Modals};
pub use upload::{embed_file, UploadError, MAX_UPLOAD_BYTES};

use crate::models::Property;

/// How a record's `image` should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    None,
    Image,
    Video,
}

pub fn media_kind(property: &Property) -> MediaKind {
    let image = property.image.as_str();
    if image.is_empty() {
        MediaKind::None
    } else if image.starts_with("data:video/") || image.to_lowercase().contains(".mp4") {
        MediaKind::Video
    } else {
        MediaKind::Image
    }
}
