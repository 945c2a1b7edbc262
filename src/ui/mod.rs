pub mod auth;
pub mod layout;
pub mod notifications;
pub mod pages;
pub mod protected_route;
pub mod query;
pub mod spinner;

pub use notifications::{NotificationManager, NotificationsContainer, provide_notifications};
pub use protected_route::ProtectedRoute;
