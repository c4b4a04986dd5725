//! UI Components
//!
//! Reusable Leptos components.

mod page_controls;
mod dispute_table;
mod dispute_decision_form;
mod notification_dropdown;
mod password_strength;
mod camera_capture;
mod profile_tabs;

pub use page_controls::PageControls;
pub use dispute_table::DisputeTable;
pub use dispute_decision_form::DisputeDecisionForm;
pub use notification_dropdown::NotificationDropdown;
pub use password_strength::{PasswordMatch, PasswordStrength};
pub use camera_capture::CameraCapture;
pub use profile_tabs::ProfileTabs;
