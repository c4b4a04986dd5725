//! Notification Endpoints

use serde::Deserialize;

use super::{encode_segment, ApiClient, ApiError};
use crate::models::Notification;

/// Unread-count body: a bare number or `{ "count": n }`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UnreadCountBody {
    Bare(u32),
    Wrapped { count: u32 },
}

impl UnreadCountBody {
    pub fn count(self) -> u32 {
        match self {
            UnreadCountBody::Bare(count) | UnreadCountBody::Wrapped { count } => count,
        }
    }
}

// ========================
// Paths
// ========================

pub fn unread_count_path(user_id: &str) -> String {
    format!("/api/notification/unread-count/{}", encode_segment(user_id))
}

pub fn user_notifications_path(user_id: &str) -> String {
    format!("/api/notification/user/{}?unreadOnly=false", encode_segment(user_id))
}

pub fn mark_all_read_path(user_id: &str) -> String {
    format!("/api/notification/mark-all-read/{}", encode_segment(user_id))
}

pub fn mark_read_path(id: u32) -> String {
    format!("/api/notification/mark-read/{}", id)
}

// ========================
// Requests
// ========================

pub async fn fetch_unread_count(client: &ApiClient, user_id: &str) -> Result<u32, ApiError> {
    let body: UnreadCountBody = client.get_json(&unread_count_path(user_id)).await?;
    Ok(body.count())
}

pub async fn fetch_notifications(client: &ApiClient, user_id: &str) -> Result<Vec<Notification>, ApiError> {
    client.get_json(&user_notifications_path(user_id)).await
}

pub async fn mark_all_read(client: &ApiClient, user_id: &str) -> Result<(), ApiError> {
    client.put(&mark_all_read_path(user_id)).await
}

pub async fn mark_read(client: &ApiClient, id: u32) -> Result<(), ApiError> {
    client.put(&mark_read_path(id)).await
}
