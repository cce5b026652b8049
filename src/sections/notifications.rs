use crate::client::{DashboardClient, Transport};
use crate::error::ApiError;
use crate::models::{NotificationKind, NotificationRecord};

pub const DEFAULT_BROADCAST_ROLE: &str = "FACULTY";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastDraft {
    pub message: String,
    pub target_role: String,
}

impl BroadcastDraft {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            target_role: DEFAULT_BROADCAST_ROLE.to_string(),
        }
    }

    pub fn is_sendable(&self) -> bool {
        !self.message.trim().is_empty()
    }
}

/// What a local removal took out, so a failed backend call can put it back.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed {
    index: usize,
    record: NotificationRecord,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationsView {
    items: Vec<NotificationRecord>,
    category: Option<String>,
}

impl NotificationsView {
    pub fn new(items: Vec<NotificationRecord>) -> Self {
        Self {
            items,
            category: None,
        }
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category.filter(|category| !category.trim().is_empty());
    }

    pub fn rows(&self) -> Vec<&NotificationRecord> {
        self.items
            .iter()
            .filter(|item| match &self.category {
                Some(category) => item.category.as_deref() == Some(category.as_str()),
                None => true,
            })
            .collect()
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for category in self.items.iter().filter_map(|item| item.category.as_deref()) {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    pub fn warning_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.kind == NotificationKind::Warning)
            .count()
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) if !item.read => {
                item.read = true;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Removed> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let record = self.items.remove(index);
        Some(Removed { index, record })
    }

    pub fn restore(&mut self, removed: Removed) {
        let index = removed.index.min(self.items.len());
        self.items.insert(index, removed.record);
    }

    pub fn clear(&mut self) -> Vec<NotificationRecord> {
        std::mem::take(&mut self.items)
    }

    pub fn restore_all(&mut self, items: Vec<NotificationRecord>) {
        let newer = std::mem::replace(&mut self.items, items);
        self.items.extend(newer);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Removes locally first and puts the record back if the backend refuses.
pub async fn delete<T: Transport>(
    view: &mut NotificationsView,
    client: &DashboardClient<T>,
    id: &str,
) -> Result<bool, ApiError> {
    let Some(removed) = view.remove(id) else {
        return Ok(false);
    };
    match client.delete_notification(id).await {
        Ok(()) => Ok(true),
        Err(err) => {
            view.restore(removed);
            Err(err)
        }
    }
}

pub async fn clear<T: Transport>(
    view: &mut NotificationsView,
    client: &DashboardClient<T>,
) -> Result<usize, ApiError> {
    let taken = view.clear();
    let count = taken.len();
    match client.clear_notifications().await {
        Ok(()) => Ok(count),
        Err(err) => {
            view.restore_all(taken);
            Err(err)
        }
    }
}

pub async fn mark_read<T: Transport>(
    view: &mut NotificationsView,
    client: &DashboardClient<T>,
    id: &str,
) -> Result<(), ApiError> {
    client.mark_notification_read(id).await?;
    view.mark_read(id);
    Ok(())
}
