//! Per-section view state. Each section owns its filters, selection and
//! modal flags; the dashboard only hands it a slice of fetched data.

pub mod cie;
pub mod compliance;
pub mod departments;
pub mod directory;
pub mod faculty;
pub mod grievances;
pub mod notifications;
pub mod overview;
pub mod reports;

#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Loading => None,
            Self::Ready(value) => Some(value),
        }
    }
}

/// Handed out when a selection starts a secondary fetch; the response is
/// only applied while the same selection is still current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    pub key: K,
    generation: u64,
}

/// Summary-to-detail navigation state.
#[derive(Debug, Clone)]
pub struct DrillDown<K> {
    selected: Option<K>,
    generation: u64,
}

impl<K> Default for DrillDown<K> {
    fn default() -> Self {
        Self {
            selected: None,
            generation: 0,
        }
    }
}

impl<K: Clone + PartialEq> DrillDown<K> {
    pub fn select(&mut self, key: K) -> Ticket<K> {
        self.generation += 1;
        self.selected = Some(key.clone());
        Ticket {
            key,
            generation: self.generation,
        }
    }

    pub fn back(&mut self) {
        self.generation += 1;
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&K> {
        self.selected.as_ref()
    }

    /// A further ticket for the current selection, e.g. for a modal that
    /// loads inside the detail view.
    pub fn current_ticket(&self) -> Option<Ticket<K>> {
        self.selected.clone().map(|key| Ticket {
            key,
            generation: self.generation,
        })
    }

    pub fn accepts(&self, ticket: &Ticket<K>) -> bool {
        ticket.generation == self.generation && self.selected.as_ref() == Some(&ticket.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reselecting_invalidates_older_tickets() {
        let mut drill = DrillDown::default();
        let first = drill.select("CS");
        let second = drill.select("EC");

        assert!(!drill.accepts(&first));
        assert!(drill.accepts(&second));

        let again = drill.select("CS");
        assert!(!drill.accepts(&first));
        assert!(drill.accepts(&again));
    }

    #[test]
    fn back_rejects_everything() {
        let mut drill = DrillDown::default();
        let ticket = drill.select(7);
        drill.back();

        assert!(!drill.accepts(&ticket));
        assert_eq!(drill.selected(), None);
        assert_eq!(drill.current_ticket(), None);
    }

    #[test]
    fn current_ticket_shares_generation() {
        let mut drill = DrillDown::default();
        let ticket = drill.select("ME");
        assert_eq!(drill.current_ticket(), Some(ticket));
    }
}
