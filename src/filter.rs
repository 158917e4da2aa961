//! Client-side event list filtering.

use crate::models::Event;

/// Category and tag selection applied to an event list.
///
/// Category is an exact match. When any tags are selected, an event must
/// carry at least one of them (matched by tag name). Recomputed from scratch
/// whenever the inputs change; plain linear scan.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub category: Option<String>,
    pub tags: Vec<String>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.tags.is_empty()
    }

    pub fn matches(&self, event: &Event) -> bool {
        if let Some(category) = &self.category {
            if &event.category != category {
                return false;
            }
        }
        if !self.tags.is_empty() && !event.tags.iter().any(|t| self.tags.contains(&t.name)) {
            return false;
        }
        true
    }

    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        events.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;
    use chrono::Utc;

    fn event(name: &str, category: &str, tags: &[&str]) -> Event {
        Event {
            id: name.to_lowercase(),
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            date: Utc::now(),
            location: "Accra".to_string(),
            price: 10.0,
            image: String::new(),
            tags: tags
                .iter()
                .map(|t| Tag {
                    id: t.to_lowercase(),
                    name: t.to_string(),
                })
                .collect(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let events = vec![event("A", "Music", &[]), event("B", "Art", &["Live"])];
        let filter = EventFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&events).len(), 2);
    }

    #[test]
    fn test_any_selection_makes_filter_non_empty() {
        assert!(!EventFilter::new().with_category("Music").is_empty());
        assert!(!EventFilter::new().with_tag("Live").is_empty());
    }

    #[test]
    fn test_category_and_tag_intersection() {
        let events = vec![
            event("A", "Music", &["Live"]),
            event("B", "Art", &["Live"]),
            event("C", "Music", &["Indoor"]),
        ];

        let filtered = EventFilter::new()
            .with_category("Music")
            .with_tag("Live")
            .apply(&events);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "A");
    }

    #[test]
    fn test_category_match_is_exact() {
        let events = vec![event("A", "Music", &[])];
        let filtered = EventFilter::new().with_category("music").apply(&events);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_any_selected_tag_suffices() {
        let events = vec![
            event("A", "Music", &["Live"]),
            event("B", "Music", &["Indoor"]),
            event("C", "Music", &["Outdoor"]),
        ];

        let filtered = EventFilter::new()
            .with_tag("Live")
            .with_tag("Indoor")
            .apply(&events);

        let names: Vec<&str> = filtered.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_untagged_events_excluded_when_tags_selected() {
        let events = vec![event("A", "Music", &[])];
        let filtered = EventFilter::new().with_tag("Live").apply(&events);
        assert!(filtered.is_empty());
    }
}
