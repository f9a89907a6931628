pub mod table;
pub mod text;

use crate::events::Event;

/// Source document text → ordered event rows.
pub fn extract_events(html: &str) -> Vec<Event> {
    table::extract(html)
}
