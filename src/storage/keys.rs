//! Persisted state layout.
//!
//! Keys are namespaced per list/section type so multiple pipeline views can
//! share one backing store without clashing:
//!
//! - `completed-records::<section>` → JSON array of record ids
//! - `snoozed-records::<section>` → JSON array of `{recordId, snoozeUntil}`
//! - `sort-pref::<section>::<workspace>` → JSON `{field, direction}`

pub fn completed(section: &str) -> String {
    format!("completed-records::{}", section)
}

pub fn snoozed(section: &str) -> String {
    format!("snoozed-records::{}", section)
}

pub fn sort_pref(section: &str, workspace: &str) -> String {
    format!("sort-pref::{}::{}", section, workspace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(completed("speedrun"), "completed-records::speedrun");
        assert_eq!(snoozed("speedrun"), "snoozed-records::speedrun");
        assert_eq!(sort_pref("speedrun", "ws1"), "sort-pref::speedrun::ws1");
    }
}
