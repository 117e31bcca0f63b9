use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::{FrostRecord, PlaceRecord};

/// Fixed message for a key absent from the fetched dataset
pub const NOT_FOUND_MESSAGE: &str = "ZIP Code not found!";
/// Fixed message for any retrieval or parse failure
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data!";

/// HTML fragment for a fetched place record
pub fn place_fragment(record: &PlaceRecord) -> String {
    format!(
        "City: {}<br>\nState: {}<br>\nCounty: {}",
        record.city, record.state, record.county
    )
}

/// HTML fragment for an embedded frost record: the echoed key plus all
/// eight record fields
pub fn frost_fragment(zip: &str, record: &FrostRecord) -> String {
    format!(
        "ZIP Code: {}<br>\n\
         State/Province: {}<br>\n\
         Country: {}<br>\n\
         Station: {}<br>\n\
         Station Altitude (ft): {}<br>\n\
         Station Distance (miles): {}<br>\n\
         Last Freeze: {}<br>\n\
         First Freeze: {}<br>\n\
         Growing Days: {}",
        zip,
        record.state_province,
        record.country,
        record.station_name,
        record.station_altitude,
        record.station_distance_miles,
        record.last_freeze,
        record.first_freeze,
        record.growing_days
    )
}

/// Not-found message for the in-memory variant, echoing the unmatched key
pub fn frost_not_found(zip: &str) -> String {
    format!("No frost data found for ZIP Code {}", zip)
}

/// The single render target. Each lookup wholly replaces its content.
///
/// `begin` hands out a ticket and invalidates every earlier one, so a slow
/// lookup that was started first cannot overwrite the result of a faster
/// lookup started later. Among publishes holding the current ticket the
/// behavior stays last-write-wins.
#[derive(Debug, Default)]
pub struct OutputRegion {
    generation: AtomicU64,
    html: Mutex<String>,
}

/// Token tying a lookup to the render slot it claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTicket(u64);

impl OutputRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next render slot, superseding all earlier tickets
    pub fn begin(&self) -> RenderTicket {
        RenderTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Replace the content if `ticket` is still current. Returns `false`
    /// and leaves the region untouched when a later `begin` superseded it.
    pub fn publish(&self, ticket: RenderTicket, html: impl Into<String>) -> bool {
        let mut current = self.html.lock().unwrap_or_else(PoisonError::into_inner);
        // Checked under the lock: a begin racing this call may supersede the
        // ticket while we wait for it, and the stale content must not land
        // after the newer publish
        if ticket.0 != self.generation.load(Ordering::SeqCst) {
            return false;
        }
        *current = html.into();
        true
    }

    /// Current content of the region
    pub fn html(&self) -> String {
        self.html
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_place() -> PlaceRecord {
        PlaceRecord {
            city: "Beverly Hills".to_string(),
            state: "CA".to_string(),
            county: "Los Angeles".to_string(),
        }
    }

    #[test]
    fn test_place_fragment() {
        let html = place_fragment(&sample_place());
        assert!(html.contains("City: Beverly Hills<br>"));
        assert!(html.contains("State: CA<br>"));
        assert!(html.contains("County: Los Angeles"));
    }

    #[test]
    fn test_frost_fragment_has_all_nine_fields() {
        let record = FrostRecord {
            zipcode: "59715".to_string(),
            state_province: "MT".to_string(),
            country: "US".to_string(),
            station_name: "BOZEMAN MONTANA STATE UNIV".to_string(),
            station_altitude: 4900,
            station_distance_miles: 1.5,
            last_freeze: "May 20".to_string(),
            first_freeze: "September 21".to_string(),
            growing_days: 124,
        };
        let html = frost_fragment("59715", &record);
        for expected in [
            "ZIP Code: 59715",
            "MT",
            "US",
            "BOZEMAN MONTANA STATE UNIV",
            "4900",
            "1.5",
            "May 20",
            "September 21",
            "124",
        ] {
            assert!(html.contains(expected), "missing {:?} in {}", expected, html);
        }
    }

    #[test]
    fn test_not_found_echoes_key() {
        assert!(frost_not_found("99999").contains("99999"));
    }

    #[test]
    fn test_publish_replaces_content() {
        let region = OutputRegion::new();
        let t = region.begin();
        assert!(region.publish(t, "first"));
        assert_eq!(region.html(), "first");

        let t2 = region.begin();
        assert!(region.publish(t2, "second"));
        assert_eq!(region.html(), "second");
    }

    #[test]
    fn test_stale_ticket_discarded() {
        let region = OutputRegion::new();
        let slow = region.begin();
        let fast = region.begin();

        assert!(region.publish(fast, "fast result"));
        // The earlier lookup finishes late; its result must not land
        assert!(!region.publish(slow, "slow result"));
        assert_eq!(region.html(), "fast result");
    }

    #[test]
    fn test_stale_publish_never_lands_under_race() {
        use std::sync::Arc;
        use std::thread;

        // A publish holding a superseded ticket must lose no matter how it
        // interleaves with the newer begin and publish
        let region = Arc::new(OutputRegion::new());
        for i in 0..10_000 {
            let stale = region.begin();

            let writer = {
                let region = Arc::clone(&region);
                thread::spawn(move || {
                    let t = region.begin();
                    assert!(region.publish(t, "new"));
                })
            };
            let straggler = {
                let region = Arc::clone(&region);
                thread::spawn(move || {
                    // May succeed only while still current; the return value
                    // depends on timing, the final content must not
                    let _ = region.publish(stale, "stale");
                })
            };

            writer.join().unwrap();
            straggler.join().unwrap();
            assert_eq!(region.html(), "new", "stale write won on iteration {}", i);
        }
    }

    #[test]
    fn test_current_ticket_last_write_wins() {
        let region = OutputRegion::new();
        let t = region.begin();
        assert!(region.publish(t, "a"));
        assert!(region.publish(t, "b"));
        assert_eq!(region.html(), "b");
    }
}
