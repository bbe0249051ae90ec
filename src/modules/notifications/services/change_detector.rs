// Change notification detector for the freelancer portal.
//
// Compares each delivered sales snapshot (date-descending) against the
// previously observed one and synthesizes human-readable notifications.
// The very first snapshot only establishes the baseline, so loading a
// full history never floods the portal with "new sale" events.

use crate::core::money::format_amount;
use crate::modules::sales::models::Sale;
use crate::modules::sales::services::commission::commission;

#[derive(Default)]
pub struct ChangeDetector {
    baseline: Option<Vec<Sale>>,

    /// Accumulated notifications, newest first. Never deduplicated;
    /// the advancing baseline prevents re-delivery.
    notifications: Vec<String>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the next snapshot. Returns the notifications emitted for
    /// this tick and advances the baseline.
    pub fn observe(&mut self, snapshot: Vec<Sale>) -> Vec<String> {
        let mut emitted = Vec::new();

        if let Some(previous) = &self.baseline {
            if snapshot.len() > previous.len() {
                if let Some(newest) = snapshot.first() {
                    emitted.push(format!("New sale added: {}", newest.video_title));
                }
            }

            for sale in &snapshot {
                let before = previous
                    .iter()
                    .find(|p| p.id.is_some() && p.id == sale.id);
                if let Some(before) = before {
                    if !before.is_paid() && sale.is_paid() {
                        emitted.push(format!(
                            "Payment of ${} for \"{}\" has been sent!",
                            format_amount(commission(sale)),
                            sale.video_title
                        ));
                    }
                }
            }
        }

        for note in &emitted {
            self.notifications.insert(0, note.clone());
        }

        self.baseline = Some(snapshot);
        emitted
    }

    /// All accumulated notifications, newest first.
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }
}
