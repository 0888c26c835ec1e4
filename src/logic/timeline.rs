use crate::models::{Activity, CropCatalog, MaintenanceWindow, Month, TimelineEntry};

/// Build the twelve-month activity calendar from the catalog alone.
///
/// Each month lists plantings, then harvests (both in catalog order), then
/// any maintenance window covering it. A month left empty gets a single
/// idle entry, so every month has at least one activity.
pub fn build_timeline(catalog: &CropCatalog, windows: &[MaintenanceWindow]) -> Vec<TimelineEntry> {
    Month::ALL
        .iter()
        .map(|&month| {
            let mut activities: Vec<Activity> = catalog
                .crops()
                .iter()
                .filter(|c| c.plants_in(month))
                .map(|c| Activity::plant(&c.id, &c.display_name))
                .collect();

            activities.extend(
                catalog
                    .crops()
                    .iter()
                    .filter(|c| c.harvests_in(month))
                    .map(|c| Activity::harvest(&c.id, &c.display_name)),
            );

            activities.extend(
                windows
                    .iter()
                    .filter(|w| w.covers(month))
                    .map(|w| Activity::maintenance(&w.name)),
            );

            if activities.is_empty() {
                activities.push(Activity::idle());
            }

            TimelineEntry { month, activities }
        })
        .collect()
}
