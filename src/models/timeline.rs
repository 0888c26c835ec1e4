use super::month::Month;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Plant,
    Harvest,
    StructuralMaintenance,
    Idle,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Plant => "Plant",
            ActivityKind::Harvest => "Harvest",
            ActivityKind::StructuralMaintenance => "Maintenance",
            ActivityKind::Idle => "Idle",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ActivityKind::Plant => "+",
            ActivityKind::Harvest => "*",
            ActivityKind::StructuralMaintenance => "#",
            ActivityKind::Idle => "-",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_id: Option<String>,
    pub label: String,
}

impl Activity {
    pub fn plant(crop_id: &str, display_name: &str) -> Self {
        Self {
            kind: ActivityKind::Plant,
            crop_id: Some(crop_id.to_string()),
            label: format!("Plant {}", display_name),
        }
    }

    pub fn harvest(crop_id: &str, display_name: &str) -> Self {
        Self {
            kind: ActivityKind::Harvest,
            crop_id: Some(crop_id.to_string()),
            label: format!("Harvest {}", display_name),
        }
    }

    pub fn maintenance(task: &str) -> Self {
        Self {
            kind: ActivityKind::StructuralMaintenance,
            crop_id: None,
            label: task.to_string(),
        }
    }

    pub fn idle() -> Self {
        Self {
            kind: ActivityKind::Idle,
            crop_id: None,
            label: "Fallow / field rest".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub month: Month,
    pub activities: Vec<Activity>,
}

impl TimelineEntry {
    pub fn count(&self, kind: ActivityKind) -> usize {
        self.activities.iter().filter(|a| a.kind == kind).count()
    }

    pub fn is_idle(&self) -> bool {
        self.activities.iter().all(|a| a.kind == ActivityKind::Idle)
    }
}

/// A fixed calendar window for field infrastructure work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceWindow {
    pub name: String,
    pub months: Vec<Month>,
}

impl MaintenanceWindow {
    pub fn new(name: impl Into<String>, months: &[Month]) -> Self {
        Self {
            name: name.into(),
            months: months.to_vec(),
        }
    }

    pub fn covers(&self, month: Month) -> bool {
        self.months.contains(&month)
    }

    /// Soil preparation (Mar-Apr) and irrigation system check (May-Jun).
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Soil preparation", &[Month::Mar, Month::Apr]),
            Self::new("Irrigation system check", &[Month::May, Month::Jun]),
        ]
    }
}
