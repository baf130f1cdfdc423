//! Projects and tasks attached to a property

use serde::{Deserialize, Serialize};

/// Works project on a property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "responsable")]
    pub manager: String,
    pub budget: f64,
    #[serde(rename = "dateDebut")]
    pub start_date: String,
    #[serde(rename = "dateFin")]
    pub end_date: String,
    /// Completion percentage
    #[serde(rename = "avancement")]
    pub progress: f64,
    pub description: String,
    #[serde(rename = "actif")]
    pub active: bool,
}

impl Project {
    /// Completion clamped to 0..=100
    pub fn progress_percent(&self) -> f64 {
        clamp_percent(self.progress)
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "haute")]
    High,
    #[serde(rename = "moyenne")]
    Medium,
    #[serde(rename = "basse")]
    Low,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "Haute",
            Priority::Medium => "Moyenne",
            Priority::Low => "Basse",
            Priority::Unknown => "Non spécifiée",
        }
    }
}

/// Task on a property. Every listed task counts as open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    #[serde(rename = "titre")]
    pub title: String,
    pub description: String,
    #[serde(rename = "priorite")]
    pub priority: Priority,
    #[serde(rename = "assigneA")]
    pub assignee: String,
    #[serde(rename = "echeance")]
    pub due_date: String,
    #[serde(rename = "statut")]
    pub status: String,
    #[serde(rename = "categorie")]
    pub category: String,
}

/// Clamp a percentage into 0..=100, mapping NaN to 0
pub(crate) fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_deserialization() {
        let project: Project = serde_json::from_value(json!({
            "nom": "Restauration des façades",
            "responsable": "Marie Laurent",
            "budget": 800000,
            "avancement": 100,
            "actif": false
        }))
        .unwrap();
        assert_eq!(project.name, "Restauration des façades");
        assert_eq!(project.manager, "Marie Laurent");
        assert!(!project.active);
        assert!(project.description.is_empty());
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut project = Project {
            progress: 140.0,
            ..Default::default()
        };
        assert_eq!(project.progress_percent(), 100.0);
        project.progress = -3.0;
        assert_eq!(project.progress_percent(), 0.0);
        project.progress = f64::NAN;
        assert_eq!(project.progress_percent(), 0.0);
    }

    #[test]
    fn test_task_priority() {
        let task: Task = serde_json::from_value(json!({
            "titre": "Audit énergétique",
            "priorite": "haute",
            "assigneA": "Service Technique"
        }))
        .unwrap();
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.priority.label(), "Haute");

        let task: Task = serde_json::from_value(json!({ "priorite": "urgente" })).unwrap();
        assert_eq!(task.priority, Priority::Unknown);

        let task: Task = serde_json::from_value(json!({})).unwrap();
        assert_eq!(task.priority, Priority::Unknown);
    }
}
