use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The five tracked daily activities, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Activity {
    PhysicalActivity,
    Reading,
    CodingLearning,
    WritingTweeting,
    Protein,
}

impl Activity {
    pub const ALL: [Activity; 5] = [
        Activity::PhysicalActivity,
        Activity::Reading,
        Activity::CodingLearning,
        Activity::WritingTweeting,
        Activity::Protein,
    ];

    /// JSON field name of the flag on a log.
    pub fn key(self) -> &'static str {
        match self {
            Activity::PhysicalActivity => "physicalActivity",
            Activity::Reading => "reading",
            Activity::CodingLearning => "codingLearning",
            Activity::WritingTweeting => "writingTweeting",
            Activity::Protein => "protein",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Activity::PhysicalActivity => "Physical Activity",
            Activity::Reading => "Reading",
            Activity::CodingLearning => "Coding/Learning",
            Activity::WritingTweeting => "Writing/Tweeting",
            Activity::Protein => "Protein",
        }
    }

    /// Daily target shown next to the checkbox, if any.
    pub fn target(self) -> Option<&'static str> {
        match self {
            Activity::PhysicalActivity => Some("≥ 20 mins"),
            Activity::Reading => Some("≥ 10 mins"),
            Activity::Protein => Some("≥ 150g"),
            Activity::CodingLearning | Activity::WritingTweeting => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivityInfo {
    pub key: Activity,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<&'static str>,
}

impl From<Activity> for ActivityInfo {
    fn from(activity: Activity) -> Self {
        Self {
            key: activity,
            label: activity.label(),
            target: activity.target(),
        }
    }
}

/// The boolean check-offs for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFlags {
    pub physical_activity: bool,
    pub reading: bool,
    pub coding_learning: bool,
    pub writing_tweeting: bool,
    pub protein: bool,
}

impl ActivityFlags {
    pub fn all_done() -> Self {
        Self {
            physical_activity: true,
            reading: true,
            coding_learning: true,
            writing_tweeting: true,
            protein: true,
        }
    }

    pub fn get(&self, activity: Activity) -> bool {
        match activity {
            Activity::PhysicalActivity => self.physical_activity,
            Activity::Reading => self.reading,
            Activity::CodingLearning => self.coding_learning,
            Activity::WritingTweeting => self.writing_tweeting,
            Activity::Protein => self.protein,
        }
    }

    pub fn set(&mut self, activity: Activity, done: bool) {
        let slot = match activity {
            Activity::PhysicalActivity => &mut self.physical_activity,
            Activity::Reading => &mut self.reading,
            Activity::CodingLearning => &mut self.coding_learning,
            Activity::WritingTweeting => &mut self.writing_tweeting,
            Activity::Protein => &mut self.protein,
        };
        *slot = done;
    }

    pub fn with(mut self, activity: Activity, done: bool) -> Self {
        self.set(activity, done);
        self
    }

    pub fn is_complete(&self) -> bool {
        Activity::ALL.iter().all(|a| self.get(*a))
    }

    pub fn completed_count(&self) -> usize {
        Activity::ALL.iter().filter(|a| self.get(**a)).count()
    }

    /// Fraction of activities done, 0.0 to 1.0.
    pub fn completion_ratio(&self) -> f64 {
        self.completed_count() as f64 / Activity::ALL.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_serde_names() {
        for activity in Activity::ALL {
            let json = serde_json::to_string(&activity).unwrap();
            assert_eq!(json, format!("\"{}\"", activity.key()));
        }
    }

    #[test]
    fn completion_counts() {
        let flags = ActivityFlags::default()
            .with(Activity::Reading, true)
            .with(Activity::Protein, true);
        assert_eq!(flags.completed_count(), 2);
        assert!((flags.completion_ratio() - 0.4).abs() < f64::EPSILON);
        assert!(!flags.is_complete());
        assert!(ActivityFlags::all_done().is_complete());
    }

    #[test]
    fn flags_serialize_camel_case() {
        let value = serde_json::to_value(ActivityFlags::all_done()).unwrap();
        assert_eq!(value["physicalActivity"], true);
        assert_eq!(value["writingTweeting"], true);
    }
}
