//! Practice types and their catalog entries

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Error, BREATH_TOTAL_SECS, MEDITATION_TOTAL_SECS, MUSCLE_TOTAL_SECS};

/// The four guided practices a session can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PracticeType {
    /// 4-7-8 breathing, four cycles
    Breathing,
    /// Five-minute countdown with rotating tips
    Meditation,
    /// Progressive muscle relaxation, nine groups
    MuscleRelaxation,
    /// 5-4-3-2-1 grounding, paced by the user
    Grounding,
}

impl PracticeType {
    pub const ALL: [PracticeType; 4] = [
        PracticeType::Breathing,
        PracticeType::Meditation,
        PracticeType::MuscleRelaxation,
        PracticeType::Grounding,
    ];

    /// Stable kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            PracticeType::Breathing => "breathing",
            PracticeType::Meditation => "meditation",
            PracticeType::MuscleRelaxation => "muscle-relaxation",
            PracticeType::Grounding => "grounding",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PracticeType::Breathing => "Breathing Exercises",
            PracticeType::Meditation => "Guided Meditation",
            PracticeType::MuscleRelaxation => "Progressive Muscle Relaxation",
            PracticeType::Grounding => "Grounding Techniques",
        }
    }

    /// Heading shown while the practice is running
    pub fn heading(&self) -> &'static str {
        match self {
            PracticeType::Breathing => "4-7-8 Breathing",
            PracticeType::Meditation => "5-Minute Meditation",
            PracticeType::MuscleRelaxation => "Progressive Muscle Relaxation",
            PracticeType::Grounding => "5-4-3-2-1 Grounding",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PracticeType::Breathing => "Deep breathing techniques to reduce anxiety and stress",
            PracticeType::Meditation => "5-minute mindfulness meditation for beginners",
            PracticeType::MuscleRelaxation => "Release physical tension throughout your body",
            PracticeType::Grounding => "5-4-3-2-1 method for managing anxiety",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PracticeType::Breathing => "🫁",
            PracticeType::Meditation => "🧘",
            PracticeType::MuscleRelaxation => "💪",
            PracticeType::Grounding => "🌿",
        }
    }

    /// Total timed length in seconds, `None` for user-paced practices
    pub fn total_duration_secs(&self) -> Option<u32> {
        match self {
            PracticeType::Breathing => Some(BREATH_TOTAL_SECS),
            PracticeType::Meditation => Some(MEDITATION_TOTAL_SECS),
            PracticeType::MuscleRelaxation => Some(MUSCLE_TOTAL_SECS),
            PracticeType::Grounding => None,
        }
    }

    /// Whether the timer drives progress (everything except grounding)
    pub fn is_timer_driven(&self) -> bool {
        self.total_duration_secs().is_some()
    }

    pub fn catalog_entry(&self) -> CatalogEntry {
        CatalogEntry {
            practice_type: *self,
            title: self.title().to_string(),
            heading: self.heading().to_string(),
            description: self.description().to_string(),
            icon: self.icon().to_string(),
            total_duration_secs: self.total_duration_secs(),
        }
    }

    pub fn catalog() -> Vec<CatalogEntry> {
        Self::ALL.iter().map(|p| p.catalog_entry()).collect()
    }
}

impl FromStr for PracticeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breathing" => Ok(PracticeType::Breathing),
            "meditation" => Ok(PracticeType::Meditation),
            "muscle-relaxation" | "muscle_relaxation" | "muscle" => Ok(PracticeType::MuscleRelaxation),
            "grounding" => Ok(PracticeType::Grounding),
            other => Err(Error::UnknownPractice(other.to_string())),
        }
    }
}

impl std::fmt::Display for PracticeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One practice as listed to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub practice_type: PracticeType,
    pub title: String,
    pub heading: String,
    pub description: String,
    pub icon: String,
    pub total_duration_secs: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("breathing".parse::<PracticeType>().unwrap(), PracticeType::Breathing);
        assert_eq!(" Meditation ".parse::<PracticeType>().unwrap(), PracticeType::Meditation);
        assert_eq!(
            "muscle-relaxation".parse::<PracticeType>().unwrap(),
            PracticeType::MuscleRelaxation
        );
        assert_eq!("grounding".parse::<PracticeType>().unwrap(), PracticeType::Grounding);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "yoga".parse::<PracticeType>().unwrap_err();
        assert!(matches!(err, Error::UnknownPractice(ref name) if name == "yoga"));
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&PracticeType::MuscleRelaxation).unwrap();
        assert_eq!(json, "\"muscle-relaxation\"");
        let back: PracticeType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PracticeType::MuscleRelaxation);
    }

    #[test]
    fn test_durations() {
        assert_eq!(PracticeType::Breathing.total_duration_secs(), Some(84));
        assert_eq!(PracticeType::Meditation.total_duration_secs(), Some(300));
        assert_eq!(PracticeType::MuscleRelaxation.total_duration_secs(), Some(135));
        assert_eq!(PracticeType::Grounding.total_duration_secs(), None);
        assert!(!PracticeType::Grounding.is_timer_driven());
    }

    #[test]
    fn test_catalog_lists_all() {
        let catalog = PracticeType::catalog();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog[3].title, "Grounding Techniques");
    }
}
