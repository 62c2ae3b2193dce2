use serde::{Deserialize, Serialize};

/// Self-reported communication level, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CommunicationLevel {
    Beginner,
    Fluent,
    Expert,
    Exceptional,
}

impl CommunicationLevel {
    pub const ALL: [CommunicationLevel; 4] = [
        CommunicationLevel::Beginner,
        CommunicationLevel::Fluent,
        CommunicationLevel::Expert,
        CommunicationLevel::Exceptional,
    ];

    /// Case-insensitive lookup of one of the four known labels.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(label))
    }

    pub fn label(self) -> &'static str {
        match self {
            CommunicationLevel::Beginner => "Beginner",
            CommunicationLevel::Fluent => "Fluent",
            CommunicationLevel::Expert => "Expert",
            CommunicationLevel::Exceptional => "Exceptional",
        }
    }

    pub fn code(self) -> u8 {
        match self {
            CommunicationLevel::Beginner => 0,
            CommunicationLevel::Fluent => 1,
            CommunicationLevel::Expert => 2,
            CommunicationLevel::Exceptional => 3,
        }
    }
}

/// Numeric code for a raw label. Unknown or missing labels map to 0
/// (the Beginner code) instead of failing.
pub fn communication_code(label: Option<&str>) -> u8 {
    label
        .and_then(CommunicationLevel::parse)
        .map(CommunicationLevel::code)
        .unwrap_or(0)
}
