use std::cmp::Reverse;

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// The eight composite interest islands, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IslandCode {
    #[serde(rename = "CC")]
    CreativeCulture,
    #[serde(rename = "EL")]
    EntrepreneurialLeadership,
    #[serde(rename = "TP")]
    ThinkingPhilosophy,
    #[serde(rename = "HL")]
    HealthLife,
    #[serde(rename = "SU")]
    Sustainability,
    #[serde(rename = "FF")]
    FinanceFuture,
    #[serde(rename = "FE")]
    FutureExploration,
    #[serde(rename = "PG")]
    PublicGovernance,
}

impl IslandCode {
    pub const COUNT: usize = 8;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::CreativeCulture,
            Self::EntrepreneurialLeadership,
            Self::ThinkingPhilosophy,
            Self::HealthLife,
            Self::Sustainability,
            Self::FinanceFuture,
            Self::FutureExploration,
            Self::PublicGovernance,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::CreativeCulture => "CC",
            Self::EntrepreneurialLeadership => "EL",
            Self::ThinkingPhilosophy => "TP",
            Self::HealthLife => "HL",
            Self::Sustainability => "SU",
            Self::FinanceFuture => "FF",
            Self::FutureExploration => "FE",
            Self::PublicGovernance => "PG",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CreativeCulture => "Creative Culture",
            Self::EntrepreneurialLeadership => "Entrepreneurial Leadership",
            Self::ThinkingPhilosophy => "Thinking & Philosophy",
            Self::HealthLife => "Health & Life",
            Self::Sustainability => "Sustainability",
            Self::FinanceFuture => "Finance Future",
            Self::FutureExploration => "Future Exploration",
            Self::PublicGovernance => "Public Governance",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|island| island.code().eq_ignore_ascii_case(code.trim()))
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Fused score for every island. Islands never scored read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IslandScores {
    scores: [u8; IslandCode::COUNT],
}

impl IslandScores {
    pub fn get(&self, island: IslandCode) -> u8 {
        self.scores[island.index()]
    }

    pub fn set(&mut self, island: IslandCode, score: u8) {
        self.scores[island.index()] = score.min(100);
    }

    pub fn iter(&self) -> impl Iterator<Item = (IslandCode, u8)> + '_ {
        IslandCode::ordered()
            .into_iter()
            .map(|island| (island, self.get(island)))
    }

    /// Highest scoring islands. Ties keep canonical island order.
    pub fn top(&self, count: usize) -> Vec<IslandCode> {
        let mut ranked = IslandCode::ordered();
        ranked.sort_by_key(|island| Reverse(self.get(*island)));
        ranked.into_iter().take(count).collect()
    }
}

impl FromIterator<(IslandCode, u8)> for IslandScores {
    fn from_iter<T: IntoIterator<Item = (IslandCode, u8)>>(iter: T) -> Self {
        let mut scores = Self::default();
        for (island, score) in iter {
            scores.set(island, score);
        }
        scores
    }
}

impl Serialize for IslandScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(island, score)| (island.code(), score)))
    }
}

/// English display names for the traditional-tier and meta dimensions used by the bundled
/// question bank. Unknown keys fall back to the key itself.
pub fn dimension_label(dimension: &str) -> &str {
    match dimension {
        "R" => "Realistic",
        "I" => "Investigative",
        "A" => "Artistic",
        "S" => "Social",
        "E" => "Enterprising",
        "C" => "Conventional",
        "CQ" => "Creativity",
        "AQ" => "Adaptability & Resilience",
        "XQ" => "Cross-domain Integration",
        "FQ" => "Financial Intelligence",
        "DQ" => "Digital Intelligence",
        "SEQ" => "Systems & Economy",
        "linguistic" => "Linguistic",
        "interpersonal" => "Interpersonal",
        "logical" => "Logical-Mathematical",
        "spatial" => "Spatial",
        "bodily" => "Bodily-Kinesthetic",
        "musical" => "Musical",
        "intrapersonal" => "Intrapersonal",
        "naturalistic" => "Naturalistic",
        other => other,
    }
}
