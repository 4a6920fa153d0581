use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::standard;

/// Ordered weights for the four-level endorsement scale, indexed by the raw answer code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikertScale {
    weights: Vec<u32>,
}

impl LikertScale {
    pub fn new(weights: Vec<u32>) -> Self {
        Self { weights }
    }

    /// Weight for an answer code, or `None` when the code falls outside the scale.
    pub fn weight(&self, code: i64) -> Option<u32> {
        usize::try_from(code)
            .ok()
            .and_then(|index| self.weights.get(index).copied())
    }

    pub fn max_weight(&self) -> u32 {
        self.weights.iter().copied().max().unwrap_or(0)
    }
}

impl Default for LikertScale {
    fn default() -> Self {
        Self::new(vec![3, 2, 1, 0])
    }
}

/// Normalization rule applied to an item's raw answer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    /// Any positive code is a hit.
    BinaryEndorsement,
    /// The code read as a boolean must equal `expected` to score.
    BinaryExpected { expected: bool },
    /// The code indexes the form's [`LikertScale`].
    FourLevel,
}

/// Points earned by one answered item against the points it could have earned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Credit {
    pub earned: f64,
    pub possible: f64,
}

impl ScaleKind {
    /// Returns `None` when the code cannot be read under this scale; the item then counts
    /// as unanswered.
    pub fn credit(self, code: i64, scale: &LikertScale) -> Option<Credit> {
        match self {
            ScaleKind::BinaryEndorsement => Some(Credit {
                earned: if code > 0 { 1.0 } else { 0.0 },
                possible: 1.0,
            }),
            ScaleKind::BinaryExpected { expected } => Some(Credit {
                earned: if (code > 0) == expected { 1.0 } else { 0.0 },
                possible: 1.0,
            }),
            ScaleKind::FourLevel => scale.weight(code).map(|weight| Credit {
                earned: f64::from(weight),
                possible: f64::from(scale.max_weight()),
            }),
        }
    }
}

/// Preference axes resolved by the polarity module, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolarityAxis {
    #[serde(rename = "EI")]
    Ei,
    #[serde(rename = "SN")]
    Sn,
    #[serde(rename = "TF")]
    Tf,
    #[serde(rename = "JP")]
    Jp,
}

impl PolarityAxis {
    pub const fn ordered() -> [Self; 4] {
        [Self::Ei, Self::Sn, Self::Tf, Self::Jp]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Ei => "EI",
            Self::Sn => "SN",
            Self::Tf => "TF",
            Self::Jp => "JP",
        }
    }

    /// Canonical pole order. The first pole wins ties.
    pub const fn poles(self) -> (Pole, Pole) {
        match self {
            Self::Ei => (Pole::E, Pole::I),
            Self::Sn => (Pole::S, Pole::N),
            Self::Tf => (Pole::T, Pole::F),
            Self::Jp => (Pole::J, Pole::P),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pole {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl Pole {
    pub const fn axis(self) -> PolarityAxis {
        match self {
            Self::E | Self::I => PolarityAxis::Ei,
            Self::S | Self::N => PolarityAxis::Sn,
            Self::T | Self::F => PolarityAxis::Tf,
            Self::J | Self::P => PolarityAxis::Jp,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            Self::E => 'E',
            Self::I => 'I',
            Self::S => 'S',
            Self::N => 'N',
            Self::T => 'T',
            Self::F => 'F',
            Self::J => 'J',
            Self::P => 'P',
        }
    }
}

/// One questionnaire item. Item wording lives with the caller; the core only needs the
/// scoring shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestionItem", into = "RawQuestionItem")]
pub struct QuestionItem {
    pub id: String,
    pub dimension: String,
    pub scale: ScaleKind,
    pub pole: Option<Pole>,
}

impl QuestionItem {
    pub fn endorsement(id: impl Into<String>, dimension: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dimension: dimension.into(),
            scale: ScaleKind::BinaryEndorsement,
            pole: None,
        }
    }

    pub fn expected(id: impl Into<String>, dimension: impl Into<String>, expected: bool) -> Self {
        Self {
            id: id.into(),
            dimension: dimension.into(),
            scale: ScaleKind::BinaryExpected { expected },
            pole: None,
        }
    }

    pub fn likert(id: impl Into<String>, dimension: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dimension: dimension.into(),
            scale: ScaleKind::FourLevel,
            pole: None,
        }
    }

    pub fn with_pole(mut self, pole: Pole) -> Self {
        self.pole = Some(pole);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawScale {
    Binary,
    Likert4,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawQuestionItem {
    id: String,
    dimension: String,
    scale: RawScale,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    answer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pole: Option<Pole>,
}

impl TryFrom<RawQuestionItem> for QuestionItem {
    type Error = String;

    fn try_from(raw: RawQuestionItem) -> Result<Self, Self::Error> {
        if raw.dimension.trim().is_empty() {
            return Err(format!("item {} has an empty dimension", raw.id));
        }
        let scale = match (raw.scale, raw.answer) {
            (RawScale::Binary, Some(expected)) => ScaleKind::BinaryExpected { expected },
            (RawScale::Binary, None) => ScaleKind::BinaryEndorsement,
            (RawScale::Likert4, None) => ScaleKind::FourLevel,
            (RawScale::Likert4, Some(_)) => {
                return Err(format!(
                    "item {} declares an expected answer on a likert4 scale",
                    raw.id
                ))
            }
        };
        Ok(Self {
            id: raw.id,
            dimension: raw.dimension,
            scale,
            pole: raw.pole,
        })
    }
}

impl From<QuestionItem> for RawQuestionItem {
    fn from(item: QuestionItem) -> Self {
        let (scale, answer) = match item.scale {
            ScaleKind::BinaryEndorsement => (RawScale::Binary, None),
            ScaleKind::BinaryExpected { expected } => (RawScale::Binary, Some(expected)),
            ScaleKind::FourLevel => (RawScale::Likert4, None),
        };
        Self {
            id: item.id,
            dimension: item.dimension,
            scale,
            answer,
            pole: item.pole,
        }
    }
}

/// Independently designed question modules. A form lists its modules in answer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    Intelligences,
    Interests,
    MetaIntelligence,
    Islands,
    BigFive,
    Enneagram,
    Polarity,
    Composite,
}

impl ModuleKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Intelligences => "Multiple Intelligences",
            Self::Interests => "RIASEC Interests",
            Self::MetaIntelligence => "Meta-Intelligences",
            Self::Islands => "New Interest Islands",
            Self::BigFive => "Big Five",
            Self::Enneagram => "Enneagram",
            Self::Polarity => "Type Preferences",
            Self::Composite => "Composite Traits",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionModule {
    pub kind: ModuleKind,
    pub items: Vec<QuestionItem>,
}

/// An item paired with the answer-vector position it reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundItem {
    pub slot: usize,
    pub item: QuestionItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundModule {
    kind: ModuleKind,
    items: Vec<BoundItem>,
}

impl BoundModule {
    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    pub fn items(&self) -> &[BoundItem] {
        &self.items
    }

    /// Dimensions in the order their first item appears.
    pub fn dimensions(&self) -> Vec<&str> {
        declared_dimensions(&self.items)
    }
}

pub(crate) fn declared_dimensions(items: &[BoundItem]) -> Vec<&str> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|bound| bound.item.dimension.as_str())
        .filter(|dimension| seen.insert(*dimension))
        .collect()
}

/// A sequence of modules answered into a single answer vector. Slots are assigned once,
/// when the form is bound, so scoring never depends on positional bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawForm", into = "RawForm")]
pub struct AssessmentForm {
    scale: LikertScale,
    modules: Vec<BoundModule>,
    slot_count: usize,
}

impl AssessmentForm {
    pub fn bind(
        scale: LikertScale,
        modules: Vec<QuestionModule>,
    ) -> Result<Self, QuestionBankError> {
        let mut kinds = HashSet::new();
        let mut ids = HashSet::new();

        for module in &modules {
            if !kinds.insert(module.kind) {
                return Err(QuestionBankError::DuplicateModule(module.kind));
            }
            for item in &module.items {
                if !ids.insert(item.id.as_str()) {
                    return Err(QuestionBankError::DuplicateItem(item.id.clone()));
                }
                if item.pole.is_some() && module.kind != ModuleKind::Polarity {
                    return Err(QuestionBankError::UnexpectedPole {
                        item: item.id.clone(),
                        module: module.kind,
                    });
                }
            }
        }

        Ok(Self::assign_slots(scale, modules))
    }

    /// Assigns contiguous slots in module order without validating the modules.
    pub(crate) fn assign_slots(scale: LikertScale, modules: Vec<QuestionModule>) -> Self {
        let mut slot = 0;
        let modules = modules
            .into_iter()
            .map(|module| {
                let items = module
                    .items
                    .into_iter()
                    .map(|item| {
                        let bound = BoundItem { slot, item };
                        slot += 1;
                        bound
                    })
                    .collect();
                BoundModule {
                    kind: module.kind,
                    items,
                }
            })
            .collect();

        Self {
            scale,
            modules,
            slot_count: slot,
        }
    }

    pub fn scale(&self) -> &LikertScale {
        &self.scale
    }

    pub fn modules(&self) -> &[BoundModule] {
        &self.modules
    }

    pub fn module(&self, kind: ModuleKind) -> Option<&BoundModule> {
        self.modules.iter().find(|module| module.kind == kind)
    }

    /// Number of answer positions the form reads.
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawForm {
    #[serde(default)]
    scale: LikertScale,
    modules: Vec<QuestionModule>,
}

impl TryFrom<RawForm> for AssessmentForm {
    type Error = QuestionBankError;

    fn try_from(raw: RawForm) -> Result<Self, Self::Error> {
        AssessmentForm::bind(raw.scale, raw.modules)
    }
}

impl From<AssessmentForm> for RawForm {
    fn from(form: AssessmentForm) -> Self {
        Self {
            scale: form.scale,
            modules: form
                .modules
                .into_iter()
                .map(|module| QuestionModule {
                    kind: module.kind,
                    items: module.items.into_iter().map(|bound| bound.item).collect(),
                })
                .collect(),
        }
    }
}

/// The three forms a respondent can take: the two free-tier forms and the pro form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub intelligences: AssessmentForm,
    pub interests: AssessmentForm,
    pub pro: AssessmentForm,
}

impl QuestionBank {
    pub fn standard() -> Self {
        standard::question_bank()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, QuestionBankError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QuestionBankError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| QuestionBankError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionBankError {
    #[error("module {0:?} is declared more than once")]
    DuplicateModule(ModuleKind),
    #[error("item id {0} is declared more than once")]
    DuplicateItem(String),
    #[error("item {item} carries a pole but belongs to the {module:?} module")]
    UnexpectedPole { item: String, module: ModuleKind },
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid question bank JSON: {0}")]
    Json(#[from] serde_json::Error),
}
