use super::bank::{
    AssessmentForm, LikertScale, ModuleKind, Pole, QuestionBank, QuestionItem, QuestionModule,
    ScaleKind,
};

/// Multiple-intelligence dimensions with the expected answer of their ability item.
const INTELLIGENCE_DIMENSIONS: [(&str, bool); 8] = [
    ("linguistic", true),
    ("interpersonal", false),
    ("logical", true),
    ("spatial", false),
    ("bodily", true),
    ("musical", false),
    ("intrapersonal", true),
    ("naturalistic", false),
];
const INTELLIGENCE_PREFERENCE_ITEMS: usize = 3;

pub const INTEREST_LETTERS: [&str; 6] = ["R", "I", "A", "S", "E", "C"];
const INTEREST_ITEMS: usize = 5;

pub const META_DIMENSIONS: [&str; 6] = ["CQ", "AQ", "XQ", "FQ", "DQ", "SEQ"];
const META_ITEMS: usize = 3;

const ISLAND_ITEMS: usize = 3;

pub const BIG_FIVE_TRAITS: [&str; 5] = ["O", "C", "E", "A", "N"];
const BIG_FIVE_ITEMS: usize = 2;

const ENNEAGRAM_TYPES: u8 = 9;

const POLARITY_POLES: [Pole; 8] = [
    Pole::E,
    Pole::I,
    Pole::S,
    Pole::N,
    Pole::T,
    Pole::F,
    Pole::J,
    Pole::P,
];

const COMPOSITE_TRAITS: [&str; 3] = ["resilience", "collaboration", "self_direction"];

pub(crate) fn question_bank() -> QuestionBank {
    QuestionBank {
        intelligences: bind_standard(vec![intelligence_module()]),
        interests: bind_standard(vec![interest_module()]),
        pro: bind_standard(vec![
            meta_module(),
            island_module(),
            big_five_module(),
            enneagram_module(),
            polarity_module(),
            composite_module(),
        ]),
    }
}

// Ids and module kinds come from the tables above and are unique by construction.
fn bind_standard(modules: Vec<QuestionModule>) -> AssessmentForm {
    AssessmentForm::assign_slots(LikertScale::default(), modules)
}

fn intelligence_module() -> QuestionModule {
    let items = INTELLIGENCE_DIMENSIONS
        .iter()
        .flat_map(|&(dimension, expected)| {
            (1..=INTELLIGENCE_PREFERENCE_ITEMS)
                .map(move |n| QuestionItem::endorsement(format!("mi-{dimension}-{n}"), dimension))
                .chain(std::iter::once(QuestionItem::expected(
                    format!("mi-{dimension}-ability"),
                    dimension,
                    expected,
                )))
        })
        .collect();
    QuestionModule {
        kind: ModuleKind::Intelligences,
        items,
    }
}

fn interest_module() -> QuestionModule {
    QuestionModule {
        kind: ModuleKind::Interests,
        items: repeated("ria", &INTEREST_LETTERS, INTEREST_ITEMS, ScaleKind::BinaryEndorsement),
    }
}

fn meta_module() -> QuestionModule {
    QuestionModule {
        kind: ModuleKind::MetaIntelligence,
        items: repeated("meta", &META_DIMENSIONS, META_ITEMS, ScaleKind::FourLevel),
    }
}

fn island_module() -> QuestionModule {
    let codes = super::islands::IslandCode::ordered().map(|code| code.code());
    QuestionModule {
        kind: ModuleKind::Islands,
        items: repeated("island", &codes, ISLAND_ITEMS, ScaleKind::FourLevel),
    }
}

fn big_five_module() -> QuestionModule {
    QuestionModule {
        kind: ModuleKind::BigFive,
        items: repeated("big5", &BIG_FIVE_TRAITS, BIG_FIVE_ITEMS, ScaleKind::FourLevel),
    }
}

fn enneagram_module() -> QuestionModule {
    let items = (1..=ENNEAGRAM_TYPES)
        .map(|kind| QuestionItem::likert(format!("ennea-{kind}"), format!("E{kind}")))
        .collect();
    QuestionModule {
        kind: ModuleKind::Enneagram,
        items,
    }
}

fn polarity_module() -> QuestionModule {
    let items = POLARITY_POLES
        .iter()
        .map(|&pole| {
            let dimension = format!("{}-{}", pole.axis().code(), pole.letter());
            QuestionItem::likert(format!("type-{dimension}"), dimension).with_pole(pole)
        })
        .collect();
    QuestionModule {
        kind: ModuleKind::Polarity,
        items,
    }
}

fn composite_module() -> QuestionModule {
    let items = COMPOSITE_TRAITS
        .iter()
        .map(|&name| QuestionItem::likert(format!("composite-{name}"), name))
        .collect();
    QuestionModule {
        kind: ModuleKind::Composite,
        items,
    }
}

fn repeated(
    prefix: &str,
    dimensions: &[&str],
    per_dimension: usize,
    scale: ScaleKind,
) -> Vec<QuestionItem> {
    dimensions
        .iter()
        .flat_map(|&dimension| {
            (1..=per_dimension).map(move |n| QuestionItem {
                id: format!("{prefix}-{dimension}-{n}"),
                dimension: dimension.to_string(),
                scale,
                pole: None,
            })
        })
        .collect()
}
