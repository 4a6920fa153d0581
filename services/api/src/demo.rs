use crate::infra::{load_engine, ScoreRequest};
use clap::Args;
use std::fs::File;
use std::path::PathBuf;
use talent_ai::assessment::{
    dimension_label, write_recommendations_csv, AnswerVector, AssessmentEngine, FreeReport,
    IslandCode, ModuleKind, ProReport,
};
use talent_ai::config::AppConfig;
use talent_ai::error::AppError;
use talent_ai::telemetry;
use tracing::warn;

const PRO_ITEMS: usize = 72;
const ISLAND_SLOT: usize = 18;
const ISLAND_ITEMS: usize = 3;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding `intelligences`, `interests`, `answers` and optional `traditional`
    pub(crate) request: PathBuf,
    /// Write the ranked recommendations to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Print compact JSON instead of pretty-printed output
    #[arg(long)]
    pub(crate) compact: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Score the pro answers without the free-tier results to show the fallback blend.
    #[arg(long)]
    pub(crate) skip_free: bool,
    /// Print the full pro report as JSON after the summary.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Loads configuration, installs the log subscriber and builds the engine.
fn bootstrap() -> Result<AssessmentEngine, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    load_engine(&config.assessment)
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let engine = bootstrap()?;

    let response = ScoreRequest::from_path(&args.request)?.score(&engine);
    let rendered = if args.compact {
        serde_json::to_string(&response)?
    } else {
        serde_json::to_string_pretty(&response)?
    };
    println!("{rendered}");

    if let Some(path) = args.csv {
        match &response.pro {
            Some(report) => {
                let file = File::create(&path)?;
                write_recommendations_csv(file, &report.recommendations)?;
            }
            None => warn!(path = %path.display(), "request has no pro answers; CSV not written"),
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { skip_free, json } = args;
    let engine = bootstrap()?;

    println!("TalentAI assessment demo");

    let (intelligences, interests) = synthetic_free_answers();
    let free = engine.score_free(&intelligences, &interests);
    render_free_report(&free);

    let traditional = if skip_free {
        println!("\nPro scoring without free-tier results (fallback blend)");
        None
    } else {
        println!("\nPro scoring blended with free-tier results");
        Some(free.traditional_tier())
    };
    let report = engine.score_pro(&synthetic_pro_answers(), traditional.as_ref());
    render_pro_report(&report);

    if json {
        println!("\n{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// A respondent leaning toward investigative and artistic interests.
fn synthetic_free_answers() -> (AnswerVector, AnswerVector) {
    let intelligences: Vec<i64> = (0..32).map(|slot| i64::from((slot * 7 + 3) % 5 != 0)).collect();
    let interests: Vec<i64> = (0..30)
        .map(|slot| {
            let letter = slot / 5;
            if letter == 1 || letter == 2 {
                1
            } else {
                i64::from(slot % 3 == 0)
            }
        })
        .collect();
    (
        AnswerVector::answered(&intelligences),
        AnswerVector::answered(&interests),
    )
}

/// Pro answers that strongly endorse the Thinking & Philosophy and Future Exploration islands.
fn synthetic_pro_answers() -> AnswerVector {
    let favored = [IslandCode::ThinkingPhilosophy, IslandCode::FutureExploration];
    let codes: Vec<i64> = (0..PRO_ITEMS)
        .map(|slot| {
            if (ISLAND_SLOT..ISLAND_SLOT + IslandCode::COUNT * ISLAND_ITEMS).contains(&slot) {
                let island = IslandCode::ordered()[(slot - ISLAND_SLOT) / ISLAND_ITEMS];
                if favored.contains(&island) {
                    0
                } else {
                    2
                }
            } else {
                ((slot * 5 + 1) % 4) as i64
            }
        })
        .collect();
    AnswerVector::answered(&codes)
}

fn render_free_report(report: &FreeReport) {
    println!(
        "Free tier: {}/{} intelligence items, {}/{} interest items answered",
        report.completion.intelligences.answered,
        report.completion.intelligences.total,
        report.completion.interests.answered,
        report.completion.interests.total,
    );
    println!("{}:", ModuleKind::Intelligences.label());
    for (dimension, score) in report.intelligences.iter() {
        println!("  {:<22} {:>3}", dimension_label(dimension), score);
    }
    let leading: Vec<&str> = report
        .top_interests
        .iter()
        .map(|letter| dimension_label(letter))
        .collect();
    println!("Leading interests: {}", leading.join(", "));
}

fn render_pro_report(report: &ProReport) {
    println!(
        "Pro tier: {}/{} items answered, personality type {}",
        report.completion.answered, report.completion.total, report.polarity.code
    );
    println!("{}:", ModuleKind::MetaIntelligence.label());
    for (dimension, score) in report.meta.iter() {
        println!("  {:<26} {:>3}", dimension_label(dimension), score);
    }
    println!("{}:", ModuleKind::BigFive.label());
    for (trait_key, score) in report.big_five.iter() {
        println!("  {:<26} {:>3}", trait_key, score);
    }
    println!("{} (fused):", ModuleKind::Islands.label());
    for (island, score) in report.islands.iter() {
        let marker = if report.top_islands.contains(&island) { "*" } else { " " };
        println!("  {marker} {:<2} {:<28} {:>3}", island.code(), island.label(), score);
    }
    if report.recommendations.is_empty() {
        println!("Recommendations: none");
        return;
    }
    println!("Recommendations:");
    for (index, recommendation) in report.recommendations.iter().enumerate() {
        println!(
            "  {}. {} [{}] {} - match {:.1}",
            index + 1,
            recommendation.record.title.en,
            recommendation.record.kind.label(),
            recommendation.island.label(),
            recommendation.match_score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_respondent_favors_the_seeded_islands() {
        let engine = AssessmentEngine::standard().expect("bundled catalog parses");
        let (intelligences, interests) = synthetic_free_answers();
        let free = engine.score_free(&intelligences, &interests);

        let report = engine.score_pro(&synthetic_pro_answers(), Some(&free.traditional_tier()));

        assert_eq!(&free.top_interests[..2], ["I", "A"]);
        assert!(report.completion.is_complete());
        assert_eq!(
            &report.top_islands[..2],
            [IslandCode::ThinkingPhilosophy, IslandCode::FutureExploration]
        );
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn bootstrap_installs_the_log_subscriber_before_loading() {
        let engine = bootstrap().expect("default configuration loads");

        assert!(tracing::dispatcher::has_been_set());
        assert_eq!(engine.catalog().len(), 24);
    }
}
