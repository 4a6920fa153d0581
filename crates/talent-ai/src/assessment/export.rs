use std::io::Write;

use serde::Serialize;

use super::ranking::Recommendation;

#[derive(Debug, Serialize)]
struct RecommendationRow<'a> {
    rank: usize,
    island: &'static str,
    island_label: &'static str,
    kind: &'static str,
    title_en: &'a str,
    title_zh: &'a str,
    category_en: &'a str,
    category_zh: &'a str,
    match_score: String,
    trend_score: Option<f64>,
    skills_en: String,
    skills_zh: String,
}

impl<'a> RecommendationRow<'a> {
    fn new(rank: usize, recommendation: &'a Recommendation) -> Self {
        let record = &recommendation.record;
        let category = record.category.as_ref();
        let skills = record.skills.as_ref();
        Self {
            rank,
            island: recommendation.island.code(),
            island_label: recommendation.island.label(),
            kind: record.kind.label(),
            title_en: &record.title.en,
            title_zh: &record.title.zh,
            category_en: category.map(|text| text.en.as_str()).unwrap_or_default(),
            category_zh: category.map(|text| text.zh.as_str()).unwrap_or_default(),
            match_score: format!("{:.1}", recommendation.match_score),
            trend_score: record.trend_score,
            skills_en: skills.map(|list| list.en.join(" / ")).unwrap_or_default(),
            skills_zh: skills.map(|list| list.zh.join(" / ")).unwrap_or_default(),
        }
    }
}

/// Writes ranked recommendations as CSV with a header row, one row per recommendation.
pub fn write_recommendations_csv<W: Write>(
    writer: W,
    recommendations: &[Recommendation],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (index, recommendation) in recommendations.iter().enumerate() {
        csv_writer.serialize(RecommendationRow::new(index + 1, recommendation))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::{CareerKind, CareerRecord, LocalizedList, LocalizedText};
    use crate::assessment::islands::IslandCode;

    #[test]
    fn writes_header_and_bilingual_columns() {
        let recommendations = vec![Recommendation {
            island: IslandCode::FinanceFuture,
            match_score: 78.54,
            record: CareerRecord {
                kind: CareerKind::Job,
                title: LocalizedText {
                    zh: "量化分析师".to_string(),
                    en: "Quantitative Analyst".to_string(),
                },
                category: None,
                trend_score: Some(81.0),
                ai_trend: None,
                skills: Some(LocalizedList {
                    zh: vec!["统计建模".to_string(), "编程".to_string()],
                    en: vec![
                        "Statistical modeling".to_string(),
                        "Programming".to_string(),
                    ],
                }),
            },
        }];

        let mut buffer = Vec::new();
        write_recommendations_csv(&mut buffer, &recommendations).expect("csv written");
        let output = String::from_utf8(buffer).expect("utf8");
        let mut lines = output.lines();

        assert_eq!(
            lines.next(),
            Some("rank,island,island_label,kind,title_en,title_zh,category_en,category_zh,match_score,trend_score,skills_en,skills_zh")
        );
        assert_eq!(
            lines.next(),
            Some("1,FF,Finance Future,job,Quantitative Analyst,量化分析师,,,78.5,81.0,Statistical modeling / Programming,统计建模 / 编程")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_list_writes_nothing() {
        let mut buffer = Vec::new();
        write_recommendations_csv(&mut buffer, &[]).expect("csv written");
        assert!(buffer.is_empty());
    }
}
