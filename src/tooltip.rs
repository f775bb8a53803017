use std::fmt;

use serde::Serialize;

use crate::error::{AnalyzerError, Result};
use crate::readability::Metric;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub band: String,
    pub guidance: &'static str,
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.band, self.guidance)
    }
}

impl Metric {
    pub fn describe(self, score: f64) -> Explanation {
        let shown = format_score(score);
        let grade = score.trunc() as i64;
        let (band, guidance) = match self {
            Metric::FleschReadingEase => (
                "90-100: Very easy, 60-70: Plain English, 0-30: Very difficult".to_string(),
                "Higher scores indicate material that is easier to read; lower scores indicate more complex material.",
            ),
            Metric::FleschKincaidGrade => (
                format!("{shown}: Suitable for grade {grade} students"),
                "Lower grades (5-6) are typically clearer for wider audiences.",
            ),
            Metric::GunningFog => (
                format!("{shown}: Suitable for grade {grade} students"),
                "Lower scores indicate clearer text. Aim for 7-8 for broad accessibility.",
            ),
            Metric::SmogIndex => (
                format!("{shown}: Years of education needed to understand the text"),
                "Lower scores are better for wider accessibility.",
            ),
            Metric::AutomatedReadabilityIndex => (
                format!("{shown}: Corresponds to a U.S. grade level"),
                "Similar to FKGL but considers characters rather than syllables.",
            ),
        };
        Explanation { band, guidance }
    }
}

pub fn describe(label: &str, score: f64) -> Result<Explanation> {
    let metric: Metric = label
        .parse()
        .map_err(|_| AnalyzerError::UnknownMetric(label.to_string()))?;
    Ok(metric.describe(score))
}

/// Whole scores keep one decimal place ("12.0"), others print as-is ("8.35").
pub fn format_score(score: f64) -> String {
    if score.is_finite() && score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        format!("{score}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_bands_truncate() {
        let e = Metric::FleschKincaidGrade.describe(8.7);
        assert_eq!(e.band, "8.7: Suitable for grade 8 students");
        assert_eq!(
            e.to_string(),
            "8.7: Suitable for grade 8 students - Lower grades (5-6) are typically clearer for wider audiences."
        );
        assert_eq!(
            Metric::GunningFog.describe(-1.2).band,
            "-1.2: Suitable for grade -1 students"
        );
    }

    #[test]
    fn reading_ease_band_is_static() {
        assert_eq!(
            Metric::FleschReadingEase.describe(12.0).band,
            Metric::FleschReadingEase.describe(99.0).band
        );
    }

    #[test]
    fn whole_scores_keep_a_decimal() {
        assert_eq!(
            Metric::SmogIndex.describe(12.0).band,
            "12.0: Years of education needed to understand the text"
        );
    }

    #[test]
    fn label_lookup() {
        let e = describe("Automated Readability Index", 6.5).unwrap();
        assert_eq!(e.band, "6.5: Corresponds to a U.S. grade level");
        assert_eq!(
            describe("Coleman-Liau", 1.0),
            Err(AnalyzerError::UnknownMetric("Coleman-Liau".to_string()))
        );
    }
}
