use std::fmt;

use crate::tooltip::format_score;
use crate::AnalysisReport;

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### Readability Scores")?;
        for (metric, score) in self.readability.iter() {
            writeln!(f, "{metric}: {}", format_score(score))?;
            if let Some(explanation) = self.explanations.get(&metric) {
                writeln!(f, "    {explanation}")?;
            }
        }

        writeln!(f, "\n### Keywords")?;
        if self.keywords.is_empty() {
            writeln!(f, "No keywords found.")?;
        }
        for keyword in &self.keywords {
            writeln!(f, "{} (Score: {:.4})", keyword.phrase, keyword.relevance)?;
        }

        writeln!(f, "\n### Basic Text Metrics")?;
        writeln!(
            f,
            "Word Count: {}, Sentence Count: {}, Average Word Length: {:.2} characters",
            self.basic.word_count, self.basic.sentence_count, self.basic.average_word_length
        )?;

        writeln!(f, "\n### Clarity and Precision Index")?;
        writeln!(f, "{}", self.clarity.message)?;

        writeln!(f, "\n### Engagement and Persuasiveness Score")?;
        writeln!(f, "{}", self.engagement.message)?;

        if !self.warnings.is_empty() {
            writeln!(f, "\n### Warnings")?;
            for warning in &self.warnings {
                writeln!(f, "{warning}")?;
            }
        }
        Ok(())
    }
}

pub fn text(report: &AnalysisReport) -> String {
    report.to_string()
}

pub fn json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use crate::Analyzer;

    #[test]
    fn basic_metrics_line() {
        let report = Analyzer::default()
            .analyze("This is a simple sentence. This is another simple sentence.")
            .unwrap();
        let out = super::text(&report);
        assert!(
            out.contains(
                "Word Count: 10, Sentence Count: 2, Average Word Length: 5.00 characters"
            ),
            "unexpected report:\n{out}"
        );
        assert!(out.contains("Flesch Reading Ease: "));
        assert!(out.ends_with("enhance engagement.\n"));
    }

    #[test]
    fn keyword_lines_use_four_decimals() {
        let report = Analyzer::default()
            .analyze("Search ranking matters. Search ranking improves traffic.")
            .unwrap();
        let out = report.to_string();
        let first = &report.keywords[0];
        assert!(out.contains(&format!("{} (Score: {:.4})", first.phrase, first.relevance)));
    }
}
