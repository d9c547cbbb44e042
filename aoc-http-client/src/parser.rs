//! HTML response parsing utilities

use crate::client::{Submission, SubmissionOutcome};
use crate::error::AocError;
use regex::Regex;
use scraper::{Html, Selector};
use std::cell::OnceCell;
use std::time::Duration;

/// Parser for AOC HTML responses with cached regex patterns and selectors
#[derive(Clone, Debug)]
pub(crate) struct ResponseParser {
    throttle_regex: OnceCell<Regex>,
    return_link_regex: OnceCell<Regex>,
    article_selector: OnceCell<Selector>,
    main_selector: OnceCell<Selector>,
    description_selector: OnceCell<Selector>,
    success_selector: OnceCell<Selector>,
    form_selector: OnceCell<Selector>,
}

impl ResponseParser {
    /// Create a new parser with uninitialized caches
    pub fn new() -> Self {
        Self {
            throttle_regex: OnceCell::new(),
            return_link_regex: OnceCell::new(),
            article_selector: OnceCell::new(),
            main_selector: OnceCell::new(),
            description_selector: OnceCell::new(),
            success_selector: OnceCell::new(),
            form_selector: OnceCell::new(),
        }
    }

    /// Get or compile the throttle duration regex
    fn throttle_regex(&self) -> &Regex {
        self.throttle_regex
            .get_or_init(|| Regex::new(r"You have (.+?) left to wait\.").unwrap())
    }

    /// Get or compile the regex matching the trailing "[Return to Day N]" link
    fn return_link_regex(&self) -> &Regex {
        self.return_link_regex
            .get_or_init(|| Regex::new(r"\[Return [^\]]*\]").unwrap())
    }

    fn article_selector(&self) -> &Selector {
        self.article_selector
            .get_or_init(|| Selector::parse("article").unwrap())
    }

    fn main_selector(&self) -> &Selector {
        self.main_selector
            .get_or_init(|| Selector::parse("main").unwrap())
    }

    fn description_selector(&self) -> &Selector {
        self.description_selector
            .get_or_init(|| Selector::parse("article.day-desc").unwrap())
    }

    fn success_selector(&self) -> &Selector {
        self.success_selector
            .get_or_init(|| Selector::parse(".day-success").unwrap())
    }

    fn form_selector(&self) -> &Selector {
        self.form_selector
            .get_or_init(|| Selector::parse("form").unwrap())
    }

    /// Extract the text of the answer page's article, falling back to `main`
    pub fn extract_article_text(&self, html: &str) -> Result<String, AocError> {
        let document = Html::parse_document(html);

        let element = document
            .select(self.article_selector())
            .next()
            .or_else(|| document.select(self.main_selector()).next())
            .ok_or(AocError::HtmlParse("article"))?;

        Ok(element.text().collect::<String>())
    }

    /// Extract the puzzle description fragments from a day page
    ///
    /// The page holds one `article.day-desc` per unlocked part; all of them are
    /// returned, in page order, as raw HTML.
    pub fn extract_description(&self, html: &str) -> Result<String, AocError> {
        let document = Html::parse_document(html);

        let fragments: Vec<String> = document
            .select(self.description_selector())
            .map(|article| article.html())
            .collect();

        if fragments.is_empty() {
            return Err(AocError::HtmlParse("article.day-desc"));
        }
        Ok(fragments.join("\n"))
    }

    /// Count the stars earned on a day page
    ///
    /// While an answer form is shown the day is unfinished: one star if part 1
    /// is marked as solved, none otherwise. Without a form both are earned.
    pub fn star_count(&self, html: &str) -> u8 {
        let document = Html::parse_document(html);
        let has_form = document.select(self.form_selector()).next().is_some();
        let has_success = document.select(self.success_selector()).next().is_some();

        match (has_form, has_success) {
            (false, _) => 2,
            (true, true) => 1,
            (true, false) => 0,
        }
    }

    /// Extract throttle duration from response text
    fn extract_throttle_duration(&self, text: &str) -> Option<Duration> {
        let regex = self.throttle_regex();
        let captures = regex.captures(text)?;
        let duration_str = captures.get(1)?.as_str();
        humantime::parse_duration(duration_str).ok()
    }

    /// Parse submission response and determine the result
    pub fn parse_submission_response(&self, html: &str) -> Result<Submission, AocError> {
        let text = self.extract_article_text(html)?;

        let outcome = if text.contains("That's the right answer") {
            SubmissionOutcome::Correct
        } else if text.contains("not the right answer") {
            SubmissionOutcome::Incorrect
        } else if text.contains("already complete it") {
            SubmissionOutcome::AlreadyCompleted
        } else if text.contains("gave an answer too recently") {
            SubmissionOutcome::Throttled {
                wait_time: self.extract_throttle_duration(&text),
            }
        } else {
            SubmissionOutcome::Unrecognized
        };

        let message = self
            .return_link_regex()
            .replace(&text, "")
            .trim()
            .to_string();

        Ok(Submission { outcome, message })
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CORRECT_PAGE: &str = r#"<html><body><main><article><p>That's the right answer!  You are <span class="day-success">one gold star</span> closer to restoring snow operations. <a href="/2023/day/1#part2">[Continue to Part Two]</a></p></article></main></body></html>"#;

    #[test]
    fn test_correct_answer() {
        let parser = ResponseParser::new();
        let submission = parser.parse_submission_response(CORRECT_PAGE).unwrap();
        assert_eq!(submission.outcome, SubmissionOutcome::Correct);
        assert!(submission.is_correct());
        assert!(submission.message.starts_with("That's the right answer!"));
    }

    #[test]
    fn test_return_link_is_stripped() {
        let parser = ResponseParser::new();
        let html = r#"<html><body><main><article><p>That's not the right answer.  If you're stuck, make sure you're using the full input data. <a href="/2023/day/1">[Return to Day 1]</a></p></article></main></body></html>"#;
        let submission = parser.parse_submission_response(html).unwrap();
        assert_eq!(submission.outcome, SubmissionOutcome::Incorrect);
        assert!(!submission.is_correct());
        assert!(!submission.message.contains("[Return"));
        assert!(submission.message.ends_with("full input data."));
    }

    #[test]
    fn test_already_completed() {
        let parser = ResponseParser::new();
        let html = r#"<html><body><main><article><p>You don't seem to be solving the right level.  Did you already complete it? <a href="/2023/day/1">[Return to Day 1]</a></p></article></main></body></html>"#;
        let submission = parser.parse_submission_response(html).unwrap();
        assert_eq!(submission.outcome, SubmissionOutcome::AlreadyCompleted);
    }

    #[test]
    fn test_throttled_without_duration() {
        let parser = ResponseParser::new();
        let html = r#"<html><body><main>You gave an answer too recently.</main></body></html>"#;
        let submission = parser.parse_submission_response(html).unwrap();
        match submission.outcome {
            SubmissionOutcome::Throttled { wait_time } => {
                assert!(wait_time.is_none());
            }
            _ => panic!("Expected Throttled result"),
        }
    }

    #[test]
    fn test_unknown_text_is_not_correct() {
        let parser = ResponseParser::new();
        let html = r#"<html><body><article>Something else entirely</article></body></html>"#;
        let submission = parser.parse_submission_response(html).unwrap();
        assert_eq!(submission.outcome, SubmissionOutcome::Unrecognized);
        assert!(!submission.is_correct());
    }

    #[test]
    fn test_missing_article_and_main_fails() {
        let parser = ResponseParser::new();
        let result = parser.parse_submission_response("<html><body><div>hi</div></body></html>");
        assert!(matches!(result, Err(AocError::HtmlParse("article"))));
    }

    #[test]
    fn test_star_count() {
        let parser = ResponseParser::new();

        let unsolved = r#"<main><article class="day-desc"><h2>--- Day 1 ---</h2></article><form method="post"></form></main>"#;
        assert_eq!(parser.star_count(unsolved), 0);

        let half = r#"<main><article class="day-desc"></article><p>Your puzzle answer was <code>142</code>.</p><p class="day-success">The first half of this puzzle is complete!</p><article class="day-desc"></article><form method="post"></form></main>"#;
        assert_eq!(parser.star_count(half), 1);

        let done = r#"<main><article class="day-desc"></article><p class="day-success">Both parts of this puzzle are complete!</p></main>"#;
        assert_eq!(parser.star_count(done), 2);
    }

    #[test]
    fn test_description_collects_every_part() {
        let parser = ResponseParser::new();
        let html = r#"<html><body><main><article class="day-desc"><h2>--- Day 1: Trebuchet?! ---</h2><p>One</p></article><p>Your puzzle answer was <code>142</code>.</p><article class="day-desc"><h2 id="part2">--- Part Two ---</h2><p>Two</p></article></main></body></html>"#;

        let description = parser.extract_description(html).unwrap();
        assert!(description.contains("Trebuchet"));
        assert!(description.contains("Part Two"));
        assert!(!description.contains("Your puzzle answer"));
        assert!(description.find("One").unwrap() < description.find("Two").unwrap());
    }

    #[test]
    fn test_description_missing() {
        let parser = ResponseParser::new();
        let result = parser.extract_description("<html><body><article>x</article></body></html>");
        assert!(matches!(result, Err(AocError::HtmlParse("article.day-desc"))));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_incorrect_answer_detection(
            prefix in "[a-zA-Z0-9 .,!?\\n]{0,100}",
            suffix in "[a-zA-Z0-9 .,!?\\n]{0,100}",
            pattern_variant in prop::sample::select(vec![
                "not the right answer",
                "That's not the right answer",
                "not the right answer.",
                "not the right answer!",
            ]),
        ) {
            let html = format!(
                r#"<html><body><main><article>{} {} {}</article></main></body></html>"#,
                prefix, pattern_variant, suffix
            );

            let parser = ResponseParser::new();
            let result = parser.parse_submission_response(&html);
            prop_assert!(result.is_ok());
            prop_assert_eq!(result.unwrap().outcome, SubmissionOutcome::Incorrect);
        }

        #[test]
        fn prop_throttle_duration_extraction(
            minutes in 0u64..60u64,
            seconds in 0u64..60u64,
            prefix in "[a-zA-Z0-9 .,!?\\n]{0,50}",
            suffix in "[a-zA-Z0-9 .,!?\\n]{0,50}",
        ) {
            prop_assume!(minutes > 0 || seconds > 0);

            let duration_str = if minutes > 0 && seconds > 0 {
                format!("{}m {}s", minutes, seconds)
            } else if minutes > 0 {
                format!("{}m", minutes)
            } else {
                format!("{}s", seconds)
            };

            let html = format!(
                r#"<html><body><main><article>{} You gave an answer too recently. You have {} left to wait. {}</article></main></body></html>"#,
                prefix, duration_str, suffix
            );

            let parser = ResponseParser::new();
            let submission = parser.parse_submission_response(&html).unwrap();

            match submission.outcome {
                SubmissionOutcome::Throttled { wait_time } => {
                    prop_assert_eq!(
                        wait_time.map(|d| d.as_secs()),
                        Some(minutes * 60 + seconds),
                        "Duration string: '{}'",
                        duration_str
                    );
                }
                other => prop_assert!(false, "Expected Throttled result, got {:?}", other),
            }
        }
    }
}
