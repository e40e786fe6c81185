//! Keyword-triggered branching over the visitor's latest message.
//! Decides what catalog context to inject and whether contact details
//! should be captured as a lead. No LLM call happens here.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::query::{ProjectFilter, ProjectSort, ProjectStatus};

/// Longest message fragment ever inserted into a prompt.
const MAX_PROMPT_INPUT_CHARS: usize = 2_000;

static BUDGET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:aed\s*)?([0-9]+(?:\.[0-9]+)?)\s*(m|million|k|thousand)\b").unwrap()
});
static PLAIN_AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([0-9]{1,3}(?:,[0-9]{3})+|[0-9]{6,9})\b").unwrap());
static BEDROOMS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([0-9])\s*(?:br|bhk|bed(?:room)?s?)\b").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
// Requires an international "+"/"00" or local "0" prefix so bare prices
// never read as phone numbers.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+|00|0)[0-9][0-9 \-]{7,13}[0-9]").unwrap());
static READY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bready\b").unwrap());

/// Filters recognized in the message, ready to run through the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectedFilters {
    pub area: Option<String>,
    pub bedrooms: Option<i32>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub status: Option<ProjectStatus>,
    pub golden_visa: bool,
}

impl DetectedFilters {
    pub fn to_project_filter(&self, limit: i64) -> ProjectFilter {
        ProjectFilter {
            area: self.area.clone(),
            bedrooms: self.bedrooms,
            min_price: self.min_price,
            max_price: self.max_price,
            status: self.status,
            golden_visa: self.golden_visa.then_some(true),
            sort: Some(ProjectSort::PriceAsc),
            limit: Some(limit),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatIntent {
    /// At least one search signal was recognized; run the filters and
    /// inject matching listings.
    PropertySearch(DetectedFilters),
    /// Golden-visa question with no concrete search signals.
    GoldenVisa,
    /// Visitor asked for a brochure/floor plan.
    Brochure,
    General,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDetails {
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Caps length and strips control characters before a message fragment is
/// inserted into a prompt.
pub fn sanitize_for_prompt(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .take(MAX_PROMPT_INPUT_CHARS)
        .collect()
}

/// Parses a budget mention in AED. "over"/"from"/"above" near the amount
/// makes it a lower bound; anything else is treated as the buyer's ceiling.
pub fn parse_budget(message: &str) -> (Option<i64>, Option<i64>) {
    let amount = BUDGET_RE
        .captures(message)
        .and_then(|cap| {
            let value: f64 = cap[1].parse().ok()?;
            let multiplier = match cap[2].to_ascii_lowercase().as_str() {
                "m" | "million" => 1_000_000.0,
                _ => 1_000.0,
            };
            Some((value * multiplier) as i64)
        })
        .or_else(|| {
            PLAIN_AMOUNT_RE
                .captures(message)
                .and_then(|cap| cap[1].replace(',', "").parse::<i64>().ok())
        });

    let Some(amount) = amount else {
        return (None, None);
    };
    let lower = message.to_lowercase();
    if ["over", "above", "from", "at least", "more than"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        (Some(amount), None)
    } else {
        (None, Some(amount))
    }
}

/// "studio" counts as zero bedrooms.
pub fn parse_bedrooms(message: &str) -> Option<i32> {
    if message.to_lowercase().contains("studio") {
        return Some(0);
    }
    BEDROOMS_RE
        .captures(message)
        .and_then(|cap| cap[1].parse().ok())
}

pub fn parse_status(message: &str) -> Option<ProjectStatus> {
    let lower = message.to_lowercase();
    if lower.contains("off-plan") || lower.contains("off plan") || lower.contains("offplan") {
        Some(ProjectStatus::Offplan)
    } else if READY_RE.is_match(message) {
        Some(ProjectStatus::Ready)
    } else {
        None
    }
}

/// Case-insensitive containment match of the message against the catalog's
/// area names (areas join projects by name, so the name is the key).
pub fn match_area(message: &str, area_names: &[String]) -> Option<String> {
    let lower = message.to_lowercase();
    area_names
        .iter()
        .find(|name| lower.contains(&name.to_lowercase()))
        .cloned()
}

pub fn mentions_golden_visa(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("golden visa") || lower.contains("residency")
}

pub fn mentions_brochure(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("brochure") || lower.contains("floor plan") || lower.contains("floorplan")
}

const SEARCH_KEYWORDS: &[&str] = &[
    "apartment",
    "villa",
    "townhouse",
    "penthouse",
    "property",
    "invest",
    "buy",
];

/// Extracts phone/email if the visitor shared contact details.
pub fn detect_contact(message: &str) -> Option<ContactDetails> {
    let email = EMAIL_RE.find(message).map(|m| m.as_str().to_string());
    let phone = PHONE_RE
        .find(message)
        .map(|m| m.as_str().replace([' ', '-'], ""));
    if email.is_none() && phone.is_none() {
        return None;
    }
    Some(ContactDetails { phone, email })
}

/// The branching decision. Search signals win over a bare golden-visa
/// question (the filter keeps the visa constraint); brochure requests win
/// only when nothing is being searched.
pub fn detect_intent(message: &str, area_names: &[String]) -> ChatIntent {
    let (min_price, max_price) = parse_budget(message);
    let golden_visa = mentions_golden_visa(message);
    let lower = message.to_lowercase();
    let filters = DetectedFilters {
        area: match_area(message, area_names),
        bedrooms: parse_bedrooms(message),
        min_price,
        max_price,
        status: parse_status(message),
        golden_visa,
    };

    let concrete_signal = filters.area.is_some()
        || filters.bedrooms.is_some()
        || filters.min_price.is_some()
        || filters.max_price.is_some()
        || filters.status.is_some()
        || SEARCH_KEYWORDS.iter().any(|kw| lower.contains(kw));

    if golden_visa && !concrete_signal {
        return ChatIntent::GoldenVisa;
    }
    if concrete_signal {
        return ChatIntent::PropertySearch(filters);
    }
    if mentions_brochure(message) {
        return ChatIntent::Brochure;
    }
    ChatIntent::General
}

#[cfg(test)]
mod tests {
    use super::*;

    fn areas() -> Vec<String> {
        vec![
            "Dubai Marina".to_string(),
            "Downtown Dubai".to_string(),
            "Jumeirah Village Circle".to_string(),
        ]
    }

    #[test]
    fn test_budget_suffix_forms() {
        assert_eq!(parse_budget("my budget is 2m"), (None, Some(2_000_000)));
        assert_eq!(
            parse_budget("around 1.5 million aed"),
            (None, Some(1_500_000))
        );
        assert_eq!(parse_budget("under 800k"), (None, Some(800_000)));
    }

    #[test]
    fn test_budget_plain_amount_with_separators() {
        assert_eq!(
            parse_budget("I can spend 2,500,000 dirhams"),
            (None, Some(2_500_000))
        );
    }

    #[test]
    fn test_budget_lower_bound_keywords() {
        assert_eq!(
            parse_budget("looking for something over 3m"),
            (Some(3_000_000), None)
        );
        assert_eq!(parse_budget("from 1m upwards"), (Some(1_000_000), None));
    }

    #[test]
    fn test_no_budget() {
        assert_eq!(parse_budget("do you have villas?"), (None, None));
    }

    #[test]
    fn test_bedrooms_parsing() {
        assert_eq!(parse_bedrooms("a 2 bed apartment"), Some(2));
        assert_eq!(parse_bedrooms("3br please"), Some(3));
        assert_eq!(parse_bedrooms("a nice studio"), Some(0));
        assert_eq!(parse_bedrooms("somewhere to live"), None);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(parse_status("any off-plan towers?"), Some(ProjectStatus::Offplan));
        assert_eq!(
            parse_status("something ready to move into"),
            Some(ProjectStatus::Ready)
        );
        // "already" must not read as "ready"
        assert_eq!(parse_status("I already spoke to an agent"), None);
    }

    #[test]
    fn test_area_matching_is_case_insensitive() {
        assert_eq!(
            match_area("anything in dubai marina?", &areas()),
            Some("Dubai Marina".to_string())
        );
        assert_eq!(match_area("anything in Abu Dhabi?", &areas()), None);
    }

    #[test]
    fn test_contact_detection() {
        let c = detect_contact("call me on +971 50 123 4567").unwrap();
        assert_eq!(c.phone.as_deref(), Some("+971501234567"));
        assert!(c.email.is_none());

        let c = detect_contact("email me at buyer@example.com").unwrap();
        assert_eq!(c.email.as_deref(), Some("buyer@example.com"));
    }

    #[test]
    fn test_prices_do_not_read_as_phone_numbers() {
        assert!(detect_contact("my budget is 2,000,000 aed").is_none());
        assert!(detect_contact("up to 2500000").is_none());
    }

    #[test]
    fn test_search_intent_collects_filters() {
        let intent = detect_intent("2 bed apartment in Dubai Marina under 2m", &areas());
        match intent {
            ChatIntent::PropertySearch(f) => {
                assert_eq!(f.area.as_deref(), Some("Dubai Marina"));
                assert_eq!(f.bedrooms, Some(2));
                assert_eq!(f.max_price, Some(2_000_000));
                assert!(!f.golden_visa);
            }
            other => panic!("expected PropertySearch, got {other:?}"),
        }
    }

    #[test]
    fn test_golden_visa_question_without_search_signals() {
        assert_eq!(
            detect_intent("how does the golden visa work?", &areas()),
            ChatIntent::GoldenVisa
        );
    }

    #[test]
    fn test_golden_visa_with_search_becomes_filtered_search() {
        let intent = detect_intent("golden visa apartments in Downtown Dubai", &areas());
        match intent {
            ChatIntent::PropertySearch(f) => assert!(f.golden_visa),
            other => panic!("expected PropertySearch, got {other:?}"),
        }
    }

    #[test]
    fn test_brochure_intent() {
        assert_eq!(
            detect_intent("can you send me the brochure?", &areas()),
            ChatIntent::Brochure
        );
    }

    #[test]
    fn test_general_fallback() {
        assert_eq!(
            detect_intent("hello, who are you?", &areas()),
            ChatIntent::General
        );
    }

    #[test]
    fn test_sanitize_caps_length_and_strips_controls() {
        let long = "a".repeat(5_000);
        assert_eq!(sanitize_for_prompt(&long).len(), 2_000);
        assert_eq!(sanitize_for_prompt("hi\u{7}there\nok"), "hithere\nok");
    }
}
