//! Renders catalog rows into the context block injected into the system
//! prompt, and bounds the transcript sent to the LLM.

use crate::llm_client::ChatTurn;
use crate::models::project::{format_aed, ProjectRow};

/// Only the most recent turns are sent; older ones are dropped silently.
pub const MAX_TRANSCRIPT_MESSAGES: usize = 20;

pub fn clamp_transcript(messages: &[ChatTurn]) -> &[ChatTurn] {
    let start = messages.len().saturating_sub(MAX_TRANSCRIPT_MESSAGES);
    &messages[start..]
}

/// One line per project, carrying exactly the fields the assistant is
/// allowed to quote.
pub fn render_listing_context(projects: &[ProjectRow]) -> String {
    if projects.is_empty() {
        return "(no matching listings in the current inventory)".to_string();
    }
    let mut block = String::new();
    for p in projects {
        block.push_str(&format!("- {} by {} in {}", p.name, p.developer_name, p.area_name));
        block.push_str(&format!(" | status: {}", p.status));
        if let Some((from, to)) = p.price_range() {
            if from == to {
                block.push_str(&format!(" | {}", format_aed(from)));
            } else {
                block.push_str(&format!(" | {} - {}", format_aed(from), format_aed(to)));
            }
        }
        let units = p.unit_specs();
        if !units.is_empty() {
            let labels: Vec<&str> = units.iter().map(|u| u.unit_type.as_str()).collect();
            block.push_str(&format!(" | units: {}", labels.join(", ")));
        }
        if let Some(handover) = p.handover_label() {
            block.push_str(&format!(" | handover: {handover}"));
        }
        if let Some(plan) = &p.payment_plan {
            block.push_str(&format!(" | payment plan: {plan}"));
        }
        if p.golden_visa_eligible {
            block.push_str(" | golden visa eligible");
        }
        block.push_str(&format!(" | slug: {}\n", p.slug));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn turn(role: &str, content: &str) -> ChatTurn {
        ChatTurn {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    fn sample_project() -> ProjectRow {
        ProjectRow {
            id: Uuid::new_v4(),
            slug: "palm-crest".into(),
            name: "Palm Crest".into(),
            developer_name: "Nakheel".into(),
            area_name: "Palm Jumeirah".into(),
            description: "Beachfront residences".into(),
            status: "offplan".into(),
            handover_quarter: Some(2),
            handover_year: Some(2028),
            payment_plan: Some("60/40".into()),
            units: json!([
                {"unit_type": "2BR", "bedrooms": 2, "bathrooms": 2, "size_sqft": 1300.0, "price_aed": 3_200_000},
                {"unit_type": "3BR", "bedrooms": 3, "bathrooms": 4, "size_sqft": 1900.0, "price_aed": 5_100_000}
            ]),
            amenities: vec![],
            images: vec![],
            price_from: Some(3_200_000),
            price_to: Some(5_100_000),
            golden_visa_eligible: true,
            featured: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_clamp_keeps_last_twenty() {
        let messages: Vec<ChatTurn> = (0..25).map(|i| turn("user", &i.to_string())).collect();
        let clamped = clamp_transcript(&messages);
        assert_eq!(clamped.len(), MAX_TRANSCRIPT_MESSAGES);
        assert_eq!(clamped[0].content, "5");
        assert_eq!(clamped.last().unwrap().content, "24");
    }

    #[test]
    fn test_clamp_short_transcript_untouched() {
        let messages = vec![turn("user", "hi")];
        assert_eq!(clamp_transcript(&messages).len(), 1);
    }

    #[test]
    fn test_listing_line_carries_quotable_fields() {
        let block = render_listing_context(&[sample_project()]);
        assert!(block.contains("Palm Crest by Nakheel in Palm Jumeirah"));
        assert!(block.contains("AED 3,200,000 - AED 5,100,000"));
        assert!(block.contains("handover: Q2 2028"));
        assert!(block.contains("golden visa eligible"));
        assert!(block.contains("slug: palm-crest"));
    }

    #[test]
    fn test_empty_inventory_has_explicit_marker() {
        assert!(render_listing_context(&[]).contains("no matching listings"));
    }
}
