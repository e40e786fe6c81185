use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Minimum purchase price (AED) qualifying for the UAE 10-year Golden Visa.
/// Ingestion stores the project-level flag; this constant derives per-unit
/// eligibility on flattened property cards.
pub const GOLDEN_VISA_THRESHOLD_AED: i64 = 2_000_000;

pub fn qualifies_for_golden_visa(price_aed: i64) -> bool {
    price_aed >= GOLDEN_VISA_THRESHOLD_AED
}

/// "AED 2,400,000" — used in chat context blocks and brochures.
pub fn format_aed(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("AED {sign}{grouped}")
}

/// A development project as stored by the ingestion scripts.
/// `units` is a JSONB array of [`UnitSpec`] objects; `price_from`/`price_to`
/// are maintained by ingestion as min/max over the unit prices.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub developer_name: String,
    pub area_name: String,
    pub description: String,
    /// "offplan" or "ready"
    pub status: String,
    pub handover_quarter: Option<i32>,
    pub handover_year: Option<i32>,
    pub payment_plan: Option<String>,
    pub units: Value,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub price_from: Option<i64>,
    pub price_to: Option<i64>,
    pub golden_visa_eligible: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One sellable unit configuration, embedded in `projects.units`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSpec {
    pub unit_type: String,
    pub bedrooms: i32,
    pub bathrooms: Option<i32>,
    pub size_sqft: Option<f64>,
    pub price_aed: i64,
}

impl ProjectRow {
    /// Parses the embedded JSONB units array. Malformed entries from
    /// ingestion yield an empty list rather than an error.
    pub fn unit_specs(&self) -> Vec<UnitSpec> {
        serde_json::from_value(self.units.clone()).unwrap_or_default()
    }

    /// Price range computed from min/max of the unit price fields.
    /// Returns `None` for a project with no units.
    pub fn price_range(&self) -> Option<(i64, i64)> {
        let units = self.unit_specs();
        let min = units.iter().map(|u| u.price_aed).min()?;
        let max = units.iter().map(|u| u.price_aed).max()?;
        Some((min, max))
    }

    /// Human handover label, e.g. "Q4 2027". `None` for ready projects
    /// without a recorded handover date.
    pub fn handover_label(&self) -> Option<String> {
        match (self.handover_quarter, self.handover_year) {
            (Some(q), Some(y)) => Some(format!("Q{q} {y}")),
            (None, Some(y)) => Some(y.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project_with_units(units: Value) -> ProjectRow {
        ProjectRow {
            id: Uuid::new_v4(),
            slug: "harbour-gate".into(),
            name: "Harbour Gate".into(),
            developer_name: "Emaar".into(),
            area_name: "Dubai Creek Harbour".into(),
            description: "Waterfront towers".into(),
            status: "offplan".into(),
            handover_quarter: Some(4),
            handover_year: Some(2027),
            payment_plan: Some("80/20".into()),
            units,
            amenities: vec![],
            images: vec![],
            price_from: None,
            price_to: None,
            golden_visa_eligible: false,
            featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_price_range_min_max_over_units() {
        let p = project_with_units(json!([
            {"unit_type": "1BR", "bedrooms": 1, "bathrooms": 1, "size_sqft": 750.0, "price_aed": 1_400_000},
            {"unit_type": "2BR", "bedrooms": 2, "bathrooms": 2, "size_sqft": 1150.0, "price_aed": 2_300_000},
            {"unit_type": "3BR", "bedrooms": 3, "bathrooms": 3, "size_sqft": 1600.0, "price_aed": 3_900_000}
        ]));
        assert_eq!(p.price_range(), Some((1_400_000, 3_900_000)));
    }

    #[test]
    fn test_price_range_empty_units_is_none() {
        let p = project_with_units(json!([]));
        assert_eq!(p.price_range(), None);
    }

    #[test]
    fn test_malformed_units_yield_empty_list() {
        let p = project_with_units(json!({"not": "an array"}));
        assert!(p.unit_specs().is_empty());
    }

    #[test]
    fn test_golden_visa_threshold_boundary() {
        assert!(!qualifies_for_golden_visa(1_999_999));
        assert!(qualifies_for_golden_visa(2_000_000));
        assert!(qualifies_for_golden_visa(2_000_001));
    }

    #[test]
    fn test_handover_label() {
        let p = project_with_units(json!([]));
        assert_eq!(p.handover_label().as_deref(), Some("Q4 2027"));
    }

    #[test]
    fn test_format_aed_groups_thousands() {
        assert_eq!(format_aed(850_000), "AED 850,000");
        assert_eq!(format_aed(2_400_000), "AED 2,400,000");
        assert_eq!(format_aed(999), "AED 999");
        assert_eq!(format_aed(1_000), "AED 1,000");
    }
}
