use serde::{Deserialize, Serialize};

use crate::models::project::{qualifies_for_golden_visa, ProjectRow};

/// Flattened, sales-facing view of one unit configuration within a project.
/// Never stored; derived per request from the project rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyCard {
    pub slug: String,
    pub title: String,
    pub project_slug: String,
    pub project_name: String,
    pub developer_name: String,
    pub area_name: String,
    pub status: String,
    pub unit_type: String,
    pub bedrooms: i32,
    pub bathrooms: Option<i32>,
    pub size_sqft: Option<f64>,
    pub price_aed: i64,
    pub golden_visa_eligible: bool,
    pub handover: Option<String>,
    pub image: Option<String>,
}

/// Derives one card per unit configuration of `project`.
pub fn flatten_project(project: &ProjectRow) -> Vec<PropertyCard> {
    project
        .unit_specs()
        .iter()
        .map(|unit| PropertyCard {
            slug: format!("{}--{}", project.slug, slugify(&unit.unit_type)),
            title: format!("{} in {}", unit.unit_type, project.name),
            project_slug: project.slug.clone(),
            project_name: project.name.clone(),
            developer_name: project.developer_name.clone(),
            area_name: project.area_name.clone(),
            status: project.status.clone(),
            unit_type: unit.unit_type.clone(),
            bedrooms: unit.bedrooms,
            bathrooms: unit.bathrooms,
            size_sqft: unit.size_sqft,
            price_aed: unit.price_aed,
            golden_visa_eligible: qualifies_for_golden_visa(unit.price_aed),
            handover: project.handover_label(),
            image: project.images.first().cloned(),
        })
        .collect()
}

/// Lowercase, hyphen-separated form of a unit label ("2BR Duplex" -> "2br-duplex").
pub fn slugify(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_hyphen = true;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            out.push('-');
            last_hyphen = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn sample_project() -> ProjectRow {
        ProjectRow {
            id: Uuid::new_v4(),
            slug: "creek-vista".into(),
            name: "Creek Vista".into(),
            developer_name: "Sobha".into(),
            area_name: "Sobha Hartland".into(),
            description: "Twin towers".into(),
            status: "ready".into(),
            handover_quarter: None,
            handover_year: None,
            payment_plan: None,
            units: json!([
                {"unit_type": "Studio", "bedrooms": 0, "bathrooms": 1, "size_sqft": 450.0, "price_aed": 850_000},
                {"unit_type": "2BR Duplex", "bedrooms": 2, "bathrooms": 3, "size_sqft": 1400.0, "price_aed": 2_600_000}
            ]),
            amenities: vec![],
            images: vec!["https://cdn.example/creek-vista/hero.jpg".into()],
            price_from: Some(850_000),
            price_to: Some(2_600_000),
            golden_visa_eligible: true,
            featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_flatten_produces_one_card_per_unit() {
        let cards = flatten_project(&sample_project());
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].slug, "creek-vista--studio");
        assert_eq!(cards[1].slug, "creek-vista--2br-duplex");
        assert_eq!(cards[1].title, "2BR Duplex in Creek Vista");
    }

    #[test]
    fn test_golden_visa_is_per_unit_not_per_project() {
        let cards = flatten_project(&sample_project());
        // Project flag is true, but the studio alone does not qualify.
        assert!(!cards[0].golden_visa_eligible);
        assert!(cards[1].golden_visa_eligible);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("2BR Duplex"), "2br-duplex");
        assert_eq!(slugify("Penthouse (Sky)"), "penthouse-sky");
        assert_eq!(slugify("  Studio  "), "studio");
    }
}
