//! Fixed-layout brochure authoring. One A4 page per project: header bar,
//! title block, key facts, unit table, footer. Field values are placed at
//! fixed coordinates; there is no reflow.

use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::models::project::{format_aed, ProjectRow};

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: f32 = 40.0;

/// Brand green used for the header/footer bars and accent rule.
const BRAND_RGB: (f32, f32, f32) = (0.05, 0.29, 0.23);
const TEXT_GRAY: (f32, f32, f32) = (0.35, 0.35, 0.35);
const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const WHITE: (f32, f32, f32) = (1.0, 1.0, 1.0);

/// Unit rows beyond this are summarized as "+ N more".
const MAX_UNIT_ROWS: usize = 12;

const FOOTER_LINE: &str =
    "Gulfstead Real Estate | Dubai, UAE | +971 4 000 0000 | hello@gulfstead.ae";

/// Helvetica carries no glyphs outside Latin-1; anything else is dropped
/// before placement.
fn pdf_text(s: &str) -> String {
    s.chars()
        .filter(|c| (' '..='~').contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn set_fill(ops: &mut Vec<Operation>, (r, g, b): (f32, f32, f32)) {
    ops.push(Operation::new(
        "rg",
        vec![Object::Real(r), Object::Real(g), Object::Real(b)],
    ));
}

fn fill_rect(ops: &mut Vec<Operation>, x: f32, y: f32, w: f32, h: f32) {
    ops.push(Operation::new(
        "re",
        vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(w),
            Object::Real(h),
        ],
    ));
    ops.push(Operation::new("f", vec![]));
}

fn place_text(ops: &mut Vec<Operation>, font: &str, size: f32, x: f32, y: f32, text: &str) {
    let text = pdf_text(text);
    if text.is_empty() {
        return;
    }
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), Object::Real(size)]));
    ops.push(Operation::new(
        "Td",
        vec![Object::Real(x), Object::Real(y)],
    ));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}

fn price_line(project: &ProjectRow) -> String {
    match project.price_range() {
        Some((from, to)) if from == to => format_aed(from),
        Some((from, _)) => format!("From {}", format_aed(from)),
        None => "Price on request".to_string(),
    }
}

fn fact_rows(project: &ProjectRow) -> Vec<(String, String)> {
    let mut facts = vec![(
        "Status".to_string(),
        match project.status.as_str() {
            "offplan" => "Off-plan".to_string(),
            "ready" => "Ready".to_string(),
            other => other.to_string(),
        },
    )];
    if let Some(handover) = project.handover_label() {
        facts.push(("Handover".to_string(), handover));
    }
    if let Some(plan) = &project.payment_plan {
        facts.push(("Payment plan".to_string(), plan.clone()));
    }
    facts.push((
        "Golden Visa".to_string(),
        if project.golden_visa_eligible {
            "Eligible".to_string()
        } else {
            "Not eligible".to_string()
        },
    ));
    facts
}

/// Builds the page content stream: every field of the project placed at its
/// fixed position.
fn build_operations(project: &ProjectRow) -> Vec<Operation> {
    let mut ops = Vec::new();

    // Header bar with the brand line.
    set_fill(&mut ops, BRAND_RGB);
    fill_rect(&mut ops, 0.0, 792.0, PAGE_WIDTH as f32, 50.0);
    set_fill(&mut ops, WHITE);
    place_text(&mut ops, "F2", 13.0, MARGIN, 810.0, "GULFSTEAD REAL ESTATE");

    // Title block.
    set_fill(&mut ops, BLACK);
    place_text(&mut ops, "F2", 26.0, MARGIN, 742.0, &project.name);
    set_fill(&mut ops, TEXT_GRAY);
    place_text(
        &mut ops,
        "F1",
        12.0,
        MARGIN,
        720.0,
        &format!("by {} | {}", project.developer_name, project.area_name),
    );
    set_fill(&mut ops, BRAND_RGB);
    fill_rect(&mut ops, MARGIN, 708.0, 515.0, 2.0);

    set_fill(&mut ops, BLACK);
    place_text(&mut ops, "F2", 16.0, MARGIN, 678.0, &price_line(project));

    // Key facts, label column then value column.
    let mut y = 644.0;
    for (label, value) in fact_rows(project) {
        set_fill(&mut ops, TEXT_GRAY);
        place_text(&mut ops, "F1", 11.0, MARGIN, y, &label);
        set_fill(&mut ops, BLACK);
        place_text(&mut ops, "F1", 11.0, MARGIN + 110.0, y, &value);
        y -= 20.0;
    }

    // Unit table.
    let units = project.unit_specs();
    if !units.is_empty() {
        y -= 16.0;
        set_fill(&mut ops, BRAND_RGB);
        place_text(&mut ops, "F2", 12.0, MARGIN, y, "Available units");
        y -= 22.0;
        set_fill(&mut ops, TEXT_GRAY);
        place_text(&mut ops, "F2", 10.0, MARGIN, y, "Unit");
        place_text(&mut ops, "F2", 10.0, 240.0, y, "Beds");
        place_text(&mut ops, "F2", 10.0, 320.0, y, "Size (sqft)");
        place_text(&mut ops, "F2", 10.0, 430.0, y, "Price");
        y -= 16.0;
        set_fill(&mut ops, BLACK);
        for unit in units.iter().take(MAX_UNIT_ROWS) {
            place_text(&mut ops, "F1", 10.0, MARGIN, y, &unit.unit_type);
            place_text(&mut ops, "F1", 10.0, 240.0, y, &unit.bedrooms.to_string());
            let size = unit
                .size_sqft
                .map(|s| format!("{s:.0}"))
                .unwrap_or_else(|| "-".to_string());
            place_text(&mut ops, "F1", 10.0, 320.0, y, &size);
            place_text(&mut ops, "F1", 10.0, 430.0, y, &format_aed(unit.price_aed));
            y -= 16.0;
        }
        if units.len() > MAX_UNIT_ROWS {
            set_fill(&mut ops, TEXT_GRAY);
            place_text(
                &mut ops,
                "F1",
                10.0,
                MARGIN,
                y,
                &format!("+ {} more configurations", units.len() - MAX_UNIT_ROWS),
            );
            y -= 16.0;
        }
    }

    // Amenities, first few only.
    if !project.amenities.is_empty() {
        y -= 12.0;
        let shown: Vec<&str> = project.amenities.iter().take(6).map(String::as_str).collect();
        set_fill(&mut ops, TEXT_GRAY);
        place_text(
            &mut ops,
            "F1",
            10.0,
            MARGIN,
            y,
            &format!("Amenities: {}", shown.join(", ")),
        );
    }

    // Footer bar with contact line.
    set_fill(&mut ops, BRAND_RGB);
    fill_rect(&mut ops, 0.0, 0.0, PAGE_WIDTH as f32, 46.0);
    set_fill(&mut ops, WHITE);
    place_text(&mut ops, "F1", 9.0, MARGIN, 18.0, FOOTER_LINE);

    ops
}

/// Renders the single-page brochure and returns the PDF bytes.
pub fn render_brochure(project: &ProjectRow) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_regular,
            "F2" => font_bold,
        },
    });

    let content = Content {
        operations: build_operations(project),
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        "Resources" => resources_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
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
            slug: "marina-pearl".into(),
            name: "Marina Pearl".into(),
            developer_name: "Select Group".into(),
            area_name: "Dubai Marina".into(),
            description: "Waterfront tower".into(),
            status: "offplan".into(),
            handover_quarter: Some(1),
            handover_year: Some(2027),
            payment_plan: Some("70/30".into()),
            units: json!([
                {"unit_type": "1BR", "bedrooms": 1, "bathrooms": 1, "size_sqft": 780.0, "price_aed": 1_650_000},
                {"unit_type": "2BR", "bedrooms": 2, "bathrooms": 2, "size_sqft": 1200.0, "price_aed": 2_750_000}
            ]),
            amenities: vec!["Infinity pool".into(), "Gym".into()],
            images: vec![],
            price_from: Some(1_650_000),
            price_to: Some(2_750_000),
            golden_visa_eligible: true,
            featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_brochure_is_a_single_page_pdf() {
        let bytes = render_brochure(&sample_project()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_brochure_places_project_fields() {
        let bytes = render_brochure(&sample_project()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        let placed: Vec<String> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first())
            .filter_map(|obj| obj.as_str().ok())
            .map(|bytes| String::from_utf8_lossy(bytes).to_string())
            .collect();
        assert!(placed.iter().any(|s| s == "Marina Pearl"));
        assert!(placed.iter().any(|s| s == "From AED 1,650,000"));
        assert!(placed.iter().any(|s| s.contains("Select Group")));
        assert!(placed.iter().any(|s| s == "Eligible"));
        assert!(placed.iter().any(|s| s == "AED 2,750,000"));
    }

    #[test]
    fn test_price_line_variants() {
        let mut p = sample_project();
        assert_eq!(price_line(&p), "From AED 1,650,000");
        p.units = json!([]);
        assert_eq!(price_line(&p), "Price on request");
        p.units = json!([
            {"unit_type": "Villa", "bedrooms": 4, "bathrooms": 5, "size_sqft": 4000.0, "price_aed": 9_000_000}
        ]);
        assert_eq!(price_line(&p), "AED 9,000,000");
    }

    #[test]
    fn test_pdf_text_drops_unsupported_glyphs() {
        assert_eq!(pdf_text("Burj Khalifa \u{2014} view"), "Burj Khalifa  view");
        assert_eq!(pdf_text("  trimmed  "), "trimmed");
    }
}
