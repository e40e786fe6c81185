//! Conditional listing-query assembly. All project filtering is delegated
//! to SQL `WHERE`/`ORDER BY` clauses built on `sqlx::QueryBuilder`.

use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};

const DEFAULT_PAGE_SIZE: i64 = 24;
const MAX_PAGE_SIZE: i64 = 100;

pub const PROJECT_COLUMNS: &str = "id, slug, name, developer_name, area_name, description, \
     status, handover_quarter, handover_year, payment_plan, units, amenities, images, \
     price_from, price_to, golden_visa_eligible, featured, created_at, updated_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Offplan,
    Ready,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Offplan => "offplan",
            ProjectStatus::Ready => "ready",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Handover,
}

impl ProjectSort {
    fn order_by(&self) -> &'static str {
        match self {
            ProjectSort::Newest => " ORDER BY created_at DESC",
            ProjectSort::PriceAsc => " ORDER BY price_from ASC NULLS LAST",
            ProjectSort::PriceDesc => " ORDER BY price_to DESC NULLS LAST",
            ProjectSort::Handover => {
                " ORDER BY handover_year ASC NULLS LAST, handover_quarter ASC NULLS LAST"
            }
        }
    }
}

/// Listing filters, deserialized straight from the query string.
/// Every field is optional; absent fields contribute no SQL clause.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub area: Option<String>,
    pub developer: Option<String>,
    pub status: Option<ProjectStatus>,
    /// Unit-level: at least one unit with exactly this bedroom count.
    pub bedrooms: Option<i32>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub golden_visa: Option<bool>,
    pub handover_year: Option<i32>,
    pub featured: Option<bool>,
    pub sort: Option<ProjectSort>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ProjectFilter {
    pub fn page_size(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn page_offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Appends the conditional `WHERE` clauses shared by the listing and count
/// queries. The builder must already contain "... WHERE 1=1".
fn push_filters<'a>(qb: &mut QueryBuilder<'a, Postgres>, filter: &'a ProjectFilter) {
    if let Some(area) = &filter.area {
        qb.push(" AND area_name ILIKE ");
        qb.push_bind(area);
    }
    if let Some(developer) = &filter.developer {
        qb.push(" AND developer_name ILIKE ");
        qb.push_bind(developer);
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ");
        qb.push_bind(status.as_str());
    }
    if let Some(bedrooms) = filter.bedrooms {
        qb.push(" AND EXISTS (SELECT 1 FROM jsonb_array_elements(units) u WHERE (u->>'bedrooms')::int = ");
        qb.push_bind(bedrooms);
        qb.push(")");
    }
    // Price band matches by range overlap, not containment: a project whose
    // units straddle the requested band is still a hit.
    if let Some(min_price) = filter.min_price {
        qb.push(" AND price_to >= ");
        qb.push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        qb.push(" AND price_from <= ");
        qb.push_bind(max_price);
    }
    if let Some(golden_visa) = filter.golden_visa {
        qb.push(" AND golden_visa_eligible = ");
        qb.push_bind(golden_visa);
    }
    if let Some(handover_year) = filter.handover_year {
        qb.push(" AND handover_year = ");
        qb.push_bind(handover_year);
    }
    if let Some(featured) = filter.featured {
        qb.push(" AND featured = ");
        qb.push_bind(featured);
    }
}

/// Builds the paged listing query for `filter`.
pub fn build_listing_query(filter: &ProjectFilter) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE 1=1"));
    push_filters(&mut qb, filter);
    qb.push(filter.sort.unwrap_or_default().order_by());
    qb.push(" LIMIT ");
    qb.push_bind(filter.page_size());
    qb.push(" OFFSET ");
    qb.push_bind(filter.page_offset());
    qb
}

/// Builds the matching-row count query for `filter` (no sort/pagination).
pub fn build_count_query(filter: &ProjectFilter) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM projects WHERE 1=1");
    push_filters(&mut qb, filter);
    qb
}
