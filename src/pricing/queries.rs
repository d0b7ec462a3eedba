//! Database queries for the pricing engine

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::catalog::{Activity, DateRange, ItemType, PricingRule};

/// All active seasonal date ranges, in catalog order (by start date).
/// Resolution takes the first match, so this ordering is the tie-break
/// for overlapping ranges.
pub async fn get_active_date_ranges(pool: &PgPool) -> Result<Vec<DateRange>> {
    let ranges = sqlx::query_as::<_, DateRange>(
        r#"
        SELECT id, name, start_date, end_date, is_active
        FROM date_ranges
        WHERE is_active
        ORDER BY start_date, name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(ranges)
}

/// Find the active pricing rule for one item in one date range
pub async fn find_rule(
    pool: &PgPool,
    item_type: ItemType,
    item_id: Uuid,
    date_range_id: Uuid,
) -> Result<Option<PricingRule>> {
    let rule = sqlx::query_as::<_, PricingRule>(
        r#"
        SELECT id, item_type, item_id, date_range_id, base_price, per_person_price, is_active
        FROM pricing_rules
        WHERE item_type = $1
          AND item_id = $2
          AND date_range_id = $3
          AND is_active
        ORDER BY created_at
        LIMIT 1
        "#,
    )
    .bind(item_type.as_str())
    .bind(item_id)
    .bind(date_range_id)
    .fetch_optional(pool)
    .await?;

    Ok(rule)
}

/// A pricing rule joined with the name of its date range, used by the
/// trip composer to pick out "high"/"low" season prices
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SeasonRule {
    pub base_price: i64,
    pub per_person_price: i64,
    pub range_name: String,
}

/// All active rules for one item, with their date range names
pub async fn find_rules_for_item(
    pool: &PgPool,
    item_type: ItemType,
    item_id: Uuid,
) -> Result<Vec<SeasonRule>> {
    let rules = sqlx::query_as::<_, SeasonRule>(
        r#"
        SELECT r.base_price, r.per_person_price, d.name AS range_name
        FROM pricing_rules r
        JOIN date_ranges d ON d.id = r.date_range_id
        WHERE r.item_type = $1
          AND r.item_id = $2
          AND r.is_active
          AND d.is_active
        ORDER BY d.start_date, d.name
        "#,
    )
    .bind(item_type.as_str())
    .bind(item_id)
    .fetch_all(pool)
    .await?;

    Ok(rules)
}

/// Get an activity by id. Inactive or missing activities yield `None`;
/// the engine degrades those lines rather than erroring.
pub async fn get_activity(pool: &PgPool, id: Uuid) -> Result<Option<Activity>> {
    let activity = sqlx::query_as::<_, Activity>(
        r#"
        SELECT id, name, description, per_person_price, image_url, is_active
        FROM activities
        WHERE id = $1
          AND is_active
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(activity)
}
