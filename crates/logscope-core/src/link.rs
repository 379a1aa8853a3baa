//! Discover link builder.
//!
//! Produces `<base>/app/<view-route>/<view-id>?_g=<global>&_a=<app>` where the
//! two state blobs are Rison-encoded and then percent-encoded. Consumes the
//! same [`SearchCriteria`] as the query compiler and never touches the network.

use crate::error::SearchError;
use crate::rison::{self, RisonValue};
use crate::types::{SearchCriteria, SortOrder};

/// Global (`_g`) state: time window and a paused refresh interval.
pub fn global_state(criteria: &SearchCriteria) -> RisonValue {
    let refresh: RisonValue = [("pause", RisonValue::from(true)), ("value", 0i64.into())]
        .into_iter()
        .collect();
    let time: RisonValue = [
        ("from", RisonValue::from(&criteria.time_from)),
        ("to", RisonValue::from(&criteria.time_to)),
    ]
    .into_iter()
    .collect();

    [
        ("filters", RisonValue::Array(Vec::new())),
        ("refreshInterval", refresh),
        ("time", time),
    ]
    .into_iter()
    .collect()
}

/// App (`_a`) state: columns, data view, query and sort.
pub fn app_state(criteria: &SearchCriteria, view_id: &str, order: SortOrder) -> RisonValue {
    let query: RisonValue = [
        ("language", RisonValue::from("kuery")),
        ("query", RisonValue::from(&criteria.query)),
    ]
    .into_iter()
    .collect();
    let sort = RisonValue::Array(vec![RisonValue::Array(vec![
        RisonValue::from(&criteria.sort_field),
        RisonValue::from(order.as_str()),
    ])]);

    [
        ("columns", RisonValue::from(criteria.fields.clone())),
        ("filters", RisonValue::Array(Vec::new())),
        ("index", RisonValue::from(view_id)),
        ("interval", RisonValue::from("auto")),
        ("query", query),
        ("sort", sort),
    ]
    .into_iter()
    .collect()
}

/// Build a shareable Discover URL for `criteria`.
///
/// `view_route` is the path below `/app/`, e.g. `discover#/view`.
pub fn discover_url(
    base_url: &str,
    view_route: &str,
    view_id: &str,
    criteria: &SearchCriteria,
) -> Result<String, SearchError> {
    let order: SortOrder = criteria.sort_order.parse()?;
    let base = base_url.trim_end_matches('/');
    if base.is_empty() {
        return Err(SearchError::Configuration(
            "No Kibana URL configured. Set KIBANA_URL or [kibana].url.".to_string(),
        ));
    }
    if view_id.is_empty() {
        return Err(SearchError::Configuration(
            "No data view configured. Set DATA_VIEW_ID or [kibana].data_view_id.".to_string(),
        ));
    }

    let g = rison::encode(&global_state(criteria));
    let a = rison::encode(&app_state(criteria, view_id, order));
    Ok(format!(
        "{base}/app/{route}/{view_id}?_g={g}&_a={a}",
        route = view_route.trim_matches('/'),
        g = urlencoding::encode(&g),
        a = urlencoding::encode(&a),
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
