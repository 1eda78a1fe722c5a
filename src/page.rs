//! Assembles the single dashboard page: the serialized payload embedded in a
//! fixed HTML template whose client-side script hands each artifact to the
//! chart and map renderers.

use anyhow::{Context, Result};

use crate::charts::DashboardData;

const PAGE_TEMPLATE: &str = include_str!("dashboard.html");
const DATA_PLACEHOLDER: &str = "__DASHBOARD_DATA__";

pub fn render_page(data: &DashboardData) -> Result<String> {
    let json = serde_json::to_string(data).context("serialize dashboard payload")?;
    // Keep the payload safe inside a <script> block.
    let json = json.replace("</", "<\\/");
    Ok(PAGE_TEMPLATE.replacen(DATA_PLACEHOLDER, &json, 1))
}
