//! Wire shapes returned by the shop listing API.
//!
//! Records are loosely typed upstream: ids arrive as `_id` or `id` (string or
//! number) and most fields are optional. [`crate::normalize`] turns them into
//! [`shopdir_core::ShopRecord`].

use serde::Deserialize;
use shopdir_core::OpeningHours;

/// An identifier that may be sent as a string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub coordinates: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawShop {
    #[serde(rename = "_id")]
    pub mongo_id: Option<RawId>,
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub location: Option<RawLocation>,
    pub categories: Option<Vec<String>>,
    pub opening_hours: Option<OpeningHours>,
    pub approved: Option<bool>,
}

/// List endpoints answer with a bare array or an object wrapping one.
///
/// Items stay as raw JSON so one malformed record does not fail the page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ShopListResponse {
    Bare(Vec<serde_json::Value>),
    Data { data: Vec<serde_json::Value> },
    Shops { shops: Vec<serde_json::Value> },
}

impl ShopListResponse {
    #[must_use]
    pub fn into_items(self) -> Vec<serde_json::Value> {
        match self {
            Self::Bare(items) | Self::Data { data: items } | Self::Shops { shops: items } => items,
        }
    }
}
