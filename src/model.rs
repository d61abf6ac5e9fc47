//! Report data model.
//!
//! Plain serde payloads: the caller describes a report as a header plus a
//! sequence of titled sections, each carrying one of the typed payloads
//! below. All payloads are immutable snapshots: the two-pass build
//! measures everything twice and relies on both passes seeing identical
//! data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::style::Color;

/// Page-header identity fields. The resolved total page count does not
/// live here; it belongs to the per-build pagination context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderData {
    pub category_name: String,
    pub product_name: String,
    pub entity_name: String,
    pub entity_id: String,
    pub date_time: String,
    pub protocol: String,
    /// Pagination line template; `{page}` and `{total}` are substituted.
    #[serde(default = "default_pagination_template")]
    pub pagination_template: String,
}

fn default_pagination_template() -> String {
    "Página {page} de {total}".to_string()
}

impl Default for HeaderData {
    fn default() -> Self {
        Self {
            category_name: String::new(),
            product_name: String::new(),
            entity_name: String::new(),
            entity_id: String::new(),
            date_time: String::new(),
            protocol: String::new(),
            pagination_template: default_pagination_template(),
        }
    }
}

impl HeaderData {
    pub fn pagination_line(&self, page: usize, total: usize) -> String {
        self.pagination_template
            .replace("{page}", &page.to_string())
            .replace("{total}", &total.to_string())
    }
}

/// Key/value list payload: an ordered field→label mapping plus the row of
/// values. Missing keys resolve to an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListData {
    pub fields: IndexMap<String, String>,
    pub items: IndexMap<String, String>,
}

impl ListData {
    /// Build a list over `items` using the item keys themselves as labels.
    pub fn from_pairs(items: IndexMap<String, String>) -> Self {
        let fields = items
            .keys()
            .map(|k| (k.clone(), k.clone()))
            .collect::<IndexMap<_, _>>();
        Self { fields, items }
    }

    pub fn value(&self, key: &str) -> &str {
        self.items.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Icon card payload. `icon` is resolved tolerantly by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconCardData {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: Color,
}

/// One score bracket: an ascending upper bound plus display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRangeData {
    pub max_score: i64,
    pub color: Color,
    pub description: String,
    /// Auxiliary label ("risk level") shown in the score text column.
    pub aux_value: String,
}

/// Fallback display data for scores at or below the validity floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreNotValidData {
    pub color: Color,
    pub aux_template: String,
    pub description: String,
    pub aux_value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreData {
    pub score: i64,
    pub min_score: i64,
    pub aux_title: String,
    /// Sentence template for the text column; `{}` is substituted with
    /// the current range's lowercased aux label.
    pub aux_template: String,
    pub not_valid: ScoreNotValidData,
    pub ranges: Vec<ScoreRangeData>,
}

impl ScoreData {
    /// Ranges sorted ascending by `max_score`. The engine enforces the
    /// sort itself rather than trusting input order.
    pub fn sorted_ranges(&self) -> Vec<ScoreRangeData> {
        let mut ranges = self.ranges.clone();
        ranges.sort_by_key(|r| r.max_score);
        ranges
    }

    /// The bracket a score falls into: the first sorted range whose
    /// `max_score` is at or above the score, or the last range when the
    /// score exceeds every bound. `None` only for an empty range list.
    pub fn current_range(&self) -> Option<ScoreRangeData> {
        let ranges = self.sorted_ranges();
        ranges
            .iter()
            .find(|r| r.max_score >= self.score)
            .cloned()
            .or_else(|| ranges.last().cloned())
    }

    /// A score is valid only strictly above the floor.
    pub fn is_score_valid(&self) -> bool {
        self.score > self.min_score
    }
}

/// Gauge card payload: a titled indicator with an integer level rendered
/// as filled-vs-muted glyphs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeCardData {
    pub title: String,
    pub description: String,
    pub level: i32,
    pub level_text: String,
    pub color: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeCardGroupData {
    pub title: String,
    pub cards: Vec<GaugeCardData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeCardListData {
    pub groups: Vec<GaugeCardGroupData>,
}

/// Table payload.
///
/// `columns` maps row keys to column labels, in display order. Each row is
/// a key→value mapping; keys named by `columns` become grid cells, keys
/// named by `nested_fields` become the row's nested key/value sub-list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableData {
    pub columns: IndexMap<String, String>,
    pub nested_fields: IndexMap<String, String>,
    pub overview: IndexMap<String, String>,
    pub rows: Vec<IndexMap<String, String>>,
}

impl TableData {
    /// Header labels plus cell values as a plain matrix, missing keys
    /// resolving to empty strings.
    pub fn matrix(&self) -> Vec<Vec<String>> {
        let header: Vec<String> = self.columns.values().cloned().collect();
        let mut matrix = vec![header];
        for row in &self.rows {
            matrix.push(
                self.columns
                    .keys()
                    .map(|key| row.get(key).cloned().unwrap_or_default())
                    .collect(),
            );
        }
        matrix
    }
}

/// A titled top-level report section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SectionComponent {
    List { title: String, data: ListData },
    IconCards { title: String, cards: Vec<IconCardData> },
    Score { title: String, data: ScoreData },
    GaugeCards { title: String, data: GaugeCardListData },
    Table { title: String, data: TableData },
}

/// A complete report description, as accepted by `render_json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportDocument {
    pub header: HeaderData,
    pub sections: Vec<SectionComponent>,
}
