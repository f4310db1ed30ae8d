// src/domain/aggregation.rs
//
// Itemized-list aggregation
//
// Folds the {title, value} lists of several builds into one total per
// title. Two rule sets exist and they disagree on what an unreadable value
// is worth; both are kept and named so callers pick one explicitly.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::domain::build::ListItem;

/// Label builds use for the carrier type of a structure
pub const CARRIER_TYPE_TITLE: &str = "Вид носителя";

/// Label the carrier-type rows are totalled under
pub const PLACEMENT_COUNT_TITLE: &str = "Количество рекламных площадок";

/// Leading decimal number, optionally signed, optionally with exponent
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number pattern")
});

/// What an item contributes when its value is not a number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackWeight {
    /// Count the item once. Used by category-area views, where a text value
    /// such as a carrier type stands for one placement.
    ///
    /// Only unreadable values take this weight. A value that reads as zero
    /// (`"0"`, `"-0"`) is a number and contributes 0, not 1.
    One,
    /// Ignore the item. Used by the per-build and per-category summaries.
    Zero,
}

impl FallbackWeight {
    pub fn weight(self) -> f64 {
        match self {
            FallbackWeight::One => 1.0,
            FallbackWeight::Zero => 0.0,
        }
    }
}

/// How a set of lists is folded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationRules {
    pub fallback: FallbackWeight,
    /// Fold `CARRIER_TYPE_TITLE` rows under `PLACEMENT_COUNT_TITLE`
    pub rename_carrier_type: bool,
    /// Drop rows without a title instead of totalling them under ""
    pub skip_untitled: bool,
}

impl AggregationRules {
    /// Rules for the category-area listing
    pub const AREA: AggregationRules = AggregationRules {
        fallback: FallbackWeight::One,
        rename_carrier_type: true,
        skip_untitled: true,
    };

    /// Rules for single-build and per-category summaries
    pub const SUMMARY: AggregationRules = AggregationRules {
        fallback: FallbackWeight::Zero,
        rename_carrier_type: false,
        skip_untitled: false,
    };
}

/// Total of all values listed under one title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListAggregate {
    pub title: String,
    pub value: f64,
}

/// Read the leading number of a list value.
///
/// `"12"` → 12, `" 3.5 м"` → 3.5, `"шт"` → None. Only the leading
/// prefix counts, so `"2,5"` reads as 2.
pub fn parse_list_value(raw: Option<&str>) -> Option<f64> {
    let text = raw?.trim_start();
    let matched = LEADING_NUMBER.find(text)?;
    matched
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Fold every list into per-title totals, in first-seen title order.
pub fn aggregate_lists<'a, I>(lists: I, rules: &AggregationRules) -> Vec<ListAggregate>
where
    I: IntoIterator<Item = &'a [ListItem]>,
{
    let mut totals: Vec<ListAggregate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in lists.into_iter().flatten() {
        let title = match item.title.as_deref() {
            Some(title) if rules.skip_untitled && title.is_empty() => continue,
            Some(title) => title,
            None if rules.skip_untitled => continue,
            None => "",
        };

        let title = if rules.rename_carrier_type && title == CARRIER_TYPE_TITLE {
            PLACEMENT_COUNT_TITLE
        } else {
            title
        };

        let amount = parse_list_value(item.value.as_deref())
            .unwrap_or_else(|| rules.fallback.weight());

        match index.get(title).copied() {
            Some(position) => totals[position].value += amount,
            None => {
                index.insert(title.to_string(), totals.len());
                totals.push(ListAggregate {
                    title: title.to_string(),
                    value: amount,
                });
            }
        }
    }

    totals
}

/// Totals shown on a category-area: one-weight fallback, carrier-type rename.
pub fn aggregate_area_lists<'a, I>(lists: I) -> Vec<ListAggregate>
where
    I: IntoIterator<Item = &'a [ListItem]>,
{
    aggregate_lists(lists, &AggregationRules::AREA)
}

/// Totals of a single build's list: zero-weight fallback, titles as stored.
pub fn aggregate_build_list(items: &[ListItem]) -> Vec<ListAggregate> {
    aggregate_lists([items], &AggregationRules::SUMMARY)
}
