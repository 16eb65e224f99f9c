/// Request URL → route record lookup over an emitted [`RouteTable`]
///
/// Candidates are tried in priority order and the first full match wins:
///
/// 1. **Static routes**
/// 2. **Dynamic routes**, fewer parameters first
/// 3. **Catch-all routes**, deeper prefixes first
/// 4. **Optional catch-all routes**, deeper prefixes first
///
/// Ties keep scan order.

use crate::path::normalize_path;
use crate::route::RouteRecord;
use crate::table::RouteTable;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// A matched route and the parameter values taken from the URL
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'a> {
    pub record: &'a RouteRecord,
    /// Catch-all values are the remaining segments joined by `/`
    pub params: BTreeMap<String, String>,
}

impl RouteMatch<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Sort key; lower sorts first
pub fn match_priority(record: &RouteRecord) -> (u8, usize, Reverse<usize>) {
    let rank = if record.is_optional_catch_all {
        3
    } else if record.is_catch_all {
        2
    } else if record.is_dynamic {
        1
    } else {
        0
    };
    (rank, record.params.len(), Reverse(record.segments().count()))
}

/// Precomputed matching order over one table
#[derive(Debug, Clone)]
pub struct RouteMatcher<'a> {
    ordered: Vec<&'a RouteRecord>,
}

impl<'a> RouteMatcher<'a> {
    pub fn new(table: &'a RouteTable) -> Self {
        let mut ordered: Vec<&RouteRecord> = table.routes.iter().collect();
        ordered.sort_by_key(|record| match_priority(record));
        Self { ordered }
    }

    /// First route matching `url`, after normalization
    pub fn find(&self, url: &str) -> Option<RouteMatch<'a>> {
        let path = normalize_path(url);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        self.ordered.iter().find_map(|record| {
            matches(record, &segments).map(|params| RouteMatch {
                record: *record,
                params,
            })
        })
    }
}

/// Parameter values when `record` matches the URL segments
fn matches(record: &RouteRecord, url_segments: &[&str]) -> Option<BTreeMap<String, String>> {
    let pattern: Vec<&str> = record.segments().collect();

    fn match_segments(
        record: &RouteRecord,
        pattern: &[&str],
        url: &[&str],
        param_idx: usize,
        mut params: BTreeMap<String, String>,
    ) -> Option<BTreeMap<String, String>> {
        let Some((&head, rest)) = pattern.split_first() else {
            return url.is_empty().then_some(params);
        };

        match head {
            "*" => {
                // one or more segments unless optional; nothing after `*` is ever tried
                if url.is_empty() && !record.is_optional_catch_all {
                    return None;
                }
                let name = record.params.get(param_idx)?;
                params.insert(name.clone(), url.join("/"));
                rest.is_empty().then_some(params)
            }
            _ if head.starts_with(':') => {
                let (&value, url_rest) = url.split_first()?;
                let name = record.params.get(param_idx)?;
                params.insert(name.clone(), value.to_string());
                match_segments(record, rest, url_rest, param_idx + 1, params)
            }
            _ => {
                let (&value, url_rest) = url.split_first()?;
                if value != head {
                    return None;
                }
                match_segments(record, rest, url_rest, param_idx, params)
            }
        }
    }

    match_segments(record, &pattern, url_segments, 0, BTreeMap::new())
}

impl RouteTable {
    /// Finds the route serving `url`
    ///
    /// Builds a [`RouteMatcher`] per call; hold one for repeated lookups.
    ///
    /// # Examples
    ///
    /// ```
    /// use islet_router::RouteTable;
    ///
    /// let table = RouteTable::emit(Vec::new(), "src/app");
    /// assert!(table.find("/anything").is_none());
    /// ```
    pub fn find(&self, url: &str) -> Option<RouteMatch<'_>> {
        RouteMatcher::new(self).find(url)
    }

    pub fn matcher(&self) -> RouteMatcher<'_> {
        RouteMatcher::new(self)
    }
}
