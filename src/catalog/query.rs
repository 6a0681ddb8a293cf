//! Listing, search and stats over a snapshot of the catalog.
//!
//! These are plain linear scans. The store takes a read lock, hands the slice
//! here and returns whatever comes back.
//!
//! Query-string numbers are parsed leniently: a leading numeric prefix is
//! accepted (`"2abc"` is page 2) and anything unusable falls back to the
//! default instead of failing the request.

use serde::{Serialize, Serializer};

use super::product::Product;

/// Default page number.
pub const DEFAULT_PAGE: usize = 1;

/// Default page size.
pub const DEFAULT_LIMIT: usize = 10;

/// Bucket name for products without a category.
pub const UNCATEGORIZED: &str = "uncategorized";

// =============================================================================
// List Query
// =============================================================================

/// Parsed filters and pagination for a list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    /// Case-insensitive exact category match
    pub category: Option<String>,

    /// Inclusive lower price bound
    pub min_price: Option<f64>,

    /// Inclusive upper price bound
    pub max_price: Option<f64>,

    /// 1-based page number
    pub page: usize,

    /// Page size (at least 1)
    pub limit: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            category: None,
            min_price: None,
            max_price: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListQuery {
    /// Build a query from raw query-string values.
    pub fn parse(
        category: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
        min_price: Option<&str>,
        max_price: Option<&str>,
    ) -> Self {
        Self {
            category: category.filter(|c| !c.is_empty()).map(str::to_string),
            min_price: min_price.and_then(parse_leading_float),
            max_price: max_price.and_then(parse_leading_float),
            page: parse_positive(page, DEFAULT_PAGE),
            limit: parse_positive(limit, DEFAULT_LIMIT),
        }
    }

    /// Whether a product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ref category) = self.category {
            if product.category.to_lowercase() != category.to_lowercase() {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        true
    }

    /// Offset of the first element on the requested page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Parse a page/limit value, falling back to `default` when it is missing,
/// unparseable or below 1.
fn parse_positive(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(parse_leading_int)
        .filter(|n| *n >= 1)
        .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
        .unwrap_or(default)
}

/// Parse the leading base-10 integer of a string (`" 12px"` is 12).
///
/// A prefix too large for `i64` saturates to `i64::MIN`/`i64::MAX`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with('+') || s.starts_with('-'));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }

    match s[..sign_len + digits].parse() {
        Ok(n) => Some(n),
        Err(_) if s.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Parse the leading decimal number of a string (`"9.5usd"` is 9.5).
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, or a signed `Infinity`. The input is scanned once.
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// =============================================================================
// Results
// =============================================================================

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    /// Number of matches before pagination
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub data: Vec<Product>,
}

/// Unpaginated search matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub total: usize,
    pub data: Vec<Product>,
}

impl SearchResult {
    /// A result with no matches.
    pub fn empty() -> Self {
        Self {
            total: 0,
            data: Vec::new(),
        }
    }
}

/// Product counts per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub stats: CategoryCounts,
    pub total_products: usize,
}

/// Category counts, kept in the order each category is first seen.
///
/// Serializes as a JSON object whose keys follow that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCounts(pub Vec<(String, usize)>);

impl CategoryCounts {
    fn increment(&mut self, category: &str) {
        match self.0.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => self.0.push((category.to_string(), 1)),
        }
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, count)| (name, count)))
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Filter then paginate.
pub fn list_products(products: &[Product], query: &ListQuery) -> ProductPage {
    let filtered: Vec<&Product> = products.iter().filter(|p| query.matches(p)).collect();

    let data = filtered
        .iter()
        .skip(query.offset())
        .take(query.limit)
        .map(|p| (*p).clone())
        .collect();

    ProductPage {
        total: filtered.len(),
        page: query.page,
        limit: query.limit,
        data,
    }
}

/// Case-insensitive substring search on product names.
///
/// The term is trimmed first; a blank term matches nothing.
pub fn search_products(products: &[Product], term: &str) -> SearchResult {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return SearchResult::empty();
    }

    let data: Vec<Product> = products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    SearchResult {
        total: data.len(),
        data,
    }
}

/// Count products per category.
pub fn category_stats(products: &[Product]) -> CategoryStats {
    let mut stats = CategoryCounts::default();
    for product in products {
        let key = if product.category.is_empty() {
            UNCATEGORIZED
        } else {
            product.category.as_str()
        };
        stats.increment(key);
    }

    CategoryStats {
        stats,
        total_products: products.len(),
    }
}

// =============================================================================
// Tests
// =============================================================================
