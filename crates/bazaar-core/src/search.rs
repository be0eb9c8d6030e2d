//! # Search Module
//!
//! Turns raw search parameters into a validated search criteria value.
//!
//! ## Validation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 GET /items/find?name=&min_price=&max_price=             │
//! │                                                                         │
//! │  ItemSearchParams (raw strings, exactly as received)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. name AND (min_price OR max_price) present?                         │
//! │       └── yes → SearchError::NameAndPrice                              │
//! │  2. no non-blank filter at all?                                        │
//! │       └── yes → SearchError::NoParameters                              │
//! │       │                                                                 │
//! │       ├── name → ItemSearch::ByName(NameQuery)                         │
//! │       │                                                                 │
//! │       ▼  (price filter)                                                 │
//! │     parse bounds as decimal cents                                      │
//! │       └── garbage → SearchError::InvalidPrice                          │
//! │  3. negative_prices(min, max)?                                         │
//! │       └── yes → SearchError::NegativePrice                             │
//! │  4. min > max?                                                         │
//! │       └── yes → SearchError::MinExceedsMax                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ItemSearch::ByPrice(PriceRange { min (default 0), max (None = ∞) })   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of its inputs; the repositories in
//! `bazaar-db` execute the resulting criteria.

use serde::Deserialize;

use crate::error::SearchError;
use crate::money::Money;

// =============================================================================
// Search Mode
// =============================================================================

/// Whether a search returns the first match or every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// First match in name order, or nothing.
    #[default]
    One,
    /// Every match in name order, possibly empty.
    All,
}

impl SearchMode {
    /// Row limit the mode implies, if any.
    pub fn limit(self) -> Option<u32> {
        match self {
            SearchMode::One => Some(1),
            SearchMode::All => None,
        }
    }
}

// =============================================================================
// Criteria
// =============================================================================

/// A name fragment to search for, kept exactly as sent.
///
/// Surrounding whitespace is part of the fragment: `" ring"` matches
/// `"Gold Ring"` but not `"Ringo"`. Only an all-blank query is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery(String);

impl NameQuery {
    /// Builds a query from user input; blank input is rejected.
    pub fn new(raw: &str) -> Result<Self, SearchError> {
        if raw.trim().is_empty() {
            return Err(SearchError::NoParameters);
        }
        Ok(NameQuery(raw.to_string()))
    }

    /// The fragment as sent.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SQL `LIKE` pattern for a substring match against a column written
    /// with [`fold_name`], to be used with `ESCAPE '\'`.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::search::NameQuery;
    ///
    /// let query = NameQuery::new("50%_OFF").unwrap();
    /// assert_eq!(query.like_pattern(), r"%50\%\_off%");
    ///
    /// let query = NameQuery::new("ÉCLAIR").unwrap();
    /// assert_eq!(query.like_pattern(), "%éclair%");
    /// ```
    pub fn like_pattern(&self) -> String {
        let folded = fold_name(&self.0);
        let mut pattern = String::with_capacity(folded.len() + 2);
        pattern.push('%');
        for c in folded.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

/// Case folding shared by stored names and search queries.
///
/// Unicode lowercase, so `"ÉCLAIR"` and `"éclair"` fold alike where SQLite's
/// own `LIKE` would only fold ASCII.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Inclusive price range. `max == None` means unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Money,
    pub max: Option<Money>,
}

impl PriceRange {
    /// Returns true when `price` falls inside the range (bounds included).
    pub fn contains(&self, price: Money) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }
}

/// A validated item search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSearch {
    ByName(NameQuery),
    ByPrice(PriceRange),
}

// =============================================================================
// Price Checks
// =============================================================================

/// Returns true if either bound is negative. Missing bounds count as zero.
///
/// ## Example
/// ```rust
/// use bazaar_core::money::Money;
/// use bazaar_core::search::negative_prices;
///
/// assert!(negative_prices(Some(Money::from_cents(-500)), Some(Money::from_cents(1000))));
/// assert!(!negative_prices(Some(Money::from_cents(500)), Some(Money::from_cents(1000))));
/// assert!(!negative_prices(None, None));
/// ```
pub fn negative_prices(min: Option<Money>, max: Option<Money>) -> bool {
    min.unwrap_or_default().is_negative() || max.unwrap_or_default().is_negative()
}

/// Returns the value when it is present and not blank.
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// =============================================================================
// Item Search Parameters
// =============================================================================

/// Raw item search parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemSearchParams {
    pub name: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl ItemSearchParams {
    /// Runs the validation pipeline.
    ///
    /// The conflict check looks at which keys were sent at all, so
    /// `?name=&min_price=5` is still a conflict. Every later step only
    /// considers non-blank values.
    pub fn validate(&self) -> Result<ItemSearch, SearchError> {
        if self.name.is_some() && (self.min_price.is_some() || self.max_price.is_some()) {
            return Err(SearchError::NameAndPrice);
        }

        if let Some(name) = supplied(&self.name) {
            return Ok(ItemSearch::ByName(NameQuery::new(name)?));
        }

        let min_raw = supplied(&self.min_price);
        let max_raw = supplied(&self.max_price);
        if min_raw.is_none() && max_raw.is_none() {
            return Err(SearchError::NoParameters);
        }

        let min = min_raw.map(|raw| Money::parse("min_price", raw)).transpose()?;
        let max = max_raw.map(|raw| Money::parse("max_price", raw)).transpose()?;

        if negative_prices(min, max) {
            return Err(SearchError::NegativePrice);
        }

        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(SearchError::MinExceedsMax);
            }
        }

        Ok(ItemSearch::ByPrice(PriceRange {
            min: min.unwrap_or_default(),
            max,
        }))
    }
}

// =============================================================================
// Merchant Search Parameters
// =============================================================================

/// Raw merchant search parameters. Merchants are searched by name only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MerchantSearchParams {
    pub name: Option<String>,
}

impl MerchantSearchParams {
    pub fn validate(&self) -> Result<NameQuery, SearchError> {
        match supplied(&self.name) {
            Some(name) => NameQuery::new(name),
            None => Err(SearchError::NoParameters),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn params(name: Option<&str>, min: Option<&str>, max: Option<&str>) -> ItemSearchParams {
        ItemSearchParams {
            name: name.map(str::to_string),
            min_price: min.map(str::to_string),
            max_price: max.map(str::to_string),
        }
    }

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn test_negative_prices() {
        assert!(negative_prices(Some(cents(-500)), Some(cents(1000))));
        assert!(negative_prices(None, Some(cents(-1))));
        assert!(!negative_prices(Some(cents(500)), Some(cents(1000))));
        assert!(!negative_prices(None, None));
        assert!(!negative_prices(Some(Money::zero()), None));
    }

    #[test]
    fn test_name_search() {
        let search = params(Some(" lamp "), None, None).validate().unwrap();
        assert_eq!(search, ItemSearch::ByName(NameQuery(" lamp ".to_string())));
    }

    #[test]
    fn test_name_and_price_rejected() {
        assert_eq!(
            params(Some("lamp"), Some("5"), None).validate(),
            Err(SearchError::NameAndPrice)
        );
        assert_eq!(
            params(Some("lamp"), None, Some("5")).validate(),
            Err(SearchError::NameAndPrice)
        );
        // Presence alone counts for the conflict check.
        assert_eq!(
            params(Some(""), Some(""), None).validate(),
            Err(SearchError::NameAndPrice)
        );
    }

    #[test]
    fn test_conflict_wins_over_negative_price() {
        assert_eq!(
            params(Some("lamp"), Some("-5"), None).validate(),
            Err(SearchError::NameAndPrice)
        );
    }

    #[test]
    fn test_no_parameters() {
        assert_eq!(params(None, None, None).validate(), Err(SearchError::NoParameters));
        assert_eq!(params(Some("   "), None, None).validate(), Err(SearchError::NoParameters));
        assert_eq!(params(None, Some(""), Some(" ")).validate(), Err(SearchError::NoParameters));
    }

    #[test]
    fn test_negative_price_rejected() {
        assert_eq!(
            params(None, Some("-5"), Some("10")).validate(),
            Err(SearchError::NegativePrice)
        );
        assert_eq!(
            params(None, None, Some("-0.01")).validate(),
            Err(SearchError::NegativePrice)
        );
    }

    #[test]
    fn test_negative_checked_before_range_order() {
        // -5 > -10 would also be an inverted range; the sign check runs first.
        assert_eq!(
            params(None, Some("-5"), Some("-10")).validate(),
            Err(SearchError::NegativePrice)
        );
    }

    #[test]
    fn test_min_exceeds_max() {
        assert_eq!(
            params(None, Some("10"), Some("5")).validate(),
            Err(SearchError::MinExceedsMax)
        );
        assert_eq!(
            params(None, Some("5.01"), Some("5.00")).validate(),
            Err(SearchError::MinExceedsMax)
        );
    }

    #[test]
    fn test_equal_bounds_allowed() {
        let search = params(None, Some("15"), Some("15.00")).validate().unwrap();
        assert_eq!(
            search,
            ItemSearch::ByPrice(PriceRange {
                min: cents(1500),
                max: Some(cents(1500)),
            })
        );
    }

    #[test]
    fn test_price_defaults() {
        assert_eq!(
            params(None, None, Some("14")).validate().unwrap(),
            ItemSearch::ByPrice(PriceRange { min: Money::zero(), max: Some(cents(1400)) })
        );
        assert_eq!(
            params(None, Some("14"), None).validate().unwrap(),
            ItemSearch::ByPrice(PriceRange { min: cents(1400), max: None })
        );
        assert_eq!(
            params(None, Some(""), Some("3")).validate().unwrap(),
            ItemSearch::ByPrice(PriceRange { min: Money::zero(), max: Some(cents(300)) })
        );
    }

    #[test]
    fn test_invalid_price_rejected() {
        let err = params(None, Some("cheap"), None).validate().unwrap_err();
        assert_eq!(
            err,
            SearchError::InvalidPrice(ValidationError::invalid_format(
                "min_price",
                "must be a decimal number"
            ))
        );
    }

    #[test]
    fn test_price_range_contains() {
        let range = PriceRange { min: cents(1400), max: Some(cents(1500)) };
        assert!(range.contains(cents(1400)));
        assert!(range.contains(cents(1500)));
        assert!(!range.contains(cents(1501)));
        assert!(!range.contains(cents(1399)));

        let open = PriceRange { min: Money::zero(), max: None };
        assert!(open.contains(cents(i64::MAX)));
    }

    #[test]
    fn test_like_pattern_escapes() {
        assert_eq!(NameQuery::new("tem").unwrap().like_pattern(), "%tem%");
        assert_eq!(NameQuery::new(r"a\b").unwrap().like_pattern(), r"%a\\b%");
    }

    #[test]
    fn test_like_pattern_keeps_whitespace_and_folds() {
        assert_eq!(NameQuery::new(" Ring").unwrap().like_pattern(), "% ring%");
        assert_eq!(NameQuery::new("ÉCLAIR").unwrap().like_pattern(), "%éclair%");
        assert_eq!(fold_name("Straße ÖL"), "straße öl");
    }

    #[test]
    fn test_merchant_params() {
        let ok = MerchantSearchParams { name: Some("ring".into()) }.validate();
        assert_eq!(ok.unwrap().as_str(), "ring");

        assert_eq!(
            MerchantSearchParams { name: None }.validate(),
            Err(SearchError::NoParameters)
        );
        assert_eq!(
            MerchantSearchParams { name: Some(String::new()) }.validate(),
            Err(SearchError::NoParameters)
        );
    }

    #[test]
    fn test_search_mode_limit() {
        assert_eq!(SearchMode::One.limit(), Some(1));
        assert_eq!(SearchMode::All.limit(), None);
    }
}
