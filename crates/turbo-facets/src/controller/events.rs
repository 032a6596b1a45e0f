//! Control identifiers and the typed events they produce.

use std::fmt;
use std::str::FromStr;

use crate::search::{PriceRange, SortKey};
use crate::view::ViewMode;
use crate::FacetError;

/// Stable identifier of a filter control, read from its `data-control`
/// attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    PriceApply,
    RatingFilter,
    BrandFilter,
    StockFilter,
    SortSelect,
    ViewGrid,
    ViewList,
    ClearFilters,
}

impl ControlId {
    pub const ALL: [ControlId; 8] = [
        ControlId::PriceApply,
        ControlId::RatingFilter,
        ControlId::BrandFilter,
        ControlId::StockFilter,
        ControlId::SortSelect,
        ControlId::ViewGrid,
        ControlId::ViewList,
        ControlId::ClearFilters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlId::PriceApply => "price-apply",
            ControlId::RatingFilter => "rating-filter",
            ControlId::BrandFilter => "brand-filter",
            ControlId::StockFilter => "in-stock-only",
            ControlId::SortSelect => "sort-products",
            ControlId::ViewGrid => "view-grid",
            ControlId::ViewList => "view-list",
            ControlId::ClearFilters => "clear-filters",
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlId {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| FacetError::UnknownControl(s.to_string()))
    }
}

/// Raw state of the control that fired, as read from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// The control's `value`.
    pub value: String,
    /// Checkbox state.
    pub checked: bool,
    /// Text of the "from" and "to" price inputs.
    pub price: Option<(String, String)>,
}

impl ControlInput {
    /// Input of a checkbox.
    pub fn checkbox(value: impl Into<String>, checked: bool) -> Self {
        Self {
            value: value.into(),
            checked,
            price: None,
        }
    }

    /// Input of a select or button.
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    /// Input of the price "apply" button.
    pub fn price(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            price: Some((from.into(), to.into())),
            ..Default::default()
        }
    }
}

/// A typed user action on the filter sidebar.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    PriceApplied(PriceRange),
    RatingChanged { threshold: u8, selected: bool },
    BrandChanged { brand: String, selected: bool },
    StockChanged(bool),
    SortChanged(SortKey),
    ViewSelected(ViewMode),
    ClearRequested,
}

impl ControlEvent {
    /// The control this event comes from.
    pub fn control(&self) -> ControlId {
        match self {
            ControlEvent::PriceApplied(_) => ControlId::PriceApply,
            ControlEvent::RatingChanged { .. } => ControlId::RatingFilter,
            ControlEvent::BrandChanged { .. } => ControlId::BrandFilter,
            ControlEvent::StockChanged(_) => ControlId::StockFilter,
            ControlEvent::SortChanged(_) => ControlId::SortSelect,
            ControlEvent::ViewSelected(ViewMode::Grid) => ControlId::ViewGrid,
            ControlEvent::ViewSelected(ViewMode::List) => ControlId::ViewList,
            ControlEvent::ClearRequested => ControlId::ClearFilters,
        }
    }

    /// Build an event from a control identifier and its raw input.
    ///
    /// Returns `None` for unknown controls and malformed values.
    pub fn from_control(id: &str, input: &ControlInput) -> Option<Self> {
        let control = match id.parse::<ControlId>() {
            Ok(control) => control,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring event from unknown control");
                return None;
            }
        };

        let event = match control {
            ControlId::PriceApply => {
                let (from, to) = input
                    .price
                    .as_ref()
                    .map(|(f, t)| (f.as_str(), t.as_str()))
                    .unwrap_or(("", ""));
                Some(ControlEvent::PriceApplied(PriceRange::from_inputs(from, to)))
            }
            ControlId::RatingFilter => input
                .value
                .trim()
                .parse::<u8>()
                .ok()
                .map(|threshold| ControlEvent::RatingChanged {
                    threshold,
                    selected: input.checked,
                }),
            ControlId::BrandFilter => {
                let brand = input.value.trim();
                (!brand.is_empty()).then(|| ControlEvent::BrandChanged {
                    brand: brand.to_string(),
                    selected: input.checked,
                })
            }
            ControlId::StockFilter => Some(ControlEvent::StockChanged(input.checked)),
            ControlId::SortSelect => input.value.parse().ok().map(ControlEvent::SortChanged),
            ControlId::ViewGrid => Some(ControlEvent::ViewSelected(ViewMode::Grid)),
            ControlId::ViewList => Some(ControlEvent::ViewSelected(ViewMode::List)),
            ControlId::ClearFilters => Some(ControlEvent::ClearRequested),
        };

        if event.is_none() {
            tracing::debug!(control = %control, value = %input.value, "ignoring malformed control value");
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_ids_round_trip() {
        for id in ControlId::ALL {
            assert_eq!(id.as_str().parse::<ControlId>().unwrap(), id);
        }
        assert!(matches!(
            "s-products-list".parse::<ControlId>(),
            Err(FacetError::UnknownControl(_))
        ));
    }

    #[test]
    fn test_rating_event() {
        let event = ControlEvent::from_control("rating-filter", &ControlInput::checkbox("4", true));
        assert_eq!(
            event,
            Some(ControlEvent::RatingChanged {
                threshold: 4,
                selected: true
            })
        );
        assert_eq!(
            ControlEvent::from_control("rating-filter", &ControlInput::checkbox("four", true)),
            None
        );
    }

    #[test]
    fn test_price_event_parses_inputs() {
        let event = ControlEvent::from_control("price-apply", &ControlInput::price("10", "x"));
        match event {
            Some(ControlEvent::PriceApplied(range)) => {
                assert_eq!(range.min(), 10.0);
                assert!(!range.has_max());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_sort_event() {
        assert_eq!(
            ControlEvent::from_control("sort-products", &ControlInput::value("price-desc")),
            Some(ControlEvent::SortChanged(SortKey::PriceDesc))
        );
        assert_eq!(
            ControlEvent::from_control("sort-products", &ControlInput::value("cheapest")),
            None
        );
    }

    #[test]
    fn test_blank_brand_ignored() {
        assert_eq!(
            ControlEvent::from_control("brand-filter", &ControlInput::checkbox("  ", true)),
            None
        );
    }

    #[test]
    fn test_event_reports_its_control() {
        assert_eq!(ControlEvent::ViewSelected(ViewMode::List).control(), ControlId::ViewList);
        assert_eq!(ControlEvent::ClearRequested.control(), ControlId::ClearFilters);
    }

    #[test]
    fn test_unknown_control() {
        assert_eq!(ControlEvent::from_control("add-to-cart", &ControlInput::default()), None);
    }
}
