//! Wine entity and its categorical enumerations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::contact::Winery;
use super::id::{WineId, WineryId};

/// Wine color/style category.
///
/// The variant order is fixed; statistics tables are indexed by it and the
/// wire format lists categories in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WineType {
    Red,
    White,
    Rose,
    Orange,
    Sparkling,
    Dessert,
}

impl WineType {
    /// All variants, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Red,
        Self::White,
        Self::Rose,
        Self::Orange,
        Self::Sparkling,
        Self::Dessert,
    ];

    /// Wire-format name (e.g. `RED`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::White => "WHITE",
            Self::Rose => "ROSE",
            Self::Orange => "ORANGE",
            Self::Sparkling => "SPARKLING",
            Self::Dessert => "DESSERT",
        }
    }

    /// Parse a wire-format name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Position in [`Self::ALL`], used as a table index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for WineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wine sweetness category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WineTaste {
    Dry,
    SemiDry,
    SemiSweet,
    Sweet,
}

impl WineTaste {
    /// All variants, in declaration order.
    pub const ALL: [Self; 4] = [Self::Dry, Self::SemiDry, Self::SemiSweet, Self::Sweet];

    /// Wire-format name (e.g. `SEMI_DRY`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dry => "DRY",
            Self::SemiDry => "SEMI_DRY",
            Self::SemiSweet => "SEMI_SWEET",
            Self::Sweet => "SWEET",
        }
    }

    /// Parse a wire-format name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Position in [`Self::ALL`], used as a table index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for WineTaste {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wine in the cellar catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wine {
    pub id: WineId,
    pub name: String,
    pub winery_id: Option<WineryId>,
    /// Joined winery record, present when the query included the relation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winery: Option<Winery>,
    pub art: WineType,
    pub taste: WineTaste,
    /// Vintage year.
    pub year: i32,
    /// Country of origin.
    pub land: String,
    #[serde(default)]
    pub region: Option<String>,
    pub price: Decimal,
    pub bottles_amount: i32,
    /// When set to a future year the wine is "coming soon".
    #[serde(default)]
    pub available_at_year: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub hidden_for_guests: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wine {
    /// Whether a guest may favorite this wine as of the given calendar year.
    ///
    /// Hidden wines and wines whose `available_at_year` lies in the future
    /// are ineligible.
    #[must_use]
    pub fn eligible_for_favorite(&self, as_of_year: i32) -> bool {
        !self.hidden_for_guests && self.available_at_year.is_none_or(|y| y <= as_of_year)
    }

    /// Whether the wine is announced but not yet available.
    #[must_use]
    pub fn is_coming_soon(&self, as_of_year: i32) -> bool {
        self.available_at_year.is_some_and(|y| y > as_of_year)
    }

    /// Total stock value of this wine (price per bottle times bottle count).
    ///
    /// Exact decimal arithmetic; never goes through floating point.
    #[must_use]
    pub fn stock_value(&self) -> Decimal {
        self.price * Decimal::from(self.bottles_amount)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn wine(hidden: bool, available_at_year: Option<i32>) -> Wine {
        Wine {
            id: WineId::new(1),
            name: "Zweigelt".to_owned(),
            winery_id: None,
            winery: None,
            art: WineType::Red,
            taste: WineTaste::Dry,
            year: 2021,
            land: "AT_BU".to_owned(),
            region: None,
            price: Decimal::new(1250, 2),
            bottles_amount: 6,
            available_at_year,
            image_url: None,
            description: None,
            hidden_for_guests: hidden,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn eligibility_requires_visible_and_available() {
        assert!(wine(false, None).eligible_for_favorite(2025));
        assert!(wine(false, Some(2025)).eligible_for_favorite(2025));
        assert!(wine(false, Some(2024)).eligible_for_favorite(2025));
        assert!(!wine(false, Some(2026)).eligible_for_favorite(2025));
        assert!(!wine(true, None).eligible_for_favorite(2025));
        assert!(!wine(true, Some(2020)).eligible_for_favorite(2025));
    }

    #[test]
    fn coming_soon_is_strictly_future() {
        assert!(wine(false, Some(2026)).is_coming_soon(2025));
        assert!(!wine(false, Some(2025)).is_coming_soon(2025));
        assert!(!wine(false, None).is_coming_soon(2025));
    }

    #[test]
    fn stock_value_is_exact() {
        let mut w = wine(false, None);
        w.price = Decimal::new(1010, 2); // 10.10
        w.bottles_amount = 3;
        assert_eq!(w.stock_value(), Decimal::new(3030, 2));
    }

    #[test]
    fn enums_roundtrip_wire_names() {
        for t in WineType::ALL {
            assert_eq!(WineType::parse(t.as_str()), Some(t));
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
        for t in WineTaste::ALL {
            assert_eq!(WineTaste::parse(t.as_str()), Some(t));
        }
        assert_eq!(WineTaste::parse("SEMI_DRY"), Some(WineTaste::SemiDry));
        assert_eq!(WineType::parse("PETROL"), None);
    }

    #[test]
    fn enum_indices_match_declaration_order() {
        for (i, t) in WineType::ALL.into_iter().enumerate() {
            assert_eq!(t.index(), i);
        }
        for (i, t) in WineTaste::ALL.into_iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }
}
