//! Winery and supplier entities.
//!
//! Both share the same optional contact shape; wineries additionally own
//! wines (the relation lives on the wine side).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{SupplierId, WineryId};

/// Optional contact fields shared by wineries and suppliers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    #[serde(default)]
    pub address: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub post: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub land: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// A wine grower. Owns zero or more wines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winery {
    pub id: WineryId,
    pub name: String,
    #[serde(flatten)]
    pub contact: ContactDetails,
    /// Number of wines referencing this winery. Populated by list queries;
    /// deletion is refused while this is non-zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wine_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A supplier. Independent entity with no wine relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    #[serde(flatten)]
    pub contact: ContactDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_fields_flatten_into_entity_json() {
        let winery = Winery {
            id: WineryId::new(7),
            name: "Weingut Müller".to_owned(),
            contact: ContactDetails {
                city: Some("Gamlitz".to_owned()),
                ..ContactDetails::default()
            },
            wine_count: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&winery).unwrap();
        assert_eq!(json["city"], "Gamlitz");
        assert_eq!(json["name"], "Weingut Müller");
        assert!(json.get("wineCount").is_none());
        assert!(json.get("contact").is_none());
    }
}
