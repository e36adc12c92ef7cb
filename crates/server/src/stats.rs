//! Aggregation of catalog records into wine statistics.
//!
//! The aggregator is a pure fold over projection records pulled from the
//! `wine` table. Every wine contributes to exactly one type bucket, one
//! taste bucket and one land bucket, so the per-dimension sums always add
//! up to the overall totals.

use rust_decimal::Decimal;
use serde::Serialize;
use serde::ser::SerializeMap;

use wine_cellar_core::{WineTaste, WineType};

/// One wine's contribution to the statistics, projected from the catalog.
#[derive(Debug, Clone)]
pub struct StatRecord {
    pub art: WineType,
    pub taste: WineTaste,
    pub land: String,
    pub price: Decimal,
    pub bottles: i32,
}

/// Accumulated counts for one bucket of the statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatBucket {
    pub count: i64,
    pub bottles: i64,
    pub value: Decimal,
}

impl StatBucket {
    fn add(&mut self, record: &StatRecord) {
        self.count += 1;
        self.bottles += i64::from(record.bottles);
        self.value += record.price * Decimal::from(record.bottles);
    }
}

/// Per-country bucket, carrying the country name alongside the counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandBucket {
    pub land: String,
    #[serde(flatten)]
    pub bucket: StatBucket,
}

/// Buckets for every wine type, including those with no wines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeBuckets([StatBucket; WineType::ALL.len()]);

impl TypeBuckets {
    pub fn get(&self, art: WineType) -> &StatBucket {
        &self.0[art.index()]
    }
}

impl Serialize for TypeBuckets {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WineType::ALL.len()))?;
        for art in WineType::ALL {
            map.serialize_entry(art.as_str(), &self.0[art.index()])?;
        }
        map.end()
    }
}

/// Buckets for every wine taste, including those with no wines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TasteBuckets([StatBucket; WineTaste::ALL.len()]);

impl TasteBuckets {
    pub fn get(&self, taste: WineTaste) -> &StatBucket {
        &self.0[taste.index()]
    }
}

impl Serialize for TasteBuckets {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WineTaste::ALL.len()))?;
        for taste in WineTaste::ALL {
            map.serialize_entry(taste.as_str(), &self.0[taste.index()])?;
        }
        map.end()
    }
}

/// The full statistics document returned by `GET /api/stats/wines`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WineStats {
    pub by_type: TypeBuckets,
    pub by_taste: TasteBuckets,
    pub by_land: Vec<LandBucket>,
    pub totals: StatBucket,
}

/// Fold catalog records into the statistics document.
///
/// Countries are ordered by descending wine count; ties keep the order in
/// which the countries were first seen in the input.
pub fn aggregate(records: &[StatRecord]) -> WineStats {
    let mut by_type = TypeBuckets::default();
    let mut by_taste = TasteBuckets::default();
    let mut by_land: Vec<LandBucket> = Vec::new();
    let mut totals = StatBucket::default();

    for record in records {
        by_type.0[record.art.index()].add(record);
        by_taste.0[record.taste.index()].add(record);

        match by_land.iter_mut().find(|entry| entry.land == record.land) {
            Some(entry) => entry.bucket.add(record),
            None => {
                let mut bucket = StatBucket::default();
                bucket.add(record);
                by_land.push(LandBucket {
                    land: record.land.clone(),
                    bucket,
                });
            }
        }

        totals.add(record);
    }

    by_land.sort_by(|a, b| b.bucket.count.cmp(&a.bucket.count));

    WineStats {
        by_type,
        by_taste,
        by_land,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn record(art: WineType, taste: WineTaste, land: &str, price: Decimal, bottles: i32) -> StatRecord {
        StatRecord {
            art,
            taste,
            land: land.to_owned(),
            price,
            bottles,
        }
    }

    #[test]
    fn empty_input_produces_zeroed_buckets() {
        let stats = aggregate(&[]);

        for art in WineType::ALL {
            assert_eq!(*stats.by_type.get(art), StatBucket::default());
        }
        for taste in WineTaste::ALL {
            assert_eq!(*stats.by_taste.get(taste), StatBucket::default());
        }
        assert!(stats.by_land.is_empty());
        assert_eq!(stats.totals, StatBucket::default());
    }

    #[test]
    fn two_reds_accumulate_into_one_bucket() {
        let stats = aggregate(&[
            record(WineType::Red, WineTaste::Dry, "France", dec!(10), 2),
            record(WineType::Red, WineTaste::Dry, "France", dec!(5), 1),
        ]);

        let red = stats.by_type.get(WineType::Red);
        assert_eq!(red.count, 2);
        assert_eq!(red.bottles, 3);
        assert_eq!(red.value, dec!(25));
        assert_eq!(stats.by_type.get(WineType::White).count, 0);
    }

    #[test]
    fn lands_sorted_by_descending_count_with_stable_ties() {
        let stats = aggregate(&[
            record(WineType::Red, WineTaste::Dry, "Austria", dec!(8), 1),
            record(WineType::White, WineTaste::Sweet, "France", dec!(12), 1),
            record(WineType::Red, WineTaste::Dry, "Italy", dec!(9), 1),
            record(WineType::Rose, WineTaste::SemiDry, "France", dec!(7), 1),
        ]);

        let lands: Vec<&str> = stats.by_land.iter().map(|e| e.land.as_str()).collect();
        assert_eq!(lands, ["France", "Austria", "Italy"]);
        assert_eq!(stats.by_land[0].bucket.count, 2);
    }

    #[test]
    fn dimension_sums_match_totals() {
        let stats = aggregate(&[
            record(WineType::Red, WineTaste::Dry, "France", dec!(10), 2),
            record(WineType::White, WineTaste::Sweet, "Austria", dec!(15), 4),
            record(WineType::Sparkling, WineTaste::SemiSweet, "France", dec!(20), 1),
            record(WineType::Dessert, WineTaste::Sweet, "Hungary", dec!(30), 6),
        ]);

        let sum = |buckets: &[i64]| buckets.iter().sum::<i64>();

        let type_counts: Vec<i64> = WineType::ALL
            .iter()
            .map(|art| stats.by_type.get(*art).count)
            .collect();
        let taste_counts: Vec<i64> = WineTaste::ALL
            .iter()
            .map(|taste| stats.by_taste.get(*taste).count)
            .collect();
        let land_counts: Vec<i64> = stats.by_land.iter().map(|e| e.bucket.count).collect();

        assert_eq!(sum(&type_counts), stats.totals.count);
        assert_eq!(sum(&taste_counts), stats.totals.count);
        assert_eq!(sum(&land_counts), stats.totals.count);
        assert_eq!(stats.totals.count, 4);
        assert_eq!(stats.totals.bottles, 13);
        assert_eq!(stats.totals.value, dec!(280));
    }

    #[test]
    fn serializes_buckets_in_declaration_order() {
        let stats = aggregate(&[record(WineType::Orange, WineTaste::SemiDry, "Georgia", dec!(18), 3)]);
        let json = serde_json::to_value(&stats).unwrap();

        let keys: Vec<&str> = json["byType"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            ["RED", "WHITE", "ROSE", "ORANGE", "SPARKLING", "DESSERT"]
        );
        assert_eq!(json["byType"]["ORANGE"]["count"], 1);
        assert_eq!(json["byTaste"]["SEMI_DRY"]["bottles"], 3);
        assert_eq!(json["byLand"][0]["land"], "Georgia");
        assert_eq!(json["totals"]["count"], 1);
    }
}
