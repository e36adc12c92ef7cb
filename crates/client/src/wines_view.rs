//! Declarative filter/sort view over an in-memory wine list.
//!
//! Filters are multi-select per dimension (empty selection means "no
//! constraint") and combine with AND across dimensions. Sorting is stable,
//! so equal keys keep their load order.

use wine_cellar_core::{Wine, WineTaste, WineType};

/// Field a wine list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WineSortField {
    Name,
    Price,
    Year,
    Bottles,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WineSort {
    pub field: WineSortField,
    pub direction: SortDirection,
}

impl Default for WineSort {
    /// Guests see the list cheapest-first by default.
    fn default() -> Self {
        Self {
            field: WineSortField::Price,
            direction: SortDirection::Asc,
        }
    }
}

/// Multi-select filter state. An empty selection passes everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WineFilters {
    pub arts: Vec<WineType>,
    pub lands: Vec<String>,
    pub tastes: Vec<WineTaste>,
}

impl WineFilters {
    fn matches(&self, wine: &Wine) -> bool {
        (self.arts.is_empty() || self.arts.contains(&wine.art))
            && (self.lands.is_empty() || self.lands.contains(&wine.land))
            && (self.tastes.is_empty() || self.tastes.contains(&wine.taste))
    }
}

/// Partial filter update; `None` keeps the current selection for that
/// dimension.
#[derive(Debug, Clone, Default)]
pub struct WineFiltersUpdate {
    pub arts: Option<Vec<WineType>>,
    pub lands: Option<Vec<String>>,
    pub tastes: Option<Vec<WineTaste>>,
}

/// View state over a loaded wine list.
#[derive(Debug, Default)]
pub struct WineListView {
    wines: Vec<Wine>,
    filters: WineFilters,
    sort: WineSort,
}

impl WineListView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the underlying list.
    pub fn set_wines(&mut self, wines: Vec<Wine>) {
        self.wines = wines;
    }

    #[must_use]
    pub fn wines(&self) -> &[Wine] {
        &self.wines
    }

    #[must_use]
    pub const fn filters(&self) -> &WineFilters {
        &self.filters
    }

    #[must_use]
    pub const fn sort(&self) -> WineSort {
        self.sort
    }

    /// Merge a partial filter update into the current selection.
    pub fn set_filters(&mut self, update: WineFiltersUpdate) {
        if let Some(arts) = update.arts {
            self.filters.arts = arts;
        }
        if let Some(lands) = update.lands {
            self.filters.lands = lands;
        }
        if let Some(tastes) = update.tastes {
            self.filters.tastes = tastes;
        }
    }

    /// Drop all filter selections.
    pub fn clear_filters(&mut self) {
        self.filters = WineFilters::default();
    }

    pub fn set_sort(&mut self, sort: WineSort) {
        self.sort = sort;
    }

    /// Wines passing all active filters, ordered by the current sort.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Wine> {
        let mut result: Vec<&Wine> = self
            .wines
            .iter()
            .filter(|w| self.filters.matches(w))
            .collect();
        Self::apply_sort(&mut result, self.sort);
        result
    }

    /// Wines visible to guests (hidden excluded), price-ordered per the
    /// current sort direction.
    #[must_use]
    pub fn guest_wines(&self) -> Vec<&Wine> {
        let mut result: Vec<&Wine> = self
            .wines
            .iter()
            .filter(|w| !w.hidden_for_guests)
            .collect();
        Self::apply_sort(
            &mut result,
            WineSort {
                field: WineSortField::Price,
                direction: self.sort.direction,
            },
        );
        result
    }

    /// Unique countries present in the loaded list, sorted.
    #[must_use]
    pub fn available_lands(&self) -> Vec<String> {
        let mut lands: Vec<String> = self.wines.iter().map(|w| w.land.clone()).collect();
        lands.sort();
        lands.dedup();
        lands
    }

    /// Whether the wine is announced for a future year.
    #[must_use]
    pub fn is_coming_soon(wine: &Wine) -> bool {
        use chrono::Datelike;
        wine.is_coming_soon(chrono::Utc::now().year())
    }

    fn apply_sort(wines: &mut [&Wine], sort: WineSort) {
        wines.sort_by(|a, b| {
            let ordering = match sort.field {
                WineSortField::Name => a.name.cmp(&b.name),
                WineSortField::Price => a.price.cmp(&b.price),
                WineSortField::Year => a.year.cmp(&b.year),
                WineSortField::Bottles => a.bottles_amount.cmp(&b.bottles_amount),
            };
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use wine_cellar_core::{WineId, WineTaste, WineType};

    use super::*;

    fn wine(id: i32, art: WineType, taste: WineTaste, land: &str, price: i64, hidden: bool) -> Wine {
        Wine {
            id: WineId::new(id),
            name: format!("wine-{id}"),
            winery_id: None,
            winery: None,
            art,
            taste,
            year: 2018 + id,
            land: land.to_owned(),
            region: None,
            price: Decimal::new(price, 2),
            bottles_amount: id,
            available_at_year: None,
            image_url: None,
            description: None,
            hidden_for_guests: hidden,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn view() -> WineListView {
        let mut view = WineListView::new();
        view.set_wines(vec![
            wine(1, WineType::Red, WineTaste::Dry, "AT_ST", 1500, false),
            wine(2, WineType::White, WineTaste::SemiDry, "IT", 900, false),
            wine(3, WineType::Red, WineTaste::Sweet, "IT", 2200, true),
            wine(4, WineType::Rose, WineTaste::Dry, "AT_ST", 1100, false),
        ]);
        view
    }

    fn ids(wines: &[&Wine]) -> Vec<i32> {
        wines.iter().map(|w| w.id.as_i32()).collect()
    }

    #[test]
    fn empty_filters_pass_everything() {
        let view = view();
        // default sort: price ascending
        assert_eq!(ids(&view.filtered()), vec![2, 4, 1, 3]);
    }

    #[test]
    fn filters_combine_with_and() {
        let mut view = view();
        view.set_filters(WineFiltersUpdate {
            arts: Some(vec![WineType::Red]),
            lands: Some(vec!["IT".to_owned()]),
            ..WineFiltersUpdate::default()
        });
        assert_eq!(ids(&view.filtered()), vec![3]);
    }

    #[test]
    fn partial_update_keeps_other_dimensions() {
        let mut view = view();
        view.set_filters(WineFiltersUpdate {
            arts: Some(vec![WineType::Red, WineType::Rose]),
            ..WineFiltersUpdate::default()
        });
        view.set_filters(WineFiltersUpdate {
            tastes: Some(vec![WineTaste::Dry]),
            ..WineFiltersUpdate::default()
        });
        assert_eq!(view.filters().arts, vec![WineType::Red, WineType::Rose]);
        assert_eq!(ids(&view.filtered()), vec![4, 1]);

        view.clear_filters();
        assert_eq!(view.filtered().len(), 4);
    }

    #[test]
    fn guest_wines_exclude_hidden_and_sort_by_price() {
        let mut view = view();
        assert_eq!(ids(&view.guest_wines()), vec![2, 4, 1]);

        view.set_sort(WineSort {
            field: WineSortField::Name,
            direction: SortDirection::Desc,
        });
        // guest view always orders by price; only the direction follows
        assert_eq!(ids(&view.guest_wines()), vec![1, 4, 2]);
    }

    #[test]
    fn sort_by_name_and_year() {
        let mut view = view();
        view.set_sort(WineSort {
            field: WineSortField::Name,
            direction: SortDirection::Asc,
        });
        assert_eq!(ids(&view.filtered()), vec![1, 2, 3, 4]);

        view.set_sort(WineSort {
            field: WineSortField::Year,
            direction: SortDirection::Desc,
        });
        assert_eq!(ids(&view.filtered()), vec![4, 3, 2, 1]);
    }

    #[test]
    fn available_lands_are_unique_and_sorted() {
        let view = view();
        assert_eq!(view.available_lands(), vec!["AT_ST", "IT"]);
    }
}
