//! Sales aggregation: summary totals, the price range histogram and the
//! category histogram.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::statistics::sale::Sale;

/// A price range of the histogram, from just above the previous range's upper
/// bound up to and including `upper_bound`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PriceRange {
    pub label: &'static str,
    /// `None` for the last range, which has no upper bound.
    pub upper_bound: Option<f64>,
}

const fn price_range(label: &'static str, upper_bound: f64) -> PriceRange {
    PriceRange {
        label,
        upper_bound: Some(upper_bound),
    }
}

/// The ten price ranges, in ascending order.
pub(crate) const PRICE_RANGES: [PriceRange; 10] = [
    price_range("0-100", 100.0),
    price_range("101-200", 200.0),
    price_range("201-300", 300.0),
    price_range("301-400", 400.0),
    price_range("401-500", 500.0),
    price_range("501-600", 600.0),
    price_range("601-700", 700.0),
    price_range("701-800", 800.0),
    price_range("801-900", 900.0),
    PriceRange {
        label: "901-above",
        upper_bound: None,
    },
];

/// The index of the smallest price range whose upper bound is at least `price`.
///
/// Prices above 900 (and anything that fails every comparison) fall into the
/// last range.
pub(crate) fn price_range_index(price: f64) -> usize {
    PRICE_RANGES
        .iter()
        .position(|range| range.upper_bound.is_none_or(|upper| price <= upper))
        .unwrap_or(PRICE_RANGES.len() - 1)
}

/// Total sales and sold/unsold counts.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    /// The sum of the prices of all matching products, sold or not.
    pub total_sales: f64,
    /// The number of matching products that have sold.
    pub sold_items: u64,
    /// The number of matching products that have not sold.
    pub unsold_items: u64,
}

/// The number of products in each of the ten [PRICE_RANGES].
///
/// Serializes as a JSON object from range label to count, in range order,
/// including empty ranges.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PriceHistogram {
    counts: [u64; PRICE_RANGES.len()],
}

impl PriceHistogram {
    /// The (label, count) pairs in ascending price order.
    pub fn buckets(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        PRICE_RANGES
            .iter()
            .zip(self.counts)
            .map(|(range, count)| (range.label, count))
    }

    /// The number of products across all ranges.
    #[cfg(test)]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Serialize for PriceHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PRICE_RANGES.len()))?;

        for (label, count) in self.buckets() {
            map.serialize_entry(label, &count)?;
        }

        map.end()
    }
}

/// The number of products in each category, keyed by the exact category text.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryHistogram(BTreeMap<String, u64>);

impl CategoryHistogram {
    /// The (category, count) pairs sorted by category.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0
            .iter()
            .map(|(category, count)| (category.as_str(), *count))
    }

    /// Whether no product matched.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// All three aggregates for one filter.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SalesAggregates {
    /// Totals for the statistics block.
    pub summary: SalesSummary,
    /// Data for the bar chart.
    pub price_histogram: PriceHistogram,
    /// Data for the pie chart.
    pub category_histogram: CategoryHistogram,
}

pub(crate) fn summarize_sales(sales: &[Sale]) -> SalesSummary {
    sales
        .iter()
        .fold(SalesSummary::default(), |mut summary, sale| {
            summary.total_sales += sale.price;

            if sale.sold {
                summary.sold_items += 1;
            } else {
                summary.unsold_items += 1;
            }

            summary
        })
}

pub(crate) fn build_price_histogram(sales: &[Sale]) -> PriceHistogram {
    let mut histogram = PriceHistogram::default();

    for sale in sales {
        histogram.counts[price_range_index(sale.price)] += 1;
    }

    histogram
}

pub(crate) fn build_category_histogram(sales: &[Sale]) -> CategoryHistogram {
    let mut counts = BTreeMap::new();

    for sale in sales {
        *counts.entry(sale.category.clone()).or_insert(0) += 1;
    }

    CategoryHistogram(counts)
}

pub(crate) fn aggregate_sales(sales: &[Sale]) -> SalesAggregates {
    SalesAggregates {
        summary: summarize_sales(sales),
        price_histogram: build_price_histogram(sales),
        category_histogram: build_category_histogram(sales),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::statistics::sale::Sale;

    use super::{
        PRICE_RANGES, SalesSummary, build_category_histogram, build_price_histogram,
        price_range_index, summarize_sales,
    };

    fn create_test_sale(price: f64, category: &str, sold: bool) -> Sale {
        Sale {
            price,
            category: category.to_owned(),
            sold,
        }
    }

    fn priced(prices: &[f64]) -> Vec<Sale> {
        prices
            .iter()
            .map(|&price| create_test_sale(price, "", false))
            .collect()
    }

    #[test]
    fn upper_bounds_are_inclusive() {
        assert_eq!(price_range_index(0.0), 0);
        assert_eq!(price_range_index(100.0), 0);
        assert_eq!(price_range_index(100.01), 1);
        assert_eq!(price_range_index(101.0), 1);
        assert_eq!(price_range_index(200.0), 1);
        assert_eq!(price_range_index(900.0), 8);
        assert_eq!(price_range_index(900.5), 9);
        assert_eq!(price_range_index(1_000_000.0), 9);
    }

    #[test]
    fn every_price_lands_in_exactly_one_range() {
        for cents in (0..=120_000).step_by(37) {
            let price = cents as f64 / 100.0;
            let index = price_range_index(price);

            let containing = PRICE_RANGES
                .iter()
                .enumerate()
                .filter(|(i, range)| {
                    let above_previous = *i == 0
                        || PRICE_RANGES[i - 1]
                            .upper_bound
                            .is_some_and(|previous| price > previous);
                    let below_upper = range.upper_bound.is_none_or(|upper| price <= upper);
                    above_previous && below_upper
                })
                .map(|(i, _)| i)
                .collect::<Vec<_>>();

            assert_eq!(containing, [index], "price {price}");
        }
    }

    #[test]
    fn histogram_counts_sum_to_number_of_sales() {
        let sales = priced(&[0.0, 55.5, 100.0, 250.0, 250.0, 899.99, 901.0, 12_000.0]);

        let histogram = build_price_histogram(&sales);

        assert_eq!(histogram.total(), sales.len() as u64);
    }

    #[test]
    fn histogram_serializes_every_range_in_order() {
        let sales = priced(&[50.0, 150.0, 150.0, 999.0]);

        let histogram = build_price_histogram(&sales);

        let json = serde_json::to_string(&histogram).unwrap();
        assert_eq!(
            json,
            r#"{"0-100":1,"101-200":2,"201-300":0,"301-400":0,"401-500":0,"501-600":0,"601-700":0,"701-800":0,"801-900":0,"901-above":1}"#
        );
    }

    #[test]
    fn summary_totals_prices_and_counts_sold_items() {
        let sales = vec![
            create_test_sale(50.0, "a", true),
            create_test_sale(150.0, "a", false),
            create_test_sale(150.0, "b", true),
            create_test_sale(999.0, "c", false),
        ];

        let summary = summarize_sales(&sales);

        assert_eq!(
            summary,
            SalesSummary {
                total_sales: 1249.0,
                sold_items: 2,
                unsold_items: 2,
            }
        );
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({"totalSales": 1249.0, "soldItems": 2, "unsoldItems": 2})
        );
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        assert_eq!(summarize_sales(&[]), SalesSummary::default());
    }

    #[test]
    fn category_histogram_groups_by_exact_category() {
        let sales = vec![
            create_test_sale(1.0, "electronics", true),
            create_test_sale(1.0, "jewelery", false),
            create_test_sale(1.0, "electronics", false),
            create_test_sale(1.0, "Electronics", false),
        ];

        let histogram = build_category_histogram(&sales);

        assert_eq!(
            serde_json::to_value(&histogram).unwrap(),
            json!({"Electronics": 1, "electronics": 2, "jewelery": 1})
        );
    }

    #[test]
    fn category_histogram_of_nothing_is_empty() {
        let histogram = build_category_histogram(&[]);

        assert!(histogram.is_empty());
        assert_eq!(serde_json::to_string(&histogram).unwrap(), "{}");
    }
}
