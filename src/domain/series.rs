//! Close-price series representation.

use chrono::NaiveDate;

/// A single close observation. A price series is an ordered `Vec<PricePoint>`,
/// strictly increasing by date with no duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Extract the close column from a price series.
pub fn closes(prices: &[PricePoint]) -> Vec<f64> {
    prices.iter().map(|p| p.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_points(values: &[f64]) -> Vec<PricePoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                PricePoint::new(
                    NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                    close,
                )
            })
            .collect()
    }

    #[test]
    fn closes_extracts_column() {
        let prices = make_points(&[10.0, 20.0, 30.0]);
        assert_eq!(closes(&prices), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn closes_empty_series() {
        assert!(closes(&[]).is_empty());
    }
}
