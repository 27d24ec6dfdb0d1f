//! Subscribers gained and retained per tracked year.

use report_core::error::Result;
use report_data::aggregator::YearGrowth;

pub fn render_growth(rows: &[YearGrowth]) -> Vec<String> {
    rows.iter()
        .map(|r| {
            format!(
                "Subscribers in {}: {} gained, {} retained",
                r.year, r.gained, r.retained
            )
        })
        .collect()
}

pub fn render_growth_json(rows: &[YearGrowth]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_data::aggregator::{TrackedWindow, YearlyAggregator};

    #[test]
    fn test_render_growth_lines() {
        let mut agg = YearlyAggregator::new(TrackedWindow::new(2010, 2));
        agg.record_gain(2010);
        agg.record_gain(2010);
        agg.record_retention(2011);

        assert_eq!(
            render_growth(&agg.growth_rows()),
            vec![
                "Subscribers in 2010: 2 gained, 0 retained",
                "Subscribers in 2011: 0 gained, 1 retained",
            ]
        );
    }

    #[test]
    fn test_render_growth_json() {
        let rows = [YearGrowth { year: 2012, gained: 3, retained: 1 }];
        let value: serde_json::Value =
            serde_json::from_str(&render_growth_json(&rows).unwrap()).unwrap();
        assert_eq!(value[0]["gained"], 3);
    }
}
