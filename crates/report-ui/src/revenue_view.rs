//! Yearly revenue report with growth and loss highlights.

use report_core::error::Result;
use report_data::aggregator::RevenueSummary;

/// One line per year followed by the highest-growth and highest-loss lines.
pub fn render_revenue(summary: &RevenueSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .years
        .iter()
        .map(|row| match row.delta {
            None => format!("Total Annual Revenue for {} was {} Dollars.", row.year, row.total),
            Some(delta) => format!(
                "Total Annual Revenue for {} was {} Dollars. A {} Dollar change in revenue was seen.",
                row.year, row.total, delta
            ),
        })
        .collect();

    lines.push(match summary.highest_growth {
        Some(g) => format!(
            "The year with the highest revenue growth was {} with a gain of {}",
            g.year, g.delta
        ),
        None => "No year showed revenue growth".to_string(),
    });
    lines.push(match summary.highest_loss {
        Some(l) => format!(
            "The year with the highest revenue loss was {} with a loss of {}",
            l.year, l.delta
        ),
        None => "No year showed revenue loss".to_string(),
    });

    lines
}

pub fn render_revenue_json(summary: &RevenueSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_data::aggregator::YearlyAggregator;

    fn summary_of(revenue: &[(i32, i64)]) -> RevenueSummary {
        let mut agg = YearlyAggregator::default();
        for &(year, amount) in revenue {
            agg.record_revenue(year, amount);
        }
        agg.compute_deltas()
    }

    #[test]
    fn test_render_revenue_growth_and_loss() {
        let lines = render_revenue(&summary_of(&[(2010, 1000), (2011, 1500), (2012, 1200)]));
        assert_eq!(
            lines,
            vec![
                "Total Annual Revenue for 2010 was 1000 Dollars.",
                "Total Annual Revenue for 2011 was 1500 Dollars. A 500 Dollar change in revenue was seen.",
                "Total Annual Revenue for 2012 was 1200 Dollars. A -300 Dollar change in revenue was seen.",
                "The year with the highest revenue growth was 2011 with a gain of 500",
                "The year with the highest revenue loss was 2012 with a loss of -300",
            ]
        );
    }

    #[test]
    fn test_render_revenue_single_year() {
        let lines = render_revenue(&summary_of(&[(2013, 42)]));
        assert_eq!(
            lines,
            vec![
                "Total Annual Revenue for 2013 was 42 Dollars.",
                "No year showed revenue growth",
                "No year showed revenue loss",
            ]
        );
    }

    #[test]
    fn test_render_revenue_json() {
        let json = render_revenue_json(&summary_of(&[(2010, 10), (2011, 5)])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["years"][0]["delta"], serde_json::Value::Null);
        assert_eq!(value["years"][1]["delta"], -5);
        assert_eq!(value["highest_growth"], serde_json::Value::Null);
        assert_eq!(value["highest_loss"]["year"], 2011);
    }
}
