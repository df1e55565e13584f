//! Plain-text rendering of command results.

use ratescope_common::{ChangeMetric, Currency, Quote};
use ratescope_fx::{BaseRateTable, Conversion, Movement, TradingSignal};

const RULE_WIDTH: usize = 55;

fn table_header(metric_label: &str) -> Vec<String> {
    vec![
        format!("{:<10}{:<15}{:<15}{:<15}", "Pair", "Price", metric_label, "Group"),
        "-".repeat(RULE_WIDTH),
    ]
}

fn table_row(quote: &Quote, value: f64) -> String {
    format!(
        "{:<10}{:<15}{:<15}{}",
        quote.pair_code(),
        format!("{:.4}", quote.price()),
        format!("{:.2}%", value),
        quote.group().unwrap_or_default()
    )
}

fn finish(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Ranked quotes as a table, e.g. `--- Top 5 Performing Currencies (Weekly) ---`.
pub fn performers(kind: &str, quotes: &[Quote], metric: ChangeMetric) -> String {
    let mut lines = vec![format!(
        "--- {} {} Performing Currencies ({}) ---",
        kind,
        quotes.len(),
        metric
    )];
    lines.extend(table_header(metric.column_name()));
    lines.extend(
        quotes
            .iter()
            .map(|q| table_row(q, q.change_by_metric(metric))),
    );
    finish(lines)
}

/// Every quote with its day change.
pub fn all_rates(quotes: &[Quote]) -> String {
    let mut lines = vec!["--- All Exchange Rates ---".to_string()];
    lines.extend(table_header("% Change"));
    lines.extend(quotes.iter().map(|q| table_row(q, q.percent_change())));
    finish(lines)
}

pub fn conversion(conversion: &Conversion) -> String {
    finish(vec![
        "--- Currency Conversion Result ---".to_string(),
        format!(
            "{} {} = {:.4} {}",
            conversion.amount, conversion.from, conversion.output, conversion.to
        ),
        format!(
            "Exchange Rate: 1 {} = {:.6} {} ({})",
            conversion.from, conversion.rate, conversion.to, conversion.source
        ),
    ])
}

pub fn movements(movements: &[Movement]) -> String {
    let mut lines = vec!["--- Significant Currency Movements ---".to_string()];
    if movements.is_empty() {
        lines.push("No significant movements detected.".to_string());
    }
    lines.extend(movements.iter().map(ToString::to_string));
    finish(lines)
}

pub fn signals(signals: &[TradingSignal]) -> String {
    let mut lines = vec!["--- Trading Opportunities ---".to_string()];
    if signals.is_empty() {
        lines.push("No trading opportunities identified.".to_string());
    }
    lines.extend(signals.iter().map(ToString::to_string));
    finish(lines)
}

/// Items laid out `per_line` to a row, each padded to `width`.
pub fn columns<T: ToString>(title: &str, items: &[T], width: usize, per_line: usize) -> String {
    let mut lines = vec![format!("--- {} ---", title)];
    for chunk in items.chunks(per_line.max(1)) {
        let row: String = chunk
            .iter()
            .map(|item| format!("{:>width$}", item.to_string(), width = width))
            .collect();
        lines.push(row);
    }
    finish(lines)
}

pub fn currencies(currencies: &[Currency]) -> String {
    columns("Available Currencies", currencies, 6, 10)
}

pub fn pairs(pairs: &[String]) -> String {
    columns("Available Currency Pairs", pairs, 10, 6)
}

pub fn base_rates(table: &BaseRateTable) -> String {
    let mut lines = vec![
        "--- Base Rates (units per 1 USD) ---".to_string(),
        format!("{:<10}{}", "Currency", "Rate"),
        "-".repeat(25),
    ];
    lines.extend(
        table
            .iter()
            .map(|(currency, rate)| format!("{:<10}{:.6}", currency.code(), rate)),
    );
    finish(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratescope_common::QuoteChanges;

    fn quote(code: &str, price: f64, day_pct: f64) -> Quote {
        Quote::new(code, price)
            .with_changes(QuoteChanges {
                day_pct,
                ..QuoteChanges::default()
            })
            .with_group("Majors")
    }

    #[test]
    fn test_performers_table() {
        let text = performers("Top", &[quote("USD/JPY", 150.0, 1.25)], ChangeMetric::DayPercent);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "--- Top 1 Performing Currencies (Percent Change) ---");
        assert!(lines[1].starts_with("Pair      Price          Percent Change "));
        assert_eq!(lines[2], "-".repeat(55));
        assert_eq!(lines[3], "USD/JPY   150.0000       1.25%          Majors");
    }

    #[test]
    fn test_empty_lists_have_placeholders() {
        assert!(movements(&[]).contains("No significant movements detected."));
        assert!(signals(&[]).contains("No trading opportunities identified."));
    }

    #[test]
    fn test_columns_wrap() {
        let items: Vec<String> = (0..7).map(|i| format!("C{}", i)).collect();
        let text = columns("Items", &items, 4, 3);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "  C0  C1  C2");
        assert_eq!(lines[3], "  C6");
    }
}
