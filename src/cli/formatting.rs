use rust_decimal::Decimal;

use crate::ledger::ExpenseRecord;

const HEADERS: [&str; 5] = ["#", "Date", "Amount", "Category", "Note"];

/// Two-decimal amount followed by the currency label.
pub fn money(amount: Decimal, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

/// Renders records as an aligned text table, one line per record, in ledger order.
pub fn expense_table(records: &[ExpenseRecord]) -> Vec<String> {
    let rows: Vec<[String; 5]> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            [
                index.to_string(),
                record.date.clone(),
                format!("{:.2}", record.amount),
                record.category.clone(),
                record.note.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(&HEADERS.map(String::from), &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(rows.iter().map(|row| render_row(row, &widths)));
    lines
}

fn render_row(cells: &[String; 5], widths: &[usize; 5]) -> String {
    let mut line = String::new();
    for (column, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if column > 0 {
            line.push_str("  ");
        }
        let pad = width.saturating_sub(cell.chars().count());
        // Numeric columns are right-aligned.
        if column == 0 || column == 2 {
            line.push_str(&" ".repeat(pad));
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
        }
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ExpenseDraft;
    use rust_decimal_macros::dec;

    #[test]
    fn money_uses_two_decimals() {
        assert_eq!(money(dec!(120.5), "USD"), "120.50 USD");
        assert_eq!(money(dec!(-50), "元"), "-50.00 元");
    }

    #[test]
    fn table_lists_records_in_order_with_positions() {
        let records = vec![
            ExpenseRecord::new(ExpenseDraft::new("2024-01-05", dec!(120.5), "food", "lunch")),
            ExpenseRecord::new(ExpenseDraft::new("2024-01-06", dec!(8), "transport", "")),
        ];

        let lines = expense_table(&records);

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("#  Date"));
        assert_eq!(lines[2], "0  2024-01-05  120.50  food       lunch");
        assert_eq!(lines[3], "1  2024-01-06    8.00  transport");
    }
}
