//! Plain-text tables for terminal output.
//!
//! Renderers return lines instead of printing so handlers can write them
//! to any `io::Write`.

use bankdata_core::models::{Balance, Institution, Transaction};
use bankdata_core::utils::{format_amount, format_date, format_optional, truncate_string};

/// Longest counterparty name shown before truncation
const MAX_NAME_WIDTH: usize = 40;

pub fn institution_lines(banks: &[Institution]) -> Vec<String> {
    let id_width = banks
        .iter()
        .map(|b| b.id.chars().count())
        .chain(std::iter::once("ID".len()))
        .max()
        .unwrap_or(0);
    let bic_width = banks
        .iter()
        .map(|b| b.display_bic().chars().count())
        .chain(std::iter::once("BIC".len()))
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!(
        "{:<id_width$}  {:<bic_width$}  NAME",
        "ID",
        "BIC",
        id_width = id_width,
        bic_width = bic_width
    )];
    for bank in banks {
        lines.push(format!(
            "{:<id_width$}  {:<bic_width$}  {}",
            bank.id,
            bank.display_bic(),
            bank.name,
            id_width = id_width,
            bic_width = bic_width
        ));
    }
    lines
}

/// One line per transaction, with a blank line wherever the calendar
/// month changes from one transaction to the next.
pub fn transaction_lines(transactions: &[Transaction]) -> Vec<String> {
    let names: Vec<String> = transactions
        .iter()
        .map(|t| truncate_string(&format_optional(t.counterparty.as_deref(), "?"), MAX_NAME_WIDTH))
        .collect();
    let amounts: Vec<String> = transactions
        .iter()
        .map(|t| format_amount(t.amount.amount))
        .collect();
    let name_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    let amount_width = amounts.iter().map(|a| a.len()).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(transactions.len());
    let mut previous_month = None;
    for ((tx, name), amount) in transactions.iter().zip(&names).zip(&amounts) {
        let month = tx.month();
        if previous_month.is_some_and(|m| m != month) {
            lines.push(String::new());
        }
        previous_month = Some(month);

        let line = format!(
            "{}  {:<name_width$}  {:<amount_width$}  {}  {}",
            format_date(tx.booking_date),
            name,
            amount,
            tx.amount.currency,
            tx.counterparty_iban.as_deref().unwrap_or(""),
            name_width = name_width,
            amount_width = amount_width
        );
        lines.push(line.trim_end().to_string());
    }
    lines
}

pub fn balance_line(balance: &Balance) -> String {
    format!(
        "Balance: {} {}",
        format_amount(balance.money.amount).trim_start(),
        balance.money.currency
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankdata_core::models::Money;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn tx(date: &str, cents: i64, name: &str) -> Transaction {
        Transaction {
            booking_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount: Money {
                amount: Decimal::new(cents, 2),
                currency: "EUR".to_string(),
            },
            counterparty: Some(name.to_string()),
            counterparty_iban: None,
        }
    }

    #[test]
    fn test_one_separator_between_two_months() {
        let lines = transaction_lines(&[
            tx("2024-04-03", -1000, "Rent"),
            tx("2024-04-01", 250, "Refund"),
            tx("2024-03-30", -4250, "Grocer"),
            tx("2024-03-02", 12340, "Salary"),
        ]);

        assert_eq!(lines.len(), 5);
        assert_eq!(lines.iter().filter(|l| l.is_empty()).count(), 1);
        assert!(lines[2].is_empty());
        assert!(lines[1].starts_with("2024-04-01"));
        assert!(lines[3].starts_with("2024-03-30"));
    }

    #[test]
    fn test_same_month_across_years_still_separates() {
        let lines = transaction_lines(&[tx("2025-03-01", 100, "A"), tx("2024-03-01", 100, "B")]);
        assert_eq!(lines, vec!["2025-03-01  A  1.00  EUR", "", "2024-03-01  B  1.00  EUR"]);
    }

    #[test]
    fn test_debits_are_offset_from_credits() {
        let lines = transaction_lines(&[tx("2024-03-02", -4250, "Shop"), tx("2024-03-01", 12340, "Pay")]);
        assert_eq!(lines[0], "2024-03-02  Shop      -42.50  EUR");
        assert_eq!(lines[1], "2024-03-01  Pay   123.40      EUR");
    }

    #[test]
    fn test_missing_counterparty_shows_placeholder() {
        let mut t = tx("2024-03-02", 100, "x");
        t.counterparty = None;
        t.counterparty_iban = Some("GB33BUKB20201555555555".to_string());
        assert_eq!(
            transaction_lines(&[t]),
            vec!["2024-03-02  ?  1.00  EUR  GB33BUKB20201555555555"]
        );
    }

    #[test]
    fn test_institution_table_pads_by_characters() {
        let banks = vec![Institution {
            id: "CRÉDIT_MUTUEL".to_string(),
            name: "Crédit Mutuel".to_string(),
            bic: Some("CMCIFRPP".to_string()),
        }];
        assert_eq!(
            institution_lines(&banks),
            vec![
                "ID             BIC       NAME",
                "CRÉDIT_MUTUEL  CMCIFRPP  Crédit Mutuel",
            ]
        );
    }

    #[test]
    fn test_institution_table_aligns_columns() {
        let banks = vec![Institution {
            id: "MONZO_MONZGB2L".to_string(),
            name: "Monzo".to_string(),
            bic: Some("MONZGB2L".to_string()),
        }];
        assert_eq!(
            institution_lines(&banks),
            vec![
                "ID              BIC       NAME",
                "MONZO_MONZGB2L  MONZGB2L  Monzo",
            ]
        );
    }
}
