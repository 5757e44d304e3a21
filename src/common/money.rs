// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Casas decimais de todo valor monetário calculado.
pub const MONEY_SCALE: u32 = 2;

/// Arredondamento bancário (meio para o par) em 2 casas.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Valor arredondado e sempre com 2 casas (ex: 4000 -> 4000.00), para exibição e exportação.
pub fn fixed_money(value: Decimal) -> Decimal {
    let mut v = round_money(value);
    v.rescale(MONEY_SCALE);
    v
}

/// Qualquer linha com quantidade e preço unitário (item de fatura, linha de pedido).
pub trait LineItem {
    fn quantity(&self) -> Decimal;
    fn rate(&self) -> Decimal;

    fn amount(&self) -> Decimal {
        line_amount(self.quantity(), self.rate())
    }
}

pub fn line_amount(quantity: Decimal, rate: Decimal) -> Decimal {
    round_money(quantity * rate)
}

/// Soma exata de quantidade × preço, arredondada uma única vez.
/// O `amount` de cada linha é só para exibição.
pub fn subtotal<L: LineItem>(lines: &[L]) -> Decimal {
    round_money(lines.iter().map(|l| l.quantity() * l.rate()).sum())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxPolicy {
    pub enabled: bool,
    pub rate: Decimal,
}

impl TaxPolicy {
    pub fn new(enabled: bool, rate: Decimal) -> Self {
        Self { enabled, rate }
    }

    pub fn none() -> Self {
        Self { enabled: false, rate: Decimal::ZERO }
    }

    /// Taxa efetivamente aplicada (0 quando desligada).
    pub fn effective_rate(&self) -> Decimal {
        if self.enabled { self.rate } else { Decimal::ZERO }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

pub fn compute_totals<L: LineItem>(lines: &[L], tax: TaxPolicy) -> Totals {
    let subtotal = subtotal(lines);
    let tax = round_money(subtotal * tax.effective_rate());
    Totals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    struct Line(Decimal, Decimal);

    impl LineItem for Line {
        fn quantity(&self) -> Decimal {
            self.0
        }
        fn rate(&self) -> Decimal {
            self.1
        }
    }

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn subtotal_is_sum_of_quantity_times_rate() {
        let lines = vec![Line(d("2"), d("12.50")), Line(d("3"), d("4.10")), Line(d("1"), d("0.99"))];
        assert_eq!(subtotal(&lines), d("25.00") + d("12.30") + d("0.99"));
    }

    #[test]
    fn empty_lines_yield_zero_totals() {
        let lines: Vec<Line> = Vec::new();
        let totals = compute_totals(&lines, TaxPolicy::new(true, d("0.18")));
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn gst_toggle_on_thousand() {
        let lines = vec![Line(d("1"), d("1000"))];

        let on = compute_totals(&lines, TaxPolicy::new(true, d("0.18")));
        assert_eq!(on.tax, d("180.00"));
        assert_eq!(on.total, d("1180.00"));

        let off = compute_totals(&lines, TaxPolicy::new(false, d("0.18")));
        assert_eq!(off.tax, Decimal::ZERO);
        assert_eq!(off.total, off.subtotal);
    }

    #[test]
    fn rounding_is_half_even() {
        assert_eq!(round_money(d("2.345")), d("2.34"));
        assert_eq!(round_money(d("2.355")), d("2.36"));
        assert_eq!(line_amount(d("3"), d("0.335")), d("1.00"));
    }

    #[test]
    fn subtotal_rounds_the_exact_sum_once() {
        let lines = vec![
            Line(d("1"), d("0.005")),
            Line(d("1"), d("0.005")),
            Line(d("1"), d("0.005")),
        ];
        // Cada linha isolada daria 0.00
        assert_eq!(lines[0].amount(), d("0.00"));
        assert_eq!(subtotal(&lines), d("0.02"));

        let totals = compute_totals(&lines, TaxPolicy::none());
        assert_eq!(totals.total, d("0.02"));
    }

    #[test]
    fn tax_is_taken_from_the_rounded_subtotal() {
        let lines = vec![Line(d("3"), d("0.335")), Line(d("1"), d("0.004"))];
        // 1.005 + 0.004 = 1.009 -> 1.01
        let totals = compute_totals(&lines, TaxPolicy::new(true, d("0.10")));
        assert_eq!(totals.subtotal, d("1.01"));
        assert_eq!(totals.tax, d("0.10"));
        assert_eq!(totals.total, d("1.11"));
    }

    #[test]
    fn fixed_money_pads_to_two_places() {
        assert_eq!(fixed_money(d("4000")).to_string(), "4000.00");
        assert_eq!(fixed_money(d("12.345")).to_string(), "12.34");
    }

    #[test]
    fn tax_is_rounded_to_cents() {
        let lines = vec![Line(d("1"), d("10.05"))];
        let totals = compute_totals(&lines, TaxPolicy::new(true, d("0.10")));
        // 1.005 -> 1.00 (meio para o par)
        assert_eq!(totals.tax, d("1.00"));
        assert_eq!(totals.total, d("11.05"));
    }
}
