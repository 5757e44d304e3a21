// src/common/export.rs

use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::fmt::Write;

use crate::common::money::fixed_money;
use crate::models::finance::{Invoice, WALK_IN_CUSTOMER};

const PRINT_STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
h1 { color: #333; text-align: center; }
table { width: 100%; border-collapse: collapse; margin-top: 20px; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; }
.header { text-align: center; margin-bottom: 20px; }
.date { font-size: 12px; color: #666; }
.totals { margin-top: 20px; text-align: right; }";

/// Texto da célula: string sem aspas, nulo vazio, o resto como JSON.
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// CSV sem aspas nem escape: cabeçalho = chaves do primeiro registro.
pub fn to_csv(records: &[Map<String, Value>]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    let headers: Vec<&String> = first.keys().collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(headers.iter().map(|h| h.as_str()).collect::<Vec<_>>().join(","));
    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|h| record.get(h.as_str()).map(cell).unwrap_or_default())
            .collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Documento para o diálogo de impressão do navegador.
pub fn render_report_html(
    title: &str,
    period: Option<(NaiveDate, NaiveDate)>,
    generated_on: NaiveDate,
    records: &[Map<String, Value>],
) -> String {
    let title = escape_html(title);
    let mut html = String::new();

    // `write!` numa String não falha
    let _ = write!(
        html,
        "<html><head><title>{title}</title><style>{PRINT_STYLE}</style></head><body>\
         <div class=\"header\"><h1>{title}</h1>\
         <div class=\"date\">Generated on: {generated_on}</div>"
    );
    if let Some((from, to)) = period {
        let _ = write!(html, "<div class=\"date\">Period: {from} to {to}</div>");
    }
    html.push_str("</div><table><thead><tr>");

    if let Some(first) = records.first() {
        for key in first.keys() {
            let _ = write!(html, "<th>{}</th>", escape_html(&capitalize(key)));
        }
    }
    html.push_str("</tr></thead><tbody>");
    for record in records {
        html.push_str("<tr>");
        for value in record.values() {
            let _ = write!(html, "<td>{}</td>", escape_html(&cell(value)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></body></html>");
    html
}

/// Fatura impressa. Sem cliente, sai como "Consumidor Final".
pub fn render_invoice_html(invoice: &Invoice, customer_name: Option<&str>) -> String {
    let number = escape_html(&invoice.number);
    let customer = escape_html(customer_name.unwrap_or(WALK_IN_CUSTOMER));
    let mut html = String::new();

    let _ = write!(
        html,
        "<html><head><title>Invoice {number}</title><style>{PRINT_STYLE}</style></head><body>\
         <div class=\"header\"><h1>Invoice {number}</h1>\
         <div class=\"date\">Date: {} | Due: {}</div>\
         <div>Bill to: {customer}</div></div>\
         <table><thead><tr><th>Description</th><th>Quantity</th><th>Rate</th><th>Amount</th></tr></thead><tbody>",
        invoice.invoice_date, invoice.due_date,
    );
    for item in &invoice.items {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&item.description),
            item.quantity.normalize(),
            fixed_money(item.rate),
            fixed_money(item.amount),
        );
    }
    let _ = write!(
        html,
        "</tbody></table><div class=\"totals\">\
         <div>Subtotal: {}</div><div>Tax ({}%): {}</div><div><strong>Total: {}</strong></div></div>",
        fixed_money(invoice.subtotal),
        (invoice.tax_rate * rust_decimal::Decimal::ONE_HUNDRED).normalize(),
        fixed_money(invoice.tax),
        fixed_money(invoice.total),
    );
    if let Some(notes) = &invoice.notes {
        let _ = write!(html, "<p>{}</p>", escape_html(notes));
    }
    html.push_str("</body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finance::{BillItem, InvoiceStatus};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use serde_json::json;
    use uuid::Uuid;

    fn records(value: Value) -> Vec<Map<String, Value>> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn csv_header_comes_from_first_record() {
        let rows = records(json!([
            { "product": "Laptop", "stock": "5", "value": "4000.00" },
            { "product": "T-Shirt", "stock": "50", "value": "750.00" },
        ]));
        assert_eq!(
            to_csv(&rows),
            "product,stock,value\nLaptop,5,4000.00\nT-Shirt,50,750.00"
        );
    }

    #[test]
    fn csv_does_not_quote_commas() {
        let rows = records(json!([{ "name": "Tech Supplies, Co.", "n": 1 }]));
        assert_eq!(to_csv(&rows), "name,n\nTech Supplies, Co.,1");
    }

    #[test]
    fn csv_of_nothing_is_empty() {
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn report_html_escapes_and_capitalizes() {
        let rows = records(json!([{ "product": "<b>Laptop</b>", "stock": "5" }]));
        let day = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let html = render_report_html("Inventory Report", Some((day, day)), day, &rows);

        assert!(html.contains("<th>Product</th><th>Stock</th>"));
        assert!(html.contains("<td>&lt;b&gt;Laptop&lt;/b&gt;</td>"));
        assert!(html.contains("Period: 2024-01-31 to 2024-01-31"));
        assert!(html.contains("Generated on: 2024-01-31"));
    }

    #[test]
    fn invoice_without_customer_is_final_consumer() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let invoice = Invoice {
            id: Uuid::new_v4(),
            number: "INV-006".into(),
            customer_id: None,
            invoice_date: day,
            due_date: day,
            status: InvoiceStatus::Pending,
            items: vec![BillItem {
                description: "Consulting".into(),
                quantity: Decimal::from(2),
                rate: Decimal::from(500),
                amount: Decimal::from(1000),
            }],
            subtotal: Decimal::from(1000),
            tax_rate: Decimal::new(18, 2),
            tax: Decimal::from(180),
            total: Decimal::from(1180),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let html = render_invoice_html(&invoice, None);

        assert!(html.contains("Bill to: Consumidor Final"));
        assert!(html.contains("<td>Consulting</td><td>2</td><td>500.00</td><td>1000.00</td>"));
        assert!(html.contains("Tax (18%): 180.00"));
        assert!(html.contains("Total: 1180.00"));
    }
}
