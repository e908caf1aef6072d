//! Document rendering and report export.
//!
//! Everything here is string templating over numbers that were already
//! computed and persisted by the invoice and journal services: the printable
//! HTML document handed to the platform print/share facility, and CSV
//! reports of the journal and the document list.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use shared::{Client, Invoice, InvoiceResponse, JournalEntry, LineItem, Settings};

/// Stateless export facade
#[derive(Clone)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Render the printable invoice document. The caller passes everything
    /// by value; nothing is fetched or recomputed here.
    pub fn render_invoice_html(
        &self,
        invoice: &Invoice,
        items: &[LineItem],
        settings: &Settings,
        client: Option<&Client>,
    ) -> String {
        let company_name = escape_html(settings.company_name.as_deref().unwrap_or(""));
        let company_address = escape_html(settings.address.as_deref().unwrap_or(""));
        let company_phone = escape_html(settings.phone.as_deref().unwrap_or(""));
        let company_email = escape_html(settings.email.as_deref().unwrap_or(""));
        let company_nuit = escape_html(settings.nuit.as_deref().unwrap_or(""));
        let currency = escape_html(&settings.currency);

        let client_block = match client {
            Some(client) => {
                let mut block = format!("<p><strong>{}</strong></p>", escape_html(&client.name));
                if let Some(nuit) = client.nuit.as_deref().filter(|n| !n.is_empty()) {
                    block.push_str(&format!("<p>NUIT: {}</p>", escape_html(nuit)));
                }
                if let Some(address) = client.address.as_deref().filter(|a| !a.is_empty()) {
                    block.push_str(&format!("<p>{}</p>", escape_html(address)));
                }
                block
            }
            None => "<p><strong>Consumidor Final</strong></p>".to_string(),
        };

        let item_rows: String = items
            .iter()
            .map(|item| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td></tr>",
                    escape_html(&item.description),
                    item.quantity,
                    item.unit_price,
                    item.total,
                )
            })
            .collect();

        format!(
            r#"<html>
  <head>
    <style>
      body {{ font-family: 'Helvetica', sans-serif; padding: 20px; color: #333; }}
      .header {{ display: flex; justify-content: space-between; margin-bottom: 40px; }}
      .company-info h1 {{ margin: 0; color: #606c38; }}
      .invoice-info {{ text-align: right; }}
      .client-info {{ margin-bottom: 30px; border-bottom: 1px solid #eee; padding-bottom: 20px; }}
      table {{ width: 100%; border-collapse: collapse; margin-bottom: 30px; }}
      th {{ text-align: left; background-color: #f8f9fa; padding: 10px; border-bottom: 2px solid #ddd; }}
      td {{ padding: 10px; border-bottom: 1px solid #eee; }}
      .totals {{ float: right; width: 300px; }}
      .total-row {{ display: flex; justify-content: space-between; padding: 5px 0; }}
      .grand-total {{ font-weight: bold; font-size: 1.2em; border-top: 2px solid #333; margin-top: 10px; }}
      .footer {{ margin-top: 50px; text-align: center; font-size: 0.8em; color: #777; }}
    </style>
  </head>
  <body>
    <div class="header">
      <div class="company-info">
        <h1>{company_name}</h1>
        <p>{company_address}</p>
        <p>Tel: {company_phone}</p>
        <p>Email: {company_email}</p>
        <p>NUIT: {company_nuit}</p>
      </div>
      <div class="invoice-info">
        <h2>{kind}</h2>
        <p>#{id}</p>
        <p>Data: {date}</p>
      </div>
    </div>

    <div class="client-info">
      <h3>Cliente:</h3>
      {client_block}
    </div>

    <table>
      <thead>
        <tr><th>Descrição</th><th>Qtd</th><th>Preço Unit.</th><th>Total</th></tr>
      </thead>
      <tbody>{item_rows}</tbody>
    </table>

    <div class="totals">
      <div class="total-row"><span>Subtotal:</span><span>{subtotal:.2} {currency}</span></div>
      <div class="total-row"><span>IVA:</span><span>{tax_total:.2} {currency}</span></div>
      <div class="total-row grand-total"><span>Total:</span><span>{total:.2} {currency}</span></div>
    </div>

    <div class="footer">
      <p>Processado por computador.</p>
    </div>
  </body>
</html>
"#,
            kind = invoice.kind.as_str(),
            id = invoice.id,
            date = format_display_date(&invoice.date),
            subtotal = invoice.subtotal,
            tax_total = invoice.tax_total,
            total = invoice.total,
        )
    }

    /// Journal entries as CSV rows, newest first as listed
    pub fn journal_csv(&self, entries: &[JournalEntry]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "id",
            "type",
            "amount",
            "description",
            "date",
            "category",
            "document_type",
            "invoice_id",
        ])?;

        for entry in entries {
            writer.write_record([
                entry.id.to_string(),
                entry.kind.as_str().to_string(),
                format!("{:.2}", entry.amount),
                entry.description.clone(),
                entry.date.clone(),
                entry.category.clone().unwrap_or_default(),
                entry.document_type.clone().unwrap_or_default(),
                entry
                    .invoice_id
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
            ])?;
        }

        let bytes = writer.into_inner()?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Document list as CSV rows for the spreadsheet report
    pub fn invoices_csv(&self, invoices: &[InvoiceResponse]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "id", "code", "type", "client_id", "date", "status", "subtotal", "tax_total", "total",
        ])?;

        for entry in invoices {
            let invoice = &entry.invoice;
            writer.write_record([
                invoice.id.to_string(),
                entry.document_code.clone(),
                invoice.kind.as_str().to_string(),
                invoice
                    .client_id
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
                invoice.date.clone(),
                invoice.status.as_str().to_string(),
                format!("{:.2}", invoice.subtotal),
                format!("{:.2}", invoice.tax_total),
                format!("{:.2}", invoice.total),
            ])?;
        }

        let bytes = writer.into_inner()?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Write a journal CSV report to a file for sharing
    pub fn journal_csv_to_path(&self, entries: &[JournalEntry], path: &Path) -> Result<()> {
        let csv = self.journal_csv(entries)?;
        std::fs::write(path, csv)?;
        info!("Exported {} journal entries to {}", entries.len(), path.display());
        Ok(())
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Display form of a stored RFC 3339 date; falls back to the raw text when
/// the column holds something else (e.g. a CURRENT_TIMESTAMP default).
fn format_display_date(date: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(date)
        .map(|parsed| parsed.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}
