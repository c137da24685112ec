//! Import command - drain the mailbox and publish invoice points.

use clap::Args;
use console::style;
use tracing::info;

use wattbill_core::{
    Config, ElectroholdParser, InfluxWriter, InvoiceParser, MailboxScanner, PdfText, Point,
    ScanMode, TlsImapSession, WebdavUploader,
};

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Stop after the first message that yields a valid PDF
    #[arg(long)]
    first_bill: bool,
}

pub fn run(args: ImportArgs) -> anyhow::Result<()> {
    let config = Config::load()?;

    let mode = if args.first_bill {
        ScanMode::FirstBill
    } else {
        ScanMode::AllBills
    };

    // The mailbox session lives only as long as the scan; upload and
    // publishing happen after it is released.
    let mut session = TlsImapSession::connect(&config.imap)?;
    let bills = MailboxScanner::new(&mut session, &config.imap.destination_folder, mode).scan()?;
    session.logout();

    if bills.is_empty() {
        println!("No new invoice found.");
        return Ok(());
    }

    let uploader = WebdavUploader::new(&config.nextcloud);
    let writer = InfluxWriter::new(&config.influx);
    let parser = ElectroholdParser::new();

    for pdf in &bills {
        info!(filename = pdf.filename(), "processing invoice");

        uploader.upload(pdf)?;

        let text = PdfText::load(pdf)?.extract_text()?;
        let record = parser.parse(&text)?;

        writer.write(&config.influx.bucket, &Point::from_record(&record))?;

        println!(
            "{} {} ({} - {}, {} kWh, {} BGN)",
            style("✓").green(),
            pdf.filename(),
            record.start_date,
            record.end_date,
            record.total_kwh,
            record.total_cost_bgn
        );
    }

    Ok(())
}
