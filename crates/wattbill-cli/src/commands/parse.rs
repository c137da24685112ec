//! Parse command - extract a record from a local invoice PDF.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use wattbill_core::mail::{validate_attachment, Attachment, AttachmentPayload};
use wattbill_core::{ElectroholdParser, InvoiceParser, PdfText};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let data = fs::read(&args.input)?;
    let filename = args
        .input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("invoice.pdf")
        .to_string();

    // Local files go through the same validation gate as mail attachments.
    let attachment = Attachment {
        filename,
        content_type: "application/pdf".to_string(),
        payload: AttachmentPayload::Binary(data),
    };
    let pdf = validate_attachment(&attachment)
        .ok_or_else(|| anyhow::anyhow!("{} is not a valid PDF", args.input.display()))?;

    let text = PdfText::load(&pdf)?.extract_text()?;
    let record = ElectroholdParser::new().parse(&text)?;

    let json = serde_json::to_string_pretty(&record)?;
    if let Some(path) = &args.output {
        fs::write(path, &json)?;
        println!(
            "{} Record written to {}",
            style("✓").green(),
            path.display()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}
