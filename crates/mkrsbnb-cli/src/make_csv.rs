//! `make-csv`: capture file in, listing table out.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use mkrsbnb_core::app_config::STDOUT_DESTINATION;
use mkrsbnb_core::{AppConfig, ListingRecord};
use mkrsbnb_har::{
    aggregate_listings, extract_from_response_body, into_records, write_csv, HarError, HarReader,
    PipelineOptions,
};

#[derive(Debug)]
pub(crate) struct MakeCsvArgs {
    pub file: PathBuf,
    pub csv_file: Option<String>,
    pub keep_no_review: bool,
    pub response: bool,
}

pub(crate) fn run(config: &AppConfig, args: &MakeCsvArgs) -> anyhow::Result<()> {
    let output = args.csv_file.as_deref().unwrap_or(&config.output);
    let options = PipelineOptions {
        reject_no_review: config.reject_no_review && !args.keep_no_review,
    };

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let records = if args.response {
        extract_from_response_body(&text, options)
            .with_context(|| format!("failed to extract listings from {}", args.file.display()))?
    } else {
        records_from_har(&text, &args.file, options)?
    };

    write_output(output, &records)?;
    tracing::info!(rows = records.len(), output, "wrote listing table");
    Ok(())
}

fn records_from_har(
    text: &str,
    path: &Path,
    options: PipelineOptions,
) -> anyhow::Result<Vec<ListingRecord>> {
    let reader =
        HarReader::new(text).with_context(|| format!("failed to parse {}", path.display()))?;

    match reader.datetime() {
        Ok(captured_at) => tracing::info!(
            %captured_at,
            search_entries = reader.entries().count(),
            total_entries = reader.total_entries(),
            "reading capture"
        ),
        Err(HarError::NoSearchEntries) => {
            tracing::warn!(path = %path.display(), "capture contains no search API entries");
        }
        Err(e) => tracing::warn!(error = %e, "capture timestamp unavailable"),
    }

    let envelopes = reader
        .search_results()
        .with_context(|| format!("failed to read search results from {}", path.display()))?;
    let listings = aggregate_listings(envelopes, options);
    Ok(into_records(listings)?)
}

fn write_output(destination: &str, records: &[ListingRecord]) -> anyhow::Result<()> {
    if destination == STDOUT_DESTINATION {
        write_csv(io::stdout().lock(), records)?;
    } else {
        let file =
            File::create(destination).with_context(|| format!("failed to create {destination}"))?;
        write_csv(BufWriter::new(file), records)?;
    }
    Ok(())
}
