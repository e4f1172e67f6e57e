//! `dump`: print the decoded search API bodies of a capture for inspection.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use mkrsbnb_har::HarReader;

pub(crate) fn run(path: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let reader =
        HarReader::new(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    let responses = reader.dump_responses()?;
    tracing::debug!(responses = responses.len(), "dumping search API responses");

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &responses)?;
    writeln!(stdout)?;
    Ok(())
}
