use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::line_splitter::LineSplitter;
use super::progress::{CursorGuard, ImportProgress, MessageKind};
use super::record_parser::parse_offer_line;
use crate::domain::models::OfferRecord;

/// Read granularity of the import loop.
const CHUNK_SIZE: usize = 16 * 1024;

/// Average serialized row length, used to estimate the row total from the
/// file size before any row has been read.
const AVG_ROW_BYTES: u64 = 400;

/// Persistence boundary of the pipeline. The orchestrator sees nothing of
/// the sink beyond per-record success or failure.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn persist(&self, record: OfferRecord) -> anyhow::Result<()>;
}

/// Failures that abort the stream. Per-row parse failures never appear
/// here; they are recovered inside the read loop.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{0}")]
    Read(#[from] std::io::Error),
    #[error("{0}")]
    Persist(anyhow::Error),
}

/// Final tally of one import run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Rows read from the file, malformed ones included.
    pub rows: u64,
    /// Rows that reached the sink.
    pub persisted: u64,
}

/// Bulk-import command: streams a tab-separated offers file into the sink,
/// reporting progress to the terminal as it goes.
pub struct ImportCommand {
    sink: Arc<dyn RecordSink>,
}

impl ImportCommand {
    pub fn new(sink: Arc<dyn RecordSink>) -> Self {
        Self { sink }
    }

    /// Run the import against `filename`.
    ///
    /// An empty path prints the usage hint and an unopenable path prints
    /// an error; neither is fatal to the process. The cursor is hidden
    /// for the duration of the read and restored on every exit path.
    pub async fn execute(&self, filename: &str) {
        let path = filename.trim();
        if path.is_empty() {
            println!("after `import` specify a path to the offers file");
            println!("example: staylist import ./mocks/offers.tsv");
            return;
        }

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(_) => {
                println!("Can't open file: {path}");
                return;
            }
        };
        let total_bytes = match file.metadata().await {
            Ok(metadata) => metadata.len(),
            Err(err) => {
                println!("Failed to import data from the file: \"{err}\"");
                return;
            }
        };

        println!("Importing offers from {path}");
        let _cursor = CursorGuard::hide();
        let mut progress = ImportProgress::new(total_bytes, estimate_rows(total_bytes));

        match run_import(file, self.sink.as_ref(), &mut progress).await {
            Ok(outcome) => {
                println!("{} rows imported.", outcome.persisted);
            }
            Err(err) => {
                println!("Failed to import data from the file: \"{err}\"");
            }
        }
    }
}

/// Row total estimate for the progress bar: file size over the average
/// row length, never zero.
fn estimate_rows(total_bytes: u64) -> u64 {
    (total_bytes / AVG_ROW_BYTES).max(1)
}

/// The read loop: chunks from `reader` flow through the line splitter and
/// the record parser into the sink, with byte and row counters advancing
/// synchronously. Malformed rows are counted and skipped; read and sink
/// failures abort.
async fn run_import<R>(
    mut reader: R,
    sink: &dyn RecordSink,
    progress: &mut ImportProgress,
) -> Result<ImportOutcome, ImportError>
where
    R: AsyncRead + Unpin,
{
    let mut splitter = LineSplitter::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut outcome = ImportOutcome::default();
    let mut bytes_loaded: u64 = 0;

    loop {
        let read = reader.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        bytes_loaded += read as u64;
        progress.update_bytes(bytes_loaded);

        for line in splitter.feed(&buffer[..read]) {
            process_line(&line, sink, progress, &mut outcome).await?;
        }
    }

    if let Some(tail) = splitter.finish() {
        process_line(&tail, sink, progress, &mut outcome).await?;
    }

    Ok(outcome)
}

async fn process_line(
    line: &str,
    sink: &dyn RecordSink,
    progress: &mut ImportProgress,
    outcome: &mut ImportOutcome,
) -> Result<(), ImportError> {
    outcome.rows += 1;
    match parse_offer_line(line) {
        Ok(record) => {
            sink.persist(record).await.map_err(ImportError::Persist)?;
            outcome.persisted += 1;
        }
        Err(err) => {
            progress.set_message(MessageKind::Warn, format!("row {} skipped: {err}", outcome.rows));
        }
    }
    progress.update_rows(outcome.rows);
    Ok(())
}
