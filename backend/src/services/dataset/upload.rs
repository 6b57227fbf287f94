use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::jobs::JobStatus;
use futures_util::StreamExt;
use log::info;
use regex::Regex;
use std::time::Instant;
use uuid::Uuid;

use crate::config;
use crate::job_controller::state::{DatasetState, JobUpdate, JobsState};
use crate::services::dataset::extract::Dataset;

/// Validate each CSV header cell.
/// - `header_str` is the raw header line (without trailing CR/LF).
/// - `header_re` is the precompiled regex used to validate each cell.
fn validate_header_cells(
    header_str: &str,
    delimiter: char,
    header_re: &Regex,
) -> Result<(), Box<dyn std::error::Error>> {
    for cell in header_str.split(delimiter) {
        let mut f = cell.trim();
        // remove surrounding quotes if any
        if f.starts_with('"') && f.ends_with('"') && f.len() >= 2 {
            f = &f[1..f.len() - 1];
        }
        if f.is_empty() {
            return Err("CSV header cells must not be empty".into());
        }
        if !header_re.is_match(f) {
            return Err("CSV header cells must contain only text (letters, digits, spaces, '-', '_', '/')".into());
        }
    }
    Ok(())
}

/// Picks the delimiter that occurs most often in the header line.
pub fn detect_delimiter(header_line: &str) -> char {
    [',', ';', '\t', '|']
        .iter()
        .max_by_key(|&&d| header_line.matches(d).count())
        .copied()
        .unwrap_or(',')
}

/// HTTP handler wrapper that converts the internal result to an
/// `HttpResponse`.
///
/// - On success: returns `200 OK` with the ingest job id as body.
/// - On failure: returns `400 Bad Request` with the error message.
pub async fn process(
    payload: Multipart,
    jobs_state: web::Data<JobsState>,
    dataset_state: web::Data<DatasetState>,
) -> impl Responder {
    match upload_dataset(payload, jobs_state, dataset_state).await {
        Ok(job_id) => HttpResponse::Ok().body(job_id),
        Err(e) => HttpResponse::BadRequest().body(format!("Error: {}", e)),
    }
}

/// Receives a multipart CSV upload (field `file`), validates its header
/// line, and schedules the background ingest job. Returns the job id the
/// client polls.
async fn upload_dataset(
    mut payload: Multipart,
    jobs_state: web::Data<JobsState>,
    dataset_state: web::Data<DatasetState>,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut file_bytes: Vec<u8> = Vec::new();
    let mut uploaded_name = String::new();
    let mut file_seen = false;
    let mut header_validated = false;

    // Letters, marks, digits, spaces, hyphen, underscore, slash.
    let header_re = Regex::new(r"^[\p{L}\p{M}\p{N}\s\-_/]+$")
        .map_err(|e| format!("Regex error: {}", e))?;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if field_name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !filename.to_lowercase().ends_with(".csv") {
            return Err("The file must end with .csv".into());
        }
        uploaded_name = filename;
        file_seen = true;

        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            file_bytes.extend_from_slice(&chunk);

            if !header_validated {
                if let Some(pos) = file_bytes.iter().position(|&b| b == b'\n') {
                    let mut header_line = file_bytes[..pos].to_vec();
                    if header_line.ends_with(&[b'\r']) {
                        header_line.pop();
                    }
                    let header_str = String::from_utf8(header_line)
                        .map_err(|_| "Header is not valid UTF-8")?;
                    let delimiter = detect_delimiter(&header_str);
                    validate_header_cells(&header_str, delimiter, &header_re)?;
                    header_validated = true;
                }
            }
        }
    }

    if !file_seen {
        return Err("Missing file".into());
    }
    if !header_validated {
        // Single-line upload without a trailing newline: the whole buffer
        // is the header.
        let header_str =
            String::from_utf8(file_bytes.clone()).map_err(|_| "Header is not valid UTF-8")?;
        let header_str = header_str.trim_end_matches(['\n', '\r']);
        let delimiter = detect_delimiter(header_str);
        validate_header_cells(header_str, delimiter, &header_re)?;
    }

    info!(
        "Scheduling ingest for {} ({:.1} MB)",
        uploaded_name,
        file_bytes.len() as f64 / 1e6
    );
    Ok(schedule_ingest_job(jobs_state, dataset_state, file_bytes).await)
}

/// Registers the job as `Pending` and spawns the blocking ingest on the
/// dedicated thread pool. The job outcome lands in the shared jobs map;
/// the dataset is swapped into place only on success.
async fn schedule_ingest_job(
    jobs_state: web::Data<JobsState>,
    dataset_state: web::Data<DatasetState>,
    bytes: Vec<u8>,
) -> String {
    let job_id = Uuid::new_v4().to_string();
    jobs_state
        .jobs
        .write()
        .await
        .insert(job_id.clone(), JobStatus::Pending);

    let tx = jobs_state.tx.clone();
    let js = jobs_state.clone();
    let store = dataset_state.dataset.clone();
    let value = job_id.clone();

    tokio::spawn(async move {
        let tx_block = tx.clone();
        let value_for_blocking = value.clone();

        let handle =
            tokio::task::spawn_blocking(move || ingest_blocking(tx_block, value_for_blocking, bytes));

        match handle.await {
            Ok(Ok(dataset)) => {
                let message = format!(
                    "Loaded {} rows across {} columns",
                    dataset.rows.len(),
                    dataset.headers.len()
                );
                *store.write().await = Some(dataset);
                js.jobs
                    .write()
                    .await
                    .insert(value, JobStatus::Completed(message));
            }
            Ok(Err(e)) => {
                js.jobs.write().await.insert(value, JobStatus::Failed(e));
            }
            Err(join_err) => {
                js.jobs.write().await.insert(
                    value,
                    JobStatus::Failed(format!("join error: {}", join_err)),
                );
            }
        }
    });

    job_id
}

/// Parses the buffered CSV and builds the dataset, reporting row progress
/// through the job channel. Runs on the blocking pool.
fn ingest_blocking(
    tx: tokio::sync::mpsc::Sender<JobUpdate>,
    job_id: String,
    bytes: Vec<u8>,
) -> Result<Dataset, String> {
    let start = Instant::now();

    let header_end = bytes
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(bytes.len());
    let header_line = String::from_utf8_lossy(&bytes[..header_end]);
    let delimiter = detect_delimiter(header_line.trim_end_matches(['\n', '\r']));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        rows.push(record.iter().map(|c| c.to_string()).collect());

        if rows.len() % config::INGEST_PROGRESS_EVERY == 0 {
            let _ = tx.blocking_send(JobUpdate::new(
                job_id.clone(),
                JobStatus::InProgress(rows.len() as u32),
            ));
        }
    }

    if rows.is_empty() {
        return Err("File is empty or invalid".to_string());
    }

    let dataset = Dataset::new(headers, rows);
    info!(
        "ingest finished in {:.2?}: {} rows, {} catalogs",
        start.elapsed(),
        dataset.rows.len(),
        dataset.catalogs.len()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_detection_prefers_most_frequent() {
        assert_eq!(detect_delimiter("a,b,c"), ',');
        assert_eq!(detect_delimiter("a;b;c"), ';');
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
        assert_eq!(detect_delimiter("one column"), ',');
    }

    #[test]
    fn header_cells_reject_symbols_and_blanks() {
        let re = Regex::new(r"^[\p{L}\p{M}\p{N}\s\-_/]+$").unwrap();
        assert!(validate_header_cells("Region,OEM_Name,Year", ',', &re).is_ok());
        assert!(validate_header_cells("Region,,Year", ',', &re).is_err());
        assert!(validate_header_cells("Region,Reve$nue", ',', &re).is_err());
        assert!(validate_header_cells("\"Business Head\",Partner", ',', &re).is_ok());
    }
}
