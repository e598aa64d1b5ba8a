use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use apkrecon_reconcile::{ProcessError, ProcessRequest, Reconciler};
use nu_ansi_term::Color::{Green, Red, Yellow};
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    error::{CliResult, ErrorContext},
    utils::Colored,
};

/// Runs every request through the reconciler with a callback that only checks
/// the key can be turned into a fetchable URL.
pub async fn reconcile_requests(
    reconciler: &Reconciler,
    input: Option<&Path>,
    json: bool,
) -> CliResult<()> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => {
            Box::new(BufReader::new(File::open(path).with_context(|| {
                format!("opening {}", path.display())
            })?))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut failed = 0usize;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| "reading requests".to_string())?;
        if line.trim().is_empty() {
            continue;
        }

        let request: ProcessRequest = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(err) => {
                warn!("Skipping line {}: {err}", lineno + 1);
                continue;
            }
        };

        let result = reconciler
            .process((), &request, |_, key| {
                async move {
                    key.url()
                        .map(|_| ())
                        .map_err(|err| ProcessError::non_retriable(err.to_string()))
                }
            })
            .await;

        match result {
            Ok(response) => {
                if json {
                    println!(
                        "{}",
                        json!({ "key": request.key, "response": response })
                    );
                } else if response.is_requeue() {
                    info!(
                        "{} {} (requeue after {}s)",
                        Colored(Yellow, "↻"),
                        request.key,
                        response.requeue_after_seconds
                    );
                } else {
                    info!("{} {}", Colored(Green, "✓"), request.key);
                }
            }
            Err(err) => {
                failed += 1;
                if json {
                    println!("{}", json!({ "key": request.key, "error": err.to_string() }));
                } else {
                    error!("{} {}", Colored(Red, "✗"), err);
                }
            }
        }
    }

    if failed > 0 {
        warn!("{failed} request(s) failed and would be retried by the dispatcher");
    }

    Ok(())
}
