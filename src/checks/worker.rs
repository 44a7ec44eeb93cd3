use anyhow::Result;

use crate::app::AppContext;
use crate::report::CheckReport;
use crate::worker::{WorkerRegistry, SEARCH_CONTEXTS, SIMPLE_WORKER};

/// Worker-resolution smoke test. The backend once resolved its mock worker
/// from the app root but not from the backend tree; this check requires the
/// worker to resolve identically from every search context and then invokes
/// it with the canonical sample inputs.
pub async fn run(_ctx: &AppContext) -> Result<CheckReport> {
    let mut report = CheckReport::new(super::WORKER_CHECK);
    let registry = WorkerRegistry::with_mock_worker();

    let mut resolved = Vec::new();
    for context in SEARCH_CONTEXTS {
        match registry.resolve(context, SIMPLE_WORKER) {
            Some(worker) => {
                report.pass(
                    format!("resolve from {context}"),
                    format!("{SIMPLE_WORKER} reachable"),
                );
                resolved.push(worker);
            }
            None => {
                report.fail(
                    format!("resolve from {context}"),
                    format!("{SIMPLE_WORKER} not registered in this context"),
                );
            }
        }
    }

    let Some((first, rest)) = resolved.split_first() else {
        return Ok(report);
    };

    for (filename, file_id) in [("test_file.jpg", 123_i64), ("test_video.mp4", 456)] {
        let verdict = first(filename, file_id);
        if rest
            .iter()
            .all(|worker| worker(filename, file_id) == verdict)
        {
            report.pass(
                format!("invoke {filename}"),
                format!(
                    "deepfake={} confidence={:.3}, identical across contexts",
                    verdict.is_deepfake, verdict.confidence
                ),
            );
        } else {
            report.fail(
                format!("invoke {filename}"),
                "contexts resolved to workers with diverging verdicts",
            );
        }
    }

    Ok(report)
}
