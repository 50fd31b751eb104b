// Rust guideline compliant 2026-10-12

//! Bounded-parallel execution of named section tasks.
//!
//! Every task runs to completion even when a sibling fails. Outputs are
//! returned only when all tasks succeed; otherwise the failure of the
//! earliest-declared failing task is returned, wrapped with its name.

use crate::error::{AppError, Result};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, warn};

/// Number of sections fetched at the same time.
pub const DEFAULT_SECTION_CONCURRENCY: usize = 3;

type TaskFn<'a, T> = Box<dyn FnOnce() -> Result<T> + Send + 'a>;

/// A named unit of work producing one part of a snapshot.
pub struct SectionTask<'a, T> {
    name: String,
    run: TaskFn<'a, T>,
}

impl<'a, T> SectionTask<'a, T> {
    /// Creates a task.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in logs and to wrap the task's error
    /// * `run` - Work to perform; it owns the output fields it returns
    pub fn new(name: impl Into<String>, run: impl FnOnce() -> Result<T> + Send + 'a) -> Self {
        Self {
            name: name.into(),
            run: Box::new(run),
        }
    }

    /// Returns the task label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> std::fmt::Debug for SectionTask<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionTask")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Runs section tasks with at most `limit` of them in flight.
///
/// # Arguments
///
/// * `tasks` - Tasks in declaration order
/// * `limit` - Maximum number of concurrently running tasks; 0 is treated as 1
///
/// # Returns
///
/// Task outputs in declaration order.
///
/// # Errors
///
/// Returns `AppError::Section` for the earliest-declared failing task after
/// all tasks have finished, or `AppError::Internal` if the worker pool cannot
/// be created.
pub fn run_sections<T: Send>(tasks: Vec<SectionTask<'_, T>>, limit: usize) -> Result<Vec<T>> {
    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    let threads = limit.max(1).min(tasks.len());
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|idx| format!("ascx-section-{}", idx))
        .build()
        .map_err(|e| AppError::Internal(format!("failed to start section workers: {}", e)))?;

    let results: Vec<(String, Result<T>)> = pool.install(|| {
        tasks
            .into_par_iter()
            .map(|task| {
                debug!(section = %task.name, "section started");
                let outcome = (task.run)();
                match &outcome {
                    Ok(_) => debug!(section = %task.name, "section finished"),
                    Err(err) => warn!(section = %task.name, error = %err, "section failed"),
                }
                (task.name, outcome)
            })
            .collect()
    });

    let mut outputs = Vec::with_capacity(results.len());
    for (name, outcome) in results {
        match outcome {
            Ok(output) => outputs.push(output),
            Err(source) => {
                return Err(AppError::Section {
                    name,
                    source: Box::new(source),
                })
            }
        }
    }
    Ok(outputs)
}
