/// Time-bounded simplification
///
/// Runs one simplification attempt on its own worker thread and races the
/// result against a wall-clock deadline. The simplification primitives have
/// no cancellation hook, so a worker that misses the deadline is abandoned:
/// it keeps running until it finishes on its own and its result is
/// discarded. The channel keeps a buffered capacity of 1 so the orphaned
/// worker's send never blocks forever.
use crate::config::types::*;
use crate::formula::ast::{Formula, Query};
use crate::formula::simplify::{bdd_fireability_simplify, simplify};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

/// Process-wide count of abandoned simplification workers.
///
/// The leak is accepted (one sequential driver, at most one in-flight
/// orphan per query) but kept observable.
static ORPHANED_WORKERS: AtomicU64 = AtomicU64::new(0);

/// Number of simplification workers abandoned so far in this process.
pub fn orphaned_worker_count() -> u64 {
    ORPHANED_WORKERS.load(Ordering::Relaxed)
}

/// Race a unit of work against a wall-clock deadline.
///
/// Returns `Some(result)` if the work finishes in time, `None` if the
/// deadline elapses first. A zero deadline never runs the race: the work is
/// not observed even if it would complete instantly (deadline-first
/// semantics). The worker itself is detached either way.
pub fn run_with_deadline<T, F>(work: F, deadline: Duration) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        // The receiver may already be gone; the buffered slot makes this
        // send succeed regardless, so the thread can exit.
        let _ = tx.send(work());
    });

    if deadline.is_zero() {
        ORPHANED_WORKERS.fetch_add(1, Ordering::Relaxed);
        return None;
    }

    match rx.recv_timeout(deadline) {
        Ok(value) => Some(value),
        Err(_) => {
            ORPHANED_WORKERS.fetch_add(1, Ordering::Relaxed);
            log::warn!(
                "simplification missed its {:?} deadline; worker abandoned ({} so far)",
                deadline,
                orphaned_worker_count()
            );
            None
        }
    }
}

/// Simplify a query within the configured deadline.
///
/// Fireability queries go through the decision-diagram-backed simplifier,
/// everything else through the generic rewrite. On timeout the original
/// query comes back unchanged. A simplification error is handled per
/// `config.simplify_errors`; the non-fatal policies keep the original
/// formula. The polarity flag always survives untouched.
pub fn simplify_with_deadline(
    query: Query,
    category: Category,
    config: &ClassifierConfig,
) -> Result<Query> {
    let formula = query.formula.clone();
    let work = move || -> Result<Formula> {
        match category {
            Category::ReachabilityFireability => bdd_fireability_simplify(formula),
            Category::ReachabilityCardinality => Ok(simplify(formula)),
        }
    };

    match run_with_deadline(work, config.deadline) {
        None => Ok(query),
        Some(Ok(formula)) => Ok(Query { formula, ..query }),
        Some(Err(err)) => match config.simplify_errors {
            SimplifyErrorPolicy::Ignore => Ok(query),
            SimplifyErrorPolicy::Warn => {
                log::warn!("simplification of query {:?} failed: {}", query.id, err);
                Ok(query)
            }
            SimplifyErrorPolicy::Fail => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::ast::Expr;

    fn query(formula: Formula) -> Query {
        Query {
            id: "q".to_string(),
            formula,
            is_ef: true,
        }
    }

    fn config(deadline: Duration) -> ClassifierConfig {
        ClassifierConfig {
            enable_simplification: true,
            deadline,
            simplify_errors: SimplifyErrorPolicy::Warn,
        }
    }

    #[test]
    fn test_zero_deadline_returns_none_even_for_blocked_work() {
        // A worker that never completes must not be observed
        let result = run_with_deadline(
            || {
                thread::sleep(Duration::from_secs(3600));
                42
            },
            Duration::ZERO,
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_instant_work_beats_generous_deadline() {
        let result = run_with_deadline(|| 42, Duration::from_secs(30));
        assert_eq!(result, Some(42));
    }

    #[test]
    fn test_slow_work_misses_short_deadline() {
        let before = orphaned_worker_count();
        let result = run_with_deadline(
            || {
                thread::sleep(Duration::from_secs(5));
                42
            },
            Duration::from_millis(10),
        );
        assert_eq!(result, None);
        assert!(orphaned_worker_count() > before);
    }

    #[test]
    fn test_timeout_keeps_original_query() {
        let original = query(Formula::And(vec![
            Formula::Constant(true),
            Formula::Constant(true),
        ]));
        let out =
            simplify_with_deadline(original.clone(), Category::ReachabilityCardinality, &config(Duration::ZERO))
                .unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn test_simplified_result_preserves_polarity() {
        let original = Query {
            id: "q".to_string(),
            formula: Formula::Not(Box::new(Formula::Constant(false))),
            is_ef: false,
        };
        let out = simplify_with_deadline(
            original,
            Category::ReachabilityCardinality,
            &config(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(out.formula, Formula::Constant(true));
        assert!(!out.is_ef);
    }

    #[test]
    fn test_fireability_branch_uses_specialized_simplifier() {
        let original = query(Formula::IsFireable(vec![
            "t1".to_string(),
            "t1".to_string(),
        ]));
        let out = simplify_with_deadline(
            original,
            Category::ReachabilityFireability,
            &config(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(out.formula, Formula::IsFireable(vec!["t1".to_string()]));
    }

    #[test]
    fn test_simplify_error_keeps_original_under_warn_policy() {
        let original = query(Formula::IsFireable(vec!["".to_string()]));
        let out = simplify_with_deadline(
            original.clone(),
            Category::ReachabilityFireability,
            &config(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn test_simplify_error_surfaces_under_fail_policy() {
        let mut cfg = config(Duration::from_secs(5));
        cfg.simplify_errors = SimplifyErrorPolicy::Fail;
        let original = query(Formula::IsFireable(vec!["".to_string()]));
        let result =
            simplify_with_deadline(original, Category::ReachabilityFireability, &cfg);
        assert!(matches!(result, Err(ReportError::Simplify(_))));
    }

    #[test]
    fn test_cardinality_comparison_folds_under_deadline() {
        let original = query(Formula::LessThanEq(Expr::Constant(1), Expr::Constant(2)));
        let out = simplify_with_deadline(
            original,
            Category::ReachabilityCardinality,
            &config(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(out.formula, Formula::Constant(true));
    }
}
