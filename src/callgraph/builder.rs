//! Build the baseline call graph from trace stat records.
//!
//! Every record is kept; pruning happens later on copies. The result is the
//! only graph that is ever persisted or reused for analysis.

use super::graph::CallGraph;
use crate::parser::schema::{CallMetrics, CallStat};
use crate::utils::error::GraphError;
use log::debug;
use std::collections::HashMap;

/// Build a call graph from stat records
///
/// **Public** - main entry point for graph construction
///
/// One node per resolved key carrying the record's own metrics, and one edge
/// per caller -> callee pair carrying the call's metrics. Repeated calls to
/// the same callee key within a record add up on that one edge. Callees never
/// seen as a record of their own get zeroed metrics. Single pass over the
/// input.
///
/// # Errors
/// * `GraphError::InvalidMetric` - A time is negative, NaN or infinite
/// * `GraphError::KeyCollision` - Two stat records resolve to the same key
///   but disagree on its metrics
pub fn build_graph(stats: &[CallStat]) -> Result<CallGraph, GraphError> {
    debug!("Building call graph from {} stat records", stats.len());

    let mut graph = CallGraph::new();
    let mut recorded: HashMap<String, &CallStat> = HashMap::with_capacity(stats.len());

    for stat in stats {
        let caller_key = stat.code.key();
        let metrics = checked(&caller_key, stat.metrics())?;

        if let Some(previous) = recorded.get(caller_key.as_str()) {
            if previous.metrics() != metrics || previous.calls != stat.calls {
                return Err(GraphError::KeyCollision(caller_key));
            }
            debug!("Skipping repeated stat record for `{}`", caller_key);
            continue;
        }
        recorded.insert(caller_key.clone(), stat);
        graph.insert_node(&caller_key, metrics);

        for call in &stat.calls {
            let callee_key = call.code.key();
            let call_metrics = checked(
                &format!("{} -> {}", caller_key, callee_key),
                call.metrics(),
            )?;
            graph.accumulate_edge(&caller_key, &callee_key, call_metrics);
        }
    }

    debug!(
        "Built call graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}

/// Reject negative or non-finite times
pub(crate) fn checked(key: &str, metrics: CallMetrics) -> Result<CallMetrics, GraphError> {
    for (metric, value) in [
        ("inlinetime", metrics.inlinetime),
        ("totaltime", metrics.totaltime),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(GraphError::InvalidMetric {
                key: key.to_string(),
                metric,
                value,
            });
        }
    }
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::CallRecord;
    use crate::parser::symbol::FrameIdentity;

    fn record(name: &str, totaltime: f64) -> CallRecord {
        CallRecord {
            code: FrameIdentity::Builtin(name.to_string()),
            callcount: 1,
            reccallcount: 0,
            inlinetime: totaltime,
            totaltime,
        }
    }

    fn stat(name: &str, totaltime: f64, calls: Vec<CallRecord>) -> CallStat {
        CallStat {
            code: FrameIdentity::Builtin(name.to_string()),
            callcount: 1,
            reccallcount: 0,
            inlinetime: totaltime / 2.0,
            totaltime,
            calls,
        }
    }

    #[test]
    fn test_every_callee_becomes_a_node() {
        let stats = vec![stat("main", 2.0, vec![record("helper", 1.0), record("len", 0.5)])];
        let graph = build_graph(&stats).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert!(graph.has_edge("main", "helper"));
        assert_eq!(graph.metrics("len").unwrap().totaltime, 0.0);
        assert_eq!(graph.edge("main", "len").unwrap().weight(), 0.5);
    }

    #[test]
    fn test_late_record_fills_in_callee_metrics() {
        let stats = vec![
            stat("main", 2.0, vec![record("helper", 1.0)]),
            stat("helper", 1.0, vec![]),
        ];
        let graph = build_graph(&stats).unwrap();

        assert_eq!(graph.metrics("helper").unwrap().totaltime, 1.0);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_negative_time_rejected() {
        let stats = vec![stat("main", -1.0, vec![])];
        let err = build_graph(&stats).unwrap_err();

        assert!(matches!(
            err,
            GraphError::InvalidMetric { metric: "inlinetime", .. }
        ));
    }

    #[test]
    fn test_non_finite_call_time_rejected() {
        let stats = vec![stat("main", 1.0, vec![record("loop", f64::INFINITY)])];
        assert!(build_graph(&stats).is_err());
    }

    #[test]
    fn test_repeated_callee_adds_up_on_one_edge() {
        let stats = vec![stat(
            "main",
            10.0,
            vec![record("<genexpr>", 7.0), record("<genexpr>", 2.0)],
        )];
        let graph = build_graph(&stats).unwrap();

        let edge = graph.edge("main", "<genexpr>").unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(edge.metrics.callcount, 2);
        assert_eq!(edge.metrics.inlinetime, 9.0);
        assert_eq!(edge.weight(), 9.0);
    }

    #[test]
    fn test_conflicting_records_for_one_key_rejected() {
        let stats = vec![
            stat("main", 10.0, vec![record("<genexpr>", 7.0)]),
            stat("<genexpr>", 7.0, vec![]),
            stat("<genexpr>", 2.0, vec![]),
        ];

        assert_eq!(
            build_graph(&stats).unwrap_err(),
            GraphError::KeyCollision("<genexpr>".to_string())
        );
    }

    #[test]
    fn test_identical_repeated_record_kept_once() {
        let stats = vec![
            stat("main", 2.0, vec![record("helper", 1.0)]),
            stat("main", 2.0, vec![record("helper", 1.0)]),
        ];
        let graph = build_graph(&stats).unwrap();

        assert_eq!(graph.metrics("main").unwrap().totaltime, 2.0);
        assert_eq!(graph.edge("main", "helper").unwrap().metrics.callcount, 1);
    }

    #[test]
    fn test_empty_trace_builds_empty_graph() {
        let graph = build_graph(&[]).unwrap();
        assert!(graph.is_empty());
    }
}
