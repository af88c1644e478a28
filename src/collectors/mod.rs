pub mod arcconf;
pub mod controllers;
pub mod smart_stats;

use crate::models::smart::{ControllerId, ControllerReport};
use arcconf::{Arcconf, ToolRunner};

/// Audit each controller in turn. An empty `only` list means "ask arcconf
/// which controllers exist".
pub fn audit<R: ToolRunner>(tool: &Arcconf<R>, only: &[ControllerId]) -> Vec<ControllerReport> {
    let ids = if only.is_empty() {
        controllers::enumerate_controllers(tool)
    } else {
        only.to_vec()
    };

    ids.into_iter()
        .map(|id| smart_stats::evaluate(tool, id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcconf::testing::CannedRunner;

    const STATS_OK: &str = r#"<SmartStats><PhysicalDriveSmartStats channel="0" id="0"><Attribute id="0x05" normalizedCurrent="100" threshold="10"/></PhysicalDriveSmartStats></SmartStats>"#;
    const STATS_BAD: &str = r#"<SmartStats><PhysicalDriveSmartStats channel="0" id="3"><Attribute id="0x05" normalizedCurrent="5" threshold="10"/></PhysicalDriveSmartStats></SmartStats>"#;

    #[test]
    fn one_broken_controller_does_not_stop_the_rest() {
        let runner = CannedRunner::new()
            .ok("GETVERSION", "Controller #1\nController #2\nController #3\n")
            .ok("GETSMARTSTATS 1", STATS_BAD)
            .ok("GETSMARTSTATS 2", "<SmartStats><oops></SmartStats>")
            .ok("GETSMARTSTATS 3", STATS_OK);
        let tool = Arcconf::new("arcconf", runner);

        let reports = audit(&tool, &[]);
        assert_eq!(reports.iter().map(|r| r.controller).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(reports[0].drives.len(), 1);
        assert!(reports[1].diagnostic.is_some());
        assert!(reports[2].is_healthy() && reports[2].diagnostic.is_none());
    }

    #[test]
    fn explicit_controllers_skip_enumeration() {
        let runner = CannedRunner::new().ok("GETSMARTSTATS 7", STATS_OK);
        let tool = Arcconf::new("arcconf", runner);

        let reports = audit(&tool, &[7]);
        assert_eq!(reports.len(), 1);
        assert_eq!(tool_calls(&tool), vec!["GETSMARTSTATS 7"]);
    }

    #[test]
    fn each_controller_is_tried_once() {
        let runner = CannedRunner::new().ok("GETVERSION", "Controller #0\n");
        let tool = Arcconf::new("arcconf", runner);

        let reports = audit(&tool, &[]);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].diagnostic.is_some());
        assert_eq!(tool_calls(&tool), vec!["GETVERSION", "GETSMARTSTATS 0"]);
    }

    fn tool_calls(tool: &Arcconf<CannedRunner>) -> Vec<String> {
        tool.runner().calls.borrow().clone()
    }
}
