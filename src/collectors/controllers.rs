use super::arcconf::{Arcconf, ToolRunner};
use crate::models::smart::ControllerId;

const CONTROLLER_PREFIX: &str = "Controller #";

/// Run `arcconf GETVERSION` and list the controllers it reports.
/// A failed invocation is logged and treated as "no controllers".
pub fn enumerate_controllers<R: ToolRunner>(tool: &Arcconf<R>) -> Vec<ControllerId> {
    match tool.get_version() {
        Ok(text) => {
            let ids = parse_controller_ids(&text);
            log::info!("found {} controller(s)", ids.len());
            ids
        }
        Err(e) => {
            log::warn!("controller enumeration failed: {}", e);
            Vec::new()
        }
    }
}

/// Pull controller numbers out of `GETVERSION` output.
///
/// Only lines that start with exactly `Controller #` followed by digits count.
/// Order is kept and repeats are not collapsed.
pub fn parse_controller_ids(text: &str) -> Vec<ControllerId> {
    text.lines().filter_map(parse_controller_line).collect()
}

fn parse_controller_line(line: &str) -> Option<ControllerId> {
    let rest = line.strip_prefix(CONTROLLER_PREFIX)?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    rest[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::arcconf::testing::CannedRunner;

    const GETVERSION: &str = "\
Controllers found: 2
Controller #1
==============
Firmware           : 5.2-0[18948]
Staged Firmware    : 5.2-0[18948]
BIOS               : 5.2-0[18948]
Driver             : 5.2-0 (18948)
Boot Flash         : 5.2-0[18948]

Controller #2
==============
Firmware           : 5.2-0[18948]

Command completed successfully.
";

    #[test]
    fn parses_inventory_in_order() {
        assert_eq!(parse_controller_ids(GETVERSION), vec![1, 2]);
    }

    #[test]
    fn prefix_must_be_exact_and_anchored() {
        assert_eq!(parse_controller_ids("Controller #3 info..."), vec![3]);
        assert!(parse_controller_ids("Controller#3").is_empty());
        assert!(parse_controller_ids("  Controller #3").is_empty());
        assert!(parse_controller_ids("controller #3").is_empty());
        assert!(parse_controller_ids("Controller # 3").is_empty());
        assert!(parse_controller_ids("Controller #").is_empty());
    }

    #[test]
    fn digits_stop_at_first_non_digit() {
        assert_eq!(parse_controller_ids("Controller #12: Adaptec 5805Z"), vec![12]);
        assert_eq!(parse_controller_ids("Controller #007"), vec![7]);
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(parse_controller_ids("Controller #1\nController #1\n"), vec![1, 1]);
    }

    #[test]
    fn overflowing_number_is_ignored() {
        assert!(parse_controller_ids("Controller #99999999999999999999").is_empty());
    }

    #[test]
    fn handles_crlf_output() {
        assert_eq!(parse_controller_ids("Controller #4\r\nController #5\r\n"), vec![4, 5]);
    }

    #[test]
    fn tool_failure_yields_no_controllers() {
        let tool = Arcconf::new("arcconf", CannedRunner::new());
        assert!(enumerate_controllers(&tool).is_empty());

        let tool = Arcconf::new("arcconf", CannedRunner::new().exit("GETVERSION", GETVERSION, Some(1)));
        assert!(enumerate_controllers(&tool).is_empty());
    }

    #[test]
    fn enumerates_through_tool() {
        let tool = Arcconf::new("arcconf", CannedRunner::new().ok("GETVERSION", GETVERSION));
        assert_eq!(enumerate_controllers(&tool), vec![1, 2]);
    }
}
