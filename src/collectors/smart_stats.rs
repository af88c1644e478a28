use super::arcconf::{Arcconf, ToolRunner};
use crate::models::smart::{AttributeReading, ControllerId, ControllerReport, DriveReport};
use roxmltree::{Document, Node};
use thiserror::Error;

const OPEN_MARKER:  &str = "<SmartStats";
const CLOSE_MARKER: &str = "</SmartStats>";

const DRIVE_TAG:     &str = "PhysicalDriveSmartStats";
const ATTRIBUTE_TAG: &str = "Attribute";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no <SmartStats> block in output")]
    NoStats,
    #[error("<SmartStats> block is never closed")]
    Unterminated,
    #[error(transparent)]
    Parse(#[from] roxmltree::Error),
}

impl ExtractError {
    /// Operator-facing message for a controller that produced this error.
    pub fn diagnostic(&self, controller: ControllerId) -> String {
        match self {
            ExtractError::NoStats      => format!("No SMART stats found for controller {}", controller),
            ExtractError::Unterminated => format!("Malformed XML for controller {}", controller),
            ExtractError::Parse(e)     => format!("Error parsing XML for controller {}: {}", controller, e),
        }
    }
}

/// Run `GETSMARTSTATS` for one controller and collect the drives with
/// failing attributes. Every failure mode ends up as a diagnostic on the
/// returned report rather than an error.
pub fn evaluate<R: ToolRunner>(tool: &Arcconf<R>, controller: ControllerId) -> ControllerReport {
    let output = match tool.get_smart_stats(controller) {
        Ok(text) => text,
        Err(e) => {
            let msg = format!("Could not read SMART stats for controller {}: {}", controller, e);
            log::warn!("{}", msg);
            return ControllerReport::unavailable(controller, msg);
        }
    };

    match extract_payload(&output).and_then(parse_payload) {
        Ok(drives) => {
            let report = ControllerReport::checked(controller, drives);
            log::info!(
                "controller {}: {} drive(s), {} failing attribute(s)",
                controller, report.drives.len(), report.failing_attribute_count()
            );
            report
        }
        Err(e) => {
            let msg = e.diagnostic(controller);
            log::warn!("{}", msg);
            ControllerReport::unavailable(controller, msg)
        }
    }
}

/// Slice the `<SmartStats ...>...</SmartStats>` block out of arcconf's
/// free-form output, markers included.
pub fn extract_payload(output: &str) -> Result<&str, ExtractError> {
    let start = output.find(OPEN_MARKER).ok_or(ExtractError::NoStats)?;
    let close = output[start..]
        .find(CLOSE_MARKER)
        .ok_or(ExtractError::Unterminated)?;
    let end = start + close + CLOSE_MARKER.len();
    Ok(&output[start..end])
}

/// Parse an isolated `<SmartStats>` document into reports for drives that
/// have at least one failing attribute, in document order.
pub fn parse_payload(xml: &str) -> Result<Vec<DriveReport>, ExtractError> {
    let doc = Document::parse(xml)?;

    let drives = doc
        .descendants()
        .filter(|n| n.has_tag_name(DRIVE_TAG))
        .filter_map(|drive| {
            let attributes: Vec<_> = drive
                .children()
                .filter(|n| n.has_tag_name(ATTRIBUTE_TAG))
                .filter_map(read_attribute)
                .filter_map(AttributeReading::into_failing)
                .collect();

            if attributes.is_empty() {
                return None;
            }
            Some(DriveReport {
                channel: drive.attribute("channel").map(str::to_string),
                id:      drive.attribute("id").map(str::to_string),
                attributes,
            })
        })
        .collect();

    Ok(drives)
}

/// Read one `<Attribute>` node. Entries without a numeric
/// `normalizedCurrent`/`threshold` pair yield None.
pub fn read_attribute(node: Node) -> Option<AttributeReading> {
    let code = node.attribute("id").unwrap_or_default();
    let normalized = parse_int(node.attribute("normalizedCurrent"));
    let threshold  = parse_int(node.attribute("threshold"));

    match (normalized, threshold) {
        (Some(normalized), Some(threshold)) => Some(AttributeReading {
            code: code.to_string(),
            normalized,
            threshold,
        }),
        _ => {
            log::trace!("skipping attribute {:?}: no usable value/threshold", code);
            None
        }
    }
}

fn parse_int(value: Option<&str>) -> Option<i64> {
    value?.trim().parse().ok()
}
