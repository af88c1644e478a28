use serde::Serialize;

use super::attributes;

/// RAID controller number as printed by `arcconf GETVERSION`.
pub type ControllerId = u32;

/// One `<Attribute>` row read from a drive's SMART stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeReading {
    pub code:       String,
    pub normalized: i64,
    pub threshold:  i64,
}

impl AttributeReading {
    /// A threshold of zero or below means the vendor enforces none.
    pub fn is_failing(&self) -> bool {
        self.threshold > 0 && self.normalized < self.threshold
    }

    /// Promote to a [`FailingAttribute`] when the reading violates its threshold.
    pub fn into_failing(self) -> Option<FailingAttribute> {
        if !self.is_failing() {
            return None;
        }
        Some(FailingAttribute {
            name:       attributes::describe(&self.code),
            id:         self.code,
            normalized: self.normalized,
            threshold:  self.threshold,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailingAttribute {
    pub id:         String,
    pub name:       &'static str,
    pub normalized: i64,
    pub threshold:  i64,
}

/// A physical drive with at least one failing attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriveReport {
    /// Channel and id are display-only, so they stay as arcconf printed them.
    pub channel:    Option<String>,
    pub id:         Option<String>,
    pub attributes: Vec<FailingAttribute>,
}

impl DriveReport {
    pub fn channel_label(&self) -> &str {
        self.channel.as_deref().unwrap_or("?")
    }

    pub fn id_label(&self) -> &str {
        self.id.as_deref().unwrap_or("?")
    }
}

/// Outcome of auditing one controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerReport {
    pub controller: ControllerId,
    /// Set when the controller produced no usable stats.
    pub diagnostic: Option<String>,
    pub drives:     Vec<DriveReport>,
}

impl ControllerReport {
    pub fn checked(controller: ControllerId, drives: Vec<DriveReport>) -> Self {
        Self { controller, diagnostic: None, drives }
    }

    pub fn unavailable(controller: ControllerId, diagnostic: String) -> Self {
        Self { controller, diagnostic: Some(diagnostic), drives: Vec::new() }
    }

    pub fn is_healthy(&self) -> bool {
        self.drives.is_empty()
    }

    pub fn failing_attribute_count(&self) -> usize {
        self.drives.iter().map(|d| d.attributes.len()).sum()
    }
}
