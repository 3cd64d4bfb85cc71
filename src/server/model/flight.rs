//! Flight status domain model produced by the flight status service and rendered
//! into an embed by the bot.

#[derive(Debug, Clone, PartialEq)]
pub struct ReportField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl ReportField {
    pub fn new(name: &str, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline,
        }
    }
}

/// Formatted status of an online pilot.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightReport {
    pub callsign: String,
    pub cid: u64,
    pub fields: Vec<ReportField>,
    /// Position line shown in the embed footer
    pub footer: String,
}

impl FlightReport {
    pub fn field(&self, name: &str) -> Option<&ReportField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlightStatus {
    Online(FlightReport),
    Offline { cid: u64 },
}
