use std::fmt;

/// Every check the suite knows, in the order a full run executes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Check {
    /// get_info and get_reading return well-formed values
    Sanity,
    /// set_name is reflected by get_info
    SetName,
    /// an empty name is refused and the name is kept
    EmptyName,
    /// set_reading_interval is reflected by get_info and readings refresh
    SetReadingInterval,
    /// an interval below 1 is refused and the interval is kept
    InvalidReadingInterval,
    /// get_methods answers with a result
    GetMethods,
    /// device info survives a reboot
    Reboot,
    /// firmware goes up one version per update and stops at the latest
    UpdateFirmware,
    /// a malformed body is a parse error
    ParseError,
    /// id 0 is an invalid request
    InvalidRequest,
    /// an unknown method is reported as such
    MethodNotFound,
    /// an unknown param key is reported as invalid params
    InvalidParams,
}

impl Check {
    pub const ALL: [Check; 12] = [
        Check::Sanity,
        Check::SetName,
        Check::EmptyName,
        Check::SetReadingInterval,
        Check::InvalidReadingInterval,
        Check::GetMethods,
        Check::Reboot,
        Check::UpdateFirmware,
        Check::ParseError,
        Check::InvalidRequest,
        Check::MethodNotFound,
        Check::InvalidParams,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Check::Sanity => "sanity",
            Check::SetName => "set-name",
            Check::EmptyName => "empty-name",
            Check::SetReadingInterval => "set-reading-interval",
            Check::InvalidReadingInterval => "invalid-reading-interval",
            Check::GetMethods => "get-methods",
            Check::Reboot => "reboot",
            Check::UpdateFirmware => "update-firmware",
            Check::ParseError => "parse-error",
            Check::InvalidRequest => "invalid-request",
            Check::MethodNotFound => "method-not-found",
            Check::InvalidParams => "invalid-params",
        }
    }

    /// Sorts a selection into run order and drops duplicates.
    pub fn ordered(selection: &[Check]) -> Vec<Check> {
        Check::ALL
            .into_iter()
            .filter(|c| selection.contains(c))
            .collect()
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
