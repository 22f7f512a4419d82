use serde::Serialize;

/// Report severity, least to most serious. The derived ordering is load
/// bearing: threshold comparisons and the capacity-monotonicity property
/// both rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Clean, no issue found.
    Ok,
    /// Observation with no expected action.
    Info,
    /// Stylistic or best-practice deviation.
    Concern,
    /// Likely future problem.
    Warning,
    /// Present correctness or availability risk.
    Critical,
}

impl Severity {
    /// Parse from config string. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ok" => Some(Self::Ok),
            "info" => Some(Self::Info),
            "concern" => Some(Self::Concern),
            "warning" => Some(Self::Warning),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Uppercase label for presentation.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Info => "INFO",
            Severity::Concern => "CONCERN",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Ok < Severity::Info);
        assert!(Severity::Info < Severity::Concern);
        assert!(Severity::Concern < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse("ok"), Some(Severity::Ok));
        assert_eq!(Severity::parse("info"), Some(Severity::Info));
        assert_eq!(Severity::parse("concern"), Some(Severity::Concern));
        assert_eq!(Severity::parse("warning"), Some(Severity::Warning));
        assert_eq!(Severity::parse("critical"), Some(Severity::Critical));
        // Case-insensitive
        assert_eq!(Severity::parse("WARNING"), Some(Severity::Warning));
        assert_eq!(Severity::parse("Concern"), Some(Severity::Concern));
        // Invalid
        assert_eq!(Severity::parse("garbage"), None);
        assert_eq!(Severity::parse("none"), None);
    }

    #[test]
    fn test_serialize_uppercase() {
        let json = serde_json::to_string(&Severity::Concern).expect("serialize");
        assert_eq!(json, "\"CONCERN\"");
    }
}
