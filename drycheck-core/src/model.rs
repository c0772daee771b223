/// Result of a single poll of the weather source.
#[derive(Debug, Clone, PartialEq)]
pub struct RainReading {
    pub raining: bool,
    /// Which field produced the result, e.g. `current precip=0.0mm, rain=0.0mm`.
    pub detail: String,
}

impl RainReading {
    pub fn new(raining: bool, detail: impl Into<String>) -> Self {
        Self { raining, detail: detail.into() }
    }

    pub fn status_label(&self) -> &'static str {
        if self.raining { "Raining" } else { "Dry" }
    }

    fn icon(&self) -> &'static str {
        if self.raining { "🌧️" } else { "🌤️" }
    }
}

impl std::fmt::Display for RainReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.icon(), self.status_label(), self.detail)
    }
}

/// Transition state carried from one poll to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorState {
    pub was_raining: bool,
    pub notified: bool,
}

impl Default for MonitorState {
    /// Starts as if rain were in progress, so the first dry reading counts as a transition.
    fn default() -> Self {
        Self { was_raining: true, notified: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_log_line() {
        let wet = RainReading::new(true, "current precip=0.5mm, rain=0.0mm");
        assert_eq!(wet.to_string(), "🌧️ Raining (current precip=0.5mm, rain=0.0mm)");

        let dry = RainReading::new(false, "no precipitation fields found");
        assert_eq!(dry.to_string(), "🌤️ Dry (no precipitation fields found)");
    }
}
