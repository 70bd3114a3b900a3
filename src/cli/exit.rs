/// Run outcome determining exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every upload produced text (exit 0).
    AllExtracted,
    /// At least one upload failed extraction (exit 1).
    Partial,
    /// Run-level failure or CLI error (exit 2).
    Refusal,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::AllExtracted => 0,
            Outcome::Partial => 1,
            Outcome::Refusal => 2,
        }
    }

    /// Outcome of a completed run given whether any record failed.
    pub fn from_failures(any_failed: bool) -> Self {
        if any_failed {
            Outcome::Partial
        } else {
            Outcome::AllExtracted
        }
    }
}
