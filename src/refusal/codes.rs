use serde::Serialize;

/// Run-mode refusal codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefusalCode {
    /// No input files were given.
    #[serde(rename = "E_BAD_INPUT")]
    BadInput,
    /// An input file could not be read, or output could not be written.
    #[serde(rename = "E_IO")]
    Io,
}
