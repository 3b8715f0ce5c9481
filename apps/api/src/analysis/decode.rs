//! Best-effort decoding of the model's reply into JSON.

use serde_json::Value;
use thiserror::Error;

/// How the reply was decoded. `Strict` means the raw reply parsed
/// directly; `Recovered` means the JSON was pulled out of surrounding
/// prose or code fences.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportDecode {
    Strict(Value),
    Recovered(Value),
}

impl ReportDecode {
    pub fn into_value(self) -> Value {
        match self {
            ReportDecode::Strict(v) | ReportDecode::Recovered(v) => v,
        }
    }
}

#[derive(Debug, Error)]
#[error("reply is not valid JSON: {0}")]
pub struct DecodeError(pub String);

/// Two-tier decode: strict parse first, then the substring between the
/// first `{` and the last `}` (inclusive).
///
/// The lenient tier recovers replies the model wraps in commentary or
/// fences despite the JSON-only instruction. It is a heuristic, not a
/// guarantee.
pub fn decode_report(raw: &str) -> Result<ReportDecode, DecodeError> {
    if let Ok(value) = serde_json::from_str::<Value>(raw.trim()) {
        return Ok(ReportDecode::Strict(value));
    }

    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            match serde_json::from_str::<Value>(&raw[start..=end]) {
                Ok(value) => Ok(ReportDecode::Recovered(value)),
                Err(e) => Err(DecodeError(e.to_string())),
            }
        }
        _ => Err(DecodeError("no JSON object found in reply".to_string())),
    }
}
