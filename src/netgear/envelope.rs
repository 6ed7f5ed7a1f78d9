// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Outer SOAP envelope handling

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{AppError, Result};

use super::decode::{RESPONSE_CODE, decode};

/// Unwrapped SOAP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Envelope {
    pub response_code: String,
    /// Raw inner XML of the `Body` element
    pub body: Vec<u8>,
}

impl Envelope {
    pub(crate) fn is_not_logged_in(&self) -> bool {
        self.response_code == "401"
    }

    /// Netgear reports success as `000`; some firmware omits the code
    pub(crate) fn is_success(&self) -> bool {
        let code = self.response_code.trim();
        code.is_empty() || code.parse::<u32>() == Ok(0)
    }
}

fn position(reader: &Reader<&[u8]>) -> Result<usize> {
    usize::try_from(reader.buffer_position())
        .map_err(|_| AppError::Decode("response too large".to_string()))
}

/// Extracts the response code and raw body from a SOAP envelope.
///
/// # Errors
///
/// Returns `AppError::Decode` for malformed XML or a missing `Body` element.
pub(crate) fn parse_envelope(raw: &[u8]) -> Result<Envelope> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| AppError::Decode(format!("response is not valid UTF-8: {e}")))?;
    let mut reader = Reader::from_str(text);

    let mut depth = 0usize;
    let mut body_start: Option<(usize, usize)> = None;
    let mut body_range = None;
    loop {
        let before = position(&reader)?;
        match reader.read_event()? {
            Event::Start(start) => {
                depth += 1;
                if body_start.is_none() && start.local_name().as_ref() == b"Body" {
                    body_start = Some((depth, position(&reader)?));
                }
            }
            Event::Empty(start) => {
                if body_start.is_none() && start.local_name().as_ref() == b"Body" {
                    body_range = Some(0..0);
                    break;
                }
            }
            Event::End(_) => {
                if let Some((body_depth, start)) = body_start {
                    if depth == body_depth {
                        body_range = Some(start..before);
                        break;
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let range = body_range
        .ok_or_else(|| AppError::Decode("SOAP envelope has no Body element".to_string()))?;
    let body = text.as_bytes()[range].to_vec();

    let tree = decode(&body)?;
    let response_code = tree
        .child(RESPONSE_CODE)
        .map(|node| node.text.trim().to_string())
        .unwrap_or_default();

    Ok(Envelope { response_code, body })
}
