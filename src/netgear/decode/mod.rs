// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Generic XML tree decoding for SOAP response bodies

mod records;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{AppError, Result};

pub(crate) use records::{decode_devices, decode_flat};

/// Element name of the status node Netgear places beside the payload
pub(crate) const RESPONSE_CODE: &str = "ResponseCode";

/// One decoded XML element
///
/// `name` is the local name with any namespace prefix removed; `text` is the
/// unescaped character data directly inside the element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseNode {
    pub name: String,
    pub text: String,
    pub children: Vec<ResponseNode>,
}

impl ResponseNode {
    fn element(start: &BytesStart<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            ..Self::default()
        }
    }

    /// First immediate child with the given local name
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&ResponseNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First top-level element that carries the operation result
    #[must_use]
    pub fn payload(&self) -> Option<&ResponseNode> {
        self.children.iter().find(|c| c.name != RESPONSE_CODE)
    }
}

/// Decodes XML bytes into a tree rooted at an unnamed document node.
///
/// The input may hold several top-level elements (a SOAP body's inner XML does),
/// each becomes a child of the returned root.
///
/// # Errors
///
/// Returns `AppError::Decode` when the bytes are not well-formed XML.
pub fn decode(raw: &[u8]) -> Result<ResponseNode> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| AppError::Decode(format!("response is not valid UTF-8: {e}")))?;

    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack = vec![ResponseNode::default()];
    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(ResponseNode::element(&start)),
            Event::Empty(start) => {
                let node = ResponseNode::element(&start);
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(AppError::Decode("unbalanced closing tag".to_string()));
                }
                if let Some(node) = stack.pop() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
            }
            Event::Text(t) => {
                let value = t
                    .unescape()
                    .map_err(|e| AppError::Decode(e.to_string()))?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&value);
                }
            }
            Event::CData(c) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        return Err(AppError::Decode(
            "unexpected end of document inside an element".to_string(),
        ));
    }
    stack
        .pop()
        .ok_or_else(|| AppError::Decode("empty document".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_nested_tree() {
        let xml = br#"<m:GetInfoResponse xmlns:m="urn:x"><NewA>1</NewA><NewB>two &amp; three</NewB></m:GetInfoResponse><ResponseCode>000</ResponseCode>"#;
        let root = decode(xml).unwrap();
        assert_eq!(root.name, "");
        assert_eq!(root.children.len(), 2);

        let payload = root.payload().unwrap();
        assert_eq!(payload.name, "GetInfoResponse");
        assert_eq!(payload.children[0].name, "NewA");
        assert_eq!(payload.children[0].text, "1");
        assert_eq!(payload.children[1].text, "two & three");
        assert_eq!(root.child(RESPONSE_CODE).unwrap().text, "000");
    }

    #[test]
    fn test_decode_empty_element() {
        let root = decode(b"<Resp><NewValue/></Resp>").unwrap();
        let payload = root.payload().unwrap();
        assert_eq!(payload.children.len(), 1);
        assert_eq!(payload.children[0].text, "");
    }

    #[test]
    fn test_decode_cdata() {
        let root = decode(b"<Resp><![CDATA[a<b]]></Resp>").unwrap();
        assert_eq!(root.children[0].text, "a<b");
    }

    #[test]
    fn test_decode_rejects_mismatched_tags() {
        let err = decode(b"<a><b></a>").unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_unclosed_element() {
        let err = decode(b"<a><b>text</b>").unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_payload_skips_response_code() {
        let root = decode(b"<ResponseCode>401</ResponseCode>").unwrap();
        assert!(root.payload().is_none());
    }
}
