//! The untrusted generator input.
//!
//! A proposal is parsed straight from a `serde_json::Value` rather than through
//! derived structs: the envelope, the record tags and the payloads all vary
//! between generator versions, and a single malformed record must never sink
//! the whole batch.

pub mod rules;

use crate::error::{StructuralError, Warning};
use crate::model::ElementKind;
use itertools::Itertools;
use serde_json::Value;

/// A structurally valid batch of raw records, borrowed from the response.
#[derive(Debug, Clone)]
pub struct Proposal<'a> {
    records: Vec<&'a Value>,
}

/// One record with its tag resolved and its payload located.
#[derive(Debug, Clone, Copy)]
pub struct ProposalRecord<'a> {
    pub index: usize,
    pub kind: ElementKind,
    pub payload: &'a Value,
}

impl<'a> Proposal<'a> {
    /// Validates the envelope. Only a missing or non-collection response is
    /// fatal; everything inside the element list is judged record by record.
    ///
    /// A bare array is accepted as the element list itself. For an object, the
    /// element list fields are tried in order and the earliest non-empty list
    /// wins.
    pub fn parse(response: &'a Value) -> Result<Self, StructuralError> {
        match response {
            Value::Null => Err(StructuralError::Absent),
            Value::Array(items) => Ok(Self::from_items(items)),
            Value::Object(_) => Self::parse_envelope(response),
            other => Err(StructuralError::NotACollection {
                found: json_type_name(other),
            }),
        }
    }

    fn parse_envelope(response: &'a Value) -> Result<Self, StructuralError> {
        let mut saw_empty_list = false;
        let mut first_non_list: Option<(&'static str, &'static str)> = None;

        for pointer in rules::ELEMENT_LIST.pointers().iter().copied() {
            let field = pointer.trim_start_matches('/');
            match response.pointer(pointer) {
                None | Some(Value::Null) => {}
                Some(Value::Array(items)) if items.is_empty() => saw_empty_list = true,
                Some(Value::Array(items)) => return Ok(Self::from_items(items)),
                Some(other) => {
                    first_non_list.get_or_insert((field, json_type_name(other)));
                }
            }
        }

        if saw_empty_list {
            return Ok(Self {
                records: Vec::new(),
            });
        }
        match first_non_list {
            Some((field, found)) => Err(StructuralError::ElementListNotArray { field, found }),
            None => Err(StructuralError::MissingElementList {
                expected: rules::ELEMENT_LIST
                    .pointers()
                    .iter()
                    .map(|p| p.trim_start_matches('/'))
                    .join(", "),
            }),
        }
    }

    fn from_items(items: &'a [Value]) -> Self {
        Self {
            records: items.iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolves every record, yielding either the tagged record or the reason
    /// it has to be dropped.
    pub fn records(&self) -> impl Iterator<Item = Result<ProposalRecord<'a>, Warning>> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(index, raw)| ProposalRecord::resolve(index, *raw))
    }
}

impl<'a> ProposalRecord<'a> {
    fn resolve(index: usize, raw: &'a Value) -> Result<Self, Warning> {
        if !raw.is_object() {
            return Err(Warning::MalformedRecord {
                index,
                reason: format!("expected an object, found {}", json_type_name(raw)),
            });
        }

        let tag = rules::RECORD_KIND
            .extract_text(raw)
            .ok_or_else(|| Warning::MalformedRecord {
                index,
                reason: "no record kind".to_string(),
            })?;
        let kind = parse_record_kind(&tag).ok_or_else(|| Warning::UnknownRecordKind {
            index,
            kind: tag.clone(),
        })?;

        let payload = rules::RECORD_PAYLOAD
            .extract(raw)
            .filter(|p| p.is_object())
            .ok_or_else(|| Warning::MalformedRecord {
                index,
                reason: "no element payload".to_string(),
            })?;

        Ok(Self {
            index,
            kind,
            payload,
        })
    }
}

/// Maps a record tag onto the side of the diagram it describes.
pub fn parse_record_kind(tag: &str) -> Option<ElementKind> {
    match tag.trim().to_ascii_lowercase().as_str() {
        "element" | "shape" | "class" | "node" => Some(ElementKind::Shape),
        "relationship" | "connection" | "edge" | "link" => Some(ElementKind::Connection),
        _ => None,
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
