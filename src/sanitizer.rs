//! Turns raw proposal records into well-formed shapes and connections.
//!
//! A record either comes out as a complete [`Shape`]/[`Connection`] or is
//! dropped with a [`Warning`]. Optional fields fall back to neutral defaults,
//! but a shape's label never does: a record without a usable label is refused
//! outright instead of being given a placeholder name.

use crate::config::DEFAULT_MAX_COORDINATE;
use crate::error::Warning;
use crate::model::{
    Attribute, Connection, ConnectionKind, DEFAULT_MULTIPLICITY, ElementKind, Operation,
    Parameter, Position, Shape, ShapeKind, Visibility,
};
use crate::proposal::rules::{self, FieldRule};
use crate::proposal::{Proposal, ProposalRecord};
use serde_json::Value;

/// The outcome of sanitizing one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Sanitized {
    Shape(Shape),
    Connection(Connection),
}

/// Every record of a proposal that survived sanitizing, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanitizedBatch {
    pub shapes: Vec<Shape>,
    pub connections: Vec<Connection>,
}

impl SanitizedBatch {
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.connections.is_empty()
    }
}

pub struct Sanitizer<'c> {
    unnamed_sentinel: &'c str,
    max_coordinate: f64,
}

impl<'c> Sanitizer<'c> {
    pub fn new(unnamed_sentinel: &'c str) -> Self {
        Self {
            unnamed_sentinel,
            max_coordinate: DEFAULT_MAX_COORDINATE,
        }
    }

    /// Positions with a coordinate beyond `limit` are treated as unset.
    pub fn with_max_coordinate(mut self, limit: f64) -> Self {
        self.max_coordinate = limit;
        self
    }

    /// A label is usable if it is not blank and is not the unnamed sentinel
    /// (compared trimmed and ignoring ASCII case).
    pub fn is_usable_label(&self, label: &str) -> bool {
        let label = label.trim();
        !label.is_empty() && !label.eq_ignore_ascii_case(self.unnamed_sentinel.trim())
    }

    /// Sanitizes every record in the proposal. Rejections and repairs are
    /// appended to `warnings`.
    pub fn sanitize_all(&self, proposal: &Proposal<'_>, warnings: &mut Vec<Warning>) -> SanitizedBatch {
        let mut batch = SanitizedBatch::default();
        for record in proposal.records() {
            let outcome = record.and_then(|record| self.sanitize(&record, warnings));
            match outcome {
                Ok(Sanitized::Shape(shape)) => batch.shapes.push(shape),
                Ok(Sanitized::Connection(connection)) => batch.connections.push(connection),
                Err(warning) => {
                    log::trace!(warning:% = warning; "Record dropped");
                    warnings.push(warning);
                }
            }
        }
        batch
    }

    /// Sanitizes a single resolved record. `Err` means the record is dropped;
    /// non-fatal repairs are pushed to `notes`.
    pub fn sanitize(
        &self,
        record: &ProposalRecord<'_>,
        notes: &mut Vec<Warning>,
    ) -> Result<Sanitized, Warning> {
        match record.kind {
            ElementKind::Shape => self
                .sanitize_shape(record.index, record.payload, notes)
                .map(Sanitized::Shape),
            ElementKind::Connection => self
                .sanitize_connection(record.index, record.payload, notes)
                .map(Sanitized::Connection),
        }
    }

    pub fn sanitize_shape(
        &self,
        index: usize,
        payload: &Value,
        notes: &mut Vec<Warning>,
    ) -> Result<Shape, Warning> {
        let id = required(&rules::SHAPE_ID, index, ElementKind::Shape, payload)?;

        let label = rules::SHAPE_LABEL
            .extract_text(payload)
            .ok_or(Warning::MissingField {
                index,
                element: ElementKind::Shape,
                field: rules::SHAPE_LABEL.field(),
            })?;
        if !self.is_usable_label(&label) {
            return Err(Warning::InvalidLabel { index, id, label });
        }

        let kind = match rules::SHAPE_KIND.extract_text(payload) {
            None => ShapeKind::default(),
            Some(raw) => ShapeKind::parse(&raw).unwrap_or_else(|| {
                notes.push(Warning::UnknownShapeKind {
                    id: id.clone(),
                    kind: raw,
                });
                ShapeKind::default()
            }),
        };
        let is_abstract = rules::SHAPE_ABSTRACT
            .extract_bool(payload)
            .unwrap_or(kind == ShapeKind::AbstractClass);

        let position = match (
            rules::POSITION_X.extract_number(payload),
            rules::POSITION_Y.extract_number(payload),
        ) {
            (Some(x), Some(y)) if Position::new(x, y).is_within(self.max_coordinate) => {
                Position::new(x, y)
            }
            (Some(x), Some(y)) => {
                notes.push(Warning::PositionOutOfRange {
                    id: id.clone(),
                    x,
                    y,
                });
                Position::ORIGIN
            }
            _ => Position::ORIGIN,
        };

        let attributes = members(rules::SHAPE_ATTRIBUTES, payload)
            .filter_map(|(position, raw)| {
                let attribute = parse_attribute(raw);
                if attribute.is_none() {
                    notes.push(Warning::InvalidMember {
                        id: id.clone(),
                        member: "attribute",
                        position,
                    });
                }
                attribute
            })
            .collect();

        let operations = members(rules::SHAPE_OPERATIONS, payload)
            .filter_map(|(position, raw)| {
                let operation = parse_operation(raw);
                if operation.is_none() {
                    notes.push(Warning::InvalidMember {
                        id: id.clone(),
                        member: "operation",
                        position,
                    });
                }
                operation
            })
            .collect();

        Ok(Shape {
            id,
            kind,
            label: label.trim().to_string(),
            is_abstract,
            position,
            attributes,
            operations,
        })
    }

    pub fn sanitize_connection(
        &self,
        index: usize,
        payload: &Value,
        notes: &mut Vec<Warning>,
    ) -> Result<Connection, Warning> {
        let id = required(&rules::CONNECTION_ID, index, ElementKind::Connection, payload)?;
        let source = required(&rules::CONNECTION_SOURCE, index, ElementKind::Connection, payload)?;
        let target = required(&rules::CONNECTION_TARGET, index, ElementKind::Connection, payload)?;

        let kind = match rules::CONNECTION_KIND.extract_non_blank(payload) {
            None => ConnectionKind::Association,
            Some(raw) => ConnectionKind::parse(&raw).unwrap_or_else(|| {
                notes.push(Warning::UnknownConnectionKind {
                    id: id.clone(),
                    kind: raw,
                });
                ConnectionKind::Association
            }),
        };

        let multiplicity = |rule: &FieldRule| {
            rule.extract_non_blank(payload)
                .unwrap_or_else(|| DEFAULT_MULTIPLICITY.to_string())
        };

        Ok(Connection {
            source_multiplicity: multiplicity(&rules::SOURCE_MULTIPLICITY),
            target_multiplicity: multiplicity(&rules::TARGET_MULTIPLICITY),
            label: rules::CONNECTION_LABEL
                .extract_text(payload)
                .map(|l| l.trim().to_string())
                .unwrap_or_default(),
            id,
            source,
            target,
            kind,
        })
    }
}

fn required(
    rule: &FieldRule,
    index: usize,
    element: ElementKind,
    payload: &Value,
) -> Result<String, Warning> {
    rule.extract_non_blank(payload).ok_or(Warning::MissingField {
        index,
        element,
        field: rule.field(),
    })
}

/// Enumerates a member list. A missing or non-list field yields nothing.
fn members(rule: FieldRule, payload: &Value) -> impl Iterator<Item = (usize, &Value)> {
    rule.extract_array(payload)
        .into_iter()
        .flatten()
        .enumerate()
}

/// Splits an optional leading UML visibility symbol off a member string.
fn split_visibility(raw: &str) -> (Option<Visibility>, &str) {
    let raw = raw.trim();
    match raw.chars().next() {
        Some(symbol @ ('+' | '-' | '#' | '~')) => (
            Visibility::parse(&symbol.to_string()),
            raw[symbol.len_utf8()..].trim_start(),
        ),
        _ => (None, raw),
    }
}

/// Splits `"name: Type"` into its parts. The type may be absent.
fn split_typed(raw: &str) -> (&str, &str) {
    match raw.split_once(':') {
        Some((name, type_name)) => (name.trim(), type_name.trim()),
        None => (raw.trim(), ""),
    }
}

fn member_visibility(raw: &Value) -> Visibility {
    rules::MEMBER_VISIBILITY
        .extract_text(raw)
        .and_then(|v| Visibility::parse(&v))
        .unwrap_or_default()
}

/// Parses `"- total: number"` or `{ "name": "total", "type": "number" }`.
pub fn parse_attribute(raw: &Value) -> Option<Attribute> {
    match raw {
        Value::String(text) => {
            let (visibility, rest) = split_visibility(text);
            let (name, type_name) = split_typed(rest);
            (!name.is_empty()).then(|| Attribute {
                name: name.to_string(),
                type_name: type_name.to_string(),
                visibility: visibility.unwrap_or_default(),
            })
        }
        Value::Object(_) => Some(Attribute {
            name: rules::MEMBER_NAME.extract_non_blank(raw)?,
            type_name: rules::MEMBER_TYPE
                .extract_text(raw)
                .map(|t| t.trim().to_string())
                .unwrap_or_default(),
            visibility: member_visibility(raw),
        }),
        _ => None,
    }
}

fn parse_parameter(raw: &Value) -> Option<Parameter> {
    match raw {
        Value::String(text) => {
            let (name, type_name) = split_typed(text);
            (!name.is_empty()).then(|| Parameter {
                name: name.to_string(),
                type_name: type_name.to_string(),
            })
        }
        Value::Object(_) => Some(Parameter {
            name: rules::MEMBER_NAME.extract_non_blank(raw)?,
            type_name: rules::MEMBER_TYPE
                .extract_text(raw)
                .map(|t| t.trim().to_string())
                .unwrap_or_default(),
        }),
        _ => None,
    }
}

/// Parses `"+ getTotal(id: string): number"` or the equivalent object form.
/// Unparseable parameters are skipped; an operation without a name is not.
pub fn parse_operation(raw: &Value) -> Option<Operation> {
    match raw {
        Value::String(text) => {
            let (visibility, rest) = split_visibility(text);
            let (name, parameters, return_type) = match rest.split_once('(') {
                Some((name, tail)) => {
                    let (params, after) = tail.split_once(')').unwrap_or((tail, ""));
                    let parameters = params
                        .split(',')
                        .filter(|p| !p.trim().is_empty())
                        .filter_map(|p| parse_parameter(&Value::String(p.to_string())))
                        .collect();
                    let return_type = after.trim().trim_start_matches(':').trim();
                    (name.trim(), parameters, return_type)
                }
                None => {
                    let (name, return_type) = split_typed(rest);
                    (name, Vec::new(), return_type)
                }
            };
            (!name.is_empty()).then(|| Operation {
                name: name.to_string(),
                return_type: return_type.to_string(),
                visibility: visibility.unwrap_or_default(),
                parameters,
            })
        }
        Value::Object(_) => Some(Operation {
            name: rules::MEMBER_NAME.extract_non_blank(raw)?,
            return_type: rules::OPERATION_RETURN
                .extract_text(raw)
                .map(|t| t.trim().to_string())
                .unwrap_or_default(),
            visibility: member_visibility(raw),
            parameters: rules::OPERATION_PARAMETERS
                .extract_array(raw)
                .into_iter()
                .flatten()
                .filter_map(parse_parameter)
                .collect(),
        }),
        _ => None,
    }
}
