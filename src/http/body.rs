//! Request body encoding
//!
//! Chooses between no body, a raw body, a url-encoded form and a multipart
//! form from the body-kind parameters and the request's
//! [`ContentCollectionMode`].

use crate::error::{Error, Result};
use crate::request::{Parameter, ParameterKind, ParameterValue};
use crate::serializer::Serializer;
use crate::types::ContentCollectionMode;
use reqwest::multipart::{Form, Part};
use tracing::warn;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

/// Body ready to be attached to a `reqwest` request
pub(crate) enum EncodedBody {
    /// No body parameters
    Empty,
    /// Raw bytes with their content type
    Raw { content_type: String, data: Vec<u8> },
    /// `application/x-www-form-urlencoded` pairs
    Form(Vec<(String, String)>),
    /// `multipart/form-data`
    Multipart(Form),
}

impl std::fmt::Debug for EncodedBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodedBody::Empty => f.write_str("Empty"),
            EncodedBody::Raw { content_type, data } => f
                .debug_struct("Raw")
                .field("content_type", content_type)
                .field("len", &data.len())
                .finish(),
            EncodedBody::Form(pairs) => f.debug_tuple("Form").field(pairs).finish(),
            EncodedBody::Multipart(form) => f
                .debug_struct("Multipart")
                .field("boundary", &form.boundary())
                .finish(),
        }
    }
}

/// Encode the body parameters among `parameters`
pub(crate) fn encode_body(
    parameters: &[&Parameter],
    mode: ContentCollectionMode,
    serializer: &dyn Serializer,
) -> Result<EncodedBody> {
    let files: Vec<&Parameter> = of_kind(parameters, ParameterKind::File);
    let fields: Vec<&Parameter> = of_kind(parameters, ParameterKind::UrlEncodedBody);
    let bodies: Vec<&Parameter> = of_kind(parameters, ParameterKind::RequestBody);

    if bodies.len() > 1 {
        warn!(
            count = bodies.len(),
            "Multiple request body parameters, only the first is sent"
        );
    }
    let body = bodies.first().copied();

    let multipart = match mode {
        ContentCollectionMode::MultiPartForFileParameters => {
            !files.is_empty() || (body.is_some() && !fields.is_empty())
        }
        ContentCollectionMode::SimpleEncodingOnly => false,
    };

    if multipart {
        return build_multipart(parameters, body, serializer).map(EncodedBody::Multipart);
    }

    if !files.is_empty() {
        return match (files.as_slice(), fields.is_empty(), body) {
            ([file], true, None) => raw_body(file.value(), serializer),
            _ => Err(Error::encoding(
                "file parameters alongside other body content require multipart encoding",
            )),
        };
    }

    match (body, fields.is_empty()) {
        (Some(_), false) => Err(Error::encoding(
            "a request body cannot be combined with url-encoded parameters without multipart encoding",
        )),
        (Some(body), true) => raw_body(body.value(), serializer),
        (None, false) => fields
            .iter()
            .map(|p| Ok((p.name().to_string(), field_text(p)?)))
            .collect::<Result<Vec<_>>>()
            .map(EncodedBody::Form),
        (None, true) => Ok(EncodedBody::Empty),
    }
}

fn of_kind<'a>(parameters: &[&'a Parameter], kind: ParameterKind) -> Vec<&'a Parameter> {
    parameters
        .iter()
        .copied()
        .filter(|p| p.kind() == kind)
        .collect()
}

/// Text value of a parameter that ends up url-encoded
pub(crate) fn field_text(parameter: &Parameter) -> Result<String> {
    parameter
        .text()
        .map(|t| t.into_owned())
        .ok_or_else(|| {
            Error::encoding(format!(
                "parameter '{}' has a binary value and cannot be url-encoded",
                parameter.name()
            ))
        })
}

fn raw_body(value: &ParameterValue, serializer: &dyn Serializer) -> Result<EncodedBody> {
    let (content_type, data) = match value {
        ParameterValue::Json(json) => (
            serializer.content_type().to_string(),
            serializer.serialize(json)?,
        ),
        ParameterValue::Text(text) => (TEXT_PLAIN.to_string(), text.clone().into_bytes()),
        ParameterValue::Bytes(bytes) => (OCTET_STREAM.to_string(), bytes.to_vec()),
        ParameterValue::File {
            content_type, data, ..
        } => (
            content_type.clone().unwrap_or_else(|| OCTET_STREAM.to_string()),
            data.to_vec(),
        ),
    };
    Ok(EncodedBody::Raw { content_type, data })
}

/// Multipart form with one part per body-kind parameter, in request order.
/// Only `body` is sent among the request body parameters.
fn build_multipart(
    parameters: &[&Parameter],
    body: Option<&Parameter>,
    serializer: &dyn Serializer,
) -> Result<Form> {
    let mut form = Form::new();

    for parameter in parameters {
        let part = match parameter.kind() {
            ParameterKind::UrlEncodedBody => match parameter.value() {
                ParameterValue::Bytes(bytes) => Part::bytes(bytes.to_vec()),
                _ => Part::text(field_text(parameter)?),
            },
            ParameterKind::RequestBody if body.is_some_and(|b| std::ptr::eq(b, *parameter)) => {
                body_part(parameter.value(), serializer)?
            }
            ParameterKind::File => file_part(parameter.value())?,
            _ => continue,
        };
        form = form.part(parameter.name().to_string(), part);
    }

    Ok(form)
}

fn body_part(value: &ParameterValue, serializer: &dyn Serializer) -> Result<Part> {
    let part = match value {
        ParameterValue::Json(json) => {
            Part::bytes(serializer.serialize(json)?).mime_str(serializer.content_type())?
        }
        ParameterValue::Text(text) => Part::text(text.clone()),
        ParameterValue::Bytes(bytes) => Part::bytes(bytes.to_vec()).mime_str(OCTET_STREAM)?,
        ParameterValue::File { .. } => file_part(value)?,
    };
    Ok(part)
}

fn file_part(value: &ParameterValue) -> Result<Part> {
    let part = match value {
        ParameterValue::File {
            file_name,
            content_type,
            data,
        } => Part::bytes(data.to_vec())
            .file_name(file_name.clone())
            .mime_str(content_type.as_deref().unwrap_or(OCTET_STREAM))?,
        ParameterValue::Bytes(bytes) => Part::bytes(bytes.to_vec()).mime_str(OCTET_STREAM)?,
        ParameterValue::Text(text) => Part::text(text.clone()),
        ParameterValue::Json(json) => Part::text(json.to_string()),
    };
    Ok(part)
}
