//! Options normalization: turns borrowed `RequestOptions` into a `Descriptor`.
//!
//! # Design
//! Normalization is a pure function. It never touches the options it is given;
//! every derived field (final url, method, merged headers, body) is written
//! into a new `Descriptor`.
//!
//! GET params are rendered the way a browser form layer would: `null` values
//! are skipped, keys and values are percent-encoded with the
//! `encodeURIComponent` character set, and key order is insertion order.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map, Number, Value};

use crate::config::AdapterConfig;
use crate::http::{Descriptor, HttpMethod};
use crate::options::{RequestData, RequestOptions};

/// Characters left alone by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single URI component.
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

/// Append `params` to `url` as a query string.
///
/// Uses `&` when `url` already has a `?`, otherwise `?`. Returns `url`
/// unchanged when every value is null.
pub fn stringify_get_params(url: &str, params: &Map<String, Value>) -> String {
    let query = params
        .iter()
        .filter_map(|(key, value)| {
            render_param(value)
                .map(|value| format!("{}={}", encode_component(key), encode_component(&value)))
        })
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

/// Fill `target` with every entry of `defaults` whose name is not already
/// present. Existing entries are never overwritten, whatever their value.
/// Names compare ASCII case-insensitively.
pub fn merge_defaults(target: &mut Vec<(String, String)>, defaults: &[(String, String)]) {
    for (name, value) in defaults {
        if !target.iter().any(|(key, _)| key.eq_ignore_ascii_case(name)) {
            target.push((name.clone(), value.clone()));
        }
    }
}

/// Build the transport descriptor for `options`.
pub fn normalize(options: &RequestOptions, config: &AdapterConfig) -> Descriptor {
    let mut url = options.url.clone();
    let mut body = None;

    match (&options.method, &options.data) {
        (HttpMethod::Get, Some(RequestData::Params(params))) => {
            url = stringify_get_params(&url, params);
        }
        (HttpMethod::Get | HttpMethod::Head, Some(data)) => {
            tracing::warn!(
                method = %options.method,
                kind = data_kind(data),
                "dropping request data that cannot be sent with this method"
            );
        }
        (_, Some(RequestData::Body(raw))) => body = Some(raw.clone()),
        (_, Some(RequestData::Params(params))) => {
            body = Some(Value::Object(params.clone()).to_string());
        }
        (_, None) => {}
    }

    let mut headers = options.headers.clone().unwrap_or_default();
    merge_defaults(&mut headers, &config.default_headers);

    Descriptor {
        url,
        method: options.method.clone(),
        headers,
        body,
    }
}

fn data_kind(data: &RequestData) -> &'static str {
    match data {
        RequestData::Params(_) => "params",
        RequestData::Body(_) => "body",
    }
}

/// Render a param value as its query text, or `None` to skip it.
fn render_param(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(render_value(other)),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => render_number(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Render a number as `String(n)` would: integral floats drop the fraction,
/// `-0` prints as `0`, and exponents carry an explicit sign.
fn render_number(number: &Number) -> String {
    let Some(float) = number.as_f64().filter(|_| number.is_f64()) else {
        return number.to_string();
    };
    if float == 0.0 {
        return "0".to_string();
    }
    if float.fract() == 0.0 && float.abs() < 1e21 {
        return format!("{float:.0}");
    }
    let text = number.to_string();
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}
