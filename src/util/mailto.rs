//! `mailto:` URI construction for the contact form hand-off.

#[cfg(test)]
#[path = "mailto_test.rs"]
mod mailto_test;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::state::form::FormFields;

/// Characters `encodeURIComponent` leaves untouched.
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

pub fn encode_uri_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

/// Message body handed to the mail client.
pub fn message_body(fields: &FormFields) -> String {
    format!("From: {} ({})\n\nMessage:\n{}", fields.name, fields.email, fields.message)
}

pub fn compose_mailto(recipient: &str, fields: &FormFields) -> String {
    format!(
        "mailto:{recipient}?subject={}&body={}",
        encode_uri_component(&fields.subject),
        encode_uri_component(&message_body(fields))
    )
}
