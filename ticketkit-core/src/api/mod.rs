//! Typed endpoint methods over the request engine, grouped by backend
//! resource.

mod auth;
mod events;
mod export;
mod media;
mod sales;
mod scans;
mod stats;

pub use media::MediaFile;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use url::form_urlencoded;

/// Renders query pairs as `?a=b&c=d`, skipping unset values. Empty when
/// nothing is set.
fn query_string(pairs: &[(&'static str, Option<String>)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        if let Some(value) = value {
            serializer.append_pair(key, value);
            any = true;
        }
    }
    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}

/// Escapes a caller-supplied value for use as a single path segment.
fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}
