//! Target enumeration: query parameters and HTML forms.

pub mod surface;
