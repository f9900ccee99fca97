#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod rates;
pub(crate) mod state;

pub(crate) use form::{assert_form_input, assert_hx_endpoint, must_get_form};
pub(crate) use html::{assert_valid_html, count_table_rows, parse_html_document, select_text};
pub(crate) use http::assert_content_type;
pub(crate) use rates::{ManualClock, StubRateProvider};
pub(crate) use state::{get_test_server, get_test_state};
