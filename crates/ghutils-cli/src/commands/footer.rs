//! `ghutils footer` command - Print markdown footer links.

use chrono::NaiveDate;
use ghutils_core::{FooterKind, make_footer_links};

use crate::output;

/// Run the footer command.
pub fn run(
    owner: &str,
    name: &str,
    date: Option<NaiveDate>,
    kind: FooterKind,
    docs_url: Option<&str>,
) {
    output::essential(&make_footer_links(owner, name, date, kind, docs_url));
}
