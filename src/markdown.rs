use comrak::plugins::syntect::SyntectAdapter;
use comrak::{ComrakOptions, ComrakPlugins, markdown_to_html_with_plugins};
use once_cell::sync::Lazy;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.footnotes = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options
});

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

// Offset-less timestamps as the backend serialises naive datetimes.
const NAIVE_TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");

pub fn markdown_to_html(md: &str) -> String {
    let adapter = SyntectAdapter::new(Some("base16-ocean.dark"));
    let mut plugins = ComrakPlugins::default();
    plugins.render.codefence_syntax_highlighter = Some(&adapter);
    markdown_to_html_with_plugins(md, &MARKDOWN_OPTIONS, &plugins)
}

/// Local wall-clock time for an ISO-8601 message timestamp, e.g. `09:41 AM`.
pub fn format_message_timestamp(timestamp: Option<&str>) -> Option<String> {
    let local = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    format_timestamp_in(timestamp?, local)
}

/// Timestamps without an offset are taken to already be in `local` time.
fn format_timestamp_in(raw: &str, local: UtcOffset) -> Option<String> {
    let datetime = match OffsetDateTime::parse(raw, &Rfc3339) {
        Ok(datetime) => datetime.to_offset(local),
        Err(_) => PrimitiveDateTime::parse(raw, NAIVE_TIMESTAMP_FORMAT)
            .ok()?
            .assume_offset(local),
    };
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}
