/**
 * Template Helpers
 */

use chrono::{DateTime, Utc};
use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
};
use serde_json::Value;

/// Display format for timestamps, e.g. `02 Jan 2006 at 15:04`
pub const HUMAN_DATE_FORMAT: &str = "%d %b %Y at %H:%M";

pub fn register(registry: &mut Handlebars<'static>) {
    registry.register_helper("human_date", Box::new(human_date_helper));
}

/// Format a timestamp in UTC, or nothing for an absent one
pub fn human_date(value: &DateTime<Utc>) -> String {
    value.format(HUMAN_DATE_FORMAT).to_string()
}

fn human_date_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let formatted = match h.param(0).map(|param| param.value()) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(raw)) if raw.is_empty() => String::new(),
        Some(Value::String(raw)) => {
            let parsed = DateTime::parse_from_rfc3339(raw).map_err(|e| {
                RenderErrorReason::Other(format!("human_date: invalid timestamp {:?}: {}", raw, e))
            })?;
            human_date(&parsed.with_timezone(&Utc))
        }
        Some(other) => {
            return Err(RenderErrorReason::Other(format!(
                "human_date: expected a timestamp string, got {}",
                other
            ))
            .into())
        }
    };

    out.write(&formatted)?;
    Ok(())
}
