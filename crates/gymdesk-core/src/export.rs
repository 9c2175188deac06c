// ── CSV export ──

use csv::{QuoteStyle, WriterBuilder};

use crate::error::CoreError;
use crate::membership::CalendarDay;
use crate::model::Member;

const HEADER: &str = "Name,Phone,Email,PlanId,StartDate,EndDate";

/// `members_2025-11-10.csv`.
pub fn default_export_file_name(today: CalendarDay) -> String {
    format!("members_{today}.csv")
}

/// Render members as CSV: a plain header line, then one fully quoted
/// row per member. Missing values are empty cells.
pub fn export_members_csv<'a, I>(members: I) -> Result<String, CoreError>
where
    I: IntoIterator<Item = &'a Member>,
{
    let mut out = Vec::with_capacity(256);
    out.extend_from_slice(HEADER.as_bytes());
    out.push(b'\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(out);

    for m in members {
        let plan_id = m.effective_plan_id().map(ToString::to_string).unwrap_or_default();
        let start = m.start_date.map(|d| d.to_string()).unwrap_or_default();
        let end = m.end_date.map(|d| d.to_string()).unwrap_or_default();
        writer
            .write_record([
                m.name.as_str(),
                m.phone.as_str(),
                m.email.as_deref().unwrap_or_default(),
                plan_id.as_str(),
                start.as_str(),
                end.as_str(),
            ])
            .map_err(|e| CoreError::Internal(format!("CSV export failed: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("CSV export failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Internal(format!("CSV export failed: {e}")))
}
