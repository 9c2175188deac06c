//! Member command handlers.

use std::path::{Path, PathBuf};

use tabled::Tabled;

use gymdesk_core::{
    Bucket, CalendarDay, GymDesk, ImportOutcome, ImportReport, Member, MemberDraft, Plan,
    RenewalDraft, Snapshot, default_export_file_name, expiring_within, export_members_csv,
    truncate_row_errors,
};

use crate::cli::{
    GlobalOpts, MemberFields, MemberListArgs, MemberUpdateFields, MembersArgs, MembersCommand,
    OutputFormat, StatusFilter,
};
use crate::error::CliError;
use crate::output;

use super::{Ctx, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Plan")]
    plan: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn member_row(m: &Member, plans: &[Plan], today: CalendarDay, color: bool) -> MemberRow {
    MemberRow {
        id: m.id.to_string(),
        name: m.name.clone(),
        phone: m.phone.clone(),
        email: m.email.clone().unwrap_or_default(),
        plan: m.plan_name(plans).unwrap_or("-").to_owned(),
        start: short_date(m.start_date),
        end: short_date(m.end_date),
        status: output::status_label(m.status(today), color),
    }
}

fn short_date(day: Option<CalendarDay>) -> String {
    day.map_or_else(|| "-".into(), CalendarDay::short)
}

fn detail(m: &Member, plans: &[Plan], today: CalendarDay, color: bool) -> String {
    let plan = m
        .effective_plan_id()
        .and_then(|id| plans.iter().find(|p| &p.id == id))
        .or(m.plan.as_ref())
        .map_or_else(|| "-".into(), Plan::label);
    [
        format!("ID:        {}", m.id),
        format!("Name:      {}", m.name),
        format!("Phone:     {}", m.phone),
        format!("Email:     {}", m.email.as_deref().unwrap_or("-")),
        format!("Plan:      {plan}"),
        format!("Start:     {}", short_date(m.start_date)),
        format!("End:       {}", short_date(m.end_date)),
        format!("Status:    {}", output::status_label(m.status(today), color)),
    ]
    .join("\n")
}

// ── Filtering ───────────────────────────────────────────────────────

fn bucket_for(filter: StatusFilter) -> Bucket {
    match filter {
        StatusFilter::Expired => Bucket::Expired,
        StatusFilter::Critical => Bucket::Critical,
        StatusFilter::Warning => Bucket::Warning,
        StatusFilter::Active => Bucket::Active,
    }
}

/// Apply `--search`, `--expiring` and `--status`, keeping server order.
fn filter_members<'a>(
    snap: &'a Snapshot,
    args: &MemberListArgs,
    today: CalendarDay,
) -> Vec<&'a Member> {
    let mut members = match args.search.as_deref() {
        Some(query) => snap.search(query),
        None => snap.members.iter().collect(),
    };

    if let Some(days) = args.expiring {
        let soon = expiring_within(&snap.members, today, days);
        members.retain(|m| soon.iter().any(|s| s.id == m.id));
    }

    if let Some(filter) = args.status {
        let wanted = bucket_for(filter);
        members.retain(|m| m.status(today).is_some_and(|s| s.bucket == wanted));
    }

    members
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    desk: &GymDesk,
    args: MembersArgs,
    global: &GlobalOpts,
    ctx: &Ctx,
) -> Result<(), CliError> {
    let snap = util::load(desk, global, ctx).await?;
    let today = ctx.today;

    match args.command {
        MembersCommand::List(list) => {
            let members = filter_members(&snap, &list, today);
            let out = output::render_list(
                &global.output,
                &members,
                |m| member_row(m, &snap.plans, today, ctx.color),
                |m| m.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MembersCommand::Get { member } => {
            let m = util::resolve_member(&snap, &member)?;
            let out = output::render_single(
                &global.output,
                m,
                |m| detail(m, &snap.plans, today, ctx.color),
                |m| m.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MembersCommand::Create(fields) => {
            let mut draft = create_draft(&snap, fields, today)?;
            draft.fill_suggested_end_date(&snap.plans);
            desk.create_member(&draft, today).await?;
            let ends = draft
                .end_date
                .map(|d| format!(" (ends {d})"))
                .unwrap_or_default();
            util::note(global, &format!("Member '{}' added{ends}", draft.name.trim()));
            Ok(())
        }

        MembersCommand::Update { member, fields } => {
            let existing = util::resolve_member(&snap, &member)?;
            let draft = update_draft(&snap, existing, fields)?;
            desk.update_member(&existing.id, &draft, today).await?;
            util::note(global, &format!("Member {} updated", existing.id));
            Ok(())
        }

        MembersCommand::Delete { member } => {
            let existing = util::resolve_member(&snap, &member)?;
            let prompt = format!("Delete member '{}' ({})?", existing.name, existing.phone);
            if !util::confirm(&prompt, "members delete", global.yes)? {
                return Ok(());
            }
            desk.delete_member(&existing.id).await?;
            util::note(global, &format!("Member '{}' deleted", existing.name));
            Ok(())
        }

        MembersCommand::Renew { member, plan, end } => {
            let existing = util::resolve_member(&snap, &member)?;
            let plan_id = plan
                .as_deref()
                .map(|key| util::resolve_plan(&snap, key).map(|p| p.id.clone()))
                .transpose()?;
            let mut draft = RenewalDraft::for_member(existing, plan_id, &snap.plans, today);
            if let Some(end) = util::parse_optional_date("end", end.as_deref())? {
                draft.new_end_date = Some(end);
            }
            desk.renew_member(existing, &draft).await?;
            let until = draft
                .new_end_date
                .map(|d| format!(" until {d}"))
                .unwrap_or_default();
            util::note(global, &format!("Renewed '{}'{until}", existing.name));
            Ok(())
        }

        MembersCommand::Import { file } => {
            let report = output::with_spinner(
                "Uploading roster",
                global.quiet,
                desk.import_members(&file),
            )
            .await?;
            print_import_report(&report, global)
        }

        MembersCommand::Export { file, search } => {
            let members = match search.as_deref() {
                Some(query) => snap.search(query),
                None => snap.members.iter().collect(),
            };
            let csv = export_members_csv(members.iter().copied())?;
            write_export(file, &csv, today, members.len(), global).await
        }
    }
}

// ── Drafts ──────────────────────────────────────────────────────────

fn create_draft(
    snap: &Snapshot,
    fields: MemberFields,
    today: CalendarDay,
) -> Result<MemberDraft, CliError> {
    let plan = util::resolve_plan(snap, &fields.plan)?;
    Ok(MemberDraft {
        name: fields.name,
        phone: fields.phone,
        email: fields.email,
        plan_id: Some(plan.id.clone()),
        start_date: Some(
            util::parse_optional_date("start", fields.start.as_deref())?.unwrap_or(today),
        ),
        end_date: util::parse_optional_date("end", fields.end.as_deref())?,
    })
}

fn update_draft(
    snap: &Snapshot,
    existing: &Member,
    fields: MemberUpdateFields,
) -> Result<MemberDraft, CliError> {
    let mut draft = MemberDraft::from_member(existing);
    if let Some(name) = fields.name {
        draft.name = name;
    }
    if let Some(phone) = fields.phone {
        draft.phone = phone;
    }
    if let Some(email) = fields.email {
        draft.email = Some(email).filter(|e| !e.trim().is_empty());
    }
    if let Some(plan) = fields.plan.as_deref() {
        draft.plan_id = Some(util::resolve_plan(snap, plan)?.id.clone());
    }
    if let Some(start) = util::parse_optional_date("start", fields.start.as_deref())? {
        draft.start_date = Some(start);
    }
    if let Some(end) = util::parse_optional_date("end", fields.end.as_deref())? {
        draft.end_date = Some(end);
    }
    Ok(draft)
}

// ── Import / export ─────────────────────────────────────────────────

fn print_import_report(report: &ImportReport, global: &GlobalOpts) -> Result<(), CliError> {
    if matches!(global.output, OutputFormat::Table | OutputFormat::Plain) {
        for line in import_report_lines(report) {
            util::note(global, &line);
        }
    } else {
        let out =
            output::render_single(&global.output, report, |_| String::new(), |_| String::new());
        output::print_output(&out, global.quiet);
    }

    if report.outcome == ImportOutcome::Rejected {
        return Err(CliError::ApiError {
            message: "import rejected".into(),
        });
    }
    Ok(())
}

/// Human summary: the backend's message, or its row errors with the
/// tail collapsed into a count.
fn import_report_lines(report: &ImportReport) -> Vec<String> {
    let rows = report.row_errors();
    if rows.is_empty() {
        return vec![report.message.trim().to_owned()];
    }

    let (shown, hidden) = truncate_row_errors(&rows);
    let mut lines: Vec<String> = shown.iter().map(|l| (*l).to_owned()).collect();
    if hidden > 0 {
        lines.push(format!("... and {hidden} more errors occurred"));
    }
    lines
}

async fn write_export(
    file: Option<PathBuf>,
    csv: &str,
    today: CalendarDay,
    count: usize,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let path = file.unwrap_or_else(|| PathBuf::from(default_export_file_name(today)));
    if path == Path::new("-") {
        print!("{csv}");
        return Ok(());
    }
    tokio::fs::write(&path, csv).await?;
    util::note(
        global,
        &format!("Exported {count} members to {}", path.display()),
    );
    Ok(())
}
