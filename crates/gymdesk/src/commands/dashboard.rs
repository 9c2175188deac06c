//! Dashboard: summary counts and the members expiring soon.

use tabled::Tabled;

use gymdesk_core::{CalendarDay, Dashboard, GymDesk, Member, Plan};

use crate::cli::{DashboardArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{Ctx, util};

#[derive(Tabled)]
struct ExpiringRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Plan")]
    plan: String,
    #[tabled(rename = "End Date")]
    end_date: String,
    #[tabled(rename = "Days Left")]
    days_left: String,
}

fn expiring_row(m: &Member, plans: &[Plan], today: CalendarDay, color: bool) -> ExpiringRow {
    ExpiringRow {
        id: m.id.to_string(),
        name: m.name.clone(),
        phone: m.phone.clone(),
        plan: m.plan_name(plans).unwrap_or("-").to_owned(),
        end_date: m.end_date.map_or_else(|| "-".into(), CalendarDay::short),
        days_left: output::status_label(m.status(today), color),
    }
}

fn render_table(dash: &Dashboard, plans: &[Plan], color: bool) -> String {
    let s = &dash.summary;
    let mut out = format!(
        "Members: {}   Active: {}   Expired: {}   Plans: {}\n",
        s.total_members, s.active_members, s.expired_members, s.total_plans
    );

    if dash.expiring.is_empty() {
        out.push_str(&format!(
            "\nNo memberships expiring in the next {} days.",
            dash.window_days.max(0)
        ));
        return out;
    }

    out.push_str(&format!(
        "\nExpiring in the next {} days ({}):\n",
        dash.window_days.max(0),
        dash.expiring.len()
    ));
    let rows: Vec<ExpiringRow> = dash
        .expiring
        .iter()
        .map(|m| expiring_row(m, plans, dash.today, color))
        .collect();
    out.push_str(&output::render_table(&rows));
    out
}

pub async fn handle(
    desk: &GymDesk,
    args: &DashboardArgs,
    global: &GlobalOpts,
    ctx: &Ctx,
) -> Result<(), CliError> {
    let snap = util::load(desk, global, ctx).await?;
    let window = args.days.unwrap_or(ctx.expiry_window_days);
    let dash = snap.dashboard(ctx.today, window);

    let out = match global.output {
        OutputFormat::Table => render_table(&dash, &snap.plans, ctx.color),
        _ => output::render_single(&global.output, &dash, |_| String::new(), |d| {
            d.expiring
                .iter()
                .map(|m| m.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        }),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
