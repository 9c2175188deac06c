//! Plan command handlers.

use tabled::Tabled;

use gymdesk_core::{GymDesk, Plan, PlanDraft};

use crate::cli::{GlobalOpts, PlansArgs, PlansCommand};
use crate::error::CliError;
use crate::output;

use super::{Ctx, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Price")]
    price: String,
}

impl From<&Plan> for PlanRow {
    fn from(p: &Plan) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            duration: duration(p),
            price: format!("₹{}", p.price),
        }
    }
}

fn duration(p: &Plan) -> String {
    match p.duration_in_months {
        Some(1) => "1 month".into(),
        Some(n) => format!("{n} months"),
        None => "?".into(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    desk: &GymDesk,
    args: PlansArgs,
    global: &GlobalOpts,
    ctx: &Ctx,
) -> Result<(), CliError> {
    let snap = util::load(desk, global, ctx).await?;

    match args.command {
        PlansCommand::List => {
            let out = output::render_list(
                &global.output,
                &snap.plans,
                |p| PlanRow::from(p),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PlansCommand::Create {
            name,
            months,
            price,
        } => {
            let draft = PlanDraft {
                plan_name: name,
                duration_in_months: months,
                price,
            };
            desk.create_plan(&draft).await?;
            util::note(global, &format!("Plan '{}' created", draft.plan_name.trim()));
            Ok(())
        }

        PlansCommand::Update {
            plan,
            name,
            months,
            price,
        } => {
            let existing = util::resolve_plan(&snap, &plan)?;
            let mut draft = PlanDraft::from_plan(existing);
            if let Some(name) = name {
                draft.plan_name = name;
            }
            if let Some(months) = months {
                draft.duration_in_months = months;
            }
            if let Some(price) = price {
                draft.price = price;
            }
            desk.update_plan(&existing.id, &draft).await?;
            util::note(global, &format!("Plan {} updated", existing.id));
            Ok(())
        }

        PlansCommand::Delete { plan } => {
            let existing = util::resolve_plan(&snap, &plan)?;
            let prompt = format!("Delete plan '{}'?", existing.label());
            if !util::confirm(&prompt, "plans delete", global.yes)? {
                return Ok(());
            }
            desk.delete_plan(&existing.id).await?;
            util::note(global, &format!("Plan '{}' deleted", existing.name));
            Ok(())
        }
    }
}
