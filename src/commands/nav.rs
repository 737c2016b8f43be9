//! Navigation CLI commands.

use clap::Args;

use timegrid_core::error::AppError;
use timegrid_nav::GuardAction;

use crate::context::AppContext;

/// Arguments for `open`
#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Destination path, e.g. `/catalog/groups`
    pub path: String,
}

/// List the application routes.
pub fn routes(ctx: &AppContext) -> Result<(), AppError> {
    for route in ctx.guard.table().routes() {
        if let Some(target) = &route.redirect {
            println!("{:32} -> {}", route.path, target);
            continue;
        }
        let auth = if route.meta.requires_auth {
            "auth"
        } else {
            "public"
        };
        let roles = match &route.meta.roles {
            Some(roles) => roles
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(","),
            None => "any".to_string(),
        };
        println!("{:32} {:7} roles: {}", route.path, auth, roles);
    }
    Ok(())
}

/// Evaluate a navigation to the given path against the current session.
pub fn open(args: &OpenArgs, ctx: &AppContext) -> Result<(), AppError> {
    let snapshot = ctx.session.snapshot();
    let decision = ctx.guard.resolve(&args.path, &snapshot);

    if let Some(title) = &decision.title {
        println!("title: {title}");
    }
    match decision.action {
        GuardAction::Proceed => println!("{} -> proceed", args.path),
        GuardAction::Redirect(target) => println!("{} -> redirect {}", args.path, target),
    }
    Ok(())
}
