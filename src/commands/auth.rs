//! Session CLI commands.

use clap::Args;
use dialoguer::Password;

use timegrid_core::error::AppError;
use timegrid_entity::UserProfile;

use crate::context::AppContext;

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Login email
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for `register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Name of the organization to create
    pub organization: String,

    /// Admin login email
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Organization locale
    #[arg(long)]
    pub locale: Option<String>,

    /// Organization timezone
    #[arg(long)]
    pub tz: Option<String>,
}

/// Sign in with email and password.
pub async fn login(args: &LoginArgs, ctx: &AppContext) -> Result<(), AppError> {
    let password = resolve_password(args.password.as_deref())?;
    let user = ctx.session.login(&args.email, &password).await?;
    print_profile(&user);
    Ok(())
}

/// Register a new organization and sign in as its admin.
pub async fn register(args: &RegisterArgs, ctx: &AppContext) -> Result<(), AppError> {
    let password = resolve_password(args.password.as_deref())?;
    let user = ctx
        .session
        .register(
            &args.organization,
            &args.email,
            &password,
            args.locale.clone(),
            args.tz.clone(),
        )
        .await?;
    print_profile(&user);
    Ok(())
}

/// Sign in as the shared demo user.
pub async fn demo(ctx: &AppContext) -> Result<(), AppError> {
    let user = ctx.session.demo_login().await?;
    print_profile(&user);
    Ok(())
}

/// Sign out and clear the stored session.
pub async fn logout(ctx: &AppContext) -> Result<(), AppError> {
    ctx.session.logout().await;
    println!("Signed out");
    Ok(())
}

/// Show the current user, revalidating against the backend.
pub async fn whoami(ctx: &AppContext) -> Result<(), AppError> {
    match ctx.session.current_user().await? {
        Some(user) => print_profile(&user),
        None => println!("Not signed in"),
    }
    Ok(())
}

/// Exchange the current token for a fresh one.
pub async fn refresh(ctx: &AppContext) -> Result<(), AppError> {
    if ctx.session.refresh().await {
        println!("Token refreshed");
    } else {
        println!("No session to refresh");
    }
    Ok(())
}

/// Take the password from the flag or prompt for it.
fn resolve_password(given: Option<&str>) -> Result<String, AppError> {
    match given {
        Some(password) => Ok(password.to_string()),
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::configuration(format!("Failed to read password: {e}"))),
    }
}

/// Print a profile in a fixed one-line-per-field layout.
fn print_profile(user: &UserProfile) {
    println!("id:     {}", user.user_id);
    println!("email:  {}", user.email);
    println!("role:   {}", user.role);
    println!("org:    {}", user.org_id);
    println!("active: {}", user.is_active);
}
