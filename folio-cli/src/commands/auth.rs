use std::path::Path;

use anyhow::Context;
use clap::Args;

use super::Site;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Admin email
    #[arg(long)]
    pub email: String,

    /// Admin password
    #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run_login(args: LoginArgs, dir: &Path) -> anyhow::Result<()> {
    let site = Site::open(dir).await?;
    let user = site
        .session
        .login(&args.email, &args.password)
        .await
        .context("Login failed")?;
    println!("Logged in as {} <{}>", user.name, user.email);
    Ok(())
}

pub async fn run_logout(dir: &Path) -> anyhow::Result<()> {
    let site = Site::open(dir).await?;
    site.session.logout().await.context("Logout failed")?;
    println!("Logged out");
    Ok(())
}

pub async fn run_whoami(dir: &Path) -> anyhow::Result<()> {
    let site = Site::open(dir).await?;
    match site.session.current() {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("Not logged in"),
    }
    Ok(())
}
