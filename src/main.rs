use std::sync::Arc;

use desa_portal_client::core::config::Config;
use desa_portal_client::core::navigation::TracingNavigator;
use desa_portal_client::features::auth::dto::LoginRequestDto;
use desa_portal_client::features::posts::PostParams;
use desa_portal_client::features::umkm::UmkmParams;
use desa_portal_client::shared::params::QueryParams;
use desa_portal_client::DesaClient;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
usage: desa-portal <command> [args]

  posts [filters-json]        list posts
  post <id-or-slug>           one post
  events                      upcoming events
  umkm [filters-json]         list UMKM
  umkm-categories             distinct UMKM categories
  contacts                    contact directory, grouped by type
  guide <slug>                one service guide
  profile <section>           one village profile section
  login <email> <password>    sign in and persist the session
  me                          refresh and print the signed-in user
  logout                      sign out";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Using backend {}", config.api.base_url);

    let client = DesaClient::connect(config, Arc::new(TracingNavigator)).await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("help");
    let arg = |i: usize| {
        args.get(i)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing argument\n\n{}", USAGE))
    };
    let filters = |i: usize| -> anyhow::Result<serde_json::Value> {
        match args.get(i) {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(serde_json::Value::Null),
        }
    };

    match command {
        "posts" => {
            let params = PostParams::from_value(&filters(1)?)?;
            print(&*client.posts.list(&params).await?)
        }
        "post" => print(&*client.posts.get_by_slug(&arg(1)?).await?),
        "events" => print(&client.events.upcoming(10).await?),
        "umkm" => {
            let params = UmkmParams::from_value(&filters(1)?)?;
            print(&*client.umkm.list(&params).await?)
        }
        "umkm-categories" => print(&*client.umkm.categories().await?),
        "contacts" => print(&client.contacts.grouped().await?),
        "guide" => print(&*client.service_guides.get_by_slug(&arg(1)?).await?),
        "profile" => print(&*client.village_profile.section(&arg(1)?).await?),
        "login" => {
            let dto = LoginRequestDto::new(arg(1)?, arg(2)?);
            print(&client.auth.login(&dto).await?)
        }
        "me" => print(&client.auth.profile().await?),
        "logout" => {
            client.auth.logout().await?;
            Ok(())
        }
        _ => {
            eprintln!("{}", USAGE);
            Ok(())
        }
    }
}

fn print<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
