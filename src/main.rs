use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use fleetdesk::api::{ApiClient, AuthApi, ListQuery, Page, PriceApi, ServiceApi};
use fleetdesk::config::Config;
use fleetdesk::domain::{
    FormDraft, PriceDraft, PriceFilter, Resource, ServiceDraft, ServiceFilter,
};
use fleetdesk::logging::{self, LogTarget};
use fleetdesk::session::{Session, SessionStore};
use fleetdesk::ui::{self, Console};

#[derive(Parser, Debug)]
#[command(name = "fleetdesk", version, about = "Operator console for fleet prices and services")]
struct Cli {
    /// Config file (default: <config_dir>/fleetdesk/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Session file (default: <data_dir>/fleetdesk/session.json)
    #[arg(long, global = true, value_name = "PATH")]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the terminal console (default)
    Tui,
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        /// Visible in shell history and the process list; omit it to read
        /// the password from stdin instead
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in admin profile
    Whoami,
    /// Manage price entries
    #[command(subcommand)]
    Prices(PriceCommand),
    /// Manage service entries
    #[command(subcommand)]
    Services(ServiceCommand),
}

#[derive(Args, Debug)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Rows per page (default: from config)
    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum PriceCommand {
    List {
        #[arg(long)]
        vehicle_type: Option<String>,
        #[arg(long)]
        sub_type: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    Get {
        id: String,
    },
    Create(PriceFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: PriceFields,
    },
    Delete {
        id: String,
    },
    /// Create many entries from a JSON array of drafts
    Import {
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct PriceFields {
    #[arg(long)]
    vehicle_type: Option<String>,
    #[arg(long)]
    sub_type: Option<String>,
    #[arg(long)]
    min_km: Option<String>,
    #[arg(long)]
    max_km: Option<String>,
    #[arg(long)]
    rate: Option<String>,
    /// HH:MM-HH:MM
    #[arg(long)]
    time_slot: Option<String>,
}

impl PriceFields {
    /// In `PriceDraft::fields()` order.
    fn overrides(&self) -> Vec<Option<String>> {
        vec![
            self.vehicle_type.clone(),
            self.sub_type.clone(),
            self.min_km.clone(),
            self.max_km.clone(),
            self.rate.clone(),
            self.time_slot.clone(),
        ]
    }
}

#[derive(Subcommand, Debug)]
enum ServiceCommand {
    List {
        #[arg(long)]
        vehicle_type: Option<String>,
        #[arg(long)]
        sub_type: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        active: Option<bool>,
        #[command(flatten)]
        page: PageArgs,
    },
    Get {
        id: String,
    },
    Create(ServiceFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: ServiceFields,
    },
    Delete {
        id: String,
    },
    Activate {
        id: String,
    },
    Deactivate {
        id: String,
    },
    /// Create many entries from a JSON array of drafts
    Import {
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ServiceFields {
    #[arg(long)]
    vehicle_type: Option<String>,
    #[arg(long)]
    sub_type: Option<String>,
    #[arg(long)]
    city: Option<String>,
    /// yes / no
    #[arg(long)]
    active: Option<String>,
    /// HH:MM-HH:MM
    #[arg(long)]
    service_hours: Option<String>,
}

impl ServiceFields {
    /// In `ServiceDraft::fields()` order.
    fn overrides(&self) -> Vec<Option<String>> {
        vec![
            self.vehicle_type.clone(),
            self.sub_type.clone(),
            self.city.clone(),
            self.active.clone(),
            self.service_hours.clone(),
        ]
    }
}

struct CliContext {
    config: Config,
    session_store: SessionStore,
    session: Session,
    client: ApiClient,
}

impl CliContext {
    fn load(cli: &Cli) -> Result<Self> {
        let path = cli.config.clone().unwrap_or_else(Config::config_path);
        let mut config = Config::load_from(&path)?;
        if let Some(url) = &cli.base_url {
            config.override_base_url(url);
            config.validate()?;
        }

        let session_store = SessionStore::new(
            cli.session
                .clone()
                .unwrap_or_else(SessionStore::default_path),
        );
        // A corrupt session file must not block `logout`.
        let session = session_store.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring unreadable session");
            Session::default()
        });
        let client = ApiClient::new(&config.api)?.with_token(session.token.clone());

        Ok(Self {
            config,
            session_store,
            session,
            client,
        })
    }

    fn page_query<F>(&self, filter: F, page: &PageArgs) -> ListQuery<F> {
        let limit = page.limit.unwrap_or(self.config.defaults.page_size).max(1);
        ListQuery {
            filter,
            page: page.page.max(1),
            limit,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let target = match cli.command {
        None | Some(Command::Tui) => LogTarget::Console,
        _ => LogTarget::Cli,
    };
    logging::init(target);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = CliContext::load(&cli)?;
    match cli.command {
        None | Some(Command::Tui) => {
            let console = Console {
                profile: ctx.session.profile.clone(),
                config: ctx.config,
                client: ctx.client,
                session: ctx.session_store,
            };
            ui::run(console).await?;
        }
        Some(Command::Login { email, password }) => {
            let password = match password {
                Some(password) => {
                    tracing::warn!("--password ends up in shell history; prefer stdin");
                    password
                }
                None => read_password()?,
            };
            let login = AuthApi::new(ctx.client).login(&email, &password).await?;
            ctx.session_store.save(&Session {
                token: Some(login.token),
                profile: Some(login.profile.clone()),
            })?;
            print_json(&login.profile)?;
        }
        Some(Command::Logout) => {
            ctx.session_store.clear()?;
            eprintln!("Logged out");
        }
        Some(Command::Whoami) => {
            if !ctx.session.is_logged_in() {
                bail!("not logged in; run `fleetdesk login`");
            }
            let profile = AuthApi::new(ctx.client).profile().await?;
            ctx.session_store.cache_profile(profile.clone())?;
            print_json(&profile)?;
        }
        Some(Command::Prices(command)) => run_prices(&ctx, command).await?,
        Some(Command::Services(command)) => run_services(&ctx, command).await?,
    }
    Ok(())
}

async fn run_prices(ctx: &CliContext, command: PriceCommand) -> Result<()> {
    let api = PriceApi::new(ctx.client.clone());
    match command {
        PriceCommand::List {
            vehicle_type,
            sub_type,
            page,
        } => {
            let filter = PriceFilter {
                vehicle_type,
                sub_type,
            };
            let page = api.list(&ctx.page_query(filter, &page)).await?;
            print_page(&page)?;
        }
        PriceCommand::Get { id } => print_json(&api.get(&id).await?)?,
        PriceCommand::Create(fields) => {
            let draft: PriceDraft = build_draft(None, &fields.overrides())?;
            print_json(&api.create(&draft).await?)?;
        }
        PriceCommand::Update { id, fields } => {
            let current = api.get(&id).await?.to_draft();
            let draft = build_draft(Some(&current), &fields.overrides())?;
            print_json(&api.update(&id, &draft).await?)?;
        }
        PriceCommand::Delete { id } => {
            api.delete(&id).await?;
            print_json(&json!({ "deleted": id }))?;
        }
        PriceCommand::Import { file } => {
            let drafts: Vec<PriceDraft> = read_drafts(&file)?;
            print_json(&api.bulk_create(&drafts).await?)?;
        }
    }
    Ok(())
}

async fn run_services(ctx: &CliContext, command: ServiceCommand) -> Result<()> {
    let api = ServiceApi::new(ctx.client.clone());
    match command {
        ServiceCommand::List {
            vehicle_type,
            sub_type,
            city,
            active,
            page,
        } => {
            let filter = ServiceFilter {
                vehicle_type,
                sub_type,
                city,
                is_active: active,
            };
            let page = api.list(&ctx.page_query(filter, &page)).await?;
            print_page(&page)?;
        }
        ServiceCommand::Get { id } => print_json(&api.get(&id).await?)?,
        ServiceCommand::Create(fields) => {
            let base = ServiceDraft::default();
            let draft = build_draft(Some(&base), &fields.overrides())?;
            print_json(&api.create(&draft).await?)?;
        }
        ServiceCommand::Update { id, fields } => {
            let current = api.get(&id).await?.to_draft();
            let draft = build_draft(Some(&current), &fields.overrides())?;
            print_json(&api.update(&id, &draft).await?)?;
        }
        ServiceCommand::Delete { id } => {
            api.delete(&id).await?;
            print_json(&json!({ "deleted": id }))?;
        }
        ServiceCommand::Activate { id } => print_json(&api.set_active(&id, true).await?)?,
        ServiceCommand::Deactivate { id } => print_json(&api.set_active(&id, false).await?)?,
        ServiceCommand::Import { file } => {
            let drafts: Vec<ServiceDraft> = read_drafts(&file)?;
            print_json(&api.bulk_create(&drafts).await?)?;
        }
    }
    Ok(())
}

/// Runs flag values through the same parsing and checks as the form dialog.
/// Flags that were not given keep the value from `base` (or stay blank).
fn build_draft<D: FormDraft>(base: Option<&D>, overrides: &[Option<String>]) -> Result<D> {
    let mut values = base
        .map(FormDraft::to_values)
        .unwrap_or_else(|| vec![String::new(); D::fields().len()]);
    for (value, flag) in values.iter_mut().zip(overrides) {
        if let Some(flag) = flag {
            *value = flag.clone();
        }
    }
    let draft = D::from_values(&values)?;
    draft.validate()?;
    Ok(draft)
}

fn read_drafts<D>(path: &Path) -> Result<Vec<D>>
where
    D: FormDraft + serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let drafts: Vec<D> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of drafts", path.display()))?;
    if drafts.is_empty() {
        bail!("{} contains no entries", path.display());
    }
    for (index, draft) in drafts.iter().enumerate() {
        draft
            .validate()
            .with_context(|| format!("entry {} is invalid", index + 1))?;
    }
    Ok(drafts)
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("password is required");
    }
    Ok(password)
}

fn print_page<T: Serialize>(page: &Page<T>) -> Result<()> {
    print_json(&json!({
        "data": page.items,
        "pagination": page.pagination,
    }))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_nested_commands() {
        let cli = Cli::try_parse_from([
            "fleetdesk",
            "--base-url",
            "http://localhost:9/api",
            "services",
            "list",
            "--city",
            "Pune",
            "--active",
            "true",
            "--limit",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9/api"));
        match cli.command {
            Some(Command::Services(ServiceCommand::List {
                city, active, page, ..
            })) => {
                assert_eq!(city.as_deref(), Some("Pune"));
                assert_eq!(active, Some(true));
                assert_eq!(page.page, 1);
                assert_eq!(page.limit, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn build_draft_requires_fields_on_create() {
        let fields = PriceFields {
            vehicle_type: Some("auto".into()),
            sub_type: None,
            min_km: Some("0".into()),
            max_km: Some("5".into()),
            rate: None,
            time_slot: None,
        };
        let err = build_draft::<PriceDraft>(None, &fields.overrides()).unwrap_err();
        assert!(err.to_string().to_lowercase().contains("rate"), "{}", err);
    }

    #[test]
    fn build_draft_overlays_existing_values() {
        let current = PriceDraft {
            vehicle_type: "car".into(),
            sub_type: "sedan".into(),
            min_km: 0.0,
            max_km: 10.0,
            rate: 14.0,
            time_slot: None,
        };
        let fields = PriceFields {
            vehicle_type: None,
            sub_type: None,
            min_km: None,
            max_km: None,
            rate: Some("15.5".into()),
            time_slot: None,
        };
        let draft = build_draft(Some(&current), &fields.overrides()).unwrap();
        assert_eq!(draft.rate, 15.5);
        assert_eq!(draft.sub_type, "sedan");
    }
}
