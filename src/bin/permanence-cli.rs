#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use permanence::{
    api::{ApiError, HttpApi, RosterApi},
    auth::{LoginForm, Registration},
    config::ClientConfig,
    exchange::{
        candidates, resolve_click, submit_request, Confirm, Decision, FixedDecision,
        RequestDraft, ResolveOutcome, SubmitOutcome,
    },
    io,
    model::{ExchangeRequest, ReasonCode, UserId},
    notification::{ConsoleNotifier, Notice, Notifier},
    pipeline::{load_home_calendar, load_requests_view},
    session::{Access, Session, SessionError},
    storage::{JsonSessionStore, SessionStore},
    zone::{Zone, ZoneStyle},
};
use std::io::{BufRead, Write};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI des permanences : calendrier de zone et échanges de gardes
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`, filtre via RUST_LOG)
    #[arg(long, global = true)]
    log: bool,

    /// URL de l'API (sinon PERMANENCE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Fichier de session (sinon PERMANENCE_SESSION)
    #[arg(long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Se connecter et enregistrer la session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Créer un compte
    Register {
        /// Prénom et nom
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Nom complet de la zone, ex. "North-West Lendelede"
        #[arg(long)]
        zone: Zone,
        #[arg(long)]
        admin: bool,
    },

    /// Supprimer la session locale
    Logout,

    /// Afficher l'utilisateur connecté
    Whoami,

    /// Lister les zones connues
    Zones,

    /// Calendrier de la zone (permanences + demandes)
    Calendar {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Ses propres gardes
    Shifts,

    /// Lister les demandes d'échange
    Requests,

    /// Demander un échange de gardes
    Request {
        /// Jour de garde (YYYY-MM-DD), répétable
        #[arg(long = "date")]
        dates: Vec<NaiveDate>,
        /// Collègue visé (nom ou id) ; absent = demande d'urgence
        #[arg(long)]
        to: Option<String>,
        /// sick | vacation | others
        #[arg(long)]
        reason: Option<ReasonCode>,
    },

    /// Traiter la demande couvrant une date (accepter / refuser)
    Click {
        #[arg(long)]
        date: NaiveDate,
        /// Accepter sans confirmation
        #[arg(long, conflicts_with = "reject")]
        yes: bool,
        /// Refuser sans confirmation
        #[arg(long)]
        reject: bool,
    },
}

/// Confirmation interactive sur stdin.
struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&self, request: &ExchangeRequest, date: NaiveDate) -> Decision {
        print!(
            "Exchange request {} on {date}: [a]ccept / [r]eject / [c]ancel? ",
            request.id
        );
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_err() {
            return Decision::Cancel;
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "a" | "accept" | "y" | "yes" => Decision::Accept,
            "r" | "reject" => Decision::Reject,
            _ => Decision::Cancel,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url)?;
    }
    if let Some(path) = &cli.session {
        config.session_file = path.into();
    }

    let store = JsonSessionStore::open(&config.session_file);
    let base = HttpApi::new(config.api_url.clone());
    let notifier = ConsoleNotifier;

    let code = match cli.cmd {
        Commands::Login { email, password } => {
            let form = LoginForm::new(email, password);
            if let Err(errors) = form.validate() {
                for msg in errors.values() {
                    notifier.notify(Notice::error(msg));
                }
                1
            } else {
                match base.login(&form).await {
                    Ok(auth) => match auth.user {
                        Some(user) => {
                            store.save(&Session::new(auth.token, user))?;
                            notifier.notify(Notice::success("Login Successful!"));
                            0
                        }
                        None => {
                            notifier.notify(Notice::error("User data missing from response"));
                            1
                        }
                    },
                    Err(e) => report(&e, &store, &notifier, "An error occurred. Please try again."),
                }
            }
        }
        Commands::Register {
            name,
            email,
            password,
            zone,
            admin,
        } => {
            let registration = Registration {
                name,
                email,
                password,
                is_admin: admin,
                zone,
            };
            if let Err(errors) = registration.validate() {
                for msg in errors.values() {
                    notifier.notify(Notice::error(msg));
                }
                1
            } else {
                match base.register(&registration).await {
                    Ok(auth) => {
                        if let Some(user) = auth.user {
                            store.save(&Session::new(auth.token, user))?;
                            notifier.notify(Notice::success("Registration successful!"));
                        } else {
                            notifier.notify(Notice::success(
                                "Registration successful! Please log in.",
                            ));
                        }
                        0
                    }
                    Err(e) => report(&e, &store, &notifier, "Registration failed"),
                }
            }
        }
        Commands::Logout => {
            store.clear()?;
            notifier.notify(Notice::info("Logged out."));
            0
        }
        Commands::Whoami => {
            let session = require(&store, Access::Member)?;
            let user = &session.user;
            println!(
                "{} ({}) | {} [{}]{}",
                user.name,
                user.id,
                user.zone,
                user.zone.abbreviate(config.zone_style),
                if user.is_admin { " | admin" } else { "" }
            );
            0
        }
        Commands::Zones => {
            for zone in Zone::ALL {
                println!(
                    "{:<12} {}",
                    zone.abbreviate(ZoneStyle::Short),
                    zone.name()
                );
            }
            0
        }
        Commands::Calendar { out_json, out_csv } => {
            let session = require(&store, Access::Member)?;
            let api = session.api(&base);
            match load_home_calendar(&api, &session).await {
                Ok(home) => {
                    if let Some(path) = out_json {
                        io::export_events_json(path, &home.events)?;
                    }
                    if let Some(path) = out_csv {
                        io::export_events_csv(path, &home.events)?;
                    }
                    println!(
                        "{} | {}",
                        session.zone().abbreviate(config.zone_style),
                        session.user.name
                    );
                    println!("{}", io::render_events(&home.events));
                    0
                }
                Err(e) => report(&e, &store, &notifier, "Failed to load calendar."),
            }
        }
        Commands::Shifts => {
            let session = require(&store, Access::Member)?;
            let api = session.api(&base);
            match load_requests_view(&api, &session).await {
                Ok(view) => {
                    let events = view.events(&session, &RequestDraft::new());
                    println!("{}", io::render_events(&events));
                    0
                }
                Err(e) => report(&e, &store, &notifier, "Error fetching user duties."),
            }
        }
        Commands::Requests => {
            let session = require(&store, Access::Member)?;
            let api = session.api(&base);
            match load_requests_view(&api, &session).await {
                Ok(view) => {
                    let events =
                        permanence::calendar::format_exchange_events(&view.requests, &view.directory);
                    println!("{}", io::render_events(&events));
                    0
                }
                Err(e) => report(&e, &store, &notifier, "Error fetching exchange requests."),
            }
        }
        Commands::Request { dates, to, reason } => {
            let session = require(&store, Access::Member)?;
            let api = session.api(&base);
            let mut draft = RequestDraft::new();
            draft.reason = reason;
            submit_dates(&api, &session, &mut draft, &dates, to.as_deref(), &store, &notifier)
                .await?
        }
        Commands::Click { date, yes, reject } => {
            let session = require(&store, Access::Member)?;
            let api = session.api(&base);
            match load_requests_view(&api, &session).await {
                Ok(view) => {
                    let confirm: Box<dyn Confirm> = if yes {
                        Box::new(FixedDecision(Decision::Accept))
                    } else if reject {
                        Box::new(FixedDecision(Decision::Reject))
                    } else {
                        Box::new(PromptConfirm)
                    };
                    let outcome = resolve_click(
                        &api,
                        &session,
                        &view.requests,
                        date,
                        confirm.as_ref(),
                        &notifier,
                    )
                    .await;
                    match outcome {
                        ResolveOutcome::Accepted { requests } => {
                            let events = permanence::calendar::format_exchange_events(
                                &requests,
                                &view.directory,
                            );
                            println!("{}", io::render_events(&events));
                            0
                        }
                        ResolveOutcome::Rejected
                        | ResolveOutcome::Cancelled
                        | ResolveOutcome::AlreadyAccepted => 0,
                        ResolveOutcome::Failed(e) => {
                            expire_if_unauthorized(&e, &store, &notifier);
                            1
                        }
                        ResolveOutcome::NoRequest | ResolveOutcome::NotAllowed => 1,
                    }
                }
                Err(e) => report(&e, &store, &notifier, "Error fetching exchange requests."),
            }
        }
    };

    std::process::exit(code);
}

async fn submit_dates(
    api: &HttpApi,
    session: &Session,
    draft: &mut RequestDraft,
    dates: &[NaiveDate],
    to: Option<&str>,
    store: &JsonSessionStore,
    notifier: &dyn Notifier,
) -> Result<i32> {
    // sans date, la validation locale suffit : aucune requête
    if !dates.is_empty() || to.is_some() {
        let view = match load_requests_view(api, session).await {
            Ok(view) => view,
            Err(e) => return Ok(report(&e, store, notifier, "Error fetching user duties.")),
        };
        if let Some(target) = to {
            let me = session.user_id();
            let found = candidates(&view.directory, me)
                .into_iter()
                .find(|m| m.id.as_str() == target || m.name.eq_ignore_ascii_case(target))
                .map(|m| m.id.clone());
            draft.target = Some(
                found
                    .with_context(|| format!("unknown colleague in zone: {target}"))?,
            );
        }
        for date in dates {
            if let Err(e) = draft.toggle_date(*date, &view.duties, session.user_id()) {
                notifier.notify(Notice::error(e.to_string()));
            }
        }
    }

    let code = match submit_request(api, session, draft, notifier).await {
        SubmitOutcome::Submitted(payload) => {
            let target = payload
                .accepting_user
                .as_ref()
                .map(UserId::as_str)
                .unwrap_or("anyone (emergency)");
            println!("{} day(s) offered to {target}", payload.days.len());
            0
        }
        SubmitOutcome::NothingSelected => 1,
        SubmitOutcome::Failed(e) => {
            expire_if_unauthorized(&e, store, notifier);
            1
        }
    };
    Ok(code)
}

fn require(store: &JsonSessionStore, access: Access) -> Result<Session, SessionError> {
    store.require(access)
}

/// Convertit une erreur API en notification ; une session refusée est supprimée.
fn report(err: &ApiError, store: &JsonSessionStore, notifier: &dyn Notifier, fallback: &str) -> i32 {
    match err {
        ApiError::Validation(errors) => {
            for msg in errors.values() {
                notifier.notify(Notice::error(msg));
            }
        }
        ApiError::Rejected(msg) => notifier.notify(Notice::error(msg)),
        ApiError::Unauthorized(_) => expire_if_unauthorized(err, store, notifier),
        _ => notifier.notify(Notice::error(fallback)),
    }
    1
}

fn expire_if_unauthorized(err: &ApiError, store: &JsonSessionStore, notifier: &dyn Notifier) {
    if err.is_auth() {
        if let Err(e) = store.clear() {
            tracing::warn!(error = %e, "could not remove session file");
        }
        notifier.notify(Notice::error("Session expired, please log in again."));
    }
}
