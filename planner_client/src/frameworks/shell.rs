use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};

use crate::domain::View;
use crate::frameworks::config;
use crate::interface_adapters::clients::{BackendClient, IdentityToolkitClient};
use crate::interface_adapters::commands::{Command, HELP, ParseError};
use crate::interface_adapters::render;
use crate::use_cases::{ApiClient, App, AppContext, Navigation, Resolution, SessionStore};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout belongs to the rendered pages.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return;
        }
    };
    tracing::debug!(
        api_url = %config.api_url,
        identity_url = %config.identity_url,
        timeout_ms = config.http_timeout.as_millis() as u64,
        "clients configured."
    );

    let backend = match BackendClient::new(config.api_url.clone(), config.http_timeout) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to build backend client");
            return;
        }
    };
    let identity = match IdentityToolkitClient::new(
        config.identity_url.clone(),
        config.token_url.clone(),
        config.identity_api_key.clone(),
        config.http_timeout,
    ) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to build identity client");
            return;
        }
    };

    let api = ApiClient::new(Arc::new(backend));
    let session = Arc::new(SessionStore::new(Arc::new(identity), api.clone()));
    let app = App::new(AppContext { session, api });

    let stdin = BufReader::new(tokio::io::stdin());
    if let Err(e) = Shell::new(app, stdin, tokio::io::stdout()).run().await {
        tracing::error!(error = %e, "terminal i/o failed");
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front end: one command in, the current page out.
pub struct Shell<R, W> {
    app: App,
    input: Lines<R>,
    output: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(app: App, input: R, output: W) -> Self {
        Self {
            app,
            input: input.lines(),
            output,
        }
    }

    pub async fn run(mut self) -> io::Result<()> {
        self.show_page().await?;

        loop {
            self.write("> ").await?;
            let Some(line) = self.input.next_line().await? else {
                break;
            };

            let flow = match line.parse::<Command>() {
                Ok(command) => self.execute(command).await?,
                Err(ParseError::Empty) => continue,
                Err(e) => {
                    self.notify(&e.to_string()).await?;
                    continue;
                }
            };
            if let Flow::Quit = flow {
                break;
            }

            // The guard runs again whenever the session changed under the page.
            if let Some(Resolution::Redirect(to)) = self.app.sync_session().await {
                tracing::info!(to = to.path(), "session changed, page redirected.");
            }
            self.show_page().await?;
        }
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> io::Result<Flow> {
        let app = &mut self.app;
        let notice = match command {
            Command::Open(path) => {
                app.navigate(Navigation::path(path)).await;
                None
            }
            Command::Login { email, password } => {
                let next = app.login.login(&email, &password, &app.ctx.session).await;
                app.follow(next).await;
                app.login.error().map(str::to_string)
            }
            Command::Signup { email, password } => {
                let next = app.signup.signup(&email, &password, &app.ctx.session).await;
                app.follow(next).await;
                app.signup.error().map(str::to_string)
            }
            Command::Logout => {
                app.ctx.session.logout();
                None
            }
            Command::Plan {
                city,
                interests,
                days,
            } => {
                if !enter(app, View::Planner).await {
                    return Ok(Flow::Continue);
                }
                app.planner.city = city;
                app.planner.interests = interests;
                app.planner.days = days;
                app.planner
                    .submit(&app.ctx.api)
                    .await
                    .err()
                    .map(|e| e.user_message())
            }
            Command::Save => {
                if app.current() != View::Planner {
                    Some("Generate an itinerary first".to_string())
                } else {
                    Some(app.planner.save(&app.ctx.api, &app.ctx.session).await)
                }
            }
            Command::Hotels => match (app.current(), app.planner.find_hotels()) {
                (View::Planner, Some(next)) => {
                    app.navigate(next).await;
                    None
                }
                _ => Some("Generate an itinerary first".to_string()),
            },
            Command::Search(city) => {
                if !enter(app, View::Hotels).await {
                    return Ok(Flow::Continue);
                }
                app.hotels.query.city = city;
                app.hotels
                    .search(&app.ctx.api)
                    .await
                    .err()
                    .map(|e| e.user_message())
            }
            Command::Stay {
                check_in,
                check_out,
                guests,
            } => {
                if !enter(app, View::Hotels).await {
                    return Ok(Flow::Continue);
                }
                app.hotels
                    .set_stay(check_in, check_out, guests)
                    .err()
                    .map(|e| e.user_message())
            }
            Command::Book(hotel_id) => {
                if app.current() != View::Hotels {
                    Some("Search for hotels first".to_string())
                } else {
                    Some(app.hotels.book(&hotel_id, &app.ctx.api, &app.ctx.session).await)
                }
            }
            Command::View(id) => {
                if !enter(app, View::Dashboard).await {
                    return Ok(Flow::Continue);
                }
                (!app.dashboard.open(&id)).then(|| format!("No saved itinerary with id {id}"))
            }
            Command::Close => {
                app.dashboard.close();
                None
            }
            Command::Delete(id) => {
                if !enter(app, View::Dashboard).await {
                    return Ok(Flow::Continue);
                }
                if self.confirm(&format!("Delete itinerary {id}? [y/N] ")).await? {
                    let app = &mut self.app;
                    app.dashboard
                        .delete(&id, &app.ctx.api, &app.ctx.session)
                        .await
                } else {
                    None
                }
            }
            Command::BookHotels(id) => {
                if !enter(app, View::Dashboard).await {
                    return Ok(Flow::Continue);
                }
                match app.dashboard.book_hotels(&id) {
                    Some(next) => {
                        app.navigate(next).await;
                        None
                    }
                    None => Some(format!("No saved itinerary with id {id}")),
                }
            }
            Command::Help => Some(HELP.to_string()),
            Command::Quit => return Ok(Flow::Quit),
        };

        if let Some(notice) = notice {
            self.notify(&notice).await?;
        }
        Ok(Flow::Continue)
    }

    async fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.write(prompt).await?;
        let answer = self.input.next_line().await?.unwrap_or_default();
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    async fn show_page(&mut self) -> io::Result<()> {
        let page = render::render(&self.app);
        self.write(&format!("\n{page}\n")).await
    }

    async fn notify(&mut self, message: &str) -> io::Result<()> {
        self.write(&format!("! {message}\n")).await
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }
}

// Moves to `view` unless it is already on screen; false if the guard refused.
async fn enter(app: &mut App, view: View) -> bool {
    if app.current() == view {
        return true;
    }
    matches!(
        app.navigate(Navigation::to(view)).await,
        Resolution::Render(_)
    )
}
