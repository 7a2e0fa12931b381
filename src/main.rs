mod cli;
mod config;
mod http;
mod panel;
mod server;
mod ui;

use anyhow::Context;
use clap::Parser;
use iced::task::Handle;
use iced::widget::{column, container};
use iced::{Element, Length, Task};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui::style;

use cli::{Cli, Command, RunArgs};
use config::AppConfig;
use http::client::{build_client, fetch};
use http::error::RequestFailure;
use http::response::HttpResponse;
use panel::{Panel, RequestId, Settlement};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "https_tester=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Serve(args)) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start tokio runtime")?;
            runtime.block_on(server::run(args))?;
            Ok(())
        }
        Some(Command::Run(args)) => run_window(args),
        None => run_window(cli.run),
    }
}

fn run_window(args: RunArgs) -> anyhow::Result<()> {
    let config = config::load(args.preset, args.config.as_deref(), &args.overrides())?;
    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let client = build_client(&config)?;
    tracing::info!(endpoint = %config.endpoint, "opening request window");

    iced::application("HTTPS Tester", update, view)
        .theme(|_| style::app_theme())
        .window_size((760.0, 520.0))
        .run_with(move || (App::new(config, client), Task::done(Message::Ready)))?;
    Ok(())
}

struct App {
    endpoint: String,
    client: reqwest::Client,
    panel: Panel,
    in_flight: Option<Handle>,
}

impl App {
    fn new(config: AppConfig, client: reqwest::Client) -> Self {
        Self {
            endpoint: config.endpoint,
            client,
            panel: Panel::new(config.messages),
            in_flight: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Ready,
    SendPressed,
    RequestSettled {
        id: RequestId,
        result: Result<HttpResponse, RequestFailure>,
    },
}

fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Ready => {
            app.panel.on_ready();
            Task::none()
        }
        Message::SendPressed => {
            if let Some(previous) = app.in_flight.take() {
                previous.abort();
            }

            let id = app.panel.on_activate();
            tracing::info!(request = %id, url = %app.endpoint, "sending request");

            let (task, handle) = Task::perform(fetch(app.client.clone(), app.endpoint.clone()), move |result| {
                Message::RequestSettled { id, result }
            })
            .abortable();
            app.in_flight = Some(handle);
            task
        }
        Message::RequestSettled { id, result } => {
            match &result {
                Ok(response) => tracing::info!(
                    request = %id,
                    status = %response.status,
                    duration_ms = response.duration_ms,
                    size_bytes = response.size_bytes,
                    "request settled"
                ),
                Err(failure) => tracing::warn!(request = %id, error = %failure, "request failed"),
            }

            let latest = app.panel.is_latest(id);
            if app.panel.on_settled(id, result.map(|response| response.body)) == Settlement::Stale {
                tracing::debug!(request = %id, "discarding outcome of superseded request");
            }
            if latest {
                app.in_flight = None;
            }
            Task::none()
        }
    }
}

fn view(app: &App) -> Element<'_, Message> {
    let header = ui::header::view(&app.endpoint);

    let body = column![
        ui::status_bar::view(app.panel.status(), app.panel.phase()),
        ui::response_panel::view(app.panel.response()),
    ]
    .spacing(14)
    .padding(16)
    .height(Length::Fill);

    let layout = column![
        header,
        container(body)
            .height(Length::Fill)
            .style(|_| style::surface_style(style::SURFACE_0, 0.0)),
    ]
    .spacing(1)
    .height(Length::Fill)
    .width(Length::Fill);

    container(layout)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_| style::flat_surface_style(style::BG))
        .into()
}
