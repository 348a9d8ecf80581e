use anyhow::Result;
use clap::Parser;
use meeting_assistant::{
    create_router, AppState, BusClient, BusResponder, BusSideChannel, Config, MeetingSession,
    SessionConfig, SummaryReporter,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "meeting-assistant")]
#[command(about = "In-call transcript accumulation and wake-phrase Q&A")]
struct Cli {
    /// Call to join (default: randomly generated meeting id)
    #[arg(long)]
    call_id: Option<String>,

    /// Config file path, without extension
    #[arg(long, default_value = "config/meeting-assistant")]
    config: String,

    /// Override the configured wake phrase
    #[arg(long)]
    wake_phrase: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    let session_config = SessionConfig {
        call_id: cli
            .call_id
            .unwrap_or_else(|| format!("meeting-{}", uuid::Uuid::new_v4())),
        wake_phrase: cli.wake_phrase.unwrap_or_else(|| cfg.agent.wake_phrase.clone()),
        bot_id: cfg.agent.bot_id.clone(),
        bot_name: cfg.agent.bot_name.clone(),
        question_policy: cfg.agent.question_policy,
    };

    info!("{} v0.1.0", cfg.service.name);
    info!("Call ID: {}", session_config.call_id);
    info!("Wake phrase: {:?}", session_config.wake_phrase);

    // Join the call: connect to the bus and announce the assistant.
    let bus = Arc::new(BusClient::connect(&cfg.bus.url, session_config.call_id.clone()).await?);
    bus.announce_presence(
        &session_config.bot_id,
        &session_config.bot_name,
        &cfg.agent.instructions,
    )
    .await?;

    let responder = Arc::new(BusResponder::new(Arc::clone(&bus)));
    let side_channel = Arc::new(BusSideChannel::new(Arc::clone(&bus)));
    let session = Arc::new(MeetingSession::new(session_config, responder, side_channel));

    // HTTP status API
    let app = create_router(AppState::new(Arc::clone(&session)));
    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP status API listening on {}", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {}", e);
        }
    });

    // Drive the session from the agent event stream.
    let events = bus.subscribe_events().await?;
    let event_loop = tokio::spawn(Arc::clone(&session).run(events));

    info!("Meeting assistant active, press Ctrl+C to stop");

    // Run until interrupted or the event stream closes. The summary is
    // printed in either case.
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
        _ = event_loop => {
            info!("Event loop finished");
        }
    }

    let transcript = session.transcript().await;
    if !transcript.is_empty() {
        SummaryReporter::new().render(&transcript, &mut std::io::stdout())?;
    }

    let stats = session.stats().await;
    info!(
        "Session {} recorded {} entries ({} questions) over {:.1}s",
        stats.call_id, stats.transcript_entries, stats.questions_asked, stats.duration_secs
    );

    bus.close().await?;

    Ok(())
}
