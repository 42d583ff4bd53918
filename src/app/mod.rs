mod wiring;

use std::io;
use std::process::ExitCode;

use anyhow::{Context as AnyhowContext, Result};
use tokio_util::sync::CancellationToken;

use crate::commands::{Output, Status};
use crate::rest::{self, AppState, SharedStore};
use crate::{cli, context};

pub struct App {
    pub ctx: context::Context,
    pub store: SharedStore,
}

impl App {
    pub fn from_cli() -> Result<(Self, cli::Cli)> {
        let cli = crate::cli::parse();
        let ctx = context::Context::from_cli(&cli);

        crate::tracing::set_log_file(ctx.log_file.as_deref());
        log::info!("🚀 Starting wordstash");
        log::info!("🗄️ Backend: {}", ctx.backend);
        log::info!("📂 Data dir: {}", ctx.data_dir.display());

        wiring::init_data_dir(&ctx).context("initializing data dir")?;
        let store = wiring::init_store(&ctx)?;

        Ok((Self { ctx, store }, cli))
    }

    pub fn run_command(&self, cmd: &cli::Command) -> Result<Status> {
        let (mut stdout, mut stderr) = (io::stdout().lock(), io::stderr().lock());
        let mut output = Output {
            out: &mut stdout,
            err: &mut stderr,
        };
        cmd.run(self.store.as_ref(), &mut output)
    }
}

pub async fn run_daemon(app: App) -> Result<()> {
    log::info!("🌐 REST API: http://{}", app.ctx.api_listen);
    if let Some(path) = app.ctx.log_file.as_deref() {
        log::info!("📝 Log file: {}", path.display());
    }

    let shutdown = CancellationToken::new();
    let state = AppState::new(app.store.clone(), app.ctx.backend);
    let rest_shutdown = shutdown.clone();
    let addr = app.ctx.api_listen;

    let mut rest_handle = tokio::spawn(async move { rest::serve(addr, state, rest_shutdown).await });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
        }
        res = &mut rest_handle => {
            shutdown.cancel();
            return finish(res);
        }
    }

    shutdown.cancel();
    finish(rest_handle.await)
}

fn finish(result: std::result::Result<Result<()>, tokio::task::JoinError>) -> Result<()> {
    match result {
        Ok(Ok(())) => {
            log::info!("✅ Shutdown complete");
            Ok(())
        }
        Ok(Err(e)) => {
            log::error!("REST server error: {:#}", e);
            Err(e)
        }
        Err(e) => {
            log::error!("REST task failed: {}", e);
            Err(e.into())
        }
    }
}

pub async fn run() -> Result<ExitCode> {
    let (app, cli) = App::from_cli()?;

    if let Some(cmd) = &cli.cmd {
        // one-shot command mode
        return Ok(match app.run_command(cmd)? {
            Status::Ok => ExitCode::SUCCESS,
            Status::Failed => ExitCode::FAILURE,
        });
    }

    run_daemon(app).await?;
    Ok(ExitCode::SUCCESS)
}
