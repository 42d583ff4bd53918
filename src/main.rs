use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    wordstash::tracing::init();

    match wordstash::app::run().await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
