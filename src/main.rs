use anyhow::Result;
use clap::Parser;
use podclip::app::App;
use podclip::cli::Cli;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal state before handling panic
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging directory
    let log_dir = podclip::utils::get_log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Write to file; the terminal belongs to the TUI
    let file_appender = tracing_appender::rolling::never(&log_dir, "podclip.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    if cli.command.is_some() {
        let result = cli.execute();
        drop(guard);
        return result;
    }

    setup_panic_hook();

    let mut app = App::new(cli.no_colors)?;
    if let Some(video) = &cli.video {
        app.upload_path(video);
    }
    let result = app.run();

    drop(guard);

    result
}
