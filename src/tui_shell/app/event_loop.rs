use super::*;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.drain_completions();
        app.tick(Instant::now());

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            tracing::info!("dashboard closed");
            return Ok(());
        }

        if event::poll(POLL_INTERVAL).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => app.handle_key(k, Instant::now()),
                _ => {}
            }
        }
    }
}
