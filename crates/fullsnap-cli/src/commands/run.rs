use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use fullsnap_core::{
    snap::{EventBus, InputEvent},
    AppConfig, PageSnap, TweenAnimator, Viewport, WindowViewport,
};
use fullsnap_tui::{
    event::{AppEvent, EventHandler},
    widgets::{SnapPagesWidget, StatusBarWidget},
    App, Panel,
};

/// Flags of the `run` command
#[derive(Debug, Default)]
pub struct RunOptions {
    pub pages: Option<usize>,
    pub goto: Option<i64>,
    pub delay_ms: u64,
}

pub async fn run(config: AppConfig, options: RunOptions) -> Result<()> {
    let page_count = options.pages.unwrap_or(config.ui.page_count);
    let app = App::new(Panel::demo(page_count), config.ui.show_status_bar);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("fullsnap"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app, &config, &options).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    config: &AppConfig,
    options: &RunOptions,
) -> Result<()> {
    let rows = terminal.size()?.height;
    let viewport = Arc::new(WindowViewport::new(app.page_height(rows) as f64));
    let animator = Arc::new(TweenAnimator::new(config.ui.animation_fps));
    let bus = Arc::new(EventBus::new());

    let snap = PageSnap::builder(config.snap.clone())
        .with_hooks(app.hooks())
        .with_panels(&app.panels)
        .build(viewport.clone(), animator);
    snap.mount(bus.clone()).await?;

    if let Some(page) = options.goto {
        let handle = snap.handle();
        let delay = Duration::from_millis(options.delay_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            info!(page, "Delayed go_to_page");
            handle.go_to_page(page, None);
        });
    }

    let event_handler = EventHandler::new(config.ui.tick_rate_ms, config.ui.animation_fps);

    // Main loop
    loop {
        terminal.draw(|frame| {
            let (pages_area, status_area) = app.layout(frame.area());
            let scroll_y = viewport.scroll_y();
            SnapPagesWidget::render(frame, pages_area, &app.panels, scroll_y, &app.theme);
            if let Some(area) = status_area {
                StatusBarWidget::render(
                    frame,
                    area,
                    snap.current_page(),
                    snap.page_count(),
                    snap.is_animating(),
                    app.log.latest().as_deref(),
                    &app.theme,
                );
            }
        })?;

        match event_handler.next(snap.is_animating())? {
            Some(AppEvent::Input(input)) => {
                bus.dispatch(input);
            }
            Some(AppEvent::Resize { height, .. }) => {
                viewport.set_height(app.page_height(height) as f64);
                bus.dispatch(InputEvent::Resize);
            }
            Some(AppEvent::Quit) => app.should_quit = true,
            Some(AppEvent::Tick) | None => {}
        }

        if app.should_quit {
            break;
        }
    }

    if let Err(e) = snap.unmount() {
        warn!("Failed to unmount page snapper: {}", e);
    }
    info!(page = snap.current_page(), "Exiting");
    Ok(())
}
