use std::time::Duration;

use anyhow::Result;
use spincycle::{format_remaining, AppEvent, LaundryApp, MachineStatus, UserProfile};

/// Small demo loop: log in, book a machine, watch a few ticks go by, shut
/// the ticker down. The session file lands in the OS temp dir.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let session_path = std::env::temp_dir().join("spincycle-session.json");
    let app = LaundryApp::new(session_path)?;
    let mut events = app.subscribe();
    app.start().await?;

    if app.current_user().is_none() {
        app.login(UserProfile::new("Alice", "alice@example.com"))?;
    }

    app.book(1, 30, Some("6:00 PM - 7:00 PM".into())).await?;

    let watcher = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                AppEvent::Toast(toast) => println!("[{:?}] {}: {}", toast.severity, toast.title, toast.description),
                AppEvent::CycleCompleted { machine_id, .. } => println!("*bzzzt* machine {machine_id} done"),
                AppEvent::StateChanged(_) => {}
            }
        }
    });

    tokio::time::sleep(Duration::from_secs(5)).await;

    let board = app.snapshot().await;
    println!(
        "{} available / {} running / {} done",
        board.available_count, board.occupied_count, board.done_count
    );
    for machine in &board.machines {
        if machine.status == MachineStatus::Occupied {
            println!(
                "machine {}: {} left for {}",
                machine.id,
                format_remaining(machine.remaining_seconds),
                machine.occupant_name.as_deref().unwrap_or("?")
            );
        }
    }

    app.shutdown().await?;
    watcher.abort();
    Ok(())
}
