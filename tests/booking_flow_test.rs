//! End-to-end flows through the `LaundryApp` facade: session-gated booking,
//! logout, and session persistence across an app rebuild.

use spincycle::{BookingError, LaundryApp, MachineStatus, UserProfile};

fn alice() -> UserProfile {
    UserProfile {
        name: "Alice".into(),
        email: "alice@example.com".into(),
        phone: Some("555-0100".into()),
    }
}

#[tokio::test]
async fn booking_requires_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let app = LaundryApp::new(dir.path().join("session.json")).unwrap();

    assert_eq!(
        app.book(1, 30, None).await,
        Err(BookingError::NotAuthenticated)
    );
}

#[tokio::test]
async fn login_book_and_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let app = LaundryApp::new(dir.path().join("session.json")).unwrap();

    app.login(alice()).unwrap();
    app.book(1, 30, Some("6:00 PM - 7:00 PM".into()))
        .await
        .unwrap();

    let board = app.snapshot().await;
    assert_eq!(board.occupied_count, 1);
    assert_eq!(board.available_count, 3);

    let machine = &board.machines[0];
    assert_eq!(machine.id, 1);
    assert_eq!(machine.status, MachineStatus::Occupied);
    assert_eq!(machine.remaining_seconds, 1800);
    assert_eq!(machine.occupant_name.as_deref(), Some("Alice"));
    assert_eq!(machine.time_slot.as_deref(), Some("6:00 PM - 7:00 PM"));
}

#[tokio::test]
async fn logout_closes_the_booking_surface() {
    let dir = tempfile::tempdir().unwrap();
    let app = LaundryApp::new(dir.path().join("session.json")).unwrap();

    app.login(alice()).unwrap();
    app.book(1, 30, None).await.unwrap();
    app.logout().unwrap();

    assert!(app.current_user().is_none());
    assert_eq!(
        app.book(2, 30, None).await,
        Err(BookingError::NotAuthenticated)
    );

    // Machine 1 keeps counting; logout does not touch machine state.
    let board = app.snapshot().await;
    assert_eq!(board.occupied_count, 1);
}

#[tokio::test]
async fn session_survives_an_app_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let app = LaundryApp::new(path.clone()).unwrap();
        app.login(alice()).unwrap();
    }

    let app = LaundryApp::new(path).unwrap();
    assert_eq!(app.current_user(), Some(alice()));
    // Machine state does not survive; the board comes back fresh.
    let board = app.snapshot().await;
    assert_eq!(board.available_count, 4);

    app.book(3, 90, None).await.unwrap();
    let machine = app.snapshot().await.machines[2].clone();
    assert_eq!(machine.remaining_seconds, 5400);
    assert_eq!(machine.occupant_name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn invalid_duration_is_reported_distinctly() {
    let dir = tempfile::tempdir().unwrap();
    let app = LaundryApp::new(dir.path().join("session.json")).unwrap();
    app.login(alice()).unwrap();

    assert_eq!(
        app.book(1, 40, None).await,
        Err(BookingError::InvalidDuration(40))
    );
    assert_eq!(
        app.book(99, 30, None).await,
        Err(BookingError::MachineNotFound(99))
    );
    assert_eq!(app.snapshot().await.available_count, 4);
}
