//! Session lifecycle: two-stage bootstrap wait and single teardown.

use wablast::config::selectors;
use wablast::testing::{DriverAction, MockDriver, test_config};
use wablast::{Error, Session};

#[tokio::test]
async fn bootstrap_succeeds_when_marker_is_present() {
    let (driver, handle) = MockDriver::ready();
    let session = Session::bootstrap(Box::new(driver), test_config())
        .await
        .expect("ready driver bootstraps");

    assert!(!handle.closed());
    session.teardown().await;
    assert!(handle.closed());
}

#[tokio::test]
async fn bootstrap_waits_a_second_time_for_login() {
    let (driver, handle) = MockDriver::empty();
    // Marker absent on the first wait (login pending), present on the second.
    handle.set_appears_after(selectors::AUTHENTICATED, 1);

    let session = Session::bootstrap(Box::new(driver), test_config())
        .await
        .expect("second wait observes the marker");

    let marker_waits = handle
        .actions()
        .iter()
        .filter(|action| {
            matches!(
                action,
                DriverAction::WaitFor { selector } if selector == selectors::AUTHENTICATED
            )
        })
        .count();
    assert_eq!(marker_waits, 2);

    session.teardown().await;
}

#[tokio::test]
async fn bootstrap_fails_when_marker_never_appears() {
    let (driver, handle) = MockDriver::empty();

    let result = Session::bootstrap(Box::new(driver), test_config()).await;

    assert!(matches!(result, Err(Error::Bootstrap(_))));
    // The driver is released on the failure path, exactly once.
    assert!(handle.closed());
    assert_eq!(handle.close_count(), 1);
}

#[tokio::test]
async fn teardown_closes_the_driver_exactly_once() {
    let (driver, handle) = MockDriver::ready();
    let session = Session::bootstrap(Box::new(driver), test_config())
        .await
        .unwrap();

    session.teardown().await;

    assert_eq!(handle.close_count(), 1);
}

#[tokio::test]
async fn teardown_swallows_close_faults() {
    let (driver, handle) = MockDriver::ready();
    handle.set_close_fault();
    let session = Session::bootstrap(Box::new(driver), test_config())
        .await
        .unwrap();

    // Must not panic or surface the fault.
    session.teardown().await;
    assert!(handle.closed());
}
