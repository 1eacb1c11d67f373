//! End-to-end tests against the live mock calculator.
//!
//! # Design
//! Each test starts the mock server on a random port in a background thread
//! with its own current-thread runtime, then drives `RestCalculator` over
//! real HTTP through `UreqTransport`.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use calc_core::{CalcError, ClientConfig, Operation, Quotient, RestCalculator, RetryPolicy};
use mock_server::{MockState, StatusCode};

/// Start the mock server with `state` and return its address.
fn spawn_server(state: Arc<MockState>) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, state).await
        })
        .unwrap();
    });

    addr
}

fn base_url(addr: SocketAddr) -> String {
    format!("http://{addr}/operation")
}

/// Same retry count as the default policy but without the waits.
fn fast_calculator(addr: SocketAddr) -> RestCalculator {
    let config = ClientConfig::new(base_url(addr))
        .unwrap()
        .with_retry(RetryPolicy::new(3, Duration::ZERO, 2.0))
        .unwrap();
    RestCalculator::from_config(config)
}

#[test]
fn four_operations_round_trip() {
    let state = MockState::new();
    let addr = spawn_server(state.clone());
    let calc = RestCalculator::new(&base_url(addr)).unwrap();

    assert_eq!(calc.add(5.0, 3.0).unwrap(), Some(8.0));
    assert_eq!(calc.subtract(10.0, 4.0).unwrap(), Some(6.0));
    assert_eq!(calc.multiply(6.0, 7.0).unwrap(), Some(42.0));
    assert_eq!(calc.divide(20.0, 4.0).unwrap(), Quotient::Value(Some(5.0)));
    assert_eq!(calc.divide(20.0, 0.0).unwrap(), Quotient::DivisionByZero);

    assert_eq!(state.hits(), 4);
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    assert_eq!(
        rt.block_on(state.paths()),
        [
            "/operation/soma/5/3",
            "/operation/subtracao/10/4",
            "/operation/multiplicacao/6/7",
            "/operation/divisao/20/4",
        ]
    );
}

#[test]
fn repeated_call_is_idempotent() {
    let addr = spawn_server(MockState::new());
    let calc = fast_calculator(addr);

    let first = calc.multiply(1.5, 4.0).unwrap();
    let second = calc.multiply(1.5, 4.0).unwrap();
    assert_eq!(first, Some(6.0));
    assert_eq!(first, second);
}

#[test]
fn recovers_after_two_server_errors_with_backoff() {
    let state = MockState::failing(2, StatusCode::INTERNAL_SERVER_ERROR);
    let addr = spawn_server(state.clone());
    let calc = RestCalculator::new(&base_url(addr)).unwrap();

    let started = Instant::now();
    let result = calc.divide(25.0, 5.0).unwrap();
    let elapsed = started.elapsed();

    assert_eq!(result, Quotient::Value(Some(5.0)));
    assert_eq!(state.hits(), 3);
    assert!(elapsed >= Duration::from_secs(3), "waited only {elapsed:?}");
    assert!(elapsed < Duration::from_secs(10), "waited {elapsed:?}");
}

#[test]
fn persistent_server_error_is_surfaced_after_three_attempts() {
    let state = MockState::failing(usize::MAX, StatusCode::INTERNAL_SERVER_ERROR);
    let addr = spawn_server(state.clone());
    let calc = fast_calculator(addr);

    let err = calc.add(1.0, 2.0).unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(state.hits(), 3);
}

#[test]
fn server_side_rejection_is_retried_like_any_failure() {
    let state = MockState::new();
    let addr = spawn_server(state.clone());
    let calc = fast_calculator(addr);

    let err = calc
        .perform_operation(Operation::Divide, 1.0, 0.0)
        .unwrap_err();
    assert!(matches!(err, CalcError::Remote { status: 400, .. }));
    assert_eq!(state.hits(), 3);
}

#[test]
fn malformed_body_is_surfaced_after_three_attempts() {
    let state = MockState::malformed();
    let addr = spawn_server(state.clone());
    let calc = fast_calculator(addr);

    let err = calc.subtract(3.0, 1.0).unwrap_err();
    assert!(matches!(err, CalcError::MalformedResponse(_)));
    assert_eq!(state.hits(), 3);
}

#[test]
fn refused_connection_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let calc = fast_calculator(addr);
    let err = calc.add(1.0, 1.0).unwrap_err();
    assert!(matches!(err, CalcError::Transport(_)));
}

#[test]
fn stalled_server_times_out_on_every_attempt() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        // Hold accepted connections open without ever answering.
        let mut held = Vec::new();
        for stream in listener.incoming() {
            held.push(stream);
        }
    });

    let attempts = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&attempts);
    let config = ClientConfig::new(base_url(addr))
        .unwrap()
        .with_timeout(Duration::from_millis(500))
        .with_retry(RetryPolicy::new(3, Duration::ZERO, 2.0))
        .unwrap();
    let calc = RestCalculator::from_config(config).with_observer(Arc::new(
        move |_url: &str, _attempt: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    ));

    let started = Instant::now();
    let err = calc.add(1.0, 2.0).unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, CalcError::Transport(_)), "{err:?}");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert!(elapsed >= Duration::from_millis(1500), "gave up after {elapsed:?}");
    assert!(elapsed < Duration::from_secs(5), "took {elapsed:?}");
}
