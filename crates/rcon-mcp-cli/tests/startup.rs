//! Integration test: the binary refuses to start without a valid RCON target.

use std::net::TcpListener;
use std::process::Command;

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind free port");
    listener.local_addr().expect("local_addr").port()
}

fn run(vars: &[(&str, &str)], port: u16) -> std::process::Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cs2-rcon-mcp"));
    cmd.args(["--host", "127.0.0.1", "--port", &port.to_string()])
        .env_remove("HOST")
        .env_remove("SERVER_PORT")
        .env_remove("RCON_PASSWORD")
        .env("RUST_LOG", "info");
    for (key, value) in vars {
        cmd.env(key, value);
    }
    cmd.output().expect("run cs2-rcon-mcp")
}

#[test]
fn missing_environment_fails_before_binding() {
    let port = free_port();
    let output = run(&[("HOST", "127.0.0.1")], port);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SERVER_PORT"), "stderr: {stderr}");
    assert!(stderr.contains("RCON_PASSWORD"), "stderr: {stderr}");
    assert!(!stderr.contains("listening"), "stderr: {stderr}");

    // Nothing was left bound
    TcpListener::bind(("127.0.0.1", port)).expect("port still free");
}

#[test]
fn non_numeric_server_port_is_rejected() {
    let port = free_port();
    let output = run(
        &[
            ("HOST", "127.0.0.1"),
            ("SERVER_PORT", "abc"),
            ("RCON_PASSWORD", "secret"),
        ],
        port,
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid SERVER_PORT value: abc"), "stderr: {stderr}");
}
