use courier::config::{CONFIG_ENV, Config, LISTEN_ENV};
use std::path::PathBuf;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3333");
    assert!(cfg.server.workers >= 2);
    assert_eq!(cfg.server.static_root, PathBuf::from("http_root"));
    assert_eq!(cfg.client.workers, 1);
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml(
        "server:\n  listen_addr: 127.0.0.1:8000\n  workers: 3\n  static_root: /srv/www\n",
    )
    .unwrap();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8000");
    assert_eq!(cfg.server.workers, 3);
    assert_eq!(cfg.server.static_root, PathBuf::from("/srv/www"));
    assert_eq!(cfg.client.workers, 1);
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml("client:\n  workers: 4\n").unwrap();

    assert_eq!(cfg.client.workers, 4);
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3333");
}

#[test]
fn test_config_rejects_zero_workers() {
    assert!(Config::from_yaml("server:\n  workers: 0\n").is_err());
}

#[test]
fn test_config_missing_file() {
    let err = Config::from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

// Environment handling lives in one test so parallel tests never race on it.
#[test]
fn test_config_load_from_env() {
    let path = std::env::temp_dir().join(format!("courier-config-{}.yaml", std::process::id()));
    std::fs::write(&path, "server:\n  listen_addr: 127.0.0.1:9000\n").unwrap();

    unsafe {
        std::env::remove_var(LISTEN_ENV);
        std::env::set_var(CONFIG_ENV, &path);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:9000");

    unsafe {
        std::env::set_var(LISTEN_ENV, "0.0.0.0:5000");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:5000");

    unsafe {
        std::env::remove_var(LISTEN_ENV);
        std::env::remove_var(CONFIG_ENV);
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3333");

    let _ = std::fs::remove_file(path);
}
