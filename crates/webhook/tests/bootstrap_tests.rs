//! Bootstrap tests with a placeholder cluster configuration

use dode_webhook::{
    ConfigError, ShutdownCoordinator, WebhookConfig, WebhookError, bootstrap, run,
};
use std::time::Duration;

fn kube_config() -> kube::Config {
    kube::Config::new("http://127.0.0.1:6443".parse().unwrap())
}

#[tokio::test]
async fn bootstrap_registers_dode_solver() {
    let config = WebhookConfig::new("acme.example.com");
    let registry = bootstrap(&config, kube_config()).await.unwrap();

    assert_eq!(registry.group_name(), "acme.example.com");
    assert_eq!(registry.solver_names().collect::<Vec<_>>(), vec!["dode"]);
}

#[tokio::test]
async fn bootstrap_rejects_missing_group_name() {
    let err = bootstrap(&WebhookConfig::new(""), kube_config())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WebhookError::Config(ConfigError::MissingGroupName)
    ));
}

#[tokio::test]
async fn run_stops_on_shutdown() {
    let config = WebhookConfig::new("acme.example.com")
        .with_listen("127.0.0.1:0".parse().unwrap());
    let shutdown = ShutdownCoordinator::new();
    let handle = tokio::spawn(run(config, kube_config(), shutdown.clone()));

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown.shutdown();

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}
