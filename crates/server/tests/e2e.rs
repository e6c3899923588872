use std::net::SocketAddr;
use std::path::PathBuf;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    data_file: PathBuf,
}

impl TestApp {
    async fn cleanup(self) {
        if let Some(dir) = self.data_file.parent() {
            let _ = tokio::fs::remove_dir_all(dir).await;
        }
    }
}

fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    // isolated data file per test run
    cfg.storage.data_file = PathBuf::from(format!("target/test-data/{}/data.json", Uuid::new_v4()));
    cfg.server.port = 0;
    cfg
}

async fn start_server() -> anyhow::Result<TestApp> {
    let cfg = test_config();
    let app = server::startup::build_app(&cfg).await?;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_file: cfg.storage.data_file })
}

#[tokio::test]
async fn e2e_hospital_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let url = format!("{}/hospitals/1", app.base_url);

    let res = c.post(&url)
        .json(&json!({"hospitalName": "St. Mary", "patientCount": 12, "location": "Springfield"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created, json!({"id": 1, "hospitalName": "St. Mary", "patientCount": 12, "location": "Springfield"}));

    let res = c.get(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    let res = c.put(&url)
        .json(&json!({"hospitalName": "St. Mary", "patientCount": 20, "location": "Springfield"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["patientCount"], 20);

    let res = c.delete(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = c.get(&url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "Hospital not found");

    app.cleanup().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn e2e_fifty_concurrent_creates() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let mut tasks = tokio::task::JoinSet::new();
    for id in 1..=50 {
        let c = c.clone();
        let url = format!("{}/hospitals/{}", app.base_url, id);
        tasks.spawn(async move {
            c.post(url)
                .json(&json!({"hospitalName": format!("H{id}"), "patientCount": id, "location": "L"}))
                .send()
                .await
                .map(|r| r.status())
        });
    }
    while let Some(res) = tasks.join_next().await {
        assert_eq!(res??, HttpStatusCode::CREATED);
    }

    let list = c.get(format!("{}/hospitals", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(list.len(), 50);
    let mut ids: Vec<i64> = list.iter().map(|v| v["id"].as_i64().unwrap_or_default()).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=50).collect::<Vec<i64>>());
    for v in &list {
        assert_eq!(v["patientCount"], v["id"]);
    }

    // the file agrees with the API
    let on_disk: Vec<Value> = serde_json::from_slice(&tokio::fs::read(&app.data_file).await?)?;
    assert_eq!(on_disk.len(), 50);

    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn e2e_state_survives_restart() -> anyhow::Result<()> {
    let cfg = test_config();
    let c = reqwest::Client::new();

    for round in 0..2 {
        let app = server::startup::build_app(&cfg).await?;
        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { let _ = rx.await; })
                .await
        });

        if round == 0 {
            let res = c.post(format!("{base_url}/hospitals/77"))
                .json(&json!({"hospitalName": "Kept", "patientCount": 1, "location": "Disk"}))
                .send().await?;
            assert_eq!(res.status(), HttpStatusCode::CREATED);
        } else {
            let res = c.get(format!("{base_url}/hospitals/77")).send().await?;
            assert_eq!(res.status(), HttpStatusCode::OK);
            assert_eq!(res.json::<Value>().await?["hospitalName"], "Kept");
        }

        let _ = tx.send(());
        handle.await??;
    }

    if let Some(dir) = cfg.storage.data_file.parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
    Ok(())
}

#[tokio::test]
async fn run_returns_once_shutdown_resolves() -> anyhow::Result<()> {
    let cfg = test_config();
    let data_file = cfg.storage.data_file.clone();
    server::run(cfg, async {}).await?;
    assert!(tokio::fs::metadata(&data_file).await?.is_file());
    if let Some(dir) = data_file.parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
    Ok(())
}
