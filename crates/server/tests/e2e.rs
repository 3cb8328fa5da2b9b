use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = server::startup::build_app();
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_student_scenarios() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/student/99", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["detail"], "Student not found");

    let res = c.post(format!("{}/student", app.base_url))
        .json(&json!({"first_name": "Ada", "last_name": "Lovelace"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"id": 1, "first_name": "Ada", "last_name": "Lovelace"}));

    let res = c.post(format!("{}/student", app.base_url))
        .json(&json!({"first_name": "Ada", "last_name": "Lovelace"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["detail"], "Duplicate student information");

    let res = c.post(format!("{}/student", app.base_url))
        .json(&json!({"first_name": "A1", "last_name": "B"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["detail"], "Student information cannot contain digits");

    let res = c.get(format!("{}/students", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([{"first_name": "Ada", "last_name": "Lovelace"}]));

    let res = c.patch(format!("{}/student/1", app.base_url))
        .json(&json!({"first_name": "Ada", "last_name": "King"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"id": 1, "first_name": "Ada", "last_name": "King"}));
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_duplicate_creates_admit_one() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let c = c.clone();
        let url = format!("{}/student", app.base_url);
        handles.push(tokio::spawn(async move {
            c.post(url)
                .json(&json!({"first_name": "Grace", "last_name": "Hopper"}))
                .send()
                .await
                .map(|r| r.status())
        }));
    }
    let mut created = 0;
    for h in handles {
        if h.await?? == HttpStatusCode::OK {
            created += 1;
        }
    }
    assert_eq!(created, 1);

    let res = c.get(format!("{}/students", app.base_url)).send().await?;
    assert_eq!(res.json::<Vec<Value>>().await?.len(), 1);
    Ok(())
}
