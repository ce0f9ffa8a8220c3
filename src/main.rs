use hyper::http::request::Parts;
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use json_handler::server::{create_reusable_listener, start_server_loop, Routes, ServerLoopConfig};
use json_handler::{config, logger, HandlerDefaults, HandlerError, Reported, ResponseWriter};

/// Person record kept by the demo service
#[derive(Debug, Clone, Deserialize, Serialize)]
struct Person {
    name: String,
    #[serde(default)]
    email: Option<String>,
}

/// In-memory people directory keyed by name
#[derive(Default)]
struct Directory {
    people: Mutex<BTreeMap<String, Person>>,
}

impl Directory {
    fn list(&self, _: &mut ResponseWriter, _: &Parts) -> Result<BTreeMap<String, Person>, HandlerError> {
        let people = self
            .people
            .lock()
            .map_err(|_| HandlerError::opaque("people directory lock poisoned"))?;
        Ok(people.clone())
    }

    fn add(
        &self,
        w: &mut ResponseWriter,
        _: &Parts,
        person: Box<Person>,
    ) -> Result<Box<Person>, HandlerError> {
        if person.name.trim().is_empty() {
            return Err(Reported::new("person is invalid")
                .with_status(StatusCode::UNPROCESSABLE_ENTITY)
                .with_reason(&json!({ "name": "must not be empty" }))
                .into());
        }
        let mut people = self
            .people
            .lock()
            .map_err(|_| HandlerError::opaque("people directory lock poisoned"))?;
        people.insert(person.name.clone(), (*person).clone());
        w.write_header(StatusCode::CREATED);
        Ok(person)
    }

    fn import(
        &self,
        _: &mut ResponseWriter,
        _: &Parts,
        batch: Vec<Box<Person>>,
    ) -> Result<Value, HandlerError> {
        let mut people = self
            .people
            .lock()
            .map_err(|_| HandlerError::opaque("people directory lock poisoned"))?;
        let count = batch.len();
        for person in batch {
            people.insert(person.name.clone(), *person);
        }
        Ok(json!({ "imported": count }))
    }

    fn clear(&self, w: &mut ResponseWriter, _: &Parts) -> Result<Value, HandlerError> {
        self.people
            .lock()
            .map_err(|_| HandlerError::opaque("people directory lock poisoned"))?
            .clear();
        w.write_header(StatusCode::NO_CONTENT);
        Ok(Value::Null)
    }
}

fn health(_: &mut ResponseWriter, _: &Parts) -> Result<Value, HandlerError> {
    Ok(json!({ "status": "ok" }))
}

fn build_routes(defaults: &HandlerDefaults) -> Routes {
    let directory = Arc::new(Directory::default());

    let list = Arc::clone(&directory);
    let add = Arc::clone(&directory);
    let import = Arc::clone(&directory);
    let clear = directory;

    Routes::new()
        .route("/health", defaults.plain(health))
        .route(
            "/people",
            defaults.plain(move |w, r| list.list(w, r)),
        )
        .route(
            "/people/add",
            defaults.data(move |w, r, person| add.add(w, r, person)),
        )
        .route(
            "/people/import",
            defaults.data(move |w, r, batch| import.import(w, r, batch)),
        )
        .route(
            "/people/clear",
            defaults.plain(move |w, r| clear.clear(w, r)),
        )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // Tokio runtime sized by the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;

    let defaults = HandlerDefaults::from_config(&cfg)?;
    let routes = Arc::new(build_routes(&defaults));

    logger::log_server_start(&addr, &cfg);
    let mut paths: Vec<_> = routes.paths().collect();
    paths.sort_unstable();
    for path in paths {
        println!("  - http://{addr}{path}");
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            logger::log_error(&format!("Failed to listen for shutdown signal: {e}"));
            std::future::pending::<()>().await;
        }
    };

    start_server_loop(
        listener,
        Arc::clone(&routes),
        ServerLoopConfig::from_config(&cfg),
        shutdown,
    )
    .await?;
    println!("Server stopped");
    Ok(())
}
