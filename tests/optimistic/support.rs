//! A transport that can hold back or fail individual procedures.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use showcase::client::{ClientError, LocalTransport, SetupClient, SetupFeed, Transport};
use showcase::rpc::{self, CommandRequest, CommandResponse};
use showcase::{InMemoryModelStore, NewSetup, Setup, SetupStore};

pub type Store = SetupStore<InMemoryModelStore>;

pub struct ScriptedTransport {
    inner: LocalTransport<Store>,
    delays: RefCell<HashMap<String, Duration>>,
    failures: RefCell<HashMap<String, ClientError>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(store: Store) -> Self {
        Self {
            inner: LocalTransport::new(Arc::new(rpc::setup_service(store))),
            delays: RefCell::new(HashMap::new()),
            failures: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Hold `command` back for `delay` before it reaches the service.
    pub fn delay(&self, command: &str, delay: Duration) {
        self.delays.borrow_mut().insert(command.to_string(), delay);
    }

    /// Fail `command` after its delay without reaching the service.
    pub fn fail(&self, command: &str, error: ClientError) {
        self.failures.borrow_mut().insert(command.to_string(), error);
    }

    pub fn heal(&self, command: &str) {
        self.failures.borrow_mut().remove(command);
        self.delays.borrow_mut().remove(command);
    }

    pub fn calls(&self, command: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == command).count()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn call(&self, request: CommandRequest) -> Result<CommandResponse, ClientError> {
        self.calls.borrow_mut().push(request.command.clone());

        let delay = self.delays.borrow().get(&request.command).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.failures.borrow().get(&request.command).cloned();
        match failure {
            Some(err) => Err(err),
            None => self.inner.call(request).await,
        }
    }
}

pub struct World {
    pub store: Store,
    pub transport: Rc<ScriptedTransport>,
    pub feed: SetupFeed<Rc<ScriptedTransport>>,
}

pub fn setup(id: &str, likes: u32) -> Setup {
    Setup {
        id: id.to_string(),
        title: format!("Setup {id}"),
        author: "Ana".to_string(),
        image_url: format!("https://example.com/{id}.jpg"),
        description: None,
        likes,
        tags: vec!["desk".to_string()],
    }
}

pub fn world(rows: Vec<Setup>) -> World {
    world_with_timeout(rows, showcase::client::DEFAULT_TIMEOUT)
}

pub fn world_with_timeout(rows: Vec<Setup>, timeout: Duration) -> World {
    let store = SetupStore::new(InMemoryModelStore::new());
    store.seed(rows).unwrap();
    let transport = Rc::new(ScriptedTransport::new(store.clone()));
    let client = SetupClient::new(Rc::clone(&transport)).with_timeout(timeout);
    World {
        store,
        transport,
        feed: SetupFeed::new(client),
    }
}

pub fn likes_of(setups: &[Setup], id: &str) -> Option<u32> {
    setups.iter().find(|s| s.id == id).map(|s| s.likes)
}

pub fn ids(setups: &[Setup]) -> Vec<&str> {
    setups.iter().map(|s| s.id.as_str()).collect()
}

pub fn form(title: &str) -> NewSetup {
    NewSetup::new(title, "Ana", "https://example.com/new.jpg")
}
