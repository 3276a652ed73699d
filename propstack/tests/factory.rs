//! Caching and failure behaviour of `ConfigFactory`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use anyhow::{Result, ensure};
use propstack::{
    Accessor, AccessorInfo, BindError, Binder, ConfigError, ConfigFactory, ConfigShape, LayerStack,
};
use rstest::{fixture, rstest};

#[derive(Debug, ConfigShape)]
struct Server {
    #[propstack(key = "server.host", default = "localhost")]
    host: String,
    #[propstack(key = "server.port", default = "8080")]
    port: u16,
}

#[derive(Debug, ConfigShape)]
#[propstack(name = "Database")]
struct DbConfig {
    #[propstack(key = "db.url")]
    url: String,
    #[propstack(key = "db.pool", default = "4")]
    pool: u8,
}

static COUNTED_BUILDS: AtomicUsize = AtomicUsize::new(0);

/// Counts how often it is constructed.
struct Counted {
    port: u16,
}

const COUNTED_PORT: Accessor<u16> = Accessor::new(&["server.port"]).with_default("1");

impl ConfigShape for Counted {
    const NAME: &'static str = "Counted";

    fn accessors() -> &'static [AccessorInfo] {
        const ACCESSORS: &[AccessorInfo] = &[COUNTED_PORT.info()];
        ACCESSORS
    }

    fn bind(binder: &Binder<'_>) -> Result<Self, BindError> {
        COUNTED_BUILDS.fetch_add(1, Ordering::SeqCst);
        thread::sleep(std::time::Duration::from_millis(20));
        Ok(Self {
            port: binder.bind(&COUNTED_PORT)?,
        })
    }
}

#[fixture]
fn factory() -> ConfigFactory {
    let mut stack = LayerStack::new();
    stack.push_map([("server.port", "9000"), ("db.pool", "many")]);
    ConfigFactory::new(stack.build())
}

#[rstest]
fn get_returns_the_same_instance(factory: ConfigFactory) -> Result<()> {
    let first = factory.get::<Server>()?;
    let second = factory.get::<Server>()?;
    ensure!(Arc::ptr_eq(&first, &second), "get constructed twice");
    ensure!(first.host == "localhost" && first.port == 9000, "unexpected {first:?}");
    ensure!(factory.cache().contains::<Server>(), "not cached");
    Ok(())
}

#[rstest]
fn build_bypasses_the_cache(factory: ConfigFactory) -> Result<()> {
    let built = factory.build::<Server>()?;
    ensure!(built.port == 9000, "unexpected {built:?}");
    ensure!(factory.cache().is_empty(), "build filled the cache");
    Ok(())
}

#[rstest]
fn failures_are_tagged_with_the_shape_and_not_cached(factory: ConfigFactory) {
    let err = factory.get::<DbConfig>().expect_err("db.url is required");
    assert_eq!(err.shape(), Some("Database"));
    assert_eq!(
        err.bind_error(),
        Some(&BindError::MissingRequired { key: "db.url".into() })
    );
    assert!(matches!(err, ConfigError::Bind { .. }));
    assert!(!factory.cache().contains::<DbConfig>());
}

#[rstest]
fn the_first_failing_accessor_aborts_construction() {
    let mut stack = LayerStack::new();
    stack.push_map([("db.url", "postgres://db"), ("db.pool", "many")]);
    let factory = ConfigFactory::from(stack.build());
    let err = factory.build::<DbConfig>().expect_err("pool is not a number");
    assert!(
        matches!(
            err.bind_error(),
            Some(BindError::TypeCoercion { key, value, .. }) if key == "db.pool" && value == "many"
        ),
        "unexpected {err:?}"
    );
}

#[rstest]
fn concurrent_gets_construct_once() -> Result<()> {
    let factory = ConfigFactory::new(LayerStack::new().build());
    let instances: Vec<Arc<Counted>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| factory.get::<Counted>()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect::<Result<_, _>>()
    })?;
    ensure!(COUNTED_BUILDS.load(Ordering::SeqCst) == 1, "constructed more than once");
    ensure!(instances.iter().all(|i| i.port == 1), "unexpected port");
    let first = instances.first().expect("eight instances");
    ensure!(instances.iter().all(|i| Arc::ptr_eq(i, first)), "instances differ");
    Ok(())
}
