//! The canonical three-property scenarios: defaults, a map layer, and system
//! properties overridden by a file.

use anyhow::Result;
use propstack::source::{EnvSource, SharedMapSource};
use propstack::{ConfigFactory, ConfigShape, LayerStack};
use rstest::{fixture, rstest};
use serial_test::serial;
use test_helpers::env;
use test_helpers::properties::PropertiesFile;

#[derive(Debug, PartialEq, Eq, ConfigShape)]
struct TestConfig {
    #[propstack(default = "one")]
    conf1: String,
    #[propstack(default_null)]
    conf2: Option<String>,
    #[propstack(default = "three")]
    conf3: String,
}

fn expected(conf1: &str, conf2: Option<&str>, conf3: &str) -> TestConfig {
    TestConfig {
        conf1: conf1.to_owned(),
        conf2: conf2.map(str::to_owned),
        conf3: conf3.to_owned(),
    }
}

#[fixture]
fn file_layer() -> PropertiesFile {
    PropertiesFile::new("conf1=file-1\n").expect("write properties fixture")
}

#[rstest]
fn empty_stack_uses_declared_defaults() -> Result<()> {
    let factory = ConfigFactory::new(LayerStack::new().build());
    assert_eq!(*factory.get::<TestConfig>()?, expected("one", None, "three"));
    Ok(())
}

#[rstest]
fn map_layer_overrides_one_default() -> Result<()> {
    let mut stack = LayerStack::new();
    stack.push_map([("conf1", "map-1")]);
    let factory = ConfigFactory::new(stack.build());
    assert_eq!(*factory.get::<TestConfig>()?, expected("map-1", None, "three"));
    Ok(())
}

#[rstest]
fn file_overrides_system_properties(file_layer: PropertiesFile) -> Result<()> {
    let system: SharedMapSource = [("conf1", "sys-1"), ("conf2", "sys-2")].into_iter().collect();
    let mut stack = LayerStack::new();
    stack.push(system);
    stack.push_from_file(file_layer.path())?;
    let factory = ConfigFactory::new(stack.build());
    assert_eq!(
        *factory.get::<TestConfig>()?,
        expected("file-1", Some("sys-2"), "three")
    );
    Ok(())
}

#[rstest]
#[serial]
fn file_overrides_the_process_environment(file_layer: PropertiesFile) -> Result<()> {
    let _vars = env::scope([("conf1", "sys-1"), ("conf2", "sys-2")]);
    let mut stack = LayerStack::new();
    stack.push_env().push_from_file(file_layer.path())?;
    let factory = ConfigFactory::new(stack.build());
    assert_eq!(
        factory.build::<TestConfig>()?,
        expected("file-1", Some("sys-2"), "three")
    );
    Ok(())
}

#[rstest]
#[serial]
fn environment_is_read_at_bind_time() -> Result<()> {
    let mut vars = env::scope([("PSTEST_CONF1", "env-1")]);
    vars.remove("PSTEST_CONF2");
    let mut stack = LayerStack::new();
    stack.push(EnvSource::prefixed("PSTEST_"));
    let factory = ConfigFactory::new(stack.build());

    assert_eq!(factory.build::<TestConfig>()?, expected("env-1", None, "three"));
    vars.set("PSTEST_CONF2", "late").remove("PSTEST_CONF1");
    assert_eq!(
        factory.build::<TestConfig>()?,
        expected("one", Some("late"), "three")
    );
    Ok(())
}
