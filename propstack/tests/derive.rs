//! Behaviour of `#[derive(ConfigShape)]` attributes at bind time.

use std::time::Duration;

use anyhow::{Result, ensure};
use propstack::{AccessorInfo, ConfigFactory, ConfigShape, LayerStack};
use rstest::rstest;

#[derive(Debug, ConfigShape)]
#[propstack(prefix = "app.", rename_all = "kebab-case")]
struct AppConfig {
    http_port: u16,
    #[propstack(default = "30s", alias = "legacy.timeout")]
    request_timeout: Duration,
    #[propstack(key = "feature.enabled", default = "off")]
    enabled: bool,
    banner: Option<String>,
}

mod renamed {
    pub(crate) use propstack as deps;
}

#[derive(Debug, ConfigShape)]
#[propstack(crate = "renamed::deps")]
struct ViaAlias {
    #[propstack(default = "x")]
    value: String,
}

fn factory(entries: &[(&str, &str)]) -> ConfigFactory {
    let mut stack = LayerStack::new();
    stack.push_map(entries.iter().copied());
    ConfigFactory::new(stack.build())
}

#[rstest]
fn derived_keys_use_prefix_and_case() -> Result<()> {
    let config = factory(&[("app.http-port", "8443"), ("legacy.timeout", "5m")])
        .build::<AppConfig>()?;
    ensure!(config.http_port == 8443, "port {}", config.http_port);
    ensure!(config.request_timeout == Duration::from_secs(300), "alias ignored");
    ensure!(!config.enabled, "default not applied");
    ensure!(config.banner.is_none(), "banner should be null");
    Ok(())
}

#[rstest]
fn primary_keys_beat_aliases() -> Result<()> {
    let config = factory(&[
        ("app.http-port", "1"),
        ("legacy.timeout", "5m"),
        ("app.request-timeout", "250ms"),
        ("feature.enabled", "yes"),
        ("app.banner", "hi"),
    ])
    .build::<AppConfig>()?;
    ensure!(config.request_timeout == Duration::from_millis(250), "alias won");
    ensure!(config.enabled, "explicit key ignored");
    ensure!(config.banner.as_deref() == Some("hi"), "banner {:?}", config.banner);
    Ok(())
}

#[rstest]
fn accessors_describe_the_shape() {
    let infos: &[AccessorInfo] = AppConfig::accessors();
    let keys: Vec<&str> = infos.iter().map(AccessorInfo::key).collect();
    assert_eq!(
        keys,
        ["app.http-port", "app.request-timeout", "feature.enabled", "app.banner"]
    );
    let timeout = infos.get(1).expect("timeout accessor");
    assert_eq!(timeout.aliases(), &["legacy.timeout"]);
    assert_eq!(timeout.default, Some("30s"));
    assert_eq!(timeout.target, "duration");
    let banner = infos.get(3).expect("banner accessor");
    assert!(banner.allow_null);
    assert_eq!(AppConfig::NAME, "AppConfig");
}

#[rstest]
fn crate_path_can_be_overridden() -> Result<()> {
    let config = factory(&[]).build::<ViaAlias>()?;
    ensure!(config.value == "x", "unexpected {config:?}");
    Ok(())
}

#[rstest]
fn bound_strings_are_interpolated() -> Result<()> {
    #[derive(Debug, ConfigShape)]
    struct Urls {
        #[propstack(key = "base")]
        base: String,
        #[propstack(key = "api", default = "${base}/api")]
        api: String,
        #[propstack(key = "docs")]
        docs: String,
    }
    let urls = factory(&[("base", "https://svc"), ("docs", "${base}/docs")]).build::<Urls>()?;
    ensure!(urls.docs == "https://svc/docs", "docs {}", urls.docs);
    ensure!(urls.api == "${base}/api", "defaults are not interpolated: {}", urls.api);
    ensure!(urls.base == "https://svc", "base {}", urls.base);
    Ok(())
}
