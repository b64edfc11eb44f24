//! Integration tests for loading and saving runtime configurations.

use hostenv::document::{parse_str, TemplateWriter};
use hostenv::machine;
use hostenv::resolver::{EnvironmentResolver, LocalAliasResolver, Resolution};
use hostenv::{HostenvError, ResolutionEngine, RuntimeConfiguration, SelectionPolicy};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use tempfile::TempDir;

#[test]
fn localhost_document_resolves() {
    let xml = r#"<configuration>
  <context>
    <hosts env="0"><host>localhost</host></hosts>
    <hosts env="1"><host>nowhere.invalid</host></hosts>
  </context>
  <property key="k">
    <value env="0">good</value>
    <value env="1">bad</value>
  </property>
</configuration>"#;

    let mut props: BTreeMap<String, String> = BTreeMap::new();
    let env = RuntimeConfiguration::new().load_str(xml, &mut props).unwrap();

    assert_eq!(env, "0");
    assert_eq!(props.len(), 1);
    assert_eq!(props.get("k"), Some(&"good".to_string()));
}

#[test]
fn machine_name_and_catch_all_pattern_are_ambiguous() {
    let host = &machine::identity().host_name;
    let xml = format!(
        r#"<configuration>
  <context>
    <hosts env="0"><host>{}</host><host>localhost</host></hosts>
    <hosts env="1"><host>/.*/</host></hosts>
  </context>
  <property key="k"><value env="*">v</value></property>
</configuration>"#,
        host
    );

    let mut props: HashMap<String, String> = HashMap::new();
    let err = RuntimeConfiguration::new()
        .load_str(&xml, &mut props)
        .unwrap_err();

    assert!(matches!(err, HostenvError::AmbiguousEnvironment { .. }));
    assert!(err.is_fatal_resolution());
    assert!(props.is_empty());
}

#[test]
fn no_matching_host_is_unresolved() {
    let xml = r#"<configuration>
  <context>
    <hosts env="L1"><host>alpha.invalid</host></hosts>
    <hosts env="L2"><host>beta.invalid</host><host>/zz-no-such-host-\d+/</host></hosts>
  </context>
</configuration>"#;

    let model = parse_str(xml).unwrap();
    match ResolutionEngine::new().resolve(&model).unwrap_err() {
        HostenvError::UnresolvedEnvironment { hosts } => {
            assert_eq!(hosts.len(), 3);
            assert!(hosts.contains(&"alpha.invalid".to_string()));
        }
        other => panic!("expected unresolved, got {:?}", other),
    }
}

#[test]
fn global_values_win_over_environment_values() {
    let xml = r#"<configuration>
  <context><hosts env="dev"><host>127.0.0.1</host></hosts></context>
  <property key="a"><value env="dev">dev-a</value><value env="*">global-a</value></property>
  <property key="b"><value env="dev">dev-b</value></property>
  <property key="c"><value env="prod">prod-c</value></property>
</configuration>"#;
    let model = parse_str(xml).unwrap();

    let resolved = ResolutionEngine::new().resolve(&model).unwrap();
    assert_eq!(resolved.get("a"), Some("global-a"));
    assert_eq!(resolved.get("b"), Some("dev-b"));
    assert_eq!(resolved.get("c"), None);

    let legacy = ResolutionEngine::new()
        .with_policy(SelectionPolicy::EnvironmentOnly)
        .resolve(&model)
        .unwrap();
    assert_eq!(legacy.get("a"), Some("dev-a"));
}

#[test]
fn round_trip_thousand_pairs() {
    let mut source: BTreeMap<String, String> = BTreeMap::new();
    for i in 0..1000 {
        let value = match i % 3 {
            0 => format!("plain value {}", i),
            1 => format!("first,second,{}", i),
            _ => format!("<![CDATA[<tag attr=\"{}\">&amp;</tag>]]>", i),
        };
        source.insert(format!("key.{:04}", i), value);
    }

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("roundtrip.xml");
    let config = RuntimeConfiguration::new().with_writer(TemplateWriter::new());
    config.save_file(&source, &path).unwrap();

    let engine = ResolutionEngine::with_resolver(LocalAliasResolver::new());
    let mut sink: BTreeMap<String, String> = BTreeMap::new();
    let env = RuntimeConfiguration::new()
        .with_engine(engine)
        .load_file(&path, &mut sink)
        .unwrap();

    assert_eq!(env, "0");
    assert_eq!(sink.len(), 1000);
    assert_eq!(sink, source);
}

#[test]
fn written_values_are_trimmed_on_load() {
    let mut source: BTreeMap<String, String> = BTreeMap::new();
    source.insert("padded".to_string(), "  inner  text  ".to_string());

    let xml = TemplateWriter::new().render(&source).unwrap();
    let mut sink: BTreeMap<String, String> = BTreeMap::new();
    RuntimeConfiguration::new().load_str(&xml, &mut sink).unwrap();

    assert_eq!(sink.get("padded"), Some(&"inner  text".to_string()));
}

#[test]
fn structural_errors_name_the_problem() {
    let cases = [
        (
            "<configuration><context><hosts><host>h</host></hosts></context></configuration>",
            "hosts[@env]",
        ),
        (
            "<configuration><context/><property key=\"k\"><value>v</value></property></configuration>",
            "value[@env]",
        ),
        (
            "<configuration><context/><property key=\"k\"><host>h</host></property></configuration>",
            "<host>",
        ),
    ];

    for (xml, expected) in cases {
        let mut sink: BTreeMap<String, String> = BTreeMap::new();
        let err = RuntimeConfiguration::new()
            .load_str(xml, &mut sink)
            .unwrap_err();
        assert!(matches!(err, HostenvError::Structural { .. }), "{}", xml);
        assert!(err.to_string().contains(expected), "{} -> {}", xml, err);
        assert!(sink.is_empty());
    }
}

#[test]
fn malformed_markup_is_reported() {
    let mut sink: BTreeMap<String, String> = BTreeMap::new();
    let err = RuntimeConfiguration::new()
        .load_str("<configuration><context></configuration>", &mut sink)
        .unwrap_err();
    assert!(matches!(err, HostenvError::Markup { .. }));
}

#[test]
fn file_marker_selects_environment() {
    let temp = TempDir::new().unwrap();
    let marker = temp.path().join("tier.env");
    fs::write(&marker, "# deployment tier\ntier = staging\n").unwrap();

    let xml = format!(
        r#"<configuration>
  <context>
    <hosts env="staging"><host>file:{path}@tier</host></hosts>
    <hosts env="prod"><host>file:{path}@tier</host></hosts>
  </context>
  <property key="url"><value env="staging">https://staging.invalid</value></property>
</configuration>"#,
        path = marker.display()
    );

    let mut sink: BTreeMap<String, String> = BTreeMap::new();
    let env = RuntimeConfiguration::new().load_str(&xml, &mut sink).unwrap();
    assert_eq!(env, "staging");
    assert_eq!(sink.get("url"), Some(&"https://staging.invalid".to_string()));
}

#[test]
fn custom_resolvers_plug_into_the_engine() {
    struct Named(&'static str);

    impl EnvironmentResolver for Named {
        fn name(&self) -> &str {
            "named"
        }

        fn resolve(&self, environment: &str, _hosts: &[String]) -> Resolution {
            if environment == self.0 {
                Resolution::MatchedTo(environment.to_string())
            } else {
                Resolution::NoMatch
            }
        }
    }

    let model = parse_str(
        r#"<configuration><context><hosts env="blue"/><hosts env="green"/></context>
        <property key="k"><value env="green">g</value></property></configuration>"#,
    )
    .unwrap();

    let resolved = ResolutionEngine::with_resolver(Named("green"))
        .resolve(&model)
        .unwrap();
    assert_eq!(resolved.environment, "green");
    assert_eq!(resolved.get("k"), Some("g"));
}
