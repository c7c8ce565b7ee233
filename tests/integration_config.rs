use entry_chunk::*;

mod common;

#[test]
fn toml_config_loads_chunk_table() {
    let root = common::project(&[(
        "entry-chunk.toml",
        r#"
[chunk]
context = "web"
mode = "replace"
min = "both"
exclude = ["**/legacy/**"]
exclude_names = ["polyfills"]
output = "dist/entries.json"

[[chunk.groups]]
name = "vendor"
modules = ["Button", "Modal"]

[[chunk.groups]]
name = "rest"

[chunk.entry]
main = "./src/index.js"
"#,
    )]);

    let loaded = load_config(Some(&root.path().join("entry-chunk.toml"))).expect("load");
    let cfg = loaded.cfg;

    assert_eq!(loaded.dir.as_deref(), Some(root.path()));
    assert_eq!(cfg.mode.as_deref(), Some("replace"));
    assert_eq!(cfg.min, Some(Minify::Both));
    assert_eq!(
        cfg.groups.unwrap(),
        vec![
            ChunkGroup::new("vendor", ["Button", "Modal"]),
            ChunkGroup::catch_all("rest"),
        ]
    );
    assert_eq!(cfg.exclude_names.unwrap(), vec!["polyfills"]);
    assert_eq!(
        resolve_pathbuf(loaded.dir.as_deref(), cfg.context.as_deref().unwrap()),
        root.path().join("web")
    );

    let entry = Entry::from_value(cfg.entry.expect("entry table"));
    assert_eq!(common::import_of(&entry, "main"), vec!["./src/index.js"]);
}

#[test]
fn json_config_accepts_boolean_min_and_empty_mode() {
    let root = common::project(&[(
        "entry-chunk.json",
        r#"{ "chunk": { "mode": "", "min": true, "groups": [{ "name": "all" }] } }"#,
    )]);

    let loaded = load_config(Some(&root.path().join("entry-chunk.json"))).expect("load");

    assert_eq!(loaded.cfg.min, Some(Minify::On));
    assert_eq!(loaded.cfg.mode.as_deref().map(str::parse::<Mode>), Some(Ok(Mode::Off)));
}

#[test]
fn chunk_flags_parse_into_groups() {
    let flags = vec![
        "name=vendor,module=Button,module=Modal".to_string(),
        "name=icons,modules=Star|Heart".to_string(),
        "name=rest".to_string(),
    ];
    let groups = parse_chunk_groups(&flags).expect("parse");
    assert_eq!(
        groups,
        vec![
            ChunkGroup::new("vendor", ["Button", "Modal"]),
            ChunkGroup::new("icons", ["Star", "Heart"]),
            ChunkGroup::catch_all("rest"),
        ]
    );
}

#[test]
fn chunk_flags_require_a_name() {
    let err = parse_chunk_groups(&["module=Button".to_string()]).unwrap_err();
    assert!(format!("{err}").contains("requires 'name='"));

    let err = parse_chunk_groups(&["name=a,color=red".to_string()]).unwrap_err();
    assert!(format!("{err}").contains("unknown chunk rule key"));
}

#[test]
fn entry_table_keeps_key_case_and_order() {
    let root = common::project(&[
        (
            "entry-chunk.toml",
            r#"
[chunk]
groups = [{ name = "all" }]

[chunk.entry]
zeta = "./src/z.js"
Alpha = "./src/a.js"
mid = "./src/m.js"
beta = "./src/b.js"
kappa = "./src/k.js"
adminPanel = "./src/admin.js"
"#,
        ),
        (
            "entry-chunk.yaml",
            "chunk:\n  entry:\n    Zulu: ./z.js\n    appShell: ./a.js\n",
        ),
    ]);

    let loaded = load_config(Some(&root.path().join("entry-chunk.toml"))).expect("load");
    let entry = Entry::from_value(loaded.cfg.entry.expect("entry table"));
    assert_eq!(
        common::keys(&entry),
        vec!["zeta", "Alpha", "mid", "beta", "kappa", "adminPanel"]
    );
    assert_eq!(common::import_of(&entry, "adminPanel"), vec!["./src/admin.js"]);

    let loaded = load_config(Some(&root.path().join("entry-chunk.yaml"))).expect("load");
    let entry = Entry::from_value(loaded.cfg.entry.expect("entry table"));
    assert_eq!(common::keys(&entry), vec!["Zulu", "appShell"]);
}
