use entry_chunk::*;

#[test]
fn matcher_tolerates_whitespace_variants() {
    let m = ReExportMatcher::new("Button").unwrap();
    for src in [
        "export { default as Button } from './button';",
        "export {default as Button} from './button'",
        "export  {  default   as  Button  }  from  'button';;",
    ] {
        assert!(m.find(src).is_some(), "no match in {src:?}");
    }
}

#[test]
fn matcher_is_exact_on_the_name() {
    let m = ReExportMatcher::new("Button").unwrap();
    assert!(m
        .find("export { default as ButtonGroup } from './group';")
        .is_none());
    assert!(m
        .find("export { default as MyButton } from './my';")
        .is_none());
}

#[test]
fn matcher_escapes_metacharacters() {
    let m = ReExportMatcher::new("$el").unwrap();
    assert!(m.find("export { default as $el } from './el';").is_some());
    let dot = ReExportMatcher::new("a.b").unwrap();
    assert!(dot.find("export { default as aXb } from './x';").is_none());
}

#[test]
fn double_quotes_are_not_recognised() {
    let m = ReExportMatcher::new("X").unwrap();
    assert!(m.find(r#"export { default as X } from "./x";"#).is_none());
}

#[test]
fn remove_first_only_drops_one_statement() {
    let m = ReExportMatcher::new("X").unwrap();
    let src = "export { default as X } from './x';\nexport { default as X } from './x2';\n";
    assert_eq!(
        m.remove_first(src),
        "\nexport { default as X } from './x2';\n"
    );
}

#[test]
fn find_reexports_reports_positions() {
    let src = "// barrel\nexport { default as A } from './a';\n  export { default as B } from '../b';\n";
    let found = find_reexports(src);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].name, "A");
    assert_eq!(found[0].specifier, "./a");
    assert_eq!((found[0].line, found[0].col), (2, 1));
    assert_eq!(found[1].name, "B");
    assert_eq!(found[1].specifier, "../b");
    assert_eq!((found[1].line, found[1].col), (3, 3));
    assert_eq!(found[1].text, "export { default as B } from '../b';");
}
