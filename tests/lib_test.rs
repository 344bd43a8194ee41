//! Library integration tests.

use custard::CustardError;

#[test]
fn error_types_are_public() {
    let err = CustardError::PackagesFailed {
        failed: vec!["a".into(), "b/c".into()],
    };
    assert_eq!(err.to_string(), "2 package(s) failed: a, b/c");
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> custard::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use custard::cli::{Cli, Commands};

    let cli = Cli::parse_from(["custard", "packages", "config.json", "repo"]);
    if let Commands::Packages(args) = cli.command {
        assert_eq!(args.checkout, std::path::PathBuf::from("repo"));
    } else {
        panic!("Expected Packages command");
    }
}

#[test]
fn variable_precedence_is_public() {
    use custard::variables::{list_variables, EnvSnapshot, Generators, VariableSource};
    use std::collections::BTreeMap;

    let mut automatic = Generators::new();
    automatic.insert("VAR".to_string(), Box::new(|| Ok("a".to_string())));
    let defaults = BTreeMap::from([("VAR".to_string(), "d".to_string())]);

    let vars = list_variables(
        &EnvSnapshot::new(),
        &BTreeMap::new(),
        &defaults,
        &automatic,
        |v| Ok(v.to_string()),
    )
    .unwrap();
    assert_eq!(vars.len(), 1);
    assert_eq!(vars[0].value, "d");
    assert_eq!(vars[0].source, VariableSource::DefaultValue);
}

#[test]
fn pattern_matching_is_public() {
    use custard::packages::matches;

    assert!(matches("a/b/c.txt", &["**/*.txt"]));
    assert!(!matches("a/b/c.txt.bak", &["*.txt"]));
}
